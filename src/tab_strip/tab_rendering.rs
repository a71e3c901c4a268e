//! Deterministic per-tab visuals.
//!
//! The strip does not paint. [`tab_visual`] turns a tab's flags into the
//! rectangles and colours a renderer needs, so every look can be tested
//! without a GPU or window.

use super::layout::TabMetrics;
use super::{NotifyState, TabStrip};
use crate::config::{Rgb, TabStripConfig};
use egui::{Color32, Rect, vec2};

/// Which close button image to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseButtonLook {
    /// Close button of the active tab
    Normal,
    /// Close button of a background tab
    Inactive,
    Hover,
    Pressed,
}

/// Everything the visual depends on.
#[derive(Debug, Clone, Copy)]
pub struct TabDrawInput<'a> {
    /// Item rectangle from the layout
    pub rect: Rect,
    pub label: &'a str,
    pub image: usize,
    pub active: bool,
    pub close_hovered: bool,
    pub close_pressed: bool,
    pub unusable: bool,
    pub notify: NotifyState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabVisual {
    /// Area filled with `background`
    pub frame: Rect,
    pub background: Color32,
    /// Accent bar across the top of the active tab
    pub accent: Option<(Rect, Color32)>,
    pub image: Rect,
    pub image_index: usize,
    /// Blink glyph, present while it is in its visible phase
    pub blink_glyph: Option<Rect>,
    pub close_button: Rect,
    pub close_look: CloseButtonLook,
    pub label_rect: Rect,
    pub label: String,
    pub text_color: Color32,
}

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Build the visual for one tab.
///
/// The active tab grows sideways and upward by one edge into the strip
/// border and carries the accent bar. Background tabs use the muted colours,
/// with the label recoloured when the tab is unusable or notified.
pub fn tab_visual(input: &TabDrawInput<'_>, metrics: &TabMetrics, colors: &TabStripConfig) -> TabVisual {
    let edge = metrics.edge;
    let (frame, background, accent) = if input.active {
        let frame = Rect::from_min_max(
            input.rect.min - vec2(edge, edge),
            input.rect.max + vec2(edge, 0.0),
        );
        let bar = Rect::from_min_max(
            frame.min,
            egui::pos2(frame.max.x, frame.min.y + metrics.accent_height),
        );
        (
            frame,
            color(colors.active_background),
            Some((bar, color(colors.active_accent))),
        )
    } else {
        (input.rect, color(colors.inactive_background), None)
    };

    let text_color = if input.unusable {
        color(colors.unusable_text)
    } else if input.active {
        color(colors.active_text)
    } else if input.notify.is_notified() {
        color(colors.notified_text)
    } else {
        color(colors.inactive_text)
    };

    let image = metrics.image_rect(frame);
    let blink_glyph = (input.notify == NotifyState::Blink).then(|| metrics.blink_rect(image));

    // Close button stays where hit testing expects it, independent of the frame growth
    let close_button = metrics.close_button_rect(input.rect);
    let close_look = if input.close_pressed {
        CloseButtonLook::Pressed
    } else if input.close_hovered {
        CloseButtonLook::Hover
    } else if input.active {
        CloseButtonLook::Normal
    } else {
        CloseButtonLook::Inactive
    };

    let label_left = image.max.x + metrics.label_gap;
    let label_right = (close_button.min.x - metrics.label_gap).max(label_left);
    let label_rect = Rect::from_min_max(
        egui::pos2(label_left, frame.min.y),
        egui::pos2(label_right, frame.max.y),
    );

    TabVisual {
        frame,
        background,
        accent,
        image,
        image_index: input.image,
        blink_glyph,
        close_button,
        close_look,
        label_rect,
        label: input.label.to_string(),
        text_color,
    }
}

impl TabStrip {
    /// Visual for tab `index` in the strip's current state.
    pub fn visual(&self, index: usize) -> Option<TabVisual> {
        let item = self.items.get(index)?;
        let input = TabDrawInput {
            rect: self.tab_rect(index),
            label: &item.label,
            image: item.image,
            active: self.selected == Some(index),
            close_hovered: self.hover.tab == Some(index) && self.hover.close_hover,
            close_pressed: self.close_pressed == Some(index),
            unusable: item.unusable,
            notify: item.notify,
        };
        Some(tab_visual(&input, &self.metrics, &self.config))
    }

    /// Visuals for every tab, left to right.
    pub fn visuals(&self) -> Vec<TabVisual> {
        (0..self.items.len()).filter_map(|i| self.visual(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dpi;

    fn input(active: bool) -> TabDrawInput<'static> {
        let metrics = TabMetrics::new(Dpi::default(), &TabStripConfig::default());
        TabDrawInput {
            rect: metrics.tab_rect(egui::Pos2::ZERO, 0),
            label: "1. host",
            image: 0,
            active,
            close_hovered: false,
            close_pressed: false,
            unusable: false,
            notify: NotifyState::Clear,
        }
    }

    fn render(input: &TabDrawInput<'_>) -> TabVisual {
        let config = TabStripConfig::default();
        let metrics = TabMetrics::new(Dpi::default(), &config);
        tab_visual(input, &metrics, &config)
    }

    #[test]
    fn test_active_tab_extends_and_has_accent() {
        let base = input(true);
        let visual = render(&base);
        assert_eq!(visual.frame.min.y, base.rect.min.y - 2.0);
        assert_eq!(visual.frame.width(), base.rect.width() + 4.0);
        let (bar, bar_color) = visual.accent.unwrap();
        assert_eq!(bar.height(), 2.0);
        assert_eq!(bar_color, Color32::from_rgb(250, 170, 60));
        assert_eq!(visual.close_look, CloseButtonLook::Normal);
    }

    #[test]
    fn test_inactive_tab_is_muted() {
        let visual = render(&input(false));
        assert!(visual.accent.is_none());
        assert_eq!(visual.background, Color32::from_rgb(192, 192, 192));
        assert_eq!(visual.text_color, Color32::from_rgb(128, 128, 128));
        assert_eq!(visual.close_look, CloseButtonLook::Inactive);
    }

    #[test]
    fn test_unusable_and_notified_recolour_label() {
        let mut unusable = input(false);
        unusable.unusable = true;
        unusable.notify = NotifyState::Set;
        assert_eq!(render(&unusable).text_color, Color32::from_rgb(255, 0, 0));

        let mut notified = input(false);
        notified.notify = NotifyState::Set;
        assert_eq!(render(&notified).text_color, Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn test_blink_glyph_only_in_visible_phase() {
        let mut hidden = input(false);
        hidden.notify = NotifyState::SetBlink;
        assert!(render(&hidden).blink_glyph.is_none());

        let mut shown = input(false);
        shown.notify = NotifyState::Blink;
        assert!(render(&shown).blink_glyph.is_some());
    }

    #[test]
    fn test_pressed_wins_over_hover() {
        let mut pressed = input(false);
        pressed.close_hovered = true;
        pressed.close_pressed = true;
        assert_eq!(render(&pressed).close_look, CloseButtonLook::Pressed);
    }
}
