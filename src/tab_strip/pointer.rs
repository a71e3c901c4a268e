//! Pointer handling: hover, close-button press, drag arming and release.

use super::{DragState, HoverState, TabStrip, TabStripAction};
use crate::ui_constants::TAB_DRAG_START_MOVES;
use egui::Pos2;

impl TabStrip {
    /// Primary button pressed at `pos`.
    ///
    /// On a close button this only records the press. Elsewhere on a tab the
    /// tab is selected first, then a drag is armed unless the secondary
    /// button is also held.
    pub fn pointer_down(&mut self, pos: Pos2, secondary_held: bool) -> Vec<TabStripAction> {
        self.update_hover(pos);

        if let Some(index) = self.hover.tab
            && self.hover.close_hover
        {
            self.close_pressed = Some(index);
            let rect = self.close_button_rect(index);
            self.invalidate(rect);
            log::trace!("Close button pressed on tab {}", index);
            return Vec::new();
        }

        let Some(index) = self.tab_at(pos) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if self.selected != Some(index) {
            self.select(index);
            actions.push(TabStripAction::SelectionChanged(index));
        }

        if !secondary_held {
            self.drag = DragState::MightDrag { moves: 0 };
        }
        actions
    }

    /// Pointer moved to `pos`; `primary_held` is the live button state.
    pub fn pointer_move(&mut self, pos: Pos2, primary_held: bool) -> Vec<TabStripAction> {
        if let DragState::MightDrag { moves } = self.drag {
            if !primary_held {
                self.drag = DragState::Idle;
            } else {
                let moves = moves + 1;
                if moves > TAB_DRAG_START_MOVES {
                    match self.selected {
                        Some(dragged) => {
                            self.drag = DragState::Dragging {
                                dragged,
                                last_swapped: None,
                            };
                            self.captured = true;
                            log::debug!("Tab drag started on tab {}", dragged);
                        }
                        None => self.drag = DragState::Idle,
                    }
                } else {
                    self.drag = DragState::MightDrag { moves };
                }
            }
        }

        if self.is_dragging() {
            return self.drag_over(pos).into_iter().collect();
        }

        self.update_hover(pos);
        Vec::new()
    }

    /// Primary button released at `pos`.
    pub fn pointer_up(&mut self, pos: Pos2) -> Vec<TabStripAction> {
        if matches!(self.drag, DragState::MightDrag { .. }) {
            self.drag = DragState::Idle;
        }

        if self.is_dragging() {
            self.end_drag();
            return Vec::new();
        }

        let Some(pressed) = self.close_pressed.take() else {
            return Vec::new();
        };

        let rect = self.close_button_rect(pressed);
        self.invalidate(rect);
        self.update_hover(pos);

        if self.hover.tab == Some(pressed) && self.hover.close_hover {
            log::debug!("Close requested for tab {}", pressed);
            vec![TabStripAction::CloseRequested(pressed)]
        } else {
            Vec::new()
        }
    }

    /// Secondary button pressed: selects the tab under the pointer.
    pub fn secondary_down(&mut self, pos: Pos2) -> Vec<TabStripAction> {
        match self.tab_at(pos) {
            Some(index) if self.selected != Some(index) => {
                self.select(index);
                vec![TabStripAction::SelectionChanged(index)]
            }
            _ => Vec::new(),
        }
    }

    /// Secondary button released: asks for the tab context menu.
    pub fn secondary_up(&mut self, pos: Pos2) -> Vec<TabStripAction> {
        match self.tab_at(pos) {
            Some(index) => vec![TabStripAction::ContextMenuRequested {
                index,
                position: pos,
            }],
            None => Vec::new(),
        }
    }

    /// Pointer left the strip.
    pub fn pointer_leave(&mut self) {
        self.clear_hover();
        if let Some(pressed) = self.close_pressed.take() {
            let rect = self.close_button_rect(pressed);
            self.invalidate(rect);
        }
    }

    /// Capture taken away externally: ends a drag without a final reorder.
    pub fn capture_lost(&mut self) {
        if self.is_dragging() {
            log::debug!("Tab drag ended by capture loss");
            self.end_drag();
        }
    }

    fn end_drag(&mut self) {
        self.drag = DragState::Idle;
        self.captured = false;
    }

    /// Track the hovered tab, repainting only close buttons whose look changed.
    pub(crate) fn update_hover(&mut self, pos: Pos2) {
        let Some(index) = self.tab_at(pos) else {
            self.clear_hover();
            return;
        };

        let rect = self.tab_rect(index);
        let close_rect = self.metrics.close_button_rect(rect);
        let close_hover = close_rect.contains(pos);

        if self.hover.tab != Some(index) {
            if self.hover.close_hover {
                let old = self.metrics.close_button_rect(self.hover.rect);
                self.invalidate(old);
            }
            if close_hover {
                self.invalidate(close_rect);
            }
            self.hover = HoverState {
                tab: Some(index),
                rect,
                close_hover,
            };
        } else if self.hover.close_hover != close_hover {
            self.invalidate(close_rect);
            self.hover.close_hover = close_hover;
        }
    }

    pub(crate) fn clear_hover(&mut self) {
        if self.hover.tab.is_some() && self.hover.close_hover {
            let old = self.metrics.close_button_rect(self.hover.rect);
            self.invalidate(old);
        }
        self.hover = HoverState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::super::TabItem;
    use super::*;
    use crate::config::TabStripConfig;
    use crate::geometry::Dpi;
    use egui::pos2;

    fn strip(count: usize) -> TabStrip {
        let mut strip = TabStrip::new(&TabStripConfig::default(), Dpi::default());
        for i in 0..count {
            strip.insert_tab(i, TabItem::new(format!("{}. host", i + 1), 0, i as u64 + 1));
        }
        strip.select(0);
        strip.take_damage();
        strip
    }

    fn centre(strip: &TabStrip, index: usize) -> Pos2 {
        let rect = strip.tab_rect(index);
        pos2(rect.min.x + 20.0, rect.center().y)
    }

    fn close_centre(strip: &TabStrip, index: usize) -> Pos2 {
        strip.close_button_rect(index).center()
    }

    #[test]
    fn test_hover_only_damages_close_button_changes() {
        let mut strip = strip(2);
        strip.pointer_move(centre(&strip, 0), false);
        assert_eq!(strip.hover().tab, Some(0));
        assert!(strip.take_damage().is_empty());

        strip.pointer_move(close_centre(&strip, 0), false);
        assert!(strip.hover().close_hover);
        assert_eq!(strip.take_damage(), vec![strip.close_button_rect(0)]);

        strip.pointer_move(centre(&strip, 1), false);
        assert_eq!(strip.hover().tab, Some(1));
        assert_eq!(strip.take_damage(), vec![strip.close_button_rect(0)]);
    }

    #[test]
    fn test_close_click_on_same_button_requests_close() {
        let mut strip = strip(3);
        let at = close_centre(&strip, 2);
        assert!(strip.pointer_down(at, false).is_empty());
        assert_eq!(strip.close_pressed(), Some(2));
        assert_eq!(strip.selected(), Some(0));

        let actions = strip.pointer_up(at);
        assert_eq!(actions, vec![TabStripAction::CloseRequested(2)]);
        assert_eq!(strip.close_pressed(), None);
    }

    #[test]
    fn test_close_release_elsewhere_is_ignored() {
        let mut strip = strip(2);
        strip.pointer_down(close_centre(&strip, 1), false);
        assert!(strip.pointer_up(close_centre(&strip, 0)).is_empty());
        assert!(strip.pointer_up(close_centre(&strip, 1)).is_empty());
    }

    #[test]
    fn test_press_selects_then_arms_drag() {
        let mut strip = strip(2);
        let actions = strip.pointer_down(centre(&strip, 1), false);
        assert_eq!(actions, vec![TabStripAction::SelectionChanged(1)]);
        assert_eq!(strip.drag_state(), DragState::MightDrag { moves: 0 });

        assert!(strip.pointer_down(centre(&strip, 1), false).is_empty());
    }

    #[test]
    fn test_press_with_secondary_held_does_not_arm() {
        let mut strip = strip(2);
        strip.pointer_down(centre(&strip, 1), true);
        assert_eq!(strip.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drag_needs_more_than_two_held_moves() {
        let mut strip = strip(2);
        let at = centre(&strip, 0);
        strip.pointer_down(at, false);
        strip.pointer_move(at, true);
        strip.pointer_move(at, true);
        assert!(!strip.is_dragging());
        strip.pointer_move(at, true);
        assert!(strip.is_dragging());
        assert!(strip.has_capture());
    }

    #[test]
    fn test_released_button_disarms_drag() {
        let mut strip = strip(2);
        let at = centre(&strip, 0);
        strip.pointer_down(at, false);
        strip.pointer_move(at, true);
        strip.pointer_move(at, false);
        assert_eq!(strip.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_leave_clears_hover_and_press() {
        let mut strip = strip(2);
        strip.pointer_down(close_centre(&strip, 1), false);
        strip.pointer_leave();
        assert_eq!(strip.hover().tab, None);
        assert_eq!(strip.close_pressed(), None);
    }

    #[test]
    fn test_secondary_release_requests_context_menu() {
        let mut strip = strip(2);
        let at = centre(&strip, 1);
        assert_eq!(
            strip.secondary_down(at),
            vec![TabStripAction::SelectionChanged(1)]
        );
        assert_eq!(
            strip.secondary_up(at),
            vec![TabStripAction::ContextMenuRequested {
                index: 1,
                position: at
            }]
        );
    }
}
