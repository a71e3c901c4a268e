//! DPI-scaled tab metrics and the rectangles derived from them.
//!
//! Tabs are laid out left to right at a fixed width starting at the strip
//! origin. Each item starts one edge below the strip top; the active tab
//! grows back into that edge when drawn.

use crate::config::TabStripConfig;
use crate::geometry::Dpi;
use crate::ui_constants::{
    TAB_ACCENT_HEIGHT, TAB_BLINK_SIZE, TAB_CLOSE_PADDING_X, TAB_CLOSE_PADDING_Y, TAB_CLOSE_SIZE,
    TAB_EDGE, TAB_IMAGE_HEIGHT, TAB_IMAGE_PADDING_X, TAB_IMAGE_WIDTH, TAB_LABEL_GAP,
};
use egui::{Pos2, Rect, Vec2, pos2, vec2};

/// Tab metrics in physical pixels for one DPI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabMetrics {
    pub dpi: Dpi,
    pub image_zone: Vec2,
    pub blink_zone: Vec2,
    pub close_zone: Vec2,
    pub image_padding_x: f32,
    pub close_padding_x: f32,
    pub close_padding_y: f32,
    pub label_gap: f32,
    pub edge: f32,
    pub accent_height: f32,
    pub tab_width: f32,
    pub strip_height: f32,
}

fn scaled(dpi: Dpi, width: u32, height: u32) -> Vec2 {
    vec2(
        dpi.scale_x(width as i32) as f32,
        dpi.scale_y(height as i32) as f32,
    )
}

impl TabMetrics {
    pub fn new(dpi: Dpi, config: &TabStripConfig) -> Self {
        Self {
            dpi,
            image_zone: scaled(dpi, TAB_IMAGE_WIDTH, TAB_IMAGE_HEIGHT),
            blink_zone: scaled(dpi, TAB_BLINK_SIZE, TAB_BLINK_SIZE),
            close_zone: scaled(dpi, TAB_CLOSE_SIZE, TAB_CLOSE_SIZE),
            image_padding_x: dpi.scale_x(TAB_IMAGE_PADDING_X as i32) as f32,
            close_padding_x: dpi.scale_x(TAB_CLOSE_PADDING_X as i32) as f32,
            close_padding_y: dpi.scale_y(TAB_CLOSE_PADDING_Y as i32) as f32,
            label_gap: dpi.scale_x(TAB_LABEL_GAP as i32) as f32,
            edge: dpi.scale_y(TAB_EDGE as i32) as f32,
            accent_height: dpi.scale_y(TAB_ACCENT_HEIGHT as i32) as f32,
            tab_width: dpi.scale_x(config.tab_width as i32) as f32,
            strip_height: dpi.scale_y(config.height as i32) as f32,
        }
    }

    /// Vertical pixels the strip adds above the terminal area.
    pub fn extra_height(&self) -> u32 {
        (self.strip_height + self.edge) as u32
    }

    /// Rectangle of tab `index` for a strip whose top-left corner is `origin`.
    pub fn tab_rect(&self, origin: Pos2, index: usize) -> Rect {
        Rect::from_min_size(
            pos2(
                origin.x + index as f32 * self.tab_width,
                origin.y + self.edge,
            ),
            vec2(self.tab_width, self.strip_height - self.edge),
        )
    }

    /// Close button inside `tab`: right- and bottom-aligned behind its padding.
    pub fn close_button_rect(&self, tab: Rect) -> Rect {
        Rect::from_min_size(
            pos2(
                tab.max.x - self.close_padding_x - self.close_zone.x,
                tab.max.y - self.close_padding_y - self.close_zone.y,
            ),
            self.close_zone,
        )
    }

    /// Protocol image inside a tab frame, vertically centred.
    pub fn image_rect(&self, frame: Rect) -> Rect {
        let top = frame.min.y + ((frame.height() - self.image_zone.y) / 2.0).floor();
        Rect::from_min_size(pos2(frame.min.x + self.image_padding_x, top), self.image_zone)
    }

    /// Blink glyph, centred over the protocol image.
    pub fn blink_rect(&self, image: Rect) -> Rect {
        Rect::from_center_size(image.center(), self.blink_zone)
    }

    /// Tab under `pos`, treating right and bottom edges as outside.
    pub fn hit_test(&self, origin: Pos2, count: usize, pos: Pos2) -> Option<usize> {
        (0..count).find(|&i| {
            let rect = self.tab_rect(origin, i);
            pos.x >= rect.min.x && pos.x < rect.max.x && pos.y >= rect.min.y && pos.y < rect.max.y
        })
    }
}
