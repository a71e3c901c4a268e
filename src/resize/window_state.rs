//! Window-wide geometry shared by every session of one frame window.

use crate::geometry::{Dpi, PixelRect, size_add, size_sub};
use winit::dpi::PhysicalSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomMode {
    #[default]
    Normal,
    Maximized,
    FullScreen,
}

impl ZoomMode {
    /// Maximized or full-screen.
    pub fn is_zoomed(self) -> bool {
        self != ZoomMode::Normal
    }
}

/// Chrome of a windowed and of a full-screen frame.
///
/// Full-screen can hide the scrollbar, so the two differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChromeSizes {
    pub windowed: PhysicalSize<u32>,
    pub full_screen: PhysicalSize<u32>,
}

impl ChromeSizes {
    pub fn uniform(chrome: PhysicalSize<u32>) -> Self {
        Self {
            windowed: chrome,
            full_screen: chrome,
        }
    }

    pub fn for_zoom(&self, zoom: ZoomMode) -> PhysicalSize<u32> {
        if zoom == ZoomMode::FullScreen {
            self.full_screen
        } else {
            self.windowed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub dpi: Dpi,
    /// Frame pixels around the client area (borders, caption)
    pub frame_extra: PhysicalSize<u32>,
    /// Client pixels not used by the terminal (scrollbar width, tab strip height)
    pub chrome: PhysicalSize<u32>,
    /// Chrome per zoom mode; `chrome` always follows `zoom`
    pub chrome_sizes: ChromeSizes,
    /// Everything outside the character grid as of the last solve
    pub extra: PhysicalSize<u32>,
    /// Current client area, chrome included
    pub client: PhysicalSize<u32>,
    pub outer: PixelRect,
    /// Outer rectangle the window returns to when restored
    pub restored: PixelRect,
    /// Monitor the window is on
    pub monitor: PixelRect,
    pub zoom: ZoomMode,
    pub minimized: bool,
    /// Maximized before the current resize sequence
    pub was_zoomed: bool,
}

impl WindowGeometry {
    pub fn new(dpi: Dpi, outer: PixelRect, frame_extra: PhysicalSize<u32>, monitor: PixelRect) -> Self {
        Self {
            dpi,
            frame_extra,
            chrome: PhysicalSize::new(0, 0),
            chrome_sizes: ChromeSizes::default(),
            extra: frame_extra,
            client: size_sub(outer.size, frame_extra),
            outer,
            restored: outer,
            monitor,
            zoom: ZoomMode::Normal,
            minimized: false,
            was_zoomed: false,
        }
    }

    pub fn set_zoom(&mut self, zoom: ZoomMode) {
        self.zoom = zoom;
        self.chrome = self.chrome_sizes.for_zoom(zoom);
    }

    pub fn set_chrome(&mut self, sizes: ChromeSizes) {
        self.chrome_sizes = sizes;
        self.chrome = sizes.for_zoom(self.zoom);
    }

    /// Client area left for the character grid and its border.
    pub fn terminal_area(&self) -> PhysicalSize<u32> {
        size_sub(self.client, self.chrome)
    }

    /// Extra pixels of a normal window whose grid sits `border` pixels from each edge.
    pub fn normal_extra(&self, border: u32) -> PhysicalSize<u32> {
        size_add(
            size_add(self.frame_extra, self.chrome),
            PhysicalSize::new(border * 2, border * 2),
        )
    }

    /// Extra pixels of a zoomed window (no border around the grid).
    pub fn zoomed_extra(&self) -> PhysicalSize<u32> {
        size_add(self.frame_extra, self.chrome)
    }

    pub fn is_full_screen(&self) -> bool {
        self.zoom == ZoomMode::FullScreen
    }
}
