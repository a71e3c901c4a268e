//! Frame style, scrollbar and chrome sizes derived from the active session.

use crate::config::{ResizePolicy, SessionConfig};
use crate::geometry::Dpi;
use crate::resize::{ChromeSizes, ZoomMode};
use crate::ui_constants::SCROLLBAR_WIDTH;
use winit::dpi::PhysicalSize;

/// Name shown in window titles.
pub const APP_NAME: &str = "par-tabs";

/// Window decorations the active session asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStyle {
    /// Thick, draggable frame
    pub resizable: bool,
    pub maximize_box: bool,
    pub always_on_top: bool,
    pub sunken_edge: bool,
    pub scrollbar: bool,
    /// Caption and borders; off while full-screen
    pub decorations: bool,
}

impl FrameStyle {
    pub fn for_session(config: &SessionConfig, zoom: ZoomMode) -> Self {
        let full_screen = zoom == ZoomMode::FullScreen;
        let disabled = config.resize_policy == ResizePolicy::Disabled;
        Self {
            resizable: !disabled && !full_screen,
            maximize_box: !disabled,
            always_on_top: config.always_on_top,
            sunken_edge: config.sunken_edge,
            scrollbar: config.scrollbar_visible(full_screen),
            decorations: !full_screen,
        }
    }
}

/// Scroll position of a session's terminal, in lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollbarState {
    /// Lines in scrollback plus screen
    pub total: u32,
    /// First visible line
    pub start: u32,
    /// Visible lines
    pub page: u32,
}

impl ScrollbarState {
    /// A terminal with no scrollback yet.
    pub fn for_rows(rows: u32) -> Self {
        Self {
            total: rows,
            start: 0,
            page: rows,
        }
    }
}

/// Chrome of `config` in a windowed and in a full-screen frame.
pub fn session_chrome(config: &SessionConfig, dpi: Dpi, strip_height: u32) -> ChromeSizes {
    ChromeSizes {
        windowed: chrome_size(&FrameStyle::for_session(config, ZoomMode::Normal), dpi, strip_height),
        full_screen: chrome_size(
            &FrameStyle::for_session(config, ZoomMode::FullScreen),
            dpi,
            strip_height,
        ),
    }
}

/// Client pixels taken by the scrollbar and the tab strip.
pub fn chrome_size(style: &FrameStyle, dpi: Dpi, strip_height: u32) -> PhysicalSize<u32> {
    let scrollbar = if style.scrollbar {
        dpi.scale_x(SCROLLBAR_WIDTH as i32).max(0) as u32
    } else {
        0
    };
    PhysicalSize::new(scrollbar, strip_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_screen_chrome_drops_scrollbar_by_default() {
        let chrome = session_chrome(&SessionConfig::default(), Dpi::default(), 26);
        assert_eq!(chrome.windowed, PhysicalSize::new(SCROLLBAR_WIDTH, 26));
        assert_eq!(chrome.full_screen, PhysicalSize::new(0, 26));
    }

    #[test]
    fn test_disabled_policy_locks_frame() {
        let config = SessionConfig {
            resize_policy: ResizePolicy::Disabled,
            ..Default::default()
        };
        let style = FrameStyle::for_session(&config, ZoomMode::Normal);
        assert!(!style.resizable);
        assert!(!style.maximize_box);
        assert!(style.decorations);
    }

    #[test]
    fn test_full_screen_uses_fullscreen_scrollbar_setting() {
        let config = SessionConfig::default();
        let normal = FrameStyle::for_session(&config, ZoomMode::Normal);
        let full = FrameStyle::for_session(&config, ZoomMode::FullScreen);
        assert!(normal.scrollbar);
        assert!(!full.scrollbar);
        assert!(!full.decorations);
        assert!(!full.resizable);
    }

    #[test]
    fn test_chrome_scales_scrollbar() {
        let style = FrameStyle {
            scrollbar: true,
            ..Default::default()
        };
        assert_eq!(chrome_size(&style, Dpi::uniform(192), 52), PhysicalSize::new(34, 52));
        let hidden = FrameStyle::default();
        assert_eq!(chrome_size(&hidden, Dpi::default(), 26), PhysicalSize::new(0, 26));
    }
}
