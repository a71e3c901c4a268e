//! Per-session configuration snapshot.
//!
//! The window controller clones a `SessionConfig` into every session it opens
//! and only ever reads it; changes arrive as a whole new snapshot from the
//! reconfigure dialog.

use crate::types::{CloseOnExit, FontSpec, Protocol, ResizePolicy, Rgb};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Destination host; also the default session name.
    pub host: String,
    pub port: u16,
    pub protocol: Protocol,

    /// Terminal grid rows
    pub rows: u32,
    /// Terminal grid columns
    pub cols: u32,
    /// Lines of scrollback passed along with every grid resize
    pub scrollback_lines: u32,

    pub font: FontSpec,
    pub resize_policy: ResizePolicy,

    /// Gap in pixels between the window edge and the character grid
    pub window_border: u32,
    pub scrollbar: bool,
    pub scrollbar_in_fullscreen: bool,
    pub always_on_top: bool,
    pub sunken_edge: bool,

    /// Ask before closing a tab whose connection is still alive
    pub warn_on_close: bool,
    pub close_on_exit: CloseOnExit,

    /// Keep showing the window title even when minimized
    pub window_title_always: bool,
    pub palette: Vec<Rgb>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: crate::defaults::host(),
            port: crate::defaults::port(),
            protocol: Protocol::default(),
            rows: crate::defaults::rows(),
            cols: crate::defaults::cols(),
            scrollback_lines: crate::defaults::scrollback_lines(),
            font: FontSpec::default(),
            resize_policy: ResizePolicy::default(),
            window_border: crate::defaults::window_border(),
            scrollbar: true,
            scrollbar_in_fullscreen: false,
            always_on_top: false,
            sunken_edge: false,
            warn_on_close: true,
            close_on_exit: crate::defaults::close_on_exit(),
            window_title_always: false,
            palette: crate::defaults::palette(),
        }
    }
}

impl SessionConfig {
    /// Whether enough is set to open a connection without asking the user.
    pub fn is_launchable(&self) -> bool {
        !self.host.trim().is_empty() || self.protocol == Protocol::Serial
    }

    /// Scrollbar visibility for the given full-screen state.
    pub fn scrollbar_visible(&self, full_screen: bool) -> bool {
        if full_screen {
            self.scrollbar_in_fullscreen
        } else {
            self.scrollbar
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.rows == 0 || self.cols == 0 {
            return Err(format!(
                "session grid must be at least 1x1, got {}x{}",
                self.cols, self.rows
            ));
        }
        if self.font.size_pt == 0 {
            return Err("font size_pt must be greater than zero".to_string());
        }
        Ok(())
    }
}
