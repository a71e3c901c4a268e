//! Default values for per-session settings.

use crate::types::{CloseOnExit, Rgb};

pub fn host() -> String {
    "localhost".to_string()
}

pub fn port() -> u16 {
    22
}

pub fn cols() -> u32 {
    80
}

pub fn rows() -> u32 {
    24
}

pub fn scrollback_lines() -> u32 {
    2000
}

pub fn font_family() -> String {
    "Courier New".to_string()
}

pub fn font_size_pt() -> u32 {
    10
}

pub fn window_border() -> u32 {
    1
}

pub fn close_on_exit() -> CloseOnExit {
    CloseOnExit::OnCleanExit
}

/// The 16 ANSI colours followed by default foreground and background.
pub fn palette() -> Vec<Rgb> {
    vec![
        [0, 0, 0],
        [187, 0, 0],
        [0, 187, 0],
        [187, 187, 0],
        [0, 0, 187],
        [187, 0, 187],
        [0, 187, 187],
        [187, 187, 187],
        [85, 85, 85],
        [255, 85, 85],
        [85, 255, 85],
        [255, 255, 85],
        [85, 85, 255],
        [255, 85, 255],
        [85, 255, 255],
        [255, 255, 255],
        [187, 187, 187],
        [0, 0, 0],
    ]
}
