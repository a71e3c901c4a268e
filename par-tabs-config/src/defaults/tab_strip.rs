//! Default values for the tab strip look and timing.

use crate::types::Rgb;

/// Tab width in pixels at 96 DPI.
pub fn tab_width() -> u32 {
    160
}

/// Tab strip height in pixels at 96 DPI.
pub fn tab_height() -> u32 {
    24
}

pub fn blink_interval_ms() -> u64 {
    500
}

pub fn active_accent() -> Rgb {
    [250, 170, 60]
}

pub fn active_background() -> Rgb {
    [240, 240, 240]
}

pub fn inactive_background() -> Rgb {
    [192, 192, 192]
}

pub fn active_text() -> Rgb {
    [0, 0, 0]
}

pub fn inactive_text() -> Rgb {
    [128, 128, 128]
}

pub fn unusable_text() -> Rgb {
    [255, 0, 0]
}

pub fn notified_text() -> Rgb {
    [0, 0, 255]
}
