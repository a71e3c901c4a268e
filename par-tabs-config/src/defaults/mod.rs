//! Default value functions for configuration.
//!
//! Each sub-module groups related free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes.

mod session;
mod tab_strip;

pub use session::{
    close_on_exit, cols, font_family, font_size_pt, host, palette, port, rows, scrollback_lines,
    window_border,
};
pub use tab_strip::{
    active_accent, active_background, active_text, blink_interval_ms, inactive_background,
    inactive_text, notified_text, tab_height, tab_width, unusable_text,
};

pub fn bool_true() -> bool {
    true
}
