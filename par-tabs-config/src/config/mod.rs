//! Application-wide configuration.
//!
//! Sub-modules:
//! - `persistence`: `load` / `save` with atomic YAML writes and path helpers

mod persistence;

use crate::error::ConfigError;
use crate::session::SessionConfig;
use crate::types::{LogLevel, Rgb};
use serde::{Deserialize, Serialize};

/// Lowest accepted blink interval; anything faster is indistinguishable from flicker.
const MIN_BLINK_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Debug log file verbosity
    pub log_level: LogLevel,
    /// Ask before pasting text that contains line breaks
    pub confirm_paste: bool,
    /// Ask once before closing the window with sessions open
    pub confirm_exit: bool,
    pub tab_strip: TabStripConfig,
    /// Template for sessions opened from the new-session dialog
    pub default_session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            confirm_paste: true,
            confirm_exit: true,
            tab_strip: TabStripConfig::default(),
            default_session: SessionConfig::default(),
        }
    }
}

/// Tab strip geometry (at 96 DPI), blink timing and colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabStripConfig {
    pub tab_width: u32,
    pub height: u32,
    pub blink_interval_ms: u64,
    pub active_accent: Rgb,
    pub active_background: Rgb,
    pub inactive_background: Rgb,
    pub active_text: Rgb,
    pub inactive_text: Rgb,
    pub unusable_text: Rgb,
    pub notified_text: Rgb,
}

impl Default for TabStripConfig {
    fn default() -> Self {
        Self {
            tab_width: crate::defaults::tab_width(),
            height: crate::defaults::tab_height(),
            blink_interval_ms: crate::defaults::blink_interval_ms(),
            active_accent: crate::defaults::active_accent(),
            active_background: crate::defaults::active_background(),
            inactive_background: crate::defaults::inactive_background(),
            active_text: crate::defaults::active_text(),
            inactive_text: crate::defaults::inactive_text(),
            unusable_text: crate::defaults::unusable_text(),
            notified_text: crate::defaults::notified_text(),
        }
    }
}

impl Config {
    /// Check field ranges the controller relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_strip.tab_width == 0 || self.tab_strip.height == 0 {
            return Err(ConfigError::Validation(format!(
                "tab_strip size must be non-zero, got {}x{}",
                self.tab_strip.tab_width, self.tab_strip.height
            )));
        }
        if self.tab_strip.blink_interval_ms < MIN_BLINK_INTERVAL_MS {
            return Err(ConfigError::Validation(format!(
                "tab_strip.blink_interval_ms must be at least {MIN_BLINK_INTERVAL_MS}, got {}",
                self.tab_strip.blink_interval_ms
            )));
        }
        self.default_session
            .validate()
            .map_err(|msg| ConfigError::Validation(format!("default_session: {msg}")))
    }
}
