//! Enums and small value types shared by the configuration structs.

use serde::{Deserialize, Serialize};

/// 8-bit RGB triple as stored in the config file.
pub type Rgb = [u8; 3];

/// Log level for the debug log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            LogLevel::Off => "Off",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// How a window-size change is resolved into grid and font changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// The window cannot be resized; any change is corrected back.
    Disabled,
    /// Window size changes resize the terminal grid.
    #[default]
    Grid,
    /// Window size changes recreate the font at a new cell size.
    Font,
    /// Grid while dragging, font when the font modifier is held or on zoom.
    Either,
}

impl ResizePolicy {
    pub fn display_name(&self) -> &'static str {
        match self {
            ResizePolicy::Disabled => "Disabled",
            ResizePolicy::Grid => "Change the number of rows and columns",
            ResizePolicy::Font => "Change the size of the font",
            ResizePolicy::Either => "Change font size only when maximised",
        }
    }

    /// Whether the user may resize or maximize the window at all.
    pub fn allows_resize(self) -> bool {
        self != ResizePolicy::Disabled
    }
}

/// What happens to a tab when its remote end exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CloseOnExit {
    /// Keep the tab open (marked unusable).
    Never,
    /// Close only when the remote exited cleanly.
    #[default]
    OnCleanExit,
    /// Always close the tab.
    Always,
}

/// Connection protocol of a session; selects the tab icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    #[default]
    Ssh,
    Telnet,
    Rlogin,
    Raw,
    Serial,
    Supdup,
}

impl Protocol {
    /// Index into the tab strip's protocol image list.
    pub fn image_index(self) -> usize {
        match self {
            Protocol::Ssh => 0,
            Protocol::Telnet => 1,
            Protocol::Rlogin => 2,
            Protocol::Raw => 3,
            Protocol::Serial => 4,
            Protocol::Supdup => 5,
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Protocol::Ssh => 22,
            Protocol::Telnet => 23,
            Protocol::Rlogin => 513,
            Protocol::Supdup => 95,
            Protocol::Raw | Protocol::Serial => 0,
        }
    }
}

/// Font selection for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default = "crate::defaults::font_family")]
    pub family: String,
    /// Height in points; converted to pixels with the window DPI.
    #[serde(default = "crate::defaults::font_size_pt")]
    pub size_pt: u32,
    #[serde(default)]
    pub bold: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: crate::defaults::font_family(),
            size_pt: crate::defaults::font_size_pt(),
            bold: false,
        }
    }
}
