//! Typed failures reported by collaborators and the replay driver.
//!
//! None of these abort a window operation: font and palette failures fall
//! back to a default resource, backend failures mark the session unusable.

use thiserror::Error;

/// The font service could not produce the requested font.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("no usable font for '{family}' at {width}x{height} px")]
    NoUsableFont {
        family: String,
        width: u32,
        height: u32,
    },
    #[error("font service unavailable: {0}")]
    Unavailable(String),
}

/// The palette could not be realized against the display.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("display does not support palettes")]
    Unsupported,
    #[error("palette with {0} entries could not be created")]
    CreationFailed(usize),
}

/// The backend could not be started.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unable to open connection to {destination}: {reason}")]
    ConnectFailed { destination: String, reason: String },
    #[error("protocol {0:?} is not available")]
    UnsupportedProtocol(crate::config::Protocol),
}

/// A flat special-command list could not be nested into a menu tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("end-of-submenu marker at position {0} has no open submenu")]
    UnbalancedEnd(usize),
    #[error("submenu '{0}' is never closed")]
    UnclosedSubmenu(String),
}

/// A replay script could not be loaded.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay script: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse replay script: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
    #[error("step {step}: tab {tab} does not exist")]
    NoSuchTab { step: usize, tab: usize },
}
