//! Configuration system for the par-tabs window controller.
//!
//! This crate provides configuration loading, saving, and default values.
//! It includes:
//!
//! - The application-wide [`Config`] (logging, prompts, tab strip look)
//! - Per-session settings ([`SessionConfig`]) that the controller snapshots
//!   into every session it opens
//! - The resize policy and close-on-exit enums shared with the controller

pub mod config;
pub mod defaults;
mod error;
pub mod session;
mod types;

pub use config::{Config, TabStripConfig};
pub use error::ConfigError;
pub use session::SessionConfig;
pub use types::{CloseOnExit, FontSpec, LogLevel, Protocol, ResizePolicy, Rgb};
