//! Typed error variants for the par-tabs-config crate.
//!
//! `Config::load` and friends return `anyhow::Result`; callers that want to
//! match on a specific failure can `downcast_ref::<ConfigError>()`.

use thiserror::Error;

/// Errors that can occur when loading, validating or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and the accepted range.
    #[error("Config validation error: {0}")]
    Validation(String),
}
