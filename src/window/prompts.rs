//! Data passed to and returned from the modal prompts.

use crate::config::SessionConfig;

/// Question asked before closing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosePrompt {
    pub title: String,
    pub message: String,
}

impl ClosePrompt {
    pub const QUESTION: &'static str = "Are you sure you want to close this session?";

    /// The standard question, followed by the backend's warning when it has one.
    pub fn new(session_label: &str, warning: Option<&str>) -> Self {
        let message = match warning {
            Some(warning) if !warning.is_empty() => format!("{}\n\n{}", Self::QUESTION, warning),
            _ => Self::QUESTION.to_string(),
        };
        Self {
            title: format!("{session_label} Exit Confirmation"),
            message,
        }
    }
}

/// Why a remote end went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteNoticeKind {
    /// The remote end exited
    Exited,
    /// The connection failed
    Fatal,
}

/// Notice shown when the active session's remote end goes away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteNotice {
    pub kind: RemoteNoticeKind,
    pub session_label: String,
    pub message: String,
    /// The tab may be kept (inert) instead of closed
    pub can_keep: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeResponse {
    CloseTab,
    KeepTab,
}

/// Result of asking to close a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// The user declined; nothing changed
    Cancelled,
    /// The request did not name a live session or a close was already underway
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Text to send, possibly edited by the user
    Accepted(String),
    Rejected,
}

/// A session configuration picked in a dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRequest {
    pub config: SessionConfig,
    /// Saved-session name; the host is used when `None`
    pub name: Option<String>,
}

impl SessionRequest {
    pub fn new(config: SessionConfig) -> Self {
        Self { config, name: None }
    }

    pub fn named(config: SessionConfig, name: impl Into<String>) -> Self {
        Self {
            config,
            name: Some(name.into()),
        }
    }

    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.config.host.clone())
    }
}
