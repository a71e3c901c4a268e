//! Per-tab data and the interaction state of the strip.

use crate::session::SessionId;
use egui::Rect;
use std::time::{Duration, Instant};

/// Attention state of a tab that received output while in the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyState {
    #[default]
    Clear,
    /// Notified once; label recoloured.
    Set,
    /// Notified again; blinking with the glyph currently hidden.
    SetBlink,
    /// Blinking with the glyph currently shown.
    Blink,
}

impl NotifyState {
    pub fn is_notified(self) -> bool {
        self != NotifyState::Clear
    }

    pub fn is_blinking(self) -> bool {
        matches!(self, NotifyState::SetBlink | NotifyState::Blink)
    }
}

/// One tab's display data. Moves as a unit when tabs are exchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TabItem {
    pub label: String,
    /// Index into the protocol image list
    pub image: usize,
    /// Session shown by this tab
    pub session: SessionId,
    pub notify: NotifyState,
    /// Remote end closed; shown but inert
    pub unusable: bool,
}

impl TabItem {
    pub fn new(label: impl Into<String>, image: usize, session: SessionId) -> Self {
        Self {
            label: label.into(),
            image,
            session,
            notify: NotifyState::Clear,
            unusable: false,
        }
    }
}

/// Tab under the pointer and whether the pointer is on its close button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverState {
    pub tab: Option<usize>,
    pub rect: Rect,
    pub close_hover: bool,
}

impl Default for HoverState {
    fn default() -> Self {
        Self {
            tab: None,
            rect: Rect::NOTHING,
            close_hover: false,
        }
    }
}

/// Drag progress of the current primary-button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed on a tab; counting held moves before the drag starts.
    MightDrag { moves: u32 },
    Dragging {
        /// Current position of the dragged tab
        dragged: usize,
        /// Tab most recently swapped with, to avoid swapping back and forth
        last_swapped: Option<usize>,
    },
}

/// The single blink timer shared by every tab of the strip.
#[derive(Debug, Clone, Copy)]
pub struct BlinkTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl BlinkTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Start unless already running.
    pub(crate) fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    pub(crate) fn stop(&mut self) {
        self.next_due = None;
    }

    /// Whether a tick is due at `now`; reschedules when it is.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}
