//! Resize policy engine.
//!
//! Reconciles the terminal grid, the font cell and the window size of the
//! active session every time the window geometry changes. The engine owns the
//! window-wide [`WindowGeometry`]; each session's font cell, grid offset and
//! maximize memory come in through a [`ResizeTarget`].
//!
//! Every transition returns a [`ResizeOutcome`] describing what the window
//! host must do. Window size changes are requests: the new size comes back as
//! a later [`ResizeEngine::resized`] call.
//!
//! ## Module layout
//!
//! - [`font`]: font requests and fallback.
//! - [`target`]: per-session geometry and the borrowed engine view.
//! - [`window_state`]: window-wide geometry and zoom mode.
//! - `reset`: the grid/font/window solve for each [`ResetMode`].
//! - `transitions`: named transitions for window events.
//! - `sizing`: stepping an interactive drag rectangle to whole cells.

pub mod font;
mod reset;
mod sizing;
pub mod target;
mod transitions;
pub mod window_state;

pub use font::FontRequest;
pub use sizing::{ResizeEdge, SizingOutcome};
pub use target::{MaximizeMemory, ResizeTarget, SessionGeometry};
pub use transitions::GridRequestOutcome;
pub use window_state::{ChromeSizes, WindowGeometry, ZoomMode};

use crate::geometry::PixelRect;
use winit::dpi::PhysicalSize;

/// Window changes the host is asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    /// Set the outer size, keeping the position
    Resize(PhysicalSize<u32>),
    /// Set the outer rectangle
    MoveResize(PixelRect),
    Maximize,
    Restore,
}

/// How much of the geometry to recompute, from least to most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResetMode {
    /// Re-fit after leaving a zoomed state
    Restore,
    /// Keep sizes, re-centre the grid
    Reposition,
    /// Force the window to exactly fit font and grid
    Reinit,
    /// Reload the natural font, then as `Reinit`
    ReloadFonts,
    /// Reload fonts for a new DPI and move the window in one step
    DpiChanged,
}

/// The platform's reason for a size change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Restored,
    Maximized,
    Minimized,
}

/// A client-area size change reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeEvent {
    pub kind: SizeKind,
    /// New client size, chrome included
    pub client: PhysicalSize<u32>,
    /// Modifier asking the `Either` policy for a font response
    pub font_modifier: bool,
}

/// What the host has to do after a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub requests: Vec<WindowRequest>,
    /// Terminal area needs a full repaint
    pub redraw: bool,
    /// Frame style depends on zoom mode and must be re-applied
    pub frame_changed: bool,
}

impl ResizeOutcome {
    pub(crate) fn request(&mut self, request: WindowRequest) {
        self.requests.push(request);
    }

    pub(crate) fn merge(&mut self, other: ResizeOutcome) {
        self.requests.extend(other.requests);
        self.redraw |= other.redraw;
        self.frame_changed |= other.frame_changed;
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && !self.redraw && !self.frame_changed
    }
}

/// Window-wide resize state machine.
#[derive(Debug, Clone)]
pub struct ResizeEngine {
    geometry: WindowGeometry,
    /// Inside a platform interactive move/size loop
    interactive: bool,
    /// Go full-screen as soon as the pending maximize completes
    full_screen_on_maximize: bool,
    /// Window rectangle proposed by the platform for the last DPI change
    dpi_suggested: Option<PixelRect>,
}

impl ResizeEngine {
    pub fn new(geometry: WindowGeometry) -> Self {
        Self {
            geometry,
            interactive: false,
            full_screen_on_maximize: false,
            dpi_suggested: None,
        }
    }

    pub fn geometry(&self) -> &WindowGeometry {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut WindowGeometry {
        &mut self.geometry
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn zoom(&self) -> ZoomMode {
        self.geometry.zoom
    }
}
