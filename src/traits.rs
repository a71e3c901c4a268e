//! Contracts between the window controller and its collaborators.
//!
//! The controller only ever talks to terminals, fonts, backends, dialogs and
//! the platform window through these traits. `crate::headless` provides
//! in-memory implementations used by the replay tool and the tests.

use crate::config::{Rgb, SessionConfig};
use crate::error::{BackendError, FontError, PaletteError};
use crate::geometry::{CellSize, GridSize};
use crate::menu::{MenuTree, SpecialCommand};
use crate::resize::{FontRequest, WindowRequest};
use crate::window::chrome::{FrameStyle, ScrollbarState};
use crate::window::prompts::{ClosePrompt, NoticeResponse, RemoteNotice, SessionRequest};

// ── Terminal grid ────────────────────────────────────────────────────────────

/// The character-grid emulator of one session.
pub trait TerminalGrid {
    /// Resize the grid, keeping `scrollback` lines of history.
    fn resize(&mut self, rows: u32, cols: u32, scrollback: u32);

    fn rows(&self) -> u32;

    fn cols(&self) -> u32;

    fn grid(&self) -> GridSize {
        GridSize::new(self.cols(), self.rows())
    }
}

// ── Fonts and palette ────────────────────────────────────────────────────────

/// Font and palette realization for one session.
pub trait FontService {
    /// Create the session font and return the cell size actually obtained.
    ///
    /// The result may differ from the requested cell by the service's rounding.
    fn create_font(&mut self, request: &FontRequest) -> Result<CellSize, FontError>;

    /// Cell size of whatever font handle is left after `create_font` failed.
    fn fallback_cell(&self, request: &FontRequest) -> CellSize;

    /// Realize `palette` against the display.
    fn realize_palette(&mut self, palette: &[Rgb]) -> Result<(), PaletteError>;
}

// ── Backend ──────────────────────────────────────────────────────────────────

/// Connection backend and line discipline of one session.
///
/// Data arrival, remote exit and fatal errors come back to the controller as
/// discrete events on the UI thread; the backend never calls in directly.
pub trait Backend {
    fn start(&mut self, config: &SessionConfig) -> Result<(), BackendError>;

    fn stop(&mut self);

    /// Extra text for the close confirmation, e.g. running jobs.
    fn close_warning(&self) -> Option<String> {
        None
    }

    /// Protocol-specific commands offered in the session menu.
    fn specials(&self) -> Vec<SpecialCommand> {
        Vec::new()
    }

    /// Run the special command with this code from [`Backend::specials`].
    fn send_special(&mut self, _code: u32) {}
}

/// Creates the per-session collaborators.
pub trait SessionFactory {
    fn create_terminal(&mut self, config: &SessionConfig) -> Box<dyn TerminalGrid>;

    fn create_font_service(&mut self, config: &SessionConfig) -> Box<dyn FontService>;

    fn create_backend(&mut self, config: &SessionConfig) -> Box<dyn Backend>;
}

// ── Dialogs ──────────────────────────────────────────────────────────────────

/// Modal prompts. Every method blocks until the user answers.
pub trait Dialogs {
    /// Pick a configuration for a new session; `None` when cancelled.
    fn new_session(&mut self, template: &SessionConfig) -> Option<SessionRequest>;

    /// Edit the active session; `None` when cancelled.
    fn reconfigure(&mut self, config: &SessionConfig, name: &str) -> Option<SessionRequest>;

    /// `true` to go ahead with closing.
    fn confirm_close(&mut self, prompt: &ClosePrompt) -> bool;

    /// The text to paste, possibly edited, or `None` to reject.
    fn confirm_paste(&mut self, text: &str) -> Option<String>;

    /// `true` to close the window with `open_sessions` sessions still open.
    fn confirm_exit_all(&mut self, open_sessions: usize) -> bool;

    /// Tell the user a session ended and ask whether to close its tab.
    fn remote_notice(&mut self, notice: &RemoteNotice) -> NoticeResponse;

    fn show_error(&mut self, title: &str, message: &str);
}

// ── Platform window ──────────────────────────────────────────────────────────

/// The top-level frame window.
pub trait WindowHost {
    fn set_title(&mut self, title: &str);

    fn set_icon_title(&mut self, title: &str);

    /// `None` hides the scrollbar.
    fn set_scrollbar(&mut self, state: Option<ScrollbarState>);

    fn set_frame_style(&mut self, style: &FrameStyle);

    /// Move, resize, maximize or restore the window.
    ///
    /// The resulting geometry comes back as a later resize event.
    fn request(&mut self, request: WindowRequest);

    fn invalidate_tab_strip(&mut self, rect: egui::Rect);

    fn invalidate_terminal(&mut self);

    fn show_context_menu(&mut self, menu: &MenuTree, position: egui::Pos2);

    fn destroy(&mut self);
}
