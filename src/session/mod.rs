//! One terminal session shown in one tab.
//!
//! A session owns its configuration snapshot, its terminal, font service and
//! backend, plus the geometry the resize engine keeps per session. Only the
//! active session drives the window; the others keep their own font and grid
//! until they are activated again.

use crate::config::{CloseOnExit, SessionConfig};
use crate::error::BackendError;
use crate::geometry::Dpi;
use crate::menu::SpecialCommand;
use crate::registry::Reindex;
use crate::resize::font::{FontRequest, obtain_cell};
use crate::resize::{ResizeTarget, SessionGeometry};
use crate::traits::{Backend, FontService, SessionFactory, TerminalGrid};
use crate::window::chrome::{APP_NAME, ScrollbarState};

/// Stable identity of a session, independent of its tab position.
pub type SessionId = u64;

/// Titles the session wants on the window and its minimized icon.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowTitles {
    pub window: String,
    pub icon: String,
}

/// State of the remote end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoteState {
    /// The connection ended; the tab stays but is inert
    pub closed: bool,
    /// Exit status reported by the backend, if any
    pub exit_code: Option<i32>,
    /// The connection failed rather than exiting
    pub fatal: bool,
}

pub struct Session {
    id: SessionId,
    /// Current tab position; kept in sync by the registry
    index: usize,
    name: String,
    pub config: SessionConfig,
    pub geometry: SessionGeometry,
    pub titles: WindowTitles,
    pub scrollbar: ScrollbarState,
    pub remote: RemoteState,
    terminal: Box<dyn TerminalGrid>,
    fonts: Box<dyn FontService>,
    backend: Box<dyn Backend>,
    running: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("name", &self.name)
            .field("geometry", &self.geometry)
            .field("remote", &self.remote)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build a session and its collaborators. The backend is not started.
    pub fn new(
        id: SessionId,
        name: impl Into<String>,
        config: SessionConfig,
        factory: &mut dyn SessionFactory,
        dpi: Dpi,
    ) -> Self {
        let name = name.into();
        let terminal = factory.create_terminal(&config);
        let mut fonts = factory.create_font_service(&config);
        let backend = factory.create_backend(&config);
        let font_cell = obtain_cell(fonts.as_mut(), &FontRequest::natural(&config.font, dpi));
        let title = format!("{name} - {APP_NAME}");

        log::debug!(
            "Session {} '{}' created: {}x{} grid, {}x{} cell",
            id,
            name,
            terminal.cols(),
            terminal.rows(),
            font_cell.width,
            font_cell.height
        );

        Self {
            id,
            index: 0,
            name,
            scrollbar: ScrollbarState::for_rows(terminal.rows()),
            config,
            geometry: SessionGeometry {
                font_cell,
                ..Default::default()
            },
            titles: WindowTitles {
                window: title.clone(),
                icon: title,
            },
            remote: RemoteState::default(),
            terminal,
            fonts,
            backend,
            running: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Text shown on the session's tab.
    pub fn tab_label(&self) -> String {
        format!("{}. {}", self.id, self.name)
    }

    pub fn terminal(&self) -> &dyn TerminalGrid {
        self.terminal.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Borrow the parts the resize engine works on.
    pub fn resize_target(&mut self) -> ResizeTarget<'_> {
        ResizeTarget {
            config: &self.config,
            geometry: &mut self.geometry,
            terminal: self.terminal.as_mut(),
            fonts: self.fonts.as_mut(),
        }
    }

    pub fn fonts_mut(&mut self) -> &mut dyn FontService {
        self.fonts.as_mut()
    }

    /// Start the backend. A failure leaves the session in the remote-closed state.
    pub fn start_backend(&mut self) -> Result<(), BackendError> {
        match self.backend.start(&self.config) {
            Ok(()) => {
                self.running = true;
                self.remote = RemoteState::default();
                log::info!("Session {} connected to {}", self.id, self.config.host);
                Ok(())
            }
            Err(e) => {
                self.running = false;
                self.remote.closed = true;
                self.remote.fatal = true;
                log::error!("Session {} failed to start: {}", self.id, e);
                Err(e)
            }
        }
    }

    /// Stop the backend if it is running. Safe to call more than once.
    pub fn stop_backend(&mut self) {
        if self.running {
            self.backend.stop();
            self.running = false;
            log::debug!("Session {} backend stopped", self.id);
        }
    }

    /// Record that the remote end exited.
    pub fn mark_remote_closed(&mut self, exit_code: Option<i32>) {
        self.running = false;
        self.remote = RemoteState {
            closed: true,
            exit_code,
            fatal: false,
        };
    }

    /// Record that the connection failed.
    pub fn mark_connection_failed(&mut self) {
        self.running = false;
        self.remote = RemoteState {
            closed: true,
            exit_code: None,
            fatal: true,
        };
    }

    /// Whether the tab should go away now that the remote end is gone.
    ///
    /// `OnCleanExit` closes on any exit the backend reported, whatever its
    /// status; only a failed connection keeps the tab.
    pub fn is_deletable(&self) -> bool {
        match self.config.close_on_exit {
            CloseOnExit::Always => true,
            CloseOnExit::OnCleanExit => self.remote.closed && !self.remote.fatal,
            CloseOnExit::Never => false,
        }
    }

    /// Closing needs no confirmation: warnings off, or nothing left to lose.
    pub fn closable_without_confirmation(&self) -> bool {
        !self.config.warn_on_close || self.remote.closed
    }

    pub fn close_warning(&self) -> Option<String> {
        self.backend.close_warning()
    }

    pub fn specials(&self) -> Vec<SpecialCommand> {
        if self.running {
            self.backend.specials()
        } else {
            Vec::new()
        }
    }

    /// Realize this session's palette, keeping the current one on failure.
    pub fn realize_palette(&mut self) {
        if let Err(e) = self.fonts.realize_palette(&self.config.palette) {
            log::warn!("Session {}: palette not realized: {}", self.id, e);
        }
    }

    /// Forward a special command chosen from the session menu.
    pub fn send_special(&mut self, code: u32) {
        if self.running {
            log::debug!("Session {} special command {}", self.id, code);
            self.backend.send_special(code);
        }
    }

    /// Default titles derived from the session name.
    pub fn reset_titles(&mut self) {
        let title = format!("{} - {}", self.name, APP_NAME);
        self.titles = WindowTitles {
            window: title.clone(),
            icon: title,
        };
    }

    /// Marks the window title of a remote-closed session.
    pub fn mark_title_inactive(&mut self) {
        const SUFFIX: &str = " (inactive)";
        if !self.titles.window.ends_with(SUFFIX) {
            self.titles.window.push_str(SUFFIX);
        }
        if !self.titles.icon.ends_with(SUFFIX) {
            self.titles.icon.push_str(SUFFIX);
        }
    }
}

impl Reindex for Session {
    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop_backend();
    }
}
