//! Window controller: one frame window, its sessions and its tab strip.
//!
//! The controller is the single context object every window operation runs
//! against. It owns the ordered session registry, the tab strip, the resize
//! engine and the id of the active session, and talks to the platform only
//! through [`WindowHost`], [`Dialogs`] and [`SessionFactory`].
//!
//! All methods run on the UI thread. Modal prompts are answered while the
//! controller is mutably borrowed, so nothing else can mutate the registry
//! until the prompt returns.
//!
//! ## Module layout
//!
//! - [`chrome`]: frame style, scrollbar state and chrome sizes.
//! - [`prompts`]: prompt payloads and user-declinable outcomes.
//! - `session_ops`: opening, activating, closing and reconfiguring sessions.
//! - `events`: geometry, pointer, timer and menu events.

pub mod chrome;
mod events;
pub mod prompts;
mod session_ops;

use crate::config::Config;
use crate::geometry::{Dpi, PixelRect};
use crate::registry::{SelfReindex, SessionRegistry};
use crate::resize::{ChromeSizes, ResizeEngine, ResizeOutcome, ResizeTarget, WindowGeometry};
use crate::session::{Session, SessionId};
use crate::tab_strip::TabStrip;
use crate::traits::{Dialogs, SessionFactory, WindowHost};
use chrome::{FrameStyle, session_chrome};
use egui::Pos2;
use winit::dpi::PhysicalSize;

/// Initial placement of the frame window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSetup {
    pub dpi: Dpi,
    /// Outer window rectangle
    pub outer: PixelRect,
    /// Frame pixels around the client area
    pub frame_extra: PhysicalSize<u32>,
    /// Rectangle of the monitor the window opens on
    pub monitor: PixelRect,
}

pub struct WindowController {
    config: Config,
    sessions: SessionRegistry<Session>,
    strip: TabStrip,
    engine: ResizeEngine,
    active: Option<SessionId>,
    next_session_id: SessionId,
    confirm_paste: bool,
    /// Last style handed to the host
    frame_style: Option<FrameStyle>,
    destroyed: bool,
    host: Box<dyn WindowHost>,
    dialogs: Box<dyn Dialogs>,
    factory: Box<dyn SessionFactory>,
}

impl WindowController {
    pub fn new(
        config: Config,
        setup: WindowSetup,
        host: Box<dyn WindowHost>,
        dialogs: Box<dyn Dialogs>,
        factory: Box<dyn SessionFactory>,
    ) -> Self {
        let strip = TabStrip::new(&config.tab_strip, setup.dpi);
        let mut geometry = WindowGeometry::new(setup.dpi, setup.outer, setup.frame_extra, setup.monitor);
        geometry.set_chrome(ChromeSizes::uniform(PhysicalSize::new(0, strip.extra_height())));
        log::info!(
            "Window controller created: {}x{} at ({}, {}), {}x{} DPI",
            setup.outer.size.width,
            setup.outer.size.height,
            setup.outer.origin.x,
            setup.outer.origin.y,
            setup.dpi.x,
            setup.dpi.y
        );

        Self {
            confirm_paste: config.confirm_paste,
            config,
            sessions: SessionRegistry::with_observer(SelfReindex),
            strip,
            engine: ResizeEngine::new(geometry),
            active: None,
            next_session_id: 1,
            frame_style: None,
            destroyed: false,
            host,
            dialogs,
            factory,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sessions(&self) -> &SessionRegistry<Session> {
        &self.sessions
    }

    pub fn session(&self, index: usize) -> &Session {
        self.sessions.get(index)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn strip(&self) -> &TabStrip {
        &self.strip
    }

    pub fn engine(&self) -> &ResizeEngine {
        &self.engine
    }

    pub fn active_id(&self) -> Option<SessionId> {
        self.active
    }

    /// Tab position of the active session.
    pub fn active_index(&self) -> Option<usize> {
        let id = self.active?;
        self.index_of(id)
    }

    pub fn index_of(&self, id: SessionId) -> Option<usize> {
        self.sessions.position(|session| session.id() == id)
    }

    pub fn confirm_paste(&self) -> bool {
        self.confirm_paste
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Where the tab strip sits in client coordinates.
    pub fn set_strip_origin(&mut self, origin: Pos2) {
        self.strip.set_origin(origin);
        self.flush_strip_damage();
    }

    /// Run `f` against the engine and the active session, if there is one.
    fn with_active<R>(
        &mut self,
        f: impl FnOnce(&mut ResizeEngine, &mut ResizeTarget<'_>) -> R,
    ) -> Option<R> {
        let index = self.active_index()?;
        let session = self.sessions.get_mut(index);
        let mut target = session.resize_target();
        Some(f(&mut self.engine, &mut target))
    }

    /// Carry out what a resize transition asked for.
    fn apply_outcome(&mut self, out: ResizeOutcome) {
        if out.frame_changed {
            self.refresh_frame_style();
        }
        for request in out.requests {
            log::trace!("Window request {:?}", request);
            self.host.request(request);
        }
        if out.redraw {
            self.host.invalidate_terminal();
        }
    }

    /// Recompute the frame style and chrome for the active session.
    ///
    /// Returns whether the style handed to the host changed.
    fn refresh_frame_style(&mut self) -> bool {
        let Some(index) = self.active_index() else {
            return false;
        };
        let config = &self.sessions.get(index).config;
        let style = FrameStyle::for_session(config, self.engine.zoom());
        let chrome = session_chrome(config, self.engine.geometry().dpi, self.strip.extra_height());
        self.engine.chrome_changed(chrome);

        if self.frame_style == Some(style) {
            return false;
        }
        self.host.set_frame_style(&style);
        self.frame_style = Some(style);
        if let Some(index) = self.active_index() {
            self.apply_scrollbar(index);
        }
        true
    }

    fn apply_titles(&mut self, index: usize) {
        let session = self.sessions.get(index);
        let show_icon_title =
            self.engine.geometry().minimized && !session.config.window_title_always;
        let title = if show_icon_title {
            &session.titles.icon
        } else {
            &session.titles.window
        };
        self.host.set_title(title);
        self.host.set_icon_title(&session.titles.icon);
    }

    fn apply_scrollbar(&mut self, index: usize) {
        let visible = self.frame_style.is_some_and(|style| style.scrollbar);
        let state = visible.then(|| self.sessions.get(index).scrollbar);
        self.host.set_scrollbar(state);
    }

    fn flush_strip_damage(&mut self) {
        for rect in self.strip.take_damage() {
            self.host.invalidate_tab_strip(rect);
        }
    }
}
