//! Geometry, pointer, timer and menu events delivered by the host.

use super::WindowController;
use super::chrome::{FrameStyle, ScrollbarState, session_chrome};
use super::prompts::{CloseOutcome, PasteOutcome};
use crate::config::ResizePolicy;
use crate::geometry::{Dpi, GridSize, PixelRect};
use crate::menu::{MenuCommand, SessionMenuState, session_menu, specials_tree};
use crate::resize::{
    ChromeSizes, GridRequestOutcome, ResizeEdge, SizeEvent, SizeKind, SizingOutcome, ZoomMode,
};
use crate::session::{SessionId, WindowTitles};
use crate::tab_strip::TabStripAction;
use egui::Pos2;
use std::time::Instant;
use winit::dpi::PhysicalSize;

impl WindowController {
    // ── Geometry ─────────────────────────────────────────────────────────

    /// The client area changed size, or the window was minimized, maximized or restored.
    pub fn on_resized(&mut self, event: SizeEvent) {
        let was_minimized = self.engine.geometry().minimized;
        let out = self.with_active(|engine, target| engine.resized(target, event));
        match out {
            Some(out) => self.apply_outcome(out),
            None => {
                let geometry = self.engine.geometry_mut();
                geometry.client = event.client;
                geometry.minimized = event.kind == SizeKind::Minimized;
            }
        }

        if was_minimized != self.engine.geometry().minimized
            && let Some(index) = self.active_index()
        {
            self.apply_titles(index);
        }
    }

    pub fn on_enter_size_move(&mut self) {
        self.strip.cancel_interaction();
        self.with_active(|engine, target| engine.enter_size_move(target));
    }

    pub fn on_exit_size_move(&mut self, font_modifier: bool) {
        if let Some(out) = self.with_active(|engine, target| engine.exit_size_move(target, font_modifier)) {
            self.apply_outcome(out);
        }
    }

    /// An edge of the window is being dragged to `proposed`.
    ///
    /// Returns the rectangle the platform should use instead.
    pub fn on_sizing(&mut self, edge: ResizeEdge, proposed: PixelRect, font_modifier: bool) -> SizingOutcome {
        let Some(index) = self.active_index() else {
            return SizingOutcome {
                rect: proposed,
                grid: GridSize::default(),
                adjusted: false,
            };
        };
        let target = self.sessions.get_mut(index).resize_target();
        self.engine.sizing(&target, edge, proposed, font_modifier)
    }

    pub fn on_moved(&mut self, outer: PixelRect) {
        self.engine.moved(outer);
    }

    pub fn on_monitor_changed(&mut self, monitor: PixelRect) {
        self.engine.monitor_changed(monitor);
    }

    /// The window moved to a display with a different DPI.
    pub fn on_dpi_changed(&mut self, dpi: Dpi, suggested: PixelRect, frame_extra: PhysicalSize<u32>) {
        self.strip.set_dpi(dpi);
        let strip_height = self.strip.extra_height();
        let chrome = match self.active_index() {
            Some(index) => session_chrome(&self.sessions.get(index).config, dpi, strip_height),
            None => ChromeSizes::uniform(PhysicalSize::new(0, strip_height)),
        };

        let out = self.with_active(|engine, target| {
            engine.dpi_changed(target, dpi, suggested, frame_extra, chrome)
        });
        match out {
            Some(out) => self.apply_outcome(out),
            None => {
                let geometry = self.engine.geometry_mut();
                geometry.dpi = dpi;
                geometry.frame_extra = frame_extra;
                geometry.set_chrome(chrome);
            }
        }
        self.flush_strip_damage();
    }

    /// The terminal of session `id` asks for a new grid size.
    pub fn on_terminal_resize_request(&mut self, id: SessionId, grid: GridSize) -> GridRequestOutcome {
        let Some(index) = self.index_of(id) else {
            return GridRequestOutcome::Ignored;
        };
        let active = self.active == Some(id);
        let mut target = self.sessions.get_mut(index).resize_target();
        let outcome = self.engine.request_grid(&mut target, grid, active);

        if let GridRequestOutcome::Applied(out) = &outcome
            && active
        {
            self.apply_outcome(out.clone());
        }
        outcome
    }

    /// Switch between full-screen and the previous window state.
    pub fn toggle_full_screen(&mut self) {
        if let Some(out) = self.with_active(|engine, target| engine.toggle_full_screen(target)) {
            self.apply_outcome(out);
        }
    }

    // ── Pointer ──────────────────────────────────────────────────────────

    pub fn on_pointer_down(&mut self, pos: Pos2, secondary_held: bool) {
        let actions = self.strip.pointer_down(pos, secondary_held);
        self.handle_tab_actions(actions);
    }

    pub fn on_pointer_move(&mut self, pos: Pos2, primary_held: bool) {
        let actions = self.strip.pointer_move(pos, primary_held);
        self.handle_tab_actions(actions);
    }

    pub fn on_pointer_up(&mut self, pos: Pos2) {
        let actions = self.strip.pointer_up(pos);
        self.handle_tab_actions(actions);
    }

    pub fn on_secondary_down(&mut self, pos: Pos2) {
        let actions = self.strip.secondary_down(pos);
        self.handle_tab_actions(actions);
    }

    pub fn on_secondary_up(&mut self, pos: Pos2) {
        let actions = self.strip.secondary_up(pos);
        self.handle_tab_actions(actions);
    }

    pub fn on_pointer_leave(&mut self) {
        self.strip.pointer_leave();
        self.flush_strip_damage();
    }

    pub fn on_capture_lost(&mut self) {
        self.strip.capture_lost();
        self.flush_strip_damage();
    }

    fn handle_tab_actions(&mut self, actions: Vec<TabStripAction>) {
        for action in actions {
            if self.destroyed {
                break;
            }
            log::trace!("Tab strip action {:?}", action);
            match action {
                TabStripAction::SelectionChanged(index) => {
                    if index < self.sessions.len() {
                        self.activate(index);
                    }
                }
                TabStripAction::CloseRequested(index) => {
                    if self.request_close(index) == CloseOutcome::Ignored {
                        log::debug!("Close request for tab {} ignored", index);
                    }
                }
                TabStripAction::Reordered { from, to } => {
                    self.sessions.exchange(from, to);
                    log::debug!("Session moved from tab {} to {}", from, to);
                }
                TabStripAction::ContextMenuRequested { index, position } => {
                    if index >= self.sessions.len() {
                        continue;
                    }
                    if self.active_index() != Some(index) {
                        self.activate(index);
                    }
                    self.show_session_menu(position);
                }
            }
        }
        self.flush_strip_damage();
    }

    /// The context menu of the active session.
    pub fn session_menu(&self) -> Option<crate::menu::MenuTree> {
        let index = self.active_index()?;
        let session = self.sessions.get(index);
        let state = SessionMenuState {
            remote_closed: session.remote.closed,
            resize_disabled: session.config.resize_policy == ResizePolicy::Disabled,
            full_screen: self.engine.zoom() == ZoomMode::FullScreen,
            confirm_paste: self.confirm_paste,
        };
        let specials = specials_tree(&session.specials());
        Some(session_menu(&state, &specials))
    }

    fn show_session_menu(&mut self, position: Pos2) {
        if let Some(menu) = self.session_menu() {
            self.host.show_context_menu(&menu, position);
        }
    }

    // ── Timer ────────────────────────────────────────────────────────────

    /// Run due timers. Returns when the host should call again.
    pub fn poll(&mut self, now: Instant) -> Option<Instant> {
        if self.strip.poll_blink(now) {
            self.flush_strip_damage();
        }
        self.strip.next_blink_deadline()
    }

    // ── Commands ─────────────────────────────────────────────────────────

    /// Run a command picked from a session menu.
    pub fn on_command(&mut self, command: MenuCommand) {
        log::debug!("Menu command {:?}", command);
        match command {
            MenuCommand::CloseSession => {
                self.close_active();
            }
            MenuCommand::NewSession => {
                self.new_session();
            }
            MenuCommand::DuplicateSession => {
                self.duplicate_session();
            }
            MenuCommand::RestartSession => {
                if let Some(index) = self.active_index() {
                    // Failures were already reported to the user
                    let _ = self.restart_session(index);
                }
            }
            MenuCommand::ChangeSettings => {
                self.reconfigure();
            }
            MenuCommand::Special(code) => {
                if let Some(index) = self.active_index() {
                    self.sessions.get_mut(index).send_special(code);
                }
            }
            MenuCommand::ToggleFullScreen => self.toggle_full_screen(),
            MenuCommand::ToggleConfirmPaste => {
                self.confirm_paste = !self.confirm_paste;
                log::info!("Paste confirmation {}", if self.confirm_paste { "on" } else { "off" });
            }
            MenuCommand::Exit => {
                self.close_all();
            }
        }
    }

    /// Text is about to be pasted into the active session.
    ///
    /// Multi-line text is shown to the user first when paste confirmation is on.
    pub fn paste(&mut self, text: &str) -> PasteOutcome {
        if !self.confirm_paste || !text.contains('\r') {
            return PasteOutcome::Accepted(text.to_string());
        }
        match self.dialogs.confirm_paste(text) {
            Some(text) => PasteOutcome::Accepted(text),
            None => {
                log::debug!("Paste of {} bytes rejected", text.len());
                PasteOutcome::Rejected
            }
        }
    }

    // ── Session state from the terminal ──────────────────────────────────

    /// The terminal of session `id` changed its window or icon title.
    pub fn set_session_titles(&mut self, id: SessionId, titles: WindowTitles) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.sessions.get_mut(index).titles = titles;
        if self.active == Some(id) {
            self.apply_titles(index);
        }
    }

    /// The terminal of session `id` scrolled or grew its scrollback.
    pub fn set_session_scrollbar(&mut self, id: SessionId, state: ScrollbarState) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.sessions.get_mut(index).scrollbar = state;
        if self.active == Some(id) {
            self.apply_scrollbar(index);
        }
    }

    /// Frame style last handed to the host.
    pub fn frame_style(&self) -> Option<FrameStyle> {
        self.frame_style
    }
}
