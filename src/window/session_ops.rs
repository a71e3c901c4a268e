//! Opening, activating, closing and reconfiguring sessions.

use super::WindowController;
use super::chrome::APP_NAME;
use super::prompts::{
    ClosePrompt, CloseOutcome, NoticeResponse, RemoteNotice, RemoteNoticeKind, SessionRequest,
};
use crate::config::{ResizePolicy, SessionConfig};
use crate::error::BackendError;
use crate::geometry::{CellSize, GridSize};
use crate::resize::ResetMode;
use crate::session::{Session, SessionId};
use crate::tab_strip::TabItem;

impl WindowController {
    /// Make the session at `index` the active one.
    ///
    /// Selects its tab, realizes its palette, re-runs the zoom branch of the
    /// resize engine for it, re-applies frame style, titles and scrollbar, and
    /// clears its attention notification.
    pub fn activate(&mut self, index: usize) {
        assert!(
            index < self.sessions.len(),
            "activate index {index} out of range (len {})",
            self.sessions.len()
        );
        let id = self.sessions.get(index).id();
        if self.active != Some(id) {
            log::info!("Activating session {} (tab {})", id, index);
        }

        self.strip.select(index);
        self.active = Some(id);
        self.sessions.get_mut(index).realize_palette();

        self.refresh_frame_style();
        if let Some(out) = self.with_active(|engine, target| engine.activate(target)) {
            self.apply_outcome(out);
        }

        self.apply_titles(index);
        self.apply_scrollbar(index);
        self.strip.clear_notification(index);
        self.flush_strip_damage();
    }

    /// Open a session at tab position `index`, activate it and start its backend.
    ///
    /// Returns `None` when the configuration cannot be launched.
    pub fn add_session(&mut self, request: SessionRequest, index: usize) -> Option<SessionId> {
        if !request.config.is_launchable() {
            log::warn!("Refusing to open a session without a destination");
            self.dialogs
                .show_error(&format!("{APP_NAME} Error"), "No destination host specified");
            return None;
        }

        let id = self.next_session_id;
        self.next_session_id += 1;
        let name = request.display_name();
        let session = Session::new(
            id,
            name,
            request.config,
            self.factory.as_mut(),
            self.engine.geometry().dpi,
        );

        let item = TabItem::new(session.tab_label(), session.config.protocol.image_index(), id);
        self.strip.insert_tab(index, item);
        self.sessions.insert(index, session);
        log::info!("Session {} opened at tab {} of {}", id, index, self.sessions.len());

        self.activate(index);

        let result = self.sessions.get_mut(index).start_backend();
        if let Err(e) = result {
            self.dialogs
                .show_error(&format!("{APP_NAME} Error"), &e.to_string());
            self.mark_unusable(index);
        }
        self.flush_strip_damage();
        Some(id)
    }

    /// Ask for a configuration and open it as the last tab.
    pub fn new_session(&mut self) -> Option<SessionId> {
        let request = self.dialogs.new_session(&self.config.default_session)?;
        self.add_session(request, self.sessions.len())
    }

    /// Open a copy of the active session right after it.
    pub fn duplicate_session(&mut self) -> Option<SessionId> {
        let index = self.active_index()?;
        let session = self.sessions.get(index);
        let request = SessionRequest::named(session.config.clone(), session.name());
        self.add_session(request, index + 1)
    }

    /// Open a saved configuration as the last tab.
    pub fn open_saved_session(&mut self, name: &str, config: SessionConfig) -> Option<SessionId> {
        self.add_session(SessionRequest::named(config, name), self.sessions.len())
    }

    /// Remove the session at `index` without asking.
    ///
    /// Its backend is stopped before it is dropped. If it was active, the tab
    /// now at the same position (or the one before, if it was last) becomes
    /// active. Removing the last session destroys the window.
    pub fn delete_session(&mut self, index: usize) {
        assert!(
            index < self.sessions.len(),
            "delete index {index} out of range (len {})",
            self.sessions.len()
        );
        let was_active = self.active_index() == Some(index);

        self.strip.remove_tab(index);
        let mut session = self.sessions.remove(index);
        session.stop_backend();
        log::info!("Session {} closed ({} left)", session.id(), self.sessions.len());
        drop(session);

        if self.sessions.is_empty() {
            self.active = None;
            self.flush_strip_damage();
            self.destroy();
            return;
        }

        if was_active {
            self.active = None;
            let next = index.min(self.sessions.len() - 1);
            self.activate(next);
        }
        self.flush_strip_damage();
    }

    /// Close the session at `index`, asking first when it has something to lose.
    ///
    /// The session being closed is brought to the front for the prompt. When
    /// the user declines, the previously active session is re-activated and
    /// nothing else changes.
    pub fn request_close(&mut self, index: usize) -> CloseOutcome {
        if self.destroyed || index >= self.sessions.len() {
            return CloseOutcome::Ignored;
        }
        self.strip.cancel_interaction();

        if !self.sessions.get(index).closable_without_confirmation() {
            let previous = self.active_index();
            if previous != Some(index) {
                self.activate(index);
            }

            let session = self.sessions.get(index);
            let warning = session.close_warning();
            let prompt = ClosePrompt::new(&session.tab_label(), warning.as_deref());
            if !self.dialogs.confirm_close(&prompt) {
                log::debug!("Close of tab {} declined", index);
                if let Some(previous) = previous
                    && previous != index
                {
                    self.activate(previous);
                }
                self.flush_strip_damage();
                return CloseOutcome::Cancelled;
            }
        }

        self.delete_session(index);
        CloseOutcome::Closed
    }

    /// Close the active session the same way its close button would.
    pub fn close_active(&mut self) -> CloseOutcome {
        match self.active_index() {
            Some(index) => self.request_close(index),
            None => CloseOutcome::Ignored,
        }
    }

    /// Close every session and the window, asking once if configured to.
    ///
    /// Returns `false` when the user declined.
    pub fn close_all(&mut self) -> bool {
        if self.destroyed {
            return true;
        }
        let open = self.sessions.iter().filter(|s| s.is_running()).count();
        if self.config.confirm_exit && open > 0 && !self.dialogs.confirm_exit_all(open) {
            log::debug!("Window close declined with {} open sessions", open);
            return false;
        }

        self.strip.cancel_interaction();
        self.active = None;
        for mut session in self.sessions.drain_all() {
            session.stop_backend();
        }
        while !self.strip.is_empty() {
            self.strip.remove_tab(self.strip.len() - 1);
        }
        self.strip.take_damage();
        self.destroy();
        true
    }

    /// A session's terminal produced output.
    pub fn on_session_output(&mut self, id: SessionId, now: std::time::Instant) {
        if self.active == Some(id) {
            return;
        }
        if let Some(index) = self.index_of(id) {
            self.strip.notify(index, now);
            self.flush_strip_damage();
        }
    }

    /// The remote end of a session exited.
    pub fn on_remote_exit(&mut self, id: SessionId, exit_code: Option<i32>) {
        let message = match exit_code {
            Some(code) => format!("Remote side exited with status {code}"),
            None => "Remote side closed the connection".to_string(),
        };
        self.remote_gone(id, RemoteNoticeKind::Exited, message, exit_code);
    }

    /// The connection of a session failed.
    pub fn on_connection_fatal(&mut self, id: SessionId, message: &str) {
        self.remote_gone(id, RemoteNoticeKind::Fatal, message.to_string(), None);
    }

    fn remote_gone(
        &mut self,
        id: SessionId,
        kind: RemoteNoticeKind,
        message: String,
        exit_code: Option<i32>,
    ) {
        let Some(index) = self.index_of(id) else {
            log::debug!("Remote event for unknown session {}", id);
            return;
        };
        let session = self.sessions.get_mut(index);
        match kind {
            RemoteNoticeKind::Exited => session.mark_remote_closed(exit_code),
            RemoteNoticeKind::Fatal => session.mark_connection_failed(),
        }
        let label = session.tab_label();
        let deletable = session.is_deletable();
        let active = self.active == Some(id);

        // Failures on the active session are always shown; exits only when the tab may stay
        let close = if active && (kind == RemoteNoticeKind::Fatal || !deletable) {
            self.strip.cancel_interaction();
            let notice = RemoteNotice {
                kind,
                session_label: label,
                message,
                can_keep: !deletable,
            };
            let response = self.dialogs.remote_notice(&notice);
            deletable || response == NoticeResponse::CloseTab
        } else {
            if !active {
                log::info!("Session {} ({}) ended in the background: {}", id, label, message);
            }
            deletable
        };

        // The prompt may not reorder tabs, but look the session up again anyway
        let Some(index) = self.index_of(id) else {
            return;
        };
        if close {
            self.delete_session(index);
        } else {
            self.mark_unusable(index);
        }
    }

    fn mark_unusable(&mut self, index: usize) {
        self.strip.set_unusable(index, true);
        self.sessions.get_mut(index).mark_title_inactive();
        if self.active_index() == Some(index) {
            self.apply_titles(index);
        }
        self.flush_strip_damage();
    }

    /// Restart the backend of a remote-closed session.
    pub fn restart_session(&mut self, index: usize) -> Result<(), BackendError> {
        let session = self.sessions.get_mut(index);
        if !session.remote.closed {
            return Ok(());
        }
        log::info!("Restarting session {}", session.id());
        match session.start_backend() {
            Ok(()) => {
                session.reset_titles();
                self.strip.set_unusable(index, false);
                if self.active_index() == Some(index) {
                    self.apply_titles(index);
                }
                self.flush_strip_damage();
                Ok(())
            }
            Err(e) => {
                self.dialogs
                    .show_error(&format!("{APP_NAME} Error"), &e.to_string());
                Err(e)
            }
        }
    }

    /// Let the user edit the active session's configuration and apply it.
    pub fn reconfigure(&mut self) -> bool {
        let Some(index) = self.active_index() else {
            return false;
        };
        let session = self.sessions.get(index);
        let Some(request) = self.dialogs.reconfigure(&session.config, session.name()) else {
            return false;
        };
        self.apply_reconfiguration(index, request);
        true
    }

    /// Apply a changed configuration to the active session at `index`.
    pub fn apply_reconfiguration(&mut self, index: usize, request: SessionRequest) {
        let name = request.display_name();
        let session = self.sessions.get_mut(index);
        if name != session.name() {
            session.set_name(name);
            session.reset_titles();
            let label = session.tab_label();
            self.strip.set_label(index, label);
        }

        let session = self.sessions.get_mut(index);
        let previous = std::mem::replace(&mut session.config, request.config);
        let config = session.config.clone();
        log::info!("Session {} reconfigured", session.id());

        let zoomed = self.engine.zoom().is_zoomed();
        let policy = config.resize_policy;
        let font_changed = config.font != previous.font;
        if font_changed {
            session.geometry.maximize.font_cell = CellSize::default();
        }

        let grid_changed = config.rows != previous.rows
            || config.cols != previous.cols
            || config.scrollback_lines != previous.scrollback_lines;
        let refit_grid = grid_changed
            || matches!(policy, ResizePolicy::Font | ResizePolicy::Disabled)
            || (policy == ResizePolicy::Either && zoomed);
        if refit_grid {
            session
                .resize_target()
                .resize_grid(GridSize::new(config.cols, config.rows));
        }

        if policy == ResizePolicy::Disabled && zoomed {
            let out = self.engine.force_normal();
            self.apply_outcome(out);
        }
        let style_changed = self.refresh_frame_style();
        self.sessions.get_mut(index).realize_palette();

        let mode = if style_changed
            || font_changed
            || matches!(policy, ResizePolicy::Disabled | ResizePolicy::Either)
            || policy != previous.resize_policy
        {
            ResetMode::ReloadFonts
        } else {
            ResetMode::Reinit
        };
        if let Some(out) = self.with_active(|engine, target| engine.reset(target, mode)) {
            self.apply_outcome(out);
        }
        self.apply_titles(index);
        self.host.invalidate_terminal();
        self.flush_strip_damage();
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            log::info!("Destroying window");
            self.destroyed = true;
            self.host.destroy();
        }
    }
}
