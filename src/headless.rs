//! In-memory collaborators.
//!
//! These implement every trait in [`crate::traits`] without a display or a
//! network. The replay tool drives a real [`WindowController`] with them, and
//! the tests use their shared logs to observe what the controller asked for.
//!
//! Handles are cheap clones over one shared state, so a test can keep a copy
//! after boxing another into the controller.
//!
//! [`WindowController`]: crate::window::WindowController

use crate::config::{Rgb, SessionConfig};
use crate::error::{BackendError, FontError, PaletteError};
use crate::geometry::{BASE_DPI, CellSize, Dpi, GridSize, mul_div};
use crate::menu::{MenuTree, SpecialCommand};
use crate::resize::{FontRequest, WindowRequest};
use crate::traits::{Backend, Dialogs, FontService, SessionFactory, TerminalGrid, WindowHost};
use crate::window::chrome::{FrameStyle, ScrollbarState};
use crate::window::prompts::{ClosePrompt, NoticeResponse, RemoteNotice, SessionRequest};
use parking_lot::{Mutex, MutexGuard};
use std::collections::VecDeque;
use std::sync::Arc;

// ── Terminal ─────────────────────────────────────────────────────────────────

/// A grid that only remembers its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessTerminal {
    cols: u32,
    rows: u32,
    scrollback: u32,
    /// Every size the grid was resized to, in order
    pub resizes: Vec<GridSize>,
}

impl HeadlessTerminal {
    pub fn new(grid: GridSize) -> Self {
        Self {
            cols: grid.cols,
            rows: grid.rows,
            scrollback: 0,
            resizes: Vec::new(),
        }
    }

    pub fn grid(&self) -> GridSize {
        GridSize::new(self.cols, self.rows)
    }

    pub fn scrollback(&self) -> u32 {
        self.scrollback
    }
}

impl TerminalGrid for HeadlessTerminal {
    fn resize(&mut self, rows: u32, cols: u32, scrollback: u32) {
        self.rows = rows;
        self.cols = cols;
        self.scrollback = scrollback;
        self.resizes.push(GridSize::new(cols, rows));
    }

    fn rows(&self) -> u32 {
        self.rows
    }

    fn cols(&self) -> u32 {
        self.cols
    }
}

// ── Shared log ───────────────────────────────────────────────────────────────

/// What the session collaborators were asked to do.
#[derive(Debug, Default)]
pub struct FactoryLog {
    /// Host of every backend start, successful or not
    pub starts: Vec<String>,
    /// Host of every backend stop
    pub stops: Vec<String>,
    /// Special command codes forwarded to backends
    pub specials_sent: Vec<u32>,
    /// Number of palette realizations
    pub palettes: usize,
    /// Reason given to the next backend start, which then fails
    pub fail_next_start: Option<String>,
}

// ── Fonts ────────────────────────────────────────────────────────────────────

/// Fonts whose natural cell scales linearly with DPI.
///
/// Sized requests get exactly the cell they ask for.
#[derive(Debug, Clone)]
pub struct HeadlessFonts {
    /// Natural cell at 96 DPI
    natural: CellSize,
    /// Make every sized request fail, leaving the natural font
    pub fail_sized_requests: bool,
    log: Option<Arc<Mutex<FactoryLog>>>,
}

impl HeadlessFonts {
    pub fn new(natural: CellSize) -> Self {
        Self {
            natural,
            fail_sized_requests: false,
            log: None,
        }
    }

    fn natural_at(&self, dpi: Dpi) -> CellSize {
        CellSize::new(
            mul_div(self.natural.width as i32, dpi.x, BASE_DPI).max(1) as u32,
            mul_div(self.natural.height as i32, dpi.y, BASE_DPI).max(1) as u32,
        )
    }
}

impl FontService for HeadlessFonts {
    fn create_font(&mut self, request: &FontRequest) -> Result<CellSize, FontError> {
        match request.cell {
            Some(cell) if self.fail_sized_requests => Err(FontError::NoUsableFont {
                family: request.spec.family.clone(),
                width: cell.width,
                height: cell.height,
            }),
            Some(cell) => Ok(cell),
            None => Ok(self.natural_at(request.dpi)),
        }
    }

    fn fallback_cell(&self, request: &FontRequest) -> CellSize {
        self.natural_at(request.dpi)
    }

    fn realize_palette(&mut self, _palette: &[Rgb]) -> Result<(), PaletteError> {
        if let Some(log) = &self.log {
            log.lock().palettes += 1;
        }
        Ok(())
    }
}

// ── Backend ──────────────────────────────────────────────────────────────────

/// A backend that connects instantly unless told to fail.
#[derive(Debug)]
pub struct HeadlessBackend {
    host: String,
    close_warning: Option<String>,
    specials: Vec<SpecialCommand>,
    log: Arc<Mutex<FactoryLog>>,
}

impl Backend for HeadlessBackend {
    fn start(&mut self, config: &SessionConfig) -> Result<(), BackendError> {
        self.host = config.host.clone();
        let mut log = self.log.lock();
        log.starts.push(config.host.clone());
        match log.fail_next_start.take() {
            Some(reason) => Err(BackendError::ConnectFailed {
                destination: config.host.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    fn stop(&mut self) {
        self.log.lock().stops.push(self.host.clone());
    }

    fn close_warning(&self) -> Option<String> {
        self.close_warning.clone()
    }

    fn specials(&self) -> Vec<SpecialCommand> {
        self.specials.clone()
    }

    fn send_special(&mut self, code: u32) {
        self.log.lock().specials_sent.push(code);
    }
}

// ── Factory ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct HeadlessFactory {
    natural: CellSize,
    specials: Vec<SpecialCommand>,
    close_warning: Option<String>,
    log: Arc<Mutex<FactoryLog>>,
}

impl HeadlessFactory {
    /// Sessions get fonts with this natural cell at 96 DPI.
    pub fn new(natural: CellSize) -> Self {
        Self {
            natural,
            specials: Vec::new(),
            close_warning: None,
            log: Arc::new(Mutex::new(FactoryLog::default())),
        }
    }

    /// Backends created from now on offer these special commands.
    pub fn with_specials(mut self, specials: Vec<SpecialCommand>) -> Self {
        self.specials = specials;
        self
    }

    /// Backends created from now on add this to close confirmations.
    pub fn with_close_warning(mut self, warning: impl Into<String>) -> Self {
        self.close_warning = Some(warning.into());
        self
    }

    pub fn fail_next_start(&self, reason: &str) {
        self.log.lock().fail_next_start = Some(reason.to_string());
    }

    pub fn log(&self) -> MutexGuard<'_, FactoryLog> {
        self.log.lock()
    }
}

impl SessionFactory for HeadlessFactory {
    fn create_terminal(&mut self, config: &SessionConfig) -> Box<dyn TerminalGrid> {
        Box::new(HeadlessTerminal::new(GridSize::new(config.cols, config.rows)))
    }

    fn create_font_service(&mut self, _config: &SessionConfig) -> Box<dyn FontService> {
        Box::new(HeadlessFonts {
            natural: self.natural,
            fail_sized_requests: false,
            log: Some(Arc::clone(&self.log)),
        })
    }

    fn create_backend(&mut self, config: &SessionConfig) -> Box<dyn Backend> {
        Box::new(HeadlessBackend {
            host: config.host.clone(),
            close_warning: self.close_warning.clone(),
            specials: self.specials.clone(),
            log: Arc::clone(&self.log),
        })
    }
}

// ── Window host ──────────────────────────────────────────────────────────────

/// Everything the controller told the window.
#[derive(Debug, Default)]
pub struct HostState {
    pub title: String,
    pub icon_title: String,
    pub scrollbar: Option<ScrollbarState>,
    pub frame_style: Option<FrameStyle>,
    /// Requests not yet taken with [`RecordingHost::take_requests`]
    pub requests: Vec<WindowRequest>,
    pub strip_damage: Vec<egui::Rect>,
    pub terminal_invalidations: usize,
    pub context_menus: Vec<(MenuTree, egui::Pos2)>,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    state: Arc<Mutex<HostState>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock()
    }

    pub fn take_requests(&self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.state.lock().requests)
    }
}

impl WindowHost for RecordingHost {
    fn set_title(&mut self, title: &str) {
        self.state.lock().title = title.to_string();
    }

    fn set_icon_title(&mut self, title: &str) {
        self.state.lock().icon_title = title.to_string();
    }

    fn set_scrollbar(&mut self, state: Option<ScrollbarState>) {
        self.state.lock().scrollbar = state;
    }

    fn set_frame_style(&mut self, style: &FrameStyle) {
        self.state.lock().frame_style = Some(*style);
    }

    fn request(&mut self, request: WindowRequest) {
        self.state.lock().requests.push(request);
    }

    fn invalidate_tab_strip(&mut self, rect: egui::Rect) {
        self.state.lock().strip_damage.push(rect);
    }

    fn invalidate_terminal(&mut self) {
        self.state.lock().terminal_invalidations += 1;
    }

    fn show_context_menu(&mut self, menu: &MenuTree, position: egui::Pos2) {
        self.state.lock().context_menus.push((menu.clone(), position));
    }

    fn destroy(&mut self) {
        self.state.lock().destroyed = true;
    }
}

// ── Dialogs ──────────────────────────────────────────────────────────────────

/// Queued answers and the prompts that consumed them.
///
/// An empty queue gives the permissive answer: close, paste as-is, close the
/// tab, exit, and open a new session from the template.
#[derive(Debug, Default)]
pub struct DialogState {
    pub close_answers: VecDeque<bool>,
    pub paste_answers: VecDeque<Option<String>>,
    pub notice_answers: VecDeque<NoticeResponse>,
    pub exit_answers: VecDeque<bool>,
    pub new_session_answers: VecDeque<Option<SessionRequest>>,
    pub reconfigure_answers: VecDeque<Option<SessionRequest>>,

    pub close_prompts: Vec<ClosePrompt>,
    pub paste_prompts: Vec<String>,
    pub notices: Vec<RemoteNotice>,
    pub exit_prompts: Vec<usize>,
    /// (title, message) of every error shown
    pub errors: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    state: Arc<Mutex<DialogState>>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, DialogState> {
        self.state.lock()
    }

    pub fn answer_close(&self, close: bool) {
        self.state.lock().close_answers.push_back(close);
    }

    pub fn answer_paste(&self, text: Option<String>) {
        self.state.lock().paste_answers.push_back(text);
    }

    pub fn answer_notice(&self, response: NoticeResponse) {
        self.state.lock().notice_answers.push_back(response);
    }

    pub fn answer_exit(&self, exit: bool) {
        self.state.lock().exit_answers.push_back(exit);
    }

    pub fn answer_new_session(&self, request: Option<SessionRequest>) {
        self.state.lock().new_session_answers.push_back(request);
    }

    pub fn answer_reconfigure(&self, request: Option<SessionRequest>) {
        self.state.lock().reconfigure_answers.push_back(request);
    }
}

impl Dialogs for ScriptedDialogs {
    fn new_session(&mut self, template: &SessionConfig) -> Option<SessionRequest> {
        self.state
            .lock()
            .new_session_answers
            .pop_front()
            .unwrap_or_else(|| Some(SessionRequest::new(template.clone())))
    }

    fn reconfigure(&mut self, _config: &SessionConfig, _name: &str) -> Option<SessionRequest> {
        self.state.lock().reconfigure_answers.pop_front().flatten()
    }

    fn confirm_close(&mut self, prompt: &ClosePrompt) -> bool {
        let mut state = self.state.lock();
        state.close_prompts.push(prompt.clone());
        state.close_answers.pop_front().unwrap_or(true)
    }

    fn confirm_paste(&mut self, text: &str) -> Option<String> {
        let mut state = self.state.lock();
        state.paste_prompts.push(text.to_string());
        state
            .paste_answers
            .pop_front()
            .unwrap_or_else(|| Some(text.to_string()))
    }

    fn confirm_exit_all(&mut self, open_sessions: usize) -> bool {
        let mut state = self.state.lock();
        state.exit_prompts.push(open_sessions);
        state.exit_answers.pop_front().unwrap_or(true)
    }

    fn remote_notice(&mut self, notice: &RemoteNotice) -> NoticeResponse {
        let mut state = self.state.lock();
        state.notices.push(notice.clone());
        state
            .notice_answers
            .pop_front()
            .unwrap_or(NoticeResponse::CloseTab)
    }

    fn show_error(&mut self, title: &str, message: &str) {
        log::error!("{}: {}", title, message);
        self.state
            .lock()
            .errors
            .push((title.to_string(), message.to_string()));
    }
}
