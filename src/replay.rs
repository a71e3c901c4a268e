//! Scripted replay of window events against headless collaborators.
//!
//! A replay script is YAML: the window placement, the natural font cell of
//! the headless font service, and a list of steps. Each step is turned into
//! the same controller calls a platform event loop would make. Window
//! requests the controller issues are answered the way a window manager
//! would, by feeding the resulting size back as resize events.
//!
//! ```yaml
//! window:
//!   dpi: 96
//!   outer: { x: 0, y: 0, width: 660, height: 448 }
//!   frame_extra: { width: 16, height: 38 }
//!   monitor: { x: 0, y: 0, width: 1920, height: 1080 }
//! steps:
//!   - open: { host: build01 }
//!   - open: { host: build02, policy: font }
//!   - resize: { width: 900, height: 600 }
//!   - move_tab: { from: 1, to: 0 }
//!   - maximize
//! ```

use crate::config::{Config, ResizePolicy, SessionConfig};
use crate::error::ReplayError;
use crate::geometry::{CellSize, Dpi, GridSize, PixelRect, size_sub};
use crate::headless::{HeadlessFactory, RecordingHost, ScriptedDialogs};
use crate::resize::{ResizeEdge, SizeEvent, SizeKind, WindowRequest, ZoomMode};
use crate::session::SessionId;
use crate::ui_constants::TAB_DRAG_START_MOVES;
use crate::window::prompts::{CloseOutcome, NoticeResponse, PasteOutcome, SessionRequest};
use crate::window::{WindowController, WindowSetup};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use winit::dpi::PhysicalSize;

/// Host requests answered per step before giving up on a feedback loop.
const MAX_REQUEST_ROUNDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectSpec {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl From<RectSpec> for PixelRect {
    fn from(rect: RectSpec) -> Self {
        PixelRect::new(rect.x, rect.y, rect.width, rect.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSpec {
    pub width: u32,
    pub height: u32,
}

impl From<SizeSpec> for PhysicalSize<u32> {
    fn from(size: SizeSpec) -> Self {
        PhysicalSize::new(size.width, size.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSpec {
    pub dpi: u32,
    pub outer: RectSpec,
    pub frame_extra: SizeSpec,
    pub monitor: RectSpec,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            dpi: 96,
            outer: RectSpec {
                x: 0,
                y: 0,
                width: 660,
                height: 448,
            },
            frame_extra: SizeSpec {
                width: 16,
                height: 38,
            },
            monitor: RectSpec {
                x: 0,
                y: 0,
                width: 1920,
                height: 1080,
            },
        }
    }
}

/// One scripted event. Tabs are addressed by their current position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Open a session as the last tab
    Open {
        host: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        policy: Option<ResizePolicy>,
        #[serde(default)]
        fail: Option<String>,
    },
    /// Click a tab
    Activate { tab: usize },
    /// The client area changed size without a drag
    Resize {
        width: u32,
        height: u32,
        #[serde(default)]
        font_modifier: bool,
    },
    /// Drag the bottom-right corner so the outer size becomes `width` x `height`
    DragResize {
        width: u32,
        height: u32,
        #[serde(default)]
        font_modifier: bool,
    },
    Maximize,
    Restore,
    Minimize,
    ToggleFullScreen,
    /// Move to a monitor with this DPI
    Dpi { dpi: u32 },
    /// Drag the tab at `from` until it sits at `to`
    MoveTab { from: usize, to: usize },
    /// Click the close button of a tab, answering a confirmation with `confirm`
    CloseButton {
        tab: usize,
        #[serde(default = "default_true")]
        confirm: bool,
    },
    /// Session output arrived
    Output { tab: usize },
    /// Run the blink timer once
    Blink,
    /// The terminal asked for a new grid
    GridRequest { tab: usize, cols: u32, rows: u32 },
    /// The remote end exited; `keep` answers the notice
    RemoteExit {
        tab: usize,
        #[serde(default)]
        code: Option<i32>,
        #[serde(default)]
        keep: bool,
    },
    /// The connection failed; `keep` answers the notice
    ConnectionLost {
        tab: usize,
        message: String,
        #[serde(default)]
        keep: bool,
    },
    /// Paste text, answering a confirmation with `confirm`
    Paste {
        text: String,
        #[serde(default = "default_true")]
        confirm: bool,
    },
}

fn default_true() -> bool {
    true
}

/// Scale a window dimension from `old` to `new` DPI, saturating at `u32::MAX`.
fn rescale(value: u32, new: u32, old: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(new) / u64::from(old.max(1));
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayScript {
    pub window: WindowSpec,
    /// Natural font cell of the headless font service at 96 DPI
    pub font_cell: Option<SizeSpec>,
    pub steps: Vec<Step>,
}

impl ReplayScript {
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(yaml: &str) -> Result<Self, ReplayError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }
}

/// One tab as seen after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabSnapshot {
    pub label: String,
    pub active: bool,
    pub unusable: bool,
    pub notified: bool,
}

/// Window state after a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: usize,
    pub event: String,
    pub tabs: Vec<TabSnapshot>,
    pub zoom: String,
    pub client: [u32; 2],
    /// Grid and font cell of the active session
    pub grid: Option<[u32; 2]>,
    pub font_cell: Option<[u32; 2]>,
    pub title: String,
    pub requests: Vec<String>,
    pub destroyed: bool,
}

/// Drives a controller with headless collaborators.
pub struct Replay {
    controller: WindowController,
    host: RecordingHost,
    dialogs: ScriptedDialogs,
    factory: HeadlessFactory,
    frame_extra: PhysicalSize<u32>,
    clock: Instant,
}

impl Replay {
    pub fn new(config: Config, script: &ReplayScript) -> Self {
        let natural = script
            .font_cell
            .map(|cell| CellSize::new(cell.width, cell.height))
            .unwrap_or(CellSize::new(8, 16));
        let host = RecordingHost::new();
        let dialogs = ScriptedDialogs::new();
        let factory = HeadlessFactory::new(natural);
        let frame_extra = script.window.frame_extra.into();
        let setup = WindowSetup {
            dpi: Dpi::uniform(script.window.dpi),
            outer: script.window.outer.into(),
            frame_extra,
            monitor: script.window.monitor.into(),
        };
        let controller = WindowController::new(
            config,
            setup,
            Box::new(host.clone()),
            Box::new(dialogs.clone()),
            Box::new(factory.clone()),
        );
        Self {
            controller,
            host,
            dialogs,
            factory,
            frame_extra,
            clock: Instant::now(),
        }
    }

    pub fn controller(&self) -> &WindowController {
        &self.controller
    }

    /// Run every step, returning a snapshot after each.
    pub fn run(&mut self, steps: &[Step]) -> Result<Vec<Snapshot>, ReplayError> {
        let mut snapshots = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let step_no = index + 1;
            log::debug!("Replay step {}: {:?}", step_no, step);
            let mut requests = Vec::new();
            for request in self.apply(step_no, step)? {
                requests.push(request);
                self.answer(request);
            }
            requests.extend(self.settle());
            snapshots.push(self.snapshot(step_no, step, &requests));
            if self.controller.is_destroyed() {
                log::info!("Window destroyed at step {}; stopping replay", step_no);
                break;
            }
        }
        Ok(snapshots)
    }

    fn session_at(&self, step: usize, tab: usize) -> Result<SessionId, ReplayError> {
        if tab >= self.controller.session_count() {
            return Err(ReplayError::NoSuchTab { step, tab });
        }
        Ok(self.controller.session(tab).id())
    }

    /// Carry out one step. Returns window changes the user made directly.
    fn apply(&mut self, step_no: usize, step: &Step) -> Result<Vec<WindowRequest>, ReplayError> {
        let mut requests = Vec::new();
        match step {
            Step::Open {
                host,
                name,
                policy,
                fail,
            } => {
                let mut config: SessionConfig = self.controller.config().default_session.clone();
                config.host = host.clone();
                if let Some(policy) = policy {
                    config.resize_policy = *policy;
                }
                if let Some(reason) = fail {
                    self.factory.fail_next_start(reason);
                }
                let request = match name {
                    Some(name) => SessionRequest::named(config, name.clone()),
                    None => SessionRequest::new(config),
                };
                let index = self.controller.session_count();
                self.controller.add_session(request, index);
            }
            Step::Activate { tab } => {
                self.session_at(step_no, *tab)?;
                let pos = self.controller.strip().tab_rect(*tab).center();
                self.controller.on_pointer_down(pos, false);
                self.controller.on_pointer_up(pos);
            }
            Step::Resize {
                width,
                height,
                font_modifier,
            } => {
                self.controller.on_resized(SizeEvent {
                    kind: SizeKind::Restored,
                    client: PhysicalSize::new(*width, *height),
                    font_modifier: *font_modifier,
                });
            }
            Step::DragResize {
                width,
                height,
                font_modifier,
            } => {
                let outer = self.controller.engine().geometry().outer;
                let proposed = PixelRect::new(outer.origin.x, outer.origin.y, *width, *height);
                self.controller.on_enter_size_move();
                let sized = self
                    .controller
                    .on_sizing(ResizeEdge::BottomRight, proposed, *font_modifier);
                self.controller.on_resized(SizeEvent {
                    kind: SizeKind::Restored,
                    client: size_sub(sized.rect.size, self.frame_extra),
                    font_modifier: *font_modifier,
                });
                self.controller.on_exit_size_move(*font_modifier);
            }
            Step::Maximize => requests.push(WindowRequest::Maximize),
            Step::Restore => requests.push(WindowRequest::Restore),
            Step::Minimize => {
                let client = self.controller.engine().geometry().client;
                self.controller.on_resized(SizeEvent {
                    kind: SizeKind::Minimized,
                    client,
                    font_modifier: false,
                });
            }
            Step::ToggleFullScreen => self.controller.toggle_full_screen(),
            Step::Dpi { dpi } => {
                let dpi = *dpi;
                let old = self.controller.engine().geometry().dpi;
                let outer = self.controller.engine().geometry().outer;
                let suggested = PixelRect::new(
                    outer.origin.x,
                    outer.origin.y,
                    rescale(outer.size.width, dpi, old.x),
                    rescale(outer.size.height, dpi, old.y),
                );
                self.controller
                    .on_dpi_changed(Dpi::uniform(dpi), suggested, self.frame_extra);
            }
            Step::MoveTab { from, to } => {
                self.session_at(step_no, *from)?;
                self.session_at(step_no, *to)?;
                self.drag_tab(*from, *to);
            }
            Step::CloseButton { tab, confirm } => {
                self.session_at(step_no, *tab)?;
                self.dialogs.answer_close(*confirm);
                let pos = self.controller.strip().close_button_rect(*tab).center();
                self.controller.on_pointer_down(pos, false);
                self.controller.on_pointer_up(pos);
                // Drop the answer if no prompt consumed it
                self.dialogs.state().close_answers.clear();
            }
            Step::Output { tab } => {
                let id = self.session_at(step_no, *tab)?;
                self.controller.on_session_output(id, self.clock);
            }
            Step::Blink => {
                if let Some(due) = self.controller.strip().next_blink_deadline() {
                    self.clock = self.clock.max(due);
                    self.controller.poll(self.clock);
                }
            }
            Step::GridRequest { tab, cols, rows } => {
                let id = self.session_at(step_no, *tab)?;
                self.controller
                    .on_terminal_resize_request(id, GridSize::new(*cols, *rows));
            }
            Step::RemoteExit { tab, code, keep } => {
                let id = self.session_at(step_no, *tab)?;
                let response = if *keep {
                    NoticeResponse::KeepTab
                } else {
                    NoticeResponse::CloseTab
                };
                self.dialogs.answer_notice(response);
                self.controller.on_remote_exit(id, *code);
                self.dialogs.state().notice_answers.clear();
            }
            Step::ConnectionLost { tab, message, keep } => {
                let id = self.session_at(step_no, *tab)?;
                let response = if *keep {
                    NoticeResponse::KeepTab
                } else {
                    NoticeResponse::CloseTab
                };
                self.dialogs.answer_notice(response);
                self.controller.on_connection_fatal(id, message);
                self.dialogs.state().notice_answers.clear();
            }
            Step::Paste { text, confirm } => {
                if !*confirm {
                    self.dialogs.answer_paste(None);
                }
                match self.controller.paste(text) {
                    PasteOutcome::Accepted(text) => log::info!("Pasted {} bytes", text.len()),
                    PasteOutcome::Rejected => log::info!("Paste rejected"),
                }
                self.dialogs.state().paste_answers.clear();
            }
        }
        Ok(requests)
    }

    /// Press on `from`, arm the drag, then walk the pointer over each tab up to `to`.
    fn drag_tab(&mut self, from: usize, to: usize) {
        let centre = |controller: &WindowController, index: usize| {
            controller.strip().tab_rect(index).center()
        };
        let start = centre(&self.controller, from);
        self.controller.on_pointer_down(start, false);
        for _ in 0..=TAB_DRAG_START_MOVES {
            self.controller.on_pointer_move(start, true);
        }

        let path: Vec<usize> = if from <= to {
            (from..=to).collect()
        } else {
            (to..=from).rev().collect()
        };
        for index in path {
            let pos = centre(&self.controller, index);
            self.controller.on_pointer_move(pos, true);
        }
        let end = centre(&self.controller, to);
        self.controller.on_pointer_up(end);
    }

    /// Answer host requests until the window settles.
    ///
    /// Returns every request answered.
    fn settle(&mut self) -> Vec<WindowRequest> {
        let mut seen = Vec::new();
        let mut pending = self.host.take_requests();
        for _ in 0..MAX_REQUEST_ROUNDS {
            if pending.is_empty() {
                break;
            }
            for request in pending {
                seen.push(request);
                self.answer(request);
            }
            pending = self.host.take_requests();
        }
        if !pending.is_empty() {
            log::warn!("Window did not settle; {} requests dropped", pending.len());
        }
        seen
    }

    fn answer(&mut self, request: WindowRequest) {
        let geometry = *self.controller.engine().geometry();
        let (kind, client) = match request {
            WindowRequest::Resize(outer) => (SizeKind::Restored, size_sub(outer, self.frame_extra)),
            WindowRequest::MoveResize(rect) => {
                self.controller.on_moved(rect);
                if geometry.zoom == ZoomMode::FullScreen {
                    (SizeKind::Maximized, rect.size)
                } else {
                    (SizeKind::Restored, size_sub(rect.size, self.frame_extra))
                }
            }
            WindowRequest::Maximize => (
                SizeKind::Maximized,
                size_sub(geometry.monitor.size, self.frame_extra),
            ),
            WindowRequest::Restore => (
                SizeKind::Restored,
                size_sub(geometry.restored.size, self.frame_extra),
            ),
        };
        self.controller.on_resized(SizeEvent {
            kind,
            client,
            font_modifier: false,
        });
    }

    fn snapshot(&self, step: usize, event: &Step, requests: &[WindowRequest]) -> Snapshot {
        let controller = &self.controller;
        let active = controller.active_index();
        let tabs = controller
            .strip()
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| TabSnapshot {
                label: item.label.clone(),
                active: active == Some(index),
                unusable: item.unusable,
                notified: item.notify.is_notified(),
            })
            .collect();
        let geometry = controller.engine().geometry();
        let (grid, font_cell) = match active {
            Some(index) => {
                let session = controller.session(index);
                let grid = session.terminal().grid();
                let cell = session.geometry.font_cell;
                (Some([grid.cols, grid.rows]), Some([cell.width, cell.height]))
            }
            None => (None, None),
        };
        let host = self.host.state();
        Snapshot {
            step,
            event: step_name(event),
            tabs,
            zoom: format!("{:?}", geometry.zoom),
            client: [geometry.client.width, geometry.client.height],
            grid,
            font_cell,
            title: host.title.clone(),
            requests: requests.iter().map(|r| format!("{r:?}")).collect(),
            destroyed: host.destroyed,
        }
    }
}

fn step_name(step: &Step) -> String {
    match serde_yaml_ng::to_string(step) {
        Ok(yaml) => yaml.trim().replace('\n', " "),
        Err(_) => format!("{step:?}"),
    }
}

/// Load a script and run it with `config`.
pub fn replay_file(config: Config, path: &Path) -> Result<Vec<Snapshot>, ReplayError> {
    let script = ReplayScript::load(path)?;
    let mut replay = Replay::new(config, &script);
    let snapshots = replay.run(&script.steps)?;
    if let Some(outcome) = final_close(&mut replay) {
        log::info!("Replay finished; window close {:?}", outcome);
    }
    Ok(snapshots)
}

/// Close what is left so every backend is stopped.
fn final_close(replay: &mut Replay) -> Option<CloseOutcome> {
    if replay.controller.is_destroyed() {
        return None;
    }
    replay.dialogs.answer_exit(true);
    let closed = replay.controller.close_all();
    Some(if closed {
        CloseOutcome::Closed
    } else {
        CloseOutcome::Cancelled
    })
}
