//! Shared helpers for integration tests.
#![allow(dead_code)]

use egui::Pos2;
use par_tabs::config::{Config, ResizePolicy, SessionConfig};
use par_tabs::geometry::{CellSize, Dpi, GridSize, PixelRect, size_sub};
use par_tabs::headless::{HeadlessFactory, RecordingHost, ScriptedDialogs};
use par_tabs::resize::{SizeEvent, SizeKind, WindowRequest, ZoomMode};
use par_tabs::session::SessionId;
use par_tabs::ui_constants::{SCROLLBAR_WIDTH, TAB_DRAG_START_MOVES};
use par_tabs::window::prompts::SessionRequest;
use par_tabs::{WindowController, WindowSetup};
use winit::dpi::PhysicalSize;

/// Natural font cell of every headless session at 96 DPI.
pub const CELL: CellSize = CellSize {
    width: 8,
    height: 16,
};

/// Height the default tab strip adds at 96 DPI.
pub const STRIP_HEIGHT: u32 = 26;

/// A controller wired to headless collaborators, with handles kept for inspection.
pub struct Harness {
    pub controller: WindowController,
    pub host: RecordingHost,
    pub dialogs: ScriptedDialogs,
    pub factory: HeadlessFactory,
}

pub fn setup() -> WindowSetup {
    WindowSetup {
        dpi: Dpi::default(),
        outer: PixelRect::new(0, 0, 660, 448),
        frame_extra: PhysicalSize::new(0, 0),
        monitor: PixelRect::new(0, 0, 1920, 1080),
    }
}

pub fn harness() -> Harness {
    harness_with(Config::default(), HeadlessFactory::new(CELL))
}

pub fn harness_with(config: Config, factory: HeadlessFactory) -> Harness {
    let host = RecordingHost::new();
    let dialogs = ScriptedDialogs::new();
    let controller = WindowController::new(
        config,
        setup(),
        Box::new(host.clone()),
        Box::new(dialogs.clone()),
        Box::new(factory.clone()),
    );
    Harness {
        controller,
        host,
        dialogs,
        factory,
    }
}

pub fn session_config(host: &str, policy: ResizePolicy) -> SessionConfig {
    SessionConfig {
        host: host.to_string(),
        resize_policy: policy,
        ..Default::default()
    }
}

/// Client size of a normal window showing `grid` at `cell` with the default chrome and border.
pub fn client_for(grid: GridSize, cell: CellSize) -> PhysicalSize<u32> {
    PhysicalSize::new(
        grid.cols * cell.width + SCROLLBAR_WIDTH + 2,
        grid.rows * cell.height + STRIP_HEIGHT + 2,
    )
}

impl Harness {
    /// Open a session as the last tab and let the window settle.
    pub fn open(&mut self, host: &str, policy: ResizePolicy) -> SessionId {
        let index = self.controller.session_count();
        let id = self
            .controller
            .add_session(SessionRequest::new(session_config(host, policy)), index)
            .expect("session opened");
        self.settle();
        id
    }

    /// Hosts of the open sessions in tab order.
    pub fn hosts(&self) -> Vec<String> {
        self.controller
            .sessions()
            .iter()
            .map(|session| session.config.host.clone())
            .collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.controller
            .strip()
            .items()
            .iter()
            .map(|item| item.label.clone())
            .collect()
    }

    pub fn active_grid(&self) -> GridSize {
        let index = self.controller.active_index().expect("active session");
        self.controller.session(index).terminal().grid()
    }

    pub fn active_cell(&self) -> CellSize {
        let index = self.controller.active_index().expect("active session");
        self.controller.session(index).geometry.font_cell
    }

    pub fn client(&self) -> PhysicalSize<u32> {
        self.controller.engine().geometry().client
    }

    pub fn zoom(&self) -> ZoomMode {
        self.controller.engine().zoom()
    }

    /// The user resized the window to a client area of `width` x `height`.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.controller.on_resized(SizeEvent {
            kind: SizeKind::Restored,
            client: PhysicalSize::new(width, height),
            font_modifier: false,
        });
    }

    pub fn maximize(&mut self) {
        self.answer(WindowRequest::Maximize);
        self.settle();
    }

    pub fn restore(&mut self) {
        self.answer(WindowRequest::Restore);
        self.settle();
    }

    /// Answer host requests the way a window manager would until none are left.
    pub fn settle(&mut self) -> Vec<WindowRequest> {
        let mut seen = Vec::new();
        for _ in 0..8 {
            let pending = self.host.take_requests();
            if pending.is_empty() {
                break;
            }
            for request in pending {
                seen.push(request);
                self.answer(request);
            }
        }
        seen
    }

    pub fn answer(&mut self, request: WindowRequest) {
        let geometry = *self.controller.engine().geometry();
        let frame = geometry.frame_extra;
        let (kind, client) = match request {
            WindowRequest::Resize(outer) => (SizeKind::Restored, size_sub(outer, frame)),
            WindowRequest::MoveResize(rect) => {
                self.controller.on_moved(rect);
                if geometry.zoom == ZoomMode::FullScreen {
                    (SizeKind::Maximized, rect.size)
                } else {
                    (SizeKind::Restored, size_sub(rect.size, frame))
                }
            }
            WindowRequest::Maximize => (SizeKind::Maximized, size_sub(geometry.monitor.size, frame)),
            WindowRequest::Restore => (SizeKind::Restored, size_sub(geometry.restored.size, frame)),
        };
        self.controller.on_resized(SizeEvent {
            kind,
            client,
            font_modifier: false,
        });
    }

    pub fn tab_centre(&self, index: usize) -> Pos2 {
        let rect = self.controller.strip().tab_rect(index);
        Pos2::new(rect.min.x + 20.0, rect.center().y)
    }

    pub fn close_centre(&self, index: usize) -> Pos2 {
        self.controller.strip().close_button_rect(index).center()
    }

    pub fn click_tab(&mut self, index: usize) {
        let pos = self.tab_centre(index);
        self.controller.on_pointer_down(pos, false);
        self.controller.on_pointer_up(pos);
        self.settle();
    }

    pub fn click_close(&mut self, index: usize) {
        let pos = self.close_centre(index);
        self.controller.on_pointer_down(pos, false);
        self.controller.on_pointer_up(pos);
        self.settle();
    }

    /// Press on `from`, arm the drag, walk over every tab up to `to` and release.
    pub fn drag_tab(&mut self, from: usize, to: usize) {
        let start = self.tab_centre(from);
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
            let pos = self.tab_centre(index);
            self.controller.on_pointer_move(pos, true);
        }
        let end = self.tab_centre(to);
        self.controller.on_pointer_up(end);
        self.settle();
    }
}
