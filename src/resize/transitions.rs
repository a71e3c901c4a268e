//! Named transitions for window events.
//!
//! Each platform event (size change, drag begin/end, DPI change, maximize
//! toggle, a terminal asking for a new grid, a tab switch) maps to one method
//! here. All of them return a [`ResizeOutcome`] for the host to carry out.

use super::{
    ChromeSizes, ResetMode, ResizeEngine, ResizeOutcome, ResizeTarget, SizeEvent, SizeKind,
    WindowRequest, ZoomMode,
};
use crate::config::ResizePolicy;
use crate::geometry::{CellSize, Dpi, GridSize, PixelRect, size_add, size_sub};
use crate::ui_constants::{MIN_PLAUSIBLE_CELL_HEIGHT, MIN_PLAUSIBLE_CELL_WIDTH, MIN_REQUESTED_COLS};
use winit::dpi::PhysicalSize;

/// Result of a terminal asking for a new grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridRequestOutcome {
    /// Request ignored in the current state
    Ignored,
    /// Request larger than the monitor could ever show
    Rejected,
    Applied(ResizeOutcome),
}

impl ResizeEngine {
    /// The platform reports a new client size.
    pub fn resized(&mut self, target: &mut ResizeTarget<'_>, event: SizeEvent) -> ResizeOutcome {
        let mut out = ResizeOutcome::default();
        let policy = target.policy();
        self.geometry.client = event.client;
        self.geometry.minimized = event.kind == SizeKind::Minimized;

        if event.kind == SizeKind::Restored && self.geometry.is_full_screen() {
            log::info!("Leaving full-screen");
            self.geometry.set_zoom(ZoomMode::Normal);
            out.frame_changed = true;
        }

        if event.kind == SizeKind::Maximized && self.full_screen_on_maximize {
            self.full_screen_on_maximize = false;
            out.merge(self.enter_full_screen(target));
            return out;
        }

        if event.kind == SizeKind::Minimized {
            return out;
        }

        if policy == ResizePolicy::Disabled {
            out.merge(self.reset(target, ResetMode::Restore));
            return out;
        }

        match event.kind {
            SizeKind::Minimized => {}
            SizeKind::Maximized => {
                if !self.geometry.was_zoomed {
                    target.geometry.maximize.font_cell = target.font_cell();
                }
                self.geometry.was_zoomed = true;
                target.geometry.maximize.was_zoomed = true;
                if self.geometry.zoom == ZoomMode::Normal {
                    self.geometry.set_zoom(ZoomMode::Maximized);
                    out.frame_changed = true;
                }
                if policy == ResizePolicy::Grid {
                    let area = self.geometry.terminal_area();
                    self.size_to_grid(target, area, false);
                }
                out.merge(self.reset(target, ResetMode::Reposition));
            }
            SizeKind::Restored if self.geometry.was_zoomed => {
                self.geometry.was_zoomed = false;
                target.geometry.maximize.was_zoomed = false;
                if self.geometry.zoom == ZoomMode::Maximized {
                    self.geometry.set_zoom(ZoomMode::Normal);
                    out.frame_changed = true;
                }
                match policy {
                    ResizePolicy::Grid => {
                        let area = self.geometry.terminal_area();
                        self.size_to_grid(target, area, true);
                        out.merge(self.reset(target, ResetMode::Reinit));
                    }
                    ResizePolicy::Either => {
                        let remembered = target.geometry.maximize.font_cell;
                        if remembered != CellSize::default() {
                            target.reload_font(self.geometry.dpi, Some(remembered));
                        }
                        out.merge(self.reset(target, ResetMode::Reinit));
                    }
                    _ => out.merge(self.reset(target, ResetMode::Reposition)),
                }
            }
            SizeKind::Restored => {
                let grid_wins = policy == ResizePolicy::Grid
                    || (policy == ResizePolicy::Either && !event.font_modifier);
                if self.interactive {
                    if policy == ResizePolicy::Font {
                        out.merge(self.reset(target, ResetMode::Reposition));
                    } else {
                        let area = self.geometry.terminal_area();
                        self.size_to_grid(target, area, true);
                    }
                } else if grid_wins {
                    let area = self.geometry.terminal_area();
                    self.size_to_grid(target, area, true);
                    target.center_in(area);
                    out.redraw = true;
                } else {
                    out.merge(self.reset(target, ResetMode::Reposition));
                }
            }
        }

        if self.geometry.zoom == ZoomMode::Normal && !self.geometry.minimized {
            self.geometry.restored = PixelRect {
                origin: self.geometry.restored.origin,
                size: size_add(event.client, self.geometry.frame_extra),
            };
            self.geometry.outer = self.geometry.restored;
        }
        out
    }

    /// The platform started an interactive move or size loop.
    pub fn enter_size_move(&mut self, target: &mut ResizeTarget<'_>) {
        self.interactive = true;
        target.geometry.pending_grid = None;
    }

    /// The interactive loop ended: apply whatever the drag settled on.
    pub fn exit_size_move(
        &mut self,
        target: &mut ResizeTarget<'_>,
        font_modifier: bool,
    ) -> ResizeOutcome {
        self.interactive = false;
        let mut out = ResizeOutcome::default();
        let area = self.geometry.terminal_area();

        if target.policy() == ResizePolicy::Either && font_modifier {
            target.geometry.pending_grid = None;
            out.merge(self.reset(target, ResetMode::Reposition));
            return out;
        }

        if let Some(grid) = target.geometry.pending_grid.take() {
            log::debug!("Applying grid {}x{} after drag", grid.cols, grid.rows);
            target.resize_grid(grid);
            out.redraw = true;
        }
        target.center_in(area);
        out
    }

    /// The window moved without changing size.
    pub fn moved(&mut self, outer: PixelRect) {
        self.geometry.outer = outer;
        if self.geometry.zoom == ZoomMode::Normal {
            self.geometry.restored = outer;
        }
    }

    /// The window now sits on a monitor with this rectangle.
    pub fn monitor_changed(&mut self, monitor: PixelRect) {
        self.geometry.monitor = monitor;
    }

    /// The window moved to a display with a different DPI.
    ///
    /// `suggested` is the platform's proposed outer rectangle; the window is
    /// re-sized around its centre.
    pub fn dpi_changed(
        &mut self,
        target: &mut ResizeTarget<'_>,
        dpi: Dpi,
        suggested: PixelRect,
        frame_extra: PhysicalSize<u32>,
        chrome: ChromeSizes,
    ) -> ResizeOutcome {
        log::info!(
            "DPI changed {}x{} -> {}x{}",
            self.geometry.dpi.x,
            self.geometry.dpi.y,
            dpi.x,
            dpi.y
        );
        self.geometry.dpi = dpi;
        self.geometry.frame_extra = frame_extra;
        self.geometry.set_chrome(chrome);
        self.dpi_suggested = Some(suggested);
        self.reset(target, ResetMode::DpiChanged)
    }

    /// Chrome sizes changed (scrollbar shown or hidden, tab strip re-measured).
    pub fn chrome_changed(&mut self, chrome: ChromeSizes) {
        self.geometry.set_chrome(chrome);
    }

    /// The terminal of a session asks for a new grid size.
    pub fn request_grid(
        &mut self,
        target: &mut ResizeTarget<'_>,
        grid: GridSize,
        active: bool,
    ) -> GridRequestOutcome {
        let policy = target.policy();
        if policy == ResizePolicy::Disabled
            || (policy == ResizePolicy::Grid && self.geometry.zoom.is_zoomed())
        {
            log::debug!("Grid request {}x{} ignored under {:?}", grid.cols, grid.rows, policy);
            return GridRequestOutcome::Ignored;
        }
        if grid == target.grid() {
            return GridRequestOutcome::Ignored;
        }

        let usable = size_sub(self.geometry.monitor.size, self.geometry.extra);
        if grid.cols > usable.width / MIN_PLAUSIBLE_CELL_WIDTH
            || grid.rows > usable.height / MIN_PLAUSIBLE_CELL_HEIGHT
        {
            log::warn!(
                "Grid request {}x{} cannot fit the monitor; rejected",
                grid.cols,
                grid.rows
            );
            return GridRequestOutcome::Rejected;
        }

        let grid = GridSize::new(grid.cols.max(MIN_REQUESTED_COLS), grid.rows.max(1));
        target.resize_grid(grid);

        let mut out = ResizeOutcome::default();
        if !active {
            return GridRequestOutcome::Applied(out);
        }
        if policy != ResizePolicy::Font && !self.geometry.zoom.is_zoomed() {
            if !self.interactive {
                out.request(WindowRequest::Resize(self.outer_for(target)));
            }
            out.redraw = true;
        } else {
            out.merge(self.reset(target, ResetMode::Reposition));
        }
        GridRequestOutcome::Applied(out)
    }

    /// Re-establish the geometry of a session that just became active.
    pub fn activate(&mut self, target: &mut ResizeTarget<'_>) -> ResizeOutcome {
        let mut out = ResizeOutcome::default();
        let policy = target.policy();

        if self.geometry.zoom.is_zoomed() {
            if !target.geometry.maximize.was_zoomed {
                target.geometry.maximize.font_cell = target.font_cell();
                target.geometry.maximize.was_zoomed = true;
            }
            if policy == ResizePolicy::Disabled {
                // This session cannot live in a zoomed window
                out.merge(self.force_normal());
                out.merge(self.reset(target, ResetMode::ReloadFonts));
                return out;
            }
            if policy == ResizePolicy::Either && !self.geometry.was_zoomed {
                let area = size_sub(self.geometry.restored.size, self.geometry.extra);
                self.size_to_grid(target, area, false);
            }
            out.merge(self.reset(target, ResetMode::Reposition));
        } else {
            let remembered = target.geometry.maximize;
            target.geometry.maximize.was_zoomed = false;
            match policy {
                ResizePolicy::Disabled => out.merge(self.reset(target, ResetMode::Reinit)),
                ResizePolicy::Font => out.merge(self.reset(target, ResetMode::Reposition)),
                ResizePolicy::Grid | ResizePolicy::Either => {
                    if policy == ResizePolicy::Either
                        && remembered.was_zoomed
                        && remembered.font_cell != CellSize::default()
                    {
                        target.reload_font(self.geometry.dpi, Some(remembered.font_cell));
                    }
                    let area = self.geometry.terminal_area();
                    self.size_to_grid(target, area, true);
                    out.merge(self.reset(target, ResetMode::Reinit));
                }
            }
        }
        out.redraw = true;
        out
    }

    /// Leave any zoomed state at once, for a session that cannot be zoomed.
    pub fn force_normal(&mut self) -> ResizeOutcome {
        let mut out = ResizeOutcome::default();
        if self.geometry.zoom.is_zoomed() {
            log::debug!("Forcing window out of {:?}", self.geometry.zoom);
            out.request(WindowRequest::Restore);
            self.geometry.set_zoom(ZoomMode::Normal);
            self.geometry.was_zoomed = false;
            out.frame_changed = true;
        }
        out
    }

    /// Flip between full-screen and the previous state.
    pub fn toggle_full_screen(&mut self, target: &mut ResizeTarget<'_>) -> ResizeOutcome {
        let mut out = ResizeOutcome::default();
        if target.policy() == ResizePolicy::Disabled {
            log::debug!("Full-screen unavailable while resizing is disabled");
            return out;
        }
        match self.geometry.zoom {
            ZoomMode::FullScreen => out.request(WindowRequest::Restore),
            ZoomMode::Maximized => out.merge(self.enter_full_screen(target)),
            ZoomMode::Normal => {
                self.full_screen_on_maximize = true;
                out.request(WindowRequest::Maximize);
            }
        }
        out
    }

    fn enter_full_screen(&mut self, target: &mut ResizeTarget<'_>) -> ResizeOutcome {
        let mut out = ResizeOutcome::default();
        if target.policy() == ResizePolicy::Disabled {
            return out;
        }
        log::info!("Entering full-screen");
        if !self.geometry.was_zoomed {
            target.geometry.maximize.font_cell = target.font_cell();
        }
        self.geometry.was_zoomed = true;
        target.geometry.maximize.was_zoomed = true;
        self.geometry.set_zoom(ZoomMode::FullScreen);
        out.frame_changed = true;
        out.request(WindowRequest::MoveResize(self.geometry.monitor));
        out
    }

    /// Resize the terminal to fill `area`, deferring while a drag is in progress.
    fn size_to_grid(&mut self, target: &mut ResizeTarget<'_>, area: PhysicalSize<u32>, with_border: bool) {
        let border = if with_border { target.border() * 2 } else { 0 };
        let inner = size_sub(area, PhysicalSize::new(border, border));
        let grid = GridSize::fitting(inner, target.font_cell());
        if self.interactive {
            target.geometry.pending_grid = Some(grid);
        } else {
            target.resize_grid(grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{SessionGeometry, WindowGeometry};
    use super::*;
    use crate::config::SessionConfig;
    use crate::headless::{HeadlessFonts, HeadlessTerminal};

    struct Fixture {
        config: SessionConfig,
        geometry: SessionGeometry,
        terminal: HeadlessTerminal,
        fonts: HeadlessFonts,
        engine: ResizeEngine,
    }

    impl Fixture {
        fn new(policy: ResizePolicy) -> Self {
            let config = SessionConfig {
                resize_policy: policy,
                window_border: 0,
                ..Default::default()
            };
            let geometry = WindowGeometry::new(
                Dpi::default(),
                PixelRect::new(0, 0, 640, 384),
                PhysicalSize::new(0, 0),
                PixelRect::new(0, 0, 1920, 1080),
            );
            Self {
                config,
                geometry: SessionGeometry {
                    font_cell: CellSize::new(8, 16),
                    ..Default::default()
                },
                terminal: HeadlessTerminal::new(GridSize::new(80, 24)),
                fonts: HeadlessFonts::new(CellSize::new(8, 16)),
                engine: ResizeEngine::new(geometry),
            }
        }

        fn with<R>(&mut self, f: impl FnOnce(&mut ResizeEngine, &mut ResizeTarget<'_>) -> R) -> R {
            let mut target = ResizeTarget {
                config: &self.config,
                geometry: &mut self.geometry,
                terminal: &mut self.terminal,
                fonts: &mut self.fonts,
            };
            f(&mut self.engine, &mut target)
        }

        fn resized(&mut self, kind: SizeKind, width: u32, height: u32) -> ResizeOutcome {
            self.with(|engine, target| {
                engine.resized(
                    target,
                    SizeEvent {
                        kind,
                        client: PhysicalSize::new(width, height),
                        font_modifier: false,
                    },
                )
            })
        }
    }

    #[test]
    fn test_grid_policy_resize_changes_grid() {
        let mut f = Fixture::new(ResizePolicy::Grid);
        f.resized(SizeKind::Restored, 800, 480);
        assert_eq!(f.terminal.grid(), GridSize::new(100, 30));
        assert_eq!(f.geometry.font_cell, CellSize::new(8, 16));
    }

    #[test]
    fn test_grid_drag_defers_until_exit() {
        let mut f = Fixture::new(ResizePolicy::Grid);
        f.with(|engine, target| engine.enter_size_move(target));
        f.resized(SizeKind::Restored, 800, 480);
        assert_eq!(f.terminal.grid(), GridSize::new(80, 24));
        assert_eq!(f.geometry.pending_grid, Some(GridSize::new(100, 30)));

        let out = f.with(|engine, target| engine.exit_size_move(target, false));
        assert!(out.redraw);
        assert_eq!(f.terminal.grid(), GridSize::new(100, 30));
        assert!(!f.engine.is_interactive());
    }

    #[test]
    fn test_font_policy_resize_keeps_grid() {
        let mut f = Fixture::new(ResizePolicy::Font);
        f.resized(SizeKind::Restored, 800, 480);
        assert_eq!(f.terminal.grid(), GridSize::new(80, 24));
        assert_eq!(f.geometry.font_cell, CellSize::new(10, 20));
    }

    #[test]
    fn test_maximize_and_restore_under_either() {
        let mut f = Fixture::new(ResizePolicy::Either);
        let out = f.resized(SizeKind::Maximized, 1920, 1040);
        assert!(out.frame_changed);
        assert_eq!(f.engine.zoom(), ZoomMode::Maximized);
        assert_eq!(f.geometry.maximize.font_cell, CellSize::new(8, 16));
        assert_eq!(f.geometry.font_cell, CellSize::new(24, 43));

        let out = f.resized(SizeKind::Restored, 640, 384);
        assert_eq!(f.engine.zoom(), ZoomMode::Normal);
        assert_eq!(f.geometry.font_cell, CellSize::new(8, 16));
        assert!(out.requests.is_empty());
    }

    #[test]
    fn test_disabled_snaps_back() {
        let mut f = Fixture::new(ResizePolicy::Disabled);
        let out = f.resized(SizeKind::Restored, 900, 500);
        assert_eq!(
            out.requests,
            vec![WindowRequest::Resize(PhysicalSize::new(640, 384))]
        );
    }

    #[test]
    fn test_minimize_under_disabled_keeps_font() {
        let mut f = Fixture::new(ResizePolicy::Disabled);
        f.geometry.font_cell = CellSize::new(5, 9);
        let out = f.resized(SizeKind::Minimized, 0, 0);
        assert!(out.is_empty());
        assert_eq!(f.geometry.font_cell, CellSize::new(5, 9));
        assert!(f.engine.geometry().minimized);
    }

    #[test]
    fn test_grid_request_rejected_beyond_monitor() {
        let mut f = Fixture::new(ResizePolicy::Grid);
        let out = f.with(|engine, target| engine.request_grid(target, GridSize::new(481, 24), true));
        assert_eq!(out, GridRequestOutcome::Rejected);
        assert_eq!(f.terminal.grid(), GridSize::new(80, 24));
    }

    #[test]
    fn test_grid_request_clamps_small_columns() {
        let mut f = Fixture::new(ResizePolicy::Grid);
        let out = f.with(|engine, target| engine.request_grid(target, GridSize::new(5, 10), true));
        assert_eq!(f.terminal.grid(), GridSize::new(15, 10));
        assert_eq!(
            out,
            GridRequestOutcome::Applied(ResizeOutcome {
                requests: vec![WindowRequest::Resize(PhysicalSize::new(120, 160))],
                redraw: true,
                frame_changed: false,
            })
        );
    }

    #[test]
    fn test_grid_request_ignored_while_maximized_under_grid() {
        let mut f = Fixture::new(ResizePolicy::Grid);
        f.resized(SizeKind::Maximized, 1920, 1040);
        let out = f.with(|engine, target| engine.request_grid(target, GridSize::new(100, 30), true));
        assert_eq!(out, GridRequestOutcome::Ignored);
    }

    #[test]
    fn test_toggle_full_screen_from_normal_goes_through_maximize() {
        let mut f = Fixture::new(ResizePolicy::Grid);
        let out = f.with(|engine, target| engine.toggle_full_screen(target));
        assert_eq!(out.requests, vec![WindowRequest::Maximize]);

        let out = f.resized(SizeKind::Maximized, 1920, 1040);
        assert_eq!(f.engine.zoom(), ZoomMode::FullScreen);
        assert_eq!(
            out.requests,
            vec![WindowRequest::MoveResize(PixelRect::new(0, 0, 1920, 1080))]
        );

        let out = f.with(|engine, target| engine.toggle_full_screen(target));
        assert_eq!(out.requests, vec![WindowRequest::Restore]);
    }

    #[test]
    fn test_toggle_full_screen_disabled_is_noop() {
        let mut f = Fixture::new(ResizePolicy::Disabled);
        let out = f.with(|engine, target| engine.toggle_full_screen(target));
        assert!(out.is_empty());
    }

    #[test]
    fn test_dpi_change_recenters_window() {
        let mut f = Fixture::new(ResizePolicy::Grid);
        let out = f.with(|engine, target| {
            engine.dpi_changed(
                target,
                Dpi::uniform(192),
                PixelRect::new(100, 100, 1280, 768),
                PhysicalSize::new(0, 0),
                ChromeSizes::default(),
            )
        });
        // HeadlessFonts doubles its natural cell at 192 DPI
        assert_eq!(f.geometry.font_cell, CellSize::new(16, 32));
        assert_eq!(
            out.requests,
            vec![WindowRequest::MoveResize(PixelRect::new(100, 100, 1280, 768))]
        );
    }
}
