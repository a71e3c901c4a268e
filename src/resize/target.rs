//! Per-session resize state and the borrowed view the engine operates on.

use super::font::{FontRequest, obtain_cell};
use crate::config::{ResizePolicy, SessionConfig};
use crate::geometry::{CellSize, Dpi, GridSize};
use crate::traits::{FontService, TerminalGrid};
use winit::dpi::{PhysicalPosition, PhysicalSize};

/// Font cell remembered when the window was maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaximizeMemory {
    pub was_zoomed: bool,
    pub font_cell: CellSize,
}

/// Geometry a session owns independently of every other session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionGeometry {
    pub font_cell: CellSize,
    /// Top-left of the character grid inside the terminal area
    pub offset: PhysicalPosition<i32>,
    pub maximize: MaximizeMemory,
    /// Grid computed during an interactive drag, applied when the drag ends
    pub pending_grid: Option<GridSize>,
}

/// Mutable view of one session for a single engine transition.
pub struct ResizeTarget<'a> {
    pub config: &'a SessionConfig,
    pub geometry: &'a mut SessionGeometry,
    pub terminal: &'a mut dyn TerminalGrid,
    pub fonts: &'a mut dyn FontService,
}

impl ResizeTarget<'_> {
    pub fn policy(&self) -> ResizePolicy {
        self.config.resize_policy
    }

    pub fn border(&self) -> u32 {
        self.config.window_border
    }

    pub fn grid(&self) -> GridSize {
        self.terminal.grid()
    }

    pub fn font_cell(&self) -> CellSize {
        self.geometry.font_cell
    }

    /// Resize the terminal when `grid` differs from its current size.
    pub fn resize_grid(&mut self, grid: GridSize) {
        let grid = grid.clamped();
        if grid == self.terminal.grid() {
            return;
        }
        log::debug!(
            "Terminal grid {}x{} -> {}x{}",
            self.terminal.cols(),
            self.terminal.rows(),
            grid.cols,
            grid.rows
        );
        self.terminal
            .resize(grid.rows, grid.cols, self.config.scrollback_lines);
    }

    /// Recreate the font at `cell`, or at its natural size when `None`.
    pub fn reload_font(&mut self, dpi: Dpi, cell: Option<CellSize>) {
        let request = match cell {
            Some(cell) => FontRequest::sized(&self.config.font, dpi, cell),
            None => FontRequest::natural(&self.config.font, dpi),
        };
        let obtained = obtain_cell(&mut *self.fonts, &request);
        log::debug!(
            "Font cell {}x{} -> {}x{}",
            self.geometry.font_cell.width,
            self.geometry.font_cell.height,
            obtained.width,
            obtained.height
        );
        self.geometry.font_cell = obtained;
    }

    /// Centre the grid inside `area`.
    pub fn center_in(&mut self, area: PhysicalSize<u32>) {
        let used = self.font_cell().area(self.grid());
        self.geometry.offset = PhysicalPosition::new(
            (area.width as i32 - used.width as i32) / 2,
            (area.height as i32 - used.height as i32) / 2,
        );
    }

    pub fn set_border_offset(&mut self) {
        let border = self.border() as i32;
        self.geometry.offset = PhysicalPosition::new(border, border);
    }
}
