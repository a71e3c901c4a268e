//! Stepping an interactive drag rectangle.
//!
//! While the user drags a window edge the platform proposes a new outer
//! rectangle for every pointer move. Under the grid-preferring policies the
//! rectangle is snapped to whole character cells; under the font policy it is
//! snapped to whole multiples of the grid so the font can scale evenly.

use super::{ResizeEngine, ResizeTarget};
use crate::config::ResizePolicy;
use crate::geometry::{GridSize, PixelRect};

/// The edge or corner being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingOutcome {
    /// Rectangle the window should take
    pub rect: PixelRect,
    /// Grid shown in the size tip while dragging
    pub grid: GridSize,
    /// The proposed rectangle was changed
    pub adjusted: bool,
}

impl ResizeEngine {
    /// Snap a proposed drag rectangle for the active session.
    pub fn sizing(
        &self,
        target: &ResizeTarget<'_>,
        edge: ResizeEdge,
        proposed: PixelRect,
        font_modifier: bool,
    ) -> SizingOutcome {
        match target.policy() {
            ResizePolicy::Disabled => SizingOutcome {
                rect: proposed,
                grid: target.grid(),
                adjusted: false,
            },
            ResizePolicy::Grid => self.step_to_cells(target, edge, proposed),
            ResizePolicy::Either if !font_modifier => self.step_to_cells(target, edge, proposed),
            ResizePolicy::Font | ResizePolicy::Either => {
                self.step_to_grid_multiples(target, edge, proposed)
            }
        }
    }

    fn step_to_cells(
        &self,
        target: &ResizeTarget<'_>,
        edge: ResizeEdge,
        proposed: PixelRect,
    ) -> SizingOutcome {
        let extra = self.geometry.extra;
        let font = target.font_cell().clamped();
        let width = proposed.size.width as i32 - extra.width as i32;
        let height = proposed.size.height as i32 - extra.height as i32;

        let cols = ((width + font.width as i32 / 2) / font.width as i32).max(1);
        let rows = ((height + font.height as i32 / 2) / font.height as i32).max(1);
        let excess_w = width - cols * font.width as i32;
        let excess_h = height - rows * font.height as i32;

        SizingOutcome {
            rect: adjust_edges(proposed, edge, excess_w, excess_h),
            grid: GridSize::new(cols as u32, rows as u32),
            adjusted: excess_w != 0 || excess_h != 0,
        }
    }

    fn step_to_grid_multiples(
        &self,
        target: &ResizeTarget<'_>,
        edge: ResizeEdge,
        proposed: PixelRect,
    ) -> SizingOutcome {
        let extra = self.geometry.normal_extra(target.border());
        let grid = target.grid().clamped();
        let width = proposed.size.width as i32 - extra.width as i32;
        let height = proposed.size.height as i32 - extra.height as i32;

        let cell_w = ((width + grid.cols as i32 / 2) / grid.cols as i32).max(1);
        let cell_h = ((height + grid.rows as i32 / 2) / grid.rows as i32).max(1);
        let excess_w = width - cell_w * grid.cols as i32;
        let excess_h = height - cell_h * grid.rows as i32;

        SizingOutcome {
            rect: adjust_edges(proposed, edge, excess_w, excess_h),
            grid,
            adjusted: excess_w != 0 || excess_h != 0,
        }
    }
}

/// Remove `excess` pixels from the dragged side of the rectangle.
fn adjust_edges(rect: PixelRect, edge: ResizeEdge, excess_w: i32, excess_h: i32) -> PixelRect {
    let (mut left, mut top, mut right, mut bottom) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    if excess_w != 0 {
        if edge.moves_left() {
            left += excess_w;
        } else {
            right -= excess_w;
        }
    }
    if excess_h != 0 {
        if edge.moves_top() {
            top += excess_h;
        } else {
            bottom -= excess_h;
        }
    }
    PixelRect::from_edges(left, top, right, bottom)
}
