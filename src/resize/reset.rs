//! The grid/font/window solve.
//!
//! Which quantity gives way depends on the zoom state, the reset mode and the
//! policy:
//!
//! - zoomed: the window is fixed; the grid (`Grid`) or the font (others) fits it
//! - `DpiChanged`: font reloaded, window moved and resized around its centre
//! - `Reinit` and above: the window is resized to fit font and grid exactly
//! - `Grid`, or `Either` restoring: the window fits the grid, within the monitor
//! - otherwise: the font fits the window

use super::{ResetMode, ResizeEngine, ResizeOutcome, ResizeTarget, WindowRequest};
use crate::config::ResizePolicy;
use crate::geometry::{CellSize, GridSize, PixelRect, size_add, size_sub};
use winit::dpi::PhysicalSize;

impl ResizeEngine {
    /// Recompute geometry for the active session at the given depth.
    pub fn reset(&mut self, target: &mut ResizeTarget<'_>, mode: ResetMode) -> ResizeOutcome {
        let mut out = ResizeOutcome::default();
        let policy = target.policy();

        // A window that cannot be resized always snaps back to the natural font
        let mode = if policy == ResizePolicy::Disabled && mode < ResetMode::ReloadFonts {
            ResetMode::ReloadFonts
        } else {
            mode
        };
        log::trace!("Reset window {:?} under {:?}", mode, policy);

        if mode >= ResetMode::ReloadFonts {
            target.reload_font(self.geometry.dpi, None);
        }

        let area = self.geometry.terminal_area();
        if area.width == 0 || area.height == 0 {
            // Minimized; nothing sensible to fit
            return out;
        }

        if mode == ResetMode::Reposition {
            target.center_in(area);
        }

        if self.geometry.zoom.is_zoomed() {
            self.solve_zoomed(target, area, &mut out);
            return out;
        }

        if mode == ResetMode::DpiChanged {
            self.fit_after_dpi_change(target, &mut out);
            return out;
        }

        let border = target.border();
        if mode >= ResetMode::Reinit {
            target.set_border_offset();
            self.geometry.extra = self.geometry.normal_extra(border);
            let wanted = size_add(
                target.font_cell().area(target.grid()),
                PhysicalSize::new(border * 2, border * 2),
            );
            if area != wanted {
                out.request(WindowRequest::Resize(self.outer_for(target)));
            }
            out.redraw = true;
            return out;
        }

        let grid_wins = policy == ResizePolicy::Grid
            || (policy == ResizePolicy::Either && mode == ResetMode::Restore);
        if grid_wins {
            self.fit_window_to_grid(target, area, &mut out);
        } else {
            self.fit_font_to_window(target, area, &mut out);
        }
        out
    }

    /// Outer window size that shows the target's grid at its font with the current extra.
    pub(crate) fn outer_for(&self, target: &ResizeTarget<'_>) -> PhysicalSize<u32> {
        size_add(target.font_cell().area(target.grid()), self.geometry.extra)
    }

    fn solve_zoomed(
        &mut self,
        target: &mut ResizeTarget<'_>,
        area: PhysicalSize<u32>,
        out: &mut ResizeOutcome,
    ) {
        self.geometry.extra = self.geometry.zoomed_extra();
        let grid = target.grid();
        let font = target.font_cell();

        if target.policy() != ResizePolicy::Grid {
            let wanted = CellSize::fitting(area, grid);
            if font != wanted {
                target.reload_font(self.geometry.dpi, Some(wanted));
                target.center_in(area);
                out.redraw = true;
            }
        } else if font.area(grid) != area {
            target.resize_grid(GridSize::fitting(area, font));
            target.center_in(area);
            out.redraw = true;
        }
    }

    fn fit_after_dpi_change(&mut self, target: &mut ResizeTarget<'_>, out: &mut ResizeOutcome) {
        target.set_border_offset();
        self.geometry.extra = self.geometry.normal_extra(target.border());
        let size = self.outer_for(target);
        let center = self
            .dpi_suggested
            .take()
            .unwrap_or(self.geometry.outer)
            .center();
        let rect = PixelRect::centered_on(center, size);
        log::debug!(
            "DPI change: window {}x{} centred at ({}, {})",
            size.width,
            size.height,
            center.x,
            center.y
        );
        out.request(WindowRequest::MoveResize(rect));
        out.redraw = true;
    }

    /// Resize the window around the grid, shrinking font or grid to stay on the monitor.
    fn fit_window_to_grid(
        &mut self,
        target: &mut ResizeTarget<'_>,
        area: PhysicalSize<u32>,
        out: &mut ResizeOutcome,
    ) {
        let border = target.border();
        target.set_border_offset();
        let extra = self.geometry.normal_extra(border);
        self.geometry.extra = extra;

        let wanted = size_add(
            target.font_cell().area(target.grid()),
            PhysicalSize::new(border * 2, border * 2),
        );
        if area == wanted {
            return;
        }

        let usable = size_sub(self.geometry.monitor.size, extra);
        let font = target.font_cell().clamped();
        let grid = target.grid();
        let fits = GridSize::new(usable.width / font.width, usable.height / font.height);

        if grid.cols > fits.cols || grid.rows > fits.rows {
            if target.policy() == ResizePolicy::Either {
                let mut cell = font;
                if grid.cols > fits.cols {
                    cell.width = usable.width / grid.cols;
                }
                if grid.rows > fits.rows {
                    cell.height = usable.height / grid.rows;
                }
                log::info!(
                    "Grid {}x{} exceeds the monitor; shrinking font to {}x{}",
                    grid.cols,
                    grid.rows,
                    cell.width,
                    cell.height
                );
                target.reload_font(self.geometry.dpi, Some(cell));
            } else {
                let clamped = GridSize::new(grid.cols.min(fits.cols), grid.rows.min(fits.rows));
                log::info!(
                    "Grid {}x{} exceeds the monitor; clamping to {}x{}",
                    grid.cols,
                    grid.rows,
                    clamped.cols,
                    clamped.rows
                );
                target.resize_grid(clamped);
            }
        }

        out.request(WindowRequest::Resize(self.outer_for(target)));
        out.redraw = true;
    }

    fn fit_font_to_window(
        &mut self,
        target: &mut ResizeTarget<'_>,
        area: PhysicalSize<u32>,
        out: &mut ResizeOutcome,
    ) {
        let border = target.border();
        let inner = size_sub(area, PhysicalSize::new(border * 2, border * 2));
        let wanted = CellSize::fitting(inner, target.grid());
        if target.font_cell() == wanted {
            return;
        }

        target.reload_font(self.geometry.dpi, Some(wanted));
        target.center_in(area);
        let offset = target.geometry.offset;
        self.geometry.extra = size_add(
            self.geometry.zoomed_extra(),
            PhysicalSize::new(
                (offset.x.max(0) * 2) as u32,
                (offset.y.max(0) * 2) as u32,
            ),
        );
        out.redraw = true;
    }
}
