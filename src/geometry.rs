//! Integer pixel geometry shared by the tab strip and the resize engine.
//!
//! Window-level sizes use winit's physical pixel types. Cell and grid sizes
//! get their own types so a column count can never be passed where a pixel
//! width is expected.

use winit::dpi::{PhysicalPosition, PhysicalSize};

/// DPI at which every unscaled metric in this crate is expressed.
pub const BASE_DPI: u32 = 96;

/// `value * numerator / denominator`, rounded half away from zero.
pub fn mul_div(value: i32, numerator: u32, denominator: u32) -> i32 {
    if denominator == 0 {
        return -1;
    }
    let product = i64::from(value) * i64::from(numerator);
    let denominator = i64::from(denominator);
    let half = denominator / 2;
    let result = if product >= 0 {
        (product + half) / denominator
    } else {
        (product - half) / denominator
    };
    result.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Horizontal and vertical dots per inch of the monitor hosting the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dpi {
    pub x: u32,
    pub y: u32,
}

impl Default for Dpi {
    fn default() -> Self {
        Self::uniform(BASE_DPI)
    }
}

impl Dpi {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn uniform(dpi: u32) -> Self {
        Self { x: dpi, y: dpi }
    }

    /// Convert a winit scale factor (1.0 == 96 DPI).
    pub fn from_scale_factor(scale_factor: f64) -> Self {
        let dpi = (scale_factor * f64::from(BASE_DPI)).round().max(1.0) as u32;
        Self::uniform(dpi)
    }

    pub fn scale_factor(&self) -> f64 {
        f64::from(self.x) / f64::from(BASE_DPI)
    }

    pub fn scale_x(&self, value: i32) -> i32 {
        mul_div(value, self.x, BASE_DPI)
    }

    pub fn scale_y(&self, value: i32) -> i32 {
        mul_div(value, self.y, BASE_DPI)
    }

    /// Scale an unsigned metric, never returning less than zero.
    pub fn scale_size(&self, size: PhysicalSize<u32>) -> PhysicalSize<u32> {
        PhysicalSize::new(
            self.scale_x(size.width as i32).max(0) as u32,
            self.scale_y(size.height as i32).max(0) as u32,
        )
    }
}

/// Pixel size of one character cell of a session's font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Never smaller than one pixel in either direction.
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }

    /// Pixel area covered by `grid` cells of this size.
    pub fn area(self, grid: GridSize) -> PhysicalSize<u32> {
        PhysicalSize::new(
            self.width.saturating_mul(grid.cols),
            self.height.saturating_mul(grid.rows),
        )
    }

    /// Largest cell that fits `grid` cells into `area`.
    pub fn fitting(area: PhysicalSize<u32>, grid: GridSize) -> Self {
        let grid = grid.clamped();
        Self {
            width: area.width / grid.cols,
            height: area.height / grid.rows,
        }
    }
}

/// Terminal character grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
}

impl GridSize {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Never fewer than one row and one column.
    pub fn clamped(self) -> Self {
        Self {
            cols: self.cols.max(1),
            rows: self.rows.max(1),
        }
    }

    /// Whole cells of `cell` that fit in `area`, at least 1x1.
    pub fn fitting(area: PhysicalSize<u32>, cell: CellSize) -> Self {
        let cell = cell.clamped();
        Self {
            cols: area.width / cell.width,
            rows: area.height / cell.height,
        }
        .clamped()
    }
}

/// Axis-aligned rectangle in physical screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub origin: PhysicalPosition<i32>,
    pub size: PhysicalSize<u32>,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            origin: PhysicalPosition::new(x, y),
            size: PhysicalSize::new(width, height),
        }
    }

    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(
            left,
            top,
            (right - left).max(0) as u32,
            (bottom - top).max(0) as u32,
        )
    }

    pub fn left(&self) -> i32 {
        self.origin.x
    }

    pub fn top(&self) -> i32 {
        self.origin.y
    }

    pub fn right(&self) -> i32 {
        self.origin.x + self.size.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.height as i32
    }

    pub fn center(&self) -> PhysicalPosition<i32> {
        PhysicalPosition::new(
            self.origin.x + (self.size.width / 2) as i32,
            self.origin.y + (self.size.height / 2) as i32,
        )
    }

    /// A rectangle of `size` whose centre is `center`.
    pub fn centered_on(center: PhysicalPosition<i32>, size: PhysicalSize<u32>) -> Self {
        Self {
            origin: PhysicalPosition::new(
                center.x - (size.width / 2) as i32,
                center.y - (size.height / 2) as i32,
            ),
            size,
        }
    }
}

/// Component-wise `a + b`.
pub fn size_add(a: PhysicalSize<u32>, b: PhysicalSize<u32>) -> PhysicalSize<u32> {
    PhysicalSize::new(
        a.width.saturating_add(b.width),
        a.height.saturating_add(b.height),
    )
}

/// Component-wise `a - b`, floored at zero.
pub fn size_sub(a: PhysicalSize<u32>, b: PhysicalSize<u32>) -> PhysicalSize<u32> {
    PhysicalSize::new(
        a.width.saturating_sub(b.width),
        a.height.saturating_sub(b.height),
    )
}
