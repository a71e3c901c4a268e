//! Font requests and the fallback when a font cannot be created.

use crate::config::FontSpec;
use crate::geometry::{CellSize, Dpi, mul_div};
use crate::traits::FontService;

/// Points per inch, for converting the configured point size to pixels.
const POINTS_PER_INCH: u32 = 72;

/// What the resize engine asks the font service for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontRequest {
    pub spec: FontSpec,
    pub dpi: Dpi,
    /// Requested cell size; `None` asks for the font's natural size.
    pub cell: Option<CellSize>,
}

impl FontRequest {
    pub fn natural(spec: &FontSpec, dpi: Dpi) -> Self {
        Self {
            spec: spec.clone(),
            dpi,
            cell: None,
        }
    }

    pub fn sized(spec: &FontSpec, dpi: Dpi, cell: CellSize) -> Self {
        Self {
            spec: spec.clone(),
            dpi,
            cell: Some(cell),
        }
    }

    /// Pixel height of the configured point size at this DPI.
    pub fn natural_height_px(&self) -> u32 {
        mul_div(self.spec.size_pt as i32, self.dpi.y, POINTS_PER_INCH).max(1) as u32
    }
}

/// Create the font, falling back to the service's remaining handle on failure.
///
/// Never fails: the returned cell is at least 1x1.
pub fn obtain_cell(fonts: &mut dyn FontService, request: &FontRequest) -> CellSize {
    match fonts.create_font(request) {
        Ok(cell) => cell.clamped(),
        Err(e) => {
            let fallback = fonts.fallback_cell(request).clamped();
            log::warn!(
                "Font creation failed ({}); using fallback cell {}x{}",
                e,
                fallback.width,
                fallback.height
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessFonts;

    #[test]
    fn test_natural_height_uses_dpi() {
        let spec = FontSpec {
            size_pt: 12,
            ..Default::default()
        };
        assert_eq!(FontRequest::natural(&spec, Dpi::uniform(96)).natural_height_px(), 16);
        assert_eq!(FontRequest::natural(&spec, Dpi::uniform(144)).natural_height_px(), 24);
    }

    #[test]
    fn test_failed_font_falls_back() {
        let mut fonts = HeadlessFonts::new(CellSize::new(8, 16));
        fonts.fail_sized_requests = true;
        let request = FontRequest::sized(&FontSpec::default(), Dpi::default(), CellSize::new(3, 5));
        assert_eq!(obtain_cell(&mut fonts, &request), CellSize::new(8, 16));
    }

    #[test]
    fn test_zero_cell_is_clamped() {
        let mut fonts = HeadlessFonts::new(CellSize::new(8, 16));
        let request = FontRequest::sized(&FontSpec::default(), Dpi::default(), CellSize::new(0, 0));
        assert_eq!(obtain_cell(&mut fonts, &request), CellSize::new(1, 1));
    }
}
