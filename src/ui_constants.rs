//! Named constants for UI layout dimensions.
//!
//! All values are pixels at 96 DPI and are scaled with the window DPI before
//! use. Colours and timing live in the configuration crate.

// ---------------------------------------------------------------------------
// Tab strip items  (src/tab_strip/layout.rs)
// ---------------------------------------------------------------------------

/// Width of the protocol image drawn at the left of every tab.
pub const TAB_IMAGE_WIDTH: u32 = 16;
/// Height of the protocol image.
pub const TAB_IMAGE_HEIGHT: u32 = 13;
/// Side length of the attention-blink glyph.
pub const TAB_BLINK_SIZE: u32 = 8;
/// Side length of the close button.
pub const TAB_CLOSE_SIZE: u32 = 11;
/// Gap between the tab's left edge and the protocol image.
pub const TAB_IMAGE_PADDING_X: u32 = 4;
/// Gap between the close button and the tab's right edge.
pub const TAB_CLOSE_PADDING_X: u32 = 5;
/// Gap between the close button and the tab's bottom edge.
pub const TAB_CLOSE_PADDING_Y: u32 = 5;
/// Gap between the image and the label, and between the label and the close button.
pub const TAB_LABEL_GAP: u32 = 4;
/// Border thickness around tab items.
pub const TAB_EDGE: u32 = 2;
/// Height of the accent bar on top of the active tab.
pub const TAB_ACCENT_HEIGHT: u32 = 2;

// ---------------------------------------------------------------------------
// Tab strip interaction  (src/tab_strip/pointer.rs)
// ---------------------------------------------------------------------------

/// Held-button move events tolerated before a press turns into a drag.
pub const TAB_DRAG_START_MOVES: u32 = 2;

// ---------------------------------------------------------------------------
// Window chrome  (src/resize/)
// ---------------------------------------------------------------------------

/// Width of the vertical scrollbar.
pub const SCROLLBAR_WIDTH: u32 = 17;
/// Columns never go below this for terminal-initiated resizes.
pub const MIN_REQUESTED_COLS: u32 = 15;
/// Smallest plausible font cell width when sanity-checking a requested grid.
pub const MIN_PLAUSIBLE_CELL_WIDTH: u32 = 4;
/// Smallest plausible font cell height when sanity-checking a requested grid.
pub const MIN_PLAUSIBLE_CELL_HEIGHT: u32 = 6;
