// Library exports for the binary, the replay tool and the integration tests
//
// All controller state lives on the UI thread. `parking_lot::Mutex` is used
// only where state is shared process-wide (the debug log) or between a test
// and the headless collaborators it boxed into a controller.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod debug;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod menu;
pub mod registry;
pub mod replay;
pub mod resize;
pub mod session;
pub mod tab_strip;
pub mod traits;
pub mod ui_constants;
pub mod window;

pub use registry::SessionRegistry;
pub use session::{Session, SessionId};
pub use tab_strip::{TabStrip, TabStripAction};
pub use window::{WindowController, WindowSetup};
