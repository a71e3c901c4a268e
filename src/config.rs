//! Configuration re-exports from the `par-tabs-config` sub-crate.

pub use par_tabs_config::*;
