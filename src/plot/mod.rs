//! Chart rendering.
//!
//! Three PNG artifacts per run, all built with Plotters:
//!
//! - percentage variation per modality (60+ and 50+ panels)
//! - pre vs post mean comparison (grouped bars)
//! - variation tendency (horizontal bars)

pub mod charts;

pub use charts::*;
