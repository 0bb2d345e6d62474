//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the mart snapshot row (`ComparisonRow`)
//! - the comparison configuration (`Category`, `CategoryPair`)
//! - chart colors (`ChartPalette`)
//! - the per-run configuration (`RunConfig`)

pub mod types;

pub use types::*;
