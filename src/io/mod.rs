//! Output writers.
//!
//! - CSV export of the raw mart rows (`export`)
//! - text report file write (`export`)

pub mod export;

pub use export::*;
