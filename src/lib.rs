//! `ingressantes-viz` library crate.
//!
//! The binary (`ingviz`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes or a real database
//! - the comparator/composer stay reusable (e.g., notebooks, future dashboards)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
