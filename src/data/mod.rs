//! Data source adapters.
//!
//! The only source is the DuckDB mart materialized by the upstream dbt
//! project (`mart`).

pub mod mart;

pub use mart::*;
