//! Command-line parsing for the enrollment-variation report tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! query/report code.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ingviz",
    version,
    about = "Enrollment variation charts + report from the dbt-built DuckDB mart"
)]
pub struct Cli {
    /// Path to the DuckDB database holding the mart tables.
    #[arg(
        long = "db",
        env = "MART_DB_PATH",
        default_value = "bd/dev.duckdb",
        value_name = "FILE"
    )]
    pub db_path: PathBuf,

    /// Directory where charts, the text report and the CSV export are written.
    #[arg(long = "out-dir", default_value = "visualizacoes", value_name = "DIR")]
    pub out_dir: PathBuf,
}
