//! Shared report pipeline.
//!
//! Keeping this in one place keeps the workflow linear and testable:
//! mart query -> derived facts -> report text
//!
//! `app::run` then focuses on presentation: writing artifacts and printing
//! progress.

use crate::data::MartClient;
use crate::domain::{ComparisonRow, RunConfig};
use crate::error::AppError;
use crate::report::{self, DerivedFacts};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub rows: Vec<ComparisonRow>,
    pub facts: DerivedFacts,
    pub report: String,
}

/// Outcome of a pipeline run. An empty mart is not an error: the CLI prints
/// a hint to run the upstream dbt models and exits cleanly.
pub enum RunStatus {
    EmptyMart,
    Complete(RunOutput),
}

/// Query the mart and compute everything the artifact writers need.
pub fn run(config: &RunConfig) -> Result<RunStatus, AppError> {
    let client = MartClient::open(&config.db_path)?;
    let rows = client.load_comparison_rows(&config.pair)?;
    if rows.is_empty() {
        return Ok(RunStatus::EmptyMart);
    }
    Ok(RunStatus::Complete(run_with_rows(rows, config)?))
}

/// Compute facts and the report text from pre-fetched rows.
///
/// Useful for tests where no database is involved.
pub fn run_with_rows(rows: Vec<ComparisonRow>, config: &RunConfig) -> Result<RunOutput, AppError> {
    let facts = report::derive_facts(&rows, &config.pair)?;
    let text = report::format_report(&rows, &facts);
    Ok(RunOutput {
        rows,
        facts,
        report: text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryPair, ChartPalette};

    fn config() -> RunConfig {
        RunConfig {
            db_path: "unused.duckdb".into(),
            out_dir: "unused".into(),
            pair: CategoryPair::default(),
            palette: ChartPalette::default(),
        }
    }

    fn row(category: &str, variation: f64) -> ComparisonRow {
        ComparisonRow {
            category: category.to_string(),
            pre_mean_60: 10.0,
            post_mean_60: 10.0 * (1.0 + variation / 100.0),
            variation_pct_60: variation,
            pre_mean_50: 10.0,
            post_mean_50: 10.0,
            variation_pct_50: 0.0,
            trend_60: "Aumento".to_string(),
            trend_50: "Estável".to_string(),
        }
    }

    #[test]
    fn run_with_rows_threads_facts_into_the_report() {
        let rows = vec![row("EAD", 100.0), row("Presencial", -50.0)];
        let out = run_with_rows(rows, &config()).unwrap();
        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.facts.largest_change.category, "EAD");
        assert!(out.report.contains("A mudança foi MAIS ACENTUADA nos cursos EAD"));
    }

    #[test]
    fn run_with_rows_propagates_missing_category() {
        let rows = vec![row("EAD", 100.0)];
        let err = run_with_rows(rows, &config()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
