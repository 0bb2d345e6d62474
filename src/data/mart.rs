//! DuckDB mart adapter.
//!
//! Everything this tool needs is pre-aggregated upstream into
//! `mart_visualizacao_variacao_ingressantes`; the adapter runs one read-only
//! query, maps columns to `ComparisonRow` and validates the numeric fields.

use std::path::Path;

use duckdb::{AccessMode, Config, Connection, params};

use crate::domain::{CategoryPair, ComparisonRow};
use crate::error::AppError;

const MART_TABLE: &str = "mart_visualizacao_variacao_ingressantes";

/// Run-scoped DuckDB connection.
///
/// The connection is released when the client drops, which happens
/// unconditionally at the end of the run.
pub struct MartClient {
    conn: Connection,
}

impl MartClient {
    /// Open the DuckDB file in read-only mode.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(|e| AppError::config(format!("Failed to configure DuckDB: {e}")))?;
        let conn = Connection::open_with_flags(path, config).map_err(|e| {
            AppError::config(format!(
                "Failed to open DuckDB database '{}': {e}",
                path.display()
            ))
        })?;
        Ok(Self { conn })
    }

    /// Load the comparison rows for the two configured modalities, ordered by
    /// category label.
    ///
    /// Returns an empty vector when the mart has no matching rows; callers
    /// decide how to surface that (the CLI prints a dbt hint and exits).
    pub fn load_comparison_rows(
        &self,
        pair: &CategoryPair,
    ) -> Result<Vec<ComparisonRow>, AppError> {
        let sql = format!(
            "SELECT \
                MODALIDADE_DESCRICAO, \
                MEDIA_PRE_60_MAIS, \
                MEDIA_POS_60_MAIS, \
                VARIACAO_PERCENTUAL_60_MAIS, \
                MEDIA_PRE_50_MAIS, \
                MEDIA_POS_50_MAIS, \
                VARIACAO_PERCENTUAL_50_MAIS, \
                TENDENCIA_60_MAIS, \
                TENDENCIA_50_MAIS \
             FROM {MART_TABLE} \
             WHERE MODALIDADE_DESCRICAO IN (?, ?) \
             ORDER BY MODALIDADE_DESCRICAO"
        );

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| AppError::data(format!("Failed to prepare mart query: {e}")))?;
        let mapped = stmt
            .query_map(
                params![pair.first.name, pair.second.name],
                row_to_comparison,
            )
            .map_err(|e| AppError::data(format!("Mart query failed: {e}")))?;

        let mut rows = Vec::new();
        for row in mapped {
            let row = row.map_err(|e| AppError::data(format!("Failed to read mart row: {e}")))?;
            validate_row(&row)?;
            rows.push(row);
        }
        Ok(rows)
    }
}

fn row_to_comparison(row: &duckdb::Row<'_>) -> duckdb::Result<ComparisonRow> {
    Ok(ComparisonRow {
        category: row.get(0)?,
        pre_mean_60: row.get(1)?,
        post_mean_60: row.get(2)?,
        variation_pct_60: row.get(3)?,
        pre_mean_50: row.get(4)?,
        post_mean_50: row.get(5)?,
        variation_pct_50: row.get(6)?,
        trend_60: row.get(7)?,
        trend_50: row.get(8)?,
    })
}

/// Reject rows the comparator cannot reason about: non-finite metrics and
/// negative period means (means are counts of enrollees, never below zero).
fn validate_row(row: &ComparisonRow) -> Result<(), AppError> {
    let metrics = [
        row.pre_mean_60,
        row.post_mean_60,
        row.variation_pct_60,
        row.pre_mean_50,
        row.post_mean_50,
        row.variation_pct_50,
    ];
    if metrics.iter().any(|v| !v.is_finite()) {
        return Err(AppError::data(format!(
            "Non-finite metric in mart row for category '{}'.",
            row.category
        )));
    }
    if row.pre_mean_60 < 0.0
        || row.post_mean_60 < 0.0
        || row.pre_mean_50 < 0.0
        || row.post_mean_50 < 0.0
    {
        return Err(AppError::data(format!(
            "Negative period mean in mart row for category '{}'.",
            row.category
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryPair;

    fn client_with_mart(rows_sql: &str) -> MartClient {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(&format!(
            "CREATE TABLE {MART_TABLE} (
                MODALIDADE_DESCRICAO VARCHAR,
                MEDIA_PRE_60_MAIS DOUBLE,
                MEDIA_POS_60_MAIS DOUBLE,
                VARIACAO_PERCENTUAL_60_MAIS DOUBLE,
                MEDIA_PRE_50_MAIS DOUBLE,
                MEDIA_POS_50_MAIS DOUBLE,
                VARIACAO_PERCENTUAL_50_MAIS DOUBLE,
                TENDENCIA_60_MAIS VARCHAR,
                TENDENCIA_50_MAIS VARCHAR
            );
            {rows_sql}"
        ))
        .unwrap();
        MartClient { conn }
    }

    #[test]
    fn loads_rows_ordered_by_category() {
        let client = client_with_mart(&format!(
            "INSERT INTO {MART_TABLE} VALUES
                ('Presencial', 10.0, 5.0, -50.0, 100.0, 80.0, -20.0, 'Redução', 'Redução'),
                ('EAD', 10.0, 20.0, 100.0, 50.0, 90.0, 80.0, 'Aumento', 'Aumento');"
        ));
        let rows = client
            .load_comparison_rows(&CategoryPair::default())
            .unwrap();
        assert_eq!(rows.len(), 2);
        // DuckDB orders by label, so EAD comes first.
        assert_eq!(rows[0].category, "EAD");
        assert_eq!(rows[1].category, "Presencial");
        assert_eq!(rows[0].variation_pct_60, 100.0);
        assert_eq!(rows[1].trend_60, "Redução");
    }

    #[test]
    fn filters_to_configured_categories() {
        let client = client_with_mart(&format!(
            "INSERT INTO {MART_TABLE} VALUES
                ('Presencial', 10.0, 5.0, -50.0, 1.0, 1.0, 0.0, 'Redução', 'Estável'),
                ('EAD', 10.0, 20.0, 100.0, 1.0, 1.0, 0.0, 'Aumento', 'Estável'),
                ('Semipresencial', 1.0, 2.0, 100.0, 1.0, 1.0, 0.0, 'Aumento', 'Estável');"
        ));
        let rows = client
            .load_comparison_rows(&CategoryPair::default())
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.category != "Semipresencial"));
    }

    #[test]
    fn empty_mart_yields_empty_vec() {
        let client = client_with_mart("");
        let rows = client
            .load_comparison_rows(&CategoryPair::default())
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn rejects_negative_period_means() {
        let client = client_with_mart(&format!(
            "INSERT INTO {MART_TABLE} VALUES
                ('EAD', -1.0, 20.0, 100.0, 1.0, 1.0, 0.0, 'Aumento', 'Estável');"
        ));
        let err = client
            .load_comparison_rows(&CategoryPair::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
