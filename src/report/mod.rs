//! Reporting: derived comparison facts and the formatted text document.

pub mod format;

pub use format::*;

use crate::domain::{Category, CategoryPair, ComparisonRow};
use crate::error::AppError;

/// Facts derived from the full mart snapshot, computed once per run and
/// discarded after the report text is produced.
#[derive(Debug, Clone)]
pub struct DerivedFacts {
    /// Row with the largest absolute 60+ percentage variation.
    pub largest_change: ComparisonRow,
    /// Whichever configured category changed more sharply.
    pub sharper: Category,
}

/// Compute the derived facts for the report conclusion.
///
/// Pure function of its input. Fails when the snapshot is empty or when
/// either configured category is absent from it.
pub fn derive_facts(
    rows: &[ComparisonRow],
    pair: &CategoryPair,
) -> Result<DerivedFacts, AppError> {
    if rows.is_empty() {
        return Err(AppError::data(
            "Cannot derive facts from an empty mart result.",
        ));
    }

    // Max |variation| with first-occurrence tie-break: only a strictly larger
    // magnitude replaces the current candidate.
    let mut largest = &rows[0];
    for row in &rows[1..] {
        if row.variation_pct_60.abs() > largest.variation_pct_60.abs() {
            largest = row;
        }
    }

    let first = find_category(rows, &pair.first)?;
    let second = find_category(rows, &pair.second)?;

    // Strict `>` means a tie in magnitude is attributed to the second
    // category.
    let sharper = if first.variation_pct_60.abs() > second.variation_pct_60.abs() {
        pair.first.clone()
    } else {
        pair.second.clone()
    };

    Ok(DerivedFacts {
        largest_change: largest.clone(),
        sharper,
    })
}

fn find_category<'a>(
    rows: &'a [ComparisonRow],
    category: &Category,
) -> Result<&'a ComparisonRow, AppError> {
    rows.iter()
        .find(|r| r.category == category.name)
        .ok_or_else(|| {
            AppError::data(format!(
                "Category '{}' is missing from the mart result.",
                category.name
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, pre: f64, post: f64, variation: f64) -> ComparisonRow {
        ComparisonRow {
            category: category.to_string(),
            pre_mean_60: pre,
            post_mean_60: post,
            variation_pct_60: variation,
            pre_mean_50: pre,
            post_mean_50: post,
            variation_pct_50: variation,
            trend_60: if variation >= 0.0 { "Aumento" } else { "Redução" }.to_string(),
            trend_50: "Estável".to_string(),
        }
    }

    #[test]
    fn ead_doubling_beats_presencial_halving() {
        let rows = vec![
            row("Presencial", 10.0, 5.0, -50.0),
            row("EAD", 10.0, 20.0, 100.0),
        ];
        let facts = derive_facts(&rows, &CategoryPair::default()).unwrap();
        assert_eq!(facts.largest_change.category, "EAD");
        assert_eq!(facts.sharper.name, "EAD");
    }

    #[test]
    fn negative_variation_wins_on_magnitude() {
        let rows = vec![
            row("Presencial", 10.0, 2.0, -80.0),
            row("EAD", 10.0, 16.0, 60.0),
        ];
        let facts = derive_facts(&rows, &CategoryPair::default()).unwrap();
        assert_eq!(facts.largest_change.category, "Presencial");
        assert_eq!(facts.sharper.name, "Presencial");
        assert_eq!(facts.sharper.emphasis, "PRESENCIAIS");
    }

    #[test]
    fn largest_change_ties_break_to_first_occurrence() {
        let rows = vec![
            row("Presencial", 10.0, 5.0, -50.0),
            row("EAD", 10.0, 15.0, 50.0),
        ];
        let facts = derive_facts(&rows, &CategoryPair::default()).unwrap();
        assert_eq!(facts.largest_change.category, "Presencial");
        // The two-way comparison attributes magnitude ties to the second
        // category.
        assert_eq!(facts.sharper.name, "EAD");
    }

    #[test]
    fn single_row_is_its_own_largest_change() {
        let pair = CategoryPair {
            first: Category::new("Presencial", "PRESENCIAIS"),
            second: Category::new("Presencial", "PRESENCIAIS"),
        };
        let rows = vec![row("Presencial", 10.0, 5.0, -50.0)];
        let facts = derive_facts(&rows, &pair).unwrap();
        assert_eq!(facts.largest_change.category, "Presencial");
    }

    #[test]
    fn missing_category_is_a_data_error() {
        let rows = vec![row("Presencial", 10.0, 5.0, -50.0)];
        let err = derive_facts(&rows, &CategoryPair::default()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("EAD"));
    }

    #[test]
    fn empty_input_is_a_data_error() {
        let err = derive_facts(&[], &CategoryPair::default()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
