//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - loaded straight from the mart query
//! - exported to CSV unchanged
//! - handed to the comparator/composer without further shaping

use std::path::PathBuf;

use serde::Serialize;

/// Pre-pandemic averaging window, as labeled in reports and chart legends.
pub const PRE_PERIOD: &str = "2017-2018";

/// Post-pandemic averaging window, as labeled in reports and chart legends.
pub const POST_PERIOD: &str = "2023-2024";

/// Which age threshold a metric refers to.
///
/// The source data has no 62-69 band, so the analysis runs on the 60+ band
/// (primary) with the 50+ band kept as a secondary sanity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    SixtyPlus,
    FiftyPlus,
}

impl AgeBand {
    /// Short label used in chart captions ("60+" / "50+").
    pub fn label(self) -> &'static str {
        match self {
            AgeBand::SixtyPlus => "60+",
            AgeBand::FiftyPlus => "50+",
        }
    }
}

/// One mart row per instructional modality.
///
/// Field names mirror the mart column names via serde renames so the CSV
/// export reproduces the query result verbatim. Rows are a read-only snapshot:
/// produced once per run, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    #[serde(rename = "MODALIDADE_DESCRICAO")]
    pub category: String,
    #[serde(rename = "MEDIA_PRE_60_MAIS")]
    pub pre_mean_60: f64,
    #[serde(rename = "MEDIA_POS_60_MAIS")]
    pub post_mean_60: f64,
    #[serde(rename = "VARIACAO_PERCENTUAL_60_MAIS")]
    pub variation_pct_60: f64,
    #[serde(rename = "MEDIA_PRE_50_MAIS")]
    pub pre_mean_50: f64,
    #[serde(rename = "MEDIA_POS_50_MAIS")]
    pub post_mean_50: f64,
    #[serde(rename = "VARIACAO_PERCENTUAL_50_MAIS")]
    pub variation_pct_50: f64,
    #[serde(rename = "TENDENCIA_60_MAIS")]
    pub trend_60: String,
    #[serde(rename = "TENDENCIA_50_MAIS")]
    pub trend_50: String,
}

impl ComparisonRow {
    /// Signed percentage variation for the given age band.
    pub fn variation_pct(&self, band: AgeBand) -> f64 {
        match band {
            AgeBand::SixtyPlus => self.variation_pct_60,
            AgeBand::FiftyPlus => self.variation_pct_50,
        }
    }
}

/// A compared modality plus the emphasized form used in the conclusion
/// sentence ("Presencial" -> "PRESENCIAIS").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub emphasis: String,
}

impl Category {
    pub fn new(name: impl Into<String>, emphasis: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emphasis: emphasis.into(),
        }
    }
}

/// The two modalities under comparison.
///
/// Kept as explicit configuration rather than constants inside the comparator
/// so the comparison logic stays testable with arbitrary labels.
#[derive(Debug, Clone)]
pub struct CategoryPair {
    pub first: Category,
    pub second: Category,
}

impl Default for CategoryPair {
    fn default() -> Self {
        Self {
            first: Category::new("Presencial", "PRESENCIAIS"),
            second: Category::new("EAD", "EAD"),
        }
    }
}

/// Chart colors as plain RGB triples (converted to backend colors in `plot`).
#[derive(Debug, Clone)]
pub struct ChartPalette {
    /// Per-modality bar colors, matched by category name.
    pub categories: Vec<(String, (u8, u8, u8))>,
    /// Color used for categories with no configured entry.
    pub fallback: (u8, u8, u8),
    /// Pre-period bar color in the means comparison chart.
    pub pre_bar: (u8, u8, u8),
    /// Post-period bar color in the means comparison chart.
    pub post_bar: (u8, u8, u8),
}

impl ChartPalette {
    pub fn color_for(&self, category: &str) -> (u8, u8, u8) {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, rgb)| *rgb)
            .unwrap_or(self.fallback)
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            categories: vec![
                ("Presencial".to_string(), (0x2E, 0x86, 0xAB)),
                ("EAD".to_string(), (0xA2, 0x3B, 0x72)),
            ],
            fallback: (0x7F, 0x7F, 0x7F),
            pre_bar: (0xFF, 0x6B, 0x6B),
            post_bar: (0x4E, 0xCD, 0xC4),
        }
    }
}

/// A full run's configuration (CLI flags plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub db_path: PathBuf,
    pub out_dir: PathBuf,
    pub pair: CategoryPair,
    pub palette: ChartPalette,
}
