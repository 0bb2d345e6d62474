//! Report text assembly.
//!
//! We keep all formatting in one place so:
//! - the comparator stays a pure computation
//! - output changes are localized (the report file must stay byte-stable
//!   across runs with identical input)

use crate::domain::{ComparisonRow, POST_PERIOD, PRE_PERIOD};
use crate::report::DerivedFacts;

/// Assemble the full report document.
///
/// Fixed structure: title banner, period definitions, data-availability
/// caveat, one block per modality, then the conclusion naming the
/// largest-change category and the sharper of the two configured ones.
/// Every float is rendered with two decimals; percentages carry a trailing
/// `%`.
pub fn format_report(rows: &[ComparisonRow], facts: &DerivedFacts) -> String {
    let heavy_rule = "=".repeat(80);
    let light_rule = "-".repeat(80);

    let mut lines: Vec<String> = Vec::new();
    lines.push(heavy_rule.clone());
    lines.push("RELATÓRIO DE ANÁLISE: VARIAÇÃO DE INGRESSANTES 60+ ANOS".to_string());
    lines.push(heavy_rule.clone());
    lines.push(String::new());
    lines.push("PERÍODOS COMPARADOS:".to_string());
    lines.push(format!("  • Pré-Pandemia: {PRE_PERIOD} (média)"));
    lines.push(format!("  • Pós-Pandemia: {POST_PERIOD} (média)"));
    lines.push(String::new());
    lines.push("OBSERVAÇÃO: Faixa etária 62-69 anos não disponível nos dados.".to_string());
    lines.push(
        "            Análise realizada com faixa 60+ anos (aproximação mais próxima).".to_string(),
    );
    lines.push(String::new());
    lines.push(light_rule.clone());
    lines.push(String::new());

    for row in rows {
        lines.push(format!("MODALIDADE: {}", row.category));
        lines.push(format!("  Média Pré-Pandemia (60+): {:.2}", row.pre_mean_60));
        lines.push(format!("  Média Pós-Pandemia (60+): {:.2}", row.post_mean_60));
        lines.push(format!("  Variação Percentual: {:.2}%", row.variation_pct_60));
        lines.push(format!("  Tendência: {}", row.trend_60));
        lines.push(String::new());
    }

    lines.push(light_rule);
    lines.push("CONCLUSÃO:".to_string());
    lines.push(format!(
        "  • A modalidade com maior variação foi: {}",
        facts.largest_change.category
    ));
    lines.push(format!(
        "    Variação: {:.2}%",
        facts.largest_change.variation_pct_60
    ));
    lines.push(String::new());
    lines.push(format!(
        "  • A mudança foi MAIS ACENTUADA nos cursos {}",
        facts.sharper.emphasis
    ));
    lines.push(String::new());
    lines.push(heavy_rule);

    lines.join("\n")
}
