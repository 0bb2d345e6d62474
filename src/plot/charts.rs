//! PNG chart composition.
//!
//! The charts are data-driven: bar geometry and axis bounds are computed by
//! small pure helpers (`padded_range`, `label_offset`) so the numeric parts
//! are testable without a drawing backend.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::domain::{AgeBand, ChartPalette, ComparisonRow, POST_PERIOD, PRE_PERIOD};
use crate::error::AppError;

/// Axis range covering all values plus the zero baseline, with headroom for
/// bar value labels.
pub fn padded_range(values: &[f64]) -> (f64, f64) {
    let mut lo = 0.0f64;
    let mut hi = 0.0f64;
    for v in values {
        lo = lo.min(*v);
        hi = hi.max(*v);
    }
    let span = hi - lo;
    let pad = if span > 0.0 { span * 0.15 } else { 1.0 };
    (lo - pad, hi + pad)
}

/// Distance between a bar end and its value label, in axis units.
pub fn label_offset(lo: f64, hi: f64) -> f64 {
    (hi - lo) * 0.03
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

fn chart_err<E: std::fmt::Display>(err: E) -> AppError {
    AppError::config(format!("Chart rendering failed: {err}"))
}

/// Chart 1: percentage variation per modality, one panel per age band.
pub fn render_variation_chart(
    path: &Path,
    rows: &[ComparisonRow],
    palette: &ChartPalette,
) -> Result<(), AppError> {
    let root = BitMapBackend::new(path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let (left, right) = root.split_horizontally(800);

    draw_variation_panel(&left, rows, palette, AgeBand::SixtyPlus)?;
    draw_variation_panel(&right, rows, palette, AgeBand::FiftyPlus)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

fn draw_variation_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    rows: &[ComparisonRow],
    palette: &ChartPalette,
    band: AgeBand,
) -> Result<(), AppError> {
    let values: Vec<f64> = rows.iter().map(|r| r.variation_pct(band)).collect();
    let (y_lo, y_hi) = padded_range(&values);
    let n = rows.len() as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!(
                "Variação Percentual de Ingressantes {} Anos (Pré vs Pós Pandemia)",
                band.label()
            ),
            ("sans-serif", 24),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..n, y_lo..y_hi)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Modalidade de Ensino")
        .y_desc("Variação Percentual (%)")
        .label_style(("sans-serif", 16).into_font())
        .draw()
        .map_err(chart_err)?;

    // Zero baseline.
    chart
        .draw_series(LineSeries::new(vec![(0.0, 0.0), (n, 0.0)], &BLACK))
        .map_err(chart_err)?;

    let offset = label_offset(y_lo, y_hi);
    for (i, row) in rows.iter().enumerate() {
        let v = row.variation_pct(band);
        let color = rgb(palette.color_for(&row.category));
        let (x0, x1) = (i as f64 + 0.2, i as f64 + 0.8);
        let (bottom, top) = if v < 0.0 { (v, 0.0) } else { (0.0, v) };

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x0, bottom), (x1, top)],
                color.filled(),
            )))
            .map_err(chart_err)?;

        // Category + value just past the end of the bar.
        let label_y = if v < 0.0 { v - offset * 2.0 } else { v + offset };
        chart
            .draw_series(std::iter::once(Text::new(
                format!("{}: {:.1}%", row.category, v),
                (x0, label_y),
                ("sans-serif", 18).into_font(),
            )))
            .map_err(chart_err)?;
    }

    Ok(())
}

/// Chart 2: pre vs post period means (60+ band), grouped bars with a legend.
pub fn render_means_chart(
    path: &Path,
    rows: &[ComparisonRow],
    palette: &ChartPalette,
) -> Result<(), AppError> {
    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let values: Vec<f64> = rows
        .iter()
        .flat_map(|r| [r.pre_mean_60, r.post_mean_60])
        .collect();
    let (_, y_hi) = padded_range(&values);
    let n = rows.len() as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Comparação de Médias: Ingressantes 60+ Anos por Modalidade",
            ("sans-serif", 28),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..n, 0f64..y_hi)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Modalidade de Ensino")
        .y_desc("Média de Ingressantes 60+ Anos")
        .label_style(("sans-serif", 16).into_font())
        .draw()
        .map_err(chart_err)?;

    let pre_color = rgb(palette.pre_bar);
    let post_color = rgb(palette.post_bar);
    let offset = label_offset(0.0, y_hi);

    for (i, row) in rows.iter().enumerate() {
        let base = i as f64;
        let pre = chart
            .draw_series(std::iter::once(Rectangle::new(
                [(base + 0.15, 0.0), (base + 0.45, row.pre_mean_60)],
                pre_color.filled(),
            )))
            .map_err(chart_err)?;
        if i == 0 {
            pre.label(format!("Pré-Pandemia ({PRE_PERIOD})"))
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 12, y + 6)], pre_color.filled())
                });
        }

        let post = chart
            .draw_series(std::iter::once(Rectangle::new(
                [(base + 0.55, 0.0), (base + 0.85, row.post_mean_60)],
                post_color.filled(),
            )))
            .map_err(chart_err)?;
        if i == 0 {
            post.label(format!("Pós-Pandemia ({POST_PERIOD})"))
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 12, y + 6)], post_color.filled())
                });
        }

        for (x0, v) in [(base + 0.15, row.pre_mean_60), (base + 0.55, row.post_mean_60)] {
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("{v:.1}"),
                    (x0 + 0.05, v + offset),
                    ("sans-serif", 16).into_font(),
                )))
                .map_err(chart_err)?;
        }

        chart
            .draw_series(std::iter::once(Text::new(
                row.category.clone(),
                (base + 0.38, y_hi * 0.96),
                ("sans-serif", 18).into_font(),
            )))
            .map_err(chart_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Chart 3: variation tendency (60+ band) as horizontal bars around a zero
/// line, with direction annotations.
pub fn render_trend_chart(
    path: &Path,
    rows: &[ComparisonRow],
    palette: &ChartPalette,
) -> Result<(), AppError> {
    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let values: Vec<f64> = rows.iter().map(|r| r.variation_pct_60).collect();
    let (x_lo, x_hi) = padded_range(&values);
    let n = rows.len() as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Tendência de Variação: Ingressantes 60+ Anos (Pré vs Pós Pandemia)",
            ("sans-serif", 26),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(x_lo..x_hi, 0f64..n)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Variação Percentual (%)")
        .label_style(("sans-serif", 16).into_font())
        .draw()
        .map_err(chart_err)?;

    // Zero line separating reductions from increases.
    chart
        .draw_series(LineSeries::new(
            vec![(0.0, 0.0), (0.0, n)],
            BLACK.stroke_width(2),
        ))
        .map_err(chart_err)?;

    let offset = label_offset(x_lo, x_hi);
    for (i, row) in rows.iter().enumerate() {
        let v = row.variation_pct_60;
        let color = rgb(palette.color_for(&row.category));
        let (y0, y1) = (i as f64 + 0.25, i as f64 + 0.75);
        let (left, right) = if v < 0.0 { (v, 0.0) } else { (0.0, v) };

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(left, y0), (right, y1)],
                color.filled(),
            )))
            .map_err(chart_err)?;

        let label_x = if v < 0.0 {
            v - offset * 5.0
        } else {
            v + offset
        };
        chart
            .draw_series(std::iter::once(Text::new(
                format!("{}: {:.1}%", row.category, v),
                (label_x, y0 + 0.2),
                ("sans-serif", 18).into_font(),
            )))
            .map_err(chart_err)?;
    }

    let span = x_hi - x_lo;
    chart
        .draw_series(std::iter::once(Text::new(
            "← Redução".to_string(),
            (x_lo + span * 0.01, n - 0.05),
            ("sans-serif", 18).into_font().color(&RED),
        )))
        .map_err(chart_err)?;
    chart
        .draw_series(std::iter::once(Text::new(
            "Aumento →".to_string(),
            (x_hi - span * 0.15, n - 0.05),
            ("sans-serif", 18).into_font().color(&GREEN),
        )))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_covers_values_and_zero() {
        let (lo, hi) = padded_range(&[-50.0, 100.0]);
        assert!(lo < -50.0);
        assert!(hi > 100.0);

        // All-positive input still anchors at the zero baseline.
        let (lo, hi) = padded_range(&[10.0, 20.0]);
        assert!(lo < 0.0);
        assert!(hi > 20.0);
    }

    #[test]
    fn padded_range_handles_degenerate_span() {
        let (lo, hi) = padded_range(&[0.0, 0.0]);
        assert!(lo < 0.0 && hi > 0.0);

        let (lo, hi) = padded_range(&[]);
        assert_eq!((lo, hi), (-1.0, 1.0));
    }

    #[test]
    fn label_offset_scales_with_span() {
        assert!(label_offset(0.0, 100.0) > label_offset(0.0, 10.0));
        assert!((label_offset(0.0, 100.0) - 3.0).abs() < 1e-9);
    }
}
