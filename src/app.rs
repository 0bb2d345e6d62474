//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - queries the DuckDB mart
//! - computes the derived comparison facts
//! - renders the three PNG charts
//! - writes the text report + CSV export and prints the report

use clap::Parser;

use crate::cli::Cli;
use crate::domain::{CategoryPair, ChartPalette, RunConfig};
use crate::error::AppError;

pub mod pipeline;

use pipeline::RunStatus;

/// Entry point for the `ingviz` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = RunConfig {
        db_path: cli.db_path,
        out_dir: cli.out_dir,
        pair: CategoryPair::default(),
        palette: ChartPalette::default(),
    };

    println!("Gerando visualizações da análise...");
    println!("Carregando dados da tabela mart...");

    let run = match pipeline::run(&config)? {
        RunStatus::EmptyMart => {
            println!("Erro: Nenhum dado encontrado na tabela mart!");
            println!("   Execute 'dbt run' primeiro para criar os modelos.");
            return Ok(());
        }
        RunStatus::Complete(run) => run,
    };

    println!("{} registros carregados", run.rows.len());

    std::fs::create_dir_all(&config.out_dir).map_err(|e| {
        AppError::config(format!(
            "Failed to create output directory '{}': {e}",
            config.out_dir.display()
        ))
    })?;

    println!("Criando gráficos...");
    let variation_png = config.out_dir.join("01_variacao_percentual.png");
    crate::plot::render_variation_chart(&variation_png, &run.rows, &config.palette)?;
    println!("  Gráfico salvo: {}", variation_png.display());

    let means_png = config.out_dir.join("02_comparacao_medias.png");
    crate::plot::render_means_chart(&means_png, &run.rows, &config.palette)?;
    println!("  Gráfico salvo: {}", means_png.display());

    let trend_png = config.out_dir.join("03_tendencia.png");
    crate::plot::render_trend_chart(&trend_png, &run.rows, &config.palette)?;
    println!("  Gráfico salvo: {}", trend_png.display());

    println!("Gerando relatório textual...");
    let report_txt = config.out_dir.join("relatorio_analise.txt");
    crate::io::write_report_txt(&report_txt, &run.report)?;
    println!("  Relatório salvo: {}", report_txt.display());

    println!();
    println!("{}", run.report);

    let csv_path = config.out_dir.join("dados_analise.csv");
    crate::io::write_rows_csv(&csv_path, &run.rows)?;
    println!();
    println!("Dados exportados: {}", csv_path.display());

    println!(
        "Visualizações geradas com sucesso em: {}",
        config.out_dir.display()
    );
    Ok(())
}
