//! Evaluation CLI for SDVN attack/mitigation simulations.
//!
//! Aggregates per-packet result CSVs from an experiment matrix into summary
//! metrics, degradation/effectiveness tables, and publication outputs.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Context, Result};

use sdvn_eval::analysis::report;
use sdvn_eval::config::{self, EvalConfig};
use sdvn_eval::orchestrator;

#[derive(Parser)]
#[command(name = "sdvn-eval")]
#[command(about = "Evaluation and aggregation for SDVN attack/mitigation simulation results")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the results directory produced by the simulation harness
    results_root: PathBuf,

    /// Optional YAML configuration (matrix, thresholds, naming)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for reports
    #[arg(short, long, default_value = "analysis_output")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full evaluation and write every report format
    Full {
        /// Skip the LaTeX table output
        #[arg(long)]
        no_latex: bool,

        /// Skip the CSV table outputs
        #[arg(long)]
        no_csv: bool,
    },

    /// Load the matrix and print a summary to stdout only
    Summary,

    /// Write only the comparison table
    Compare,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    // Set thread pool size
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    if !cli.results_root.exists() {
        bail!("Results directory not found: {}", cli.results_root.display());
    }

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => EvalConfig::default(),
    };

    log::info!("Evaluating results under {}", cli.results_root.display());
    let (_matrix, eval_report) = orchestrator::run_evaluation(&cli.results_root, &config)?;

    match cli.command {
        Commands::Full { no_latex, no_csv } => {
            fs::create_dir_all(&cli.output).with_context(|| {
                format!("Failed to create output directory: {}", cli.output.display())
            })?;

            report::generate_json_report(&eval_report, &cli.output.join("full_report.json"))?;
            report::generate_text_report(&eval_report, &cli.output.join("report.txt"))?;

            if !no_csv {
                report::write_summary_csv(
                    &eval_report,
                    &cli.output.join("summary_statistics.csv"),
                )?;
                report::write_comparison_csv(
                    &eval_report,
                    &cli.output.join("attack_impact_comparison.csv"),
                )?;
            }

            if !no_latex {
                report::write_latex_tables(&eval_report, &cli.output.join("latex_tables.tex"))?;
            }

            report::print_summary(&eval_report);
            log::info!("Evaluation complete. Reports written to {}", cli.output.display());
        }
        Commands::Summary => {
            report::print_summary(&eval_report);
        }
        Commands::Compare => {
            fs::create_dir_all(&cli.output).with_context(|| {
                format!("Failed to create output directory: {}", cli.output.display())
            })?;

            report::write_comparison_csv(
                &eval_report,
                &cli.output.join("attack_impact_comparison.csv"),
            )?;
            report::print_summary(&eval_report);
        }
    }

    Ok(())
}
