mod cli;
mod report;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use credit_score::{load_records, score_records};
use credit_types::ScoredWallet;

use crate::cli::ScoreCli;

fn main() -> Result<()> {
    dotenv().ok();

    let ScoreCli {
        input,
        output,
        top,
        log_level,
    } = ScoreCli::parse();

    init_tracing(&log_level);

    let records = load_records(&input)?;
    let run = score_records(&records);

    tracing::info!(
        "🏁 Scored {} wallets from {} records ({} skipped)",
        run.wallets.len(),
        run.accepted_records,
        run.skipped_records.len()
    );

    if let Some(path) = output {
        export_scores(&path, &run.wallets)?;
    }

    let stdout = io::stdout();
    report::write_report(&mut stdout.lock(), &run.wallets, top)
        .context("Failed to print the score report")?;

    Ok(())
}

/// Logs go to stderr, stdout is reserved for the report.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn export_scores(path: &Path, wallets: &[ScoredWallet]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create score export {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), wallets)
        .with_context(|| format!("Could not write score export {}", path.display()))?;

    tracing::info!("💾 Wrote {} scored wallets to {}", wallets.len(), path.display());
    Ok(())
}
