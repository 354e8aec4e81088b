//! Generates the CLBlast tuning charts and prints the summary

use anyhow::{Context, Result};
use gemm_report_cli::logging;
use gemm_report_cli::output::{self, TableBuilder};
use gemm_report_cli::{ReportConfig, ReportGenerator};
use gemm_report_core::BenchmarkDataset;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(logging::env_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = ReportConfig::embedded().context("Failed to load built-in report configuration")?;
    let speedup_platform = config.summary.speedup_platform()?;
    let dataset = BenchmarkDataset::clblast();

    info!(dir = %config.output.directory.display(), "generating charts");
    let artifacts = ReportGenerator::new(&dataset, &config)
        .generate()
        .context("Failed to generate report")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::write_summary(
        &mut out,
        &artifacts.summary,
        speedup_platform,
        TableBuilder::stdout_supports_color(),
    )
    .context("Failed to write summary to stdout")?;

    info!(files = artifacts.written.len(), "done");
    Ok(())
}
