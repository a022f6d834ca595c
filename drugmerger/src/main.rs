//! # Drugmerger
//!
//! Folds an openFDA drugs@FDA bulk file into generic-name keyed drug
//! aggregates and writes them as a JSON array.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin drugmerger -- data/drug-drugsfda-0001-of-0001.json
//! ```
//!
//! Identity conflicts are logged at `warn` and the offending application is
//! left out; set `RUST_LOG=drugmerger=debug` for more detail.

use anyhow::Context;
use clap::Parser;
use drugmerger::{build_drug_collection, DEFAULT_FILE_NAME};
use drugsource::{load_applications, write_collection, OutputConfig, DEFAULT_OUTPUT_DIR};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "drugmerger")]
#[command(about = "Merge openFDA drug approvals into generic-name keyed drug records")]
struct Cli {
    /// openFDA drugs@FDA JSON document with a top-level `results` array
    input: PathBuf,
    /// Directory the artifact is written to (created if missing)
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    out_dir: PathBuf,
    /// Artifact file name inside the output directory
    #[arg(long, default_value = DEFAULT_FILE_NAME)]
    file_name: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("drugmerger=info".parse()?)
                .add_directive("drugsource=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let output = OutputConfig::new(cli.out_dir, cli.file_name)?;

    let applications = load_applications(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;

    let build = build_drug_collection(&applications);
    let stats = &build.stats;
    tracing::info!(
        applications = stats.applications,
        without_cross_reference = stats.without_cross_reference,
        appended = stats.appended,
        merged = stats.merged,
        conflicts = stats.conflicts,
        drugs = build.drugs.len(),
        "drug build complete"
    );

    let path = write_collection(&output, &build.drugs)
        .with_context(|| format!("writing {}", output.artifact_path().display()))?;
    tracing::info!(path = %path.display(), "output saved");

    Ok(())
}
