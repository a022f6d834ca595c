//! # Compoundscriber
//!
//! Builds the deduplicated compound list from an openFDA drugs@FDA bulk file
//! and writes it as a JSON array.
//!
//! ## Command-line Usage
//!
//! ```bash
//! cargo run --release --bin compoundscriber -- data/drug-drugsfda-0001-of-0001.json
//! RUST_LOG=compoundscriber=debug cargo run --bin compoundscriber -- data.json --out-dir dist
//! ```

use anyhow::Context;
use clap::Parser;
use compoundscriber::{build_compound_collection, DEFAULT_FILE_NAME};
use drugsource::{load_applications, write_collection, OutputConfig, DEFAULT_OUTPUT_DIR};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "compoundscriber")]
#[command(about = "Build deduplicated, described compound records from openFDA drug approvals")]
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
                .add_directive("compoundscriber=info".parse()?)
                .add_directive("drugsource=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let output = OutputConfig::new(cli.out_dir, cli.file_name)?;

    // Stage 1: Data Loading
    let applications = load_applications(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;

    // Stage 2: Compound Building
    let build = build_compound_collection(&applications);
    let stats = &build.stats;
    tracing::info!(
        applications = stats.applications,
        without_cross_reference = stats.without_cross_reference,
        products = stats.products,
        unavailable = stats.unavailable,
        duplicates = stats.duplicates,
        compounds = stats.emitted,
        "compound build complete"
    );

    // Stage 3: Output Generation
    let path = write_collection(&output, &build.compounds)
        .with_context(|| format!("writing {}", output.artifact_path().display()))?;
    tracing::info!(path = %path.display(), "output saved");

    Ok(())
}
