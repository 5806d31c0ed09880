//! Rewrites a similarity model artifact gzip-compressed after validating it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use marquee_api::store::{ModelArtifact, SimilarityStore};

#[derive(Parser, Debug)]
#[command(name = "compress-model", about = "Validate and gzip a recommender model artifact")]
struct Args {
    /// Model artifact to read (plain or already compressed JSON)
    input: PathBuf,

    /// Destination file; defaults to the input path with a `.gz` suffix
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Sizes and catalog count of a finished compression
#[derive(Debug)]
struct CompressSummary {
    titles: usize,
    input_bytes: u64,
    output_bytes: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let output = args.output.unwrap_or_else(|| gz_path(&args.input));

    let summary = compress(&args.input, &output)?;
    tracing::info!(
        titles = summary.titles,
        input = %args.input.display(),
        output = %output.display(),
        input_bytes = summary.input_bytes,
        output_bytes = summary.output_bytes,
        "Model compressed"
    );

    Ok(())
}

/// Validates `input` and writes it gzip-compressed to `output`.
///
/// Nothing is written unless the artifact would load in the server.
fn compress(input: &Path, output: &Path) -> anyhow::Result<CompressSummary> {
    let artifact = ModelArtifact::read_from(input)
        .with_context(|| format!("reading {}", input.display()))?;

    SimilarityStore::from_artifact(artifact.clone())
        .with_context(|| format!("validating {}", input.display()))?;

    artifact
        .write_to(output, true)
        .with_context(|| format!("writing {}", output.display()))?;

    Ok(CompressSummary {
        titles: artifact.len(),
        input_bytes: std::fs::metadata(input)?.len(),
        output_bytes: std::fs::metadata(output)?.len(),
    })
}

fn gz_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}
