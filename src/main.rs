use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use feedpage::config::{self, Config};
use feedpage::feed::Pipeline;
use feedpage::output;

#[derive(Parser, Debug)]
#[command(
    name = "feedpage",
    about = "Generate a static news page from RSS/Atom feeds"
)]
struct Args {
    /// File listing feed URLs, one per line
    #[arg(long, default_value = "feeds.txt")]
    sources: PathBuf,

    /// Optional TOML config file
    #[arg(long, default_value = "feedpage.toml")]
    config: PathBuf,

    /// Output directory for news.json, index.html, and assets
    #[arg(long, short = 'o', default_value = "dist")]
    out: PathBuf,

    /// Static assets directory copied into the output
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(&args.config).context("Failed to load configuration")?;
    let sources = config::load_sources(&args.sources)
        .context("Source list is required: one feed URL per line")?;
    tracing::info!(count = sources.len(), "Loaded feed sources");

    // Fail before fetching if the output directory cannot take writes.
    output::ensure_writable_dir(&args.out).with_context(|| {
        format!(
            "Output directory {} is not writable (fix perms or choose a different path)",
            args.out.display()
        )
    })?;

    let pipeline =
        Pipeline::new(config.pipeline_options()).context("Failed to build HTTP client")?;
    let entries = pipeline.run(&sources).await;
    tracing::info!(count = entries.len(), "Collected normalized entries");

    output::write_site(&entries, &args.out, &args.assets)
        .context("Failed to write site output")?;

    Ok(())
}
