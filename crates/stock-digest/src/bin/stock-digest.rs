//! Daily stock digest job
//!
//! Meant to be triggered by an external scheduler (cron, CI). Reads its
//! configuration from the environment, runs the pipeline once and exits.
//!
//! # Usage
//!
//! ```bash
//! export OPENAI_API_KEY=... NEWS_API_KEY=...
//! export EMAIL_ADDRESS=me@gmail.com EMAIL_PASSWORD=app-token
//! export EMAIL_RECIPIENTS=me@gmail.com,partner@example.com
//!
//! cargo run --bin stock-digest -p stock-digest
//! cargo run --bin stock-digest -p stock-digest -- --dry-run --tickers AAPL,NVDA
//! ```

use anyhow::Context;
use clap::Parser;
use stock_digest::config::DigestConfigBuilder;
use stock_digest::{DigestConfig, DigestPipeline};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "stock-digest")]
#[command(about = "Build the daily stock digest and email it", long_about = None)]
struct Args {
    /// Print the report instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Comma-separated portfolio tickers (overrides DIGEST_TICKERS)
    #[arg(long, value_delimiter = ',')]
    tickers: Option<Vec<String>>,

    /// Comma-separated sector queries (overrides DIGEST_SECTORS)
    #[arg(long, value_delimiter = ',')]
    sectors: Option<Vec<String>>,

    /// Email subject
    #[arg(long)]
    subject: Option<String>,
}

/// Layer the command-line overrides on top of the environment
fn apply_overrides(mut builder: DigestConfigBuilder, args: Args) -> DigestConfigBuilder {
    if let Some(tickers) = args.tickers {
        builder = builder.tickers(tickers);
    }
    if let Some(sectors) = args.sectors {
        builder = builder.sectors(sectors);
    }
    if let Some(subject) = args.subject {
        builder = builder.subject(subject);
    }
    builder
}

fn build_pipeline(args: Args) -> anyhow::Result<DigestPipeline> {
    let dry_run = args.dry_run;
    let builder = DigestConfig::env_builder().context("failed to load configuration")?;
    let config = apply_overrides(builder, args)
        .build()
        .context("invalid configuration")?;

    DigestPipeline::live(config, dry_run).context("failed to initialise clients")
}

#[tokio::main]
async fn main() {
    digest_utils::init_tracing();

    let args = Args::parse();
    info!("Starting stock-digest");

    // Failures are logged only; the exit status does not reflect them.
    let pipeline = match build_pipeline(args) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("❌ Error generating or sending report: {e:#}");
            return;
        }
    };

    if pipeline.run_logged().await.is_none() {
        error!("Digest run failed; no report was sent");
    }
}
