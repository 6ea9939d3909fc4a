use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newscast::config::{self, Config};
use newscast::pipeline::{Pipeline, RunOutcome};

/// Takes no arguments; everything is configured through the environment.
#[derive(Parser)]
#[command(name = "newscast", version)]
#[command(about = "Generate and publish today's news podcast episode")]
struct Cli {}

/// Initialize tracing on stderr so stdout carries only progress lines
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "newscast=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();
    config::load_dotenv()?;
    init_tracing();

    // Credentials are checked before any network call
    let config = Config::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let pipeline = Pipeline::from_config(&config)?;
    if let RunOutcome::Published(manifest) = pipeline.run().await? {
        tracing::info!(date = %manifest.date, url = %manifest.audio_url, "Run complete");
    }

    Ok(())
}
