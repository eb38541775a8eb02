use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use zora::Config;

/// HTTP front end the robot talks to.
#[derive(Parser, Debug)]
#[command(name = "zora-server", version, about)]
struct Args {
    /// JSON configuration file
    #[arg(short, long, default_value = "zora.json")]
    config: PathBuf,

    /// Listen address, overrides the configured one
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }

    // 1. Setup Logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    tracing::info!("Zora reasoner server booting...");

    // 2. Session (the annotator client blocks, keep it off the async workers)
    let session_config = config.clone();
    let session = tokio::task::spawn_blocking(move || session_config.open_session())
        .await?
        .context("opening session")?;

    // 3. Serve
    zora::server::serve(session, &config.listen_addr).await
}
