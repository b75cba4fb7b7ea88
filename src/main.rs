use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kiosk_gateway::api::{self, ApiState};
use kiosk_gateway::Config;

/// Kiosk - voice-driven café ordering gateway
#[derive(Parser)]
#[command(name = "kiosk", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "KIOSK_PORT")]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,kiosk_gateway=info",
        1 => "info,kiosk_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    tracing::info!(
        port = config.port,
        ttl_secs = config.session_ttl.as_secs(),
        max_turns = config.max_turns,
        speech = config.openai_api_key.is_some(),
        "starting kiosk gateway"
    );

    let state = Arc::new(ApiState::from_config(&config)?);
    api::serve(state, config.port).await?;
    Ok(())
}
