//! Synapse API entry point.
//!
//! Binary name: `synapse`
//!
//! Parses CLI arguments, initializes the database and per-owner session
//! controllers, then starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,synapse=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        // Shell completions don't need app state
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "synapse", &mut std::io::stdout());
        }

        Commands::Serve { port } => {
            let state = AppState::init().await?;
            let port = port.unwrap_or(state.config.bind_port);
            let router = http::router::build_router(state);

            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
            tracing::info!(port, "Synapse API listening");
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
