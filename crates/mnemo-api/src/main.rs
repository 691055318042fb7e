//! mnemo CLI entry point.
//!
//! Binary name: `mnemo`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,mnemo=debug",
        _ => "trace",
    };
    // Flushes buffered spans when main returns, on every path.
    let _tracing = mnemo_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(shell, &mut cmd, "mnemo", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Extract { input } => {
            cli::extract::extract(&state, &input, cli.json, cli.quiet).await
        }
        Commands::Session { embedder } => {
            cli::session::run(&state, embedder, cli.json, cli.quiet).await
        }
        Commands::Completions { .. } => Ok(()),
    }
}
