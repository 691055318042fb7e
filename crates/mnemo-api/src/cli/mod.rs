//! CLI command definitions for the `mnemo` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod commands;
pub mod extract;
pub mod input;
pub mod session;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

use mnemo_types::config::EmbeddingBackend;
use mnemo_types::memory::{Conversation, Turn};

/// Extract, store, and search per-user memories.
#[derive(Parser)]
#[command(name = "mnemo", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract facts from a conversation and print them.
    ///
    /// The input is plain text, or a JSON array of {"role", "content"} turns.
    Extract {
        /// Conversation file, or `-` for stdin.
        input: String,
    },

    /// Start an interactive memory session over an in-process store.
    Session {
        /// Embedding backend (overrides config.toml).
        #[arg(long)]
        embedder: Option<EmbeddingBackend>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Interpret user input as a conversation.
///
/// A JSON array of `{role, content}` objects becomes a turn list; anything
/// else is taken verbatim as text.
pub fn parse_conversation(raw: &str) -> Conversation {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        if let Ok(turns) = serde_json::from_str::<Vec<Turn>>(trimmed) {
            return Conversation::Turns(turns);
        }
    }
    Conversation::Text(raw.to_string())
}

/// Spinner shown while waiting on the model; hidden for JSON or quiet output.
pub fn spinner(message: &'static str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
