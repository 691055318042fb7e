//! Line input for the memory session.
//!
//! Interactive terminals get `rustyline_async::Readline` (line editing,
//! Ctrl+C/Ctrl+D handling); piped stdin is read line by line so sessions
//! can be scripted.

use std::io::{IsTerminal, Write};

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// A submitted line, trimmed.
    Line(String),
    /// End of file (Ctrl+D or closed pipe).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Session input source.
pub enum SessionInput {
    Terminal {
        rl: Readline,
        writer: SharedWriter,
    },
    Piped(Lines<BufReader<Stdin>>),
}

impl SessionInput {
    /// Pick the input mode from whether stdin is a terminal.
    pub fn new(prompt: String) -> Result<Self, ReadlineError> {
        if std::io::stdin().is_terminal() {
            let (rl, writer) = Readline::new(prompt)?;
            Ok(Self::Terminal { rl, writer })
        } else {
            Ok(Self::Piped(BufReader::new(tokio::io::stdin()).lines()))
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Terminal { .. })
    }

    /// Print output without clobbering the prompt.
    pub fn print(&mut self, text: &str) {
        match self {
            Self::Terminal { writer, .. } => {
                let _ = writeln!(writer, "{text}");
            }
            Self::Piped(_) => println!("{text}"),
        }
    }

    /// Read a line of input.
    pub async fn read_line(&mut self) -> InputEvent {
        match self {
            Self::Terminal { rl, .. } => match rl.readline().await {
                Ok(ReadlineEvent::Line(line)) => InputEvent::Line(line.trim().to_string()),
                Ok(ReadlineEvent::Eof) => InputEvent::Eof,
                Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
                Err(_) => InputEvent::Eof,
            },
            Self::Piped(lines) => match lines.next_line().await {
                Ok(Some(line)) => InputEvent::Line(line.trim().to_string()),
                Ok(None) => InputEvent::Eof,
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {e}");
                    InputEvent::Eof
                }
            },
        }
    }
}
