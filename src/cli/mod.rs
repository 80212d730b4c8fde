// src/cli/mod.rs

//! The interactive terminal front end.

use clap::Parser;
use std::num::NonZeroUsize;

/// Colored output for feedback and errors.
pub mod render;
/// The read/execute/print loop.
pub mod repl;

/// flashdeck: study flashcard decks from the terminal.
///
/// Starts an interactive session. Type `help` at the prompt to see the commands that can
/// be used in the current mode.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
pub struct Cli {
    /// Read settings from this file instead of the default location. `~` and
    /// environment variables are expanded.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Default number of cards per review, overriding the settings file.
    #[arg(long, value_name = "COUNT")]
    pub cards_per_session: Option<NonZeroUsize>,
}
