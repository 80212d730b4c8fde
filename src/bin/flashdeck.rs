// src/bin/flashdeck.rs

use clap::Parser;
use colored::*;
use flashdeck::cli::{Cli, repl};

/// Sets up logging, parses the process flags and runs the interactive session, with
/// centralized error reporting.
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("CLI args parsed: {:?}", cli);

    if let Err(e) = repl::run(cli) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
