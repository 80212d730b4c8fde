// src/cli/repl.rs

use crate::cli::{Cli, render};
use crate::core::interpreter::Interpreter;
use crate::core::paths;
use crate::system::settings::{self, Settings, SettingsError};
use anyhow::{Context, Result};
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::io::{self, BufRead, Write};

/// Loads settings, applies the command-line overrides and runs the interactive loop on
/// stdin/stdout until `exit` or end of input.
pub fn run(cli: Cli) -> Result<()> {
    let settings = resolve_settings(&cli)?;
    if !settings.display.color {
        colored::control::set_override(false);
    }

    let ask_before_clear = settings.display.confirm_clear;
    let mut interpreter = Interpreter::new(settings);
    let stdin = io::stdin();
    let stdout = io::stdout();

    run_session(&mut interpreter, stdin.lock(), stdout.lock(), || {
        if !ask_before_clear {
            return Ok(true);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Delete every deck? This cannot be undone.")
            .default(false)
            .interact()
            .context("Failed to read confirmation")
    })
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(raw) => {
            let path = paths::expand_user_path(raw)?;
            settings::load_settings_from(&path)
                .with_context(|| format!("Failed to load settings from '{}'", path.display()))?
        }
        None => match settings::load_settings() {
            Ok(settings) => settings,
            Err(e @ SettingsError::Parse { .. }) => {
                log::warn!("{}. Falling back to the default settings.", e);
                Settings::default()
            }
            Err(e) => return Err(e).context("Failed to load settings"),
        },
    };

    if cli.no_color {
        settings.display.color = false;
    }
    if let Some(count) = cli.cards_per_session {
        settings.review.cards_per_session = Some(count);
    }
    log::debug!("Effective settings: {:?}", settings);
    Ok(settings)
}

/// Reads lines from `input` and writes feedback to `output` until `exit` or end of input.
///
/// `confirm_clear` is asked before a `clear` request wipes the library.
pub fn run_session<R, W, C>(
    interpreter: &mut Interpreter,
    mut input: R,
    mut output: W,
    mut confirm_clear: C,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    C: FnMut() -> Result<bool>,
{
    writeln!(output, "{}", render::welcome())?;
    let mut line = String::new();

    loop {
        let base_prompt = interpreter.state().settings().display.prompt.clone();
        write!(output, "{}", render::prompt(interpreter, &base_prompt))?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line).context("Failed to read input")? == 0 {
            writeln!(output)?;
            break;
        }

        match interpreter.execute(&line) {
            Ok(result) => {
                writeln!(output, "{}", render::result(&result))?;
                if result.signals.clear_requested {
                    if confirm_clear()? {
                        interpreter.factory_reset();
                        writeln!(output, "{}", render::notice("All decks deleted."))?;
                    } else {
                        writeln!(output, "{}", render::notice("Nothing was deleted."))?;
                    }
                }
                if result.signals.exit {
                    break;
                }
            }
            Err(e) => writeln!(output, "{}", render::error(&e))?,
        }
    }

    Ok(())
}
