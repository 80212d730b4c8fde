// src/cli/render.rs

use crate::core::command::{CommandResult, Condition};
use crate::core::error::CommandError;
use crate::core::interpreter::Interpreter;
use crate::state::Focus;
use colored::*;

/// The greeting printed once at startup.
pub fn welcome() -> String {
    format!(
        "{} Type {} to see what you can do.",
        "Welcome to flashdeck!".yellow().bold(),
        "help".cyan()
    )
}

/// The prompt, prefixed with the selected deck and review progress.
pub fn prompt(interpreter: &Interpreter, base: &str) -> String {
    let state = interpreter.state();
    let deck_name = state.selected_deck().map(|deck| deck.name().to_string());
    match (state.focus(), deck_name) {
        (Focus::Reviewing { session, .. }, Some(name)) => format!(
            "[{} {}/{}] {}",
            name.green(),
            session.position() + 1,
            session.len(),
            base
        ),
        (Focus::Selected { .. }, Some(name)) => format!("[{}] {}", name.green(), base),
        _ => base.to_string(),
    }
}

/// Successful feedback. Help is highlighted and boundary conditions are shown in yellow.
pub fn result(result: &CommandResult) -> String {
    if result.signals.show_help {
        let mut lines = result.feedback.lines();
        let header = lines.next().unwrap_or_default().yellow().bold().to_string();
        let body: Vec<String> = lines.map(|line| line.cyan().to_string()).collect();
        return std::iter::once(header)
            .chain(body)
            .collect::<Vec<_>>()
            .join("\n");
    }

    match result.condition {
        Some(Condition::NoMoreCards(_)) => result.feedback.yellow().to_string(),
        None => result.feedback.clone(),
    }
}

/// A refused command.
pub fn error(error: &CommandError) -> String {
    format!("{}: {}", "Error".red().bold(), error)
}

/// Messages from the loop itself rather than from a command.
pub fn notice(message: &str) -> String {
    message.dimmed().to_string()
}
