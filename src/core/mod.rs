// src/core/mod.rs

//! The interpreter itself: everything between an input line and its feedback.

/// Argument grammars for each command word.
pub mod arg_parser;
/// Parsed commands and their results.
pub mod command;
/// Applies a command to the interpreter state.
pub mod command_executor;
/// The command registry and mode-gated dispatch.
pub mod dispatcher;
/// Errors reported for refused commands.
pub mod error;
/// The line-at-a-time entry point.
pub mod interpreter;
/// Decks and the library that holds them.
pub mod library;
pub mod modes;
/// Config directory lookup and user path expansion.
pub mod paths;
pub mod review;
/// Splits a line into a command word and its arguments.
pub mod tokenizer;
