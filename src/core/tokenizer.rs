// src/core/tokenizer.rs

use crate::constants::HELP_HINT;
use crate::core::error::{CommandError, InterpretResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // The first whitespace-delimited token, then everything else verbatim.
    static ref BASIC_COMMAND_FORMAT: Regex =
        Regex::new(r"^(?P<word>\S+)(?P<arguments>.*)$").expect("command format regex is valid");
}

/// A raw input line split into its command word and argument string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokens<'a> {
    /// The first token of the line.
    pub word: &'a str,
    /// The rest of the line, leading whitespace included.
    pub arguments: &'a str,
}

/// Splits a raw line into `(word, arguments)`.
///
/// # Errors
/// Returns `MalformedInput` when the line is empty, whitespace only, or spans several
/// lines.
pub fn tokenize(line: &str) -> InterpretResult<Tokens<'_>> {
    let trimmed = line.trim();
    let caps = BASIC_COMMAND_FORMAT
        .captures(trimmed)
        .ok_or_else(|| CommandError::MalformedInput(HELP_HINT.to_string()))?;

    let word = caps.name("word").map_or("", |m| m.as_str());
    let arguments = caps.name("arguments").map_or("", |m| m.as_str());
    log::debug!("Tokenized line into word '{}' and arguments '{}'", word, arguments);

    Ok(Tokens { word, arguments })
}
