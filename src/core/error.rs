// src/core/error.rs

use crate::core::modes::{CommandWord, Restriction};
use thiserror::Error;

/// Every way a command line can be refused. None of these are fatal: the interpreter's
/// mode and review session are left exactly as they were before the line was read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line or its arguments do not follow the command's grammar.
    #[error("Invalid command format! {0}")]
    MalformedInput(String),

    /// The first word is not a command in any mode.
    #[error("Unknown command '{0}'. Type `help` to see the commands available right now.")]
    UnknownCommand(String),

    /// The word is known but cannot run in the current mode.
    #[error("`{word}` cannot be used now: {reason}.")]
    IllegalInMode {
        /// The refused word.
        word: CommandWord,
        /// Why the current mode refuses it.
        reason: Restriction,
    },

    /// The index is not a positive whole number.
    #[error("'{0}' is not a valid index. Indexes are whole numbers starting at 1.")]
    InvalidIndex(String),

    /// The index is well formed but there is no entry at that position.
    #[error("Index {index} is out of range: the list has {len} entries.")]
    IndexOutOfRange {
        /// The 1-based index as typed.
        index: usize,
        /// The length of the list it was resolved against.
        len: usize,
    },

    /// The token is not one of `untagged`, `easy`, `hard`.
    #[error("'{0}' is not a valid tag. Valid tags are: untagged, easy, hard.")]
    InvalidTag(String),

    /// The cards-per-session bound is missing, not a number, or not positive.
    #[error("'{0}' is not a valid number of cards. It must be a whole number of at least 1.")]
    InvalidCount(String),

    /// A command that takes no arguments was given some.
    #[error("`{word}` does not take any arguments, but got '{argument}'.")]
    UnexpectedArgument {
        /// The word that takes no arguments.
        word: CommandWord,
        /// The trimmed trailing text.
        argument: String,
    },

    /// Another card in the deck already asks this question.
    #[error("A card with the question '{0}' already exists in this deck.")]
    DuplicateCard(String),

    /// Another deck already has this name.
    #[error("A deck named '{0}' already exists.")]
    DuplicateDeck(String),

    /// The review filter left no cards to review.
    #[error("No cards match the given tags.")]
    NoMatchingCards,
}

/// The result type used throughout the interpreter core.
pub type InterpretResult<T> = Result<T, CommandError>;

impl CommandError {
    /// A malformed-input error with the usage of `word` appended.
    pub fn usage(word: CommandWord, usage: &str, problem: &str) -> Self {
        Self::MalformedInput(format!("{problem}\nUsage: {} {usage}", word.name()))
    }
}
