//! # flashdeck
//!
//! A mode-aware command interpreter for flashcard decks. Lines such as `select 1` or
//! `review hard 5` go in through [`Interpreter::execute`]; feedback text and presentation
//! signals come out.
//!
//! - [`crate::core`]: tokenizer, mode table, dispatcher, parsers, review engine and executor.
//! - [`crate::system`]: settings on disk.
//! - [`crate::cli`]: the interactive terminal front end.

pub mod cli;
/// Fixed names and messages.
pub mod constants;
pub mod core;
/// Cards, tags and indexes.
pub mod models;
/// The interpreter context and what it is focused on.
pub mod state;
pub mod system;

#[doc(inline)]
pub use crate::core::interpreter::Interpreter;
