// src/core/interpreter.rs

use crate::core::command::CommandResult;
use crate::core::command_executor;
use crate::core::dispatcher;
use crate::core::error::InterpretResult;
use crate::core::library::Library;
use crate::core::modes::Mode;
use crate::core::tokenizer;
use crate::state::{AppState, Focus};
use crate::system::settings::Settings;

/// The public entry point: feeds one line at a time through the tokenizer, the
/// dispatcher and the executor, against a context it owns.
///
/// Independent interpreters share nothing, so several can live in one process.
#[derive(Debug, Clone)]
pub struct Interpreter {
    state: AppState,
}

impl Interpreter {
    /// An interpreter with an empty library.
    pub fn new(settings: Settings) -> Self {
        Self::with_library(Library::new(), settings)
    }

    /// An interpreter over an existing library, starting with no deck selected.
    pub fn with_library(library: Library, settings: Settings) -> Self {
        Self {
            state: AppState::new(library, settings),
        }
    }

    /// The mode the next line will be checked against.
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Read-only view of the library, focus and settings.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Interprets one input line.
    ///
    /// # Errors
    /// Any [`CommandError`](crate::core::error::CommandError). After an error the mode and
    /// the running review, if any, are unchanged.
    pub fn execute(&mut self, line: &str) -> InterpretResult<CommandResult> {
        let tokens = tokenizer::tokenize(line)?;
        let request = dispatcher::dispatch(self.mode(), tokens.word, tokens.arguments)?;
        command_executor::execute(&mut self.state, request)
    }

    /// Deletes every deck and returns to the deck list. Called once the user confirms a
    /// `clear` request.
    pub fn factory_reset(&mut self) {
        log::info!(
            "Factory reset: removing {} deck(s)",
            self.state.library.len()
        );
        self.state.library.clear();
        self.state.focus = Focus::Unselected;
    }
}
