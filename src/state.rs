// src/state.rs

use crate::core::library::{Deck, Library};
use crate::core::modes::Mode;
use crate::core::review::ReviewSession;
use crate::system::settings::Settings;

/// What the interpreter is currently pointed at. The mode is derived from this value, so
/// a review session exists exactly when the mode is `Reviewing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Focus {
    /// No deck is selected.
    #[default]
    Unselected,
    /// A deck is selected.
    Selected {
        /// 0-based position of the deck in the library.
        deck: usize,
    },
    /// The selected deck is being reviewed.
    Reviewing {
        /// 0-based position of the deck under review.
        deck: usize,
        /// The running session.
        session: ReviewSession,
    },
}

impl Focus {
    /// The mode this focus puts the interpreter in.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Unselected => Mode::Unselected,
            Self::Selected { .. } => Mode::Selected,
            Self::Reviewing { .. } => Mode::Reviewing,
        }
    }

    /// The position of the selected deck, if any.
    pub fn deck(&self) -> Option<usize> {
        match self {
            Self::Unselected => None,
            Self::Selected { deck } | Self::Reviewing { deck, .. } => Some(*deck),
        }
    }
}

/// The whole interpreter context, owned by the command loop.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) library: Library,
    pub(crate) focus: Focus,
    pub(crate) settings: Settings,
}

impl AppState {
    /// Starts with nothing selected.
    pub fn new(library: Library, settings: Settings) -> Self {
        Self {
            library,
            focus: Focus::Unselected,
            settings,
        }
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.focus.mode()
    }

    /// All decks.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// The current focus.
    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    /// Effective settings, including `setnum` changes.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The selected (or reviewed) deck.
    pub fn selected_deck(&self) -> Option<&Deck> {
        self.focus
            .deck()
            .and_then(|position| self.library.deck_at_position(position))
    }

    /// The running review, if any.
    pub fn review(&self) -> Option<&ReviewSession> {
        match &self.focus {
            Focus::Reviewing { session, .. } => Some(session),
            _ => None,
        }
    }
}
