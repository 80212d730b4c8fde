// src/core/command.rs

use crate::core::modes::CommandWord;
use crate::core::review::Boundary;
use crate::models::{Card, CardEdit, ItemIndex, Tag, TagFilter};
use std::num::NonZeroUsize;

/// A parsed, validated command, ready to be executed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `create <name>`
    CreateDeck {
        /// Trimmed deck name.
        name: String,
    },
    /// `remove <index>`
    RemoveDeck {
        /// Deck to remove.
        index: ItemIndex,
    },
    /// `rename <index> <name>`
    RenameDeck {
        /// Deck to rename.
        index: ItemIndex,
        /// Its new name.
        name: String,
    },
    /// `select <index>`
    SelectDeck {
        /// Deck to focus.
        index: ItemIndex,
    },
    /// `unselect`
    UnselectDeck,
    /// `list`: decks with no deck selected, cards otherwise.
    List,
    /// `add q/.. a/.. [t/..]`
    AddCard {
        /// The card to append.
        card: Card,
    },
    /// `edit <index> [q/..] [a/..] [t/..]`
    EditCard {
        /// Card to change.
        index: ItemIndex,
        /// The fields to replace.
        edit: CardEdit,
    },
    /// `delete <index>`
    DeleteCard {
        /// Card to delete.
        index: ItemIndex,
    },
    /// `review [tags...] [count]`
    Review {
        /// Tags a card must carry to be queued.
        filter: TagFilter,
        /// Explicit queue size. `None` falls back to the settings.
        limit: Option<NonZeroUsize>,
    },
    /// `setnum <count>`
    SetCardsPerSession {
        /// New default queue size.
        count: NonZeroUsize,
    },
    /// `flip`
    Flip,
    /// `next`
    Next,
    /// `prev`
    Previous,
    /// `correct`
    MarkCorrect,
    /// `wrong`
    MarkWrong,
    /// `tag <tag>` on the current review card.
    TagCard {
        /// Replacement tag.
        tag: Tag,
    },
    /// `endreview`
    EndReview,
    /// `help`
    Help,
    /// `exit`
    Exit,
    /// `clear`: asks the caller to wipe the library.
    Clear,
}

/// The mode change a command causes once it executes successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The mode stays as it is.
    None,
    /// Unselected to Selected.
    EnterSelected,
    /// Selected to Unselected.
    ExitSelected,
    /// Selected to Reviewing.
    EnterReviewing,
    /// Reviewing back to Selected.
    ExitReviewing,
}

/// The output of the dispatcher: a command tagged with its identity and mode effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    /// The command word that was typed.
    pub word: CommandWord,
    /// The parsed arguments.
    pub command: Command,
    /// Applied only if execution succeeds.
    pub transition: Transition,
}

/// Flags for the presentation layer. At most one mode-change flag is set per command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    /// The feedback is the help listing.
    pub show_help: bool,
    /// The session should end.
    pub exit: bool,
    /// The caller should confirm and then wipe the library.
    pub clear_requested: bool,
    /// A review started.
    pub start_review: bool,
    /// A review ended.
    pub end_review: bool,
    /// A deck became the focus.
    pub select_deck: bool,
    /// The focused deck was released.
    pub unselect_deck: bool,
}

impl Signals {
    /// The primary flag raised by a mode transition.
    pub fn for_transition(transition: Transition) -> Self {
        match transition {
            Transition::None => Self::default(),
            Transition::EnterSelected => Self {
                select_deck: true,
                ..Self::default()
            },
            Transition::ExitSelected => Self {
                unselect_deck: true,
                ..Self::default()
            },
            Transition::EnterReviewing => Self {
                start_review: true,
                ..Self::default()
            },
            Transition::ExitReviewing => Self {
                end_review: true,
                ..Self::default()
            },
        }
    }

    /// Returns true if no flag is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A named, non-fatal condition reported alongside successful feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Navigation hit the end (or start) of the review queue; nothing moved.
    NoMoreCards(Boundary),
}

/// What a successfully executed command hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Plain text for the user.
    pub feedback: String,
    /// Presentation flags.
    pub signals: Signals,
    /// Set when the command succeeded but could not do all it was asked.
    pub condition: Option<Condition>,
}

impl CommandResult {
    /// Feedback only, no flags.
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            signals: Signals::default(),
            condition: None,
        }
    }

    /// Replaces the flags.
    pub fn with_signals(mut self, signals: Signals) -> Self {
        self.signals = signals;
        self
    }

    /// Attaches a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}
