//! # Mode State Machine
//!
//! The interpreter is always in exactly one [`Mode`]. Which command words may run depends
//! on that mode, and the answer is a fixed, total table: every [`CommandWord`] spells out
//! its [`Gate`] for all three modes in [`CommandWord::gates`]. Because the table is a
//! `match` over a closed enum, adding a word without filling in its row does not compile.
//!
//! A closed gate carries the [`Restriction`] that explains *why* the word is refused, so
//! the error shown to the user is specific to the mode it was typed in.

use std::collections::BTreeSet;
use std::fmt;

/// The three application modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    /// No deck is selected; deck-level commands are available.
    Unselected,
    /// A deck is selected; card-level commands are available.
    Selected,
    /// A review session is running over the selected deck.
    Reviewing,
}

impl Mode {
    /// Every mode, in transition order.
    pub const ALL: [Self; 3] = [Self::Unselected, Self::Selected, Self::Reviewing];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unselected => "no deck selected",
            Self::Selected => "deck selected",
            Self::Reviewing => "reviewing",
        })
    }
}

/// The reason a known command word is refused in the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Restriction {
    /// The word works on a deck, but none is selected.
    NoDeckSelected,
    /// The word only works while no deck is selected.
    DeckSelected,
    /// Only review commands run while a review is in progress.
    InReview,
    /// The word only works during a review.
    NotInReview,
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoDeckSelected => "no deck selected",
            Self::DeckSelected => "a deck is currently selected",
            Self::InReview => "a review is in progress",
            Self::NotInReview => "no review is in progress",
        })
    }
}

/// Whether a word may run in one particular mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// The word runs.
    Open,
    /// The word is refused for the given reason.
    Closed(Restriction),
}

const OPEN: Gate = Gate::Open;
const NO_DECK: Gate = Gate::Closed(Restriction::NoDeckSelected);
const DECK_SELECTED: Gate = Gate::Closed(Restriction::DeckSelected);
const IN_REVIEW: Gate = Gate::Closed(Restriction::InReview);
const NOT_IN_REVIEW: Gate = Gate::Closed(Restriction::NotInReview);

/// One row of the legality table: the gate of a single word in each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeGates {
    /// Gate in [`Mode::Unselected`].
    pub unselected: Gate,
    /// Gate in [`Mode::Selected`].
    pub selected: Gate,
    /// Gate in [`Mode::Reviewing`].
    pub reviewing: Gate,
}

impl ModeGates {
    const fn new(unselected: Gate, selected: Gate, reviewing: Gate) -> Self {
        Self {
            unselected,
            selected,
            reviewing,
        }
    }

    /// The gate for `mode`.
    pub const fn for_mode(&self, mode: Mode) -> Gate {
        match mode {
            Mode::Unselected => self.unselected,
            Mode::Selected => self.selected,
            Mode::Reviewing => self.reviewing,
        }
    }
}

/// Every command word the interpreter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandWord {
    /// `create`
    CreateDeck,
    /// `remove`
    RemoveDeck,
    /// `rename`
    RenameDeck,
    /// `select`
    SelectDeck,
    /// `unselect`
    UnselectDeck,
    /// `list`
    List,
    /// `add`
    AddCard,
    /// `edit`
    EditCard,
    /// `delete`
    DeleteCard,
    /// `review`
    Review,
    /// `setnum`
    SetCardsPerSession,
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
    /// `tag`
    TagCard,
    /// `endreview`
    EndReview,
    /// `help`
    Help,
    /// `exit`
    Exit,
    /// `clear`
    Clear,
}

impl CommandWord {
    /// Every word, in help order.
    pub const ALL: [Self; 21] = [
        Self::CreateDeck,
        Self::RemoveDeck,
        Self::RenameDeck,
        Self::SelectDeck,
        Self::UnselectDeck,
        Self::List,
        Self::AddCard,
        Self::EditCard,
        Self::DeleteCard,
        Self::Review,
        Self::SetCardsPerSession,
        Self::Flip,
        Self::Next,
        Self::Previous,
        Self::MarkCorrect,
        Self::MarkWrong,
        Self::TagCard,
        Self::EndReview,
        Self::Help,
        Self::Exit,
        Self::Clear,
    ];

    /// The word as typed on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateDeck => "create",
            Self::RemoveDeck => "remove",
            Self::RenameDeck => "rename",
            Self::SelectDeck => "select",
            Self::UnselectDeck => "unselect",
            Self::List => "list",
            Self::AddCard => "add",
            Self::EditCard => "edit",
            Self::DeleteCard => "delete",
            Self::Review => "review",
            Self::SetCardsPerSession => "setnum",
            Self::Flip => "flip",
            Self::Next => "next",
            Self::Previous => "prev",
            Self::MarkCorrect => "correct",
            Self::MarkWrong => "wrong",
            Self::TagCard => "tag",
            Self::EndReview => "endreview",
            Self::Help => "help",
            Self::Exit => "exit",
            Self::Clear => "clear",
        }
    }

    /// Looks up a word by name. Matching is exact: command words are lowercase.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|word| word.name() == name)
    }

    /// The legality table. Each arm lists (unselected, selected, reviewing).
    pub const fn gates(self) -> ModeGates {
        match self {
            Self::CreateDeck | Self::RemoveDeck | Self::RenameDeck => {
                ModeGates::new(OPEN, DECK_SELECTED, IN_REVIEW)
            }
            Self::SelectDeck => ModeGates::new(OPEN, OPEN, IN_REVIEW),
            Self::UnselectDeck => ModeGates::new(NO_DECK, OPEN, IN_REVIEW),
            Self::List => ModeGates::new(OPEN, OPEN, IN_REVIEW),
            Self::AddCard | Self::EditCard | Self::DeleteCard | Self::Review => {
                ModeGates::new(NO_DECK, OPEN, IN_REVIEW)
            }
            Self::SetCardsPerSession => ModeGates::new(OPEN, OPEN, IN_REVIEW),
            Self::Flip
            | Self::Next
            | Self::Previous
            | Self::MarkCorrect
            | Self::MarkWrong
            | Self::TagCard
            | Self::EndReview => ModeGates::new(NOT_IN_REVIEW, NOT_IN_REVIEW, OPEN),
            Self::Help | Self::Exit => ModeGates::new(OPEN, OPEN, IN_REVIEW),
            Self::Clear => ModeGates::new(OPEN, DECK_SELECTED, IN_REVIEW),
        }
    }
}

impl fmt::Display for CommandWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The gate of `word` in `mode`.
pub const fn gate(mode: Mode, word: CommandWord) -> Gate {
    word.gates().for_mode(mode)
}

/// Returns true if `word` may run in `mode`.
pub fn is_legal(mode: Mode, word: CommandWord) -> bool {
    gate(mode, word) == Gate::Open
}

/// Every word that may run in `mode`.
pub fn legal_words_for(mode: Mode) -> BTreeSet<CommandWord> {
    CommandWord::ALL
        .into_iter()
        .filter(|&word| is_legal(mode, word))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVIEW_ONLY: [CommandWord; 7] = [
        CommandWord::Flip,
        CommandWord::Next,
        CommandWord::Previous,
        CommandWord::MarkCorrect,
        CommandWord::MarkWrong,
        CommandWord::TagCard,
        CommandWord::EndReview,
    ];

    #[test]
    fn test_names_round_trip_and_are_unique() {
        let mut seen = BTreeSet::new();
        for word in CommandWord::ALL {
            assert_eq!(CommandWord::from_name(word.name()), Some(word));
            assert!(seen.insert(word.name()), "duplicate name {}", word.name());
        }
        assert_eq!(CommandWord::from_name("Flip"), None);
        assert_eq!(CommandWord::from_name("fly"), None);
    }

    #[test]
    fn test_reviewing_allows_exactly_the_review_commands() {
        let legal = legal_words_for(Mode::Reviewing);
        assert_eq!(legal, REVIEW_ONLY.into_iter().collect());

        for word in CommandWord::ALL {
            if !REVIEW_ONLY.contains(&word) {
                assert_eq!(
                    gate(Mode::Reviewing, word),
                    Gate::Closed(Restriction::InReview)
                );
            }
        }
    }

    #[test]
    fn test_review_commands_are_refused_outside_a_review() {
        for mode in [Mode::Unselected, Mode::Selected] {
            for word in REVIEW_ONLY {
                assert_eq!(gate(mode, word), Gate::Closed(Restriction::NotInReview));
            }
        }
    }

    #[test]
    fn test_unselected_mode_table() {
        let legal = legal_words_for(Mode::Unselected);
        let expected: BTreeSet<_> = [
            CommandWord::CreateDeck,
            CommandWord::RemoveDeck,
            CommandWord::RenameDeck,
            CommandWord::SelectDeck,
            CommandWord::List,
            CommandWord::SetCardsPerSession,
            CommandWord::Help,
            CommandWord::Exit,
            CommandWord::Clear,
        ]
        .into_iter()
        .collect();
        assert_eq!(legal, expected);

        for word in [
            CommandWord::UnselectDeck,
            CommandWord::AddCard,
            CommandWord::EditCard,
            CommandWord::DeleteCard,
            CommandWord::Review,
        ] {
            assert_eq!(
                gate(Mode::Unselected, word),
                Gate::Closed(Restriction::NoDeckSelected)
            );
        }
    }

    #[test]
    fn test_selected_mode_table() {
        let legal = legal_words_for(Mode::Selected);
        let expected: BTreeSet<_> = [
            CommandWord::SelectDeck,
            CommandWord::UnselectDeck,
            CommandWord::List,
            CommandWord::AddCard,
            CommandWord::EditCard,
            CommandWord::DeleteCard,
            CommandWord::Review,
            CommandWord::SetCardsPerSession,
            CommandWord::Help,
            CommandWord::Exit,
        ]
        .into_iter()
        .collect();
        assert_eq!(legal, expected);

        for word in [
            CommandWord::CreateDeck,
            CommandWord::RemoveDeck,
            CommandWord::RenameDeck,
            CommandWord::Clear,
        ] {
            assert_eq!(
                gate(Mode::Selected, word),
                Gate::Closed(Restriction::DeckSelected)
            );
        }
    }

    #[test]
    fn test_restriction_texts() {
        assert_eq!(Restriction::NoDeckSelected.to_string(), "no deck selected");
        assert_eq!(
            Restriction::DeckSelected.to_string(),
            "a deck is currently selected"
        );
        assert_eq!(Restriction::InReview.to_string(), "a review is in progress");
    }
}
