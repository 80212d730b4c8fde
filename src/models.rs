// src/models.rs

use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroUsize;

// --- CARD CLASSIFICATION ---

/// The difficulty classification of a card. A card carries exactly one tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// The card has not been classified yet.
    #[default]
    Untagged,
    /// The card is known well.
    Easy,
    /// The card needs more practice.
    Hard,
}

impl Tag {
    /// Every tag, in display order.
    pub const ALL: [Self; 3] = [Self::Untagged, Self::Easy, Self::Hard];

    /// The lowercase name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Untagged => "untagged",
            Self::Easy => "easy",
            Self::Hard => "hard",
        }
    }

    /// Parses a tag name case-insensitively. Returns `None` for anything else.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(token.trim()))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of tags used to pick the cards of a review. An empty filter matches every card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    tags: BTreeSet<Tag>,
}

impl TagFilter {
    /// A filter that matches every card.
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a tag to the filter. Adding the same tag twice has no effect.
    pub fn insert(&mut self, tag: Tag) {
        self.tags.insert(tag);
    }

    /// Returns true if a card carrying `tag` passes the filter.
    pub fn matches(&self, tag: Tag) -> bool {
        self.tags.is_empty() || self.tags.contains(&tag)
    }

    /// Returns true if no tag was given, i.e. the filter matches everything.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The tags in the filter, in display order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tags.iter().copied()
    }
}

impl FromIterator<Tag> for TagFilter {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tags.is_empty() {
            return f.write_str("all tags");
        }
        let names: Vec<&str> = self.tags.iter().map(|tag| tag.name()).collect();
        f.write_str(&names.join(", "))
    }
}

// --- CARDS ---

/// A question/answer flashcard. Two cards are the same card when their questions match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// The front. Unique within a deck.
    pub question: String,
    /// The back.
    pub answer: String,
    /// Current difficulty.
    pub tag: Tag,
}

impl Card {
    /// Creates a card. Callers validate that both texts are non-empty.
    pub fn new(question: impl Into<String>, answer: impl Into<String>, tag: Tag) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            tag,
        }
    }

    /// Returns true if `other` has the same identity (same question text).
    pub fn is_same_card(&self, other: &Self) -> bool {
        self.question == other.question
    }
}

/// The fields to change on an existing card. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardEdit {
    /// New question.
    pub question: Option<String>,
    /// New answer.
    pub answer: Option<String>,
    /// New tag.
    pub tag: Option<Tag>,
}

impl CardEdit {
    /// Returns true if the edit would not change anything.
    pub fn is_empty(&self) -> bool {
        self.question.is_none() && self.answer.is_none() && self.tag.is_none()
    }

    /// Returns a copy of `card` with this edit applied.
    pub fn apply_to(&self, card: &Card) -> Card {
        Card {
            question: self.question.clone().unwrap_or_else(|| card.question.clone()),
            answer: self.answer.clone().unwrap_or_else(|| card.answer.clone()),
            tag: self.tag.unwrap_or(card.tag),
        }
    }
}

// --- INDEXES ---

/// A 1-based index as typed by the user. Whether it points at an existing entry is
/// only known once it is resolved against a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemIndex(NonZeroUsize);

impl ItemIndex {
    /// Wraps a 1-based value.
    pub const fn new(one_based: NonZeroUsize) -> Self {
        Self(one_based)
    }

    /// Builds an index from a 1-based value, rejecting zero.
    pub fn from_one_based(one_based: usize) -> Option<Self> {
        NonZeroUsize::new(one_based).map(Self)
    }

    /// Builds an index from a position in a `Vec`.
    pub const fn from_zero_based(position: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(position))
    }

    /// The value as typed by the user.
    pub const fn one_based(self) -> usize {
        self.0.get()
    }

    /// The position in a `Vec`.
    pub const fn zero_based(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
