// src/core/library.rs

use crate::core::error::{CommandError, InterpretResult};
use crate::models::{Card, CardEdit, ItemIndex, Tag};

/// Resolves a user index against a list of `len` entries.
fn resolve(index: ItemIndex, len: usize) -> InterpretResult<usize> {
    let position = index.zero_based();
    if position < len {
        Ok(position)
    } else {
        Err(CommandError::IndexOutOfRange {
            index: index.one_based(),
            len,
        })
    }
}

/// A named, ordered collection of cards. No two cards share a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    name: String,
    cards: Vec<Card>,
}

impl Deck {
    /// Creates an empty deck.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    /// The deck's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cards in insertion order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True when the deck holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card at a 1-based index.
    pub fn card_at(&self, index: ItemIndex) -> InterpretResult<&Card> {
        let position = resolve(index, self.cards.len())?;
        self.cards.get(position).ok_or(CommandError::IndexOutOfRange {
            index: index.one_based(),
            len: self.cards.len(),
        })
    }

    /// Appends a card.
    ///
    /// # Errors
    /// `DuplicateCard` if a card with the same question is already in the deck.
    pub fn add_card(&mut self, card: Card) -> InterpretResult<()> {
        if self.cards.iter().any(|c| c.is_same_card(&card)) {
            return Err(CommandError::DuplicateCard(card.question));
        }
        log::debug!("Adding card '{}' to deck '{}'", card.question, self.name);
        self.cards.push(card);
        Ok(())
    }

    /// Applies `edit` to the card at `index` and returns the updated card.
    ///
    /// # Errors
    /// `IndexOutOfRange`, or `DuplicateCard` if the new question belongs to another card.
    pub fn edit_card(&mut self, index: ItemIndex, edit: &CardEdit) -> InterpretResult<&Card> {
        let position = resolve(index, self.cards.len())?;
        let len = self.cards.len();
        let out_of_range = CommandError::IndexOutOfRange {
            index: index.one_based(),
            len,
        };

        let current = self.cards.get(position).ok_or_else(|| out_of_range.clone())?;
        let edited = edit.apply_to(current);
        let clashes = self
            .cards
            .iter()
            .enumerate()
            .any(|(i, c)| i != position && c.is_same_card(&edited));
        if clashes {
            return Err(CommandError::DuplicateCard(edited.question));
        }

        let slot = self.cards.get_mut(position).ok_or(out_of_range)?;
        *slot = edited;
        Ok(slot)
    }

    /// Removes and returns the card at `index`. Later cards shift down by one.
    pub fn delete_card(&mut self, index: ItemIndex) -> InterpretResult<Card> {
        let position = resolve(index, self.cards.len())?;
        Ok(self.cards.remove(position))
    }

    /// Sets the tag of the card at `index` and returns the updated card.
    pub fn set_tag(&mut self, index: ItemIndex, tag: Tag) -> InterpretResult<&Card> {
        let len = self.cards.len();
        let position = resolve(index, len)?;
        let card = self
            .cards
            .get_mut(position)
            .ok_or(CommandError::IndexOutOfRange {
                index: index.one_based(),
                len,
            })?;
        card.tag = tag;
        Ok(card)
    }
}

/// Every deck the user owns, in creation order. Deck names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    decks: Vec<Deck>,
}

impl Library {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The decks in creation order.
    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    /// Number of decks.
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    /// True when there are no decks.
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// The deck at a 1-based index.
    pub fn deck_at(&self, index: ItemIndex) -> InterpretResult<&Deck> {
        let position = resolve(index, self.decks.len())?;
        self.decks.get(position).ok_or(CommandError::IndexOutOfRange {
            index: index.one_based(),
            len: self.decks.len(),
        })
    }

    /// The deck at a 0-based position, as held by the interpreter's focus.
    pub(crate) fn deck_at_position(&self, position: usize) -> Option<&Deck> {
        self.decks.get(position)
    }

    pub(crate) fn deck_at_position_mut(&mut self, position: usize) -> Option<&mut Deck> {
        self.decks.get_mut(position)
    }

    /// Resolves a user index to a 0-based position.
    pub(crate) fn position_of(&self, index: ItemIndex) -> InterpretResult<usize> {
        resolve(index, self.decks.len())
    }

    fn ensure_unique_name(&self, name: &str, except: Option<usize>) -> InterpretResult<()> {
        let taken = self
            .decks
            .iter()
            .enumerate()
            .any(|(i, deck)| Some(i) != except && deck.name == name);
        if taken {
            Err(CommandError::DuplicateDeck(name.to_string()))
        } else {
            Ok(())
        }
    }

    /// Creates an empty deck at the end of the list.
    pub fn add_deck(&mut self, name: &str) -> InterpretResult<()> {
        self.ensure_unique_name(name, None)?;
        log::debug!("Creating deck '{}'", name);
        self.decks.push(Deck::new(name));
        Ok(())
    }

    /// Renames the deck at `index`, returning its previous name.
    pub fn rename_deck(&mut self, index: ItemIndex, name: &str) -> InterpretResult<String> {
        let position = resolve(index, self.decks.len())?;
        self.ensure_unique_name(name, Some(position))?;
        let len = self.decks.len();
        let deck = self
            .decks
            .get_mut(position)
            .ok_or(CommandError::IndexOutOfRange {
                index: index.one_based(),
                len,
            })?;
        Ok(std::mem::replace(&mut deck.name, name.to_string()))
    }

    /// Removes and returns the deck at `index`.
    pub fn remove_deck(&mut self, index: ItemIndex) -> InterpretResult<Deck> {
        let position = resolve(index, self.decks.len())?;
        Ok(self.decks.remove(position))
    }

    /// Drops every deck.
    pub fn clear(&mut self) {
        self.decks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(n: usize) -> ItemIndex {
        ItemIndex::from_one_based(n).unwrap()
    }

    fn sample_deck() -> Deck {
        let mut deck = Deck::new("Capitals");
        deck.add_card(Card::new("France?", "Paris", Tag::Untagged))
            .unwrap();
        deck.add_card(Card::new("Peru?", "Lima", Tag::Hard)).unwrap();
        deck
    }

    #[test]
    fn test_add_card_rejects_duplicate_question() {
        let mut deck = sample_deck();
        let err = deck
            .add_card(Card::new("France?", "Lyon", Tag::Easy))
            .unwrap_err();
        assert_eq!(err, CommandError::DuplicateCard("France?".to_string()));
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_edit_card_checks_other_cards_only() {
        // --- Setup ---
        let mut deck = sample_deck();

        // --- Execute & Assert ---
        // Keeping its own question is not a clash.
        let same = CardEdit {
            question: Some("France?".to_string()),
            answer: Some("Paris, obviously".to_string()),
            tag: None,
        };
        assert_eq!(deck.edit_card(idx(1), &same).unwrap().answer, "Paris, obviously");

        let clash = CardEdit {
            question: Some("Peru?".to_string()),
            ..Default::default()
        };
        assert_eq!(
            deck.edit_card(idx(1), &clash).unwrap_err(),
            CommandError::DuplicateCard("Peru?".to_string())
        );
        assert_eq!(deck.card_at(idx(1)).unwrap().question, "France?");
    }

    #[test]
    fn test_index_out_of_range() {
        let mut deck = sample_deck();
        assert_eq!(
            deck.delete_card(idx(3)).unwrap_err(),
            CommandError::IndexOutOfRange { index: 3, len: 2 }
        );
        assert_eq!(deck.delete_card(idx(1)).unwrap().question, "France?");
        assert_eq!(deck.card_at(idx(1)).unwrap().question, "Peru?");
    }

    #[test]
    fn test_set_tag() {
        let mut deck = sample_deck();
        deck.set_tag(idx(1), Tag::Easy).unwrap();
        assert_eq!(deck.cards().first().unwrap().tag, Tag::Easy);
    }

    #[test]
    fn test_library_deck_names_are_unique() {
        // --- Setup ---
        let mut library = Library::new();
        library.add_deck("Spanish").unwrap();
        library.add_deck("German").unwrap();

        // --- Execute & Assert ---
        assert_eq!(
            library.add_deck("Spanish").unwrap_err(),
            CommandError::DuplicateDeck("Spanish".to_string())
        );
        assert_eq!(
            library.rename_deck(idx(2), "Spanish").unwrap_err(),
            CommandError::DuplicateDeck("Spanish".to_string())
        );
        assert_eq!(library.rename_deck(idx(2), "German").unwrap(), "German");
        assert_eq!(library.rename_deck(idx(2), "French").unwrap(), "German");
        assert_eq!(library.deck_at(idx(2)).unwrap().name(), "French");
    }

    #[test]
    fn test_library_remove_and_clear() {
        let mut library = Library::new();
        library.add_deck("A").unwrap();
        library.add_deck("B").unwrap();

        assert_eq!(library.remove_deck(idx(1)).unwrap().name(), "A");
        assert_eq!(library.deck_at(idx(1)).unwrap().name(), "B");
        assert!(library.remove_deck(idx(5)).is_err());

        library.clear();
        assert!(library.is_empty());
    }
}
