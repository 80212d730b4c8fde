//! # Review Session Engine
//!
//! A [`ReviewSession`] walks an ordered queue over the cards of one deck. The queue holds
//! positions into the deck, never copies of cards, so tag changes made during a review
//! land on the deck itself and outlive the session.
//!
//! A session is only ever built with at least one card, and its position always points
//! inside the queue. The deck cannot change shape while a review runs, because every
//! command that adds or removes cards is refused in reviewing mode.

use crate::core::error::{CommandError, InterpretResult};
use crate::core::library::Deck;
use crate::models::{Card, ItemIndex, Tag, TagFilter};
use std::fmt;
use std::num::NonZeroUsize;

/// How the user judged their recall of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `correct`
    Correct,
    /// `wrong`
    Wrong,
}

impl Outcome {
    /// The tag a card receives when marked with this outcome.
    pub const fn tag(self) -> Tag {
        match self {
            Self::Correct => Tag::Easy,
            Self::Wrong => Tag::Hard,
        }
    }
}

/// Which end of the queue navigation ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// `prev` on the first card.
    Start,
    /// `next` on the last card.
    End,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "This is the first card.",
            Self::End => "This is the last card.",
        })
    }
}

/// The visible side of the current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// The front.
    Question,
    /// The back, shown after `flip`.
    Answer,
}

/// The result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The session moved to a new queue position.
    Moved {
        /// The new 0-based queue position.
        position: usize,
    },
    /// Nothing moved.
    NoMoreCards(Boundary),
}

/// Per-session marking counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewStats {
    /// Cards last marked `correct`.
    pub correct: usize,
    /// Cards last marked `wrong`.
    pub wrong: usize,
    /// Queued cards never marked.
    pub unmarked: usize,
}

impl fmt::Display for ReviewStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} correct, {} wrong, {} unmarked",
            self.correct, self.wrong, self.unmarked
        )
    }
}

/// A running review over one deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    /// Positions into the deck's cards, in deck order.
    queue: Vec<usize>,
    position: usize,
    flipped: bool,
    outcomes: Vec<Option<Outcome>>,
    filter: TagFilter,
}

impl ReviewSession {
    /// Builds the queue: the cards of `deck` whose tag passes `filter`, in deck order,
    /// cut to the first `limit` entries when a limit is given.
    ///
    /// # Errors
    /// `NoMatchingCards` when the queue would be empty. No session is created then.
    pub fn start(
        deck: &Deck,
        filter: &TagFilter,
        limit: Option<NonZeroUsize>,
    ) -> InterpretResult<Self> {
        let mut queue: Vec<usize> = deck
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, card)| filter.matches(card.tag))
            .map(|(position, _)| position)
            .collect();
        if let Some(limit) = limit {
            queue.truncate(limit.get());
        }

        if queue.is_empty() {
            return Err(CommandError::NoMatchingCards);
        }

        log::info!(
            "Starting review of '{}' with {} card(s) ({})",
            deck.name(),
            queue.len(),
            filter
        );
        let outcomes = vec![None; queue.len()];
        Ok(Self {
            queue,
            position: 0,
            flipped: false,
            outcomes,
            filter: filter.clone(),
        })
    }

    /// The number of cards in the queue. Never zero.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Always false: an empty review is never started.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The 0-based position in the queue.
    pub fn position(&self) -> usize {
        self.position
    }

    /// True while the answer is showing.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// The tags the queue was built from.
    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    /// The deck positions of the queued cards.
    pub fn queue(&self) -> &[usize] {
        &self.queue
    }

    fn current_deck_position(&self) -> usize {
        *self
            .queue
            .get(self.position)
            .expect("review position stays inside the queue")
    }

    /// The card under review.
    pub fn current<'d>(&self, deck: &'d Deck) -> &'d Card {
        deck.cards()
            .get(self.current_deck_position())
            .expect("review queue only holds positions of the reviewed deck")
    }

    /// The side of the current card that is showing.
    pub fn face(&self) -> Face {
        if self.flipped { Face::Answer } else { Face::Question }
    }

    /// Turns the current card over and returns the side now showing.
    pub fn flip(&mut self) -> Face {
        self.flipped = !self.flipped;
        log::trace!("Flipped card {} to {:?}", self.position, self.face());
        self.face()
    }

    /// Moves forward, unless the current card is the last one.
    pub fn next(&mut self) -> Step {
        if self.position + 1 < self.queue.len() {
            self.move_to(self.position + 1)
        } else {
            Step::NoMoreCards(Boundary::End)
        }
    }

    /// Moves back, unless the current card is the first one.
    pub fn previous(&mut self) -> Step {
        match self.position.checked_sub(1) {
            Some(position) => self.move_to(position),
            None => Step::NoMoreCards(Boundary::Start),
        }
    }

    fn move_to(&mut self, position: usize) -> Step {
        self.position = position;
        self.flipped = false;
        log::trace!("Review moved to card {}", position);
        Step::Moved { position }
    }

    /// Records `outcome` for the current card and retags it on the deck. Does not advance;
    /// marking the same card again replaces the earlier outcome.
    pub fn mark<'d>(&mut self, deck: &'d mut Deck, outcome: Outcome) -> InterpretResult<&'d Card> {
        if let Some(slot) = self.outcomes.get_mut(self.position) {
            *slot = Some(outcome);
        }
        self.tag_current(deck, outcome.tag())
    }

    /// Sets the tag of the current card on the deck.
    pub fn tag_current<'d>(&self, deck: &'d mut Deck, tag: Tag) -> InterpretResult<&'d Card> {
        let index = ItemIndex::from_zero_based(self.current_deck_position());
        deck.set_tag(index, tag)
    }

    /// Counts so far.
    pub fn stats(&self) -> ReviewStats {
        self.outcomes
            .iter()
            .fold(ReviewStats::default(), |mut stats, outcome| {
                match outcome {
                    Some(Outcome::Correct) => stats.correct += 1,
                    Some(Outcome::Wrong) => stats.wrong += 1,
                    None => stats.unmarked += 1,
                }
                stats
            })
    }

    /// Ends the session. Tag changes already live on the deck.
    pub fn finish(self) -> ReviewStats {
        let stats = self.stats();
        log::info!("Review finished: {}", stats);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_of(cards: &[(&str, Tag)]) -> Deck {
        let mut deck = Deck::new("Test");
        for (question, tag) in cards {
            deck.add_card(Card::new(*question, format!("{question} answer"), *tag))
                .unwrap();
        }
        deck
    }

    fn filter(tags: &[Tag]) -> TagFilter {
        tags.iter().copied().collect()
    }

    fn questions(session: &ReviewSession, deck: &Deck) -> Vec<String> {
        session
            .queue()
            .iter()
            .map(|&p| deck.cards().get(p).unwrap().question.clone())
            .collect()
    }

    #[test]
    fn test_start_keeps_deck_order_of_matching_cards() {
        let deck = deck_of(&[
            ("Q1", Tag::Untagged),
            ("Q2", Tag::Hard),
            ("Q3", Tag::Untagged),
            ("Q4", Tag::Easy),
        ]);

        let session = ReviewSession::start(&deck, &filter(&[Tag::Untagged]), None).unwrap();
        assert_eq!(questions(&session, &deck), ["Q1", "Q3"]);
        assert_eq!(session.position(), 0);
        assert!(!session.is_flipped());

        let all = ReviewSession::start(&deck, &TagFilter::all(), None).unwrap();
        assert_eq!(questions(&all, &deck), ["Q1", "Q2", "Q3", "Q4"]);
    }

    #[test]
    fn test_start_truncates_to_limit() {
        let deck = deck_of(&[("Q1", Tag::Hard), ("Q2", Tag::Hard), ("Q3", Tag::Hard)]);

        let session =
            ReviewSession::start(&deck, &TagFilter::all(), NonZeroUsize::new(2)).unwrap();
        assert_eq!(questions(&session, &deck), ["Q1", "Q2"]);

        let larger =
            ReviewSession::start(&deck, &TagFilter::all(), NonZeroUsize::new(10)).unwrap();
        assert_eq!(larger.len(), 3);
    }

    #[test]
    fn test_start_with_no_matches_fails() {
        let deck = deck_of(&[("Q1", Tag::Easy)]);
        assert_eq!(
            ReviewSession::start(&deck, &filter(&[Tag::Hard]), None).unwrap_err(),
            CommandError::NoMatchingCards
        );
        assert_eq!(
            ReviewSession::start(&Deck::new("Empty"), &TagFilter::all(), None).unwrap_err(),
            CommandError::NoMatchingCards
        );
    }

    #[test]
    fn test_flip_twice_is_identity() {
        let deck = deck_of(&[("Q1", Tag::Untagged)]);
        let mut session = ReviewSession::start(&deck, &TagFilter::all(), None).unwrap();

        assert_eq!(session.flip(), Face::Answer);
        assert_eq!(session.flip(), Face::Question);
        assert!(!session.is_flipped());
    }

    #[test]
    fn test_navigation_boundaries_leave_state_alone() {
        // --- Setup ---
        let deck = deck_of(&[("Q1", Tag::Untagged), ("Q2", Tag::Untagged)]);
        let mut session = ReviewSession::start(&deck, &TagFilter::all(), None).unwrap();

        // --- Execute & Assert ---
        session.flip();
        assert_eq!(session.previous(), Step::NoMoreCards(Boundary::Start));
        assert_eq!(session.position(), 0);
        assert!(session.is_flipped());

        assert_eq!(session.next(), Step::Moved { position: 1 });
        assert!(!session.is_flipped(), "moving resets the flip");
        assert_eq!(session.current(&deck).question, "Q2");

        session.flip();
        assert_eq!(session.next(), Step::NoMoreCards(Boundary::End));
        assert_eq!(session.position(), 1);
        assert!(session.is_flipped());
    }

    #[test]
    fn test_marking_retags_the_deck_and_does_not_advance() {
        // --- Setup ---
        let mut deck = deck_of(&[
            ("Q1", Tag::Untagged),
            ("Q2", Tag::Hard),
            ("Q3", Tag::Untagged),
        ]);
        let mut session =
            ReviewSession::start(&deck, &filter(&[Tag::Untagged]), None).unwrap();

        // --- Execute ---
        assert_eq!(session.next(), Step::Moved { position: 1 });
        assert_eq!(session.next(), Step::NoMoreCards(Boundary::End));
        let marked = session.mark(&mut deck, Outcome::Wrong).unwrap();
        assert_eq!(marked.question, "Q3");
        let stats = session.finish();

        // --- Assert ---
        let tags: Vec<Tag> = deck.cards().iter().map(|c| c.tag).collect();
        assert_eq!(tags, [Tag::Untagged, Tag::Hard, Tag::Hard]);
        assert_eq!(
            stats,
            ReviewStats {
                correct: 0,
                wrong: 1,
                unmarked: 1
            }
        );
    }

    #[test]
    fn test_remarking_overwrites_outcome() {
        let mut deck = deck_of(&[("Q1", Tag::Untagged)]);
        let mut session = ReviewSession::start(&deck, &TagFilter::all(), None).unwrap();

        session.mark(&mut deck, Outcome::Wrong).unwrap();
        session.mark(&mut deck, Outcome::Correct).unwrap();

        assert_eq!(session.position(), 0);
        assert_eq!(session.stats().correct, 1);
        assert_eq!(session.stats().wrong, 0);
        assert_eq!(session.current(&deck).tag, Tag::Easy);
    }

    #[test]
    fn test_tag_current_keeps_position() {
        let mut deck = deck_of(&[("Q1", Tag::Untagged), ("Q2", Tag::Untagged)]);
        let mut session = ReviewSession::start(&deck, &TagFilter::all(), None).unwrap();
        session.next();

        session.tag_current(&mut deck, Tag::Easy).unwrap();

        assert_eq!(session.position(), 1);
        assert_eq!(deck.cards().get(1).unwrap().tag, Tag::Easy);
        assert_eq!(session.stats().unmarked, 2);
    }
}
