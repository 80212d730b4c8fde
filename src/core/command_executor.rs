// src/core/command_executor.rs

use crate::core::command::{Command, CommandRequest, CommandResult, Condition, Signals};
use crate::core::dispatcher;
use crate::core::error::InterpretResult;
use crate::core::library::{Deck, Library};
use crate::core::modes::Mode;
use crate::core::review::{Face, Outcome, ReviewSession, Step};
use crate::models::{Card, ItemIndex};
use crate::state::{AppState, Focus};

/// Runs a dispatched request against the interpreter state.
///
/// The focus only changes once the command's own work has succeeded, so on error the
/// mode and any running review are exactly as they were.
pub fn execute(state: &mut AppState, request: CommandRequest) -> InterpretResult<CommandResult> {
    let mode_before = state.mode();
    let transition_signals = Signals::for_transition(request.transition);

    let result = match request.command {
        // --- Deck list ---
        Command::CreateDeck { name } => {
            state.library.add_deck(&name)?;
            CommandResult::new(format!("Created deck '{name}'."))
        }
        Command::RemoveDeck { index } => {
            let deck = state.library.remove_deck(index)?;
            CommandResult::new(format!(
                "Removed deck '{}' and its {} card(s).",
                deck.name(),
                deck.len()
            ))
        }
        Command::RenameDeck { index, name } => {
            let old = state.library.rename_deck(index, &name)?;
            CommandResult::new(format!("Renamed deck '{old}' to '{name}'."))
        }
        Command::SelectDeck { index } => {
            let position = state.library.position_of(index)?;
            let feedback = state
                .library
                .deck_at(index)
                .map(|deck| format!("Selected deck '{}' ({} card(s)).", deck.name(), deck.len()))?;
            state.focus = Focus::Selected { deck: position };
            CommandResult::new(feedback)
        }
        Command::UnselectDeck => {
            let name = selected_deck(state).name().to_string();
            state.focus = Focus::Unselected;
            CommandResult::new(format!("Closed deck '{name}'."))
        }
        Command::List => CommandResult::new(match state.focus.deck() {
            None => describe_library(&state.library),
            Some(_) => describe_deck(selected_deck(state)),
        }),

        // --- Cards ---
        Command::AddCard { card } => {
            let summary = describe_card(&card);
            let deck = selected_deck_mut(state);
            deck.add_card(card)?;
            CommandResult::new(format!(
                "Added card {} to '{}': {summary}",
                deck.len(),
                deck.name()
            ))
        }
        Command::EditCard { index, edit } => {
            let card = selected_deck_mut(state).edit_card(index, &edit)?;
            CommandResult::new(format!("Edited card {index}: {}", describe_card(card)))
        }
        Command::DeleteCard { index } => {
            let card = selected_deck_mut(state).delete_card(index)?;
            CommandResult::new(format!("Deleted card {index}: {}", describe_card(&card)))
        }

        // --- Review lifecycle ---
        Command::Review { filter, limit } => {
            let limit = limit.or(state.settings.review.cards_per_session);
            let Some(position) = state.focus.deck() else {
                unreachable!("review is only dispatched with a deck selected");
            };
            let deck = selected_deck(state);
            let session = ReviewSession::start(deck, &filter, limit)?;
            let feedback = format!(
                "Reviewing {} card(s) from '{}' ({}).\n{}",
                session.len(),
                deck.name(),
                filter,
                describe_position(&session, deck)
            );
            state.focus = Focus::Reviewing {
                deck: position,
                session,
            };
            CommandResult::new(feedback)
        }
        Command::SetCardsPerSession { count } => {
            state.settings.review.cards_per_session = Some(count);
            CommandResult::new(format!("Reviews will now show up to {count} card(s)."))
        }
        Command::EndReview => {
            let focus = std::mem::take(&mut state.focus);
            let Focus::Reviewing { deck, session } = focus else {
                unreachable!("endreview is only dispatched during a review");
            };
            let stats = session.finish();
            state.focus = Focus::Selected { deck };
            CommandResult::new(format!("Review finished: {stats}."))
        }

        // --- Inside a review ---
        Command::Flip => {
            let (deck, session) = review_parts(state);
            let card = session.current(deck);
            CommandResult::new(match session.flip() {
                Face::Answer => format!("A: {}", card.answer),
                Face::Question => format!("Q: {}", card.question),
            })
        }
        Command::Next => {
            let (deck, session) = review_parts(state);
            navigation_result(session.next(), session, deck)
        }
        Command::Previous => {
            let (deck, session) = review_parts(state);
            navigation_result(session.previous(), session, deck)
        }
        Command::MarkCorrect => mark(state, Outcome::Correct)?,
        Command::MarkWrong => mark(state, Outcome::Wrong)?,
        Command::TagCard { tag } => {
            let (deck, session) = review_parts(state);
            let card = session.tag_current(deck, tag)?;
            CommandResult::new(format!("Tagged '{}' as {tag}.", card.question))
        }

        // --- Session ---
        Command::Help => CommandResult::new(describe_help(mode_before)).with_signals(Signals {
            show_help: true,
            ..Signals::default()
        }),
        Command::Exit => CommandResult::new("Goodbye!").with_signals(Signals {
            exit: true,
            ..Signals::default()
        }),
        Command::Clear => CommandResult::new("This will delete every deck.").with_signals(Signals {
            clear_requested: true,
            ..Signals::default()
        }),
    };

    let mode_after = state.mode();
    if mode_after != mode_before {
        log::info!("Mode changed: {} -> {}", mode_before, mode_after);
    }

    let result = if transition_signals.is_empty() {
        result
    } else {
        result.with_signals(transition_signals)
    };
    Ok(result)
}

fn mark(state: &mut AppState, outcome: Outcome) -> InterpretResult<CommandResult> {
    let (deck, session) = review_parts(state);
    let card = session.mark(deck, outcome)?;
    let verdict = match outcome {
        Outcome::Correct => "correct",
        Outcome::Wrong => "wrong",
    };
    Ok(CommandResult::new(format!(
        "Marked '{}' as {verdict}; it is now tagged {}.",
        card.question, card.tag
    )))
}

fn navigation_result(step: Step, session: &ReviewSession, deck: &Deck) -> CommandResult {
    match step {
        Step::Moved { .. } => CommandResult::new(describe_position(session, deck)),
        Step::NoMoreCards(boundary) => CommandResult::new(boundary.to_string())
            .with_condition(Condition::NoMoreCards(boundary)),
    }
}

// --- Focus access ---
// Mode gating guarantees these shapes; anything else is a dispatcher bug.

fn selected_deck(state: &AppState) -> &Deck {
    state
        .selected_deck()
        .expect("a deck is selected whenever deck commands are dispatched")
}

fn selected_deck_mut(state: &mut AppState) -> &mut Deck {
    let position = state
        .focus
        .deck()
        .expect("a deck is selected whenever deck commands are dispatched");
    state
        .library
        .deck_at_position_mut(position)
        .expect("the selected deck stays in the library")
}

fn review_parts(state: &mut AppState) -> (&mut Deck, &mut ReviewSession) {
    let AppState { library, focus, .. } = state;
    let Focus::Reviewing { deck, session } = focus else {
        unreachable!("review commands are only dispatched during a review");
    };
    let deck = library
        .deck_at_position_mut(*deck)
        .expect("the reviewed deck stays in the library");
    (deck, session)
}

// --- Feedback text ---

fn describe_card(card: &Card) -> String {
    format!("[{}] {} | {}", card.tag, card.question, card.answer)
}

fn describe_position(session: &ReviewSession, deck: &Deck) -> String {
    format!(
        "Card {}/{}: Q: {}",
        session.position() + 1,
        session.len(),
        session.current(deck).question
    )
}

fn describe_library(library: &Library) -> String {
    if library.is_empty() {
        return "No decks yet. Create one with `create <name>`.".to_string();
    }
    let rows = library.decks().iter().enumerate().map(|(position, deck)| {
        format!(
            "  {}. {} ({} card(s))",
            ItemIndex::from_zero_based(position),
            deck.name(),
            deck.len()
        )
    });
    std::iter::once("Decks:".to_string())
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_deck(deck: &Deck) -> String {
    if deck.is_empty() {
        return format!(
            "Deck '{}' has no cards. Add one with `add q/<question> a/<answer>`.",
            deck.name()
        );
    }
    let rows = deck.cards().iter().enumerate().map(|(position, card)| {
        format!(
            "  {}. {}",
            ItemIndex::from_zero_based(position),
            describe_card(card)
        )
    });
    std::iter::once(format!("Cards in '{}':", deck.name()))
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_help(mode: Mode) -> String {
    let rows = dispatcher::help_lines(mode)
        .into_iter()
        .map(|line| format!("  {:<48} {}", line.synopsis(), line.summary));
    std::iter::once(format!("Commands available ({mode}):"))
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}
