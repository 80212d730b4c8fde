// src/core/dispatcher.rs

use crate::core::arg_parser::{self, usage};
use crate::core::command::{Command, CommandRequest, Transition};
use crate::core::error::{CommandError, InterpretResult};
use crate::core::modes::{self, CommandWord, Gate, Mode};

/// How a word turns its argument string into a command.
enum Arguments {
    /// The word takes no arguments and always yields this command.
    Forbidden(Command),
    /// The word's grammar.
    Parsed(fn(&str) -> InterpretResult<Command>),
}

/// One registered command word.
struct CommandDefinition {
    word: CommandWord,
    usage: &'static str,
    summary: &'static str,
    arguments: Arguments,
    transition: Transition,
}

/// The single source of truth for every command word. Legality lives in
/// [`CommandWord::gates`]; this table only knows how to parse.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        word: CommandWord::CreateDeck,
        usage: usage::CREATE,
        summary: "Create an empty deck.",
        arguments: Arguments::Parsed(arg_parser::parse_create_deck),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::RemoveDeck,
        usage: usage::REMOVE,
        summary: "Remove a deck and all of its cards.",
        arguments: Arguments::Parsed(arg_parser::parse_remove_deck),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::RenameDeck,
        usage: usage::RENAME,
        summary: "Rename a deck.",
        arguments: Arguments::Parsed(arg_parser::parse_rename_deck),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::SelectDeck,
        usage: usage::SELECT,
        summary: "Select a deck to work on.",
        arguments: Arguments::Parsed(arg_parser::parse_select_deck),
        transition: Transition::EnterSelected,
    },
    CommandDefinition {
        word: CommandWord::UnselectDeck,
        usage: usage::NONE,
        summary: "Go back to the list of decks.",
        arguments: Arguments::Forbidden(Command::UnselectDeck),
        transition: Transition::ExitSelected,
    },
    CommandDefinition {
        word: CommandWord::List,
        usage: usage::NONE,
        summary: "List the decks, or the cards of the selected deck.",
        arguments: Arguments::Forbidden(Command::List),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::AddCard,
        usage: usage::ADD,
        summary: "Add a card to the selected deck.",
        arguments: Arguments::Parsed(arg_parser::parse_add_card),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::EditCard,
        usage: usage::EDIT,
        summary: "Change the question, answer or tag of a card.",
        arguments: Arguments::Parsed(arg_parser::parse_edit_card),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::DeleteCard,
        usage: usage::DELETE,
        summary: "Delete a card from the selected deck.",
        arguments: Arguments::Parsed(arg_parser::parse_delete_card),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::Review,
        usage: usage::REVIEW,
        summary: "Review the cards with the given tags (all by default).",
        arguments: Arguments::Parsed(arg_parser::parse_review),
        transition: Transition::EnterReviewing,
    },
    CommandDefinition {
        word: CommandWord::SetCardsPerSession,
        usage: usage::SETNUM,
        summary: "Set how many cards a review shows by default.",
        arguments: Arguments::Parsed(arg_parser::parse_set_cards_per_session),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::Flip,
        usage: usage::NONE,
        summary: "Show the other side of the card.",
        arguments: Arguments::Forbidden(Command::Flip),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::Next,
        usage: usage::NONE,
        summary: "Go to the next card.",
        arguments: Arguments::Forbidden(Command::Next),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::Previous,
        usage: usage::NONE,
        summary: "Go to the previous card.",
        arguments: Arguments::Forbidden(Command::Previous),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::MarkCorrect,
        usage: usage::NONE,
        summary: "Mark the card as answered correctly (tags it easy).",
        arguments: Arguments::Forbidden(Command::MarkCorrect),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::MarkWrong,
        usage: usage::NONE,
        summary: "Mark the card as answered wrongly (tags it hard).",
        arguments: Arguments::Forbidden(Command::MarkWrong),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::TagCard,
        usage: usage::TAG,
        summary: "Set the tag of the card.",
        arguments: Arguments::Parsed(arg_parser::parse_tag_card),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::EndReview,
        usage: usage::NONE,
        summary: "Stop reviewing and show the results.",
        arguments: Arguments::Forbidden(Command::EndReview),
        transition: Transition::ExitReviewing,
    },
    CommandDefinition {
        word: CommandWord::Help,
        usage: usage::NONE,
        summary: "Show the commands available right now.",
        arguments: Arguments::Forbidden(Command::Help),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::Exit,
        usage: usage::NONE,
        summary: "Leave flashdeck.",
        arguments: Arguments::Forbidden(Command::Exit),
        transition: Transition::None,
    },
    CommandDefinition {
        word: CommandWord::Clear,
        usage: usage::NONE,
        summary: "Delete every deck.",
        arguments: Arguments::Forbidden(Command::Clear),
        transition: Transition::None,
    },
];

fn find_command(word: CommandWord) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY.iter().find(|def| def.word == word)
}

/// Turns `(word, arguments)` typed in `mode` into a command request.
///
/// Unknown words are refused first, then words that are illegal in `mode`. The word's
/// parser only runs once both checks pass.
pub fn dispatch(mode: Mode, word: &str, arguments: &str) -> InterpretResult<CommandRequest> {
    let command_word =
        CommandWord::from_name(word).ok_or_else(|| CommandError::UnknownCommand(word.to_string()))?;

    if let Gate::Closed(reason) = modes::gate(mode, command_word) {
        log::debug!("Refusing '{}' in mode '{}': {}", word, mode, reason);
        return Err(CommandError::IllegalInMode {
            word: command_word,
            reason,
        });
    }

    let definition = find_command(command_word)
        .ok_or_else(|| CommandError::UnknownCommand(word.to_string()))?;
    log::debug!("Dispatching '{}' in mode '{}'", command_word, mode);

    let command = match &definition.arguments {
        Arguments::Forbidden(command) => {
            arg_parser::expect_no_arguments(command_word, arguments)?;
            command.clone()
        }
        Arguments::Parsed(parse) => parse(arguments)?,
    };

    Ok(CommandRequest {
        word: command_word,
        command,
        transition: definition.transition,
    })
}

/// One line of help: the word with its usage, and what it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLine {
    /// The command word.
    pub word: CommandWord,
    /// Its argument grammar, empty for words without arguments.
    pub usage: &'static str,
    /// One sentence on what it does.
    pub summary: &'static str,
}

impl HelpLine {
    /// `word usage`, as typed.
    pub fn synopsis(&self) -> String {
        if self.usage.is_empty() {
            self.word.name().to_string()
        } else {
            format!("{} {}", self.word.name(), self.usage)
        }
    }
}

/// Help for every word that may run in `mode`, in registry order.
pub fn help_lines(mode: Mode) -> Vec<HelpLine> {
    COMMAND_REGISTRY
        .iter()
        .filter(|def| modes::is_legal(mode, def.word))
        .map(|def| HelpLine {
            word: def.word,
            usage: def.usage,
            summary: def.summary,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::modes::Restriction;
    use crate::models::{Tag, TagFilter};
    use std::collections::HashSet;
    use std::num::NonZeroUsize;

    #[test]
    fn test_registry_covers_every_word_once() {
        let registered: Vec<CommandWord> = COMMAND_REGISTRY.iter().map(|def| def.word).collect();
        let unique: HashSet<CommandWord> = registered.iter().copied().collect();
        assert_eq!(registered.len(), unique.len());
        for word in CommandWord::ALL {
            assert!(unique.contains(&word), "{word} is not registered");
        }
    }

    #[test]
    fn test_unknown_word_is_refused_in_every_mode() {
        for mode in Mode::ALL {
            assert_eq!(
                dispatch(mode, "shuffle", "").unwrap_err(),
                CommandError::UnknownCommand("shuffle".to_string())
            );
        }
    }

    #[test]
    fn test_legality_matrix_matches_dispatch() {
        // Arguments that are valid for every parser-backed word, so only legality decides.
        fn valid_arguments(word: CommandWord) -> &'static str {
            match word {
                CommandWord::CreateDeck => " Deck",
                CommandWord::RenameDeck => " 1 Deck",
                CommandWord::RemoveDeck
                | CommandWord::SelectDeck
                | CommandWord::DeleteCard
                | CommandWord::SetCardsPerSession => " 1",
                CommandWord::AddCard => " q/Q a/A",
                CommandWord::EditCard => " 1 a/A",
                CommandWord::TagCard => " easy",
                _ => "",
            }
        }

        for mode in Mode::ALL {
            for word in CommandWord::ALL {
                let result = dispatch(mode, word.name(), valid_arguments(word));
                match modes::gate(mode, word) {
                    Gate::Open => {
                        let request = result.unwrap();
                        assert_eq!(request.word, word);
                    }
                    Gate::Closed(reason) => {
                        assert_eq!(
                            result.unwrap_err(),
                            CommandError::IllegalInMode { word, reason },
                            "{word} in {mode}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_illegal_word_is_refused_before_parsing() {
        // Garbage arguments would fail to parse; legality must win.
        let err = dispatch(Mode::Unselected, "add", "nonsense").unwrap_err();
        assert_eq!(
            err,
            CommandError::IllegalInMode {
                word: CommandWord::AddCard,
                reason: Restriction::NoDeckSelected
            }
        );
        assert_eq!(err.to_string(), "`add` cannot be used now: no deck selected.");
    }

    #[test]
    fn test_review_hard_three() {
        let request = dispatch(Mode::Selected, "review", " hard 3").unwrap();
        assert_eq!(
            request.command,
            Command::Review {
                filter: [Tag::Hard].into_iter().collect::<TagFilter>(),
                limit: NonZeroUsize::new(3),
            }
        );
        assert_eq!(request.transition, Transition::EnterReviewing);
    }

    #[test]
    fn test_zero_argument_words_reject_trailing_text() {
        let err = dispatch(Mode::Reviewing, "next", " please").unwrap_err();
        assert_eq!(
            err,
            CommandError::UnexpectedArgument {
                word: CommandWord::Next,
                argument: "please".to_string()
            }
        );
    }

    #[test]
    fn test_help_lines_follow_the_mode() {
        let reviewing: Vec<CommandWord> = help_lines(Mode::Reviewing)
            .into_iter()
            .map(|line| line.word)
            .collect();
        assert_eq!(reviewing.len(), 7);
        assert!(reviewing.contains(&CommandWord::EndReview));

        let add = help_lines(Mode::Selected)
            .into_iter()
            .find(|line| line.word == CommandWord::AddCard)
            .unwrap();
        assert_eq!(add.synopsis(), "add q/<question> a/<answer> [t/<tag>]");
    }
}
