// src/core/arg_parser.rs

use crate::core::command::Command;
use crate::core::error::{CommandError, InterpretResult};
use crate::core::modes::CommandWord;
use crate::models::{Card, CardEdit, ItemIndex, Tag, TagFilter};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::num::{IntErrorKind, NonZeroUsize};

lazy_static! {
    // A lowercase letter followed by `/`, at the start of the string or after whitespace.
    // Uppercase pairs such as `I/O` are ordinary text.
    static ref FIELD_PREFIX: Regex =
        Regex::new(r"(?:^|\s)([a-z])/").expect("field prefix regex is valid");
}

/// Usage strings shown after a grammar error and in the help listing.
pub mod usage {
    /// `create`
    pub const CREATE: &str = "<name>";
    /// `remove`
    pub const REMOVE: &str = "<index>";
    /// `rename`
    pub const RENAME: &str = "<index> <name>";
    /// `select`
    pub const SELECT: &str = "<index>";
    /// `add`
    pub const ADD: &str = "q/<question> a/<answer> [t/<tag>]";
    /// `edit`
    pub const EDIT: &str = "<index> [q/<question>] [a/<answer>] [t/<tag>]";
    /// `delete`
    pub const DELETE: &str = "<index>";
    /// `review`
    pub const REVIEW: &str = "[untagged|easy|hard ...] [count]";
    /// `setnum`
    pub const SETNUM: &str = "<count>";
    /// `tag`
    pub const TAG: &str = "<untagged|easy|hard>";
    /// Words that take no arguments.
    pub const NONE: &str = "";
}

/// The card fields that can be given with a `x/` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// `q/`
    Question,
    /// `a/`
    Answer,
    /// `t/`
    Tag,
}

impl Prefix {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "q" => Some(Self::Question),
            "a" => Some(Self::Answer),
            "t" => Some(Self::Tag),
            _ => None,
        }
    }

    /// The prefix as typed, e.g. `q/`.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Question => "q/",
            Self::Answer => "a/",
            Self::Tag => "t/",
        }
    }
}

/// An argument string split on its field prefixes.
///
/// Everything before the first prefix is the `preamble`. Each prefix owns the text up to
/// the next prefix, trimmed. Unknown and repeated prefixes are rejected while splitting.
#[derive(Debug, Clone)]
pub struct PrefixedArgs<'a> {
    preamble: &'a str,
    values: HashMap<Prefix, &'a str>,
}

impl<'a> PrefixedArgs<'a> {
    /// Splits `arguments` for `word`, whose usage is `usage`.
    pub fn tokenize(word: CommandWord, usage: &str, arguments: &'a str) -> InterpretResult<Self> {
        // (letter start, value start) for every prefix, in order.
        let mut markers = Vec::new();
        for caps in FIELD_PREFIX.captures_iter(arguments) {
            if let (Some(letter), Some(whole)) = (caps.get(1), caps.get(0)) {
                markers.push((letter.as_str(), letter.start(), whole.end()));
            }
        }

        let preamble_end = markers.first().map_or(arguments.len(), |m| m.1);
        let preamble = arguments.get(..preamble_end).unwrap_or_default().trim();

        let mut values = HashMap::new();
        for (i, &(letter, _, value_start)) in markers.iter().enumerate() {
            let prefix = Prefix::from_letter(letter).ok_or_else(|| {
                CommandError::usage(word, usage, &format!("Unknown prefix '{letter}/'."))
            })?;
            let value_end = markers.get(i + 1).map_or(arguments.len(), |m| m.1);
            let value = arguments
                .get(value_start..value_end)
                .unwrap_or_default()
                .trim();
            if values.insert(prefix, value).is_some() {
                return Err(CommandError::usage(
                    word,
                    usage,
                    &format!("The prefix '{}' was given more than once.", prefix.marker()),
                ));
            }
        }

        Ok(Self { preamble, values })
    }

    /// The trimmed text before the first prefix.
    pub fn preamble(&self) -> &'a str {
        self.preamble
    }

    /// The value of `prefix`, if present. Empty values are refused.
    pub fn value(
        &self,
        word: CommandWord,
        usage: &str,
        prefix: Prefix,
    ) -> InterpretResult<Option<&'a str>> {
        match self.values.get(&prefix) {
            None => Ok(None),
            Some(value) if value.is_empty() => Err(CommandError::usage(
                word,
                usage,
                &format!("The value after '{}' cannot be empty.", prefix.marker()),
            )),
            Some(value) => Ok(Some(value)),
        }
    }

    /// Returns true if no prefix was given at all.
    pub fn has_no_fields(&self) -> bool {
        self.values.is_empty()
    }
}

// --- SHARED TOKEN PARSERS ---

/// Parses a 1-based index. Bounds are checked later against the actual list.
pub fn parse_index(word: CommandWord, usage: &str, raw: &str) -> InterpretResult<ItemIndex> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(CommandError::usage(word, usage, "An index is required."));
    }
    parse_positive(token)
        .map(ItemIndex::new)
        .ok_or_else(|| CommandError::InvalidIndex(token.to_string()))
}

/// Parses a card count that must be at least 1.
pub fn parse_count(raw: &str) -> InterpretResult<NonZeroUsize> {
    let token = raw.trim();
    parse_positive(token).ok_or_else(|| CommandError::InvalidCount(token.to_string()))
}

/// A positive whole number, optionally signed with `+`. Values too large for `usize`
/// saturate to `usize::MAX`.
fn parse_positive(token: &str) -> Option<NonZeroUsize> {
    let digits = token.strip_prefix('+').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = match digits.parse::<usize>() {
        Ok(value) => value,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => usize::MAX,
        Err(_) => return None,
    };
    NonZeroUsize::new(value)
}

fn parse_tag_token(raw: &str) -> InterpretResult<Tag> {
    Tag::parse(raw).ok_or_else(|| CommandError::InvalidTag(raw.trim().to_string()))
}

fn looks_like_count(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
}

/// Refuses any trailing text for words that take no arguments.
pub fn expect_no_arguments(word: CommandWord, arguments: &str) -> InterpretResult<()> {
    let trailing = arguments.trim();
    if trailing.is_empty() {
        Ok(())
    } else {
        Err(CommandError::UnexpectedArgument {
            word,
            argument: trailing.to_string(),
        })
    }
}

// --- DECK COMMANDS ---

fn deck_name(word: CommandWord, usage: &str, raw: &str) -> InterpretResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CommandError::usage(word, usage, "The deck name cannot be empty."));
    }
    Ok(name.to_string())
}

/// `create <name>`
pub fn parse_create_deck(arguments: &str) -> InterpretResult<Command> {
    let name = deck_name(CommandWord::CreateDeck, usage::CREATE, arguments)?;
    Ok(Command::CreateDeck { name })
}

/// `remove <index>`
pub fn parse_remove_deck(arguments: &str) -> InterpretResult<Command> {
    let index = parse_index(CommandWord::RemoveDeck, usage::REMOVE, arguments)?;
    Ok(Command::RemoveDeck { index })
}

/// `rename <index> <name>`
pub fn parse_rename_deck(arguments: &str) -> InterpretResult<Command> {
    let word = CommandWord::RenameDeck;
    let trimmed = arguments.trim();
    let (index_token, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    let index = parse_index(word, usage::RENAME, index_token)?;
    let name = deck_name(word, usage::RENAME, rest)?;
    Ok(Command::RenameDeck { index, name })
}

/// `select <index>`
pub fn parse_select_deck(arguments: &str) -> InterpretResult<Command> {
    let index = parse_index(CommandWord::SelectDeck, usage::SELECT, arguments)?;
    Ok(Command::SelectDeck { index })
}

// --- CARD COMMANDS ---

/// `add q/<question> a/<answer> [t/<tag>]`
pub fn parse_add_card(arguments: &str) -> InterpretResult<Command> {
    let word = CommandWord::AddCard;
    let fields = PrefixedArgs::tokenize(word, usage::ADD, arguments)?;

    if !fields.preamble().is_empty() {
        return Err(CommandError::usage(
            word,
            usage::ADD,
            &format!("Unexpected text '{}' before the first field.", fields.preamble()),
        ));
    }

    let question = fields
        .value(word, usage::ADD, Prefix::Question)?
        .ok_or_else(|| CommandError::usage(word, usage::ADD, "A question (q/) is required."))?;
    let answer = fields
        .value(word, usage::ADD, Prefix::Answer)?
        .ok_or_else(|| CommandError::usage(word, usage::ADD, "An answer (a/) is required."))?;
    let tag = fields
        .value(word, usage::ADD, Prefix::Tag)?
        .map(parse_tag_token)
        .transpose()?
        .unwrap_or_default();

    Ok(Command::AddCard {
        card: Card::new(question, answer, tag),
    })
}

/// `edit <index> [q/<question>] [a/<answer>] [t/<tag>]`, at least one field.
pub fn parse_edit_card(arguments: &str) -> InterpretResult<Command> {
    let word = CommandWord::EditCard;
    let fields = PrefixedArgs::tokenize(word, usage::EDIT, arguments)?;
    let index = parse_index(word, usage::EDIT, fields.preamble())?;

    if fields.has_no_fields() {
        return Err(CommandError::usage(
            word,
            usage::EDIT,
            "At least one of q/, a/ or t/ must be given.",
        ));
    }

    let edit = CardEdit {
        question: fields
            .value(word, usage::EDIT, Prefix::Question)?
            .map(str::to_string),
        answer: fields
            .value(word, usage::EDIT, Prefix::Answer)?
            .map(str::to_string),
        tag: fields
            .value(word, usage::EDIT, Prefix::Tag)?
            .map(parse_tag_token)
            .transpose()?,
    };

    Ok(Command::EditCard { index, edit })
}

/// `delete <index>`
pub fn parse_delete_card(arguments: &str) -> InterpretResult<Command> {
    let index = parse_index(CommandWord::DeleteCard, usage::DELETE, arguments)?;
    Ok(Command::DeleteCard { index })
}

// --- REVIEW COMMANDS ---

/// `review [tags...] [count]`
///
/// Tokens that start with a digit or a sign are read as the count; all others must be
/// tag names. No tags means every tag.
pub fn parse_review(arguments: &str) -> InterpretResult<Command> {
    let mut filter = TagFilter::all();
    let mut limit = None;

    for token in arguments.split_whitespace() {
        if looks_like_count(token) {
            let count = parse_count(token)?;
            if limit.replace(count).is_some() {
                return Err(CommandError::usage(
                    CommandWord::Review,
                    usage::REVIEW,
                    "Only one card count may be given.",
                ));
            }
        } else {
            filter.insert(parse_tag_token(token)?);
        }
    }

    Ok(Command::Review { filter, limit })
}

/// `setnum <count>`
pub fn parse_set_cards_per_session(arguments: &str) -> InterpretResult<Command> {
    let count = parse_count(arguments)?;
    Ok(Command::SetCardsPerSession { count })
}

/// `tag <tag>` during a review.
pub fn parse_tag_card(arguments: &str) -> InterpretResult<Command> {
    let mut tokens = arguments.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => Ok(Command::TagCard {
            tag: parse_tag_token(token)?,
        }),
        _ => Err(CommandError::InvalidTag(arguments.trim().to_string())),
    }
}
