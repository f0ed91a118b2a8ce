//! Keyword grammar and word-boundary classification.
//!
//! A [`Grammar`] is the normalized set of keys the tokenizer recognizes. It is built once
//! from caller-supplied keywords and can be shared by any number of parses.

use tracing::debug;

use crate::{
    error::{QueryError, QueryErrorKind},
    formula::Formula,
    parser::parse_with,
};

/// The reserved key for unstructured search terms. Always recognized.
pub const FULLTEXT_KEY: &str = "fulltext";

/// Punctuation that ends a word, in addition to whitespace.
const PUNCTUATION: [char; 9] = ['.', ',', '\'', '"', '+', '-', '!', '?', ':'];

/// Returns true if `ch` is a word separator (whitespace or separator punctuation).
pub fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || PUNCTUATION.contains(&ch)
}

/// Returns true if `ch` opens a quoted phrase.
pub fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

/// Returns true if a word may start at byte `position` of `input`.
///
/// That is the case at the start of input or directly after a separator.
pub fn at_word_start(input: &str, position: usize) -> bool {
    input[..position].chars().next_back().is_none_or(is_separator)
}

/// Returns the byte offset where the word starting at `start` ends.
pub fn word_end(input: &str, start: usize) -> usize {
    input[start..]
        .char_indices()
        .find(|&(_, ch)| is_separator(ch))
        .map_or(input.len(), |(offset, _)| start + offset)
}

/// The set of recognized keys, normalized from caller-supplied keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    /// Recognized keys in declaration order, `fulltext` appended if it was not declared.
    keys: Vec<String>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            keys: vec![FULLTEXT_KEY.to_string()],
        }
    }
}

impl Grammar {
    /// Builds a grammar from keywords.
    ///
    /// Works on a private copy: duplicates are dropped (first occurrence kept) and
    /// `fulltext` is added if absent. Keywords that could never match as a whole token
    /// (empty, or containing a separator character) are rejected.
    pub fn new<I, S>(keywords: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref();
            validate_keyword(keyword)?;
            if !keys.iter().any(|k| k == keyword) {
                keys.push(keyword.to_string());
            }
        }

        if !keys.iter().any(|k| k == FULLTEXT_KEY) {
            keys.push(FULLTEXT_KEY.to_string());
        }

        debug!(?keys, "built keyword grammar");
        Ok(Self { keys })
    }

    /// Returns the recognized keys, including `fulltext`.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Returns true if `word` is a recognized key.
    pub fn is_key(&self, word: &str) -> bool {
        self.keys.iter().any(|k| k == word)
    }

    /// Returns the key that occupies a whole word at `position`, if any.
    ///
    /// The key must start at a word boundary and be followed by a separator or the end
    /// of input, so `statusbar` never yields the key `status`.
    pub fn key_at<'i>(&self, input: &'i str, position: usize) -> Option<&'i str> {
        if position >= input.len() || !at_word_start(input, position) {
            return None;
        }
        let word = &input[position..word_end(input, position)];
        (!word.is_empty() && self.is_key(word)).then_some(word)
    }

    /// Parses `input` with this grammar.
    pub fn parse(&self, input: &str) -> Result<Formula, QueryError> {
        parse_with(input, self)
    }
}

/// Rejects keywords that can never be matched as a whole token.
fn validate_keyword(keyword: &str) -> Result<(), QueryError> {
    let reason = if keyword.is_empty() {
        Some("keyword is empty".to_string())
    } else {
        keyword
            .chars()
            .find(|&ch| is_separator(ch))
            .map(|ch| format!("contains separator {ch:?}"))
    };

    match reason {
        Some(reason) => Err(QueryError::new(
            QueryErrorKind::InvalidKeyword {
                keyword: keyword.to_string(),
                reason,
            },
            None,
        )),
        None => Ok(()),
    }
}
