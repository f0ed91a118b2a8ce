//! Query lexer (tokenizer).
//!
//! Scans search text with a two-state machine:
//!
//! ```text
//! Scanning  whitespace        -> skip
//!           "-" before a key  -> Operator
//!           key               -> Key, enter Pairing
//!           'phrase' "phrase" -> Fulltext
//!           bare word         -> Fulltext
//!           punctuation       -> skip
//! Pairing   ":"               -> skip
//!           'phrase' "phrase" -> Value, back to Scanning
//!           bare word         -> Value, back to Scanning
//! ```
//!
//! Pairing has no whitespace rule: `status: open` is an error, not a pair.

use std::{fmt, iter::FusedIterator, ops::Range};

use serde::Serialize;
use tracing::trace;

use crate::{
    error::{QueryError, QueryErrorKind},
    grammar::{Grammar, at_word_start, is_quote, is_separator, word_end},
};

/// The negation marker.
const NEGATION: char = '-';

/// Separates a key from its value.
const KEY_VALUE_SEPARATOR: char = ':';

/// The classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Negation marker directly in front of a key.
    Operator,
    /// A recognized key name.
    Key,
    /// The value paired with the preceding key.
    Value,
    /// An unstructured search term.
    Fulltext,
}

impl TokenKind {
    /// Returns the lowercase name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Key => "key",
            Self::Value => "value",
            Self::Fulltext => "fulltext",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified unit of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// The matched text, with quote delimiters stripped from phrases.
    pub text: String,
    /// Byte range of the whole match in the input, quotes included.
    pub span: Range<usize>,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState<'a> {
    /// Looking for operators, keys and fulltext terms.
    Scanning,
    /// A key was just matched; expecting separators and then its value.
    Pairing {
        /// The key awaiting a value.
        key: &'a str,
    },
}

/// The outcome of one scanning step.
enum Step {
    /// A token was matched.
    Emit(Token),
    /// Input was consumed without producing a token.
    Skip,
    /// The input is exhausted.
    End,
}

/// Tokenizes search text lazily, one token per call to `next`.
///
/// Yields `Err` at most once; after an error or the end of input it yields nothing.
pub struct Tokenizer<'a> {
    /// The original input string.
    input: &'a str,
    /// Recognized keys.
    grammar: &'a Grammar,
    /// Current byte position in input.
    position: usize,
    /// Current scanner state.
    state: LexState<'a>,
    /// Set once the end of input or an error has been reported.
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over `input` using the keys recognized by `grammar`.
    pub fn new(input: &'a str, grammar: &'a Grammar) -> Self {
        Self {
            input,
            grammar,
            position: 0,
            state: LexState::Scanning,
            finished: false,
        }
    }

    /// Creates an error at a specific position.
    fn error_at(&self, kind: QueryErrorKind, position: usize) -> QueryError {
        QueryError::at(kind, position, self.input)
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Result<Option<Token>, QueryError> {
        loop {
            let state = self.state;
            let step = match state {
                LexState::Scanning => self.scan()?,
                LexState::Pairing { key } => self.pair(key)?,
            };
            match step {
                Step::Emit(token) => return Ok(Some(token)),
                Step::Skip => {}
                Step::End => return Ok(None),
            }
        }
    }

    /// Applies the Scanning rules at the current position.
    fn scan(&mut self) -> Result<Step, QueryError> {
        let Some(ch) = self.peek() else {
            return Ok(Step::End);
        };
        let start = self.position;

        if ch.is_whitespace() {
            self.skip_while(char::is_whitespace);
            return Ok(Step::Skip);
        }

        if self.is_operator_at(start) {
            self.position += NEGATION.len_utf8();
            return Ok(Step::Emit(Token::new(
                TokenKind::Operator,
                NEGATION,
                start..self.position,
            )));
        }

        if let Some(key) = self.grammar.key_at(self.input, start) {
            self.position += key.len();
            self.state = LexState::Pairing { key };
            return Ok(Step::Emit(Token::new(
                TokenKind::Key,
                key,
                start..self.position,
            )));
        }

        if let Some(text) = self.read_phrase_or_word()? {
            return Ok(Step::Emit(Token::new(
                TokenKind::Fulltext,
                text,
                start..self.position,
            )));
        }

        if is_separator(ch) {
            self.skip_punctuation();
            return Ok(Step::Skip);
        }

        Err(self.error_at(QueryErrorKind::UnexpectedInput { found: ch }, start))
    }

    /// Applies the Pairing rules at the current position.
    fn pair(&mut self, key: &'a str) -> Result<Step, QueryError> {
        let start = self.position;
        let input = self.input;
        let expected_value = || {
            QueryError::at(
                QueryErrorKind::ExpectedValue {
                    key: key.to_string(),
                },
                start,
                input,
            )
        };

        match self.peek() {
            None => Err(expected_value()),
            Some(KEY_VALUE_SEPARATOR) => {
                self.advance();
                Ok(Step::Skip)
            }
            Some(_) => match self.read_phrase_or_word()? {
                Some(text) => {
                    self.state = LexState::Scanning;
                    Ok(Step::Emit(Token::new(
                        TokenKind::Value,
                        text,
                        start..self.position,
                    )))
                }
                None => Err(expected_value()),
            },
        }
    }

    /// Returns true if a negation operator starts at `position`.
    ///
    /// The `-` must be immediately followed by a recognized key; the key itself is not
    /// consumed.
    fn is_operator_at(&self, position: usize) -> bool {
        self.input[position..].starts_with(NEGATION)
            && self
                .grammar
                .key_at(self.input, position + NEGATION.len_utf8())
                .is_some()
    }

    /// Reads a quoted phrase or a bare word, if one starts here.
    fn read_phrase_or_word(&mut self) -> Result<Option<&'a str>, QueryError> {
        match self.peek() {
            Some(quote) if is_quote(quote) => self.read_phrase(quote).map(Some),
            _ => Ok(self.read_word()),
        }
    }

    /// Reads a quoted phrase, returning its content without the quotes.
    fn read_phrase(&mut self, quote: char) -> Result<&'a str, QueryError> {
        let input = self.input;
        let start = self.position;
        let content_start = start + quote.len_utf8();

        let Some(length) = input[content_start..].find(quote) else {
            return Err(self.error_at(QueryErrorKind::UnterminatedPhrase { quote }, start));
        };

        let content_end = content_start + length;
        self.position = content_end + quote.len_utf8();
        Ok(&input[content_start..content_end])
    }

    /// Reads a bare word: the maximal run of non-separators after a word boundary.
    fn read_word(&mut self) -> Option<&'a str> {
        let input = self.input;
        let start = self.position;
        if !at_word_start(input, start) {
            return None;
        }
        let end = word_end(input, start);
        if end == start {
            return None;
        }
        self.position = end;
        Some(&input[start..end])
    }

    /// Skips a run of separator punctuation.
    ///
    /// Stops at whitespace, at quotes (which must open a phrase), and before a `-` that
    /// negates a key.
    fn skip_punctuation(&mut self) {
        self.advance();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace()
                || is_quote(ch)
                || !is_separator(ch)
                || self.is_operator_at(self.position)
            {
                break;
            }
            self.advance();
        }
    }

    /// Skips characters while `predicate` holds.
    fn skip_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.advance();
        }
    }

    /// Returns the character at the current position.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Advances past the current character.
    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.position += ch.len_utf8();
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_token() {
            Ok(Some(token)) => {
                trace!(kind = %token.kind, text = %token.text, span = ?token.span, "token");
                Some(Ok(token))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Convenience function to tokenize a whole query string.
pub fn tokenize(input: &str, grammar: &Grammar) -> Result<Vec<Token>, QueryError> {
    Tokenizer::new(input, grammar).collect()
}
