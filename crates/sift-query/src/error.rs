//! Error types for query tokenizing and formula building.

use std::{error::Error, fmt};

use thiserror::Error;

/// The specific kind of query error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryErrorKind {
    /// An opening quote has no matching closing quote before the end of input.
    #[error("unterminated quoted phrase (missing closing {quote})")]
    UnterminatedPhrase {
        /// The quote character that opened the phrase.
        quote: char,
    },

    /// A key was not followed by `:` separators and a value.
    #[error("expected ':' and a value after key '{key}'")]
    ExpectedValue {
        /// The key that is missing its value.
        key: String,
    },

    /// Input that no scanning rule accepts.
    #[error("unexpected input {found:?}")]
    UnexpectedInput {
        /// The character at the failing position.
        found: char,
    },

    /// A configured keyword can never match as a whole token.
    #[error("invalid keyword {keyword:?}: {reason}")]
    InvalidKeyword {
        /// The rejected keyword.
        keyword: String,
        /// Why the keyword was rejected.
        reason: String,
    },

    /// The builder received a value while no key was pending.
    #[error("value without a preceding key")]
    UnpairedValue,
}

/// A query error with the position and input it refers to.
///
/// Parse failures are fatal: no partial formula is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// The kind of error that occurred.
    pub kind: QueryErrorKind,
    /// Byte position in the query where the error occurred (if known).
    pub position: Option<usize>,
    /// The original query string (if available).
    pub query: Option<String>,
}

impl QueryError {
    /// Creates an error without query context.
    pub fn new(kind: QueryErrorKind, position: Option<usize>) -> Self {
        Self {
            kind,
            position,
            query: None,
        }
    }

    /// Creates an error at a byte position in the given query.
    pub fn at(kind: QueryErrorKind, position: usize, query: &str) -> Self {
        Self {
            kind,
            position: Some(position),
            query: Some(query.to_string()),
        }
    }

    /// Sets the query string for this error.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns the error message without context.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match &self.kind {
            QueryErrorKind::UnterminatedPhrase { quote: '"' } => {
                Some("Add a closing quote (\") to complete the phrase")
            }
            QueryErrorKind::UnterminatedPhrase { .. } => {
                Some("Add a closing quote (') to complete the phrase, or drop the apostrophe")
            }
            QueryErrorKind::ExpectedValue { .. } => {
                Some("Write the value right after the colon, e.g. 'status:open' or 'status:\"in review\"'")
            }
            QueryErrorKind::InvalidKeyword { .. } => Some(
                "Keywords must be non-empty and cannot contain whitespace or any of . , ' \" + - ! ? :",
            ),
            QueryErrorKind::UnexpectedInput { .. } | QueryErrorKind::UnpairedValue => None,
        }
    }

    /// Display column of the error position, counted in characters.
    fn column(&self, query: &str) -> Option<usize> {
        let position = self.position?.min(query.len());
        let prefix = query.get(..position).unwrap_or(query);
        Some(prefix.chars().count())
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match &self.kind {
            QueryErrorKind::InvalidKeyword { .. } => "query configuration error",
            QueryErrorKind::UnpairedValue => "internal query error",
            _ => "query syntax error",
        };

        writeln!(f, "{}: {}", prefix, self.kind)?;

        if let Some(query) = &self.query {
            writeln!(f, "  {query}")?;
            if let Some(column) = self.column(query) {
                writeln!(f, "  {}^", " ".repeat(column))?;
            }
        }

        if let Some(suggestion) = self.suggestion() {
            write!(f, "hint: {suggestion}")?;
        }

        Ok(())
    }
}

impl Error for QueryError {}
