//! Search-box query parsing for sift.
//!
//! This crate turns free-form search text into a [`Formula`]: an ordered list of
//! key-scoped and fulltext [`Literal`]s, each optionally negated.
//!
//! - **Fulltext**: `urgent` or `"exact phrase"` or `'exact phrase'`
//! - **Keys**: `status:open` - a recognized keyword followed by `:` and a value
//! - **Negation**: `-status:open` - only valid directly in front of a recognized keyword
//!
//! Values for the same key and operator are grouped into one literal, in the order they
//! appear. The reserved key `fulltext` is always recognized.
//!
//! # Example
//!
//! ```
//! use sift_query::{ParseOptions, parse};
//!
//! let options = ParseOptions::new().keyword("status");
//! let formula = parse("-status:open urgent", &options).unwrap();
//! assert_eq!(formula.to_string(), "-status: [open]\nfulltext: [urgent]\n");
//! ```

#![warn(missing_docs)]

mod builder;
mod error;
mod formula;
mod grammar;
mod lexer;
mod parser;

pub use builder::FormulaBuilder;
pub use error::{QueryError, QueryErrorKind};
pub use formula::{Formula, Literal, Operator};
pub use grammar::{FULLTEXT_KEY, Grammar, is_separator};
pub use lexer::{Token, TokenKind, Tokenizer, tokenize};
pub use parser::{ParseOptions, parse, parse_with};
