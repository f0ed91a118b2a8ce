//! Query parsing entry points.
//!
//! Drives the tokenizer and feeds each token straight into a [`FormulaBuilder`], so the
//! token stream is never collected.

use tracing::debug;

use crate::{
    builder::FormulaBuilder,
    error::QueryError,
    formula::Formula,
    grammar::Grammar,
    lexer::Tokenizer,
};

/// Options for [`parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Key names to recognize, in order. `fulltext` is always recognized as well.
    pub keywords: Vec<String>,
}

impl ParseOptions {
    /// Creates options with no keywords.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a keyword.
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Adds several keywords.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Builds the grammar these options describe.
    pub fn grammar(&self) -> Result<Grammar, QueryError> {
        Grammar::new(&self.keywords)
    }
}

/// Parses search text into a formula.
///
/// Fails on the first grammar violation; no partial formula is returned.
pub fn parse(input: &str, options: &ParseOptions) -> Result<Formula, QueryError> {
    let grammar = options.grammar()?;
    parse_with(input, &grammar)
}

/// Parses search text with a prebuilt grammar.
pub fn parse_with(input: &str, grammar: &Grammar) -> Result<Formula, QueryError> {
    let mut builder = FormulaBuilder::new();

    for token in Tokenizer::new(input, grammar) {
        builder
            .push(token?)
            .map_err(|err| err.with_query(input))?;
    }

    let formula = builder.finish();
    debug!(literals = formula.len(), "parsed query");
    Ok(formula)
}
