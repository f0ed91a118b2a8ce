//! Formula builder.
//!
//! Folds tokens into a [`Formula`] one at a time:
//!
//! | Token    | Action                                              |
//! |----------|-----------------------------------------------------|
//! | Operator | remember the pending operator                       |
//! | Key      | remember the pending key                            |
//! | Value    | append to the pending key/operator group, reset     |
//! | Fulltext | append to the plain `fulltext` group                |

use crate::{
    error::{QueryError, QueryErrorKind},
    formula::{Formula, Literal, Operator},
    grammar::FULLTEXT_KEY,
    lexer::{Token, TokenKind},
};

/// Operator and key seen since the last completed pair.
#[derive(Debug, Default)]
struct Pending {
    /// Operator waiting for its key and value.
    operator: Option<Operator>,
    /// Key waiting for its value.
    key: Option<String>,
}

/// Builds a [`Formula`] incrementally from a token stream.
#[derive(Debug, Default)]
pub struct FormulaBuilder {
    /// Literals built so far, one per `(key, operator)` group.
    literals: Vec<Literal>,
    /// Transient state bridging consecutive tokens.
    pending: Pending,
}

impl FormulaBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one token.
    ///
    /// Fails only if a value arrives with no pending key, which the tokenizer never
    /// produces.
    pub fn push(&mut self, token: Token) -> Result<(), QueryError> {
        match token.kind {
            TokenKind::Operator => {
                self.pending.operator = Operator::from_symbol(&token.text);
            }
            TokenKind::Key => self.pending.key = Some(token.text),
            TokenKind::Value => {
                let Some(key) = self.pending.key.take() else {
                    return Err(QueryError::new(
                        QueryErrorKind::UnpairedValue,
                        Some(token.span.start),
                    ));
                };
                let operator = self.pending.operator.take();
                self.append(key, operator, token.text);
            }
            TokenKind::Fulltext => self.append(FULLTEXT_KEY.to_string(), None, token.text),
        }
        Ok(())
    }

    /// Adds a value to its `(key, operator)` group, creating the group if needed.
    fn append(&mut self, key: String, operator: Option<Operator>, value: String) {
        match self
            .literals
            .iter_mut()
            .find(|literal| literal.is_group(&key, operator))
        {
            Some(literal) => literal.values.push(value),
            None => self.literals.push(Literal::new(key, operator, value)),
        }
    }

    /// Finishes building and returns the formula.
    pub fn finish(self) -> Formula {
        Formula::from_grouped(self.literals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, 0..text.len())
    }

    fn build(tokens: &[(TokenKind, &str)]) -> Result<Formula, QueryError> {
        let mut builder = FormulaBuilder::new();
        for &(kind, text) in tokens {
            builder.push(token(kind, text))?;
        }
        Ok(builder.finish())
    }

    #[test]
    fn empty_builder() {
        assert!(FormulaBuilder::new().finish().is_empty());
    }

    #[test]
    fn key_value_pair() {
        let formula = build(&[(TokenKind::Key, "status"), (TokenKind::Value, "open")]).unwrap();
        assert_eq!(formula.literals(), [Literal::new("status", None, "open")]);
    }

    #[test]
    fn operator_applies_to_next_pair_only() {
        let formula = build(&[
            (TokenKind::Operator, "-"),
            (TokenKind::Key, "status"),
            (TokenKind::Value, "open"),
            (TokenKind::Key, "status"),
            (TokenKind::Value, "closed"),
        ])
        .unwrap();
        assert_eq!(
            formula.literals(),
            [
                Literal::new("status", Some(Operator::Negate), "open"),
                Literal::new("status", None, "closed"),
            ]
        );
    }

    #[test]
    fn groups_values_by_key_and_operator() {
        let formula = build(&[
            (TokenKind::Key, "tag"),
            (TokenKind::Value, "a"),
            (TokenKind::Fulltext, "x"),
            (TokenKind::Key, "tag"),
            (TokenKind::Value, "b"),
            (TokenKind::Fulltext, "x"),
        ])
        .unwrap();
        assert_eq!(formula.len(), 2);
        assert_eq!(formula.literals()[0].values, ["a", "b"]);
        assert_eq!(formula.literals()[1].values, ["x", "x"]);
    }

    #[test]
    fn fulltext_key_value_joins_fulltext_group() {
        let formula = build(&[
            (TokenKind::Fulltext, "rust"),
            (TokenKind::Key, "fulltext"),
            (TokenKind::Value, "async"),
        ])
        .unwrap();
        assert_eq!(formula.to_string(), "fulltext: [rust,async]\n");
    }

    #[test]
    fn value_without_key_is_an_error() {
        let err = build(&[(TokenKind::Value, "orphan")]).unwrap_err();
        assert_eq!(err.kind, QueryErrorKind::UnpairedValue);
    }

    #[test]
    fn pending_state_cleared_after_pair() {
        let err = build(&[
            (TokenKind::Key, "status"),
            (TokenKind::Value, "open"),
            (TokenKind::Value, "again"),
        ])
        .unwrap_err();
        assert_eq!(err.kind, QueryErrorKind::UnpairedValue);
    }
}
