//! Parsed query formulas.
//!
//! A [`Formula`] is the result of parsing: literals grouped by key and operator, in the
//! order each group was first seen.

use std::{fmt, slice};

use serde::Serialize;

use crate::grammar::FULLTEXT_KEY;

/// An operator applied to a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    /// Results must NOT match the literal (`-key:value`).
    #[serde(rename = "-")]
    Negate,
}

impl Operator {
    /// Returns the operator's symbol as written in queries.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
        }
    }

    /// Parses an operator from its symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(Self::Negate),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One grouped entry: a key, an optional operator, and every value given for that pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Literal {
    /// Key name (`fulltext` for unstructured terms).
    pub key: String,
    /// Operator, present only when negation was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    /// Values in input order. Duplicates are kept.
    pub values: Vec<String>,
}

impl Literal {
    /// Creates a literal holding a single value.
    pub fn new(
        key: impl Into<String>,
        operator: Option<Operator>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            operator,
            values: vec![value.into()],
        }
    }

    /// Returns true if this literal belongs to the `(key, operator)` group.
    pub fn is_group(&self, key: &str, operator: Option<Operator>) -> bool {
        self.key == key && self.operator == operator
    }

    /// Returns true if this literal is negated.
    pub fn is_negated(&self) -> bool {
        self.operator == Some(Operator::Negate)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(op) = self.operator {
            write!(f, "{op}")?;
        }
        write!(f, "{}: [{}]", self.key, self.values.join(","))
    }
}

/// A parsed query: literals in first-seen group order.
///
/// Holds at most one literal per `(key, operator)` pair. Displays one literal per line
/// as `op?key: [v1,v2,...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Formula {
    /// Grouped literals.
    literals: Vec<Literal>,
}

impl Formula {
    /// Wraps literals that already satisfy the grouping invariant.
    pub(crate) fn from_grouped(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    /// Returns the literals in encounter order.
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Iterates over the literals in encounter order.
    pub fn iter(&self) -> slice::Iter<'_, Literal> {
        self.literals.iter()
    }

    /// Returns the number of literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns true if the query produced no literals.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Returns the literal for a `(key, operator)` group.
    pub fn get(&self, key: &str, operator: Option<Operator>) -> Option<&Literal> {
        self.literals.iter().find(|l| l.is_group(key, operator))
    }

    /// Returns the plain (non-negated) fulltext terms.
    pub fn fulltext(&self) -> &[String] {
        self.get(FULLTEXT_KEY, None)
            .map(|literal| literal.values.as_slice())
            .unwrap_or_default()
    }

    /// Consumes the formula, returning its literals.
    pub fn into_literals(self) -> Vec<Literal> {
        self.literals
    }
}

impl<'a> IntoIterator for &'a Formula {
    type Item = &'a Literal;
    type IntoIter = slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for literal in &self.literals {
            writeln!(f, "{literal}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Formula {
        Formula::from_grouped(vec![
            Literal {
                key: "status".into(),
                operator: Some(Operator::Negate),
                values: vec!["open".into(), "blocked".into()],
            },
            Literal::new("fulltext", None, "urgent"),
        ])
    }

    #[test]
    fn literal_display() {
        let literal = Literal::new("status", None, "open");
        assert_eq!(literal.to_string(), "status: [open]");
    }

    #[test]
    fn negated_literal_display() {
        let formula = sample();
        assert_eq!(formula.literals()[0].to_string(), "-status: [open,blocked]");
    }

    #[test]
    fn formula_display_one_line_per_literal() {
        assert_eq!(
            sample().to_string(),
            "-status: [open,blocked]\nfulltext: [urgent]\n"
        );
    }

    #[test]
    fn empty_formula_display() {
        assert_eq!(Formula::default().to_string(), "");
        assert!(Formula::default().is_empty());
    }

    #[test]
    fn negation_flag() {
        let formula = sample();
        assert!(formula.literals()[0].is_negated());
        assert!(!formula.literals()[1].is_negated());
    }

    #[test]
    fn into_literals_keeps_order() {
        let literals = sample().into_literals();
        assert_eq!(literals.len(), 2);
        assert_eq!(literals[0].key, "status");
        assert_eq!(literals[0].values, ["open", "blocked"]);
        assert_eq!(literals[1].key, "fulltext");
    }

    #[test]
    fn get_distinguishes_operators() {
        let formula = sample();
        assert!(formula.get("status", Some(Operator::Negate)).is_some());
        assert!(formula.get("status", None).is_none());
        assert_eq!(formula.fulltext(), ["urgent"]);
    }

    #[test]
    fn fulltext_empty_when_absent() {
        assert!(Formula::default().fulltext().is_empty());
    }

    #[test]
    fn operator_symbols() {
        assert_eq!(Operator::Negate.to_string(), "-");
        assert_eq!(Operator::from_symbol("-"), Some(Operator::Negate));
        assert_eq!(Operator::from_symbol("!"), None);
    }

    #[test]
    fn serializes_as_list_of_literals() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"key": "status", "operator": "-", "values": ["open", "blocked"]},
                {"key": "fulltext", "values": ["urgent"]}
            ])
        );
    }
}
