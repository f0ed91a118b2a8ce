//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
pub use sift_highlight::{dim, subheader, warning};
use sift_highlight::{style_formula, style_tokens};
use sift_query::{Formula, Token};

/// JSON output for one parsed query.
#[derive(Serialize)]
pub struct JsonParsedQuery<'a> {
    /// The original query string.
    pub query: &'a str,
    /// Grouped literals, in first-seen order.
    pub literals: &'a Formula,
}

/// JSON output for `sift tokens`.
#[derive(Serialize)]
pub struct JsonTokens<'a> {
    /// The original query string.
    pub query: &'a str,
    /// Tokens in input order.
    pub tokens: &'a [Token],
}

/// Returns true if stdout is a terminal and output may carry ANSI styling.
pub fn use_color() -> bool {
    io::stdout().is_terminal()
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Renders a formula in the `op?key: [v1,v2]` line format.
pub fn format_formula(formula: &Formula, color: bool) -> String {
    if color {
        style_formula(formula)
    } else {
        formula.to_string()
    }
}

/// Builds a table of tokens: kind, byte span, and text.
pub fn tokens_table(tokens: &[Token]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Kind", "Span", "Text"]);
    for token in tokens {
        table.add_row(vec![
            Cell::new(token.kind),
            Cell::new(format!("{}..{}", token.span.start, token.span.end)),
            Cell::new(&token.text),
        ]);
    }
    table
}

/// Renders the query with each token colored, or unchanged without color.
pub fn format_token_overlay(query: &str, tokens: &[Token], color: bool) -> String {
    if color {
        style_tokens(query, tokens)
    } else {
        query.to_string()
    }
}

#[cfg(test)]
mod tests {
    use sift_query::{Grammar, ParseOptions, parse, tokenize};

    use super::*;

    #[test]
    fn plain_formula_is_display() {
        let formula = parse("-status:open x", &ParseOptions::new().keyword("status")).unwrap();
        assert_eq!(
            format_formula(&formula, false),
            "-status: [open]\nfulltext: [x]\n"
        );
    }

    #[test]
    fn token_table_lists_every_token() {
        let grammar = Grammar::new(["tag"]).unwrap();
        let tokens = tokenize("tag:'a b' rust", &grammar).unwrap();
        let rendered = tokens_table(&tokens).to_string();

        assert!(rendered.contains("key"));
        assert!(rendered.contains("4..9"));
        assert!(rendered.contains("a b"));
        assert!(rendered.contains("fulltext"));
    }

    #[test]
    fn json_shape() {
        let formula = parse("tag:a tag:b", &ParseOptions::new().keyword("tag")).unwrap();
        let json = serde_json::to_value(JsonParsedQuery {
            query: "tag:a tag:b",
            literals: &formula,
        })
        .unwrap();
        assert_eq!(json["query"], "tag:a tag:b");
        assert_eq!(json["literals"][0]["key"], "tag");
        assert_eq!(json["literals"][0]["values"][1], "b");
    }
}
