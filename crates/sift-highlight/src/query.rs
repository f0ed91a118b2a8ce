//! Styled rendering of parsed queries.

use sift_query::{Formula, Literal, Token, TokenKind};

use crate::colors::{BOLD, CYAN, DIM, GREEN, MAGENTA, RED, RESET};

/// Returns the ANSI prefix for a token whose source text is `text`.
///
/// Quoted phrases are magenta whether they are values or fulltext.
fn token_style(kind: TokenKind, text: &str) -> &'static str {
    let quoted = text.starts_with(['"', '\'']);
    match kind {
        TokenKind::Operator => RED,
        TokenKind::Key => CYAN,
        TokenKind::Value | TokenKind::Fulltext if quoted => MAGENTA,
        TokenKind::Value => GREEN,
        TokenKind::Fulltext => "",
    }
}

/// Renders a formula like its `Display` output, with negation, keys, and values styled.
pub fn style_formula(formula: &Formula) -> String {
    formula.iter().map(style_literal).collect()
}

/// Renders one literal line.
fn style_literal(literal: &Literal) -> String {
    let operator = literal
        .operator
        .map(|op| format!("{RED}{op}{RESET}"))
        .unwrap_or_default();
    let values = literal
        .values
        .iter()
        .map(|v| format!("{GREEN}{v}{RESET}"))
        .collect::<Vec<_>>()
        .join(&format!("{DIM},{RESET}"));
    format!(
        "{operator}{BOLD}{CYAN}{}{RESET}: {DIM}[{RESET}{values}{DIM}]{RESET}\n",
        literal.key
    )
}

/// Re-renders `input` with each token's span colored by its kind.
///
/// Text no token covers (separators, `:` and skipped punctuation) is dimmed. `tokens` must
/// come from tokenizing `input`.
pub fn style_tokens(input: &str, tokens: &[Token]) -> String {
    let mut output = String::with_capacity(input.len() * 2);
    let mut cursor = 0;

    for token in tokens {
        let span = token.span.clone();
        if span.start > cursor {
            output.push_str(&format!("{DIM}{}{RESET}", &input[cursor..span.start]));
        }
        let source = &input[span.clone()];
        let style = token_style(token.kind, source);
        output.push_str(&format!("{style}{source}{RESET}"));
        cursor = span.end;
    }

    if cursor < input.len() {
        output.push_str(&format!("{DIM}{}{RESET}", &input[cursor..]));
    }
    output
}

#[cfg(test)]
mod tests {
    use sift_query::{Grammar, ParseOptions, parse, tokenize};

    use super::*;

    /// Removes ANSI escape sequences.
    fn strip(styled: &str) -> String {
        let mut out = String::new();
        let mut chars = styled.chars();
        while let Some(ch) = chars.next() {
            if ch == '\x1b' {
                chars.by_ref().find(|&c| c == 'm');
            } else {
                out.push(ch);
            }
        }
        out
    }

    #[test]
    fn styled_formula_matches_display() {
        let formula = parse(
            "-status:open urgent tag:a tag:b",
            &ParseOptions::new().keywords(["status", "tag"]),
        )
        .unwrap();
        let styled = style_formula(&formula);

        assert!(styled.starts_with(RED));
        assert_eq!(strip(&styled), formula.to_string());
    }

    #[test]
    fn styled_empty_formula() {
        let formula = parse("", &ParseOptions::new()).unwrap();
        assert_eq!(style_formula(&formula), "");
    }

    #[test]
    fn styled_tokens_preserve_input() {
        let grammar = Grammar::new(["status"]).unwrap();
        let input = "-status:'in review', later!";
        let tokens = tokenize(input, &grammar).unwrap();
        let styled = style_tokens(input, &tokens);

        assert_eq!(strip(&styled), input);
        assert!(styled.contains(&format!("{CYAN}status{RESET}")));
        assert!(styled.contains(&format!("{MAGENTA}'in review'{RESET}")));
        assert!(styled.contains(&format!("{DIM}:{RESET}")));
    }

    #[test]
    fn quoted_phrases_are_magenta() {
        let grammar = Grammar::new(["status"]).unwrap();
        let input = "status:open \"exact phrase\" later";
        let tokens = tokenize(input, &grammar).unwrap();
        let styled = style_tokens(input, &tokens);

        assert!(styled.contains(&format!("{GREEN}open{RESET}")));
        assert!(styled.contains(&format!("{MAGENTA}\"exact phrase\"{RESET}")));
        assert!(!styled.contains(&format!("{MAGENTA}later")));
        assert_eq!(strip(&styled), input);
    }
}
