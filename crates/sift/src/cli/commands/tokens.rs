//! Implementation of `sift tokens`.

use std::process::ExitCode;

use sift_query::tokenize;

use crate::cli::{
    args::TokensCommand,
    context::CommandContext,
    output::{JsonTokens, dim, format_token_overlay, print_json, tokens_table, use_color},
};

/// Shows the tokens the tokenizer produces for a query.
pub fn run(ctx: &CommandContext, cmd: &TokensCommand) -> ExitCode {
    let grammar = match ctx.grammar(&cmd.keywords) {
        Ok(grammar) => grammar,
        Err(code) => return code,
    };

    let tokens = match tokenize(&cmd.query, &grammar) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(&JsonTokens {
            query: &cmd.query,
            tokens: &tokens,
        });
    }

    let color = use_color();
    if color {
        println!("{}", format_token_overlay(&cmd.query, &tokens, color));
        println!();
    }

    if tokens.is_empty() {
        println!("{}", dim("(no tokens)"));
    } else {
        println!("{}", tokens_table(&tokens));
    }

    ExitCode::SUCCESS
}
