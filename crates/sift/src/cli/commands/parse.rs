//! Implementation of `sift parse`.

use std::{
    io::{self, BufRead},
    process::ExitCode,
};

use serde::Serialize;
use sift_query::Grammar;
use tracing::debug;

use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{JsonParsedQuery, format_formula, print_json, subheader, use_color},
};

/// JSON output for `sift parse`.
#[derive(Serialize)]
struct JsonParseOutput<'a> {
    /// Parsed queries, in input order. Queries that failed to parse are omitted.
    queries: Vec<JsonParsedQuery<'a>>,
}

/// Parses each query and prints the grouped literals.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let grammar = match ctx.grammar(&cmd.keywords) {
        Ok(grammar) => grammar,
        Err(code) => return code,
    };

    let queries = if cmd.queries.is_empty() {
        match read_stdin_queries() {
            Ok(queries) => queries,
            Err(e) => {
                eprintln!("error: failed to read queries from stdin: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        cmd.queries.clone()
    };
    debug!(count = queries.len(), "parsing queries");

    if cmd.json {
        run_json(&grammar, &queries)
    } else {
        run_text(&grammar, &queries)
    }
}

/// Reads one query per stdin line, skipping blank lines.
fn read_stdin_queries() -> io::Result<Vec<String>> {
    let mut queries = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            queries.push(line);
        }
    }
    Ok(queries)
}

/// Prints each formula as text; a header names the query when there are several.
fn run_text(grammar: &Grammar, queries: &[String]) -> ExitCode {
    let color = use_color();
    let mut status = ExitCode::SUCCESS;

    for (i, query) in queries.iter().enumerate() {
        if queries.len() > 1 {
            if i > 0 {
                println!();
            }
            if color {
                println!("{}", subheader(query));
            } else {
                println!("{query}");
            }
        }
        match grammar.parse(query) {
            Ok(formula) => print!("{}", format_formula(&formula, color)),
            Err(e) => {
                eprintln!("error: {e}");
                status = ExitCode::FAILURE;
            }
        }
    }

    status
}

/// Prints all successfully parsed queries as one JSON document.
fn run_json(grammar: &Grammar, queries: &[String]) -> ExitCode {
    let mut parsed = Vec::with_capacity(queries.len());
    let mut failed = false;

    for query in queries {
        match grammar.parse(query) {
            Ok(formula) => parsed.push((query.as_str(), formula)),
            Err(e) => {
                eprintln!("error: {e}");
                failed = true;
            }
        }
    }

    let output = JsonParseOutput {
        queries: parsed
            .iter()
            .map(|(query, formula)| JsonParsedQuery {
                query: *query,
                literals: formula,
            })
            .collect(),
    };

    let status = print_json(&output);
    if failed { ExitCode::FAILURE } else { status }
}
