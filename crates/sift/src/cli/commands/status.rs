//! Implementation of `sift status`.

use std::{path::Path, process::ExitCode};

use sift_config::Config;
use sift_query::FULLTEXT_KEY;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, effective keywords, and validation warnings.
///
/// Exits with failure when the configuration has warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    if config.files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("sift init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config.files {
        println!("   {}", display_path(path, &ctx.cwd));
    }
    println!();

    print_keywords(config, &ctx.cwd);

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    let mut hints: Vec<&str> = Vec::new();
    for hint in warnings.iter().filter_map(|w| w.hint()) {
        if !hints.contains(&hint) {
            hints.push(hint);
        }
    }
    for hint in hints {
        println!("{}", dim(&format!("Hint: {hint}")));
    }

    ExitCode::FAILURE
}

/// Prints each effective keyword with the file that first declared it.
fn print_keywords(config: &Config, cwd: &Path) {
    println!("{}", subheader("Keywords:"));
    let names = config.keyword_names();
    if names.is_empty() {
        println!("   {}", dim("(none defined)"));
    }
    for name in names {
        let Some(first) = config.keywords.iter().find(|k| k.name == name) else {
            continue;
        };
        let scope = if first.is_global { "global" } else { "local" };
        println!(
            "   {name} {} {}",
            dim(&format!("({scope})")),
            dim(&format!("<- {}", display_path(&first.source, cwd)))
        );
    }
    println!("   {} {}", FULLTEXT_KEY, dim("(always)"));
    println!();
}

/// Shows `path` relative to `cwd` when it lies below it.
fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .map_or_else(|_| path.display().to_string(), |rel| rel.display().to_string())
}
