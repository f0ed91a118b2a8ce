//! sift: search-box query parsing from the command line.
//!
//! Turns free-form search text such as `-status:open urgent "exact phrase"` into keyword-scoped
//! filters and fulltext terms. The keywords come from `.sift.toml` files discovered from the
//! working directory up, plus any given on the command line.

#![warn(missing_docs)]

mod cli;

use std::process::ExitCode;

use cli::{args::parse_cli, commands, context::CommandContext, logging::init_logging};

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(cli.log_level);

    let ctx = if cli.command.needs_config() {
        CommandContext::load()
    } else {
        CommandContext::load_cwd_only()
    };

    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
