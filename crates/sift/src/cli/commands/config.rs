//! Implementation of `sift config`.

use std::process::ExitCode;

use sift_highlight::Highlighter;

use crate::cli::{context::CommandContext, output::use_color};

/// Shows the effective configuration as TOML.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let toml = match ctx.config.to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if use_color() {
        print!("{}", Highlighter::new().highlight_toml(&toml));
    } else {
        print!("{toml}");
    }
    ExitCode::SUCCESS
}
