//! Clap argument definitions for the `sift` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift", version)]
#[command(about = "Parse search-box queries into keyword filters and fulltext terms")]
pub struct Cli {
    /// Log verbosity for diagnostics on stderr [default: warn, or $SIFT_LOG]
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Diagnostic log levels, from most to least verbose.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Every token the tokenizer emits.
    Trace,
    /// Grammar construction, config discovery, and parse summaries.
    Debug,
    /// Informational messages.
    Info,
    /// Potential problems only.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Converts to a tracing filter directive.
    pub fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Keywords supplied on the command line, in addition to configured ones.
#[derive(Args, Debug, Clone, Default)]
pub struct KeywordArgs {
    /// Recognize KEY as a keyword (can be specified multiple times)
    #[arg(short = 'k', long = "keyword", value_name = "KEY")]
    pub keywords: Vec<String>,

    /// Ignore keywords from .sift.toml files
    #[arg(long)]
    pub no_config: bool,
}

/// Arguments for `sift parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Queries to parse; reads one query per line from stdin when omitted
    pub queries: Vec<String>,

    #[command(flatten)]
    /// Keyword selection.
    pub keywords: KeywordArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sift tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    /// Query to tokenize
    pub query: String,

    #[command(flatten)]
    /// Keyword selection.
    pub keywords: KeywordArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse queries and print the grouped result
    #[command(after_help = "\
QUERY SYNTAX:
  word              Fulltext term
  \"a phrase\"        Quoted fulltext term (single or double quotes)
  key:value         Value for a configured keyword
  key:'a phrase'    Quoted value for a keyword
  -key:value        Negated keyword value
  -fulltext:word    Negated fulltext term

  Keys must be declared in .sift.toml or with -k. Values follow the colon
  directly: 'status: open' is an error. Put queries that start with '-'
  after '--'.

EXAMPLES:
  sift parse -k status -- '-status:open urgent'
  sift parse --json -k tag 'tag:bug tag:\"needs review\"'
  echo 'status:open' | sift parse -k status")]
    Parse(ParseCommand),

    /// Show the token stream for a query
    Tokens(TokensCommand),

    /// Initialize sift configuration in current directory
    Init(InitCommand),

    /// Show configuration files, keywords, and validation warnings
    Status,

    /// Show effective configuration
    Config,
}

impl Commands {
    /// Returns true if the command reads the merged configuration.
    ///
    /// `init` must work even when an existing config file is invalid.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}

/// Parses CLI arguments, exiting with usage on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_collects_repeated_keywords() {
        let cli = Cli::try_parse_from(["sift", "parse", "-k", "status", "--keyword", "tag", "q"])
            .unwrap();
        let Commands::Parse(cmd) = cli.command else {
            panic!("expected parse command");
        };
        assert_eq!(cmd.keywords.keywords, ["status", "tag"]);
        assert_eq!(cmd.queries, ["q"]);
        assert!(!cmd.json);
    }

    #[test]
    fn log_level_is_global() {
        let cli = Cli::try_parse_from(["sift", "status", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(LogLevel::Debug.as_filter_str(), "debug");
    }

    #[test]
    fn init_skips_config_loading() {
        let cli = Cli::try_parse_from(["sift", "init", "--force"]).unwrap();
        assert!(!cli.command.needs_config());
        let cli = Cli::try_parse_from(["sift", "config"]).unwrap();
        assert!(cli.command.needs_config());
    }

    #[test]
    fn tokens_requires_query() {
        assert!(Cli::try_parse_from(["sift", "tokens"]).is_err());
    }
}
