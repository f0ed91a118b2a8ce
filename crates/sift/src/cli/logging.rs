//! Diagnostic logging for the CLI.
//!
//! Logs go to stderr so they never mix with parse output on stdout.

use std::{env, io};

use tracing::{debug, subscriber::set_global_default};
use tracing_subscriber::EnvFilter;

use super::args::LogLevel;

/// Environment variable holding a tracing filter directive, e.g. `sift_query=trace`.
pub const LOG_ENV: &str = "SIFT_LOG";

/// Filter used when neither the flag nor the environment selects one.
const DEFAULT_FILTER: &str = "warn";

/// Builds the filter: `--log-level`, then `$SIFT_LOG`, then `warn`.
fn build_filter(level: Option<LogLevel>, env_directive: Option<&str>) -> EnvFilter {
    if let Some(level) = level {
        return EnvFilter::new(level.as_filter_str());
    }
    env_directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialises the global tracing subscriber.
///
/// An invalid `$SIFT_LOG` directive falls back to the default filter.
pub fn init_logging(level: Option<LogLevel>) {
    let directive = env::var(LOG_ENV).ok();
    let filter = build_filter(level, directive.as_deref());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .without_time()
        .finish();

    if set_global_default(subscriber).is_err() {
        debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_environment() {
        let filter = build_filter(Some(LogLevel::Trace), Some("error"));
        assert_eq!(filter.to_string(), "trace");
    }

    #[test]
    fn environment_directive_used_without_flag() {
        let filter = build_filter(None, Some("sift_query=debug"));
        assert_eq!(filter.to_string(), "sift_query=debug");
    }

    #[test]
    fn invalid_environment_falls_back() {
        let filter = build_filter(None, Some("sift=verbose"));
        assert_eq!(filter.to_string(), DEFAULT_FILTER);
    }

    #[test]
    fn default_filter() {
        assert_eq!(build_filter(None, None).to_string(), DEFAULT_FILTER);
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(Some(LogLevel::Error));
        init_logging(Some(LogLevel::Error));
    }
}
