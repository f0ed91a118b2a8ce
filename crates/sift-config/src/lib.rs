//! Configuration system for sift.
//!
//! sift uses TOML configuration files named `.sift.toml` to declare the keywords a query may
//! use as keys. Configuration is resolved by walking up the directory tree from the current
//! working directory, collecting any `.sift.toml` files found, then loading `~/.sift.toml` as
//! the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawQuerySettings, parse_config_file, parse_config_str};
use serde::Serialize;
use sift_query::ParseOptions;
pub use templates::{global_template, local_template};
use tracing::debug;
pub use validate::ConfigWarning;
use validate::{is_matchable, validate_config};

/// Top-level merged configuration for sift.
///
/// This represents the fully resolved configuration after merging all discovered `.sift.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Every keyword declaration, closest file first, in declaration order within a file.
    ///
    /// Repeated declarations are kept here so they can be reported; use
    /// [`Config::keyword_names`] for the effective list.
    pub keywords: Vec<Keyword>,
    /// Config files that contributed, closest first.
    pub files: Vec<PathBuf>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

/// A keyword declaration and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    /// The key name as written in the config file.
    pub name: String,
    /// Config file that declared it.
    pub source: PathBuf,
    /// Whether this keyword was declared in the global `~/.sift.toml`.
    pub is_global: bool,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sift.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let config = merge_configs(&parsed);
        debug!(
            files = config.files.len(),
            keywords = config.keywords.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Returns the effective keyword names: declaration order, first occurrence kept.
    pub fn keyword_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for keyword in &self.keywords {
            if !names.contains(&keyword.name.as_str()) {
                names.push(&keyword.name);
            }
        }
        names
    }

    /// Builds parse options from the effective keywords.
    ///
    /// Keywords that can never match are left out so one bad entry does not break every
    /// query; [`Config::validate`] reports them.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new().keywords(
            self.keyword_names()
                .into_iter()
                .filter(|name| is_matchable(name)),
        )
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective configuration to TOML format.
    ///
    /// The output has the same shape as a `.sift.toml` file, with duplicate keywords
    /// collapsed.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableConfig {
            query: SerializableQuery {
                keywords: self.keyword_names(),
            },
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Internal struct for TOML serialization of the effective configuration.
#[derive(Serialize)]
struct SerializableConfig<'a> {
    /// The `[query]` section.
    query: SerializableQuery<'a>,
}

/// The `[query]` section of [`SerializableConfig`].
#[derive(Serialize)]
struct SerializableQuery<'a> {
    /// Effective keyword names.
    keywords: Vec<&'a str>,
}
