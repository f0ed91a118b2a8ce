//! Configuration file parsing.
//!
//! Parses individual `.sift.toml` files into intermediate `RawConfig` structures
//! that keep every field optional until merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Query settings section.
    pub query: Option<RawQuerySettings>,
}

/// Raw `[query]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawQuerySettings {
    /// Keywords recognized as keys. Accepts a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub keywords: Option<Vec<String>>,
}

impl RawConfig {
    /// Returns the keywords declared in this file, in declaration order.
    pub fn keywords(&self) -> &[String] {
        self.query
            .as_ref()
            .and_then(|q| q.keywords.as_deref())
            .unwrap_or_default()
    }
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks whether a config file sets `root = true`.
///
/// Unreadable or invalid files are not root configs; the error surfaces when the file
/// is loaded.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.root.is_none());
        assert!(config.query.is_none());
        assert!(config.keywords().is_empty());
    }

    #[test]
    fn test_parse_keyword_list() {
        let config = parse_config(
            r#"
[query]
keywords = ["status", "tag"]
"#,
        )
        .unwrap();
        assert_eq!(config.keywords(), ["status", "tag"]);
    }

    #[test]
    fn test_parse_single_keyword() {
        let config = parse_config(
            r#"
[query]
keywords = "status"
"#,
        )
        .unwrap();
        assert_eq!(config.keywords(), ["status"]);
    }

    #[test]
    fn test_parse_query_without_keywords() {
        let config = parse_config("[query]\n").unwrap();
        assert!(config.query.is_some());
        assert!(config.keywords().is_empty());
    }

    #[test]
    fn test_parse_root() {
        let config = parse_config("root = true\n").unwrap();
        assert_eq!(config.root, Some(true));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = parse_config_str("[query\n", &PathBuf::from("/x/.sift.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("/x/.sift.toml"));
    }

    #[test]
    fn test_parse_wrong_keyword_type() {
        assert!(parse_config("[query]\nkeywords = 3\n").is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let err = parse_config_file(&PathBuf::from("/nonexistent/.sift.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
