//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, path::PathBuf};

use sift_query::{FULLTEXT_KEY, is_separator};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No keywords are declared, so every term is fulltext.
    NoKeywords,
    /// The reserved `fulltext` key is declared explicitly.
    ReservedKeyword {
        /// File that declared it.
        source: PathBuf,
    },
    /// A keyword is declared more than once.
    DuplicateKeyword {
        /// The repeated keyword.
        keyword: String,
        /// Number of declarations across all files.
        occurrences: usize,
    },
    /// A keyword can never match as a key.
    UnmatchableKeyword {
        /// The offending keyword.
        keyword: String,
        /// File that declared it.
        source: PathBuf,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoKeywords => write!(f, "no keywords are defined in configuration"),
            Self::ReservedKeyword { source } => write!(
                f,
                "'{FULLTEXT_KEY}' is always recognized and need not be declared ({})",
                source.display()
            ),
            Self::DuplicateKeyword {
                keyword,
                occurrences,
            } => write!(f, "keyword '{keyword}' is declared {occurrences} times"),
            Self::UnmatchableKeyword { keyword, source } => write!(
                f,
                "keyword '{keyword}' can never match and is ignored ({})",
                source.display()
            ),
        }
    }
}

impl ConfigWarning {
    /// Returns a hint for resolving this warning, if there is one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NoKeywords => Some("add keywords under [query] in .sift.toml"),
            Self::ReservedKeyword { .. } => Some("remove 'fulltext' from the keyword list"),
            Self::DuplicateKeyword { .. } => None,
            Self::UnmatchableKeyword { .. } => Some(
                "keywords must be non-empty and contain no whitespace or . , ' \" + - ! ? :",
            ),
        }
    }
}

/// Returns true if `keyword` can match as a whole token.
pub fn is_matchable(keyword: &str) -> bool {
    !keyword.is_empty() && !keyword.chars().any(is_separator)
}

/// Validates the configuration and returns any warnings.
///
/// This checks for:
/// - Empty configuration (no keywords declared)
/// - Explicit declarations of the reserved `fulltext` key
/// - Keywords declared more than once
/// - Keywords that are empty or contain a separator character
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    if config.keywords.is_empty() {
        return vec![ConfigWarning::NoKeywords];
    }

    let mut warnings = Vec::new();

    for keyword in &config.keywords {
        if keyword.name == FULLTEXT_KEY {
            warnings.push(ConfigWarning::ReservedKeyword {
                source: keyword.source.clone(),
            });
        } else if !is_matchable(&keyword.name) {
            warnings.push(ConfigWarning::UnmatchableKeyword {
                keyword: keyword.name.clone(),
                source: keyword.source.clone(),
            });
        }
    }

    for name in config.keyword_names() {
        let occurrences = config.keywords.iter().filter(|k| k.name == name).count();
        if occurrences > 1 {
            warnings.push(ConfigWarning::DuplicateKeyword {
                keyword: name.to_string(),
                occurrences,
            });
        }
    }

    warnings
}
