//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`.

use std::path::{Path, PathBuf};

use crate::{Config, Keyword, discovery::is_global_config, parse::RawConfig};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Keyword lists are concatenated in that order. Every declaration is kept with its source;
/// [`Config::keyword_names`] drops the repeats.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let keywords = configs
        .iter()
        .flat_map(|parsed| {
            let is_global = is_global_config(&parsed.path);
            parsed.config.keywords().iter().map(move |name| Keyword {
                name: name.clone(),
                source: parsed.path.clone(),
                is_global,
            })
        })
        .collect();

    Config {
        keywords,
        files: configs.iter().map(|c| c.path.clone()).collect(),
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(Path::to_path_buf),
    }
}
