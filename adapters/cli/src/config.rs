//! Loading of the optional TOML configuration file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use hidden_maze_core::Rules;
use serde::Deserialize;

/// Contents of a configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct ConfigFile {
    /// Session-level options.
    pub(crate) session: SessionConfig,
    /// Game rules.
    pub(crate) rules: Rules,
}

/// Options that affect a single run rather than the game rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct SessionConfig {
    /// Run seed; a random one is drawn when absent.
    pub(crate) seed: Option<u64>,
}

impl ConfigFile {
    /// Reads and validates the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parses and validates configuration file contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse config toml contents")?;
        config.rules.validate().context("unplayable rules")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_example_matches_defaults() {
        let config = ConfigFile::parse(include_str!("../../../config/hidden-maze.toml"))
            .expect("example config should parse");

        assert_eq!(config.rules, Rules::default());
        assert_eq!(config.session.seed, None);
    }

    #[test]
    fn omitted_keys_keep_their_defaults() {
        let config = ConfigFile::parse("[session]\nseed = 9\n\n[rules]\nfinal_level = 3\n")
            .expect("partial config should parse");

        assert_eq!(config.session.seed, Some(9));
        assert_eq!(config.rules.final_level, 3);
        assert_eq!(config.rules.base_rows, Rules::default().base_rows);
    }

    #[test]
    fn unplayable_rules_are_reported() {
        let error = ConfigFile::parse("[rules]\nred_pickup_odds = 0\n")
            .expect_err("zero odds must be rejected");

        assert!(format!("{error:#}").contains("pickup odds"));
    }
}
