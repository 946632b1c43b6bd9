//! league.toml configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_CONFIG_FILE: &str = "league.toml";
pub const DATA_DIR_ENV: &str = "LEAGUE_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub pod_size: usize,
    pub months: Vec<String>,
    pub data_dir: PathBuf,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            pod_size: 3,
            months: vec!["February".into(), "March".into(), "April".into()],
            data_dir: PathBuf::from("data"),
        }
    }
}

impl LeagueConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LeagueConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` if it exists, otherwise uses defaults. `LEAGUE_DATA_DIR`
    /// overrides the data directory either way.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.pod_size < 2 {
            return Err(ConfigError::Invalid("pod_size must be at least 2".into()));
        }
        if self.months.is_empty() {
            return Err(ConfigError::Invalid("at least one month must be specified".into()));
        }
        Ok(())
    }

    pub fn is_known_month(&self, month: &str) -> bool {
        self.months.iter().any(|m| m.eq_ignore_ascii_case(month))
    }

    /// Orders period labels: configured months first in configured order,
    /// anything else after, alphabetically.
    pub fn sort_periods<'a>(&self, periods: &mut [&'a str]) {
        periods.sort_by_key(|p| {
            let rank = self
                .months
                .iter()
                .position(|m| m.eq_ignore_ascii_case(p))
                .unwrap_or(usize::MAX);
            (rank, p.to_lowercase())
        });
    }
}
