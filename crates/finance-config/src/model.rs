use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Overrides the default data directory when `data_dir` is unset.
pub const HOME_ENV_VAR: &str = "FINANCE_TRACKER_HOME";
const DEFAULT_DIR_NAME: &str = ".finance_tracker";

/// Display and storage preferences for the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_decimal_places")]
    pub decimal_places: u8,
    /// Directory holding the state file and its backups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            decimal_places: Self::default_decimal_places(),
            data_dir: None,
            storage_key: Self::default_storage_key(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            backup_retention: Self::default_backup_retention(),
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "¥".into()
    }

    pub fn default_decimal_places() -> u8 {
        2
    }

    pub fn default_storage_key() -> String {
        "finance-storage".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    /// Configured directory, then `$FINANCE_TRACKER_HOME`, then `~/.finance_tracker`.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        if let Some(home) = env::var_os(HOME_ENV_VAR).filter(|value| !value.is_empty()) {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }
}
