//! Settings stored as `config.json` next to the task file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{data_dir, default_tasks_path};

pub const CONFIG_FILE: &str = "config.json";
/// Environment variable that points the tracker at another task file.
pub const TASKS_DB_ENV: &str = "TASKS_DB";

pub fn config_path() -> PathBuf {
    data_dir().join(CONFIG_FILE)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bot_name() -> String {
    "TaskBot".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Task file to use instead of the one in the data directory.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// One of off, error, warn, info, debug, trace.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Name the bot greets the user with.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_file: None,
            log_level: default_log_level(),
            bot_name: default_bot_name(),
        }
    }
}

impl Settings {
    /// Reads `config.json` from the data directory, or defaults if absent.
    pub fn load() -> Result<Settings> {
        Settings::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let s = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&s)?)
    }

    /// Writes these settings to `config.json` in the data directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Picks the task file: `cli_file`, then `TASKS_DB`, then the config,
    /// then the default location.
    pub fn tasks_path(&self, cli_file: Option<PathBuf>) -> PathBuf {
        cli_file
            .or_else(|| std::env::var(TASKS_DB_ENV).ok().map(PathBuf::from))
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(default_tasks_path)
    }
}
