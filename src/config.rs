use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Endpoint used when neither the config file nor the command line sets one
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_tick_rate_ms() -> u64 {
    100
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the query service; `/laws/query` is appended
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout. Unset means wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: None,
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".laws-tui"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Default log file location
    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("laws-tui.log"))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    /// Read a config file; `Ok(None)` when it does not exist
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(Some(config))
    }

    /// Load from `path` (or the default location), falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Config {
        let path = match path.map(Path::to_path_buf).or_else(Self::config_path) {
            Some(p) => p,
            None => return Config::default(),
        };

        match Self::load_from(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                Config::default()
            }
        }
    }

    /// Save the config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}
