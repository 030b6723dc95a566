//! Configuration loader and validator for the waitlist pusher.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_TABLE: &str = "waitlist";
pub const DEFAULT_PACING_DELAY_MS: u64 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub app: App,
}

/// Hosted backend (REST) settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Backend {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

/// App-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct App {
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_pacing_delay_ms() -> u64 {
    DEFAULT_PACING_DELAY_MS
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            table: default_table(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            pacing_delay_ms: default_pacing_delay_ms(),
        }
    }
}

impl Config {
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.app.pacing_delay_ms)
    }

    /// Apply command-line values on top of the file (or default) values and
    /// validate the result.
    pub fn with_overrides(
        mut self,
        url: Option<String>,
        key: Option<String>,
        pacing_delay_ms: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = url {
            self.backend.url = url;
        }
        if let Some(key) = key {
            self.backend.key = key;
        }
        if let Some(ms) = pacing_delay_ms {
            self.app.pacing_delay_ms = ms;
        }
        validate(&self)?;
        Ok(self)
    }
}

/// Read a YAML config file. Credentials may be left out of the file and
/// supplied on the command line; [`Config::with_overrides`] validates the
/// merged result.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let url = cfg.backend.url.trim();
    if url.is_empty() {
        return Err(ConfigError::Invalid("backend.url must be non-empty"));
    }
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        _ => return Err(ConfigError::Invalid("backend.url must be an http(s) URL")),
    }
    if cfg.backend.key.trim().is_empty() {
        return Err(ConfigError::Invalid("backend.key must be non-empty"));
    }
    if cfg.backend.table.trim().is_empty() {
        return Err(ConfigError::Invalid("backend.table must be non-empty"));
    }
    Ok(())
}

/// Example YAML accepted by [`load`].
pub fn example() -> &'static str {
    r#"backend:
  url: "https://your-project-id.supabase.co"
  key: "your-anon-key"
  table: "waitlist"

app:
  # delay between consecutive inserts
  pacing_delay_ms: 100
"#
}
