use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::Level;

use crate::error::{ConfigError, Result};
use crate::twin::agent::DEFAULT_PREVIEW_CHARS;

/// Largest accepted local-time offset, in minutes (UTC±18:00).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinConfig {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Where the four state documents live. `~` is expanded; relative paths
    /// resolve against the config directory.
    #[serde(default = "default_state_dir")]
    pub state_dir: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Offset used for quiet hours and the "current local day".
    /// Unset means the system's local offset.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,

    /// Characters of inbound text kept in each activity entry.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible replies; unset uses the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_state_dir() -> String {
    "~/.twin/state".into()
}

fn default_log_level() -> String {
    "info".into()
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            state_dir: default_state_dir(),
            log_level: default_log_level(),
            utc_offset_minutes: None,
            preview_chars: default_preview_chars(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl TwinConfig {
    pub fn state_dir_path(&self) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(&self.state_dir).into_owned());
        if expanded.is_absolute() {
            return expanded;
        }
        self.config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(expanded)
    }

    /// Falls back to `INFO` for anything `tracing` does not recognise;
    /// `validate` rejects such values on load.
    pub fn log_level(&self) -> Level {
        Level::from_str(self.log_level.trim()).unwrap_or(Level::INFO)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(offset) = self.utc_offset_minutes
            && !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&offset)
        {
            return Err(ConfigError::Validation(format!(
                "utc_offset_minutes must be within ±{MAX_UTC_OFFSET_MINUTES}, got {offset}"
            ))
            .into());
        }
        if self.preview_chars == 0 {
            return Err(ConfigError::Validation("preview_chars must be at least 1".into()).into());
        }
        if Level::from_str(self.log_level.trim()).is_err() {
            return Err(ConfigError::Validation(format!(
                "unknown log_level '{}'",
                self.log_level
            ))
            .into());
        }
        Ok(())
    }
}
