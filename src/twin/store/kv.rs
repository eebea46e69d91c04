use anyhow::Context;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Result, StorageError};

pub const STYLE_PROFILE_KEY: &str = "twin/style_profile/v1";
pub const CONSENT_POLICY_KEY: &str = "twin/consent_policy/v1";
pub const ACTIVITY_LOG_KEY: &str = "twin/activity_log/v1";
pub const TRAINING_FEEDBACK_KEY: &str = "twin/training_feedback/v1";
pub const AUTO_SENDS_KEY: &str = "twin/auto_sends/v1";

/// Local durable key-value storage holding JSON documents.
///
/// `get` never fails: a missing or unreadable value is `None` and callers
/// fall back to defaults.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: &Value) -> Result<()>;
}

/// One pretty-printed JSON file per key.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '.' })
            .collect();
        self.dir.join(format!("{file_stem}.json"))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<Value> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return None,
            Err(error) => {
                tracing::warn!(key, path = %path.display(), %error, "twin.kv.read_failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(key, path = %path.display(), %error, "twin.kv.corrupt_value");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let content = serde_json::to_string_pretty(value).map_err(|e| StorageError::Encode {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        write_atomic(&self.path_for(key), &content).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: format!("{e:#}"),
        })?;
        Ok(())
    }
}

fn write_atomic(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating state dir: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)
        .with_context(|| format!("failed writing temp file: {}", temp_path.display()))?;

    if let Err(rename_error) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(rename_error)
            .with_context(|| format!("failed replacing state file atomically: {}", path.display()));
    }

    Ok(())
}

/// Process-local store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}
