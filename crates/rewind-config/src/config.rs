/// History size limits: defaults, JSON load/save, environment overrides.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of frames kept in the undo queue by default.
const DEFAULT_UNDO_HISTORY_SIZE: usize = 50;

/// Maximum number of frames kept in the redo queue by default.
const DEFAULT_REDO_HISTORY_SIZE: usize = 10;

/// Upper bound applied by [`HistoryConfig::sanitize`] to both queue sizes.
pub const MAX_HISTORY_SIZE: usize = 10_000;

/// Environment variable overriding `undo_history_size`.
const UNDO_SIZE_ENV: &str = "REWIND_UNDO_HISTORY_SIZE";

/// Environment variable overriding `redo_history_size`.
const REDO_SIZE_ENV: &str = "REWIND_REDO_HISTORY_SIZE";

/// Size limits for the undo and redo queues.
///
/// When a queue grows past its limit, the oldest frames are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Max frames in the undo queue.
    pub undo_history_size: usize,
    /// Max frames in the redo queue.
    pub redo_history_size: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            undo_history_size: DEFAULT_UNDO_HISTORY_SIZE,
            redo_history_size: DEFAULT_REDO_HISTORY_SIZE,
        }
    }
}

impl HistoryConfig {
    /// Convenience constructor with explicit limits.
    pub fn with_sizes(undo_history_size: usize, redo_history_size: usize) -> Self {
        Self {
            undo_history_size,
            redo_history_size,
        }
    }

    /// Returns the default config file path: exe directory + `rewind.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("rewind.json")))
            .unwrap_or_else(|| PathBuf::from("rewind.json"))
    }

    /// Parses a config from a JSON string. Missing fields get defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid JSON for this shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(json).context("Failed to parse history config")?;
        config.sanitize();
        Ok(config)
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match Self::from_json(&contents) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e:#}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Don't overwrite a broken file
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!(
                    "Failed to create default config at {}: {e:#}",
                    path.display()
                );
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// Applies `REWIND_UNDO_HISTORY_SIZE` / `REWIND_REDO_HISTORY_SIZE`.
    ///
    /// Values that don't parse as an unsigned integer are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(size) = env_size(UNDO_SIZE_ENV) {
            self.undo_history_size = size;
        }
        if let Some(size) = env_size(REDO_SIZE_ENV) {
            self.redo_history_size = size;
        }
        self.sanitize();
        self
    }

    /// Clamps both sizes to [`MAX_HISTORY_SIZE`].
    pub fn sanitize(&mut self) {
        self.undo_history_size = self.undo_history_size.min(MAX_HISTORY_SIZE);
        self.redo_history_size = self.redo_history_size.min(MAX_HISTORY_SIZE);
    }
}

fn env_size(name: &str) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(size) => Some(size),
        Err(e) => {
            tracing::warn!("Ignoring {name}={raw:?}: {e}");
            None
        }
    }
}
