//! Editor configuration.
//!
//! Loaded from a JSON file; every field has a default so a partial (or
//! missing) file is fine.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::history::DEFAULT_HISTORY_CAPACITY;

/// When an update earns an undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryPolicy {
    /// Only when a color, the pattern, the name or the number actually changed.
    /// Slider drags on placements and layer toggles do not flood the history.
    #[default]
    TrackedFields,
    /// On every update that changed anything at all.
    EveryChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub history_capacity: usize,
    pub history_policy: HistoryPolicy,
    /// Edge length of the generated pattern tile, in pixels.
    pub tile_size: u32,
    /// How many times the tile repeats across the garment UVs, per axis.
    pub texture_repeat: u32,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_policy: HistoryPolicy::default(),
            tile_size: 512,
            texture_repeat: 2,
            log_filter: "kit_ui=info,kit_design=info,kit_record=info".into(),
        }
    }
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity < 2 {
            tracing::error!(
                history_capacity = self.history_capacity,
                "history needs room for at least two entries"
            );
            return Err(ConfigError::HistoryTooSmall {
                capacity: self.history_capacity,
            });
        }

        validate_tile_size(self.tile_size)?;

        if self.texture_repeat == 0 || self.texture_repeat > 16 {
            tracing::error!(texture_repeat = self.texture_repeat, "invalid texture repeat");
            return Err(ConfigError::InvalidRepeat {
                repeat: self.texture_repeat,
            });
        }

        Ok(())
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let config: EditorConfig = serde_json::from_str(&data)
            .with_context(|| format!("parse config json: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Tile edges must be a power of two in [16, 4096].
pub fn validate_tile_size(size: u32) -> Result<(), ConfigError> {
    if !size.is_power_of_two() || !(16..=4096).contains(&size) {
        tracing::error!(tile_size = size, "invalid tile size");
        return Err(ConfigError::InvalidTileSize { size });
    }
    Ok(())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("history_capacity must be at least 2, got {capacity}")]
    HistoryTooSmall { capacity: usize },

    #[error("tile_size must be a power of two in [16, 4096], got {size}")]
    InvalidTileSize { size: u32 },

    #[error("texture_repeat must be in [1, 16], got {repeat}")]
    InvalidRepeat { repeat: u32 },
}
