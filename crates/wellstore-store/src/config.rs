//! Store configuration.
//!
//! Read from a JSON file when one is given; every field has a default so a
//! partial file is fine. `WELLSTORE_LOG` overrides the log level.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wellstore_model::ChunkSize;

use crate::error::Result;
use crate::query::ScopeFields;

pub const LOG_ENV: &str = "WELLSTORE_LOG";
pub const DEFAULT_DEPTH_CHUNK_SIZE: ChunkSize = ChunkSize::from_const(1000);
pub const DEFAULT_TIME_CHUNK_SIZE: ChunkSize = ChunkSize::from_const(86_400);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Chunk width for depth-indexed series, in index units.
    pub depth_chunk_size: ChunkSize,
    /// Chunk width for time-indexed series, in seconds.
    pub time_chunk_size: ChunkSize,
    /// Id field used when no type descriptor is at hand.
    pub id_field: String,
    /// Containment id fields.
    pub scope: ScopeFields,
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            depth_chunk_size: DEFAULT_DEPTH_CHUNK_SIZE,
            time_chunk_size: DEFAULT_TIME_CHUNK_SIZE,
            id_field: wellstore_schema::descriptor::DEFAULT_ID_FIELD.to_string(),
            scope: ScopeFields::default(),
            log_level: "info".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded store config");
        Ok(config)
    }

    /// Load `path` if given and present, else defaults; then apply env
    /// overrides.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) if path.exists() => Self::load(path)?,
            _ => Self::default(),
        };
        Ok(config.with_log_override(std::env::var(LOG_ENV).ok()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn with_log_override(mut self, level: Option<String>) -> Self {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.log_level = level;
        }
        self
    }

    pub fn chunk_size(&self, is_time: bool) -> ChunkSize {
        if is_time {
            self.time_chunk_size
        } else {
            self.depth_chunk_size
        }
    }
}
