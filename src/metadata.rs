//! Run metadata persisted next to the output documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;

/// Summary of the last completed pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunMetadata {
    /// Completion time, seconds since the Unix epoch
    pub completed_at: Option<u64>,
    /// Unique rules per source identifier
    pub source_counts: BTreeMap<String, usize>,
    /// Unique rules across all sources
    pub total_rules: usize,
    /// URLs that exhausted their attempt budget
    pub failed_urls: usize,
}

impl RunMetadata {
    /// Create metadata stamped with the current time.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self {
            completed_at: Some(secs),
            ..Self::default()
        }
    }

    /// Load metadata from a file.
    ///
    /// Returns default metadata if the file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save metadata to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
