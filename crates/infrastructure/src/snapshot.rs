//! Snapshot file reading.
//!
//! Parses an exported snapshot document, failing fast before any remote
//! call is made. Input is size-capped so a mispicked file cannot balloon
//! memory.

use std::path::Path;

use mockbird_domain::Snapshot;
use thiserror::Error;

/// Limits applied when reading a snapshot.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Maximum input size in bytes.
    pub max_size: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_size: 10 * 1024 * 1024,
        }
    }
}

/// Errors produced while reading a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The input exceeds the configured size cap.
    #[error("snapshot too large: {size} bytes exceeds maximum of {max} bytes")]
    TooLarge {
        /// Actual input size in bytes.
        size: u64,
        /// Configured maximum in bytes.
        max: u64,
    },

    /// The input is not a valid snapshot document.
    #[error("invalid snapshot JSON: {0}")]
    InvalidJson(String),

    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads and parses snapshot documents.
#[derive(Debug, Default)]
pub struct SnapshotReader {
    config: ReaderConfig,
}

impl SnapshotReader {
    /// Creates a reader with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader with custom limits.
    #[must_use]
    pub const fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Parses a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input exceeds the size cap or is not valid
    /// snapshot JSON.
    pub fn parse(&self, content: &str) -> Result<Snapshot, SnapshotError> {
        let size = content.len() as u64;
        if size > self.config.max_size {
            return Err(SnapshotError::TooLarge {
                size,
                max: self.config.max_size,
            });
        }
        serde_json::from_str(content).map_err(|e| SnapshotError::InvalidJson(e.to_string()))
    }

    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, exceeds the size cap or
    /// is not valid snapshot JSON. The size cap is checked against file
    /// metadata before the content is read.
    pub fn read(&self, path: &Path) -> Result<Snapshot, SnapshotError> {
        let size = std::fs::metadata(path)?.len();
        if size > self.config.max_size {
            return Err(SnapshotError::TooLarge {
                size,
                max: self.config.max_size,
            });
        }
        let content = std::fs::read_to_string(path)?;
        self.parse(&content)
    }
}
