//! Verification settings
//!
//! Defaults match the audiotester recorder's file naming (`sent_*.bin`,
//! `recv_*.bin`). A JSON file can override any subset of fields.

use crate::error::{Result, VerifyError};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_max_examples() -> usize {
    crate::DEFAULT_MAX_EXAMPLES
}

fn default_sent_prefix() -> String {
    "sent".to_string()
}

fn default_recv_prefix() -> String {
    "recv".to_string()
}

fn default_extension() -> String {
    "bin".to_string()
}

/// Settings for a verification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Number of example gaps listed per file before eliding the rest
    #[serde(default = "default_max_examples")]
    pub max_examples: usize,
    /// File name prefix of output-callback recordings
    #[serde(default = "default_sent_prefix")]
    pub sent_prefix: String,
    /// File name prefix of input-callback recordings
    #[serde(default = "default_recv_prefix")]
    pub recv_prefix: String,
    /// Recording file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            max_examples: default_max_examples(),
            sent_prefix: default_sent_prefix(),
            recv_prefix: default_recv_prefix(),
            extension: default_extension(),
        }
    }
}

impl VerifyConfig {
    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| VerifyError::io(path, e))?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| VerifyError::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), "Loaded verify config");
        Ok(config)
    }

    /// Save config as pretty JSON, creating parent directories if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| VerifyError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| VerifyError::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| VerifyError::io(path, e))?;
        tracing::info!(path = %path.display(), "Verify config saved");
        Ok(())
    }
}
