//! checksum configuration
//!
//! All the design constants of the rolling scheme live here and are passed
//! to the builders explicitly. The polynomial is fixed; only the window size
//! and the initial value can change.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::types::{
    CrcResult, CRC32_POLY, DEFAULT_WINDOW_SIZE, INIT_ONES, INIT_ZERO, MAX_WINDOW_SIZE,
};

/// Immutable settings for table construction and rolling checksums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrcConfig {
    /// Rolling window size in bytes
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Initial checksum state, also XORed in by `finish`
    #[serde(default)]
    pub init: u32,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

impl Default for CrcConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            init: INIT_ZERO,
        }
    }
}

impl CrcConfig {
    /// Config with the given window and a zero initial value
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            ..Default::default()
        }
    }

    /// zip/png style CRC-32 (init and final xor of all ones)
    pub fn zip() -> Self {
        Self {
            init: INIT_ONES,
            ..Default::default()
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_init(mut self, init: u32) -> Self {
        self.init = init;
        self
    }

    /// The generator polynomial. Always the reflected CRC-32 one.
    pub fn polynomial(&self) -> u32 {
        CRC32_POLY
    }

    /// true when the rolling table is purely linear (init of zero)
    pub fn is_linear(&self) -> bool {
        self.init == INIT_ZERO
    }

    pub fn validate(&self) -> CrcResult<()> {
        if self.window_size == 0 {
            return Err("window size must be at least 1 byte".to_string());
        }
        if self.window_size > MAX_WINDOW_SIZE {
            return Err(format!(
                "window size {} exceeds maximum of {} bytes",
                self.window_size, MAX_WINDOW_SIZE
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config, missing fields use defaults
    pub fn from_json(json: &str) -> CrcResult<Self> {
        let config: CrcConfig =
            serde_json::from_str(json).map_err(|e| format!("invalid config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> CrcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("config serialization: {}", e))
    }

    /// Load a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> CrcResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        Self::from_json(&text)
    }
}
