//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Longest slot query range accepted by default, about one quarter.
pub const DEFAULT_MAX_RANGE_DAYS: u32 = 92;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of calendar days (inclusive) a single slot query may span.
    pub max_range_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `EngineError::Validation` on malformed JSON or a zero range.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| EngineError::Validation(format!("invalid config: {}", e)))?;
        if config.max_range_days == 0 {
            return Err(EngineError::Validation(
                "max_range_days must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}
