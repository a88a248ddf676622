//! Protocol message definitions
//!
//! The clock server pushes one JSON object per text frame. Only the `time`
//! field is read; anything else in the object is ignored.

use serde::Deserialize;
use thiserror::Error;

/// Protocol-related errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid time update: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Time update pushed by the server
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct TimeUpdate {
    /// Preformatted time string, displayed verbatim
    pub time: String,
}

impl TimeUpdate {
    /// Parse a time update from a text frame
    pub fn from_json(json: &str) -> ProtocolResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the update to JSON
    #[cfg(test)]
    pub fn to_json(&self) -> ProtocolResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
