//! Session error types
//!
//! Transition preconditions are silent no-ops by design; only the JSON
//! snapshot seam is fallible.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid session snapshot: {0}")]
    InvalidSnapshot(String),
}
