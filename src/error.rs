//! Error types for the playground session store.

use thiserror::Error;

/// Errors produced while decoding a serialized session token.
///
/// Always recoverable: callers fall back to a default session and log the
/// failure. A corrupt shared link must never take the playground down.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid base64 in session token: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Session token payload failed to inflate: {0}")]
    Inflate(std::io::Error),

    #[error("Session token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session-store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to decode serialized session: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to load runtime module for version {version}: {reason}")]
    ModuleLoad { version: String, reason: String },

    #[error("Cannot delete {0}: it is required by the playground")]
    ProtectedFile(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}
