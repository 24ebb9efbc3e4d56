//! Error types for gdsave-common.

use thiserror::Error;

/// Common error type for the leaf transforms.
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be decoded as base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
