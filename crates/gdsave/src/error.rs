//! Error types for the gdsave library.

use thiserror::Error;

/// Errors that can occur when converting save files.
#[derive(Debug, Error)]
pub enum Error {
    /// Save blob decoding or encoding error.
    #[error("{0}")]
    Codec(#[from] gdsave_codec::Error),

    /// Save markup parsing or writing error.
    #[error("{0}")]
    Plist(#[from] gdsave_plist::Error),

    /// The markup has readable keys and cannot be encoded back into a save.
    #[error("cannot encode a save whose keys were replaced (found {0:?})")]
    TranslatedKeys(String),

    /// Unknown output format name.
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
}

/// Result type for gdsave operations.
pub type Result<T> = std::result::Result<T, Error>;
