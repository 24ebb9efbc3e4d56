//! Error types for the codec crate.

use thiserror::Error;

/// Pipeline stage at which a save blob was found to be corrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Base64 text decoding.
    Base64,
    /// Gzip member decompression.
    Gzip,
    /// AES-256-ECB decryption or padding removal.
    BlockCipher,
    /// The decoded plaintext was not UTF-8.
    Utf8,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Base64 => "base64",
            Stage::Gzip => "gzip",
            Stage::BlockCipher => "block cipher",
            Stage::Utf8 => "utf-8",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when decoding or encoding save blobs.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The save blob could not be decoded.
    #[error("save file appears corrupt ({stage}): {reason}")]
    Corrupt { stage: Stage, reason: String },

    /// The caller asked for an encoding variant the codec does not implement.
    #[error("unsupported save variant: {0}")]
    UnsupportedVariant(String),
}

impl Error {
    pub(crate) fn corrupt(stage: Stage, reason: impl ToString) -> Self {
        Error::Corrupt {
            stage,
            reason: reason.to_string(),
        }
    }

    /// Whether this error means the input blob itself is unreadable.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::Corrupt { .. })
    }
}

impl From<gdsave_common::Error> for Error {
    fn from(err: gdsave_common::Error) -> Self {
        match err {
            gdsave_common::Error::Base64(e) => Error::corrupt(Stage::Base64, e),
        }
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
