//! Error types for save markup parsing and writing.

use thiserror::Error;

/// Why a markup document was rejected as a save document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// The document root has no wrapper child.
    EmptyDocument,
    /// The wrapper holds no key/value pairs.
    EmptyDict,
    /// The first key is not one of the known save fingerprints.
    MissingFingerprint { found: Option<String> },
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFailure::EmptyDocument => f.write_str("document has no children"),
            ValidationFailure::EmptyDict => f.write_str("document holds no key/value pairs"),
            ValidationFailure::MissingFingerprint { found: Some(key) } => {
                write!(f, "unexpected first key {key:?}")
            }
            ValidationFailure::MissingFingerprint { found: None } => {
                f.write_str("first key is missing")
            }
        }
    }
}

/// Errors that can occur when parsing or writing save markup.
#[derive(Debug, Error)]
pub enum Error {
    /// The markup is not a save document.
    #[error("not a valid save document: {0}")]
    Validation(ValidationFailure),

    /// A dictionary element does not alternate keys and values.
    #[error("<{tag}> has {count} children, expected key/value pairs")]
    OddEntryCount { tag: String, count: usize },

    /// A key position holds something other than a `<k>` element.
    #[error("expected <k> at key position, found <{found}>")]
    ExpectedKey { found: String },

    /// A value element has an unknown tag.
    #[error("unknown value tag <{0}>")]
    UnknownTag(String),

    /// A scalar literal could not be parsed for its tag.
    #[error("invalid <{tag}> literal {literal:?}")]
    InvalidScalar { tag: &'static str, literal: String },

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON serialization error.
    #[cfg(feature = "json-export")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for save markup operations.
pub type Result<T> = std::result::Result<T, Error>;
