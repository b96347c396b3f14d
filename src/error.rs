//! Error types for ketav operations.

use thiserror::Error;

use crate::document::HeaderLevel;

/// Errors that can occur while loading, transforming, or exporting documents.
///
/// Malformed markup is never an error: the parser recovers the way a browser
/// does. Only user-supplied patterns, parameters, and I/O can fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    #[error("not a header tag: {0:?} (expected h1..h6)")]
    InvalidHeaderTag(String),

    #[error("not a header scope: {0:?} (expected \"all\" or h1..h6)")]
    InvalidScope(String),

    #[error("cannot split on {0}: only h1..h4 are split boundaries")]
    UnsupportedSplitLevel(HeaderLevel),

    #[cfg(feature = "recipe")]
    #[error("recipe error: {0}")]
    Recipe(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
