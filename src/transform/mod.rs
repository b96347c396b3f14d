//! Structural edits over a batch of documents.
//!
//! Each operation is a pure function from a document slice and its
//! parameters to a new document list. Per-document state (carried header
//! text, rank maps) lives inside one traversal and is dropped afterward.
//!
//! - Merge: fold a source header's text into the following target headers
//! - Replace: literal text replace in leaf elements, regex replace in headers
//! - Split: cut documents at a header tag
//! - Hierarchy: renumber header levels into a gapless sequence

mod hierarchy;
mod merge;
mod replace;
mod split;

#[cfg(feature = "recipe")]
use serde::{Deserialize, Serialize};

use crate::document::{HeaderLevel, HeaderScope};

pub use hierarchy::normalize_hierarchy;
pub use merge::merge_headers;
pub use replace::{replace_in_headers, replace_text};
pub use split::split_documents;

/// Parameters for [`merge_headers`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "recipe", derive(Serialize, Deserialize))]
pub struct MergeParams {
    /// Header whose text is carried forward; removed afterward.
    pub source: HeaderLevel,
    /// Header that receives the carried text.
    pub target: HeaderLevel,
    /// Comma-separated words; targets containing any are left alone.
    #[cfg_attr(feature = "recipe", serde(default))]
    pub exclude: String,
}

impl Default for MergeParams {
    fn default() -> Self {
        Self {
            source: HeaderLevel::H4,
            target: HeaderLevel::H5,
            exclude: String::new(),
        }
    }
}

/// Parameters for [`replace_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "recipe", derive(Serialize, Deserialize))]
pub struct TextReplaceParams {
    /// Literal text to find. Empty means no-op.
    pub find: String,
    /// Literal replacement.
    #[cfg_attr(feature = "recipe", serde(default))]
    pub replace: String,
}

/// Parameters for [`replace_in_headers`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "recipe", derive(Serialize, Deserialize))]
pub struct HeaderReplaceParams {
    #[cfg_attr(feature = "recipe", serde(default))]
    pub scope: HeaderScope,
    /// Regular expression. Empty means no-op.
    pub find: String,
    /// Replacement; `$1` and `${name}` expand capture groups.
    #[cfg_attr(feature = "recipe", serde(default))]
    pub replace: String,
}

/// Parameters for [`split_documents`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "recipe", derive(Serialize, Deserialize))]
pub struct SplitParams {
    /// Boundary header, `h1` through `h4`.
    pub tag: HeaderLevel,
    /// Prefixed to every boundary title and output name.
    #[cfg_attr(feature = "recipe", serde(default))]
    pub book_name: Option<String>,
    /// Added as a paragraph after every boundary.
    #[cfg_attr(feature = "recipe", serde(default))]
    pub author: Option<String>,
    /// Comma-separated words; boundaries containing any do not split.
    #[cfg_attr(feature = "recipe", serde(default))]
    pub exclude: String,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            tag: HeaderLevel::H2,
            book_name: None,
            author: None,
            exclude: String::new(),
        }
    }
}

/// Parameters for [`normalize_hierarchy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "recipe", derive(Serialize, Deserialize))]
pub struct NormalizeParams {
    /// Levels left untouched and not counted when ranking.
    #[cfg_attr(feature = "recipe", serde(default))]
    pub skip: Vec<HeaderLevel>,
}
