//! # ketav
//!
//! A structural editing engine for batches of digitized book markup.
//!
//! Scanned books arrive as HTML-like fragments whose heading structure is
//! rarely what the final library wants. ketav parses each fragment into a
//! tree and applies batch-wide edits:
//!
//! - **Header merge**: fold a source header's text into the following
//!   target headers, then drop the source
//! - **Global replace**: literal text replace in text-bearing leaf elements
//! - **Header replace**: regex replace inside a chosen header level
//! - **Split**: cut documents into one document per boundary header
//! - **Hierarchy normalization**: renumber header levels into a gapless run
//!
//! ## Quick Start
//!
//! ```
//! use ketav::{Batch, Document, HeaderLevel, Operation};
//! use ketav::transform::{MergeParams, SplitParams};
//!
//! let mut batch = Batch::new();
//! batch.extend(vec![Document::new(
//!     "book",
//!     "<h2>One</h2><h4>Intro</h4><h5>Title</h5><h2>Two</h2><p>text</p>",
//! )]);
//!
//! batch.apply(&Operation::MergeHeaders(MergeParams {
//!     source: HeaderLevel::H4,
//!     target: HeaderLevel::H5,
//!     exclude: String::new(),
//! }))?;
//! batch.apply(&Operation::Split(SplitParams::default()))?;
//!
//! assert_eq!(batch.len(), 2);
//! assert_eq!(batch.documents()[0].raw_markup, "<h2>One</h2><h5>Intro Title</h5>");
//! # Ok::<(), ketav::Error>(())
//! ```

pub mod activity;
pub mod batch;
pub mod document;
pub mod dom;
pub mod error;
pub mod export;
pub mod import;
#[cfg(feature = "recipe")]
pub mod recipe;
pub mod text;
pub mod transform;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use activity::{ActivityLog, LogEntry, LogKind};
pub use batch::{Batch, Operation};
pub use document::{Document, HeaderLevel, HeaderScope};
pub use error::{Error, Result};
pub use export::ArchiveExporter;
pub use import::{read_document, read_documents};
pub use text::{ExclusionList, matches_exclusion, sanitize_name};
