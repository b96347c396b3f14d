//! The working set of documents and the operations applied to it.

#[cfg(feature = "recipe")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::activity::ActivityLog;
use crate::document::Document;
use crate::error::Result;
use crate::transform::{
    self, HeaderReplaceParams, MergeParams, NormalizeParams, SplitParams, TextReplaceParams,
};

/// One structural edit over a whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "recipe", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "recipe", serde(tag = "op", rename_all = "snake_case"))]
pub enum Operation {
    MergeHeaders(MergeParams),
    ReplaceText(TextReplaceParams),
    ReplaceInHeaders(HeaderReplaceParams),
    Split(SplitParams),
    NormalizeHierarchy(NormalizeParams),
}

impl Operation {
    /// Run the operation, producing the next document list.
    pub fn apply(&self, documents: &[Document]) -> Result<Vec<Document>> {
        Ok(match self {
            Operation::MergeHeaders(params) => transform::merge_headers(documents, params),
            Operation::ReplaceText(params) => transform::replace_text(documents, params),
            Operation::ReplaceInHeaders(params) => {
                transform::replace_in_headers(documents, params)?
            }
            Operation::Split(params) => transform::split_documents(documents, params)?,
            Operation::NormalizeHierarchy(params) => {
                transform::normalize_hierarchy(documents, params)
            }
        })
    }

    /// Short name used in log messages.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::MergeHeaders(_) => "header merge",
            Operation::ReplaceText(_) => "global replace",
            Operation::ReplaceInHeaders(_) => "header replace",
            Operation::Split(_) => "split",
            Operation::NormalizeHierarchy(_) => "hierarchy normalization",
        }
    }

    fn success_message(&self, count: usize) -> String {
        match self {
            Operation::Split(_) => format!("Split finished: {count} documents created."),
            Operation::MergeHeaders(_) => "Header merge applied.".to_string(),
            Operation::ReplaceText(_) => "Global replace applied.".to_string(),
            Operation::ReplaceInHeaders(_) => "Header replace applied.".to_string(),
            Operation::NormalizeHierarchy(_) => "Hierarchy normalized.".to_string(),
        }
    }
}

/// An ordered list of documents plus the log of what was done to it.
///
/// Operations swap the whole list at once: either every document is
/// transformed, or the batch is left exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    documents: Vec<Document>,
    log: ActivityLog,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self {
            documents,
            log: ActivityLog::new(),
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Append freshly loaded documents to the batch.
    pub fn extend(&mut self, documents: impl IntoIterator<Item = Document>) {
        let before = self.documents.len();
        self.documents.extend(documents);
        let added = self.documents.len() - before;
        self.log.success(format!("Loaded {added} files."));
    }

    pub fn clear(&mut self) {
        self.documents.clear();
        self.log.info("Cleared all documents.");
    }

    /// Apply one operation to every document and swap in the result.
    ///
    /// Returns the number of documents afterward. An empty batch is left
    /// alone; a failing operation is logged and leaves the batch unchanged.
    pub fn apply(&mut self, op: &Operation) -> Result<usize> {
        if self.documents.is_empty() {
            self.log
                .info(format!("No documents loaded; {} skipped.", op.label()));
            return Ok(0);
        }

        match op.apply(&self.documents) {
            Ok(documents) => {
                info!(
                    op = op.label(),
                    before = self.documents.len(),
                    after = documents.len(),
                    "applied"
                );
                self.documents = documents;
                self.log.success(op.success_message(self.documents.len()));
                Ok(self.documents.len())
            }
            Err(err) => {
                self.log.error(format!("{} rejected: {err}", op.label()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::LogKind;
    use crate::document::HeaderScope;
    use crate::error::Error;

    fn batch() -> Batch {
        Batch::from_documents(vec![
            Document::new("one", "<h2>A</h2>a<h2>B</h2>b"),
            Document::new("two", "<h2>C</h2>c"),
        ])
    }

    #[test]
    fn test_split_replaces_whole_batch() {
        let mut batch = batch();
        let count = batch
            .apply(&Operation::Split(SplitParams::default()))
            .unwrap();
        assert_eq!(count, 3);
        assert_eq!(batch.get(2).unwrap().name, "C");
        assert_eq!(
            batch.log().latest().unwrap().message,
            "Split finished: 3 documents created."
        );
    }

    #[test]
    fn test_failed_operation_leaves_batch_unchanged() {
        let mut batch = batch();
        let before = batch.documents().to_vec();
        let op = Operation::ReplaceInHeaders(HeaderReplaceParams {
            scope: HeaderScope::All,
            find: "[".to_string(),
            replace: String::new(),
        });
        let err = batch.apply(&op).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
        assert_eq!(batch.documents(), before.as_slice());
        assert_eq!(batch.log().latest().unwrap().kind, LogKind::Error);
    }

    #[test]
    fn test_empty_batch_is_logged_noop() {
        let mut batch = Batch::new();
        let count = batch
            .apply(&Operation::NormalizeHierarchy(NormalizeParams::default()))
            .unwrap();
        assert_eq!(count, 0);
        assert_eq!(batch.log().latest().unwrap().kind, LogKind::Info);
    }

    #[test]
    fn test_extend_and_clear() {
        let mut batch = Batch::new();
        batch.extend(vec![Document::new("x", "<p>x</p>")]);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.log().latest().unwrap().message, "Loaded 1 files.");
        batch.clear();
        assert!(batch.is_empty());
    }
}
