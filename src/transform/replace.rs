//! Text replacement: literal in leaf elements, regex in headers.

use regex_lite::{NoExpand, Regex};
use tracing::debug;

use super::{HeaderReplaceParams, TextReplaceParams};
use crate::document::Document;
use crate::dom::Markup;
use crate::error::{Error, Result};

/// Replace literal text in every text-bearing leaf element.
///
/// A leaf is an element with no element children and some non-blank text.
/// Containers are not rewritten themselves, but their leaf descendants are.
/// An empty `find` leaves the batch unchanged.
pub fn replace_text(documents: &[Document], params: &TextReplaceParams) -> Vec<Document> {
    if params.find.is_empty() {
        return documents.to_vec();
    }
    // An escaped literal always compiles.
    let Ok(pattern) = Regex::new(&regex_lite::escape(&params.find)) else {
        return documents.to_vec();
    };

    documents
        .iter()
        .map(|doc| {
            let mut tree = Markup::parse(&doc.raw_markup);
            let leaves = tree.find_all(|t, id| {
                t.element_child_count(id) == 0 && !t.text_content(id).trim().is_empty()
            });
            let mut rewritten = 0usize;
            for id in leaves {
                let inner = tree.inner_markup(id);
                if !pattern.is_match(&inner) {
                    continue;
                }
                let replaced = pattern.replace_all(&inner, NoExpand(&params.replace));
                tree.set_inner_markup(id, &replaced);
                rewritten += 1;
            }
            if rewritten == 0 {
                return doc.clone();
            }
            debug!(document = %doc.name, elements = rewritten, "replaced text");
            doc.with_markup(tree.serialize())
        })
        .collect()
}

/// Replace regex matches inside the headers selected by `scope`.
///
/// The pattern is compiled before any document is touched; an invalid
/// pattern rejects the whole operation.
pub fn replace_in_headers(
    documents: &[Document],
    params: &HeaderReplaceParams,
) -> Result<Vec<Document>> {
    if params.find.is_empty() {
        return Ok(documents.to_vec());
    }
    let pattern = Regex::new(&params.find).map_err(|source| Error::InvalidPattern {
        pattern: params.find.clone(),
        source,
    })?;

    let replaced = documents
        .iter()
        .map(|doc| {
            let mut tree = Markup::parse(&doc.raw_markup);
            let headers = tree.find_all(|t, id| {
                t.header_level(id)
                    .is_some_and(|level| params.scope.contains(level))
            });
            let mut rewritten = 0usize;
            for id in headers {
                let inner = tree.inner_markup(id);
                if !pattern.is_match(&inner) {
                    continue;
                }
                let replaced = pattern.replace_all(&inner, params.replace.as_str());
                tree.set_inner_markup(id, &replaced);
                rewritten += 1;
            }
            if rewritten == 0 {
                return doc.clone();
            }
            debug!(
                document = %doc.name,
                headers = rewritten,
                scope = %params.scope,
                "replaced in headers"
            );
            doc.with_markup(tree.serialize())
        })
        .collect();
    Ok(replaced)
}
