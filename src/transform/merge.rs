//! Header merge: prefix target headers with the text of the preceding source header.

use tracing::debug;

use super::MergeParams;
use crate::document::Document;
use crate::dom::Markup;
use crate::text::ExclusionList;

/// Merge `source` headers into the `target` headers that follow them.
///
/// Walking each document in order, the trimmed text of the latest source
/// header is carried forward and prepended (with a space) to every target
/// header until the next source header replaces it. Targets whose text hits
/// the exclusion list are skipped without dropping the carried text. Source
/// headers are removed once the walk is done.
pub fn merge_headers(documents: &[Document], params: &MergeParams) -> Vec<Document> {
    let exclude = ExclusionList::parse(&params.exclude);
    documents
        .iter()
        .map(|doc| merge_document(doc, params, &exclude))
        .collect()
}

fn merge_document(doc: &Document, params: &MergeParams, exclude: &ExclusionList) -> Document {
    let mut tree = Markup::parse(&doc.raw_markup);
    let mut carried = String::new();
    let mut sources = Vec::new();
    let mut merged = 0usize;

    for id in tree.elements() {
        match tree.header_level(id) {
            Some(level) if level == params.source => {
                carried = tree.text_content(id).trim().to_string();
                sources.push(id);
            }
            Some(level) if level == params.target => {
                if carried.is_empty() || exclude.matches(&tree.text_content(id)) {
                    continue;
                }
                let inner = tree.inner_markup(id);
                tree.set_inner_markup(id, &format!("{carried} {inner}"));
                merged += 1;
            }
            _ => {}
        }
    }

    if sources.is_empty() && merged == 0 {
        return doc.clone();
    }

    debug!(
        document = %doc.name,
        removed = sources.len(),
        merged,
        "merged headers"
    );
    for id in sources {
        tree.remove(id);
    }
    doc.with_markup(tree.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HeaderLevel;

    fn merge(markup: &str, exclude: &str) -> String {
        let params = MergeParams {
            source: HeaderLevel::H4,
            target: HeaderLevel::H5,
            exclude: exclude.to_string(),
        };
        let docs = merge_headers(&[Document::new("doc", markup)], &params);
        docs[0].raw_markup.clone()
    }

    #[test]
    fn test_merge_into_following_target() {
        assert_eq!(merge("<h4>Intro</h4>\n<h5>Title</h5>", ""), "<h5>Intro Title</h5>");
    }

    #[test]
    fn test_carried_text_reaches_every_target() {
        assert_eq!(
            merge("<h4>Ch</h4><h5>a</h5><p>x</p><h5>b</h5>", ""),
            "<h5>Ch a</h5><p>x</p><h5>Ch b</h5>"
        );
    }

    #[test]
    fn test_next_source_replaces_carried_text() {
        assert_eq!(
            merge("<h4>One</h4><h5>a</h5><h4>Two</h4><h5>b</h5>", ""),
            "<h5>One a</h5><h5>Two b</h5>"
        );
    }

    #[test]
    fn test_excluded_target_keeps_carried_text() {
        assert_eq!(
            merge("<h4>Intro</h4><h5>skip this</h5><h5>Title</h5>", "skip"),
            "<h5>skip this</h5><h5>Intro Title</h5>"
        );
    }

    #[test]
    fn test_targets_before_any_source_untouched() {
        assert_eq!(
            merge("<h5>early</h5><h4>Intro</h4><h5>late</h5>", ""),
            "<h5>early</h5><h5>Intro late</h5>"
        );
    }

    #[test]
    fn test_source_text_is_trimmed_and_flattened() {
        assert_eq!(
            merge("<h4>  <b>Part</b> one  </h4><h5><i>Title</i></h5>", ""),
            "<h5>Part one <i>Title</i></h5>"
        );
    }

    #[test]
    fn test_empty_source_does_not_merge() {
        assert_eq!(merge("<h4>  </h4><h5>Title</h5>", ""), "<h5>Title</h5>");
    }

    #[test]
    fn test_no_matching_tags_is_unchanged() {
        let markup = "<p>plain<br/>text</p>";
        assert_eq!(merge(markup, ""), markup);
    }
}
