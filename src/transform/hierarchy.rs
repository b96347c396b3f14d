//! Header hierarchy normalization.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use super::NormalizeParams;
use crate::document::{Document, HeaderLevel};
use crate::dom::Markup;

/// Renumber header levels so the levels in use form a gapless run from `h1`.
///
/// The distinct non-skipped levels of each document are ranked in level
/// order and the i-th becomes `h{i+1}`. Ranked headers are rebuilt as fresh
/// elements of the new tag with their children moved over; skipped levels
/// are neither touched nor counted. Running it again with the same skip set
/// changes nothing as long as no skipped level falls inside the renumbered
/// range: skipping `h1` turns `h2,h3` into `h1,h2`, and a second run then
/// moves that `h2` up to `h1`.
pub fn normalize_hierarchy(documents: &[Document], params: &NormalizeParams) -> Vec<Document> {
    documents
        .iter()
        .map(|doc| normalize_document(doc, &params.skip))
        .collect()
}

fn normalize_document(doc: &Document, skip: &[HeaderLevel]) -> Document {
    let mut tree = Markup::parse(&doc.raw_markup);
    let headers: Vec<_> = tree
        .headers()
        .into_iter()
        .filter_map(|id| tree.header_level(id).map(|level| (id, level)))
        .collect();

    let used: BTreeSet<HeaderLevel> = headers
        .iter()
        .map(|&(_, level)| level)
        .filter(|level| !skip.contains(level))
        .collect();
    if used.is_empty() {
        return doc.clone();
    }

    let ranks: HashMap<HeaderLevel, HeaderLevel> = used
        .iter()
        .enumerate()
        .filter_map(|(i, &level)| HeaderLevel::from_rank(i + 1).map(|rank| (level, rank)))
        .collect();

    for (id, level) in headers {
        if let Some(&rank) = ranks.get(&level) {
            let replacement = tree.create_element(rank.tag());
            tree.replace(id, replacement);
        }
    }

    debug!(document = %doc.name, levels = ?ranks, "normalized hierarchy");
    doc.with_markup(tree.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(markup: &str, skip: &[HeaderLevel]) -> String {
        let params = NormalizeParams {
            skip: skip.to_vec(),
        };
        normalize_hierarchy(&[Document::new("doc", markup)], &params)[0]
            .raw_markup
            .clone()
    }

    #[test]
    fn test_gaps_are_closed() {
        assert_eq!(
            normalize("<h3>a</h3><h5>b</h5><h3>c</h3>", &[]),
            "<h1>a</h1><h2>b</h2><h1>c</h1>"
        );
    }

    #[test]
    fn test_rank_follows_level_not_order_of_appearance() {
        assert_eq!(
            normalize("<h6>deep</h6><h4>mid</h4>", &[]),
            "<h2>deep</h2><h1>mid</h1>"
        );
    }

    #[test]
    fn test_skipped_levels_untouched_and_uncounted() {
        assert_eq!(
            normalize(r#"<h1 id="t">Title</h1><h3>a</h3><h5>b</h5>"#, &[HeaderLevel::H1]),
            r#"<h1 id="t">Title</h1><h1>a</h1><h2>b</h2>"#
        );
    }

    #[test]
    fn test_children_moved_unchanged() {
        assert_eq!(
            normalize("<h4>a <b>bold</b><br>c</h4>", &[]),
            "<h1>a <b>bold</b><br>c</h1>"
        );
    }

    #[test]
    fn test_nested_headers_both_renamed() {
        assert_eq!(
            normalize("<div><h3>x</h3></div><h4>y</h4>", &[]),
            "<div><h1>x</h1></div><h2>y</h2>"
        );
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("<h2>a</h2><h4>b</h4><h6>c</h6>", &[HeaderLevel::H2]);
        let twice = normalize(&once, &[HeaderLevel::H2]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_skipped_level_inside_range_shifts_on_rerun() {
        let once = normalize("<h2>a</h2><h3>b</h3>", &[HeaderLevel::H1]);
        assert_eq!(once, "<h1>a</h1><h2>b</h2>");
        let twice = normalize(&once, &[HeaderLevel::H1]);
        assert_eq!(twice, "<h1>a</h1><h1>b</h1>");
    }

    #[test]
    fn test_no_headers_unchanged() {
        let markup = "<p>text<br/></p>";
        assert_eq!(normalize(markup, &[]), markup);
    }
}
