//! Split documents at a boundary header.
//!
//! Boundaries are found textually, by matching the first complete
//! `<hN ...>...</hN>` pair with a lazy pattern. A boundary that itself
//! contains a nested element of the same tag ends at the inner close tag;
//! downstream tooling relies on this, so it is kept as-is.

use regex_lite::Regex;
use tracing::debug;

use super::SplitParams;
use crate::document::{Document, HeaderLevel};
use crate::dom::Markup;
use crate::error::{Error, Result};
use crate::text::{ExclusionList, sanitize_name};

/// Deepest header level that can act as a split boundary.
const MAX_SPLIT_LEVEL: HeaderLevel = HeaderLevel::H4;

/// Split every document at its `params.tag` headers.
///
/// Each boundary that is not excluded starts a new output document named
/// after the boundary text (prefixed by the book name, if any). Outputs of
/// all documents are concatenated in input order; documents that yield no
/// content produce nothing.
pub fn split_documents(documents: &[Document], params: &SplitParams) -> Result<Vec<Document>> {
    if params.tag > MAX_SPLIT_LEVEL {
        return Err(Error::UnsupportedSplitLevel(params.tag));
    }
    let splitter = Splitter::new(params)?;

    let mut output = Vec::new();
    for doc in documents {
        let before = output.len();
        splitter.split_into(doc, &mut output);
        debug!(document = %doc.name, parts = output.len() - before, "split document");
    }
    Ok(output)
}

struct Splitter<'a> {
    params: &'a SplitParams,
    boundary: Regex,
    header_open: Regex,
    open_prefix: String,
    close_tag: String,
    exclude: ExclusionList,
}

impl<'a> Splitter<'a> {
    fn new(params: &'a SplitParams) -> Result<Self> {
        let tag = params.tag.tag();
        Ok(Self {
            params,
            boundary: compile(&format!("(?i)<{tag}[^>]*>.*?</{tag}>"))?,
            header_open: compile("(?i)<h[1-6][^>]*>")?,
            open_prefix: format!("<{tag}"),
            close_tag: format!("</{tag}>"),
            exclude: ExclusionList::parse(&params.exclude),
        })
    }

    fn split_into(&self, doc: &Document, output: &mut Vec<Document>) {
        let book_name = self.params.book_name.as_deref().filter(|s| !s.is_empty());
        let author = self.params.author.as_deref().filter(|s| !s.is_empty());

        let mut content = String::new();
        let mut title = doc.name.clone();
        let mut index = 0usize;

        for part in self.parts(&doc.raw_markup) {
            if !self.starts_unit(part) {
                content.push_str(part);
                continue;
            }

            emit(output, &title, index, &content);

            let title_text = plain_text(part);
            content = match book_name {
                Some(book) => {
                    let open = self
                        .header_open
                        .find(part)
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_else(|| format!("<{}>", self.params.tag));
                    format!("{open}{book} {title_text}{}", self.close_tag)
                }
                None => part.to_string(),
            };

            let base = if title_text.is_empty() {
                doc.name.as_str()
            } else {
                title_text.as_str()
            };
            title = match book_name {
                Some(book) => format!("{book} {base}"),
                None => base.to_string(),
            };

            if let Some(author) = author {
                content.push_str("\n<p>");
                content.push_str(author);
                content.push_str("</p>");
            }
            index += 1;
        }

        emit(output, &title, index, &content);
    }

    /// Alternating between-boundary and boundary slices of `markup`.
    fn parts<'m>(&self, markup: &'m str) -> Vec<&'m str> {
        let mut parts = Vec::new();
        let mut last = 0;
        for m in self.boundary.find_iter(markup) {
            parts.push(&markup[last..m.start()]);
            parts.push(m.as_str());
            last = m.end();
        }
        parts.push(&markup[last..]);
        parts
    }

    fn starts_unit(&self, part: &str) -> bool {
        let opens = part
            .get(..self.open_prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(&self.open_prefix));
        opens && !self.exclude.matches(part)
    }
}

fn emit(output: &mut Vec<Document>, title: &str, index: usize, content: &str) {
    let content = content.trim();
    if !content.is_empty() {
        output.push(Document::new(sanitize_name(title, index), content));
    }
}

fn plain_text(markup: &str) -> String {
    let tree = Markup::parse(markup);
    tree.text_content(tree.root()).trim().to_string()
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(markup: &str, params: &SplitParams) -> Vec<(String, String)> {
        split_documents(&[Document::new("Source", markup)], params)
            .unwrap()
            .into_iter()
            .map(|d| (d.name, d.raw_markup))
            .collect()
    }

    fn h2() -> SplitParams {
        SplitParams {
            tag: HeaderLevel::H2,
            ..SplitParams::default()
        }
    }

    #[test]
    fn test_split_on_boundaries() {
        assert_eq!(
            split("<h2>A</h2>x<h2>B</h2>y", &h2()),
            vec![
                ("A".to_string(), "<h2>A</h2>x".to_string()),
                ("B".to_string(), "<h2>B</h2>y".to_string()),
            ]
        );
    }

    #[test]
    fn test_preamble_keeps_document_name() {
        let out = split("<p>front matter</p><h2>A</h2>x", &h2());
        assert_eq!(out[0], ("Source".to_string(), "<p>front matter</p>".to_string()));
        assert_eq!(out[1].0, "A");
    }

    #[test]
    fn test_book_name_rebuilds_boundary() {
        let params = SplitParams {
            book_name: Some("Book".to_string()),
            ..h2()
        };
        let out = split(r#"<h2 class="c">A <i>x</i></h2>body"#, &params);
        assert_eq!(
            out,
            vec![(
                "Book A x".to_string(),
                r#"<h2 class="c">Book A x</h2>body"#.to_string()
            )]
        );
    }

    #[test]
    fn test_author_paragraph_added() {
        let params = SplitParams {
            author: Some("R. Author".to_string()),
            ..h2()
        };
        let out = split("<h2>A</h2>x", &params);
        assert_eq!(out[0].1, "<h2>A</h2>\n<p>R. Author</p>x");
    }

    #[test]
    fn test_excluded_boundary_does_not_split() {
        let params = SplitParams {
            exclude: "appendix".to_string(),
            ..h2()
        };
        let out = split("<h2>A</h2>x<h2>Appendix</h2>y", &params);
        assert_eq!(
            out,
            vec![("A".to_string(), "<h2>A</h2>x<h2>Appendix</h2>y".to_string())]
        );
    }

    #[test]
    fn test_case_insensitive_boundaries() {
        let out = split("<H2>A</H2>x<h2>B</h2>", &h2());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].1, "<H2>A</H2>x");
    }

    #[test]
    fn test_empty_title_falls_back_to_document_name() {
        let out = split("<h2> </h2>x", &h2());
        assert_eq!(out[0].0, "Source");
    }

    #[test]
    fn test_illegal_title_characters_are_sanitized() {
        let out = split("<h2>A/B: C?</h2>x", &h2());
        assert_eq!(out[0].0, "AB C");
    }

    #[test]
    fn test_no_boundaries_passes_through_trimmed() {
        let out = split("  <p>only</p>\n", &h2());
        assert_eq!(out, vec![("Source".to_string(), "<p>only</p>".to_string())]);
    }

    #[test]
    fn test_blank_document_yields_nothing() {
        assert!(split(" \n ", &h2()).is_empty());
    }

    #[test]
    fn test_nested_same_tag_ends_boundary_early() {
        let out = split("<h2>a<h2>b</h2>c</h2>rest", &h2());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].1, "<h2>a<h2>b</h2>c</h2>rest");
    }

    #[test]
    fn test_outputs_concatenate_across_documents() {
        let docs = [
            Document::new("one", "<h2>A</h2>a"),
            Document::new("two", "<h2>B</h2>b<h2>C</h2>c"),
        ];
        let names: Vec<_> = split_documents(&docs, &h2())
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_deep_split_level_rejected() {
        let params = SplitParams {
            tag: HeaderLevel::H5,
            ..SplitParams::default()
        };
        let err = split_documents(&[Document::new("x", "<h5>a</h5>")], &params).unwrap_err();
        assert!(matches!(err, Error::UnsupportedSplitLevel(HeaderLevel::H5)));
    }
}
