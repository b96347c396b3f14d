//! Exclusion word matching and document name sanitizing.

/// Characters that cannot appear in an exported file name.
const ILLEGAL_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Maximum length of a sanitized name, in characters.
const MAX_NAME_CHARS: usize = 80;

/// A parsed, comma-separated list of exclusion words.
///
/// Terms are trimmed and lowercased; a haystack matches when any term is a
/// substring of its lowercased form. An empty list matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    terms: Vec<String>,
}

impl ExclusionList {
    pub fn parse(list: &str) -> Self {
        let terms = list
            .split(',')
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn matches(&self, haystack: &str) -> bool {
        if self.terms.is_empty() {
            return false;
        }
        let haystack = haystack.to_lowercase();
        self.terms.iter().any(|term| haystack.contains(term.as_str()))
    }
}

/// True if `haystack` contains any of the comma-separated words in `list`.
pub fn matches_exclusion(haystack: &str, list: &str) -> bool {
    ExclusionList::parse(list).matches(haystack)
}

/// Turn an arbitrary title into a bounded, file-system safe name.
///
/// Falls back to `file_{fallback_index}` when nothing usable is left.
pub fn sanitize_name(title: &str, fallback_index: usize) -> String {
    let name: String = title
        .chars()
        .filter(|c| !ILLEGAL_NAME_CHARS.contains(c))
        .take(MAX_NAME_CHARS)
        .collect();
    if name.is_empty() {
        format!("file_{fallback_index}")
    } else {
        name
    }
}
