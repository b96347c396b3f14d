use std::fmt;
use std::str::FromStr;

#[cfg(feature = "recipe")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One named unit of markup being edited.
///
/// Documents have no persistent identity: a batch is an ordered list and
/// operations replace the whole list at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "recipe", derive(Serialize, Deserialize))]
pub struct Document {
    /// Human title, also used as the export file stem.
    pub name: String,
    /// The full markup fragment.
    #[cfg_attr(feature = "recipe", serde(alias = "content"))]
    pub raw_markup: String,
}

impl Document {
    pub fn new(name: impl Into<String>, raw_markup: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_markup: raw_markup.into(),
        }
    }

    /// Same name, new markup.
    pub fn with_markup(&self, raw_markup: String) -> Self {
        Self {
            name: self.name.clone(),
            raw_markup,
        }
    }
}

/// A heading level, `h1` through `h6`.
///
/// Ordering follows the level number, which for single-digit levels is the
/// same as ordering the tag strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "recipe", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "recipe", serde(rename_all = "lowercase"))]
pub enum HeaderLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeaderLevel {
    pub const ALL: [HeaderLevel; 6] = [
        HeaderLevel::H1,
        HeaderLevel::H2,
        HeaderLevel::H3,
        HeaderLevel::H4,
        HeaderLevel::H5,
        HeaderLevel::H6,
    ];

    /// Level for a 1-based rank (`1` is `h1`).
    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank.checked_sub(1)?).copied()
    }

    /// The 1-based rank of this level.
    pub fn rank(self) -> usize {
        self as usize + 1
    }

    /// Lowercase tag name.
    pub fn tag(self) -> &'static str {
        match self {
            HeaderLevel::H1 => "h1",
            HeaderLevel::H2 => "h2",
            HeaderLevel::H3 => "h3",
            HeaderLevel::H4 => "h4",
            HeaderLevel::H5 => "h5",
            HeaderLevel::H6 => "h6",
        }
    }

    /// Case-insensitive lookup from a tag name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.tag().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for HeaderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for HeaderLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s.trim()).ok_or_else(|| Error::InvalidHeaderTag(s.to_string()))
    }
}

/// Which headers a scoped operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "recipe", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "recipe", serde(try_from = "String", into = "String"))]
pub enum HeaderScope {
    /// Every `h1`..`h6`.
    #[default]
    All,
    Level(HeaderLevel),
}

impl HeaderScope {
    pub fn contains(self, level: HeaderLevel) -> bool {
        match self {
            HeaderScope::All => true,
            HeaderScope::Level(scoped) => scoped == level,
        }
    }
}

impl fmt::Display for HeaderScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderScope::All => f.write_str("all"),
            HeaderScope::Level(level) => level.fmt(f),
        }
    }
}

impl FromStr for HeaderScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(HeaderScope::All);
        }
        HeaderLevel::from_tag(s)
            .map(HeaderScope::Level)
            .ok_or_else(|| Error::InvalidScope(s.to_string()))
    }
}

impl TryFrom<String> for HeaderScope {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HeaderScope> for String {
    fn from(scope: HeaderScope) -> Self {
        scope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_rank_round_trip() {
        for level in HeaderLevel::ALL {
            assert_eq!(HeaderLevel::from_rank(level.rank()), Some(level));
        }
        assert_eq!(HeaderLevel::from_rank(0), None);
        assert_eq!(HeaderLevel::from_rank(7), None);
    }

    #[test]
    fn test_level_from_tag_is_case_insensitive() {
        assert_eq!(HeaderLevel::from_tag("H3"), Some(HeaderLevel::H3));
        assert_eq!(HeaderLevel::from_tag("h6"), Some(HeaderLevel::H6));
        assert_eq!(HeaderLevel::from_tag("p"), None);
        assert!("h7".parse::<HeaderLevel>().is_err());
    }

    #[test]
    fn test_level_order_matches_tag_order() {
        let mut by_level = HeaderLevel::ALL.to_vec();
        by_level.reverse();
        by_level.sort();
        let mut by_tag = HeaderLevel::ALL.to_vec();
        by_tag.sort_by_key(|l| l.tag());
        assert_eq!(by_level, by_tag);
    }

    #[test]
    fn test_scope_parse() {
        assert_eq!("all".parse::<HeaderScope>().unwrap(), HeaderScope::All);
        assert_eq!(
            "h2".parse::<HeaderScope>().unwrap(),
            HeaderScope::Level(HeaderLevel::H2)
        );
        assert!(matches!(
            "div".parse::<HeaderScope>(),
            Err(Error::InvalidScope(_))
        ));
    }

    #[test]
    fn test_scope_contains() {
        assert!(HeaderScope::All.contains(HeaderLevel::H5));
        assert!(HeaderScope::Level(HeaderLevel::H2).contains(HeaderLevel::H2));
        assert!(!HeaderScope::Level(HeaderLevel::H2).contains(HeaderLevel::H3));
    }
}
