#![forbid(unsafe_code)]

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Identifier for one named region of a document.
///
/// Section names are case-sensitive (the backend emits them verbatim, e.g.
/// `WordHeader`); only surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into().trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite request identifier: document class plus positional coordinates
/// (book, chapter, verse, word, …).
///
/// Every part is normalized on construction (trimmed, lowercased, inner
/// whitespace collapsed to `-`). The normalized rendering
/// `class-coord-coord-…` serves as both the cache key and the request
/// correlator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamKey {
    class: String,
    coords: Vec<String>,
    rendered: String,
}

impl StreamKey {
    pub fn new<C, I, S>(class: C, coords: I) -> Self
    where
        C: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let class = normalize_part(class.as_ref());
        let coords: Vec<String> = coords
            .into_iter()
            .map(|part| normalize_part(part.as_ref()))
            .collect();

        let mut rendered = class.clone();
        for coord in &coords {
            rendered.push('-');
            rendered.push_str(coord);
        }

        Self {
            class,
            coords,
            rendered,
        }
    }

    /// Document class, e.g. `word-analysis`.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Normalized positional coordinates, in order.
    #[must_use]
    pub fn coords(&self) -> &[String] {
        &self.coords
    }

    /// Normalized rendering used as the cache key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

fn normalize_part(part: &str) -> String {
    part.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain(vec!["GEN", "1", "ESV"], "passage-gen-1-esv")]
    #[case::whitespace(vec![" Gen ", "1", "  esv"], "passage-gen-1-esv")]
    #[case::inner_whitespace(vec!["1 Kings", "2"], "passage-1-kings-2")]
    fn key_is_normalized(#[case] coords: Vec<&str>, #[case] expected: &str) {
        let key = StreamKey::new("Passage", coords);
        assert_eq!(key.as_str(), expected);
    }

    #[rstest]
    fn equal_after_normalization() {
        let a = StreamKey::new("strongs", ["GEN", "1", "1", "Beginning "]);
        let b = StreamKey::new("Strongs", ["gen", "1", "1", "beginning"]);
        assert_eq!(a, b);
        assert_eq!(a.as_str(), b.as_str());
    }

    #[rstest]
    fn coords_are_preserved_in_order() {
        let key = StreamKey::new("chapter-context", ["Exo", "20"]);
        assert_eq!(key.class(), "chapter-context");
        assert_eq!(key.coords(), ["exo", "20"]);
    }

    #[rstest]
    fn section_id_trims_but_keeps_case() {
        let id = SectionId::new("  WordHeader ");
        assert_eq!(id.as_str(), "WordHeader");
    }
}
