#![forbid(unsafe_code)]

use indexmap::IndexMap;

use crate::{envelope::Envelope, key::SectionId};

/// Accumulated content of one named section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionState {
    pub content: String,
    pub complete: bool,
}

/// The in-flight document built up from `header_update`/`section_update`
/// envelopes.
///
/// Headers and sections are exposed in first-seen order; a later update to an
/// earlier entry does not move it. State is strictly append-only until the
/// stream settles: nothing here truncates or removes prior content.
#[derive(Debug, Clone, Default)]
pub struct PartialDocument {
    headers: IndexMap<String, String>,
    sections: IndexMap<SectionId, SectionState>,
}

impl PartialDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one envelope into the snapshot. `complete`, `error` and
    /// `comment` leave the state untouched; the runner handles those.
    pub fn apply<D>(&mut self, envelope: &Envelope<D>) {
        match envelope {
            Envelope::HeaderUpdate { section, content } => {
                self.headers.insert(section.clone(), content.clone());
            }
            Envelope::SectionUpdate {
                section,
                content,
                is_complete,
            } => {
                let state = self.sections.entry(section.clone()).or_default();
                state.content.push_str(content);
                state.complete = *is_complete;
            }
            Envelope::Complete { .. } | Envelope::Error { .. } | Envelope::Comment { .. } => {}
        }
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&SectionState> {
        self.sections.get(name)
    }

    /// Scalar headers in first-seen order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sections in first-seen order.
    pub fn sections(&self) -> impl Iterator<Item = (&SectionId, &SectionState)> {
        self.sections.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.sections.is_empty()
    }
}
