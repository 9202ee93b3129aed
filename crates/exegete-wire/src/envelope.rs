#![forbid(unsafe_code)]

use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{WireError, WireResult},
    key::SectionId,
};

/// One parsed unit of the streaming protocol.
///
/// `D` is the resolved document shape carried by the `complete` envelope;
/// the other kinds are independent of the document class.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope<D> {
    /// Replaces a scalar header field.
    HeaderUpdate { section: String, content: String },
    /// Appends to a named section and updates its completion flag.
    SectionUpdate {
        section: SectionId,
        content: String,
        is_complete: bool,
    },
    /// Terminal success carrying the authoritative document.
    Complete { data: D },
    /// Terminal failure reported by the backend.
    Error { message: String },
    /// Progress hint; no state mutation.
    Comment { message: String },
}

impl<D> Envelope<D> {
    /// True for `complete` and `error`, which stop processing.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Error { .. })
    }
}

/// Classifies one decoded line.
///
/// # Errors
///
/// Returns [`WireError::MalformedLine`] on invalid JSON, a missing required
/// field, or an unknown `type`. Callers treat this as a diagnostic, never as
/// a stream failure.
pub fn parse_line<D: DeserializeOwned>(line: &str) -> WireResult<Envelope<D>> {
    serde_json::from_str(line).map_err(|err| WireError::malformed(line, err.to_string()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Doc {
        title: String,
    }

    #[rstest]
    fn parses_header_update() {
        let env: Envelope<Doc> =
            parse_line(r#"{"type":"header_update","section":"Title","content":"Genesis 1"}"#)
                .unwrap();
        assert!(matches!(
            env,
            Envelope::HeaderUpdate { section, content }
                if section == "Title" && content == "Genesis 1"
        ));
    }

    #[rstest]
    #[case(r#"{"type":"section_update","section":"S1","content":"In the ","is_complete":false}"#, false)]
    #[case(r#"{"type":"section_update","section":"S1","content":"beginning.","is_complete":true}"#, true)]
    fn parses_section_update(#[case] line: &str, #[case] complete: bool) {
        let env: Envelope<Doc> = parse_line(line).unwrap();
        assert!(matches!(
            env,
            Envelope::SectionUpdate { section, is_complete, .. }
                if section.as_str() == "S1" && is_complete == complete
        ));
    }

    #[rstest]
    fn parses_complete_with_data() {
        let env: Envelope<Doc> =
            parse_line(r#"{"type":"complete","data":{"title":"Genesis 1"}}"#).unwrap();
        match env {
            Envelope::Complete { data } => assert_eq!(data.title, "Genesis 1"),
            other => panic!("expected complete, got {other:?}"),
        }
        assert!(
            parse_line::<Doc>(r#"{"type":"complete","data":{"title":"x"}}"#)
                .unwrap()
                .is_terminal()
        );
    }

    #[rstest]
    fn parses_error_and_comment() {
        let err: Envelope<Doc> = parse_line(r#"{"type":"error","message":"boom"}"#).unwrap();
        assert!(err.is_terminal());

        let comment: Envelope<Doc> =
            parse_line(r#"{"type":"comment","message":"Analyzing…"}"#).unwrap();
        assert!(!comment.is_terminal());
    }

    #[rstest]
    #[case::not_json("not json at all")]
    #[case::unknown_type(r#"{"type":"telemetry","payload":1}"#)]
    #[case::missing_field(r#"{"type":"section_update","section":"S1"}"#)]
    #[case::missing_flag(r#"{"type":"section_update","section":"S1","content":"x"}"#)]
    #[case::bad_complete(r#"{"type":"complete","data":{"no_title":true}}"#)]
    fn malformed_lines_are_reported_not_fatal(#[case] line: &str) {
        let err = parse_line::<Doc>(line).unwrap_err();
        assert!(matches!(err, WireError::MalformedLine { .. }));
    }

    #[rstest]
    fn long_lines_are_truncated_in_the_error() {
        let line = format!("{{\"type\":\"x\",\"pad\":\"{}\"}}", "a".repeat(500));
        let WireError::MalformedLine { snippet, .. } = parse_line::<Doc>(&line).unwrap_err();
        assert!(snippet.chars().count() <= 121);
    }
}
