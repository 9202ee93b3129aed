#![forbid(unsafe_code)]

use thiserror::Error;

/// Wire protocol errors.
///
/// A malformed line is recoverable at the stream level: the caller logs it and
/// keeps reading. One bad line never invalidates an otherwise valid stream.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed line {snippet:?}: {reason}")]
    MalformedLine { snippet: String, reason: String },
}

impl WireError {
    /// Creates a malformed-line error, truncating the offending line for logs.
    pub fn malformed(line: &str, reason: impl Into<String>) -> Self {
        const MAX_SNIPPET: usize = 120;
        let snippet = if line.len() > MAX_SNIPPET {
            let mut end = MAX_SNIPPET;
            while !line.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}…", &line[..end])
        } else {
            line.to_string()
        };
        Self::MalformedLine {
            snippet,
            reason: reason.into(),
        }
    }
}

pub type WireResult<T> = Result<T, WireError>;
