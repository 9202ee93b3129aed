#![forbid(unsafe_code)]

//! Wire protocol for incremental structured-document streams.
//!
//! The backend emits a UTF-8 body of LF-terminated lines, each either
//! `<json>` or `data: <json>` (SSE-compatible framing). This crate turns raw
//! byte chunks into [`Envelope`] events and folds them into a
//! [`PartialDocument`] snapshot.

mod envelope;
mod error;
mod frame;
mod key;
mod partial;

pub use envelope::{Envelope, parse_line};
pub use error::{WireError, WireResult};
pub use frame::{DATA_PREFIX, LineDecoder};
pub use key::{SectionId, StreamKey};
pub use partial::{PartialDocument, SectionState};
