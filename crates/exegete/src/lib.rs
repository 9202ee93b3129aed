#![forbid(unsafe_code)]

//! # Exegete
//!
//! Client library for incremental streaming of structured study documents.
//!
//! A backend generates a document as ordered named sections plus scalar
//! header fields and streams it as LF-framed JSON envelopes (plain NDJSON or
//! SSE `data:` framing). This crate assembles live partial snapshots as bytes
//! arrive, drives each request to exactly one terminal outcome, and
//! short-circuits repeat requests through a TTL cache.
//!
//! ## Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use exegete::prelude::*;
//!
//! let config = SessionConfig::new("http://127.0.0.1:8000/api/v1/".parse()?);
//! let session: DocumentSession<WordAnalysis> = DocumentSession::new(config);
//!
//! let handle = session.open(
//!     StreamKey::new("word-analysis", ["GEN", "1", "1", "beginning"]),
//!     Arc::new(|update| { /* render snapshot */ }),
//!     Arc::new(|outcome| { /* exactly one terminal outcome */ }),
//! );
//! handle.settled().await;
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod cache {
    pub use exegete_cache::*;
}

pub mod net {
    pub use exegete_net::*;
}

pub mod wire {
    pub use exegete_wire::*;
}

// ── Session ─────────────────────────────────────────────────────────────

mod config;
mod error;
mod events;
mod outcome;
mod profile;
mod profiles;
mod runner;
mod session;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use events::SessionEvent;
pub use outcome::{Outcome, Phase, SettledFn, StreamUpdate, UpdateFn};
pub use profile::DocumentProfile;
pub use profiles::{ChapterContext, ChapterIntro, IntroPara, WordAnalysis, WordStudy};
pub use session::{DocumentSession, RequestHandle};

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use exegete_wire::{PartialDocument, SectionId, StreamKey};

    pub use crate::{
        DocumentProfile, DocumentSession, Outcome, RequestHandle, SessionConfig, SessionEvent,
        StreamUpdate,
    };
}
