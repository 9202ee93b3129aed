#![forbid(unsafe_code)]

use exegete_wire::StreamKey;
use tokio::sync::broadcast;

/// Events emitted while a document request runs.
///
/// Broadcast on the session's event channel; dropped silently when nobody
/// subscribes. `key` is the normalized stream-key rendering.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// Cache miss; the transfer was opened.
    Started { key: String },
    /// Lookup satisfied from the cache; no stream opened.
    CacheHit { key: String },
    /// Scalar header field replaced.
    HeaderUpdate { key: String, section: String },
    /// Section content appended.
    SectionUpdate {
        key: String,
        section: String,
        complete: bool,
    },
    /// Backend progress hint.
    Comment { key: String, message: String },
    /// Terminal: document delivered and cache-written.
    Resolved { key: String },
    /// Terminal: transport or protocol failure.
    Failed { key: String, error: String },
    /// Terminal: caller-driven cancellation.
    Aborted { key: String },
}

/// Per-request publisher binding one key to the session's event channel.
#[derive(Clone)]
pub(crate) struct EventSink {
    key: String,
    tx: broadcast::Sender<SessionEvent>,
}

impl EventSink {
    pub(crate) fn new(key: &StreamKey, tx: broadcast::Sender<SessionEvent>) -> Self {
        Self {
            key: key.as_str().to_string(),
            tx,
        }
    }

    pub(crate) fn send(&self, make: impl FnOnce(String) -> SessionEvent) {
        let _ = self.tx.send(make(self.key.clone()));
    }
}
