#![forbid(unsafe_code)]

use std::sync::Arc;

use exegete_wire::PartialDocument;

/// Request lifecycle phase: `Idle → Streaming → {Resolved, Failed, Aborted}`.
///
/// The three terminal phases never transition further; a new request always
/// starts fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Streaming,
    Resolved,
    Failed,
    Aborted,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Failed | Self::Aborted)
    }
}

/// The single terminal outcome of a request.
#[derive(Debug, Clone)]
pub enum Outcome<D> {
    /// The authoritative document from the `complete` envelope.
    Resolved(D),
    /// Transport or protocol failure; carries a displayable message.
    Failed(String),
    /// Caller-driven cancellation. Not a user error.
    Aborted,
}

impl<D> Outcome<D> {
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Resolved(_) => Phase::Resolved,
            Self::Failed(_) => Phase::Failed,
            Self::Aborted => Phase::Aborted,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    #[must_use]
    pub fn into_document(self) -> Option<D> {
        match self {
            Self::Resolved(document) => Some(document),
            Self::Failed(_) | Self::Aborted => None,
        }
    }
}

/// One live progress notification.
#[derive(Debug, Clone)]
pub enum StreamUpdate {
    /// Fresh snapshot of the in-flight document.
    Document(PartialDocument),
    /// Backend progress hint (`comment` envelope); no document change.
    Progress(String),
}

/// Receives live [`StreamUpdate`] snapshots while the request streams.
pub type UpdateFn = Arc<dyn Fn(StreamUpdate) + Send + Sync>;

/// Receives exactly one terminal [`Outcome`].
pub type SettledFn<D> = Arc<dyn Fn(Outcome<D>) + Send + Sync>;
