#![forbid(unsafe_code)]

use thiserror::Error;

/// Session orchestration errors.
///
/// Only transport and protocol failures ever reach the caller, and they do so
/// as [`Outcome::Failed`](crate::Outcome::Failed) messages; malformed lines
/// and cache corruption are absorbed internally.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("network error: {0}")]
    Net(#[from] exegete_net::NetError),

    #[error("cannot-be-a-base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("stream ended unexpectedly")]
    UnexpectedEof,
}

pub type SessionResult<T> = Result<T, SessionError>;
