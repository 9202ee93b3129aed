#![forbid(unsafe_code)]

//! The streaming state machine: pumps one byte stream to a terminal outcome.
//!
//! Decode → parse → accumulate runs strictly sequentially; protocol
//! correctness depends on processing lines in arrival order. The only
//! suspension points are the chunk read and the cancellation branch.

use exegete_net::ByteStream;
use exegete_wire::{Envelope, LineDecoder, PartialDocument, parse_line};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    error::SessionError,
    events::{EventSink, SessionEvent},
    outcome::{Outcome, StreamUpdate, UpdateFn},
};

/// Drives an open byte stream until cancellation, a terminal envelope,
/// transport failure, or end of transfer.
///
/// Clean EOF without a `complete`/`error` envelope is a failure: natural end
/// of stream is never silently treated as success.
pub(crate) async fn drive<D: DeserializeOwned>(
    mut stream: ByteStream,
    cancel: &CancellationToken,
    sections: &'static [&'static str],
    on_update: &UpdateFn,
    events: &EventSink,
) -> Outcome<D> {
    let mut decoder = LineDecoder::new();
    let mut partial = PartialDocument::new();

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("stream cancelled");
                return Outcome::Aborted;
            }
            next = stream.next() => next,
        };

        let chunk = match next {
            None => break,
            Some(Ok(chunk)) => chunk,
            Some(Err(err)) => {
                if cancel.is_cancelled() {
                    return Outcome::Aborted;
                }
                warn!(error = %err, "transport failure mid-stream");
                return Outcome::Failed(SessionError::Net(err).to_string());
            }
        };

        for line in decoder.feed(&chunk) {
            if let Some(outcome) = handle_line(&line, &mut partial, sections, on_update, events) {
                return outcome;
            }
        }
    }

    // End of transfer: flush the carried partial line, then decide.
    if let Some(line) = decoder.finish()
        && let Some(outcome) = handle_line(&line, &mut partial, sections, on_update, events)
    {
        return outcome;
    }

    debug!("stream ended without a terminal envelope");
    Outcome::Failed(SessionError::UnexpectedEof.to_string())
}

/// Folds one decoded line. Returns `Some` on a terminal envelope.
fn handle_line<D: DeserializeOwned>(
    line: &str,
    partial: &mut PartialDocument,
    sections: &'static [&'static str],
    on_update: &UpdateFn,
    events: &EventSink,
) -> Option<Outcome<D>> {
    let envelope = match parse_line::<D>(line) {
        Ok(envelope) => envelope,
        Err(err) => {
            // One bad line never invalidates an otherwise valid stream.
            warn!(error = %err, "skipping malformed line");
            return None;
        }
    };

    match envelope {
        Envelope::Complete { data } => Some(Outcome::Resolved(data)),
        Envelope::Error { message } => Some(Outcome::Failed(message)),
        Envelope::Comment { message } => {
            events.send(|key| SessionEvent::Comment {
                key,
                message: message.clone(),
            });
            on_update(StreamUpdate::Progress(message));
            None
        }
        envelope => {
            match &envelope {
                Envelope::HeaderUpdate { section, .. } => {
                    events.send(|key| SessionEvent::HeaderUpdate {
                        key,
                        section: section.clone(),
                    });
                }
                Envelope::SectionUpdate {
                    section,
                    is_complete,
                    ..
                } => {
                    if !sections.contains(&section.as_str()) {
                        debug!(section = %section, "section not in profile set");
                    }
                    events.send(|key| SessionEvent::SectionUpdate {
                        key,
                        section: section.to_string(),
                        complete: *is_complete,
                    });
                }
                _ => {}
            }
            partial.apply(&envelope);
            on_update(StreamUpdate::Document(partial.clone()));
            None
        }
    }
}
