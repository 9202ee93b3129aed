#![forbid(unsafe_code)]

//! Session: cache short-circuit, request lifecycle, cancellation scope.

use std::{
    marker::PhantomData,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use exegete_cache::{ExpiringCache, MemoryStore};
use exegete_net::{HttpClient, Net};
use exegete_wire::StreamKey;
use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::SessionConfig,
    error::{SessionError, SessionResult},
    events::{EventSink, SessionEvent},
    outcome::{Outcome, SettledFn, UpdateFn},
    profile::DocumentProfile,
    runner,
};

/// One consumer of document streams.
///
/// Owns at most one live request: opening a new request supersedes (cancels)
/// the outstanding one, so two writers never mutate the same exposed state.
/// Dropping the session cancels the outstanding transfer.
///
/// Sessions do not deduplicate identical-key requests across instances; the
/// cache is last-writer-wins in that case.
pub struct DocumentSession<P: DocumentProfile, N: Net = HttpClient> {
    config: SessionConfig,
    net: Arc<N>,
    cache: Arc<ExpiringCache<P::Document>>,
    events_tx: broadcast::Sender<SessionEvent>,
    active: Arc<Mutex<Option<ActiveRequest>>>,
    next_request_id: AtomicU64,
    cancel: CancellationToken,
    _profile: PhantomData<fn() -> P>,
}

struct ActiveRequest {
    id: u64,
    key: StreamKey,
    token: CancellationToken,
}

impl<P: DocumentProfile> DocumentSession<P> {
    /// Create a session backed by a fresh [`HttpClient`].
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let net = HttpClient::new(config.net.clone());
        Self::with_net(config, net)
    }
}

impl<P: DocumentProfile, N: Net + 'static> DocumentSession<P, N> {
    /// Create a session over a caller-supplied transport.
    pub fn with_net(config: SessionConfig, net: N) -> Self {
        let cache = ExpiringCache::with_ttl(MemoryStore::new(), config.ttl);
        Self::with_parts(config, net, cache)
    }

    /// Create a session over a caller-supplied transport and cache instance.
    pub fn with_parts(
        config: SessionConfig,
        net: N,
        cache: ExpiringCache<P::Document>,
    ) -> Self {
        let events_tx = config.events_tx.clone().unwrap_or_else(|| {
            let (tx, _) = broadcast::channel(config.events_channel_capacity.max(1));
            tx
        });
        // Child of the caller's token, so tearing down the session never
        // cancels the caller's wider scope.
        let cancel = match &config.cancel {
            Some(token) => token.child_token(),
            None => CancellationToken::new(),
        };

        Self {
            config,
            net: Arc::new(net),
            cache: Arc::new(cache),
            events_tx,
            active: Arc::new(Mutex::new(None)),
            next_request_id: AtomicU64::new(0),
            cancel,
            _profile: PhantomData,
        }
    }

    /// Subscribe to session events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    /// The cache this session reads and writes.
    #[must_use]
    pub fn cache(&self) -> &ExpiringCache<P::Document> {
        &self.cache
    }

    /// Request the document for `key`.
    ///
    /// An unexpired cache hit settles synchronously with `Resolved` and opens
    /// no stream. Otherwise the outstanding request (if any) is cancelled
    /// first, then a transfer is spawned: `on_update` receives live snapshots
    /// while it streams and `on_settled` receives exactly one terminal
    /// [`Outcome`].
    pub fn open(
        &self,
        key: StreamKey,
        on_update: UpdateFn,
        on_settled: SettledFn<P::Document>,
    ) -> RequestHandle {
        let events = EventSink::new(&key, self.events_tx.clone());

        if let Some(document) = self.cache.lookup(&key) {
            debug!(key = %key, "cache hit, no stream opened");
            events.send(|key| SessionEvent::CacheHit { key });
            on_settled(Outcome::Resolved(document));
            return RequestHandle::pre_settled();
        }

        let token = self.cancel.child_token();
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        {
            let mut active = self.active.lock();
            if let Some(previous) = active.take() {
                debug!(key = %previous.key, "superseding outstanding request");
                previous.token.cancel();
            }
            *active = Some(ActiveRequest {
                id: request_id,
                key: key.clone(),
                token: token.clone(),
            });
        }

        let (settled_tx, settled_rx) = watch::channel(false);
        let url = request_url::<P>(&self.config.base_url, &key);
        let net = Arc::clone(&self.net);
        let cache = Arc::clone(&self.cache);
        let active = Arc::clone(&self.active);
        let task_token = token.clone();

        tokio::spawn(async move {
            let outcome =
                run_request::<P, N>(net.as_ref(), url, &key, &task_token, &on_update, &events)
                    .await;

            // A cancellation that raced with a failure settles as Aborted;
            // a complete that already won stays Resolved.
            let outcome = match outcome {
                Outcome::Resolved(document) => {
                    cache.write(&key, &document);
                    Outcome::Resolved(document)
                }
                _ if task_token.is_cancelled() => Outcome::Aborted,
                outcome => outcome,
            };

            {
                let mut active = active.lock();
                if active.as_ref().is_some_and(|request| request.id == request_id) {
                    *active = None;
                }
            }

            match &outcome {
                Outcome::Resolved(_) => events.send(|key| SessionEvent::Resolved { key }),
                Outcome::Failed(error) => events.send(|key| SessionEvent::Failed {
                    key,
                    error: error.clone(),
                }),
                Outcome::Aborted => events.send(|key| SessionEvent::Aborted { key }),
            }
            on_settled(outcome);
            let _ = settled_tx.send(true);
        });

        RequestHandle {
            token,
            settled: settled_rx,
        }
    }
}

impl<P: DocumentProfile, N: Net> Drop for DocumentSession<P, N> {
    fn drop(&mut self) {
        // Tearing down the consumer cancels the outstanding transfer.
        self.cancel.cancel();
    }
}

async fn run_request<P: DocumentProfile, N: Net>(
    net: &N,
    url: SessionResult<Url>,
    key: &StreamKey,
    cancel: &CancellationToken,
    on_update: &UpdateFn,
    events: &EventSink,
) -> Outcome<P::Document> {
    let url = match url {
        Ok(url) => url,
        Err(err) => return Outcome::Failed(err.to_string()),
    };

    events.send(|key| SessionEvent::Started { key });
    debug!(key = %key, url = %url, "opening document stream");

    let opened = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Outcome::Aborted,
        opened = net.stream(url, None) => opened,
    };
    let stream = match opened {
        Ok(stream) => stream,
        Err(err) => {
            if cancel.is_cancelled() {
                return Outcome::Aborted;
            }
            warn!(key = %key, error = %err, "transport failure opening stream");
            return Outcome::Failed(SessionError::Net(err).to_string());
        }
    };

    runner::drive::<P::Document>(stream, cancel, P::SECTIONS, on_update, events).await
}

fn request_url<P: DocumentProfile>(base: &Url, key: &StreamKey) -> SessionResult<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| SessionError::InvalidBaseUrl(base.to_string()))?;
        segments.pop_if_empty();
        for part in P::request_path(key) {
            segments.push(&part);
        }
    }
    Ok(url)
}

/// Handle to one opened request.
///
/// Cancellation is cooperative and idempotent: calling [`cancel`] twice, or
/// after natural settlement, has no effect and triggers no further callbacks.
///
/// [`cancel`]: RequestHandle::cancel
#[derive(Debug, Clone)]
pub struct RequestHandle {
    token: CancellationToken,
    settled: watch::Receiver<bool>,
}

impl RequestHandle {
    /// Handle for a request that settled synchronously (cache hit).
    fn pre_settled() -> Self {
        let (_, settled) = watch::channel(true);
        Self {
            token: CancellationToken::new(),
            settled,
        }
    }

    /// Signal the transfer to stop producing; the request settles `Aborted`.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the terminal outcome has been delivered.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        *self.settled.borrow()
    }

    /// Wait until the terminal outcome has been delivered.
    pub async fn settled(&self) {
        let mut settled = self.settled.clone();
        loop {
            if *settled.borrow_and_update() {
                return;
            }
            if settled.changed().await.is_err() {
                return;
            }
        }
    }
}
