#![forbid(unsafe_code)]

use std::time::Duration;

use exegete_cache::DEFAULT_TTL;
use exegete_net::NetOptions;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::events::SessionEvent;

/// Configuration for a document session.
///
/// Used with `DocumentSession::<Profile>::new(config)`.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Base URL the profile's request path is appended to.
    pub base_url: Url,
    /// Network configuration.
    pub net: NetOptions,
    /// Cache entry lifetime.
    pub ttl: Duration,
    /// Cancellation token for graceful teardown of the whole session scope.
    pub cancel: Option<CancellationToken>,
    /// Events broadcast sender (optional - if not provided, one is created internally).
    pub events_tx: Option<broadcast::Sender<SessionEvent>>,
    /// Capacity of the events broadcast channel (used when events_tx is not provided).
    pub events_channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://127.0.0.1:8000/").expect("valid default URL"),
            net: NetOptions::default(),
            ttl: DEFAULT_TTL,
            cancel: None,
            events_tx: None,
            events_channel_capacity: 32,
        }
    }
}

impl SessionConfig {
    /// Create a new session config with a base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Set network options.
    pub fn with_net(mut self, net: NetOptions) -> Self {
        self.net = net;
        self
    }

    /// Set the cache entry lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the cache entry lifetime in whole days.
    pub fn with_ttl_days(mut self, days: u64) -> Self {
        self.ttl = Duration::from_secs(days * 24 * 60 * 60);
        self
    }

    /// Set cancellation token.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Set events broadcast sender.
    pub fn with_events(mut self, events_tx: broadcast::Sender<SessionEvent>) -> Self {
        self.events_tx = Some(events_tx);
        self
    }

    /// Set events broadcast channel capacity.
    pub fn with_events_channel_capacity(mut self, capacity: usize) -> Self {
        self.events_channel_capacity = capacity;
        self
    }
}
