//! Theme change broadcast
//!
//! Contexts never share memory; a theme change reaches other contexts as a
//! [`ThemeSignal`] published on a [`ThemeChannel`]. Delivery is
//! fire-and-forget: only subscriptions that exist at publish time see the
//! signal, and nothing is replayed to late subscribers. Late contexts catch
//! up by reading durable storage on startup instead.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{trace, warn};

/// Default number of signals buffered per subscription
pub const DEFAULT_CAPACITY: usize = 16;

/// Payload of an explicit theme-change event: `{"theme": "<key>"}`.
///
/// `theme` may be absent, in which case receivers consult storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeChangePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl ThemeChangePayload {
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: Some(theme.into()),
        }
    }
}

/// A message on the theme channel
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThemeSignal {
    /// Explicit in-page theme-change event
    Changed(ThemeChangePayload),
    /// A durable storage entry changed (browser `storage` event equivalent)
    StorageChanged {
        key: String,
        new_value: Option<String>,
    },
}

impl ThemeSignal {
    pub fn changed(theme: impl Into<String>) -> Self {
        ThemeSignal::Changed(ThemeChangePayload::new(theme))
    }
}

/// Transport for theme signals between contexts
pub trait ThemeChannel {
    type Subscription: ThemeSubscription;

    /// Send a signal to every current subscriber
    fn publish(&self, signal: ThemeSignal);

    /// Start listening; only signals published from now on are received
    fn subscribe(&self) -> Self::Subscription;
}

/// Receiving end of a [`ThemeChannel`]
pub trait ThemeSubscription {
    /// Next pending signal, without blocking
    fn try_recv(&mut self) -> Option<ThemeSignal>;
}

/// In-process [`ThemeChannel`] backed by a tokio broadcast channel.
///
/// Cloning yields another handle to the same channel.
#[derive(Clone, Debug)]
pub struct BroadcastChannel {
    sender: broadcast::Sender<ThemeSignal>,
}

impl Default for BroadcastChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastChannel {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl ThemeChannel for BroadcastChannel {
    type Subscription = BroadcastSubscription;

    fn publish(&self, signal: ThemeSignal) {
        match self.sender.send(signal) {
            Ok(receivers) => trace!("BroadcastChannel::publish - {} receivers", receivers),
            // No listeners is not an error; the signal is simply dropped.
            Err(_) => trace!("BroadcastChannel::publish - no receivers"),
        }
    }

    fn subscribe(&self) -> BroadcastSubscription {
        BroadcastSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

/// Subscription to a [`BroadcastChannel`]
#[derive(Debug)]
pub struct BroadcastSubscription {
    receiver: broadcast::Receiver<ThemeSignal>,
}

impl BroadcastSubscription {
    /// Wait for the next signal. Returns `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<ThemeSignal> {
        loop {
            match self.receiver.recv().await {
                Ok(signal) => return Some(signal),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("theme subscription lagged, skipped {} signals", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl ThemeSubscription for BroadcastSubscription {
    fn try_recv(&mut self) -> Option<ThemeSignal> {
        loop {
            match self.receiver.try_recv() {
                Ok(signal) => return Some(signal),
                // Older signals were overwritten; newer ones are still queued.
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!("theme subscription lagged, skipped {} signals", skipped);
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_json_shape() {
        let json = serde_json::to_string(&ThemeChangePayload::new("ocean")).unwrap();
        assert_eq!(json, r#"{"theme":"ocean"}"#);
        assert_eq!(
            serde_json::to_string(&ThemeChangePayload::default()).unwrap(),
            "{}"
        );
        let parsed: ThemeChangePayload = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.theme, None);
    }

    #[test]
    fn late_subscriber_misses_earlier_signals() {
        let channel = BroadcastChannel::new();
        let mut early = channel.subscribe();
        channel.publish(ThemeSignal::changed("ocean"));
        let mut late = channel.subscribe();

        assert_eq!(early.try_recv(), Some(ThemeSignal::changed("ocean")));
        assert_eq!(early.try_recv(), None);
        assert_eq!(late.try_recv(), None);
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let channel = BroadcastChannel::new();
        channel.publish(ThemeSignal::changed("forest"));
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn lagging_subscriber_keeps_newest() {
        let channel = BroadcastChannel::with_capacity(2);
        let mut sub = channel.subscribe();
        for key in ["a", "b", "c", "d"] {
            channel.publish(ThemeSignal::changed(key));
        }
        assert_eq!(sub.try_recv(), Some(ThemeSignal::changed("c")));
        assert_eq!(sub.try_recv(), Some(ThemeSignal::changed("d")));
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test]
    async fn async_recv_ends_when_channel_dropped() {
        let channel = BroadcastChannel::new();
        let mut sub = channel.subscribe();
        channel.publish(ThemeSignal::changed("sunset"));
        drop(channel);

        assert_eq!(sub.recv().await, Some(ThemeSignal::changed("sunset")));
        assert_eq!(sub.recv().await, None);
    }
}
