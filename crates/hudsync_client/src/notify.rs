//! Local fan-out of notices to catch-all observers.
//!
//! Per-key listeners live in the store; this bus serves the observers that
//! want *everything* (debug overlays, replay recorders, combat logs). Each
//! subscriber gets its own bounded channel, so a slow consumer drops its
//! own notices instead of stalling the session.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use hudsync_shared::LocalNotice;

/// Fan-out bus for [`LocalNotice`] values.
pub struct NotifyBus {
    capacity: usize,
    subscribers: Vec<Sender<LocalNotice>>,
}

impl NotifyBus {
    /// Creates a bus whose subscriber channels hold `capacity` notices.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            subscribers: Vec::new(),
        }
    }

    /// Adds a subscriber and returns its receiving end.
    ///
    /// Dropping the receiver unsubscribes: the bus prunes the dead channel
    /// on the next emit.
    pub fn subscribe(&mut self) -> NoticeReceiver {
        let (sender, receiver) = bounded(self.capacity);
        self.subscribers.push(sender);
        NoticeReceiver { receiver }
    }

    /// Delivers `notice` to every live subscriber.
    ///
    /// A subscriber whose channel is full misses this notice (logged); a
    /// subscriber whose receiver was dropped is removed. Returns how many
    /// subscribers received the notice.
    pub fn emit(&mut self, notice: &LocalNotice) -> usize {
        let mut delivered = 0;
        self.subscribers.retain(|tx| match tx.try_send(notice.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    key = %notice.key(),
                    "Subscriber channel full, notice dropped for one observer"
                );
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
        delivered
    }

    /// Number of live subscribers as of the last emit.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for NotifyBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyBus")
            .field("capacity", &self.capacity)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Receiving end of one bus subscription.
pub struct NoticeReceiver {
    receiver: Receiver<LocalNotice>,
}

impl NoticeReceiver {
    /// Takes every pending notice (non-blocking).
    #[must_use]
    pub fn drain(&self) -> Vec<LocalNotice> {
        let mut notices = Vec::with_capacity(self.receiver.len());
        while let Ok(notice) = self.receiver.try_recv() {
            notices.push(notice);
        }
        notices
    }

    /// Takes one pending notice (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<LocalNotice> {
        self.receiver.try_recv().ok()
    }

    /// Number of notices waiting.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Whether any notices are waiting.
    #[must_use]
    pub fn has_notices(&self) -> bool {
        !self.receiver.is_empty()
    }
}

impl std::fmt::Debug for NoticeReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoticeReceiver")
            .field("pending", &self.receiver.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hudsync_shared::{DataScope, DataValue};

    fn notice(key: &str) -> LocalNotice {
        LocalNotice::DataUpdated {
            scope: DataScope::Global,
            key: key.to_string(),
            value: DataValue::from(1),
        }
    }

    #[test]
    fn test_every_subscriber_sees_every_notice() {
        let mut bus = NotifyBus::new(8);
        let first = bus.subscribe();
        let second = bus.subscribe();

        assert_eq!(bus.emit(&notice("gold")), 2);

        assert_eq!(first.drain().len(), 1);
        assert_eq!(second.drain().len(), 1);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut bus = NotifyBus::new(8);
        let keeper = bus.subscribe();
        drop(bus.subscribe());

        assert_eq!(bus.emit(&notice("gold")), 1);
        assert_eq!(bus.subscriber_count(), 1);
        assert!(keeper.has_notices());
    }

    #[test]
    fn test_full_channel_drops_notice_without_unsubscribing() {
        let mut bus = NotifyBus::new(1);
        let slow = bus.subscribe();

        assert_eq!(bus.emit(&notice("first")), 1);
        assert_eq!(bus.emit(&notice("second")), 0);

        assert_eq!(bus.subscriber_count(), 1);
        let pending = slow.drain();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].key(), "first");

        // Room again after the drain.
        assert_eq!(bus.emit(&notice("third")), 1);
    }

    #[test]
    fn test_receiver_try_recv_is_fifo() {
        let mut bus = NotifyBus::new(8);
        let receiver = bus.subscribe();

        bus.emit(&notice("a"));
        bus.emit(&notice("b"));

        assert_eq!(receiver.try_recv().map(|n| n.key().to_string()), Some("a".to_string()));
        assert_eq!(receiver.try_recv().map(|n| n.key().to_string()), Some("b".to_string()));
        assert_eq!(receiver.try_recv(), None);
    }
}
