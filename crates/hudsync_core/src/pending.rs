//! Outstanding data-request bookkeeping.
//!
//! The transport is fire-and-forget: a request goes out, and the reply, if
//! one ever comes, arrives as an ordinary update with no correlation at
//! the wire level. The tracker restores accountability locally by handing
//! out explicit request ids and remembering what is still in flight, so a
//! session can settle replies against requests and sweep out the ones the
//! server never answered.
//!
//! Time is always passed in by the caller. The tracker never reads the
//! clock itself, which keeps timeout behavior testable to the millisecond.

use hudsync_shared::{DataScope, RequestId};
use std::time::{Duration, Instant};

/// One in-flight data request.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    /// Correlation id handed back to the caller at send time.
    pub id: RequestId,
    /// Scope the request targets.
    pub scope: DataScope,
    /// Key the request asked for.
    pub key: String,
    /// When the request was sent.
    pub issued_at: Instant,
}

impl PendingRequest {
    /// Whether the request has outlived `timeout` as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        now.duration_since(self.issued_at) >= timeout
    }
}

/// Table of in-flight requests with timeout expiry and a hard cap.
#[derive(Debug)]
pub struct RequestTracker {
    pending: Vec<PendingRequest>,
    next_id: RequestId,
    timeout: Duration,
    max_pending: usize,
}

impl RequestTracker {
    /// Creates a tracker that expires requests after `timeout` and holds
    /// at most `max_pending` of them at once.
    #[must_use]
    pub fn new(timeout: Duration, max_pending: usize) -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
            timeout,
            max_pending,
        }
    }

    /// Records a request sent at `now` and returns its id.
    ///
    /// Ids are unique for the lifetime of the tracker. If the table is
    /// full the oldest entry is dropped to make room; that request can no
    /// longer be settled, only answered as an unsolicited update.
    pub fn track(&mut self, scope: DataScope, key: impl Into<String>, now: Instant) -> RequestId {
        if self.pending.len() >= self.max_pending {
            let evicted = self.pending.remove(0);
            tracing::warn!(
                id = evicted.id,
                scope = %evicted.scope,
                key = %evicted.key,
                max_pending = self.max_pending,
                "Pending request table full, dropping oldest entry"
            );
        }

        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(PendingRequest {
            id,
            scope,
            key: key.into(),
            issued_at: now,
        });
        id
    }

    /// Settles the oldest in-flight request for `scope`/`key`, if any.
    ///
    /// Returns the settled request's id. Updates that match nothing are
    /// unsolicited pushes, which are normal traffic; callers treat `None`
    /// as informational.
    pub fn settle(&mut self, scope: DataScope, key: &str) -> Option<RequestId> {
        let index = self
            .pending
            .iter()
            .position(|p| p.scope == scope && p.key == key)?;
        Some(self.pending.remove(index).id)
    }

    /// Drops the request with the given id, if it is still in flight.
    ///
    /// Used to roll back a tracked request whose send never left the
    /// session. Returns `true` if an entry was removed.
    pub fn forget(&mut self, id: RequestId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Removes every request that has timed out as of `now`.
    ///
    /// Returns the expired entries so the caller can log or surface them.
    pub fn sweep(&mut self, now: Instant) -> Vec<PendingRequest> {
        let timeout = self.timeout;
        let mut expired = Vec::new();
        self.pending.retain(|p| {
            if p.is_expired(now, timeout) {
                expired.push(p.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// The configured expiry deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> RequestTracker {
        RequestTracker::new(Duration::from_millis(100), 4)
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut tracker = tracker();
        let now = Instant::now();

        let a = tracker.track(DataScope::Player, "gold", now);
        let b = tracker.track(DataScope::Player, "gold", now);
        let c = tracker.track(DataScope::Team, "score", now);

        assert!(a < b && b < c);
        assert_eq!(tracker.pending_count(), 3);
    }

    #[test]
    fn test_settle_matches_oldest_first() {
        let mut tracker = tracker();
        let now = Instant::now();

        let first = tracker.track(DataScope::Player, "gold", now);
        let second = tracker.track(DataScope::Player, "gold", now);

        assert_eq!(tracker.settle(DataScope::Player, "gold"), Some(first));
        assert_eq!(tracker.settle(DataScope::Player, "gold"), Some(second));
        assert_eq!(tracker.settle(DataScope::Player, "gold"), None);
    }

    #[test]
    fn test_settle_ignores_other_scopes() {
        let mut tracker = tracker();
        tracker.track(DataScope::Team, "gold", Instant::now());

        assert_eq!(tracker.settle(DataScope::Player, "gold"), None);
        assert_eq!(tracker.pending_count(), 1);
    }

    #[test]
    fn test_sweep_expires_only_old_requests() {
        let mut tracker = tracker();
        let start = Instant::now();

        tracker.track(DataScope::Player, "gold", start);
        tracker.track(DataScope::Player, "xp", start + Duration::from_millis(80));

        let expired = tracker.sweep(start + Duration::from_millis(120));

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].key, "gold");
        assert_eq!(tracker.pending_count(), 1);
    }

    #[test]
    fn test_sweep_on_fresh_requests_removes_nothing() {
        let mut tracker = tracker();
        let start = Instant::now();
        tracker.track(DataScope::Global, "phase", start);

        assert!(tracker.sweep(start + Duration::from_millis(10)).is_empty());
        assert_eq!(tracker.pending_count(), 1);
    }

    #[test]
    fn test_forget_removes_exactly_one_id() {
        let mut tracker = tracker();
        let now = Instant::now();

        let first = tracker.track(DataScope::Player, "gold", now);
        let second = tracker.track(DataScope::Player, "gold", now);

        assert!(tracker.forget(second));
        assert!(!tracker.forget(second));
        assert_eq!(tracker.settle(DataScope::Player, "gold"), Some(first));
    }

    #[test]
    fn test_full_table_drops_oldest() {
        let mut tracker = tracker();
        let now = Instant::now();

        let oldest = tracker.track(DataScope::Player, "k0", now);
        for i in 1..4 {
            tracker.track(DataScope::Player, format!("k{i}"), now);
        }
        tracker.track(DataScope::Player, "k4", now);

        assert_eq!(tracker.pending_count(), 4);
        assert_eq!(tracker.settle(DataScope::Player, "k0"), None);
        assert_ne!(tracker.settle(DataScope::Player, "k1"), Some(oldest));
    }

    #[test]
    fn test_expiry_is_inclusive_at_the_deadline() {
        let start = Instant::now();
        let request = PendingRequest {
            id: 1,
            scope: DataScope::Player,
            key: "gold".to_string(),
            issued_at: start,
        };

        let timeout = Duration::from_millis(100);
        assert!(!request.is_expired(start + Duration::from_millis(99), timeout));
        assert!(request.is_expired(start + Duration::from_millis(100), timeout));
    }
}
