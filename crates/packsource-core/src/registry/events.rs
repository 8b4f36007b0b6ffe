//! "Package sources changed" notification fan-out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Callback fired when the catalog's source list was saved.
pub type SourcesChangedCallback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Handle returned by [`crate::SourceRegistry::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Observer list for source-list changes.
///
/// Safe to subscribe, unsubscribe and notify from any thread. Callbacks are
/// invoked on a snapshot taken under a read lock, so a callback may itself
/// subscribe or unsubscribe without deadlocking.
pub(crate) struct SourcesChangedNotifier {
    next_id: AtomicU64,
    subscribers: RwLock<Vec<(SubscriptionId, SourcesChangedCallback)>>,
}

impl SourcesChangedNotifier {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn subscribe(&self, callback: SourcesChangedCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, callback));
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Invoke every current subscriber once. No-op without subscribers.
    pub(crate) fn notify(&self) {
        let snapshot: Vec<SourcesChangedCallback> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        if snapshot.is_empty() {
            debug!("Package sources changed, no subscribers");
            return;
        }

        debug!("Package sources changed, notifying {} subscribers", snapshot.len());
        for callback in snapshot {
            callback();
        }
    }
}
