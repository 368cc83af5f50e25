//! Disposer handles for event subscriptions.

use std::fmt;

type Unsubscribe = Box<dyn FnOnce() + Send + Sync>;

/// Keeps an event subscription alive.
///
/// Dropping the handle, or calling [`cancel`](Self::cancel), runs the
/// unsubscribe closure supplied by the event source. The closure runs at most
/// once.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Unsubscribe>,
}

impl Subscription {
    /// Create a subscription that runs `unsubscribe` when released.
    pub fn new(unsubscribe: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to undo, for sources that never fire.
    pub fn detached() -> Self {
        Self { unsubscribe: None }
    }

    /// Unsubscribe now.
    pub fn cancel(mut self) {
        self.run();
    }

    /// Whether the unsubscribe closure is still pending.
    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }

    fn run(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting() -> (Arc<AtomicUsize>, Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let sub = Subscription::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, sub)
    }

    #[test]
    fn test_drop_unsubscribes_once() {
        let (count, sub) = counting();
        drop(sub);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_does_not_run_again_on_drop() {
        let (count, sub) = counting();
        assert!(sub.is_active());
        sub.cancel();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_detached_is_inactive() {
        let sub = Subscription::detached();
        assert!(!sub.is_active());
    }
}
