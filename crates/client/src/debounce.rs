//! Search debounce: reset-not-stack quiescence timer.
//!
//! Each keystroke arms a fresh window; earlier windows are invalidated
//! rather than queued, so exactly one descriptor (the one current at
//! quiescence) propagates to the fetcher.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use regis_core::listing::SEARCH_DEBOUNCE_MS;

/// Debounces a stream of triggers down to the last one in each quiescence
/// window. Cheap to clone; clones share the same window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    epoch: Arc<AtomicU64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Arm a new window and wait it out. Returns `true` only for the most
    /// recent trigger: if another trigger arrives while waiting, this call
    /// resolves `false` and the caller must not fetch.
    pub async fn settle(&self) -> bool {
        let my_epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.epoch.load(Ordering::SeqCst) == my_epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn lone_trigger_settles_after_the_window() {
        let debouncer = Debouncer::default();
        let handle = tokio::spawn({
            let d = debouncer.clone();
            async move { d.settle().await }
        });

        tokio::time::advance(Duration::from_millis(SEARCH_DEBOUNCE_MS + 1)).await;
        assert!(handle.await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_triggers_coalesce_to_the_last_one() {
        let debouncer = Debouncer::default();

        let first = tokio::spawn({
            let d = debouncer.clone();
            async move { d.settle().await }
        });
        tokio::time::advance(Duration::from_millis(100)).await;

        let second = tokio::spawn({
            let d = debouncer.clone();
            async move { d.settle().await }
        });
        tokio::time::advance(Duration::from_millis(100)).await;

        let third = tokio::spawn({
            let d = debouncer.clone();
            async move { d.settle().await }
        });
        tokio::time::advance(Duration::from_millis(SEARCH_DEBOUNCE_MS + 1)).await;

        // Only the final trigger within the window survives.
        assert!(!first.await.unwrap());
        assert!(!second.await.unwrap());
        assert!(third.await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn windows_reset_rather_than_stack() {
        // A late trigger must wait its own full window, not inherit the
        // remainder of the earlier one.
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let first = tokio::spawn({
            let d = debouncer.clone();
            async move { d.settle().await }
        });
        tokio::time::advance(Duration::from_millis(250)).await;

        let second = tokio::spawn({
            let d = debouncer.clone();
            async move { d.settle().await }
        });

        // 250ms later the first window would have elapsed, but it was
        // invalidated; the second has 50ms to go.
        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(!first.await.unwrap());

        tokio::time::advance(Duration::from_millis(300)).await;
        assert!(second.await.unwrap());
    }
}
