//! One-shot resolution timer
//!
//! A spawned task that sleeps for the vote window and then runs the
//! resolution callback, unless it was disarmed first.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle to a pending resolution
///
/// Disarming is idempotent: disarming a timer that already fired or was
/// already disarmed does nothing. Dropping the handle disarms it.
pub struct ResolutionTimer {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ResolutionTimer {
    /// Arm a timer that runs `on_fire` after `delay`
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F, Fut>(delay: Duration, on_fire: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let disarmed = token.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = disarmed.cancelled() => {
                    debug!("Resolution timer disarmed");
                }
                _ = tokio::time::sleep(delay) => {
                    // From here on a disarm can no longer stop the callback
                    on_fire().await;
                }
            }
        });

        Self { token, handle }
    }

    /// Prevent the callback from running if it has not started yet
    pub fn disarm(&self) {
        self.token.cancel();
    }

    pub fn is_disarmed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the timer task has completed (fired or disarmed)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ResolutionTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl std::fmt::Debug for ResolutionTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionTimer")
            .field("disarmed", &self.is_disarmed())
            .field("finished", &self.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_timer(delay: Duration, fired: &Arc<AtomicUsize>) -> ResolutionTimer {
        let fired = Arc::clone(fired);
        ResolutionTimer::arm(delay, move || async move {
            fired.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let timer = counting_timer(Duration::from_secs(60), &fired);

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarm_prevents_firing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let timer = counting_timer(Duration::from_secs(60), &fired);

        timer.disarm();
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(timer.is_disarmed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarm_is_idempotent() {
        let fired = Arc::new(AtomicUsize::new(0));
        let timer = counting_timer(Duration::from_secs(1), &fired);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Disarming after firing, twice, is a no-op
        timer.disarm();
        timer.disarm();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_disarms() {
        let fired = Arc::new(AtomicUsize::new(0));
        drop(counting_timer(Duration::from_secs(60), &fired));

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
