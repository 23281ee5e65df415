use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Shared flag that asks a running search to stop before its next step.
///
/// A child token also reports cancellation when any of its ancestors is cancelled,
/// while cancelling the child leaves its ancestors untouched.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    ancestors: Vec<Arc<AtomicBool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that is cancelled automatically once `timeout` elapses.
    ///
    /// The watchdog thread lives until the timeout fires or the returned guard is
    /// dropped, whichever comes first.
    pub fn with_timeout(timeout: Duration) -> (Self, TimeoutGuard) {
        Self::new().child_with_timeout(timeout)
    }

    /// Creates a child token that follows this one.
    pub fn child(&self) -> Self {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(Arc::clone(&self.cancelled));
        Self { cancelled: Arc::default(), ancestors }
    }

    /// Creates a child token that is also cancelled once `timeout` elapses.
    pub fn child_with_timeout(&self, timeout: Duration) -> (Self, TimeoutGuard) {
        let token = self.child();
        let (disarm, disarmed) = mpsc::channel::<()>();

        let watched = token.clone();
        let watchdog = thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = disarmed.recv_timeout(timeout) {
                watched.cancel();
            }
        });

        (token, TimeoutGuard { disarm: Some(disarm), watchdog: Some(watchdog) })
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.ancestors.iter().any(|a| a.load(Ordering::Relaxed))
    }
}

/// Disarms the watchdog of [`CancelToken::with_timeout`] when dropped.
#[derive(Debug)]
pub struct TimeoutGuard {
    disarm: Option<mpsc::Sender<()>>,
    watchdog: Option<thread::JoinHandle<()>>,
}

impl Drop for TimeoutGuard {
    fn drop(&mut self) {
        // closing the channel wakes the watchdog with Disconnected
        drop(self.disarm.take());
        if let Some(watchdog) = self.watchdog.take() {
            let _ = watchdog.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_manual_cancel_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_child_follows_parent() {
        let parent = CancelToken::new();
        let child = parent.child();
        let sibling = parent.child();

        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
        assert!(!sibling.is_cancelled());

        parent.cancel();
        assert!(sibling.is_cancelled());
    }

    #[test]
    fn test_grandchild_follows_root() {
        let root = CancelToken::new();
        let grandchild = root.child().child();
        assert!(!grandchild.is_cancelled());
        root.cancel();
        assert!(grandchild.is_cancelled());
    }

    #[test]
    fn test_timed_child_sees_parent_cancel() {
        let parent = CancelToken::new();
        let (child, _guard) = parent.child_with_timeout(Duration::from_secs(60));
        assert!(!child.is_cancelled());
        parent.cancel();
        assert!(child.is_cancelled());
    }

    #[test]
    fn test_timeout_fires() {
        let (token, _guard) = CancelToken::with_timeout(Duration::from_millis(10));
        let deadline = Instant::now() + Duration::from_secs(5);
        while !token.is_cancelled() {
            assert!(Instant::now() < deadline, "watchdog never fired");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_dropping_guard_disarms() {
        let start = Instant::now();
        let (token, guard) = CancelToken::with_timeout(Duration::from_secs(60));
        drop(guard);
        assert!(!token.is_cancelled());
        // join in drop must not have waited for the full timeout
        assert!(start.elapsed() < Duration::from_secs(30));
    }
}
