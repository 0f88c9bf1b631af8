//! Cooperative cancellation and interruptible sleeping.
//!
//! Every timed wait in the crate goes through an [`Abort`] implementation, so a
//! stop or reset wakes a sleeping worker immediately instead of waiting out the
//! remainder of a pulse or work phase.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Trait for signals that can cut a timed operation short.
pub trait Abort {
    /// Returns true once the operation should unwind.
    fn is_aborted(&self) -> bool;

    /// Sleeps for up to `duration`.
    ///
    /// Returns `false` if the signal fired before or during the sleep.
    fn sleep(&self, duration: Duration) -> bool;
}

/// Shared cancellation flag with a wake-up for sleepers.
///
/// Clones observe the same flag. Once cancelled a token stays cancelled; a new
/// run arms a fresh token instead of clearing an old one.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag and wakes every sleeper.
    pub fn cancel(&self) {
        let (lock, wake) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        wake.notify_all();
    }

    /// Returns true once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until the token is cancelled.
    pub fn wait(&self) {
        let (lock, wake) = &*self.inner;
        let cancelled = lock.lock().unwrap_or_else(PoisonError::into_inner);
        drop(
            wake.wait_while(cancelled, |cancelled| !*cancelled)
                .unwrap_or_else(PoisonError::into_inner),
        );
    }

    /// Bounds this token by a deadline.
    ///
    /// `None` means no deadline, which happens when the deadline overflows
    /// the platform clock.
    pub fn until(&self, deadline: Option<Instant>) -> Deadline<'_> {
        Deadline {
            token: self,
            until: deadline,
        }
    }
}

impl Abort for CancelToken {
    fn is_aborted(&self) -> bool {
        self.is_cancelled()
    }

    fn sleep(&self, duration: Duration) -> bool {
        let (lock, wake) = &*self.inner;
        let cancelled = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if duration.is_zero() || *cancelled {
            return !*cancelled;
        }

        let (cancelled, _) = wake
            .wait_timeout_while(cancelled, duration, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        !*cancelled
    }
}

/// A [`CancelToken`] that also aborts once a point in time has passed.
#[derive(Debug, Clone, Copy)]
pub struct Deadline<'a> {
    token: &'a CancelToken,
    until: Option<Instant>,
}

impl Deadline<'_> {
    /// Time left before the deadline, or `None` if unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.until
            .map(|until| until.saturating_duration_since(Instant::now()))
    }

    /// Returns true once the deadline has passed. Never true when unbounded.
    pub fn has_expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }
}

impl Abort for Deadline<'_> {
    fn is_aborted(&self) -> bool {
        self.token.is_cancelled() || self.has_expired()
    }

    fn sleep(&self, duration: Duration) -> bool {
        match self.remaining() {
            Some(left) if left < duration => {
                let _ = self.token.sleep(left);
                false
            }
            _ => self.token.sleep(duration),
        }
    }
}
