//! Binary semaphore for the cross-core handshake.

use core::sync::atomic::{AtomicBool, Ordering};

/// A binary semaphore. Signaling an already-signaled semaphore is a no-op
/// (the count never exceeds one).
///
/// `signal()` is a Release store and a successful `try_wait()` an Acquire
/// exchange, so everything the signaling core wrote before the signal is
/// visible to the waiter after a successful wait.
pub struct Semaphore {
    flag: AtomicBool,
}

impl Semaphore {
    pub const fn new(signaled: bool) -> Semaphore {
        Semaphore {
            flag: AtomicBool::new(signaled),
        }
    }

    /// Signal the semaphore.
    pub fn signal(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Consume the signal if present. Non-blocking; waiting tasks re-poll.
    pub fn try_wait(&self) -> bool {
        self.flag
            .compare_exchange(true, false, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    pub fn is_signaled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
