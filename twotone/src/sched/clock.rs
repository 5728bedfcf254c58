//! Monotonic time source.

/// Monotonic microsecond clock. On hardware this reads the platform timer;
/// tests and simulations provide their own.
pub trait Clock {
    fn now_us(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
