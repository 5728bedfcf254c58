//! LED blink task: the idle task on the synthesis-only core.

use crate::sched::{Poll, Task};

/// Minimal LED contract; the platform provides the pin.
pub trait Led {
    fn toggle(&mut self);
}

/// Toggles an LED at a fixed interval.
pub struct BlinkTask<L> {
    led: L,
    interval_us: u64,
    next_us: u64,
}

impl<L: Led> BlinkTask<L> {
    pub fn new(led: L, interval_us: u64) -> BlinkTask<L> {
        BlinkTask {
            led,
            interval_us,
            next_us: 0,
        }
    }

    pub fn led(&self) -> &L {
        &self.led
    }
}

impl<L: Led> Task for BlinkTask<L> {
    fn poll(&mut self, now_us: u64) -> Poll {
        if now_us < self.next_us {
            return Poll::Pending;
        }
        self.led.toggle();
        self.next_us = now_us + self.interval_us;
        Poll::Ready
    }
}
