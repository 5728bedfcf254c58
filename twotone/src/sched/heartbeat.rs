//! Ping-pong heartbeat task.
//!
//! One heartbeat runs on each core. Its semaphore pair enforces strict
//! alternation: wait → run the report body → sleep one interval → signal
//! the peer. At most one heartbeat body executes between any two signals,
//! which is the mutual exclusion the shared ping-pong counter relies on.

use crate::config::HandshakeConfig;
use crate::error::ConfigError;
use crate::sched::{Poll, Semaphore, Task};
use crate::telemetry::{CoreId, HeartbeatStatus, SharedTelemetry, StatusSink};

/// Where a heartbeat is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatPhase {
    /// Waiting for this core's semaphore.
    Waiting,
    /// Report done; sleeping until `until_us`.
    Sleeping { until_us: u64 },
    /// Sleep expired; the peer will be signaled on the next poll.
    Signaling,
}

/// The per-core heartbeat task.
pub struct Heartbeat<'a, S> {
    core: CoreId,
    own: &'a Semaphore,
    peer: &'a Semaphore,
    telemetry: &'a SharedTelemetry,
    sink: S,
    interval_us: u64,
    phase: HeartbeatPhase,
}

impl<'a, S: StatusSink> Heartbeat<'a, S> {
    /// `own` is the semaphore this core waits on, `peer` the one it
    /// signals. Exactly one of the pair starts signaled.
    pub fn new(
        core: CoreId,
        own: &'a Semaphore,
        peer: &'a Semaphore,
        telemetry: &'a SharedTelemetry,
        sink: S,
        cfg: &HandshakeConfig,
    ) -> Result<Heartbeat<'a, S>, ConfigError> {
        cfg.validate()?;
        Ok(Heartbeat {
            core,
            own,
            peer,
            telemetry,
            sink,
            interval_us: cfg.interval_us,
            phase: HeartbeatPhase::Waiting,
        })
    }

    pub fn phase(&self) -> HeartbeatPhase {
        self.phase
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<'a, S: StatusSink> Task for Heartbeat<'a, S> {
    fn poll(&mut self, now_us: u64) -> Poll {
        match self.phase {
            HeartbeatPhase::Waiting => {
                if !self.own.try_wait() {
                    return Poll::Pending;
                }
                // The body: count, snapshot, report, reset.
                let ping_pong = self.telemetry.bump_ping_pong();
                let status = HeartbeatStatus {
                    core: self.core,
                    ping_pong,
                    max_frequency_hz: self.telemetry.max_frequency(),
                    transforms: self.telemetry.take_transform_count(),
                };
                self.sink.report(&status);
                self.phase = HeartbeatPhase::Sleeping {
                    until_us: now_us + self.interval_us,
                };
                Poll::Pending
            }
            HeartbeatPhase::Sleeping { until_us } => {
                if now_us < until_us {
                    return Poll::Pending;
                }
                self.phase = HeartbeatPhase::Signaling;
                Poll::Pending
            }
            HeartbeatPhase::Signaling => {
                self.peer.signal();
                self.phase = HeartbeatPhase::Waiting;
                Poll::Ready
            }
        }
    }
}
