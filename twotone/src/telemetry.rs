//! Cross-core shared telemetry and the status report sink.
//!
//! The analyzer on one core writes the latest peak frequency and transform
//! count; both cores' heartbeats read and report them. These are
//! "latest value, staleness acceptable" fields, so they use relaxed
//! atomics: a reader may see a value one epoch old, never a torn one.
//! The ping-pong counter needs strict alternation and gets it from the
//! handshake semaphores (Release on signal, Acquire on wait), not from
//! its own ordering.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use log::info;

/// Logical core identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreId {
    Core0,
    Core1,
}

impl CoreId {
    pub const fn number(self) -> u8 {
        match self {
            CoreId::Core0 => 0,
            CoreId::Core1 => 1,
        }
    }
}

/// Telemetry shared between the two cores. One static instance lives for
/// the process lifetime.
pub struct SharedTelemetry {
    max_frequency_bits: AtomicU32,
    fft_count: AtomicU32,
    ping_pong: AtomicU32,
}

impl SharedTelemetry {
    pub const fn new() -> SharedTelemetry {
        SharedTelemetry {
            max_frequency_bits: AtomicU32::new(0),
            fft_count: AtomicU32::new(0),
            ping_pong: AtomicU32::new(0),
        }
    }

    /// Publish the latest detected peak frequency.
    pub fn publish_max_frequency(&self, hz: f32) {
        self.max_frequency_bits.store(hz.to_bits(), Ordering::Relaxed);
    }

    /// Latest published peak frequency (possibly one epoch stale).
    pub fn max_frequency(&self) -> f32 {
        f32::from_bits(self.max_frequency_bits.load(Ordering::Relaxed))
    }

    /// Count one completed transform.
    pub fn record_transform(&self) {
        self.fft_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn transform_count(&self) -> u32 {
        self.fft_count.load(Ordering::Relaxed)
    }

    /// Read and reset the transform counter (each heartbeat reports
    /// transforms since the previous report).
    pub fn take_transform_count(&self) -> u32 {
        self.fft_count.swap(0, Ordering::Relaxed)
    }

    /// Increment the ping-pong counter and return the new value. Callers
    /// hold the handshake (only one core's heartbeat body runs between
    /// signals), which is what makes the increment race-free.
    pub fn bump_ping_pong(&self) -> u32 {
        self.ping_pong.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn ping_pong(&self) -> u32 {
        self.ping_pong.load(Ordering::Relaxed)
    }
}

impl Default for SharedTelemetry {
    fn default() -> Self {
        SharedTelemetry::new()
    }
}

/// One heartbeat's report: a snapshot of the shared state at signal time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartbeatStatus {
    pub core: CoreId,
    pub ping_pong: u32,
    pub max_frequency_hz: f32,
    pub transforms: u32,
}

/// Console/telemetry sink: receives one status line per heartbeat firing.
/// Implementations must not block for long; the heartbeat runs inside the
/// cooperative scheduler.
pub trait StatusSink {
    fn report(&mut self, status: &HeartbeatStatus);
}

/// Reports through the `log` facade.
pub struct LogSink;

impl StatusSink for LogSink {
    fn report(&mut self, status: &HeartbeatStatus) {
        let label = match status.core {
            CoreId::Core0 => "ping",
            CoreId::Core1 => "pong",
        };
        info!(
            "{}: core {}: {}, max F: {:.0} Hz, FFT count: {}",
            label,
            status.core.number(),
            status.ping_pong,
            status.max_frequency_hz,
            status.transforms
        );
    }
}

/// Writes status lines to any [`core::fmt::Write`] (a UART, a string
/// buffer). Write errors are swallowed; the console is not allowed to
/// stall the handshake.
pub struct FmtSink<W> {
    out: W,
}

impl<W: fmt::Write> FmtSink<W> {
    pub fn new(out: W) -> FmtSink<W> {
        FmtSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: fmt::Write> StatusSink for FmtSink<W> {
    fn report(&mut self, status: &HeartbeatStatus) {
        let label = match status.core {
            CoreId::Core0 => "ping",
            CoreId::Core1 => "pong",
        };
        let _ = writeln!(
            self.out,
            "{}: core {}: {}, max F: {:.0} Hz, FFT count: {}",
            label,
            status.core.number(),
            status.ping_pong,
            status.max_frequency_hz,
            status.transforms
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_frequency_round_trips() {
        let t = SharedTelemetry::new();
        assert_eq!(t.max_frequency(), 0.0);
        t.publish_max_frequency(2300.0);
        assert_eq!(t.max_frequency(), 2300.0);
    }

    #[test]
    fn transform_counter_resets_on_take() {
        let t = SharedTelemetry::new();
        t.record_transform();
        t.record_transform();
        t.record_transform();
        assert_eq!(t.transform_count(), 3);
        assert_eq!(t.take_transform_count(), 3);
        assert_eq!(t.transform_count(), 0);
    }

    #[test]
    fn ping_pong_bump_returns_new_value() {
        let t = SharedTelemetry::new();
        assert_eq!(t.bump_ping_pong(), 1);
        assert_eq!(t.bump_ping_pong(), 2);
        assert_eq!(t.ping_pong(), 2);
    }

    #[test]
    fn fmt_sink_writes_one_line() {
        let sink_out: heapless::String<128> = heapless::String::new();
        let mut sink = FmtSink::new(sink_out);
        sink.report(&HeartbeatStatus {
            core: CoreId::Core0,
            ping_pong: 7,
            max_frequency_hz: 2298.8,
            transforms: 9,
        });
        let line = sink.into_inner();
        assert_eq!(line.as_str(), "ping: core 0: 7, max F: 2299 Hz, FFT count: 9\n");
    }
}
