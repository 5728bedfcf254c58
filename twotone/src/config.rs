//! Startup configuration.
//!
//! All timing constants are parameters, validated once before any task is
//! scheduled. Validation failures are fatal ([`ConfigError`]); nothing on
//! the real-time path checks configuration again.

use crate::constants::{CAPTURE_RATE_HZ, DAC_MID, DDS_TICK_HZ};
use crate::error::ConfigError;

/// Per-core tone synthesis configuration.
///
/// Durations are in DDS ticks. With the 40 kHz default tick rate the
/// defaults produce a 250 ms beep (75 ms attack, 100 ms sustain, 75 ms
/// decay) repeating once per second of silence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// DDS tick (DAC update) rate in Hz.
    pub tick_hz: u32,
    /// Tone frequency in Hz.
    pub tone_hz: f32,
    /// Attack ramp length in ticks.
    pub attack_ticks: u32,
    /// Decay ramp length in ticks.
    pub decay_ticks: u32,
    /// Total beep length in ticks (attack + sustain + decay).
    pub beep_ticks: u32,
    /// Silence between beeps in ticks.
    pub repeat_ticks: u32,
    /// Peak envelope amplitude.
    pub max_amplitude: f32,
    /// Output scale factor (volume).
    pub output_scale: f32,
    /// DC offset added to every output sample (DAC mid-scale).
    pub dc_offset: i32,
    /// Envelope ticks to skip at startup, staggering the two cores' beeps.
    pub startup_skew_ticks: u32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            tick_hz: DDS_TICK_HZ,
            tone_hz: 2300.0,
            attack_ticks: 3000,
            decay_ticks: 3000,
            beep_ticks: 10_000,
            repeat_ticks: 40_000,
            max_amplitude: 1.0,
            output_scale: 0.5,
            dc_offset: DAC_MID,
            startup_skew_ticks: 0,
        }
    }
}

impl SynthConfig {
    /// Sustain region length in ticks.
    pub fn sustain_ticks(&self) -> u32 {
        self.beep_ticks - self.attack_ticks - self.decay_ticks
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::ZeroRate("tick_hz"));
        }
        if self.attack_ticks == 0 {
            return Err(ConfigError::ZeroRate("attack_ticks"));
        }
        if self.decay_ticks == 0 {
            return Err(ConfigError::ZeroRate("decay_ticks"));
        }
        if self.repeat_ticks == 0 {
            return Err(ConfigError::ZeroRate("repeat_ticks"));
        }
        if self.attack_ticks + self.decay_ticks > self.beep_ticks {
            return Err(ConfigError::EnvelopeExceedsBeep);
        }
        Ok(())
    }
}

/// Capture pipeline configuration. The epoch length is the FFT length and
/// is fixed at compile time; the rate determines bin spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConfig {
    /// ADC sample rate in Hz.
    pub sample_rate_hz: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            sample_rate_hz: CAPTURE_RATE_HZ,
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate_hz > 0.0) {
            return Err(ConfigError::ZeroRate("sample_rate_hz"));
        }
        Ok(())
    }
}

/// Cross-core handshake configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeConfig {
    /// Sleep between a heartbeat's report and its signal to the peer core.
    pub interval_us: u64,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        HandshakeConfig {
            interval_us: 1_000_000,
        }
    }
}

impl HandshakeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_us == 0 {
            return Err(ConfigError::ZeroRate("interval_us"));
        }
        Ok(())
    }
}
