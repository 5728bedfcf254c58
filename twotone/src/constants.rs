//! Default sizes, rates, and display layout.
//!
//! These are startup configuration values, not invariants; the configurable
//! ones are carried by the structs in [`config`](crate::config).

/// Number of entries in the DDS sine lookup table.
pub const DDS_TABLE_LEN: usize = 256;

/// Samples per capture epoch (and FFT length).
pub const NUM_SAMPLES: usize = 1024;

/// DDS tick rate in Hz: one DAC sample per tick per core (25 µs period).
pub const DDS_TICK_HZ: u32 = 40_000;

/// Capture (ADC) sample rate in Hz.
pub const CAPTURE_RATE_HZ: f32 = 10_000.0;

/// Peak amplitude of the DDS sine table: half the 12-bit DAC span.
pub const DAC_PEAK: f32 = 2047.0;

/// Mid-scale DC offset added to every synthesized sample.
pub const DAC_MID: i32 = 2048;

/// First FFT bin eligible for peak detection; bins below are DC/near-DC.
pub const PEAK_MIN_BIN: usize = 5;

/// Maximum cooperative tasks per core scheduler.
pub const MAX_TASKS: usize = 4;

// Spectrum display layout (640x480 panel).

/// Screen x of FFT bin 0's column.
pub const SPECTRUM_LEFT_X: u16 = 59;
/// Top y of the spectrum plot area.
pub const SPECTRUM_TOP_Y: u16 = 50;
/// Height of the spectrum plot area in pixels.
pub const SPECTRUM_HEIGHT: u16 = 429;
/// Bottom y of the spectrum plot area (bars grow upward from here).
pub const SPECTRUM_BASE_Y: u16 = 479;
/// Bar height per unit magnitude (fixed-point multiplier applied to each bin).
pub const SPECTRUM_BAR_SCALE: i32 = 36;

/// Position and size of the peak-frequency readout.
pub const FREQ_LABEL_X: u16 = 250;
pub const FREQ_LABEL_Y: u16 = 0;
pub const FREQ_TEXT_X: u16 = 250;
pub const FREQ_TEXT_Y: u16 = 20;
pub const FREQ_TEXT_W: u16 = 176;
pub const FREQ_TEXT_H: u16 = 30;
