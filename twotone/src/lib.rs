//! # twotone
//!
//! A `no_std`, zero-allocation DSP core for dual-core microcontrollers:
//! two amplitude-enveloped DDS tones (one per core, driven from timer
//! interrupts) alongside continuous capture, fixed-point FFT, and dominant
//! frequency detection, with a two-semaphore ping-pong handshake keeping
//! the cores in lockstep once per second.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Numerics | [`fixed`] | Q16.15 arithmetic (wrap-exact) |
//! | Tables | [`tables`] | DDS sine, FFT trig, Hann window (init-time) |
//! | Synthesis | [`synth`] | Phase-accumulator DDS + beep envelope per core |
//! | Capture | [`capture`] | Double-buffered epoch acquisition + windowing |
//! | Analysis | [`fft`] / [`analysis`] | Radix-2 DIT FFT, peak detection, task |
//! | Scheduling | [`sched`] | Cooperative tasks, semaphores, heartbeat |
//! | Peripherals | [`io`] | DAC, display, and console contracts |
//!
//! ## Execution model
//!
//! Each core owns one [`ToneVoice`](synth::ToneVoice) ticked from a
//! repeating timer interrupt at the DDS rate, and one
//! [`CoreScheduler`](sched::CoreScheduler) polling cooperative tasks. The
//! capture core runs the [`SpectrumAnalyzer`](analysis::SpectrumAnalyzer);
//! the other blinks an LED. The heartbeats alternate strictly through a
//! [`Semaphore`](sched::Semaphore) pair and publish through
//! [`SharedTelemetry`](telemetry::SharedTelemetry).
//!
//! ## Quick start
//!
//! ```ignore
//! use twotone::config::{CaptureConfig, HandshakeConfig, SynthConfig};
//! use twotone::constants::{DAC_PEAK, NUM_SAMPLES};
//! use twotone::io::DacChannel;
//!
//! // Init phase: tables, engine, shared state.
//! let sine = twotone::tables::DdsSineTable::new(DAC_PEAK);
//! let window = twotone::tables::HannWindow::<NUM_SAMPLES>::new();
//! let engine = twotone::fft::FftEngine::<NUM_SAMPLES>::new()?;
//! static TELEMETRY: twotone::telemetry::SharedTelemetry =
//!     twotone::telemetry::SharedTelemetry::new();
//! static GO_0: twotone::sched::Semaphore = twotone::sched::Semaphore::new(true);
//! static GO_1: twotone::sched::Semaphore = twotone::sched::Semaphore::new(false);
//!
//! // Per core: a voice for the timer ISR, a scheduler for everything else.
//! let mut voice = twotone::synth::ToneVoice::new(
//!     &SynthConfig::default(), &sine, DacChannel::A)?;
//! // in the timer ISR: voice.tick(&mut dac);
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `mcp4822` | yes | MCP4822 DAC driver (requires `embedded-hal`) |

#![no_std]

pub mod analysis;
pub mod capture;
pub mod config;
pub mod constants;
pub mod error;
pub mod fft;
pub mod fixed;
pub mod io;
pub mod sched;
pub mod synth;
pub mod tables;
pub mod telemetry;

pub use error::{ConfigError, MathError};
pub use fixed::Fix15;
