//! Narrow contracts to the external peripherals.
//!
//! The core never touches registers. It consumes three collaborators:
//!
//! | Contract | Direction | Used by |
//! |----------|-----------|---------|
//! | [`DacOutput`] | push one 16-bit word per tick | [`ToneVoice`](crate::synth::ToneVoice) |
//! | [`SpectrumDisplay`] | text and vertical-line drawing | [`SpectrumRenderer`] |
//! | [`StatusSink`](crate::telemetry::StatusSink) | one line per heartbeat | [`Heartbeat`](crate::sched::Heartbeat) |
//!
//! A reference MCP4822 driver is provided behind the `mcp4822` feature,
//! speaking the chip's wire format over an `embedded-hal` SPI bus.

pub mod dac;
pub mod display;

pub use dac::{DacChannel, DacOutput};
#[cfg(feature = "mcp4822")]
pub use dac::Mcp4822;
pub use display::{SpectrumDisplay, SpectrumRenderer};
