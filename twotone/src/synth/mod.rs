//! Direct digital synthesis: per-core oscillator, beep envelope, and the
//! tick handler that feeds the DAC.
//!
//! One [`ToneVoice`] lives on each core, owned exclusively by that core's
//! timer interrupt. Nothing in this module is shared across cores, so the
//! tick handler needs no synchronization.

mod envelope;
mod oscillator;
mod voice;

pub use envelope::{BeepEnvelope, BeepState};
pub use oscillator::Oscillator;
pub use voice::ToneVoice;
