//! Error types.
//!
//! Startup problems (bad sizes, zero rates) are [`ConfigError`]s and are
//! fatal before scheduling begins. [`MathError`] covers the one arithmetic
//! failure the fixed-point kernel can report; it never occurs on the tick
//! path, where only multiplication is used.

use core::fmt;

/// Fixed-point arithmetic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Division by a zero denominator.
    DivideByZero,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::DivideByZero => write!(f, "fixed-point divide by zero"),
        }
    }
}

/// Invalid startup configuration. Detected before any task is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// FFT length is not a power of two (or is too small to transform).
    NotPowerOfTwo(usize),
    /// A rate, duration, or interval that must be nonzero is zero.
    ZeroRate(&'static str),
    /// Attack plus decay exceed the beep duration.
    EnvelopeExceedsBeep,
    /// A core scheduler has no free task slot.
    TooManyTasks,
    /// Arithmetic failed while deriving configuration values.
    Arithmetic(MathError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPowerOfTwo(n) => {
                write!(f, "FFT length {} is not a usable power of two", n)
            }
            ConfigError::ZeroRate(name) => write!(f, "{} must be nonzero", name),
            ConfigError::EnvelopeExceedsBeep => {
                write!(f, "attack + decay exceed the beep duration")
            }
            ConfigError::TooManyTasks => write!(f, "no free task slot on this core"),
            ConfigError::Arithmetic(e) => write!(f, "configuration arithmetic failed: {}", e),
        }
    }
}

impl From<MathError> for ConfigError {
    fn from(e: MathError) -> Self {
        ConfigError::Arithmetic(e)
    }
}
