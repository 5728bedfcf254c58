//! Precomputed sine and window tables.
//!
//! All tables are built once during an explicit init phase (with `libm`
//! float math) and are immutable for the process lifetime. Nothing on the
//! tick or transform path touches floating point.

use core::f32::consts::TAU;

use libm::{cosf, sinf};

use crate::constants::DDS_TABLE_LEN;
use crate::fixed::Fix15;

/// 256-entry sine table for the DDS oscillators.
///
/// Lookup uses the top 8 bits of a 32-bit phase accumulator, implicitly
/// downsampling phase resolution to table resolution.
pub struct DdsSineTable {
    entries: [Fix15; DDS_TABLE_LEN],
}

impl DdsSineTable {
    /// Build the table with the given peak value (typically half the DAC
    /// span, so a full-scale envelope swings the converter's full range).
    pub fn new(peak: f32) -> DdsSineTable {
        let mut entries = [Fix15::ZERO; DDS_TABLE_LEN];
        for (i, e) in entries.iter_mut().enumerate() {
            *e = Fix15::from_f32(peak * sinf(TAU * i as f32 / DDS_TABLE_LEN as f32));
        }
        DdsSineTable { entries }
    }

    /// Look up the sine value for a 32-bit phase.
    #[inline(always)]
    pub fn lookup(&self, phase: u32) -> Fix15 {
        self.entries[(phase >> 24) as usize]
    }
}

/// Full-cycle sine table used for FFT twiddle factors.
///
/// `N` must be a power of two; [`FftEngine::new`](crate::fft::FftEngine::new)
/// validates this before constructing one. Cosine is read from the same
/// table at a quarter-cycle offset.
pub struct TrigTable<const N: usize> {
    entries: [Fix15; N],
}

impl<const N: usize> TrigTable<N> {
    pub fn new() -> TrigTable<N> {
        let mut entries = [Fix15::ZERO; N];
        for (i, e) in entries.iter_mut().enumerate() {
            *e = Fix15::from_f32(sinf(TAU * i as f32 / N as f32));
        }
        TrigTable { entries }
    }

    /// `sin(2*pi*i/N)`.
    #[inline(always)]
    pub fn sin(&self, i: usize) -> Fix15 {
        self.entries[i & (N - 1)]
    }

    /// `cos(2*pi*i/N)`, via the quarter-cycle offset.
    #[inline(always)]
    pub fn cos(&self, i: usize) -> Fix15 {
        self.entries[(i + N / 4) & (N - 1)]
    }
}

/// Hann window table: `0.5 * (1 - cos(2*pi*i/N))`.
///
/// Applied to each capture epoch before the transform to reduce spectral
/// leakage.
pub struct HannWindow<const N: usize> {
    entries: [Fix15; N],
}

impl<const N: usize> HannWindow<N> {
    pub fn new() -> HannWindow<N> {
        let mut entries = [Fix15::ZERO; N];
        for (i, e) in entries.iter_mut().enumerate() {
            *e = Fix15::from_f32(0.5 * (1.0 - cosf(TAU * i as f32 / N as f32)));
        }
        HannWindow { entries }
    }
}

impl<const N: usize> core::ops::Index<usize> for HannWindow<N> {
    type Output = Fix15;

    #[inline(always)]
    fn index(&self, i: usize) -> &Fix15 {
        &self.entries[i]
    }
}
