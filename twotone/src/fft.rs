//! In-place radix-2 decimation-in-time FFT in Q16.15.
//!
//! The transform operates on two `N`-length sequences (real, imaginary)
//! with `N` a power of two. Twiddle factors and both butterfly inputs are
//! halved every pass, which keeps the running sums inside fixed-point
//! range without a separate normalization sweep; the result is the
//! unnormalized DFT scaled by `1/N`, in natural order.
//!
//! Magnitudes use the alpha-max-beta-min approximation
//! `max(|re|,|im|) + 0.4 * min(|re|,|im|)`: cheap, square-root free, and
//! accurate enough for peak picking.

use crate::constants::PEAK_MIN_BIN;
use crate::error::ConfigError;
use crate::fixed::Fix15;
use crate::tables::TrigTable;

/// 0.4 in Q16.15, the beta coefficient of the magnitude approximation.
const ZERO_POINT_FOUR: Fix15 = Fix15::from_raw(13107);

/// Radix-2 DIT transform engine with its trig table.
pub struct FftEngine<const N: usize> {
    trig: TrigTable<N>,
    log2_n: u32,
}

impl<const N: usize> FftEngine<N> {
    /// Build the engine and its twiddle table. `N` must be a power of two
    /// of at least 8; anything else is a startup configuration error.
    pub fn new() -> Result<FftEngine<N>, ConfigError> {
        if N < 8 || !N.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo(N));
        }
        Ok(FftEngine {
            trig: TrigTable::new(),
            log2_n: N.trailing_zeros(),
        })
    }

    /// Transform in place. Total over its input; never fails.
    pub fn transform(&self, re: &mut [Fix15; N], im: &mut [Fix15; N]) {
        self.bit_reverse(re, im);

        // Danielson-Lanczos: combine sub-FFTs of length L into length 2L.
        let mut l = 1usize;
        let mut k = self.log2_n - 1;
        while l < N {
            let istep = l << 1;
            for m in 0..l {
                let j = m << k;
                // Twiddles halved up front; the butterfly halves the other
                // input to match.
                let wr = self.trig.cos(j).half();
                let wi = (-self.trig.sin(j)).half();
                let mut i = m;
                while i < N {
                    let jj = i + l;
                    let tr = wr.mul(re[jj]) - wi.mul(im[jj]);
                    let ti = wr.mul(im[jj]) + wi.mul(re[jj]);
                    let qr = re[i].half();
                    let qi = im[i].half();
                    re[jj] = qr - tr;
                    im[jj] = qi - ti;
                    re[i] = qr + tr;
                    im[i] = qi + ti;
                    i += istep;
                }
            }
            k = k.saturating_sub(1);
            l = istep;
        }
    }

    /// Swap each element with its bit-reversed index, skipping pairs that
    /// were already swapped (and self-pairs).
    fn bit_reverse(&self, re: &mut [Fix15; N], im: &mut [Fix15; N]) {
        let shift = 32 - self.log2_n;
        for m in 1..N - 1 {
            let mr = ((m as u32).reverse_bits() >> shift) as usize;
            if mr <= m {
                continue;
            }
            re.swap(m, mr);
            im.swap(m, mr);
        }
    }
}

/// A detected spectral peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Peak {
    pub bin: usize,
    pub magnitude: Fix15,
}

/// Replace `re[i]` with the approximate magnitude of bin `i` for the first
/// `N/2` bins (the second half mirrors the first for real input).
pub fn magnitudes<const N: usize>(re: &mut [Fix15; N], im: &[Fix15; N]) {
    for i in 0..N / 2 {
        let ar = re[i].abs();
        let ai = im[i].abs();
        let (hi, lo) = if ar >= ai { (ar, ai) } else { (ai, ar) };
        re[i] = hi + lo.mul(ZERO_POINT_FOUR);
    }
}

/// Find the strongest bin, excluding the DC/near-DC bins below
/// [`PEAK_MIN_BIN`]. With no energy above the cutoff the result is the
/// degenerate zero-magnitude peak at bin 0.
pub fn find_peak(magnitudes: &[Fix15]) -> Peak {
    let mut peak = Peak {
        bin: 0,
        magnitude: Fix15::ZERO,
    };
    for (bin, &m) in magnitudes.iter().enumerate().skip(PEAK_MIN_BIN) {
        if m > peak.magnitude {
            peak = Peak { bin, magnitude: m };
        }
    }
    peak
}

/// Frequency of a bin given the capture rate.
pub fn bin_frequency(bin: usize, sample_rate_hz: f32, n: usize) -> f32 {
    bin as f32 * (sample_rate_hz / n as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::TAU;
    use libm::sinf;

    #[test]
    fn rejects_non_power_of_two() {
        assert!(FftEngine::<24>::new().is_err());
        assert!(FftEngine::<4>::new().is_err());
        assert!(FftEngine::<1024>::new().is_ok());
    }

    #[test]
    fn bit_reversal_permutation_n8() {
        let engine = FftEngine::<8>::new().unwrap();
        let mut re = [Fix15::ZERO; 8];
        let mut im = [Fix15::ZERO; 8];
        for (i, r) in re.iter_mut().enumerate() {
            *r = Fix15::from_int(i as i32);
        }
        engine.bit_reverse(&mut re, &mut im);
        let got: [i32; 8] = core::array::from_fn(|i| re[i].to_int());
        assert_eq!(got, [0, 4, 2, 6, 1, 5, 3, 7]);
    }

    fn tone<const N: usize>(bin: usize, amplitude: f32) -> ([Fix15; N], [Fix15; N]) {
        let mut re = [Fix15::ZERO; N];
        let im = [Fix15::ZERO; N];
        for (i, r) in re.iter_mut().enumerate() {
            *r = Fix15::from_f32(amplitude * sinf(TAU * bin as f32 * i as f32 / N as f32));
        }
        (re, im)
    }

    #[test]
    fn single_tone_peaks_at_its_bin() {
        const N: usize = 256;
        let engine = FftEngine::<N>::new().unwrap();
        for bin in [10usize, 32, 100] {
            let (mut re, mut im) = tone::<N>(bin, 100.0);
            engine.transform(&mut re, &mut im);
            magnitudes(&mut re, &im);
            let peak = find_peak(&re[..N / 2]);
            assert_eq!(peak.bin, bin, "tone at bin {} detected at {}", bin, peak.bin);
            assert!(peak.magnitude > Fix15::ZERO);
        }
    }

    #[test]
    fn low_bins_are_rejected() {
        const N: usize = 256;
        let engine = FftEngine::<N>::new().unwrap();
        // Energy only at DC and bin 2, inside the exclusion zone.
        let mut re = [Fix15::from_int(50); N];
        let mut im = [Fix15::ZERO; N];
        for (i, r) in re.iter_mut().enumerate() {
            *r = *r + Fix15::from_f32(50.0 * sinf(TAU * 2.0 * i as f32 / N as f32));
        }
        engine.transform(&mut re, &mut im);
        magnitudes(&mut re, &im);
        let peak = find_peak(&re[..N / 2]);
        // Degenerate peak: no eligible bin carries meaningful energy.
        assert!(
            peak.bin == 0 || peak.magnitude < Fix15::from_f32(1.0),
            "leaked peak at bin {} magnitude {}",
            peak.bin,
            peak.magnitude.to_f32()
        );
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        const N: usize = 64;
        let engine = FftEngine::<N>::new().unwrap();
        let mut re = [Fix15::ZERO; N];
        let mut im = [Fix15::ZERO; N];
        re[0] = Fix15::from_int(1000);
        engine.transform(&mut re, &mut im);
        // A time-domain impulse spreads evenly: every bin sees 1000/N.
        let expected = Fix15::from_int(1000).to_f32() / N as f32;
        for (i, r) in re.iter().enumerate() {
            assert!(
                (r.to_f32() - expected).abs() < 0.5,
                "bin {}: {} != {}",
                i,
                r.to_f32(),
                expected
            );
            assert!(im[i].abs().to_f32() < 0.5);
        }
    }

    #[test]
    fn magnitude_approximation_uses_max_plus_04_min() {
        const N: usize = 8;
        let mut re = [Fix15::ZERO; N];
        let mut im = [Fix15::ZERO; N];
        re[1] = Fix15::from_int(3);
        im[1] = Fix15::from_int(-4);
        magnitudes(&mut re, &im);
        // max(3,4) + 0.4*min(3,4) = 5.2 (the exact magnitude is 5).
        assert!((re[1].to_f32() - 5.2).abs() < 1e-3);
    }

    #[test]
    fn bin_frequency_mapping() {
        let hz = bin_frequency(32, 10_000.0, 1024);
        assert!((hz - 312.5).abs() < 1e-3);
        assert_eq!(bin_frequency(0, 10_000.0, 1024), 0.0);
    }
}
