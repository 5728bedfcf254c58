//! Q16.15 signed fixed-point arithmetic.
//!
//! [`Fix15`] is the numeric type for everything on the real-time path: DDS
//! amplitude shaping, windowing, and the FFT butterflies. It is a 32-bit
//! signed integer holding `value * 2^15`.
//!
//! Multiplication widens to a single 64-bit intermediate, shifts down 15,
//! and truncates back to 32 bits. Overflow beyond 32 bits wraps silently:
//! two's-complement modulo 2^32, never saturation. The FFT's per-pass
//! halving depends on this exact behavior, so the additive operators wrap
//! as well (a debug-mode overflow panic would change the numerics).

use crate::error::MathError;

/// Fractional bits in the representation.
const FRAC_BITS: u32 = 15;

/// Q16.15 signed fixed-point value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fix15(i32);

impl Fix15 {
    /// Zero.
    pub const ZERO: Fix15 = Fix15(0);
    /// One (`1 << 15`).
    pub const ONE: Fix15 = Fix15(1 << FRAC_BITS);

    /// Construct from the raw bit pattern.
    #[inline(always)]
    pub const fn from_raw(bits: i32) -> Fix15 {
        Fix15(bits)
    }

    /// The raw bit pattern.
    #[inline(always)]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Convert an integer. Wraps if `v` does not fit in 17 bits.
    #[inline(always)]
    pub const fn from_int(v: i32) -> Fix15 {
        Fix15(v.wrapping_shl(FRAC_BITS))
    }

    /// Convert a float (`v * 32768`, truncated).
    #[inline(always)]
    pub fn from_f32(v: f32) -> Fix15 {
        Fix15((v * 32768.0) as i32)
    }

    /// Convert to a float.
    #[inline(always)]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 32768.0
    }

    /// Truncate to an integer (arithmetic shift; rounds toward -inf).
    #[inline(always)]
    pub const fn to_int(self) -> i32 {
        self.0 >> FRAC_BITS
    }

    /// Fixed-point multiply: `(a * b) >> 15` through a 64-bit intermediate,
    /// truncated to 32 bits. Wraps on overflow.
    #[inline(always)]
    pub fn mul(self, rhs: Fix15) -> Fix15 {
        Fix15((((self.0 as i64) * (rhs.0 as i64)) >> FRAC_BITS) as i32)
    }

    /// Fixed-point divide: `(a << 15) / b` through a 64-bit intermediate.
    ///
    /// Errors on a zero denominator. Not used on the tick path; the
    /// envelope ramp increments are derived with it once at startup.
    #[inline]
    pub fn div(self, rhs: Fix15) -> Result<Fix15, MathError> {
        if rhs.0 == 0 {
            return Err(MathError::DivideByZero);
        }
        Ok(Fix15((((self.0 as i64) << FRAC_BITS) / rhs.0 as i64) as i32))
    }

    /// Absolute value (wraps on `i32::MIN`).
    #[inline(always)]
    pub const fn abs(self) -> Fix15 {
        Fix15(self.0.wrapping_abs())
    }

    /// Arithmetic right shift by one. The FFT halves each butterfly input
    /// and twiddle this way to keep running sums in range across passes.
    #[inline(always)]
    pub const fn half(self) -> Fix15 {
        Fix15(self.0 >> 1)
    }
}

impl core::ops::Add for Fix15 {
    type Output = Fix15;

    #[inline(always)]
    fn add(self, rhs: Fix15) -> Fix15 {
        Fix15(self.0.wrapping_add(rhs.0))
    }
}

impl core::ops::Sub for Fix15 {
    type Output = Fix15;

    #[inline(always)]
    fn sub(self, rhs: Fix15) -> Fix15 {
        Fix15(self.0.wrapping_sub(rhs.0))
    }
}

impl core::ops::Neg for Fix15 {
    type Output = Fix15;

    #[inline(always)]
    fn neg(self) -> Fix15 {
        Fix15(self.0.wrapping_neg())
    }
}

impl core::ops::AddAssign for Fix15 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Fix15) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl core::ops::SubAssign for Fix15 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Fix15) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_round_trip() {
        assert_eq!(Fix15::from_int(0).to_int(), 0);
        assert_eq!(Fix15::from_int(42).to_int(), 42);
        assert_eq!(Fix15::from_int(-7).to_int(), -7);
        assert_eq!(Fix15::from_int(1), Fix15::ONE);
    }

    #[test]
    fn float_conversions() {
        assert_eq!(Fix15::from_f32(0.5).raw(), 16384);
        assert_eq!(Fix15::from_f32(-1.0).raw(), -32768);
        let x = Fix15::from_f32(0.4);
        assert_eq!(x.raw(), 13107); // truncation of 13107.2
        assert!((x.to_f32() - 0.4).abs() < 1e-4);
    }

    #[test]
    fn mul_matches_exact_product() {
        // 0.5 * 0.5 = 0.25
        let half = Fix15::from_f32(0.5);
        assert_eq!(half.mul(half), Fix15::from_f32(0.25));
        // 3 * -2 = -6
        assert_eq!(
            Fix15::from_int(3).mul(Fix15::from_int(-2)),
            Fix15::from_int(-6)
        );
        assert_eq!(Fix15::ONE.mul(Fix15::from_f32(0.4)).raw(), 13107);
    }

    #[test]
    fn mul_wraps_instead_of_saturating() {
        // 300 * 300 = 90000, whose Q16.15 encoding exceeds i32::MAX.
        let got = Fix15::from_int(300).mul(Fix15::from_int(300));
        let expected = ((90_000i64 << 15) as i32) as i64; // reduced mod 2^32, signed
        assert_eq!(got.raw() as i64, expected);
        assert!(got.raw() < 0, "product must wrap negative, not clamp");
    }

    #[test]
    fn div_basic() {
        let third = Fix15::ONE.div(Fix15::from_int(3)).unwrap();
        assert!((third.to_f32() - 1.0 / 3.0).abs() < 1e-4);
        assert_eq!(
            Fix15::from_int(-6).div(Fix15::from_int(2)).unwrap(),
            Fix15::from_int(-3)
        );
    }

    #[test]
    fn div_by_zero_is_reported() {
        assert_eq!(
            Fix15::ONE.div(Fix15::ZERO),
            Err(MathError::DivideByZero)
        );
    }

    #[test]
    fn add_sub_wrap() {
        let max = Fix15::from_raw(i32::MAX);
        assert_eq!((max + Fix15::from_raw(1)).raw(), i32::MIN);
        let min = Fix15::from_raw(i32::MIN);
        assert_eq!((min - Fix15::from_raw(1)).raw(), i32::MAX);
    }

    #[test]
    fn abs_and_half() {
        assert_eq!(Fix15::from_int(-5).abs(), Fix15::from_int(5));
        assert_eq!(Fix15::from_int(4).half(), Fix15::from_int(2));
        // Arithmetic shift: -1 halves to -1, like the C original.
        assert_eq!(Fix15::from_raw(-1).half().raw(), -1);
    }
}
