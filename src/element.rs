//! Output element types: the precision seam of the sampling kernel.
//!
//! A raw draw is an integer in [1, m1]; an element type decides how that
//! integer becomes a floating-point value. Every implementation must keep
//! the result strictly inside the open unit interval after rounding to the
//! target precision, including half precision where the naive scaling of a
//! small draw would round to 0.0 and of a large draw to 1.0.

use bytemuck::{Pod, Zeroable};

use crate::state::NORM;

/// An output element of the uniform sampling kernel.
///
/// Implementations are plain-old-data so filled buffers can be handed to a
/// device or reinterpreted as bytes without copying.
pub trait UniformElement: Pod + Send + Sync + 'static {
    /// Type name used in dispatch logs.
    const NAME: &'static str;

    /// Convert a raw draw in `[1, m1]` into this precision, inside (0, 1).
    fn from_raw(z: u32) -> Self;

    /// Widen back to `f64` (test and inspection helper).
    fn to_f64(self) -> f64;
}

impl UniformElement for f64 {
    const NAME: &'static str = "f64";

    #[inline]
    fn from_raw(z: u32) -> Self {
        // Exact: z has at most 31 significant bits.
        z as f64 * NORM
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

impl UniformElement for f32 {
    const NAME: &'static str = "f32";

    #[inline]
    fn from_raw(z: u32) -> Self {
        let v = (z as f64 * NORM) as f32;
        // Draws within 2^-25 of 1 round up to 1.0 in single precision;
        // pin those to the largest f32 below 1.
        if v >= 1.0 {
            f32::from_bits(0x3f7f_ffff)
        } else {
            v
        }
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// IEEE 754 binary16 value stored as raw bits.
///
/// Kept as a transparent `u16` newtype with explicit conversion routines so
/// half-precision buffers stay POD without pulling in a soft-float crate.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct F16(pub u16);

// SAFETY: F16 is #[repr(transparent)] over u16
unsafe impl Zeroable for F16 {}
unsafe impl Pod for F16 {}

impl F16 {
    /// Positive half-precision values bracketing the open unit interval:
    /// the smallest subnormal (2^-24) and the largest value below one
    /// (1 - 2^-11).
    pub const MIN_POSITIVE: F16 = F16(0x0001);
    /// Largest half-precision value strictly below 1.0.
    pub const MAX_BELOW_ONE: F16 = F16(0x3bff);

    /// Convert from `f32` with round-to-nearest-even.
    pub fn from_f32(value: f32) -> Self {
        let bits = value.to_bits();
        let sign = ((bits >> 16) & 0x8000) as u16;
        let exp = ((bits >> 23) & 0xff) as i32;
        let mantissa = bits & 0x007f_ffff;

        if exp == 0xff {
            // Infinity or NaN; keep NaN payload non-zero.
            let nan = if mantissa != 0 { 0x0200 } else { 0 };
            return F16(sign | 0x7c00 | nan);
        }

        let unbiased = exp - 127;
        if unbiased > 15 {
            return F16(sign | 0x7c00);
        }
        if unbiased >= -14 {
            // Normal range; mantissa carry may bump the exponent, which the
            // plain addition below handles (up to and including overflow
            // into the infinity encoding).
            let exp16 = (unbiased + 15) as u32;
            let mut mant16 = mantissa >> 13;
            let dropped = mantissa & 0x1fff;
            if dropped > 0x1000 || (dropped == 0x1000 && mant16 & 1 == 1) {
                mant16 += 1;
            }
            return F16(sign | ((exp16 << 10) + mant16) as u16);
        }
        if unbiased < -25 {
            // Below half the smallest subnormal: rounds to signed zero.
            return F16(sign);
        }

        // Subnormal range.
        let full = mantissa | 0x0080_0000;
        let shift = (-1 - unbiased) as u32;
        let mut mant16 = full >> shift;
        let dropped = full & ((1u32 << shift) - 1);
        let halfway = 1u32 << (shift - 1);
        if dropped > halfway || (dropped == halfway && mant16 & 1 == 1) {
            mant16 += 1;
        }
        F16(sign | mant16 as u16)
    }

    /// Widen to `f32` (exact for every finite half-precision value).
    pub fn to_f32(self) -> f32 {
        let bits = self.0 as u32;
        let sign = (bits & 0x8000) << 16;
        let exp = (bits >> 10) & 0x1f;
        let mant = bits & 0x03ff;

        let out = if exp == 0x1f {
            sign | 0x7f80_0000 | (mant << 13)
        } else if exp == 0 {
            if mant == 0 {
                sign
            } else {
                // Renormalize a subnormal.
                let mut exp32: u32 = 113; // biased f32 exponent of 2^-14
                let mut m = mant;
                while m & 0x0400 == 0 {
                    m <<= 1;
                    exp32 -= 1;
                }
                sign | (exp32 << 23) | ((m & 0x03ff) << 13)
            }
        } else {
            sign | ((exp + 112) << 23) | (mant << 13)
        };
        f32::from_bits(out)
    }
}

impl UniformElement for F16 {
    const NAME: &'static str = "f16";

    #[inline]
    fn from_raw(z: u32) -> Self {
        let h = F16::from_f32((z as f64 * NORM) as f32);
        // Half precision flushes draws below 2^-25 to zero and rounds draws
        // near m1 up to one; clamp the rounded bits back into (0, 1).
        if h.0 == 0 {
            F16::MIN_POSITIVE
        } else if h.0 >= 0x3c00 {
            F16::MAX_BELOW_ONE
        } else {
            h
        }
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_f32() as f64
    }
}
