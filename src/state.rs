//! Per-lane generator state and the combined recurrence step.
//!
//! The generator is MRG31k3p (L'Ecuyer & Touzin 2000): two order-3 linear
//! recurrences whose multipliers are sums of powers of two, so one step costs
//! a handful of shifts, masks and conditional subtractions. The combined
//! output has period close to 2^185 and splits into non-overlapping streams
//! via the jump-ahead matrices in [`crate::jump`].

use bytemuck::{Pod, Zeroable};

use crate::arith::{M1, M2};
use crate::error::{MrgError, Result};

// Shift/mask decomposition of the component multipliers.
const MASK12: u64 = 511; // low 9 bits
const MASK13: u64 = 16_777_215; // low 24 bits
const MASK2: u64 = 65_535; // low 16 bits
const MULT2: u64 = 21_069; // 2^31 mod m2

/// Scale factor mapping a raw draw in [1, m1] into (0, 1]: exactly 2^-31.
pub const NORM: f64 = 1.0 / 2_147_483_648.0;

/// State vector of one lane: two triples of 32-bit residues (24 bytes).
///
/// `comp1` holds the three most recent values of the first recurrence
/// (mod [`M1`]), newest first; `comp2` the second recurrence (mod [`M2`]).
/// Neither triple may be all zero (the degenerate fixed point), and every
/// word must be below its modulus; both are enforced at construction and
/// never re-checked during steady-state stepping.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MrgState {
    /// First-component history, newest first, each word below `M1`.
    pub comp1: [u32; 3],
    /// Second-component history, newest first, each word below `M2`.
    pub comp2: [u32; 3],
}

// SAFETY: MrgState is #[repr(C)] with only u32 fields and no padding
unsafe impl Zeroable for MrgState {}
unsafe impl Pod for MrgState {}

impl MrgState {
    /// Build the root state for a scalar seed, replicated into all six words.
    ///
    /// The seed must satisfy `1 <= seed < M2` so that the replicated words
    /// are valid residues under both moduli.
    pub fn from_seed(seed: u32) -> Result<Self> {
        if seed == 0 || seed >= M2 {
            return Err(MrgError::invalid_state(format!(
                "seed must be in 1..{M2}, got {seed}"
            )));
        }
        Ok(Self {
            comp1: [seed; 3],
            comp2: [seed; 3],
        })
    }

    /// Build a state from six explicit words `[x1, x2, x3, y1, y2, y3]`.
    pub fn from_words(words: [u32; 6]) -> Result<Self> {
        let state = Self {
            comp1: [words[0], words[1], words[2]],
            comp2: [words[3], words[4], words[5]],
        };
        state.validate()?;
        Ok(state)
    }

    /// The six state words, first component then second.
    pub fn words(&self) -> [u32; 6] {
        [
            self.comp1[0],
            self.comp1[1],
            self.comp1[2],
            self.comp2[0],
            self.comp2[1],
            self.comp2[2],
        ]
    }

    /// Check the modulus-range and non-degeneracy invariants.
    pub fn validate(&self) -> Result<()> {
        for &w in &self.comp1 {
            if w >= M1 {
                return Err(MrgError::invalid_state(format!(
                    "first-component word {w} is not below modulus {M1}"
                )));
            }
        }
        for &w in &self.comp2 {
            if w >= M2 {
                return Err(MrgError::invalid_state(format!(
                    "second-component word {w} is not below modulus {M2}"
                )));
            }
        }
        if self.comp1 == [0; 3] || self.comp2 == [0; 3] {
            return Err(MrgError::invalid_state(
                "an all-zero component triple is a fixed point",
            ));
        }
        Ok(())
    }

    /// Advance by one step and return the combined raw draw in `[1, M1]`.
    ///
    /// Component 1: `x_n = (2^22 x_{n-2} + (2^7 + 1) x_{n-3}) mod m1`.
    /// Component 2: `x_n = (2^15 x_{n-1} + (2^15 + 1) x_{n-3}) mod m2`.
    /// The multiplications by powers of two are carried out as shift/mask
    /// rotations modulo each modulus. The oldest word of each triple is
    /// overwritten in place.
    #[inline]
    pub fn next_raw(&mut self) -> u32 {
        let m1 = M1 as u64;
        let m2 = M2 as u64;

        let x12 = self.comp1[1] as u64;
        let x13 = self.comp1[2] as u64;
        let mut y1 = ((x12 & MASK12) << 22) + (x12 >> 9) + ((x13 & MASK13) << 7) + (x13 >> 24);
        if y1 >= m1 {
            y1 -= m1;
        }
        y1 += x13;
        if y1 >= m1 {
            y1 -= m1;
        }
        self.comp1 = [y1 as u32, self.comp1[0], self.comp1[1]];

        let x21 = self.comp2[0] as u64;
        let x23 = self.comp2[2] as u64;
        let mut t = ((x21 & MASK2) << 15) + MULT2 * (x21 >> 16);
        if t >= m2 {
            t -= m2;
        }
        let mut y2 = ((x23 & MASK2) << 15) + MULT2 * (x23 >> 16);
        if y2 >= m2 {
            y2 -= m2;
        }
        y2 += x23;
        if y2 >= m2 {
            y2 -= m2;
        }
        y2 += t;
        if y2 >= m2 {
            y2 -= m2;
        }
        self.comp2 = [y2 as u32, self.comp2[0], self.comp2[1]];

        // Combination: (x1 - x2) mod m1, with 0 mapped to m1 so the scaled
        // draw stays inside the open unit interval.
        let a = self.comp1[0] as u64;
        let b = self.comp2[0] as u64;
        if a <= b {
            (a + m1 - b) as u32
        } else {
            (a - b) as u32
        }
    }

    /// Advance by one step and return a uniform draw in (0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_raw() as f64 * NORM
    }
}
