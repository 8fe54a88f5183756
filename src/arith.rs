//! Modular integer arithmetic for the two recurrence components.
//!
//! Everything here is a pure function over `u32` residues with `u64`
//! intermediates, which gives 64 bits of exact integer precision for
//! products of operands below 2^31.

/// Modulus of the first recurrence component, 2^31 - 1.
pub const M1: u32 = 2_147_483_647;

/// Modulus of the second recurrence component, 2^31 - 21069.
pub const M2: u32 = 2_147_462_579;

/// A 3x3 transition matrix over one of the component moduli, row-major.
pub type Matrix3 = [[u32; 3]; 3];

/// The 3x3 identity matrix.
pub const IDENTITY: Matrix3 = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

/// `(a + b) mod m` for `a, b < m`.
#[inline]
pub fn add_mod(a: u32, b: u32, m: u32) -> u32 {
    let s = a as u64 + b as u64;
    if s >= m as u64 {
        (s - m as u64) as u32
    } else {
        s as u32
    }
}

/// `(a * b) mod m` for `a, b < m < 2^31`.
#[inline]
pub fn mul_mod(a: u32, b: u32, m: u32) -> u32 {
    ((a as u64 * b as u64) % m as u64) as u32
}

/// Matrix-vector product modulo `m`.
///
/// The three partial products fit a `u64` without intermediate reduction:
/// 3 * (2^31 - 1)^2 < 2^64.
#[inline]
pub fn mat_vec(a: &Matrix3, v: &[u32; 3], m: u32) -> [u32; 3] {
    let mut out = [0u32; 3];
    for (row, slot) in a.iter().zip(out.iter_mut()) {
        let mut acc = 0u64;
        for (&c, &x) in row.iter().zip(v.iter()) {
            acc += c as u64 * x as u64;
        }
        *slot = (acc % m as u64) as u32;
    }
    out
}

/// Matrix-matrix product modulo `m`.
pub fn mat_mul(a: &Matrix3, b: &Matrix3, m: u32) -> Matrix3 {
    let mut out = [[0u32; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            let mut acc = 0u64;
            for (k, b_row) in b.iter().enumerate() {
                acc += a[i][k] as u64 * b_row[j] as u64;
            }
            out[i][j] = (acc % m as u64) as u32;
        }
    }
    out
}

/// `a^n mod m` by square-and-multiply.
pub fn mat_pow(a: &Matrix3, mut n: u64, m: u32) -> Matrix3 {
    let mut base = *a;
    let mut out = IDENTITY;
    while n > 0 {
        if n & 1 == 1 {
            out = mat_mul(&out, &base, m);
        }
        base = mat_mul(&base, &base, m);
        n >>= 1;
    }
    out
}

/// `a^(2^k) mod m` by `k` squarings.
///
/// This is how the large jump-ahead tables (2^67, 2^72, 2^134) are obtained;
/// exponents that size are far outside `mat_pow`'s `u64` range.
pub fn mat_pow2(a: &Matrix3, k: u32, m: u32) -> Matrix3 {
    let mut out = *a;
    for _ in 0..k {
        out = mat_mul(&out, &out, m);
    }
    out
}
