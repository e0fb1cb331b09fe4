//! Radical inverse functions.
//!
//! The radical inverse of an index `n` in base `b` mirrors the base-`b`
//! digits of `n` around the radix point:
//!
//! ```text
//! n = d_k ... d_1 d_0   =>   Φ_b(n) = 0.d_0 d_1 ... d_k   (base b)
//! ```
//!
//! All functions here return values in [0, 1); results that would round to
//! 1.0 are clamped to [`ONE_MINUS_EPSILON`].

use super::primes::PRIMES;

/// Largest `f64` strictly below 1.0.
pub const ONE_MINUS_EPSILON: f64 = 1.0 - f64::EPSILON / 2.0;

/// 2^-64.
const INV_2_POW_64: f64 = 5.421_010_862_427_522e-20;

/// Radical inverse in base 2 by bit reversal.
///
/// # Examples
///
/// ```rust
/// use qmc_sampling::qmc::radical_inverse_base2;
///
/// assert_eq!(radical_inverse_base2(1), 0.5);
/// assert_eq!(radical_inverse_base2(3), 0.75);
/// ```
#[inline]
pub fn radical_inverse_base2(n: u64) -> f64 {
    (n.reverse_bits() as f64 * INV_2_POW_64).min(ONE_MINUS_EPSILON)
}

/// Radical inverse of `n` in an arbitrary base.
///
/// `base` must be at least 2.
#[inline]
pub fn radical_inverse(base: u64, n: u64) -> f64 {
    debug_assert!(base >= 2);

    let inv_base = 1.0 / base as f64;
    let mut inv_base_n = inv_base;
    let mut x = 0.0;
    let mut n = n;

    while n != 0 {
        let next = n / base;
        let digit = n - next * base;
        x += digit as f64 * inv_base_n;
        inv_base_n *= inv_base;
        n = next;
    }

    x.min(ONE_MINUS_EPSILON)
}

/// Radical inverse of `n` in the base `PRIMES[prime_index]`.
///
/// Index 0 (base 2) goes through bit reversal.
#[inline]
pub fn fast_radical_inverse(prime_index: usize, n: u64) -> f64 {
    if prime_index == 0 {
        radical_inverse_base2(n)
    } else {
        radical_inverse(PRIMES[prime_index], n)
    }
}

/// Digit-permuted radical inverse of `n` in an arbitrary base.
///
/// Each digit `d` is replaced by `perm[d]` before mirroring. `perm` must be a
/// permutation of `0..base` with `perm[0] == 0`, so that the implicit leading
/// zeros of `n` contribute nothing.
#[inline]
pub fn permuted_radical_inverse(base: u64, perm: &[usize], n: u64) -> f64 {
    debug_assert!(base >= 2);
    debug_assert_eq!(perm.len() as u64, base);
    debug_assert_eq!(perm[0], 0);

    let inv_base = 1.0 / base as f64;
    let mut inv_base_n = inv_base;
    let mut x = 0.0;
    let mut n = n;

    while n != 0 {
        let next = n / base;
        let digit = (n - next * base) as usize;
        x += perm[digit] as f64 * inv_base_n;
        inv_base_n *= inv_base;
        n = next;
    }

    x.min(ONE_MINUS_EPSILON)
}

/// Digit-permuted radical inverse of `n` in the base `PRIMES[prime_index]`.
#[inline]
pub fn fast_permuted_radical_inverse(prime_index: usize, perm: &[usize], n: u64) -> f64 {
    permuted_radical_inverse(PRIMES[prime_index], perm, n)
}
