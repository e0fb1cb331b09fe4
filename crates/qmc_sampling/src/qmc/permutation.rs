//! Faure digit permutations.
//!
//! Raw Halton sequences in large prime bases show strong correlation between
//! neighbouring dimensions. Permuting the digits of the radical inverse with
//! Faure's permutations breaks that structure while keeping the sequence
//! deterministic.
//!
//! The permutations are built recursively:
//!
//! - base 2 is the identity `[0, 1]`
//! - an even base `2c` doubles the permutation of `c`: `2σ(i)` followed by `2σ(i) + 1`
//! - an odd base `2c + 1` takes the permutation of `2c`, shifts every value
//!   `>= c` up by one, and inserts `c` in the middle
//!
//! # References
//!
//! - Faure, H. (1992). "Good permutations for extreme discrepancy".
//!   Journal of Number Theory 42.

use lazy_static::lazy_static;

use super::primes::PRIMES;

/// Number of dimensions covered by [`FAURE_PERMUTATIONS`].
///
/// Dimensions past this index receive Monte Carlo padding offsets.
pub const FAURE_PERMUTATION_TABLE_SIZE: usize = 32;

lazy_static! {
    /// Faure permutations of the digits `0..PRIMES[d]` for every dimension
    /// `d < FAURE_PERMUTATION_TABLE_SIZE`.
    pub static ref FAURE_PERMUTATIONS: Vec<Vec<usize>> = {
        let max_base = PRIMES[FAURE_PERMUTATION_TABLE_SIZE - 1] as usize;
        let all = faure_permutations_up_to(max_base);
        PRIMES[..FAURE_PERMUTATION_TABLE_SIZE]
            .iter()
            .map(|&p| all[p as usize].clone())
            .collect()
    };
}

/// Returns the Faure permutation of the digits of `base`.
///
/// # Panics
///
/// Panics if `base` is 0.
///
/// # Examples
///
/// ```rust
/// use qmc_sampling::qmc::faure_permutation;
///
/// assert_eq!(faure_permutation(5), vec![0, 3, 2, 1, 4]);
/// ```
pub fn faure_permutation(base: usize) -> Vec<usize> {
    assert!(base > 0, "Faure permutation requires a positive base");
    faure_permutations_up_to(base).swap_remove(base)
}

/// Builds the permutations of every base in `0..=max_base`.
///
/// Index 0 holds an empty permutation and index 1 the trivial `[0]`.
fn faure_permutations_up_to(max_base: usize) -> Vec<Vec<usize>> {
    let mut perms: Vec<Vec<usize>> = Vec::with_capacity(max_base + 1);
    perms.push(Vec::new());
    perms.push(vec![0]);

    for base in 2..=max_base {
        let perm = if base % 2 == 0 {
            let half = &perms[base / 2];
            half.iter()
                .map(|&x| 2 * x)
                .chain(half.iter().map(|&x| 2 * x + 1))
                .collect()
        } else {
            let prev = &perms[base - 1];
            let c = (base - 1) / 2;
            let shift = |x: usize| if x >= c { x + 1 } else { x };

            let mut perm = Vec::with_capacity(base);
            perm.extend(prev[..c].iter().map(|&x| shift(x)));
            perm.push(c);
            perm.extend(prev[c..].iter().map(|&x| shift(x)));
            perm
        };
        perms.push(perm);
    }

    perms.truncate(max_base + 1);
    perms
}
