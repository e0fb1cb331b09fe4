//! # Low-Discrepancy Sequence Source
//!
//! Precomputed tables and radical inverse functions backing the sampling
//! context:
//!
//! - [`PRIMES`]: Halton bases, one per dimension
//! - [`FAURE_PERMUTATIONS`]: digit permutations decorrelating dimensions
//! - [`PRECOMPUTED_HALTON_SEQUENCE`]: fast-path cache of 4-dimensional points
//! - radical inverse family: plain, base-2 bit reversal, and permuted
//!
//! All tables are process-wide, immutable, and built lazily on first use.
//! Call [`init_tables`] to build them eagerly, e.g. before starting worker
//! threads.
//!
//! ## References
//!
//! - Kollig, T. & Keller, A. (2002). "Efficient Multidimensional Sampling".
//!   Computer Graphics Forum 21(3).
//! - Halton, J. H. (1960). "On the efficiency of certain quasi-random
//!   sequences of points in evaluating multi-dimensional integrals".

mod halton;
mod permutation;
mod primes;
mod radical_inverse;

pub use halton::{
    HaltonSequence, PRECOMPUTED_HALTON_DIMENSION, PRECOMPUTED_HALTON_SEQUENCE,
    PRECOMPUTED_HALTON_SEQUENCE_SIZE,
};
pub use permutation::{faure_permutation, FAURE_PERMUTATIONS, FAURE_PERMUTATION_TABLE_SIZE};
pub use primes::{PRIMES, PRIME_TABLE_SIZE};
pub use radical_inverse::{
    fast_permuted_radical_inverse, fast_radical_inverse, permuted_radical_inverse,
    radical_inverse, radical_inverse_base2, ONE_MINUS_EPSILON,
};

/// Trait for low-discrepancy sequences used in quasi-Monte Carlo methods.
///
/// Low-discrepancy sequences provide more uniform coverage of the unit
/// hypercube compared to pseudo-random sequences, often leading to faster
/// convergence in numerical integration problems.
pub trait LowDiscrepancySequence {
    /// Returns the dimensionality of the sequence.
    fn dimension(&self) -> usize;

    /// Advances the sequence and returns the next point.
    ///
    /// The returned slice holds `dimension()` values, each in [0, 1).
    fn next_point(&mut self) -> &[f64];

    /// Resets the sequence to its initial state.
    ///
    /// After calling this method, the sequence will produce the same
    /// points as a newly initialised instance.
    fn reset(&mut self);

    /// Skips ahead by `n` points in the sequence.
    ///
    /// Lets different workers process non-overlapping portions of the
    /// sequence.
    fn skip(&mut self, n: usize);
}

/// Builds every precomputed table now rather than on first use.
///
/// Idempotent; later calls are no-ops.
pub fn init_tables() {
    lazy_static::initialize(&PRIMES);
    lazy_static::initialize(&FAURE_PERMUTATIONS);
    lazy_static::initialize(&PRECOMPUTED_HALTON_SEQUENCE);

    tracing::debug!(
        primes = PRIMES.len(),
        faure_permutations = FAURE_PERMUTATIONS.len(),
        halton_rows = PRECOMPUTED_HALTON_SEQUENCE.len(),
        "QMC tables initialised"
    );
}
