//! Halton sequences.
//!
//! Provides the precomputed 4-dimensional Halton table used by the sampling
//! context fast path, and [`HaltonSequence`], a standalone generator of
//! arbitrary dimension implementing [`LowDiscrepancySequence`].

use lazy_static::lazy_static;

use super::permutation::{FAURE_PERMUTATIONS, FAURE_PERMUTATION_TABLE_SIZE};
use super::primes::PRIME_TABLE_SIZE;
use super::radical_inverse::{fast_permuted_radical_inverse, fast_radical_inverse};
use super::LowDiscrepancySequence;

/// Number of rows in [`PRECOMPUTED_HALTON_SEQUENCE`].
pub const PRECOMPUTED_HALTON_SEQUENCE_SIZE: usize = 1024;

/// Width of each precomputed row (bases 2, 3, 5, 7).
pub const PRECOMPUTED_HALTON_DIMENSION: usize = 4;

lazy_static! {
    /// The first [`PRECOMPUTED_HALTON_SEQUENCE_SIZE`] points of the
    /// 4-dimensional Halton sequence in bases 2, 3, 5 and 7.
    ///
    /// Row `i` is bit-identical to what the radical inverse functions return
    /// for index `i`.
    pub static ref PRECOMPUTED_HALTON_SEQUENCE: Vec<[f64; PRECOMPUTED_HALTON_DIMENSION]> =
        (0..PRECOMPUTED_HALTON_SEQUENCE_SIZE as u64)
            .map(|i| {
                let mut row = [0.0; PRECOMPUTED_HALTON_DIMENSION];
                for (d, x) in row.iter_mut().enumerate() {
                    *x = fast_radical_inverse(d, i);
                }
                row
            })
            .collect();
}

/// Multi-dimensional Halton sequence generator.
///
/// Dimension `d` uses the radical inverse in the `d`-th prime base. The
/// scrambled variant applies Faure digit permutations to the first
/// [`FAURE_PERMUTATION_TABLE_SIZE`] dimensions and leaves the rest unpermuted.
///
/// # Examples
///
/// ```rust
/// use qmc_sampling::qmc::{HaltonSequence, LowDiscrepancySequence};
///
/// let mut halton = HaltonSequence::new(2);
///
/// assert_eq!(halton.next_point(), &[0.0, 0.0]);
/// let p = halton.next_point().to_vec();
/// assert_eq!(p[0], 0.5);
/// assert!((p[1] - 1.0 / 3.0).abs() < 1e-15);
/// ```
#[derive(Clone, Debug)]
pub struct HaltonSequence {
    /// Index of the next point.
    index: u64,
    /// Buffer holding the most recent point.
    point: Vec<f64>,
    /// Whether Faure scrambling is applied.
    scrambled: bool,
}

impl HaltonSequence {
    /// Creates an unscrambled Halton sequence.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is 0 or exceeds [`PRIME_TABLE_SIZE`].
    pub fn new(dimension: usize) -> Self {
        Self::with_scrambling(dimension, false)
    }

    /// Creates a Faure-scrambled Halton sequence.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is 0 or exceeds [`PRIME_TABLE_SIZE`].
    pub fn scrambled(dimension: usize) -> Self {
        Self::with_scrambling(dimension, true)
    }

    fn with_scrambling(dimension: usize, scrambled: bool) -> Self {
        assert!(
            dimension > 0 && dimension <= PRIME_TABLE_SIZE,
            "Halton dimension {} must be in range [1, {}]",
            dimension,
            PRIME_TABLE_SIZE
        );
        Self {
            index: 0,
            point: vec![0.0; dimension],
            scrambled,
        }
    }

    /// Returns the index of the next point to be generated.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Returns whether Faure scrambling is applied.
    #[inline]
    pub fn is_scrambled(&self) -> bool {
        self.scrambled
    }
}

impl LowDiscrepancySequence for HaltonSequence {
    fn dimension(&self) -> usize {
        self.point.len()
    }

    fn next_point(&mut self) -> &[f64] {
        let index = self.index;
        for (d, x) in self.point.iter_mut().enumerate() {
            *x = if self.scrambled && d < FAURE_PERMUTATION_TABLE_SIZE {
                fast_permuted_radical_inverse(d, &FAURE_PERMUTATIONS[d], index)
            } else {
                fast_radical_inverse(d, index)
            };
        }
        self.index += 1;
        &self.point
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn skip(&mut self, n: usize) {
        self.index += n as u64;
    }
}
