//! # QMC Sampling Context
//!
//! A sampling context hands out sample vectors for one decision point of a
//! simulated light path and allocates fresh dimensions to the decision points
//! that follow it. It combines:
//!
//! - deterministic sampling based on Halton sequences
//! - Faure digit scrambling
//! - Cranley-Patterson rotation
//! - Monte Carlo padding
//!
//! ## Trajectory Splitting
//!
//! Every decision point calls [`QmcSamplingContext::split`] (fork an
//! independent child) or [`QmcSamplingContext::split_in_place`] (turn the
//! receiver into the child). The child starts where the parent's dimension
//! slice ends, and inherits the parent's current instance as its base
//! instance. Reusing the instance number as an extra coordinate keeps sibling
//! paths independent without consuming additional precomputed dimensions.
//!
//! ```text
//! root (dim 0) ──split(2, 4)──► pixel   [dims 0..2, 4 samples]
//!                                 │
//!                                 └─split_in_place(3, 1)──► bounce [dims 2..5]
//! ```
//!
//! ## Shared Generator
//!
//! All contexts of one tree share a single padding generator through a
//! `&RefCell<R>`. The generator is only touched when a split reaches
//! dimensions past the Faure permutation table. A tree is single-threaded;
//! parallel renderers give every worker its own generator and its own tree.
//!
//! ## Preconditions
//!
//! Protocol violations (dimension above [`MAX_DIMENSION`], drawing from the
//! degenerate root, splitting in the middle of a sequence, drawing a vector
//! of the wrong width, overrunning the sample count) are programming errors
//! caught by debug assertions.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use qmc_sampling::context::QmcSamplingContext;
//! use qmc_sampling::rng::SamplingRng;
//!
//! let rng = RefCell::new(SamplingRng::from_seed(42));
//!
//! // One pixel sample: 2 dimensions, 4 samples
//! let mut pixel = QmcSamplingContext::new(&rng, 2, 4);
//! for _ in 0..4 {
//!     let [u, v] = pixel.next_vector2::<2>();
//!     assert!((0.0..1.0).contains(&u) && (0.0..1.0).contains(&v));
//! }
//!
//! // Scattering decision: 3 dimensions, 1 sample
//! pixel.split_in_place(3, 1);
//! let s = pixel.next_vector2::<3>();
//! assert_eq!(pixel.total_dimension(), 5);
//! # let _ = s;
//! ```
//!
//! ## References
//!
//! - Kollig, T. & Keller, A. (2002). "Efficient Multidimensional Sampling".
//!   Computer Graphics Forum 21(3).

use std::cell::RefCell;
use std::fmt;

use crate::config::SamplingConfig;
use crate::error::{ConfigError, SamplingError};
use crate::qmc::{
    fast_permuted_radical_inverse, fast_radical_inverse, FAURE_PERMUTATIONS,
    FAURE_PERMUTATION_TABLE_SIZE, PRECOMPUTED_HALTON_SEQUENCE, PRECOMPUTED_HALTON_SEQUENCE_SIZE,
    PRIME_TABLE_SIZE,
};
use crate::rng::UniformSource;

/// Largest number of dimensions a single context can draw per vector.
pub const MAX_DIMENSION: usize = 4;

/// Applies a Cranley-Patterson rotation: `x + offset` modulo 1.
///
/// For `x` and `offset` in [0, 1) the result is in [0, 1).
///
/// # Examples
///
/// ```rust
/// use qmc_sampling::context::rotate;
///
/// assert_eq!(rotate(0.25, 0.5), 0.75);
/// assert_eq!(rotate(0.75, 0.5), 0.25);
/// ```
#[inline]
pub fn rotate(x: f64, offset: f64) -> f64 {
    debug_assert!(offset >= 0.0);

    let x = x + offset;
    if x >= 1.0 {
        x - 1.0
    } else {
        x
    }
}

/// Sampling context with trajectory splitting.
///
/// A value type: [`Clone`] produces an independent copy of the state that
/// shares the generator handle. See the [module documentation](self) for the
/// splitting protocol.
///
/// # Type Parameters
///
/// * `R` - Padding generator, any [`UniformSource`]
pub struct QmcSamplingContext<'a, R> {
    /// Padding generator shared by the whole context tree.
    rng: &'a RefCell<R>,
    /// Dimensions consumed by ancestors.
    base_dimension: usize,
    /// Instance offset inherited at split time.
    base_instance: usize,
    /// Width of the vectors drawn from this context.
    dimension: usize,
    /// Declared number of draws; 0 means unbounded.
    sample_count: usize,
    /// Draw cursor.
    instance: usize,
    /// Cranley-Patterson rotation per local dimension.
    offset: [f64; MAX_DIMENSION],
}

impl<'a, R: UniformSource> QmcSamplingContext<'a, R> {
    /// Creates a context of dimension 0.
    ///
    /// It cannot be drawn from directly; only the children obtained by
    /// splitting it can.
    pub fn root(rng: &'a RefCell<R>) -> Self {
        Self {
            rng,
            base_dimension: 0,
            base_instance: 0,
            dimension: 0,
            sample_count: 0,
            instance: 0,
            offset: [0.0; MAX_DIMENSION],
        }
    }

    /// Creates a root context for `dimension` dimensions and `sample_count`
    /// samples.
    ///
    /// Set `sample_count` to 0 if the number of samples is unknown or
    /// unbounded.
    ///
    /// # Panics
    ///
    /// `dimension` above [`MAX_DIMENSION`] is a precondition violation.
    pub fn new(rng: &'a RefCell<R>, dimension: usize, sample_count: usize) -> Self {
        Self::with_instance(rng, dimension, sample_count, 0)
    }

    /// Creates a root context whose cursor starts at `instance`.
    ///
    /// # Panics
    ///
    /// `dimension` above [`MAX_DIMENSION`] is a precondition violation.
    pub fn with_instance(
        rng: &'a RefCell<R>,
        dimension: usize,
        sample_count: usize,
        instance: usize,
    ) -> Self {
        let mut context = Self::with_base(rng, 0, 0, dimension, sample_count);
        context.instance = instance;
        context
    }

    /// Creates a root context from a validated configuration.
    ///
    /// The configuration seed is not used here; it belongs to whoever builds
    /// the generator behind `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimension`] if the configured dimension
    /// exceeds [`MAX_DIMENSION`].
    pub fn from_config(rng: &'a RefCell<R>, config: &SamplingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_instance(
            rng,
            config.dimension(),
            config.sample_count(),
            config.instance(),
        ))
    }

    fn with_base(
        rng: &'a RefCell<R>,
        base_dimension: usize,
        base_instance: usize,
        dimension: usize,
        sample_count: usize,
    ) -> Self {
        debug_assert!(
            dimension <= MAX_DIMENSION,
            "sampling context dimension {} exceeds {}",
            dimension,
            MAX_DIMENSION
        );

        let mut context = Self {
            rng,
            base_dimension,
            base_instance,
            dimension,
            sample_count,
            instance: 0,
            offset: [0.0; MAX_DIMENSION],
        };
        context.compute_offset();
        context
    }

    /// Copies the full state of `rhs` into `self`.
    ///
    /// The receiver keeps its own generator handle.
    pub fn assign(&mut self, rhs: &Self) {
        self.base_dimension = rhs.base_dimension;
        self.base_instance = rhs.base_instance;
        self.dimension = rhs.dimension;
        self.sample_count = rhs.sample_count;
        self.instance = rhs.instance;
        self.offset = rhs.offset;
    }

    /// Trajectory splitting: returns a child context for `dimension`
    /// dimensions and `sample_count` samples.
    ///
    /// The parent is left untouched and can still be drawn from.
    ///
    /// # Panics
    ///
    /// Splitting in the middle of a bounded sequence, or asking for more than
    /// [`MAX_DIMENSION`] dimensions, is a precondition violation.
    pub fn split(&self, dimension: usize, sample_count: usize) -> Self {
        debug_assert!(
            self.is_splittable(),
            "cannot split in the middle of a sequence (instance {} of {})",
            self.instance,
            self.sample_count
        );

        Self::with_base(
            self.rng,
            self.base_dimension + self.dimension, // dimension allocation
            self.base_instance + self.instance,   // decorrelation by generalization
            dimension,
            sample_count,
        )
    }

    /// In-place trajectory splitting.
    ///
    /// Same bookkeeping as [`split`](Self::split), but the receiver becomes
    /// the child; its previous dimension, sample count and cursor are
    /// discarded.
    ///
    /// # Panics
    ///
    /// Same preconditions as [`split`](Self::split).
    pub fn split_in_place(&mut self, dimension: usize, sample_count: usize) {
        debug_assert!(
            self.is_splittable(),
            "cannot split in the middle of a sequence (instance {} of {})",
            self.instance,
            self.sample_count
        );
        debug_assert!(
            dimension <= MAX_DIMENSION,
            "sampling context dimension {} exceeds {}",
            dimension,
            MAX_DIMENSION
        );

        self.base_dimension += self.dimension;
        self.base_instance += self.instance;
        self.dimension = dimension;
        self.sample_count = sample_count;
        self.instance = 0;

        self.compute_offset();
    }

    /// Sets the instance cursor.
    #[inline]
    pub fn set_instance(&mut self, instance: usize) {
        self.instance = instance;
    }

    fn compute_offset(&mut self) {
        let base_instance = self.base_instance as u64;

        for i in 0..self.dimension {
            let d = self.base_dimension + i;

            self.offset[i] = if d < FAURE_PERMUTATION_TABLE_SIZE {
                fast_permuted_radical_inverse(d, &FAURE_PERMUTATIONS[d], base_instance)
            } else {
                let u = self.rng.borrow_mut().gen_uniform();
                tracing::trace!(dimension = d, offset = u, "Monte Carlo padding");
                u
            };
        }

        for offset in self.offset.iter_mut().skip(self.dimension) {
            *offset = 0.0;
        }
    }

    /// Returns the next sample in [0, 1].
    ///
    /// # Errors
    ///
    /// Always returns [`SamplingError::NotImplemented`].
    pub fn next_double1(&mut self) -> Result<f64, SamplingError> {
        self.next_vector1::<1>().map(|v| v[0])
    }

    /// Returns the next sample in [0, 1).
    ///
    /// The context must have dimension 1.
    #[inline]
    pub fn next_double2(&mut self) -> f64 {
        self.next_vector2::<1>()[0]
    }

    /// Fills `v` with the next sample in [0, 1]^n.
    ///
    /// No closed-interval construction is provided; the call fails instead
    /// of returning a half-open sample under a closed-interval contract. The
    /// cursor does not advance.
    ///
    /// # Errors
    ///
    /// Always returns [`SamplingError::NotImplemented`].
    pub fn next_vector1_into(&mut self, _v: &mut [f64]) -> Result<(), SamplingError> {
        Err(SamplingError::NotImplemented {
            operation: "next_vector1",
        })
    }

    /// Returns the next sample in [0, 1]^N.
    ///
    /// # Errors
    ///
    /// Always returns [`SamplingError::NotImplemented`].
    pub fn next_vector1<const N: usize>(&mut self) -> Result<[f64; N], SamplingError> {
        let mut v = [0.0; N];
        self.next_vector1_into(&mut v)?;
        Ok(v)
    }

    /// Fills `v` with the next sample in [0, 1)^n, where `n = v.len()`.
    ///
    /// Instances below [`PRECOMPUTED_HALTON_SEQUENCE_SIZE`] read the
    /// precomputed Halton table; later instances compute the radical
    /// inverses directly. Both paths give identical values. The cursor
    /// advances by one.
    ///
    /// # Panics
    ///
    /// `n` different from the context dimension, a degenerate root, or a
    /// cursor already at a bounded sample count is a precondition violation.
    pub fn next_vector2_into(&mut self, v: &mut [f64]) {
        let n = v.len();

        debug_assert!(
            self.sample_count == 0 || self.instance < self.sample_count,
            "sample count {} exhausted",
            self.sample_count
        );
        debug_assert!(
            self.dimension > 0,
            "cannot draw from a context of dimension 0; split it first"
        );
        debug_assert_eq!(n, self.dimension, "vector width must match context dimension");
        debug_assert!(n <= PRIME_TABLE_SIZE);

        if self.instance < PRECOMPUTED_HALTON_SEQUENCE_SIZE {
            let row = &PRECOMPUTED_HALTON_SEQUENCE[self.instance];
            for (i, x) in v.iter_mut().enumerate() {
                *x = rotate(row[i], self.offset[i]);
            }
        } else {
            // Prime index 0 is the base-2 bit reversal.
            let instance = self.instance as u64;
            for (i, x) in v.iter_mut().enumerate() {
                *x = rotate(fast_radical_inverse(i, instance), self.offset[i]);
            }
        }

        self.instance += 1;
    }

    /// Returns the next sample in [0, 1)^N.
    ///
    /// See [`next_vector2_into`](Self::next_vector2_into).
    #[inline]
    pub fn next_vector2<const N: usize>(&mut self) -> [f64; N] {
        let mut v = [0.0; N];
        self.next_vector2_into(&mut v);
        v
    }
}

impl<'a, R> QmcSamplingContext<'a, R> {
    /// Returns the total dimension: ancestor dimensions plus this context's.
    #[inline]
    pub fn total_dimension(&self) -> usize {
        self.base_dimension + self.dimension
    }

    /// Returns the total instance number: inherited base plus cursor.
    #[inline]
    pub fn total_instance(&self) -> usize {
        self.base_instance + self.instance
    }

    /// Returns the number of dimensions consumed by ancestors.
    #[inline]
    pub fn base_dimension(&self) -> usize {
        self.base_dimension
    }

    /// Returns the instance offset inherited at split time.
    #[inline]
    pub fn base_instance(&self) -> usize {
        self.base_instance
    }

    /// Returns the width of the vectors drawn from this context.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the declared sample count (0 = unbounded).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Returns the draw cursor.
    #[inline]
    pub fn instance(&self) -> usize {
        self.instance
    }

    /// Returns the rotation offsets of the active dimensions.
    #[inline]
    pub fn offset(&self) -> &[f64] {
        &self.offset[..self.dimension]
    }

    /// Returns `true` once a bounded context has produced all its samples.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.sample_count != 0 && self.instance == self.sample_count
    }

    /// Returns `true` if splitting is allowed: the context is unbounded or
    /// exhausted.
    #[inline]
    pub fn is_splittable(&self) -> bool {
        self.sample_count == 0 || self.instance == self.sample_count
    }
}

impl<R> Clone for QmcSamplingContext<'_, R> {
    fn clone(&self) -> Self {
        Self {
            rng: self.rng,
            base_dimension: self.base_dimension,
            base_instance: self.base_instance,
            dimension: self.dimension,
            sample_count: self.sample_count,
            instance: self.instance,
            offset: self.offset,
        }
    }
}

impl<R> fmt::Debug for QmcSamplingContext<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QmcSamplingContext")
            .field("base_dimension", &self.base_dimension)
            .field("base_instance", &self.base_instance)
            .field("dimension", &self.dimension)
            .field("sample_count", &self.sample_count)
            .field("instance", &self.instance)
            .field("offset", &self.offset())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
