//! # Uniform Fallback Generator
//!
//! The sampling engine is deterministic up to the dimensions covered by the
//! precomputed permutation tables. Past that budget, Cranley-Patterson offsets
//! are drawn from a pseudo-random uniform generator ("Monte Carlo padding").
//! This module defines the capability the engine needs from such a generator
//! and a seeded default implementation.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: generators are seeded, so a fixed seed yields
//!   byte-identical sampling sequences
//! - **Injection**: the generator is owned by the caller and lent to a root
//!   context; every split shares the same instance
//! - **Static Dispatch**: contexts are generic over [`UniformSource`], no
//!   `Box<dyn Trait>` in hot paths
//!
//! ## Module Structure
//!
//! - [`UniformSource`]: the uniform-draw capability
//! - [`SamplingRng`]: seeded wrapper around `rand::rngs::StdRng`
//!
//! ## Usage Example
//!
//! ```rust
//! use qmc_sampling::rng::{SamplingRng, UniformSource};
//!
//! let mut rng = SamplingRng::from_seed(12345);
//!
//! // Uniform value in [0, 1)
//! let u = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&u));
//! ```

mod prng;

pub use prng::SamplingRng;

/// A source of uniform pseudo-random values in [0, 1).
///
/// Anything that can produce a uniform `f64` in the half-open unit interval
/// can serve as the padding generator of a sampling context tree.
pub trait UniformSource {
    /// Returns the next uniform value in [0, 1).
    fn gen_uniform(&mut self) -> f64;
}

impl<T: UniformSource + ?Sized> UniformSource for &mut T {
    #[inline]
    fn gen_uniform(&mut self) -> f64 {
        (**self).gen_uniform()
    }
}
