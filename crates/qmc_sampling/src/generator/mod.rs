//! # Sample Generators
//!
//! Drives sampling context trees over the sequence index space. A fleet of
//! `N` generators interleaves over sequence indices: generator `i` visits
//! `i, i + N, i + 2N, ...`, so the fleet as a whole covers every index
//! exactly once while each generator owns a private padding generator and
//! context tree.
//!
//! ## Module Structure
//!
//! - [`SequenceSampler`]: produces samples for one sequence index
//! - [`SampleSink`]: receives finished sample batches
//! - [`AbortSwitch`]: cooperative cancellation between sequence indices
//! - [`SampleGeneratorBase`]: stride scheduling and batching
//! - [`generate_in_parallel`]: rayon fan-out of a whole fleet
//!
//! ## Usage Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use qmc_sampling::config::GeneratorConfig;
//! use qmc_sampling::context::QmcSamplingContext;
//! use qmc_sampling::generator::{AbortSwitch, SampleGeneratorBase, SequenceSampler};
//! use qmc_sampling::rng::SamplingRng;
//!
//! struct PixelSampler {
//!     rng: RefCell<SamplingRng>,
//! }
//!
//! impl SequenceSampler for PixelSampler {
//!     type Sample = [f64; 2];
//!
//!     fn generate_samples(&mut self, sequence_index: usize, samples: &mut Vec<[f64; 2]>) -> usize {
//!         let mut context = QmcSamplingContext::with_instance(&self.rng, 2, 0, sequence_index);
//!         samples.push(context.next_vector2::<2>());
//!         1
//!     }
//! }
//!
//! let config = GeneratorConfig::builder().generator_count(2).build().unwrap();
//! let sampler = PixelSampler { rng: RefCell::new(SamplingRng::from_seed(0)) };
//! let mut generator = SampleGeneratorBase::new(sampler, 1, &config).unwrap();
//!
//! let mut film: Vec<[f64; 2]> = Vec::new();
//! let stored = generator.generate_samples(3, &mut film, &AbortSwitch::new());
//!
//! assert_eq!(stored, 3);
//! // Sequence indices 1, 3, 5
//! assert_eq!(film[0][0], 0.5);
//! ```

mod abort;
mod base;
mod parallel;

pub use abort::AbortSwitch;
pub use base::SampleGeneratorBase;
pub use parallel::generate_in_parallel;

/// Produces samples for a single sequence index.
///
/// Implementations typically bind a root [`QmcSamplingContext`] to the
/// sequence index and walk a simulated path, splitting at every decision
/// point.
///
/// [`QmcSamplingContext`]: crate::context::QmcSamplingContext
pub trait SequenceSampler {
    /// Sample type produced.
    type Sample;

    /// Appends the samples for `sequence_index` to `samples` and returns how
    /// many were appended.
    fn generate_samples(&mut self, sequence_index: usize, samples: &mut Vec<Self::Sample>) -> usize;
}

/// Destination for finished sample batches.
pub trait SampleSink<S> {
    /// Stores a batch of samples.
    fn store_samples(&mut self, samples: &[S]);
}

impl<S: Clone> SampleSink<S> for Vec<S> {
    fn store_samples(&mut self, samples: &[S]) {
        self.extend_from_slice(samples);
    }
}
