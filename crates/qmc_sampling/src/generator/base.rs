//! Stride-scheduled sample generator.

use crate::config::GeneratorConfig;
use crate::error::ConfigError;

use super::{AbortSwitch, SampleSink, SequenceSampler};

/// Sample generator visiting every `stride`-th sequence index.
///
/// Generator `generator_index` of a fleet of `generator_count` starts at
/// sequence index `generator_index` and advances by `generator_count` after
/// each index. Samples are buffered and handed to the sink in batches of
/// `batch_size`.
///
/// # Type Parameters
///
/// * `G` - The per-index sampler
pub struct SampleGeneratorBase<G: SequenceSampler> {
    /// Per-index sampler.
    sampler: G,
    /// Position of this generator in the fleet.
    generator_index: usize,
    /// Distance between consecutive sequence indices.
    stride: usize,
    /// Samples buffered per sink flush.
    batch_size: usize,
    /// Next sequence index to visit.
    sequence_index: usize,
    /// Pending samples not yet handed to the sink.
    samples: Vec<G::Sample>,
}

impl<G: SequenceSampler> SampleGeneratorBase<G> {
    /// Creates generator `generator_index` of the fleet described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid or
    /// `generator_index` is not below its generator count.
    pub fn new(
        sampler: G,
        generator_index: usize,
        config: &GeneratorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        config.check_generator_index(generator_index)?;

        Ok(Self {
            sampler,
            generator_index,
            stride: config.generator_count(),
            batch_size: config.batch_size(),
            sequence_index: generator_index,
            samples: Vec::with_capacity(config.batch_size()),
        })
    }

    /// Rewinds the generator to its first sequence index and drops pending
    /// samples.
    pub fn reset(&mut self) {
        self.sequence_index = self.generator_index;
        self.samples.clear();
        tracing::debug!(
            generator_index = self.generator_index,
            "Sample generator reset"
        );
    }

    /// Generates at least `sample_count` samples and stores them into `sink`.
    ///
    /// Sequence indices are visited whole, so the last one may push the total
    /// past `sample_count`. The abort switch is checked before each sequence
    /// index; on abort, samples produced so far are still stored.
    ///
    /// Returns the number of samples stored.
    pub fn generate_samples<S>(
        &mut self,
        sample_count: usize,
        sink: &mut S,
        abort_switch: &AbortSwitch,
    ) -> usize
    where
        S: SampleSink<G::Sample> + ?Sized,
    {
        let mut stored = 0;

        while stored < sample_count {
            if abort_switch.is_aborted() {
                tracing::debug!(
                    generator_index = self.generator_index,
                    stored,
                    sample_count,
                    "Sample generation aborted"
                );
                break;
            }

            let produced = self
                .sampler
                .generate_samples(self.sequence_index, &mut self.samples);
            self.sequence_index += self.stride;
            stored += produced;

            if self.samples.len() >= self.batch_size {
                self.flush(sink);
            }
        }

        self.flush(sink);
        stored
    }

    fn flush<S>(&mut self, sink: &mut S)
    where
        S: SampleSink<G::Sample> + ?Sized,
    {
        if self.samples.is_empty() {
            return;
        }
        tracing::trace!(
            generator_index = self.generator_index,
            batch = self.samples.len(),
            "Flushing sample batch"
        );
        sink.store_samples(&self.samples);
        self.samples.clear();
    }

    /// Returns the position of this generator in the fleet.
    #[inline]
    pub fn generator_index(&self) -> usize {
        self.generator_index
    }

    /// Returns the distance between consecutive sequence indices.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the next sequence index to visit.
    #[inline]
    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    /// Returns the per-index sampler.
    #[inline]
    pub fn sampler(&self) -> &G {
        &self.sampler
    }

    /// Returns the per-index sampler mutably.
    #[inline]
    pub fn sampler_mut(&mut self) -> &mut G {
        &mut self.sampler
    }

    /// Consumes the generator and returns its sampler.
    pub fn into_sampler(self) -> G {
        self.sampler
    }
}
