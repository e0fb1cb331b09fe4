//! Parallel fan-out of a generator fleet.
//!
//! Each rayon task builds its own sampler through the factory, so every
//! worker owns a private padding generator and context tree; nothing
//! sampling-related is shared between threads except the abort switch.

use rayon::prelude::*;

use crate::config::GeneratorConfig;
use crate::error::ConfigError;

use super::{AbortSwitch, SampleGeneratorBase, SequenceSampler};

/// Runs every generator of the fleet in parallel.
///
/// `factory(generator_index)` builds the sampler of each generator. Each
/// generator produces at least `samples_per_generator` samples (fewer if
/// aborted). Results are returned in generator order, so the output does not
/// depend on thread scheduling.
///
/// # Errors
///
/// Returns `ConfigError` if the configuration is invalid.
///
/// # Examples
///
/// ```rust
/// use qmc_sampling::config::GeneratorConfig;
/// use qmc_sampling::generator::{generate_in_parallel, AbortSwitch, SequenceSampler};
///
/// struct Indices;
///
/// impl SequenceSampler for Indices {
///     type Sample = usize;
///
///     fn generate_samples(&mut self, sequence_index: usize, samples: &mut Vec<usize>) -> usize {
///         samples.push(sequence_index);
///         1
///     }
/// }
///
/// let config = GeneratorConfig::builder().generator_count(3).build().unwrap();
/// let per_generator =
///     generate_in_parallel(&config, |_| Indices, 2, &AbortSwitch::new()).unwrap();
///
/// assert_eq!(per_generator, vec![vec![0, 3], vec![1, 4], vec![2, 5]]);
/// ```
pub fn generate_in_parallel<G, F>(
    config: &GeneratorConfig,
    factory: F,
    samples_per_generator: usize,
    abort_switch: &AbortSwitch,
) -> Result<Vec<Vec<G::Sample>>, ConfigError>
where
    G: SequenceSampler,
    G::Sample: Clone + Send,
    F: Fn(usize) -> G + Sync,
{
    config.validate()?;

    tracing::debug!(
        generator_count = config.generator_count(),
        samples_per_generator,
        "Starting parallel sample generation"
    );

    (0..config.generator_count())
        .into_par_iter()
        .map(|generator_index| -> Result<Vec<G::Sample>, ConfigError> {
            let mut generator =
                SampleGeneratorBase::new(factory(generator_index), generator_index, config)?;
            let mut samples = Vec::with_capacity(samples_per_generator);
            generator.generate_samples(samples_per_generator, &mut samples, abort_switch);
            Ok(samples)
        })
        .collect()
}
