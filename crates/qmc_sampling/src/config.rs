//! Sampling and sample-generator configuration.
//!
//! This module provides validated configuration types and builders for root
//! sampling contexts and for the stride-scheduled sample generators.

use crate::context::MAX_DIMENSION;
use crate::error::ConfigError;

/// Default number of samples buffered before a sink flush.
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Root sampling context configuration.
///
/// Immutable configuration describing the dimension and sample budget of a
/// root context, plus the seed of the generator used for Monte Carlo padding.
/// Use [`SamplingConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use qmc_sampling::config::SamplingConfig;
///
/// let config = SamplingConfig::builder()
///     .dimension(2)
///     .sample_count(16)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.dimension(), 2);
/// assert_eq!(config.sample_count(), 16);
/// assert_eq!(config.instance(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    /// Width of the vectors drawn from the root context.
    dimension: usize,
    /// Declared number of draws; 0 means unbounded.
    sample_count: usize,
    /// Initial instance cursor.
    instance: usize,
    /// Seed of the padding generator.
    seed: u64,
}

impl SamplingConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SamplingConfigBuilder {
        SamplingConfigBuilder::default()
    }

    /// Returns the root context dimension.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the declared sample count (0 = unbounded).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Returns the initial instance cursor.
    #[inline]
    pub fn instance(&self) -> usize {
        self.instance
    }

    /// Returns the padding generator seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimension`] if `dimension` exceeds
    /// [`MAX_DIMENSION`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimension > MAX_DIMENSION {
            return Err(ConfigError::InvalidDimension {
                dimension: self.dimension,
                max: MAX_DIMENSION,
            });
        }
        Ok(())
    }
}

/// Builder for [`SamplingConfig`].
///
/// Unset fields default to a degenerate root: dimension 0, unbounded sample
/// count, instance 0, seed 0.
#[derive(Clone, Debug, Default)]
pub struct SamplingConfigBuilder {
    dimension: usize,
    sample_count: usize,
    instance: usize,
    seed: u64,
}

impl SamplingConfigBuilder {
    /// Sets the root context dimension, in [0, 4].
    #[inline]
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Sets the declared sample count (0 = unbounded).
    #[inline]
    pub fn sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Sets the initial instance cursor.
    #[inline]
    pub fn instance(mut self, instance: usize) -> Self {
        self.instance = instance;
        self
    }

    /// Sets the padding generator seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the dimension is out of range.
    pub fn build(self) -> Result<SamplingConfig, ConfigError> {
        let config = SamplingConfig {
            dimension: self.dimension,
            sample_count: self.sample_count,
            instance: self.instance,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Sample generator fleet configuration.
///
/// Describes how many generators share the sequence index space and how many
/// samples each generator buffers before handing them to its sink.
///
/// # Examples
///
/// ```rust
/// use qmc_sampling::config::GeneratorConfig;
///
/// let config = GeneratorConfig::builder()
///     .generator_count(8)
///     .batch_size(64)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.generator_count(), 8);
/// assert_eq!(config.batch_size(), 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Number of generators interleaving over sequence indices.
    generator_count: usize,
    /// Samples buffered per sink flush.
    batch_size: usize,
}

impl GeneratorConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Returns the number of generators.
    #[inline]
    pub fn generator_count(&self) -> usize {
        self.generator_count
    }

    /// Returns the sink flush batch size.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `generator_count` is 0
    /// - `batch_size` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator_count == 0 {
            return Err(ConfigError::InvalidGeneratorCount(self.generator_count));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }

    /// Checks that `index` names one of the configured generators.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGeneratorIndex`] if `index >= generator_count`.
    pub fn check_generator_index(&self, index: usize) -> Result<(), ConfigError> {
        if index >= self.generator_count {
            return Err(ConfigError::InvalidGeneratorIndex {
                index,
                count: self.generator_count,
            });
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generator_count: 1,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Clone, Debug, Default)]
pub struct GeneratorConfigBuilder {
    generator_count: Option<usize>,
    batch_size: Option<usize>,
}

impl GeneratorConfigBuilder {
    /// Sets the number of generators (at least 1).
    #[inline]
    pub fn generator_count(mut self, generator_count: usize) -> Self {
        self.generator_count = Some(generator_count);
        self
    }

    /// Sets the sink flush batch size (at least 1).
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Builds the configuration.
    ///
    /// Unset fields take the values of [`GeneratorConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either count is zero.
    pub fn build(self) -> Result<GeneratorConfig, ConfigError> {
        let defaults = GeneratorConfig::default();
        let config = GeneratorConfig {
            generator_count: self.generator_count.unwrap_or(defaults.generator_count),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
        };

        config.validate()?;
        Ok(config)
    }
}
