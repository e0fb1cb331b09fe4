//! # QMC Sampling
//!
//! Deterministic quasi-Monte Carlo sampling for light-transport simulation.
//!
//! A [`QmcSamplingContext`] hands out points of a Cranley-Patterson rotated
//! Halton sequence. Every decision point of a simulated path (lens, light,
//! BRDF, ...) splits the context to obtain a child that draws from a fresh
//! block of dimensions, so nested decisions never reuse a dimension.
//! Dimensions beyond the Faure permutation table are padded with draws from a
//! seeded pseudo-random generator.
//!
//! ## Module Structure
//!
//! - [`qmc`]: prime, Faure permutation and precomputed Halton tables, radical
//!   inverse functions
//! - [`rng`]: seeded pseudo-random generator used for Monte Carlo padding
//! - [`context`]: sampling contexts with trajectory splitting
//! - [`generator`]: stride-scheduled sample generators and parallel fan-out
//! - [`config`]: validated configuration builders
//! - [`error`]: error types
//!
//! ## Usage Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use qmc_sampling::{QmcSamplingContext, SamplingRng};
//!
//! let rng = RefCell::new(SamplingRng::from_seed(42));
//!
//! // Root context bound to pixel sample 0
//! let root = QmcSamplingContext::root(&rng);
//!
//! // Lens decision: two dimensions, one sample
//! let mut lens = root.split(2, 1);
//! let uv: [f64; 2] = lens.next_vector2();
//! assert!(uv.iter().all(|&x| (0.0..1.0).contains(&x)));
//!
//! // Light decision draws from dimensions 2 and 3
//! let light = lens.split(2, 1);
//! assert_eq!(light.base_dimension(), 2);
//! ```
//!
//! ## Determinism
//!
//! Given the same padding seed and the same sequence of splits and draws, a
//! context tree reproduces the same points bit for bit. Draws within the
//! Faure-permuted dimensions do not consume the generator at all.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![allow(unknown_lints)]

pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod qmc;
pub mod rng;

pub use config::{GeneratorConfig, SamplingConfig};
pub use context::{QmcSamplingContext, MAX_DIMENSION};
pub use error::{ConfigError, SamplingError};
pub use generator::{generate_in_parallel, AbortSwitch, SampleGeneratorBase, SequenceSampler};
pub use rng::{SamplingRng, UniformSource};
