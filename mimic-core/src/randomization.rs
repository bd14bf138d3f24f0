//! Domain randomization.
//!
//! [`RandomizationSampler`] draws values of named simulation parameters, such as
//! gravity, maximum thrust, initial position, wind force and sensor or actuator noise,
//! from a fixed registry of distributions. The registry is built once from a
//! [`RandomizationConfig`] and never changes afterwards.
//!
//! The sampler owns no random number generator. Every draw takes the generator as an
//! argument, so the caller decides on seeding and reproducibility:
//!
//! ```rust
//! use mimic_core::randomization::{RandomizationConfig, RandomizationSampler};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let sampler = RandomizationSampler::new(&RandomizationConfig::default()).unwrap();
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! let gravity = sampler.sample_scalar("gravity", &mut rng).unwrap();
//! assert!((4.9..=14.7).contains(&gravity));
//!
//! let position = sampler.sample_vector("initial_position", &mut rng).unwrap();
//! assert!((30.0..=100.0).contains(&position[2]));
//! ```
mod base;
mod config;
pub use base::{Bounds, DistributionSpec, RandomizationSampler, UniformRange};
pub use config::{DistributionEntry, RandomizationConfig, RangeEntry};
