//! Rocket landing environment for expert trajectory collection.
//!
//! A point-mass rocket descends onto a landing pad at the origin. Gravity, the
//! maximum thrust, the initial position and a constant wind force are drawn from a
//! [`RandomizationSampler`](mimic_core::randomization::RandomizationSampler) on every
//! reset, and noise is added to each thrust command and each observation.
//!
//! [`ExpertController`] lands the rocket with a PD law and returns the trajectory it
//! predicts on the nominal model. [`RocketAugmenter`] normalizes observations before
//! they are stored.
mod act;
mod augment;
mod config;
mod controller;
mod env;
mod obs;
pub use act::RocketAct;
pub use augment::RocketAugmenter;
pub use config::RocketEnvConfig;
pub use controller::{ExpertController, ExpertControllerConfig};
pub use env::RocketEnv;
pub use obs::RocketObs;

/// Nominal extent of the position in meters, per axis.
pub const POSITION_EXTENT: f64 = 100.0;

/// Nominal extent of the velocity in meters per second, per axis.
pub const VELOCITY_EXTENT: f64 = 20.0;
