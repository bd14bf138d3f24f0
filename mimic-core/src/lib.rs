#![warn(missing_docs)]
//! Core of expert trajectory collection for imitation learning.
//!
//! An expert [`Controller`], typically a model-predictive controller, is run on an
//! [`Env`] whose physical parameters and disturbances are randomized with a
//! [`RandomizationSampler`](randomization::RandomizationSampler). Each step yields a
//! [`Sample`](dataset::Sample) of the augmented observation, the action and the
//! trajectory predicted by the controller. [`Collector`](collector::Collector) runs
//! the episodes and grows a persisted [`Dataset`](dataset::Dataset).
pub mod collector;
pub mod dataset;
pub mod error;
pub mod randomization;
pub mod record;

mod base;
pub use base::{
    Act, Augmenter, Configurable, Controller, Env, IdentityAugmenter, Info, Obs, Step,
};
