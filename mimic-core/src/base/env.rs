//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// Represents an environment, typically a physics simulation.
///
/// Implementations are expected to randomize their initial state and disturbances on
/// every reset, e.g. with a [`RandomizationSampler`], and to derive all randomness of
/// an episode from the index given to [`Env::reset_with_index`]. This way an episode
/// can be reproduced from its index alone.
///
/// [`RandomizationSampler`]: crate::randomization::RandomizationSampler
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment.
    ///
    /// `seed` only initializes the generator used before the first reset, since
    /// [`Env::reset_with_index`] reseeds from the episode index.
    /// [`Collector`](crate::collector::Collector) always passes 0.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment with a given index and returns the initial observation.
    ///
    /// The index is used as the random seed of the episode.
    /// [`Collector`](crate::collector::Collector) gives the episode index here, so
    /// the seeds strictly increase over a collection run.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs>;

    /// Performes an environment step.
    ///
    /// The returned [`Record`] holds diagnostics of the step and may be empty.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;
}
