//! Controller.
use super::Env;
use anyhow::Result;
use ndarray::Array2;
use serde::de::DeserializeOwned;
use std::path::Path;

/// An expert controller on an environment.
///
/// At every step the controller maps an observation to an action. Like a
/// model-predictive controller, it also returns the state trajectory it predicts over
/// its horizon. Rows of the matrix are time steps, columns are state elements.
pub trait Controller<E: Env> {
    /// Computes the next action and the predicted trajectory.
    fn next(&mut self, obs: &E::Obs) -> Result<(E::Act, Array2<f64>)>;

    /// Human readable name, used for logging.
    fn name(&self) -> String;
}

/// A configurable object.
pub trait Configurable {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the object.
    fn build(config: Self::Config) -> Self;

    /// Build the object with the configuration in the yaml file of the given path.
    fn build_from_path(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized,
    {
        let file = std::fs::File::open(path)?;
        let rdr = std::io::BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(Self::build(config))
    }
}
