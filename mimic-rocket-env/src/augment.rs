//! Features stored in the dataset.
use crate::{RocketObs, POSITION_EXTENT, VELOCITY_EXTENT};
use anyhow::{ensure, Result};
use mimic_core::Augmenter;

/// Normalizes position and velocity and appends their norms.
///
/// The features are
/// `[x', y', z', vx', vy', vz', |p'|, |v'|]`, where primes denote division by
/// `scale_obs_space` times the nominal extent of the quantity.
#[derive(Clone, Debug)]
pub struct RocketAugmenter {
    scale_obs_space: f64,
}

impl RocketAugmenter {
    /// Constructs the augmenter with the scaling factor of the observation space.
    ///
    /// The factor must be positive and finite.
    pub fn new(scale_obs_space: f64) -> Result<Self> {
        ensure!(
            scale_obs_space.is_finite() && scale_obs_space > 0.0,
            "scale_obs_space must be positive, got {}",
            scale_obs_space
        );
        Ok(Self { scale_obs_space })
    }
}

impl Augmenter<RocketObs> for RocketAugmenter {
    fn augment(&self, obs: &RocketObs) -> Vec<f64> {
        let p = &obs.position / (self.scale_obs_space * POSITION_EXTENT);
        let v = &obs.velocity / (self.scale_obs_space * VELOCITY_EXTENT);
        let mut features = Vec::with_capacity(8);
        features.extend(p.iter());
        features.extend(v.iter());
        features.push(p.dot(&p).sqrt());
        features.push(v.dot(&v).sqrt());
        features
    }
}
