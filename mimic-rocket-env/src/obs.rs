//! Observation of [`RocketEnv`](crate::RocketEnv).
use mimic_core::Obs;
use ndarray::{s, Array1, ArrayView1};

/// Position and velocity of the rocket as measured by its sensors.
#[derive(Clone, Debug, PartialEq)]
pub struct RocketObs {
    /// Position relative to the landing pad `[x, y, z]` in meters, `z` up.
    pub position: Array1<f64>,

    /// Velocity `[vx, vy, vz]` in meters per second.
    pub velocity: Array1<f64>,
}

impl RocketObs {
    /// Constructs an observation from a state vector `[x, y, z, vx, vy, vz]`.
    pub fn from_state(s: ArrayView1<f64>) -> Self {
        Self {
            position: s.slice(s![..3]).to_owned(),
            velocity: s.slice(s![3..]).to_owned(),
        }
    }
}

impl Obs for RocketObs {
    fn to_vec(&self) -> Vec<f64> {
        self.position
            .iter()
            .chain(self.velocity.iter())
            .copied()
            .collect()
    }
}
