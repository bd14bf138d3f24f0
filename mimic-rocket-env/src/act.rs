//! Action of [`RocketEnv`](crate::RocketEnv).
use mimic_core::Act;
use ndarray::Array1;

const THRUST_LOW: [f64; 3] = [-1.0, -1.0, 0.0];
const THRUST_HIGH: [f64; 3] = [1.0, 1.0, 1.0];

/// Normalized thrust command.
///
/// The environment clamps the command to `[-1, 1] x [-1, 1] x [0, 1]` and scales it
/// with the maximum thrust of the episode. The vertical component can only push up.
#[derive(Clone, Debug, PartialEq)]
pub struct RocketAct {
    /// Thrust command `[ux, uy, uz]`.
    pub thrust: Array1<f64>,
}

impl RocketAct {
    /// Constructs a thrust command.
    pub fn new(thrust: Array1<f64>) -> Self {
        Self { thrust }
    }
}

impl Act for RocketAct {
    fn to_vec(&self) -> Vec<f64> {
        self.thrust.to_vec()
    }
}

/// Clamps a thrust command to the feasible range.
pub(crate) fn clamp_thrust(u: &Array1<f64>) -> Array1<f64> {
    u.iter()
        .zip(THRUST_LOW.iter().zip(THRUST_HIGH.iter()))
        .map(|(v, (low, high))| v.clamp(*low, *high))
        .collect()
}
