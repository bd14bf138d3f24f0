//! Expert controller for the rocket landing task.
use crate::{act::clamp_thrust, RocketAct, RocketEnv, RocketObs};
use anyhow::{ensure, Result};
use mimic_core::{Configurable, Controller};
use ndarray::{arr1, s, Array1, Array2};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ExpertController`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ExpertControllerConfig {
    /// Length of the predicted trajectory in seconds.
    pub time_horizon: f64,

    /// Number of prediction steps per second.
    pub epochs_per_sec: f64,

    /// Position gains per axis.
    pub position_gain: [f64; 3],

    /// Velocity gains per axis.
    pub velocity_gain: [f64; 3],

    /// Target descent speed at the pad in meters per second.
    pub landing_speed: f64,

    /// Mass of the nominal model.
    pub mass: f64,

    /// Gravity of the nominal model.
    pub gravity: f64,

    /// Maximum thrust of the nominal model in newtons.
    pub thrust_max_n: f64,
}

impl Default for ExpertControllerConfig {
    fn default() -> Self {
        Self {
            time_horizon: 10.0,
            epochs_per_sec: 10.0,
            position_gain: [0.1, 0.1, 0.1],
            velocity_gain: [0.6, 0.6, 0.6],
            landing_speed: 1.0,
            mass: 80.0,
            gravity: 9.8,
            thrust_max_n: 1500.0,
        }
    }
}

impl ExpertControllerConfig {
    /// Sets the prediction horizon in seconds.
    pub fn time_horizon(mut self, v: f64) -> Self {
        self.time_horizon = v;
        self
    }

    /// Sets the number of prediction steps per second.
    pub fn epochs_per_sec(mut self, v: f64) -> Self {
        self.epochs_per_sec = v;
        self
    }

    /// Sets the position and velocity gains.
    pub fn gains(mut self, position: [f64; 3], velocity: [f64; 3]) -> Self {
        self.position_gain = position;
        self.velocity_gain = velocity;
        self
    }

    /// Number of rows of the predicted trajectory.
    pub fn n_steps(&self) -> usize {
        (self.time_horizon * self.epochs_per_sec).round().max(1.0) as usize
    }

    /// Checks that the horizon and the nominal model are usable.
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("time_horizon", self.time_horizon),
            ("epochs_per_sec", self.epochs_per_sec),
            ("mass", self.mass),
            ("thrust_max_n", self.thrust_max_n),
        ] {
            ensure!(v.is_finite() && v > 0.0, "{} must be positive, got {}", name, v);
        }
        let finite = self
            .position_gain
            .iter()
            .chain(self.velocity_gain.iter())
            .chain([self.landing_speed, self.gravity].iter())
            .all(|v| v.is_finite());
        ensure!(finite, "Gains and nominal gravity must be finite: {:?}", self);
        Ok(())
    }

    /// Constructs [`ExpertControllerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ExpertControllerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Receding-horizon landing controller.
///
/// A PD law steers the rocket to the pad while descending at `landing_speed`. At every
/// call the law is rolled out on the nominal model for `time_horizon * epochs_per_sec`
/// steps. The first command is returned as the action, and the states of the rollout
/// as the predicted trajectory of shape `(n_steps, 6)`.
pub struct ExpertController {
    config: ExpertControllerConfig,
}

impl ExpertController {
    /// Thrust command of the PD law, clamped to the feasible range.
    fn command(&self, position: &Array1<f64>, velocity: &Array1<f64>) -> Array1<f64> {
        let c = &self.config;
        let kp = arr1(&c.position_gain);
        let kd = arr1(&c.velocity_gain);
        let velocity_ref = arr1(&[0.0, 0.0, -c.landing_speed]);
        let acc = -(&kp * position) - &kd * &(velocity - &velocity_ref)
            + &arr1(&[0.0, 0.0, c.gravity]);
        clamp_thrust(&(acc * (c.mass / c.thrust_max_n)))
    }

    /// Rolls out the PD law on the nominal model.
    fn rollout(&self, obs: &RocketObs) -> (Array1<f64>, Array2<f64>) {
        let c = &self.config;
        let n = c.n_steps();
        let dt = 1.0 / c.epochs_per_sec;
        let gravity = arr1(&[0.0, 0.0, -c.gravity]);
        let mut predicted = Array2::zeros((n, 6));
        let (mut p, mut v) = (obs.position.clone(), obs.velocity.clone());
        let first = self.command(&p, &v);

        for t in 0..n {
            let acc = self.command(&p, &v) * (c.thrust_max_n / c.mass) + &gravity;
            v.scaled_add(dt, &acc);
            p.scaled_add(dt, &v);
            predicted.slice_mut(s![t, ..3]).assign(&p);
            predicted.slice_mut(s![t, 3..]).assign(&v);
        }

        (first, predicted)
    }
}

impl Configurable for ExpertController {
    type Config = ExpertControllerConfig;

    fn build(config: Self::Config) -> Self {
        Self { config }
    }
}

impl Controller<RocketEnv> for ExpertController {
    fn next(&mut self, obs: &RocketObs) -> Result<(RocketAct, Array2<f64>)> {
        self.config.validate()?;
        ensure!(
            obs.position.len() == 3 && obs.velocity.len() == 3,
            "Observation must hold 3 positions and 3 velocities: {:?}",
            obs
        );
        ensure!(
            obs.position.iter().chain(obs.velocity.iter()).all(|v| v.is_finite()),
            "Non-finite observation: {:?}",
            obs
        );
        let (command, predicted) = self.rollout(obs);
        Ok((RocketAct::new(command), predicted))
    }

    fn name(&self) -> String {
        format!(
            "PD landing, horizon {} s at {} epochs/s",
            self.config.time_horizon, self.config.epochs_per_sec
        )
    }
}
