//! Rocket landing simulation.
use crate::{act::clamp_thrust, RocketAct, RocketEnvConfig, RocketObs, POSITION_EXTENT};
use anyhow::{ensure, Result};
use log::{info, trace};
use mimic_core::{
    randomization::RandomizationSampler,
    record::{Record, RecordValue::Scalar},
    Env, Step,
};
use ndarray::{arr1, concatenate, Array1, Axis, Ix1};
use rand::{rngs::StdRng, SeedableRng};

/// Touchdowns below this speed are rewarded as landings.
const SAFE_LANDING_SPEED: f64 = 2.0;

/// Physical parameters drawn at the start of an episode.
#[derive(Debug, Clone, PartialEq)]
struct EpisodeParams {
    gravity: f64,
    thrust_max_n: f64,
    wind_force: Array1<f64>,
}

/// A point-mass rocket landing on a pad at the origin.
///
/// All randomness of an episode comes from an RNG seeded with the index given to
/// [`Env::reset_with_index`], so an episode is reproduced by its index. The seed given
/// to [`Env::build`] only affects draws before the first reset.
pub struct RocketEnv {
    config: RocketEnvConfig,
    sampler: RandomizationSampler,
    rng: StdRng,
    params: EpisodeParams,
    position: Array1<f64>,
    velocity: Array1<f64>,
    steps: usize,
}

impl RocketEnv {
    /// Returns the true state `[x, y, z, vx, vy, vz]`, without sensor noise.
    pub fn state(&self) -> Array1<f64> {
        self.position
            .iter()
            .chain(self.velocity.iter())
            .copied()
            .collect()
    }

    /// Gravitational acceleration of the current episode.
    pub fn gravity(&self) -> f64 {
        self.params.gravity
    }

    /// Maximum thrust of the current episode in newtons.
    pub fn thrust_max_n(&self) -> f64 {
        self.params.thrust_max_n
    }

    fn observe(&mut self) -> Result<RocketObs> {
        let noise = self
            .sampler
            .sample_noise("sensor_noise", &[6], &mut self.rng)?
            .into_dimensionality::<Ix1>()?;
        let state = concatenate(Axis(0), &[self.position.view(), self.velocity.view()])?;
        let measured = state + noise;
        Ok(RocketObs::from_state(measured.view()))
    }

    fn is_out_of_bounds(&self) -> bool {
        let bound = self.config.scale_obs_space * POSITION_EXTENT;
        self.position.iter().any(|p| p.abs() > bound)
    }
}

impl Env for RocketEnv {
    type Config = RocketEnvConfig;
    type Obs = RocketObs;
    type Act = RocketAct;
    type Info = ();

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        config.validate()?;
        let sampler = RandomizationSampler::new(&config.randomization)?;
        info!("Build RocketEnv with mass {} kg, dt {} s", config.mass, config.dt);

        Ok(Self {
            config: config.clone(),
            sampler,
            rng: StdRng::seed_from_u64(seed as _),
            params: EpisodeParams {
                gravity: 0.0,
                thrust_max_n: 0.0,
                wind_force: Array1::zeros(3),
            },
            position: Array1::zeros(3),
            velocity: Array1::zeros(3),
            steps: 0,
        })
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<RocketObs> {
        self.rng = StdRng::seed_from_u64(ix as _);
        self.params = EpisodeParams {
            gravity: self.sampler.sample_scalar("gravity", &mut self.rng)?,
            thrust_max_n: self.sampler.sample_scalar("thrust_max_n", &mut self.rng)?,
            wind_force: arr1(&self.sampler.sample_disturbance("wind_force", &mut self.rng)?),
        };
        self.position = arr1(&self.sampler.sample_vector("initial_position", &mut self.rng)?);
        self.velocity = Array1::zeros(3);
        self.steps = 0;
        trace!("Reset with seed {}: {:?}", ix, self.params);

        self.observe()
    }

    fn step(&mut self, a: &RocketAct) -> Result<(Step<Self>, Record)> {
        ensure!(a.thrust.len() == 3, "Thrust command must have 3 elements: {}", a.thrust);
        let noise = self
            .sampler
            .sample_noise("actuator_noise", &[3], &mut self.rng)?
            .into_dimensionality::<Ix1>()?;
        let command = clamp_thrust(&(&a.thrust + &noise));

        let dt = self.config.dt;
        let gravity = arr1(&[0.0, 0.0, -self.params.gravity]);
        let force = command * self.params.thrust_max_n + &self.params.wind_force;
        let acc = force / self.config.mass + &gravity;
        self.velocity.scaled_add(dt, &acc);
        self.position.scaled_add(dt, &self.velocity);
        self.steps += 1;

        let speed = self.velocity.dot(&self.velocity).sqrt();
        let distance = self.position.dot(&self.position).sqrt();
        let touchdown = self.position[2] <= 0.0;
        let is_terminated = touchdown || self.is_out_of_bounds();
        let is_truncated = !is_terminated && self.steps >= self.config.max_steps;

        let mut reward = -0.01 * (distance + speed);
        if touchdown {
            reward += match speed < SAFE_LANDING_SPEED {
                true => 10.0,
                false => -10.0,
            };
        }
        trace!(
            "step {}: position {}, velocity {}, reward {}",
            self.steps,
            self.position,
            self.velocity,
            reward
        );

        let obs = self.observe()?;
        let reward = reward as f32;
        let mut record = Record::from_scalar("reward", reward);
        record.insert("altitude", Scalar(self.position[2] as f32));
        record.insert("speed", Scalar(speed as f32));
        record.insert("touchdown", Scalar(touchdown as i32 as f32));
        let step = Step::new(obs, a.clone(), reward, is_terminated, is_truncated, ());

        Ok((step, record))
    }
}
