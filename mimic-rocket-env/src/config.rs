//! Configuration of [`RocketEnv`](super::RocketEnv).
use anyhow::{ensure, Result};
use mimic_core::randomization::RandomizationConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`RocketEnv`](super::RocketEnv).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RocketEnvConfig {
    /// Scaling factor of the observation space.
    ///
    /// An episode terminates when the rocket leaves
    /// `scale_obs_space * POSITION_EXTENT` on any axis.
    pub scale_obs_space: f64,

    /// Integration step in seconds.
    pub dt: f64,

    /// Episodes are truncated after this number of steps.
    pub max_steps: usize,

    /// Mass of the rocket in kilograms.
    pub mass: f64,

    /// Distributions of the randomized parameters.
    pub randomization: RandomizationConfig,
}

impl Default for RocketEnvConfig {
    fn default() -> Self {
        Self {
            scale_obs_space: 3.0,
            dt: 0.1,
            max_steps: 600,
            mass: 80.0,
            randomization: RandomizationConfig::default(),
        }
    }
}

impl RocketEnvConfig {
    /// Sets the scaling factor of the observation space.
    pub fn scale_obs_space(mut self, v: f64) -> Self {
        self.scale_obs_space = v;
        self
    }

    /// Sets the integration step.
    pub fn dt(mut self, v: f64) -> Self {
        self.dt = v;
        self
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the mass.
    pub fn mass(mut self, v: f64) -> Self {
        self.mass = v;
        self
    }

    /// Sets the distributions of the randomized parameters.
    pub fn randomization(mut self, v: RandomizationConfig) -> Self {
        self.randomization = v;
        self
    }

    /// Checks that the physical constants are positive and finite.
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("scale_obs_space", self.scale_obs_space),
            ("dt", self.dt),
            ("mass", self.mass),
        ] {
            ensure!(v.is_finite() && v > 0.0, "{} must be positive, got {}", name, v);
        }
        Ok(())
    }

    /// Constructs [`RocketEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RocketEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use mimic_core::randomization::DistributionEntry;
    use tempdir::TempDir;

    #[test]
    fn test_serde_rocket_env_config() -> Result<()> {
        let randomization =
            RandomizationConfig::default().param("gravity", DistributionEntry::uniform(9.8, 9.8));
        let config = RocketEnvConfig::default()
            .max_steps(100)
            .randomization(randomization);
        let dir = TempDir::new("rocket_env_config")?;
        let path = dir.path().join("rocket_env.yaml");

        config.save(&path)?;
        let config_ = RocketEnvConfig::load(&path)?;
        assert_eq!(config, config_);

        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(RocketEnvConfig::default().validate().is_ok());
        assert!(RocketEnvConfig::default().scale_obs_space(0.0).validate().is_err());
        assert!(RocketEnvConfig::default().dt(-0.1).validate().is_err());
        assert!(RocketEnvConfig::default().mass(0.0).validate().is_err());
        assert!(RocketEnvConfig::default().mass(f64::INFINITY).validate().is_err());
    }
}
