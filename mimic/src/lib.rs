//! Expert trajectory collection on the rocket landing task.
//!
//! [`ExpertCollectConfig`] gathers the few settings of a collection run and derives
//! the configurations of the collector, the environment and the expert controller.
//! The `expert_collect` binary runs it with the default values.
pub use mimic_core::{
    collector::{CollectStats, Collector, CollectorConfig},
    dataset::{Dataset, Sample},
    record::{BufferedRecorder, NullRecorder, Recorder},
};
pub use mimic_rocket_env::{
    ExpertController, ExpertControllerConfig, RocketAugmenter, RocketEnv, RocketEnvConfig,
};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Collector of expert trajectories on [`RocketEnv`].
pub type RocketCollector = Collector<RocketEnv, ExpertController, RocketAugmenter>;

/// Settings of a collection run.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ExpertCollectConfig {
    /// Where the dataset is written.
    pub output_path: PathBuf,

    /// The number of episodes.
    pub max_episodes: usize,

    /// Keep the samples of a previous run in `output_path`.
    pub add_previous_results: bool,

    /// Prediction horizon of the expert controller in seconds.
    pub time_horizon: f64,

    /// Prediction steps per second of the expert controller.
    pub epochs_per_sec: f64,

    /// Scaling factor of the observation space.
    pub scale_obs_space: f64,
}

impl Default for ExpertCollectConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("expert_data.json"),
            max_episodes: 200,
            add_previous_results: true,
            time_horizon: 10.0,
            epochs_per_sec: 10.0,
            scale_obs_space: 3.0,
        }
    }
}

impl ExpertCollectConfig {
    /// Sets the output path.
    pub fn output_path(mut self, v: impl AsRef<Path>) -> Self {
        self.output_path = v.as_ref().to_path_buf();
        self
    }

    /// Sets the number of episodes.
    pub fn max_episodes(mut self, v: usize) -> Self {
        self.max_episodes = v;
        self
    }

    /// Sets if previous results are kept.
    pub fn add_previous_results(mut self, v: bool) -> Self {
        self.add_previous_results = v;
        self
    }

    /// Sets the prediction horizon.
    pub fn time_horizon(mut self, v: f64) -> Self {
        self.time_horizon = v;
        self
    }

    /// Sets the prediction steps per second.
    pub fn epochs_per_sec(mut self, v: f64) -> Self {
        self.epochs_per_sec = v;
        self
    }

    /// Sets the scaling factor of the observation space.
    pub fn scale_obs_space(mut self, v: f64) -> Self {
        self.scale_obs_space = v;
        self
    }

    /// Configuration of the collector.
    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig::default()
            .output_path(&self.output_path)
            .max_episodes(self.max_episodes)
            .add_previous_results(self.add_previous_results)
    }

    /// Configuration of the environment.
    pub fn env_config(&self) -> RocketEnvConfig {
        RocketEnvConfig::default().scale_obs_space(self.scale_obs_space)
    }

    /// Configuration of the expert controller.
    pub fn controller_config(&self) -> ExpertControllerConfig {
        ExpertControllerConfig::default()
            .time_horizon(self.time_horizon)
            .epochs_per_sec(self.epochs_per_sec)
    }

    /// Builds the collector.
    ///
    /// Fails if `scale_obs_space` is not positive.
    pub fn build_collector(&self) -> Result<RocketCollector> {
        Ok(RocketCollector::build(
            self.collector_config(),
            self.env_config(),
            self.controller_config(),
            RocketAugmenter::new(self.scale_obs_space)?,
        ))
    }

    /// Constructs [`ExpertCollectConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ExpertCollectConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;
    use test_log::test;

    #[test]
    fn test_default_config() {
        let config = ExpertCollectConfig::default();
        let collector_config = config.collector_config();
        assert_eq!(collector_config.output_path, PathBuf::from("expert_data.json"));
        assert_eq!(collector_config.max_episodes, 200);
        assert!(collector_config.add_previous_results);
        assert_eq!(collector_config.report_interval_millis, 1000);
        assert_eq!(config.env_config().scale_obs_space, 3.0);
        assert_eq!(config.controller_config().n_steps(), 100);
    }

    #[test]
    fn test_serde_expert_collect_config() -> Result<()> {
        let config = ExpertCollectConfig::default().max_episodes(3).time_horizon(2.0);
        let dir = TempDir::new("expert_collect_config")?;
        let path = dir.path().join("expert_collect.yaml");

        config.save(&path)?;
        assert_eq!(ExpertCollectConfig::load(&path)?, config);

        Ok(())
    }

    #[test]
    fn test_collect_and_resume() -> Result<()> {
        let dir = TempDir::new("expert_collect")?;
        let path = dir.path().join("expert_data.json");
        let config = ExpertCollectConfig::default()
            .output_path(&path)
            .max_episodes(2)
            .time_horizon(1.0);

        let stats = config.build_collector()?.run(&mut NullRecorder::new())?;
        let first = Dataset::load(&path)?;
        assert_eq!(stats.prior_samples, 0);
        assert_eq!(first.len(), stats.new_samples);
        assert_eq!(first.len(), stats.total_steps);
        for sample in first.iter() {
            assert_eq!(sample.obs.len(), 8);
            assert_eq!(sample.acts.len(), 3);
            assert_eq!(sample.predicted_x.len(), 10);
            assert!(sample.predicted_x.iter().all(|row| row.len() == 6));
        }

        // Episodes are seeded by their index, so a second run repeats the first
        let stats = config.build_collector()?.run(&mut NullRecorder::new())?;
        let second = Dataset::load(&path)?;
        assert_eq!(stats.prior_samples, first.len());
        assert_eq!(second.len(), 2 * first.len());
        assert_eq!(&second.samples()[..first.len()], first.samples());
        assert_eq!(&second.samples()[first.len()..], first.samples());

        Ok(())
    }

    #[test]
    fn test_degenerate_settings_keep_previous_results() -> Result<()> {
        let dir = TempDir::new("expert_collect")?;
        let path = dir.path().join("expert_data.json");
        let config = ExpertCollectConfig::default()
            .output_path(&path)
            .max_episodes(1)
            .time_horizon(1.0);
        config.build_collector()?.run(&mut NullRecorder::new())?;
        let prior = Dataset::load(&path)?;

        assert!(config.clone().scale_obs_space(0.0).build_collector().is_err());
        let mut collector = config.clone().epochs_per_sec(0.0).build_collector()?;
        assert!(collector.run(&mut NullRecorder::new()).is_err());

        // Nothing was written, so the next run resumes from all previous samples
        assert_eq!(Dataset::load(&path)?, prior);
        let stats = config.build_collector()?.run(&mut NullRecorder::new())?;
        assert_eq!(stats.prior_samples, prior.len());

        Ok(())
    }
}
