//! Configuration of [`Collector`](super::Collector).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Configuration of [`Collector`](super::Collector).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CollectorConfig {
    /// Where the dataset is written.
    pub output_path: PathBuf,

    /// The number of episodes to collect.
    pub max_episodes: usize,

    /// If `true`, samples in `output_path` are loaded and kept in front of the new ones.
    pub add_previous_results: bool,

    /// Interval of progress reports in milliseconds.
    pub report_interval_millis: u64,

    /// If set, the dataset is written every this number of episodes in addition to the
    /// write at the end of the run.
    pub checkpoint_interval: Option<usize>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("expert_data.json"),
            max_episodes: 200,
            add_previous_results: true,
            report_interval_millis: 1000,
            checkpoint_interval: None,
        }
    }
}

impl CollectorConfig {
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

    /// Sets if previous results are kept in the output.
    pub fn add_previous_results(mut self, v: bool) -> Self {
        self.add_previous_results = v;
        self
    }

    /// Sets the interval of progress reports in milliseconds.
    pub fn report_interval_millis(mut self, v: u64) -> Self {
        self.report_interval_millis = v;
        self
    }

    /// Sets the interval of intermediate writes in episodes.
    pub fn checkpoint_interval(mut self, v: Option<usize>) -> Self {
        self.checkpoint_interval = v;
        self
    }

    /// Constructs [`CollectorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`CollectorConfig`].
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

    #[test]
    fn test_serde_collector_config() -> Result<()> {
        let config = CollectorConfig::default()
            .output_path("some/directory/data.json")
            .max_episodes(10)
            .add_previous_results(false)
            .checkpoint_interval(Some(5));

        let dir = TempDir::new("collector_config")?;
        let path = dir.path().join("collector_config.yaml");

        config.save(&path)?;
        let config_ = CollectorConfig::load(&path)?;
        assert_eq!(config, config_);

        Ok(())
    }
}
