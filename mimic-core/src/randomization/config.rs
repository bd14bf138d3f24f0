//! Configuration of [`RandomizationSampler`](super::RandomizationSampler).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Tag of uniform distributions in [`DistributionEntry::kind`].
pub const UNIFORM: &str = "uniform";

/// Tag of normal distributions in [`DistributionEntry::kind`].
pub const NORMAL: &str = "normal";

/// Range of a uniform distribution as written in a configuration file.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(untagged)]
pub enum RangeEntry {
    /// `[low, high]`.
    Scalar([f64; 2]),

    /// `[[low_x, high_x], [low_y, high_y], [low_z, high_z]]`.
    PerAxis([[f64; 2]; 3]),
}

/// A distribution as written in a configuration file.
///
/// The entry is checked when the sampler is built. `range` is required for
/// `type: uniform`, `mean` and `std` for `type: normal`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct DistributionEntry {
    /// Distribution tag, `uniform` or `normal`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Range of a uniform distribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeEntry>,

    /// Mean of a normal distribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,

    /// Standard deviation of a normal distribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
}

impl DistributionEntry {
    /// Uniform distribution on `[low, high]`.
    pub fn uniform(low: f64, high: f64) -> Self {
        Self {
            kind: UNIFORM.to_string(),
            range: Some(RangeEntry::Scalar([low, high])),
            mean: None,
            std: None,
        }
    }

    /// Independent uniform distributions for the three axes.
    pub fn uniform_per_axis(ranges: [[f64; 2]; 3]) -> Self {
        Self {
            kind: UNIFORM.to_string(),
            range: Some(RangeEntry::PerAxis(ranges)),
            mean: None,
            std: None,
        }
    }

    /// Normal distribution.
    pub fn normal(mean: f64, std: f64) -> Self {
        Self {
            kind: NORMAL.to_string(),
            range: None,
            mean: Some(mean),
            std: Some(std),
        }
    }
}

/// Configuration of [`RandomizationSampler`](super::RandomizationSampler).
///
/// A map from parameter names to distributions. The default holds the parameters of
/// the rocket landing simulation.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(transparent)]
pub struct RandomizationConfig {
    /// Distributions by parameter name.
    pub params: BTreeMap<String, DistributionEntry>,
}

impl Default for RandomizationConfig {
    fn default() -> Self {
        Self::empty()
            .param("gravity", DistributionEntry::uniform(4.9, 14.7))
            .param("thrust_max_n", DistributionEntry::uniform(1200.0, 1800.0))
            .param(
                "initial_position",
                DistributionEntry::uniform_per_axis([
                    [-100.0, 100.0],
                    [-100.0, 100.0],
                    [30.0, 100.0],
                ]),
            )
            .param("wind_force", DistributionEntry::normal(0.0, 10.0))
            .param("sensor_noise", DistributionEntry::normal(0.0, 0.01))
            .param("actuator_noise", DistributionEntry::normal(0.0, 0.05))
    }
}

impl RandomizationConfig {
    /// Configuration without any parameter.
    pub fn empty() -> Self {
        Self {
            params: BTreeMap::new(),
        }
    }

    /// Adds or replaces a parameter.
    pub fn param(mut self, name: impl Into<String>, entry: DistributionEntry) -> Self {
        self.params.insert(name.into(), entry);
        self
    }

    /// Constructs [`RandomizationConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RandomizationConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
