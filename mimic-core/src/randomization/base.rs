use super::config::{DistributionEntry, RandomizationConfig, RangeEntry, NORMAL, UNIFORM};
use crate::error::RandomizationError;
use log::trace;
use ndarray::{ArrayD, IxDyn};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::collections::HashMap;

/// Closed interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower bound.
    pub low: f64,

    /// Upper bound.
    pub high: f64,
}

impl Bounds {
    fn new(name: &str, [low, high]: [f64; 2]) -> Result<Self, RandomizationError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(invalid(name, format!("non-finite range [{}, {}]", low, high)));
        }
        if low > high {
            return Err(invalid(name, format!("low {} is greater than high {}", low, high)));
        }
        Ok(Self { low, high })
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.low..=self.high)
    }
}

/// Range of a uniform distribution.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformRange {
    /// A single range for a scalar parameter.
    Scalar(Bounds),

    /// Independent ranges for the three axes of a vector parameter.
    PerAxis([Bounds; 3]),
}

/// Distribution of a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionSpec {
    /// Uniform distribution, bounds inclusive.
    Uniform(UniformRange),

    /// Normal distribution.
    Normal {
        /// Mean.
        mean: f64,
        /// Standard deviation.
        std: f64,
    },
}

fn invalid(name: &str, reason: String) -> RandomizationError {
    RandomizationError::InvalidParameter {
        name: name.to_string(),
        reason,
    }
}

fn incompatible(name: &str, expected: &str) -> RandomizationError {
    RandomizationError::IncompatibleDistribution {
        name: name.to_string(),
        expected: expected.to_string(),
    }
}

impl DistributionSpec {
    /// Checks a configuration entry and converts it.
    pub fn from_entry(name: &str, entry: &DistributionEntry) -> Result<Self, RandomizationError> {
        match entry.kind.as_str() {
            UNIFORM => match &entry.range {
                Some(RangeEntry::Scalar(range)) => {
                    Ok(Self::Uniform(UniformRange::Scalar(Bounds::new(name, *range)?)))
                }
                Some(RangeEntry::PerAxis([x, y, z])) => Ok(Self::Uniform(UniformRange::PerAxis([
                    Bounds::new(name, *x)?,
                    Bounds::new(name, *y)?,
                    Bounds::new(name, *z)?,
                ]))),
                None => Err(invalid(name, "uniform distribution without range".to_string())),
            },
            NORMAL => {
                let (mean, std) = match (entry.mean, entry.std) {
                    (Some(mean), Some(std)) => (mean, std),
                    _ => {
                        return Err(invalid(
                            name,
                            "normal distribution requires mean and std".to_string(),
                        ))
                    }
                };
                if !mean.is_finite() || !std.is_finite() || std < 0.0 {
                    return Err(invalid(name, format!("mean {} and std {}", mean, std)));
                }
                Ok(Self::Normal { mean, std })
            }
            kind => Err(RandomizationError::UnsupportedDistribution {
                name: name.to_string(),
                kind: kind.to_string(),
            }),
        }
    }
}

/// Draws randomized values of named simulation parameters.
///
/// The registry of distributions is fixed at construction. Draws are independent of
/// each other; the only state they share is the generator passed by the caller.
#[derive(Debug, Clone)]
pub struct RandomizationSampler {
    params: HashMap<String, DistributionSpec>,
}

impl RandomizationSampler {
    /// Builds the sampler, checking every entry of the configuration.
    pub fn new(config: &RandomizationConfig) -> Result<Self, RandomizationError> {
        let params = config
            .params
            .iter()
            .map(|(name, entry)| Ok((name.clone(), DistributionSpec::from_entry(name, entry)?)))
            .collect::<Result<HashMap<_, _>, RandomizationError>>()?;
        Ok(Self { params })
    }

    /// Returns the distribution of a parameter.
    pub fn spec(&self, name: &str) -> Result<&DistributionSpec, RandomizationError> {
        self.params
            .get(name)
            .ok_or_else(|| RandomizationError::UnknownParameter(name.to_string()))
    }

    /// Returns `true` if the parameter is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    fn normal(&self, name: &str) -> Result<Normal<f64>, RandomizationError> {
        match self.spec(name)? {
            DistributionSpec::Normal { mean, std } => {
                Normal::new(*mean, *std).map_err(|e| invalid(name, e.to_string()))
            }
            _ => Err(incompatible(name, "normal")),
        }
    }

    /// Draws a scalar value.
    ///
    /// Works for scalar uniform and normal parameters.
    pub fn sample_scalar<R: Rng + ?Sized>(
        &self,
        name: &str,
        rng: &mut R,
    ) -> Result<f64, RandomizationError> {
        let v = match self.spec(name)? {
            DistributionSpec::Uniform(UniformRange::Scalar(bounds)) => bounds.sample(rng),
            DistributionSpec::Uniform(UniformRange::PerAxis(_)) => {
                return Err(incompatible(name, "scalar"))
            }
            DistributionSpec::Normal { .. } => self.normal(name)?.sample(rng),
        };
        trace!("{} = {}", name, v);
        Ok(v)
    }

    /// Draws a 3-vector of a uniform parameter, one independent draw per axis.
    ///
    /// A scalar range is used for all three axes.
    pub fn sample_vector<R: Rng + ?Sized>(
        &self,
        name: &str,
        rng: &mut R,
    ) -> Result<[f64; 3], RandomizationError> {
        let axes = match self.spec(name)? {
            DistributionSpec::Uniform(UniformRange::PerAxis(axes)) => *axes,
            DistributionSpec::Uniform(UniformRange::Scalar(bounds)) => [*bounds; 3],
            DistributionSpec::Normal { .. } => return Err(incompatible(name, "uniform vector")),
        };
        let v = [axes[0].sample(rng), axes[1].sample(rng), axes[2].sample(rng)];
        trace!("{} = {:?}", name, v);
        Ok(v)
    }

    /// Draws three i.i.d. values of a normal parameter, e.g. a wind force.
    pub fn sample_disturbance<R: Rng + ?Sized>(
        &self,
        name: &str,
        rng: &mut R,
    ) -> Result<[f64; 3], RandomizationError> {
        let normal = self.normal(name)?;
        let v = [normal.sample(rng), normal.sample(rng), normal.sample(rng)];
        trace!("{} = {:?}", name, v);
        Ok(v)
    }

    /// Draws an array of i.i.d. values of a normal parameter with the given shape.
    ///
    /// Used for sensor and actuator noise. Elements are filled in row-major order.
    pub fn sample_noise<R: Rng + ?Sized>(
        &self,
        name: &str,
        shape: &[usize],
        rng: &mut R,
    ) -> Result<ArrayD<f64>, RandomizationError> {
        let normal = self.normal(name)?;
        let n = shape.iter().product();
        let data = (0..n).map(|_| normal.sample(rng)).collect::<Vec<_>>();
        ArrayD::from_shape_vec(IxDyn(shape), data).map_err(|e| invalid(name, e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const N_TRIALS: usize = 5000;

    fn sampler() -> RandomizationSampler {
        RandomizationSampler::new(&RandomizationConfig::default()).unwrap()
    }

    /// Kolmogorov-Smirnov statistic of samples against `U(low, high)`.
    fn ks_uniform(mut xs: Vec<f64>, low: f64, high: f64) -> f64 {
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let n = xs.len() as f64;
        xs.iter()
            .enumerate()
            .map(|(i, x)| {
                let cdf = (x - low) / (high - low);
                let upper = (i + 1) as f64 / n - cdf;
                let lower = cdf - i as f64 / n;
                upper.max(lower)
            })
            .fold(0.0, f64::max)
    }

    fn mean_std(xs: &[f64]) -> (f64, f64) {
        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        (mean, var.sqrt())
    }

    #[test]
    fn test_uniform_scalar_in_range_and_uniform() {
        let sampler = sampler();
        let mut rng = StdRng::seed_from_u64(42);

        for (name, low, high) in [("gravity", 4.9, 14.7), ("thrust_max_n", 1200.0, 1800.0)] {
            let xs = (0..N_TRIALS)
                .map(|_| sampler.sample_scalar(name, &mut rng).unwrap())
                .collect::<Vec<_>>();
            assert!(xs.iter().all(|x| (low..=high).contains(x)));

            // Critical value at significance level 0.001
            let d = ks_uniform(xs, low, high);
            assert!(d < 1.95 / (N_TRIALS as f64).sqrt(), "{}: D = {}", name, d);
        }
    }

    #[test]
    fn test_initial_position_per_axis() {
        let sampler = sampler();
        let mut rng = StdRng::seed_from_u64(7);
        let ranges = [(-100.0, 100.0), (-100.0, 100.0), (30.0, 100.0)];

        let draws = (0..N_TRIALS)
            .map(|_| sampler.sample_vector("initial_position", &mut rng).unwrap())
            .collect::<Vec<_>>();

        for (axis, (low, high)) in ranges.iter().enumerate() {
            let xs = draws.iter().map(|v| v[axis]).collect::<Vec<_>>();
            assert!(xs.iter().all(|x| (*low..=*high).contains(x)));
            let d = ks_uniform(xs, *low, *high);
            assert!(d < 1.95 / (N_TRIALS as f64).sqrt(), "axis {}: D = {}", axis, d);
        }
    }

    #[test]
    fn test_normal_moments() {
        let sampler = sampler();
        let mut rng = StdRng::seed_from_u64(3);
        let n = 20_000;

        let xs = (0..n)
            .map(|_| sampler.sample_scalar("wind_force", &mut rng).unwrap())
            .collect::<Vec<_>>();
        let (mean, std) = mean_std(&xs);
        assert!(mean.abs() < 4.0 * 10.0 / (n as f64).sqrt(), "mean = {}", mean);
        assert!((std - 10.0).abs() < 0.5, "std = {}", std);

        let xs = (0..n / 3)
            .flat_map(|_| sampler.sample_disturbance("wind_force", &mut rng).unwrap())
            .collect::<Vec<_>>();
        let (mean, std) = mean_std(&xs);
        assert!(mean.abs() < 0.5, "mean = {}", mean);
        assert!((std - 10.0).abs() < 0.5, "std = {}", std);
    }

    #[test]
    fn test_noise_shape_and_moments() {
        let sampler = sampler();
        let mut rng = StdRng::seed_from_u64(11);

        let noise = sampler.sample_noise("sensor_noise", &[4, 3, 2], &mut rng).unwrap();
        assert_eq!(noise.shape(), &[4, 3, 2]);

        let noise = sampler.sample_noise("actuator_noise", &[10_000], &mut rng).unwrap();
        assert_eq!(noise.shape(), &[10_000]);
        let (mean, std) = mean_std(noise.as_slice().unwrap());
        assert!(mean.abs() < 0.005, "mean = {}", mean);
        assert!((std - 0.05).abs() < 0.0025, "std = {}", std);

        let empty = sampler.sample_noise("sensor_noise", &[0, 3], &mut rng).unwrap();
        assert_eq!(empty.shape(), &[0, 3]);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let sampler = sampler();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (
                sampler.sample_scalar("gravity", &mut rng).unwrap(),
                sampler.sample_vector("initial_position", &mut rng).unwrap(),
                sampler.sample_disturbance("wind_force", &mut rng).unwrap(),
            )
        };

        assert_eq!(draw(5), draw(5));
        assert_ne!(draw(5), draw(6));
    }

    #[test]
    fn test_unknown_parameter() {
        let sampler = sampler();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            sampler.sample_scalar("air_density", &mut rng),
            Err(RandomizationError::UnknownParameter("air_density".to_string()))
        );
        assert!(matches!(
            sampler.sample_noise("air_density", &[3], &mut rng),
            Err(RandomizationError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_unsupported_distribution() {
        let mut entry = DistributionEntry::uniform(0.0, 1.0);
        entry.kind = "triangular".to_string();
        let config = RandomizationConfig::empty().param("drag", entry);

        assert_eq!(
            RandomizationSampler::new(&config).unwrap_err(),
            RandomizationError::UnsupportedDistribution {
                name: "drag".to_string(),
                kind: "triangular".to_string(),
            }
        );
    }

    #[test]
    fn test_incompatible_distribution() {
        let sampler = sampler();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            sampler.sample_scalar("initial_position", &mut rng),
            Err(RandomizationError::IncompatibleDistribution { .. })
        ));
        assert!(matches!(
            sampler.sample_disturbance("gravity", &mut rng),
            Err(RandomizationError::IncompatibleDistribution { .. })
        ));
        assert!(matches!(
            sampler.sample_vector("sensor_noise", &mut rng),
            Err(RandomizationError::IncompatibleDistribution { .. })
        ));
    }

    #[test]
    fn test_invalid_parameters() {
        let cases = [
            DistributionEntry::uniform(2.0, 1.0),
            DistributionEntry::uniform(0.0, f64::INFINITY),
            DistributionEntry::uniform_per_axis([[0.0, 1.0], [0.0, 1.0], [5.0, -5.0]]),
            DistributionEntry::normal(0.0, -1.0),
            DistributionEntry::normal(f64::NAN, 1.0),
            DistributionEntry {
                kind: "normal".to_string(),
                range: None,
                mean: Some(0.0),
                std: None,
            },
        ];

        for entry in cases.iter() {
            let config = RandomizationConfig::empty().param("p", entry.clone());
            assert!(
                matches!(
                    RandomizationSampler::new(&config),
                    Err(RandomizationError::InvalidParameter { .. })
                ),
                "{:?}",
                entry
            );
        }
    }

    #[test]
    fn test_degenerate_distributions() {
        let config = RandomizationConfig::empty()
            .param("fixed", DistributionEntry::uniform(3.0, 3.0))
            .param("no_noise", DistributionEntry::normal(1.5, 0.0));
        let sampler = RandomizationSampler::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(sampler.sample_scalar("fixed", &mut rng).unwrap(), 3.0);
        assert_eq!(sampler.sample_vector("fixed", &mut rng).unwrap(), [3.0; 3]);
        assert_eq!(sampler.sample_disturbance("no_noise", &mut rng).unwrap(), [1.5; 3]);
    }
}
