//! Collect expert trajectories.
mod config;
mod throughput;
use crate::{
    dataset::{Dataset, Sample},
    error::NonFiniteSampleError,
    record::{
        Record,
        RecordValue::{DateTime, Scalar},
        Recorder,
    },
    Act, Augmenter, Configurable, Controller, Env,
};
use anyhow::Result;
use chrono::Local;
pub use config::CollectorConfig;
use log::{debug, info, warn};
use std::time::Duration;
pub use throughput::Throughput;

/// Summary of a collection run.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectStats {
    /// The number of collected episodes.
    pub episodes: usize,

    /// The number of samples loaded from a previous run.
    pub prior_samples: usize,

    /// The number of samples collected in this run.
    pub new_samples: usize,

    /// The number of environment steps in this run.
    pub total_steps: usize,

    /// Total reward of the last episode.
    pub last_reward: f32,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Runs an expert controller on an environment and builds a [`Dataset`].
///
/// # Collection loop
///
/// [`Collector::run()`] goes through the following phases:
///
/// 1. Build [`Env`] and [`Controller`] from their configurations.
/// 2. If `add_previous_results` is set, load the dataset in `output_path`. A failure
///    to load is logged and the run continues with an empty dataset.
/// 3. For each episode `ix` in `0..max_episodes`:
///     1. Reset the environment with `ix` as the random seed.
///     2. Until the episode is terminated or truncated:
///         * Ask the controller for an action and a predicted trajectory.
///         * Augment the observation and append
///           `{obs, acts, predictedX}` to the dataset.
///         * Step the environment with the action and accumulate the reward.
///         * If `report_interval_millis` passed since the last report, emit a report
///           with the progress in percent, the total number of steps, steps per second
///           since the last report and the reward of the last completed episode.
///     3. If `checkpoint_interval` is set and reached, write the dataset.
/// 4. Write the dataset, previous samples first, to `output_path`.
///
/// Errors of the environment or the controller abort the run, and so does a sample
/// holding a NaN or an infinite value, which could not be read back after a write.
/// Samples collected up to that point are lost unless a checkpoint was written.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Loading
///     Loading --> Collecting
///     state Collecting {
///         Reset --> Stepping
///         Stepping --> Stepping
///         Stepping --> Terminated
///         Terminated --> Reset
///     }
///     Collecting --> Persisting
///     Persisting --> [*]
/// ```
pub struct Collector<E, C, A>
where
    E: Env,
    C: Controller<E> + Configurable,
    A: Augmenter<E::Obs>,
{
    /// Configuration of the collection run.
    config: CollectorConfig,

    /// Configuration of the environment.
    env_config: E::Config,

    /// Configuration of the controller.
    controller_config: C::Config,

    /// Transform applied to observations before they are stored.
    augmenter: A,
}

impl<E, C, A> Collector<E, C, A>
where
    E: Env,
    C: Controller<E> + Configurable,
    A: Augmenter<E::Obs>,
{
    /// Constructs a collector.
    pub fn build(
        config: CollectorConfig,
        env_config: E::Config,
        controller_config: C::Config,
        augmenter: A,
    ) -> Self {
        Self {
            config,
            env_config,
            controller_config,
            augmenter,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Loads the samples of a previous run.
    ///
    /// Returns an empty dataset if the file cannot be read or parsed.
    pub fn load_previous(&self) -> Dataset {
        match Dataset::load(&self.config.output_path) {
            Ok(dataset) => {
                info!(
                    "Loaded {} samples from {:?}",
                    dataset.len(),
                    &self.config.output_path
                );
                dataset
            }
            Err(e) => {
                warn!("Failed to load previous results: {}", e);
                Dataset::new()
            }
        }
    }

    /// Runs the collection and writes the dataset to `output_path`.
    pub fn run(&mut self, recorder: &mut dyn Recorder) -> Result<CollectStats> {
        let (mut env, mut controller) = self.build_env_and_controller()?;

        let mut dataset = match self.config.add_previous_results {
            true => self.load_previous(),
            false => Dataset::new(),
        };

        let stats =
            self.collect_episodes(&mut env, &mut controller, &mut dataset, recorder, true)?;

        info!(
            "Dumping {} samples ({} previous, {} new) to {:?}",
            dataset.len(),
            stats.prior_samples,
            stats.new_samples,
            &self.config.output_path
        );
        dataset.save(&self.config.output_path)?;

        Ok(stats)
    }

    /// Runs the collection, appending samples to `dataset` without writing any file.
    pub fn collect(
        &mut self,
        dataset: &mut Dataset,
        recorder: &mut dyn Recorder,
    ) -> Result<CollectStats> {
        let (mut env, mut controller) = self.build_env_and_controller()?;
        self.collect_episodes(&mut env, &mut controller, dataset, recorder, false)
    }

    fn build_env_and_controller(&self) -> Result<(E, C)> {
        // Episodes are seeded by `reset_with_index`
        let env = E::build(&self.env_config, 0)?;
        let controller = C::build(self.controller_config.clone());
        info!("Active expert controller: {}", controller.name());
        Ok((env, controller))
    }

    fn collect_episodes(
        &self,
        env: &mut E,
        controller: &mut C,
        dataset: &mut Dataset,
        recorder: &mut dyn Recorder,
        checkpoint: bool,
    ) -> Result<CollectStats> {
        let max_episodes = self.config.max_episodes;
        let report_interval = Duration::from_millis(self.config.report_interval_millis);
        let prior_samples = dataset.len();
        let mut throughput = Throughput::new();
        let mut last_reward = 0f32;

        for episode in 0..max_episodes {
            let mut obs = env.reset_with_index(episode)?;
            let mut reward_sum = 0f32;
            let mut steps = 0;

            loop {
                let (act, predicted_x) = controller.next(&obs)?;
                let sample = Sample::new(self.augmenter.augment(&obs), act.to_vec(), &predicted_x);
                if let Some(field) = sample.non_finite_field() {
                    return Err(NonFiniteSampleError {
                        index: dataset.len(),
                        field,
                    }
                    .into());
                }
                dataset.push(sample);

                let (step, _) = env.step(&act)?;
                reward_sum += step.reward;
                steps += 1;
                throughput.count_step();
                let is_done = step.is_done();
                if is_done {
                    last_reward = reward_sum;
                }
                obs = step.obs;

                if throughput.is_due(report_interval) {
                    Self::report(recorder, &mut throughput, episode, max_episodes, last_reward);
                }

                if is_done {
                    break;
                }
            }
            debug!(
                "Episode {} (seed {}): {} steps, reward = {}",
                episode, episode, steps, reward_sum
            );

            if checkpoint {
                self.checkpoint(dataset, episode + 1)?;
            }
        }

        Self::report(recorder, &mut throughput, max_episodes, max_episodes, last_reward);

        Ok(CollectStats {
            episodes: max_episodes,
            prior_samples,
            new_samples: dataset.len() - prior_samples,
            total_steps: throughput.total_steps(),
            last_reward,
        })
    }

    fn checkpoint(&self, dataset: &Dataset, episodes_done: usize) -> Result<()> {
        let is_last = episodes_done >= self.config.max_episodes;
        match self.config.checkpoint_interval {
            Some(n) if n > 0 && episodes_done % n == 0 && !is_last => {
                info!(
                    "Checkpoint after {} episodes: {} samples to {:?}",
                    episodes_done,
                    dataset.len(),
                    &self.config.output_path
                );
                dataset.save(&self.config.output_path)
            }
            _ => Ok(()),
        }
    }

    /// Emits a progress report. `episode` is the number of completed episodes.
    fn report(
        recorder: &mut dyn Recorder,
        throughput: &mut Throughput,
        episode: usize,
        max_episodes: usize,
        last_reward: f32,
    ) {
        let progress = match max_episodes {
            0 => 100.0,
            n => 100.0 * episode as f32 / n as f32,
        };
        let total_steps = throughput.total_steps();
        let steps_per_sec = throughput.steps_per_sec();
        info!(
            "{:3.0}%. Total steps {} steps/sec: {:.0} Last reward: {:.0}",
            progress, total_steps, steps_per_sec, last_reward
        );

        let mut record = Record::empty();
        record.insert("episode", Scalar(episode as f32));
        record.insert("progress", Scalar(progress));
        record.insert("total_steps", Scalar(total_steps as f32));
        record.insert("steps_per_sec", Scalar(steps_per_sec));
        record.insert("last_reward", Scalar(last_reward));
        record.insert("timestamp", DateTime(Local::now()));
        recorder.write(record);
    }
}
