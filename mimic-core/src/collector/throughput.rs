//! Counting environment steps for progress reports.
use std::time::{Duration, Instant};

/// Counts environment steps, in total and since the last report.
pub struct Throughput {
    /// Start of the current report window.
    timer: Instant,

    /// Steps in the current report window.
    steps_in_window: usize,

    /// Steps since the start of the run.
    total_steps: usize,
}

impl Default for Throughput {
    fn default() -> Self {
        Self::new()
    }
}

impl Throughput {
    /// Starts counting.
    pub fn new() -> Self {
        Self {
            timer: Instant::now(),
            steps_in_window: 0,
            total_steps: 0,
        }
    }

    /// Counts an environment step.
    pub fn count_step(&mut self) {
        self.steps_in_window += 1;
        self.total_steps += 1;
    }

    /// Total number of counted steps.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Returns `true` if the current window is at least `interval` long.
    pub fn is_due(&self, interval: Duration) -> bool {
        self.timer.elapsed() >= interval
    }

    /// Returns steps per second in the current window, then starts a new window.
    pub fn steps_per_sec(&mut self) -> f32 {
        let secs = self.timer.elapsed().as_secs_f32();
        let sps = match secs > 0.0 {
            true => self.steps_in_window as f32 / secs,
            false => 0.0,
        };
        self.steps_in_window = 0;
        self.timer = Instant::now();
        sps
    }
}
