//! Repeated independent trials of one configuration.

use super::grid::ExperimentConfig;
use super::tasks::Task;
use super::ExperimentError;
use crate::ga::{GaResult, GaRunner};
use crate::stats::{mean, population_std_dev};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregated outcome of running one grid point several times.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimentResult {
    pub task_name: String,
    pub config: ExperimentConfig,

    /// Best fitness over all trials.
    pub best_fitness: f64,
    pub mean_fitness: f64,

    /// Population standard deviation of the per-trial best fitness.
    pub std_dev_fitness: f64,

    /// Mean wall time of one trial.
    pub execution_time_ms: f64,

    /// `baseline - best_fitness`.
    pub absolute_error: f64,

    /// `absolute_error / baseline`; `None` when the baseline is zero.
    pub relative_error: Option<f64>,

    /// Convergence history of the first trial.
    pub convergence: Vec<f64>,
}

/// Runs `runs` independent GA trials per configuration.
///
/// Trial `i` is seeded with `base_seed + i` and owns its generator, so the
/// aggregate is the same whether trials run sequentially or on rayon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialRunner {
    pub runs: usize,
    pub base_seed: u64,
}

impl Default for TrialRunner {
    fn default() -> Self {
        Self {
            runs: 5,
            base_seed: 42,
        }
    }
}

struct Trial {
    result: GaResult,
    elapsed_ms: f64,
}

impl TrialRunner {
    /// Runs all trials for `config` on `task` and aggregates them against
    /// the exhaustive-search `baseline`.
    pub fn run<T: Task + ?Sized>(
        &self,
        task: &T,
        config: &ExperimentConfig,
        baseline: f64,
    ) -> Result<ExperimentResult, ExperimentError> {
        if self.runs == 0 {
            return Err(ExperimentError::NoTrials);
        }

        let trials = self.run_trials(task, config)?;

        let fitness: Vec<f64> = trials.iter().map(|t| t.result.best_fitness).collect();
        let mean_fitness = mean(&fitness);
        let best_fitness = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let total_ms: f64 = trials.iter().map(|t| t.elapsed_ms).sum();
        let absolute_error = baseline - best_fitness;

        Ok(ExperimentResult {
            task_name: task.name().to_string(),
            config: config.clone(),
            best_fitness,
            mean_fitness,
            std_dev_fitness: population_std_dev(&fitness, mean_fitness),
            execution_time_ms: total_ms / self.runs as f64,
            absolute_error,
            relative_error: relative_error(absolute_error, baseline),
            convergence: trials[0].result.fitness_history.clone(),
        })
    }

    #[cfg(feature = "parallel")]
    fn run_trials<T: Task + ?Sized>(
        &self,
        task: &T,
        config: &ExperimentConfig,
    ) -> Result<Vec<Trial>, ExperimentError> {
        (0..self.runs)
            .into_par_iter()
            .map(|i| self.run_trial(task, config, i))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run_trials<T: Task + ?Sized>(
        &self,
        task: &T,
        config: &ExperimentConfig,
    ) -> Result<Vec<Trial>, ExperimentError> {
        (0..self.runs)
            .map(|i| self.run_trial(task, config, i))
            .collect()
    }

    fn run_trial<T: Task + ?Sized>(
        &self,
        task: &T,
        config: &ExperimentConfig,
        index: usize,
    ) -> Result<Trial, ExperimentError> {
        let seed = self.base_seed.wrapping_add(index as u64);
        let ga_config = config.to_ga_config(task.bits_per_gene(), seed);
        let mut runner = GaRunner::new(ga_config, task)?;

        let start = Instant::now();
        let result = match runner.run() {
            Ok(result) => result,
            Err(never) => match never {},
        };
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        Ok(Trial { result, elapsed_ms })
    }
}

/// `absolute_error / baseline`, or `None` if that is not a finite number.
fn relative_error(absolute_error: f64, baseline: f64) -> Option<f64> {
    Some(absolute_error / baseline).filter(|r| r.is_finite())
}
