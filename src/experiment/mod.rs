//! Hyperparameter sweeps over benchmark tasks.
//!
//! Everything here sits on top of the [`ga`](crate::ga) engine and only
//! consumes its `run()` output: grid expansion, repeated trials with
//! summary statistics, brute-force baselines, JSON persistence, and the
//! [`report`] summaries and charts.
//!
//! # Key Types
//!
//! - [`ParamGrid`] / [`ExperimentConfig`]: the swept parameter space
//! - [`Task`]: an evaluator with a known optimum ([`ArraySearch`],
//!   [`FunctionOptimization`])
//! - [`TrialRunner`]: repeated independent runs of one grid point
//! - [`Experiment`]: the full sweep, producing [`AllResults`]

mod grid;
pub mod report;
mod tasks;
mod trials;

pub use grid::{ExperimentConfig, ParamGrid};
pub use tasks::{ArraySearch, FunctionOptimization, LinearSearchResult, Task};
pub use trials::{ExperimentResult, TrialRunner};

use crate::ga::ConfigError;
use log::info;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::path::Path;

/// Errors raised while running or persisting a sweep.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("invalid GA configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("task data must not be empty")]
    EmptyData,

    #[error("at least one trial per configuration is required")]
    NoTrials,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "charts")]
    #[error("chart rendering failed: {0}")]
    Chart(String),
}

#[cfg(feature = "charts")]
impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for ExperimentError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ExperimentError::Chart(e.to_string())
    }
}

/// Everything a sweep produced.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllResults {
    pub linear_search_results: Vec<LinearSearchResult>,
    pub ga_results: Vec<ExperimentResult>,
}

#[cfg(feature = "serde")]
impl AllResults {
    /// Writes the results as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ExperimentError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads results written by [`save_json`](Self::save_json).
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ExperimentError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// A sweep of every [`ParamGrid`] point over a list of tasks.
#[derive(Debug, Clone, Default)]
pub struct Experiment {
    pub grid: ParamGrid,
    pub trials: TrialRunner,
}

impl Experiment {
    /// Creates a sweep.
    pub fn new(grid: ParamGrid, trials: TrialRunner) -> Self {
        Self { grid, trials }
    }

    /// Runs the baseline and the whole grid for every task, in order.
    pub fn run(&self, tasks: &[&dyn Task]) -> Result<AllResults, ExperimentError> {
        let mut results = AllResults::default();
        for &task in tasks {
            let (baseline, ga_results) = self.run_task(task)?;
            results.linear_search_results.push(baseline);
            results.ga_results.extend(ga_results);
        }
        Ok(results)
    }

    /// Runs the baseline and the whole grid for one task.
    pub fn run_task<T: Task + ?Sized>(
        &self,
        task: &T,
    ) -> Result<(LinearSearchResult, Vec<ExperimentResult>), ExperimentError> {
        info!("task {}: running linear search", task.name());
        let baseline = LinearSearchResult::measure(task);
        info!(
            "task {}: linear search best {:.6} in {:.2} ms",
            task.name(),
            baseline.best_value,
            baseline.execution_time_ms
        );

        let configs = self.grid.configs();
        let total = configs.len();
        let mut ga_results = Vec::with_capacity(total);
        for (i, config) in configs.iter().enumerate() {
            if (i + 1) % 10 == 0 {
                info!("task {}: progress {}/{} configurations", task.name(), i + 1, total);
            }
            ga_results.push(self.trials.run(task, config, baseline.best_value)?);
        }
        info!("task {}: {} configurations done", task.name(), total);

        Ok((baseline, ga_results))
    }
}
