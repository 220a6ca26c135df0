//! Benchmark tasks: fitness evaluators with an exhaustive baseline.

use super::ExperimentError;
use crate::ga::{decode_float, decode_mod, FitnessEvaluator};
use crate::random::{create_rng, standard_normal};
use std::convert::Infallible;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A maximization problem the GA is benchmarked on.
///
/// Besides evaluating genotypes, a task knows its genotype length and can
/// compute the true optimum by brute force, which the sweep uses to report
/// absolute and relative error.
pub trait Task: FitnessEvaluator<Error = Infallible> + Sync {
    /// Identifier used in result records.
    fn name(&self) -> &str;

    /// Genotype length used for this task.
    fn bits_per_gene(&self) -> usize;

    /// Best value found by exhaustive search.
    fn linear_search(&self) -> f64;
}

/// Baseline measurement for one task.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearSearchResult {
    pub task_name: String,
    pub best_value: f64,
    pub execution_time_ms: f64,
}

impl LinearSearchResult {
    /// Runs `task.linear_search()` and times it.
    pub fn measure<T: Task + ?Sized>(task: &T) -> Self {
        let start = Instant::now();
        let best_value = task.linear_search();
        let elapsed = start.elapsed();
        Self {
            task_name: task.name().to_string(),
            best_value,
            execution_time_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }
}

// ============================================================================
// Array search
// ============================================================================

/// Find the largest element of a data array.
///
/// The genotype decodes to an index, wrapped modulo the array length
/// with [`decode_mod`], so any genotype length is accepted.
#[derive(Debug, Clone)]
pub struct ArraySearch {
    data: Vec<f64>,
}

impl ArraySearch {
    /// Task name in result records.
    pub const NAME: &'static str = "array_search";

    /// Genotype length: 2^20 indices cover a million elements.
    pub const BITS: usize = 20;

    /// Wraps existing data.
    pub fn new(data: Vec<f64>) -> Result<Self, ExperimentError> {
        if data.is_empty() {
            return Err(ExperimentError::EmptyData);
        }
        Ok(Self { data })
    }

    /// Builds `size` normally distributed samples from a seeded generator.
    pub fn gaussian(
        size: usize,
        mean: f64,
        std_dev: f64,
        seed: u64,
    ) -> Result<Self, ExperimentError> {
        let mut rng = create_rng(seed);
        let data = (0..size)
            .map(|_| mean + std_dev * standard_normal(&mut rng))
            .collect();
        Self::new(data)
    }

    /// The searched data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }
}

impl FitnessEvaluator for ArraySearch {
    type Error = Infallible;

    fn evaluate(&self, genes: &[bool]) -> Result<f64, Infallible> {
        let index = decode_mod(genes, self.data.len() as u64);
        Ok(self.data[index as usize])
    }
}

impl Task for ArraySearch {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn bits_per_gene(&self) -> usize {
        Self::BITS
    }

    fn linear_search(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

// ============================================================================
// Function optimization
// ============================================================================

/// Maximize `f(x) = sin(x) + sin(10x/3)` over an interval.
///
/// The genotype decodes to `x` with [`decode_float`].
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionOptimization {
    pub min: f64,
    pub max: f64,
    pub bits: usize,

    /// Number of intervals for the grid baseline; `steps + 1` points are sampled.
    pub steps: usize,
}

impl Default for FunctionOptimization {
    fn default() -> Self {
        Self {
            min: 2.7,
            max: 7.5,
            bits: 16,
            steps: 1_000_000,
        }
    }
}

impl FunctionOptimization {
    /// Task name in result records.
    pub const NAME: &'static str = "function_optimization";

    /// The objective.
    pub fn target(x: f64) -> f64 {
        x.sin() + (10.0 / 3.0 * x).sin()
    }
}

impl FitnessEvaluator for FunctionOptimization {
    type Error = Infallible;

    fn evaluate(&self, genes: &[bool]) -> Result<f64, Infallible> {
        Ok(Self::target(decode_float(genes, self.min, self.max)))
    }
}

impl Task for FunctionOptimization {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn bits_per_gene(&self) -> usize {
        self.bits
    }

    fn linear_search(&self) -> f64 {
        let step = (self.max - self.min) / self.steps.max(1) as f64;
        (0..=self.steps)
            .map(|i| Self::target(self.min + i as f64 * step))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
