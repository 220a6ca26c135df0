//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! It is built once, validated once, and never mutated by the engine.

use super::operators::Crossover;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reasons a [`GaConfig`] is rejected before a run starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population_size must be at least 1")]
    PopulationTooSmall,

    #[error("bits_per_gene must be at least 1")]
    NoGenes,

    #[error("crossover_rate must be within [0, 1], got {0}")]
    CrossoverRateOutOfRange(f64),

    #[error("mutation_rate must be within [0, 1], got {0}")]
    MutationRateOutOfRange(f64),

    #[error("unknown crossover type: {0:?} (expected \"onepoint\" or \"uniform\")")]
    UnknownCrossover(String),
}

/// Configuration for the binary Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_bitga::ga::{Crossover, GaConfig};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.crossover, Crossover::Uniform);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bitga::ga::{Crossover, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_crossover(Crossover::OnePoint)
///     .with_elitism_count(5)
///     .with_bits_per_gene(20)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population. Fixed for the whole run.
    pub population_size: usize,

    /// Number of generations to run. Zero is allowed: the initial
    /// population is built and its best individual returned.
    pub max_generations: usize,

    /// Probability of recombining a selected pair of parents (0.0–1.0).
    ///
    /// When crossover does not fire, the children are copies of the parents.
    pub crossover_rate: f64,

    /// Per-bit flip probability applied to every child (0.0–1.0).
    pub mutation_rate: f64,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Number of top individuals copied unchanged into the next generation.
    ///
    /// Values above `population_size` are clamped at run time.
    pub elitism_count: usize,

    /// Length of every genotype in bits.
    pub bits_per_gene: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed for each run.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 50,
            crossover_rate: 0.8,
            mutation_rate: 0.05,
            crossover: Crossover::default(),
            elitism_count: 2,
            bits_per_gene: 16,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate. Not clamped; see [`validate`](Self::validate).
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-bit mutation rate. Not clamped.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the number of elites.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Sets the genotype length.
    pub fn with_bits_per_gene(mut self, bits: usize) -> Self {
        self.bits_per_gene = bits;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Elites actually carried per generation: `min(elitism_count, population_size)`.
    pub fn effective_elitism(&self) -> usize {
        self.elitism_count.min(self.population_size)
    }

    /// Validates the configuration.
    ///
    /// Returns the first problem found. Rates that are NaN or infinite are
    /// out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 1 {
            return Err(ConfigError::PopulationTooSmall);
        }
        if self.bits_per_gene < 1 {
            return Err(ConfigError::NoGenes);
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(ConfigError::CrossoverRateOutOfRange(self.crossover_rate));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange(self.mutation_rate));
        }
        Ok(())
    }
}
