//! Hyperparameter grid.

use crate::ga::{Crossover, GaConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One point of a [`ParamGrid`]: every GA knob except genotype length and seed,
/// which belong to the task and the trial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimentConfig {
    pub population_size: usize,
    pub max_generations: usize,
    #[cfg_attr(feature = "serde", serde(rename = "crossover_prob"))]
    pub crossover_rate: f64,
    #[cfg_attr(feature = "serde", serde(rename = "mutation_prob"))]
    pub mutation_rate: f64,
    #[cfg_attr(feature = "serde", serde(rename = "crossover_type"))]
    pub crossover: Crossover,
    pub elitism_count: usize,
}

impl ExperimentConfig {
    /// Full GA configuration for one trial.
    pub fn to_ga_config(&self, bits_per_gene: usize, seed: u64) -> GaConfig {
        GaConfig {
            population_size: self.population_size,
            max_generations: self.max_generations,
            crossover_rate: self.crossover_rate,
            mutation_rate: self.mutation_rate,
            crossover: self.crossover,
            elitism_count: self.elitism_count,
            bits_per_gene,
            seed: Some(seed),
        }
    }
}

/// Candidate values for each GA parameter.
///
/// [`configs`](Self::configs) expands the grid into its Cartesian product.
///
/// ```
/// use u_bitga::experiment::ParamGrid;
///
/// assert_eq!(ParamGrid::default().configs().len(), 216);
/// assert_eq!(ParamGrid::quick().configs().len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamGrid {
    pub population_sizes: Vec<usize>,
    pub max_generations: Vec<usize>,
    pub crossover_rates: Vec<f64>,
    pub mutation_rates: Vec<f64>,
    pub crossovers: Vec<Crossover>,
    pub elitism_counts: Vec<usize>,
}

impl Default for ParamGrid {
    fn default() -> Self {
        Self {
            population_sizes: vec![50, 100, 200],
            max_generations: vec![25, 50, 75],
            crossover_rates: vec![0.6, 0.8],
            mutation_rates: vec![0.01, 0.05, 0.1],
            crossovers: vec![Crossover::OnePoint, Crossover::Uniform],
            elitism_counts: vec![2, 5],
        }
    }
}

impl ParamGrid {
    /// Small grid for smoke runs: 2 × 2 × 1 × 1 × 2 × 1 points.
    pub fn quick() -> Self {
        Self {
            population_sizes: vec![20, 50],
            max_generations: vec![10, 25],
            crossover_rates: vec![0.8],
            mutation_rates: vec![0.05],
            crossovers: vec![Crossover::OnePoint, Crossover::Uniform],
            elitism_counts: vec![2],
        }
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.population_sizes.len()
            * self.max_generations.len()
            * self.crossover_rates.len()
            * self.mutation_rates.len()
            * self.crossovers.len()
            * self.elitism_counts.len()
    }

    /// Returns `true` if any axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expands the grid, population size outermost and elitism innermost.
    pub fn configs(&self) -> Vec<ExperimentConfig> {
        let mut configs = Vec::with_capacity(self.len());
        for &population_size in &self.population_sizes {
            for &max_generations in &self.max_generations {
                for &crossover_rate in &self.crossover_rates {
                    for &mutation_rate in &self.mutation_rates {
                        for &crossover in &self.crossovers {
                            for &elitism_count in &self.elitism_counts {
                                configs.push(ExperimentConfig {
                                    population_size,
                                    max_generations,
                                    crossover_rate,
                                    mutation_rate,
                                    crossover,
                                    elitism_count,
                                });
                            }
                        }
                    }
                }
            }
        }
        configs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_size() {
        let grid = ParamGrid::default();
        assert_eq!(grid.len(), 216);
        assert_eq!(grid.configs().len(), 216);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_nesting_order() {
        let configs = ParamGrid::default().configs();
        let first = &configs[0];
        assert_eq!(first.population_size, 50);
        assert_eq!(first.max_generations, 25);
        assert_eq!(first.crossover, Crossover::OnePoint);
        assert_eq!(first.elitism_count, 2);

        // elitism varies fastest
        assert_eq!(configs[1].elitism_count, 5);
        assert_eq!(configs[1].crossover, Crossover::OnePoint);
        assert_eq!(configs[2].crossover, Crossover::Uniform);

        // population varies slowest
        assert_eq!(configs[215].population_size, 200);
        assert_eq!(configs[72].population_size, 100);
    }

    #[test]
    fn test_empty_axis_yields_no_configs() {
        let grid = ParamGrid {
            mutation_rates: vec![],
            ..ParamGrid::default()
        };
        assert!(grid.is_empty());
        assert!(grid.configs().is_empty());
    }

    #[test]
    fn test_to_ga_config() {
        let point = ParamGrid::quick().configs()[3].clone();
        let config = point.to_ga_config(16, 99);
        assert_eq!(config.population_size, point.population_size);
        assert_eq!(config.crossover, point.crossover);
        assert_eq!(config.bits_per_gene, 16);
        assert_eq!(config.seed, Some(99));
        assert!(config.validate().is_ok());
    }
}
