//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → ranking → elitism → selection → crossover → mutation
//! → evaluation → repeat.

use super::config::{ConfigError, GaConfig};
use super::operators::bit_flip_mutation;
use super::selection::tournament;
use super::types::{BitIndividual, FitnessEvaluator};
use crate::random::create_rng;
use log::debug;
use rand::Rng;

/// Result of a GA optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct GaResult {
    /// The best individual of the final population.
    pub best: BitIndividual,

    /// Best fitness value (same as `best.fitness`).
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Seed the run's generator was created from.
    pub seed: u64,

    /// Best fitness at the start of each generation, before reproduction.
    ///
    /// Always exactly `max_generations` entries long.
    pub fitness_history: Vec<f64>,
}

/// Executes the binary GA.
///
/// The runner borrows its evaluator and owns everything else: the
/// configuration, the population and the convergence history of the most
/// recent run. Two runners never share state, so independent trials can
/// run on separate threads.
///
/// # Usage
///
/// ```
/// use u_bitga::ga::{decode_int, GaConfig, GaRunner};
///
/// let evaluator = |genes: &[bool]| decode_int(genes).unwrap_or(0) as f64;
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_bits_per_gene(8)
///     .with_seed(42);
///
/// let mut runner = GaRunner::new(config, &evaluator).unwrap();
/// let result = runner.run().unwrap();
/// assert!(result.best_fitness <= 255.0);
/// assert_eq!(runner.history().len(), 30);
/// ```
pub struct GaRunner<'a, E: FitnessEvaluator + ?Sized> {
    config: GaConfig,
    evaluator: &'a E,
    population: Vec<BitIndividual>,
    history: Vec<f64>,
}

impl<'a, E: FitnessEvaluator + ?Sized> GaRunner<'a, E> {
    /// Creates a runner after validating `config`.
    ///
    /// Nothing is initialized or evaluated until [`run`](Self::run).
    pub fn new(config: GaConfig, evaluator: &'a E) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            evaluator,
            population: Vec::new(),
            history: Vec::new(),
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Convergence history of the most recent successful run.
    ///
    /// Empty before the first run and after a failed one.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Final population of the most recent successful run, best first.
    pub fn population(&self) -> &[BitIndividual] {
        &self.population
    }

    /// Runs the GA from a fresh random population.
    ///
    /// Every call starts over: with a fixed seed, repeated calls return
    /// identical results. The first error raised by the evaluator aborts
    /// the run and is returned as is; no partial result is kept.
    pub fn run(&mut self) -> Result<GaResult, E::Error> {
        let seed = self.config.seed.unwrap_or_else(rand::random);

        match self.evolve(seed) {
            Ok(result) => Ok(result),
            Err(e) => {
                self.population.clear();
                self.history.clear();
                Err(e)
            }
        }
    }

    fn evolve(&mut self, seed: u64) -> Result<GaResult, E::Error> {
        let mut rng = create_rng(seed);
        let size = self.config.population_size;
        let elite_count = self.config.effective_elitism();

        self.history = Vec::with_capacity(self.config.max_generations);
        self.population = self.initialize(&mut rng)?;

        for gen in 0..self.config.max_generations {
            sort_descending(&mut self.population);

            // population_size >= 1 is validated
            let gen_best = self.population[0].fitness;
            self.history.push(gen_best);
            debug!("generation {gen}: best fitness {gen_best}");

            // Elite preservation, not re-evaluated
            let mut next_gen: Vec<BitIndividual> = Vec::with_capacity(size);
            next_gen.extend_from_slice(&self.population[..elite_count]);

            while next_gen.len() < size {
                let p1 = &self.population[tournament(&self.population, &mut rng)];
                let p2 = &self.population[tournament(&self.population, &mut rng)];

                // Crossover, or pass the parents through
                let recombine = rng.random_range(0.0..1.0) < self.config.crossover_rate;
                let (mut c1, mut c2) = if recombine {
                    self.config.crossover.apply(&p1.genes, &p2.genes, &mut rng)
                } else {
                    (p1.genes.clone(), p2.genes.clone())
                };

                bit_flip_mutation(&mut c1, self.config.mutation_rate, &mut rng);
                bit_flip_mutation(&mut c2, self.config.mutation_rate, &mut rng);

                let child1 = BitIndividual::evaluate(c1, self.evaluator)?;
                let child2 = BitIndividual::evaluate(c2, self.evaluator)?;

                next_gen.push(child1);
                if next_gen.len() < size {
                    next_gen.push(child2);
                }
            }

            self.population = next_gen;
        }

        sort_descending(&mut self.population);
        let best = self.population[0].clone();
        debug!(
            "GA finished: {} generations, best fitness {} (seed {seed})",
            self.config.max_generations, best.fitness
        );

        Ok(GaResult {
            best_fitness: best.fitness,
            best,
            generations: self.config.max_generations,
            seed,
            fitness_history: self.history.clone(),
        })
    }

    /// Builds `population_size` individuals with fair-coin bits.
    fn initialize<R: Rng>(&self, rng: &mut R) -> Result<Vec<BitIndividual>, E::Error> {
        (0..self.config.population_size)
            .map(|_| {
                let genes: Vec<bool> = (0..self.config.bits_per_gene)
                    .map(|_| rng.random_bool(0.5))
                    .collect();
                BitIndividual::evaluate(genes, self.evaluator)
            })
            .collect()
    }
}

/// Sort by fitness, best (highest) first.
///
/// The sort is stable: equal-fitness individuals keep their current order.
fn sort_descending(population: &mut [BitIndividual]) {
    population.sort_by(|a, b| {
        b.fitness
            .partial_cmp(&a.fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{decode_int, Crossover};
    use std::cell::Cell;

    fn onemax(genes: &[bool]) -> f64 {
        genes.iter().filter(|&&b| b).count() as f64
    }

    fn base_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_bits_per_gene(20)
            .with_seed(42)
    }

    // ---- OneMax convergence ----

    #[test]
    fn test_onemax_convergence() {
        let config = base_config()
            .with_population_size(50)
            .with_max_generations(100)
            .with_mutation_rate(0.02);
        let mut runner = GaRunner::new(config, &onemax).unwrap();
        let result = runner.run().unwrap();

        assert!(
            result.best_fitness >= 16.0,
            "expected fitness >= 16 for 20-bit OneMax, got {}",
            result.best_fitness
        );
        assert_eq!(result.best_fitness, onemax(&result.best.genes));
    }

    #[test]
    fn test_both_crossovers_make_progress() {
        for crossover in [Crossover::OnePoint, Crossover::Uniform] {
            let config = base_config().with_crossover(crossover);
            let mut runner = GaRunner::new(config, &onemax).unwrap();
            let result = runner.run().unwrap();
            let first = result.fitness_history[0];
            let last = *result.fitness_history.last().unwrap();
            assert!(last >= first, "{crossover}: {first} -> {last}");
            assert!(result.best_fitness > 10.0, "{crossover}: {}", result.best_fitness);
        }
    }

    // ---- History ----

    #[test]
    fn test_history_length_matches_generations() {
        for generations in [0, 1, 7, 40] {
            let config = base_config().with_max_generations(generations);
            let mut runner = GaRunner::new(config, &onemax).unwrap();
            let result = runner.run().unwrap();
            assert_eq!(result.fitness_history.len(), generations);
            assert_eq!(runner.history().len(), generations);
            assert_eq!(result.generations, generations);
        }
    }

    #[test]
    fn test_history_accessor_empty_before_run() {
        let runner = GaRunner::new(base_config(), &onemax).unwrap();
        assert!(runner.history().is_empty());
        assert!(runner.population().is_empty());
    }

    #[test]
    fn test_elite_preservation() {
        let config = base_config()
            .with_elitism_count(1)
            .with_mutation_rate(0.2);
        let mut runner = GaRunner::new(config, &onemax).unwrap();
        let result = runner.run().unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness must not drop with elitism: {} < {}",
                window[1],
                window[0]
            );
        }
        let last = *result.fitness_history.last().unwrap();
        assert!(result.best_fitness >= last);
    }

    // ---- Evaluation budget ----

    #[test]
    fn test_elites_are_not_reevaluated() {
        // pop + gens * 2 * ceil((pop - elites) / 2): the surplus child of an
        // odd remainder is evaluated, then dropped
        for (population, elites, generations, expected) in
            [(9, 2, 4, 41), (10, 2, 4, 42), (10, 10, 3, 10), (5, 0, 2, 17)]
        {
            let calls = Cell::new(0usize);
            let counting = |genes: &[bool]| {
                calls.set(calls.get() + 1);
                onemax(genes)
            };
            let config = base_config()
                .with_population_size(population)
                .with_elitism_count(elites)
                .with_max_generations(generations);
            let mut runner = GaRunner::new(config, &counting).unwrap();
            runner.run().unwrap();
            assert_eq!(
                calls.get(),
                expected,
                "pop {population}, elites {elites}, gens {generations}"
            );
        }
    }

    // ---- Edge cases ----

    #[test]
    fn test_zero_generations_returns_initial_best() {
        let config = base_config().with_max_generations(0);
        let mut runner = GaRunner::new(config, &onemax).unwrap();
        let result = runner.run().unwrap();

        assert!(result.fitness_history.is_empty());
        let pop_best = runner
            .population()
            .iter()
            .map(|ind| ind.fitness)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.best_fitness, pop_best);
        assert_eq!(runner.population().len(), 30);
    }

    #[test]
    fn test_odd_population_size_is_kept() {
        for size in [1, 3, 7] {
            let config = base_config()
                .with_population_size(size)
                .with_elitism_count(0)
                .with_max_generations(5);
            let mut runner = GaRunner::new(config, &onemax).unwrap();
            runner.run().unwrap();
            assert_eq!(runner.population().len(), size);
        }
    }

    #[test]
    fn test_elitism_larger_than_population_is_clamped() {
        let config = base_config()
            .with_population_size(5)
            .with_elitism_count(50)
            .with_max_generations(10);
        let mut runner = GaRunner::new(config, &onemax).unwrap();
        let result = runner.run().unwrap();

        // everything is an elite: the population never changes
        assert_eq!(runner.population().len(), 5);
        assert!(result.fitness_history.iter().all(|&f| f == result.fitness_history[0]));
    }

    #[test]
    fn test_all_genes_have_configured_length() {
        let config = base_config().with_bits_per_gene(13);
        let mut runner = GaRunner::new(config, &onemax).unwrap();
        runner.run().unwrap();
        assert!(runner.population().iter().all(|ind| ind.len() == 13));
    }

    #[test]
    fn test_population_sorted_best_first() {
        let mut runner = GaRunner::new(base_config(), &onemax).unwrap();
        let result = runner.run().unwrap();
        let pop = runner.population();
        assert_eq!(pop[0], result.best);
        for window in pop.windows(2) {
            assert!(window[0].fitness >= window[1].fitness);
        }
    }

    // ---- Determinism ----

    #[test]
    fn test_same_seed_same_result() {
        let config = base_config().with_mutation_rate(0.1);

        let mut a = GaRunner::new(config.clone(), &onemax).unwrap();
        let mut b = GaRunner::new(config, &onemax).unwrap();
        let ra = a.run().unwrap();
        let rb = b.run().unwrap();

        assert_eq!(ra, rb);
        assert_eq!(a.population(), b.population());
    }

    #[test]
    fn test_rerun_is_identical() {
        let mut runner = GaRunner::new(base_config(), &onemax).unwrap();
        let first = runner.run().unwrap();
        let second = runner.run().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unseeded_run_reports_seed() {
        let config = GaConfig {
            seed: None,
            ..base_config()
        };
        let mut runner = GaRunner::new(config.clone(), &onemax).unwrap();
        let result = runner.run().unwrap();

        let mut replay = GaRunner::new(config.with_seed(result.seed), &onemax).unwrap();
        assert_eq!(replay.run().unwrap(), result);
    }

    // ---- Errors ----

    #[test]
    fn test_invalid_config_rejected_before_evaluation() {
        let calls = Cell::new(0usize);
        let counting = |genes: &[bool]| {
            calls.set(calls.get() + 1);
            onemax(genes)
        };
        let config = base_config().with_population_size(0);
        assert!(matches!(
            GaRunner::new(config, &counting),
            Err(ConfigError::PopulationTooSmall)
        ));
        assert_eq!(calls.get(), 0);
    }

    struct FailAfter {
        limit: usize,
        calls: Cell<usize>,
    }

    impl FitnessEvaluator for FailAfter {
        type Error = String;

        fn evaluate(&self, genes: &[bool]) -> Result<f64, String> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if n > self.limit {
                Err(format!("evaluation #{n} failed"))
            } else {
                Ok(decode_int(genes).unwrap() as f64)
            }
        }
    }

    #[test]
    fn test_evaluator_error_propagates_unmodified() {
        let evaluator = FailAfter {
            limit: 45,
            calls: Cell::new(0),
        };
        let mut runner = GaRunner::new(base_config().with_bits_per_gene(8), &evaluator).unwrap();
        let err = runner.run().unwrap_err();

        assert_eq!(err, "evaluation #46 failed");
        assert_eq!(evaluator.calls.get(), 46);
        assert!(runner.history().is_empty());
        assert!(runner.population().is_empty());
    }

    #[test]
    fn test_evaluator_error_during_initialization() {
        let evaluator = FailAfter {
            limit: 0,
            calls: Cell::new(0),
        };
        let mut runner = GaRunner::new(base_config(), &evaluator).unwrap();
        assert_eq!(runner.run().unwrap_err(), "evaluation #1 failed");
    }
}
