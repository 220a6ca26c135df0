//! Binary-encoded genetic algorithm.
//!
//! A generational GA over fixed-length bit vectors for approximating the
//! maximum of an arbitrary scalar objective:
//!
//! - **Engine** ([`ga`]): tournament selection, one-point or uniform
//!   crossover, per-bit mutation, elitism, and a per-generation convergence
//!   history. Fully deterministic for a fixed seed.
//! - **Decoding** ([`ga::decode`]): bit vector → integer or bounded real,
//!   for building fitness evaluators.
//! - **Experiments** ([`experiment`]): hyperparameter grids, repeated
//!   trials with summary statistics, brute-force baselines, JSON results.
//!
//! # Example
//!
//! ```
//! use u_bitga::ga::{decode_float, GaConfig, GaRunner};
//!
//! // maximize -(x - 1)^2 on [-4, 4]
//! let evaluator = |genes: &[bool]| {
//!     let x = decode_float(genes, -4.0, 4.0);
//!     -(x - 1.0).powi(2)
//! };
//! let config = GaConfig::default()
//!     .with_bits_per_gene(16)
//!     .with_max_generations(60)
//!     .with_seed(7);
//!
//! let mut runner = GaRunner::new(config, &evaluator).unwrap();
//! let result = runner.run().unwrap();
//! assert!(result.best_fitness > -0.01);
//! ```
//!
//! # Concurrency
//!
//! A run is single-threaded and owns its random generator. Separate runs
//! share nothing; with the `parallel` feature, [`experiment::TrialRunner`]
//! spreads independent trials over rayon.

pub mod experiment;
pub mod ga;
pub mod random;
pub mod stats;
