//! Binary Genetic Algorithm.
//!
//! A generational GA over fixed-length bit vectors. The caller supplies a
//! [`FitnessEvaluator`] (higher is better) and a [`GaConfig`]; the engine
//! owns everything else: the seeded generator, the population, and the
//! per-generation convergence history.
//!
//! # Key Types
//!
//! - [`BitIndividual`]: gene bits plus their fitness
//! - [`GaConfig`]: population size, generations, rates, elitism, seed
//! - [`GaRunner`]: executes the evolutionary loop
//! - [`GaResult`]: best individual and convergence history
//!
//! # Generation step
//!
//! 1. Rank the population, best first, and record the best fitness
//! 2. Copy the top `elitism_count` individuals unchanged
//! 3. Fill the rest with children: two tournament winners, crossover with
//!    probability `crossover_rate`, per-bit mutation, evaluation
//!
//! # Submodules
//!
//! - [`operators`]: one-point/uniform crossover and bit-flip mutation
//! - [`decode`]: bit vector → integer / real helpers for evaluators
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod decode;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::{ConfigError, GaConfig};
pub use decode::{decode_float, decode_int, decode_mod};
pub use operators::Crossover;
pub use runner::{GaResult, GaRunner};
pub use selection::{tournament, TOURNAMENT_SIZE};
pub use types::{BitIndividual, FitnessEvaluator};
