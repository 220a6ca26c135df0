//! Bit-string genetic operators.
//!
//! Crossover and mutation for fixed-length binary chromosomes. Operators
//! take and return bare `bool` gene vectors; fitness is computed by the
//! engine afterwards.
//!
//! # Crossover Operators
//!
//! - [`one_point_crossover`]: single cut, swap tails
//! - [`uniform_crossover`]: per-position fair coin, complementary children
//!
//! # Mutation Operators
//!
//! - [`bit_flip_mutation`]: independent per-bit flip
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use super::config::ConfigError;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Recombination strategy.
///
/// Both variants produce two children of the parents' length.
///
/// ```
/// use u_bitga::ga::Crossover;
///
/// let c: Crossover = "onepoint".parse().unwrap();
/// assert_eq!(c, Crossover::OnePoint);
/// assert_eq!(Crossover::Uniform.to_string(), "uniform");
/// assert!("twopoint".parse::<Crossover>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Crossover {
    /// One random cut; children swap tails after it.
    OnePoint,

    /// Each position independently inherits from either parent.
    #[default]
    Uniform,
}

impl Crossover {
    /// Recombine two parents into two children.
    ///
    /// # Panics
    /// Panics if parents have different lengths or are empty.
    pub fn apply<R: Rng>(
        &self,
        parent1: &[bool],
        parent2: &[bool],
        rng: &mut R,
    ) -> (Vec<bool>, Vec<bool>) {
        match self {
            Crossover::OnePoint => one_point_crossover(parent1, parent2, rng),
            Crossover::Uniform => uniform_crossover(parent1, parent2, rng),
        }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Crossover::OnePoint => "onepoint",
            Crossover::Uniform => "uniform",
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Crossover {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onepoint" | "one-point" | "one_point" => Ok(Crossover::OnePoint),
            "uniform" => Ok(Crossover::Uniform),
            _ => Err(ConfigError::UnknownCrossover(s.to_string())),
        }
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// One-point crossover.
///
/// Draws a cut uniformly from `0..n`, then delegates to
/// [`one_point_crossover_at`].
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn one_point_crossover<R: Rng>(
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let cut = rng.random_range(0..n);
    one_point_crossover_at(parent1, parent2, cut)
}

/// One-point crossover at a fixed cut.
///
/// `child1 = parent1[..cut] ++ parent2[cut..]`,
/// `child2 = parent2[..cut] ++ parent1[cut..]`.
///
/// # Panics
/// Panics if parents have different lengths or `cut > n`.
pub fn one_point_crossover_at(
    parent1: &[bool],
    parent2: &[bool],
    cut: usize,
) -> (Vec<bool>, Vec<bool>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert!(cut <= parent1.len(), "cut index out of bounds");

    let mut child1 = Vec::with_capacity(parent1.len());
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);

    let mut child2 = Vec::with_capacity(parent2.len());
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    (child1, child2)
}

/// Uniform crossover.
///
/// At every position a fair coin decides which parent child1 inherits
/// from; child2 always takes the other parent's bit.
///
/// # Complexity
/// O(n), one coin flip per position
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng>(
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");

    parent1
        .iter()
        .zip(parent2)
        .map(|(&a, &b)| if rng.random_bool(0.5) { (a, b) } else { (b, a) })
        .unzip()
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Bit-flip mutation: each bit flips independently with probability `rate`.
///
/// `rate = 0.0` never flips, `rate = 1.0` flips every bit. Draws one random
/// number per bit regardless of the rate.
pub fn bit_flip_mutation<R: Rng>(genes: &mut [bool], rate: f64, rng: &mut R) {
    for bit in genes.iter_mut() {
        if rng.random_range(0.0..1.0) < rate {
            *bit = !*bit;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
