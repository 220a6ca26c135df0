//! Core type definitions for the binary GA.
//!
//! [`BitIndividual`] is the only genotype the engine knows about: a
//! fixed-length bit vector paired with the fitness it evaluated to.
//! [`FitnessEvaluator`] is the contract between the engine and the
//! caller's objective.

use std::convert::Infallible;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Objective function over a fixed-length bit vector.
///
/// Higher fitness is better (maximization). Implementations are expected to
/// be pure and deterministic: the engine's reproducibility guarantee only
/// holds if the same genes always evaluate to the same value. This is not
/// checked.
///
/// Any error returned from [`evaluate`](FitnessEvaluator::evaluate) aborts
/// the run and is handed back to the caller of
/// [`GaRunner::run`](super::GaRunner::run) unchanged.
///
/// Plain closures work out of the box:
///
/// ```
/// use u_bitga::ga::FitnessEvaluator;
///
/// let onemax = |genes: &[bool]| genes.iter().filter(|&&b| b).count() as f64;
/// assert_eq!(onemax.evaluate(&[true, false, true]), Ok(2.0));
/// ```
pub trait FitnessEvaluator {
    /// Error raised when a genotype cannot be evaluated.
    type Error;

    /// Computes the fitness of `genes`.
    fn evaluate(&self, genes: &[bool]) -> Result<f64, Self::Error>;
}

impl<F> FitnessEvaluator for F
where
    F: Fn(&[bool]) -> f64,
{
    type Error = Infallible;

    fn evaluate(&self, genes: &[bool]) -> Result<f64, Infallible> {
        Ok(self(genes))
    }
}

/// A candidate solution: genes plus the fitness they evaluate to.
///
/// Genetic operators work on bare `Vec<bool>` gene vectors and never touch
/// an individual, so a `BitIndividual` only exists once its genes have been
/// evaluated. There is no "stale fitness" state to track.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BitIndividual {
    /// Gene bits, position 0 is the least significant when decoded.
    pub genes: Vec<bool>,

    /// Fitness of `genes` as computed by the run's evaluator.
    pub fitness: f64,
}

impl BitIndividual {
    /// Pairs genes with an already-known fitness.
    pub fn new(genes: Vec<bool>, fitness: f64) -> Self {
        Self { genes, fitness }
    }

    /// Evaluates `genes` and wraps them into an individual.
    pub fn evaluate<E>(genes: Vec<bool>, evaluator: &E) -> Result<Self, E::Error>
    where
        E: FitnessEvaluator + ?Sized,
    {
        let fitness = evaluator.evaluate(&genes)?;
        Ok(Self { genes, fitness })
    }

    /// Number of gene bits.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the individual carries no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}
