//! Tournament selection.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::BitIndividual;
use rand::Rng;

/// Number of contestants drawn per tournament.
pub const TOURNAMENT_SIZE: usize = 3;

/// Tournament selection over a maximizing population.
///
/// Draws [`TOURNAMENT_SIZE`] indices uniformly with replacement and returns
/// the one with the highest fitness. Comparison is strict, so on a tie the
/// earliest draw wins.
///
/// # Complexity
/// O(1) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[BitIndividual], rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..TOURNAMENT_SIZE {
        let idx = rng.random_range(0..n);
        if population[idx].fitness > population[best_idx].fitness {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<BitIndividual> {
        fitnesses
            .iter()
            .map(|&f| BitIndividual::new(vec![false], f))
            .collect()
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, &mut rng)] += 1;
        }
        // P(best in 3 draws from 4) = 1 - (3/4)^3 ~ 0.58
        let best_count = counts[0];
        assert!(
            best_count > 5200,
            "expected best to win ~58% of tournaments, got {best_count}/{n}"
        );
        assert!(counts[0] > counts[3] && counts[3] > counts[1] && counts[1] > counts[2]);
    }

    #[test]
    fn test_worst_only_wins_when_drawn_alone() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let n = 10000;
        let worst = (0..n).filter(|_| tournament(&pop, &mut rng) == 2).count();
        // (1/4)^3 ~ 1.6%
        assert!(worst < 400, "worst selected too often: {worst}/{n}");
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        assert_eq!(tournament(&pop, &mut rng), 0);
    }

    #[test]
    fn test_equal_fitness_is_uniform() {
        let pop = make_population(&[5.0, 5.0, 5.0, 5.0]);
        let mut rng = create_rng(42);

        // ties keep the first draw, which is uniform
        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[tournament(&pop, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 2000, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<BitIndividual> = vec![];
        let mut rng = create_rng(42);
        tournament(&pop, &mut rng);
    }
}
