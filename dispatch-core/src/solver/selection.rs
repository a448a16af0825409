#[cfg(test)]
#[path = "../../tests/unit/solver/selection_test.rs"]
mod selection_test;

use crate::gp::Individual;
use moea::prelude::{Random, compare_floats};
use std::cmp::Ordering;

/// Compares individuals by NSGA-II crowded comparison: lower rank first, then larger distance.
pub fn crowded_comparison(a: &Individual, b: &Individual) -> Ordering {
    a.rank().cmp(&b.rank()).then_with(|| compare_floats(b.crowding_distance(), a.crowding_distance()))
}

/// Picks `tournament_size` distinct individuals and returns the best of them by crowded comparison.
/// Population must not be empty.
pub fn tournament_select<'a>(
    random: &dyn Random,
    population: &'a [Individual],
    tournament_size: usize,
) -> &'a Individual {
    random
        .sample_indices(population.len(), tournament_size.max(1))
        .into_iter()
        .map(|idx| &population[idx])
        .reduce(|best, other| if crowded_comparison(other, best) == Ordering::Less { other } else { best })
        .unwrap_or(&population[0])
}

/// Returns copies of the `count` best individuals by crowded comparison.
pub fn select_elites(population: &[Individual], count: usize) -> Vec<Individual> {
    let mut sorted = population.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| crowded_comparison(a, b));

    sorted.into_iter().take(count).cloned().collect()
}
