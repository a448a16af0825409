#[cfg(test)]
#[path = "../../../tests/unit/algorithms/nsga2/crowding_distance_test.rs"]
mod crowding_distance_test;

use super::{Front, MultiObjective};
use crate::utils::compare_floats;

/// A solution with assigned rank and crowding distance.
#[derive(Clone, Debug)]
pub struct AssignedCrowdingDistance {
    /// Solution index in the source collection.
    pub index: usize,
    /// Rank of the front which solution belongs to.
    pub rank: usize,
    /// Crowding distance within the front.
    pub crowding_distance: f64,
}

/// Assigns a crowding distance to each solution in `front`, the result follows the front's order.
///
/// For every objective, solutions are sorted by fitness ascending, both extremes get infinite
/// distance and interior ones accumulate the normalized gap between their neighbours. An objective
/// with zero spread does not contribute.
pub fn assign_crowding_distance<S>(
    front: &Front,
    solutions: &[S],
    multi_objective: &impl MultiObjective<Solution = S>,
) -> Vec<AssignedCrowdingDistance> {
    let mut assigned = front
        .indices
        .iter()
        .map(|&index| AssignedCrowdingDistance { index, rank: front.rank, crowding_distance: 0. })
        .collect::<Vec<_>>();

    if assigned.is_empty() {
        return assigned;
    }

    multi_objective.objectives().for_each(|objective| {
        let mut order = (0..assigned.len())
            .map(|position| (position, objective.fitness(&solutions[assigned[position].index])))
            .collect::<Vec<_>>();
        order.sort_by(|(_, a), (_, b)| compare_floats(*a, *b));

        let (first, last) = (order[0], order[order.len() - 1]);
        assigned[first.0].crowding_distance = f64::INFINITY;
        assigned[last.0].crowding_distance = f64::INFINITY;

        let spread = last.1 - first.1;
        if spread > 0. {
            order.windows(3).for_each(|window| {
                let (position, _) = window[1];
                assigned[position].crowding_distance += (window[2].1 - window[0].1) / spread;
            });
        }
    });

    assigned
}
