#[cfg(test)]
#[path = "../../../tests/unit/algorithms/nsga2/nsga2_sort_test.rs"]
mod nsga2_sort_test;

use super::*;
use crate::utils::compare_floats;

/// Ranks all solutions: assigns front rank and crowding distance to every solution. The result is
/// ordered by solution index.
pub fn rank_solutions<S>(
    solutions: &[S],
    multi_objective: &impl MultiObjective<Solution = S>,
) -> Vec<AssignedCrowdingDistance> {
    let mut ranked = non_dominated_sort(solutions, multi_objective)
        .iter()
        .flat_map(|front| assign_crowding_distance(front, solutions, multi_objective))
        .collect::<Vec<_>>();

    ranked.sort_by_key(|assigned| assigned.index);

    ranked
}

/// Select `n` solutions using the approach taken by NSGA2.
///
/// We first sort the solutions into their corresponding pareto fronts using a non-dominated sort
/// algorithm. Then, we take fronts in rank order: each front is sorted by crowding distance
/// (higher crowding distance is "better") and its solutions are taken until we have exactly `n`
/// solutions in the result set.
pub fn select_and_rank<S>(
    solutions: &[S],
    n: usize,
    multi_objective: &impl MultiObjective<Solution = S>,
) -> Vec<AssignedCrowdingDistance> {
    // cannot select more solutions than we actually have
    let n = solutions.len().min(n);

    let mut result = Vec::with_capacity(n);

    for front in non_dominated_sort(solutions, multi_objective) {
        let missing_solutions = n - result.len();
        if missing_solutions == 0 {
            break;
        }

        let mut assigned = assign_crowding_distance(&front, solutions, multi_objective);
        assigned.sort_by(|a, b| compare_floats(b.crowding_distance, a.crowding_distance));

        result.extend(assigned.into_iter().take(missing_solutions));
    }

    debug_assert_eq!(n, result.len());

    result
}
