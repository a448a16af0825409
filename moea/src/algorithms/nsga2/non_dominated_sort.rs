//! Implementation of the [Fast Non-Dominated Sort Algorithm][1] as used by NSGA-II.
//! Time complexity is `O(K * N^2)`, where `K` is the number of objectives and `N` the number of solutions.
//!
//! Non-dominated sorting is used in multi-objective optimization to group solutions into
//! non-dominated Pareto fronts according to their objectives. A solution can happen to be better in
//! one objective while at the same time worse in another objective, and as such none of the two
//! solutions _dominates_ the other.
//!
//! [1]: https://www.iitk.ac.in/kangal/Deb_NSGA-II.pdf "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II)"

#[cfg(test)]
#[path = "../../../tests/unit/algorithms/nsga2/non_dominated_sort_test.rs"]
mod non_dominated_sort_test;

use super::MultiObjective;
use std::cmp::Ordering;

/// A Pareto front: indices of mutually non-dominated solutions with the same rank.
#[derive(Clone, Debug)]
pub struct Front {
    /// Front rank, zero is the best one.
    pub rank: usize,
    /// Indices of solutions which belong to the front, in ascending order.
    pub indices: Vec<usize>,
}

impl Front {
    /// Returns amount of solutions in the front.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if front has no solutions.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Performs a non-dominated sort of `solutions`. Returns all Pareto fronts ordered by rank, every
/// solution belongs to exactly one front.
pub fn non_dominated_sort<S, O>(solutions: &[S], objective: &O) -> Vec<Front>
where
    O: MultiObjective<Solution = S>,
{
    // the indices of the solutions that are dominated by the solution
    let mut dominated_solutions: Vec<Vec<usize>> = vec![Vec::new(); solutions.len()];
    // the number of solutions that dominate the solution
    let mut domination_count: Vec<usize> = vec![0; solutions.len()];

    let mut iter = solutions.iter().enumerate();
    while let Some((p_i, p)) = iter.next() {
        for (q_i, q) in iter.clone() {
            match objective.total_order(p, q) {
                Ordering::Less => {
                    dominated_solutions[p_i].push(q_i);
                    domination_count[q_i] += 1;
                }
                Ordering::Greater => {
                    dominated_solutions[q_i].push(p_i);
                    domination_count[p_i] += 1;
                }
                Ordering::Equal => {}
            }
        }
    }

    let mut current = (0..solutions.len()).filter(|&idx| domination_count[idx] == 0).collect::<Vec<_>>();
    let mut fronts = Vec::new();

    while !current.is_empty() {
        let mut next = Vec::new();
        for &p_i in current.iter() {
            for &q_i in dominated_solutions[p_i].iter() {
                domination_count[q_i] -= 1;
                if domination_count[q_i] == 0 {
                    next.push(q_i);
                }
            }
        }

        next.sort_unstable();
        fronts.push(Front { rank: fronts.len(), indices: current });
        current = next;
    }

    debug_assert_eq!(fronts.iter().map(|front| front.len()).sum::<usize>(), solutions.len());

    fronts
}
