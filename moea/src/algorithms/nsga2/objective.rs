#[cfg(test)]
#[path = "../../../tests/unit/algorithms/nsga2/objective_test.rs"]
mod objective_test;

use std::cmp::Ordering;

/// An *objective* defines a *total ordering relation* and a *fitness value* on a set of `solutions`.
pub trait Objective {
    /// The solution value type that we define the objective on.
    type Solution;

    /// An objective defines a total ordering between any two solution values.
    ///
    /// This answers the question, is solution `a` better, equal or worse than solution `b`,
    /// according to the objective. `Ordering::Less` means that `a` is better.
    fn total_order(&self, a: &Self::Solution, b: &Self::Solution) -> Ordering;

    /// An objective fitness value for given `solution`.
    fn fitness(&self, solution: &Self::Solution) -> f64;
}

/// A multi objective built from several objectives defined on the same solution type.
pub trait MultiObjective {
    /// The solution value type that we define the objective on.
    type Solution;

    /// Returns an iterator over the inner objectives.
    fn objectives<'a>(
        &'a self,
    ) -> Box<dyn Iterator<Item = &'a (dyn Objective<Solution = Self::Solution> + Send + Sync)> + 'a>;

    /// Orders two solutions by Pareto dominance over all inner objectives.
    fn total_order(&self, a: &Self::Solution, b: &Self::Solution) -> Ordering {
        dominance_order(a, b, self.objectives())
    }
}

/// Calculates Pareto dominance order of two solutions: `Ordering::Less` when `a` dominates `b`,
/// `Ordering::Greater` when `b` dominates `a` and `Ordering::Equal` when they are incomparable.
pub fn dominance_order<'a, S: 'a>(
    a: &S,
    b: &S,
    objectives: impl Iterator<Item = &'a (dyn Objective<Solution = S> + Send + Sync)>,
) -> Ordering {
    let mut less_cnt = 0;
    let mut greater_cnt = 0;

    for objective in objectives {
        match objective.total_order(a, b) {
            Ordering::Less => less_cnt += 1,
            Ordering::Greater => greater_cnt += 1,
            Ordering::Equal => {}
        }
    }

    if less_cnt > 0 && greater_cnt == 0 {
        Ordering::Less
    } else if greater_cnt > 0 && less_cnt == 0 {
        Ordering::Greater
    } else {
        debug_assert!((less_cnt > 0 && greater_cnt > 0) || (less_cnt == 0 && greater_cnt == 0));
        Ordering::Equal
    }
}
