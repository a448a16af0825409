#[cfg(test)]
#[path = "../../tests/unit/solver/objectives_test.rs"]
mod objectives_test;

use crate::gp::{Fitness, Individual};
use moea::algorithms::nsga2::{MultiObjective, Objective, rank_solutions, select_and_rank};
use moea::prelude::compare_floats;
use std::cmp::Ordering;

/// Maximizes a component of the individual's fitness, unevaluated individuals get zero.
struct FitnessObjective {
    component: fn(&Fitness) -> f64,
}

impl Objective for FitnessObjective {
    type Solution = Individual;

    fn total_order(&self, a: &Self::Solution, b: &Self::Solution) -> Ordering {
        compare_floats(self.fitness(b), self.fitness(a))
    }

    fn fitness(&self, solution: &Self::Solution) -> f64 {
        solution.fitness().as_ref().map_or(0., self.component)
    }
}

/// A pair of maximized objectives: served ratio and makespan score.
pub struct DispatchObjective {
    objectives: Vec<Box<dyn Objective<Solution = Individual> + Send + Sync>>,
}

impl Default for DispatchObjective {
    fn default() -> Self {
        Self {
            objectives: vec![
                Box::new(FitnessObjective { component: |fitness| fitness.served_ratio }),
                Box::new(FitnessObjective { component: |fitness| fitness.makespan_score }),
            ],
        }
    }
}

impl MultiObjective for DispatchObjective {
    type Solution = Individual;

    fn objectives<'a>(
        &'a self,
    ) -> Box<dyn Iterator<Item = &'a (dyn Objective<Solution = Self::Solution> + Send + Sync)> + 'a> {
        Box::new(self.objectives.iter().map(|objective| objective.as_ref()))
    }
}

/// Assigns rank and crowding distance to every individual.
pub fn rank_population(population: &mut [Individual], objective: &DispatchObjective) {
    rank_solutions(population, objective).into_iter().for_each(|ranked| {
        population[ranked.index].set_ranking(ranked.rank, ranked.crowding_distance);
    });
}

/// Selects `size` survivors: whole fronts in rank order, the overflowing front is truncated by
/// descending crowding distance. Survivors are re-ranked among themselves.
pub fn select_survivors(population: Vec<Individual>, size: usize, objective: &DispatchObjective) -> Vec<Individual> {
    let selected = select_and_rank(population.as_slice(), size, objective);

    let mut slots = population.into_iter().map(Some).collect::<Vec<_>>();
    let mut survivors = selected.into_iter().filter_map(|assigned| slots[assigned.index].take()).collect::<Vec<_>>();

    rank_population(survivors.as_mut_slice(), objective);

    survivors
}
