#[cfg(test)]
#[path = "../../tests/unit/gp/initializer_test.rs"]
mod initializer_test;

use super::*;
use moea::prelude::Random;

/// Routing feature weights used by the weighted initializer, the arrival closeness (RT3) dominates.
pub const ROUTING_FEATURE_WEIGHTS: [usize; FEATURE_COUNT] = [5, 15, 15, 50, 5, 10];

/// Sequencing feature weights used by the weighted initializer, the travel time (ST0) and the
/// slack (ST2) dominate.
pub const SEQUENCING_FEATURE_WEIGHTS: [usize; FEATURE_COUNT] = [40, 5, 40, 5, 5, 5];

/// Hand-crafted policies put first into the initial population.
pub const SEED_POLICIES: [(&str, &str); 8] = [
    ("(add RT3 RT1)", "(min ST0 ST2)"),
    ("RT3", "(min ST0 ST2)"),
    ("(add RT1 RT3)", "ST2"),
    ("(add RT3 (mul RT3 RT5))", "ST0"),
    ("(add RT0 RT3)", "(min ST0 ST2)"),
    ("(add RT1 RT2)", "(min ST0 ST2)"),
    ("RT3", "(div ST2 ST0)"),
    ("RT3", "ST2"),
];

const GROW_TERMINAL_PROBABILITY: f64 = 0.4;

/// Specifies how terminals are sampled for random trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalSampling {
    /// Every feature is equally likely.
    Uniform,
    /// Features are sampled using role specific weights.
    Weighted,
}

/// Creates a random tree. With `grow`, a node becomes a terminal early with some probability,
/// otherwise all leaves are at `max_depth` (full method). Operators are chosen uniformly.
pub fn create_random_tree(
    random: &dyn Random,
    role: Role,
    max_depth: usize,
    grow: bool,
    sampling: TerminalSampling,
) -> GpTree {
    let mut nodes = Vec::new();
    grow_nodes(random, role, max_depth.max(1), grow, sampling, &mut nodes);

    GpTree::from_nodes_unchecked(role, nodes)
}

/// Returns hand-crafted policies.
pub fn create_seed_individuals() -> Vec<Individual> {
    SEED_POLICIES.iter().filter_map(|(routing, sequencing)| Individual::parse(routing, sequencing).ok()).collect()
}

/// Creates initial population: a third of it is taken from hand-crafted policies, up to two thirds
/// are grown with weighted terminals and the rest is created with uniform terminals using the
/// grow or the full method chosen by a coin flip. No tree is deeper than `max_depth`.
pub fn create_population(random: &dyn Random, size: usize, max_depth: usize) -> Vec<Individual> {
    let mut population = create_seed_individuals()
        .into_iter()
        .filter(|individual| individual.depth() <= max_depth)
        .take(size / 3)
        .collect::<Vec<_>>();

    while population.len() < size * 2 / 3 {
        population.push(create_random_individual(random, max_depth, true, TerminalSampling::Weighted));
    }

    while population.len() < size {
        let grow = random.is_hit(0.5);
        population.push(create_random_individual(random, max_depth, grow, TerminalSampling::Uniform));
    }

    population
}

fn create_random_individual(
    random: &dyn Random,
    max_depth: usize,
    grow: bool,
    sampling: TerminalSampling,
) -> Individual {
    let routing = create_random_tree(random, Role::Routing, max_depth, grow, sampling);
    let sequencing = create_random_tree(random, Role::Sequencing, max_depth, grow, sampling);

    Individual::from_trees(routing, sequencing)
}

fn grow_nodes(
    random: &dyn Random,
    role: Role,
    depth: usize,
    grow: bool,
    sampling: TerminalSampling,
    nodes: &mut Vec<GpNode>,
) {
    if depth <= 1 || (grow && random.is_hit(GROW_TERMINAL_PROBABILITY)) {
        nodes.push(GpNode::Terminal(sample_feature(random, role, sampling)));
        return;
    }

    let operator = Operator::ALL[random.uniform_int(0, Operator::ALL.len() as i32 - 1) as usize];
    nodes.push(GpNode::Internal(operator));

    grow_nodes(random, role, depth - 1, grow, sampling, nodes);
    grow_nodes(random, role, depth - 1, grow, sampling, nodes);
}

fn sample_feature(random: &dyn Random, role: Role, sampling: TerminalSampling) -> Feature {
    let index = match (sampling, role) {
        (TerminalSampling::Uniform, _) => random.uniform_int(0, FEATURE_COUNT as i32 - 1) as usize,
        (TerminalSampling::Weighted, Role::Routing) => random.weighted(&ROUTING_FEATURE_WEIGHTS),
        (TerminalSampling::Weighted, Role::Sequencing) => random.weighted(&SEQUENCING_FEATURE_WEIGHTS),
    };

    Feature::wrapping(role, index)
}
