#[cfg(test)]
#[path = "../../tests/unit/gp/operators_test.rs"]
mod operators_test;

use super::*;
use moea::prelude::Random;

/// Maximum amount of attempts to find a variation which respects the depth limit.
pub const MAX_VARIATION_ATTEMPTS: usize = 10;

/// Specifies mutation type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    /// Replaces a random node with a freshly grown subtree.
    Subtree,
    /// Changes an operator or a feature index of a random node.
    Point,
    /// Replaces the tree with one of its proper subtrees.
    Hoist,
    /// Swaps children of a random internal node.
    Permutation,
}

impl MutationKind {
    /// All mutation kinds.
    pub const ALL: [MutationKind; 4] = [Self::Subtree, Self::Point, Self::Hoist, Self::Permutation];

    /// Mutation kind weights, aligned with `ALL`.
    pub const WEIGHTS: [usize; 4] = [60, 20, 10, 10];
}

/// Swaps random subtrees between trees of the same role (chosen by a coin flip) of two parents.
/// Children are copies of parents, they stay unchanged if no swap within depth limit is found.
pub fn crossover(
    random: &dyn Random,
    first: &Individual,
    second: &Individual,
    max_depth: usize,
) -> (Individual, Individual) {
    let (mut first_child, mut second_child) = (first.clone(), second.clone());
    let role = choose_role(random);

    let (first_tree, second_tree) = (first.tree(role), second.tree(role));

    for _ in 0..MAX_VARIATION_ATTEMPTS {
        let first_idx = random_index(random, first_tree.size());
        let second_idx = random_index(random, second_tree.size());

        let new_first = first_tree.replace_subtree(first_idx, &second_tree.subtree(second_idx));
        let new_second = second_tree.replace_subtree(second_idx, &first_tree.subtree(first_idx));

        if new_first.depth() <= max_depth && new_second.depth() <= max_depth {
            first_child.set_tree(new_first);
            second_child.set_tree(new_second);
            break;
        }
    }

    (first_child, second_child)
}

/// Mutates one of the trees (chosen by a coin flip) with a mutation kind chosen by weighted roll.
pub fn mutate(random: &dyn Random, individual: &Individual, max_depth: usize) -> Individual {
    let kind = MutationKind::ALL[random.weighted(&MutationKind::WEIGHTS)];
    let role = choose_role(random);

    mutate_with(random, individual, role, kind, max_depth)
}

/// Applies a mutation of the given kind to the tree of the given role. The mutant is committed
/// only when it respects the depth limit, otherwise an unchanged copy is returned.
pub fn mutate_with(
    random: &dyn Random,
    individual: &Individual,
    role: Role,
    kind: MutationKind,
    max_depth: usize,
) -> Individual {
    let tree = individual.tree(role);

    let mutant = match kind {
        MutationKind::Subtree => mutate_subtree(random, tree, max_depth),
        MutationKind::Point => Some(mutate_point(random, tree)),
        MutationKind::Hoist => mutate_hoist(random, tree),
        MutationKind::Permutation => mutate_permutation(random, tree),
    };

    let mut child = individual.clone();
    if let Some(mutant) = mutant.filter(|mutant| mutant.depth() <= max_depth) {
        child.set_tree(mutant);
    }

    child
}

fn mutate_subtree(random: &dyn Random, tree: &GpTree, max_depth: usize) -> Option<GpTree> {
    (0..MAX_VARIATION_ATTEMPTS).find_map(|_| {
        let index = random_index(random, tree.size());
        let depth = random.uniform_int(1, 3) as usize;
        let subtree = create_random_tree(random, tree.role(), depth, true, TerminalSampling::Uniform);

        Some(tree.replace_subtree(index, &subtree)).filter(|mutant| mutant.depth() <= max_depth)
    })
}

fn mutate_point(random: &dyn Random, tree: &GpTree) -> GpTree {
    let index = random_index(random, tree.size());

    let node = match tree.nodes()[index] {
        GpNode::Internal(operator) => {
            let others = Operator::ALL.iter().filter(|&&other| other != operator).collect::<Vec<_>>();
            GpNode::Internal(*others[random_index(random, others.len())])
        }
        GpNode::Terminal(feature) => {
            let index = random_index(random, FEATURE_COUNT - 1);
            let index = if index >= feature.index() { index + 1 } else { index };
            GpNode::Terminal(Feature::wrapping(feature.role(), index))
        }
    };

    tree.with_node(index, node)
}

fn mutate_hoist(random: &dyn Random, tree: &GpTree) -> Option<GpTree> {
    if tree.size() < 2 {
        return None;
    }

    let index = random.uniform_int(1, tree.size() as i32 - 1) as usize;

    Some(tree.subtree(index))
}

fn mutate_permutation(random: &dyn Random, tree: &GpTree) -> Option<GpTree> {
    let internals = tree.internal_indices().collect::<Vec<_>>();
    if internals.is_empty() {
        return None;
    }

    tree.with_swapped_children(internals[random_index(random, internals.len())])
}

fn choose_role(random: &dyn Random) -> Role {
    if random.is_hit(0.5) { Role::Routing } else { Role::Sequencing }
}

fn random_index(random: &dyn Random, length: usize) -> usize {
    random.uniform_int(0, length as i32 - 1) as usize
}
