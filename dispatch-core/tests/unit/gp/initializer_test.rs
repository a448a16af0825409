use super::*;
use crate::helpers::utils::FakeRandom;
use moea::prelude::DefaultRandom;

#[test]
fn can_parse_all_seed_policies() {
    let seeds = create_seed_individuals();

    assert_eq!(seeds.len(), SEED_POLICIES.len());
    seeds.iter().zip(SEED_POLICIES.iter()).for_each(|(individual, (routing, sequencing))| {
        assert_eq!(individual.routing().to_string(), *routing);
        assert_eq!(individual.sequencing().to_string(), *sequencing);
    });
}

#[test]
fn can_create_full_tree() {
    let random = FakeRandom::new(vec![0, 1, 3, 4, 2, 5, 0], vec![]);

    let tree = create_random_tree(&random, Role::Routing, 3, false, TerminalSampling::Uniform);

    assert_eq!(tree.to_string(), "(add (sub RT3 RT4) (mul RT5 RT0))");
    assert_eq!(tree.depth(), 3);
}

#[test]
fn can_create_grow_tree() {
    let random = FakeRandom::new(vec![0, 2, 5, 1, 0], vec![0.9, 0.1, 0.9]);

    let tree = create_random_tree(&random, Role::Sequencing, 3, true, TerminalSampling::Uniform);

    assert_eq!(tree.to_string(), "(add ST2 (max ST1 ST0))");
}

#[test]
fn can_create_terminal_when_depth_is_one() {
    let random = FakeRandom::new(vec![4], vec![]);

    let tree = create_random_tree(&random, Role::Routing, 1, true, TerminalSampling::Uniform);

    assert_eq!(tree.to_string(), "RT4");
}

parameterized_test! {can_create_population_within_depth_limit, (size, max_depth, expected_seeds), {
    let random = DefaultRandom::new_with_seed(42);

    let population = create_population(&random, size, max_depth);

    assert_eq!(population.len(), size);
    assert!(population.iter().all(|individual| individual.depth() <= max_depth));
    assert!(population.iter().all(|individual| individual.fitness().is_none()));
    assert!(population.iter().all(|individual| {
        individual.routing().role() == Role::Routing && individual.sequencing().role() == Role::Sequencing
    }));

    let seeds = create_seed_individuals()
        .into_iter()
        .filter(|individual| individual.depth() <= max_depth)
        .map(|individual| individual.to_string())
        .collect::<Vec<_>>();
    let actual = population.iter().take(expected_seeds).map(|individual| individual.to_string()).collect::<Vec<_>>();
    assert_eq!(actual, seeds[..expected_seeds].to_vec());
}}

can_create_population_within_depth_limit! {
    case01_all_seeds: (30, 5, 8),
    case02_seed_share_is_limited: (9, 5, 3),
    case03_shallow_trees: (30, 2, 7),
    case04_tiny_population: (2, 3, 0),
}

#[test]
fn can_reproduce_population_with_the_same_seed() {
    let create = || {
        create_population(&DefaultRandom::new_with_seed(7), 20, 4)
            .iter()
            .map(|individual| individual.to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(create(), create());
}
