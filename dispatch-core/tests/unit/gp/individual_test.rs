use super::*;

#[test]
fn can_create_individual_from_text() {
    let individual = Individual::parse("(add RT3 RT1)", "ST2").unwrap();

    assert_eq!(individual.to_string(), "R: (add RT3 RT1) | S: ST2");
    assert_eq!(individual.depth(), 2);
    assert_eq!(individual.tree(Role::Routing), individual.routing());
    assert_eq!(individual.tree(Role::Sequencing), individual.sequencing());
    assert!(individual.fitness().is_none());
    assert_eq!(individual.rank(), usize::MAX);
}

#[test]
fn can_reject_trees_with_wrong_roles() {
    let routing = GpTree::parse("RT1", Role::Routing).unwrap();
    let sequencing = GpTree::parse("ST1", Role::Sequencing).unwrap();

    assert!(Individual::new(sequencing.clone(), routing.clone()).is_err());
    assert!(Individual::new(routing.clone(), routing).is_err());
    assert!(Individual::parse("ST1", "ST2").is_err());
}

#[test]
fn can_drop_fitness_when_tree_is_replaced() {
    let mut individual = Individual::parse("RT3", "ST2").unwrap();
    individual.set_fitness(Fitness { served_ratio: 1., makespan_score: 0.5 });
    assert!(individual.fitness().is_some());

    individual.set_tree(GpTree::parse("ST0", Role::Sequencing).unwrap());

    assert!(individual.fitness().is_none());
    assert_eq!(individual.to_string(), "R: RT3 | S: ST0");
}

#[test]
fn can_deep_copy_individual() {
    let mut original = Individual::parse("(add RT3 RT1)", "(min ST0 ST2)").unwrap();
    original.set_fitness(Fitness { served_ratio: 0.5, makespan_score: 0.25 });
    original.set_ranking(1, 2.);

    let mut copy = original.clone();
    assert_eq!(copy.to_string(), original.to_string());
    assert_eq!(copy.fitness(), original.fitness());
    assert_eq!(copy.rank(), 1);
    assert_eq!(copy.crowding_distance(), 2.);

    copy.set_tree(GpTree::parse("RT0", Role::Routing).unwrap());
    assert_eq!(original.to_string(), "R: (add RT3 RT1) | S: (min ST0 ST2)");
    assert!(original.fitness().is_some());
}
