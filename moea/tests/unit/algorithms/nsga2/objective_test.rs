use super::*;
use crate::helpers::algorithms::nsga2::SliceMultiObjective;

parameterized_test! {can_get_dominance_order, (a, b, expected), {
    can_get_dominance_order_impl(a, b, expected);
}}

can_get_dominance_order! {
    case01_dominates: (vec![1., 1.], vec![2., 2.], Ordering::Less),
    case02_dominates_with_tie: (vec![1., 2.], vec![1., 3.], Ordering::Less),
    case03_dominated: (vec![3., 2.], vec![2., 2.], Ordering::Greater),
    case04_incomparable: (vec![1., 3.], vec![3., 1.], Ordering::Equal),
    case05_same: (vec![2., 2.], vec![2., 2.], Ordering::Equal),
}

fn can_get_dominance_order_impl(a: Vec<f64>, b: Vec<f64>, expected: Ordering) {
    let objective = SliceMultiObjective::with_dimensions(2);

    assert_eq!(dominance_order(&a, &b, objective.objectives()), expected);
    assert_eq!(objective.total_order(&a, &b), expected);
    assert_eq!(objective.total_order(&b, &a), expected.reverse());
}
