use super::*;
use crate::algorithms::nsga2::non_dominated_sort;
use crate::helpers::algorithms::nsga2::SliceMultiObjective;

fn get_distances(solutions: &[Vec<f64>]) -> Vec<f64> {
    let objective = SliceMultiObjective::with_dimensions(2);
    let fronts = non_dominated_sort(solutions, &objective);
    assert_eq!(fronts.len(), 1);

    assign_crowding_distance(&fronts[0], solutions, &objective).into_iter().map(|a| a.crowding_distance).collect()
}

#[test]
fn can_assign_infinite_distance_to_extremes() {
    let distances = get_distances(&[vec![1., 5.], vec![2., 3.], vec![4., 1.]]);

    assert_eq!(distances[0], f64::INFINITY);
    assert_eq!(distances[2], f64::INFINITY);
    assert!((distances[1] - 2.).abs() < 1E-9);
}

#[test]
fn can_normalize_by_objective_spread() {
    let distances = get_distances(&[vec![0., 10.], vec![1., 8.], vec![3., 2.], vec![4., 0.]]);

    // first objective: spread 4, second: spread 10
    assert!((distances[1] - (3. / 4. + 8. / 10.)).abs() < 1E-9);
    assert!((distances[2] - (3. / 4. + 8. / 10.)).abs() < 1E-9);
}

#[test]
fn can_skip_objective_with_zero_spread() {
    let objective = SliceMultiObjective::with_dimensions(2);
    let solutions = vec![vec![1., 3.], vec![1., 2.], vec![1., 1.]];
    let front = Front { rank: 0, indices: vec![0, 1, 2] };

    let distances = assign_crowding_distance(&front, &solutions, &objective);

    assert_eq!(distances[0].crowding_distance, f64::INFINITY);
    assert!((distances[1].crowding_distance - 1.).abs() < 1E-9);
    assert_eq!(distances[2].crowding_distance, f64::INFINITY);
}

#[test]
fn can_assign_infinite_distance_to_single_and_pair_fronts() {
    assert_eq!(get_distances(&[vec![1., 1.]]), vec![f64::INFINITY]);
    assert_eq!(get_distances(&[vec![1., 2.], vec![2., 1.]]), vec![f64::INFINITY, f64::INFINITY]);
}
