use super::*;
use crate::helpers::models::*;

#[test]
fn can_create_problem_with_request_index() {
    let problem = create_problem(
        vec![create_request(3, (1., 1.), 2., 0., (0., 10.)), create_request(1, (2., 2.), 3., 0., (0., 10.))],
        vec![Vehicle::truck(1, 10., 1.)],
    );

    assert_eq!(problem.requests().len(), 2);
    assert_eq!(problem.request(1).map(|request| request.demand), Some(3.));
    assert_eq!(problem.request(3).map(|request| request.demand), Some(2.));
    assert!(problem.request(2).is_none());
    assert_eq!(problem.total_demand(), 5.);
}

parameterized_test! {can_validate_problem, (requests, vehicles, close, expected), {
    let result = Problem::new(requests, vehicles, close);

    assert_eq!(result.is_ok(), expected);
}}

can_validate_problem! {
    case01_valid: (vec![create_request(1, (1., 1.), 2., 0., (0., 10.))], vec![Vehicle::truck(1, 10., 1.)], 10., true),
    case02_no_requests: (vec![], vec![Vehicle::truck(1, 10., 1.)], 10., true),
    case03_zero_close: (vec![], vec![Vehicle::truck(1, 10., 1.)], 0., false),
    case04_infinite_close: (vec![], vec![Vehicle::truck(1, 10., 1.)], f64::INFINITY, false),
    case05_zero_speed: (vec![], vec![Vehicle::truck(1, 10., 0.)], 10., false),
    case06_negative_capacity: (vec![], vec![Vehicle::truck(1, -1., 1.)], 10., false),
    case07_negative_range: (vec![], vec![Vehicle::drone(1, 1., 1., -1.)], 10., false),
    case08_duplicate_vehicle: (vec![], vec![Vehicle::truck(1, 10., 1.), Vehicle::drone(1, 1., 1., 1.)], 10., false),
    case09_duplicate_request: (
        vec![create_request(1, (1., 1.), 2., 0., (0., 10.)), create_request(1, (2., 1.), 2., 0., (0., 10.))],
        vec![Vehicle::truck(1, 10., 1.)], 10., false
    ),
    case10_negative_demand: (vec![create_request(1, (1., 1.), -2., 0., (0., 10.))], vec![Vehicle::truck(1, 10., 1.)], 10., false),
    case11_inverted_window: (vec![create_request(1, (1., 1.), 2., 0., (10., 0.))], vec![Vehicle::truck(1, 10., 1.)], 10., false),
    case12_nan_location: (vec![create_request(1, (f64::NAN, 1.), 2., 0., (0., 10.))], vec![Vehicle::truck(1, 10., 1.)], 10., false),
    case13_negative_hold: (
        vec![create_request(1, (1., 1.), 2., 0., (0., 10.)).with_max_hold(-1.)],
        vec![Vehicle::truck(1, 10., 1.)], 10., false
    ),
}

#[test]
fn can_add_and_replace_requests() {
    let mut problem = create_single_truck_problem(vec![], 10.);

    problem.add_request(create_request(1, (1., 1.), 2., 0., (0., 10.)));
    problem.add_request(create_request(2, (1., 1.), 3., 0., (0., 10.)));
    assert_eq!(problem.total_demand(), 5.);

    problem.add_request(create_request(1, (1., 1.), 4., 0., (0., 10.)));
    assert_eq!(problem.requests().len(), 2);
    assert_eq!(problem.total_demand(), 7.);
    assert_eq!(problem.request(1).map(|request| request.demand), Some(4.));
}

#[test]
fn can_get_queue_statistics() {
    let problem = create_single_truck_problem(
        vec![
            create_request(1, (2., 0.), 2., 0., (0., 10.)),
            create_request(2, (0., 4.), 3., 0., (0., 10.)),
            create_request(3, (9., 9.), 5., 0., (0., 10.)),
        ],
        10.,
    );
    let mut vehicle = problem.vehicles()[0].clone();

    assert_eq!(problem.queued_demand(&vehicle), 0.);
    assert_eq!(problem.queue_centroid(&vehicle), None);

    vehicle.queue = vec![1, 2];
    assert_eq!(problem.queued_demand(&vehicle), 5.);
    assert_eq!(problem.queue_centroid(&vehicle), Some(Location::new(1., 2.)));
}

#[test]
fn can_create_empty_copy_with_reset_vehicles() {
    let mut problem = create_single_truck_problem(vec![create_request(1, (2., 0.), 2., 0., (0., 10.))], 10.);
    problem.vehicles_mut()[0].busy_until = 5.;
    problem.vehicles_mut()[0].queue.push(1);

    let copy = problem.empty_copy();

    assert!(copy.requests().is_empty());
    assert_eq!(copy.total_demand(), 0.);
    assert_eq!(copy.close(), problem.close());
    assert_eq!(copy.vehicles().len(), 1);
    assert_eq!(copy.vehicles()[0].busy_until, 0.);
    assert!(copy.vehicles()[0].queue.is_empty());
}
