use super::*;

#[test]
fn can_create_vehicles_at_depot() {
    let truck = Vehicle::truck(1, 10., 2.);
    let drone = Vehicle::drone(2, 5., 4., 30.);

    assert!(truck.is_at_depot() && drone.is_at_depot());
    assert!(!truck.is_drone());
    assert!(drone.is_drone());
    assert_eq!(truck.kind_name(), "truck");
    assert_eq!(drone.kind_name(), "drone");
    assert_eq!(truck.remaining_range(), None);
    assert_eq!(drone.remaining_range(), Some(30.));
    assert_eq!(drone.remaining_capacity, 5.);
}

#[test]
fn can_calculate_travel_time() {
    let mut truck = Vehicle::truck(1, 10., 10.);

    assert_eq!(truck.travel_time_to(&Location::new(30., 40.)), 5.);

    truck.location = Location::new(30., 40.);
    assert_eq!(truck.travel_time_to(&Location::new(30., 20.)), 2.);
    assert_eq!(truck.travel_time(&Location::DEPOT, &Location::new(0., 5.)), 0.5);
}

parameterized_test! {can_check_flight_range, (range, location, expected), {
    let drone = Vehicle::drone(1, 5., 10., range);

    assert_eq!(drone.can_fly_to(&Location::new(location.0, location.1)), expected);
}}

can_check_flight_range! {
    case01_enough: (10., (30., 40.), true),
    case02_exact: (10., (0., 50.), true),
    case03_not_enough: (9.9, (30., 40.), false),
    case04_zero_range: (0., (3., 4.), false),
    case05_depot: (0., (0., 0.), true),
}

#[test]
fn can_always_reach_location_with_truck() {
    let truck = Vehicle::truck(1, 10., 1.);

    assert!(truck.can_fly_to(&Location::new(1E6, 1E6)));
}

#[test]
fn can_consume_and_recharge_range() {
    let mut drone = Vehicle::drone(1, 5., 10., 10.);

    drone.consume_range(4.);
    assert_eq!(drone.remaining_range(), Some(6.));

    drone.consume_range(7.);
    assert_eq!(drone.remaining_range(), Some(0.));

    drone.recharge();
    assert_eq!(drone.remaining_range(), Some(10.));
}

#[test]
fn can_reset_vehicle_state() {
    let mut drone = Vehicle::drone(3, 5., 10., 10.);
    drone.location = Location::new(1., 1.);
    drone.remaining_capacity = 1.;
    drone.queue.push(1);
    drone.picked_up.push(2);
    drone.busy_until = 10.;
    drone.consume_range(5.);

    let reset = drone.reset();

    assert_eq!(reset.id, 3);
    assert!(reset.is_at_depot());
    assert_eq!(reset.remaining_capacity, 5.);
    assert!(reset.queue.is_empty() && reset.picked_up.is_empty() && reset.trips.is_empty());
    assert_eq!(reset.busy_until, 0.);
    assert_eq!(reset.remaining_range(), Some(10.));
}
