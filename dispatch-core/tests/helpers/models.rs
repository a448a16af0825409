use crate::gp::Individual;
use crate::models::{Location, Problem, Request, TimeWindow, Vehicle};

pub const DEFAULT_CLOSE: f64 = 100.;

pub fn create_request(id: usize, location: (f64, f64), demand: f64, release: f64, time_window: (f64, f64)) -> Request {
    let time_window = TimeWindow::new(time_window.0, time_window.1);

    Request::new(id, Location::new(location.0, location.1), demand, false, release, time_window)
}

pub fn create_drone_request(
    id: usize,
    location: (f64, f64),
    demand: f64,
    release: f64,
    time_window: (f64, f64),
) -> Request {
    Request { drone_eligible: true, ..create_request(id, location, demand, release, time_window) }
}

pub fn create_problem(requests: Vec<Request>, vehicles: Vec<Vehicle>) -> Problem {
    Problem::new(requests, vehicles, DEFAULT_CLOSE).expect("cannot create problem")
}

pub fn create_single_truck_problem(requests: Vec<Request>, capacity: f64) -> Problem {
    create_problem(requests, vec![Vehicle::truck(1, capacity, 10.)])
}

/// Prefers close trucks, serves queued requests by travel time and slack.
pub fn create_test_individual() -> Individual {
    Individual::parse("(sub RT3 RT5)", "(add ST0 ST2)").expect("cannot parse individual")
}

/// Creates a problem with two trucks, two drones and scattered requests released during the day.
pub fn create_mixed_fleet_problem(size: usize) -> Problem {
    let requests = (1..=size)
        .map(|id| {
            let x = ((id * 37) % 100) as f64 - 49.5;
            let y = ((id * 53) % 100) as f64 - 49.5;
            let demand = (1 + id % 5) as f64;
            let release = ((id * 13) % 200) as f64;
            let start = release + ((id % 3) * 10) as f64;
            let end = start + 60. + ((id % 4) * 20) as f64;

            Request { drone_eligible: id % 2 == 0, ..create_request(id, (x, y), demand, release, (start, end)) }
        })
        .collect();
    let vehicles = vec![
        Vehicle::truck(1, 10., 2.),
        Vehicle::truck(2, 10., 2.),
        Vehicle::drone(3, 3., 4., 60.),
        Vehicle::drone(4, 3., 4., 60.),
    ];

    Problem::new(requests, vehicles, 400.).expect("cannot create problem")
}
