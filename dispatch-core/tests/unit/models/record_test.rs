use super::*;

const RECORD: &str = r#"
{
  "close": 480,
  "requests": [[10, 0, 2, 1, 0, 0, 100], [0, -20, 5, 0, 30, 40, 200]],
  "truck_num": 2,
  "truck_cap": 20,
  "truck_vel": 0.5,
  "drone_num": 1,
  "drone_cap": 2.5,
  "drone_vel": 1.5,
  "drone_lim": 60
}
"#;

#[test]
fn can_read_problem_from_record() {
    let record = ProblemRecord::from_json(RECORD).unwrap();

    let problem = Problem::try_from(record).unwrap();

    assert_eq!(problem.close(), 480.);
    assert_eq!(problem.requests().len(), 2);

    let first = problem.request(1).unwrap();
    assert_eq!(first.location, Location::new(10., 0.));
    assert_eq!(first.demand, 2.);
    assert!(first.drone_eligible);
    assert_eq!(first.release_time, 0.);
    assert_eq!(first.time_window, TimeWindow::new(0., 100.));
    assert_eq!(first.max_hold, DEFAULT_MAX_HOLD);

    let second = problem.request(2).unwrap();
    assert!(!second.drone_eligible);
    assert_eq!(second.release_time, 30.);
    assert_eq!(second.time_window, TimeWindow::new(40., 200.));

    let vehicles = problem.vehicles().iter().map(|vehicle| (vehicle.id, vehicle.kind_name())).collect::<Vec<_>>();
    assert_eq!(vehicles, vec![(1, "truck"), (2, "truck"), (3, "drone")]);
    assert_eq!(problem.vehicles()[2].remaining_range(), Some(60.));
    assert_eq!(problem.vehicles()[2].capacity, 2.5);
    assert_eq!(problem.vehicles()[0].speed, 0.5);
}

#[test]
fn can_read_record_without_drones() {
    let json = r#"{ "close": 100, "requests": [[1, 1, 1, 0, 0, 0, 10]], "truck_num": 1, "truck_cap": 5, "truck_vel": 1, "max_hold": 50 }"#;

    let problem = Problem::try_from(&ProblemRecord::from_json(json).unwrap()).unwrap();

    assert_eq!(problem.vehicles().len(), 1);
    assert_eq!(problem.requests()[0].max_hold, 50.);
}

parameterized_test! {can_reject_invalid_record, json, {
    let result = ProblemRecord::from_json(json).and_then(Problem::try_from);

    assert!(result.is_err());
}}

can_reject_invalid_record! {
    case01_malformed_json: r#"{ "close": 100, "requests": [[1, 1, 1, 0, 0, 0]] "#,
    case02_short_request: r#"{ "close": 100, "requests": [[1, 1, 1, 0, 0, 0]], "truck_num": 1, "truck_cap": 5, "truck_vel": 1 }"#,
    case03_missing_trucks: r#"{ "close": 100, "requests": [] }"#,
    case04_zero_close: r#"{ "close": 0, "requests": [], "truck_num": 1, "truck_cap": 5, "truck_vel": 1 }"#,
    case05_zero_speed: r#"{ "close": 10, "requests": [], "truck_num": 1, "truck_cap": 5, "truck_vel": 0 }"#,
    case06_inverted_window: r#"{ "close": 10, "requests": [[1, 1, 1, 0, 0, 9, 1]], "truck_num": 1, "truck_cap": 5, "truck_vel": 1 }"#,
}
