#[cfg(test)]
#[path = "../../tests/unit/simulation/validator_test.rs"]
mod validator_test;

use super::SimulationResult;
use crate::models::*;
use moea::prelude::GenericError;
use rustc_hash::FxHashSet;

/// Replays vehicle traces against the problem and checks travel time consistency, time windows at
/// pickup, drone eligibility and range, capacity, hold times and depot close at returns.
/// Returns all found violations.
pub fn validate_trace(problem: &Problem, result: &SimulationResult) -> Result<(), Vec<GenericError>> {
    let mut errors = Vec::new();
    let mut served = FxHashSet::default();

    for trace in result.vehicles.iter() {
        let Some(vehicle) = problem.vehicles().iter().find(|vehicle| vehicle.id == trace.id) else {
            errors.push(format!("unknown vehicle: {}", trace.id).into());
            continue;
        };

        let mut replay =
            TraceReplay { problem, vehicle: vehicle.reset(), picked: vec![], last_busy: 0., errors: &mut errors };

        for record in trace.trips.iter().flatten() {
            replay.check_movement(record);

            match record.action {
                ActionKind::Pickup => replay.check_pickup(record),
                ActionKind::ReturnDepot => served.extend(replay.check_return(record)),
                ActionKind::FailedReturn => replay.check_failed_return(record),
            }

            replay.check_snapshot(record);
        }
    }

    if served.len() != result.served {
        errors.push(format!("trace delivers {} request(s), result reports {}", served.len(), result.served).into());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

struct TraceReplay<'a> {
    problem: &'a Problem,
    vehicle: Vehicle,
    picked: Vec<(RequestId, Timestamp)>,
    last_busy: Timestamp,
    errors: &'a mut Vec<GenericError>,
}

impl TraceReplay<'_> {
    fn check_movement(&mut self, record: &ActionRecord) {
        let id = self.vehicle.id;

        if record.previous_location.distance(&self.vehicle.location) > EPSILON {
            self.error(format!("vehicle {id} starts moving from unexpected location at {}", record.ready_time));
        }

        let travel_time = self.vehicle.travel_time(&record.previous_location, &record.location);
        if (travel_time - record.travel_time).abs() > EPSILON {
            self.error(format!("vehicle {id} has travel time {} instead of {travel_time}", record.travel_time));
        }

        if record.ready_time + EPSILON < self.last_busy {
            self.error(format!("vehicle {id} starts at {} while busy until {}", record.ready_time, self.last_busy));
        }

        if (record.ready_time + record.travel_time - record.arrival_time).abs() > EPSILON {
            self.error(format!("vehicle {id} has inconsistent arrival time {}", record.arrival_time));
        }
    }

    fn check_pickup(&mut self, record: &ActionRecord) {
        let (id, problem) = (self.vehicle.id, self.problem);
        let Some(request) = record.request.and_then(|request_id| problem.request(request_id)) else {
            self.error(format!("vehicle {id} picks up unknown request"));
            return;
        };

        if self.vehicle.is_drone() && !request.drone_eligible {
            self.error(format!("drone {id} picks up ineligible request {}", request.id));
        }

        let service_start = record.service_start.unwrap_or(record.arrival_time);
        if service_start + EPSILON < record.arrival_time || !request.time_window.contains(service_start) {
            self.error(format!("request {} is picked up outside of its time window at {service_start}", request.id));
        }

        if self.vehicle.remaining_range().is_some_and(|range| range + EPSILON < record.travel_time) {
            self.error(format!("drone {id} runs out of range flying to request {}", request.id));
        }

        self.vehicle.consume_range(record.travel_time);
        self.vehicle.remaining_capacity -= request.demand;
        if self.vehicle.remaining_capacity < -EPSILON {
            self.error(format!("vehicle {id} exceeds its capacity picking up request {}", request.id));
        }

        self.picked.push((request.id, service_start));
        self.last_busy = service_start;
    }

    fn check_return(&mut self, record: &ActionRecord) -> Vec<RequestId> {
        let id = self.vehicle.id;

        if !record.location.is_depot() {
            self.error(format!("vehicle {id} returns to a location other than the depot"));
        }

        if !self.picked.is_empty() && record.arrival_time > self.problem.close() + EPSILON {
            self.error(format!("vehicle {id} returns at {} after the depot is closed", record.arrival_time));
        }

        let picked = std::mem::take(&mut self.picked);
        for &(request_id, pickup_time) in picked.iter() {
            let max_hold = self.problem.request(request_id).map_or(DEFAULT_MAX_HOLD, |request| request.max_hold);
            if record.arrival_time - pickup_time > max_hold + EPSILON {
                self.error(format!("request {request_id} is held by vehicle {id} longer than {max_hold}"));
            }
        }

        if self.vehicle.remaining_range().is_some_and(|range| range + EPSILON < record.travel_time) {
            self.error(format!("drone {id} runs out of range returning to the depot"));
        }

        self.vehicle.recharge();
        self.vehicle.remaining_capacity = self.vehicle.capacity;
        self.last_busy = record.arrival_time;

        picked.into_iter().map(|(request_id, _)| request_id).collect()
    }

    fn check_failed_return(&mut self, record: &ActionRecord) {
        let (id, problem) = (self.vehicle.id, self.problem);
        let Some(request) = record.request.and_then(|request_id| problem.request(request_id)) else {
            self.error(format!("vehicle {id} returns unknown request"));
            return;
        };

        match self.picked.iter().position(|(request_id, _)| *request_id == request.id) {
            Some(position) => {
                self.picked.remove(position);
                self.vehicle.remaining_capacity += request.demand;
            }
            None => self.error(format!("vehicle {id} returns request {} which is not on board", request.id)),
        }

        self.vehicle.consume_range(record.travel_time);
        self.last_busy = record.arrival_time;
    }

    fn check_snapshot(&mut self, record: &ActionRecord) {
        if (record.vehicle_state.remaining_capacity - self.vehicle.remaining_capacity).abs() > EPSILON {
            let id = self.vehicle.id;
            self.error(format!(
                "vehicle {id} reports remaining capacity {} instead of {} at {}",
                record.vehicle_state.remaining_capacity, self.vehicle.remaining_capacity, record.arrival_time
            ));
        }

        self.vehicle.location = record.location;
    }

    fn error(&mut self, message: String) {
        self.errors.push(message.into());
    }
}
