#[cfg(test)]
#[path = "../../tests/unit/models/problem_test.rs"]
mod problem_test;

use crate::models::{Location, Request, RequestId, Timestamp, Vehicle};
use moea::prelude::GenericResult;
use rustc_hash::{FxHashMap, FxHashSet};

/// Represents a dispatching problem: requests, fleet and the depot time window `[0, close]`.
/// The depot is located at the origin.
#[derive(Clone, Debug)]
pub struct Problem {
    requests: Vec<Request>,
    index: FxHashMap<RequestId, usize>,
    total_demand: f64,
    vehicles: Vec<Vehicle>,
    close: Timestamp,
}

impl Problem {
    /// Creates a new instance of `Problem` validating its structure.
    pub fn new(requests: Vec<Request>, vehicles: Vec<Vehicle>, close: Timestamp) -> GenericResult<Self> {
        if !close.is_finite() || close <= 0. {
            return Err(format!("depot close time must be positive, got: {close}").into());
        }

        let mut vehicle_ids = FxHashSet::default();
        for vehicle in vehicles.iter() {
            if !vehicle_ids.insert(vehicle.id) {
                return Err(format!("duplicate vehicle id: {}", vehicle.id).into());
            }

            if !vehicle.speed.is_finite() || vehicle.speed <= 0. {
                return Err(format!("vehicle {} has non positive speed: {}", vehicle.id, vehicle.speed).into());
            }

            if !vehicle.capacity.is_finite() || vehicle.capacity < 0. {
                return Err(format!("vehicle {} has invalid capacity: {}", vehicle.id, vehicle.capacity).into());
            }

            if vehicle.remaining_range().is_some_and(|range| !range.is_finite() || range < 0.) {
                return Err(format!("drone {} has invalid range", vehicle.id).into());
            }
        }

        let mut problem = Self { requests: vec![], index: FxHashMap::default(), total_demand: 0., vehicles, close };
        for request in requests {
            validate_request(&request)?;

            if problem.index.contains_key(&request.id) {
                return Err(format!("duplicate request id: {}", request.id).into());
            }

            problem.add_request(request);
        }

        Ok(problem)
    }

    /// Returns a copy of the problem without requests and with all vehicles in their initial state.
    pub fn empty_copy(&self) -> Self {
        Self {
            requests: vec![],
            index: FxHashMap::default(),
            total_demand: 0.,
            vehicles: self.vehicles.iter().map(|vehicle| vehicle.reset()).collect(),
            close: self.close,
        }
    }

    /// Returns depot close time.
    pub fn close(&self) -> Timestamp {
        self.close
    }

    /// Returns all requests in insertion order.
    pub fn requests(&self) -> &[Request] {
        self.requests.as_slice()
    }

    /// Returns request by its id.
    pub fn request(&self, id: RequestId) -> Option<&Request> {
        self.index.get(&id).map(|&idx| &self.requests[idx])
    }

    pub(crate) fn request_mut(&mut self, id: RequestId) -> Option<&mut Request> {
        self.index.get(&id).map(|&idx| &mut self.requests[idx])
    }

    /// Adds the request or replaces the one with the same id.
    pub(crate) fn add_request(&mut self, request: Request) {
        match self.index.get(&request.id) {
            Some(&idx) => {
                self.total_demand += request.demand - self.requests[idx].demand;
                self.requests[idx] = request;
            }
            None => {
                self.total_demand += request.demand;
                self.index.insert(request.id, self.requests.len());
                self.requests.push(request);
            }
        }
    }

    /// Returns total demand of all requests.
    pub fn total_demand(&self) -> f64 {
        self.total_demand
    }

    /// Returns vehicles, trucks go first.
    pub fn vehicles(&self) -> &[Vehicle] {
        self.vehicles.as_slice()
    }

    pub(crate) fn vehicles_mut(&mut self) -> &mut [Vehicle] {
        self.vehicles.as_mut_slice()
    }

    /// Returns total demand of requests queued on the vehicle.
    pub fn queued_demand(&self, vehicle: &Vehicle) -> f64 {
        vehicle.queue.iter().filter_map(|&id| self.request(id)).map(|request| request.demand).sum()
    }

    /// Returns mean location of requests queued on the vehicle.
    pub fn queue_centroid(&self, vehicle: &Vehicle) -> Option<Location> {
        let (count, x, y) = vehicle
            .queue
            .iter()
            .filter_map(|&id| self.request(id))
            .fold((0_usize, 0., 0.), |(count, x, y), request| {
                (count + 1, x + request.location.x, y + request.location.y)
            });

        (count > 0).then(|| Location::new(x / count as f64, y / count as f64))
    }
}

fn validate_request(request: &Request) -> GenericResult<()> {
    let is_finite = [request.location.x, request.location.y, request.demand, request.release_time, request.max_hold]
        .iter()
        .chain([request.time_window.start, request.time_window.end].iter())
        .all(|value| value.is_finite());

    if !is_finite {
        return Err(format!("request {} has non finite values", request.id).into());
    }

    if request.demand < 0. {
        return Err(format!("request {} has negative demand: {}", request.id, request.demand).into());
    }

    if request.time_window.start > request.time_window.end {
        return Err(format!(
            "request {} has invalid time window: [{}, {}]",
            request.id, request.time_window.start, request.time_window.end
        )
        .into());
    }

    if request.max_hold < 0. {
        return Err(format!("request {} has negative max hold time", request.id).into());
    }

    Ok(())
}
