#[cfg(test)]
#[path = "../../tests/unit/models/record_test.rs"]
mod record_test;

use crate::models::{DEFAULT_MAX_HOLD, Location, Problem, Request, TimeWindow, Vehicle};
use moea::prelude::{GenericError, GenericResult};
use serde::{Deserialize, Serialize};

/// A request tuple: `x, y, demand, drone eligible (0 or 1), release, window start, window end`.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct RequestRecord(pub f64, pub f64, pub f64, pub f64, pub f64, pub f64, pub f64);

/// A serializable problem definition.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProblemRecord {
    /// Depot close time.
    pub close: f64,
    /// Requests in release order, ids are assigned one based in this order.
    pub requests: Vec<RequestRecord>,
    /// Amount of trucks.
    pub truck_num: usize,
    /// Truck capacity.
    pub truck_cap: f64,
    /// Truck speed.
    pub truck_vel: f64,
    /// Amount of drones.
    #[serde(default)]
    pub drone_num: usize,
    /// Drone capacity.
    #[serde(default)]
    pub drone_cap: f64,
    /// Drone speed.
    #[serde(default)]
    pub drone_vel: f64,
    /// Drone flight range.
    #[serde(default)]
    pub drone_lim: f64,
    /// Maximum hold time applied to all requests.
    #[serde(default = "default_max_hold")]
    pub max_hold: f64,
}

fn default_max_hold() -> f64 {
    DEFAULT_MAX_HOLD
}

impl ProblemRecord {
    /// Reads problem record from json string.
    pub fn from_json(json: &str) -> GenericResult<Self> {
        serde_json::from_str(json).map_err(|err| format!("cannot read problem record: {err}").into())
    }
}

impl TryFrom<&ProblemRecord> for Problem {
    type Error = GenericError;

    fn try_from(record: &ProblemRecord) -> Result<Self, Self::Error> {
        let requests = record
            .requests
            .iter()
            .enumerate()
            .map(|(idx, &RequestRecord(x, y, demand, eligible, release, start, end))| {
                Request::new(idx + 1, Location::new(x, y), demand, eligible != 0., release, TimeWindow::new(start, end))
                    .with_max_hold(record.max_hold)
            })
            .collect();

        let trucks = (1..=record.truck_num).map(|id| Vehicle::truck(id, record.truck_cap, record.truck_vel));
        let drones = (1..=record.drone_num)
            .map(|idx| Vehicle::drone(record.truck_num + idx, record.drone_cap, record.drone_vel, record.drone_lim));

        Problem::new(requests, trucks.chain(drones).collect(), record.close)
            .map_err(|err| err.context("invalid problem record"))
    }
}

impl TryFrom<ProblemRecord> for Problem {
    type Error = GenericError;

    fn try_from(record: ProblemRecord) -> Result<Self, Self::Error> {
        Problem::try_from(&record)
    }
}
