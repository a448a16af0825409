use crate::gp::Fitness;
use crate::models::{Problem, RequestId, Timestamp, Trip, VehicleId};
use moea::prelude::GenericResult;
use serde::Serialize;

/// A trace of a single vehicle.
#[derive(Clone, Debug, Serialize)]
pub struct VehicleTrace {
    /// Vehicle id.
    pub id: VehicleId,
    /// Vehicle type name.
    pub kind: &'static str,
    /// Trips in execution order.
    pub trips: Vec<Trip>,
    /// Time when vehicle finished its last commitment.
    pub completion_time: Timestamp,
}

/// A result of a single simulation run.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationResult {
    /// Amount of requests arrived before the horizon.
    pub total: usize,
    /// Amount of delivered requests.
    pub served: usize,
    /// Amount of requests which were not delivered.
    pub unserved: usize,
    /// Latest completion time over all vehicles.
    pub makespan: Timestamp,
    /// Served fraction, the first objective.
    pub served_ratio: f64,
    /// One minus normalized makespan, the second objective.
    pub makespan_score: f64,
    /// Ids of requests which were not delivered.
    pub unserved_requests: Vec<RequestId>,
    /// Per vehicle traces.
    pub vehicles: Vec<VehicleTrace>,
    /// Event log, only when logging is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    /// A final state of the simulated problem.
    #[serde(skip)]
    pub simulated: Problem,
}

impl SimulationResult {
    /// Returns objective values.
    pub fn fitness(&self) -> Fitness {
        Fitness { served_ratio: self.served_ratio, makespan_score: self.makespan_score }
    }

    /// Serializes result into json string.
    pub fn to_json(&self) -> GenericResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| format!("cannot serialize simulation result: {err}").into())
    }
}
