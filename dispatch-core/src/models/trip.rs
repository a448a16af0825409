use crate::models::{Location, RequestId, Timestamp};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Specifies an action performed by a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Vehicle picked up a request.
    Pickup,
    /// Vehicle returned to the depot and dropped off all picked up requests.
    ReturnDepot,
    /// Vehicle brought a picked up request back to its location.
    FailedReturn,
}

/// Specifies why a picked up request has to be brought back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Drop-off at the depot would exceed the maximum hold time.
    HoldTimeExceeded,
    /// Drop-off at the depot would happen after the depot is closed.
    DepotClosed,
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HoldTimeExceeded => write!(f, "hold time exceeded"),
            Self::DepotClosed => write!(f, "depot time window violated"),
        }
    }
}

/// Vehicle state right after the action is committed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VehicleSnapshot {
    /// Time when vehicle becomes free.
    pub busy_until: Timestamp,
    /// Remaining capacity.
    pub remaining_capacity: f64,
    /// Remaining flight range, drones only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_range: Option<f64>,
}

/// A timestamped record of a vehicle action.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActionRecord {
    /// Action type.
    pub action: ActionKind,
    /// Request involved in the action, none for depot returns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestId>,
    /// Time when vehicle starts moving.
    pub ready_time: Timestamp,
    /// Travel duration.
    pub travel_time: f64,
    /// Arrival time at the action location.
    pub arrival_time: Timestamp,
    /// Service start, pickups only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_start: Option<Timestamp>,
    /// Action location.
    pub location: Location,
    /// Vehicle location before the action.
    pub previous_location: Location,
    /// Vehicle state after the action.
    pub vehicle_state: VehicleSnapshot,
    /// Failure reason, failed returns only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<FailureReason>,
}

/// A trip is a sequence of actions which starts when vehicle leaves the depot.
pub type Trip = Vec<ActionRecord>;
