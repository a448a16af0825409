use crate::models::{DEFAULT_MAX_HOLD, Location, RequestId, TimeWindow, Timestamp};

/// Represents a pickup request which has to be brought to the depot.
#[derive(Clone, Debug)]
pub struct Request {
    /// Request identity.
    pub id: RequestId,
    /// Pickup location.
    pub location: Location,
    /// Amount of goods to pick up.
    pub demand: f64,
    /// Whether a drone is allowed to serve the request.
    pub drone_eligible: bool,
    /// Time when the request becomes known.
    pub release_time: Timestamp,
    /// Pickup time window.
    pub time_window: TimeWindow,
    /// Maximum time between pickup and drop-off at the depot.
    pub max_hold: f64,

    /// True when request is on board of some vehicle.
    pub is_picked_up: bool,
    /// True when request was dropped off at the depot.
    pub is_served: bool,
    /// A service start of the pickup.
    pub pickup_time: Option<Timestamp>,
}

impl Request {
    /// Creates a new instance of `Request` in its initial state with default hold time.
    pub fn new(
        id: RequestId,
        location: Location,
        demand: f64,
        drone_eligible: bool,
        release_time: Timestamp,
        time_window: TimeWindow,
    ) -> Self {
        Self {
            id,
            location,
            demand,
            drone_eligible,
            release_time,
            time_window,
            max_hold: DEFAULT_MAX_HOLD,
            is_picked_up: false,
            is_served: false,
            pickup_time: None,
        }
    }

    /// Sets maximum hold time.
    pub fn with_max_hold(mut self, max_hold: f64) -> Self {
        self.max_hold = max_hold;
        self
    }

    /// Returns true when request is neither on board nor delivered.
    pub fn is_open(&self) -> bool {
        !self.is_picked_up && !self.is_served
    }

    /// Returns a copy with simulation state reset.
    pub fn reset(&self) -> Self {
        Self { is_picked_up: false, is_served: false, pickup_time: None, ..self.clone() }
    }

    /// Rolls back the pickup.
    pub(crate) fn unpick(&mut self) {
        self.is_picked_up = false;
        self.pickup_time = None;
    }
}
