use serde::Serialize;

/// Specifies request identity, one based in input order.
pub type RequestId = usize;

/// Specifies vehicle identity: trucks go first, then drones.
pub type VehicleId = usize;

/// Specifies time in seconds since the depot opening.
pub type Timestamp = f64;

/// Default maximum on-vehicle hold time (seconds between pickup and drop-off at the depot).
pub const DEFAULT_MAX_HOLD: f64 = 3600.;

/// A tolerance used for time, capacity and range comparisons.
pub const EPSILON: f64 = 1E-6;

/// Represents a point on a plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Location {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Location {
    /// A depot location.
    pub const DEPOT: Location = Location { x: 0., y: 0. };

    /// Creates a new instance of `Location`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns euclidean distance to other location.
    pub fn distance(&self, other: &Location) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns true if location is the depot.
    pub fn is_depot(&self) -> bool {
        self.distance(&Self::DEPOT) < EPSILON
    }
}

/// Represents a time window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimeWindow {
    /// Earliest service start.
    pub start: Timestamp,
    /// Latest service start.
    pub end: Timestamp,
}

impl TimeWindow {
    /// Creates a new instance of `TimeWindow`.
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Checks whether given time is inside of the window with tolerance.
    pub fn contains(&self, time: Timestamp) -> bool {
        time >= self.start - EPSILON && time <= self.end + EPSILON
    }
}
