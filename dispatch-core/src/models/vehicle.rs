#[cfg(test)]
#[path = "../../tests/unit/models/vehicle_test.rs"]
mod vehicle_test;

use crate::models::{EPSILON, Location, RequestId, Timestamp, Trip};

/// Specifies vehicle type.
#[derive(Clone, Debug, PartialEq)]
pub enum VehicleKind {
    /// A ground vehicle without range limit.
    Truck,
    /// A flying vehicle which range is consumed per unit of travel time and restored at the depot.
    Drone {
        /// Maximum flight range.
        max_range: f64,
        /// Remaining flight range, never negative.
        remaining_range: f64,
    },
}

/// Represents a vehicle with its simulation state.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// Vehicle identity.
    pub id: usize,
    /// Vehicle type.
    pub kind: VehicleKind,
    /// Maximum load.
    pub capacity: f64,
    /// Speed used to convert distance into travel time.
    pub speed: f64,

    /// Current location.
    pub location: Location,
    /// Capacity minus demand of picked up requests.
    pub remaining_capacity: f64,
    /// Requests assigned to the vehicle but not picked up yet.
    pub queue: Vec<RequestId>,
    /// Requests on board.
    pub picked_up: Vec<RequestId>,
    /// Time when vehicle finishes its current commitment.
    pub busy_until: Timestamp,
    /// Completed and ongoing trips.
    pub trips: Vec<Trip>,
}

impl Vehicle {
    /// Creates a new truck located at the depot.
    pub fn truck(id: usize, capacity: f64, speed: f64) -> Self {
        Self::new(id, VehicleKind::Truck, capacity, speed)
    }

    /// Creates a new drone located at the depot with full range.
    pub fn drone(id: usize, capacity: f64, speed: f64, max_range: f64) -> Self {
        Self::new(id, VehicleKind::Drone { max_range, remaining_range: max_range }, capacity, speed)
    }

    fn new(id: usize, kind: VehicleKind, capacity: f64, speed: f64) -> Self {
        Self {
            id,
            kind,
            capacity,
            speed,
            location: Location::DEPOT,
            remaining_capacity: capacity,
            queue: vec![],
            picked_up: vec![],
            busy_until: 0.,
            trips: vec![],
        }
    }

    /// Returns a copy in the initial state: at the depot, empty and idle.
    pub fn reset(&self) -> Self {
        let kind = match self.kind {
            VehicleKind::Truck => VehicleKind::Truck,
            VehicleKind::Drone { max_range, .. } => VehicleKind::Drone { max_range, remaining_range: max_range },
        };

        Self::new(self.id, kind, self.capacity, self.speed)
    }

    /// Returns true if vehicle is a drone.
    pub fn is_drone(&self) -> bool {
        matches!(self.kind, VehicleKind::Drone { .. })
    }

    /// Returns a type name of the vehicle.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            VehicleKind::Truck => "truck",
            VehicleKind::Drone { .. } => "drone",
        }
    }

    /// Returns true if vehicle is at the depot.
    pub fn is_at_depot(&self) -> bool {
        self.location.is_depot()
    }

    /// Returns remaining flight range for drones.
    pub fn remaining_range(&self) -> Option<f64> {
        match self.kind {
            VehicleKind::Truck => None,
            VehicleKind::Drone { remaining_range, .. } => Some(remaining_range),
        }
    }

    /// Returns travel time between two locations.
    pub fn travel_time(&self, from: &Location, to: &Location) -> f64 {
        from.distance(to) / self.speed
    }

    /// Returns travel time from the current location.
    pub fn travel_time_to(&self, to: &Location) -> f64 {
        self.travel_time(&self.location, to)
    }

    /// Checks whether vehicle can reach the location and fly back to the depot from there.
    /// Always true for trucks.
    pub fn can_fly_to(&self, location: &Location) -> bool {
        self.remaining_range().is_none_or(|range| {
            range + EPSILON >= self.travel_time_to(location) + self.travel_time(location, &Location::DEPOT)
        })
    }

    /// Consumes flight range, clamps it at zero.
    pub(crate) fn consume_range(&mut self, travel_time: f64) {
        if let VehicleKind::Drone { remaining_range, .. } = &mut self.kind {
            *remaining_range = (*remaining_range - travel_time).max(0.);
        }
    }

    /// Restores flight range.
    pub(crate) fn recharge(&mut self) {
        if let VehicleKind::Drone { max_range, remaining_range } = &mut self.kind {
            *remaining_range = *max_range;
        }
    }
}
