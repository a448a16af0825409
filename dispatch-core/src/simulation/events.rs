#[cfg(test)]
#[path = "../../tests/unit/simulation/events_test.rs"]
mod events_test;

use crate::models::{RequestId, Timestamp, VehicleId};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt::{Display, Formatter};

/// Specifies why a vehicle became free.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleAction {
    /// Pickup service has started.
    Pickup,
    /// Vehicle arrived at the depot or brought a request back.
    Return,
    /// A scheduled or pre-emptive wake up of a waiting vehicle.
    WakeUp,
}

impl Display for VehicleAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pickup => write!(f, "pickup"),
            Self::Return => write!(f, "return"),
            Self::WakeUp => write!(f, "wake_up"),
        }
    }
}

/// A simulation event type.
#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    /// A request is released.
    Arrive {
        /// Request id.
        request: RequestId,
        /// End of the request time window.
        deadline: Timestamp,
        /// Request demand.
        demand: f64,
    },
    /// A simulation horizon is reached.
    End,
    /// A vehicle can take a new decision.
    VehFree {
        /// Vehicle id.
        vehicle: VehicleId,
        /// Cause of the event.
        cause: VehicleAction,
        /// Request id for pickups and failed returns, served count for depot returns.
        detail: Option<usize>,
    },
}

impl EventKind {
    fn priority(&self) -> usize {
        match self {
            Self::Arrive { .. } => 0,
            Self::End => 1,
            Self::VehFree { .. } => 2,
        }
    }
}

/// A scheduled event.
#[derive(Clone, Debug)]
pub struct Event {
    /// Event time.
    pub time: Timestamp,
    /// Event type.
    pub kind: EventKind,
    sequence: u64,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.kind.priority().cmp(&other.kind.priority()))
            .then_with(|| match (&self.kind, &other.kind) {
                (
                    EventKind::Arrive { request: a_id, deadline: a_deadline, demand: a_demand },
                    EventKind::Arrive { request: b_id, deadline: b_deadline, demand: b_demand },
                ) => a_deadline
                    .total_cmp(b_deadline)
                    .then_with(|| b_demand.total_cmp(a_demand))
                    .then_with(|| a_id.cmp(b_id)),
                (EventKind::VehFree { vehicle: a, .. }, EventKind::VehFree { vehicle: b, .. }) => a.cmp(b),
                _ => Ordering::Equal,
            })
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

/// A min-priority queue of events: earlier time first, then ARRIVE before END before VEH_FREE,
/// arrivals by (deadline, larger demand, id) and vehicle events by (vehicle id, insertion order).
#[derive(Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Event>>,
    next_sequence: u64,
}

impl EventQueue {
    /// Schedules a new event.
    pub fn push(&mut self, time: Timestamp, kind: EventKind) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.heap.push(Reverse(Event { time, kind, sequence }));
    }

    /// Removes and returns the earliest event.
    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(event)| event)
    }

    /// Returns amount of scheduled events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no events are scheduled.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
