#[cfg(test)]
#[path = "../../tests/unit/simulation/simulator_test.rs"]
mod simulator_test;

use super::*;
use crate::models::*;
use moea::prelude::compare_floats;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Scores are clamped to this range, NaN is mapped to its worst end.
const SCORE_LIMIT: f64 = 1E15;

/// A tolerance used to compare policy scores.
const SCORE_EPSILON: f64 = 1E-9;

/// A vehicle which can serve a request with its combined score.
struct Candidate {
    vehicle: usize,
    combined: f64,
    arrival_time: Timestamp,
}

/// A feasible pickup from the vehicle's queue.
struct PickupOption {
    request: RequestId,
    score: f64,
    travel_time: f64,
    window_start: Timestamp,
}

/// A vehicle idling at the depot until the time it has to leave for its best request.
struct WaitingState {
    wake_time: Timestamp,
    score: f64,
}

/// Simulates dispatching decisions of a single policy over the problem horizon.
///
/// Owns a private copy of the problem which request list grows as requests are released, so the
/// source problem is never mutated and concurrent simulations never share mutable state.
pub struct Simulator<'a> {
    source: &'a Problem,
    individual: &'a Individual,
    settings: &'a SimulationSettings,
    problem: Problem,
    vehicle_index: FxHashMap<VehicleId, usize>,
    events: EventQueue,
    pending: Vec<RequestId>,
    waiting: Vec<Option<WaitingState>>,
    now: Timestamp,
    log: Option<Vec<String>>,
}

impl<'a> Simulator<'a> {
    /// Creates a new instance of `Simulator`.
    pub fn new(source: &'a Problem, individual: &'a Individual, settings: &'a SimulationSettings) -> Self {
        let problem = source.empty_copy();
        let vehicle_index = problem.vehicles().iter().enumerate().map(|(idx, vehicle)| (vehicle.id, idx)).collect();
        let waiting = problem.vehicles().iter().map(|_| None).collect();

        Self {
            source,
            individual,
            settings,
            problem,
            vehicle_index,
            events: EventQueue::default(),
            pending: vec![],
            waiting,
            now: 0.,
            log: settings.enable_logging.then(Vec::new),
        }
    }

    /// Runs the event loop until the horizon and returns the result.
    pub fn run(mut self) -> SimulationResult {
        let source = self.source;
        for request in source.requests() {
            self.events.push(
                request.release_time,
                EventKind::Arrive { request: request.id, deadline: request.time_window.end, demand: request.demand },
            );
        }
        self.events.push(self.problem.close() + 1E-9, EventKind::End);

        while let Some(event) = self.events.pop() {
            self.now = event.time;

            match event.kind {
                EventKind::Arrive { request, .. } => self.on_arrive(request),
                EventKind::VehFree { vehicle, cause, detail } => self.on_vehicle_free(vehicle, cause, detail),
                EventKind::End => {
                    self.log(|| "END".to_string());
                    break;
                }
            }
        }

        self.finalize()
    }

    fn on_arrive(&mut self, request_id: RequestId) {
        let Some(request) = self.source.request(request_id).map(Request::reset) else {
            return;
        };

        let deadline = request.time_window.end;
        self.problem.add_request(request);
        self.log(|| format!("ARRIVE request={request_id}"));

        if deadline < self.now {
            self.log(|| format!("DISCARD request={request_id} deadline={deadline:.2}"));
            return;
        }

        (0..self.problem.vehicles().len()).for_each(|v| self.clean_queue(v));

        if !self.try_assign(request_id) {
            self.log(|| format!("PENDING request={request_id}"));
            self.pending.push(request_id);
            self.wake_up_waiting(request_id);
        }
    }

    fn on_vehicle_free(&mut self, vehicle_id: VehicleId, cause: VehicleAction, detail: Option<usize>) {
        self.log(|| format!("VEH_FREE vehicle={vehicle_id} cause={cause} detail={detail:?}"));

        self.retry_pending();

        let Some(&v) = self.vehicle_index.get(&vehicle_id) else {
            return;
        };

        // superseded by a later commitment which schedules its own event
        if self.problem.vehicles()[v].busy_until > self.now + EPSILON {
            return;
        }

        if matches!(cause, VehicleAction::Pickup | VehicleAction::Return) {
            self.waiting[v] = None;
        }

        self.dispatch(v);
    }

    fn retry_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let now = self.now;
        let mut pending = std::mem::take(&mut self.pending)
            .into_iter()
            .filter_map(|id| self.problem.request(id).map(|request| (id, request.time_window.end, request.demand)))
            .filter(|&(id, deadline, _)| {
                let is_alive = now <= deadline + EPSILON;
                if !is_alive {
                    self.log.iter_mut().for_each(|log| log.push(format!("[{now:.2}] EXPIRED request={id}")));
                }
                is_alive
            })
            .collect::<Vec<_>>();

        pending.sort_by(|(_, a_deadline, a_demand), (_, b_deadline, b_demand)| {
            compare_floats(*a_deadline, *b_deadline).then_with(|| compare_floats(*b_demand, *a_demand))
        });

        let mut still_pending = Vec::with_capacity(pending.len());
        for (request_id, _, _) in pending {
            if self.try_assign(request_id) {
                self.log(|| format!("RETRY_ASSIGN request={request_id}"));
            } else {
                still_pending.push(request_id);
            }
        }

        // requests displaced or brought back while retrying
        still_pending.append(&mut self.pending);
        self.pending = still_pending;
    }

    /// Wakes up vehicles waiting at the depot for a request which is worse than the new one.
    fn wake_up_waiting(&mut self, request_id: RequestId) {
        let Some(request) = self.problem.request(request_id) else {
            return;
        };

        let woken = self
            .problem
            .vehicles()
            .iter()
            .enumerate()
            .filter(|(v, vehicle)| {
                self.waiting[*v].as_ref().is_some_and(|waiting| {
                    vehicle.is_at_depot()
                        && waiting.wake_time > self.now + SCORE_EPSILON
                        && self.sequencing_score(vehicle, request) < waiting.score - SCORE_EPSILON
                })
            })
            .map(|(v, vehicle)| (v, vehicle.id))
            .collect::<Vec<_>>();

        for (v, vehicle_id) in woken {
            self.waiting[v] = None;
            self.events.push(
                self.now,
                EventKind::VehFree { vehicle: vehicle_id, cause: VehicleAction::WakeUp, detail: Some(request_id) },
            );
            self.log(|| format!("PREEMPTIVE_WAKE vehicle={vehicle_id} request={request_id}"));
        }
    }

    /// Offers the request to ranked candidates, displaced requests are offered further in a chain.
    fn try_assign(&mut self, request_id: RequestId) -> bool {
        let Some(deadline) = self.problem.request(request_id).map(|request| request.time_window.end) else {
            return false;
        };

        let candidates = self.candidates(request_id);
        if candidates.is_empty() {
            self.log(|| format!("NO_CANDIDATES request={request_id}"));
            return false;
        }

        let assigned = candidates
            .iter()
            .filter(|candidate| candidate.arrival_time <= deadline + EPSILON)
            .find_map(|candidate| {
                self.attempt_assign(request_id, candidate).map(|displaced| (candidate.vehicle, displaced))
            });

        match assigned {
            Some((vehicle, displaced)) => {
                self.reassign_displaced(vehicle, displaced);
                true
            }
            None => false,
        }
    }

    fn reassign_displaced(&mut self, vehicle: usize, displaced: Vec<RequestId>) {
        let mut chain = displaced.into_iter().map(|request_id| (request_id, vehicle)).collect::<VecDeque<_>>();
        let mut excluded: FxHashMap<RequestId, Vec<usize>> = FxHashMap::default();

        while let Some((request_id, removed_from)) = chain.pop_front() {
            let exclusions = excluded.entry(request_id).or_default();
            exclusions.push(removed_from);
            let exclusions = exclusions.clone();

            let Some(deadline) = self.problem.request(request_id).map(|request| request.time_window.end) else {
                continue;
            };

            let candidates = self.candidates(request_id);
            let start =
                candidates.iter().position(|candidate| candidate.vehicle == removed_from).map_or(0, |idx| idx + 1);

            let reassigned = candidates
                .iter()
                .skip(start)
                .filter(|candidate| {
                    !exclusions.contains(&candidate.vehicle) && candidate.arrival_time <= deadline + EPSILON
                })
                .find_map(|candidate| self.attempt_assign(request_id, candidate).map(|next| (candidate.vehicle, next)));

            match reassigned {
                Some((next_vehicle, next)) => chain.extend(next.into_iter().map(|next_id| (next_id, next_vehicle))),
                None => {
                    self.log(|| format!("PENDING request={request_id} (displaced)"));
                    self.pending.push(request_id);
                }
            }
        }
    }

    /// Tries to put the request into the vehicle's queue, returns displaced requests on success.
    fn attempt_assign(&mut self, request_id: RequestId, candidate: &Candidate) -> Option<Vec<RequestId>> {
        let v = candidate.vehicle;
        let demand = self.problem.request(request_id)?.demand;
        let capacity = self.problem.vehicles()[v].capacity;

        // queued requests for which this vehicle is the best candidate
        let top_ranked = self.problem.vehicles()[v]
            .queue
            .clone()
            .into_iter()
            .filter_map(|queued_id| {
                let best = self.candidates(queued_id).into_iter().next()?;
                let queued_demand = self.problem.request(queued_id)?.demand;

                (best.vehicle == v).then_some((queued_id, best.combined, queued_demand))
            })
            .collect::<Vec<_>>();
        let top_demand = top_ranked.iter().map(|(_, _, demand)| demand).sum::<f64>();

        if top_demand + demand <= capacity + EPSILON {
            self.log(|| format!("ASSIGN request={request_id} vehicle_index={v}"));
            self.enqueue(v, request_id);
            return Some(vec![]);
        }

        let mut removable = top_ranked;
        removable.sort_by(|(_, a, _), (_, b, _)| compare_floats(*a, *b));

        let mut freed = 0.;
        let mut removed = vec![];
        for (queued_id, score, queued_demand) in removable {
            if top_demand - freed + demand <= capacity + EPSILON {
                break;
            }

            if candidate.combined <= score + SCORE_EPSILON {
                continue;
            }

            removed.push(queued_id);
            freed += queued_demand;
        }

        if removed.is_empty() || top_demand - freed + demand > capacity + EPSILON {
            return None;
        }

        self.problem.vehicles_mut()[v].queue.retain(|queued_id| !removed.contains(queued_id));
        self.log(|| format!("REPLACE request={request_id} vehicle_index={v} removed={removed:?}"));
        self.enqueue(v, request_id);

        Some(removed)
    }

    fn enqueue(&mut self, v: usize, request_id: RequestId) {
        self.problem.vehicles_mut()[v].queue.push(request_id);

        if self.problem.vehicles()[v].busy_until <= self.now + EPSILON {
            self.dispatch(v);
        }
    }

    /// Returns feasible vehicles for the request ordered by combined score, best first.
    fn candidates(&self, request_id: RequestId) -> Vec<Candidate> {
        let Some(request) = self.problem.request(request_id) else {
            return vec![];
        };

        let raw = self
            .problem
            .vehicles()
            .iter()
            .enumerate()
            .filter(|(_, vehicle)| {
                (request.drone_eligible || !vehicle.is_drone())
                    && request.demand <= vehicle.capacity + EPSILON
                    && vehicle.can_fly_to(&request.location)
            })
            .map(|(v, vehicle)| {
                let score = self.individual.routing().evaluate(vehicle, &self.problem, request, self.now);
                let score = finite_score(score, -SCORE_LIMIT);
                let arrival_time = self.now.max(vehicle.busy_until) + vehicle.travel_time_to(&request.location);

                (v, score, arrival_time)
            })
            .collect::<Vec<_>>();

        let (score_min, score_span) = get_range(raw.iter().map(|(_, score, _)| *score));
        let (arrival_min, arrival_span) = get_range(raw.iter().map(|(_, _, arrival)| *arrival));

        let mut candidates = raw
            .into_iter()
            .map(|(vehicle, score, arrival_time)| Candidate {
                vehicle,
                combined: self.settings.r_alpha * (score - score_min) / score_span
                    + self.settings.arrival_beta * (1. - (arrival_time - arrival_min) / arrival_span),
                arrival_time,
            })
            .collect::<Vec<_>>();

        candidates.sort_by(|a, b| compare_floats(b.combined, a.combined));

        candidates
    }

    fn dispatch(&mut self, v: usize) {
        self.clean_queue(v);

        let vehicle = &self.problem.vehicles()[v];
        let ready = self.now.max(vehicle.busy_until);
        let is_idle_at_depot = vehicle.is_at_depot() && vehicle.picked_up.is_empty();

        if let Some((request_id, reason)) = self.find_hold_violation(v, ready) {
            self.failed_return(v, request_id, ready, reason);
            return;
        }

        match self.pickup_options(v, ready).into_iter().next() {
            Some(option) if is_idle_at_depot && ready + option.travel_time < option.window_start - EPSILON => {
                let wake_time = option.window_start - option.travel_time;
                let (vehicle_id, request_id) = (self.problem.vehicles()[v].id, option.request);

                self.waiting[v] = Some(WaitingState { wake_time, score: option.score });
                self.events.push(
                    wake_time,
                    EventKind::VehFree { vehicle: vehicle_id, cause: VehicleAction::WakeUp, detail: Some(request_id) },
                );
                self.log(|| format!("WAIT vehicle={vehicle_id} request={request_id} until={wake_time:.2}"));
            }
            Some(option) => {
                self.waiting[v] = None;
                self.pickup(v, &option, ready);
            }
            None if !is_idle_at_depot => self.return_to_depot(v, ready),
            None => {}
        }
    }

    /// Returns the first picked up request which cannot be delivered when returning immediately.
    fn find_hold_violation(&self, v: usize, ready: Timestamp) -> Option<(RequestId, FailureReason)> {
        let vehicle = &self.problem.vehicles()[v];
        let depot_arrival = ready + vehicle.travel_time_to(&Location::DEPOT);

        vehicle.picked_up.iter().filter_map(|&id| self.problem.request(id)).find_map(|request| {
            let pickup_time = request.pickup_time.unwrap_or(depot_arrival);

            if depot_arrival - pickup_time > request.max_hold + EPSILON {
                Some((request.id, FailureReason::HoldTimeExceeded))
            } else if depot_arrival > self.problem.close() + EPSILON {
                Some((request.id, FailureReason::DepotClosed))
            } else {
                None
            }
        })
    }

    /// Returns feasible pickups from the vehicle's queue ordered by (sequencing score, travel time).
    fn pickup_options(&self, v: usize, ready: Timestamp) -> Vec<PickupOption> {
        let vehicle = &self.problem.vehicles()[v];
        let close = self.problem.close();

        let picked = vehicle.picked_up.iter().filter_map(|&id| self.problem.request(id)).collect::<Vec<_>>();

        let mut options = vehicle
            .queue
            .iter()
            .filter_map(|&id| self.problem.request(id))
            .filter(|request| request.is_open())
            .filter_map(|request| {
                let travel_time = vehicle.travel_time_to(&request.location);
                let arrival_time = ready + travel_time;
                if arrival_time > request.time_window.end + EPSILON {
                    return None;
                }

                let service_start = arrival_time.max(request.time_window.start);
                let back_time = vehicle.travel_time(&request.location, &Location::DEPOT);
                let depot_arrival = service_start + back_time;

                let is_feasible = depot_arrival <= close + EPSILON
                    && back_time <= request.max_hold + EPSILON
                    && picked.iter().all(|other| {
                        depot_arrival - other.pickup_time.unwrap_or(depot_arrival) <= other.max_hold + EPSILON
                    })
                    && vehicle.can_fly_to(&request.location)
                    && vehicle.remaining_capacity + EPSILON >= request.demand;

                is_feasible.then(|| PickupOption {
                    request: request.id,
                    score: self.sequencing_score(vehicle, request),
                    travel_time,
                    window_start: request.time_window.start,
                })
            })
            .collect::<Vec<_>>();

        options.sort_by(|a, b| {
            compare_floats(a.score, b.score).then_with(|| compare_floats(a.travel_time, b.travel_time))
        });

        options
    }

    fn pickup(&mut self, v: usize, option: &PickupOption, ready: Timestamp) {
        let Some(request) = self.problem.request(option.request) else {
            return;
        };
        let (request_id, location, demand) = (request.id, request.location, request.demand);
        let arrival_time = ready + option.travel_time;
        let service_start = arrival_time.max(option.window_start);

        let vehicle = &mut self.problem.vehicles_mut()[v];
        if vehicle.is_at_depot() && vehicle.picked_up.is_empty() {
            vehicle.trips.push(vec![]);
        }
        vehicle.consume_range(option.travel_time);

        let record = ActionRecord {
            action: ActionKind::Pickup,
            request: Some(request_id),
            ready_time: ready,
            travel_time: option.travel_time,
            arrival_time,
            service_start: Some(service_start),
            location,
            previous_location: vehicle.location,
            vehicle_state: VehicleSnapshot {
                busy_until: service_start,
                remaining_capacity: vehicle.remaining_capacity - demand,
                remaining_range: vehicle.remaining_range(),
            },
            note: None,
        };

        vehicle.remaining_capacity -= demand;
        vehicle.picked_up.push(request_id);
        vehicle.location = location;
        vehicle.busy_until = service_start;
        vehicle.queue.retain(|&id| id != request_id);
        push_record(vehicle, record);
        let vehicle_id = vehicle.id;

        if let Some(request) = self.problem.request_mut(request_id) {
            request.is_picked_up = true;
            request.pickup_time = Some(service_start);
        }

        debug_assert!(self.has_consistent_load(v));

        self.events.push(
            service_start,
            EventKind::VehFree { vehicle: vehicle_id, cause: VehicleAction::Pickup, detail: Some(request_id) },
        );
        self.log(|| format!("PICKUP vehicle={vehicle_id} request={request_id} service_start={service_start:.2}"));
    }

    fn return_to_depot(&mut self, v: usize, ready: Timestamp) {
        let vehicle = &mut self.problem.vehicles_mut()[v];
        let travel_time = vehicle.travel_time_to(&Location::DEPOT);
        let arrival_time = ready + travel_time;

        vehicle.recharge();

        let record = ActionRecord {
            action: ActionKind::ReturnDepot,
            request: None,
            ready_time: ready,
            travel_time,
            arrival_time,
            service_start: None,
            location: Location::DEPOT,
            previous_location: vehicle.location,
            vehicle_state: VehicleSnapshot {
                busy_until: arrival_time,
                remaining_capacity: vehicle.capacity,
                remaining_range: vehicle.remaining_range(),
            },
            note: None,
        };

        let delivered = std::mem::take(&mut vehicle.picked_up);
        vehicle.location = Location::DEPOT;
        vehicle.busy_until = arrival_time;
        vehicle.remaining_capacity = vehicle.capacity;
        push_record(vehicle, record);
        let vehicle_id = vehicle.id;

        delivered.iter().for_each(|&id| {
            if let Some(request) = self.problem.request_mut(id) {
                request.is_served = true;
            }
        });

        self.waiting[v] = None;
        self.events.push(
            arrival_time,
            EventKind::VehFree { vehicle: vehicle_id, cause: VehicleAction::Return, detail: Some(delivered.len()) },
        );
        self.log(|| format!("RETURN vehicle={vehicle_id} served={} arrival={arrival_time:.2}", delivered.len()));
    }

    /// Brings a picked up request back to its location and releases it.
    fn failed_return(&mut self, v: usize, request_id: RequestId, ready: Timestamp, reason: FailureReason) {
        let Some(request) = self.problem.request(request_id) else {
            return;
        };
        let (location, demand, deadline) = (request.location, request.demand, request.time_window.end);

        let vehicle = &mut self.problem.vehicles_mut()[v];
        let travel_time = vehicle.travel_time_to(&location);
        let arrival_time = ready + travel_time;

        if vehicle.trips.is_empty() {
            vehicle.trips.push(vec![]);
        }
        vehicle.consume_range(travel_time);

        let record = ActionRecord {
            action: ActionKind::FailedReturn,
            request: Some(request_id),
            ready_time: ready,
            travel_time,
            arrival_time,
            service_start: None,
            location,
            previous_location: vehicle.location,
            vehicle_state: VehicleSnapshot {
                busy_until: arrival_time,
                remaining_capacity: vehicle.remaining_capacity + demand,
                remaining_range: vehicle.remaining_range(),
            },
            note: Some(reason),
        };

        vehicle.location = location;
        vehicle.busy_until = arrival_time;
        vehicle.remaining_capacity += demand;
        vehicle.picked_up.retain(|&id| id != request_id);
        push_record(vehicle, record);
        let vehicle_id = vehicle.id;

        if let Some(request) = self.problem.request_mut(request_id) {
            request.unpick();
        }

        if arrival_time <= deadline + EPSILON {
            self.pending.push(request_id);
        }

        debug_assert!(self.has_consistent_load(v));

        self.waiting[v] = None;
        self.events.push(
            arrival_time,
            EventKind::VehFree { vehicle: vehicle_id, cause: VehicleAction::Return, detail: Some(request_id) },
        );
        self.log(|| format!("FAILED_RETURN vehicle={vehicle_id} request={request_id} reason={reason}"));
    }

    fn clean_queue(&mut self, v: usize) {
        let queue = std::mem::take(&mut self.problem.vehicles_mut()[v].queue);
        let queue =
            queue.into_iter().filter(|&id| self.problem.request(id).is_some_and(Request::is_open)).collect::<Vec<_>>();

        self.problem.vehicles_mut()[v].queue = queue;
    }

    fn sequencing_score(&self, vehicle: &Vehicle, request: &Request) -> f64 {
        finite_score(self.individual.sequencing().evaluate(vehicle, &self.problem, request, self.now), SCORE_LIMIT)
    }

    fn has_consistent_load(&self, v: usize) -> bool {
        let vehicle = &self.problem.vehicles()[v];
        let load =
            vehicle.picked_up.iter().filter_map(|&id| self.problem.request(id)).map(|r| r.demand).sum::<f64>();

        (vehicle.capacity - load - vehicle.remaining_capacity).abs() < EPSILON
    }

    fn log<F: FnOnce() -> String>(&mut self, message: F) {
        if let Some(log) = self.log.as_mut() {
            log.push(format!("[{:.2}] {}", self.now, message()));
        }
    }

    fn finalize(self) -> SimulationResult {
        let close = self.problem.close();
        let requests = self.problem.requests();

        let total = requests.len();
        let served = requests.iter().filter(|request| request.is_served).count();
        let unserved_requests =
            requests.iter().filter(|request| !request.is_served).map(|request| request.id).collect();
        let makespan = self.problem.vehicles().iter().map(|vehicle| vehicle.busy_until).fold(0., f64::max);

        let served_ratio = if total > 0 { served as f64 / total as f64 } else { 0. };
        let makespan_score = (1. - makespan / close).max(0.);

        let vehicles = self
            .problem
            .vehicles()
            .iter()
            .map(|vehicle| VehicleTrace {
                id: vehicle.id,
                kind: vehicle.kind_name(),
                trips: vehicle.trips.clone(),
                completion_time: vehicle.busy_until,
            })
            .collect();

        SimulationResult {
            total,
            served,
            unserved: total - served,
            makespan,
            served_ratio,
            makespan_score,
            unserved_requests,
            vehicles,
            events: self.log,
            simulated: self.problem,
        }
    }
}

fn push_record(vehicle: &mut Vehicle, record: ActionRecord) {
    match vehicle.trips.last_mut() {
        Some(trip) => trip.push(record),
        None => vehicle.trips.push(vec![record]),
    }
}

fn finite_score(value: f64, nan_value: f64) -> f64 {
    if value.is_nan() { nan_value } else { value.clamp(-SCORE_LIMIT, SCORE_LIMIT) }
}

/// Returns minimum and span of values, a degenerate span is replaced by one.
fn get_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) =
        values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| (min.min(value), max.max(value)));
    let span = max - min;

    (min, if span.is_finite() && span > 1E-9 { span } else { 1. })
}
