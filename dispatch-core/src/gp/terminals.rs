#[cfg(test)]
#[path = "../../tests/unit/gp/terminals_test.rs"]
mod terminals_test;

use super::*;
use crate::models::{Problem, Request, Timestamp, Vehicle};

/// A score assigned by sequencing features to a request which cannot be reached in time.
pub const UNREACHABLE_SCORE: f64 = 1E9;

/// Keeps everything needed to compute feature values.
pub struct FeatureContext<'a> {
    /// A vehicle to score.
    pub vehicle: &'a Vehicle,
    /// A live problem with requests arrived so far.
    pub problem: &'a Problem,
    /// A request to score.
    pub request: &'a Request,
    /// Current simulation time.
    pub now: Timestamp,
}

impl GpTree {
    /// Evaluates the policy tree for the vehicle and the request at the given time.
    pub fn evaluate(&self, vehicle: &Vehicle, problem: &Problem, request: &Request, now: Timestamp) -> f64 {
        let context = FeatureContext { vehicle, problem, request, now };

        self.evaluate_with(&|feature| context.feature_value(feature))
    }
}

impl FeatureContext<'_> {
    /// Returns value of the feature.
    pub fn feature_value(&self, feature: Feature) -> f64 {
        match feature.role() {
            Role::Routing => self.routing_feature(feature.index()),
            Role::Sequencing => self.sequencing_feature(feature.index()),
        }
    }

    fn routing_feature(&self, index: usize) -> f64 {
        let (vehicle, problem, request) = (self.vehicle, self.problem, self.request);
        let close = problem.close();

        match index {
            0 => match problem.requests().len() {
                0 => 0.,
                total => 1. - vehicle.queue.len() as f64 / total as f64,
            },
            1 => self.demand_ratio(vehicle.capacity - problem.queued_demand(vehicle)),
            2 => {
                let origin = problem.queue_centroid(vehicle).unwrap_or(vehicle.location);
                1. - vehicle.travel_time(&origin, &request.location) / close
            }
            3 => 1. - vehicle.travel_time_to(&request.location) / close,
            4 => self.demand_ratio(request.demand),
            _ => {
                if vehicle.is_drone() {
                    1.
                } else {
                    0.
                }
            }
        }
    }

    fn sequencing_feature(&self, index: usize) -> f64 {
        let (vehicle, problem, request) = (self.vehicle, self.problem, self.request);
        let close = problem.close();

        match index {
            0 => vehicle.travel_time_to(&request.location) / close,
            1 => 1. - (self.now - request.release_time) / close,
            2 => {
                let slack = request.time_window.end - vehicle.busy_until;
                let travel_time = vehicle.travel_time_to(&request.location);

                if travel_time > slack || slack <= 1E-3 { UNREACHABLE_SCORE } else { (slack - travel_time) / slack }
            }
            3 => {
                if problem.total_demand() > 0. {
                    1. - request.demand / problem.total_demand()
                } else {
                    0.
                }
            }
            4 => 1. - (self.now - request.time_window.start) / close,
            _ => request.release_time / close,
        }
    }

    fn demand_ratio(&self, value: f64) -> f64 {
        let total_demand = self.problem.total_demand();

        if total_demand > 0. { value / total_demand } else { 0. }
    }
}
