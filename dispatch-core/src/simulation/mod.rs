//! A discrete event dispatch simulation which executes a policy against a problem instance and
//! produces objective values together with per vehicle traces.

mod events;
pub use self::events::*;

mod result;
pub use self::result::*;

mod simulator;
pub use self::simulator::*;

mod validator;
pub use self::validator::*;

use crate::gp::Individual;
use crate::models::Problem;
use serde::{Deserialize, Serialize};

/// Specifies simulation parameters.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Weight of the normalized routing score in the combined candidate score.
    pub r_alpha: f64,
    /// Weight of the normalized arrival earliness in the combined candidate score.
    pub arrival_beta: f64,
    /// Collects event log lines into the result when enabled.
    pub enable_logging: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self { r_alpha: 0.7, arrival_beta: 0.3, enable_logging: false }
    }
}

/// Simulates the individual's policy on a private copy of the problem, stores fitness in the
/// individual and returns the simulation result.
pub fn simulate(problem: &Problem, individual: &mut Individual, settings: &SimulationSettings) -> SimulationResult {
    let result = Simulator::new(problem, individual, settings).run();
    individual.set_fitness(result.fitness());

    result
}
