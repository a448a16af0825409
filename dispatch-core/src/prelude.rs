//! This module reimports commonly used types.

pub use crate::gp::{GpTree, Individual, Role};
pub use crate::models::{Problem, ProblemRecord, Request, Vehicle};
pub use crate::simulation::{SimulationResult, SimulationSettings, simulate};
pub use crate::solver::{EvolutionResult, Nsga2Optimizer, OptimizerConfig, OptimizerConfigBuilder};

pub use moea::prelude::*;
