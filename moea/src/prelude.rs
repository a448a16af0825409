//! This module reimports commonly used types.

pub use crate::algorithms::nsga2::{MultiObjective, Objective, dominance_order};

pub use crate::utils::{DefaultRandom, Random};
pub use crate::utils::{Environment, InfoLogger, Parallelism};
pub use crate::utils::{GenericError, GenericResult};
pub use crate::utils::{Timer, compare_floats};
