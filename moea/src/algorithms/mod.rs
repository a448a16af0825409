//! This module contains some algorithms used by the evolutionary optimizer.

pub mod nsga2;
