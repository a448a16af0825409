//! Core crate contains the building blocks to evolve dispatch policies for a dynamic pickup fleet of
//! ***trucks and drones*** with genetic programming.
//!
//! A policy is a pair of expression trees: a routing tree scores how suitable a vehicle is for a
//! newly arrived request and a sequencing tree orders the requests queued on a vehicle. Policies
//! are evaluated by a discrete event simulation which produces two objectives (served ratio and
//! makespan score) consumed by an NSGA-II optimizer.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod gp;
pub mod models;
pub mod prelude;
pub mod simulation;
pub mod solver;
