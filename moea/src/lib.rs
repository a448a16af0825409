//! This crate exposes multi-objective evolutionary building blocks: NSGA-II ranking with crowding
//! distance, a seedable randomness abstraction and some helper functionality which can be used to
//! build an evolutionary optimizer.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod algorithms;
pub mod prelude;
pub mod utils;
