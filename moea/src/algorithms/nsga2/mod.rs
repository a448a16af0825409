//! This module contains an implementation of NSGA-II ranking: non-dominated sorting of solutions
//! into Pareto fronts followed by crowding distance assignment inside each front.

mod crowding_distance;
pub use self::crowding_distance::*;

mod non_dominated_sort;
pub use self::non_dominated_sort::*;

mod nsga2_sort;
pub use self::nsga2_sort::*;

mod objective;
pub use self::objective::*;
