//! A collection of models to represent the dispatching problem: requests, vehicles, the problem
//! itself and the records produced while simulating it.

mod common;
pub use self::common::*;

mod problem;
pub use self::problem::*;

mod record;
pub use self::record::*;

mod request;
pub use self::request::*;

mod trip;
pub use self::trip::*;

mod vehicle;
pub use self::vehicle::*;
