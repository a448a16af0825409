//! An NSGA-II optimizer which evolves dispatch policies.

mod config;
pub use self::config::*;

mod objectives;
pub use self::objectives::*;

mod optimizer;
pub use self::optimizer::*;

mod selection;
pub use self::selection::*;

mod telemetry;
pub use self::telemetry::*;
