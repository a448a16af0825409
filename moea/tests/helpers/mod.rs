
pub mod algorithms;
pub mod utils;
