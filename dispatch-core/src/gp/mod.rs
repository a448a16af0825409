//! Genetic programming genotype: expression trees, individuals, genetic operators and the
//! population initializer.

mod individual;
pub use self::individual::*;

mod initializer;
pub use self::initializer::*;

mod node;
pub use self::node::*;

mod operators;
pub use self::operators::*;

mod parser;

mod terminals;
pub use self::terminals::*;

mod tree;
pub use self::tree::*;
