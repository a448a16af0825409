use std::fmt::{Display, Formatter};

/// Amount of features available for each policy role.
pub const FEATURE_COUNT: usize = 6;

/// Specifies the policy role of a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Vehicle assignment policy: higher score means more suitable vehicle.
    Routing,
    /// Pickup sequencing policy: lower score means serve sooner.
    Sequencing,
}

impl Role {
    /// Returns a terminal prefix used in text form.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Routing => "RT",
            Self::Sequencing => "ST",
        }
    }

    /// Returns a short tag of the role.
    pub fn tag(&self) -> char {
        match self {
            Self::Routing => 'R',
            Self::Sequencing => 'S',
        }
    }
}

/// A binary operator of an internal node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Protected division: division by zero yields one.
    Div,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
}

impl Operator {
    /// All available operators.
    pub const ALL: [Operator; 6] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Min, Self::Max];

    /// Returns operator name used in text form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Returns operator by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().find(|op| op.name() == name).copied()
    }

    /// Applies operator to two operands.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div if right == 0. => 1.,
            Self::Div => left / right,
            Self::Min => left.min(right),
            Self::Max => left.max(right),
        }
    }
}

/// A reference to one of the role's feature functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Feature {
    role: Role,
    index: usize,
}

impl Feature {
    /// Creates a new instance of `Feature`, returns none when index is out of range.
    pub fn new(role: Role, index: usize) -> Option<Self> {
        (index < FEATURE_COUNT).then_some(Self { role, index })
    }

    /// Creates a feature wrapping index into the valid range.
    pub(crate) fn wrapping(role: Role, index: usize) -> Self {
        Self { role, index: index % FEATURE_COUNT }
    }

    /// Returns the feature role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the feature index.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.role.prefix(), self.index)
    }
}

/// A node of an expression tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GpNode {
    /// An operator applied to two children.
    Internal(Operator),
    /// A feature leaf.
    Terminal(Feature),
}

impl GpNode {
    /// Returns amount of children.
    pub fn arity(&self) -> usize {
        match self {
            Self::Internal(_) => 2,
            Self::Terminal(_) => 0,
        }
    }
}
