#[cfg(test)]
#[path = "../../tests/unit/gp/individual_test.rs"]
mod individual_test;

use super::*;
use moea::prelude::GenericResult;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Objective values of an individual, both are maximized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Fitness {
    /// Fraction of arrived requests which were delivered to the depot.
    pub served_ratio: f64,
    /// One minus makespan normalized by the depot close time.
    pub makespan_score: f64,
}

/// A dispatch policy: a routing tree and a sequencing tree with cached objective values and
/// NSGA-II ranking information. Cloning deep copies both trees.
#[derive(Clone, Debug)]
pub struct Individual {
    routing: GpTree,
    sequencing: GpTree,
    fitness: Option<Fitness>,
    rank: usize,
    crowding_distance: f64,
}

impl Individual {
    /// Creates a new instance of `Individual` checking tree roles.
    pub fn new(routing: GpTree, sequencing: GpTree) -> GenericResult<Self> {
        if routing.role() != Role::Routing || sequencing.role() != Role::Sequencing {
            let (routing, sequencing) = (routing.role().tag(), sequencing.role().tag());
            return Err(format!("unexpected tree roles: '{routing}' and '{sequencing}'").into());
        }

        Ok(Self::from_trees(routing, sequencing))
    }

    /// Creates a new instance of `Individual` from trees which roles are known to be correct.
    pub(crate) fn from_trees(routing: GpTree, sequencing: GpTree) -> Self {
        debug_assert!(routing.role() == Role::Routing && sequencing.role() == Role::Sequencing);

        Self { routing, sequencing, fitness: None, rank: usize::MAX, crowding_distance: 0. }
    }

    /// Creates a new instance of `Individual` from text form of both trees.
    pub fn parse(routing: &str, sequencing: &str) -> GenericResult<Self> {
        Self::new(GpTree::parse(routing, Role::Routing)?, GpTree::parse(sequencing, Role::Sequencing)?)
    }

    /// Returns vehicle assignment policy tree.
    pub fn routing(&self) -> &GpTree {
        &self.routing
    }

    /// Returns pickup sequencing policy tree.
    pub fn sequencing(&self) -> &GpTree {
        &self.sequencing
    }

    /// Returns tree of the given role.
    pub fn tree(&self, role: Role) -> &GpTree {
        match role {
            Role::Routing => &self.routing,
            Role::Sequencing => &self.sequencing,
        }
    }

    /// Replaces the tree of the same role, cached fitness is dropped.
    pub(crate) fn set_tree(&mut self, tree: GpTree) {
        match tree.role() {
            Role::Routing => self.routing = tree,
            Role::Sequencing => self.sequencing = tree,
        }

        self.fitness = None;
    }

    /// Returns max depth of both trees.
    pub fn depth(&self) -> usize {
        self.routing.depth().max(self.sequencing.depth())
    }

    /// Returns cached fitness, none if individual was not evaluated yet.
    pub fn fitness(&self) -> Option<Fitness> {
        self.fitness
    }

    /// Sets fitness.
    pub fn set_fitness(&mut self, fitness: Fitness) {
        self.fitness = Some(fitness);
    }

    /// Returns non-domination rank, zero is the best.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Returns crowding distance within the front.
    pub fn crowding_distance(&self) -> f64 {
        self.crowding_distance
    }

    /// Sets non-domination rank and crowding distance.
    pub fn set_ranking(&mut self, rank: usize, crowding_distance: f64) {
        self.rank = rank;
        self.crowding_distance = crowding_distance;
    }
}

impl Display for Individual {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "R: {} | S: {}", self.routing, self.sequencing)
    }
}
