use crate::algorithms::nsga2::{MultiObjective, Objective};
use crate::utils::compare_floats;
use std::cmp::Ordering;
use std::sync::Arc;

pub type SliceObjective = Arc<dyn Objective<Solution = Vec<f64>> + Send + Sync>;

/// Minimizes value at given dimension of a slice.
pub struct SliceDimensionObjective {
    dimension: usize,
}

impl SliceDimensionObjective {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Objective for SliceDimensionObjective {
    type Solution = Vec<f64>;

    fn total_order(&self, a: &Self::Solution, b: &Self::Solution) -> Ordering {
        compare_floats(a[self.dimension], b[self.dimension])
    }

    fn fitness(&self, solution: &Self::Solution) -> f64 {
        solution[self.dimension]
    }
}

pub struct SliceMultiObjective {
    objectives: Vec<SliceObjective>,
}

impl SliceMultiObjective {
    pub fn new(objectives: Vec<SliceObjective>) -> Self {
        Self { objectives }
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self::new(
            (0..dimensions)
                .map(|dimension| Arc::new(SliceDimensionObjective::new(dimension)) as SliceObjective)
                .collect(),
        )
    }
}

impl MultiObjective for SliceMultiObjective {
    type Solution = Vec<f64>;

    fn objectives<'a>(
        &'a self,
    ) -> Box<dyn Iterator<Item = &'a (dyn Objective<Solution = Self::Solution> + Send + Sync)> + 'a> {
        Box::new(self.objectives.iter().map(|objective| objective.as_ref()))
    }
}
