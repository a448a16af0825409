#[cfg(test)]
#[path = "../../tests/unit/solver/config_test.rs"]
mod config_test;

use crate::simulation::SimulationSettings;
use moea::prelude::GenericResult;
use serde::{Deserialize, Serialize};

/// Specifies optimizer parameters.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Population size.
    pub population_size: usize,
    /// Amount of generations after the initial one.
    pub generations: usize,
    /// Probability to apply crossover to a pair of parents.
    pub crossover_rate: f64,
    /// Probability to mutate a child.
    pub mutation_rate: f64,
    /// Fraction of population copied into the next generation.
    pub elite_ratio: f64,
    /// Amount of individuals competing in a tournament.
    pub tournament_size: usize,
    /// Maximum tree depth.
    pub max_depth: usize,
    /// A random seed, entropy is used when not set.
    pub seed: Option<u64>,
    /// Amount of threads used to evaluate population, rayon's global pool when not set.
    pub threads: Option<usize>,
    /// Simulation parameters.
    pub simulation: SimulationSettings,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 20,
            crossover_rate: 0.8,
            mutation_rate: 0.3,
            elite_ratio: 0.1,
            tournament_size: 2,
            max_depth: 6,
            seed: None,
            threads: None,
            simulation: SimulationSettings::default(),
        }
    }
}

impl OptimizerConfig {
    /// Reads config from json string, missing fields get default values.
    pub fn from_json(json: &str) -> GenericResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|err| format!("cannot read optimizer config: {err}"))?;
        config.validate()?;

        Ok(config)
    }

    /// Returns amount of elite individuals.
    pub fn elite_size(&self) -> usize {
        (self.population_size as f64 * self.elite_ratio) as usize
    }

    /// Checks that parameters are in their valid ranges.
    pub fn validate(&self) -> GenericResult<()> {
        if self.population_size < 2 {
            return Err(format!("population size should be at least 2, got: {}", self.population_size).into());
        }

        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(format!(
                "tournament size should be in [1, {}], got: {}",
                self.population_size, self.tournament_size
            )
            .into());
        }

        if self.max_depth < 2 {
            return Err(format!("max depth should be at least 2, got: {}", self.max_depth).into());
        }

        if self.threads == Some(0) {
            return Err("amount of threads should be at least 1".to_string().into());
        }

        let rates = [
            ("crossover rate", self.crossover_rate),
            ("mutation rate", self.mutation_rate),
            ("elite ratio", self.elite_ratio),
        ];
        if let Some((name, value)) = rates.iter().find(|(_, value)| !(0. ..=1.).contains(value)) {
            return Err(format!("{name} should be in [0, 1], got: {value}").into());
        }

        let weights = [("r_alpha", self.simulation.r_alpha), ("arrival_beta", self.simulation.arrival_beta)];
        if let Some((name, value)) = weights.iter().find(|(_, value)| !value.is_finite() || *value < 0.) {
            return Err(format!("{name} should be a non negative number, got: {value}").into());
        }

        Ok(())
    }
}

/// Provides configurable way to build optimizer config.
#[derive(Default)]
pub struct OptimizerConfigBuilder {
    config: OptimizerConfig,
}

impl OptimizerConfigBuilder {
    /// Sets population size. Default is 50.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.config.population_size = population_size;
        self
    }

    /// Sets amount of generations. Default is 20.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.config.generations = generations;
        self
    }

    /// Sets crossover rate. Default is 0.8.
    pub fn with_crossover_rate(mut self, crossover_rate: f64) -> Self {
        self.config.crossover_rate = crossover_rate;
        self
    }

    /// Sets mutation rate. Default is 0.3.
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.config.mutation_rate = mutation_rate;
        self
    }

    /// Sets elite ratio. Default is 0.1.
    pub fn with_elite_ratio(mut self, elite_ratio: f64) -> Self {
        self.config.elite_ratio = elite_ratio;
        self
    }

    /// Sets tournament size. Default is 2.
    pub fn with_tournament_size(mut self, tournament_size: usize) -> Self {
        self.config.tournament_size = tournament_size;
        self
    }

    /// Sets max tree depth. Default is 6.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Sets random seed. Default is none.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    /// Sets amount of evaluation threads. Default is none.
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.config.threads = threads;
        self
    }

    /// Sets simulation settings.
    pub fn with_simulation(mut self, simulation: SimulationSettings) -> Self {
        self.config.simulation = simulation;
        self
    }

    /// Validates and builds the config.
    pub fn build(self) -> GenericResult<OptimizerConfig> {
        self.config.validate()?;

        Ok(self.config)
    }
}
