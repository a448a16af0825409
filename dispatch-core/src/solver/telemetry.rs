//! A module which provides the logic to collect metrics about optimizer execution and simple logging.

#[cfg(test)]
#[path = "../../tests/unit/solver/telemetry_test.rs"]
mod telemetry_test;

use crate::gp::{Fitness, Individual};
use moea::prelude::{InfoLogger, Timer};
use serde::Serialize;

/// Represents information about generation.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationStatistics {
    /// Generation sequence number, zero is the initial population.
    pub generation: usize,
    /// Best served ratio in the population.
    pub best_served_ratio: f64,
    /// Best makespan score in the population.
    pub best_makespan_score: f64,
    /// Amount of individuals in the first Pareto front.
    pub pareto_front_size: usize,
    /// Time since optimization started, in seconds.
    pub timestamp: f64,
}

/// Keeps essential information about particular individual in population.
#[derive(Clone, Debug, Serialize)]
pub struct IndividualSnapshot {
    /// Routing tree in text form.
    pub routing: String,
    /// Sequencing tree in text form.
    pub sequencing: String,
    /// Objective values.
    pub fitness: Option<Fitness>,
    /// Non-domination rank.
    pub rank: usize,
}

impl From<&Individual> for IndividualSnapshot {
    fn from(individual: &Individual) -> Self {
        Self {
            routing: individual.routing().to_string(),
            sequencing: individual.sequencing().to_string(),
            fitness: individual.fitness(),
            rank: individual.rank(),
        }
    }
}

/// Holds population state.
#[derive(Clone, Debug, Serialize)]
pub struct PopulationSnapshot {
    /// Generation sequence number.
    pub generation: usize,
    /// Population individuals.
    pub individuals: Vec<IndividualSnapshot>,
}

/// Encapsulates different measurements regarding optimizer execution.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TelemetryMetrics {
    /// Optimization duration in seconds.
    pub duration: f64,
    /// Total amount of generations.
    pub generations: usize,
    /// Statistics of every generation.
    pub statistics: Vec<GenerationStatistics>,
    /// Tracked population snapshots.
    pub history: Vec<PopulationSnapshot>,
}

/// Specifies a telemetry mode.
#[derive(Clone)]
pub enum TelemetryMode {
    /// No logging and no population tracking, generation statistics are still collected.
    None,
    /// Only logging.
    OnlyLogging {
        /// A logger type.
        logger: InfoLogger,
        /// Specifies how often generation statistics are logged.
        log_every: usize,
    },
    /// Only population tracking.
    OnlyMetrics {
        /// Specifies how often population is tracked.
        track_every: usize,
    },
    /// Both logging and population tracking.
    All {
        /// A logger type.
        logger: InfoLogger,
        /// Specifies how often generation statistics are logged.
        log_every: usize,
        /// Specifies how often population is tracked.
        track_every: usize,
    },
}

/// Provides way to collect metrics and write information into log.
pub struct Telemetry {
    mode: TelemetryMode,
    time: Timer,
    metrics: TelemetryMetrics,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry`.
    pub fn new(mode: TelemetryMode) -> Self {
        Self { mode, time: Timer::start(), metrics: TelemetryMetrics::default() }
    }

    /// Reports generation statistics.
    pub fn on_generation(&mut self, generation: usize, population: &[Individual], generation_time: Timer) {
        let best = |component: fn(&Fitness) -> f64| {
            population
                .iter()
                .filter_map(|individual| individual.fitness())
                .map(|fitness| component(&fitness))
                .fold(0., f64::max)
        };

        let statistics = GenerationStatistics {
            generation,
            best_served_ratio: best(|fitness| fitness.served_ratio),
            best_makespan_score: best(|fitness| fitness.makespan_score),
            pareto_front_size: population.iter().filter(|individual| individual.rank() == 0).count(),
            timestamp: self.time.elapsed_secs_as_float(),
        };

        let (log_every, track_every) = match &self.mode {
            TelemetryMode::None => (None, None),
            TelemetryMode::OnlyLogging { log_every, .. } => (Some(*log_every), None),
            TelemetryMode::OnlyMetrics { track_every } => (None, Some(*track_every)),
            TelemetryMode::All { log_every, track_every, .. } => (Some(*log_every), Some(*track_every)),
        };

        if log_every.is_some_and(|every| generation % every.max(1) == 0) {
            self.log(
                format!(
                    "[{}s] generation {} took {}ms, best served ratio: {:.3}, best makespan score: {:.3}, front: {}",
                    self.time.elapsed_secs(),
                    generation,
                    generation_time.elapsed_millis(),
                    statistics.best_served_ratio,
                    statistics.best_makespan_score,
                    statistics.pareto_front_size
                )
                .as_str(),
            );
        }

        if track_every.is_some_and(|every| generation % every.max(1) == 0) {
            self.metrics.history.push(PopulationSnapshot {
                generation,
                individuals: population.iter().map(IndividualSnapshot::from).collect(),
            });
        }

        self.metrics.generations = generation;
        self.metrics.statistics.push(statistics);
    }

    /// Reports final statistic.
    pub fn on_result(&mut self, best: Option<&Individual>) {
        self.metrics.duration = self.time.elapsed_secs_as_float();

        match best {
            Some(best) => self.log(
                format!(
                    "[{}s] optimization is completed after {} generations, best: {best} with fitness: {:?}",
                    self.time.elapsed_secs(),
                    self.metrics.generations,
                    best.fitness()
                )
                .as_str(),
            ),
            None => self.log("optimization is completed without evaluated individuals"),
        }
    }

    /// Writes message to the logger.
    pub fn log(&self, message: &str) {
        match &self.mode {
            TelemetryMode::OnlyLogging { logger, .. } | TelemetryMode::All { logger, .. } => logger(message),
            _ => {}
        }
    }

    /// Returns collected metrics.
    pub fn take_metrics(self) -> TelemetryMetrics {
        self.metrics
    }
}
