#[cfg(test)]
#[path = "../../tests/unit/solver/optimizer_test.rs"]
mod optimizer_test;

use super::*;
use crate::gp::{Fitness, Individual, create_population, crossover, mutate};
use crate::models::Problem;
use crate::simulation::{SimulationResult, SimulationSettings, simulate};
use moea::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// An outcome of the evolution.
pub struct EvolutionResult {
    /// A final population ordered by rank and crowding distance.
    pub population: Vec<Individual>,
    /// Individuals of the first front.
    pub pareto_front: Vec<Individual>,
    /// Collected telemetry: per generation statistics and population history.
    pub metrics: TelemetryMetrics,
    /// The front individual with the best served ratio (ties by makespan score) and its replay
    /// with event logging enabled.
    pub best: Option<(Individual, SimulationResult)>,
}

/// A Pareto front entry prepared for reporting.
#[derive(Clone, Debug, Serialize)]
pub struct FrontEntry {
    /// Routing tree in text form.
    pub routing: String,
    /// Sequencing tree in text form.
    pub sequencing: String,
    /// Served ratio.
    pub served_ratio: f64,
    /// Makespan score.
    pub makespan_score: f64,
    /// Raw makespan recovered from the makespan score.
    pub makespan: f64,
}

impl EvolutionResult {
    /// Returns the Pareto front sorted by served ratio descending, then by makespan score descending.
    pub fn front_summary(&self, problem: &Problem) -> Vec<FrontEntry> {
        let mut entries = self
            .pareto_front
            .iter()
            .filter_map(|individual| {
                individual.fitness().map(|fitness| FrontEntry {
                    routing: individual.routing().to_string(),
                    sequencing: individual.sequencing().to_string(),
                    served_ratio: fitness.served_ratio,
                    makespan_score: fitness.makespan_score,
                    makespan: (1. - fitness.makespan_score) * problem.close(),
                })
            })
            .collect::<Vec<_>>();

        entries.sort_by(|a, b| {
            compare_floats(b.served_ratio, a.served_ratio).then(compare_floats(b.makespan_score, a.makespan_score))
        });

        entries
    }
}

/// Evolves dispatch policies with NSGA-II.
pub struct Nsga2Optimizer {
    config: OptimizerConfig,
    environment: Environment,
    telemetry_mode: TelemetryMode,
    objective: DispatchObjective,
}

impl Nsga2Optimizer {
    /// Creates a new instance of `Nsga2Optimizer` which logs every generation using default logger.
    pub fn new(config: OptimizerConfig) -> GenericResult<Self> {
        config.validate().map_err(|err| err.context("invalid optimizer config"))?;

        let mut environment = Environment::new_with_seed(config.seed);
        if let Some(threads) = config.threads {
            environment.parallelism = Parallelism::new_with_threads(threads)
                .map_err(|err| GenericError::from(err).context("cannot create thread pool"))?;
        }

        let telemetry_mode = TelemetryMode::All { logger: environment.logger.clone(), log_every: 1, track_every: 1 };

        Ok(Self { config, environment, telemetry_mode, objective: DispatchObjective::default() })
    }

    /// Sets a logger keeping population tracking settings.
    pub fn with_logger(mut self, logger: InfoLogger) -> Self {
        self.telemetry_mode = match self.telemetry_mode {
            TelemetryMode::None => TelemetryMode::OnlyLogging { logger: logger.clone(), log_every: 1 },
            TelemetryMode::OnlyLogging { log_every, .. } => {
                TelemetryMode::OnlyLogging { logger: logger.clone(), log_every }
            }
            TelemetryMode::OnlyMetrics { track_every } => {
                TelemetryMode::All { logger: logger.clone(), log_every: 1, track_every }
            }
            TelemetryMode::All { log_every, track_every, .. } => {
                TelemetryMode::All { logger: logger.clone(), log_every, track_every }
            }
        };
        self.environment.logger = logger;

        self
    }

    /// Sets parallelism used to evaluate population.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.environment.parallelism = parallelism;
        self
    }

    /// Sets a random generator, replacing the one created from seed.
    pub fn with_random(mut self, random: Arc<dyn Random + Send + Sync>) -> Self {
        self.environment.random = random;
        self
    }

    /// Sets telemetry mode.
    pub fn with_telemetry(mut self, telemetry_mode: TelemetryMode) -> Self {
        self.telemetry_mode = telemetry_mode;
        self
    }

    /// Returns optimizer configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Runs the evolution on given problem.
    pub fn evolve(&self, problem: &Problem) -> EvolutionResult {
        let mut telemetry = Telemetry::new(self.telemetry_mode.clone());
        let random = self.environment.random.as_ref();

        telemetry.log(
            format!(
                "evolving population of {} individuals during {} generations on {} requests and {} vehicles",
                self.config.population_size,
                self.config.generations,
                problem.requests().len(),
                problem.vehicles().len()
            )
            .as_str(),
        );

        let generation_time = Timer::start();
        let initial_depth = self.config.max_depth.saturating_sub(1).max(1);
        let mut population = create_population(random, self.config.population_size, initial_depth);
        self.evaluate(problem, population.as_mut_slice());
        rank_population(population.as_mut_slice(), &self.objective);
        telemetry.on_generation(0, population.as_slice(), generation_time);

        for generation in 1..=self.config.generations {
            let generation_time = Timer::start();

            let mut offspring = self.create_offspring(population.as_slice());
            self.evaluate(problem, offspring.as_mut_slice());

            population.extend(offspring);
            population = select_survivors(population, self.config.population_size, &self.objective);

            telemetry.on_generation(generation, population.as_slice(), generation_time);
        }

        let best = find_best(population.as_slice()).cloned().map(|mut individual| {
            let settings = SimulationSettings { enable_logging: true, ..self.config.simulation.clone() };
            let result = simulate(problem, &mut individual, &settings);
            (individual, result)
        });

        telemetry.on_result(best.as_ref().map(|(individual, _)| individual));

        let pareto_front = population.iter().filter(|individual| individual.rank() == 0).cloned().collect();

        EvolutionResult { population, pareto_front, metrics: telemetry.take_metrics(), best }
    }

    /// Simulates every individual which has no fitness yet.
    fn evaluate(&self, problem: &Problem, population: &mut [Individual]) {
        let settings = SimulationSettings { enable_logging: false, ..self.config.simulation.clone() };

        self.environment.parallelism.for_each_mut(population, |individual| {
            if individual.fitness().is_none() {
                simulate(problem, individual, &settings);
            }
        });
    }

    /// Creates the next generation candidates: elites followed by selected, recombined and
    /// mutated children. All random draws happen here on the calling thread.
    fn create_offspring(&self, population: &[Individual]) -> Vec<Individual> {
        let random = self.environment.random.as_ref();
        let config = &self.config;

        let mut offspring = select_elites(population, config.elite_size());

        while offspring.len() < config.population_size {
            let first = tournament_select(random, population, config.tournament_size);
            let second = tournament_select(random, population, config.tournament_size);

            let (first, second) = if random.is_hit(config.crossover_rate) {
                crossover(random, first, second, config.max_depth)
            } else {
                (first.clone(), second.clone())
            };

            for child in [first, second] {
                let child =
                    if random.is_hit(config.mutation_rate) { mutate(random, &child, config.max_depth) } else { child };
                offspring.push(child);
            }
        }

        offspring.truncate(config.population_size);

        offspring
    }
}

/// Finds the first front individual with maximal served ratio, ties are broken by makespan score.
fn find_best(population: &[Individual]) -> Option<&Individual> {
    population
        .iter()
        .filter(|individual| individual.rank() == 0)
        .filter_map(|individual| individual.fitness().map(|fitness| (individual, fitness)))
        .fold(None::<(&Individual, Fitness)>, |best, (individual, fitness)| match best {
            Some((_, best_fitness))
                if compare_floats(fitness.served_ratio, best_fitness.served_ratio)
                    .then(compare_floats(fitness.makespan_score, best_fitness.makespan_score))
                    != Ordering::Greater =>
            {
                best
            }
            _ => Some((individual, fitness)),
        })
        .map(|(individual, _)| individual)
}
