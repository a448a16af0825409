use super::*;
use std::sync::{Arc, Mutex};

fn create_population(fitness: &[(f64, f64, usize)]) -> Vec<Individual> {
    fitness
        .iter()
        .map(|&(served_ratio, makespan_score, rank)| {
            let mut individual = Individual::parse("RT3", "ST2").unwrap();
            individual.set_fitness(Fitness { served_ratio, makespan_score });
            individual.set_ranking(rank, 0.);
            individual
        })
        .collect()
}

fn create_logger() -> (InfoLogger, Arc<Mutex<Vec<String>>>) {
    let messages = Arc::new(Mutex::new(vec![]));
    let logger: InfoLogger = {
        let messages = messages.clone();
        Arc::new(move |message: &str| messages.lock().unwrap().push(message.to_string()))
    };

    (logger, messages)
}

#[test]
fn can_collect_generation_statistics() {
    let mut telemetry = Telemetry::new(TelemetryMode::None);
    let population = create_population(&[(0.5, 0.9, 0), (0.8, 0.1, 0), (0.4, 0.2, 1)]);

    telemetry.on_generation(0, population.as_slice(), Timer::start());
    telemetry.on_generation(1, population.as_slice(), Timer::start());
    let metrics = telemetry.take_metrics();

    assert_eq!(metrics.generations, 1);
    assert_eq!(metrics.statistics.len(), 2);
    assert!(metrics.history.is_empty());

    let statistics = &metrics.statistics[0];
    assert_eq!(statistics.generation, 0);
    assert_eq!(statistics.best_served_ratio, 0.8);
    assert_eq!(statistics.best_makespan_score, 0.9);
    assert_eq!(statistics.pareto_front_size, 2);
}

#[test]
fn can_track_population_history() {
    let mut telemetry = Telemetry::new(TelemetryMode::OnlyMetrics { track_every: 2 });
    let population = create_population(&[(0.5, 0.9, 0), (0.4, 0.2, 1)]);

    (0..5).for_each(|generation| telemetry.on_generation(generation, population.as_slice(), Timer::start()));
    let metrics = telemetry.take_metrics();

    assert_eq!(metrics.history.iter().map(|snapshot| snapshot.generation).collect::<Vec<_>>(), vec![0, 2, 4]);
    let snapshot = &metrics.history[0].individuals[1];
    assert_eq!(snapshot.routing, "RT3");
    assert_eq!(snapshot.sequencing, "ST2");
    assert_eq!(snapshot.rank, 1);
    assert_eq!(snapshot.fitness, Some(Fitness { served_ratio: 0.4, makespan_score: 0.2 }));
}

#[test]
fn can_log_generations_and_result() {
    let (logger, messages) = create_logger();
    let mut telemetry = Telemetry::new(TelemetryMode::OnlyLogging { logger, log_every: 2 });
    let population = create_population(&[(0.5, 0.9, 0)]);

    (0..4).for_each(|generation| telemetry.on_generation(generation, population.as_slice(), Timer::start()));
    telemetry.on_result(population.first());

    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 3);
    assert!(messages[0].contains("generation 0"));
    assert!(messages[1].contains("generation 2"));
    assert!(messages[2].contains("optimization is completed after 3 generations"));
    assert!(telemetry.take_metrics().history.is_empty());
}

#[test]
fn can_skip_logging_without_logger() {
    let (logger, messages) = create_logger();
    let mut telemetry = Telemetry::new(TelemetryMode::OnlyMetrics { track_every: 1 });
    telemetry.log("ignored");
    telemetry.on_result(None);

    logger("direct");

    assert_eq!(messages.lock().unwrap().clone(), vec!["direct".to_string()]);
}
