//! Invariants every continuous algorithm must honor
//!
//! Each algorithm is built from its default parameters through
//! `AlgorithmSpec` and checked frame by frame.

use std::sync::Arc;

use swarmlab::prelude::*;

const POPULATION: usize = 12;
const ITERATIONS: usize = 25;

fn landscapes() -> Vec<Arc<dyn BenchmarkFunction>> {
    ["rastrigin", "himmelblau", "rosenbrock"]
        .iter()
        .map(|name| benchmark_by_name(name).unwrap())
        .collect()
}

fn runner(id: &str, landscape: &Arc<dyn BenchmarkFunction>, seed: u64) -> Box<dyn SwarmRunner> {
    let objective = {
        let landscape = Arc::clone(landscape);
        Arc::new(move |x: f64, y: f64| landscape.evaluate(x, y)) as ObjectiveFn
    };
    let builder = OptimizerBuilder::new()
        .population_size(POPULATION)
        .bounds(landscape.bounds())
        .objective_fn(objective);
    AlgorithmSpec::default_for(id)
        .unwrap()
        .build(builder, Some(seed), None)
        .unwrap()
}

#[test]
fn fitness_matches_objective_in_every_frame() {
    for landscape in landscapes() {
        for id in ALGORITHM_IDS {
            let mut r = runner(id, &landscape, 11);
            r.run(ITERATIONS);
            for frame in r.frames() {
                for (p, f) in frame.positions.iter().zip(&frame.fitness) {
                    let expected = landscape.evaluate(p[0], p[1]);
                    assert_eq!(*f, expected, "{id} on {}", landscape.name());
                }
                let g = frame.global_best_position;
                assert_eq!(frame.global_best_fitness, landscape.evaluate(g[0], g[1]));
            }
        }
    }
}

#[test]
fn global_best_never_worsens() {
    for landscape in landscapes() {
        for id in ALGORITHM_IDS {
            let mut r = runner(id, &landscape, 12);
            r.run(ITERATIONS);
            let frames = r.frames();
            for pair in frames.windows(2) {
                assert!(
                    pair[1].global_best_fitness <= pair[0].global_best_fitness,
                    "{id} worsened at iteration {}",
                    pair[1].iteration
                );
            }
        }
    }
}

#[test]
fn global_best_is_minimum_ever_observed() {
    for landscape in landscapes() {
        for id in ALGORITHM_IDS {
            let mut r = runner(id, &landscape, 13);
            r.run(ITERATIONS);
            let mut seen = f64::INFINITY;
            for frame in r.frames() {
                for &f in &frame.fitness {
                    seen = seen.min(f);
                }
                assert_eq!(frame.global_best_fitness, seen, "{id} at {}", frame.iteration);
            }
        }
    }
}

#[test]
fn agents_stay_within_bounds() {
    for landscape in landscapes() {
        let bounds = landscape.bounds();
        for id in ALGORITHM_IDS {
            let mut r = runner(id, &landscape, 14);
            r.run(ITERATIONS);
            for frame in r.frames() {
                for p in &frame.positions {
                    assert!(bounds.contains_position(p), "{id} left bounds at {p:?}");
                }
            }
        }
    }
}

#[test]
fn history_grows_by_one_per_step() {
    let landscape = benchmark_by_name("sphere").unwrap();
    for id in ALGORITHM_IDS {
        let mut r = runner(id, &landscape, 15);
        assert_eq!(r.history_len(), 1);
        r.run(0);
        assert_eq!(r.history_len(), 1);
        r.run(7);
        assert_eq!(r.history_len(), 8);
        assert_eq!(r.iteration(), 7);
        for (k, frame) in r.frames().iter().enumerate() {
            assert_eq!(frame.iteration, k);
            assert_eq!(frame.positions.len(), POPULATION);
        }
    }
}

#[test]
fn reset_restores_initial_structure() {
    let landscape = benchmark_by_name("ackley").unwrap();
    for id in ALGORITHM_IDS {
        let mut r = runner(id, &landscape, 16);
        r.run(10);
        r.reset();
        assert_eq!(r.iteration(), 0);
        assert_eq!(r.history_len(), 1);
        let frame = r.frame(0).unwrap();
        assert_eq!(frame.iteration, 0);
        assert_eq!(frame.positions.len(), POPULATION);
        let min = frame.fitness.iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(frame.global_best_fitness, min);

        // the runner keeps working after a reset
        r.run(3);
        assert_eq!(r.history_len(), 4);
    }
}

#[test]
fn equal_fitness_never_replaces_global_best() {
    let first: Agent = Agent::new([1.0, 1.0], 2.0);
    let twin: Agent = Agent::new([-1.0, -1.0], 2.0);
    let mut swarm = Swarm::from_agents(vec![first, twin]).unwrap();
    assert_eq!(swarm.best_position(), [1.0, 1.0]);

    assert!(!swarm.update_global_best(1));
    assert_eq!(swarm.best_position(), [1.0, 1.0]);

    swarm.agent_mut(1).move_to([0.5, 0.5], 1.0);
    assert!(swarm.update_global_best(1));
    assert_eq!(swarm.best_position(), [0.5, 0.5]);
}

#[test]
fn history_json_carries_typed_payloads() {
    let landscape = benchmark_by_name("sphere").unwrap();
    let mut bats = runner("standard_bat", &landscape, 17);
    let mut fish = runner("standard_fish", &landscape, 17);
    bats.run(2);
    fish.run(2);

    let bats: serde_json::Value = serde_json::from_str(&bats.history_json().unwrap()).unwrap();
    let state = &bats[2]["agents"][0]["state"];
    assert!(state["loudness"].is_f64());
    assert!(state["pulse_rate"].is_f64());

    let fish: serde_json::Value = serde_json::from_str(&fish.history_json().unwrap()).unwrap();
    assert!(fish[0]["agents"][0]["state"]["last_behavior"].is_null());
    assert!(fish[2]["agents"][0]["state"]["last_behavior"].is_string());
}

#[test]
fn nan_fitness_never_becomes_global_best() {
    for id in ALGORITHM_IDS {
        for seed in 0..4 {
            let builder = OptimizerBuilder::new()
                .population_size(POPULATION)
                .bounds(Bounds::symmetric(5.0))
                .objective(|x, y| if x > 0.0 { f64::NAN } else { x * x + y * y });
            let mut r = AlgorithmSpec::default_for(id)
                .unwrap()
                .build(builder, Some(seed), None)
                .unwrap();
            r.run(ITERATIONS);

            let mut lowest = f64::INFINITY;
            for frame in r.frames() {
                lowest = frame.fitness.iter().copied().fold(lowest, f64::min);
                assert!(!frame.global_best_fitness.is_nan(), "{id} seed {seed}");
                assert_eq!(frame.global_best_fitness, lowest, "{id} seed {seed}");
            }
            assert!(r.best().1.is_finite(), "{id} seed {seed}");
        }
    }
}
