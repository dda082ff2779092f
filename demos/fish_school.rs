//! Artificial Fish Swarm on Himmelblau
//!
//! Himmelblau has four global minima. This example runs the three fish-school
//! variants and reports how often each behavior fired, then shows where the
//! school ended up.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use swarmlab::prelude::*;

fn behavior_counts(history: &[IterationState<FishState>]) -> HashMap<Behavior, usize> {
    let mut counts = HashMap::new();
    for state in history {
        for fish in &state.agents {
            if let Some(behavior) = fish.state.last_behavior {
                *counts.entry(behavior).or_insert(0) += 1;
            }
        }
    }
    counts
}

fn report<U>(label: &str, optimizer: &Optimizer<U>)
where
    U: UpdateRule<State = FishState>,
{
    let counts = behavior_counts(optimizer.history());
    let best = optimizer.best_position();
    println!("{label}");
    println!(
        "  best {:.6} at ({:.4}, {:.4})",
        optimizer.best_fitness(),
        best[0],
        best[1]
    );
    for behavior in [
        Behavior::Swarming,
        Behavior::Following,
        Behavior::Preying,
        Behavior::Random,
    ] {
        println!(
            "  {:<10} {}",
            format!("{behavior:?}"),
            counts.get(&behavior).copied().unwrap_or(0)
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Fish School on Himmelblau ===\n");

    let builder = || {
        OptimizerBuilder::new()
            .population_size(40)
            .bounds(Himmelblau.bounds())
            .objective_fn(benchmark_objective(Himmelblau))
    };

    let mut standard = builder().build(StandardFish::default())?;
    standard.run(150);
    report("Standard AFSA", &standard);

    let fast_params = FastFishParams::default().with_decay(0.97, 0.02);
    let mut fast = builder().build(FastFish::new(fast_params))?;
    fast.run(150);
    report("\nFast AFSA", &fast);
    println!("  final step {:.4}", fast.rule().current_step());

    let mut modified =
        builder().build_with_rng(ModifiedFish::default(), StdRng::seed_from_u64(7))?;
    modified.run(150);
    report("\nModified AFSA", &modified);
    println!("  final crowding {:.4}", modified.rule().current_crowding());

    // Where did the modified school settle?
    let minima = [
        [3.0, 2.0],
        [-2.805118, 3.131312],
        [-3.779310, -3.283186],
        [3.584428, -1.848126],
    ];
    let last = modified.history().last().ok_or("empty history")?;
    println!("\nFish near each minimum (radius 0.5):");
    for m in minima {
        let near = last
            .agents
            .iter()
            .filter(|fish| distance(&fish.position, &m) < 0.5)
            .count();
        println!("  ({:>9.5}, {:>9.5}): {}", m[0], m[1], near);
    }

    Ok(())
}
