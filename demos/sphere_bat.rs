//! Sphere Function with the Bat Algorithm family
//!
//! Runs every Bat variant and hybrid on the 2D Sphere from the same seed and
//! prints how far each one got, followed by the convergence summary of the
//! standard Bat Algorithm.

use rand::rngs::StdRng;
use rand::SeedableRng;
use swarmlab::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Sphere Function: Bat Algorithm Family ===\n");

    let builder = || {
        OptimizerBuilder::new()
            .population_size(30)
            .bounds(Bounds::symmetric(5.12))
            .objective_fn(benchmark_objective(Sphere))
    };

    // Every continuous Bat variant, configured with its defaults
    let bat_ids = ALGORITHM_IDS.iter().filter(|id| id.ends_with("_bat"));
    for id in bat_ids {
        let spec = AlgorithmSpec::default_for(id).ok_or("missing defaults")?;
        let mut runner = spec.build(builder(), Some(42), None)?;
        runner.run(200);
        let (position, fitness) = runner.best();
        println!(
            "  {:<18} best {:>12.3e} at ({:>8.5}, {:>8.5})",
            id, fitness, position[0], position[1]
        );
    }

    // A closer look at the standard variant
    let mut optimizer =
        builder().build_with_rng(StandardBat::default(), StdRng::seed_from_u64(42))?;
    optimizer.run(200);

    let stats = RunStats::from_history(optimizer.history());
    println!("\n{}", stats.summary());
    println!("  Stagnant for the last {} iterations", stats.stagnation(1e-12));

    let curve = convergence_curve(optimizer.history());
    println!("\nConvergence (every 40 iterations):");
    for (t, best) in curve.iter().enumerate().step_by(40) {
        println!("  t = {:>3}  best = {:.6e}", t, best);
    }

    Ok(())
}
