//! Diagnostics and statistics
//!
//! Per-iteration statistics computed from recorded snapshots, and run-level
//! series for plotting convergence.

use serde::{Deserialize, Serialize};

use crate::population::swarm::IterationState;
use crate::solution::{centroid, distance};

/// Statistics for a single iteration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// Iteration number
    pub iteration: usize,
    /// Lowest fitness in the population
    pub best_fitness: f64,
    /// Highest fitness in the population
    pub worst_fitness: f64,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Median fitness
    pub median_fitness: f64,
    /// Sample standard deviation of fitness
    pub fitness_std: f64,
    /// Mean distance of the agents from their centroid
    pub diversity: f64,
    /// Best fitness seen so far, population or not
    pub global_best_fitness: f64,
}

impl IterationStats {
    /// Compute statistics from a snapshot
    pub fn from_state<S>(state: &IterationState<S>) -> Self {
        let mut fitnesses: Vec<f64> = state.agents.iter().map(|a| a.fitness).collect();

        if fitnesses.is_empty() {
            return Self {
                iteration: state.iteration,
                best_fitness: f64::INFINITY,
                worst_fitness: f64::NEG_INFINITY,
                mean_fitness: 0.0,
                median_fitness: 0.0,
                fitness_std: 0.0,
                diversity: 0.0,
                global_best_fitness: state.global_best_fitness,
            };
        }

        fitnesses.sort_by(|a, b| a.total_cmp(b));

        let n = fitnesses.len();
        let best = fitnesses[0];
        let worst = fitnesses[n - 1];
        let mean = fitnesses.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (fitnesses[n / 2 - 1] + fitnesses[n / 2]) / 2.0
        } else {
            fitnesses[n / 2]
        };
        let variance = if n > 1 {
            fitnesses.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        let positions = state.agents.iter().map(|a| &a.position);
        let diversity = centroid(positions.clone())
            .map(|c| positions.map(|p| distance(p, &c)).sum::<f64>() / n as f64)
            .unwrap_or(0.0);

        Self {
            iteration: state.iteration,
            best_fitness: best,
            worst_fitness: worst,
            mean_fitness: mean,
            median_fitness: median,
            fitness_std: variance.sqrt(),
            diversity,
            global_best_fitness: state.global_best_fitness,
        }
    }
}

/// Statistics for a whole run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Statistics per iteration
    pub iterations: Vec<IterationStats>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for every snapshot of a history
    pub fn from_history<S>(history: &[IterationState<S>]) -> Self {
        Self {
            iterations: history.iter().map(IterationStats::from_state).collect(),
        }
    }

    /// Record one iteration's statistics
    pub fn record(&mut self, stats: IterationStats) {
        self.iterations.push(stats);
    }

    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    /// Final global best fitness
    pub fn final_best_fitness(&self) -> Option<f64> {
        self.iterations.last().map(|s| s.global_best_fitness)
    }

    pub fn mean_fitness_history(&self) -> Vec<f64> {
        self.iterations.iter().map(|s| s.mean_fitness).collect()
    }

    pub fn diversity_history(&self) -> Vec<f64> {
        self.iterations.iter().map(|s| s.diversity).collect()
    }

    /// Trailing iterations over which the global best improved by no more
    /// than `tolerance`
    pub fn stagnation(&self, tolerance: f64) -> usize {
        let Some(last) = self.iterations.last() else {
            return 0;
        };
        self.iterations
            .iter()
            .rev()
            .skip(1)
            .take_while(|s| s.global_best_fitness - last.global_best_fitness <= tolerance)
            .count()
    }

    /// One-paragraph summary
    pub fn summary(&self) -> String {
        let initial = self
            .iterations
            .first()
            .map(|s| s.global_best_fitness)
            .unwrap_or(f64::INFINITY);
        let last = self.final_best_fitness().unwrap_or(f64::INFINITY);
        let diversity = self.iterations.last().map(|s| s.diversity).unwrap_or(0.0);

        format!(
            "Run Summary:\n\
             - Iterations: {}\n\
             - Initial best: {:.6}\n\
             - Final best: {:.6}\n\
             - Final diversity: {:.4}",
            self.iterations.len().saturating_sub(1),
            initial,
            last,
            diversity
        )
    }
}

/// Global best fitness per recorded iteration
pub fn convergence_curve<S>(history: &[IterationState<S>]) -> Vec<f64> {
    history.iter().map(|s| s.global_best_fitness).collect()
}

pub mod prelude {
    pub use super::{convergence_curve, IterationStats, RunStats};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::agent::Agent;
    use approx::assert_relative_eq;

    fn state(iteration: usize, fitnesses: &[f64], global_best: f64) -> IterationState {
        let agents = fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| Agent::new([i as f64, 0.0], f))
            .collect();
        IterationState {
            iteration,
            agents,
            global_best_position: [0.0, 0.0],
            global_best_fitness: global_best,
        }
    }

    #[test]
    fn test_iteration_stats() {
        let stats = IterationStats::from_state(&state(4, &[50.0, 10.0, 30.0, 20.0, 40.0], 5.0));
        assert_eq!(stats.iteration, 4);
        assert_eq!(stats.best_fitness, 10.0);
        assert_eq!(stats.worst_fitness, 50.0);
        assert_eq!(stats.mean_fitness, 30.0);
        assert_eq!(stats.median_fitness, 30.0);
        assert!(stats.fitness_std > 15.0 && stats.fitness_std < 16.0);
        // x = 0..4, centroid 2
        assert_relative_eq!(stats.diversity, 1.2);
        assert_eq!(stats.global_best_fitness, 5.0);
    }

    #[test]
    fn test_empty_state() {
        let stats = IterationStats::from_state(&state(0, &[], 1.0));
        assert_eq!(stats.best_fitness, f64::INFINITY);
        assert_eq!(stats.diversity, 0.0);
    }

    #[test]
    fn test_convergence_curve_and_stagnation() {
        let history = vec![
            state(0, &[9.0], 9.0),
            state(1, &[4.0], 4.0),
            state(2, &[5.0], 4.0),
            state(3, &[6.0], 4.0),
        ];
        assert_eq!(convergence_curve(&history), vec![9.0, 4.0, 4.0, 4.0]);

        let stats = RunStats::from_history(&history);
        assert_eq!(stats.len(), 4);
        assert_eq!(stats.final_best_fitness(), Some(4.0));
        assert_eq!(stats.stagnation(0.0), 2);
        assert_eq!(stats.stagnation(10.0), 3);
        assert!(stats.summary().contains("Iterations: 3"));
    }
}
