//! Run configuration and per-iteration context

use std::fmt;

use crate::fitness::objective::{Objective, ObjectiveFn};
use crate::solution::{Bounds, Position};

/// Validated configuration shared by every continuous optimizer
///
/// Supplied once at construction and never mutated afterwards.
#[derive(Clone)]
pub struct SwarmConfig {
    /// Number of agents
    pub population_size: usize,
    /// Search bounds, shared by both axes
    pub bounds: Bounds,
    /// Objective to minimize
    pub objective: ObjectiveFn,
}

impl SwarmConfig {
    /// Evaluate the objective at `position`
    pub fn evaluate(&self, position: &Position) -> f64 {
        self.objective.evaluate_position(position)
    }
}

impl fmt::Debug for SwarmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwarmConfig")
            .field("population_size", &self.population_size)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

/// Read-only view handed to update rules for one iteration
#[derive(Clone, Copy, Debug)]
pub struct SwarmContext<'a> {
    /// Run configuration
    pub config: &'a SwarmConfig,
    /// Iterations completed before this one
    pub iteration: usize,
}

impl<'a> SwarmContext<'a> {
    pub fn new(config: &'a SwarmConfig, iteration: usize) -> Self {
        Self { config, iteration }
    }

    /// Search bounds
    pub fn bounds(&self) -> &Bounds {
        &self.config.bounds
    }

    /// Evaluate the objective
    pub fn evaluate(&self, position: &Position) -> f64 {
        self.config.evaluate(position)
    }

    /// Clamp a proposal into bounds and evaluate it
    pub fn clamp_and_evaluate(&self, position: Position) -> (Position, f64) {
        let clamped = self.config.bounds.clamp_position(position);
        (clamped, self.config.evaluate(&clamped))
    }
}
