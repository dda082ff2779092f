//! Type-erased control surface
//!
//! [`Optimizer`] is generic over its rule and generator; renderers and the
//! wasm facade drive optimizers through `Box<dyn SwarmRunner>` instead and
//! read payload-free [`Frame`]s.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SwarmResult;
use crate::optimizer::base::Optimizer;
use crate::optimizer::rule::UpdateRule;
use crate::population::swarm::IterationState;
use crate::solution::Position;

/// Rendering snapshot of one iteration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub iteration: usize,
    pub positions: Vec<Position>,
    pub velocities: Vec<Option<Position>>,
    pub fitness: Vec<f64>,
    pub global_best_position: Position,
    pub global_best_fitness: f64,
}

impl<S> From<&IterationState<S>> for Frame {
    fn from(state: &IterationState<S>) -> Self {
        Self {
            iteration: state.iteration,
            positions: state.agents.iter().map(|a| a.position).collect(),
            velocities: state.agents.iter().map(|a| a.velocity).collect(),
            fitness: state.agents.iter().map(|a| a.fitness).collect(),
            global_best_position: state.global_best_position,
            global_best_fitness: state.global_best_fitness,
        }
    }
}

/// Object-safe optimizer control surface
pub trait SwarmRunner {
    /// Identifier of the update rule
    fn name(&self) -> &'static str;

    /// Run one iteration
    fn step(&mut self);

    /// Run `n` iterations
    fn run(&mut self, n: usize);

    /// Re-initialize with a fresh population
    fn reset(&mut self);

    /// Iterations completed
    fn iteration(&self) -> usize;

    /// Number of recorded snapshots
    fn history_len(&self) -> usize;

    /// Frame for iteration `index`
    fn frame(&self, index: usize) -> Option<Frame>;

    /// Frames for the whole history
    fn frames(&self) -> Vec<Frame>;

    /// Global best position and fitness
    fn best(&self) -> (Position, f64);

    /// Full history, payloads included, as JSON
    fn history_json(&self) -> SwarmResult<String>;
}

impl<U, R> SwarmRunner for Optimizer<U, R>
where
    U: UpdateRule,
    R: Rng,
{
    fn name(&self) -> &'static str {
        self.rule().name()
    }

    fn step(&mut self) {
        Optimizer::step(self)
    }

    fn run(&mut self, n: usize) {
        Optimizer::run(self, n)
    }

    fn reset(&mut self) {
        Optimizer::reset(self)
    }

    fn iteration(&self) -> usize {
        Optimizer::iteration(self)
    }

    fn history_len(&self) -> usize {
        self.history().len()
    }

    fn frame(&self, index: usize) -> Option<Frame> {
        self.history().get(index).map(Frame::from)
    }

    fn frames(&self) -> Vec<Frame> {
        self.history().iter().map(Frame::from).collect()
    }

    fn best(&self) -> (Position, f64) {
        (self.best_position(), self.best_fitness())
    }

    fn history_json(&self) -> SwarmResult<String> {
        Optimizer::history_json(self)
    }
}
