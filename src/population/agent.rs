//! Agent type
//!
//! An agent is one member of the swarm: a position in the search space, its
//! fitness, optional movement state and a typed per-family payload.

use serde::{Deserialize, Serialize};

use crate::solution::{distance, Position};

/// Best position an agent has visited so far
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonalBest {
    pub position: Position,
    pub fitness: f64,
}

/// A swarm member
///
/// Fitness is minimized. `fitness` always equals the objective evaluated at
/// `position`; every mutation goes through [`move_to`](Self::move_to) or
/// direct assignment of both fields together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent<S = ()> {
    /// Current position
    pub position: Position,
    /// Objective value at `position`
    pub fitness: f64,
    /// Velocity, for families that move by velocity
    pub velocity: Option<Position>,
    /// Personal best, for PSO-style memory
    pub personal_best: Option<PersonalBest>,
    /// Family-specific payload
    pub state: S,
}

impl<S: Default> Agent<S> {
    /// Create an agent with a default payload and no movement state
    pub fn new(position: Position, fitness: f64) -> Self {
        Self {
            position,
            fitness,
            velocity: None,
            personal_best: None,
            state: S::default(),
        }
    }
}

impl<S> Agent<S> {
    /// Create an agent with the given payload
    pub fn with_state(position: Position, fitness: f64, state: S) -> Self {
        Self {
            position,
            fitness,
            velocity: None,
            personal_best: None,
            state,
        }
    }

    /// Velocity, or the zero vector when the agent has none
    pub fn velocity_or_zero(&self) -> Position {
        self.velocity.unwrap_or([0.0; 2])
    }

    /// Replace position and fitness together
    pub fn move_to(&mut self, position: Position, fitness: f64) {
        self.position = position;
        self.fitness = fitness;
    }

    /// Strictly better (lower) fitness than `other`
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.fitness < other.fitness
    }

    /// Euclidean distance to another agent
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance(&self.position, &other.position)
    }

    /// Record `position` as the personal best if it strictly improves it
    ///
    /// Returns `true` when the personal best changed. An agent without a
    /// personal best always accepts.
    pub fn update_personal_best(&mut self, position: Position, fitness: f64) -> bool {
        let improves = self.personal_best.map_or(true, |pb| fitness < pb.fitness);
        if improves {
            self.personal_best = Some(PersonalBest { position, fitness });
        }
        improves
    }
}
