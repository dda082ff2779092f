//! Swarm container and iteration snapshots

use serde::{Deserialize, Serialize};

use crate::error::{SwarmError, SwarmResult};
use crate::population::agent::Agent;
use crate::solution::{centroid, distance, Position};

/// The population together with the best agent seen so far
///
/// The global best is a snapshot copy, not an index: it survives later moves
/// of the agent it was taken from. Its fitness never increases, and an agent
/// only takes the place by beating the incumbent with `<`, so a NaN fitness
/// never becomes the global best.
#[derive(Clone, Debug)]
pub struct Swarm<S = ()> {
    agents: Vec<Agent<S>>,
    global_best: Agent<S>,
}

impl<S: Clone> Swarm<S> {
    /// Start a swarm from a single agent
    ///
    /// The incumbent starts at `+inf`; `first` replaces it only when its
    /// fitness compares lower.
    pub fn new(first: Agent<S>) -> Self {
        let mut global_best = first.clone();
        if first.fitness.is_nan() {
            global_best.fitness = f64::INFINITY;
        }
        Self {
            global_best,
            agents: vec![first],
        }
    }

    /// Build a swarm from a non-empty list of agents
    pub fn from_agents(agents: Vec<Agent<S>>) -> SwarmResult<Self> {
        let mut iter = agents.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| SwarmError::config("swarm needs at least one agent"))?;
        let mut swarm = Self::new(first);
        for agent in iter {
            swarm.push(agent);
        }
        Ok(swarm)
    }

    /// Append an agent, offering it as global best
    pub fn push(&mut self, agent: Agent<S>) {
        if agent.fitness < self.global_best.fitness {
            self.global_best = agent.clone();
        }
        self.agents.push(agent);
    }

    /// Offer agent `index` as the new global best
    ///
    /// Replaces the global best only on strictly lower fitness; ties keep the
    /// incumbent. Returns `true` when the global best changed.
    pub fn update_global_best(&mut self, index: usize) -> bool {
        let agent = &self.agents[index];
        if agent.fitness < self.global_best.fitness {
            self.global_best = agent.clone();
            true
        } else {
            false
        }
    }

    /// Snapshot of the swarm for the history
    pub fn snapshot(&self, iteration: usize) -> IterationState<S> {
        IterationState {
            iteration,
            agents: self.agents.clone(),
            global_best_position: self.global_best.position,
            global_best_fitness: self.global_best.fitness,
        }
    }
}

impl<S> Swarm<S> {
    /// Number of agents
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// A swarm is never empty once constructed
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// All agents
    pub fn agents(&self) -> &[Agent<S>] {
        &self.agents
    }

    /// All agents, mutably
    pub fn agents_mut(&mut self) -> &mut [Agent<S>] {
        &mut self.agents
    }

    /// Agent `index`
    pub fn agent(&self, index: usize) -> &Agent<S> {
        &self.agents[index]
    }

    /// Agent `index`, mutably
    pub fn agent_mut(&mut self, index: usize) -> &mut Agent<S> {
        &mut self.agents[index]
    }

    /// Best agent seen so far
    pub fn global_best(&self) -> &Agent<S> {
        &self.global_best
    }

    /// Fitness of the global best
    pub fn best_fitness(&self) -> f64 {
        self.global_best.fitness
    }

    /// Position of the global best
    pub fn best_position(&self) -> Position {
        self.global_best.position
    }

    /// Index of the current best agent in the population
    ///
    /// Ties resolve to the lowest index.
    pub fn best_index(&self) -> usize {
        let mut best = 0;
        let mut best_fitness = f64::INFINITY;
        for (i, agent) in self.agents.iter().enumerate() {
            if agent.fitness < best_fitness {
                best = i;
                best_fitness = agent.fitness;
            }
        }
        best
    }

    /// Positions of every agent
    pub fn positions(&self) -> Vec<Position> {
        self.agents.iter().map(|a| a.position).collect()
    }

    /// Centroid of the population
    pub fn centroid(&self) -> Position {
        centroid(self.agents.iter().map(|a| &a.position)).unwrap_or([0.0; 2])
    }

    /// Mean distance of the agents from their centroid
    pub fn diversity(&self) -> f64 {
        if self.agents.is_empty() {
            return 0.0;
        }
        let c = self.centroid();
        self.agents
            .iter()
            .map(|a| distance(&a.position, &c))
            .sum::<f64>()
            / self.agents.len() as f64
    }
}

/// Immutable record of one iteration
///
/// `iteration` 0 is the initial population.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationState<S = ()> {
    pub iteration: usize,
    pub agents: Vec<Agent<S>>,
    pub global_best_position: Position,
    pub global_best_fitness: f64,
}

impl<S> IterationState<S> {
    /// Lowest fitness in this snapshot's population
    pub fn min_fitness(&self) -> f64 {
        self.agents
            .iter()
            .map(|a| a.fitness)
            .fold(f64::INFINITY, f64::min)
    }
}
