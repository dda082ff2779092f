//! Binary Bat Algorithm
//!
//! Bats live on bit strings. The continuous velocity update is kept per bit
//! and a sigmoid transfer `S(v) = 1 / (1 + e^(−v))` turns it into the
//! probability of the bit being set. The local move flips one random bit of
//! the global best.
//!
//! Reference: Nakamura, R. Y. M. et al. (2012). BBA: A Binary Bat Algorithm
//! for Feature Selection.

use std::fmt;
use std::sync::Arc;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::algorithms::bat::standard::validate_bat_params;
use crate::algorithms::bat::{loudness_gate, BatParams, BatState};
use crate::error::{SwarmError, SwarmResult};
use crate::solution::BitString;

/// Objective over bit strings, minimized
pub type BitObjective = Arc<dyn Fn(&BitString) -> f64 + Send + Sync>;

/// Sigmoid transfer function
pub fn sigmoid(v: f64) -> f64 {
    1.0 / (1.0 + (-v).exp())
}

/// Binary Bat parameters
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryBatParams {
    #[serde(flatten)]
    pub bat: BatParams,
}

impl BinaryBatParams {
    pub fn with_bat(mut self, bat: BatParams) -> Self {
        self.bat = bat;
        self
    }
}

/// A bat on a bit string
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryBatAgent {
    pub bits: BitString,
    pub fitness: f64,
    /// One real velocity per bit
    pub velocity: Vec<f64>,
    pub state: BatState,
}

/// History entry of a [`BinaryBat`] run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinaryIterationState {
    pub iteration: usize,
    pub agents: Vec<BinaryBatAgent>,
    pub global_best: BitString,
    pub global_best_fitness: f64,
}

/// Self-contained Binary Bat optimizer
///
/// Same control surface as the continuous optimizer: construction records
/// iteration 0 and every `step` appends one history entry.
pub struct BinaryBat<R: Rng = StdRng> {
    params: BinaryBatParams,
    population_size: usize,
    bit_length: usize,
    objective: BitObjective,
    agents: Vec<BinaryBatAgent>,
    global_best: BinaryBatAgent,
    history: Vec<BinaryIterationState>,
    iteration: usize,
    rng: R,
}

impl BinaryBat<StdRng> {
    /// Entropy-seeded optimizer
    pub fn new<F>(
        population_size: usize,
        bit_length: usize,
        params: BinaryBatParams,
        objective: F,
    ) -> SwarmResult<Self>
    where
        F: Fn(&BitString) -> f64 + Send + Sync + 'static,
    {
        Self::with_rng(
            population_size,
            bit_length,
            params,
            Arc::new(objective),
            StdRng::from_entropy(),
        )
    }
}

impl<R: Rng> BinaryBat<R> {
    /// Optimizer drawing from `rng`
    pub fn with_rng(
        population_size: usize,
        bit_length: usize,
        params: BinaryBatParams,
        objective: BitObjective,
        mut rng: R,
    ) -> SwarmResult<Self> {
        if population_size == 0 {
            return Err(SwarmError::config("population_size must be greater than zero"));
        }
        if bit_length == 0 {
            return Err(SwarmError::config("bit_length must be greater than zero"));
        }
        validate_bat_params(&params.bat)?;

        let (agents, global_best) =
            spawn(population_size, bit_length, &params, &objective, &mut rng);
        debug!(
            "binary_bat: initialized {} bats of {} bits, best fitness {}",
            population_size, bit_length, global_best.fitness
        );
        let mut bat = Self {
            params,
            population_size,
            bit_length,
            objective,
            agents,
            global_best,
            history: Vec::new(),
            iteration: 0,
            rng,
        };
        bat.record();
        Ok(bat)
    }

    fn record(&mut self) {
        self.history.push(BinaryIterationState {
            iteration: self.iteration,
            agents: self.agents.clone(),
            global_best: self.global_best.bits.clone(),
            global_best_fitness: self.global_best.fitness,
        });
    }

    /// Run one iteration
    pub fn step(&mut self) {
        let bat = &self.params.bat;
        let t = self.iteration + 1;
        let snapshot = self.agents.clone();

        for (i, agent) in snapshot.iter().enumerate() {
            let best = self.global_best.bits.clone();
            let frequency = bat.frequency(self.rng.gen());

            let velocity: Vec<f64> = agent
                .velocity
                .iter()
                .enumerate()
                .map(|(j, v)| v + (agent.bits.value(j) - best.value(j)) * frequency)
                .collect();
            let mut candidate = BitString::new(
                velocity
                    .iter()
                    .map(|&v| self.rng.gen::<f64>() < sigmoid(v))
                    .collect(),
            );
            if self.rng.gen::<f64>() > agent.state.pulse_rate {
                candidate = best;
                candidate.flip(self.rng.gen_range(0..self.bit_length));
            }
            let fitness = (self.objective)(&candidate);

            let current = &mut self.agents[i];
            current.velocity = velocity;
            current.state.frequency = frequency;
            if loudness_gate(current.state.loudness, fitness, current.fitness, &mut self.rng) {
                current.bits = candidate;
                current.fitness = fitness;
                current.state.on_accept(bat.alpha, bat.gamma, t);
            }
            if current.fitness < self.global_best.fitness {
                self.global_best = current.clone();
            }
        }

        self.iteration += 1;
        self.record();
        trace!(
            "binary_bat: iteration {} best fitness {}",
            self.iteration,
            self.global_best.fitness
        );
    }

    /// Run `n` iterations
    pub fn run(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Re-initialize with a fresh population
    pub fn reset(&mut self) {
        let (agents, global_best) = spawn(
            self.population_size,
            self.bit_length,
            &self.params,
            &self.objective,
            &mut self.rng,
        );
        self.agents = agents;
        self.global_best = global_best;
        self.iteration = 0;
        self.history.clear();
        self.record();
        debug!("binary_bat: reset, best fitness {}", self.global_best.fitness);
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn history(&self) -> &[BinaryIterationState] {
        &self.history
    }

    /// Copy of the best bat seen so far
    pub fn global_best(&self) -> BinaryBatAgent {
        self.global_best.clone()
    }

    pub fn agents(&self) -> &[BinaryBatAgent] {
        &self.agents
    }
}

impl<R: Rng> fmt::Debug for BinaryBat<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryBat")
            .field("params", &self.params)
            .field("population_size", &self.population_size)
            .field("bit_length", &self.bit_length)
            .field("iteration", &self.iteration)
            .finish_non_exhaustive()
    }
}

fn spawn<R: Rng + ?Sized>(
    population_size: usize,
    bit_length: usize,
    params: &BinaryBatParams,
    objective: &BitObjective,
    rng: &mut R,
) -> (Vec<BinaryBatAgent>, BinaryBatAgent) {
    let agents: Vec<BinaryBatAgent> = (0..population_size)
        .map(|_| {
            let bits = BitString::random(bit_length, rng);
            let fitness = objective(&bits);
            BinaryBatAgent {
                bits,
                fitness,
                velocity: vec![0.0; bit_length],
                state: params.bat.initial_state(),
            }
        })
        .collect();
    let mut best = agents[0].clone();
    best.fitness = f64::INFINITY;
    for agent in &agents {
        if agent.fitness < best.fitness {
            best = agent.clone();
        }
    }
    (agents, best)
}
