//! Discrete Bat Algorithm on permutations
//!
//! The velocity of a bat is the swap sequence that would turn its tour into
//! the global best. Each swap is kept with probability equal to the bat's
//! normalized frequency, so high-frequency bats jump further toward the best
//! tour. The local move applies a random swap or a 2-opt reversal to the
//! global best.

use std::fmt;
use std::sync::Arc;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::algorithms::bat::standard::validate_bat_params;
use crate::algorithms::bat::{loudness_gate, BatParams, BatState};
use crate::error::{SwarmError, SwarmResult};
use crate::solution::{Permutation, Swap};

/// Objective over permutations, minimized
pub type PermutationObjective = Arc<dyn Fn(&Permutation) -> f64 + Send + Sync>;

/// Length of the closed tour visiting cities in `perm` order
///
/// `matrix[a][b]` is the distance from city `a` to city `b`. Tours of fewer
/// than two cities have length 0.
pub fn tour_length(perm: &Permutation, matrix: &[Vec<f64>]) -> f64 {
    let cities = perm.as_slice();
    if cities.len() < 2 {
        return 0.0;
    }
    let open: f64 = cities.windows(2).map(|w| matrix[w[0]][w[1]]).sum();
    open + matrix[cities[cities.len() - 1]][cities[0]]
}

/// Euclidean distance matrix for points in the plane
pub fn distance_matrix(points: &[[f64; 2]]) -> Vec<Vec<f64>> {
    points
        .iter()
        .map(|a| {
            points
                .iter()
                .map(|b| ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt())
                .collect()
        })
        .collect()
}

/// Discrete Bat parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscreteBatParams {
    #[serde(flatten)]
    pub bat: BatParams,
    /// Probability that the local move is a 2-opt reversal rather than a swap
    pub two_opt_rate: f64,
}

impl Default for DiscreteBatParams {
    fn default() -> Self {
        Self {
            bat: BatParams::default(),
            two_opt_rate: 0.5,
        }
    }
}

impl DiscreteBatParams {
    pub fn with_bat(mut self, bat: BatParams) -> Self {
        self.bat = bat;
        self
    }

    pub fn with_two_opt_rate(mut self, rate: f64) -> Self {
        self.two_opt_rate = rate;
        self
    }

    /// Swap retention probability for frequency `f`
    fn retention(&self, frequency: f64) -> f64 {
        let span = self.bat.f_max - self.bat.f_min;
        if span > 0.0 {
            ((frequency - self.bat.f_min) / span).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// A bat on a permutation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscreteBatAgent {
    pub tour: Permutation,
    pub fitness: f64,
    /// Swaps applied by the latest velocity move
    pub velocity: Vec<Swap>,
    pub state: BatState,
}

/// History entry of a [`DiscreteBat`] run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiscreteIterationState {
    pub iteration: usize,
    pub agents: Vec<DiscreteBatAgent>,
    pub global_best: Permutation,
    pub global_best_fitness: f64,
}

/// Self-contained Discrete Bat optimizer
pub struct DiscreteBat<R: Rng = StdRng> {
    params: DiscreteBatParams,
    population_size: usize,
    size: usize,
    objective: PermutationObjective,
    agents: Vec<DiscreteBatAgent>,
    global_best: DiscreteBatAgent,
    history: Vec<DiscreteIterationState>,
    iteration: usize,
    rng: R,
}

impl DiscreteBat<StdRng> {
    /// Entropy-seeded optimizer over permutations of `0..size`
    pub fn new<F>(
        population_size: usize,
        size: usize,
        params: DiscreteBatParams,
        objective: F,
    ) -> SwarmResult<Self>
    where
        F: Fn(&Permutation) -> f64 + Send + Sync + 'static,
    {
        Self::with_rng(
            population_size,
            size,
            params,
            Arc::new(objective),
            StdRng::from_entropy(),
        )
    }

    /// Entropy-seeded TSP solver over a distance matrix
    pub fn for_tsp(
        population_size: usize,
        matrix: Vec<Vec<f64>>,
        params: DiscreteBatParams,
    ) -> SwarmResult<Self> {
        if matrix.iter().any(|row| row.len() != matrix.len()) {
            return Err(SwarmError::InvalidStructure(
                "distance matrix must be square".to_string(),
            ));
        }
        let size = matrix.len();
        Self::new(population_size, size, params, move |perm| {
            tour_length(perm, &matrix)
        })
    }
}

impl<R: Rng> DiscreteBat<R> {
    /// Optimizer drawing from `rng`
    pub fn with_rng(
        population_size: usize,
        size: usize,
        params: DiscreteBatParams,
        objective: PermutationObjective,
        mut rng: R,
    ) -> SwarmResult<Self> {
        if population_size == 0 {
            return Err(SwarmError::config("population_size must be greater than zero"));
        }
        if size < 2 {
            return Err(SwarmError::config(format!(
                "permutations need at least 2 elements, got {size}"
            )));
        }
        if !(0.0..=1.0).contains(&params.two_opt_rate) {
            return Err(SwarmError::config(format!(
                "two_opt_rate must be in [0, 1], got {}",
                params.two_opt_rate
            )));
        }
        validate_bat_params(&params.bat)?;

        let (agents, global_best) = spawn(population_size, size, &params, &objective, &mut rng);
        debug!(
            "discrete_bat: initialized {} bats over {} elements, best fitness {}",
            population_size, size, global_best.fitness
        );
        let mut bat = Self {
            params,
            population_size,
            size,
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
        self.history.push(DiscreteIterationState {
            iteration: self.iteration,
            agents: self.agents.clone(),
            global_best: self.global_best.tour.clone(),
            global_best_fitness: self.global_best.fitness,
        });
    }

    fn local_move(&mut self, best: &Permutation) -> Permutation {
        let mut tour = best.clone();
        let i = self.rng.gen_range(0..self.size);
        let mut j = self.rng.gen_range(0..self.size - 1);
        if j >= i {
            j += 1;
        }
        if self.rng.gen::<f64>() < self.params.two_opt_rate {
            tour.reverse_segment(i.min(j), i.max(j));
        } else {
            tour.swap(i, j);
        }
        tour
    }

    /// Run one iteration
    pub fn step(&mut self) {
        let t = self.iteration + 1;
        let snapshot = self.agents.clone();

        for (i, agent) in snapshot.iter().enumerate() {
            let best = self.global_best.tour.clone();
            let frequency = self.params.bat.frequency(self.rng.gen());
            let keep = self.params.retention(frequency);

            // tours always share the configured size
            let route = agent.tour.swap_sequence_to(&best).unwrap_or_default();
            let velocity: Vec<Swap> = route
                .into_iter()
                .filter(|_| self.rng.gen::<f64>() < keep)
                .collect();
            let mut candidate = agent.tour.clone();
            candidate.apply_swaps(&velocity);
            if self.rng.gen::<f64>() > agent.state.pulse_rate {
                candidate = self.local_move(&best);
            }
            let fitness = (self.objective)(&candidate);

            let bat = &self.params.bat;
            let current = &mut self.agents[i];
            current.velocity = velocity;
            current.state.frequency = frequency;
            if loudness_gate(current.state.loudness, fitness, current.fitness, &mut self.rng) {
                current.tour = candidate;
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
            "discrete_bat: iteration {} best fitness {}",
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
            self.size,
            &self.params,
            &self.objective,
            &mut self.rng,
        );
        self.agents = agents;
        self.global_best = global_best;
        self.iteration = 0;
        self.history.clear();
        self.record();
        debug!("discrete_bat: reset, best fitness {}", self.global_best.fitness);
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn history(&self) -> &[DiscreteIterationState] {
        &self.history
    }

    /// Copy of the best bat seen so far
    pub fn global_best(&self) -> DiscreteBatAgent {
        self.global_best.clone()
    }

    pub fn agents(&self) -> &[DiscreteBatAgent] {
        &self.agents
    }
}

impl<R: Rng> fmt::Debug for DiscreteBat<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscreteBat")
            .field("params", &self.params)
            .field("population_size", &self.population_size)
            .field("size", &self.size)
            .field("iteration", &self.iteration)
            .finish_non_exhaustive()
    }
}

fn spawn<R: Rng + ?Sized>(
    population_size: usize,
    size: usize,
    params: &DiscreteBatParams,
    objective: &PermutationObjective,
    rng: &mut R,
) -> (Vec<DiscreteBatAgent>, DiscreteBatAgent) {
    let agents: Vec<DiscreteBatAgent> = (0..population_size)
        .map(|_| {
            let tour = Permutation::random(size, rng);
            let fitness = objective(&tour);
            DiscreteBatAgent {
                tour,
                fitness,
                velocity: Vec::new(),
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
