//! Local-search refinement
//!
//! Short deterministic or stochastic descents started from a single point.
//! [`Polished`] wraps any update rule and refines the current best agent
//! after every iteration.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SwarmResult;
use crate::numeric::gaussian::normal;
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;
use crate::solution::{Position, DIMENSION};

const GOLDEN_SECTION_STEPS: usize = 20;
const MIN_LINE_STEP: f64 = 1e-10;

/// Local-search method
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum LocalSearch {
    /// Powell's direction-set method with golden-section line searches
    Powell {
        /// Direction-set sweeps
        iterations: usize,
        /// First trial step, as a fraction of the bounds range
        initial_step: f64,
    },
    /// Central-difference gradient descent with step halving
    Gradient {
        iterations: usize,
        /// Initial step length, as a fraction of the bounds range
        learning_rate: f64,
        /// Finite-difference spacing
        epsilon: f64,
    },
    /// Gaussian perturbations around the incumbent
    Perturbation {
        samples: usize,
        /// Standard deviation, as a fraction of the bounds range
        radius: f64,
    },
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self::Powell {
            iterations: 3,
            initial_step: 0.05,
        }
    }
}

impl LocalSearch {
    /// Refine `start`
    ///
    /// Every probe is clamped into bounds. The returned pair is fitness
    /// consistent and never worse than the start.
    pub fn refine<R: Rng + ?Sized>(
        &self,
        config: &SwarmConfig,
        start: Position,
        start_fitness: f64,
        rng: &mut R,
    ) -> (Position, f64) {
        let range = config.bounds.range();
        match *self {
            Self::Powell {
                iterations,
                initial_step,
            } => powell(config, start, start_fitness, iterations, initial_step * range),
            Self::Gradient {
                iterations,
                learning_rate,
                epsilon,
            } => gradient_descent(
                config,
                start,
                start_fitness,
                iterations,
                learning_rate * range,
                epsilon,
            ),
            Self::Perturbation { samples, radius } => {
                perturbation(config, start, start_fitness, samples, radius * range, rng)
            }
        }
    }
}

fn probe(config: &SwarmConfig, x: &Position, direction: &Position, t: f64) -> (Position, f64) {
    let p = config
        .bounds
        .clamp_position([x[0] + t * direction[0], x[1] + t * direction[1]]);
    (p, config.evaluate(&p))
}

/// Bracket a descent step along `direction`, then narrow it by golden section
fn line_search(
    config: &SwarmConfig,
    x: Position,
    fx: f64,
    direction: &Position,
    step: f64,
) -> (Position, f64) {
    let mut beta = step;
    let (_, mut f_beta) = probe(config, &x, direction, beta);
    while f_beta >= fx && beta > MIN_LINE_STEP {
        beta *= 0.5;
        f_beta = probe(config, &x, direction, beta).1;
    }

    if f_beta >= fx {
        beta = -step;
        f_beta = probe(config, &x, direction, beta).1;
        while f_beta >= fx && beta.abs() > MIN_LINE_STEP {
            beta *= 0.5;
            f_beta = probe(config, &x, direction, beta).1;
        }
    }

    if f_beta >= fx {
        return (x, fx);
    }

    let inv_phi = (5.0_f64.sqrt() - 1.0) / 2.0;
    let (mut a, mut b) = if beta > 0.0 {
        (0.0, 2.0 * beta)
    } else {
        (2.0 * beta, 0.0)
    };
    let mut x1 = b - inv_phi * (b - a);
    let mut x2 = a + inv_phi * (b - a);
    let mut f1 = probe(config, &x, direction, x1).1;
    let mut f2 = probe(config, &x, direction, x2).1;

    for _ in 0..GOLDEN_SECTION_STEPS {
        if f1 < f2 {
            b = x2;
            x2 = x1;
            f2 = f1;
            x1 = b - inv_phi * (b - a);
            f1 = probe(config, &x, direction, x1).1;
        } else {
            a = x1;
            x1 = x2;
            f1 = f2;
            x2 = a + inv_phi * (b - a);
            f2 = probe(config, &x, direction, x2).1;
        }
    }

    let mut best = probe(config, &x, direction, beta);
    for t in [x1, x2] {
        let candidate = probe(config, &x, direction, t);
        if candidate.1 < best.1 {
            best = candidate;
        }
    }
    best
}

fn powell(
    config: &SwarmConfig,
    start: Position,
    start_fitness: f64,
    iterations: usize,
    step: f64,
) -> (Position, f64) {
    let mut directions: [Position; DIMENSION] = [[1.0, 0.0], [0.0, 1.0]];
    let (mut x, mut fx) = (start, start_fitness);

    for _ in 0..iterations {
        let (x_start, fx_start) = (x, fx);
        let mut max_decrease = 0.0;
        let mut max_decrease_idx = 0;

        for (i, dir) in directions.iter().enumerate() {
            let (x_new, fx_new) = line_search(config, x, fx, dir, step);
            if fx - fx_new > max_decrease {
                max_decrease = fx - fx_new;
                max_decrease_idx = i;
            }
            x = x_new;
            fx = fx_new;
        }

        if fx >= fx_start {
            break;
        }

        let shift = [x[0] - x_start[0], x[1] - x_start[1]];
        let norm = (shift[0] * shift[0] + shift[1] * shift[1]).sqrt();
        if norm > MIN_LINE_STEP {
            let new_dir = [shift[0] / norm, shift[1] / norm];
            let (x_new, fx_new) = line_search(config, x, fx, &new_dir, step);
            if fx_new < fx {
                directions[max_decrease_idx] = new_dir;
                x = x_new;
                fx = fx_new;
            }
        }
    }
    (x, fx)
}

/// Central differences with both probes clamped into the bounds; at a wall
/// the difference becomes one-sided
fn central_gradient(config: &SwarmConfig, x: &Position, eps: f64) -> Position {
    let mut grad = [0.0; DIMENSION];
    for (i, g) in grad.iter_mut().enumerate() {
        let mut plus = *x;
        let mut minus = *x;
        plus[i] += eps;
        minus[i] -= eps;
        let plus = config.bounds.clamp_position(plus);
        let minus = config.bounds.clamp_position(minus);
        let span = plus[i] - minus[i];
        if span > 0.0 {
            *g = (config.evaluate(&plus) - config.evaluate(&minus)) / span;
        }
    }
    grad
}

fn gradient_descent(
    config: &SwarmConfig,
    start: Position,
    start_fitness: f64,
    iterations: usize,
    step: f64,
    eps: f64,
) -> (Position, f64) {
    let (mut x, mut fx) = (start, start_fitness);
    for _ in 0..iterations {
        let g = central_gradient(config, &x, eps);
        let norm = (g[0] * g[0] + g[1] * g[1]).sqrt();
        if norm == 0.0 || !norm.is_finite() {
            break;
        }
        let direction = [-g[0] / norm, -g[1] / norm];

        let mut t = step;
        let mut improved = false;
        while t > MIN_LINE_STEP {
            let (p, fp) = probe(config, &x, &direction, t);
            if fp < fx {
                x = p;
                fx = fp;
                improved = true;
                break;
            }
            t *= 0.5;
        }
        if !improved {
            break;
        }
    }
    (x, fx)
}

fn perturbation<R: Rng + ?Sized>(
    config: &SwarmConfig,
    start: Position,
    start_fitness: f64,
    samples: usize,
    std_dev: f64,
    rng: &mut R,
) -> (Position, f64) {
    let (mut x, mut fx) = (start, start_fitness);
    for _ in 0..samples {
        let candidate = config
            .bounds
            .clamp_position([normal(x[0], std_dev, rng), normal(x[1], std_dev, rng)]);
        let fc = config.evaluate(&candidate);
        if fc < fx {
            x = candidate;
            fx = fc;
        }
    }
    (x, fx)
}

/// Update rule followed by local refinement of the best agent
///
/// After the inner rule's iteration the current best agent is refined; its
/// position is replaced only on strict improvement.
#[derive(Clone, Debug)]
pub struct Polished<U> {
    inner: U,
    search: LocalSearch,
    improvements: usize,
}

impl<U: UpdateRule> Polished<U> {
    pub fn new(inner: U, search: LocalSearch) -> Self {
        Self {
            inner,
            search,
            improvements: 0,
        }
    }

    /// The wrapped rule
    pub fn inner(&self) -> &U {
        &self.inner
    }

    /// Refinements that improved the best agent since the last reset
    pub fn improvements(&self) -> usize {
        self.improvements
    }
}

impl<U: UpdateRule> UpdateRule for Polished<U> {
    type State = U::State;

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn validate(&self, config: &SwarmConfig) -> SwarmResult<()> {
        self.inner.validate(config)
    }

    fn init_agent<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent<Self::State>,
        config: &SwarmConfig,
        rng: &mut R,
    ) {
        self.inner.init_agent(agent, config, rng);
    }

    fn before_iteration<R: Rng + ?Sized>(
        &mut self,
        swarm: &Swarm<Self::State>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    ) {
        self.inner.before_iteration(swarm, ctx, rng);
    }

    fn update_population<R: Rng + ?Sized>(
        &mut self,
        swarm: &mut Swarm<Self::State>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    ) {
        self.inner.update_population(swarm, ctx, rng);
    }

    fn after_iteration<R: Rng + ?Sized>(
        &mut self,
        swarm: &mut Swarm<Self::State>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    ) {
        self.inner.after_iteration(swarm, ctx, rng);

        let index = swarm.best_index();
        let agent = swarm.agent(index);
        let (position, fitness) = self
            .search
            .refine(ctx.config, agent.position, agent.fitness, rng);
        if fitness < agent.fitness {
            let agent = swarm.agent_mut(index);
            agent.move_to(position, fitness);
            self.inner.on_improved(agent);
            swarm.update_global_best(index);
            self.improvements += 1;
        }
    }

    fn on_improved(&self, agent: &mut Agent<Self::State>) {
        self.inner.on_improved(agent);
    }

    fn reset(&mut self) {
        self.improvements = 0;
        self.inner.reset();
    }
}
