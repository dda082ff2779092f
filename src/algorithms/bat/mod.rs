//! Bat Algorithm family
//!
//! Bats move by frequency-tuned velocity toward/around the global best and
//! accept a proposal only if a loudness draw succeeds and the proposal is
//! strictly better. Loudness decays and pulse rate grows on every acceptance.
//!
//! Reference: Yang, X.-S. (2010). A New Metaheuristic Bat-Inspired Algorithm.

pub mod adaptive;
pub mod chaotic;
pub mod self_adaptive;
pub mod standard;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::optimizer::context::SwarmContext;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;
use crate::solution::{Position, DIMENSION};

pub use adaptive::{AdaptiveBat, AdaptiveBatParams};
pub use chaotic::{ChaoticBat, ChaoticBatParams};
pub use self_adaptive::{SelfAdaptiveBat, SelfAdaptiveBatParams};
pub use standard::StandardBat;

/// Standard Bat parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatParams {
    /// Lower end of the frequency range
    pub f_min: f64,
    /// Upper end of the frequency range
    pub f_max: f64,
    /// Loudness each bat starts with
    pub initial_loudness: f64,
    /// Pulse rate ceiling r0
    pub initial_pulse_rate: f64,
    /// Loudness decay factor applied on acceptance
    pub alpha: f64,
    /// Pulse-rate growth constant
    pub gamma: f64,
}

impl Default for BatParams {
    fn default() -> Self {
        Self {
            f_min: 0.0,
            f_max: 2.0,
            initial_loudness: 1.0,
            initial_pulse_rate: 0.5,
            alpha: 0.9,
            gamma: 0.9,
        }
    }
}

impl BatParams {
    pub fn with_frequency(mut self, f_min: f64, f_max: f64) -> Self {
        self.f_min = f_min;
        self.f_max = f_max;
        self
    }

    pub fn with_loudness(mut self, initial_loudness: f64) -> Self {
        self.initial_loudness = initial_loudness;
        self
    }

    pub fn with_pulse_rate(mut self, initial_pulse_rate: f64) -> Self {
        self.initial_pulse_rate = initial_pulse_rate;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Frequency for a draw `u` in [0, 1]
    pub fn frequency(&self, u: f64) -> f64 {
        self.f_min + (self.f_max - self.f_min) * u
    }

    /// Payload of a freshly spawned bat
    pub fn initial_state(&self) -> BatState {
        BatState {
            frequency: 0.0,
            loudness: self.initial_loudness,
            pulse_rate: self.initial_pulse_rate,
            initial_pulse_rate: self.initial_pulse_rate,
        }
    }
}

/// Per-bat adaptive state
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatState {
    /// Frequency drawn in the latest iteration
    pub frequency: f64,
    /// Acceptance gate; decays on acceptance
    pub loudness: f64,
    /// Probability of the global move; grows on acceptance
    pub pulse_rate: f64,
    /// Ceiling of the pulse rate
    pub initial_pulse_rate: f64,
}

impl BatState {
    /// Loudness decay and pulse-rate growth after an accepted move at
    /// iteration `t` (1-based)
    pub fn on_accept(&mut self, alpha: f64, gamma: f64, t: usize) {
        self.loudness *= alpha;
        self.pulse_rate = self.initial_pulse_rate * (1.0 - (-gamma * t as f64).exp());
    }
}

/// Payload types that carry a [`BatState`]
pub trait BatLike {
    fn bat(&self) -> &BatState;
    fn bat_mut(&mut self) -> &mut BatState;
}

impl BatLike for BatState {
    fn bat(&self) -> &BatState {
        self
    }

    fn bat_mut(&mut self) -> &mut BatState {
        self
    }
}

/// Mean loudness across a population; 0 for an empty slice
pub fn mean_loudness<S: BatLike>(agents: &[Agent<S>]) -> f64 {
    if agents.is_empty() {
        return 0.0;
    }
    agents.iter().map(|a| a.state.bat().loudness).sum::<f64>() / agents.len() as f64
}

/// Velocity update `v + (x − target)·f` and the moved position `x + v'`
pub fn velocity_move(
    position: &Position,
    velocity: &Position,
    target: &Position,
    frequency: f64,
) -> (Position, Position) {
    let mut v = *velocity;
    let mut x = *position;
    for j in 0..DIMENSION {
        v[j] += (position[j] - target[j]) * frequency;
        x[j] += v[j];
    }
    (v, x)
}

/// Random walk around `center`: `center + scale·ε`, ε ∈ [−1, 1] per axis
pub fn local_walk<R: Rng + ?Sized>(center: &Position, scale: f64, rng: &mut R) -> Position {
    let mut p = *center;
    for v in p.iter_mut() {
        *v += scale * rng.gen_range(-1.0..=1.0);
    }
    p
}

/// Loudness/better-fitness gate
///
/// Draws one uniform; accepts only if it falls below `loudness` and the
/// candidate is strictly better.
pub fn loudness_gate<R: Rng + ?Sized>(
    loudness: f64,
    candidate_fitness: f64,
    current_fitness: f64,
    rng: &mut R,
) -> bool {
    rng.gen::<f64>() < loudness && candidate_fitness < current_fitness
}

/// Per-bat movement inputs shared by the velocity-based variants
pub(crate) struct BatMove {
    pub frequency: f64,
    pub local_scale: f64,
}

/// One synchronous pass of the classic bat update
///
/// `plan` chooses frequency and local-walk scale per bat; everything else
/// (velocity move, pulse-rate branch, clamping, loudness gate, adaptive
/// state, global-best update) is shared.
pub(crate) fn classic_pass<R, F>(
    swarm: &mut Swarm<BatState>,
    ctx: &SwarmContext<'_>,
    params: &BatParams,
    rng: &mut R,
    mut plan: F,
) where
    R: Rng + ?Sized,
    F: FnMut(&Agent<BatState>, &mut R) -> BatMove,
{
    let snapshot = swarm.agents().to_vec();
    let t = ctx.iteration + 1;

    for (i, bat) in snapshot.iter().enumerate() {
        let best = swarm.best_position();
        let BatMove {
            frequency,
            local_scale,
        } = plan(bat, rng);

        let (velocity, mut candidate) =
            velocity_move(&bat.position, &bat.velocity_or_zero(), &best, frequency);
        if rng.gen::<f64>() > bat.state.pulse_rate {
            candidate = local_walk(&best, local_scale, rng);
        }
        let (candidate, fitness) = ctx.clamp_and_evaluate(candidate);

        let agent = swarm.agent_mut(i);
        agent.velocity = Some(velocity);
        agent.state.frequency = frequency;
        if loudness_gate(agent.state.loudness, fitness, agent.fitness, rng) {
            agent.move_to(candidate, fitness);
            agent.state.on_accept(params.alpha, params.gamma, t);
        }
        swarm.update_global_best(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_frequency_range() {
        let params = BatParams::default();
        assert_eq!(params.frequency(0.0), 0.0);
        assert_eq!(params.frequency(1.0), 2.0);
    }

    #[test]
    fn test_on_accept() {
        let mut state = BatParams::default().initial_state();
        state.on_accept(0.9, 0.9, 1);
        assert_relative_eq!(state.loudness, 0.9);
        assert_relative_eq!(state.pulse_rate, 0.5 * (1.0 - (-0.9_f64).exp()));
        for t in 2..200 {
            state.on_accept(0.9, 0.9, t);
        }
        assert!(state.loudness < 1e-8);
        assert!(state.pulse_rate <= 0.5);
        assert_relative_eq!(state.pulse_rate, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_velocity_move() {
        let (v, x) = velocity_move(&[2.0, 1.0], &[0.5, 0.0], &[1.0, 1.0], 2.0);
        assert_eq!(v, [2.5, 0.0]);
        assert_eq!(x, [4.5, 1.0]);
    }

    #[test]
    fn test_local_walk_scale() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            let p = local_walk(&[1.0, -1.0], 0.5, &mut rng);
            assert!((p[0] - 1.0).abs() <= 0.5);
            assert!((p[1] + 1.0).abs() <= 0.5);
        }
    }

    #[test]
    fn test_loudness_gate() {
        let mut rng = StdRng::seed_from_u64(9);
        assert!(!loudness_gate(0.0, 0.0, 1.0, &mut rng));
        assert!(!loudness_gate(1.0, 1.0, 1.0, &mut rng));
        assert!(loudness_gate(1.0, 0.5, 1.0, &mut rng));
    }

    #[test]
    fn test_mean_loudness() {
        let mut a: Agent<BatState> = Agent::new([0.0, 0.0], 0.0);
        let mut b = a.clone();
        a.state.loudness = 1.0;
        b.state.loudness = 0.5;
        assert_relative_eq!(mean_loudness(&[a, b]), 0.75);
        assert_eq!(mean_loudness::<BatState>(&[]), 0.0);
    }

    #[test]
    fn test_params_serde_defaults() {
        let params: BatParams = serde_json::from_str(r#"{"alpha": 0.95}"#).unwrap();
        assert_eq!(params.alpha, 0.95);
        assert_eq!(params.f_max, 2.0);
    }
}
