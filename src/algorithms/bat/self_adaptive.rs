//! Self-adaptive Bat Algorithm
//!
//! Frequency, loudness and pulse rate follow fixed functions of run progress
//! `p = min(t / T, 1)` instead of per-bat adaptation:
//!
//! - frequency `2 − 1.9p`
//! - loudness `A0·(1 − 0.9p)`
//! - pulse rate `0.9p·(1 − e^(−0.1t))`

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::bat::{local_walk, loudness_gate, velocity_move, BatState};
use crate::error::{SwarmError, SwarmResult};
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;

/// Self-adaptive Bat parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfAdaptiveBatParams {
    /// Run length used to normalize progress; must be positive
    pub max_iterations: usize,
    /// Loudness at the start of the run
    pub initial_loudness: f64,
}

impl Default for SelfAdaptiveBatParams {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            initial_loudness: 1.0,
        }
    }
}

impl SelfAdaptiveBatParams {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_loudness(mut self, initial_loudness: f64) -> Self {
        self.initial_loudness = initial_loudness;
        self
    }

    /// Progress fraction at iteration `t`
    pub fn progress(&self, t: usize) -> f64 {
        (t as f64 / self.max_iterations as f64).min(1.0)
    }

    /// Frequency at iteration `t`
    pub fn frequency(&self, t: usize) -> f64 {
        2.0 - 1.9 * self.progress(t)
    }

    /// Loudness at iteration `t`
    pub fn loudness(&self, t: usize) -> f64 {
        self.initial_loudness * (1.0 - 0.9 * self.progress(t))
    }

    /// Pulse rate at iteration `t`
    pub fn pulse_rate(&self, t: usize) -> f64 {
        0.9 * self.progress(t) * (1.0 - (-0.1 * t as f64).exp())
    }
}

/// Self-adaptive Bat Algorithm
#[derive(Clone, Debug, Default)]
pub struct SelfAdaptiveBat {
    params: SelfAdaptiveBatParams,
}

impl SelfAdaptiveBat {
    pub fn new(params: SelfAdaptiveBatParams) -> Self {
        Self { params }
    }
}

impl UpdateRule for SelfAdaptiveBat {
    type State = BatState;

    fn name(&self) -> &'static str {
        "self_adaptive_bat"
    }

    fn validate(&self, _config: &SwarmConfig) -> SwarmResult<()> {
        if self.params.max_iterations == 0 {
            return Err(SwarmError::Configuration(
                "max_iterations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn init_agent<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent<BatState>,
        _config: &SwarmConfig,
        _rng: &mut R,
    ) {
        agent.velocity = Some([0.0; 2]);
        agent.state = BatState {
            frequency: self.params.frequency(0),
            loudness: self.params.loudness(0),
            pulse_rate: self.params.pulse_rate(0),
            initial_pulse_rate: 0.0,
        };
    }

    fn update_population<R: Rng + ?Sized>(
        &mut self,
        swarm: &mut Swarm<BatState>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    ) {
        let t = ctx.iteration + 1;
        let frequency = self.params.frequency(t);
        let loudness = self.params.loudness(t);
        let pulse_rate = self.params.pulse_rate(t);
        let snapshot = swarm.agents().to_vec();

        for (i, bat) in snapshot.iter().enumerate() {
            let best = swarm.best_position();
            let (velocity, mut candidate) =
                velocity_move(&bat.position, &bat.velocity_or_zero(), &best, frequency);
            if rng.gen::<f64>() > pulse_rate {
                candidate = local_walk(&best, loudness, rng);
            }
            let (candidate, fitness) = ctx.clamp_and_evaluate(candidate);

            let agent = swarm.agent_mut(i);
            agent.velocity = Some(velocity);
            agent.state.frequency = frequency;
            agent.state.loudness = loudness;
            agent.state.pulse_rate = pulse_rate;
            if loudness_gate(loudness, fitness, agent.fitness, rng) {
                agent.move_to(candidate, fitness);
            }
            swarm.update_global_best(i);
        }
    }
}
