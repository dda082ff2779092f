//! Chaotic Lévy-flight Bat Algorithm
//!
//! A chaos map replaces the uniform frequency draw (one value per iteration,
//! shared by every bat), a Lévy jump is added to each velocity, and the local
//! walk consumes successive values of a second chaotic sequence.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::bat::standard::validate_bat_params;
use crate::algorithms::bat::{
    loudness_gate, mean_loudness, velocity_move, BatParams, BatState,
};
use crate::error::{SwarmError, SwarmResult};
use crate::numeric::chaos::{ChaosMap, ChaoticSequence};
use crate::numeric::levy::{LevyFlight, DEFAULT_BETA};
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;

/// Chaotic Lévy Bat parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaoticBatParams {
    #[serde(flatten)]
    pub bat: BatParams,
    /// Map driving frequency and local walk
    pub chaos_map: ChaosMap,
    /// Initial chaos state, in (0, 1)
    pub chaos_seed: f64,
    /// Lévy stability index
    pub levy_beta: f64,
    /// Lévy jump scale, as a fraction of the bounds range
    pub levy_scale: f64,
}

impl Default for ChaoticBatParams {
    fn default() -> Self {
        Self {
            bat: BatParams::default(),
            chaos_map: ChaosMap::Logistic,
            chaos_seed: 0.7,
            levy_beta: DEFAULT_BETA,
            levy_scale: 0.01,
        }
    }
}

impl ChaoticBatParams {
    pub fn with_bat(mut self, bat: BatParams) -> Self {
        self.bat = bat;
        self
    }

    pub fn with_chaos_map(mut self, map: ChaosMap) -> Self {
        self.chaos_map = map;
        self
    }

    pub fn with_chaos_seed(mut self, seed: f64) -> Self {
        self.chaos_seed = seed;
        self
    }

    pub fn with_levy(mut self, beta: f64, scale: f64) -> Self {
        self.levy_beta = beta;
        self.levy_scale = scale;
        self
    }
}

/// Chaotic Lévy-flight Bat Algorithm
#[derive(Clone, Debug)]
pub struct ChaoticBat {
    params: ChaoticBatParams,
    frequency_chaos: ChaoticSequence,
    walk_chaos: ChaoticSequence,
    levy: LevyFlight,
    chaos_value: f64,
}

impl ChaoticBat {
    pub fn new(params: ChaoticBatParams) -> Self {
        let frequency_chaos = ChaoticSequence::new(params.chaos_map, params.chaos_seed);
        let walk_chaos = ChaoticSequence::new(params.chaos_map, params.chaos_seed);
        let levy = LevyFlight::new(params.levy_beta);
        Self {
            chaos_value: params.chaos_seed,
            params,
            frequency_chaos,
            walk_chaos,
            levy,
        }
    }

    /// Chaos value driving the current iteration's frequency
    pub fn chaos_value(&self) -> f64 {
        self.chaos_value
    }
}

impl Default for ChaoticBat {
    fn default() -> Self {
        Self::new(ChaoticBatParams::default())
    }
}

impl UpdateRule for ChaoticBat {
    type State = BatState;

    fn name(&self) -> &'static str {
        "chaotic_bat"
    }

    fn validate(&self, _config: &SwarmConfig) -> SwarmResult<()> {
        validate_bat_params(&self.params.bat)?;
        if !(self.params.chaos_seed > 0.0 && self.params.chaos_seed < 1.0) {
            return Err(SwarmError::Configuration(format!(
                "chaos_seed must be in (0, 1), got {}",
                self.params.chaos_seed
            )));
        }
        if !(self.params.levy_beta > 0.0 && self.params.levy_beta <= 2.0) {
            return Err(SwarmError::Configuration(format!(
                "levy_beta must be in (0, 2], got {}",
                self.params.levy_beta
            )));
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
        agent.state = self.params.bat.initial_state();
    }

    fn before_iteration<R: Rng + ?Sized>(
        &mut self,
        _swarm: &Swarm<BatState>,
        _ctx: &SwarmContext<'_>,
        _rng: &mut R,
    ) {
        self.chaos_value = self.frequency_chaos.next_value();
    }

    fn update_population<R: Rng + ?Sized>(
        &mut self,
        swarm: &mut Swarm<BatState>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    ) {
        let snapshot = swarm.agents().to_vec();
        let loudness = mean_loudness(&snapshot);
        let range = ctx.bounds().range();
        let bat = &self.params.bat;
        let frequency = bat.frequency(self.chaos_value);
        let t = ctx.iteration + 1;

        for (i, agent) in snapshot.iter().enumerate() {
            let best = swarm.best_position();
            let (mut velocity, _) =
                velocity_move(&agent.position, &agent.velocity_or_zero(), &best, frequency);
            let jump = self.levy.sample_position(rng);
            for (v, l) in velocity.iter_mut().zip(jump.iter()) {
                *v += self.params.levy_scale * l * range;
            }
            let mut candidate = [
                agent.position[0] + velocity[0],
                agent.position[1] + velocity[1],
            ];

            if rng.gen::<f64>() > agent.state.pulse_rate {
                for (c, g) in candidate.iter_mut().zip(best.iter()) {
                    *c = g + loudness * self.walk_chaos.next_signed();
                }
            }
            let (candidate, fitness) = ctx.clamp_and_evaluate(candidate);

            let current = swarm.agent_mut(i);
            current.velocity = Some(velocity);
            current.state.frequency = frequency;
            if loudness_gate(current.state.loudness, fitness, current.fitness, rng) {
                current.move_to(candidate, fitness);
                current.state.on_accept(bat.alpha, bat.gamma, t);
            }
            swarm.update_global_best(i);
        }
    }

    fn reset(&mut self) {
        self.frequency_chaos.reset();
        self.walk_chaos.reset();
        self.chaos_value = self.params.chaos_seed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::builder::OptimizerBuilder;
    use crate::solution::Bounds;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn optimizer() -> crate::optimizer::Optimizer<ChaoticBat> {
        let params = ChaoticBatParams::default().with_chaos_seed(0.4);
        OptimizerBuilder::new()
            .population_size(10)
            .bounds(Bounds::symmetric(5.0))
            .objective(|x, y| x * x + y * y)
            .build_with_rng(ChaoticBat::new(params), StdRng::seed_from_u64(21))
            .unwrap()
    }

    #[test]
    fn test_one_shared_frequency_per_iteration() {
        let mut opt = optimizer();
        opt.step();
        assert_relative_eq!(opt.rule().chaos_value(), 0.96);
        for agent in &opt.history()[1].agents {
            assert_relative_eq!(agent.state.frequency, 2.0 * 0.96);
        }
        opt.step();
        assert_relative_eq!(opt.rule().chaos_value(), 0.1536, epsilon = 1e-12);
    }

    #[test]
    fn test_reset_restarts_chaos() {
        let mut opt = optimizer();
        opt.run(3);
        opt.reset();
        assert_relative_eq!(opt.rule().chaos_value(), 0.4);
        opt.step();
        assert_relative_eq!(opt.rule().chaos_value(), 0.96);
    }

    #[test]
    fn test_invalid_seed_rejected() {
        let result = OptimizerBuilder::new()
            .population_size(3)
            .bounds(Bounds::symmetric(1.0))
            .objective(|x, y| x + y)
            .build(ChaoticBat::new(ChaoticBatParams::default().with_chaos_seed(1.5)));
        assert!(result.is_err());
    }
}
