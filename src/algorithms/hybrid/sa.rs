//! Bat × Simulated Annealing

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::bat::standard::validate_bat_params;
use crate::algorithms::bat::{local_walk, mean_loudness, velocity_move, BatParams, BatState};
use crate::error::{SwarmError, SwarmResult};
use crate::operators::annealing::Temperature;
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;

/// Bat × SA parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaBatParams {
    #[serde(flatten)]
    pub bat: BatParams,
    /// Temperature at the start of the run
    pub initial_temperature: f64,
    /// Geometric cooling factor applied once per iteration
    pub cooling_rate: f64,
}

impl Default for SaBatParams {
    fn default() -> Self {
        Self {
            bat: BatParams::default(),
            initial_temperature: 100.0,
            cooling_rate: 0.95,
        }
    }
}

impl SaBatParams {
    pub fn with_bat(mut self, bat: BatParams) -> Self {
        self.bat = bat;
        self
    }

    pub fn with_temperature(mut self, initial_temperature: f64) -> Self {
        self.initial_temperature = initial_temperature;
        self
    }

    pub fn with_cooling_rate(mut self, cooling_rate: f64) -> Self {
        self.cooling_rate = cooling_rate;
        self
    }
}

/// Bat Algorithm with Metropolis acceptance
///
/// A proposal is accepted when one uniform draw falls below the Metropolis
/// probability and a second one below the bat's loudness, so worse moves
/// can be accepted while the temperature is high.
#[derive(Clone, Debug)]
pub struct SaBat {
    params: SaBatParams,
    temperature: Temperature,
}

impl SaBat {
    pub fn new(params: SaBatParams) -> Self {
        let temperature = Temperature::new(params.initial_temperature, params.cooling_rate);
        Self {
            params,
            temperature,
        }
    }

    /// Current temperature
    pub fn temperature(&self) -> f64 {
        self.temperature.current()
    }
}

impl Default for SaBat {
    fn default() -> Self {
        Self::new(SaBatParams::default())
    }
}

impl UpdateRule for SaBat {
    type State = BatState;

    fn name(&self) -> &'static str {
        "sa_bat"
    }

    fn validate(&self, _config: &SwarmConfig) -> SwarmResult<()> {
        validate_bat_params(&self.params.bat)?;
        if !(self.params.initial_temperature > 0.0) {
            return Err(SwarmError::Configuration(format!(
                "initial_temperature must be positive, got {}",
                self.params.initial_temperature
            )));
        }
        if !(self.params.cooling_rate > 0.0 && self.params.cooling_rate <= 1.0) {
            return Err(SwarmError::Configuration(format!(
                "cooling_rate must be in (0, 1], got {}",
                self.params.cooling_rate
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

    fn update_population<R: Rng + ?Sized>(
        &mut self,
        swarm: &mut Swarm<BatState>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    ) {
        let snapshot = swarm.agents().to_vec();
        let loudness = mean_loudness(&snapshot);
        let bat = &self.params.bat;
        let t = ctx.iteration + 1;

        for (i, agent) in snapshot.iter().enumerate() {
            let best = swarm.best_position();
            let frequency = bat.frequency(rng.gen());
            let (velocity, mut candidate) =
                velocity_move(&agent.position, &agent.velocity_or_zero(), &best, frequency);
            if rng.gen::<f64>() > agent.state.pulse_rate {
                candidate = local_walk(&best, loudness, rng);
            }
            let (candidate, fitness) = ctx.clamp_and_evaluate(candidate);

            let current = swarm.agent_mut(i);
            current.velocity = Some(velocity);
            current.state.frequency = frequency;
            let acceptance = self.temperature.acceptance(fitness - current.fitness);
            if rng.gen::<f64>() < acceptance && rng.gen::<f64>() < current.state.loudness {
                current.move_to(candidate, fitness);
                current.state.on_accept(bat.alpha, bat.gamma, t);
            }
            swarm.update_global_best(i);
        }
    }

    fn after_iteration<R: Rng + ?Sized>(
        &mut self,
        _swarm: &mut Swarm<BatState>,
        _ctx: &SwarmContext<'_>,
        _rng: &mut R,
    ) {
        self.temperature.cool();
    }

    fn reset(&mut self) {
        self.temperature.reset();
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

    fn optimizer() -> crate::optimizer::Optimizer<SaBat> {
        let params = SaBatParams::default()
            .with_temperature(10.0)
            .with_cooling_rate(0.5);
        OptimizerBuilder::new()
            .population_size(8)
            .bounds(Bounds::symmetric(4.0))
            .objective(|x, y| x * x + y * y)
            .build_with_rng(SaBat::new(params), StdRng::seed_from_u64(60))
            .unwrap()
    }

    #[test]
    fn test_temperature_cools_once_per_iteration() {
        let mut opt = optimizer();
        opt.run(3);
        assert_relative_eq!(opt.rule().temperature(), 1.25);
    }

    #[test]
    fn test_reset_restores_temperature() {
        let mut opt = optimizer();
        opt.run(5);
        opt.reset();
        assert_relative_eq!(opt.rule().temperature(), 10.0);
    }

    #[test]
    fn test_global_best_monotone_despite_worse_acceptance() {
        // hot, never cooling and always loud: nearly every proposal is taken
        let params = SaBatParams::default()
            .with_bat(BatParams::default().with_loudness(1.0).with_alpha(1.0))
            .with_temperature(1e6)
            .with_cooling_rate(1.0);
        let mut opt = OptimizerBuilder::new()
            .population_size(8)
            .bounds(Bounds::symmetric(4.0))
            .objective(|x, y| x * x + y * y)
            .build_with_rng(SaBat::new(params), StdRng::seed_from_u64(61))
            .unwrap();
        opt.run(40);

        let mut worsened = 0;
        for pair in opt.history().windows(2) {
            assert!(pair[1].global_best_fitness <= pair[0].global_best_fitness);
            worsened += pair[0]
                .agents
                .iter()
                .zip(&pair[1].agents)
                .filter(|(before, after)| after.fitness > before.fitness)
                .count();
        }
        assert!(worsened > 0);
    }

    #[test]
    fn test_invalid_cooling_rejected() {
        let result = OptimizerBuilder::new()
            .population_size(3)
            .bounds(Bounds::symmetric(1.0))
            .objective(|x, y| x + y)
            .build(SaBat::new(SaBatParams::default().with_cooling_rate(1.5)));
        assert!(result.is_err());
    }
}
