//! Bat × Differential Evolution

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::bat::standard::validate_bat_params;
use crate::algorithms::bat::{
    local_walk, loudness_gate, mean_loudness, velocity_move, BatParams, BatState,
};
use crate::error::{SwarmError, SwarmResult};
use crate::operators::differential::{
    select_random_triple, BinomialCrossover, DifferentialMutation,
};
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;

/// Bat × DE parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeBatParams {
    #[serde(flatten)]
    pub bat: BatParams,
    /// Differential weight F
    pub differential_weight: f64,
    /// Crossover rate CR
    pub crossover_rate: f64,
}

impl Default for DeBatParams {
    fn default() -> Self {
        Self {
            bat: BatParams::default(),
            differential_weight: 0.5,
            crossover_rate: 0.9,
        }
    }
}

impl DeBatParams {
    pub fn with_bat(mut self, bat: BatParams) -> Self {
        self.bat = bat;
        self
    }

    pub fn with_differential_weight(mut self, f: f64) -> Self {
        self.differential_weight = f;
        self
    }

    pub fn with_crossover_rate(mut self, cr: f64) -> Self {
        self.crossover_rate = cr;
        self
    }
}

/// Bat Algorithm whose velocity term is aimed at a DE trial point instead of
/// the global best
///
/// Needs at least four bats so three distinct donors exist.
#[derive(Clone, Debug, Default)]
pub struct DeBat {
    params: DeBatParams,
}

impl DeBat {
    pub fn new(params: DeBatParams) -> Self {
        Self { params }
    }
}

impl UpdateRule for DeBat {
    type State = BatState;

    fn name(&self) -> &'static str {
        "de_bat"
    }

    fn validate(&self, config: &SwarmConfig) -> SwarmResult<()> {
        validate_bat_params(&self.params.bat)?;
        if config.population_size < 4 {
            return Err(SwarmError::Configuration(format!(
                "DE hybrid needs a population of at least 4, got {}",
                config.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.params.crossover_rate) {
            return Err(SwarmError::Configuration(format!(
                "crossover_rate must be in [0, 1], got {}",
                self.params.crossover_rate
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
        let mutation = DifferentialMutation::new(self.params.differential_weight);
        let crossover = BinomialCrossover::new(self.params.crossover_rate);
        let t = ctx.iteration + 1;

        for (i, agent) in snapshot.iter().enumerate() {
            let best = swarm.best_position();
            let (a, b, c) = select_random_triple(snapshot.len(), i, rng);
            let mutant = mutation.mutant(
                &snapshot[a].position,
                &snapshot[b].position,
                &snapshot[c].position,
            );
            let trial = crossover.cross(&agent.position, &mutant, rng);

            let frequency = bat.frequency(rng.gen());
            let (velocity, mut candidate) =
                velocity_move(&agent.position, &agent.velocity_or_zero(), &trial, frequency);
            if rng.gen::<f64>() > agent.state.pulse_rate {
                candidate = local_walk(&best, loudness, rng);
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
}
