//! Bat × Particle Swarm Optimization

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::bat::standard::validate_bat_params;
use crate::algorithms::bat::{local_walk, loudness_gate, mean_loudness, BatParams, BatState};
use crate::error::SwarmResult;
use crate::operators::swarm::PsoVelocity;
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;

/// Weight of the bat frequency term in the blended velocity
const BAT_TERM_WEIGHT: f64 = 0.5;

/// Bat × PSO parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoBatParams {
    #[serde(flatten)]
    pub bat: BatParams,
    /// Inertia weight w
    pub inertia: f64,
    /// Cognitive coefficient c1
    pub cognitive: f64,
    /// Social coefficient c2
    pub social: f64,
}

impl Default for PsoBatParams {
    fn default() -> Self {
        let pso = PsoVelocity::default();
        Self {
            bat: BatParams::default(),
            inertia: pso.inertia,
            cognitive: pso.cognitive,
            social: pso.social,
        }
    }
}

impl PsoBatParams {
    pub fn with_bat(mut self, bat: BatParams) -> Self {
        self.bat = bat;
        self
    }

    pub fn with_coefficients(mut self, inertia: f64, cognitive: f64, social: f64) -> Self {
        self.inertia = inertia;
        self.cognitive = cognitive;
        self.social = social;
        self
    }
}

/// Bat Algorithm with a PSO velocity
///
/// `v' = w·v + c1·U·(pbest − x) + c2·U·(g − x) + 0.5·(x − g)·f`. Personal
/// bests follow every improving candidate, accepted or not.
#[derive(Clone, Debug, Default)]
pub struct PsoBat {
    params: PsoBatParams,
}

impl PsoBat {
    pub fn new(params: PsoBatParams) -> Self {
        Self { params }
    }
}

impl UpdateRule for PsoBat {
    type State = BatState;

    fn name(&self) -> &'static str {
        "pso_bat"
    }

    fn validate(&self, _config: &SwarmConfig) -> SwarmResult<()> {
        validate_bat_params(&self.params.bat)
    }

    fn init_agent<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent<BatState>,
        _config: &SwarmConfig,
        _rng: &mut R,
    ) {
        agent.velocity = Some([0.0; 2]);
        agent.state = self.params.bat.initial_state();
        agent.update_personal_best(agent.position, agent.fitness);
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
        let pso = PsoVelocity::new(self.params.inertia, self.params.cognitive, self.params.social);
        let t = ctx.iteration + 1;

        for (i, agent) in snapshot.iter().enumerate() {
            let best = swarm.best_position();
            let personal_best = agent
                .personal_best
                .map(|pb| pb.position)
                .unwrap_or(agent.position);
            let frequency = bat.frequency(rng.gen());

            let mut velocity = pso.update(
                &agent.velocity_or_zero(),
                &agent.position,
                &personal_best,
                &best,
                rng,
            );
            for (j, v) in velocity.iter_mut().enumerate() {
                *v += BAT_TERM_WEIGHT * (agent.position[j] - best[j]) * frequency;
            }
            let mut candidate = [
                agent.position[0] + velocity[0],
                agent.position[1] + velocity[1],
            ];
            if rng.gen::<f64>() > agent.state.pulse_rate {
                candidate = local_walk(&best, loudness, rng);
            }
            let (candidate, fitness) = ctx.clamp_and_evaluate(candidate);

            let current = swarm.agent_mut(i);
            current.velocity = Some(velocity);
            current.state.frequency = frequency;
            current.update_personal_best(candidate, fitness);
            if loudness_gate(current.state.loudness, fitness, current.fitness, rng) {
                current.move_to(candidate, fitness);
                current.state.on_accept(bat.alpha, bat.gamma, t);
            }
            swarm.update_global_best(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::builder::OptimizerBuilder;
    use crate::solution::Bounds;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_personal_best_never_worse_than_position() {
        let mut opt = OptimizerBuilder::new()
            .population_size(12)
            .bounds(Bounds::symmetric(5.0))
            .objective(|x, y| (x - 1.0).powi(2) + y * y)
            .build_with_rng(PsoBat::default(), StdRng::seed_from_u64(50))
            .unwrap();
        opt.run(30);
        for state in opt.history() {
            for agent in &state.agents {
                let pb = agent.personal_best.expect("personal best initialized");
                assert!(pb.fitness <= agent.fitness);
            }
        }
    }

    #[test]
    fn test_initial_personal_best_is_spawn_point() {
        let opt = OptimizerBuilder::new()
            .population_size(3)
            .bounds(Bounds::symmetric(1.0))
            .objective(|x, y| x + y)
            .build_with_rng(PsoBat::default(), StdRng::seed_from_u64(51))
            .unwrap();
        for agent in opt.swarm().agents() {
            let pb = agent.personal_best.unwrap();
            assert_eq!(pb.position, agent.position);
            assert_eq!(pb.fitness, agent.fitness);
        }
    }
}
