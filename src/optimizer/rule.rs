//! Update rule strategy
//!
//! Each algorithm variant is an [`UpdateRule`]: a per-iteration population
//! update plugged into the shared [`Optimizer`](crate::optimizer::Optimizer)
//! loop.

use std::fmt::Debug;

use rand::Rng;
use serde::Serialize;

use crate::error::SwarmResult;
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;

/// Population update strategy
///
/// One iteration runs `before_iteration`, `update_population` and
/// `after_iteration` in that order. Implementations must keep every agent's
/// fitness equal to the objective at its position and must offer each
/// finalized agent to [`Swarm::update_global_best`].
pub trait UpdateRule {
    /// Per-agent payload
    type State: Clone + Debug + Default + Serialize;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Reject parameter combinations that cannot run
    fn validate(&self, _config: &SwarmConfig) -> SwarmResult<()> {
        Ok(())
    }

    /// Fill in movement state and payload of a freshly spawned agent
    fn init_agent<R: Rng + ?Sized>(
        &self,
        _agent: &mut Agent<Self::State>,
        _config: &SwarmConfig,
        _rng: &mut R,
    ) {
    }

    /// Hook run before the population update
    fn before_iteration<R: Rng + ?Sized>(
        &mut self,
        _swarm: &Swarm<Self::State>,
        _ctx: &SwarmContext<'_>,
        _rng: &mut R,
    ) {
    }

    /// Move every agent once
    fn update_population<R: Rng + ?Sized>(
        &mut self,
        swarm: &mut Swarm<Self::State>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    );

    /// Hook run after the population update
    fn after_iteration<R: Rng + ?Sized>(
        &mut self,
        _swarm: &mut Swarm<Self::State>,
        _ctx: &SwarmContext<'_>,
        _rng: &mut R,
    ) {
    }

    /// Hook run when something outside the update moved `agent` to a strictly
    /// better position, such as local-search polishing
    ///
    /// The default refreshes the personal best of agents that keep one.
    fn on_improved(&self, agent: &mut Agent<Self::State>) {
        if agent.personal_best.is_some() {
            agent.update_personal_best(agent.position, agent.fitness);
        }
    }

    /// Restore variant-local adaptive state to its configured values
    fn reset(&mut self) {}
}
