//! Shared population-update loop

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::SwarmResult;
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::agent::Agent;
use crate::population::swarm::{IterationState, Swarm};
use crate::solution::Position;

/// Continuous 2D optimizer driven by an [`UpdateRule`]
///
/// Construction (through [`OptimizerBuilder`](crate::optimizer::OptimizerBuilder))
/// spawns the population and records iteration 0. Every [`step`](Self::step)
/// appends exactly one history entry.
pub struct Optimizer<U: UpdateRule, R: Rng = StdRng> {
    config: SwarmConfig,
    rule: U,
    swarm: Swarm<U::State>,
    history: Vec<IterationState<U::State>>,
    iteration: usize,
    rng: R,
}

impl<U: UpdateRule, R: Rng> Optimizer<U, R> {
    /// Spawn the population for an already validated configuration
    pub(crate) fn new(config: SwarmConfig, rule: U, mut rng: R) -> Self {
        let swarm = spawn_swarm(&config, &rule, &mut rng);
        debug!(
            "{}: initialized {} agents, best fitness {}",
            rule.name(),
            swarm.len(),
            swarm.best_fitness()
        );
        let history = vec![swarm.snapshot(0)];
        Self {
            config,
            rule,
            swarm,
            history,
            iteration: 0,
            rng,
        }
    }

    /// Run one iteration
    pub fn step(&mut self) {
        let ctx = SwarmContext::new(&self.config, self.iteration);
        self.rule.before_iteration(&self.swarm, &ctx, &mut self.rng);
        self.rule.update_population(&mut self.swarm, &ctx, &mut self.rng);
        self.rule.after_iteration(&mut self.swarm, &ctx, &mut self.rng);

        self.iteration += 1;
        self.history.push(self.swarm.snapshot(self.iteration));
        trace!(
            "{}: iteration {} best fitness {}",
            self.rule.name(),
            self.iteration,
            self.swarm.best_fitness()
        );
    }

    /// Run `n` iterations
    pub fn run(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Re-initialize with a fresh population
    ///
    /// History is cleared back to a single iteration-0 entry and the rule's
    /// adaptive state is restored.
    pub fn reset(&mut self) {
        self.iteration = 0;
        self.history.clear();
        self.rule.reset();
        self.swarm = spawn_swarm(&self.config, &self.rule, &mut self.rng);
        self.history.push(self.swarm.snapshot(0));
        debug!(
            "{}: reset, best fitness {}",
            self.rule.name(),
            self.swarm.best_fitness()
        );
    }

    /// Iterations completed since construction or the last reset
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Snapshots, indexed by iteration
    pub fn history(&self) -> &[IterationState<U::State>] {
        &self.history
    }

    /// Copy of the best agent seen so far
    pub fn global_best(&self) -> Agent<U::State> {
        self.swarm.global_best().clone()
    }

    /// Fitness of the best agent seen so far
    pub fn best_fitness(&self) -> f64 {
        self.swarm.best_fitness()
    }

    /// Position of the best agent seen so far
    pub fn best_position(&self) -> Position {
        self.swarm.best_position()
    }

    /// Current population
    pub fn swarm(&self) -> &Swarm<U::State> {
        &self.swarm
    }

    /// Run configuration
    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// The update rule
    pub fn rule(&self) -> &U {
        &self.rule
    }

    /// History serialized as a JSON array
    pub fn history_json(&self) -> SwarmResult<String> {
        Ok(serde_json::to_string(&self.history)?)
    }
}

fn spawn_swarm<U, R>(config: &SwarmConfig, rule: &U, rng: &mut R) -> Swarm<U::State>
where
    U: UpdateRule,
    R: Rng + ?Sized,
{
    let spawn = |rng: &mut R| {
        let position = config.bounds.random_position(rng);
        let mut agent = Agent::new(position, config.evaluate(&position));
        rule.init_agent(&mut agent, config, rng);
        agent
    };

    let mut swarm = Swarm::new(spawn(rng));
    for _ in 1..config.population_size {
        swarm.push(spawn(rng));
    }
    swarm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::objective::objective_fn;
    use crate::optimizer::builder::OptimizerBuilder;
    use crate::solution::Bounds;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Moves every agent to a uniform random point and keeps it if better
    struct RandomProbe {
        resets: usize,
    }

    impl UpdateRule for RandomProbe {
        type State = ();

        fn name(&self) -> &'static str {
            "random_probe"
        }

        fn update_population<R: Rng + ?Sized>(
            &mut self,
            swarm: &mut Swarm<()>,
            ctx: &SwarmContext<'_>,
            rng: &mut R,
        ) {
            for i in 0..swarm.len() {
                let candidate = ctx.bounds().random_position(rng);
                let fitness = ctx.evaluate(&candidate);
                if fitness < swarm.agent(i).fitness {
                    swarm.agent_mut(i).move_to(candidate, fitness);
                }
                swarm.update_global_best(i);
            }
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    fn optimizer(seed: u64) -> Optimizer<RandomProbe> {
        OptimizerBuilder::new()
            .population_size(8)
            .bounds(Bounds::symmetric(2.0))
            .objective(|x, y| x * x + y * y)
            .build_with_rng(RandomProbe { resets: 0 }, StdRng::seed_from_u64(seed))
            .unwrap()
    }

    #[test]
    fn test_construction_records_iteration_zero() {
        let opt = optimizer(1);
        assert_eq!(opt.iteration(), 0);
        assert_eq!(opt.history().len(), 1);
        assert_eq!(opt.history()[0].iteration, 0);
        assert_eq!(opt.swarm().len(), 8);
    }

    #[test]
    fn test_run_appends_one_entry_per_step() {
        let mut opt = optimizer(2);
        opt.run(5);
        assert_eq!(opt.iteration(), 5);
        assert_eq!(opt.history().len(), 6);
        for (i, state) in opt.history().iter().enumerate() {
            assert_eq!(state.iteration, i);
        }
        opt.run(0);
        assert_eq!(opt.history().len(), 6);
    }

    #[test]
    fn test_reset_restores_rule_and_history() {
        let mut opt = optimizer(3);
        opt.run(4);
        opt.reset();
        assert_eq!(opt.iteration(), 0);
        assert_eq!(opt.history().len(), 1);
        assert_eq!(opt.rule().resets, 1);
    }

    #[test]
    fn test_global_best_is_an_owned_copy() {
        let mut opt = optimizer(4);
        let before = opt.global_best();
        opt.run(10);
        assert!(opt.best_fitness() <= before.fitness);
    }

    #[test]
    fn test_history_json() {
        let mut opt = optimizer(5);
        opt.step();
        let json = opt.history_json().unwrap();
        let parsed: Vec<IterationState> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        // floats must come back bit for bit
        assert_eq!(parsed.as_slice(), opt.history());
    }

    #[test]
    fn test_config_is_shared_objective() {
        let config = SwarmConfig {
            population_size: 1,
            bounds: Bounds::symmetric(1.0),
            objective: objective_fn(|x, _| x),
        };
        assert_eq!(config.evaluate(&[0.25, 0.0]), 0.25);
    }
}
