//! Optimizer builder

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{SwarmError, SwarmResult};
use crate::fitness::objective::ObjectiveFn;
use crate::optimizer::base::Optimizer;
use crate::optimizer::context::SwarmConfig;
use crate::optimizer::rule::UpdateRule;
use crate::solution::Bounds;

/// Builder for [`Optimizer`]
///
/// Population size, bounds and objective are all required.
#[derive(Default)]
pub struct OptimizerBuilder {
    population_size: Option<usize>,
    bounds: Option<Bounds>,
    objective: Option<ObjectiveFn>,
}

impl OptimizerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Set the search bounds
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the objective from a closure
    pub fn objective<F>(mut self, objective: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        self.objective = Some(Arc::new(objective));
        self
    }

    /// Set an already shared objective
    pub fn objective_fn(mut self, objective: ObjectiveFn) -> Self {
        self.objective = Some(objective);
        self
    }

    /// Validate the collected settings
    pub fn build_config(self) -> SwarmResult<SwarmConfig> {
        let population_size = self
            .population_size
            .ok_or_else(|| SwarmError::Configuration("Population size not set".to_string()))?;
        if population_size == 0 {
            return Err(SwarmError::Configuration(
                "Population size must be greater than zero".to_string(),
            ));
        }

        let bounds = self
            .bounds
            .ok_or_else(|| SwarmError::Configuration("Bounds not set".to_string()))?;
        bounds.validate()?;

        let objective = self
            .objective
            .ok_or_else(|| SwarmError::Configuration("Objective not set".to_string()))?;

        Ok(SwarmConfig {
            population_size,
            bounds,
            objective,
        })
    }

    /// Build an optimizer seeded from system entropy
    pub fn build<U: UpdateRule>(self, rule: U) -> SwarmResult<Optimizer<U, StdRng>> {
        self.build_with_rng(rule, StdRng::from_entropy())
    }

    /// Build an optimizer around an injected generator
    pub fn build_with_rng<U: UpdateRule, R: Rng>(
        self,
        rule: U,
        rng: R,
    ) -> SwarmResult<Optimizer<U, R>> {
        let config = self.build_config()?;
        rule.validate(&config)?;
        Ok(Optimizer::new(config, rule, rng))
    }
}

impl From<&SwarmConfig> for OptimizerBuilder {
    fn from(config: &SwarmConfig) -> Self {
        Self {
            population_size: Some(config.population_size),
            bounds: Some(config.bounds),
            objective: Some(Arc::clone(&config.objective)),
        }
    }
}
