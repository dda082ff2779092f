//! Modified AFSA: progress-dependent crowding factor

use rand::Rng;

use crate::algorithms::fish::{school_pass, Cascade, FishParams, FishState, GOLDEN_CROWDING};
use crate::error::SwarmResult;
use crate::optimizer::context::{SwarmConfig, SwarmContext};
use crate::optimizer::rule::UpdateRule;
use crate::population::swarm::Swarm;

/// Iterations over which the crowding factor tightens
pub const CROWDING_HORIZON: f64 = 100.0;

/// Crowding factor at iteration `t`: `0.618·(1 − 0.5·min(1, t/100))`
pub fn crowding_at(t: usize) -> f64 {
    GOLDEN_CROWDING * (1.0 - 0.5 * (t as f64 / CROWDING_HORIZON).min(1.0))
}

/// AFSA whose crowding factor is recomputed every iteration
///
/// The configured `crowding` is ignored.
#[derive(Clone, Debug)]
pub struct ModifiedFish {
    params: FishParams,
    crowding: f64,
}

impl ModifiedFish {
    pub fn new(params: FishParams) -> Self {
        Self {
            params,
            crowding: crowding_at(0),
        }
    }

    /// Crowding factor used in the latest iteration
    pub fn current_crowding(&self) -> f64 {
        self.crowding
    }
}

impl Default for ModifiedFish {
    fn default() -> Self {
        Self::new(FishParams::default())
    }
}

impl UpdateRule for ModifiedFish {
    type State = FishState;

    fn name(&self) -> &'static str {
        "modified_fish"
    }

    fn validate(&self, _config: &SwarmConfig) -> SwarmResult<()> {
        self.params.validate()
    }

    fn before_iteration<R: Rng + ?Sized>(
        &mut self,
        _swarm: &Swarm<FishState>,
        ctx: &SwarmContext<'_>,
        _rng: &mut R,
    ) {
        self.crowding = crowding_at(ctx.iteration + 1);
    }

    fn update_population<R: Rng + ?Sized>(
        &mut self,
        swarm: &mut Swarm<FishState>,
        ctx: &SwarmContext<'_>,
        rng: &mut R,
    ) {
        let cascade = Cascade {
            crowding: self.crowding,
            ..Cascade::from(&self.params)
        };
        school_pass(swarm, ctx, &cascade, rng);
    }

    fn reset(&mut self) {
        self.crowding = crowding_at(0);
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

    #[test]
    fn test_crowding_schedule() {
        assert_relative_eq!(crowding_at(0), 0.618);
        assert_relative_eq!(crowding_at(50), 0.618 * 0.75);
        assert_relative_eq!(crowding_at(100), 0.309);
        assert_relative_eq!(crowding_at(1000), 0.309);
    }

    #[test]
    fn test_rule_tracks_iteration() {
        let mut opt = OptimizerBuilder::new()
            .population_size(5)
            .bounds(Bounds::symmetric(3.0))
            .objective(|x, y| x * x + y * y)
            .build_with_rng(ModifiedFish::default(), StdRng::seed_from_u64(120))
            .unwrap();
        opt.run(50);
        assert_relative_eq!(opt.rule().current_crowding(), crowding_at(50));
        opt.reset();
        assert_relative_eq!(opt.rule().current_crowding(), 0.618);
    }
}
