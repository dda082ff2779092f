//! Swarm algorithms
//!
//! Continuous variants are [`UpdateRule`]s run by the shared
//! [`Optimizer`](crate::optimizer::Optimizer). [`AlgorithmSpec`] selects and
//! configures any of them from JSON and yields a type-erased
//! [`SwarmRunner`]. The binary and discrete Bat variants are self-contained
//! optimizers with the same control surface.

pub mod bat;
pub mod binary_bat;
pub mod discrete_bat;
pub mod fish;
pub mod hybrid;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::SwarmResult;
use crate::operators::local_search::{LocalSearch, Polished};
use crate::optimizer::{OptimizerBuilder, SwarmRunner, UpdateRule};

use bat::{
    AdaptiveBat, AdaptiveBatParams, BatParams, ChaoticBat, ChaoticBatParams, SelfAdaptiveBat,
    SelfAdaptiveBatParams, StandardBat,
};
use fish::{FastFish, FastFishParams, FishParams, ModifiedFish, StandardFish};
use hybrid::{
    AbcBat, AbcBatParams, DeBat, DeBatParams, HsBat, HsBatParams, PsoBat, PsoBatParams, SaBat,
    SaBatParams,
};

/// Identifiers accepted in the `"algorithm"` field of an [`AlgorithmSpec`]
pub const ALGORITHM_IDS: [&str; 12] = [
    "standard_bat",
    "adaptive_bat",
    "chaotic_bat",
    "self_adaptive_bat",
    "de_bat",
    "pso_bat",
    "sa_bat",
    "hs_bat",
    "abc_bat",
    "standard_fish",
    "fast_fish",
    "modified_fish",
];

/// A continuous algorithm together with its parameters
///
/// ```rust,ignore
/// let spec: AlgorithmSpec =
///     serde_json::from_str(r#"{"algorithm": "sa_bat", "cooling_rate": 0.9}"#)?;
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum AlgorithmSpec {
    StandardBat(BatParams),
    AdaptiveBat(AdaptiveBatParams),
    ChaoticBat(ChaoticBatParams),
    SelfAdaptiveBat(SelfAdaptiveBatParams),
    DeBat(DeBatParams),
    PsoBat(PsoBatParams),
    SaBat(SaBatParams),
    HsBat(HsBatParams),
    AbcBat(AbcBatParams),
    StandardFish(FishParams),
    FastFish(FastFishParams),
    ModifiedFish(FishParams),
}

impl AlgorithmSpec {
    /// Default parameters for the algorithm named `id`
    pub fn default_for(id: &str) -> Option<Self> {
        let spec = match id {
            "standard_bat" => Self::StandardBat(Default::default()),
            "adaptive_bat" => Self::AdaptiveBat(Default::default()),
            "chaotic_bat" => Self::ChaoticBat(Default::default()),
            "self_adaptive_bat" => Self::SelfAdaptiveBat(Default::default()),
            "de_bat" => Self::DeBat(Default::default()),
            "pso_bat" => Self::PsoBat(Default::default()),
            "sa_bat" => Self::SaBat(Default::default()),
            "hs_bat" => Self::HsBat(Default::default()),
            "abc_bat" => Self::AbcBat(Default::default()),
            "standard_fish" => Self::StandardFish(Default::default()),
            "fast_fish" => Self::FastFish(Default::default()),
            "modified_fish" => Self::ModifiedFish(Default::default()),
            _ => return None,
        };
        Some(spec)
    }

    /// Parse a JSON parameter bundle
    pub fn from_json(json: &str) -> SwarmResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Identifier of the selected algorithm
    pub fn id(&self) -> &'static str {
        match self {
            Self::StandardBat(_) => "standard_bat",
            Self::AdaptiveBat(_) => "adaptive_bat",
            Self::ChaoticBat(_) => "chaotic_bat",
            Self::SelfAdaptiveBat(_) => "self_adaptive_bat",
            Self::DeBat(_) => "de_bat",
            Self::PsoBat(_) => "pso_bat",
            Self::SaBat(_) => "sa_bat",
            Self::HsBat(_) => "hs_bat",
            Self::AbcBat(_) => "abc_bat",
            Self::StandardFish(_) => "standard_fish",
            Self::FastFish(_) => "fast_fish",
            Self::ModifiedFish(_) => "modified_fish",
        }
    }

    /// Build a type-erased optimizer
    ///
    /// `seed` makes the run reproducible; `None` seeds from entropy. With
    /// `polish` set, the best agent is refined after every iteration.
    pub fn build(
        &self,
        builder: OptimizerBuilder,
        seed: Option<u64>,
        polish: Option<LocalSearch>,
    ) -> SwarmResult<Box<dyn SwarmRunner>> {
        let spawn = Spawn {
            builder,
            seed,
            polish,
        };
        match self.clone() {
            Self::StandardBat(p) => spawn.runner(StandardBat::new(p)),
            Self::AdaptiveBat(p) => spawn.runner(AdaptiveBat::new(p)),
            Self::ChaoticBat(p) => spawn.runner(ChaoticBat::new(p)),
            Self::SelfAdaptiveBat(p) => spawn.runner(SelfAdaptiveBat::new(p)),
            Self::DeBat(p) => spawn.runner(DeBat::new(p)),
            Self::PsoBat(p) => spawn.runner(PsoBat::new(p)),
            Self::SaBat(p) => spawn.runner(SaBat::new(p)),
            Self::HsBat(p) => spawn.runner(HsBat::new(p)),
            Self::AbcBat(p) => spawn.runner(AbcBat::new(p)),
            Self::StandardFish(p) => spawn.runner(StandardFish::new(p)),
            Self::FastFish(p) => spawn.runner(FastFish::new(p)),
            Self::ModifiedFish(p) => spawn.runner(ModifiedFish::new(p)),
        }
    }
}

impl Default for AlgorithmSpec {
    fn default() -> Self {
        Self::StandardBat(BatParams::default())
    }
}

struct Spawn {
    builder: OptimizerBuilder,
    seed: Option<u64>,
    polish: Option<LocalSearch>,
}

impl Spawn {
    fn runner<U: UpdateRule + 'static>(self, rule: U) -> SwarmResult<Box<dyn SwarmRunner>> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(match self.polish {
            Some(search) => Box::new(
                self.builder
                    .build_with_rng(Polished::new(rule, search), rng)?,
            ),
            None => Box::new(self.builder.build_with_rng(rule, rng)?),
        })
    }
}

pub mod prelude {
    pub use super::bat::{
        AdaptiveBat, AdaptiveBatParams, BatParams, BatState, ChaoticBat, ChaoticBatParams,
        SelfAdaptiveBat, SelfAdaptiveBatParams, StandardBat,
    };
    pub use super::binary_bat::{sigmoid, BinaryBat, BinaryBatParams, BitObjective};
    pub use super::discrete_bat::{
        distance_matrix, tour_length, DiscreteBat, DiscreteBatParams, PermutationObjective,
    };
    pub use super::fish::{
        Behavior, FastFish, FastFishParams, FishParams, FishState, ModifiedFish, StandardFish,
    };
    pub use super::hybrid::{
        AbcBat, AbcBatParams, DeBat, DeBatParams, HsBat, HsBatParams, PsoBat, PsoBatParams,
        SaBat, SaBatParams,
    };
    pub use super::{AlgorithmSpec, ALGORITHM_IDS};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwarmError;
    use crate::solution::Bounds;

    fn builder() -> OptimizerBuilder {
        OptimizerBuilder::new()
            .population_size(10)
            .bounds(Bounds::symmetric(5.12))
            .objective(|x, y| x * x + y * y)
    }

    #[test]
    fn test_every_id_has_defaults_and_builds() {
        for id in ALGORITHM_IDS {
            let spec = AlgorithmSpec::default_for(id).unwrap();
            assert_eq!(spec.id(), id);
            let mut runner = spec.build(builder(), Some(7), None).unwrap();
            assert_eq!(runner.name(), id);
            runner.run(3);
            assert_eq!(runner.history_len(), 4);
        }
        assert!(AlgorithmSpec::default_for("simulated_bat").is_none());
    }

    #[test]
    fn test_spec_from_json() {
        let spec = AlgorithmSpec::from_json(r#"{"algorithm": "sa_bat", "cooling_rate": 0.8}"#)
            .unwrap();
        match spec {
            AlgorithmSpec::SaBat(params) => {
                assert_eq!(params.cooling_rate, 0.8);
                assert_eq!(params.initial_temperature, 100.0);
                assert_eq!(params.bat.f_max, 2.0);
            }
            other => panic!("unexpected spec {other:?}"),
        }
    }

    #[test]
    fn test_unknown_algorithm_is_serialization_error() {
        let err = AlgorithmSpec::from_json(r#"{"algorithm": "warp_drive"}"#).unwrap_err();
        assert!(matches!(err, SwarmError::Serialization(_)));
    }

    #[test]
    fn test_spec_round_trips_through_json() {
        let spec = AlgorithmSpec::FastFish(FastFishParams::default().with_decay(0.9, 0.05));
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains(r#""algorithm":"fast_fish""#));
        assert_eq!(AlgorithmSpec::from_json(&json).unwrap(), spec);
    }

    #[test]
    fn test_seeded_builds_are_reproducible() {
        let spec = AlgorithmSpec::default();
        let mut a = spec.build(builder(), Some(42), None).unwrap();
        let mut b = spec.build(builder(), Some(42), None).unwrap();
        a.run(10);
        b.run(10);
        assert_eq!(a.best(), b.best());
    }

    #[test]
    fn test_polished_build() {
        let spec = AlgorithmSpec::default();
        let mut runner = spec
            .build(builder(), Some(3), Some(LocalSearch::default()))
            .unwrap();
        runner.run(5);
        assert!(runner.best().1 < 1e-3);
    }

    #[test]
    fn test_invalid_params_fail_at_build() {
        let spec = AlgorithmSpec::DeBat(DeBatParams::default().with_crossover_rate(2.0));
        assert!(spec.build(builder(), Some(1), None).is_err());
    }
}
