//! Artificial Fish Swarm Algorithm family
//!
//! Every fish runs a fixed behavior cascade against a snapshot of the school
//! taken at the start of the iteration:
//!
//! 1. **Swarming**: step toward the centroid of the fish within `visual` if
//!    the centroid is strictly better and the neighborhood is not crowded.
//! 2. **Following**: step toward the best neighbor under the same tests.
//! 3. **Preying**: sample up to `try_number` points within `visual` and step
//!    toward the first strictly better one.
//! 4. **Random**: a uniform step of at most `step` per axis.
//!
//! The neighborhood is crowded when `neighbors / population ≥ δ`. Moves are
//! applied unconditionally, so fish fitness may rise between iterations; the
//! global best still never gets worse.

pub mod fast;
pub mod modified;
pub mod standard;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SwarmError, SwarmResult};
use crate::optimizer::context::SwarmContext;
use crate::population::agent::Agent;
use crate::population::swarm::Swarm;
use crate::solution::{centroid, distance, Position, DIMENSION};

pub use fast::{FastFish, FastFishParams};
pub use modified::ModifiedFish;
pub use standard::StandardFish;

/// Default crowding factor
pub const GOLDEN_CROWDING: f64 = 0.618;

/// AFSA parameters
///
/// `visual` and `step` are absolute distances in search-space units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishParams {
    /// Perception radius
    pub visual: f64,
    /// Maximum movement per iteration
    pub step: f64,
    /// Crowding factor δ
    pub crowding: f64,
    /// Preying attempts before falling back to a random move
    pub try_number: usize,
}

impl Default for FishParams {
    fn default() -> Self {
        Self {
            visual: 2.5,
            step: 0.5,
            crowding: GOLDEN_CROWDING,
            try_number: 5,
        }
    }
}

impl FishParams {
    pub fn with_visual(mut self, visual: f64) -> Self {
        self.visual = visual;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_crowding(mut self, crowding: f64) -> Self {
        self.crowding = crowding;
        self
    }

    pub fn with_try_number(mut self, try_number: usize) -> Self {
        self.try_number = try_number;
        self
    }

    pub(crate) fn validate(&self) -> SwarmResult<()> {
        if !(self.visual > 0.0) {
            return Err(SwarmError::Configuration(format!(
                "visual must be positive, got {}",
                self.visual
            )));
        }
        if !(self.step > 0.0) {
            return Err(SwarmError::Configuration(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if !(self.crowding > 0.0) {
            return Err(SwarmError::Configuration(format!(
                "crowding factor must be positive, got {}",
                self.crowding
            )));
        }
        Ok(())
    }
}

/// Behavior chosen by a fish in the latest iteration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    Swarming,
    Following,
    Preying,
    Random,
}

/// Per-fish payload
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FishState {
    /// `None` until the fish has moved once
    pub last_behavior: Option<Behavior>,
}

/// A fish's proposed move
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FishMove {
    pub behavior: Behavior,
    /// Unclamped target position
    pub position: Position,
}

/// Step parameters in force for one iteration
///
/// Fast and modified AFSA override `step` and `crowding` respectively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cascade {
    pub visual: f64,
    pub step: f64,
    pub crowding: f64,
    pub try_number: usize,
}

impl From<&FishParams> for Cascade {
    fn from(params: &FishParams) -> Self {
        Self {
            visual: params.visual,
            step: params.step,
            crowding: params.crowding,
            try_number: params.try_number,
        }
    }
}

/// Indices of the fish strictly within `visual` of fish `index`
pub fn neighbors<S>(school: &[Agent<S>], index: usize, visual: f64) -> Vec<usize> {
    let me = &school[index].position;
    school
        .iter()
        .enumerate()
        .filter(|(j, other)| *j != index && distance(me, &other.position) < visual)
        .map(|(j, _)| j)
        .collect()
}

/// Crowding test `count / population ≥ δ`
pub fn is_crowded(neighbor_count: usize, population: usize, crowding: f64) -> bool {
    population > 0 && neighbor_count as f64 / population as f64 >= crowding
}

/// Step from `from` toward `to` by `step·U`, U ∈ [0, 1)
///
/// Coincident points yield `from` unchanged.
fn step_toward<R: Rng + ?Sized>(
    from: &Position,
    to: &Position,
    step: f64,
    rng: &mut R,
) -> Position {
    let d = distance(from, to);
    if d == 0.0 {
        return *from;
    }
    let scale = step * rng.gen::<f64>() / d;
    let mut next = *from;
    for j in 0..DIMENSION {
        next[j] += (to[j] - from[j]) * scale;
    }
    next
}

fn jitter<R: Rng + ?Sized>(center: &Position, radius: f64, rng: &mut R) -> Position {
    let mut p = *center;
    for v in p.iter_mut() {
        *v += radius * rng.gen_range(-1.0..=1.0);
    }
    p
}

/// Run the behavior cascade for fish `index` of `school`
pub fn choose_move<S, R: Rng + ?Sized>(
    school: &[Agent<S>],
    index: usize,
    cascade: &Cascade,
    ctx: &SwarmContext<'_>,
    rng: &mut R,
) -> FishMove {
    let fish = &school[index];
    let near = neighbors(school, index, cascade.visual);
    let crowded = is_crowded(near.len(), school.len(), cascade.crowding);

    if !near.is_empty() && !crowded {
        if let Some(center) = centroid(near.iter().map(|&j| &school[j].position)) {
            if ctx.evaluate(&center) < fish.fitness {
                return FishMove {
                    behavior: Behavior::Swarming,
                    position: step_toward(&fish.position, &center, cascade.step, rng),
                };
            }
        }

        let leader = near
            .iter()
            .map(|&j| &school[j])
            .min_by(|a, b| a.fitness.total_cmp(&b.fitness));
        if let Some(leader) = leader {
            if leader.fitness < fish.fitness {
                return FishMove {
                    behavior: Behavior::Following,
                    position: step_toward(&fish.position, &leader.position, cascade.step, rng),
                };
            }
        }
    }

    for _ in 0..cascade.try_number {
        let sample = ctx
            .bounds()
            .clamp_position(jitter(&fish.position, cascade.visual, rng));
        if ctx.evaluate(&sample) < fish.fitness {
            return FishMove {
                behavior: Behavior::Preying,
                position: step_toward(&fish.position, &sample, cascade.step, rng),
            };
        }
    }

    FishMove {
        behavior: Behavior::Random,
        position: jitter(&fish.position, cascade.step, rng),
    }
}

/// One synchronous pass of the cascade over the whole school
///
/// The agent's velocity records the displacement of its latest move.
pub(crate) fn school_pass<R: Rng + ?Sized>(
    swarm: &mut Swarm<FishState>,
    ctx: &SwarmContext<'_>,
    cascade: &Cascade,
    rng: &mut R,
) {
    let snapshot = swarm.agents().to_vec();
    for i in 0..snapshot.len() {
        let FishMove { behavior, position } = choose_move(&snapshot, i, cascade, ctx, rng);
        let (position, fitness) = ctx.clamp_and_evaluate(position);

        let fish = swarm.agent_mut(i);
        fish.velocity = Some([
            position[0] - fish.position[0],
            position[1] - fish.position[1],
        ]);
        fish.move_to(position, fitness);
        fish.state.last_behavior = Some(behavior);
        swarm.update_global_best(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::objective::objective_fn;
    use crate::optimizer::context::SwarmConfig;
    use crate::solution::Bounds;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere_config(population_size: usize) -> SwarmConfig {
        SwarmConfig {
            population_size,
            bounds: Bounds::symmetric(5.0),
            objective: objective_fn(|x, y| x * x + y * y),
        }
    }

    fn fish(x: f64, y: f64) -> Agent<FishState> {
        Agent::new([x, y], x * x + y * y)
    }

    #[test]
    fn test_neighbors_exclude_self_and_far_fish() {
        let school = [fish(0.0, 0.0), fish(1.0, 0.0), fish(3.0, 0.0)];
        assert_eq!(neighbors(&school, 0, 2.0), vec![1]);
        // radius is exclusive
        assert_eq!(neighbors(&school, 1, 2.0), vec![0]);
        assert_eq!(neighbors(&school, 1, 2.5), vec![0, 2]);
        assert!(neighbors(&school, 0, 1.0).is_empty());
    }

    #[test]
    fn test_crowding_threshold() {
        assert!(is_crowded(1, 2, 0.5));
        assert!(!is_crowded(1, 2, 0.6));
        assert!(!is_crowded(0, 0, 0.1));
    }

    #[test]
    fn test_swarming_when_not_crowded() {
        let config = sphere_config(2);
        let ctx = SwarmContext::new(&config, 0);
        let school = [fish(1.0, 1.0), fish(0.0, 0.0)];
        let cascade = Cascade::from(&FishParams::default().with_visual(2.0).with_crowding(0.9));
        let mut rng = StdRng::seed_from_u64(90);
        for _ in 0..20 {
            let m = choose_move(&school, 0, &cascade, &ctx, &mut rng);
            assert_eq!(m.behavior, Behavior::Swarming);
            assert!(distance(&m.position, &[1.0, 1.0]) <= cascade.step);
        }
    }

    #[test]
    fn test_crowding_suppresses_swarming_and_following() {
        let config = sphere_config(2);
        let ctx = SwarmContext::new(&config, 0);
        let school = [fish(1.0, 1.0), fish(0.0, 0.0)];
        let cascade = Cascade::from(&FishParams::default().with_visual(2.0).with_crowding(0.1));
        let mut rng = StdRng::seed_from_u64(91);
        for _ in 0..50 {
            let m = choose_move(&school, 0, &cascade, &ctx, &mut rng);
            assert!(matches!(m.behavior, Behavior::Preying | Behavior::Random));
        }
    }

    #[test]
    fn test_following_when_centroid_is_worse() {
        // neighbor centroid (0, 0) scores 2.0, worse than the fish's 1.5
        let config = SwarmConfig {
            population_size: 3,
            bounds: Bounds::symmetric(5.0),
            objective: objective_fn(|x, _| (x - 2.0).abs()),
        };
        let ctx = SwarmContext::new(&config, 0);
        let school: [Agent<FishState>; 3] = [
            Agent::new([0.5, 0.0], 1.5),
            Agent::new([2.0, 0.0], 0.0),
            Agent::new([-2.0, 0.0], 4.0),
        ];
        let cascade = Cascade::from(&FishParams::default().with_visual(3.0).with_crowding(1.0));
        let mut rng = StdRng::seed_from_u64(92);
        let m = choose_move(&school, 0, &cascade, &ctx, &mut rng);
        assert_eq!(m.behavior, Behavior::Following);
        assert!(m.position[0] >= 0.5);
    }

    #[test]
    fn test_lone_fish_at_optimum_moves_randomly() {
        let config = sphere_config(1);
        let ctx = SwarmContext::new(&config, 0);
        let school = [fish(0.0, 0.0)];
        let cascade = Cascade::from(&FishParams::default());
        let mut rng = StdRng::seed_from_u64(93);
        let m = choose_move(&school, 0, &cascade, &ctx, &mut rng);
        assert_eq!(m.behavior, Behavior::Random);
        assert!(m.position[0].abs() <= cascade.step && m.position[1].abs() <= cascade.step);
    }

    #[test]
    fn test_step_toward_coincident() {
        let mut rng = StdRng::seed_from_u64(94);
        assert_eq!(step_toward(&[1.0, 2.0], &[1.0, 2.0], 1.0, &mut rng), [1.0, 2.0]);
    }
}
