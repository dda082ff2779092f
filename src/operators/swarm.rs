//! Swarm-intelligence movement operators
//!
//! PSO velocity, harmony-search improvisation and the ABC employed-bee move,
//! each expressed on 2D positions so the Bat hybrids can borrow them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::solution::{Bounds, Position, DIMENSION};

/// Canonical PSO velocity update
///
/// `v' = w·v + c1·U·(pbest − x) + c2·U·(g − x)` with fresh uniforms per axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PsoVelocity {
    /// Inertia weight w
    pub inertia: f64,
    /// Cognitive coefficient c1
    pub cognitive: f64,
    /// Social coefficient c2
    pub social: f64,
}

impl PsoVelocity {
    pub fn new(inertia: f64, cognitive: f64, social: f64) -> Self {
        Self {
            inertia,
            cognitive,
            social,
        }
    }

    /// New velocity for an agent at `position`
    pub fn update<R: Rng + ?Sized>(
        &self,
        velocity: &Position,
        position: &Position,
        personal_best: &Position,
        global_best: &Position,
        rng: &mut R,
    ) -> Position {
        let mut next = [0.0; DIMENSION];
        for (j, v) in next.iter_mut().enumerate() {
            let r1: f64 = rng.gen();
            let r2: f64 = rng.gen();
            *v = self.inertia * velocity[j]
                + self.cognitive * r1 * (personal_best[j] - position[j])
                + self.social * r2 * (global_best[j] - position[j]);
        }
        next
    }
}

impl Default for PsoVelocity {
    fn default() -> Self {
        Self::new(0.7, 1.5, 1.5)
    }
}

/// Harmony-search improvisation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HarmonyImprovisation {
    /// Harmony memory considering rate
    pub hmcr: f64,
    /// Pitch adjusting rate
    pub par: f64,
    /// Pitch adjustment bandwidth, in search-space units
    pub bandwidth: f64,
}

impl HarmonyImprovisation {
    pub fn new(hmcr: f64, par: f64, bandwidth: f64) -> Self {
        Self {
            hmcr,
            par,
            bandwidth,
        }
    }

    /// Improvise a new position from the harmony memory
    ///
    /// Per coordinate: with probability `hmcr` copy the coordinate of a random
    /// memory member and, with probability `par`, jitter it by up to
    /// `±bandwidth`; otherwise draw the coordinate uniformly within bounds.
    /// An empty memory always draws uniformly.
    pub fn improvise<R: Rng + ?Sized>(
        &self,
        memory: &[Position],
        bounds: &Bounds,
        rng: &mut R,
    ) -> Position {
        let mut harmony = [0.0; DIMENSION];
        for (j, value) in harmony.iter_mut().enumerate() {
            *value = if !memory.is_empty() && rng.gen::<f64>() < self.hmcr {
                let member = &memory[rng.gen_range(0..memory.len())];
                let mut v = member[j];
                if rng.gen::<f64>() < self.par {
                    v += self.bandwidth * (2.0 * rng.gen::<f64>() - 1.0);
                }
                v
            } else {
                bounds.sample(rng)
            };
        }
        harmony
    }
}

impl Default for HarmonyImprovisation {
    fn default() -> Self {
        Self::new(0.9, 0.3, 0.1)
    }
}

/// ABC employed-bee move: `x + φ·(x − x_k)`, φ ∈ [−1, 1] per axis
pub fn employed_bee_move<R: Rng + ?Sized>(
    position: &Position,
    neighbor: &Position,
    rng: &mut R,
) -> Position {
    let mut next = *position;
    for (j, v) in next.iter_mut().enumerate() {
        let phi = rng.gen_range(-1.0..=1.0);
        *v += phi * (position[j] - neighbor[j]);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pso_velocity_at_bests_is_inertial() {
        let mut rng = StdRng::seed_from_u64(1);
        let pso = PsoVelocity::new(0.5, 2.0, 2.0);
        let v = pso.update(&[2.0, -4.0], &[1.0, 1.0], &[1.0, 1.0], &[1.0, 1.0], &mut rng);
        assert_eq!(v, [1.0, -2.0]);
    }

    #[test]
    fn test_pso_velocity_is_attracted() {
        let mut rng = StdRng::seed_from_u64(2);
        let pso = PsoVelocity::new(0.0, 1.0, 1.0);
        let v = pso.update(&[0.0, 0.0], &[0.0, 0.0], &[1.0, 1.0], &[1.0, 1.0], &mut rng);
        assert!(v[0] >= 0.0 && v[1] >= 0.0);
        assert!(v[0] <= 2.0 && v[1] <= 2.0);
    }

    #[test]
    fn test_improvise_from_memory_without_adjustment() {
        let mut rng = StdRng::seed_from_u64(3);
        let hs = HarmonyImprovisation::new(1.0, 0.0, 0.5);
        let memory = [[1.0, 2.0], [3.0, 4.0]];
        for _ in 0..50 {
            let h = hs.improvise(&memory, &Bounds::symmetric(10.0), &mut rng);
            assert!(h[0] == 1.0 || h[0] == 3.0);
            assert!(h[1] == 2.0 || h[1] == 4.0);
        }
    }

    #[test]
    fn test_improvise_uniform_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        let hs = HarmonyImprovisation::new(0.0, 0.0, 0.0);
        let bounds = Bounds::new(-1.0, 1.0);
        for _ in 0..100 {
            assert!(bounds.contains_position(&hs.improvise(&[[5.0, 5.0]], &bounds, &mut rng)));
        }
    }

    #[test]
    fn test_improvise_pitch_adjustment_is_bounded() {
        let mut rng = StdRng::seed_from_u64(5);
        let hs = HarmonyImprovisation::new(1.0, 1.0, 0.25);
        for _ in 0..100 {
            let h = hs.improvise(&[[0.0, 0.0]], &Bounds::symmetric(10.0), &mut rng);
            assert!(h[0].abs() <= 0.25 && h[1].abs() <= 0.25);
        }
    }

    #[test]
    fn test_employed_bee_move_range() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..100 {
            let p = employed_bee_move(&[1.0, 1.0], &[0.0, 0.0], &mut rng);
            assert!((0.0..=2.0).contains(&p[0]));
            assert!((0.0..=2.0).contains(&p[1]));
        }
    }
}
