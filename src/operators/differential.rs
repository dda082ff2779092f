//! Differential evolution operators
//!
//! rand/1 mutation and binomial crossover on 2D positions.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::solution::{Position, DIMENSION};

/// rand/1 mutation: `x_a + F·(x_b − x_c)`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifferentialMutation {
    /// Differential weight F
    pub factor: f64,
}

impl DifferentialMutation {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Build the mutant vector from three donors
    pub fn mutant(&self, a: &Position, b: &Position, c: &Position) -> Position {
        [
            a[0] + self.factor * (b[0] - c[0]),
            a[1] + self.factor * (b[1] - c[1]),
        ]
    }
}

impl Default for DifferentialMutation {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Binomial crossover between a target and a mutant
///
/// One random coordinate always comes from the mutant so the trial differs
/// from the target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinomialCrossover {
    /// Crossover rate CR
    pub rate: f64,
}

impl BinomialCrossover {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Build the trial vector
    pub fn cross<R: Rng + ?Sized>(
        &self,
        target: &Position,
        mutant: &Position,
        rng: &mut R,
    ) -> Position {
        let j_rand = rng.gen_range(0..DIMENSION);
        let mut trial = *target;
        for j in 0..DIMENSION {
            if j == j_rand || rng.gen::<f64>() < self.rate {
                trial[j] = mutant[j];
            }
        }
        trial
    }
}

impl Default for BinomialCrossover {
    fn default() -> Self {
        Self::new(0.9)
    }
}

/// Three distinct indices in `0..n`, all different from `exclude`
///
/// Requires `n >= 4`.
pub fn select_random_triple<R: Rng + ?Sized>(
    n: usize,
    exclude: usize,
    rng: &mut R,
) -> (usize, usize, usize) {
    let mut indices = Vec::with_capacity(3);
    while indices.len() < 3 {
        let idx = rng.gen_range(0..n);
        if idx != exclude && !indices.contains(&idx) {
            indices.push(idx);
        }
    }
    (indices[0], indices[1], indices[2])
}

/// A random index in `0..n` different from `exclude`
///
/// Requires `n >= 2`.
pub fn select_other<R: Rng + ?Sized>(n: usize, exclude: usize, rng: &mut R) -> usize {
    let idx = rng.gen_range(0..n - 1);
    if idx >= exclude {
        idx + 1
    } else {
        idx
    }
}
