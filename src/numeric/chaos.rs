//! Chaos maps
//!
//! One-dimensional chaotic recurrences on [0, 1]. Each map advances a single
//! scalar state; the next value depends only on the previous one.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Rotation Ω of the circle map
const CIRCLE_OMEGA: f64 = 0.5;
/// Coupling K of the circle map
const CIRCLE_K: f64 = 0.2;

/// Supported chaotic maps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChaosMap {
    /// Logistic map `4x(1 − x)`
    #[default]
    Logistic,
    /// Tent map folding at 0.5
    Tent,
    /// Sine map `sin(πx)`
    Sine,
    /// Circle map `x + Ω − (K/2π)·sin(2πx) mod 1`
    Circle,
    /// Gauss map `1/x mod 1`, with `0 ↦ 0`
    Gauss,
}

impl ChaosMap {
    /// All supported maps
    pub const ALL: [ChaosMap; 5] = [
        ChaosMap::Logistic,
        ChaosMap::Tent,
        ChaosMap::Sine,
        ChaosMap::Circle,
        ChaosMap::Gauss,
    ];

    /// Apply the map once
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Logistic => 4.0 * x * (1.0 - x),
            Self::Tent => {
                if x < 0.5 {
                    2.0 * x
                } else {
                    2.0 * (1.0 - x)
                }
            }
            Self::Sine => (PI * x).sin(),
            Self::Circle => {
                (x + CIRCLE_OMEGA - (CIRCLE_K / (2.0 * PI)) * (2.0 * PI * x).sin()).rem_euclid(1.0)
            }
            Self::Gauss => {
                if x == 0.0 {
                    0.0
                } else {
                    (1.0 / x).rem_euclid(1.0)
                }
            }
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Self::Logistic => "logistic",
            Self::Tent => "tent",
            Self::Sine => "sine",
            Self::Circle => "circle",
            Self::Gauss => "gauss",
        }
    }
}

/// A chaotic sequence: a map plus its current state
///
/// Finite-precision iteration can land on a fixed point of the map (0 for
/// the tent and Gauss maps, 0 or 0.75 for the logistic map once rounding
/// catches up). When the state collapses to 0 or 1 it is re-seeded from the
/// previous state so the sequence keeps moving; the re-seed is a pure
/// function of that state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChaoticSequence {
    map: ChaosMap,
    state: f64,
    seed: f64,
}

impl ChaoticSequence {
    /// Create a sequence starting at `seed`, expected in (0, 1)
    pub fn new(map: ChaosMap, seed: f64) -> Self {
        Self {
            map,
            state: seed,
            seed,
        }
    }

    /// The map driving this sequence
    pub fn map(&self) -> ChaosMap {
        self.map
    }

    /// Current state without advancing
    pub fn current(&self) -> f64 {
        self.state
    }

    /// Advance one step and return the new state
    pub fn next_value(&mut self) -> f64 {
        let previous = self.state;
        let mut next = self.map.apply(previous);
        if !(next > 0.0 && next < 1.0) {
            next = (previous * 0.618_033_988_749_895 + 0.123_456_789).rem_euclid(1.0);
        }
        self.state = next;
        next
    }

    /// Advance one step and map the value onto [−1, 1]
    pub fn next_signed(&mut self) -> f64 {
        2.0 * self.next_value() - 1.0
    }

    /// Restore the initial seed
    pub fn reset(&mut self) {
        self.state = self.seed;
    }
}

impl Iterator for ChaoticSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_value())
    }
}
