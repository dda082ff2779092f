//! Search-space bounds
//!
//! The continuous search space is the square `[min, max]²`; both axes share
//! the same interval.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SwarmError, SwarmResult};
use crate::solution::{Position, DIMENSION};

/// Bounds shared by every axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Bounds {
    /// Create new bounds
    ///
    /// # Panics
    /// Panics unless `min < max`; use [`try_new`](Self::try_new) for a fallible version.
    pub fn new(min: f64, max: f64) -> Self {
        assert!(
            min < max,
            "Invalid bounds: min ({}) must be < max ({})",
            min,
            max
        );
        Self { min, max }
    }

    /// Create bounds, returning an error unless `min < max`
    pub fn try_new(min: f64, max: f64) -> SwarmResult<Self> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Create symmetric bounds centered at 0
    pub fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    /// Check that `min < max` (also rejects NaN endpoints)
    pub fn validate(&self) -> SwarmResult<()> {
        if self.min < self.max {
            Ok(())
        } else {
            Err(SwarmError::config(format!(
                "bounds min ({}) must be < max ({})",
                self.min, self.max
            )))
        }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Get the center point
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Length of the diagonal of the search square
    pub fn diagonal(&self) -> f64 {
        self.range() * (DIMENSION as f64).sqrt()
    }

    /// Check if a value is within bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check if every component of a position is within bounds
    pub fn contains_position(&self, position: &Position) -> bool {
        position.iter().all(|&v| self.contains(v))
    }

    /// Clamp a value to be within bounds
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Clamp each component of a position into bounds
    pub fn clamp_position(&self, position: Position) -> Position {
        position.map(|v| self.clamp(v))
    }

    /// Draw a uniform value in `[min, max)`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + rng.gen::<f64>() * self.range()
    }

    /// Draw a uniform random position inside the search square
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        [self.sample(rng), self.sample(rng)]
    }

    /// Normalize a value from bounds to [0, 1]
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.range()
    }

    /// Denormalize a value from [0, 1] to bounds
    pub fn denormalize(&self, value: f64) -> f64 {
        self.min + value * self.range()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::symmetric(5.12) // Common default for optimization benchmarks
    }
}

impl TryFrom<(f64, f64)> for Bounds {
    type Error = SwarmError;

    fn try_from((min, max): (f64, f64)) -> SwarmResult<Self> {
        Self::try_new(min, max)
    }
}
