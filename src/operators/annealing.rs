//! Simulated annealing operators

use serde::{Deserialize, Serialize};

/// Metropolis acceptance probability
///
/// 1 for an improvement (`delta < 0`), otherwise `exp(−delta / temperature)`.
pub fn metropolis(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        1.0
    } else {
        (-delta / temperature).exp()
    }
}

/// Geometrically cooled temperature
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    initial: f64,
    cooling_rate: f64,
    current: f64,
}

impl Temperature {
    pub fn new(initial: f64, cooling_rate: f64) -> Self {
        Self {
            initial,
            cooling_rate,
            current: initial,
        }
    }

    /// Current temperature
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Multiply by the cooling rate
    pub fn cool(&mut self) {
        self.current *= self.cooling_rate;
    }

    /// Back to the initial temperature
    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    /// Acceptance probability for a fitness change at the current temperature
    pub fn acceptance(&self, delta: f64) -> f64 {
        metropolis(delta, self.current)
    }
}
