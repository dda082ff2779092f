//! Objective functions
//!
//! Objectives map a 2D point to a scalar to be MINIMIZED. They are stored as
//! shared closures so an optimizer and its history can outlive the caller's
//! stack frame.

use std::sync::Arc;

use crate::solution::Position;

/// Shared objective closure
pub type ObjectiveFn = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// Wrap a closure as an [`ObjectiveFn`]
pub fn objective_fn<F>(f: F) -> ObjectiveFn
where
    F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Anything that can be evaluated at a position
pub trait Objective: Send + Sync {
    fn evaluate(&self, x: f64, y: f64) -> f64;

    /// Evaluate at a [`Position`]
    fn evaluate_position(&self, position: &Position) -> f64 {
        self.evaluate(position[0], position[1])
    }
}

impl<F> Objective for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync + ?Sized,
{
    fn evaluate(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}
