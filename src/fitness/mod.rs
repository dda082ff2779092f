//! Fitness evaluation and benchmarks
//!
//! This module provides the objective abstraction and 2D benchmark functions.

pub mod benchmarks;
pub mod objective;

pub mod prelude {
    pub use super::benchmarks::*;
    pub use super::objective::*;
}
