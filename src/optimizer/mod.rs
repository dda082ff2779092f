//! Base optimizer template
//!
//! The shared population loop ([`Optimizer`]), the strategy trait every
//! variant implements ([`UpdateRule`]), construction ([`OptimizerBuilder`])
//! and the type-erased control surface ([`SwarmRunner`]).

pub mod base;
pub mod builder;
pub mod context;
pub mod rule;
pub mod runner;

pub use base::Optimizer;
pub use builder::OptimizerBuilder;
pub use context::{SwarmConfig, SwarmContext};
pub use rule::UpdateRule;
pub use runner::{Frame, SwarmRunner};

pub mod prelude {
    pub use super::base::*;
    pub use super::builder::*;
    pub use super::context::*;
    pub use super::rule::*;
    pub use super::runner::*;
}
