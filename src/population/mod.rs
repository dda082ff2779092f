//! Population management
//!
//! This module provides the Agent, Swarm and IterationState types.

pub mod agent;
pub mod swarm;

pub mod prelude {
    pub use super::agent::*;
    pub use super::swarm::*;
}
