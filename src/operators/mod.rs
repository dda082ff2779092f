//! Hybrid operators
//!
//! Building blocks borrowed from other metaheuristics (differential
//! evolution, PSO, harmony search, ABC, simulated annealing) plus local-search
//! refinement.

pub mod annealing;
pub mod differential;
pub mod local_search;
pub mod swarm;

pub mod prelude {
    pub use super::annealing::*;
    pub use super::differential::*;
    pub use super::local_search::*;
    pub use super::swarm::*;
}
