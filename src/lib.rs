//! # swarmlab
//!
//! Nature-inspired swarm optimizers on 2D benchmark landscapes, built for
//! watching a population evolve frame by frame.
//!
//! ## Core Concepts
//!
//! - **One loop, many rules**: every continuous variant is an
//!   [`UpdateRule`](optimizer::UpdateRule) plugged into the shared
//!   [`Optimizer`](optimizer::Optimizer), which owns the population, the
//!   global best and the iteration history
//! - **Typed payloads**: each algorithm family carries its own per-agent state
//!   (`BatState`, `AbcBatState`, `FishState`)
//! - **Injected randomness**: optimizers draw from any `rand::Rng`; seeded
//!   generators make runs reproducible
//!
//! ## Algorithms
//!
//! - Bat Algorithm: standard, adaptive, chaotic + Lévy, self-adaptive
//! - Bat hybrids with DE, PSO, simulated annealing, harmony search and ABC
//! - Artificial Fish Swarm: standard, fast, modified
//! - Binary and discrete (permutation) Bat variants
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swarmlab::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut optimizer = OptimizerBuilder::new()
//!     .population_size(30)
//!     .bounds(Bounds::symmetric(5.12))
//!     .objective(|x, y| x * x + y * y)
//!     .build_with_rng(StandardBat::default(), rand::rngs::StdRng::seed_from_u64(42))?;
//!
//! optimizer.run(200);
//! println!("best {:?} at {}", optimizer.best_position(), optimizer.best_fitness());
//! ```

pub mod algorithms;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod numeric;
pub mod operators;
pub mod optimizer;
pub mod population;
pub mod solution;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::numeric::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::optimizer::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::solution::prelude::*;
}
