//! Bat Algorithm hybrids
//!
//! Each hybrid keeps the bat acceptance contract (loudness draw and strict
//! improvement, loudness decay and pulse-rate growth on acceptance) and swaps
//! in a movement or acceptance operator from another metaheuristic:
//!
//! | Hybrid | Borrowed operator |
//! |---|---|
//! | [`DeBat`] | rand/1 mutation + binomial crossover as the velocity target |
//! | [`PsoBat`] | inertia/cognitive/social velocity with personal bests |
//! | [`SaBat`] | Metropolis acceptance with geometric cooling |
//! | [`HsBat`] | harmony-memory improvisation as the local move |
//! | [`AbcBat`] | employed-bee move and scout abandonment |

pub mod abc;
pub mod de;
pub mod hs;
pub mod pso;
pub mod sa;

pub use abc::{AbcBat, AbcBatParams, AbcBatState};
pub use de::{DeBat, DeBatParams};
pub use hs::{HsBat, HsBatParams};
pub use pso::{PsoBat, PsoBatParams};
pub use sa::{SaBat, SaBatParams};
