//! Numerical primitives
//!
//! Building blocks shared by the algorithm variants:
//!
//! 1. **Gamma function**: Lanczos approximation used by the Lévy step scale
//! 2. **Lévy flight**: heavy-tailed steps via Mantegna's algorithm
//! 3. **Chaos maps**: deterministic recurrences used in place of uniform draws
//! 4. **Gaussian sampling**: standard normal draws
//! 5. **Schedules**: progress-driven parameter schedules and a named registry

pub mod chaos;
pub mod gamma;
pub mod gaussian;
pub mod levy;
pub mod schedules;

pub mod prelude {
    pub use super::chaos::*;
    pub use super::gamma::*;
    pub use super::gaussian::*;
    pub use super::levy::*;
    pub use super::schedules::*;
}
