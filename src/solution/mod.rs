//! Solution representations
//!
//! - [`Position`]: continuous 2D point, the primary representation
//! - [`BitString`]: binary solutions for the binary Bat variant
//! - [`Permutation`]: orderings for the discrete Bat variant

pub mod bit_string;
pub mod bounds;
pub mod permutation;

pub use bit_string::BitString;
pub use bounds::Bounds;
pub use permutation::{Permutation, Swap};

/// Number of axes of the continuous search space
pub const DIMENSION: usize = 2;

/// A point in the continuous search space
pub type Position = [f64; DIMENSION];

/// Euclidean distance between two positions
pub fn distance(a: &Position, b: &Position) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Component-wise mean of a set of positions; `None` when empty
pub fn centroid<'a, I>(positions: I) -> Option<Position>
where
    I: IntoIterator<Item = &'a Position>,
{
    let mut sum = [0.0; DIMENSION];
    let mut count = 0usize;
    for p in positions {
        for (s, v) in sum.iter_mut().zip(p.iter()) {
            *s += v;
        }
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum.map(|s| s / count as f64))
    }
}

pub mod prelude {
    pub use super::bit_string::*;
    pub use super::bounds::*;
    pub use super::permutation::*;
    pub use super::{centroid, distance, Position, DIMENSION};
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        assert_relative_eq!(distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_relative_eq!(distance(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_centroid() {
        let points = [[0.0, 0.0], [2.0, 4.0]];
        assert_eq!(centroid(points.iter()), Some([1.0, 2.0]));
        assert_eq!(centroid(std::iter::empty::<&Position>()), None);
    }
}
