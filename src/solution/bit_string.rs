//! Bit string solution
//!
//! Fixed-length binary solution used by the binary Bat variant.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SwarmError, SwarmResult};

/// Fixed-length bit string
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Create a new bit string with the given bits
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create an all-zeros bit string of the given length
    pub fn zeros(length: usize) -> Self {
        Self {
            bits: vec![false; length],
        }
    }

    /// Create a uniformly random bit string
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..length).map(|_| rng.gen::<bool>()).collect(),
        }
    }

    /// Get the length of the bit string
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the bit string is empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get a specific bit
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Set a specific bit
    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = value;
        }
    }

    /// Flip a specific bit
    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// The bits as a slice
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Bit `index` as 0.0 / 1.0, for velocity arithmetic
    pub fn value(&self, index: usize) -> f64 {
        if self.bits[index] {
            1.0
        } else {
            0.0
        }
    }

    /// Hamming distance to another bit string of the same length
    pub fn hamming_distance(&self, other: &Self) -> SwarmResult<usize> {
        if self.bits.len() != other.bits.len() {
            return Err(SwarmError::DimensionMismatch {
                expected: self.bits.len(),
                actual: other.bits.len(),
            });
        }
        Ok(self
            .bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a != b)
            .count())
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl std::fmt::Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.bits {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bit_string_get_set_flip() {
        let mut bs = BitString::zeros(4);
        bs.set(1, true);
        bs.flip(3);
        assert_eq!(bs.get(1), Some(true));
        assert_eq!(bs.get(3), Some(true));
        assert_eq!(bs.get(0), Some(false));
        assert_eq!(bs.get(9), None);
        assert_eq!(bs.count_ones(), 2);
        assert_eq!(bs.value(1), 1.0);
        assert_eq!(bs.value(0), 0.0);
    }

    #[test]
    fn test_bit_string_hamming_distance() {
        let a = BitString::new(vec![true, false, true, false]);
        let b = BitString::new(vec![true, true, false, false]);
        assert_eq!(a.hamming_distance(&b).unwrap(), 2);
        assert!(a.hamming_distance(&BitString::zeros(3)).is_err());
    }

    #[test]
    fn test_bit_string_random_length() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(BitString::random(17, &mut rng).len(), 17);
    }

    #[test]
    fn test_bit_string_display() {
        let bs = BitString::new(vec![true, false, true, true]);
        assert_eq!(bs.to_string(), "1011");
    }
}
