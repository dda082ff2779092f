//! Permutation solution
//!
//! Orderings of `0..n` for the discrete (TSP-style) Bat variant. Velocities
//! are expressed as swap sequences: lists of index transpositions that turn
//! one permutation into another.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SwarmError, SwarmResult};

/// A single transposition of two positions
pub type Swap = (usize, usize);

/// Permutation of indices 0..n
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permutation {
    perm: Vec<usize>,
}

impl Permutation {
    /// Try to create a permutation, returning an error if invalid
    pub fn try_new(perm: Vec<usize>) -> SwarmResult<Self> {
        let result = Self { perm };
        if result.is_valid_permutation() {
            Ok(result)
        } else {
            Err(SwarmError::InvalidStructure(
                "input is not a valid permutation of 0..n".to_string(),
            ))
        }
    }

    /// Create the identity permutation [0, 1, 2, ..., n-1]
    pub fn identity(n: usize) -> Self {
        Self {
            perm: (0..n).collect(),
        }
    }

    /// Create a random permutation of size n
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut perm: Vec<usize> = (0..n).collect();
        perm.shuffle(rng);
        Self { perm }
    }

    /// Get the length of the permutation
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    /// Check if the permutation is empty
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Get a reference to the underlying slice
    pub fn as_slice(&self) -> &[usize] {
        &self.perm
    }

    /// Check that every index in 0..n appears exactly once
    pub fn is_valid_permutation(&self) -> bool {
        let n = self.perm.len();
        let mut seen = vec![false; n];
        for &i in &self.perm {
            if i >= n || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }

    /// Swap two elements at positions i and j
    pub fn swap(&mut self, i: usize, j: usize) {
        self.perm.swap(i, j);
    }

    /// Reverse a segment from start to end (inclusive)
    pub fn reverse_segment(&mut self, start: usize, end: usize) {
        if start < end && end < self.perm.len() {
            self.perm[start..=end].reverse();
        }
    }

    /// Swap sequence that turns `self` into `target`
    ///
    /// Applying the returned swaps in order to `self` yields `target`.
    pub fn swap_sequence_to(&self, target: &Self) -> SwarmResult<Vec<Swap>> {
        if self.perm.len() != target.perm.len() {
            return Err(SwarmError::DimensionMismatch {
                expected: self.perm.len(),
                actual: target.perm.len(),
            });
        }

        let mut current = self.perm.clone();
        let mut where_is = vec![0; current.len()];
        for (i, &v) in current.iter().enumerate() {
            where_is[v] = i;
        }

        let mut swaps = Vec::new();
        for i in 0..current.len() {
            let wanted = target.perm[i];
            if current[i] != wanted {
                let j = where_is[wanted];
                swaps.push((i, j));
                where_is[current[i]] = j;
                where_is[wanted] = i;
                current.swap(i, j);
            }
        }
        Ok(swaps)
    }

    /// Apply a swap sequence in order
    pub fn apply_swaps(&mut self, swaps: &[Swap]) {
        for &(i, j) in swaps {
            self.perm.swap(i, j);
        }
    }
}

impl std::ops::Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.perm[index]
    }
}
