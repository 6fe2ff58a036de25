//! Sparse feature vectors.

use serde::{Deserialize, Serialize};

/// A sparse vector of `(feature index, value)` entries sorted by index.
///
/// Zero-valued entries are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Create an all-zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Build a vector from unordered entries.
    ///
    /// Entries with the same index are summed; zero values and indices outside
    /// `dimension` are dropped.
    pub fn from_entries<I>(dimension: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut entries: Vec<(usize, f64)> = entries
            .into_iter()
            .filter(|&(index, _)| index < dimension)
            .collect();
        entries.sort_by_key(|&(index, _)| index);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            match merged.last_mut() {
                Some(last) if last.0 == index => last.1 += value,
                Some(_) | None => merged.push((index, value)),
            }
        }
        merged.retain(|&(_, value)| value != 0.0);

        Self {
            dimension,
            entries: merged,
        }
    }

    /// The number of features this vector spans.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Whether every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the non-zero `(index, value)` entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Value at `index` (zero when absent).
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Euclidean norm.
    pub fn l2_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Scale the vector to unit L2 norm; the zero vector is left unchanged.
    pub fn l2_normalize(&mut self) {
        let norm = self.l2_norm();
        if norm > 0.0 {
            for (_, value) in &mut self.entries {
                *value /= norm;
            }
        }
    }

    /// Dot product with a dense vector of the same dimension.
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(index, value)| dense.get(index).map(|d| d * value))
            .sum()
    }

    /// Expand into a dense vector.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for &(index, value) in &self.entries {
            dense[index] = value;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_sorts_and_merges() {
        let v = SparseVector::from_entries(5, vec![(3, 1.0), (1, 2.0), (3, 0.5), (2, 0.0), (9, 4.0)]);

        assert_eq!(v.dimension(), 5);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(1, 2.0), (3, 1.5)]);
        assert_eq!(v.get(3), 1.5);
        assert_eq!(v.get(0), 0.0);
    }

    #[test]
    fn test_l2_normalize() {
        let mut v = SparseVector::from_entries(3, vec![(0, 3.0), (2, 4.0)]);
        v.l2_normalize();

        assert!((v.l2_norm() - 1.0).abs() < 1e-12);
        assert!((v.get(0) - 0.6).abs() < 1e-12);
        assert_eq!(v.to_dense().len(), 3);

        let mut zero = SparseVector::zeros(3);
        zero.l2_normalize();
        assert!(zero.is_zero());
    }

    #[test]
    fn test_dot_dense() {
        let v = SparseVector::from_entries(3, vec![(0, 2.0), (2, 1.0)]);
        assert_eq!(v.dot_dense(&[1.0, 10.0, -3.0]), -1.0);
    }
}
