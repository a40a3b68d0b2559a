// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor shape descriptors.

use std::fmt;

/// Ordered tensor dimensions. The first dimension is the batch size.
///
/// A dimension of `0` marks a dynamically sized axis whose extent is only
/// known after execution (see [`TensorShape::resolve_dynamic`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TensorShape {
    dims: Vec<usize>,
}

impl TensorShape {
    /// Creates a shape from the given dimensions.
    ///
    /// # Examples
    /// ```
    /// use dl_system::TensorShape;
    /// let s = TensorShape::new(vec![1, 224, 224, 3]);
    /// assert_eq!(s.rank(), 4);
    /// assert_eq!(s.batch_size(), Some(1));
    /// assert_eq!(s.num_elements(), 224 * 224 * 3);
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Returns the number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the size of a specific dimension, or `None` if out of bounds.
    pub fn dim(&self, index: usize) -> Option<usize> {
        self.dims.get(index).copied()
    }

    /// Returns the first dimension, read as the batch size.
    pub fn batch_size(&self) -> Option<usize> {
        self.dim(0)
    }

    /// Total number of elements. A rank-0 shape holds one element.
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }

    /// Number of elements in one batch entry (all dimensions but the first).
    pub fn element_volume(&self) -> usize {
        self.dims.iter().skip(1).product()
    }

    /// Returns `true` if any dimension is dynamic (`0`).
    pub fn is_dynamic(&self) -> bool {
        self.dims.iter().any(|&d| d == 0)
    }

    /// Replaces every dynamic dimension with `max_dim`.
    ///
    /// Used to size user buffers for outputs whose extent is unknown until
    /// execution.
    pub fn resolve_dynamic(&self, max_dim: usize) -> TensorShape {
        TensorShape::new(
            self.dims
                .iter()
                .map(|&d| if d == 0 { max_dim } else { d })
                .collect(),
        )
    }

    /// Returns a copy with the batch dimension replaced.
    pub fn with_batch_size(&self, batch: usize) -> TensorShape {
        let mut dims = self.dims.clone();
        if let Some(first) = dims.first_mut() {
            *first = batch;
        }
        TensorShape::new(dims)
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

impl From<Vec<usize>> for TensorShape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

impl From<&[usize]> for TensorShape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_and_volume() {
        let s = TensorShape::new(vec![4, 3, 2]);
        assert_eq!(s.batch_size(), Some(4));
        assert_eq!(s.element_volume(), 6);
        assert_eq!(s.num_elements(), 24);
    }

    #[test]
    fn test_rank_zero() {
        let s = TensorShape::new(vec![]);
        assert_eq!(s.batch_size(), None);
        assert_eq!(s.num_elements(), 1);
    }

    #[test]
    fn test_dynamic_dims() {
        let s = TensorShape::new(vec![1, 0, 4]);
        assert!(s.is_dynamic());
        let r = s.resolve_dynamic(16);
        assert_eq!(r.dims(), &[1, 16, 4]);
        assert!(!r.is_dynamic());
    }

    #[test]
    fn test_with_batch_size() {
        let s = TensorShape::new(vec![1, 10]);
        assert_eq!(s.with_batch_size(8).dims(), &[8, 10]);
    }

    #[test]
    fn test_display() {
        let s = TensorShape::new(vec![1, 299, 299, 3]);
        assert_eq!(format!("{s}"), "[1, 299, 299, 3]");
    }

    #[test]
    fn test_from_conversions() {
        let s1: TensorShape = vec![2, 3].into();
        let s2: TensorShape = (&[2, 3][..]).into();
        assert_eq!(s1, s2);
    }
}
