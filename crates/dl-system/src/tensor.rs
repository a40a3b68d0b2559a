// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Owned f32 tensors exchanged with the engine.

use crate::{DlSystemError, TensorShape};
use std::collections::BTreeMap;

/// Named tensors, keyed by input or output layer name.
pub type TensorMap = BTreeMap<String, Tensor>;

/// An owned, row-major tensor of 32-bit floats.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: TensorShape,
    data: Vec<f32>,
}

impl Tensor {
    /// Creates a tensor filled with zeros.
    pub fn zeros(shape: TensorShape) -> Self {
        let data = vec![0.0; shape.num_elements()];
        Self { shape, data }
    }

    /// Creates a tensor from owned values.
    ///
    /// Returns an error if `data.len()` does not match the shape.
    ///
    /// # Examples
    /// ```
    /// use dl_system::{Tensor, TensorShape};
    /// let t = Tensor::from_vec(TensorShape::new(vec![1, 3]), vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0]);
    /// assert!(Tensor::from_vec(TensorShape::new(vec![2, 2]), vec![0.0]).is_err());
    /// ```
    pub fn from_vec(shape: TensorShape, data: Vec<f32>) -> Result<Self, DlSystemError> {
        let expected = shape.num_elements();
        if data.len() != expected {
            return Err(DlSystemError::ElementCountMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &TensorShape {
        &self.shape
    }

    /// Returns the values in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the values mutably.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for a tensor with no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
