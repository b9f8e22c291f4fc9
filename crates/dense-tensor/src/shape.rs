// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor shape descriptors and row-major index arithmetic.

use crate::TensorError;
use std::fmt;

/// Extent of a single axis. Non-negative by construction.
pub type Dimension = usize;

/// Per-axis extents of a [`crate::Tensor`] or view.
///
/// Shapes are immutable once created and provide the row-major (C order)
/// index arithmetic used by every other component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<Dimension>,
}

impl Shape {
    /// Wraps a list of axis extents.
    ///
    /// # Examples
    /// ```
    /// use dense_tensor::Shape;
    /// let image = Shape::new(vec![28, 28, 1]);
    /// assert_eq!(image.rank(), 3);
    /// assert_eq!(image.volume(), 784);
    /// ```
    pub fn new(dims: Vec<Dimension>) -> Self {
        Self { dims }
    }

    /// The rank-0 shape.
    pub fn scalar() -> Self {
        Self { dims: vec![] }
    }

    /// `[len]`.
    pub fn vector(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    /// `[rows, cols]`.
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self {
            dims: vec![rows, cols],
        }
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Product of the extents. The empty product makes a scalar's volume 1.
    pub fn volume(&self) -> usize {
        self.dims.iter().product()
    }

    /// [`volume`](Shape::volume), or `None` if the product overflows `usize`.
    pub fn checked_volume(&self) -> Option<usize> {
        self.dims.iter().try_fold(1usize, |v, &d| v.checked_mul(d))
    }

    /// Axis extents, outermost first.
    pub fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    /// Extent of `axis`, if the shape has that many axes.
    pub fn dim(&self, axis: usize) -> Option<Dimension> {
        self.dims.get(axis).copied()
    }

    /// Row-major strides: the flat-buffer step for one increment along each
    /// axis. The last axis has stride 1.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1usize; self.dims.len()];
        let mut step = 1;
        for (stride, &dim) in strides.iter_mut().zip(&self.dims).rev() {
            *stride = step;
            step *= dim;
        }
        strides
    }

    /// Computes the flat row-major offset of `indices`.
    ///
    /// # Errors
    /// Returns [`TensorError::IndexOutOfRange`] if `indices.len() != rank` or
    /// any index is outside `[0, dim)` for its axis.
    pub fn index(&self, indices: &[usize]) -> Result<usize, TensorError> {
        if indices.len() != self.dims.len() {
            return Err(self.out_of_range(indices));
        }
        let mut offset = 0;
        for (&idx, &dim) in indices.iter().zip(&self.dims) {
            if idx >= dim {
                return Err(self.out_of_range(indices));
            }
            offset = offset * dim + idx;
        }
        Ok(offset)
    }

    /// Returns `true` if the trailing dimensions of `self` equal `suffix`.
    ///
    /// This is the broadcasting rule: a lower-rank operand is repeated over
    /// the leading axes of a higher-rank one whose tail matches it exactly.
    pub fn has_suffix(&self, suffix: &Shape) -> bool {
        self.dims.ends_with(&suffix.dims)
    }

    /// Whether `self` as `[M, K]` and `other` as `[K, N]` can be multiplied.
    pub fn is_matmul_compatible(&self, other: &Shape) -> bool {
        self.rank() == 2 && other.rank() == 2 && self.dims[1] == other.dims[0]
    }

    fn out_of_range(&self, indices: &[usize]) -> TensorError {
        TensorError::IndexOutOfRange {
            indices: indices.to_vec(),
            shape: self.clone(),
        }
    }
}

impl fmt::Display for Shape {
    /// Formats as `[2, 3, 4]`; a scalar shape is `[]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.dims).finish()
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}

/// Convenience: `Shape::from([2, 3])`.
impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims.to_vec())
    }
}

impl From<&Shape> for Shape {
    fn from(shape: &Shape) -> Self {
        shape.clone()
    }
}
