// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core owned tensor type.

use crate::{AxisRange, Shape, TensorError, TensorView};

/// An owned, n-dimensional `f32` tensor stored in contiguous memory.
///
/// `Tensor` is the single owner of its buffer. Zero-copy windows are
/// borrowed from it via [`view`](Tensor::view) and [`slice`](Tensor::slice);
/// the borrow checker keeps every view from outliving the tensor, and no
/// mutation is possible while a view exists.
///
/// # Memory Layout
/// Elements are stored in row-major (C) order: the last axis varies fastest.
///
/// Equality is exact: equal shapes and bitwise-comparable `f32` values
/// (`NaN != NaN`).
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    elements: Vec<f32>,
}

impl Tensor {
    /// Creates a tensor from a shape and an element buffer.
    ///
    /// Extra trailing elements are dropped; the buffer is truncated to
    /// `shape.volume()`.
    ///
    /// # Examples
    /// ```
    /// use dense_tensor::Tensor;
    /// let t = Tensor::new([2], vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.as_slice(), &[1.0, 2.0]);
    /// ```
    ///
    /// # Errors
    /// - [`TensorError::BufferSizeMismatch`] if the buffer holds fewer than
    ///   `shape.volume()` elements.
    /// - [`TensorError::InvalidParameter`] if the volume overflows `usize`.
    pub fn new(shape: impl Into<Shape>, mut elements: Vec<f32>) -> Result<Self, TensorError> {
        let shape = shape.into();
        let volume = checked_volume(&shape)?;
        if elements.len() < volume {
            return Err(TensorError::BufferSizeMismatch {
                expected: volume,
                actual: elements.len(),
            });
        }
        elements.truncate(volume);
        Ok(Self { shape, elements })
    }

    /// Builds a tensor whose buffer is already known to hold exactly
    /// `shape.volume()` elements.
    pub(crate) fn from_parts(shape: Shape, elements: Vec<f32>) -> Self {
        debug_assert_eq!(shape.volume(), elements.len());
        Self { shape, elements }
    }

    /// Creates a tensor from a slice of `f32` values (copied).
    pub fn from_f32(shape: impl Into<Shape>, values: &[f32]) -> Result<Self, TensorError> {
        let shape = shape.into();
        let volume = checked_volume(&shape)?;
        if values.len() < volume {
            return Err(TensorError::BufferSizeMismatch {
                expected: volume,
                actual: values.len(),
            });
        }
        Ok(Self {
            shape,
            elements: values[..volume].to_vec(),
        })
    }

    /// Creates a tensor with every element set to `value`.
    pub fn filled(shape: impl Into<Shape>, value: f32) -> Self {
        let shape = shape.into();
        let elements = vec![value; shape.volume()];
        Self { shape, elements }
    }

    /// Creates a new tensor filled with zeros.
    pub fn zeros(shape: impl Into<Shape>) -> Self {
        Self::filled(shape, 0.0)
    }

    /// Creates a rank-0 tensor holding one value.
    pub fn scalar(value: f32) -> Self {
        Self {
            shape: Shape::scalar(),
            elements: vec![value],
        }
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of elements.
    pub fn volume(&self) -> usize {
        self.elements.len()
    }

    /// Returns the row-major element buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.elements
    }

    /// Returns the row-major element buffer mutably.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.elements
    }

    /// Consumes the tensor, returning its buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.elements
    }

    /// Returns the element at `indices`.
    pub fn get(&self, indices: &[usize]) -> Result<f32, TensorError> {
        let offset = self.shape.index(indices)?;
        Ok(self.elements[offset])
    }

    /// Overwrites the element at `indices`.
    pub fn set(&mut self, indices: &[usize], value: f32) -> Result<(), TensorError> {
        let offset = self.shape.index(indices)?;
        self.elements[offset] = value;
        Ok(())
    }

    /// Fills the tensor with a constant value.
    pub fn fill(&mut self, value: f32) {
        self.elements.iter_mut().for_each(|x| *x = value);
    }

    /// Returns a copy of this tensor with a different shape over the same
    /// row-major contents.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] unless the volumes are equal.
    /// Unlike [`Tensor::new`], nothing is ever truncated.
    pub fn reshaped(&self, shape: impl Into<Shape>) -> Result<Tensor, TensorError> {
        let mut copy = self.clone();
        copy.reshape(shape)?;
        Ok(copy)
    }

    /// Changes the shape in place; see [`reshaped`](Tensor::reshaped).
    pub fn reshape(&mut self, shape: impl Into<Shape>) -> Result<(), TensorError> {
        let shape = shape.into();
        if shape.checked_volume() != Some(self.shape.volume()) {
            return Err(TensorError::shape_mismatch("reshape", &self.shape, &shape));
        }
        self.shape = shape;
        Ok(())
    }

    /// Iterates elements in row-major order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, f32>> {
        self.elements.iter().copied()
    }

    /// Returns a view covering the whole tensor.
    pub fn view(&self) -> TensorView<'_> {
        TensorView::full(self)
    }

    /// Returns a zero-copy window; one range per leading axis.
    ///
    /// Missing trailing ranges select whole axes. Ranges are clamped to
    /// `[0, dim)`, never rejected.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidParameter`] if more ranges than axes
    /// are given.
    pub fn slice(&self, ranges: &[AxisRange]) -> Result<TensorView<'_>, TensorError> {
        self.view().slice(ranges)
    }
}

impl<'a> IntoIterator for &'a Tensor {
    type Item = &'a f32;
    type IntoIter = std::slice::Iter<'a, f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl From<TensorView<'_>> for Tensor {
    fn from(view: TensorView<'_>) -> Self {
        view.to_tensor()
    }
}

impl From<&TensorView<'_>> for Tensor {
    fn from(view: &TensorView<'_>) -> Self {
        view.to_tensor()
    }
}

impl PartialEq<TensorView<'_>> for Tensor {
    fn eq(&self, other: &TensorView<'_>) -> bool {
        self.shape() == other.shape() && self.iter().eq(other.iter())
    }
}

fn checked_volume(shape: &Shape) -> Result<usize, TensorError> {
    shape
        .checked_volume()
        .ok_or_else(|| TensorError::invalid("tensor", format!("volume of {shape} overflows usize")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_truncates() {
        let t = Tensor::new([2, 2], vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(t.volume(), 4);
    }

    #[test]
    fn test_new_too_short() {
        let result = Tensor::new([2, 3], vec![0.0; 5]);
        assert_eq!(
            result,
            Err(TensorError::BufferSizeMismatch {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn test_new_rejects_overflowing_volume() {
        let half = 1usize << (usize::BITS / 2);
        let huge = [half, half];
        assert!(matches!(
            Tensor::new(huge, Vec::new()),
            Err(TensorError::InvalidParameter { op: "tensor", .. })
        ));
        assert!(Tensor::from_f32(huge, &[]).is_err());

        let mut t = Tensor::zeros([0]);
        assert!(matches!(
            t.reshape(huge),
            Err(TensorError::ShapeMismatch { op: "reshape", .. })
        ));
    }

    #[test]
    fn test_filled_and_zeros() {
        let t = Tensor::filled([2, 3], 0.5);
        assert_eq!(t.volume(), 6);
        assert!(t.iter().all(|x| x == 0.5));
        assert!(Tensor::zeros(Shape::vector(4)).iter().all(|x| x == 0.0));
    }

    #[test]
    fn test_scalar_tensor() {
        let t = Tensor::scalar(3.0);
        assert_eq!(t.shape().rank(), 0);
        assert_eq!(t.get(&[]).unwrap(), 3.0);
        assert_eq!(Tensor::zeros(Shape::scalar()).volume(), 1);
    }

    #[test]
    fn test_get_set() {
        let mut t = Tensor::zeros([2, 3]);
        t.set(&[1, 2], 7.0).unwrap();
        assert_eq!(t.get(&[1, 2]).unwrap(), 7.0);
        assert_eq!(t.as_slice()[5], 7.0);
        assert!(t.get(&[2, 0]).is_err());
        assert!(t.set(&[0], 1.0).is_err());
    }

    #[test]
    fn test_reshape_keeps_order() {
        let t = Tensor::new([2, 3], (0..6).map(|x| x as f32).collect()).unwrap();
        let r = t.reshaped([3, 2]).unwrap();
        assert_eq!(r.shape(), &Shape::matrix(3, 2));
        assert_eq!(r.as_slice(), t.as_slice());
        assert_eq!(r.get(&[2, 1]).unwrap(), 5.0);
    }

    #[test]
    fn test_reshape_rejects_volume_change() {
        let mut t = Tensor::zeros([2, 3]);
        assert!(matches!(
            t.reshape([5]),
            Err(TensorError::ShapeMismatch { op: "reshape", .. })
        ));
        assert!(t.reshaped([7]).is_err());
        assert_eq!(t.shape(), &Shape::matrix(2, 3));
    }

    #[test]
    fn test_equality_is_exact() {
        let a = Tensor::new([2], vec![1.0, 2.0]).unwrap();
        let b = Tensor::new([2], vec![1.0, 2.0 + 1e-6]).unwrap();
        let c = Tensor::new([1, 2], vec![1.0, 2.0]).unwrap();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_iteration_restarts() {
        let t = Tensor::new([3], vec![1.0, 2.0, 3.0]).unwrap();
        let first: Vec<f32> = t.iter().collect();
        let second: Vec<f32> = (&t).into_iter().copied().collect();
        assert_eq!(first, second);
    }
}
