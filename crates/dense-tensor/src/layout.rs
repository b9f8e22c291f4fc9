// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The operand abstraction shared by [`Tensor`] and [`TensorView`].

use crate::{Shape, Tensor, TensorView};
use std::borrow::Cow;

/// Anything with a shape and a row-major element sequence.
///
/// Every operation in [`crate::ops`] is generic over this trait, so owned
/// tensors and views are interchangeable operands.
pub trait TensorLike {
    /// Row-major element iterator.
    type Elements<'s>: Iterator<Item = f32>
    where
        Self: 's;

    /// Logical shape of the operand.
    fn shape(&self) -> &Shape;

    /// Iterates the elements in row-major order. Each call starts afresh.
    fn elements(&self) -> Self::Elements<'_>;

    /// Describes where the operand lives inside its backing buffer.
    fn layout(&self) -> StridedLayout<'_>;

    /// Returns the elements as one contiguous row-major buffer, borrowing
    /// when the operand already is one.
    fn contiguous(&self) -> Cow<'_, [f32]> {
        Cow::Owned(self.elements().collect())
    }
}

/// Position of an operand inside the buffer that backs it.
///
/// For an owned tensor the offset is zero and `full_shape` equals the
/// logical shape. For a view, `full_shape` is the source tensor's shape and
/// `offset` points at the element under the lower bound of every range.
#[derive(Debug, Clone, Copy)]
pub struct StridedLayout<'a> {
    /// The complete backing buffer.
    pub data: &'a [f32],
    /// Shape of the tensor owning `data`; its strides apply to the operand.
    pub full_shape: &'a Shape,
    /// Flat offset of the operand's first element within `data`.
    pub offset: usize,
}

impl TensorLike for Tensor {
    type Elements<'s> = std::iter::Copied<std::slice::Iter<'s, f32>>;

    fn shape(&self) -> &Shape {
        Tensor::shape(self)
    }

    fn elements(&self) -> Self::Elements<'_> {
        self.iter()
    }

    fn layout(&self) -> StridedLayout<'_> {
        StridedLayout {
            data: self.as_slice(),
            full_shape: Tensor::shape(self),
            offset: 0,
        }
    }

    fn contiguous(&self) -> Cow<'_, [f32]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<'a> TensorLike for TensorView<'a> {
    type Elements<'s> = crate::ViewIter<'a> where Self: 's;

    fn shape(&self) -> &Shape {
        TensorView::shape(self)
    }

    fn elements(&self) -> Self::Elements<'_> {
        self.iter()
    }

    fn layout(&self) -> StridedLayout<'_> {
        StridedLayout {
            data: self.source().as_slice(),
            full_shape: self.source().shape(),
            offset: self.origin_offset(),
        }
    }
}

impl<T: TensorLike + ?Sized> TensorLike for &T {
    type Elements<'s> = T::Elements<'s> where Self: 's;

    fn shape(&self) -> &Shape {
        (**self).shape()
    }

    fn elements(&self) -> Self::Elements<'_> {
        (**self).elements()
    }

    fn layout(&self) -> StridedLayout<'_> {
        (**self).layout()
    }

    fn contiguous(&self) -> Cow<'_, [f32]> {
        (**self).contiguous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s;

    fn total<T: TensorLike>(t: &T) -> f32 {
        t.elements().sum()
    }

    #[test]
    fn test_tensor_and_view_are_operands() {
        let t = Tensor::new([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(total(&t), 21.0);
        let v = t.slice(s![1..2, ..]).unwrap();
        assert_eq!(total(&v), 15.0);
    }

    #[test]
    fn test_layout_offsets() {
        let t = Tensor::zeros([4, 5]);
        assert_eq!(t.layout().offset, 0);
        let v = t.slice(s![2..4, 1..3]).unwrap();
        let layout = v.layout();
        assert_eq!(layout.offset, 11);
        assert_eq!(layout.full_shape, &Shape::matrix(4, 5));
        assert_eq!(layout.data.len(), 20);
    }

    #[test]
    fn test_contiguous_borrows_tensor() {
        let t = Tensor::new([2], vec![1.0, 2.0]).unwrap();
        assert!(matches!(t.contiguous(), Cow::Borrowed(_)));
        let v = t.view();
        assert!(matches!(v.contiguous(), Cow::Owned(_)));
        assert_eq!(v.contiguous().as_ref(), &[1.0, 2.0]);
    }
}
