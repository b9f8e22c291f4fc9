// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Zero-copy windows into a [`Tensor`].

use crate::{AxisRange, Shape, Tensor, TensorError};
use std::ops::Range;

/// A borrowed, read-only window over a [`Tensor`]'s buffer.
///
/// A view keeps one clamped half-open range per axis of its source; its
/// shape is the per-axis range length, so it always has the source's rank.
/// Views are zero-copy and tied to the lifetime of the source tensor,
/// enforced by the borrow checker.
#[derive(Debug, Clone)]
pub struct TensorView<'a> {
    source: &'a Tensor,
    ranges: Vec<Range<usize>>,
    shape: Shape,
    strides: Vec<usize>,
}

impl<'a> TensorView<'a> {
    pub(crate) fn full(source: &'a Tensor) -> Self {
        let ranges = source.shape().dims().iter().map(|&d| 0..d).collect();
        Self::from_ranges(source, ranges)
    }

    fn from_ranges(source: &'a Tensor, ranges: Vec<Range<usize>>) -> Self {
        let shape = Shape::new(ranges.iter().map(|r| r.len()).collect());
        Self {
            source,
            ranges,
            shape,
            strides: source.shape().strides(),
        }
    }

    /// Returns the shape of the window.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of elements in the window.
    pub fn volume(&self) -> usize {
        self.shape.volume()
    }

    /// Returns the tensor this view borrows from.
    pub fn source(&self) -> &'a Tensor {
        self.source
    }

    /// Returns the clamped per-axis ranges in source coordinates.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Flat source offset of the window's first element.
    pub(crate) fn origin_offset(&self) -> usize {
        self.ranges
            .iter()
            .zip(&self.strides)
            .map(|(range, &stride)| range.start * stride)
            .sum()
    }

    /// Returns the element at `indices`, relative to the window's origin.
    ///
    /// # Errors
    /// Returns [`TensorError::IndexOutOfRange`] if `indices` lies outside
    /// the window's shape.
    pub fn get(&self, indices: &[usize]) -> Result<f32, TensorError> {
        self.shape.index(indices)?;
        let offset = indices
            .iter()
            .zip(&self.ranges)
            .zip(&self.strides)
            .map(|((&idx, range), &stride)| (range.start + idx) * stride)
            .sum::<usize>();
        Ok(self.source.as_slice()[offset])
    }

    /// Slices this view again.
    ///
    /// Ranges are relative to this view: each is clamped to
    /// `[0, self.shape()[axis])` and then shifted by the view's clamped
    /// origin, so the result never reaches outside `self`.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidParameter`] if more ranges than axes
    /// are given.
    pub fn slice(&self, ranges: &[AxisRange]) -> Result<TensorView<'a>, TensorError> {
        if ranges.len() > self.ranges.len() {
            return Err(TensorError::invalid(
                "slice",
                format!(
                    "{} ranges given for a rank-{} operand",
                    ranges.len(),
                    self.ranges.len()
                ),
            ));
        }
        let composed = self
            .ranges
            .iter()
            .enumerate()
            .map(|(axis, outer)| {
                let inner = ranges.get(axis).copied().unwrap_or(AxisRange::FULL);
                let local = inner.resolve(outer.len());
                outer.start + local.start..outer.start + local.end
            })
            .collect();
        Ok(Self::from_ranges(self.source, composed))
    }

    /// Iterates the window's elements in row-major order.
    pub fn iter(&self) -> ViewIter<'a> {
        ViewIter::new(self)
    }

    /// Copies the window into a new owned tensor.
    pub fn to_tensor(&self) -> Tensor {
        Tensor::from_parts(self.shape.clone(), self.iter().collect())
    }
}

impl PartialEq for TensorView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.iter().eq(other.iter())
    }
}

impl PartialEq<Tensor> for TensorView<'_> {
    fn eq(&self, other: &Tensor) -> bool {
        self.shape() == other.shape() && self.iter().eq(other.iter())
    }
}

impl<'a> IntoIterator for &TensorView<'a> {
    type Item = f32;
    type IntoIter = ViewIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over the elements of a [`TensorView`].
///
/// Walks the clamped box from the innermost axis outwards and stops once the
/// leading axis runs past its range.
#[derive(Debug, Clone)]
pub struct ViewIter<'a> {
    data: &'a [f32],
    ranges: Vec<Range<usize>>,
    strides: Vec<usize>,
    current: Vec<usize>,
    remaining: usize,
}

impl<'a> ViewIter<'a> {
    fn new(view: &TensorView<'a>) -> Self {
        Self {
            data: view.source.as_slice(),
            ranges: view.ranges.clone(),
            strides: view.strides.clone(),
            current: view.ranges.iter().map(|r| r.start).collect(),
            remaining: view.shape.volume(),
        }
    }

    fn offset(&self) -> usize {
        self.current
            .iter()
            .zip(&self.strides)
            .map(|(&idx, &stride)| idx * stride)
            .sum()
    }
}

impl Iterator for ViewIter<'_> {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.data[self.offset()];
        self.remaining -= 1;

        let mut axis = self.current.len();
        while axis > 0 {
            axis -= 1;
            self.current[axis] += 1;
            if self.current[axis] < self.ranges[axis].end || axis == 0 {
                break;
            }
            self.current[axis] = self.ranges[axis].start;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ViewIter<'_> {}
