// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sliding-window geometry shared by `conv2d` and `max_pool`.
//!
//! Images are laid out `[rows, cols, channels]` or
//! `[batch, rows, cols, channels]`. Padding follows the "same" convention:
//! the output has `ceil(input / stride)` positions per spatial axis.

use crate::{Shape, TensorError};

/// "Same" padding along one spatial axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamePadding {
    /// Input extent.
    pub input: usize,
    /// Window extent.
    pub kernel: usize,
    /// Step between window positions.
    pub stride: usize,
    /// Number of window positions, `ceil(input / stride)`.
    pub output: usize,
    /// Padding inserted before the first input element.
    pub before: usize,
    /// Padding inserted after the last input element.
    pub after: usize,
}

impl SamePadding {
    /// Computes the padding for one axis. `stride` must be non-zero.
    pub fn new(input: usize, kernel: usize, stride: usize) -> Self {
        let output = input / stride + usize::from(input % stride != 0);
        // (output - 1) * stride < input, so only the kernel term can overflow.
        let total = (output.saturating_sub(1) * stride)
            .saturating_add(kernel)
            .saturating_sub(input);
        let before = total / 2;
        Self {
            input,
            kernel,
            stride,
            output,
            before,
            after: total - before,
        }
    }

    /// Maps window position `out` and window offset `k` to an input
    /// coordinate, or `None` when it lands in the padding.
    #[inline]
    pub fn input_index(&self, out: usize, k: usize) -> Option<usize> {
        let pos = out
            .checked_mul(self.stride)?
            .checked_add(k)?
            .checked_sub(self.before)?;
        (pos < self.input).then_some(pos)
    }

    /// Window offsets of position `out` that land inside the input, paired
    /// with the input coordinate each one reads. `out` must be below
    /// `self.output`.
    pub fn taps(&self, out: usize) -> impl Iterator<Item = (usize, usize)> {
        let start = out * self.stride;
        let first = self.before.saturating_sub(start);
        let end = self
            .before
            .saturating_add(self.input - start)
            .min(self.kernel);
        let shift = start + first - self.before;
        (first..end).map(move |k| (k, k - first + shift))
    }
}

/// Batch, spatial and channel extents of an image operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ImageLayout {
    pub batch: usize,
    pub rows: usize,
    pub cols: usize,
    pub channels: usize,
    batched: bool,
}

impl ImageLayout {
    pub(crate) fn from_shape(op: &'static str, shape: &Shape) -> Result<Self, TensorError> {
        match *shape.dims() {
            [rows, cols, channels] => Ok(Self {
                batch: 1,
                rows,
                cols,
                channels,
                batched: false,
            }),
            [batch, rows, cols, channels] => Ok(Self {
                batch,
                rows,
                cols,
                channels,
                batched: true,
            }),
            _ => Err(TensorError::Unimplemented {
                op,
                detail: format!("rank-{} input {shape}", shape.rank()),
            }),
        }
    }

    pub(crate) fn rank(&self) -> usize {
        if self.batched {
            4
        } else {
            3
        }
    }

    /// Shape of an output image with the same batching as `self`.
    pub(crate) fn output_shape(&self, rows: usize, cols: usize, channels: usize) -> Shape {
        if self.batched {
            Shape::new(vec![self.batch, rows, cols, channels])
        } else {
            Shape::new(vec![rows, cols, channels])
        }
    }

    /// Validates a per-axis parameter vector (`strides` or `ksize`) and
    /// returns its `(row, col)` entries.
    ///
    /// The vector needs one entry per input axis; batch and channel entries
    /// must be 1 and spatial entries non-zero.
    pub(crate) fn spatial_pair(
        &self,
        op: &'static str,
        name: &str,
        values: &[usize],
    ) -> Result<(usize, usize), TensorError> {
        if values.len() != self.rank() {
            return Err(TensorError::invalid(
                op,
                format!(
                    "{name} needs {} entries for a rank-{} input, got {values:?}",
                    self.rank(),
                    self.rank()
                ),
            ));
        }
        let (leading, spatial) = if self.batched {
            (&values[..1], &values[1..3])
        } else {
            (&values[..0], &values[..2])
        };
        let channel = values[values.len() - 1];
        if leading.iter().any(|&v| v != 1) || channel != 1 {
            return Err(TensorError::invalid(
                op,
                format!("{name} {values:?}: batch and channel entries must be 1"),
            ));
        }
        if spatial.iter().any(|&v| v == 0) {
            return Err(TensorError::invalid(
                op,
                format!("{name} {values:?}: spatial entries must be non-zero"),
            ));
        }
        Ok((spatial[0], spatial[1]))
    }

    /// Flat offset of pixel `(b, row, col)` in a contiguous image buffer.
    #[inline]
    pub(crate) fn pixel_offset(&self, b: usize, row: usize, col: usize) -> usize {
        ((b * self.rows + row) * self.cols + col) * self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_padding_unit_stride() {
        let p = SamePadding::new(4, 1, 1);
        assert_eq!((p.output, p.before, p.after), (4, 0, 0));

        let p = SamePadding::new(2, 2, 1);
        assert_eq!((p.output, p.before, p.after), (2, 0, 1));

        let p = SamePadding::new(3, 3, 1);
        assert_eq!((p.output, p.before, p.after), (3, 1, 1));
    }

    #[test]
    fn test_same_padding_strided() {
        // ceil(5 / 2) = 3 outputs; (3 - 1) * 2 + 3 - 5 = 2 padding.
        let p = SamePadding::new(5, 3, 2);
        assert_eq!((p.output, p.before, p.after), (3, 1, 1));

        // Kernel smaller than stride needs no padding.
        let p = SamePadding::new(4, 1, 2);
        assert_eq!((p.output, p.before, p.after), (2, 0, 0));
    }

    #[test]
    fn test_input_index_skips_padding() {
        let p = SamePadding::new(3, 3, 1);
        assert_eq!(p.input_index(0, 0), None);
        assert_eq!(p.input_index(0, 1), Some(0));
        assert_eq!(p.input_index(2, 1), Some(2));
        assert_eq!(p.input_index(2, 2), None);
    }

    #[test]
    fn test_taps_match_input_index() {
        for (input, kernel, stride) in [(3, 3, 1), (5, 3, 2), (4, 1, 2), (2, 5, 1), (7, 4, 3)] {
            let p = SamePadding::new(input, kernel, stride);
            for out in 0..p.output {
                let expected: Vec<_> = (0..kernel)
                    .filter_map(|k| p.input_index(out, k).map(|i| (k, i)))
                    .collect();
                assert_eq!(p.taps(out).collect::<Vec<_>>(), expected);
            }
        }
    }

    #[test]
    fn test_same_padding_extreme_parameters() {
        let p = SamePadding::new(2, 1, usize::MAX);
        assert_eq!((p.output, p.before, p.after), (1, 0, 0));
        assert_eq!(p.taps(0).collect::<Vec<_>>(), vec![(0, 0)]);

        let p = SamePadding::new(2, usize::MAX, 1);
        assert_eq!(p.output, 2);
        let rows: Vec<_> = p.taps(1).map(|(_, i)| i).collect();
        assert_eq!(rows, vec![0, 1]);
        assert_eq!(p.input_index(1, usize::MAX - 1), None);
    }

    #[test]
    fn test_image_layout() {
        let l = ImageLayout::from_shape("conv2d", &Shape::new(vec![2, 5, 7, 3])).unwrap();
        assert_eq!((l.batch, l.rows, l.cols, l.channels), (2, 5, 7, 3));
        assert_eq!(l.output_shape(1, 1, 4), Shape::new(vec![2, 1, 1, 4]));

        let l = ImageLayout::from_shape("conv2d", &Shape::new(vec![5, 7, 3])).unwrap();
        assert_eq!(l.batch, 1);
        assert_eq!(l.output_shape(2, 2, 1), Shape::new(vec![2, 2, 1]));

        assert!(matches!(
            ImageLayout::from_shape("conv2d", &Shape::matrix(2, 2)),
            Err(TensorError::Unimplemented { op: "conv2d", .. })
        ));
    }

    #[test]
    fn test_spatial_pair_validation() {
        let l = ImageLayout::from_shape("max_pool", &Shape::new(vec![1, 4, 4, 1])).unwrap();
        assert_eq!(l.spatial_pair("max_pool", "ksize", &[1, 2, 3, 1]).unwrap(), (2, 3));
        assert!(l.spatial_pair("max_pool", "ksize", &[2, 3]).is_err());
        assert!(l.spatial_pair("max_pool", "ksize", &[2, 2, 2, 1]).is_err());
        assert!(l.spatial_pair("max_pool", "ksize", &[1, 2, 2, 2]).is_err());
        assert!(matches!(
            l.spatial_pair("max_pool", "strides", &[1, 0, 1, 1]),
            Err(TensorError::InvalidParameter { op: "max_pool", .. })
        ));

        let l = ImageLayout::from_shape("max_pool", &Shape::new(vec![4, 4, 1])).unwrap();
        assert_eq!(l.spatial_pair("max_pool", "strides", &[2, 1, 1]).unwrap(), (2, 1));
    }
}
