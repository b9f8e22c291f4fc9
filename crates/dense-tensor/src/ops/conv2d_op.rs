// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! 2-D convolution with "same" padding.

use super::window::{ImageLayout, SamePadding};
use crate::{Shape, Tensor, TensorError, TensorLike};
use tracing::debug;

/// Convolves an image with a filter bank.
///
/// - `input`: `[rows, cols, in_channels]` or `[batch, rows, cols, in_channels]`.
/// - `filter`: `[filter_rows, filter_cols, in_channels, out_channels]`.
/// - `strides`: one entry per input axis; batch and channel entries must be 1.
///
/// The output keeps the input's batching and has `ceil(input / stride)`
/// positions per spatial axis and `out_channels` channels. Window terms that
/// fall into the padding are skipped.
///
/// # Errors
/// - [`TensorError::Unimplemented`] if the input rank is not 3 or 4.
/// - [`TensorError::ShapeMismatch`] if the filter is not rank 4 or its input
///   channel count differs from the image's.
/// - [`TensorError::InvalidParameter`] if `strides` is malformed.
pub fn conv2d<A, F>(input: &A, filter: &F, strides: &[usize]) -> Result<Tensor, TensorError>
where
    A: TensorLike + ?Sized,
    F: TensorLike + ?Sized,
{
    let plan = Conv2dPlan::new(input.shape(), filter.shape(), strides)?;
    let out_shape = plan.output_shape();
    let Conv2dPlan {
        image,
        rows,
        cols,
        out_channels,
    } = plan;
    debug!(
        input = %input.shape(),
        filter = %filter.shape(),
        output = %out_shape,
        pad_rows = ?(rows.before, rows.after),
        pad_cols = ?(cols.before, cols.after),
        "conv2d"
    );

    let mut out = vec![0.0f32; out_shape.volume()];
    if out.is_empty() {
        return Ok(Tensor::from_parts(out_shape, out));
    }
    let x = input.contiguous();
    let w = filter.contiguous();
    let in_channels = image.channels;

    // Filter taps for one (di, dj) are an [in_channels, out_channels] block.
    let tap_len = in_channels * out_channels;
    for b in 0..image.batch {
        for oi in 0..rows.output {
            for oj in 0..cols.output {
                let out_base = ((b * rows.output + oi) * cols.output + oj) * out_channels;
                let acc = &mut out[out_base..out_base + out_channels];
                for (di, ii) in rows.taps(oi) {
                    for (dj, jj) in cols.taps(oj) {
                        let in_base = image.pixel_offset(b, ii, jj);
                        let pixel = &x[in_base..in_base + in_channels];
                        let tap_base = (di * cols.kernel + dj) * tap_len;
                        let taps = &w[tap_base..tap_base + tap_len];
                        for (&xv, weights) in pixel.iter().zip(taps.chunks_exact(out_channels)) {
                            for (o, &wv) in acc.iter_mut().zip(weights) {
                                *o += xv * wv;
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(Tensor::from_parts(out_shape, out))
}

/// Output shape `conv2d` would produce, without computing it.
///
/// # Errors
/// Same conditions as [`conv2d`].
pub fn conv2d_output_shape(
    input: &Shape,
    filter: &Shape,
    strides: &[usize],
) -> Result<Shape, TensorError> {
    Conv2dPlan::new(input, filter, strides).map(|plan| plan.output_shape())
}

/// Validated geometry of one convolution.
struct Conv2dPlan {
    image: ImageLayout,
    rows: SamePadding,
    cols: SamePadding,
    out_channels: usize,
}

impl Conv2dPlan {
    fn new(input: &Shape, filter: &Shape, strides: &[usize]) -> Result<Self, TensorError> {
        let image = ImageLayout::from_shape("conv2d", input)?;
        let (filter_rows, filter_cols, out_channels) = match *filter.dims() {
            [fr, fc, ic, oc] if ic == image.channels => (fr, fc, oc),
            _ => return Err(TensorError::shape_mismatch("conv2d", input, filter)),
        };
        let (stride_rows, stride_cols) = image.spatial_pair("conv2d", "strides", strides)?;
        Ok(Self {
            image,
            rows: SamePadding::new(image.rows, filter_rows, stride_rows),
            cols: SamePadding::new(image.cols, filter_cols, stride_cols),
            out_channels,
        })
    }

    fn output_shape(&self) -> Shape {
        self.image
            .output_shape(self.rows.output, self.cols.output, self.out_channels)
    }
}
