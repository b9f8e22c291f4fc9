// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Max pooling with "same" padding.

use super::window::{ImageLayout, SamePadding};
use crate::{Tensor, TensorError, TensorLike};
use tracing::debug;

/// Takes the maximum over each pooling window, channel by channel.
///
/// `input` is `[rows, cols, channels]` or `[batch, rows, cols, channels]`;
/// `ksize` and `strides` carry one entry per input axis with batch and
/// channel entries fixed at 1. Window positions in the padding are excluded
/// from the maximum, which starts at negative infinity. `NaN` elements are
/// skipped.
///
/// # Errors
/// - [`TensorError::Unimplemented`] if the input rank is not 3 or 4.
/// - [`TensorError::InvalidParameter`] if `ksize` or `strides` is malformed.
pub fn max_pool<A>(input: &A, ksize: &[usize], strides: &[usize]) -> Result<Tensor, TensorError>
where
    A: TensorLike + ?Sized,
{
    let image = ImageLayout::from_shape("max_pool", input.shape())?;
    let (kernel_rows, kernel_cols) = image.spatial_pair("max_pool", "ksize", ksize)?;
    let (stride_rows, stride_cols) = image.spatial_pair("max_pool", "strides", strides)?;

    let rows = SamePadding::new(image.rows, kernel_rows, stride_rows);
    let cols = SamePadding::new(image.cols, kernel_cols, stride_cols);
    let channels = image.channels;
    let out_shape = image.output_shape(rows.output, cols.output, channels);
    debug!(
        input = %input.shape(),
        output = %out_shape,
        pad_rows = ?(rows.before, rows.after),
        pad_cols = ?(cols.before, cols.after),
        "max_pool"
    );

    let x = input.contiguous();
    let mut out = vec![f32::NEG_INFINITY; out_shape.volume()];

    for b in 0..image.batch {
        for oi in 0..rows.output {
            for oj in 0..cols.output {
                let out_base = ((b * rows.output + oi) * cols.output + oj) * channels;
                let acc = &mut out[out_base..out_base + channels];
                for (_, ii) in rows.taps(oi) {
                    for (_, jj) in cols.taps(oj) {
                        let in_base = image.pixel_offset(b, ii, jj);
                        for (m, &v) in acc.iter_mut().zip(&x[in_base..in_base + channels]) {
                            *m = m.max(v);
                        }
                    }
                }
            }
        }
    }

    Ok(Tensor::from_parts(out_shape, out))
}
