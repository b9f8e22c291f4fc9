// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `dtensor conv2d`: "same"-padded convolution of an `.npy` image.

use super::{load, save};
use anyhow::Context;
use dense_tensor::TensorOps;
use std::path::Path;

pub fn execute(input: &Path, filter: &Path, strides: &[usize], output: &Path) -> anyhow::Result<()> {
    let image = load(input)?;
    let weights = load(filter)?;
    let result = image.conv2d(&weights, strides).with_context(|| {
        format!(
            "cannot convolve {} with filter {} at strides {strides:?}",
            image.shape(),
            weights.shape()
        )
    })?;
    save(output, &result)
}
