// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `dtensor max-pool`: "same"-padded max pooling of an `.npy` image.

use super::{load, save};
use anyhow::Context;
use dense_tensor::TensorOps;
use std::path::Path;

pub fn execute(
    input: &Path,
    ksize: &[usize],
    strides: &[usize],
    output: &Path,
) -> anyhow::Result<()> {
    let image = load(input)?;
    let result = image.max_pool(ksize, strides).with_context(|| {
        format!(
            "cannot pool {} with ksize {ksize:?} and strides {strides:?}",
            image.shape()
        )
    })?;
    save(output, &result)
}
