// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `dtensor inspect`: header and value statistics of an `.npy` file.

use anyhow::Context;
use dense_tensor::Tensor;
use npy_codec::NpyHeader;
use std::path::Path;

/// Summary printed by `inspect`.
#[derive(Debug, serde::Serialize)]
struct Summary {
    path: String,
    dtype: String,
    shape: Vec<usize>,
    volume: usize,
    min: Option<f32>,
    max: Option<f32>,
    mean: Option<f32>,
}

impl Summary {
    fn new(path: &Path, header: &NpyHeader, tensor: &Tensor) -> Self {
        let values = tensor.as_slice();
        let (min, max, mean) = if values.is_empty() {
            (None, None, None)
        } else {
            let min = values.iter().copied().fold(f32::INFINITY, f32::min);
            let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let sum: f64 = values.iter().map(|&v| f64::from(v)).sum();
            (Some(min), Some(max), Some((sum / values.len() as f64) as f32))
        };
        Self {
            path: path.display().to_string(),
            dtype: format!("{:?} ({:?}-endian)", header.dtype, header.endianness),
            shape: tensor.shape().dims().to_vec(),
            volume: tensor.volume(),
            min,
            max,
            mean,
        }
    }
}

pub fn execute(file: &Path, json: bool) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("cannot read '{}'", file.display()))?;
    let (header, _) = npy_codec::read_header(&bytes)
        .with_context(|| format!("'{}' is not a supported .npy file", file.display()))?;
    let tensor = npy_codec::decode(&bytes)
        .with_context(|| format!("failed to decode '{}'", file.display()))?;
    let summary = Summary::new(file, &header, &tensor);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("  File:   {}", summary.path);
    println!("  Dtype:  {}", summary.dtype);
    println!("  Shape:  {}", tensor.shape());
    println!("  Volume: {}", summary.volume);
    match (summary.min, summary.max, summary.mean) {
        (Some(min), Some(max), Some(mean)) => {
            println!("  Min:    {min}");
            println!("  Max:    {max}");
            println!("  Mean:   {mean}");
        }
        _ => println!("  (no elements)"),
    }
    Ok(())
}
