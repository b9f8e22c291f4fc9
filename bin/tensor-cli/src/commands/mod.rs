// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations.

pub mod apply;
pub mod bench;
pub mod conv2d;
pub mod inspect;
pub mod matmul;
pub mod max_pool;

use anyhow::Context;
use dense_tensor::Tensor;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v`, `-vv` and `-vvv` select
/// `info`, `debug` and `trace`, with `warn` as the default.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads an `.npy` operand, naming the file in any error.
pub(crate) fn load(path: &Path) -> anyhow::Result<Tensor> {
    npy_codec::read_npy(path).with_context(|| format!("failed to read '{}'", path.display()))
}

/// Writes a result tensor and reports where it went.
pub(crate) fn save(path: &Path, tensor: &Tensor) -> anyhow::Result<()> {
    npy_codec::write_npy(path, tensor)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    tracing::info!(path = %path.display(), shape = %tensor.shape(), "wrote result");
    println!("{} -> {}", tensor.shape(), path.display());
    Ok(())
}
