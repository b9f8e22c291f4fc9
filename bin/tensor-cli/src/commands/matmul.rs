// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `dtensor matmul`: matrix product of two `.npy` operands.

use super::{load, save};
use anyhow::Context;
use dense_tensor::{MatmulBackend, TensorOps};
use std::path::Path;
use std::time::Instant;

pub fn execute(lhs: &Path, rhs: &Path, output: &Path, backend: MatmulBackend) -> anyhow::Result<()> {
    let a = load(lhs)?;
    let b = load(rhs)?;

    let start = Instant::now();
    let c = a
        .matmul_with(&b, backend)
        .with_context(|| format!("cannot multiply {} by {}", a.shape(), b.shape()))?;
    tracing::info!(
        backend = %backend.effective(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "matmul finished"
    );

    save(output, &c)
}
