// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `dtensor bench`: wall-clock comparison of the matmul backends.
//!
//! Operands are deterministic, so repeated runs multiply identical matrices.

use crate::config::BenchConfig;
use anyhow::Context;
use dense_tensor::{MatmulBackend, Tensor, TensorOps};
use std::time::{Duration, Instant};

pub fn execute(config: &BenchConfig) -> anyhow::Result<()> {
    anyhow::ensure!(config.iterations > 0, "iterations must be at least 1");
    anyhow::ensure!(!config.sizes.is_empty(), "no matrix sizes given");

    println!(
        "  {:>6} {:>14} {:>14} {:>10} {:>12}",
        "Size", "Portable", "Accelerated", "Speedup", "Max rel. Δ",
    );
    println!("  {}", "-".repeat(62));

    for &n in &config.sizes {
        let a = operand(n, 1)?;
        let b = operand(n, 2)?;

        let (portable_time, portable) = time(&a, &b, MatmulBackend::Portable, config.iterations)?;
        let (accel_time, accelerated) =
            time(&a, &b, MatmulBackend::Accelerated, config.iterations)?;
        let diff = max_relative_difference(&portable, &accelerated);

        println!(
            "  {:>6} {:>11.3} ms {:>11.3} ms {:>9.2}x {:>12.2e}",
            n,
            millis(portable_time),
            millis(accel_time),
            portable_time.as_secs_f64() / accel_time.as_secs_f64().max(f64::EPSILON),
            diff,
        );
    }

    if !MatmulBackend::Accelerated.is_available() {
        println!();
        println!("  Note: built without the `accelerated` feature; both columns are portable.");
    }
    Ok(())
}

/// `n x n` matrix with a repeating, sign-alternating pattern.
fn operand(n: usize, salt: usize) -> anyhow::Result<Tensor> {
    let volume = n
        .checked_mul(n)
        .with_context(|| format!("matrix size {n} is too large"))?;
    let elements = (0..volume)
        .map(|i| (((i * 31 + salt * 17) % 23) as f32 - 11.0) / 8.0)
        .collect();
    Ok(Tensor::new([n, n], elements)?)
}

/// Mean time per multiplication, and the last result.
fn time(
    a: &Tensor,
    b: &Tensor,
    backend: MatmulBackend,
    iterations: usize,
) -> anyhow::Result<(Duration, Tensor)> {
    // Warm up.
    let mut result = a.matmul_with(b, backend)?;
    let start = Instant::now();
    for _ in 0..iterations {
        result = a.matmul_with(b, backend)?;
    }
    let elapsed = mean_duration(start.elapsed(), iterations);
    tracing::debug!(n = a.shape().dims()[0], %backend, ?elapsed, "timed matmul");
    Ok((elapsed, result))
}

/// `total / iterations` for any iteration count.
fn mean_duration(total: Duration, iterations: usize) -> Duration {
    total.div_f64(iterations as f64)
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Largest `|x - y| / max(|x|, |y|, 1)` over paired elements.
fn max_relative_difference(x: &Tensor, y: &Tensor) -> f32 {
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| (a - b).abs() / a.abs().max(b.abs()).max(1.0))
        .fold(0.0, f32::max)
}
