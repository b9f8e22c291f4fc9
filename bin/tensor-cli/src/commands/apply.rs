// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `dtensor apply`: element-wise functions and softmax.

use super::{load, save};
use dense_tensor::{Tensor, TensorOps};
use std::path::Path;

/// Functions selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum UnaryOp {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Log,
    Sqrt,
    Cbrt,
    Sigmoid,
    Relu,
    Softmax,
}

impl UnaryOp {
    pub fn apply(self, t: &Tensor) -> Tensor {
        match self {
            UnaryOp::Sin => t.sin(),
            UnaryOp::Cos => t.cos(),
            UnaryOp::Tan => t.tan(),
            UnaryOp::Asin => t.asin(),
            UnaryOp::Acos => t.acos(),
            UnaryOp::Atan => t.atan(),
            UnaryOp::Sinh => t.sinh(),
            UnaryOp::Cosh => t.cosh(),
            UnaryOp::Tanh => t.tanh(),
            UnaryOp::Exp => t.exp(),
            UnaryOp::Log => t.log(),
            UnaryOp::Sqrt => t.sqrt(),
            UnaryOp::Cbrt => t.cbrt(),
            UnaryOp::Sigmoid => t.sigmoid(),
            UnaryOp::Relu => t.relu(),
            UnaryOp::Softmax => t.softmax(),
        }
    }
}

pub fn execute(op: UnaryOp, input: &Path, output: &Path) -> anyhow::Result<()> {
    let t = load(input)?;
    let result = op.apply(&t);
    let non_finite = result.iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        tracing::warn!(?op, non_finite, "result contains non-finite values");
    }
    save(output, &result)
}
