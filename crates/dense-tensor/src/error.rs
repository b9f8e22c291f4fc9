// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor operations.

use crate::Shape;

/// Errors that can occur during tensor operations.
///
/// All variants describe violated preconditions; no operation performs
/// partial work before returning one of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TensorError {
    /// The element buffer is shorter than the shape's volume.
    #[error("buffer too small: shape requires {expected} elements, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Two operands have incompatible shapes for the requested operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// An index tuple has the wrong arity or lies outside the shape.
    #[error("index {indices:?} out of range for shape {shape}")]
    IndexOutOfRange { indices: Vec<usize>, shape: Shape },

    /// A stride, kernel or range argument is malformed.
    #[error("invalid parameter for {op}: {detail}")]
    InvalidParameter { op: &'static str, detail: String },

    /// The operation is not supported for the given operand ranks.
    #[error("{op} is not implemented for {detail}")]
    Unimplemented { op: &'static str, detail: String },
}

impl TensorError {
    pub(crate) fn shape_mismatch(op: &'static str, lhs: &Shape, rhs: &Shape) -> Self {
        Self::ShapeMismatch {
            op,
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        }
    }

    pub(crate) fn invalid(op: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidParameter {
            op,
            detail: detail.into(),
        }
    }
}
