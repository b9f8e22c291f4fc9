// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for `.npy` decoding and encoding.

use dense_tensor::TensorError;

/// Errors that can occur while reading or writing `.npy` data.
///
/// Every decode failure produces no tensor; callers branch on the `Err`.
#[derive(Debug, thiserror::Error)]
pub enum NpyError {
    /// The buffer does not start with `\x93NUMPY`.
    #[error("invalid magic prefix, not an .npy file")]
    InvalidMagic,

    /// Only versions 1.0 and 2.0 are understood.
    #[error("unsupported .npy version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    /// The buffer ends before the header or payload does.
    #[error("truncated data: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// A required header key is absent.
    #[error("header does not contain the key '{0}'")]
    MissingKey(&'static str),

    /// The array is stored column-major.
    #[error("fortran_order must be False")]
    FortranOrder,

    /// The dtype is not a 32- or 64-bit float.
    #[error("unsupported dtype '{0}', expected f4 or f8")]
    UnsupportedDtype(String),

    /// The shape tuple holds something other than non-negative integers, or
    /// describes a payload too large to address.
    #[error("invalid shape tuple '{0}'")]
    InvalidShape(String),

    /// The header is not an ASCII dictionary literal of the expected form.
    #[error("malformed header: {0}")]
    InvalidHeader(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The decoded shape and payload could not form a tensor.
    #[error("tensor error: {0}")]
    Tensor(#[from] TensorError),
}
