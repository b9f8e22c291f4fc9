// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Conversion between `.npy` byte buffers and [`Tensor`]s.

use crate::header::{read_header, write_preamble, Dtype, Endianness, NpyHeader};
use crate::NpyError;
use dense_tensor::{Tensor, TensorLike};
use std::path::Path;
use tracing::{debug, warn};

/// Decodes an `.npy` buffer into a tensor.
///
/// `f8` payloads are narrowed to `f32`; big-endian payloads are byte-swapped.
/// Bytes after the payload are ignored.
///
/// # Errors
/// Any header error from [`read_header`], or [`NpyError::Truncated`] if the
/// payload is shorter than the shape requires.
pub fn decode(bytes: &[u8]) -> Result<Tensor, NpyError> {
    let (header, payload) = read_header(bytes)?;
    let needed = header
        .payload_len()
        .ok_or_else(|| NpyError::InvalidShape(header.shape.to_string()))?;
    if payload.len() < needed {
        return Err(NpyError::Truncated {
            expected: (bytes.len() - payload.len()).saturating_add(needed),
            actual: bytes.len(),
        });
    }
    if payload.len() > needed {
        warn!(
            extra = payload.len() - needed,
            "ignoring trailing bytes after .npy payload"
        );
    }
    debug!(
        shape = %header.shape,
        dtype = ?header.dtype,
        endianness = ?header.endianness,
        "decoded .npy header"
    );

    let payload = &payload[..needed];
    let big = header.endianness == Endianness::Big;
    let elements: Vec<f32> = match header.dtype {
        Dtype::F32 => payload
            .chunks_exact(4)
            .map(|chunk| {
                let mut raw = [0u8; 4];
                raw.copy_from_slice(chunk);
                if big {
                    f32::from_be_bytes(raw)
                } else {
                    f32::from_le_bytes(raw)
                }
            })
            .collect(),
        Dtype::F64 => payload
            .chunks_exact(8)
            .map(|chunk| {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(chunk);
                let value = if big {
                    f64::from_be_bytes(raw)
                } else {
                    f64::from_le_bytes(raw)
                };
                value as f32
            })
            .collect(),
    };

    Ok(Tensor::new(header.shape, elements)?)
}

/// Encodes any tensor-like operand as a version 1.0, little-endian `<f4`
/// `.npy` buffer.
pub fn encode<T: TensorLike + ?Sized>(tensor: &T) -> Vec<u8> {
    let header = NpyHeader::f32_le(tensor.shape().clone());
    let mut out = write_preamble(&header);
    out.reserve(header.payload_len().unwrap_or_default());
    for value in tensor.elements() {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

/// Reads and decodes an `.npy` file.
pub fn read_npy(path: impl AsRef<Path>) -> Result<Tensor, NpyError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "reading .npy file");
    decode(&bytes)
}

/// Encodes `tensor` and writes it to `path`, replacing any existing file.
pub fn write_npy<T: TensorLike + ?Sized>(path: impl AsRef<Path>, tensor: &T) -> Result<(), NpyError> {
    let path = path.as_ref();
    let bytes = encode(tensor);
    debug!(path = %path.display(), bytes = bytes.len(), "writing .npy file");
    std::fs::write(path, bytes)?;
    Ok(())
}
