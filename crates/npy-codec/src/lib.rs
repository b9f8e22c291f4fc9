// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # npy-codec
//!
//! Reads and writes NumPy `.npy` files as [`dense_tensor::Tensor`] values.
//!
//! Decoding accepts format versions 1.0 and 2.0, C-ordered `f4`/`f8`
//! payloads in either byte order, and widens or narrows them to `f32`.
//! Encoding always produces version 1.0 `<f4` (version 2.0 only for headers
//! too long for a 16-bit length).
//!
//! Decode failures are ordinary [`NpyError`] values, never panics.
//!
//! # Example
//! ```
//! use dense_tensor::Tensor;
//!
//! let t = Tensor::new([2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let bytes = npy_codec::encode(&t);
//! assert_eq!(npy_codec::decode(&bytes).unwrap(), t);
//! ```

mod codec;
mod error;
pub mod header;

pub use codec::{decode, encode, read_npy, write_npy};
pub use error::NpyError;
pub use header::{read_header, Dtype, Endianness, NpyHeader};
