// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dense-tensor
//!
//! Dense n-dimensional `f32` tensors with broadcasting arithmetic, matrix
//! multiplication and the convolutional-network primitives needed to run
//! small image classifiers.
//!
//! This crate provides:
//! - [`Shape`] — immutable per-axis extents with row-major index arithmetic.
//! - [`Tensor`] — an owned, contiguous, row-major buffer plus its shape.
//! - [`TensorView`] — a zero-copy, clamped window into a tensor, sliceable again.
//! - [`TensorLike`] — the operand abstraction shared by tensors and views.
//! - Operations: broadcasting `+ - * / pow`, elementary functions, matmul
//!   (portable or accelerated GEMM), `conv2d`, `max_pool`, `softmax`, `relu`.
//!
//! # Error model
//! Checked functions return [`TensorError`]. The operator overloads
//! (`&a + &b`, `&a * 2.0`, ...) panic with the same message when a
//! precondition fails.
//!
//! # Example
//! ```
//! use dense_tensor::{Tensor, TensorOps};
//!
//! let a = Tensor::new([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let b = Tensor::new([3, 4], (7..19).map(|x| x as f32).collect()).unwrap();
//! let c = a.matmul(&b).unwrap();
//! assert_eq!(c.as_slice(), &[74.0, 80.0, 86.0, 92.0, 173.0, 188.0, 203.0, 218.0]);
//! ```

mod error;
mod layout;
mod operators;
pub mod ops;
mod range;
mod shape;
mod tensor;
mod view;

pub use error::TensorError;
pub use layout::{StridedLayout, TensorLike};
pub use ops::{MatmulBackend, TensorOps};
pub use range::AxisRange;
pub use shape::{Dimension, Shape};
pub use tensor::Tensor;
pub use view::{TensorView, ViewIter};
