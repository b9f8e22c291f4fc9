// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor arithmetic operations.
//!
//! Every operation is a free function generic over [`TensorLike`], so owned
//! tensors and views mix freely, and always returns a freshly allocated
//! [`Tensor`]. The same operations are available as methods through the
//! [`TensorOps`] extension trait.

mod activation_op;
mod conv2d_op;
mod elementwise_op;
mod math_op;
mod matmul_op;
mod max_pool_op;
mod softmax_op;
mod window;

pub use activation_op::{relu, sigmoid};
pub use conv2d_op::{conv2d, conv2d_output_shape};
pub use elementwise_op::{add, binary, div, map, mul, pow, scalar_lhs, scalar_rhs, sub, BinaryOp};
pub use math_op::{acos, asin, atan, cbrt, cos, cosh, exp, log, sin, sinh, sqrt, tan, tanh};
pub use matmul_op::{matmul, matmul_with, MatmulBackend};
pub use max_pool_op::max_pool;
pub use softmax_op::softmax;
pub use window::SamePadding;

use crate::{Tensor, TensorError, TensorLike};

/// Method-call access to the operations in this module.
///
/// Implemented for every [`TensorLike`] operand:
///
/// ```
/// use dense_tensor::{s, Tensor, TensorOps};
///
/// let t = Tensor::new([2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let squared = t.powf(2.0);
/// assert_eq!(squared.as_slice(), &[1.0, 4.0, 9.0, 16.0]);
///
/// let top = t.slice(s![0..1, ..]).unwrap();
/// let bottom = t.slice(s![1..2, ..]).unwrap();
/// assert_eq!(bottom.try_sub(&top).unwrap().as_slice(), &[2.0, 2.0]);
/// ```
pub trait TensorOps: TensorLike {
    /// Applies `f` to every element.
    fn map<F: FnMut(f32) -> f32>(&self, f: F) -> Tensor {
        map(self, f)
    }

    /// Broadcasting `self + rhs`.
    fn try_add<B: TensorLike + ?Sized>(&self, rhs: &B) -> Result<Tensor, TensorError> {
        add(self, rhs)
    }

    /// Broadcasting `self - rhs`.
    fn try_sub<B: TensorLike + ?Sized>(&self, rhs: &B) -> Result<Tensor, TensorError> {
        sub(self, rhs)
    }

    /// Broadcasting `self * rhs`.
    fn try_mul<B: TensorLike + ?Sized>(&self, rhs: &B) -> Result<Tensor, TensorError> {
        mul(self, rhs)
    }

    /// Broadcasting `self / rhs`.
    fn try_div<B: TensorLike + ?Sized>(&self, rhs: &B) -> Result<Tensor, TensorError> {
        div(self, rhs)
    }

    /// Broadcasting `self ** rhs`.
    fn try_pow<B: TensorLike + ?Sized>(&self, rhs: &B) -> Result<Tensor, TensorError> {
        pow(self, rhs)
    }

    /// `self ** exponent` for every element.
    fn powf(&self, exponent: f32) -> Tensor {
        scalar_rhs(BinaryOp::Pow, self, exponent)
    }

    /// `base ** self` for every element.
    fn rpowf(&self, base: f32) -> Tensor {
        scalar_lhs(BinaryOp::Pow, base, self)
    }

    fn sin(&self) -> Tensor {
        sin(self)
    }

    fn cos(&self) -> Tensor {
        cos(self)
    }

    fn tan(&self) -> Tensor {
        tan(self)
    }

    fn asin(&self) -> Tensor {
        asin(self)
    }

    fn acos(&self) -> Tensor {
        acos(self)
    }

    fn atan(&self) -> Tensor {
        atan(self)
    }

    fn sinh(&self) -> Tensor {
        sinh(self)
    }

    fn cosh(&self) -> Tensor {
        cosh(self)
    }

    fn tanh(&self) -> Tensor {
        tanh(self)
    }

    fn exp(&self) -> Tensor {
        exp(self)
    }

    /// Natural logarithm.
    fn log(&self) -> Tensor {
        log(self)
    }

    fn sqrt(&self) -> Tensor {
        sqrt(self)
    }

    fn cbrt(&self) -> Tensor {
        cbrt(self)
    }

    fn sigmoid(&self) -> Tensor {
        sigmoid(self)
    }

    fn relu(&self) -> Tensor {
        relu(self)
    }

    /// Softmax over every element; see [`softmax`].
    fn softmax(&self) -> Tensor {
        softmax(self)
    }

    /// Matrix product on the default backend; see [`matmul_with`].
    fn matmul<B: TensorLike + ?Sized>(&self, rhs: &B) -> Result<Tensor, TensorError> {
        matmul(self, rhs)
    }

    fn matmul_with<B: TensorLike + ?Sized>(
        &self,
        rhs: &B,
        backend: MatmulBackend,
    ) -> Result<Tensor, TensorError> {
        matmul_with(self, rhs, backend)
    }

    /// "Same"-padded convolution; see [`conv2d`].
    fn conv2d<F: TensorLike + ?Sized>(
        &self,
        filter: &F,
        strides: &[usize],
    ) -> Result<Tensor, TensorError> {
        conv2d(self, filter, strides)
    }

    /// "Same"-padded max pooling; see [`max_pool`].
    fn max_pool(&self, ksize: &[usize], strides: &[usize]) -> Result<Tensor, TensorError> {
        max_pool(self, ksize, strides)
    }
}

impl<T: TensorLike + ?Sized> TensorOps for T {}
