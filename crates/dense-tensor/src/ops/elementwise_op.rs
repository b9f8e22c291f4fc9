// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Broadcasting binary arithmetic and element-wise maps.

use crate::{Tensor, TensorError, TensorLike};
use std::cmp::Ordering;

/// Binary element-wise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Returns the operator's name as used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Pow => "pow",
        }
    }

    /// Applies the operator to one pair of elements, `lhs ⊙ rhs`.
    #[inline(always)]
    pub fn apply(self, lhs: f32, rhs: f32) -> f32 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

/// Combines two operands element by element with broadcasting.
///
/// - Equal ranks: the shapes must be identical.
/// - Different ranks: the higher-rank shape must end with the lower-rank
///   shape; the lower-rank operand is repeated cyclically over the leading
///   axes.
///
/// The result always takes the higher-rank operand's shape, and `op` is
/// always applied as `op(lhs, rhs)` whichever side is repeated.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the shapes are incompatible.
pub fn binary<A, B>(op: BinaryOp, lhs: &A, rhs: &B) -> Result<Tensor, TensorError>
where
    A: TensorLike + ?Sized,
    B: TensorLike + ?Sized,
{
    let (ls, rs) = (lhs.shape(), rhs.shape());
    let (shape, elements): (_, Vec<f32>) = match ls.rank().cmp(&rs.rank()) {
        Ordering::Equal => {
            if ls != rs {
                return Err(TensorError::shape_mismatch(op.as_str(), ls, rs));
            }
            let elements = lhs
                .elements()
                .zip(rhs.elements())
                .map(|(l, r)| op.apply(l, r))
                .collect();
            (ls, elements)
        }
        Ordering::Less => {
            if !rs.has_suffix(ls) {
                return Err(TensorError::shape_mismatch(op.as_str(), ls, rs));
            }
            let elements = rhs
                .elements()
                .zip(repeated(lhs))
                .map(|(r, l)| op.apply(l, r))
                .collect();
            (rs, elements)
        }
        Ordering::Greater => {
            if !ls.has_suffix(rs) {
                return Err(TensorError::shape_mismatch(op.as_str(), ls, rs));
            }
            let elements = lhs
                .elements()
                .zip(repeated(rhs))
                .map(|(l, r)| op.apply(l, r))
                .collect();
            (ls, elements)
        }
    };
    Ok(Tensor::from_parts(shape.clone(), elements))
}

/// Endless cyclic repetition of an operand's elements.
///
/// Only ever zipped behind a finite, higher-rank sequence, which is polled
/// first; a volume-0 suffix implies a volume-0 partner.
fn repeated<T: TensorLike + ?Sized>(t: &T) -> impl Iterator<Item = f32> + '_ {
    std::iter::repeat_with(move || t.elements()).flatten()
}

/// `lhs + rhs` with broadcasting.
pub fn add<A: TensorLike + ?Sized, B: TensorLike + ?Sized>(
    lhs: &A,
    rhs: &B,
) -> Result<Tensor, TensorError> {
    binary(BinaryOp::Add, lhs, rhs)
}

/// `lhs - rhs` with broadcasting.
pub fn sub<A: TensorLike + ?Sized, B: TensorLike + ?Sized>(
    lhs: &A,
    rhs: &B,
) -> Result<Tensor, TensorError> {
    binary(BinaryOp::Sub, lhs, rhs)
}

/// `lhs * rhs` with broadcasting.
pub fn mul<A: TensorLike + ?Sized, B: TensorLike + ?Sized>(
    lhs: &A,
    rhs: &B,
) -> Result<Tensor, TensorError> {
    binary(BinaryOp::Mul, lhs, rhs)
}

/// `lhs / rhs` with broadcasting.
pub fn div<A: TensorLike + ?Sized, B: TensorLike + ?Sized>(
    lhs: &A,
    rhs: &B,
) -> Result<Tensor, TensorError> {
    binary(BinaryOp::Div, lhs, rhs)
}

/// `lhs ** rhs` with broadcasting.
pub fn pow<A: TensorLike + ?Sized, B: TensorLike + ?Sized>(
    lhs: &A,
    rhs: &B,
) -> Result<Tensor, TensorError> {
    binary(BinaryOp::Pow, lhs, rhs)
}

/// Applies `f` to every element, keeping the operand's shape.
pub fn map<A, F>(input: &A, f: F) -> Tensor
where
    A: TensorLike + ?Sized,
    F: FnMut(f32) -> f32,
{
    Tensor::from_parts(input.shape().clone(), input.elements().map(f).collect())
}

/// Applies `tensor ⊙ scalar` to every element.
pub fn scalar_rhs<A: TensorLike + ?Sized>(op: BinaryOp, lhs: &A, rhs: f32) -> Tensor {
    map(lhs, |x| op.apply(x, rhs))
}

/// Applies `scalar ⊙ tensor` to every element.
pub fn scalar_lhs<B: TensorLike + ?Sized>(op: BinaryOp, lhs: f32, rhs: &B) -> Tensor {
    map(rhs, |x| op.apply(lhs, x))
}
