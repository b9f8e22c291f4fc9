// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Arithmetic operator overloads for tensors and views.
//!
//! # Panics
//! The tensor-tensor operators panic with the [`TensorError`] message when
//! the operand shapes are incompatible. Use the checked functions in
//! [`crate::ops`] or [`crate::TensorOps`] to handle that case.

use crate::ops::{binary, map, scalar_lhs, scalar_rhs, BinaryOp};
use crate::{Tensor, TensorError, TensorLike, TensorView};
use std::ops::{Add, Div, Mul, Neg, Sub};

#[track_caller]
fn or_panic(result: Result<Tensor, TensorError>) -> Tensor {
    match result {
        Ok(tensor) => tensor,
        Err(err) => panic!("{err}"),
    }
}

macro_rules! binary_operators {
    ($($trait:ident::$method:ident => $op:ident),+ $(,)?) => {
        $(
            impl<B: TensorLike + ?Sized> $trait<&B> for &Tensor {
                type Output = Tensor;

                #[track_caller]
                fn $method(self, rhs: &B) -> Tensor {
                    or_panic(binary(BinaryOp::$op, self, rhs))
                }
            }

            impl<B: TensorLike + ?Sized> $trait<&B> for Tensor {
                type Output = Tensor;

                #[track_caller]
                fn $method(self, rhs: &B) -> Tensor {
                    or_panic(binary(BinaryOp::$op, &self, rhs))
                }
            }

            impl<B: TensorLike + ?Sized> $trait<&B> for &TensorView<'_> {
                type Output = Tensor;

                #[track_caller]
                fn $method(self, rhs: &B) -> Tensor {
                    or_panic(binary(BinaryOp::$op, self, rhs))
                }
            }

            impl $trait<f32> for &Tensor {
                type Output = Tensor;

                fn $method(self, rhs: f32) -> Tensor {
                    scalar_rhs(BinaryOp::$op, self, rhs)
                }
            }

            impl $trait<f32> for Tensor {
                type Output = Tensor;

                fn $method(self, rhs: f32) -> Tensor {
                    scalar_rhs(BinaryOp::$op, &self, rhs)
                }
            }

            impl $trait<f32> for &TensorView<'_> {
                type Output = Tensor;

                fn $method(self, rhs: f32) -> Tensor {
                    scalar_rhs(BinaryOp::$op, self, rhs)
                }
            }

            impl $trait<&Tensor> for f32 {
                type Output = Tensor;

                fn $method(self, rhs: &Tensor) -> Tensor {
                    scalar_lhs(BinaryOp::$op, self, rhs)
                }
            }

            impl $trait<Tensor> for f32 {
                type Output = Tensor;

                fn $method(self, rhs: Tensor) -> Tensor {
                    scalar_lhs(BinaryOp::$op, self, &rhs)
                }
            }

            impl $trait<&TensorView<'_>> for f32 {
                type Output = Tensor;

                fn $method(self, rhs: &TensorView<'_>) -> Tensor {
                    scalar_lhs(BinaryOp::$op, self, rhs)
                }
            }
        )+
    };
}

binary_operators! {
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => Div,
}

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        map(self, |x| -x)
    }
}

impl Neg for Tensor {
    type Output = Tensor;

    fn neg(mut self) -> Tensor {
        self.as_mut_slice().iter_mut().for_each(|x| *x = -*x);
        self
    }
}

impl Neg for &TensorView<'_> {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        map(self, |x| -x)
    }
}
