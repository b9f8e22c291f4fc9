// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementary single-precision functions applied element-wise.

use super::map;
use crate::{Tensor, TensorLike};

macro_rules! unary_functions {
    ($($(#[$doc:meta])* $name:ident => $f:path;)+) => {
        $(
            $(#[$doc])*
            pub fn $name<A: TensorLike + ?Sized>(input: &A) -> Tensor {
                map(input, $f)
            }
        )+
    };
}

unary_functions! {
    /// Element-wise sine.
    sin => f32::sin;
    /// Element-wise cosine.
    cos => f32::cos;
    /// Element-wise tangent.
    tan => f32::tan;
    /// Element-wise arcsine; `NaN` outside `[-1, 1]`.
    asin => f32::asin;
    /// Element-wise arccosine; `NaN` outside `[-1, 1]`.
    acos => f32::acos;
    /// Element-wise arctangent.
    atan => f32::atan;
    /// Element-wise hyperbolic sine.
    sinh => f32::sinh;
    /// Element-wise hyperbolic cosine.
    cosh => f32::cosh;
    /// Element-wise hyperbolic tangent.
    tanh => f32::tanh;
    /// Element-wise `e^x`.
    exp => f32::exp;
    /// Element-wise natural logarithm.
    log => f32::ln;
    /// Element-wise square root.
    sqrt => f32::sqrt;
    /// Element-wise cube root.
    cbrt => f32::cbrt;
}
