// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element-wise activation functions.

use super::map;
use crate::{Tensor, TensorLike};

/// Rectified linear unit: `max(x, 0)`.
///
/// `NaN` inputs map to `0.0` (IEEE `maxNum` semantics).
pub fn relu<A: TensorLike + ?Sized>(input: &A) -> Tensor {
    map(input, |x| x.max(0.0))
}

/// Logistic sigmoid: `1 / (1 + e^-x)`.
pub fn sigmoid<A: TensorLike + ?Sized>(input: &A) -> Tensor {
    map(input, |x| 1.0 / (1.0 + (-x).exp()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s;

    fn approx_eq(a: &[f32], b: &[f32], tol: f32) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < tol)
    }

    #[test]
    fn test_relu() {
        let t = Tensor::from_f32([2, 2], &[-1.5, 0.0, 2.0, -0.0]).unwrap();
        let r = relu(&t);
        assert_eq!(r.shape(), t.shape());
        assert_eq!(r.as_slice(), &[0.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_sigmoid_values() {
        let t = Tensor::from_f32([3], &[0.0, 2.0, -2.0]).unwrap();
        let r = sigmoid(&t);
        let expected = 1.0 / (1.0 + (-2.0f32).exp());
        assert!(approx_eq(r.as_slice(), &[0.5, expected, 1.0 - expected], 1e-6));
    }

    #[test]
    fn test_sigmoid_saturates() {
        let t = Tensor::from_f32([2], &[100.0, -100.0]).unwrap();
        let r = sigmoid(&t);
        assert!(approx_eq(r.as_slice(), &[1.0, 0.0], 1e-6));
        assert!(r.iter().all(f32::is_finite));
    }

    #[test]
    fn test_activations_on_view() {
        let t = Tensor::from_f32([2, 2], &[-1.0, 1.0, -2.0, 2.0]).unwrap();
        let v = t.slice(s![.., 0..1]).unwrap();
        assert_eq!(relu(&v).as_slice(), &[0.0, 0.0]);
        assert_eq!(sigmoid(&v).shape(), v.shape());
    }
}
