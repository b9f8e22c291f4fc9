// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Full-tensor softmax.

use crate::{Tensor, TensorLike};

/// Computes softmax over every element of the operand:
/// `output[i] = exp(x[i] - max) / sum(exp(x - max))`.
///
/// The normalization runs over the flat element set, not per row. Uses the
/// numerically stable variant that subtracts the maximum value before
/// exponentiation to prevent overflow; the result is mathematically equal to
/// `exp(x) / sum(exp(x))`.
///
/// A rank-0 operand yields `1.0`; a volume-0 operand yields an empty tensor
/// of the same shape.
pub fn softmax<A: TensorLike + ?Sized>(input: &A) -> Tensor {
    let peak = input.elements().fold(f32::NEG_INFINITY, f32::max);

    let mut total = 0.0f32;
    let mut elements: Vec<f32> = input
        .elements()
        .map(|x| {
            let e = (x - peak).exp();
            total += e;
            e
        })
        .collect();

    let scale = total.recip();
    for e in &mut elements {
        *e *= scale;
    }

    Tensor::from_parts(input.shape().clone(), elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{s, Shape};

    fn approx_eq(a: &[f32], b: &[f32], tol: f32) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < tol)
    }

    fn vector(values: &[f32]) -> Tensor {
        Tensor::from_f32([values.len()], values).unwrap()
    }

    #[test]
    fn test_softmax_equal_inputs() {
        let out = softmax(&vector(&[-2.0; 4]));
        assert!(approx_eq(out.as_slice(), &[0.25; 4], 1e-6));
    }

    #[test]
    fn test_softmax_total_is_one() {
        let out = softmax(&vector(&[0.1, -3.0, 2.5, 7.0, 0.0]));
        let total: f32 = out.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert!(out.iter().all(|p| p > 0.0));
    }

    #[test]
    fn test_softmax_preserves_order() {
        let out = softmax(&vector(&[3.0, -1.0, 0.5]));
        let p = out.as_slice();
        assert!(p[1] < p[2] && p[2] < p[0]);
    }

    #[test]
    fn test_softmax_2d_is_full_tensor() {
        // Both rows share one normalization.
        let input = Tensor::filled([2, 3], 1.0);
        let output = softmax(&input);
        assert_eq!(output.shape(), &Shape::new(vec![2, 3]));
        assert!(approx_eq(output.as_slice(), &[1.0 / 6.0; 6], 1e-6));
    }

    #[test]
    fn test_softmax_matches_plain_formula() {
        let input = vector(&[0.5, -1.0, 2.0]);
        let exps: Vec<f32> = input.iter().map(f32::exp).collect();
        let total: f32 = exps.iter().sum();
        let expected: Vec<f32> = exps.iter().map(|e| e / total).collect();
        assert!(approx_eq(softmax(&input).as_slice(), &expected, 1e-6));
    }

    #[test]
    fn test_softmax_large_inputs_stay_finite() {
        // exp(90) alone overflows f32.
        let out = softmax(&vector(&[88.0, 89.0, 90.0]));
        assert!(out.iter().all(|x| x.is_finite()));
        let total: f32 = out.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert!(approx_eq(
            out.as_slice(),
            softmax(&vector(&[0.0, 1.0, 2.0])).as_slice(),
            1e-6
        ));
    }

    #[test]
    fn test_softmax_scalar_and_view() {
        assert_eq!(softmax(&Tensor::scalar(-3.0)).as_slice(), &[1.0]);

        let t = Tensor::from_f32([2, 2], &[1.0, 2.0, 0.0, 0.0]).unwrap();
        let v = t.slice(s![1..2, ..]).unwrap();
        assert!(approx_eq(softmax(&v).as_slice(), &[0.5, 0.5], 1e-6));
    }
}
