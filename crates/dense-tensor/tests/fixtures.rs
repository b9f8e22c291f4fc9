// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Known-answer tests through the public API.

use dense_tensor::ops::{conv2d, max_pool, softmax};
use dense_tensor::{s, MatmulBackend, Shape, Tensor, TensorError, TensorOps};

fn arange(shape: &[usize], start: f32) -> Tensor {
    let volume: usize = shape.iter().product();
    Tensor::new(shape, (0..volume).map(|x| start + x as f32).collect()).unwrap()
}

#[test]
fn test_power_fixture() {
    let t = Tensor::new([2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let expected = Tensor::new([2, 2], vec![1.0, 4.0, 9.0, 16.0]).unwrap();
    assert_eq!(t.powf(2.0), expected);
    assert_eq!(t.try_pow(&Tensor::scalar(2.0)).unwrap(), expected);
}

#[test]
fn test_matmul_fixture() {
    let a = arange(&[2, 3], 1.0);
    let b = arange(&[3, 4], 7.0);
    let expected =
        Tensor::new([2, 4], vec![74.0, 80.0, 86.0, 92.0, 173.0, 188.0, 203.0, 218.0]).unwrap();
    for backend in MatmulBackend::ALL {
        assert_eq!(a.matmul_with(&b, backend).unwrap(), expected);
    }
}

#[test]
fn test_matmul_fixture_embedded_in_larger_buffers() {
    // The same operands placed inside bigger tensors and sliced back out.
    let mut big_a = Tensor::filled([4, 6], -1.0);
    let mut big_b = Tensor::filled([5, 7], -1.0);
    for i in 0..2 {
        for j in 0..3 {
            big_a.set(&[i + 1, j + 2], (i * 3 + j + 1) as f32).unwrap();
        }
    }
    for i in 0..3 {
        for j in 0..4 {
            big_b.set(&[i + 2, j + 3], (i * 4 + j + 7) as f32).unwrap();
        }
    }
    let a = big_a.slice(s![1..3, 2..5]).unwrap();
    let b = big_b.slice(s![2..5, 3..7]).unwrap();
    let expected = arange(&[2, 3], 1.0).matmul(&arange(&[3, 4], 7.0)).unwrap();
    for backend in MatmulBackend::ALL {
        assert_eq!(a.matmul_with(&b, backend).unwrap(), expected);
    }
}

#[test]
fn test_conv2d_fixture() {
    let input = arange(&[2, 2, 4, 1], 1.0);
    let filter = Tensor::new([2, 1, 1, 2], vec![1.0, 2.0, 1.0, 2.0]).unwrap();
    let out = conv2d(&input, &filter, &[1, 1, 1, 1]).unwrap();
    let expected = Tensor::new(
        [2, 2, 4, 2],
        vec![
            6.0, 12.0, 8.0, 16.0, 10.0, 20.0, 12.0, 24.0, 5.0, 10.0, 6.0, 12.0, 7.0, 14.0, 8.0,
            16.0, 22.0, 44.0, 24.0, 48.0, 26.0, 52.0, 28.0, 56.0, 13.0, 26.0, 14.0, 28.0, 15.0,
            30.0, 16.0, 32.0,
        ],
    )
    .unwrap();
    assert_eq!(out, expected);
}

#[test]
fn test_conv2d_strided_padding_split() {
    // 5 columns, kernel 3, stride 2: 3 outputs and one padding column on each
    // side. Each output sums the in-bounds neighbours of columns 0, 2 and 4.
    let input = Tensor::new([1, 5, 1], vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let filter = Tensor::filled([1, 3, 1, 1], 1.0);
    let out = conv2d(&input, &filter, &[1, 2, 1]).unwrap();
    assert_eq!(out, Tensor::new([1, 3, 1], vec![3.0, 9.0, 9.0]).unwrap());
}

#[test]
fn test_max_pool_fixture() {
    let input = arange(&[2, 2, 3, 1], 0.0);
    let out = max_pool(&input, &[1, 1, 3, 1], &[1, 1, 1, 1]).unwrap();
    assert_eq!(
        out,
        Tensor::new(
            [2, 2, 3, 1],
            vec![1.0, 2.0, 2.0, 4.0, 5.0, 5.0, 7.0, 8.0, 8.0, 10.0, 11.0, 11.0]
        )
        .unwrap()
    );
}

#[test]
fn test_max_pool_negative_window_regression() {
    // A sentinel of f32::MIN_POSITIVE would report ~0 for every window here.
    let input = Tensor::new([2, 2, 1], vec![-5.0, -7.0, -3.0, -9.0]).unwrap();
    let out = max_pool(&input, &[2, 2, 1], &[1, 1, 1]).unwrap();
    assert_eq!(out.as_slice(), &[-3.0, -7.0, -3.0, -9.0]);
}

#[test]
fn test_small_classifier_pipeline() {
    // conv -> relu -> pool -> flatten -> dense -> softmax, as a demo model would.
    let image = Tensor::new([4, 4, 1], (0..16).map(|x| (x % 5) as f32 - 2.0).collect()).unwrap();
    let filter = Tensor::new([3, 3, 1, 2], (0..18).map(|x| (x % 3) as f32 - 1.0).collect())
        .unwrap();
    let bias = Tensor::new([2], vec![0.5, -0.5]).unwrap();

    let features = (&image.conv2d(&filter, &[1, 1, 1]).unwrap() + &bias).relu();
    let pooled = features.max_pool(&[2, 2, 1], &[2, 2, 1]).unwrap();
    assert_eq!(pooled.shape(), &Shape::new(vec![2, 2, 2]));

    let flat = pooled.reshaped([1, 8]).unwrap();
    let weights = Tensor::new([8, 3], (0..24).map(|x| (x % 4) as f32 * 0.25).collect()).unwrap();
    let probs = softmax(&flat.matmul(&weights).unwrap());
    assert_eq!(probs.shape(), &Shape::matrix(1, 3));
    let total: f32 = probs.iter().sum();
    assert!((total - 1.0).abs() < 1e-5);
}

#[test]
fn test_error_classes() {
    let a = Tensor::zeros([2, 3]);
    assert!(matches!(
        a.try_add(&Tensor::zeros([3, 2])),
        Err(TensorError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        a.get(&[5, 0]),
        Err(TensorError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        a.conv2d(&Tensor::zeros([1, 1, 3, 1]), &[1, 1]),
        Err(TensorError::Unimplemented { .. })
    ));
    assert!(matches!(
        Tensor::new([4], vec![1.0]),
        Err(TensorError::BufferSizeMismatch { expected: 4, actual: 1 })
    ));
}
