// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Encode/decode round trips and rejection of malformed buffers.

use dense_tensor::{Shape, Tensor};
use npy_codec::{decode, encode, read_header, Dtype, Endianness, NpyError};
use proptest::prelude::*;

fn shape_and_elements() -> impl Strategy<Value = (Vec<usize>, Vec<f32>)> {
    prop::collection::vec(0usize..5, 0..4).prop_flat_map(|dims| {
        let volume: usize = dims.iter().product();
        (
            Just(dims),
            prop::collection::vec(-1.0e6f32..1.0e6, volume..=volume),
        )
    })
}

proptest! {
    #[test]
    fn prop_round_trip_preserves_shape_and_elements((dims, elements) in shape_and_elements()) {
        let t = Tensor::new(dims.clone(), elements).unwrap();
        let back = decode(&encode(&t)).unwrap();
        prop_assert_eq!(back.shape(), &Shape::new(dims));
        prop_assert_eq!(back, t);
    }

    #[test]
    fn prop_payload_is_64_byte_aligned(mut dims in prop::collection::vec(0usize..100_000, 0..8)) {
        // A leading zero extent keeps the payload empty while the header varies.
        dims.insert(0, 0);
        let t = Tensor::zeros(dims);
        let bytes = encode(&t);
        let (header, payload) = read_header(&bytes).unwrap();
        prop_assert_eq!(header.dtype, Dtype::F32);
        prop_assert_eq!(header.endianness, Endianness::Little);
        prop_assert_eq!((bytes.len() - payload.len()) % 64, 0);
    }
}

#[test]
fn test_known_byte_layout() {
    let t = Tensor::new([3], vec![1.0, 2.0, 3.0]).unwrap();
    let bytes = encode(&t);
    let dict = "{'descr': '<f4', 'fortran_order': False, 'shape': (3,), }";
    assert_eq!(&bytes[..6], b"\x93NUMPY");
    assert_eq!(&bytes[6..8], &[1, 0]);
    assert_eq!(&bytes[10..10 + dict.len()], dict.as_bytes());
    assert_eq!(bytes[63], b'\n');
    assert!(bytes[10 + dict.len()..63].iter().all(|&b| b == b' '));
    assert_eq!(&bytes[64..68], &1.0f32.to_le_bytes());
    assert_eq!(bytes.len(), 64 + 12);
}

/// Overwrites the first occurrence of `from` with the equally long `to`.
fn replace_once(bytes: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    assert_eq!(from.len(), to.len());
    let pos = bytes
        .windows(from.len())
        .position(|w| w == from)
        .expect("pattern present");
    let mut out = bytes.to_vec();
    out[pos..pos + to.len()].copy_from_slice(to);
    out
}

#[test]
fn test_rejects_malformed_buffers() {
    let good = encode(&Tensor::zeros([2]));

    let mut bad_magic = good.clone();
    bad_magic[1] = b'n';
    assert!(matches!(decode(&bad_magic), Err(NpyError::InvalidMagic)));

    let mut bad_version = good.clone();
    bad_version[6] = 3;
    assert!(matches!(
        decode(&bad_version),
        Err(NpyError::UnsupportedVersion { major: 3, minor: 0 })
    ));

    let fortran = replace_once(&good, b"False", b"True ");
    assert!(matches!(decode(&fortran), Err(NpyError::FortranOrder)));

    let int_dtype = replace_once(&good, b"<f4", b"<i4");
    assert!(matches!(
        decode(&int_dtype),
        Err(NpyError::UnsupportedDtype(_))
    ));

    assert!(matches!(
        decode(&good[..good.len() - 1]),
        Err(NpyError::Truncated { .. })
    ));
}

/// Version 1.0 buffer around a hand-written header dictionary.
fn with_dict(dict: &str, payload: &[u8]) -> Vec<u8> {
    let mut bytes = b"\x93NUMPY\x01\x00".to_vec();
    bytes.extend_from_slice(&(dict.len() as u16).to_le_bytes());
    bytes.extend_from_slice(dict.as_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

#[test]
fn test_rejects_shape_with_unaddressable_volume() {
    let half = 1usize << (usize::BITS / 2);
    let dict = format!("{{'descr': '<f4', 'fortran_order': False, 'shape': ({half}, {half}), }}\n");
    let result = std::panic::catch_unwind(|| decode(&with_dict(&dict, &[])));
    assert!(matches!(result, Ok(Err(NpyError::InvalidShape(_)))));
    assert!(matches!(
        read_header(&with_dict(&dict, &[])),
        Err(NpyError::InvalidShape(_))
    ));
}

#[test]
fn test_huge_shape_with_short_payload_is_truncated() {
    let dict = format!(
        "{{'descr': '<f4', 'fortran_order': False, 'shape': ({},), }}\n",
        usize::MAX / 8
    );
    let bytes = with_dict(&dict, &[0; 8]);
    assert!(matches!(
        decode(&bytes),
        Err(NpyError::Truncated { actual, .. }) if actual == bytes.len()
    ));
}
