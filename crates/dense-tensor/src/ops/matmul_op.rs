// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rank-2 matrix product over tensors and strided views.

use crate::{Shape, StridedLayout, Tensor, TensorError, TensorLike};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Kernel used for matrix multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatmulBackend {
    /// Cache-friendly ikj triple loop; always available.
    Portable,
    /// Blocked SGEMM from `matrixmultiply`; needs the `accelerated` feature.
    Accelerated,
}

impl MatmulBackend {
    /// Both backends, in a stable order.
    pub const ALL: [MatmulBackend; 2] = [MatmulBackend::Portable, MatmulBackend::Accelerated];

    /// Returns `true` if this backend is compiled in.
    pub fn is_available(self) -> bool {
        match self {
            MatmulBackend::Portable => true,
            MatmulBackend::Accelerated => cfg!(feature = "accelerated"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatmulBackend::Portable => "portable",
            MatmulBackend::Accelerated => "accelerated",
        }
    }

    /// The backend that will actually run a request for `self`.
    pub fn effective(self) -> MatmulBackend {
        if self.is_available() {
            self
        } else {
            MatmulBackend::Portable
        }
    }
}

impl Default for MatmulBackend {
    fn default() -> Self {
        if cfg!(feature = "accelerated") {
            MatmulBackend::Accelerated
        } else {
            MatmulBackend::Portable
        }
    }
}

impl fmt::Display for MatmulBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatmulBackend {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portable" => Ok(MatmulBackend::Portable),
            "accelerated" => Ok(MatmulBackend::Accelerated),
            other => Err(TensorError::invalid(
                "matmul backend",
                format!("unknown backend '{other}', expected 'portable' or 'accelerated'"),
            )),
        }
    }
}

/// Performs matrix multiplication `lhs @ rhs` on the default backend.
///
/// See [`matmul_with`].
pub fn matmul<A, B>(lhs: &A, rhs: &B) -> Result<Tensor, TensorError>
where
    A: TensorLike + ?Sized,
    B: TensorLike + ?Sized,
{
    matmul_with(lhs, rhs, MatmulBackend::default())
}

/// Performs matrix multiplication: `output = lhs @ rhs`.
///
/// Both inputs must be rank 2 with compatible inner dimensions: `lhs` is
/// `[M, K]`, `rhs` is `[K, N]`, and the result is a new `[M, N]` tensor.
///
/// Views are multiplied in place in their source buffer: the row stride is
/// the source's column count and the first element sits at the view's
/// origin, so no copy is made.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if dimensions are incompatible.
/// Returns [`TensorError::InvalidParameter`] if an operand's layout does not
/// fit inside its backing buffer.
pub fn matmul_with<A, B>(lhs: &A, rhs: &B, backend: MatmulBackend) -> Result<Tensor, TensorError>
where
    A: TensorLike + ?Sized,
    B: TensorLike + ?Sized,
{
    // Validate shapes.
    if !lhs.shape().is_matmul_compatible(rhs.shape()) {
        return Err(TensorError::shape_mismatch("matmul", lhs.shape(), rhs.shape()));
    }

    let lhs_dims = lhs.shape().dims();
    let rhs_dims = rhs.shape().dims();
    let (m, k, n) = (lhs_dims[0], lhs_dims[1], rhs_dims[1]);
    let mut c = vec![0.0f32; m * n];
    if m == 0 || k == 0 || n == 0 {
        return Ok(Tensor::from_parts(Shape::matrix(m, n), c));
    }

    let a = MatrixRef::new(lhs.layout(), m, k)?;
    let b = MatrixRef::new(rhs.layout(), k, n)?;

    let effective = backend.effective();
    if effective != backend {
        debug!(requested = %backend, "accelerated matmul not compiled in, using portable");
    }
    debug!(m, k, n, lda = a.row_stride, ldb = b.row_stride, backend = %effective, "matmul");

    match effective {
        MatmulBackend::Portable => matmul_f32_generic(&a, &b, &mut c, m, k, n),
        #[cfg(feature = "accelerated")]
        MatmulBackend::Accelerated => accelerated::sgemm(&a, &b, &mut c, m, k, n),
        #[cfg(not(feature = "accelerated"))]
        MatmulBackend::Accelerated => matmul_f32_generic(&a, &b, &mut c, m, k, n),
    }

    Ok(Tensor::from_parts(Shape::matrix(m, n), c))
}

/// A row-major matrix embedded in a larger buffer.
#[derive(Debug, Clone, Copy)]
struct MatrixRef<'a> {
    data: &'a [f32],
    offset: usize,
    row_stride: usize,
}

impl<'a> MatrixRef<'a> {
    /// Checks that a `rows x cols` block starting at the layout's offset lies
    /// inside the buffer. `rows` and `cols` must be non-zero.
    fn new(layout: StridedLayout<'a>, rows: usize, cols: usize) -> Result<Self, TensorError> {
        let row_stride = layout.full_shape.strides().first().copied().unwrap_or(1);
        let last = layout.offset + (rows - 1) * row_stride + (cols - 1);
        if row_stride < cols || last >= layout.data.len() {
            return Err(TensorError::invalid(
                "matmul",
                format!(
                    "a {rows}x{cols} operand at offset {} with row stride {row_stride} \
                     exceeds its {}-element buffer",
                    layout.offset,
                    layout.data.len()
                ),
            ));
        }
        Ok(Self {
            data: layout.data,
            offset: layout.offset,
            row_stride,
        })
    }

    #[inline]
    fn row(&self, i: usize, len: usize) -> &'a [f32] {
        let start = self.offset + i * self.row_stride;
        &self.data[start..start + len]
    }
}

/// Portable kernel. `c` must be zeroed and `m * n` long.
fn matmul_f32_generic(
    a: &MatrixRef<'_>,
    b: &MatrixRef<'_>,
    c: &mut [f32],
    m: usize,
    k: usize,
    n: usize,
) {
    // Row i of C accumulates a[i][p] * (row p of B); both rows are unit-stride.
    for (i, c_row) in c.chunks_exact_mut(n).enumerate().take(m) {
        for (p, &a_ip) in a.row(i, k).iter().enumerate() {
            for (c_ij, &b_pj) in c_row.iter_mut().zip(b.row(p, n)) {
                *c_ij += a_ip * b_pj;
            }
        }
    }
}

#[cfg(feature = "accelerated")]
mod accelerated {
    use super::MatrixRef;

    /// `c = a @ b` through `matrixmultiply::sgemm`.
    pub(super) fn sgemm(
        a: &MatrixRef<'_>,
        b: &MatrixRef<'_>,
        c: &mut [f32],
        m: usize,
        k: usize,
        n: usize,
    ) {
        debug_assert_eq!(c.len(), m * n);
        let a_ptr = a.data[a.offset..].as_ptr();
        let b_ptr = b.data[b.offset..].as_ptr();
        // SAFETY: `MatrixRef::new` verified that every element addressed by
        // `offset + i * row_stride + j` for the given extents lies inside the
        // borrowed buffers, and `c` holds exactly `m * n` elements addressed
        // with row stride `n`. Strides fit in `isize` because they index
        // existing allocations.
        unsafe {
            matrixmultiply::sgemm(
                m,
                k,
                n,
                1.0,
                a_ptr,
                a.row_stride as isize,
                1,
                b_ptr,
                b.row_stride as isize,
                1,
                0.0,
                c.as_mut_ptr(),
                n as isize,
                1,
            );
        }
    }
}
