// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The `.npy` preamble and its Python-dict header.
//!
//! ```text
//! \x93NUMPY <major> <minor> <header_len: u16 LE (v1) | u32 LE (v2)> <header>
//! ```
//!
//! The header is an ASCII dictionary literal such as
//! `{'descr': '<f4', 'fortran_order': False, 'shape': (2, 3), }`.

use crate::NpyError;
use dense_tensor::Shape;
use std::fmt;

/// Magic bytes at the start of every `.npy` buffer.
pub const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Payload alignment the writer pads the header to.
pub(crate) const ALIGNMENT: usize = 64;

/// Element type stored in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    /// 32-bit IEEE float (`f4`).
    F32,
    /// 64-bit IEEE float (`f8`), narrowed to `f32` on decode.
    F64,
}

impl Dtype {
    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            Dtype::F32 => 4,
            Dtype::F64 => 8,
        }
    }

    fn code(self) -> &'static str {
        match self {
            Dtype::F32 => "f4",
            Dtype::F64 => "f8",
        }
    }
}

/// Byte order of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    fn marker(self) -> char {
        match self {
            Endianness::Little => '<',
            Endianness::Big => '>',
        }
    }
}

/// Parsed `.npy` header dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpyHeader {
    pub dtype: Dtype,
    pub endianness: Endianness,
    pub shape: Shape,
}

impl NpyHeader {
    /// Header for a row-major little-endian `f32` array.
    pub fn f32_le(shape: Shape) -> Self {
        Self {
            dtype: Dtype::F32,
            endianness: Endianness::Little,
            shape,
        }
    }

    /// Parses the dictionary literal.
    ///
    /// # Errors
    /// - [`NpyError::InvalidHeader`] if the text is not a dictionary literal.
    /// - [`NpyError::MissingKey`] if `descr`, `fortran_order` or `shape` is absent.
    /// - [`NpyError::UnsupportedDtype`] unless `descr` is `f4`/`f8` with a
    ///   `<`, `>`, `|` or `=` byte-order marker.
    /// - [`NpyError::FortranOrder`] if `fortran_order` is `True`.
    /// - [`NpyError::InvalidShape`] if the shape tuple holds non-integers or
    ///   its payload size overflows `usize`.
    pub fn parse(text: &str) -> Result<Self, NpyError> {
        let entries = dict_entries(text)?;
        let value_of = |key: &'static str| {
            entries
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .ok_or(NpyError::MissingKey(key))
        };

        let descr = value_of("descr")?;
        let descr = quoted(descr)
            .ok_or_else(|| NpyError::InvalidHeader(format!("descr is not a string: {descr}")))?;
        let (dtype, endianness) = parse_descr(descr)?;

        let fortran = value_of("fortran_order")?;
        if fortran.starts_with("True") {
            return Err(NpyError::FortranOrder);
        }
        if !fortran.starts_with("False") {
            return Err(NpyError::InvalidHeader(format!(
                "fortran_order must be True or False: {fortran}"
            )));
        }

        let shape = parse_shape(value_of("shape")?)?;

        let header = Self {
            dtype,
            endianness,
            shape,
        };
        if header.payload_len().is_none() {
            return Err(NpyError::InvalidShape(format!(
                "{} is too large to address",
                header.shape
            )));
        }
        Ok(header)
    }

    /// Size of the payload described by this header in bytes, or `None` if
    /// it overflows `usize`.
    pub fn payload_len(&self) -> Option<usize> {
        self.shape.checked_volume()?.checked_mul(self.dtype.size())
    }
}

impl fmt::Display for NpyHeader {
    /// Writes the dictionary literal the way NumPy does, without padding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'descr': '{}{}', 'fortran_order': False, 'shape': (",
            self.endianness.marker(),
            self.dtype.code()
        )?;
        match self.shape.dims() {
            [] => {}
            [only] => write!(f, "{only},")?,
            dims => {
                for (i, d) in dims.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{d}")?;
                }
            }
        }
        write!(f, "), }}")
    }
}

/// Splits a buffer into its header and the bytes that follow it.
///
/// # Errors
/// Returns [`NpyError::InvalidMagic`], [`NpyError::UnsupportedVersion`] or
/// [`NpyError::Truncated`] for a malformed preamble, and any error of
/// [`NpyHeader::parse`].
pub fn read_header(bytes: &[u8]) -> Result<(NpyHeader, &[u8]), NpyError> {
    if bytes.len() < MAGIC.len() || &bytes[..MAGIC.len()] != MAGIC {
        return Err(NpyError::InvalidMagic);
    }
    let (major, minor) = match bytes.get(6..8) {
        Some(&[major, minor]) => (major, minor),
        _ => return Err(truncated(8, bytes.len())),
    };
    if minor != 0 || !(major == 1 || major == 2) {
        return Err(NpyError::UnsupportedVersion { major, minor });
    }

    let (header_len, start) = if major == 1 {
        let raw = bytes.get(8..10).ok_or_else(|| truncated(10, bytes.len()))?;
        (usize::from(u16::from_le_bytes([raw[0], raw[1]])), 10)
    } else {
        let raw = bytes.get(8..12).ok_or_else(|| truncated(12, bytes.len()))?;
        let len = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
        let len = usize::try_from(len)
            .map_err(|_| NpyError::InvalidHeader(format!("header length {len} too large")))?;
        (len, 12)
    };

    let end = start + header_len;
    let raw = bytes
        .get(start..end)
        .ok_or_else(|| truncated(end, bytes.len()))?;
    let text = std::str::from_utf8(raw)
        .ok()
        .filter(|s| s.is_ascii())
        .ok_or_else(|| NpyError::InvalidHeader("header is not ASCII".into()))?;

    Ok((NpyHeader::parse(text)?, &bytes[end..]))
}

/// Renders the full preamble (magic, version, length, padded header).
///
/// Uses version 1.0 unless the header does not fit a 16-bit length.
/// The header is padded with spaces and terminated by `\n` so the payload
/// starts on a 64-byte boundary.
pub(crate) fn write_preamble(header: &NpyHeader) -> Vec<u8> {
    let dict = header.to_string();
    let padded_len = |prefix_len: usize| {
        let unpadded = prefix_len + dict.len() + 1;
        dict.len() + 1 + (ALIGNMENT - unpadded % ALIGNMENT) % ALIGNMENT
    };
    let (major, prefix_len) = if padded_len(10) <= usize::from(u16::MAX) {
        (1u8, 10)
    } else {
        (2u8, 12)
    };
    let header_len = padded_len(prefix_len);
    let padding = header_len - dict.len() - 1;

    let mut out = Vec::with_capacity(prefix_len + header_len);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&[major, 0]);
    if major == 1 {
        // Fits: `padded_len(10)` was checked against `u16::MAX`.
        out.extend_from_slice(&(header_len as u16).to_le_bytes());
    } else {
        out.extend_from_slice(&(header_len as u32).to_le_bytes());
    }
    out.extend_from_slice(dict.as_bytes());
    out.resize(out.len() + padding, b' ');
    out.push(b'\n');
    out
}

fn truncated(expected: usize, actual: usize) -> NpyError {
    NpyError::Truncated { expected, actual }
}

/// Splits a dictionary literal into `(key, value)` pairs.
///
/// Only top-level commas separate entries: commas inside string literals
/// or parentheses belong to the value. Values are returned trimmed and
/// unparsed.
fn dict_entries(text: &str) -> Result<Vec<(&str, &str)>, NpyError> {
    let body = text
        .trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| NpyError::InvalidHeader(format!("not a dictionary: {}", text.trim())))?;

    let mut segments = Vec::new();
    let mut quote = None;
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                segments.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&body[start..]);

    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let malformed = || NpyError::InvalidHeader(format!("malformed entry: {entry}"));
            let key = quoted(entry).ok_or_else(malformed)?;
            let value = entry[key.len() + 2..]
                .trim_start()
                .strip_prefix(':')
                .ok_or_else(malformed)?;
            Ok((key, value.trim()))
        })
        .collect()
}

/// Contents of a leading quoted string literal.
fn quoted(text: &str) -> Option<&str> {
    let q = text.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = &text[1..];
    body.find(q).map(|end| &body[..end])
}

fn parse_descr(descr: &str) -> Result<(Dtype, Endianness), NpyError> {
    let unsupported = || NpyError::UnsupportedDtype(descr.to_string());
    let (endianness, code) = match descr.chars().next() {
        Some('<') | Some('|') => (Endianness::Little, &descr[1..]),
        Some('>') => (Endianness::Big, &descr[1..]),
        Some('=') if cfg!(target_endian = "big") => (Endianness::Big, &descr[1..]),
        Some('=') => (Endianness::Little, &descr[1..]),
        _ => return Err(unsupported()),
    };
    let dtype = match code {
        "f4" => Dtype::F32,
        "f8" => Dtype::F64,
        _ => return Err(unsupported()),
    };
    Ok((dtype, endianness))
}

/// Parses the tuple between the first `(` and the first `)` after it.
fn parse_shape(text: &str) -> Result<Shape, NpyError> {
    let open = text
        .find('(')
        .ok_or_else(|| NpyError::InvalidShape(text.to_string()))?;
    let close = text[open..]
        .find(')')
        .map(|i| open + i)
        .ok_or_else(|| NpyError::InvalidShape(text.to_string()))?;
    let inner = &text[open + 1..close];

    inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            // NumPy writes `3L` for Python 2 longs.
            s.trim_end_matches('L')
                .parse::<usize>()
                .map_err(|_| NpyError::InvalidShape(inner.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Shape::new)
}
