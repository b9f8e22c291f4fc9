// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-axis slice ranges.

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

/// A half-open range along one axis, with either bound optionally open.
///
/// Bounds are signed so that callers can pass ranges reaching outside the
/// axis; [`resolve`](AxisRange::resolve) clamps them to `[0, len)` instead of
/// rejecting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisRange {
    start: Option<isize>,
    end: Option<isize>,
}

impl AxisRange {
    /// The whole axis.
    pub const FULL: AxisRange = AxisRange {
        start: None,
        end: None,
    };

    /// Creates `start..end`.
    pub fn new(start: isize, end: isize) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Clamps this range to an axis of length `len`.
    ///
    /// An inverted range (`start > end` after clamping) resolves to an empty
    /// range at `start`.
    pub fn resolve(&self, len: usize) -> Range<usize> {
        let len = to_isize(len);
        let start = self.start.unwrap_or(0).clamp(0, len);
        let end = self.end.unwrap_or(len).clamp(start, len);
        start as usize..end as usize
    }
}

fn to_isize(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

macro_rules! impl_axis_range_from {
    ($($t:ty => $conv:expr),+ $(,)?) => {
        $(
            impl From<Range<$t>> for AxisRange {
                fn from(range: Range<$t>) -> Self {
                    let conv: fn($t) -> isize = $conv;
                    Self { start: Some(conv(range.start)), end: Some(conv(range.end)) }
                }
            }

            impl From<RangeInclusive<$t>> for AxisRange {
                fn from(range: RangeInclusive<$t>) -> Self {
                    let conv: fn($t) -> isize = $conv;
                    Self {
                        start: Some(conv(*range.start())),
                        end: Some(conv(*range.end()).saturating_add(1)),
                    }
                }
            }

            impl From<RangeFrom<$t>> for AxisRange {
                fn from(range: RangeFrom<$t>) -> Self {
                    let conv: fn($t) -> isize = $conv;
                    Self { start: Some(conv(range.start)), end: None }
                }
            }

            impl From<RangeTo<$t>> for AxisRange {
                fn from(range: RangeTo<$t>) -> Self {
                    let conv: fn($t) -> isize = $conv;
                    Self { start: None, end: Some(conv(range.end)) }
                }
            }

            impl From<RangeToInclusive<$t>> for AxisRange {
                fn from(range: RangeToInclusive<$t>) -> Self {
                    let conv: fn($t) -> isize = $conv;
                    Self { start: None, end: Some(conv(range.end).saturating_add(1)) }
                }
            }
        )+
    };
}

impl_axis_range_from!(
    isize => |v| v,
    i32 => |v| v as isize,
    i64 => |v| isize::try_from(v).unwrap_or(if v < 0 { isize::MIN } else { isize::MAX }),
    usize => to_isize,
);

impl From<RangeFull> for AxisRange {
    fn from(_: RangeFull) -> Self {
        Self::FULL
    }
}

/// `None` selects the whole axis.
impl<R: Into<AxisRange>> From<Option<R>> for AxisRange {
    fn from(range: Option<R>) -> Self {
        range.map(Into::into).unwrap_or(Self::FULL)
    }
}

/// Builds a `&[AxisRange]` from range expressions, one per axis.
///
/// ```
/// use dense_tensor::{s, Tensor};
/// let t = Tensor::new([3, 4], (0..12).map(|x| x as f32).collect()).unwrap();
/// let v = t.slice(s![1..3, ..2]).unwrap();
/// assert_eq!(v.iter().collect::<Vec<_>>(), vec![4.0, 5.0, 8.0, 9.0]);
/// ```
#[macro_export]
macro_rules! s {
    () => {
        &[] as &[$crate::AxisRange]
    };
    ($($range:expr),+ $(,)?) => {
        &[$($crate::AxisRange::from($range)),+]
    };
}
