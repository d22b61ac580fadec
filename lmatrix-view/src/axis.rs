//! Per-axis coordinate transform.
//!
//! An [`Axis`] maps a local index `i in [0, length)` to a backing coordinate
//! `offset + i * stride`. Multi-dimensional matrices carry one axis per
//! dimension and address the backing store with the sum of the mapped
//! coordinates.

use crate::{MatrixError, Result};

/// `(offset, stride, length)` transform for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Axis {
    offset: i64,
    stride: i64,
    length: i64,
}

impl Axis {
    /// Create an axis from raw parts.
    pub fn new(offset: i64, stride: i64, length: i64) -> Self {
        Self {
            offset,
            stride,
            length,
        }
    }

    /// Identity transform `(0, 1, length)`.
    pub fn identity(length: i64) -> Self {
        Self::new(0, 1, length)
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        self.offset
    }

    #[inline]
    pub fn stride(&self) -> i64 {
        self.stride
    }

    #[inline]
    pub fn length(&self) -> i64 {
        self.length
    }

    /// Reverse the axis: `(o + s*(l-1), -s, l)`.
    ///
    /// Wrapping arithmetic keeps the operation exactly invertible, so flipping
    /// twice always reproduces the original triple.
    pub fn flip(self) -> Self {
        let last = self.stride.wrapping_mul(self.length.wrapping_sub(1));
        Self {
            offset: self.offset.wrapping_add(last),
            stride: self.stride.wrapping_neg(),
            length: self.length,
        }
    }

    /// Narrow the axis to the window `[start, start + length)`.
    pub fn part(self, start: i64, length: i64) -> Result<Self> {
        if length < 0 {
            return Err(MatrixError::NegativeLength(length));
        }
        let out_of_bounds = MatrixError::RangeOutOfBounds {
            start,
            length,
            bound: self.length,
        };
        if start < 0 {
            return Err(out_of_bounds);
        }
        match start.checked_add(length) {
            Some(end) if end <= self.length => Ok(Self {
                offset: self.index_unchecked(start),
                stride: self.stride,
                length,
            }),
            _ => Err(out_of_bounds),
        }
    }

    /// Keep every `factor`-th index: `(o, s*factor, ceil(l/factor))`.
    pub fn strides(self, factor: i64) -> Result<Self> {
        if factor < 1 {
            return Err(MatrixError::InvalidStride(factor));
        }
        let length = self.length / factor + i64::from(self.length % factor != 0);
        Ok(Self {
            offset: self.offset,
            // Only reachable with length <= 1 when this saturates.
            stride: self.stride.saturating_mul(factor),
            length,
        })
    }

    /// Map a local index to its backing coordinate, checking bounds.
    #[inline]
    pub fn index(&self, i: i64) -> Result<i64> {
        if i < 0 || i >= self.length {
            return Err(MatrixError::IndexOutOfBounds {
                index: i,
                length: self.length,
            });
        }
        Ok(self.offset + self.stride * i)
    }

    /// Map a local index without checking bounds.
    #[inline]
    pub fn index_unchecked(&self, i: i64) -> i64 {
        self.offset.wrapping_add(self.stride.wrapping_mul(i))
    }

    /// Fold a constant coordinate contribution into the offset.
    pub(crate) fn shift(self, delta: i64) -> Self {
        Self {
            offset: self.offset + delta,
            ..self
        }
    }
}

/// Local index of the position of `axes` that maps to backing `offset`, if
/// any.
///
/// Relies on the axes of one view coming from distinct dimensions of a
/// row-major root: ordered by stride magnitude, each axis spans less than
/// the next coarser stride, so greedy division recovers the coordinates.
/// The candidate is re-mapped and compared before it is returned.
pub(crate) fn locate<const N: usize>(axes: &[Axis; N], offset: i64) -> Option<[i64; N]> {
    if axes.iter().any(|a| a.length() == 0) {
        return None;
    }
    // Lowest backing coordinate of each axis, with strides made positive.
    let base = axes.iter().fold(0i64, |acc, a| {
        let low = if a.stride() < 0 {
            a.index_unchecked(a.length() - 1)
        } else {
            a.offset()
        };
        acc.wrapping_add(low)
    });
    let mut order: [usize; N] = std::array::from_fn(|d| d);
    order.sort_unstable_by_key(|&d| std::cmp::Reverse(axes[d].stride().unsigned_abs()));

    let mut rest = offset.checked_sub(base)?;
    if rest < 0 {
        return None;
    }
    let mut index = [0i64; N];
    for d in order {
        let axis = axes[d];
        let step = axis.stride().unsigned_abs();
        if axis.length() == 1 || step == 0 {
            continue;
        }
        let k = (rest as u64 / step) as i64;
        if k >= axis.length() {
            return None;
        }
        rest -= k * step as i64;
        index[d] = if axis.stride() < 0 {
            axis.length() - 1 - k
        } else {
            k
        };
    }
    let mapped = axes
        .iter()
        .zip(index.iter())
        .fold(0i64, |acc, (a, &i)| acc.wrapping_add(a.index_unchecked(i)));
    (rest == 0 && mapped == offset).then_some(index)
}
