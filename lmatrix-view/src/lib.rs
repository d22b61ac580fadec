//! Long-addressable matrices with zero-copy, write-through views.
//!
//! Every matrix in this crate is a handle: a per-axis coordinate transform
//! ([`Axis`]) plus a shared reference to a single backing store. Deriving a
//! view (flip, part, strides, row/column/slice) only rewrites the transform,
//! so writes through any view are visible through its parent and through
//! every sibling aliasing the same positions.
//!
//! # Core Types
//!
//! - [`Axis`]: `(offset, stride, length)` transform with flip/part/strides algebra
//! - [`Matrix`]: const-generic matrix handle, with the aliases
//!   [`Matrix1D`], [`Matrix2D`] and [`Matrix3D`]
//! - [`Storage`]: dense or sparse backing store selection
//!
//! # Traversal Protocol
//!
//! Every rank shares one protocol: `assign*`, `aggregate*`, `for_each*` and
//! the lazy iterators [`Iter`] / [`IndexedIter`]. Index-aware callbacks take
//! the index as an array, `[i]`, `[row, column]` or `[slice, row, column]`.
//!
//! # Example
//!
//! ```rust
//! use lmatrix_view::Matrix1D;
//!
//! let m = Matrix1D::<i32>::new(10).unwrap();
//! let tail = m.view_flip().view_part(0, 3).unwrap();
//! tail.set(0, Some(7)).unwrap();
//! assert_eq!(m.get(9).unwrap(), Some(7));
//! assert_eq!(m.cardinality(), 1);
//! ```
//!
//! Handles are `!Send` and `!Sync`: a matrix and all of its views belong to
//! one thread, and callers serialize access themselves.

mod axis;
mod iter;
mod matrix;
mod matrix1d;
mod matrix2d;
mod matrix3d;
mod store;

pub use axis::Axis;
pub use iter::{IndexedIter, Iter};
pub use matrix::Matrix;
pub use matrix1d::Matrix1D;
pub use matrix2d::Matrix2D;
pub use matrix3d::Matrix3D;
pub use store::Storage;

// ============================================================================
// Error types
// ============================================================================

/// Broad classification of a [`MatrixError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument was outside its legal domain.
    InvalidArgument,
    /// A paired operation was given an operand of a different size.
    SizeMismatch,
    /// A coordinate fell outside `[0, length)` for its dimension.
    OutOfBounds,
    /// A mutation was attempted through an unmodifiable handle.
    UnsupportedOperation,
}

/// Errors that can occur during matrix operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A size or dimension was negative.
    #[error("negative size: {0}")]
    NegativeSize(i64),

    /// The product of the dimensions does not fit the backing store.
    #[error("size overflow")]
    SizeOverflow,

    /// A stride factor was less than one.
    #[error("invalid stride factor {0}, must be >= 1")]
    InvalidStride(i64),

    /// A window length was negative.
    #[error("negative length: {0}")]
    NegativeLength(i64),

    /// An axis permutation named an invalid or repeated axis.
    #[error("invalid axis {axis} for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// Paired operands differ in size.
    #[error("size mismatch: expected {expected}, found {found}")]
    SizeMismatch { expected: i64, found: i64 },

    /// A coordinate was outside `[0, length)`.
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: i64, length: i64 },

    /// A window `[start, start + length)` does not fit inside `[0, bound)`.
    #[error("range {start}..{start}+{length} out of bounds for length {bound}")]
    RangeOutOfBounds { start: i64, length: i64, bound: i64 },

    /// A mutating operation was called through an unmodifiable handle.
    #[error("unsupported operation on unmodifiable matrix: {0}")]
    Unsupported(&'static str),
}

impl MatrixError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::NegativeSize(_)
            | MatrixError::SizeOverflow
            | MatrixError::InvalidStride(_)
            | MatrixError::NegativeLength(_)
            | MatrixError::InvalidAxis { .. } => ErrorKind::InvalidArgument,
            MatrixError::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            MatrixError::IndexOutOfBounds { .. } | MatrixError::RangeOutOfBounds { .. } => {
                ErrorKind::OutOfBounds
            }
            MatrixError::Unsupported(_) => ErrorKind::UnsupportedOperation,
        }
    }

    /// True for every argument-domain error, size mismatches included.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidArgument | ErrorKind::SizeMismatch
        )
    }
}

/// Result type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
