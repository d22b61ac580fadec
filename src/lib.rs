//! Long-addressable matrices with zero-copy, write-through views.
//!
//! This crate re-exports the workspace members under one name:
//!
//! - [`lmatrix_view`]: [`Matrix1D`], [`Matrix2D`], [`Matrix3D`], their view
//!   factories and the shared traversal protocol
//! - [`lmatrix_bits`] (feature `bits`, on by default): [`BitMatrix1D`]
//!
//! # Views
//!
//! A view is a matrix handle that shares its parent's backing store and
//! differs only in how it maps indices. Views compose freely and writes
//! through any of them land in the same store.
//!
//! ```rust
//! use lmatrix::prelude::*;
//!
//! let m = Matrix2D::<i64>::new(4, 4).unwrap();
//! m.for_each_indexed(|[r, c], _| m.set(r, c, Some(10 * r + c)).unwrap());
//!
//! let corner = m.view_part(1, 1, 3, 3).unwrap().view_row_flip();
//! assert_eq!(corner.get(0, 0).unwrap(), Some(31));
//!
//! corner.view_row(0).unwrap().assign(0).unwrap();
//! assert_eq!(m.get(3, 2).unwrap(), Some(0));
//! ```
//!
//! # Read-only handles
//!
//! ```rust
//! use lmatrix::prelude::*;
//!
//! let m = Matrix1D::from_values([Some(1), Some(2)], Storage::Dense).unwrap();
//! let ro = m.unmodifiable();
//! assert_eq!(ro.set(0, None).unwrap_err().kind(), ErrorKind::UnsupportedOperation);
//! m.set(0, Some(5)).unwrap();
//! assert_eq!(ro.get(0).unwrap(), Some(5));
//! ```

pub use lmatrix_view::{
    Axis, ErrorKind, IndexedIter, Iter, Matrix, Matrix1D, Matrix2D, Matrix3D, MatrixError, Result,
    Storage,
};

#[cfg(feature = "bits")]
pub use lmatrix_bits::BitMatrix1D;

pub use lmatrix_view;

#[cfg(feature = "bits")]
pub use lmatrix_bits;

/// Everything needed for everyday use.
pub mod prelude {
    pub use crate::{ErrorKind, Matrix1D, Matrix2D, Matrix3D, MatrixError, Storage};

    #[cfg(feature = "bits")]
    pub use crate::BitMatrix1D;
}
