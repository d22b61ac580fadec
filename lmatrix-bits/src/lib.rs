//! Fixed-size bit vectors addressed by `i64`.
//!
//! [`BitMatrix1D`] packs its bits into `u64` words and supports in-place
//! boolean algebra (`and`, `or`, `xor`, `and_not`) between vectors of equal
//! length. Errors share [`MatrixError`] with the value matrices.
//!
//! # Example
//!
//! ```rust
//! use lmatrix_bits::BitMatrix1D;
//!
//! let mut a = BitMatrix1D::new(100).unwrap();
//! let mut b = BitMatrix1D::new(100).unwrap();
//! a.set(3, true).unwrap();
//! b.set(3, true).unwrap();
//! b.set(70, true).unwrap();
//! a.or(&b).unwrap();
//! assert_eq!(a.cardinality(), 2);
//! assert_eq!(a.iter_ones().collect::<Vec<_>>(), vec![3, 70]);
//! ```

mod bit_matrix;

pub use bit_matrix::BitMatrix1D;
pub use lmatrix_view::{MatrixError, Result};
