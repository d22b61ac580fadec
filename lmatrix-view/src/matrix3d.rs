//! Three-dimensional matrices.

use crate::matrix::Matrix;
use crate::matrix2d::Matrix2D;
use crate::store::Storage;
use crate::{MatrixError, Result};

/// Fixed-size `slices x rows x columns` matrix of optional values.
///
/// Canonical order is index `[slice, row, column]`, columns fastest.
pub type Matrix3D<E> = Matrix<E, 3>;

impl<E> Matrix<E, 3> {
    /// Create an empty `slices x rows x columns` matrix with sparse storage.
    pub fn new(slices: i64, rows: i64, columns: i64) -> Result<Self> {
        Self::with_storage(slices, rows, columns, Storage::default())
    }

    /// Create an empty `slices x rows x columns` matrix.
    pub fn with_storage(slices: i64, rows: i64, columns: i64, storage: Storage) -> Result<Self> {
        Self::root([slices, rows, columns], storage)
    }

    #[inline]
    pub fn slices(&self) -> i64 {
        self.axes()[0].length()
    }

    #[inline]
    pub fn rows(&self) -> i64 {
        self.axes()[1].length()
    }

    #[inline]
    pub fn columns(&self) -> i64 {
        self.axes()[2].length()
    }

    pub fn set(&self, slice: i64, row: i64, column: i64, value: Option<E>) -> Result<()> {
        self.set_at([slice, row, column], value)
    }

    /// Unchecked variant of [`Matrix3D::set`]; all coordinates must be in bounds.
    #[inline]
    pub fn set_quick(&self, slice: i64, row: i64, column: i64, value: Option<E>) -> Result<()> {
        self.set_quick_at([slice, row, column], value)
    }

    /// Reverse the order of the slices.
    pub fn view_slice_flip(&self) -> Self {
        let [slices, rows, columns] = *self.axes();
        self.derive([slices.flip(), rows, columns])
    }

    /// Reverse the order of the rows.
    pub fn view_row_flip(&self) -> Self {
        let [slices, rows, columns] = *self.axes();
        self.derive([slices, rows.flip(), columns])
    }

    /// Reverse the order of the columns.
    pub fn view_column_flip(&self) -> Self {
        let [slices, rows, columns] = *self.axes();
        self.derive([slices, rows, columns.flip()])
    }

    /// Box of `depth x height x width` cells with its first corner at
    /// `(slice, row, column)`.
    pub fn view_part(
        &self,
        slice: i64,
        row: i64,
        column: i64,
        depth: i64,
        height: i64,
        width: i64,
    ) -> Result<Self> {
        let [slices, rows, columns] = *self.axes();
        Ok(self.derive([
            slices.part(slice, depth)?,
            rows.part(row, height)?,
            columns.part(column, width)?,
        ]))
    }

    /// Every `slice_factor`-th slice, `row_factor`-th row and
    /// `column_factor`-th column.
    pub fn view_strides(
        &self,
        slice_factor: i64,
        row_factor: i64,
        column_factor: i64,
    ) -> Result<Self> {
        let [slices, rows, columns] = *self.axes();
        Ok(self.derive([
            slices.strides(slice_factor)?,
            rows.strides(row_factor)?,
            columns.strides(column_factor)?,
        ]))
    }

    /// Reorder the axes: axis `d` of the result is axis `perm[d]` of `self`.
    pub fn view_dice(&self, perm: [usize; 3]) -> Result<Self> {
        let mut seen = [false; 3];
        for &p in &perm {
            if p >= 3 || seen[p] {
                return Err(MatrixError::InvalidAxis { axis: p, rank: 3 });
            }
            seen[p] = true;
        }
        let axes = *self.axes();
        Ok(self.derive(perm.map(|p| axes[p])))
    }

    /// One slice, as a `rows x columns` matrix.
    pub fn view_slice(&self, slice: i64) -> Result<Matrix2D<E>> {
        let [slices, rows, columns] = *self.axes();
        Ok(self.derive([rows.shift(slices.index(slice)?), columns]))
    }

    /// One row across all slices, as a `slices x columns` matrix.
    pub fn view_row(&self, row: i64) -> Result<Matrix2D<E>> {
        let [slices, rows, columns] = *self.axes();
        Ok(self.derive([slices.shift(rows.index(row)?), columns]))
    }

    /// One column across all slices, as a `slices x rows` matrix.
    pub fn view_column(&self, column: i64) -> Result<Matrix2D<E>> {
        let [slices, rows, columns] = *self.axes();
        Ok(self.derive([slices.shift(columns.index(column)?), rows]))
    }
}

impl<E: Clone> Matrix<E, 3> {
    pub fn get(&self, slice: i64, row: i64, column: i64) -> Result<Option<E>> {
        self.get_at([slice, row, column])
    }

    /// Unchecked variant of [`Matrix3D::get`]; all coordinates must be in bounds.
    #[inline]
    pub fn get_quick(&self, slice: i64, row: i64, column: i64) -> Option<E> {
        self.get_quick_at([slice, row, column])
    }
}
