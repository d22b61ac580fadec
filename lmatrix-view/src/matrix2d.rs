//! Two-dimensional matrices.

use crate::matrix::Matrix;
use crate::matrix1d::Matrix1D;
use crate::store::Storage;
use crate::Result;

/// Fixed-size `rows x columns` matrix of optional values.
///
/// Canonical order is row-major: index `[row, column]`, columns fastest.
pub type Matrix2D<E> = Matrix<E, 2>;

impl<E> Matrix<E, 2> {
    /// Create an empty `rows x columns` matrix with sparse storage.
    pub fn new(rows: i64, columns: i64) -> Result<Self> {
        Self::with_storage(rows, columns, Storage::default())
    }

    /// Create an empty `rows x columns` matrix.
    pub fn with_storage(rows: i64, columns: i64, storage: Storage) -> Result<Self> {
        Self::root([rows, columns], storage)
    }

    #[inline]
    pub fn rows(&self) -> i64 {
        self.axes()[0].length()
    }

    #[inline]
    pub fn columns(&self) -> i64 {
        self.axes()[1].length()
    }

    pub fn set(&self, row: i64, column: i64, value: Option<E>) -> Result<()> {
        self.set_at([row, column], value)
    }

    /// Unchecked variant of [`Matrix2D::set`]; both coordinates must be in bounds.
    #[inline]
    pub fn set_quick(&self, row: i64, column: i64, value: Option<E>) -> Result<()> {
        self.set_quick_at([row, column], value)
    }

    /// Reverse the order of the rows.
    pub fn view_row_flip(&self) -> Self {
        let [rows, columns] = *self.axes();
        self.derive([rows.flip(), columns])
    }

    /// Reverse the order of the columns.
    pub fn view_column_flip(&self) -> Self {
        let [rows, columns] = *self.axes();
        self.derive([rows, columns.flip()])
    }

    /// Rectangular window of `height x width` cells with top-left corner at
    /// `(row, column)`.
    pub fn view_part(&self, row: i64, column: i64, height: i64, width: i64) -> Result<Self> {
        let [rows, columns] = *self.axes();
        Ok(self.derive([rows.part(row, height)?, columns.part(column, width)?]))
    }

    /// Every `row_factor`-th row and `column_factor`-th column.
    pub fn view_strides(&self, row_factor: i64, column_factor: i64) -> Result<Self> {
        let [rows, columns] = *self.axes();
        Ok(self.derive([rows.strides(row_factor)?, columns.strides(column_factor)?]))
    }

    /// Transpose: rows become columns.
    pub fn view_dice(&self) -> Self {
        let [rows, columns] = *self.axes();
        self.derive([columns, rows])
    }

    /// The cells of one row, as a vector over the columns.
    pub fn view_row(&self, row: i64) -> Result<Matrix1D<E>> {
        let [rows, columns] = *self.axes();
        Ok(self.derive([columns.shift(rows.index(row)?)]))
    }

    /// The cells of one column, as a vector over the rows.
    pub fn view_column(&self, column: i64) -> Result<Matrix1D<E>> {
        let [rows, columns] = *self.axes();
        Ok(self.derive([rows.shift(columns.index(column)?)]))
    }
}

impl<E: Clone> Matrix<E, 2> {
    pub fn get(&self, row: i64, column: i64) -> Result<Option<E>> {
        self.get_at([row, column])
    }

    /// Unchecked variant of [`Matrix2D::get`]; both coordinates must be in bounds.
    #[inline]
    pub fn get_quick(&self, row: i64, column: i64) -> Option<E> {
        self.get_quick_at([row, column])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixError;

    /// `m[r, c] = 10 * r + c`.
    fn grid(rows: i64, columns: i64) -> Matrix2D<i64> {
        let m = Matrix2D::new(rows, columns).unwrap();
        m.for_each_indexed(|[r, c], _| m.set(r, c, Some(10 * r + c)).unwrap());
        m
    }

    #[test]
    fn test_new() {
        let m = Matrix2D::<i64>::new(3, 4).unwrap();
        assert_eq!(m.size(), 12);
        assert_eq!((m.rows(), m.columns()), (3, 4));
        assert_eq!(m.cardinality(), 0);
        assert!(Matrix2D::<i64>::new(-1, 4).is_err());
        assert!(Matrix2D::<i64>::new(3, -4).is_err());
        assert_eq!(Matrix2D::<i64>::new(0, 4).unwrap().size(), 0);
        assert_eq!(
            Matrix2D::<i64>::new(i64::MAX, 2).unwrap_err(),
            MatrixError::SizeOverflow
        );
    }

    #[test]
    fn test_get_set() {
        let m = grid(3, 4);
        assert_eq!(m.get(2, 3).unwrap(), Some(23));
        assert_eq!(m.get_quick(1, 2), Some(12));
        assert!(m.get(3, 0).is_err());
        assert!(m.get(0, 4).is_err());
        assert!(m.set(0, -1, None).is_err());
        m.set(0, 0, None).unwrap();
        assert_eq!(m.cardinality(), 11);
    }

    #[test]
    fn test_view_flips() {
        let m = grid(3, 4);
        assert_eq!(m.view_row_flip().get(0, 1).unwrap(), Some(21));
        assert_eq!(m.view_column_flip().get(0, 0).unwrap(), Some(3));
        assert_eq!(m.view_row_flip().view_row_flip(), m);
    }

    #[test]
    fn test_view_part() {
        let m = grid(4, 5);
        let p = m.view_part(1, 2, 2, 3).unwrap();
        assert_eq!((p.rows(), p.columns()), (2, 3));
        assert_eq!(p.get(0, 0).unwrap(), Some(12));
        assert_eq!(p.get(1, 2).unwrap(), Some(24));
        p.set(1, 1, Some(-1)).unwrap();
        assert_eq!(m.get(2, 3).unwrap(), Some(-1));
        assert!(matches!(
            m.view_part(3, 0, 2, 1),
            Err(MatrixError::RangeOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_view_strides() {
        let m = grid(5, 5);
        let s = m.view_strides(2, 3).unwrap();
        assert_eq!((s.rows(), s.columns()), (3, 2));
        assert_eq!(s.get(2, 1).unwrap(), Some(43));
        assert!(m.view_strides(1, 0).is_err());
    }

    #[test]
    fn test_view_row_and_column() {
        let m = grid(3, 4);
        let row = m.view_row(1).unwrap();
        assert_eq!(row.size(), 4);
        assert_eq!(row.get(3).unwrap(), Some(13));
        let column = m.view_column(2).unwrap();
        assert_eq!(column.size(), 3);
        assert_eq!(column.get(2).unwrap(), Some(22));

        column.set(0, Some(100)).unwrap();
        assert_eq!(m.get(0, 2).unwrap(), Some(100));
        assert!(m.view_row(3).is_err());
        assert!(m.view_column(-1).is_err());
    }

    #[test]
    fn test_view_row_of_flipped_part() {
        let m = grid(4, 4);
        let v = m.view_part(1, 1, 3, 3).unwrap().view_row_flip();
        let row = v.view_row(0).unwrap().view_flip();
        assert_eq!(row.to_vec(), vec![Some(33), Some(32), Some(31)]);
    }

    #[test]
    fn test_view_dice() {
        let m = grid(2, 3);
        let t = m.view_dice();
        assert_eq!((t.rows(), t.columns()), (3, 2));
        assert_eq!(t.get(2, 1).unwrap(), Some(12));
        t.set(0, 1, Some(7)).unwrap();
        assert_eq!(m.get(1, 0).unwrap(), Some(7));
    }

    #[test]
    fn test_clear_part() {
        let m = grid(3, 3);
        m.view_part(0, 0, 2, 2).unwrap().clear().unwrap();
        assert_eq!(m.cardinality(), 5);
        assert_eq!(m.get(2, 2).unwrap(), Some(22));
    }
}
