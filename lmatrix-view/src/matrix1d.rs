//! One-dimensional matrices.

use crate::matrix::Matrix;
use crate::store::Storage;
use crate::Result;

/// Fixed-size vector of optional values, indexed by `i64`.
pub type Matrix1D<E> = Matrix<E, 1>;

impl<E> Matrix<E, 1> {
    /// Create an empty matrix of `size` positions with sparse storage.
    pub fn new(size: i64) -> Result<Self> {
        Self::with_storage(size, Storage::default())
    }

    /// Create an empty matrix of `size` positions.
    pub fn with_storage(size: i64, storage: Storage) -> Result<Self> {
        Self::root([size], storage)
    }

    /// Create a matrix holding `values` in order.
    pub fn from_values<I>(values: I, storage: Storage) -> Result<Self>
    where
        I: IntoIterator<Item = Option<E>>,
    {
        let values: Vec<Option<E>> = values.into_iter().collect();
        let m = Self::with_storage(values.len() as i64, storage)?;
        for (i, value) in values.into_iter().enumerate() {
            if value.is_some() {
                m.set_quick(i as i64, value)?;
            }
        }
        Ok(m)
    }

    pub fn set(&self, index: i64, value: Option<E>) -> Result<()> {
        self.set_at([index], value)
    }

    /// Unchecked variant of [`Matrix1D::set`]; `index` must be in bounds.
    #[inline]
    pub fn set_quick(&self, index: i64, value: Option<E>) -> Result<()> {
        self.set_quick_at([index], value)
    }

    /// Reverse the order of the positions.
    pub fn view_flip(&self) -> Self {
        let [axis] = *self.axes();
        self.derive([axis.flip()])
    }

    /// Window of `length` positions starting at `offset`.
    pub fn view_part(&self, offset: i64, length: i64) -> Result<Self> {
        let [axis] = *self.axes();
        Ok(self.derive([axis.part(offset, length)?]))
    }

    /// Every `factor`-th position, starting with the first.
    pub fn view_strides(&self, factor: i64) -> Result<Self> {
        let [axis] = *self.axes();
        Ok(self.derive([axis.strides(factor)?]))
    }
}

impl<E: Clone> Matrix<E, 1> {
    pub fn get(&self, index: i64) -> Result<Option<E>> {
        self.get_at([index])
    }

    /// Unchecked variant of [`Matrix1D::get`]; `index` must be in bounds.
    #[inline]
    pub fn get_quick(&self, index: i64) -> Option<E> {
        self.get_quick_at([index])
    }
}
