//! Rank-generic matrix handle and the traversal protocol shared by all ranks.
//!
//! [`Matrix<E, N>`] is a value-like handle: `N` axis transforms plus a shared
//! reference to one backing store. Root matrices and views have the same
//! type; a view differs from its parent only in its axes. Rank-specific
//! accessors and view factories live in `matrix1d`, `matrix2d` and
//! `matrix3d`.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Flatten;
use std::ops::Add;
use std::rc::Rc;

use num_traits::Zero;

use crate::axis::{self, Axis};
use crate::iter::{Cursor, IndexedIter, Iter};
use crate::store::{Storage, Store};
use crate::{MatrixError, Result};

// ============================================================================
// Layout helpers
// ============================================================================

/// Total size of a root matrix, rejecting negative or overflowing dims.
fn checked_size<const N: usize>(dims: &[i64; N]) -> Result<i64> {
    if let Some(&d) = dims.iter().find(|&&d| d < 0) {
        return Err(MatrixError::NegativeSize(d));
    }
    if dims.contains(&0) {
        return Ok(0);
    }
    dims.iter()
        .try_fold(1i64, |acc, &d| acc.checked_mul(d))
        .ok_or(MatrixError::SizeOverflow)
}

/// Row-major axes for a root matrix: the last index varies fastest.
///
/// An empty root addresses no position, so every stride is 0.
fn row_major_axes<const N: usize>(dims: [i64; N]) -> [Axis; N] {
    let mut axes = [Axis::identity(0); N];
    if dims.contains(&0) {
        for (axis, &d) in axes.iter_mut().zip(dims.iter()) {
            *axis = Axis::new(0, 0, d);
        }
        return axes;
    }
    let mut stride = 1i64;
    for d in (0..N).rev() {
        axes[d] = Axis::new(0, stride, dims[d]);
        stride = stride.saturating_mul(dims[d]);
    }
    axes
}

// ============================================================================
// Matrix
// ============================================================================

/// Fixed-size, 64-bit indexed matrix of rank `N` over optional values of `E`.
///
/// Cloning a `Matrix` clones the handle, not the data: the clone addresses
/// the same positions of the same backing store. Use [`Matrix::copy`] for an
/// independent matrix.
pub struct Matrix<E, const N: usize> {
    store: Rc<RefCell<Store<E>>>,
    axes: [Axis; N],
    view: bool,
    modifiable: bool,
}

impl<E, const N: usize> Clone for Matrix<E, N> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            axes: self.axes,
            view: self.view,
            modifiable: self.modifiable,
        }
    }
}

impl<E, const N: usize> fmt::Debug for Matrix<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("dims", &self.dims())
            .field("axes", &self.axes)
            .field("cardinality", &self.cardinality())
            .field("view", &self.view)
            .field("modifiable", &self.modifiable)
            .finish()
    }
}

impl<E, const N: usize> Matrix<E, N> {
    /// Create a root matrix with row-major axes over a fresh store.
    pub(crate) fn root(dims: [i64; N], storage: Storage) -> Result<Self> {
        let size = checked_size(&dims)?;
        let store = Store::new(size, storage)?;
        tracing::trace!(?dims, ?storage, "created matrix");
        Ok(Self {
            store: Rc::new(RefCell::new(store)),
            axes: row_major_axes(dims),
            view: false,
            modifiable: true,
        })
    }

    /// Create a view of rank `M` over the same store.
    pub(crate) fn derive<const M: usize>(&self, axes: [Axis; M]) -> Matrix<E, M> {
        tracing::trace!(?axes, "derived view");
        Matrix {
            store: Rc::clone(&self.store),
            axes,
            view: true,
            modifiable: self.modifiable,
        }
    }

    #[inline]
    pub fn axes(&self) -> &[Axis; N] {
        &self.axes
    }

    /// Length of each dimension.
    #[inline]
    pub fn dims(&self) -> [i64; N] {
        self.axes.map(|a| a.length())
    }

    /// Number of positions. Fixed for the lifetime of the handle.
    #[inline]
    pub fn size(&self) -> i64 {
        if self.axes.iter().any(|a| a.length() == 0) {
            return 0;
        }
        self.axes.iter().map(|a| a.length()).product()
    }

    /// Number of present values reachable through this handle.
    pub fn cardinality(&self) -> i64 {
        let store = self.store.borrow();
        // Views address distinct positions, so a full-size view covers the store.
        if self.size() == store.size() {
            return store.cardinality();
        }
        // A sparse store with fewer entries than the view is cheaper to scan.
        if store.cardinality() < self.size() {
            if let Some(indices) = store.sparse_indices() {
                return indices
                    .filter(|&offset| axis::locate(&self.axes, offset).is_some())
                    .count() as i64;
            }
        }
        Cursor::new(self.axes)
            .filter(|&(_, offset)| store.contains(offset))
            .count() as i64
    }

    /// True if this handle was derived from another matrix.
    #[inline]
    pub fn is_view(&self) -> bool {
        self.view
    }

    /// False if mutations through this handle are rejected.
    #[inline]
    pub fn is_modifiable(&self) -> bool {
        self.modifiable
    }

    pub fn storage(&self) -> Storage {
        self.store.borrow().storage()
    }

    /// True if both handles address the same backing store.
    pub fn shares_storage_with<const M: usize>(&self, other: &Matrix<E, M>) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }

    /// Read-only handle over the same positions.
    ///
    /// Every view derived from the returned handle is read-only as well.
    pub fn unmodifiable(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            axes: self.axes,
            view: self.view,
            modifiable: false,
        }
    }

    fn ensure_modifiable(&self, operation: &'static str) -> Result<()> {
        if self.modifiable {
            return Ok(());
        }
        tracing::debug!(operation, "rejected mutation through unmodifiable matrix");
        Err(MatrixError::Unsupported(operation))
    }

    fn ensure_same_size(&self, other: &Matrix<E, N>) -> Result<()> {
        let (expected, found) = (self.size(), other.size());
        if expected == found {
            return Ok(());
        }
        tracing::debug!(expected, found, "paired operation size mismatch");
        Err(MatrixError::SizeMismatch { expected, found })
    }

    /// Backing offset of `index`, checking every coordinate.
    fn offset_of(&self, index: [i64; N]) -> Result<i64> {
        let mut offset = 0i64;
        for (axis, &i) in self.axes.iter().zip(index.iter()) {
            offset += axis.index(i)?;
        }
        Ok(offset)
    }

    #[inline]
    fn offset_of_unchecked(&self, index: [i64; N]) -> i64 {
        debug_assert!(
            self.axes
                .iter()
                .zip(index.iter())
                .all(|(axis, &i)| 0 <= i && i < axis.length()),
            "index {index:?} out of bounds for dims {:?}",
            self.dims()
        );
        self.axes
            .iter()
            .zip(index.iter())
            .fold(0i64, |acc, (axis, &i)| acc.wrapping_add(axis.index_unchecked(i)))
    }

    #[inline]
    fn cursor(&self) -> Cursor<N> {
        Cursor::new(self.axes)
    }

    #[inline]
    fn write(&self, offset: i64, value: Option<E>) {
        // Drop the previous value after the borrow is released.
        let _previous = self.store.borrow_mut().put(offset, value);
    }

    /// Store `value` at `index`, checking bounds.
    pub fn set_at(&self, index: [i64; N], value: Option<E>) -> Result<()> {
        self.ensure_modifiable("set")?;
        let offset = self.offset_of(index)?;
        self.write(offset, value);
        Ok(())
    }

    /// Store `value` at `index` without checking bounds.
    ///
    /// The caller guarantees `index` lies inside [`Matrix::dims`]. Violations
    /// trip a debug assertion; in release builds they may overwrite another
    /// position of the same store or be dropped, never touching memory
    /// outside it.
    pub fn set_quick_at(&self, index: [i64; N], value: Option<E>) -> Result<()> {
        self.ensure_modifiable("set_quick")?;
        self.write(self.offset_of_unchecked(index), value);
        Ok(())
    }

    /// Remove every value reachable through this handle.
    ///
    /// Positions of the backing store outside this view are untouched.
    pub fn clear(&self) -> Result<()> {
        self.ensure_modifiable("clear")?;
        let full = self.size() == self.store.borrow().size();
        if full {
            self.store.borrow_mut().clear();
            return Ok(());
        }
        let present: Option<Vec<i64>> = {
            let store = self.store.borrow();
            if store.cardinality() < self.size() {
                store.sparse_indices().map(|indices| {
                    indices
                        .filter(|&offset| axis::locate(&self.axes, offset).is_some())
                        .collect()
                })
            } else {
                None
            }
        };
        match present {
            Some(offsets) => offsets.into_iter().for_each(|offset| self.write(offset, None)),
            None => self.cursor().for_each(|(_, offset)| self.write(offset, None)),
        }
        Ok(())
    }
}

// ============================================================================
// Reads and traversal
// ============================================================================

impl<E: Clone, const N: usize> Matrix<E, N> {
    #[inline]
    fn read(&self, offset: i64) -> Option<E> {
        self.store.borrow().get(offset).cloned()
    }

    /// Value at `index`, checking bounds.
    pub fn get_at(&self, index: [i64; N]) -> Result<Option<E>> {
        let offset = self.offset_of(index)?;
        Ok(self.read(offset))
    }

    /// Value at `index` without checking bounds.
    ///
    /// The caller guarantees `index` lies inside [`Matrix::dims`]. Violations
    /// trip a debug assertion; in release builds they return an arbitrary
    /// value of the same store or `None`.
    pub fn get_quick_at(&self, index: [i64; N]) -> Option<E> {
        self.read(self.offset_of_unchecked(index))
    }

    /// Values in canonical order, absent positions included.
    pub fn iter(&self) -> Iter<E, N> {
        Iter::new(Rc::clone(&self.store), self.axes)
    }

    /// `(index, value)` pairs in canonical order.
    pub fn iter_indexed(&self) -> IndexedIter<E, N> {
        IndexedIter::new(Rc::clone(&self.store), self.axes)
    }

    /// Present values in canonical order.
    pub fn iter_non_null(&self) -> Flatten<Iter<E, N>> {
        self.iter().flatten()
    }

    /// Snapshot of this view in canonical order.
    pub fn to_vec(&self) -> Vec<Option<E>> {
        self.iter().collect()
    }

    /// Independent root matrix with this view's shape and contents.
    pub fn copy(&self) -> Result<Self> {
        let copy = Self::root(self.dims(), self.storage())?;
        for ((_, offset), value) in copy.cursor().zip(self.iter()) {
            if value.is_some() {
                copy.write(offset, value);
            }
        }
        Ok(copy)
    }

    /// Set every reachable position to `value`.
    ///
    /// Assigning `None` empties the view, like [`Matrix::clear`].
    pub fn assign(&self, value: impl Into<Option<E>>) -> Result<()> {
        self.ensure_modifiable("assign")?;
        let value = value.into();
        for (_, offset) in self.cursor() {
            self.write(offset, value.clone());
        }
        Ok(())
    }

    /// Replace every reachable value `v` with `f(v)`.
    pub fn assign_with<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(Option<E>) -> Option<E>,
    {
        self.ensure_modifiable("assign")?;
        for (_, offset) in self.cursor() {
            let value = self.read(offset);
            self.write(offset, f(value));
        }
        Ok(())
    }

    /// Copy `other` positionally into this view.
    ///
    /// Only the total sizes must agree; values pair up in canonical order.
    pub fn assign_from(&self, other: &Matrix<E, N>) -> Result<()> {
        self.assign_zip(other, |_, b| b)
    }

    /// Replace every value `a` with `f(a, b)`, where `b` is the value of
    /// `other` at the same canonical position.
    ///
    /// If `other` shares this matrix's store it is snapshotted first, so the
    /// result never depends on the order positions are written.
    pub fn assign_zip<F>(&self, other: &Matrix<E, N>, f: F) -> Result<()>
    where
        F: FnMut(Option<E>, Option<E>) -> Option<E>,
    {
        self.ensure_modifiable("assign")?;
        self.ensure_same_size(other)?;
        if self.shares_storage_with(other) {
            self.zip_write(other.to_vec().into_iter(), f);
        } else {
            self.zip_write(other.iter(), f);
        }
        Ok(())
    }

    fn zip_write<I, F>(&self, values: I, mut f: F)
    where
        I: Iterator<Item = Option<E>>,
        F: FnMut(Option<E>, Option<E>) -> Option<E>,
    {
        for ((_, offset), b) in self.cursor().zip(values) {
            let a = self.read(offset);
            self.write(offset, f(a, b));
        }
    }

    /// Map every value with `map` and fold the results with `combine`.
    ///
    /// Returns `None` for an empty matrix.
    pub fn aggregate<R, C, M>(&self, mut combine: C, mut map: M) -> Option<R>
    where
        C: FnMut(R, R) -> R,
        M: FnMut(Option<E>) -> R,
    {
        let mut values = self.iter();
        let first = map(values.next()?);
        Some(values.fold(first, |acc, value| combine(acc, map(value))))
    }

    /// Merge paired values of `self` and `other` with `merge`, then fold
    /// with `combine`.
    ///
    /// Returns `Ok(None)` when both matrices are empty.
    pub fn aggregate_zip<R, C, M>(
        &self,
        other: &Matrix<E, N>,
        mut combine: C,
        mut merge: M,
    ) -> Result<Option<R>>
    where
        C: FnMut(R, R) -> R,
        M: FnMut(Option<E>, Option<E>) -> R,
    {
        self.ensure_same_size(other)?;
        let mut pairs = self.iter().zip(other.iter());
        let Some((a, b)) = pairs.next() else {
            return Ok(None);
        };
        let first = merge(a, b);
        Ok(Some(
            pairs.fold(first, |acc, (a, b)| combine(acc, merge(a, b))),
        ))
    }

    /// Call `f` with every value, absent ones included.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(Option<E>),
    {
        self.iter().for_each(f);
    }

    /// Call `f` with every value accepted by `predicate`.
    pub fn for_each_where<P, F>(&self, mut predicate: P, mut f: F)
    where
        P: FnMut(Option<&E>) -> bool,
        F: FnMut(Option<E>),
    {
        for value in self.iter() {
            if predicate(value.as_ref()) {
                f(value);
            }
        }
    }

    /// Call `f` with every index and value, absent values included.
    pub fn for_each_indexed<F>(&self, mut f: F)
    where
        F: FnMut([i64; N], Option<E>),
    {
        for (index, value) in self.iter_indexed() {
            f(index, value);
        }
    }

    /// Call `f` with every index and value accepted by `predicate`.
    pub fn for_each_indexed_where<P, F>(&self, mut predicate: P, mut f: F)
    where
        P: FnMut([i64; N], Option<&E>) -> bool,
        F: FnMut([i64; N], Option<E>),
    {
        for (index, value) in self.iter_indexed() {
            if predicate(index, value.as_ref()) {
                f(index, value);
            }
        }
    }

    /// Call `f` with every present value.
    pub fn for_each_non_null<F>(&self, f: F)
    where
        F: FnMut(E),
    {
        self.iter_non_null().for_each(f);
    }

    /// Call `f` with every present value accepted by `predicate`.
    pub fn for_each_non_null_where<P, F>(&self, mut predicate: P, mut f: F)
    where
        P: FnMut(&E) -> bool,
        F: FnMut(E),
    {
        for value in self.iter_non_null() {
            if predicate(&value) {
                f(value);
            }
        }
    }

    /// Call `f` with the index and value of every present position.
    pub fn for_each_non_null_indexed<F>(&self, mut f: F)
    where
        F: FnMut([i64; N], E),
    {
        for (index, value) in self.iter_indexed() {
            if let Some(value) = value {
                f(index, value);
            }
        }
    }

    /// Call `f` with the index and value of every present position accepted
    /// by `predicate`.
    pub fn for_each_non_null_indexed_where<P, F>(&self, mut predicate: P, mut f: F)
    where
        P: FnMut([i64; N], &E) -> bool,
        F: FnMut([i64; N], E),
    {
        for (index, value) in self.iter_indexed() {
            if let Some(value) = value {
                if predicate(index, &value) {
                    f(index, value);
                }
            }
        }
    }
}

impl<E, const N: usize> Matrix<E, N>
where
    E: Clone + Zero + Add<Output = E>,
{
    /// Sum of the present values; absent positions count as zero.
    pub fn sum(&self) -> E {
        self.iter_non_null().fold(E::zero(), |acc, v| acc + v)
    }
}

// ============================================================================
// Structural equality
// ============================================================================

impl<E: Clone + PartialEq, const N: usize> PartialEq for Matrix<E, N> {
    /// Equal sizes and equal values in canonical order.
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<E: Clone + Eq, const N: usize> Eq for Matrix<E, N> {}

impl<E: Clone + Hash, const N: usize> Hash for Matrix<E, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size().hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}
