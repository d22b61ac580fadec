//! Canonical-order traversal over a matrix view.

use std::cell::RefCell;
use std::rc::Rc;

use crate::axis::Axis;
use crate::store::Store;

/// Walks a view's multi-indices in canonical (row-major) order, yielding each
/// index together with its backing offset.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<const N: usize> {
    axes: [Axis; N],
    index: [i64; N],
    remaining: i64,
}

impl<const N: usize> Cursor<N> {
    pub(crate) fn new(axes: [Axis; N]) -> Self {
        let remaining = if axes.iter().any(|a| a.length() == 0) {
            0
        } else {
            axes.iter().map(|a| a.length()).product()
        };
        Self {
            axes,
            index: [0; N],
            remaining,
        }
    }

    #[inline]
    fn remaining_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<const N: usize> Iterator for Cursor<N> {
    type Item = ([i64; N], i64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining <= 0 {
            return None;
        }
        let index = self.index;
        let offset: i64 = self
            .axes
            .iter()
            .zip(index.iter())
            .map(|(axis, &i)| axis.index_unchecked(i))
            .sum();
        self.remaining -= 1;

        // Last axis varies fastest.
        for d in (0..N).rev() {
            self.index[d] += 1;
            if self.index[d] < self.axes[d].length() {
                break;
            }
            self.index[d] = 0;
        }
        Some((index, offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining_hint()
    }
}

/// Lazy iterator over a view's values, absent positions included.
///
/// The backing store is borrowed only for the duration of each `next`, so
/// the matrix may be mutated between steps.
pub struct Iter<E, const N: usize> {
    store: Rc<RefCell<Store<E>>>,
    cursor: Cursor<N>,
}

impl<E, const N: usize> Iter<E, N> {
    pub(crate) fn new(store: Rc<RefCell<Store<E>>>, axes: [Axis; N]) -> Self {
        Self {
            store,
            cursor: Cursor::new(axes),
        }
    }
}

impl<E: Clone, const N: usize> Iterator for Iter<E, N> {
    type Item = Option<E>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (_, offset) = self.cursor.next()?;
        Some(self.store.borrow().get(offset).cloned())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.remaining_hint()
    }
}

/// Lazy iterator yielding `(index, value)` pairs.
pub struct IndexedIter<E, const N: usize> {
    store: Rc<RefCell<Store<E>>>,
    cursor: Cursor<N>,
}

impl<E, const N: usize> IndexedIter<E, N> {
    pub(crate) fn new(store: Rc<RefCell<Store<E>>>, axes: [Axis; N]) -> Self {
        Self {
            store,
            cursor: Cursor::new(axes),
        }
    }
}

impl<E: Clone, const N: usize> Iterator for IndexedIter<E, N> {
    type Item = ([i64; N], Option<E>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (index, offset) = self.cursor.next()?;
        Some((index, self.store.borrow().get(offset).cloned()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.remaining_hint()
    }
}
