//! Backing store shared by a root matrix and all of its views.

use std::collections::HashMap;

use crate::{MatrixError, Result};

/// Backing store layout, chosen once when a root matrix is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Storage {
    /// Hash map keyed by backing index. Only present values occupy memory,
    /// so any size up to `i64::MAX` can be addressed.
    #[default]
    Sparse,
    /// One `Option<E>` slot per position. The size must fit in `usize`.
    Dense,
}

enum Slots<E> {
    Dense(Vec<Option<E>>),
    Sparse(HashMap<i64, E>),
}

/// Element storage plus the live count of present slots.
pub(crate) struct Store<E> {
    size: i64,
    cardinality: i64,
    slots: Slots<E>,
}

impl<E> Store<E> {
    pub(crate) fn new(size: i64, storage: Storage) -> Result<Self> {
        if size < 0 {
            return Err(MatrixError::NegativeSize(size));
        }
        let slots = match storage {
            Storage::Sparse => Slots::Sparse(HashMap::new()),
            Storage::Dense => {
                let len = usize::try_from(size).map_err(|_| MatrixError::SizeOverflow)?;
                let mut slots = Vec::new();
                slots
                    .try_reserve_exact(len)
                    .map_err(|_| MatrixError::SizeOverflow)?;
                slots.resize_with(len, || None);
                Slots::Dense(slots)
            }
        };
        Ok(Self {
            size,
            cardinality: 0,
            slots,
        })
    }

    #[inline]
    pub(crate) fn size(&self) -> i64 {
        self.size
    }

    #[inline]
    pub(crate) fn cardinality(&self) -> i64 {
        self.cardinality
    }

    pub(crate) fn storage(&self) -> Storage {
        match self.slots {
            Slots::Dense(_) => Storage::Dense,
            Slots::Sparse(_) => Storage::Sparse,
        }
    }

    #[inline]
    fn in_range(&self, index: i64) -> bool {
        0 <= index && index < self.size
    }

    pub(crate) fn get(&self, index: i64) -> Option<&E> {
        if !self.in_range(index) {
            return None;
        }
        match &self.slots {
            Slots::Dense(slots) => slots[index as usize].as_ref(),
            Slots::Sparse(map) => map.get(&index),
        }
    }

    #[inline]
    pub(crate) fn contains(&self, index: i64) -> bool {
        self.get(index).is_some()
    }

    /// Backing indices of the present values, when the store is sparse.
    pub(crate) fn sparse_indices(&self) -> Option<impl Iterator<Item = i64> + '_> {
        match &self.slots {
            Slots::Sparse(map) => Some(map.keys().copied()),
            Slots::Dense(_) => None,
        }
    }

    /// Store `value` at `index`, returning the previous value.
    ///
    /// Indices outside the store are ignored; they can only arrive through
    /// the unchecked accessors with a violated precondition.
    pub(crate) fn put(&mut self, index: i64, value: Option<E>) -> Option<E> {
        debug_assert!(
            self.in_range(index),
            "backing index {index} out of range for store of size {}",
            self.size
        );
        if !self.in_range(index) {
            return None;
        }
        let added = i64::from(value.is_some());
        let previous = match &mut self.slots {
            Slots::Dense(slots) => std::mem::replace(&mut slots[index as usize], value),
            Slots::Sparse(map) => match value {
                Some(value) => map.insert(index, value),
                None => map.remove(&index),
            },
        };
        self.cardinality += added - i64::from(previous.is_some());
        previous
    }

    /// Remove every value.
    pub(crate) fn clear(&mut self) {
        match &mut self.slots {
            Slots::Dense(slots) => slots.iter_mut().for_each(|slot| *slot = None),
            Slots::Sparse(map) => map.clear(),
        }
        self.cardinality = 0;
    }
}
