//! Fixed-size bit vector.

use std::fmt;

use bitvec::prelude::*;
use lmatrix_view::{Axis, MatrixError, Result};

type Bits = BitVec<u64, Lsb0>;

/// Fixed-size vector of `length` bits, all initially false.
///
/// Unlike the value matrices, a bit matrix owns its storage directly and has
/// no views; boolean algebra always works on whole vectors of equal length.
/// Equality and hashing are by content.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix1D {
    bits: Bits,
}

impl BitMatrix1D {
    /// Create a bit matrix of `length` false bits.
    pub fn new(length: i64) -> Result<Self> {
        if length < 0 {
            return Err(MatrixError::NegativeSize(length));
        }
        let length = usize::try_from(length).map_err(|_| MatrixError::SizeOverflow)?;
        if length > BitSlice::<u64, Lsb0>::MAX_BITS {
            return Err(MatrixError::SizeOverflow);
        }
        let word_bits = u64::BITS as usize;
        let words = length / word_bits + usize::from(length % word_bits != 0);
        let mut raw = Vec::new();
        raw.try_reserve_exact(words)
            .map_err(|_| MatrixError::SizeOverflow)?;
        raw.resize(words, 0u64);
        let mut bits = Bits::from_vec(raw);
        bits.truncate(length);
        tracing::trace!(length, "created bit matrix");
        Ok(Self { bits })
    }

    /// Create a bit matrix holding `bits` in order.
    pub fn from_bools<I>(bits: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        Self {
            bits: bits.into_iter().collect(),
        }
    }

    /// Number of bits.
    #[inline]
    pub fn size(&self) -> i64 {
        self.bits.len() as i64
    }

    /// Number of true bits.
    pub fn cardinality(&self) -> i64 {
        self.bits.count_ones() as i64
    }

    /// True if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    #[inline]
    fn check(&self, index: i64) -> Result<usize> {
        let index = Axis::identity(self.size()).index(index)?;
        Ok(index as usize)
    }

    pub fn get(&self, index: i64) -> Result<bool> {
        let index = self.check(index)?;
        Ok(self.bits[index])
    }

    /// Unchecked variant of [`BitMatrix1D::get`]; `index` must be in bounds.
    ///
    /// Out-of-bounds reads trip a debug assertion and otherwise return false.
    #[inline]
    pub fn get_quick(&self, index: i64) -> bool {
        debug_assert!(0 <= index && index < self.size(), "bit index {index} out of bounds");
        usize::try_from(index)
            .ok()
            .and_then(|i| self.bits.get(i))
            .is_some_and(|bit| *bit)
    }

    pub fn set(&mut self, index: i64, value: bool) -> Result<()> {
        let index = self.check(index)?;
        self.bits.set(index, value);
        Ok(())
    }

    /// Unchecked variant of [`BitMatrix1D::set`]; `index` must be in bounds.
    ///
    /// Out-of-bounds writes trip a debug assertion and are otherwise dropped.
    #[inline]
    pub fn set_quick(&mut self, index: i64, value: bool) {
        debug_assert!(0 <= index && index < self.size(), "bit index {index} out of bounds");
        if let Some(mut bit) = usize::try_from(index)
            .ok()
            .and_then(|i| self.bits.get_mut(i))
        {
            *bit = value;
        }
    }

    /// Invert the bit at `index`.
    pub fn flip(&mut self, index: i64) -> Result<()> {
        let index = self.check(index)?;
        let bit = self.bits[index];
        self.bits.set(index, !bit);
        Ok(())
    }

    /// Invert every bit.
    pub fn flip_all(&mut self) {
        let bits = std::mem::take(&mut self.bits);
        self.bits = !bits;
    }

    /// Set every bit to false.
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Set every bit to `value`.
    pub fn assign(&mut self, value: bool) {
        self.bits.fill(value);
    }

    fn ensure_same_length(&self, other: &BitMatrix1D) -> Result<()> {
        let (expected, found) = (self.size(), other.size());
        if expected == found {
            return Ok(());
        }
        tracing::debug!(expected, found, "bit matrix length mismatch");
        Err(MatrixError::SizeMismatch { expected, found })
    }

    /// Combine whole words. Bits past the length may end up with any value,
    /// which `BitVec` never observes.
    fn combine(&mut self, other: &BitMatrix1D, op: impl Fn(u64, u64) -> u64) -> Result<()> {
        self.ensure_same_length(other)?;
        let rhs = other.bits.as_raw_slice();
        for (a, &b) in self.bits.as_raw_mut_slice().iter_mut().zip(rhs) {
            *a = op(*a, b);
        }
        Ok(())
    }

    /// `self &= other`.
    pub fn and(&mut self, other: &BitMatrix1D) -> Result<()> {
        self.combine(other, |a, b| a & b)
    }

    /// `self |= other`.
    pub fn or(&mut self, other: &BitMatrix1D) -> Result<()> {
        self.combine(other, |a, b| a | b)
    }

    /// `self ^= other`.
    pub fn xor(&mut self, other: &BitMatrix1D) -> Result<()> {
        self.combine(other, |a, b| a ^ b)
    }

    /// `self &= !other`: clear every bit that is set in `other`.
    pub fn and_not(&mut self, other: &BitMatrix1D) -> Result<()> {
        self.combine(other, |a, b| a & !b)
    }

    /// True if some bit is set in both `self` and `other`.
    pub fn intersects(&self, other: &BitMatrix1D) -> Result<bool> {
        self.ensure_same_length(other)?;
        Ok(self.bits.iter_ones().any(|i| other.bits[i]))
    }

    /// Every bit in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Indices of the true bits, ascending.
    pub fn iter_ones(&self) -> impl Iterator<Item = i64> + '_ {
        self.bits.iter_ones().map(|i| i as i64)
    }
}

impl FromIterator<bool> for BitMatrix1D {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::from_bools(iter)
    }
}

impl fmt::Debug for BitMatrix1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 128;
        let mut bits: String = self
            .iter()
            .take(SHOWN)
            .map(|b| if b { '1' } else { '0' })
            .collect();
        if self.bits.len() > SHOWN {
            bits.push_str("...");
        }
        f.debug_struct("BitMatrix1D")
            .field("length", &self.size())
            .field("cardinality", &self.cardinality())
            .field("bits", &bits)
            .finish()
    }
}
