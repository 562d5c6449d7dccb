//! Fixed-size bit storage shared by concurrent inserters and readers
//!
//! Bits live in packed `AtomicU64` words. `set` is a single `fetch_or` on the
//! owning word, so concurrent writers to neighbouring bits of the same word
//! never lose each other's update, and readers never observe a torn word.
//!
//! INVARIANTS:
//! - Every bit starts at 0
//! - While a filter is live, bits only go from 0 to 1

use std::sync::atomic::{AtomicU64, Ordering};

use bitvec::prelude::*;

use crate::error::FilterError;

const WORD_BITS: usize = u64::BITS as usize;

/// Packed, atomically updated bit array of fixed length
#[derive(Debug)]
pub struct BitField {
    words: Box<[AtomicU64]>,
    len: usize,
}

impl BitField {
    /// Create a zeroed bit field of `len` bits
    ///
    /// A zero-length field is rejected.
    pub fn new(len: usize) -> Result<Self, FilterError> {
        if len == 0 {
            return Err(FilterError::InvalidParameters(
                "bit field length cannot be 0".to_string(),
            ));
        }
        let word_count = len.div_ceil(WORD_BITS);
        let words: Box<[AtomicU64]> = (0..word_count).map(|_| AtomicU64::new(0)).collect();

        Ok(Self { words, len })
    }

    /// Number of addressable bits
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: construction rejects empty fields
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set the bit at `index`
    ///
    /// Idempotent. Returns `true` if this call flipped the bit from 0 to 1.
    pub fn set(&self, index: usize) -> Result<bool, FilterError> {
        let (word, mask) = self.locate(index)?;
        let previous = self.words[word].fetch_or(mask, Ordering::AcqRel);
        Ok(previous & mask == 0)
    }

    /// Test the bit at `index`
    pub fn test(&self, index: usize) -> Result<bool, FilterError> {
        let (word, mask) = self.locate(index)?;
        Ok(self.words[word].load(Ordering::Acquire) & mask != 0)
    }

    /// Reset every bit to 0
    ///
    /// Only meant for a field that is not yet (or no longer) shared.
    pub fn clear(&self) {
        for word in self.words.iter() {
            word.store(0, Ordering::Release);
        }
    }

    /// Number of bits currently set
    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Acquire).count_ones() as usize)
            .sum()
    }

    /// Copy the current contents into an owned bit vector
    ///
    /// Each word is read atomically; the copy as a whole is not a single
    /// atomic snapshot while writers are active.
    pub fn snapshot(&self) -> BitVec<u64, Lsb0> {
        let raw: Vec<u64> = self
            .words
            .iter()
            .map(|w| w.load(Ordering::Acquire))
            .collect();
        let mut bits = BitVec::<u64, Lsb0>::from_vec(raw);
        bits.truncate(self.len);
        bits
    }

    /// Heap bytes used by the packed words
    pub fn memory_size_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<AtomicU64>()
    }

    fn locate(&self, index: usize) -> Result<(usize, u64), FilterError> {
        if index >= self.len {
            return Err(FilterError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok((index / WORD_BITS, 1u64 << (index % WORD_BITS)))
    }
}
