//! # Presence Bitset
//!
//! Membership set over entity ids, 64 ids per block.
//!
//! ## Performance
//!
//! - Insert / remove / contains: O(1) - single bit operation
//! - Clear: O(n/64)
//! - Grow: O(n/64), only when new blocks are needed

use crate::contract;
use crate::error::ContractViolation;

/// Bits per backing block.
pub const BLOCK_BITS: usize = 64;

/// Growable bit vector recording which ids a pool holds.
///
/// Inserting a present id or removing an absent one is a contract violation:
/// a bitset that disagrees with its link table means the pool is already
/// corrupt.
#[derive(Clone, Debug, Default)]
pub struct PresenceBitset {
    /// 1 = present, 0 = absent. 64 ids per u64.
    blocks: Vec<u64>,
}

impl PresenceBitset {
    /// Creates a bitset covering at least ids `[0, capacity)`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: vec![0; Self::blocks_for(capacity)],
        }
    }

    #[inline]
    const fn blocks_for(capacity: usize) -> usize {
        capacity / BLOCK_BITS + 1
    }

    #[inline]
    const fn locate(id: usize) -> (usize, u64) {
        (id / BLOCK_BITS, 1u64 << (id % BLOCK_BITS))
    }

    /// Number of ids currently covered.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.blocks.len() * BLOCK_BITS
    }

    /// Whether `id` is present. Only defined for `id < capacity()`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is outside the covered range.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: usize) -> bool {
        contract!(
            id < self.capacity(),
            ContractViolation::BitOutOfRange { index: id, capacity: self.capacity() }
        );
        let (block, mask) = Self::locate(id);
        self.blocks[block] & mask != 0
    }

    /// Marks `id` present.
    ///
    /// # Panics
    ///
    /// Contract violation if `id` is already present.
    #[inline]
    pub fn insert(&mut self, id: usize) {
        contract!(!self.contains(id), ContractViolation::BitAlreadySet(id));
        let (block, mask) = Self::locate(id);
        self.blocks[block] |= mask;
    }

    /// Marks `id` absent.
    ///
    /// # Panics
    ///
    /// Contract violation if `id` is not present.
    #[inline]
    pub fn remove(&mut self, id: usize) {
        contract!(self.contains(id), ContractViolation::BitNotSet(id));
        let (block, mask) = Self::locate(id);
        self.blocks[block] &= !mask;
    }

    /// Extends coverage to at least `[0, new_capacity)`, preserving every bit.
    ///
    /// Growth that would not add a block is a no-op and logs a warning.
    pub fn grow_capacity(&mut self, new_capacity: usize) {
        let wanted = Self::blocks_for(new_capacity);
        if wanted <= self.blocks.len() {
            tracing::warn!(
                new_capacity,
                covered = self.capacity(),
                "bitset growth adds no blocks"
            );
            return;
        }
        self.blocks.resize(wanted, 0);
    }

    /// Clears every bit, keeping the allocation.
    pub fn clear(&mut self) {
        self.blocks.fill(0);
    }

    /// Raw block `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not an allocated block.
    #[inline]
    #[must_use]
    pub fn block(&self, n: usize) -> u64 {
        contract!(
            n < self.blocks.len(),
            ContractViolation::BitOutOfRange { index: n * BLOCK_BITS, capacity: self.capacity() }
        );
        self.blocks[n]
    }

    /// Number of ids present.
    #[must_use]
    pub fn count(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterates present ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().enumerate().flat_map(|(n, &block)| {
            let mut bits = block;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let offset = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(n * BLOCK_BITS + offset)
            })
        })
    }
}
