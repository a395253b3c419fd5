//! # Entity Index Link
//!
//! The sparse half of a sparse set: entity id → dense index.

use super::packed::PackedArray;
use crate::contract;
use crate::error::ContractViolation;

/// Entity id → position in a pool's dense arrays.
///
/// Every slot up to the capacity is live; an id with no mapping holds
/// [`EntityLink::ABSENT`].
#[derive(Clone, Debug)]
pub struct EntityLink {
    slots: PackedArray<u32>,
}

impl EntityLink {
    /// Sentinel for "no dense index".
    pub const ABSENT: u32 = u32::MAX;

    /// Creates a link table covering ids `[0, capacity)`, all absent.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let mut slots = PackedArray::with_fill(capacity, || Self::ABSENT);
        slots.fill_remaining(Self::ABSENT);
        Self { slots }
    }

    /// Number of ids covered.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Dense index for `id`, or `None` if absent or out of range.
    #[inline]
    #[must_use]
    pub fn dense_index(&self, id: usize) -> Option<usize> {
        match self.slots.get(id) {
            Some(&index) if index != Self::ABSENT => Some(index as usize),
            _ => None,
        }
    }

    /// Raw slot value for `id` (`ABSENT` when unmapped).
    #[inline]
    #[must_use]
    pub fn raw(&self, id: usize) -> u32 {
        self.slots[id]
    }

    /// Maps `id` to `index`.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn set(&mut self, id: usize, index: usize) {
        contract!(
            index < Self::ABSENT as usize,
            ContractViolation::IndexOutOfRange { index, len: Self::ABSENT as usize }
        );
        self.slots[id] = index as u32;
    }

    /// Unmaps `id`.
    #[inline]
    pub fn clear(&mut self, id: usize) {
        self.slots[id] = Self::ABSENT;
    }

    /// Extends coverage to exactly `desired` ids; new ids are absent.
    ///
    /// # Panics
    ///
    /// Contract violation if `desired` is below the current capacity.
    pub fn grow(&mut self, desired: usize) {
        let current = self.capacity();
        contract!(
            desired >= current,
            ContractViolation::CapacityNotIncreased { current, requested: desired }
        );
        if desired <= current {
            return;
        }
        self.slots.increase_capacity_with(desired, || Self::ABSENT);
        self.slots.fill_remaining(Self::ABSENT);
    }

    /// Unmaps every covered id without shrinking.
    pub fn reset(&mut self) {
        self.slots.reset_length();
        self.slots.fill_remaining(Self::ABSENT);
    }
}
