//! # Packed Array
//!
//! A contiguous store with an explicit capacity and a logical length.
//!
//! Unlike `Vec`, the array never grows on its own: every slot up to the
//! capacity is initialized at allocation time, and the caller decides when
//! and by how much to grow. Slots past the logical length keep whatever
//! value they last held and are never read through the public API.

use std::ops::{Index, IndexMut};

use crate::contract;
use crate::diagnostics::warn_if_thrashing;
use crate::error::ContractViolation;

/// Growable array with caller-controlled capacity.
///
/// # Example
///
/// ```rust,ignore
/// let mut array: PackedArray<u32> = PackedArray::new(4);
/// array.push(7);
/// array.increase_capacity(8);
/// assert_eq!(array.as_slice(), &[7]);
/// ```
#[derive(Clone, Debug)]
pub struct PackedArray<T> {
    /// Every allocated slot; `slots.len()` is the capacity.
    slots: Vec<T>,
    /// Logical length.
    len: usize,
}

impl<T: Default> PackedArray<T> {
    /// Allocates exactly `capacity` default-valued slots with length 0.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_fill(capacity, T::default)
    }

    /// Grows to exactly `new_capacity`, filling new slots with `T::default()`.
    ///
    /// # Panics
    ///
    /// Contract violation if `new_capacity` is not above the current capacity.
    pub fn increase_capacity(&mut self, new_capacity: usize) {
        self.increase_capacity_with(new_capacity, T::default);
    }
}

impl<T> PackedArray<T> {
    /// Allocates exactly `capacity` slots produced by `fill`, with length 0.
    #[must_use]
    pub fn with_fill(capacity: usize, fill: impl FnMut() -> T) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.extend(std::iter::repeat_with(fill).take(capacity));
        Self { slots, len: 0 }
    }

    /// Number of allocated slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Logical length.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the logical length is zero.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every allocated slot is in use.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// The live prefix.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.slots[..self.len]
    }

    /// The live prefix, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots[..self.len]
    }

    /// Live element at `index`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Iterates the live prefix.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Writes `value` into the next free slot.
    ///
    /// # Panics
    ///
    /// Panics if the array is full.
    #[inline]
    pub fn push(&mut self, value: T) {
        *self.claim() = value;
    }

    /// Extends the length by one and returns the newly live slot, which still
    /// holds whatever value it was last given.
    ///
    /// # Panics
    ///
    /// Panics if the array is full.
    #[inline]
    pub fn claim(&mut self) -> &mut T {
        let capacity = self.slots.len();
        if self.len >= capacity {
            crate::diagnostics::violated(ContractViolation::ArrayFull(capacity));
        }
        self.len += 1;
        &mut self.slots[self.len - 1]
    }

    /// Moves the last live element into `index` and shortens the length by one.
    ///
    /// The removed value is kept in the slot just past the new length rather
    /// than dropped, so it can be recycled by the next [`claim`](Self::claim).
    ///
    /// # Panics
    ///
    /// Contract violation if `index` is not live.
    #[inline]
    pub fn swap_remove(&mut self, index: usize) {
        contract!(
            index < self.len,
            ContractViolation::IndexOutOfRange { index, len: self.len }
        );
        self.len -= 1;
        self.slots.swap(index, self.len);
    }

    /// Sets the length to 0 without touching storage.
    #[inline]
    pub fn reset_length(&mut self) {
        self.len = 0;
    }

    /// Overwrites every slot past the length with `value` and marks the whole
    /// capacity live.
    pub fn fill_remaining(&mut self, value: T)
    where
        T: Clone,
    {
        self.slots[self.len..].fill(value);
        self.len = self.slots.len();
    }

    /// Grows to exactly `new_capacity`, filling new slots from `fill`.
    ///
    /// # Panics
    ///
    /// Contract violation if `new_capacity` is not above the current capacity.
    pub fn increase_capacity_with(&mut self, new_capacity: usize, fill: impl FnMut() -> T) {
        let current = self.slots.len();
        contract!(
            new_capacity > current,
            ContractViolation::CapacityNotIncreased { current, requested: new_capacity }
        );
        warn_if_thrashing(current, new_capacity);

        let additional = new_capacity.saturating_sub(current);
        self.slots.reserve_exact(additional);
        self.slots.extend(std::iter::repeat_with(fill).take(additional));
    }

    /// Shrinks to exactly `target` slots, keeping the first `target`.
    ///
    /// # Panics
    ///
    /// Contract violation if `target` is below the length or above the capacity.
    pub fn reduce_capacity(&mut self, target: usize) {
        let current = self.slots.len();
        contract!(
            target >= self.len,
            ContractViolation::CapacityBelowLength { len: self.len, requested: target }
        );
        contract!(
            target <= current,
            ContractViolation::CapacityNotReduced { current, requested: target }
        );
        if target >= current {
            return;
        }
        warn_if_thrashing(current, target);

        self.slots.truncate(target);
        self.slots.shrink_to_fit();
        self.len = self.len.min(target);
    }

    /// Copies the live prefix into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }
}

impl<T> Index<usize> for PackedArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        contract!(
            index < self.len,
            ContractViolation::IndexOutOfRange { index, len: self.len }
        );
        &self.slots[index]
    }
}

impl<T> IndexMut<usize> for PackedArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        contract!(
            index < self.len,
            ContractViolation::IndexOutOfRange { index, len: self.len }
        );
        &mut self.slots[index]
    }
}
