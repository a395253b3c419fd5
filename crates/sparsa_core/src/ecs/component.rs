//! # Component System
//!
//! Components are plain data stored by value in a pool's dense array.
//! Any `Clone + Debug + 'static` type qualifies; the bounds exist so pools can
//! hand out diagnostic snapshots.
//!
//! When a pool grows, the new slots must hold *some* value before they go
//! live. A [`SlotFill`] strategy, chosen when the pool is created, produces it.

use std::fmt;

use bytemuck::Zeroable;

/// Marker trait for storable components.
pub trait Component: Clone + fmt::Debug + 'static {}

impl<T: Clone + fmt::Debug + 'static> Component for T {}

/// Produces values for freshly allocated component slots.
///
/// Only called on growth, never on the add/remove hot path.
pub trait SlotFill<T> {
    /// Returns the value for one new slot.
    fn fill(&mut self) -> T;
}

/// Fills with `T::default()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFill;

impl<T: Default> SlotFill<T> for DefaultFill {
    #[inline]
    fn fill(&mut self) -> T {
        T::default()
    }
}

/// Fills with all-zero bytes; the cheap path for plain value types.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroFill;

impl<T: Zeroable> SlotFill<T> for ZeroFill {
    #[inline]
    fn fill(&mut self) -> T {
        T::zeroed()
    }
}

/// Fills by calling a factory, for types that need real construction
/// (e.g. a pre-sized buffer that later adds will reuse).
pub struct FactoryFill<F>(pub F);

impl<T, F: FnMut() -> T> SlotFill<T> for FactoryFill<F> {
    #[inline]
    fn fill(&mut self) -> T {
        (self.0)()
    }
}

impl<F> fmt::Debug for FactoryFill<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FactoryFill")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Zeroable)]
    #[repr(C)]
    struct Velocity {
        x: f32,
        y: f32,
    }

    #[test]
    fn test_zero_fill() {
        let v: Velocity = ZeroFill.fill();
        assert_eq!(v, Velocity { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_default_fill() {
        let s: String = DefaultFill.fill();
        assert!(s.is_empty());
    }

    #[test]
    fn test_factory_fill_is_called_each_time() {
        let mut made = 0;
        let mut fill = FactoryFill(|| {
            made += 1;
            Vec::<u8>::with_capacity(16)
        });
        let a = fill.fill();
        let b = fill.fill();
        drop(fill);
        assert_eq!(made, 2);
        assert!(a.capacity() >= 16 && b.capacity() >= 16);
    }
}
