//! # Memory Layout
//!
//! The three building blocks every component pool is made of.
//!
//! ## Design Philosophy
//!
//! - Nothing reallocates implicitly: the pool decides every growth step
//! - Slots are recycled, never dropped, until capacity shrinks
//! - Index types everywhere, so relocation is an integer update

mod bitset;
mod link;
mod packed;

pub use bitset::{PresenceBitset, BLOCK_BITS};
pub use link::EntityLink;
pub use packed::PackedArray;
