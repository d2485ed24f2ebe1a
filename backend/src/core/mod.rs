//! Core primitives: the fixed slot grid

pub mod slots;

pub use slots::{SlotGrid, SlotId};
