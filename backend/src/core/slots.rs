//! The slot grid: a fixed, totally ordered sequence of schedulable time slots.
//!
//! Slots are generated once at startup and never mutated or destroyed.
//! Their order defines "earliness", which the driver's percentile bands
//! are built on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one schedulable time slot.
///
/// A slot id is composed of two numeric components (hour and minute
/// offset). Ordering is chronological: hour first, then minute.
///
/// # Example
/// ```
/// use slot_allocator_core_rs::SlotId;
///
/// let a = SlotId::new(9, 50);
/// let b = SlotId::new(10, 0);
/// assert!(a < b);
/// assert_eq!(a.to_string(), "9:50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId {
    /// Hour component (24h clock)
    pub hour: u32,
    /// Minute offset within the hour
    pub minute: u32,
}

impl SlotId {
    /// Create a slot id from its two components
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Sum of the id's numeric components, used by the resolver tie-break.
    ///
    /// The components are summed without normalizing which one is the
    /// hour: `10:30` and `30:10` yield the same value. The tie-break
    /// depends on this exact behavior, so it must not be "fixed".
    pub fn component_sum(&self) -> u32 {
        self.hour + self.minute
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

/// Fixed ordered sequence of slots, created once at startup.
///
/// # Example
/// ```
/// use slot_allocator_core_rs::SlotGrid;
///
/// let grid = SlotGrid::generate(9, 12, 10); // 9:00 .. 11:50, every 10 min
/// assert_eq!(grid.len(), 18);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrid {
    slots: Vec<SlotId>,
}

impl SlotGrid {
    /// Generate a grid covering `[open_hour, close_hour)` with one slot
    /// every `step_minutes`.
    ///
    /// # Panics
    /// Panics if the window is empty or the step does not fit an hour.
    pub fn generate(open_hour: u32, close_hour: u32, step_minutes: u32) -> Self {
        assert!(open_hour < close_hour, "open_hour must be before close_hour");
        assert!(
            step_minutes > 0 && step_minutes <= 60,
            "step_minutes must be in 1..=60"
        );

        let mut slots = Vec::new();
        for hour in open_hour..close_hour {
            let mut minute = 0;
            while minute < 60 {
                slots.push(SlotId::new(hour, minute));
                minute += step_minutes;
            }
        }
        Self { slots }
    }

    /// Build a grid from an externally supplied slot sequence.
    ///
    /// The sequence is taken as-is; its order is the grid's time order.
    ///
    /// # Panics
    /// Panics if the sequence is empty.
    pub fn from_slots(slots: Vec<SlotId>) -> Self {
        assert!(!slots.is_empty(), "slot sequence must not be empty");
        Self { slots }
    }

    /// Number of slots in the grid
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid is empty (never true for a constructed grid)
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `slot` belongs to the grid
    pub fn contains(&self, slot: SlotId) -> bool {
        self.slots.contains(&slot)
    }

    /// Iterate slots in time order
    pub fn iter(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.iter().copied()
    }

    /// All slots in time order
    pub fn slots(&self) -> &[SlotId] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_time_ordered() {
        let grid = SlotGrid::generate(8, 10, 15);
        let slots: Vec<SlotId> = grid.iter().collect();

        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0], SlotId::new(8, 0));
        assert_eq!(slots[7], SlotId::new(9, 45));
        for pair in slots.windows(2) {
            assert!(pair[0] < pair[1], "grid must be strictly increasing");
        }
    }

    #[test]
    fn test_component_sum_is_unnormalized() {
        assert_eq!(SlotId::new(10, 30).component_sum(), 40);
        // Swapped components collide on purpose.
        assert_eq!(SlotId::new(30, 10).component_sum(), 40);
    }

    #[test]
    fn test_display_pads_minutes() {
        assert_eq!(SlotId::new(9, 0).to_string(), "9:00");
        assert_eq!(SlotId::new(14, 5).to_string(), "14:05");
    }

    #[test]
    #[should_panic(expected = "open_hour must be before close_hour")]
    fn test_empty_window_panics() {
        SlotGrid::generate(10, 10, 10);
    }

    #[test]
    #[should_panic(expected = "step_minutes must be in 1..=60")]
    fn test_zero_step_panics() {
        SlotGrid::generate(9, 10, 0);
    }
}
