//! Contains the declaration of [`PartIndexBuilder`]
use crate::error::{GeometryBufferError, Result};
use crate::options::{DEFAULT_PARTS, GROW_INDICES};
use crate::util::grown_len;

/// Slot value marking that no parts follow.
pub const TERMINATOR: i16 = -1;

/// Slot value of an empty part. Between polygon rings it marks the end of a polygon.
pub const SPACER: i16 = 0;

/// A growable array of 16-bit part run-lengths, counted in floats.
///
/// It is guaranteed that:
/// * the slot at [`position`](Self::position) is the part currently being accumulated
/// * the slot after it holds [`TERMINATOR`] whenever the storage has room for it
///
/// The backing vector is always fully initialized. Growth copies the written slots into a larger
/// allocation and never shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartIndexBuilder {
    slots: Vec<i16>,
    pos: usize,
    growth_margin: usize,
}

impl Default for PartIndexBuilder {
    #[inline]
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PARTS)
    }
}

impl PartIndexBuilder {
    /// Returns a new [`PartIndexBuilder`] holding at least one slot.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(vec![SPACER; capacity.max(1)])
    }

    /// Wrap existing backing storage. An empty vector falls back to the default capacity.
    pub fn from_vec(slots: Vec<i16>) -> Self {
        let slots = if slots.is_empty() {
            vec![SPACER; DEFAULT_PARTS]
        } else {
            slots
        };
        let mut builder = Self {
            slots,
            pos: 0,
            growth_margin: GROW_INDICES,
        };
        builder.reset();
        builder
    }

    /// Set the number of slots added on top of the required size when growing.
    pub fn with_growth_margin(mut self, growth_margin: usize) -> Self {
        self.growth_margin = growth_margin;
        self
    }

    /// Returns the number of slots available without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the slot of the currently open part.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the run-length, in floats, of the currently open part.
    #[inline]
    pub fn current(&self) -> i16 {
        self.slots[self.pos]
    }

    /// Make room for at least `num_slots` slots, preserving written content.
    pub fn ensure_capacity(&mut self, num_slots: usize) {
        let current = self.slots.len();
        if let Some(new_len) = grown_len(current, num_slots, self.growth_margin, false) {
            tracing::trace!(from = current, to = new_len, "growing part index");
            self.slots.resize(new_len, SPACER);
        }
    }

    /// Extends the open part by `floats`.
    /// # Error
    /// This function errors iff the new run-length is larger than what `i16` supports.
    #[inline]
    pub fn try_extend_current(&mut self, floats: i16) -> Result<()> {
        let slot = &mut self.slots[self.pos];
        *slot = slot.checked_add(floats).ok_or(GeometryBufferError::Overflow)?;
        Ok(())
    }

    /// Extends the open part by `floats`, saturating at `i16::MAX`.
    #[inline]
    pub fn saturating_extend_current(&mut self, floats: i16) {
        let slot = &mut self.slots[self.pos];
        *slot = slot.saturating_add(floats);
    }

    /// Empties the open part without moving to another slot.
    #[inline]
    pub fn reset_current(&mut self) {
        self.slots[self.pos] = SPACER;
    }

    /// Moves to the next slot and writes `value` into it, growing if needed.
    #[inline]
    pub fn push(&mut self, value: i16) {
        self.pos += 1;
        self.ensure_capacity(self.pos + 1);
        self.slots[self.pos] = value;
    }

    /// Writes the terminator after the open part, if the storage has room for it.
    #[inline]
    pub fn terminate(&mut self) {
        if let Some(slot) = self.slots.get_mut(self.pos + 1) {
            *slot = TERMINATOR;
        }
    }

    /// Returns to a single empty part at slot zero, keeping the allocation.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.slots[0] = SPACER;
        self.terminate();
    }

    /// The written slots, up to and including the terminator when it fits.
    #[inline]
    pub fn as_slice(&self) -> &[i16] {
        let end = (self.pos + 2).min(self.slots.len());
        &self.slots[..end]
    }

    /// The whole backing storage, including slots past the terminator.
    #[inline]
    pub fn raw(&self) -> &[i16] {
        &self.slots
    }
}
