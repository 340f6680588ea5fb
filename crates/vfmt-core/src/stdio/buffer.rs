//! Growable output buffer.
//!
//! A formatting call accumulates its whole rendering here and hands it to the
//! destination in one bulk write.
//!
//! Invariants:
//! - `len() <= capacity()` at all times
//! - bytes `[0, len())` are exactly the appended sequences, in order
//! - a failed append or grow leaves the buffer unchanged
//!
//! Growth doubles the logical capacity and adds the pending request on top
//! (`2 * capacity + extra`), so one oversized append cannot outrun doubling.
//! An optional limit caps the logical capacity; growth that cannot fit under
//! it fails the same way an allocator refusal does.

use std::io::Write;

use crate::error::FormatError;

/// Owned, growable byte buffer with an explicit capacity/length pair.
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
    /// Logical capacity. The allocation behind `data` may be larger.
    capacity: usize,
    limit: Option<usize>,
}

impl OutputBuffer {
    /// Allocate a buffer with `initial_capacity` bytes of room.
    pub fn create(initial_capacity: usize) -> Result<Self, FormatError> {
        Self::with_limit(initial_capacity, None)
    }

    /// Allocate a buffer whose capacity may never exceed `limit`.
    pub fn with_limit(initial_capacity: usize, limit: Option<usize>) -> Result<Self, FormatError> {
        if limit.is_some_and(|max| initial_capacity > max) {
            return Err(FormatError::Allocation {
                requested: initial_capacity,
            });
        }
        let mut data = Vec::new();
        data.try_reserve_exact(initial_capacity)
            .map_err(|_| FormatError::Allocation {
                requested: initial_capacity,
            })?;
        Ok(Self {
            data,
            capacity: initial_capacity,
            limit,
        })
    }

    /// Number of valid bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Growth ceiling in bytes, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// The valid bytes `[0, len())`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Append `bytes`, growing first if they do not fit.
    ///
    /// Either every byte is appended or the buffer is left untouched.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        if self.data.len() + bytes.len() > self.capacity {
            self.grow(bytes.len())?;
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Append a single byte.
    pub fn push(&mut self, byte: u8) -> Result<(), FormatError> {
        self.append(&[byte])
    }

    /// Grow the logical capacity to `2 * capacity + extra`, clamped to the
    /// limit when one is set. Existing content is preserved.
    pub fn grow(&mut self, extra: usize) -> Result<(), FormatError> {
        let needed = self.data.len().checked_add(extra);
        let doubled = self
            .capacity
            .checked_mul(2)
            .and_then(|c| c.checked_add(extra));
        let (Some(needed), Some(doubled)) = (needed, doubled) else {
            return Err(FormatError::Allocation {
                requested: usize::MAX,
            });
        };

        let target = match self.limit {
            Some(max) => doubled.min(max),
            None => doubled,
        };
        if target < needed {
            return Err(FormatError::Allocation { requested: doubled });
        }

        self.data
            .try_reserve_exact(target - self.data.len())
            .map_err(|_| FormatError::Allocation { requested: target })?;
        self.capacity = target;
        Ok(())
    }

    /// Write every valid byte to `dest` in one bulk operation, then reset the
    /// length to zero. Capacity is retained.
    ///
    /// Returns the number of bytes written. On a write failure the content
    /// is kept and the error is returned; nothing is retried.
    pub fn flush<W: Write + ?Sized>(&mut self, dest: &mut W) -> Result<usize, FormatError> {
        let written = self.data.len();
        dest.write_all(&self.data)?;
        dest.flush()?;
        self.data.clear();
        Ok(written)
    }

    /// Release the buffer's memory.
    ///
    /// Dropping the buffer has the same effect; this exists so call sites can
    /// make the end of the buffer's lifetime explicit.
    pub fn release(self) {
        drop(self);
    }
}
