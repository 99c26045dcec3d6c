//! Contiguous arena blocks with bump allocation.

use std::alloc::Layout;
use std::ptr::NonNull;

use crate::error::ArenaError;
use crate::raw::RawBuffer;

/// A single contiguous memory block with bump allocation.
///
/// Blocks are the fundamental storage unit of the arena. Each block owns
/// one fixed-size buffer and a cursor that advances on each allocation.
/// Blocks are never resized or freed while the arena is alive.
pub struct Block {
    /// Backing storage. Allocated to full capacity at creation.
    buffer: RawBuffer,
    /// Bump pointer: next free byte offset.
    used: usize,
}

impl Block {
    /// Minimum alignment of every block's base address.
    pub const BASE_ALIGN: usize = 16;

    /// Create a new block of `capacity` bytes whose base is aligned to at
    /// least `align` (and never less than [`Block::BASE_ALIGN`]).
    pub fn new(capacity: usize, align: usize) -> Result<Self, ArenaError> {
        Ok(Self {
            buffer: RawBuffer::new(capacity, align.max(Self::BASE_ALIGN))?,
            used: 0,
        })
    }

    /// Bump-allocate memory for `layout` from this block.
    ///
    /// Returns `None` if the remaining capacity (after alignment padding)
    /// is insufficient. The returned memory is uninitialised.
    pub fn alloc(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        let cursor = self.buffer.addr().checked_add(self.used)?;
        let aligned = cursor.checked_next_multiple_of(layout.align())?;
        let offset = aligned - self.buffer.addr();
        let end = offset.checked_add(layout.size())?;
        if end > self.buffer.len() {
            return None;
        }
        self.used = end;
        Some(self.buffer.at(offset))
    }

    /// Whether `ptr` points into this block's buffer.
    pub fn contains(&self, ptr: NonNull<u8>) -> bool {
        let addr = ptr.as_ptr() as usize;
        addr >= self.buffer.addr() && addr < self.buffer.addr() + self.buffer.len()
    }

    /// Number of bytes consumed, alignment padding included.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Remaining free capacity in bytes, ignoring alignment.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.used
    }
}
