//! The append-only linear arena.

use std::alloc::{handle_alloc_error, Layout};
use std::ptr::NonNull;

use crate::block::Block;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::raw;
use crate::traits::MemoryArena;

/// A growable list of [`Block`]s with overflow-based bump allocation.
///
/// Allocation bumps the most recent block. When it can't satisfy a
/// request, a new block sized `max(block_size, request)` is appended and
/// the request is served from it; the tail of the previous block is left
/// unused. Blocks are never moved, so every pointer handed out stays
/// valid until the arena is dropped.
///
/// [`MemoryArena::free`] is a no-op: memory is only released when the
/// whole arena is dropped. Values written with
/// [`LinearArena::alloc_value`] are not dropped by the arena; owners that
/// need destructors must run them before the arena goes away.
pub struct LinearArena {
    blocks: Vec<Block>,
    config: ArenaConfig,
}

impl LinearArena {
    /// Create an empty arena. The first block is allocated lazily.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            blocks: Vec::new(),
            config,
        })
    }

    /// Bump-allocate memory for `layout`, growing into a new block if needed.
    ///
    /// Returns `Err(ArenaError::CapacityExceeded)` if `max_blocks` would be
    /// exceeded and `Err(ArenaError::AllocationFailed)` if the global
    /// allocator refuses a new block.
    pub fn try_allocate(&mut self, layout: Layout) -> Result<NonNull<u8>, ArenaError> {
        // Try the current block first.
        if let Some(ptr) = self.blocks.last_mut().and_then(|block| block.alloc(layout)) {
            return Ok(ptr);
        }

        // Current block is full.
        if self.blocks.len() >= self.config.max_blocks as usize {
            return Err(ArenaError::CapacityExceeded {
                requested: layout.size(),
                capacity: self.capacity_bytes(),
            });
        }

        let size = self.config.block_size.max(layout.size());
        let mut block = Block::new(size, layout.align())?;
        let ptr = block
            .alloc(layout)
            .ok_or(ArenaError::CapacityExceeded {
                requested: layout.size(),
                capacity: size,
            })?;
        self.blocks.push(block);
        tracing::debug!(
            block_size = size,
            blocks = self.blocks.len(),
            "reflection arena grew"
        );
        Ok(ptr)
    }

    /// Move `value` into the arena and return a pointer to it.
    ///
    /// The pointer is valid for reads and writes until the arena is
    /// dropped. The arena never drops `value`.
    pub fn alloc_value<T>(&mut self, value: T) -> NonNull<T> {
        let ptr = self.allocate_for::<T>();
        // SAFETY: `ptr` is freshly allocated, aligned, and sized for `T`.
        unsafe { ptr.as_ptr().write(value) };
        ptr
    }

    /// Whether `ptr` points into memory owned by this arena.
    pub fn contains(&self, ptr: NonNull<u8>) -> bool {
        self.blocks.iter().any(|block| block.contains(ptr))
    }

    /// The configuration this arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Total number of blocks currently allocated.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total bytes consumed across all blocks, padding included.
    pub fn used_bytes(&self) -> usize {
        self.blocks.iter().map(|b| b.used()).sum()
    }

    /// Total bytes reserved across all blocks.
    pub fn capacity_bytes(&self) -> usize {
        self.blocks.iter().map(|b| b.capacity()).sum()
    }
}

impl Default for LinearArena {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            config: ArenaConfig::default(),
        }
    }
}

impl MemoryArena for LinearArena {
    fn allocate(&mut self, layout: Layout) -> NonNull<u8> {
        match self.try_allocate(layout) {
            Ok(ptr) => ptr,
            Err(err) => {
                tracing::error!(%err, "reflection arena exhausted");
                handle_alloc_error(layout)
            }
        }
    }

    unsafe fn free(&mut self, _ptr: NonNull<u8>, _layout: Layout) {}

    unsafe fn reallocate(&mut self, ptr: NonNull<u8>, old: Layout, new: Layout) -> NonNull<u8> {
        // Old allocations stay valid, so the contents can be carried over.
        let fresh = self.allocate(new);
        // SAFETY: `ptr` is a live allocation of `old.size()` bytes from this
        // arena (caller contract) and `fresh` is a distinct new allocation.
        unsafe { raw::copy_bytes(ptr, fresh, old.size().min(new.size())) };
        fresh
    }
}

impl std::fmt::Debug for LinearArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearArena")
            .field("blocks", &self.blocks.len())
            .field("used_bytes", &self.used_bytes())
            .field("capacity_bytes", &self.capacity_bytes())
            .finish()
    }
}
