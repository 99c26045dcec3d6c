//! Low-level primitives for arena memory operations.
//!
//! Every `unsafe` operation on block memory lives here, each with a
//! `// SAFETY:` comment. The rest of the crate sees blocks only as a
//! base address, a length, and pointers at checked offsets.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::ArenaError;

/// One global-allocator allocation owned by a block.
///
/// The buffer is only ever accessed through raw pointers handed out by
/// [`RawBuffer::at`]; no reference to the whole buffer is ever formed,
/// so pointers returned earlier are never invalidated by later ones.
pub(crate) struct RawBuffer {
    ptr: NonNull<u8>,
    layout: Layout,
}

// SAFETY: the buffer is uniquely owned; `&RawBuffer` only exposes its
// address and length, never the contents.
unsafe impl Send for RawBuffer {}
// SAFETY: see above.
unsafe impl Sync for RawBuffer {}

impl RawBuffer {
    /// Allocate `size` bytes aligned to `align`.
    ///
    /// `align` must be a power of two. A zero `size` is rounded up to one
    /// byte so that every buffer is a real allocation.
    pub(crate) fn new(size: usize, align: usize) -> Result<Self, ArenaError> {
        let size = size.max(1);
        let layout = Layout::from_size_align(size, align)
            .map_err(|_| ArenaError::AllocationFailed { size })?;
        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(ptr).ok_or(ArenaError::AllocationFailed { size })?;
        Ok(Self { ptr, layout })
    }

    /// Size of the buffer in bytes.
    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }

    /// Address of the first byte, for alignment arithmetic.
    pub(crate) fn addr(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    /// Pointer `offset` bytes into the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the buffer.
    pub(crate) fn at(&self, offset: usize) -> NonNull<u8> {
        assert!(
            offset <= self.len(),
            "offset {offset} outside buffer of {} bytes",
            self.len()
        );
        // SAFETY: `offset` is within the allocation or one past its end.
        unsafe { self.ptr.add(offset) }
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        // SAFETY: `ptr` was returned by `alloc::alloc` with this exact layout.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

/// Copy `len` bytes between two non-overlapping arena allocations.
///
/// # Safety
///
/// `src` must be valid for reads and `dst` valid for writes of `len`
/// bytes, and the two ranges must not overlap.
pub(crate) unsafe fn copy_bytes(src: NonNull<u8>, dst: NonNull<u8>, len: usize) {
    // SAFETY: upheld by the caller.
    unsafe { std::ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), len) }
}
