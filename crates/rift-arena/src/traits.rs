//! The generic arena interface.

use std::alloc::Layout;
use std::ptr::NonNull;

/// Common API of all arena allocators.
///
/// Allocation never fails from the caller's point of view: running out of
/// memory is fatal. Individual deallocation is part of the interface, but
/// an arena is free to make it a no-op.
pub trait MemoryArena {
    /// Allocate uninitialised memory for `layout`.
    ///
    /// The returned pointer is non-null and aligned to `layout.align()`.
    /// Exhaustion aborts through [`std::alloc::handle_alloc_error`].
    fn allocate(&mut self, layout: Layout) -> NonNull<u8>;

    /// Release one allocation.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this arena for `layout` and must
    /// not be used afterwards.
    unsafe fn free(&mut self, ptr: NonNull<u8>, layout: Layout);

    /// Replace an allocation with one of a new layout.
    ///
    /// The default frees the old allocation then allocates a new one, so
    /// the contents are not carried over. Arenas that can do better
    /// override it.
    ///
    /// # Safety
    ///
    /// Same contract as [`MemoryArena::free`] for `ptr` and `old`.
    unsafe fn reallocate(&mut self, ptr: NonNull<u8>, old: Layout, new: Layout) -> NonNull<u8> {
        // SAFETY: forwarded caller contract.
        unsafe { self.free(ptr, old) };
        self.allocate(new)
    }

    /// Allocate uninitialised memory for one `T`.
    fn allocate_for<T>(&mut self) -> NonNull<T>
    where
        Self: Sized,
    {
        self.allocate(Layout::new::<T>()).cast()
    }

    /// Allocate uninitialised memory for `count` consecutive `T`s.
    ///
    /// # Panics
    ///
    /// Panics if the total size overflows.
    fn allocate_array<T>(&mut self, count: usize) -> NonNull<T>
    where
        Self: Sized,
    {
        let layout = match Layout::array::<T>(count) {
            Ok(layout) => layout,
            Err(_) => panic!("array of {count} elements overflows the address space"),
        };
        self.allocate(layout).cast()
    }
}
