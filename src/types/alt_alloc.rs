use core::alloc::Layout;
use core::error::Error;
use core::fmt;
use core::ptr::NonNull;

/// This indicates some sort of memory allocation error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AllocError;

impl Error for AllocError {}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("A memory allocation error occurred.")
    }
}

/// The rust allocator API is not stable yet. Therefore, this trait can be used
/// to implement/wrap a custom allocator in a no_std environment. It covers the
/// two capabilities `RelocArr` actually needs from its storage provider:
/// allocate a region, free a region.
///
/// # Safety
///
/// Implementations must return memory that satisfies the requested layout
/// (size and alignment) and stays valid until it is passed back to
/// `deallocate`. This mirrors the safety requirements of the unstable
/// allocator API:
/// <https://doc.rust-lang.org/std/alloc/trait.Allocator.html>
pub unsafe trait AltAllocator {
    /// Allocates a chunk of memory with the given layout.
    ///
    /// On success it returns a pointer to the allocated memory; on failure an
    /// `AllocError`. The container propagates the failure unchanged and never
    /// retries.
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError>;

    /// Deallocates the chunk of memory pointed at by `ptr`.
    ///
    /// # Safety
    ///
    /// The memory must have been allocated by this allocator, and the layout
    /// must match the layout provided when the chunk was allocated.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

unsafe impl<A> AltAllocator for &A
where
    A: AltAllocator,
{
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        return (**self).allocate(layout);
    }
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).deallocate(ptr, layout) };
    }
}
