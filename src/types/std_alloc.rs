use core::ptr::NonNull;
use std::alloc;
use std::alloc::Layout;

use super::AllocError;
use super::AltAllocator;

/// This is basically a wrapper around the std global allocator APIs.
///
/// See:
/// <https://doc.rust-lang.org/std/alloc/struct.Global.html>
///
/// It has the same name as `Global` since the allocator APIs are not
/// stabilized yet. When stabilized this will just be removed and Rust's
/// `Global` exported for backwards compatibility.
#[derive(Debug, Default, Copy, Clone)]
pub struct Global;

unsafe impl AltAllocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        // std::alloc::alloc() requires that the layout size be non-zero.
        if layout.size() == 0 {
            return Err(AllocError);
        };
        let ptr = unsafe { alloc::alloc(layout) };
        let Some(ptr) = NonNull::new(ptr) else {
            return Err(AllocError);
        };
        return Ok(NonNull::slice_from_raw_parts(ptr, layout.size()));
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
    }
}
