use core::alloc::Layout;
use core::ptr::NonNull;

use crate::types::AltAllocator;
use crate::types::ErrorReason;
use crate::types::RelocArrErr;
use crate::types::RelocArrResult;

const fn layout_array(layout: Layout, count: usize) -> RelocArrResult<Layout> {
    let lay = layout.pad_to_align();
    let Some(bytes) = count.checked_mul(lay.size()) else {
        return Err(RelocArrErr::new(ErrorReason::CapacityOverflow));
    };
    // Rust is pretty adamant about allocations not exceeding isize::MAX.
    if bytes > (isize::MAX as usize) {
        return Err(RelocArrErr::new(ErrorReason::CapacityOverflow));
    }
    let Ok(lay) = Layout::from_size_align(bytes, layout.align()) else {
        return Err(RelocArrErr::new(ErrorReason::LayoutFailure));
    };
    return Ok(lay);
}

/// Owns the raw region: a pointer, the element capacity, and the allocator.
/// Knows nothing about which slots are live; the container tracks that.
pub(crate) struct Inner<A: AltAllocator> {
    ptr:      NonNull<u8>,
    capacity: usize,
    alloc:    A,
}

impl<A: AltAllocator> Inner<A> {
    /// An unallocated region: a dangling pointer aligned for `T`.
    pub(crate) const fn new_in<T>(alloc: A) -> Self {
        let ptr = align_of::<T>() as *mut u8;
        return Self {
            ptr:      unsafe { NonNull::new_unchecked(ptr) },
            capacity: 0,
            alloc:    alloc,
        };
    }

    /// Capacity in elements of size `size`. Zero-sized elements never need
    /// storage, so the region holds as many as a length can count.
    pub(crate) const fn capacity(&self, size: usize) -> usize {
        if size == 0 {
            return usize::MAX;
        }
        return self.capacity;
    }

    #[inline]
    pub(crate) const fn get_ptr<T>(&self) -> *mut T {
        return self.ptr.as_ptr().cast();
    }

    pub(crate) const fn allocator(&self) -> &A {
        return &self.alloc;
    }

    /// Allocates a fresh region for `capacity` elements of `layout` without
    /// touching the current one. Zero-byte requests get a dangling pointer.
    pub(crate) fn allocate_region(
        &self,
        capacity: usize,
        layout: Layout,
    ) -> RelocArrResult<NonNull<u8>> {
        let lay = layout_array(layout, capacity)?;
        if lay.size() == 0 {
            let dangling = lay.align() as *mut u8;
            return Ok(unsafe { NonNull::new_unchecked(dangling) });
        }
        let Ok(ptr) = self.alloc.allocate(lay) else {
            return Err(RelocArrErr::new(ErrorReason::AllocFailure));
        };
        return Ok(ptr.cast());
    }

    /// Frees a region previously handed out by `allocate_region` with the
    /// same capacity and layout.
    ///
    /// # Safety
    ///
    /// `ptr`/`capacity` must describe a region from `allocate_region` on this
    /// allocator, not freed before, with no live elements left in it.
    pub(crate) unsafe fn release_region(&self, ptr: NonNull<u8>, capacity: usize, layout: Layout) {
        // The capacity came from a successful allocation, so this cannot fail.
        let Ok(lay) = layout_array(layout, capacity) else {
            return;
        };
        if lay.size() == 0 {
            return;
        }
        unsafe { self.alloc.deallocate(ptr, lay) };
    }

    /// Frees the current region and adopts `ptr` as the new one.
    ///
    /// # Safety
    ///
    /// As for `release_region`, applied to the current region; `ptr` must be
    /// a live region of `capacity` elements from `allocate_region`.
    pub(crate) unsafe fn adopt_region(&mut self, ptr: NonNull<u8>, capacity: usize, layout: Layout) {
        unsafe { self.release_region(self.ptr, self.capacity, layout) };
        self.ptr = ptr;
        self.capacity = capacity;
    }

    /// Frees the current region. Called from the container's `Drop`.
    ///
    /// # Safety
    ///
    /// No live elements may remain in the region.
    pub(crate) unsafe fn destroy(&mut self, layout: Layout) {
        unsafe { self.release_region(self.ptr, self.capacity, layout) };
        self.capacity = 0;
        self.ptr = unsafe { NonNull::new_unchecked(layout.align() as *mut u8) };
    }
}
