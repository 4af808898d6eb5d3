use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::ops;
use core::ptr;
use core::slice;

use super::inner::Inner;
use crate::relocate::Relocate;
use crate::relocate::relocate_n;
use crate::relocate::relocate_range_backward;
use crate::relocate::relocate_range_forward;
use crate::types::AltAllocator;
use crate::types::ErrorReason;
use crate::types::RelocArrErr;
use crate::types::RelocArrResult;
#[cfg(feature = "std_alloc")]
use crate::types::Global;

/// A growable array that owns one contiguous region; the prefix `[0, len)`
/// holds live elements, the rest is uninitialized storage.
///
/// Structural changes (growth, insertion, removal) are dispatched on the
/// element type's [`Relocate`] classification: trivially relocatable types
/// move as single bulk byte copies, replaceable types move element-wise
/// through the relocation algorithms, and everything else falls back to
/// shifts that keep every slot live.
///
/// Allocation failures and element faults are reported as values, never
/// panics; precondition violations (out-of-range indices, inverted ranges)
/// panic, since the container's own bookkeeping cannot be trusted afterwards.
pub struct RelocArr<T: Relocate, A: AltAllocator> {
    inner: Inner<A>,
    len:   usize,
    _ph:   PhantomData<T>,
}

impl<T: Relocate, A: AltAllocator> RelocArr<T, A> {
    const LAYOUT: Layout = Layout::new::<T>();
    const SIZE: usize = size_of::<T>();

    /// How much capacity a full array gains when pushed into. A fixed step
    /// keeps reallocation cost proportional to the live prefix being moved.
    const GROWTH_STEP: usize = 32;

    /// Creates an empty array using `alloc`. Nothing is allocated until the
    /// first element arrives.
    pub const fn new_in(alloc: A) -> Self {
        return Self {
            inner: Inner::new_in::<T>(alloc),
            len:   0,
            _ph:   PhantomData,
        };
    }

    /// Creates an empty array with room for `capacity` elements.
    pub fn with_capacity_in(alloc: A, capacity: usize) -> RelocArrResult<Self> {
        let mut inner = Inner::new_in::<T>(alloc);
        let region = inner.allocate_region(capacity, Self::LAYOUT)?;
        unsafe { inner.adopt_region(region, capacity, Self::LAYOUT) };
        return Ok(Self {
            inner: inner,
            len:   0,
            _ph:   PhantomData,
        });
    }

    #[inline]
    pub const fn len(&self) -> usize {
        return self.len;
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    pub const fn capacity(&self) -> usize {
        return self.inner.capacity(Self::SIZE);
    }

    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        return self.inner.get_ptr();
    }

    #[inline]
    pub const fn as_mut_ptr(&self) -> *mut T {
        return self.inner.get_ptr();
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Grows the region to hold at least `new_capacity` elements. Does
    /// nothing when the region is already that large; the array never
    /// shrinks, so length, capacity, and element addresses are untouched by
    /// a satisfied reserve.
    pub fn reserve(&mut self, new_capacity: usize) -> RelocArrResult<()> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        return self.regrow(new_capacity);
    }

    /// Appends `item`, growing by the fixed step when full.
    pub fn push(&mut self, item: T) -> RelocArrResult<()> {
        if self.len == self.capacity() {
            self.grow_for_push()?;
        }
        unsafe { self.as_mut_ptr().add(self.len).write(item) };
        self.len += 1;
        return Ok(());
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let item = unsafe { self.as_ptr().add(self.len).read() };
        return Some(item);
    }

    /// Inserts `item` at `index`, shifting everything at and after `index`
    /// one slot right.
    ///
    /// Replaceable element types take the relocation path: the tail is moved
    /// as raw storage to open a one-slot gap and the value is written into
    /// it, skipping per-element assignment. Other types shift via a rotation
    /// that keeps every slot live.
    ///
    /// On an element fault while opening the gap, the elements at and after
    /// `index` are destroyed, the array is truncated to `index`, `item` is
    /// dropped, and `ElementFault` is returned.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_at(&mut self, index: usize, item: T) -> RelocArrResult<()> {
        assert!(index <= self.len, "insert position is out of bounds");
        if self.len == self.capacity() {
            self.grow_for_push()?;
        }
        let len = self.len;
        let base = self.as_mut_ptr();

        if index == len {
            unsafe { base.add(len).write(item) };
            self.len += 1;
            return Ok(());
        }

        if T::REPLACEABLE {
            let first = unsafe { base.add(index) };
            let last = unsafe { base.add(len) };
            // The tail leaves the live range while the gap opens; on a fault
            // everything past the insertion point is gone and the intact
            // prefix is all that remains.
            self.len = index;
            let res = unsafe { relocate_range_backward(first, last, last.add(1)) };
            if res.is_err() {
                return Err(RelocArrErr::new(ErrorReason::ElementFault));
            }
            unsafe { first.write(item) };
            self.len = len + 1;
        } else {
            unsafe { base.add(len).write(item) };
            self.len += 1;
            self.as_mut_slice()[index..].rotate_right(1);
        }
        return Ok(());
    }

    /// Removes the elements at `[first, last)`, shifting the tail left.
    ///
    /// Replaceable types with infallible relocation take the relocation
    /// path: the victims are destroyed in place and the tail is moved down
    /// as raw storage. Other types rotate the victims to the end and destroy
    /// them there. The length shrinks before any destructor runs, so should
    /// an element's `Drop` panic the array stays destructible; elements the
    /// operation had not yet destroyed or moved back in are leaked, never
    /// dropped twice.
    ///
    /// # Panics
    ///
    /// Panics if `first > last` or `last > len()`.
    pub fn erase(&mut self, first: usize, last: usize) -> RelocArrResult<()> {
        assert!(first <= last, "erase range is inverted");
        assert!(last <= self.len, "erase range is out of bounds");
        let count = last - first;
        if count == 0 {
            return Ok(());
        }
        let len = self.len;

        if T::REPLACEABLE && T::INFALLIBLE_RELOCATE {
            let base = self.as_mut_ptr();
            // Shrink the live prefix first: a panicking Drop must not leave
            // dropped slots inside it. The tail leaks in that case.
            self.len = first;
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(first), count));
            }
            let res =
                unsafe { relocate_range_forward(base.add(last), base.add(len), base.add(first)) };
            if res.is_err() {
                // Only reachable if the classification lied about
                // infallibility; the tail is gone either way.
                return Err(RelocArrErr::new(ErrorReason::ElementFault));
            }
        } else {
            self.as_mut_slice()[first..].rotate_left(count);
            let tail = len - count;
            let start = unsafe { self.as_mut_ptr().add(tail) };
            self.len = tail;
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, count));
            }
            return Ok(());
        }
        self.len = len - count;
        return Ok(());
    }

    /// Drops every element, keeping the region.
    pub fn clear(&mut self) {
        let items = self.as_mut_slice() as *mut [T];
        // Zero the length first so a panicking Drop cannot leave dropped
        // elements inside the live prefix.
        self.len = 0;
        unsafe { ptr::drop_in_place(items) };
    }

    /// Duplicates the array into an independent region, element by element.
    /// The original is untouched whatever happens.
    pub fn try_clone(&self) -> RelocArrResult<Self>
    where
        A: Clone,
    {
        let alloc = self.inner.allocator().clone();
        let mut cloned = Self::with_capacity_in(alloc, self.len)?;
        for item in self.as_slice() {
            let dup = item.duplicate()?;
            cloned.push(dup)?;
        }
        return Ok(cloned);
    }

    fn grow_for_push(&mut self) -> RelocArrResult<()> {
        let Some(new_capacity) = self.capacity().checked_add(Self::GROWTH_STEP) else {
            return Err(RelocArrErr::new(ErrorReason::CapacityOverflow));
        };
        return self.regrow(new_capacity);
    }

    /// Moves the live prefix into a freshly allocated region and adopts it.
    /// Growth is never in place: the old region is released only after the
    /// new one is fully populated.
    fn regrow(&mut self, new_capacity: usize) -> RelocArrResult<()> {
        debug_assert!(new_capacity >= self.len);
        let len = self.len;
        let region = self.inner.allocate_region(new_capacity, Self::LAYOUT)?;
        let dst = region.cast::<T>().as_ptr();

        // The prefix leaves the live range while it is moved or destroyed,
        // so no fault or panicking Drop can make a slot get dropped twice.
        self.len = 0;

        if T::INFALLIBLE_RELOCATE {
            // Relocation consumes the old prefix outright; for trivially
            // relocatable types this is one bulk copy.
            let res = unsafe { relocate_n(self.as_mut_ptr(), len, dst) };
            if res.is_err() {
                // The classification promised this cannot happen. Both
                // regions are already empty of live elements; record the
                // loss rather than guess.
                unsafe { self.inner.release_region(region, new_capacity, Self::LAYOUT) };
                return Err(RelocArrErr::new(ErrorReason::ElementFault));
            }
        } else {
            // Duplicate into the new region while the old prefix stays
            // intact, so a fault leaves the array exactly as it was.
            for i in 0..len {
                let item = unsafe { &*self.as_ptr().add(i) };
                match item.duplicate() {
                    Ok(dup) => unsafe { dst.add(i).write(dup) },
                    Err(_) => {
                        unsafe {
                            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(dst, i));
                            self.inner.release_region(region, new_capacity, Self::LAYOUT);
                        }
                        self.len = len;
                        return Err(RelocArrErr::new(ErrorReason::ElementFault));
                    }
                }
            }
            let old = ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), len);
            unsafe { ptr::drop_in_place(old) };
        }

        unsafe { self.inner.adopt_region(region, new_capacity, Self::LAYOUT) };
        self.len = len;
        return Ok(());
    }
}

#[cfg(feature = "std_alloc")]
impl<T: Relocate> RelocArr<T, Global> {
    /// Creates an empty array backed by the standard allocator.
    pub const fn new() -> Self {
        return Self::new_in(Global);
    }

    /// Creates an array with room for `capacity` elements, backed by the
    /// standard allocator.
    pub fn with_capacity(capacity: usize) -> RelocArrResult<Self> {
        return Self::with_capacity_in(Global, capacity);
    }
}

#[cfg(feature = "std_alloc")]
impl<T: Relocate> Default for RelocArr<T, Global> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<T: Relocate, A: AltAllocator> Drop for RelocArr<T, A> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(self.as_mut_slice() as *mut [T]);
            self.inner.destroy(Self::LAYOUT);
        }
    }
}

impl<T: Relocate, A: AltAllocator> ops::Deref for RelocArr<T, A> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &[T] {
        return self.as_slice();
    }
}

impl<T: Relocate, A: AltAllocator> ops::DerefMut for RelocArr<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        return self.as_mut_slice();
    }
}

impl<T: Relocate + fmt::Debug, A: AltAllocator> fmt::Debug for RelocArr<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return fmt::Debug::fmt(self.as_slice(), f);
    }
}

impl<T: Relocate + PartialEq, A: AltAllocator, B: AltAllocator> PartialEq<RelocArr<T, B>>
    for RelocArr<T, A>
{
    fn eq(&self, other: &RelocArr<T, B>) -> bool {
        return self.as_slice() == other.as_slice();
    }
}

impl<T: Relocate + Eq, A: AltAllocator> Eq for RelocArr<T, A> {}

impl<'a, T: Relocate, A: AltAllocator> IntoIterator for &'a RelocArr<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        return self.as_slice().iter();
    }
}

impl<'a, T: Relocate, A: AltAllocator> IntoIterator for &'a mut RelocArr<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        return self.as_mut_slice().iter_mut();
    }
}
