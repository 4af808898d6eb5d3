use core::ptr;

use super::RelocFault;
use super::Relocate;

/// Moves the single value at `src` into the uninitialized slot at `dst`.
///
/// For trivially relocatable types this is a fixed-size byte copy and the
/// source bytes are simply dead afterwards; no destructor runs. For other
/// types it defers to the type's [`Relocate::relocate`] hook.
///
/// # Safety
///
/// `src` must point to a live `T`, `dst` to uninitialized storage valid for
/// writes, and the two slots must not overlap.
#[inline]
pub unsafe fn relocate_one<T: Relocate>(dst: *mut T, src: *mut T) -> Result<(), RelocFault> {
    if T::TRIVIALLY_RELOCATABLE {
        unsafe { dst.copy_from_nonoverlapping(src, 1) };
        return Ok(());
    }
    return unsafe { T::relocate(dst, src) };
}

/// Relocates `count` values starting at `first` into the region starting at
/// `output`, left-to-right.
///
/// Fast path (trivially relocatable types): one overlap-safe bulk copy of
/// `count * size_of::<T>()` bytes. Slow path: one [`relocate_one`] per
/// element. If element `k` faults, the already-relocated destination prefix
/// `[0, k)` and the untouched source suffix `(k, count)` are destroyed before
/// the fault is returned, so on error every slot on both sides is dead.
///
/// # Safety
///
/// `[first, first + count)` must hold live values and `[output, output +
/// count)` must be uninitialized storage valid for writes. The regions may
/// overlap only with `output` below `first` (closing a gap).
pub unsafe fn relocate_n<T: Relocate>(
    first: *mut T,
    count: usize,
    output: *mut T,
) -> Result<(), RelocFault> {
    if T::TRIVIALLY_RELOCATABLE {
        unsafe { output.copy_from(first, count) };
        return Ok(());
    }

    let mut done = 0;
    while done < count {
        let res = unsafe { relocate_one(output.add(done), first.add(done)) };
        if res.is_err() {
            // The faulting hook killed slot `done` on both sides already.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(output, done));
                let rest = first.add(done + 1);
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(rest, count - done - 1));
            }
            return res;
        }
        done += 1;
    }
    return Ok(());
}

/// Relocates the range `[first, last)` into the region starting at `output`,
/// left-to-right.
///
/// Same contract and failure cleanup as [`relocate_n`], with the count taken
/// from the pointer pair.
///
/// # Safety
///
/// As for [`relocate_n`]; additionally `first <= last` and both must belong
/// to the same allocation.
pub unsafe fn relocate_range_forward<T: Relocate>(
    first: *mut T,
    last: *mut T,
    output: *mut T,
) -> Result<(), RelocFault> {
    debug_assert!(first <= last, "relocation range is inverted");
    // Relocating zero-sized values moves nothing; offset_from below would
    // also be illegal for them.
    if size_of::<T>() == 0 {
        return Ok(());
    }
    let count = unsafe { last.offset_from(first) } as usize;
    return unsafe { relocate_n(first, count, output) };
}

/// Relocates the range `[first, last)` into the region *ending* at
/// `output_end`, right-to-left.
///
/// The reversed order makes it legal for the destination to overlap the
/// source from the right, which is exactly what opening a gap before an
/// insertion point needs. The fast path is the same overlap-safe bulk copy as
/// the forward variant. On a fault at source index `k`, the relocated
/// destination suffix and the untouched source prefix `[0, k)` are destroyed
/// before the fault is returned; on error every slot on both sides is dead.
///
/// # Safety
///
/// `[first, last)` must hold live values, `first <= last`, and the `count`
/// slots ending at `output_end` must be uninitialized storage valid for
/// writes, overlapping the source only from the right.
pub unsafe fn relocate_range_backward<T: Relocate>(
    first: *mut T,
    last: *mut T,
    output_end: *mut T,
) -> Result<(), RelocFault> {
    debug_assert!(first <= last, "relocation range is inverted");
    if size_of::<T>() == 0 {
        return Ok(());
    }
    let count = unsafe { last.offset_from(first) } as usize;
    let out_first = unsafe { output_end.sub(count) };

    if T::TRIVIALLY_RELOCATABLE {
        unsafe { out_first.copy_from(first, count) };
        return Ok(());
    }

    let mut i = count;
    while i > 0 {
        i -= 1;
        let res = unsafe { relocate_one(out_first.add(i), first.add(i)) };
        if res.is_err() {
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, i));
                let done = out_first.add(i + 1);
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(done, count - i - 1));
            }
            return res;
        }
    }
    return Ok(());
}
