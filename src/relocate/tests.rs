use core::mem::MaybeUninit;
use core::ptr;
use core::sync::atomic::AtomicIsize;
use core::sync::atomic::Ordering;

use super::relocate_n;
use super::relocate_one;
use super::relocate_range_backward;
use super::relocate_range_forward;
use crate::test_util::Flaky;
use crate::test_util::Tracked;

fn live_count(live: &AtomicIsize) -> isize {
    live.load(Ordering::Relaxed)
}

#[test]
fn relocate_one_trivial() {
    let mut src = MaybeUninit::new(0xfeed_u64);
    let mut dst = MaybeUninit::<u64>::uninit();

    let res = unsafe { relocate_one(dst.as_mut_ptr(), src.as_mut_ptr()) };
    assert!(res.is_ok());
    assert_eq!(unsafe { dst.assume_init() }, 0xfeed);
}

#[test]
fn relocate_one_elementwise() {
    static LIVE: AtomicIsize = AtomicIsize::new(0);

    let mut src = MaybeUninit::new(Tracked::new(7, &LIVE));
    let mut dst = MaybeUninit::<Tracked>::uninit();

    let res = unsafe { relocate_one(dst.as_mut_ptr(), src.as_mut_ptr()) };
    assert!(res.is_ok());

    // The value moved; nothing was dropped or duplicated along the way.
    assert_eq!(live_count(&LIVE), 1);
    let moved = unsafe { dst.assume_init() };
    assert_eq!(moved.value, 7);
    drop(moved);
    assert_eq!(live_count(&LIVE), 0);
}

#[test]
fn relocate_n_bulk_copy() {
    let mut src: [MaybeUninit<u32>; 5] = [const { MaybeUninit::uninit() }; 5];
    let mut dst: [MaybeUninit<u32>; 5] = [const { MaybeUninit::uninit() }; 5];
    for (i, slot) in src.iter_mut().enumerate() {
        slot.write(i as u32 * 10);
    }

    let res = unsafe {
        relocate_n(
            src.as_mut_ptr().cast::<u32>(),
            5,
            dst.as_mut_ptr().cast::<u32>(),
        )
    };
    assert!(res.is_ok());
    for (i, slot) in dst.iter().enumerate() {
        assert_eq!(unsafe { slot.assume_init() }, i as u32 * 10);
    }
}

#[test]
fn relocate_n_consumes_source_exactly_once() {
    static LIVE: AtomicIsize = AtomicIsize::new(0);
    const N: usize = 16;

    let mut src: [MaybeUninit<Tracked>; N] = [const { MaybeUninit::uninit() }; N];
    let mut dst: [MaybeUninit<Tracked>; N] = [const { MaybeUninit::uninit() }; N];
    for (i, slot) in src.iter_mut().enumerate() {
        slot.write(Tracked::new(i as u64, &LIVE));
    }
    assert_eq!(live_count(&LIVE), N as isize);

    let res = unsafe {
        relocate_n(
            src.as_mut_ptr().cast::<Tracked>(),
            N,
            dst.as_mut_ptr().cast::<Tracked>(),
        )
    };
    assert!(res.is_ok());
    assert_eq!(live_count(&LIVE), N as isize);

    for (i, slot) in dst.iter_mut().enumerate() {
        let item = unsafe { slot.assume_init_read() };
        assert_eq!(item.value, i as u64);
        drop(item);
    }
    // Every value was dropped exactly once; the source slots were dead.
    assert_eq!(live_count(&LIVE), 0);
}

#[test]
fn relocate_n_fault_leaves_both_sides_dead() {
    static LIVE: AtomicIsize = AtomicIsize::new(0);
    static FUSE: AtomicIsize = AtomicIsize::new(3);
    const N: usize = 6;

    let mut src: [MaybeUninit<Flaky>; N] = [const { MaybeUninit::uninit() }; N];
    let mut dst: [MaybeUninit<Flaky>; N] = [const { MaybeUninit::uninit() }; N];
    for (i, slot) in src.iter_mut().enumerate() {
        slot.write(Flaky::new(i as u64, &LIVE, &FUSE));
    }

    let res = unsafe {
        relocate_n(
            src.as_mut_ptr().cast::<Flaky>(),
            N,
            dst.as_mut_ptr().cast::<Flaky>(),
        )
    };
    assert!(res.is_err());
    // Relocated prefix, faulted element, and untouched suffix all destroyed.
    assert_eq!(live_count(&LIVE), 0);
}

#[test]
fn forward_relocation_closes_a_gap() {
    static LIVE: AtomicIsize = AtomicIsize::new(0);
    const N: usize = 8;

    let mut buf: [MaybeUninit<Tracked>; N] = [const { MaybeUninit::uninit() }; N];
    for (i, slot) in buf.iter_mut().enumerate() {
        slot.write(Tracked::new(i as u64, &LIVE));
    }
    let base = buf.as_mut_ptr().cast::<Tracked>();

    // Kill slots [2, 4) and slide the tail down over them.
    unsafe {
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(2), 2));
        let res = relocate_range_forward(base.add(4), base.add(N), base.add(2));
        assert!(res.is_ok());
    }
    assert_eq!(live_count(&LIVE), (N - 2) as isize);

    let expected: [u64; 6] = [0, 1, 4, 5, 6, 7];
    for (i, want) in expected.iter().enumerate() {
        let item = unsafe { buf[i].assume_init_read() };
        assert_eq!(item.value, *want);
        drop(item);
    }
    assert_eq!(live_count(&LIVE), 0);
}

#[test]
fn backward_relocation_opens_a_gap() {
    static LIVE: AtomicIsize = AtomicIsize::new(0);
    const N: usize = 9;

    let mut buf: [MaybeUninit<Tracked>; N] = [const { MaybeUninit::uninit() }; N];
    for (i, slot) in buf.iter_mut().enumerate().take(N - 1) {
        slot.write(Tracked::new(i as u64, &LIVE));
    }
    let base = buf.as_mut_ptr().cast::<Tracked>();

    // Shift [3, 8) one slot right, opening a hole at index 3.
    unsafe {
        let res = relocate_range_backward(base.add(3), base.add(N - 1), base.add(N));
        assert!(res.is_ok());
        base.add(3).write(Tracked::new(99, &LIVE));
    }
    assert_eq!(live_count(&LIVE), N as isize);

    let expected: [u64; N] = [0, 1, 2, 99, 3, 4, 5, 6, 7];
    for (i, want) in expected.iter().enumerate() {
        let item = unsafe { buf[i].assume_init_read() };
        assert_eq!(item.value, *want);
        drop(item);
    }
    assert_eq!(live_count(&LIVE), 0);
}

#[test]
fn backward_fault_leaves_both_sides_dead() {
    static LIVE: AtomicIsize = AtomicIsize::new(0);
    static FUSE: AtomicIsize = AtomicIsize::new(2);
    const N: usize = 6;

    let mut buf: [MaybeUninit<Flaky>; N] = [const { MaybeUninit::uninit() }; N];
    for (i, slot) in buf.iter_mut().enumerate().take(N - 1) {
        slot.write(Flaky::new(i as u64, &LIVE, &FUSE));
    }
    let base = buf.as_mut_ptr().cast::<Flaky>();

    let res = unsafe { relocate_range_backward(base, base.add(N - 1), base.add(N)) };
    assert!(res.is_err());
    assert_eq!(live_count(&LIVE), 0);
}

#[test]
fn zero_sized_elements_relocate_as_a_noop() {
    let base = core::ptr::dangling_mut::<()>();
    let res = unsafe { relocate_n(base, 5, base) };
    assert!(res.is_ok());
    let res = unsafe { relocate_range_forward(base, base, base) };
    assert!(res.is_ok());
    let res = unsafe { relocate_range_backward(base, base, base) };
    assert!(res.is_ok());
}
