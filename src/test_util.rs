//! Payload types shared by the unit tests: a drop-tallying element and a
//! fault-injecting element. Both are classified as replaceable but not
//! trivially relocatable, so they drive the element-wise paths.

use core::sync::atomic::AtomicIsize;
use core::sync::atomic::Ordering;

use crate::relocate::RelocFault;
use crate::relocate::Relocate;

/// Counts live instances through a per-test static, so a test can assert that
/// relocation neither leaks values nor drops them twice.
#[derive(Debug)]
pub(crate) struct Tracked {
    pub value: u64,
    live:      &'static AtomicIsize,
}

impl Tracked {
    pub fn new(value: u64, live: &'static AtomicIsize) -> Self {
        live.fetch_add(1, Ordering::Relaxed);
        Self { value, live }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::Relaxed);
    }
}

unsafe impl Relocate for Tracked {
    const TRIVIALLY_RELOCATABLE: bool = false;
    const REPLACEABLE: bool = true;
    const INFALLIBLE_RELOCATE: bool = true;

    fn duplicate(&self) -> Result<Self, RelocFault> {
        Ok(Self::new(self.value, self.live))
    }
}

/// Like [`Tracked`], but with a fuse: the fuse counts down on every `relocate`
/// and `duplicate` call, and the call that finds it at zero fails. Set the
/// fuse to `n` to make the `n + 1`-th hook invocation fault, or to
/// `isize::MAX` to never fail.
#[derive(Debug)]
pub(crate) struct Flaky {
    pub value: u64,
    live:      &'static AtomicIsize,
    fuse:      &'static AtomicIsize,
}

impl Flaky {
    pub fn new(value: u64, live: &'static AtomicIsize, fuse: &'static AtomicIsize) -> Self {
        live.fetch_add(1, Ordering::Relaxed);
        Self { value, live, fuse }
    }
}

impl PartialEq for Flaky {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Flaky {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::Relaxed);
    }
}

unsafe impl Relocate for Flaky {
    const TRIVIALLY_RELOCATABLE: bool = false;
    const REPLACEABLE: bool = true;
    const INFALLIBLE_RELOCATE: bool = false;

    unsafe fn relocate(dst: *mut Self, src: *mut Self) -> Result<(), RelocFault> {
        let remaining = unsafe { (*src).fuse.fetch_sub(1, Ordering::Relaxed) };
        if remaining <= 0 {
            // The contract says both slots are dead after a fault.
            unsafe { src.drop_in_place() };
            return Err(RelocFault);
        }
        unsafe { dst.write(src.read()) };
        Ok(())
    }

    fn duplicate(&self) -> Result<Self, RelocFault> {
        let remaining = self.fuse.fetch_sub(1, Ordering::Relaxed);
        if remaining <= 0 {
            return Err(RelocFault);
        }
        Ok(Self::new(self.value, self.live, self.fuse))
    }
}
