use core::error::Error;
use core::fmt;

/// An element-level failure reported by a [`Relocate`] hook.
///
/// After a fault, the slots the failing hook was working on are dead: the
/// destination was never constructed and the source has been destroyed. The
/// bulk relocation functions extend this to whole ranges, so by the time a
/// fault reaches a caller there is nothing left alive to account for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RelocFault;

impl Error for RelocFault {}

impl fmt::Display for RelocFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("An element reported a relocation fault.")
    }
}

/// Per-type relocation classification, resolved once per element type.
///
/// The container and the bulk relocation functions read the three constants to
/// pick an algorithm at compile time; no runtime branch survives
/// monomorphization.
///
/// For most Rust types a move already *is* a raw byte copy, so the provided
/// [`relocate`](Relocate::relocate) body is correct and all three constants can
/// be `true`. Setting `TRIVIALLY_RELOCATABLE` to `false` routes bulk
/// operations through the `relocate` hook one element at a time, which is
/// where a type models relocation that can fail. The hook is not an
/// address-stability mechanism: single values still move by plain `memcpy`
/// through `push`, `pop`, and slice rotation, as all Rust values must.
///
/// # Safety
///
/// The constants are promises the compiler cannot check:
///
/// * `TRIVIALLY_RELOCATABLE` may only be `true` if copying the bytes of a value
///   to a new address and never touching the old bytes again (no drop, no
///   fixup) yields a fully functional value.
/// * `REPLACEABLE` may only be `true` if dropping a live value in place and
///   moving another value into the slot is indistinguishable from assignment.
/// * `INFALLIBLE_RELOCATE` may only be `true` if `relocate` never returns
///   `Err`.
///
/// A false promise leads the container to skip drops or reuse dead slots,
/// which is undefined behavior.
pub unsafe trait Relocate: Sized {
    /// Moving an instance is a raw byte copy; the old bytes are simply dead.
    const TRIVIALLY_RELOCATABLE: bool;

    /// Overwriting a live slot is equivalent to destroy-then-move-in-place.
    const REPLACEABLE: bool;

    /// [`relocate`](Relocate::relocate) cannot fail for this type.
    const INFALLIBLE_RELOCATE: bool;

    /// Moves the value at `src` into the slot at `dst`.
    ///
    /// On success `dst` holds the value and `src` is dead, so its destructor
    /// must not run again. On failure both slots are dead: the implementation
    /// must dispose of the source value itself before returning `Err`.
    ///
    /// # Safety
    ///
    /// `src` must point to a live value, `dst` to uninitialized storage valid
    /// for writes, and the two must not point at the same slot.
    unsafe fn relocate(dst: *mut Self, src: *mut Self) -> Result<(), RelocFault> {
        unsafe { dst.write(src.read()) };
        return Ok(());
    }

    /// Creates an independent copy of `self`.
    ///
    /// Used by growth when relocation may fail (the old storage is kept intact
    /// until every duplicate exists) and by `try_clone`.
    fn duplicate(&self) -> Result<Self, RelocFault>;
}

macro_rules! impl_trivial_relocate {
    ($typ:ty) => {
        unsafe impl Relocate for $typ {
            const TRIVIALLY_RELOCATABLE: bool = true;
            const REPLACEABLE: bool = true;
            const INFALLIBLE_RELOCATE: bool = true;

            #[inline]
            fn duplicate(&self) -> Result<Self, RelocFault> {
                return Ok(*self);
            }
        }
    };
}

impl_trivial_relocate!(u8);
impl_trivial_relocate!(u16);
impl_trivial_relocate!(u32);
impl_trivial_relocate!(u64);
impl_trivial_relocate!(u128);
impl_trivial_relocate!(usize);
impl_trivial_relocate!(i8);
impl_trivial_relocate!(i16);
impl_trivial_relocate!(i32);
impl_trivial_relocate!(i64);
impl_trivial_relocate!(i128);
impl_trivial_relocate!(isize);
impl_trivial_relocate!(f32);
impl_trivial_relocate!(f64);
impl_trivial_relocate!(bool);
impl_trivial_relocate!(char);
impl_trivial_relocate!(());

/// `String` owns a heap buffer but nothing in it cares about the `String`'s own
/// address, so a byte copy of the (pointer, length, capacity) triple is a
/// complete move. This is the classic opt-in case for a non-trivial type.
#[cfg(feature = "std_alloc")]
unsafe impl Relocate for std::string::String {
    const TRIVIALLY_RELOCATABLE: bool = true;
    const REPLACEABLE: bool = true;
    const INFALLIBLE_RELOCATE: bool = true;

    fn duplicate(&self) -> Result<Self, RelocFault> {
        return Ok(self.clone());
    }
}
