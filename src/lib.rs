//! # Relocation Array
//!
//! The `reloc_array` crate provides a `#[no_std]` growable array much like `std::Vec`,
//! built around an explicit notion of *relocation*: transferring a value to a new
//! address while leaving the old slot logically dead. Element types are classified
//! along two axes via the [`Relocate`] trait: whether they are *trivially
//! relocatable* (a raw byte copy is a complete move) and whether they are
//! *replaceable* (overwriting a live slot is the same as destroying it and moving a
//! value in). [`RelocArr`] consults that classification once per element type and
//! picks between a bulk-memory path and an element-wise path for growth, insertion,
//! and range removal.
//!
//! `RelocArr` uses fallible allocations, meaning that instead of panicking on
//! allocation failure, it returns an error. The same goes for element-level
//! relocation faults: bulk operations clean up deterministically and report what
//! survived through the array's length.
//!
//! The allocator API is not stable yet, so this crate provides an alternate trait
//! [`AltAllocator`](types::AltAllocator) that works like the `Allocator` trait and
//! is the only capability `RelocArr` asks of its storage provider.
//!
//! # Feature Flags
//! * `std_alloc` (default) - Enables a wrapper called `Global` that implements
//!   `AltAllocator` using the standard allocator APIs, plus convenience
//!   constructors for `RelocArr` and a `Relocate` impl for `String`.
//!
//! * `alloc_api2` - Provides `Api2Alloc`, an adapter that lets any
//!   `allocator_api2::alloc::Allocator` act as an `AltAllocator`.

#![no_std]

#[cfg(any(feature = "std_alloc", test))]
extern crate std;

mod reloc_array;
pub mod relocate;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

pub use reloc_array::RelocArr;
pub use relocate::Relocate;
pub use relocate::RelocFault;
