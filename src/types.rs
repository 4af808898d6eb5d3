//! Types consumed by `RelocArr` that are not the container itself: the
//! `AltAllocator` storage-provider trait, its `AllocError`, the crate's error
//! type, and the feature-gated allocator implementations.

#[cfg(feature = "alloc_api2")]
mod alloc_api2;
mod alt_alloc;
mod errors;
#[cfg(feature = "std_alloc")]
mod std_alloc;

#[cfg(feature = "alloc_api2")]
pub use alloc_api2::Api2Alloc;
pub use alt_alloc::AllocError;
pub use alt_alloc::AltAllocator;
pub use errors::ErrorReason;
pub use errors::RelocArrErr;
pub use errors::RelocArrResult;
#[cfg(feature = "std_alloc")]
pub use std_alloc::Global;
