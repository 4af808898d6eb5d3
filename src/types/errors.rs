use core::error::Error;
use core::fmt;

use crate::relocate::RelocFault;

/// This enum lets one figure out what kind of error occurred during a
/// `RelocArr` operation.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorReason {
    /// The requested capacity cannot be represented.
    CapacityOverflow = 1,
    /// A memory layout for the requested region could not be built.
    LayoutFailure,
    /// The storage provider reported an allocation failure.
    AllocFailure,
    /// An element's relocation or duplication hook faulted. The array's
    /// length reports the surviving prefix; everything past it is gone.
    ElementFault,
}

/// A type alias for `Result<T, RelocArrErr>`
pub type RelocArrResult<T> = Result<T, RelocArrErr>;

/// This is used to indicate an error during a `RelocArr` operation.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RelocArrErr(ErrorReason);

impl RelocArrErr {
    pub(crate) const fn new(reason: ErrorReason) -> Self {
        return Self(reason);
    }
    pub const fn reason(self) -> ErrorReason {
        return self.0;
    }
}

impl Error for RelocArrErr {}

impl fmt::Display for RelocArrErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ErrorReason::CapacityOverflow => f.write_str("Capacity overflowed."),
            ErrorReason::LayoutFailure => f.write_str("Failed to create layout."),
            ErrorReason::AllocFailure => f.write_str("An allocation failure occurred."),
            ErrorReason::ElementFault => f.write_str("An element faulted during relocation."),
        }
    }
}

impl From<RelocFault> for RelocArrErr {
    fn from(_: RelocFault) -> Self {
        return Self(ErrorReason::ElementFault);
    }
}
