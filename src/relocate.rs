//! Relocation: moving values to new addresses while leaving the old slots dead.
//!
//! This module has two halves. The [`Relocate`] trait classifies an element type
//! at compile time: whether a raw byte copy is a complete move
//! (`TRIVIALLY_RELOCATABLE`), whether overwriting a live slot is equivalent to
//! destroy-then-move (`REPLACEABLE`), and whether relocating a single value can
//! fail. The free functions ([`relocate_one`], [`relocate_n`],
//! [`relocate_range_forward`], [`relocate_range_backward`]) move runs of live
//! values into uninitialized storage, taking a single bulk copy when the
//! classification allows it and an element-wise loop with deterministic failure
//! cleanup otherwise.
//!
//! Everything here works on raw pointers and is `unsafe`; the container layer is
//! the intended caller, but the functions stand on their own for anyone building
//! a different structure on the same classification.

mod ops;
mod props;

#[cfg(test)]
mod tests;

pub use ops::relocate_n;
pub use ops::relocate_one;
pub use ops::relocate_range_backward;
pub use ops::relocate_range_forward;
pub use props::RelocFault;
pub use props::Relocate;
