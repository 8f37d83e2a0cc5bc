//! 32-byte aligned memory blocks for the aligned load/store variants.

use core::ops::{Deref, DerefMut};

use crate::error::{LaneError, Result};

/// Alignment of every register type in this crate, in bytes.
pub const REGISTER_ALIGN: usize = 32;

/// A value aligned to the natural boundary of a 256-bit register.
///
/// The aligned `load`/`store` operations take `&Aligned<[T; N]>`, so the
/// alignment precondition of the hardware instruction is carried by the type
/// instead of being a caller obligation.
#[repr(C, align(32))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Aligned<A>(pub A);

impl<A> Aligned<A> {
    /// Wrap a value.
    #[inline]
    pub const fn new(value: A) -> Self {
        Aligned(value)
    }

    /// Unwrap the value.
    #[inline]
    pub fn into_inner(self) -> A {
        self.0
    }
}

impl<T: Copy + Default, const N: usize> Aligned<[T; N]> {
    /// Copy exactly `N` elements out of a slice.
    ///
    /// Fails with [`LaneError::LengthMismatch`] when `src.len() != N`.
    pub fn try_from_slice(src: &[T]) -> Result<Self> {
        if src.len() != N {
            return Err(LaneError::LengthMismatch {
                expected: N,
                actual: src.len(),
            });
        }
        let mut block = Aligned([T::default(); N]);
        block.0.copy_from_slice(src);
        Ok(block)
    }
}

impl<A> Deref for Aligned<A> {
    type Target = A;

    #[inline]
    fn deref(&self) -> &A {
        &self.0
    }
}

impl<A> DerefMut for Aligned<A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut A {
        &mut self.0
    }
}

impl<A> From<A> for Aligned<A> {
    #[inline]
    fn from(value: A) -> Self {
        Aligned(value)
    }
}
