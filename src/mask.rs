//! Register-width lane masks.

use core::ops::{BitAnd, BitOr, BitXor, Not};

/// A register whose lanes are each all-ones (true) or all-zeros (false).
///
/// Masks come out of the comparison operations of
/// [`VectorHelper`](crate::VectorHelper) and go into `blend`, the masked
/// arithmetic of [`DerivedOps`](crate::DerivedOps) and masked stores. Keeping
/// them a separate type stops an arbitrary register, whose lanes may hold
/// partial bit patterns, from being used as a predicate.
///
/// Build one from raw bits with
/// [`VectorHelper::mask_from_bits`](crate::VectorHelper::mask_from_bits) or,
/// validated, with
/// [`VectorHelper::mask_from_register`](crate::VectorHelper::mask_from_register).
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Mask<V>(V);

impl<V> Mask<V> {
    /// Only for callers that already produced all-or-nothing lanes.
    #[inline(always)]
    pub(crate) fn from_register_unchecked(register: V) -> Self {
        Mask(register)
    }

    /// The underlying register. Lanes are all-ones or all-zeros.
    #[inline(always)]
    pub fn register(self) -> V {
        self.0
    }
}

impl<V: BitAnd<Output = V>> BitAnd for Mask<V> {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Mask(self.0 & rhs.0)
    }
}

impl<V: BitOr<Output = V>> BitOr for Mask<V> {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Mask(self.0 | rhs.0)
    }
}

impl<V: BitXor<Output = V>> BitXor for Mask<V> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        Mask(self.0 ^ rhs.0)
    }
}

impl<V: Not<Output = V>> Not for Mask<V> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Mask(!self.0)
    }
}
