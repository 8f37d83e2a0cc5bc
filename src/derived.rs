//! Operations composed from the register table.
//!
//! Everything here is written against [`VectorHelper`] only, so one body serves
//! every element type. `div_masked` and `round` are the exceptions: integer
//! division must skip inactive lanes instead of blending afterwards, and the
//! float rounding strategy depends on [`LEVEL`](crate::level::LEVEL).

use crate::helper::VectorHelper;
use crate::mask::Mask;

/// Masked arithmetic, rounding and horizontal reductions.
pub trait DerivedOps: VectorHelper {
    /// `a * b` in lanes where `mask` is true, `a` elsewhere.
    #[inline(always)]
    fn mul_masked(a: Self::Vector, b: Self::Vector, mask: Mask<Self::Vector>) -> Self::Vector {
        Self::blend(a, Self::mul(a, b), mask)
    }

    /// `a / b` in lanes where `mask` is true, `a` elsewhere.
    ///
    /// For integers the quotient is only computed for active lanes, so a zero
    /// divisor in an inactive lane is fine.
    fn div_masked(a: Self::Vector, b: Self::Vector, mask: Mask<Self::Vector>) -> Self::Vector;

    /// `v1 * v2 + v3`, rounded after each step.
    #[inline(always)]
    fn multiply_and_add(v1: Self::Vector, v2: Self::Vector, v3: Self::Vector) -> Self::Vector {
        Self::add(Self::mul(v1, v2), v3)
    }

    /// Zero the lanes where `mask` is false.
    #[inline(always)]
    fn not_masked_to_zero(a: Self::Vector, mask: Mask<Self::Vector>) -> Self::Vector {
        Self::and_(a, mask.register())
    }

    /// Round to an integral value.
    ///
    /// `Extended` builds round half to even, `Baseline` builds half away from
    /// zero; the two differ only at halfway points. Lanes too large to carry a
    /// fraction, NaN and the infinities come back unchanged. Identity for
    /// integer types.
    fn round(x: Self::Vector) -> Self::Vector;

    /// Sum of all lanes.
    #[inline]
    fn reduce_add(v: Self::Vector) -> Self {
        reduce::<Self>(v, Self::add)
    }

    /// Product of all lanes.
    #[inline]
    fn reduce_mul(v: Self::Vector) -> Self {
        reduce::<Self>(v, Self::mul)
    }

    /// Smallest lane, with the NaN rule of [`VectorHelper::min`].
    #[inline]
    fn reduce_min(v: Self::Vector) -> Self {
        reduce::<Self>(v, Self::min)
    }

    /// Largest lane, with the NaN rule of [`VectorHelper::max`].
    #[inline]
    fn reduce_max(v: Self::Vector) -> Self {
        reduce::<Self>(v, Self::max)
    }
}

/// Butterfly reduction: fold the upper half onto the lower half, halving the
/// stride until lane 0 holds the result. The pairing is fixed, so the result
/// is reproducible for a given build.
#[inline(always)]
fn reduce<T: VectorHelper>(mut v: T::Vector, op: impl Fn(T::Vector, T::Vector) -> T::Vector) -> T {
    let mut stride = T::SIZE / 2;
    while stride > 0 {
        v = op(v, T::swap_lanes(v, stride));
        stride /= 2;
    }
    T::first(v)
}
