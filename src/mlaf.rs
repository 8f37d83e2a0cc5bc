//! Multiply-add that fuses when the target has hardware FMA.
//!
//! `wide` lowers `mul_add` to the fused instruction on x86 with the FMA
//! feature and on aarch64 NEON; anywhere else the product is rounded before the
//! add. [`FUSED`] reports which one this build got.

use wide::{f32x8, f64x4};

/// True when [`FloatHelper::fused_multiply_add`](crate::FloatHelper::fused_multiply_add)
/// rounds once.
pub const FUSED: bool = cfg!(any(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "fma"
    ),
    all(target_arch = "aarch64", target_feature = "neon")
));

/// Computes `a * b + c` (reordered FMA for ergonomics).
#[inline(always)]
pub(crate) fn fmla<T>(a: T, b: T, c: T) -> T
where
    T: MlaCompatible,
{
    T::mla(c, a, b)
}

/// Registers with a multiply-accumulate.
pub(crate) trait MlaCompatible: Sized {
    /// `acc + a * b`
    fn mla(acc: Self, a: Self, b: Self) -> Self;
}

impl MlaCompatible for f32x8 {
    #[inline(always)]
    fn mla(acc: Self, a: Self, b: Self) -> Self {
        a.mul_add(b, acc)
    }
}

impl MlaCompatible for f64x4 {
    #[inline(always)]
    fn mla(acc: Self, a: Self, b: Self) -> Self {
        a.mul_add(b, acc)
    }
}
