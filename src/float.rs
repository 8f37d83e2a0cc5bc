//! Operation table for `f32` (`f32x8`) and `f64` (`f64x4`).
//!
//! Comparisons map onto `wide`'s lane compares, which already produce
//! all-ones/all-zeros lanes. `min`/`max` are built from compare + blend so the
//! NaN and signed-zero behaviour is the same on every target.

use bytemuck::cast;
use wide::{CmpEq, CmpLe, CmpLt, f32x8, f64x4, i32x8, u32x8, u64x4};

use crate::derived::DerivedOps;
use crate::fallback;
use crate::helper::{FloatHelper, VectorHelper};
use crate::level::{ExtensionLevel, LEVEL};
use crate::mask::Mask;
use crate::mlaf::fmla;

/// 2^52, the bit pattern used to turn a small integer into an `f64` exactly.
const TWO_POW_52: f64 = 4_503_599_627_370_496.0;

#[inline(always)]
fn exponent_field_f32(x: f32x8) -> f32x8 {
    let bits: u32x8 = cast(x);
    let field: i32x8 = cast((bits >> 23) & u32x8::splat(0xFF));
    f32x8::from_i32x8(field)
}

// No 64-bit int to float conversion in `wide`: OR the 11-bit field into the
// mantissa of 2^52 and subtract 2^52 back out.
#[inline(always)]
fn exponent_field_f64(x: f64x4) -> f64x4 {
    let bits: u64x4 = cast(x);
    let field = (bits >> 52) & u64x4::splat(0x7FF);
    let biased: f64x4 = cast(field | u64x4::splat(TWO_POW_52.to_bits()));
    biased - f64x4::splat(TWO_POW_52)
}

macro_rules! impl_float_helper {
    ($t:ty, $v:ident, $n:literal, $exponent_field:ident, $round_fallback:path) => {
        impl VectorHelper for $t {
            type Vector = $v;
            type Array = [$t; $n];

            const SIZE: usize = $n;

            #[inline(always)]
            fn set(a: $t) -> $v {
                $v::splat(a)
            }

            #[inline(always)]
            fn one() -> $v {
                $v::splat(1.0)
            }

            #[inline(always)]
            fn add(a: $v, b: $v) -> $v {
                a + b
            }

            #[inline(always)]
            fn sub(a: $v, b: $v) -> $v {
                a - b
            }

            #[inline(always)]
            fn mul(a: $v, b: $v) -> $v {
                a * b
            }

            #[inline(always)]
            fn div(a: $v, b: $v) -> $v {
                a / b
            }

            #[inline(always)]
            fn min(a: $v, b: $v) -> $v {
                <$t as VectorHelper>::blend(b, a, <$t as VectorHelper>::cmplt(a, b))
            }

            #[inline(always)]
            fn max(a: $v, b: $v) -> $v {
                <$t as VectorHelper>::blend(b, a, <$t as VectorHelper>::cmpgt(a, b))
            }

            #[inline(always)]
            fn abs(a: $v) -> $v {
                <$t as VectorHelper>::andnot_($v::splat(-0.0), a)
            }

            #[inline(always)]
            fn cmpeq(a: $v, b: $v) -> Mask<$v> {
                Mask::from_register_unchecked(a.simd_eq(b))
            }

            #[inline(always)]
            fn cmplt(a: $v, b: $v) -> Mask<$v> {
                Mask::from_register_unchecked(a.simd_lt(b))
            }

            #[inline(always)]
            fn cmple(a: $v, b: $v) -> Mask<$v> {
                Mask::from_register_unchecked(a.simd_le(b))
            }
        }

        impl FloatHelper for $t {
            #[inline(always)]
            fn sqrt(x: $v) -> $v {
                x.sqrt()
            }

            #[inline(always)]
            fn negate(x: $v) -> $v {
                x ^ $v::splat(-0.0)
            }

            #[inline(always)]
            fn round_native(x: $v) -> $v {
                x.round()
            }

            #[inline(always)]
            fn exponent_field(x: $v) -> $v {
                $exponent_field(x)
            }

            #[inline(always)]
            fn fused_multiply_add(a: $v, b: $v, c: $v) -> $v {
                fmla(a, b, c)
            }
        }

        impl DerivedOps for $t {
            #[inline(always)]
            fn div_masked(a: $v, b: $v, mask: Mask<$v>) -> $v {
                <$t as VectorHelper>::blend(a, a / b, mask)
            }

            #[inline(always)]
            fn round(x: $v) -> $v {
                match LEVEL {
                    ExtensionLevel::Extended => <$t as FloatHelper>::round_native(x),
                    ExtensionLevel::Baseline => $round_fallback(x),
                }
            }
        }
    };
}

impl_float_helper!(f32, f32x8, 8, exponent_field_f32, fallback::round_half_away_f32);
impl_float_helper!(f64, f64x4, 4, exponent_field_f64, fallback::round_half_away_f64);
