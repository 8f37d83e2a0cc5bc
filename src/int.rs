//! Operation table for `i32`, `u32`, `i16` and `u16`.
//!
//! Arithmetic and comparisons run on the signed register of the same width:
//! wrapping add/sub/mul produce the same bits either way, and unsigned ordering
//! is recovered by flipping the top bit of both operands before a signed
//! compare. Division and per-lane shifts have no vector instruction and go
//! through [`fallback`](crate::fallback).

use bytemuck::cast;
use wide::{CmpEq, CmpGt, i16x16, i32x8, u16x16, u32x8};

use crate::derived::DerivedOps;
use crate::fallback;
use crate::helper::{IntHelper, VectorHelper};
use crate::level::{ExtensionLevel, LEVEL};
use crate::mask::Mask;

#[inline(always)]
fn abs_i32x8(s: i32x8) -> i32x8 {
    let sign = s >> 31;
    (s ^ sign) - sign
}

#[inline(always)]
fn abs_i16x16(s: i16x16) -> i16x16 {
    let sign = s >> 15;
    (s ^ sign) - sign
}

macro_rules! impl_int_helper {
    (
        $t:ty, $v:ident, $n:literal,
        signed: $s:ty, $sv:ident,
        unsigned: $u:ty,
        bias: $bias:expr,
        abs: $abs:expr,
        vector_mul: $mul_level:expr
    ) => {
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
                $v::splat(1)
            }

            #[inline(always)]
            fn add(a: $v, b: $v) -> $v {
                let (a, b): ($sv, $sv) = (cast(a), cast(b));
                cast(a + b)
            }

            #[inline(always)]
            fn sub(a: $v, b: $v) -> $v {
                let (a, b): ($sv, $sv) = (cast(a), cast(b));
                cast(a - b)
            }

            #[inline(always)]
            fn mul(a: $v, b: $v) -> $v {
                if LEVEL >= $mul_level {
                    let (a, b): ($sv, $sv) = (cast(a), cast(b));
                    cast(a * b)
                } else {
                    fallback::mul_each::<$t>(a, b)
                }
            }

            #[inline(always)]
            fn div(a: $v, b: $v) -> $v {
                fallback::div_each::<$t>(a, b)
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
                ($abs)(a)
            }

            #[inline(always)]
            fn cmpeq(a: $v, b: $v) -> Mask<$v> {
                let (a, b): ($sv, $sv) = (cast(a), cast(b));
                Mask::from_register_unchecked(cast(a.simd_eq(b)))
            }

            #[inline(always)]
            fn cmplt(a: $v, b: $v) -> Mask<$v> {
                let bias = $v::splat($bias);
                let (a, b): ($sv, $sv) = (cast(a ^ bias), cast(b ^ bias));
                Mask::from_register_unchecked(cast(b.simd_gt(a)))
            }

            #[inline(always)]
            fn cmple(a: $v, b: $v) -> Mask<$v> {
                !<$t as VectorHelper>::cmplt(b, a)
            }
        }

        impl IntHelper for $t {
            #[inline(always)]
            fn sll(v: $v, count: $v) -> $v {
                fallback::shl_each::<$t>(v, count)
            }

            #[inline(always)]
            fn srl(v: $v, count: $v) -> $v {
                fallback::shr_each::<$t>(v, count)
            }

            #[inline(always)]
            fn slli(v: $v, count: u32) -> $v {
                debug_assert!(count < <$t>::BITS, "shift count {count} out of range");
                let s: $sv = cast(v);
                cast(s << count as i32)
            }

            #[inline(always)]
            fn srli(v: $v, count: u32) -> $v {
                debug_assert!(count < <$t>::BITS, "shift count {count} out of range");
                let s: $sv = cast(v);
                // arithmetic shift, then clear the sign-extended bits
                let keep = $sv::splat((<$u>::MAX >> count) as $s);
                cast((s >> count as i32) & keep)
            }
        }

        impl DerivedOps for $t {
            #[inline(always)]
            fn div_masked(a: $v, b: $v, mask: Mask<$v>) -> $v {
                fallback::div_where::<$t>(a, b, mask)
            }

            #[inline(always)]
            fn round(x: $v) -> $v {
                x
            }
        }
    };
}

impl_int_helper!(
    i32, i32x8, 8,
    signed: i32, i32x8,
    unsigned: u32,
    bias: 0,
    abs: abs_i32x8,
    vector_mul: ExtensionLevel::Extended
);
impl_int_helper!(
    u32, u32x8, 8,
    signed: i32, i32x8,
    unsigned: u32,
    bias: 0x8000_0000,
    abs: |a: u32x8| a,
    vector_mul: ExtensionLevel::Extended
);
impl_int_helper!(
    i16, i16x16, 16,
    signed: i16, i16x16,
    unsigned: u16,
    bias: 0,
    abs: abs_i16x16,
    vector_mul: ExtensionLevel::Baseline
);
impl_int_helper!(
    u16, u16x16, 16,
    signed: i16, i16x16,
    unsigned: u16,
    bias: 0x8000,
    abs: |a: u16x16| a,
    vector_mul: ExtensionLevel::Baseline
);
