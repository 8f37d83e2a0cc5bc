//! The register operation table.
//!
//! [`VectorHelper`] is implemented once per element type (`f64`, `f32`, `i32`,
//! `u32`, `i16`, `u16`). Generic code written against it is monomorphised per
//! type, so dispatch is static and every call inlines down to the `wide`
//! register operation or the fallback sequence picked for the build's
//! [`LEVEL`](crate::level::LEVEL).
//!
//! Operations that only move or reinterpret bits (load, store, bitwise logic,
//! blend, lane permutation, mask conversion) have one implementation for all
//! types and are provided here. Arithmetic, comparison and the constants that
//! depend on the lane type are supplied by the per-type impls in
//! [`float`](crate::float) and [`int`](crate::int).
//!
//! # Preconditions
//!
//! Nothing in this table reports errors. Integer division by zero in a lane that
//! takes part in the division, and uniform shift counts not smaller than the lane
//! width, are caller bugs: the lane result is unspecified in release builds and
//! a `debug_assert!` fires in debug builds. Aligned loads and stores take
//! [`Aligned`] blocks, so misalignment cannot be expressed.

use core::fmt::Debug;
use core::ops::{BitAnd, BitOr, BitXor, Not};

use bytemuck::{Pod, Zeroable, cast};

use crate::aligned::Aligned;
use crate::error::{LaneError, Result};
use crate::mask::Mask;

/// Register size in bytes.
pub const REGISTER_BYTES: usize = 32;

pub(crate) mod sealed {
    pub trait Sealed {}

    impl Sealed for f64 {}
    impl Sealed for f32 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
}

/// Primitive operations on one 256-bit register of `Self` lanes.
///
/// Implemented for `f64`, `f32`, `i32`, `u32`, `i16` and `u16`. Sealed.
///
/// Method names clash with inherent methods of the primitive types (`abs`,
/// `min`, `max`, ...). Call through a generic parameter (`T::min`) or a
/// qualified path (`<f32 as VectorHelper>::min`).
pub trait VectorHelper: sealed::Sealed + Pod + Default + PartialEq + Debug + Send + Sync {
    /// The register type.
    type Vector: Pod
        + Debug
        + Send
        + Sync
        + BitAnd<Output = Self::Vector>
        + BitOr<Output = Self::Vector>
        + BitXor<Output = Self::Vector>
        + Not<Output = Self::Vector>;

    /// One register's worth of lanes in memory (`[Self; SIZE]`).
    type Array: Pod + Default + Debug + PartialEq + AsRef<[Self]> + AsMut<[Self]>;

    /// Number of lanes.
    const SIZE: usize;

    // ------------------------------------------------------------------
    // Memory
    // ------------------------------------------------------------------

    /// Load from a 32-byte aligned block.
    #[inline(always)]
    fn load(mem: &Aligned<Self::Array>) -> Self::Vector {
        cast(mem.0)
    }

    /// Load from memory with element alignment only.
    #[inline(always)]
    fn load_unaligned(mem: &Self::Array) -> Self::Vector {
        cast(*mem)
    }

    /// Store to a 32-byte aligned block.
    #[inline(always)]
    fn store(mem: &mut Aligned<Self::Array>, x: Self::Vector) {
        mem.0 = cast(x);
    }

    /// Store to memory with element alignment only.
    #[inline(always)]
    fn store_unaligned(mem: &mut Self::Array, x: Self::Vector) {
        *mem = cast(x);
    }

    /// Store only the lanes whose mask lane is true.
    ///
    /// Elements behind false lanes are not written at all.
    #[inline]
    fn store_unaligned_masked(mem: &mut Self::Array, x: Self::Vector, mask: Mask<Self::Vector>) {
        let bits = Self::mask_bits(mask);
        let src = Self::to_array(x);
        for (i, (dst, &lane)) in mem.as_mut().iter_mut().zip(src.as_ref()).enumerate() {
            if bits & (1 << i) != 0 {
                *dst = lane;
            }
        }
    }

    /// Store intended not to be re-read soon.
    ///
    /// Safe Rust has no portable non-temporal store, so this is an aligned
    /// store; the name is kept so generic callers can express the intent.
    #[inline(always)]
    fn store_streaming(mem: &mut Aligned<Self::Array>, x: Self::Vector) {
        Self::store(mem, x);
    }

    /// Copy the lanes out into an array.
    #[inline(always)]
    fn to_array(x: Self::Vector) -> Self::Array {
        cast(x)
    }

    /// Lane 0.
    #[inline(always)]
    fn first(x: Self::Vector) -> Self {
        Self::to_array(x).as_ref()[0]
    }

    // ------------------------------------------------------------------
    // Constants
    // ------------------------------------------------------------------

    /// Broadcast `a` to every lane.
    fn set(a: Self) -> Self::Vector;

    /// Additive identity.
    #[inline(always)]
    fn zero() -> Self::Vector {
        <Self::Vector as Zeroable>::zeroed()
    }

    /// Multiplicative identity.
    fn one() -> Self::Vector;

    /// Every bit set.
    #[inline(always)]
    fn allone() -> Self::Vector {
        !Self::zero()
    }

    // ------------------------------------------------------------------
    // Bitwise
    // ------------------------------------------------------------------

    /// `a | b`
    #[inline(always)]
    fn or_(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        a | b
    }

    /// `a & b`
    #[inline(always)]
    fn and_(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        a & b
    }

    /// `a ^ b`
    #[inline(always)]
    fn xor_(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        a ^ b
    }

    /// `!a & b`
    #[inline(always)]
    fn andnot_(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        !a & b
    }

    /// Per lane `if mask { b } else { a }`.
    #[inline(always)]
    fn blend(a: Self::Vector, b: Self::Vector, mask: Mask<Self::Vector>) -> Self::Vector {
        let m = mask.register();
        Self::or_(Self::and_(m, b), Self::andnot_(m, a))
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    /// Lane-wise sum. Wrapping for integers.
    fn add(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lane-wise difference. Wrapping for integers.
    fn sub(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lane-wise product. Wrapping for integers.
    fn mul(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lane-wise quotient.
    ///
    /// Integer lanes divide lane-at-a-time; `b` must not contain zero.
    fn div(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lane-wise minimum.
    ///
    /// For floats: `if a < b { a } else { b }`. A NaN in either operand yields
    /// `b`, and `min(-0.0, 0.0)` yields `0.0`, as the x86 `min` instructions do.
    fn min(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lane-wise maximum.
    ///
    /// For floats: `if a > b { a } else { b }`, with the same NaN rule as
    /// [`min`](Self::min).
    fn max(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lane-wise absolute value. Identity for unsigned types; `MIN` stays `MIN`
    /// for signed integers.
    fn abs(a: Self::Vector) -> Self::Vector;

    // ------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------

    /// `a == b`
    fn cmpeq(a: Self::Vector, b: Self::Vector) -> Mask<Self::Vector>;

    /// `!(a == b)`; true for NaN lanes.
    #[inline(always)]
    fn cmpneq(a: Self::Vector, b: Self::Vector) -> Mask<Self::Vector> {
        !Self::cmpeq(a, b)
    }

    /// `a < b`
    fn cmplt(a: Self::Vector, b: Self::Vector) -> Mask<Self::Vector>;

    /// `!(a < b)`; true for NaN lanes.
    #[inline(always)]
    fn cmpnlt(a: Self::Vector, b: Self::Vector) -> Mask<Self::Vector> {
        !Self::cmplt(a, b)
    }

    /// `a <= b`
    fn cmple(a: Self::Vector, b: Self::Vector) -> Mask<Self::Vector>;

    /// `!(a <= b)`; true for NaN lanes.
    #[inline(always)]
    fn cmpnle(a: Self::Vector, b: Self::Vector) -> Mask<Self::Vector> {
        !Self::cmple(a, b)
    }

    /// `a > b`
    #[inline(always)]
    fn cmpgt(a: Self::Vector, b: Self::Vector) -> Mask<Self::Vector> {
        Self::cmplt(b, a)
    }

    // ------------------------------------------------------------------
    // Lanes and masks
    // ------------------------------------------------------------------

    /// Lane `i` of the result is lane `i ^ stride` of `v`.
    ///
    /// `stride` must be a power of two below `SIZE`. This is the only shuffle
    /// horizontal reductions use, which fixes their combination order.
    #[inline]
    fn swap_lanes(v: Self::Vector, stride: usize) -> Self::Vector {
        debug_assert!(stride.is_power_of_two() && stride < Self::SIZE);
        let src = Self::to_array(v);
        let mut out = src;
        for (i, lane) in out.as_mut().iter_mut().enumerate() {
            *lane = src.as_ref()[i ^ stride];
        }
        Self::load_unaligned(&out)
    }

    /// Bit `i` is set when lane `i` of `mask` is true.
    #[inline]
    fn mask_bits(mask: Mask<Self::Vector>) -> u32 {
        let bytes: [u8; REGISTER_BYTES] = cast(mask.register());
        let width = REGISTER_BYTES / Self::SIZE;
        bytes
            .chunks_exact(width)
            .enumerate()
            .fold(0, |bits, (i, lane)| bits | (u32::from(lane[0] != 0) << i))
    }

    /// Mask whose lane `i` is true when bit `i` of `bits` is set.
    ///
    /// Bits at or above `SIZE` are ignored.
    #[inline]
    fn mask_from_bits(bits: u32) -> Mask<Self::Vector> {
        let mut bytes = [0u8; REGISTER_BYTES];
        let width = REGISTER_BYTES / Self::SIZE;
        for (i, lane) in bytes.chunks_exact_mut(width).enumerate() {
            if bits & (1 << i) != 0 {
                lane.fill(0xFF);
            }
        }
        Mask::from_register_unchecked(cast(bytes))
    }

    /// Reinterpret a register as a mask, checking every lane is all-ones or
    /// all-zeros.
    fn mask_from_register(v: Self::Vector) -> Result<Mask<Self::Vector>> {
        let bytes: [u8; REGISTER_BYTES] = cast(v);
        let width = REGISTER_BYTES / Self::SIZE;
        for (lane, chunk) in bytes.chunks_exact(width).enumerate() {
            let full = chunk.iter().all(|&b| b == 0xFF);
            let empty = chunk.iter().all(|&b| b == 0);
            if !full && !empty {
                return Err(LaneError::PartialMask { lane });
            }
        }
        Ok(Mask::from_register_unchecked(v))
    }
}

/// Operations that only exist for floating-point lanes.
pub trait FloatHelper: VectorHelper {
    /// Lane-wise square root.
    fn sqrt(x: Self::Vector) -> Self::Vector;

    /// `1 / sqrt(x)`, computed with a full division.
    #[inline(always)]
    fn rsqrt(x: Self::Vector) -> Self::Vector {
        Self::div(Self::one(), Self::sqrt(x))
    }

    /// `1 / x`, computed with a full division.
    #[inline(always)]
    fn reciprocal(x: Self::Vector) -> Self::Vector {
        Self::div(Self::one(), x)
    }

    /// Flip the sign bit of every lane, NaN and zero included.
    fn negate(x: Self::Vector) -> Self::Vector;

    /// True for NaN lanes.
    #[inline(always)]
    fn is_nan(x: Self::Vector) -> Mask<Self::Vector> {
        Self::cmpneq(x, x)
    }

    /// True for lanes that are neither infinite nor NaN.
    #[inline(always)]
    fn is_finite(x: Self::Vector) -> Mask<Self::Vector> {
        // 0 * inf and 0 * NaN are NaN, which never compares equal
        let z = Self::mul(Self::zero(), x);
        Self::cmpeq(z, z)
    }

    /// Round to nearest, ties to even, with the hardware rounding instruction.
    ///
    /// Only meaningful on [`Extended`](crate::level::ExtensionLevel::Extended)
    /// builds; elsewhere `wide` emulates it.
    /// [`DerivedOps::round`](crate::DerivedOps::round) picks the strategy.
    fn round_native(x: Self::Vector) -> Self::Vector;

    /// The biased exponent field of every lane, as a float.
    ///
    /// The sign bit is ignored. Zero and denormal lanes give 0.
    fn exponent_field(x: Self::Vector) -> Self::Vector;

    /// `a * b + c`, fused when the target has FMA.
    ///
    /// Unlike the other operations this one is not value-transparent across
    /// builds: a fused result is rounded once, an unfused one twice.
    fn fused_multiply_add(a: Self::Vector, b: Self::Vector, c: Self::Vector) -> Self::Vector;
}

/// Operations that only exist for integer lanes.
///
/// Right shifts are logical for signed and unsigned types alike.
pub trait IntHelper: VectorHelper {
    /// Shift each lane left by the matching lane of `count`.
    ///
    /// Count lanes are read as unsigned; a count not smaller than the lane
    /// width gives 0.
    fn sll(v: Self::Vector, count: Self::Vector) -> Self::Vector;

    /// Shift each lane right (logical) by the matching lane of `count`.
    ///
    /// Count lanes are read as unsigned; a count not smaller than the lane
    /// width gives 0.
    fn srl(v: Self::Vector, count: Self::Vector) -> Self::Vector;

    /// Shift every lane left by `count`, which must be below the lane width.
    fn slli(v: Self::Vector, count: u32) -> Self::Vector;

    /// Shift every lane right (logical) by `count`, which must be below the lane
    /// width.
    fn srli(v: Self::Vector, count: u32) -> Self::Vector;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: VectorHelper>(data: T::Array) {
        let v = T::load_unaligned(&data);
        let mut out = T::Array::default();
        T::store_unaligned(&mut out, v);
        assert_eq!(bytemuck::bytes_of(&out), bytemuck::bytes_of(&data));

        let aligned = Aligned(data);
        let mut out = Aligned(T::Array::default());
        T::store(&mut out, T::load(&aligned));
        assert_eq!(bytemuck::bytes_of(&out.0), bytemuck::bytes_of(&data));

        let mut out = Aligned(T::Array::default());
        T::store_streaming(&mut out, T::load(&aligned));
        assert_eq!(bytemuck::bytes_of(&out.0), bytemuck::bytes_of(&data));
    }

    #[test]
    fn test_roundtrip_special_bit_patterns() {
        // NaN payloads, signalling NaN, denormals, signed zero
        let f = [
            f32::from_bits(0x7fc0_1234),
            f32::from_bits(0xff80_0001),
            f32::from_bits(0x0000_0001),
            f32::from_bits(0x8000_0000),
            f32::INFINITY,
            f32::MIN_POSITIVE / 3.0,
            -1.5,
            0.0,
        ];
        roundtrip::<f32>(f);

        let d = [
            f64::from_bits(0x7ff8_dead_beef_0001),
            f64::from_bits(0x0000_0000_0000_0001),
            -0.0,
            f64::NEG_INFINITY,
        ];
        roundtrip::<f64>(d);

        roundtrip::<i32>([i32::MIN, -1, 0, 1, i32::MAX, 7, -7, 42]);
        roundtrip::<u32>([u32::MAX, 0, 1, 0x8000_0000, 5, 6, 7, 8]);
        roundtrip::<i16>(core::array::from_fn(|i| (i as i16 - 8) * 4000));
        roundtrip::<u16>(core::array::from_fn(|i| (i as u16) * 4369));
    }

    #[test]
    fn test_masked_store_leaves_inactive_untouched() {
        let mut mem = [-1i32; 8];
        let x = i32::load_unaligned(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let mask = i32::mask_from_bits(0b1000_0101);
        i32::store_unaligned_masked(&mut mem, x, mask);
        assert_eq!(mem, [0, -1, 2, -1, -1, -1, -1, 7]);

        let mut mem = [9.0f64; 4];
        f64::store_unaligned_masked(&mut mem, f64::set(1.0), f64::mask_from_bits(0));
        assert_eq!(mem, [9.0; 4]);
    }

    #[test]
    fn test_constants() {
        assert_eq!(f32::to_array(f32::zero()), [0.0; 8]);
        assert_eq!(f64::to_array(f64::one()), [1.0; 4]);
        assert_eq!(u16::to_array(u16::allone()), [u16::MAX; 16]);
        assert_eq!(i32::to_array(i32::allone()), [-1; 8]);
        assert_eq!(
            f32::to_array(f32::allone()).map(f32::to_bits),
            [u32::MAX; 8]
        );
    }

    #[test]
    fn test_bitwise() {
        let a = u32::load_unaligned(&[0b1100; 8]);
        let b = u32::load_unaligned(&[0b1010; 8]);
        assert_eq!(u32::to_array(u32::or_(a, b)), [0b1110; 8]);
        assert_eq!(u32::to_array(u32::and_(a, b)), [0b1000; 8]);
        assert_eq!(u32::to_array(u32::xor_(a, b)), [0b0110; 8]);
        assert_eq!(u32::to_array(u32::andnot_(a, b)), [0b0010; 8]);
    }

    #[test]
    fn test_blend_and_swap_lanes() {
        let a = i16::load_unaligned(&core::array::from_fn(|i| i as i16));
        let b = i16::set(-1);
        let blended = i16::to_array(i16::blend(a, b, i16::mask_from_bits(0x00FF)));
        assert_eq!(&blended[..8], &[-1; 8]);
        assert_eq!(&blended[8..], &[8, 9, 10, 11, 12, 13, 14, 15]);

        let swapped = i16::to_array(i16::swap_lanes(a, 8));
        assert_eq!(swapped[0], 8);
        assert_eq!(swapped[15], 7);

        let swapped = f64::to_array(f64::swap_lanes(f64::load_unaligned(&[1.0, 2.0, 3.0, 4.0]), 1));
        assert_eq!(swapped, [2.0, 1.0, 4.0, 3.0]);
    }

    #[test]
    fn test_mask_bits_roundtrip() {
        for bits in [0u32, 1, 0b1010_0101, 0xFF] {
            assert_eq!(f32::mask_bits(f32::mask_from_bits(bits)), bits);
            assert_eq!(i32::mask_bits(i32::mask_from_bits(bits)), bits);
        }
        assert_eq!(f64::mask_bits(f64::mask_from_bits(0xFF)), 0xF);
        assert_eq!(u16::mask_bits(u16::mask_from_bits(0xDEAD_BEEF)), 0xBEEF);
    }

    #[test]
    fn test_mask_from_register_validates() {
        let ok = u32::load_unaligned(&[0, u32::MAX, 0, 0, u32::MAX, 0, 0, 0]);
        let mask = u32::mask_from_register(ok).unwrap();
        assert_eq!(u32::mask_bits(mask), 0b0001_0010);

        let partial = u32::load_unaligned(&[0, u32::MAX, 0, 0x00FF_FFFF, 0, 0, 0, 0]);
        assert_eq!(
            u32::mask_from_register(partial).unwrap_err(),
            LaneError::PartialMask { lane: 3 }
        );

        let one = f32::one();
        assert_eq!(
            f32::mask_from_register(one).unwrap_err(),
            LaneError::PartialMask { lane: 0 }
        );
    }
}
