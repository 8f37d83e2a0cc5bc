//! Lane-at-a-time sequences for operations without a vector instruction.
//!
//! Integer division, per-lane variable shifts and 32-bit multiply on
//! `Baseline` builds go through here, as does the half-away round used when
//! the target has no native rounding. Every kernel spills the register to its
//! array, applies a scalar op per lane and reloads.

use num_traits::{PrimInt, WrappingMul, Zero};

use crate::helper::VectorHelper;
use crate::mask::Mask;

#[inline(always)]
fn zip_with<T: VectorHelper>(
    a: T::Vector,
    b: T::Vector,
    f: impl Fn(T, T) -> T,
) -> T::Vector {
    let mut out = T::to_array(a);
    let rhs = T::to_array(b);
    for (x, &y) in out.as_mut().iter_mut().zip(rhs.as_ref()) {
        *x = f(*x, y);
    }
    T::load_unaligned(&out)
}

#[inline(always)]
fn map<T: VectorHelper>(a: T::Vector, f: impl Fn(T) -> T) -> T::Vector {
    let mut out = T::to_array(a);
    for x in out.as_mut() {
        *x = f(*x);
    }
    T::load_unaligned(&out)
}

/// Lane-wise wrapping multiply.
#[inline]
pub(crate) fn mul_each<T: VectorHelper + WrappingMul>(a: T::Vector, b: T::Vector) -> T::Vector {
    zip_with::<T>(a, b, |x, y| WrappingMul::wrapping_mul(&x, &y))
}

/// One integer quotient. `MIN / -1` wraps to `MIN`.
#[inline]
pub(crate) fn div_lane<T: PrimInt>(a: T, b: T) -> T {
    debug_assert!(!b.is_zero(), "integer division by zero in an active lane");
    if b.is_zero() {
        return <T as Zero>::zero();
    }
    a.checked_div(&b).unwrap_or(a)
}

/// Lane-wise integer division over every lane.
#[inline]
pub(crate) fn div_each<T: VectorHelper + PrimInt>(a: T::Vector, b: T::Vector) -> T::Vector {
    zip_with::<T>(a, b, div_lane)
}

/// Divide only the lanes selected by `mask`; the rest keep `a`.
///
/// Inactive lanes are never divided, so a zero divisor there is harmless.
#[inline]
pub(crate) fn div_where<T: VectorHelper + PrimInt>(
    a: T::Vector,
    b: T::Vector,
    mask: Mask<T::Vector>,
) -> T::Vector {
    let mut bits = T::mask_bits(mask);
    let mut out = T::to_array(a);
    let rhs = T::to_array(b);
    while bits != 0 {
        let i = bits.trailing_zeros() as usize;
        out.as_mut()[i] = div_lane(out.as_ref()[i], rhs.as_ref()[i]);
        bits &= bits - 1;
    }
    T::load_unaligned(&out)
}

/// Count lane read as unsigned; `None` when it shifts everything out.
#[inline(always)]
fn shift_count<T: PrimInt>(count: T) -> Option<usize> {
    let bits = (core::mem::size_of::<T>() * 8) as u32;
    match count.to_u32() {
        Some(n) if n < bits => Some(n as usize),
        _ => None,
    }
}

/// Lane-wise left shift by per-lane counts.
#[inline]
pub(crate) fn shl_each<T: VectorHelper + PrimInt>(v: T::Vector, count: T::Vector) -> T::Vector {
    zip_with::<T>(v, count, |x, c| match shift_count(c) {
        Some(n) => x << n,
        None => <T as Zero>::zero(),
    })
}

/// Lane-wise logical right shift by per-lane counts.
#[inline]
pub(crate) fn shr_each<T: VectorHelper + PrimInt>(v: T::Vector, count: T::Vector) -> T::Vector {
    zip_with::<T>(v, count, |x, c| match shift_count(c) {
        Some(n) => x.unsigned_shr(n as u32),
        None => <T as Zero>::zero(),
    })
}

macro_rules! round_half_away {
    ($name:ident, $t:ty, $int:ty, $bits:ty, $integral:expr) => {
        /// Round each lane half away from zero through a truncating integer
        /// conversion.
        ///
        /// Lanes too large to carry a fraction (2^23 for `f32`, 2^52 for `f64`)
        /// pass through unchanged, as do NaN and the infinities. The sign of a
        /// zero result follows the input.
        #[inline]
        pub(crate) fn $name(v: <$t as VectorHelper>::Vector) -> <$t as VectorHelper>::Vector {
            const SIGN: $bits = !(<$bits>::MAX >> 1);
            map::<$t>(v, |x| {
                let magnitude = <$t>::from_bits(x.to_bits() & !SIGN);
                if x.is_nan() || magnitude >= $integral {
                    return x;
                }
                let t = x as $int;
                let frac = x - t as $t;
                let r = if frac >= 0.5 {
                    t + 1
                } else if frac <= -0.5 {
                    t - 1
                } else {
                    t
                };
                <$t>::from_bits((r as $t).to_bits() | (x.to_bits() & SIGN))
            })
        }
    };
}

round_half_away!(round_half_away_f32, f32, i32, u32, 8_388_608.0);
round_half_away!(round_half_away_f64, f64, i64, u64, 4_503_599_627_370_496.0);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::FloatHelper;
    use bytemuck::cast;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use wide::i32x8;

    #[test]
    fn test_mul_each_wraps() {
        let a = i32::load_unaligned(&[i32::MAX, 2, -3, 4, 5, 6, 7, 8]);
        let b = i32::load_unaligned(&[2, 3, 4, -5, 6, 7, 8, 9]);
        assert_eq!(
            i32::to_array(mul_each::<i32>(a, b)),
            [-2, 6, -12, -20, 30, 42, 56, 72]
        );

        let a = u16::set(0x8001);
        assert_eq!(u16::to_array(mul_each::<u16>(a, u16::set(2))), [2; 16]);
    }

    #[test]
    fn test_div_lane() {
        assert_eq!(div_lane(7i32, 2), 3);
        assert_eq!(div_lane(-7i32, 2), -3);
        assert_eq!(div_lane(i32::MIN, -1), i32::MIN);
        assert_eq!(div_lane(i16::MIN, -1), i16::MIN);
        assert_eq!(div_lane(u32::MAX, 3), 0x5555_5555);
    }

    #[test]
    fn test_div_where_skips_inactive_lanes() {
        let a = u32::load_unaligned(&[10, 20, 30, 40, 50, 60, 70, 80]);
        let b = u32::load_unaligned(&[2, 0, 3, 0, 5, 0, 7, 0]);
        let mask = u32::mask_from_bits(0b0101_0101);
        assert_eq!(
            u32::to_array(div_where::<u32>(a, b, mask)),
            [5, 20, 10, 40, 10, 60, 10, 80]
        );
    }

    #[test]
    fn test_shifts_by_lane() {
        let v = u16::set(0x00F0);
        let counts: [u16; 16] = core::array::from_fn(|i| i as u16 + 1);
        let counts = u16::load_unaligned(&counts);
        let left = u16::to_array(shl_each::<u16>(v, counts));
        assert_eq!(left[0], 0x01E0);
        assert_eq!(left[11], 0);
        assert_eq!(left[15], 0);

        let right = u16::to_array(shr_each::<u16>(v, counts));
        assert_eq!(right[0], 0x0078);
        assert_eq!(right[7], 0);
    }

    #[test]
    fn test_shift_out_of_range_counts() {
        let v = i32::set(-1);
        let counts = i32::load_unaligned(&[0, 1, 31, 32, 33, -1, i32::MIN, 4]);
        assert_eq!(
            i32::to_array(shr_each::<i32>(v, counts)),
            [-1, i32::MAX, 1, 0, 0, 0, 0, 0x0FFF_FFFF]
        );
        assert_eq!(
            i32::to_array(shl_each::<i32>(v, counts)),
            [-1, -2, i32::MIN, 0, 0, 0, 0, -16]
        );
    }

    #[test]
    fn test_round_half_away() {
        let v = f32::load_unaligned(&[2.5, -2.5, 0.4999999, 1.5, -0.5, -0.3, 8_388_607.5, -7.5]);
        let r = f32::to_array(round_half_away_f32(v));
        assert_eq!(r, [3.0, -3.0, 0.0, 2.0, -1.0, -0.0, 8_388_608.0, -8.0]);
        assert_eq!(r[5].to_bits(), (-0.0f32).to_bits());

        let v = f64::load_unaligned(&[0.5, 2.4999999999, -7.5, 4_503_599_627_370_495.5]);
        assert_eq!(
            f64::to_array(round_half_away_f64(v)),
            [1.0, 2.0, -8.0, 4_503_599_627_370_496.0]
        );
    }

    #[test]
    fn test_round_half_away_passes_large_and_non_finite_through() {
        let v = f64::load_unaligned(&[1e10, -3e12, f64::INFINITY, f64::NAN]);
        let r = f64::to_array(round_half_away_f64(v));
        assert_eq!(&r[..3], &[1e10, -3e12, f64::INFINITY]);
        assert!(r[3].is_nan());

        let v = f32::load_unaligned(&[
            3e10,
            1e20,
            4_294_967_296.0,
            -3e10,
            f32::MAX,
            f32::MIN,
            f32::NEG_INFINITY,
            f32::NAN,
        ]);
        let r = f32::to_array(round_half_away_f32(v));
        assert_eq!(
            &r[..7],
            &[3e10, 1e20, 4_294_967_296.0, -3e10, f32::MAX, f32::MIN, f32::NEG_INFINITY]
        );
        assert!(r[7].is_nan());
    }

    fn is_halfway_f64(x: f64) -> bool {
        let frac = x - x as i64 as f64;
        frac == 0.5 || frac == -0.5
    }

    fn is_halfway_f32(x: f32) -> bool {
        let frac = x - x as i64 as f32;
        frac == 0.5 || frac == -0.5
    }

    // Away from halfway points the fallback must agree bit for bit with the
    // native ties-to-even rounding.
    #[test]
    fn test_round_half_away_matches_native_off_halfway() {
        let mut rng = StdRng::seed_from_u64(0x20D);
        for _ in 0..2000 {
            // raw bit patterns cover the full range; scaled values exercise
            // the conversion path
            let raw: [u64; 4] = rng.random();
            let scaled: [f64; 4] = core::array::from_fn(|_| rng.random_range(-1e7..1e7));
            for lanes in [raw.map(f64::from_bits), scaled] {
                let lanes = lanes.map(|x| if is_halfway_f64(x) { 0.25 } else { x });
                let v = f64::load_unaligned(&lanes);
                let ours = f64::to_array(round_half_away_f64(v));
                let native = f64::to_array(f64::round_native(v));
                for i in 0..4 {
                    if lanes[i].is_nan() {
                        assert!(ours[i].is_nan() && native[i].is_nan());
                    } else {
                        assert_eq!(ours[i].to_bits(), native[i].to_bits(), "round({})", lanes[i]);
                    }
                }
            }

            let raw: [u32; 8] = rng.random();
            let scaled: [f32; 8] = core::array::from_fn(|_| rng.random_range(-1e5f32..1e5));
            for lanes in [raw.map(f32::from_bits), scaled] {
                let lanes = lanes.map(|x| if is_halfway_f32(x) { 0.25 } else { x });
                let v = f32::load_unaligned(&lanes);
                let ours = f32::to_array(round_half_away_f32(v));
                let native = f32::to_array(f32::round_native(v));
                for i in 0..8 {
                    if lanes[i].is_nan() {
                        assert!(ours[i].is_nan() && native[i].is_nan());
                    } else {
                        assert_eq!(ours[i].to_bits(), native[i].to_bits(), "round({})", lanes[i]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_mul_each_matches_vector_multiply() {
        let mut rng = StdRng::seed_from_u64(0x3A1);
        for _ in 0..1000 {
            let a: [i32; 8] = rng.random();
            let b: [i32; 8] = rng.random();
            let vector: [i32; 8] = cast(i32x8::from(a) * i32x8::from(b));
            let lanes = mul_each::<i32>(i32::load_unaligned(&a), i32::load_unaligned(&b));
            assert_eq!(i32::to_array(lanes), vector);

            let a: [u32; 8] = rng.random();
            let b: [u32; 8] = rng.random();
            let vector: [u32; 8] = cast(cast::<_, i32x8>(a) * cast::<_, i32x8>(b));
            let lanes = mul_each::<u32>(u32::load_unaligned(&a), u32::load_unaligned(&b));
            assert_eq!(u32::to_array(lanes), vector);
        }
    }
}
