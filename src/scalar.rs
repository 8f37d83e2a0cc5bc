//! Single-value logarithm.
//!
//! Same constants and operation order as [`Logarithm`](crate::Logarithm), so a
//! scalar result equals the matching register lane bit for bit. Slice helpers
//! use these for the tail that does not fill a register.

use crate::fast_math::{F32_LOG, F64_LOG, Kernel, LogConstants};

macro_rules! scalar_log {
    ($name:ident, $t:ty, $bits:ty, $mantissa_bits:literal, $exponent_mask:literal, $c:ident) => {
        /// Natural logarithm of a single value, edge cases included.
        #[inline]
        pub fn $name(x: $t) -> $t {
            let c: &LogConstants<$t> = &$c;

            // negative and NaN inputs: all bits set, as the register path gives
            if x.is_nan() || x < 0.0 {
                return <$t>::from_bits(<$bits>::MAX);
            }
            if x == 0.0 {
                return c.neg_infinity;
            }
            if x == c.infinity {
                return c.infinity;
            }

            let x = if x > c.min_positive { x } else { c.min_positive };
            let bits = x.to_bits();
            let mut e = ((bits >> $mantissa_bits) & $exponent_mask) as $t - c.exponent_offset;

            let mut x = <$t>::from_bits((bits & c.mantissa_mask.to_bits()) | c.half.to_bits());
            if x < c.sqrt_half {
                x = (x - 1.0) + x;
                e -= 1.0;
            } else {
                x -= 1.0;
            }

            let z = x * x;
            let horner = |init: $t, coefficients: &[$t]| {
                coefficients.iter().fold(init, |y, &k| y * x + k)
            };
            let mut y = match c.kernel {
                Kernel::Polynomial { p } => horner(p[0], &p[1..]) * x,
                Kernel::Rational { p, q } => (horner(p[0], &p[1..]) * x) / horner(x + q[0], &q[1..]),
            };
            y *= z;

            y -= e * c.ln2_lo;
            y -= z * c.half;
            x += y;
            x + e * c.ln2_hi
        }
    };
}

scalar_log!(log_f64, f64, u64, 52, 0x7FF, F64_LOG);
scalar_log!(log_f32, f32, u32, 23, 0xFF, F32_LOG);
