//! Natural logarithm for `f32` and `f64` registers.
//!
//! Cephes `log`/`logf` in the branch-free form of Pommier's `sse_mathfun`:
//! split `x = m * 2^e` with `m` in `[sqrt(1/2), sqrt(2))`, approximate
//! `log(1 + (m - 1))` with a fixed polynomial (single precision) or rational
//! function (double precision), then add `e * ln 2` in two parts so the large
//! term stays exact. No step uses FMA, so [`scalar`](crate::scalar) reproduces
//! every lane bit for bit.
//!
//! Accuracy: about 1 ULP for `f64` and at most 3 ULP for `f32` over normal
//! inputs. Denormal inputs are clamped to the smallest normal value first.

use crate::helper::FloatHelper;

/// Polynomial part of the approximation, highest-order coefficient first.
pub(crate) enum Kernel<T: 'static> {
    /// `x * z * p(x)`
    Polynomial { p: &'static [T] },
    /// `x * z * p(x) / q(x)` with `q` monic; the leading 1 is implied.
    Rational { p: &'static [T], q: &'static [T] },
}

pub(crate) struct LogConstants<T: 'static> {
    /// Clears the exponent field, keeps sign and mantissa.
    pub mantissa_mask: T,
    pub half: T,
    pub min_positive: T,
    pub infinity: T,
    pub neg_infinity: T,
    /// Exponent bias minus one: `e = field - offset` puts `m` in `[0.5, 1)`.
    pub exponent_offset: T,
    pub sqrt_half: T,
    pub ln2_lo: T,
    pub ln2_hi: T,
    pub kernel: Kernel<T>,
}

const P_F64: [f64; 6] = [
    f64::from_bits(0x3f1a_b4c2_93c3_1bb0), // 1.01875663804580931796e-4
    f64::from_bits(0x3fdf_d6f5_3f56_52f2), // 4.97494994976747001425e-1
    f64::from_bits(0x4012_d2ba_ed92_6911), // 4.70579119878881725854
    f64::from_bits(0x402c_ff72_c63e_eb2e), // 1.44989225341610930846e1
    f64::from_bits(0x4031_efd6_924b_c84d), // 1.79368678507819816313e1
    f64::from_bits(0x401e_d563_7d7e_dcf8), // 7.70838733755885391666
];

const Q_F64: [f64; 5] = [
    f64::from_bits(0x4026_9320_ae97_ef8e), // 1.12873587189167450590e1
    f64::from_bits(0x4046_9d2c_4e19_c033), // 4.52279145837532221105e1
    f64::from_bits(0x4054_bf33_a326_bdbd), // 8.29875266912776603211e1
    f64::from_bits(0x4051_c9e2_eb5e_ae21), // 7.11544750618563894466e1
    f64::from_bits(0x4037_200a_9e1f_25b2), // 2.31251620126765340583e1
];

#[allow(clippy::excessive_precision)]
const P_F32: [f32; 9] = [
    7.037_683_629_2e-2,
    -1.151_461_031_0e-1,
    1.167_699_874_0e-1,
    -1.242_014_084_6e-1,
    1.424_932_278_7e-1,
    -1.666_805_766_5e-1,
    2.000_071_476_5e-1,
    -2.499_999_399_3e-1,
    3.333_333_117_4e-1,
];

#[allow(clippy::excessive_precision)]
pub(crate) const F64_LOG: LogConstants<f64> = LogConstants {
    mantissa_mask: f64::from_bits(0x800f_ffff_ffff_ffff),
    half: 0.5,
    min_positive: f64::MIN_POSITIVE,
    infinity: f64::INFINITY,
    neg_infinity: f64::NEG_INFINITY,
    exponent_offset: 1022.0,
    sqrt_half: core::f64::consts::FRAC_1_SQRT_2,
    ln2_lo: 2.121_944_400_546_905_827_679e-4,
    ln2_hi: 0.693_359_375,
    kernel: Kernel::Rational {
        p: &P_F64,
        q: &Q_F64,
    },
};

#[allow(clippy::excessive_precision)]
pub(crate) const F32_LOG: LogConstants<f32> = LogConstants {
    mantissa_mask: f32::from_bits(0x807f_ffff),
    half: 0.5,
    min_positive: f32::MIN_POSITIVE,
    infinity: f32::INFINITY,
    neg_infinity: f32::NEG_INFINITY,
    exponent_offset: 126.0,
    sqrt_half: core::f32::consts::FRAC_1_SQRT_2,
    ln2_lo: 2.121_944_40e-4,
    ln2_hi: 0.693_359_375,
    kernel: Kernel::Polynomial { p: &P_F32 },
};

/// Natural logarithm of every lane.
///
/// | input        | result |
/// |--------------|--------|
/// | `+0`, `-0`   | `-inf` |
/// | `< 0`, NaN   | NaN    |
/// | `+inf`       | `+inf` |
/// | denormal     | `log(MIN_POSITIVE)` |
pub trait Logarithm: FloatHelper {
    /// `ln(x)` lane-wise.
    fn log(x: Self::Vector) -> Self::Vector;
}

impl Logarithm for f32 {
    #[inline]
    fn log(x: Self::Vector) -> Self::Vector {
        log_cephes::<f32>(x, &F32_LOG)
    }
}

impl Logarithm for f64 {
    #[inline]
    fn log(x: Self::Vector) -> Self::Vector {
        log_cephes::<f64>(x, &F64_LOG)
    }
}

#[inline(always)]
fn horner<T: FloatHelper>(x: T::Vector, init: T::Vector, coefficients: &[T]) -> T::Vector {
    coefficients
        .iter()
        .fold(init, |y, &c| T::add(T::mul(y, x), T::set(c)))
}

#[inline(always)]
fn log_cephes<T: FloatHelper>(x: T::Vector, c: &LogConstants<T>) -> T::Vector {
    let zero = T::zero();
    let one = T::one();
    let half = T::set(c.half);

    // !(0 <= x) also catches NaN
    let invalid = T::cmpnle(zero, x);
    let is_zero = T::cmpeq(x, zero);
    let is_inf = T::cmpeq(x, T::set(c.infinity));

    let x = T::max(x, T::set(c.min_positive));
    let mut e = T::sub(T::exponent_field(x), T::set(c.exponent_offset));

    // m in [0.5, 1)
    let mut x = T::or_(T::and_(x, T::set(c.mantissa_mask)), half);

    // below sqrt(1/2): use 2m - 1 and borrow one from the exponent
    let small = T::cmplt(x, T::set(c.sqrt_half)).register();
    let tmp = T::and_(x, small);
    x = T::sub(x, one);
    e = T::sub(e, T::and_(one, small));
    x = T::add(x, tmp);

    let z = T::mul(x, x);
    let mut y = match c.kernel {
        Kernel::Polynomial { p } => {
            let y = horner::<T>(x, T::set(p[0]), &p[1..]);
            T::mul(y, x)
        }
        Kernel::Rational { p, q } => {
            let num = horner::<T>(x, T::set(p[0]), &p[1..]);
            let den = horner::<T>(x, T::add(x, T::set(q[0])), &q[1..]);
            T::div(T::mul(num, x), den)
        }
    };
    y = T::mul(y, z);

    y = T::sub(y, T::mul(e, T::set(c.ln2_lo)));
    y = T::sub(y, T::mul(z, half));
    x = T::add(x, y);
    x = T::add(x, T::mul(e, T::set(c.ln2_hi)));

    x = T::or_(x, invalid.register());
    x = T::blend(x, T::set(c.neg_infinity), is_zero);
    T::blend(x, T::set(c.infinity), is_inf)
}
