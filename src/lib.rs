//! Per-element-type SIMD register operations with portable semantics.
//!
//! This crate gives every supported element type (`f64`, `f32`, `i32`, `u32`,
//! `i16`, `u16`) one fixed table of 256-bit register operations: load/store,
//! arithmetic, comparison, bitwise logic, min/max, masked execution,
//! horizontal reduction, rounding and a natural logarithm. The results are the
//! same on every target, down to NaN, signed zero and infinity handling.
//!
//! # Module Organization
//!
//! - [`VectorHelper`] - the register operation table, one impl per element type
//! - [`FloatHelper`] / [`IntHelper`] - operations that only exist for one kind of lane
//! - [`DerivedOps`] - masked multiply/divide, rounding and reductions
//! - [`Logarithm`] - Cephes natural logarithm for `f32` and `f64` registers
//! - [`simd`] - slice-level logarithm with runtime dispatch
//! - [`scalar`] - single-value logarithm, bit-identical to a register lane
//! - [`level`] - build-time extension level and runtime capability report
//!
//! # Quick Start
//!
//! ```rust
//! use lanewise::{DerivedOps, VectorHelper};
//!
//! let a = f32::load_unaligned(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
//! let b = f32::set(0.0);
//!
//! // divide only where the divisor is non-zero
//! let nonzero = f32::cmpneq(b, f32::zero());
//! let q = f32::div_masked(a, b, nonzero);
//! assert_eq!(f32::to_array(q), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
//!
//! assert_eq!(f32::reduce_add(a), 36.0);
//! ```
//!
//! # Generic Code
//!
//! Write algorithms once against the traits; they compile to the same
//! instructions as hand-written per-type code:
//!
//! ```rust
//! use lanewise::{DerivedOps, VectorHelper};
//!
//! fn clamp_sum<T: DerivedOps>(v: T::Vector, lo: T, hi: T) -> T {
//!     let clamped = T::min(T::max(v, T::set(lo)), T::set(hi));
//!     T::reduce_add(clamped)
//! }
//!
//! let v = i16::load_unaligned(&[-50, 3, 7, 90, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1]);
//! assert_eq!(clamp_sum::<i16>(v, 0, 10), 28);
//! ```
//!
//! # Logarithm
//!
//! ```rust
//! use lanewise::{Logarithm, VectorHelper};
//!
//! let x = f64::load_unaligned(&[1.0, 2.0, 4.0, 8.0]);
//! let ln = f64::to_array(<f64 as Logarithm>::log(x));
//! assert!((ln[3] - 2.079_441_541_679_836).abs() < 1e-15);
//!
//! let mut values = vec![0.5f32; 100];
//! lanewise::simd::log_f32_slice(&mut values);
//! ```
//!
//! # Method Names
//!
//! `abs`, `min`, `max`, `round`, `sqrt`, `log`, `is_nan` and `is_finite` are
//! also inherent methods of the primitive float types, and `min`/`max` come
//! from `Ord` for integers. Through a generic parameter (`T::min`) the trait
//! method is picked; on a concrete type spell it out:
//! `<f32 as VectorHelper>::min(a, b)`.
//!
//! # Feature Flags
//!
//! - `std` (default): Enable std library support
//! - `detect` (default): [`level::Capabilities`] runtime probing via archmage
//! - `force-baseline`: Use the `Baseline` fallback sequences even when the
//!   target has the extended instructions
//!
//! # `no_std` Support
//!
//! This crate is `no_std` compatible. Disable the default features:
//!
//! ```toml
//! lanewise = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

// ============================================================================
// Public modules
// ============================================================================

/// Build-time extension level and runtime capability report.
pub mod level;

/// Slice-level logarithm with runtime dispatch.
pub mod simd;

/// Single-value logarithm.
pub mod scalar;

// ============================================================================
// Internal modules
// ============================================================================

mod aligned;
mod derived;
mod error;
mod fallback;
mod fast_math;
mod float;
mod helper;
mod int;
mod mask;
mod mlaf;

// ============================================================================
// Re-exports
// ============================================================================

pub use aligned::{Aligned, REGISTER_ALIGN};
pub use derived::DerivedOps;
pub use error::{LaneError, Result};
pub use fast_math::Logarithm;
pub use helper::{FloatHelper, IntHelper, REGISTER_BYTES, VectorHelper};
pub use level::{ExtensionLevel, LEVEL};
pub use mask::Mask;
pub use mlaf::FUSED as FUSED_MULTIPLY_ADD;

// ============================================================================
// Tests
// ============================================================================
