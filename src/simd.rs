//! Slice-level logarithm on top of the register operations.
//!
//! Full registers go through [`Logarithm::log`]; the tail that does not fill a
//! register goes through [`scalar`](crate::scalar), which gives the same bits.
//! Uses runtime dispatch via multiversed for optimal code paths.

use log::trace;
use multiversed::multiversed;
use wide::{f32x8, f64x4};

use crate::error::{LaneError, Result};
use crate::fast_math::Logarithm;
use crate::helper::VectorHelper;
use crate::scalar::{log_f32, log_f64};

/// Natural logarithm of 8 f32 values.
#[multiversed]
#[inline]
pub fn log_x8(v: f32x8) -> f32x8 {
    <f32 as Logarithm>::log(v)
}

/// Natural logarithm of 4 f64 values.
#[multiversed]
#[inline]
pub fn log_x4(v: f64x4) -> f64x4 {
    <f64 as Logarithm>::log(v)
}

/// Replace every value with its natural logarithm.
///
/// Processes 8 values at a time, with scalar fallback for remainder.
#[multiversed]
#[inline]
pub fn log_f32_slice(values: &mut [f32]) {
    trace!("log_f32_slice: {} values", values.len());
    let (chunks, remainder) = values.as_chunks_mut::<8>();

    for chunk in chunks {
        *chunk = f32::to_array(log_x8(f32::load_unaligned(chunk)));
    }

    for v in remainder {
        *v = log_f32(*v);
    }
}

/// Replace every value with its natural logarithm.
///
/// Processes 4 values at a time, with scalar fallback for remainder.
#[multiversed]
#[inline]
pub fn log_f64_slice(values: &mut [f64]) {
    trace!("log_f64_slice: {} values", values.len());
    let (chunks, remainder) = values.as_chunks_mut::<4>();

    for chunk in chunks {
        *chunk = f64::to_array(log_x4(f64::load_unaligned(chunk)));
    }

    for v in remainder {
        *v = log_f64(*v);
    }
}

/// Natural logarithm of `input`, written to `output`.
///
/// Fails with [`LaneError::LengthMismatch`] when the slices differ in length;
/// `output` is left untouched in that case.
#[multiversed]
#[inline]
pub fn log_f32_batch(input: &[f32], output: &mut [f32]) -> Result<()> {
    check_lengths(input.len(), output.len())?;
    trace!("log_f32_batch: {} values", input.len());

    let (in_chunks, in_remainder) = input.as_chunks::<8>();
    let (out_chunks, out_remainder) = output.as_chunks_mut::<8>();

    for (inp, out) in in_chunks.iter().zip(out_chunks.iter_mut()) {
        *out = f32::to_array(log_x8(f32::load_unaligned(inp)));
    }

    for (inp, out) in in_remainder.iter().zip(out_remainder.iter_mut()) {
        *out = log_f32(*inp);
    }
    Ok(())
}

/// Natural logarithm of `input`, written to `output`.
///
/// Fails with [`LaneError::LengthMismatch`] when the slices differ in length;
/// `output` is left untouched in that case.
#[multiversed]
#[inline]
pub fn log_f64_batch(input: &[f64], output: &mut [f64]) -> Result<()> {
    check_lengths(input.len(), output.len())?;
    trace!("log_f64_batch: {} values", input.len());

    let (in_chunks, in_remainder) = input.as_chunks::<4>();
    let (out_chunks, out_remainder) = output.as_chunks_mut::<4>();

    for (inp, out) in in_chunks.iter().zip(out_chunks.iter_mut()) {
        *out = f64::to_array(log_x4(f64::load_unaligned(inp)));
    }

    for (inp, out) in in_remainder.iter().zip(out_remainder.iter_mut()) {
        *out = log_f64(*inp);
    }
    Ok(())
}

#[inline]
fn check_lengths(input: usize, output: usize) -> Result<()> {
    if input == output {
        Ok(())
    } else {
        Err(LaneError::LengthMismatch {
            expected: input,
            actual: output,
        })
    }
}
