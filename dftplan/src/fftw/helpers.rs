//! Helper functions
use std::{ops::MulAssign, ptr::NonNull};

use num::One;
use num_complex::ComplexFloat;

use crate::fftw::types::{FftError, Kind, PlanFlags, Result};
use crate::traits::fftw::FftwFloat;

/// Number of complex values in the conjugate-symmetric half spectrum of a real signal of length `n`.
pub fn spectrum_len(n: usize) -> usize {
    n / 2 + 1
}

/// Validate a transform length, returning it as the `int` FFTW expects.
///
/// # Arguments
/// * `n` - Logical transform length
pub fn validate_size(n: usize) -> Result<i32> {
    if n == 0 {
        return Err(FftError::InvalidConfiguration(
            "transform length must be positive".to_string(),
        ));
    }

    // The real arena of in-place half-complex plans holds n + 2 values
    match n.checked_add(2).map(i32::try_from) {
        Some(Ok(_)) => Ok(n as i32),
        _ => Err(FftError::InvalidConfiguration(format!(
            "transform length {n} exceeds the FFTW index range"
        ))),
    }
}

/// Validate the length of a caller supplied buffer
///
/// # Arguments
/// * `buffer` - Name of the buffer, for reporting
/// * `expected` - Required length
/// * `found` - Length of the buffer
pub fn validate_len(buffer: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(FftError::BufferContractViolation {
            buffer,
            expected,
            found,
        })
    }
}

/// Validate a DFT plan created with FFTW
///
/// # Arguments
/// * `plan` - Raw pointer for a plan
/// * `kind` - Kind of the planned transform, for reporting
/// * `n` - Length of the planned transform, for reporting
/// * `flags` - Flags used for planning, for reporting
pub fn validate_plan<T: Sized>(
    plan: *mut T,
    kind: Kind,
    n: usize,
    flags: PlanFlags,
) -> Result<NonNull<T>> {
    NonNull::new(plan).ok_or_else(|| {
        FftError::ResourceExhaustion(format!(
            "FFTW returned no plan for {kind} transform of length {n} with flags {flags:#}"
        ))
    })
}

/// Divide every value by the transform length `n`.
///
/// FFTW computes unnormalised transforms, a forward transform followed by a
/// backward transform scales the signal by `n`.
pub fn normalise<V>(values: &mut [V], n: usize)
where
    V: ComplexFloat + MulAssign<<V as ComplexFloat>::Real>,
    V::Real: FftwFloat,
{
    let scale = V::Real::one() / V::Real::from_len(n);
    values.iter_mut().for_each(|value| *value *= scale);
}

/// Exclusive call of FFTW interface.
#[macro_export]
macro_rules! excall {
    ($call:expr) => {{
        // The mutex guards no data, a poisoned lock is still usable
        let _lock = $crate::fftw::types::FFTW_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        unsafe { $call }
    }};
}
