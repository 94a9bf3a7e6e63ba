//! # Real to Complex, Complex to Real
//!
//! Fixed-direction half-complex plans owning their buffers.
use std::fmt;

use num_complex::Complex;

use super::hc::HalfComplexPlan;
use super::types::{FftError, Kind, Locality, PlanFlags, Result, Sign};
use crate::traits::fftw::{DftPlan, FftwFloat};

fn owned_locality(kind: Kind, locality: Locality) -> Result<Locality> {
    match locality {
        Locality::CallerProvided => Err(FftError::InvalidConfiguration(format!(
            "invalid locality for {kind} plan: {locality}, use HalfComplexPlan::with_buffers"
        ))),
        _ => Ok(locality),
    }
}

/// Forward transform of `n` reals into `n / 2 + 1` complex values
pub struct R2CPlan<T: FftwFloat>(HalfComplexPlan<'static, T>);

impl<T: FftwFloat> R2CPlan<T> {
    /// Allocate the buffers and plan the transform.
    pub fn new(n: usize, locality: Locality, flags: PlanFlags) -> Result<Self> {
        let locality = owned_locality(Kind::R2C, locality)?;
        Ok(Self(HalfComplexPlan::new(n, Sign::Forward, locality, flags)?))
    }

    /// Real input buffer of length `n`
    pub fn input(&self) -> &[T] {
        self.0.real()
    }

    /// Mutable real input buffer
    pub fn input_mut(&mut self) -> &mut [T] {
        self.0.real_mut()
    }

    /// Half spectrum of length `n / 2 + 1`
    pub fn output(&self) -> &[Complex<T>] {
        self.0.complex()
    }

    /// Mutable half spectrum
    pub fn output_mut(&mut self) -> &mut [Complex<T>] {
        self.0.complex_mut()
    }
}

/// Backward transform of `n / 2 + 1` complex values into `n` reals.
///
/// Execution may overwrite the input unless planned with [`PlanFlags::PRESERVE_INPUT`].
pub struct C2RPlan<T: FftwFloat>(HalfComplexPlan<'static, T>);

impl<T: FftwFloat> C2RPlan<T> {
    /// Allocate the buffers and plan the transform.
    pub fn new(n: usize, locality: Locality, flags: PlanFlags) -> Result<Self> {
        let locality = owned_locality(Kind::C2R, locality)?;
        Ok(Self(HalfComplexPlan::new(n, Sign::Backward, locality, flags)?))
    }

    /// Half spectrum input of length `n / 2 + 1`
    pub fn input(&self) -> &[Complex<T>] {
        self.0.complex()
    }

    /// Mutable half spectrum input
    pub fn input_mut(&mut self) -> &mut [Complex<T>] {
        self.0.complex_mut()
    }

    /// Real output buffer of length `n`
    pub fn output(&self) -> &[T] {
        self.0.real()
    }

    /// Mutable real output buffer
    pub fn output_mut(&mut self) -> &mut [T] {
        self.0.real_mut()
    }
}

macro_rules! delegate_plan {
    ($plan:ident) => {
        impl<T: FftwFloat> DftPlan for $plan<T> {
            type Scalar = T;

            fn size(&self) -> usize {
                self.0.size()
            }

            fn kind(&self) -> Kind {
                self.0.kind()
            }

            fn locality(&self) -> Locality {
                self.0.locality()
            }

            fn flags(&self) -> PlanFlags {
                self.0.flags()
            }

            fn execute(&mut self) {
                self.0.execute()
            }
        }

        impl<T: FftwFloat> fmt::Display for $plan<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.describe())
            }
        }
    };
}

delegate_plan!(R2CPlan);
delegate_plan!(C2RPlan);
