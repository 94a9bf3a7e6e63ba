//! # Complex to Complex Transform
use std::fmt;

use num::Zero;
use num_complex::Complex;

use super::array::AlignedVec;
use super::handle::RawPlan;
use super::helpers::validate_size;
use super::types::{FftError, Kind, Locality, PlanFlags, Result, Sign};
use crate::excall;
use crate::traits::fftw::{DftPlan, FftwFloat};

/// Planned one dimensional complex-to-complex DFT of length `n`.
///
/// Both buffers hold `n` complex values. In place, the output is the input storage itself.
pub struct C2CPlan<T: FftwFloat> {
    // Declared first, destroyed before the buffers it is bound to
    plan: RawPlan<T>,
    n: usize,
    sign: Sign,
    locality: Locality,
    flags: PlanFlags,
    input: AlignedVec<Complex<T>>,
    output: Option<AlignedVec<Complex<T>>>,
}

impl<T: FftwFloat> C2CPlan<T> {
    /// Allocate the buffers and plan the transform.
    ///
    /// # Arguments
    /// * `n` - Transform length, positive.
    /// * `sign` - Direction of the transform.
    /// * `locality` - `InPlace` or `OutOfPlace`, complex-to-complex plans cannot borrow caller storage.
    /// * `flags` - Planner flags.
    pub fn new(n: usize, sign: Sign, locality: Locality, flags: PlanFlags) -> Result<Self> {
        let n_raw = validate_size(n)?;
        let in_place = match locality {
            Locality::InPlace => true,
            Locality::OutOfPlace => false,
            Locality::CallerProvided => {
                return Err(FftError::InvalidConfiguration(format!(
                    "invalid locality for C2C plan: {locality}"
                )))
            }
        };

        let mut input = AlignedVec::<Complex<T>>::new(n)?;
        let mut output = if in_place {
            None
        } else {
            Some(AlignedVec::<Complex<T>>::new(n)?)
        };

        let in_ptr = input.as_mut_ptr();
        let out_ptr = output.as_mut().map_or(in_ptr, |out| out.as_mut_ptr());
        let plan = RawPlan::from_raw(
            excall!(T::plan_c2c(n_raw, in_ptr, out_ptr, sign as i32, flags.bits())),
            Kind::C2C,
            n,
            locality,
            flags,
        )?;

        // Measuring planners scribble over the arrays
        input.fill(Complex::zero());
        if let Some(out) = output.as_mut() {
            out.fill(Complex::zero());
        }

        Ok(Self {
            plan,
            n,
            sign,
            locality,
            flags,
            input,
            output,
        })
    }

    /// Direction of the transform
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Input buffer
    pub fn input(&self) -> &[Complex<T>] {
        self.input.as_slice()
    }

    /// Mutable input buffer, values written here are read by [`DftPlan::execute`]
    pub fn input_mut(&mut self) -> &mut [Complex<T>] {
        self.input.as_slice_mut()
    }

    /// Output buffer, the input storage itself when in place
    pub fn output(&self) -> &[Complex<T>] {
        match self.output.as_ref() {
            Some(out) => out.as_slice(),
            None => self.input.as_slice(),
        }
    }

    /// Mutable output buffer
    pub fn output_mut(&mut self) -> &mut [Complex<T>] {
        match self.output.as_mut() {
            Some(out) => out.as_slice_mut(),
            None => self.input.as_slice_mut(),
        }
    }
}

impl<T: FftwFloat> DftPlan for C2CPlan<T> {
    type Scalar = T;

    fn size(&self) -> usize {
        self.n
    }

    fn kind(&self) -> Kind {
        Kind::C2C
    }

    fn locality(&self) -> Locality {
        self.locality
    }

    fn flags(&self) -> PlanFlags {
        self.flags
    }

    fn execute(&mut self) {
        self.plan.execute()
    }
}

impl<T: FftwFloat> fmt::Display for C2CPlan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
