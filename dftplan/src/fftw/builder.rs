//! Builder object to construct plans
use std::marker::PhantomData;

use super::c2c::C2CPlan;
use super::hc::{CallerBuffers, HalfComplexPlan};
use super::r2c::{C2RPlan, R2CPlan};
use super::types::{FftError, Locality, PlanFlags, Result, Sign};
use crate::traits::fftw::FftwFloat;

/// Collects plan options and constructs any of the plan kinds.
///
/// Only the size is mandatory, the defaults are a forward, out of place transform planned
/// with [`PlanFlags::MEASURE`].
///
/// ```no_run
/// use dftplan::{DftPlan, Locality, PlanBuilder, PlanFlags};
///
/// let mut plan = PlanBuilder::<f64>::new()
///     .size(1024)
///     .locality(Locality::InPlace)
///     .flags(PlanFlags::ESTIMATE)
///     .r2c()
///     .unwrap();
/// plan.input_mut()[0] = 1.0;
/// plan.execute();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlanBuilder<T: FftwFloat> {
    size: Option<usize>,
    sign: Sign,
    locality: Locality,
    flags: PlanFlags,
    precision: PhantomData<T>,
}

impl<T: FftwFloat> Default for PlanBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FftwFloat> PlanBuilder<T> {
    /// Initialise a builder with the default options
    pub fn new() -> Self {
        Self {
            size: None,
            sign: Sign::Forward,
            locality: Locality::OutOfPlace,
            flags: PlanFlags::MEASURE,
            precision: PhantomData,
        }
    }

    /// Transform length
    pub fn size(mut self, n: usize) -> Self {
        self.size = Some(n);
        self
    }

    /// Direction of complex-to-complex and half-complex plans, ignored by the fixed-direction kinds
    pub fn direction(mut self, sign: Sign) -> Self {
        self.sign = sign;
        self
    }

    /// Buffer locality
    pub fn locality(mut self, locality: Locality) -> Self {
        self.locality = locality;
        self
    }

    /// Planner flags
    pub fn flags(mut self, flags: PlanFlags) -> Self {
        self.flags = flags;
        self
    }

    fn n(&self) -> Result<usize> {
        self.size.ok_or_else(|| {
            FftError::InvalidConfiguration("transform size must be set before planning".to_string())
        })
    }

    /// Complex-to-complex plan
    pub fn c2c(self) -> Result<C2CPlan<T>> {
        C2CPlan::new(self.n()?, self.sign, self.locality, self.flags)
    }

    /// Real-to-complex plan, the direction is always forward
    pub fn r2c(self) -> Result<R2CPlan<T>> {
        R2CPlan::new(self.n()?, self.locality, self.flags)
    }

    /// Complex-to-real plan, the direction is always backward
    pub fn c2r(self) -> Result<C2RPlan<T>> {
        C2RPlan::new(self.n()?, self.locality, self.flags)
    }

    /// Half-complex plan owning its buffers
    pub fn half_complex(self) -> Result<HalfComplexPlan<'static, T>> {
        HalfComplexPlan::new(self.n()?, self.sign, self.locality, self.flags)
    }

    /// Half-complex plan, borrowing `buffers` when the locality is [`Locality::CallerProvided`]
    pub fn half_complex_with<'a>(
        self,
        buffers: Option<CallerBuffers<'a, T>>,
    ) -> Result<HalfComplexPlan<'a, T>> {
        HalfComplexPlan::from_parts(self.n()?, self.sign, self.locality, self.flags, buffers)
    }
}
