//! # Native plan handle
use std::ptr::NonNull;

use tracing::{debug, trace};

use crate::excall;
use crate::fftw::helpers::validate_plan;
use crate::fftw::types::{Kind, Locality, PlanFlags, Result};
use crate::traits::fftw::FftwFloat;

/// Exclusively owned FFTW plan, bound to the arrays it was created with.
///
/// The plan is destroyed exactly once, either by [`RawPlan::release`] or when it is dropped.
/// Owners must declare the handle before the buffers it reads and writes, so that it is
/// dropped first.
pub struct RawPlan<T: FftwFloat> {
    plan: NonNull<T::Plan>,
    kind: Kind,
    n: usize,
}

impl<T: FftwFloat> RawPlan<T> {
    /// Take ownership of a plan returned by an `FftwFloat::plan_*` call.
    ///
    /// A null plan is reported as [`crate::FftError::ResourceExhaustion`].
    pub(crate) fn from_raw(
        plan: *mut T::Plan,
        kind: Kind,
        n: usize,
        locality: Locality,
        flags: PlanFlags,
    ) -> Result<Self> {
        let plan = validate_plan(plan, kind, n, flags)?;
        let flags = format!("{flags:#}");
        debug!(%kind, n, %locality, %flags, "created FFTW plan");
        Ok(Self { plan, kind, n })
    }

    /// Run the transform over the bound arrays.
    pub fn execute(&mut self) {
        trace!(kind = %self.kind, n = self.n, "executing FFTW plan");
        unsafe { T::execute(self.plan.as_ptr()) }
    }

    /// Destroy the plan. Equivalent to dropping it.
    pub fn release(self) {
        drop(self)
    }
}

impl<T: FftwFloat> Drop for RawPlan<T> {
    fn drop(&mut self) {
        excall! { T::destroy(self.plan.as_ptr()) };
        debug!(kind = %self.kind, n = self.n, "destroyed FFTW plan");
    }
}

// Execution only touches the plan and its arrays, which move together with the owner
unsafe impl<T: FftwFloat> Send for RawPlan<T> {}
