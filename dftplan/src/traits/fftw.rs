//! FFTW Traits
use std::fmt::Debug;

use num::Float;
use num_complex::Complex;

use crate::fftw::array::AlignedAllocable;
use crate::fftw::types::{Kind, Locality, PlanFlags};

/// Floating point types with an FFTW precision, `f64` maps to the `fftw_*` routines and `f32` to `fftwf_*`.
///
/// Each method forwards to the FFTW routine of the same name for the precision of `Self`.
/// Plan constructors must be called under the planner lock, see [`crate::excall`].
pub trait FftwFloat: Float + AlignedAllocable + Debug + Send + Sync + bytemuck::Pod + 'static {
    /// Raw plan type, passed to library
    type Plan;

    /// Name of the real type in plan descriptions
    const REAL_NAME: &'static str;

    /// Name of the complex type in plan descriptions
    const COMPLEX_NAME: &'static str;

    /// Convert a transform length
    fn from_len(n: usize) -> Self;

    /// Allocate SIMD-aligned memory for `n` complex values
    ///
    /// # Safety
    /// Memory must be released with `fftw_free`.
    unsafe fn alloc_complex(n: usize) -> *mut Complex<Self>;

    /// Plan a complex-to-complex transform of length `n`
    ///
    /// # Safety
    /// `in_` and `out` must point to `n` values each, either the same or disjoint,
    /// and stay valid for the life of the returned plan.
    unsafe fn plan_c2c(
        n: i32,
        in_: *mut Complex<Self>,
        out: *mut Complex<Self>,
        sign: i32,
        flags: u32,
    ) -> *mut Self::Plan;

    /// Plan a real-to-complex transform of length `n`
    ///
    /// # Safety
    /// `in_` must point to `n` reals and `out` to `n / 2 + 1` complex values, either aliased
    /// from the same arena or disjoint, valid for the life of the returned plan.
    unsafe fn plan_r2c(n: i32, in_: *mut Self, out: *mut Complex<Self>, flags: u32)
        -> *mut Self::Plan;

    /// Plan a complex-to-real transform of length `n`
    ///
    /// # Safety
    /// As for [`FftwFloat::plan_r2c`] with the roles of the buffers exchanged.
    unsafe fn plan_c2r(n: i32, in_: *mut Complex<Self>, out: *mut Self, flags: u32)
        -> *mut Self::Plan;

    /// Execute a plan over the arrays it was created with
    ///
    /// # Safety
    /// `plan` must be a live plan whose arrays are still allocated.
    unsafe fn execute(plan: *mut Self::Plan);

    /// Destroy a plan
    ///
    /// # Safety
    /// `plan` must be live, and is dead afterwards.
    unsafe fn destroy(plan: *mut Self::Plan);
}

/// Interface shared by all the planned transforms.
///
/// # Example usage
///
/// ```no_run
/// use dftplan::{C2CPlan, DftPlan, Locality, PlanFlags, Sign};
///
/// let mut plan = C2CPlan::<f64>::new(8, Sign::Forward, Locality::OutOfPlace, PlanFlags::ESTIMATE).unwrap();
/// plan.input_mut()[0].re = 1.0;
/// plan.execute();
/// assert_eq!(plan.describe(), "{Kind:C2C Locality:OutOfPlace Options:Estimate Primary:[8]c64 Secondary:[8]c64}");
/// plan.release();
/// ```
pub trait DftPlan {
    /// Precision of the transform
    type Scalar: FftwFloat;

    /// Logical transform length `n`
    fn size(&self) -> usize;

    /// Kind of transform
    fn kind(&self) -> Kind;

    /// Locality of the buffers
    fn locality(&self) -> Locality;

    /// Flags the plan was created with
    fn flags(&self) -> PlanFlags;

    /// Run the transform over the plan's buffers, writing the destination buffer.
    ///
    /// The result is unnormalised.
    fn execute(&mut self);

    /// Textual summary of the plan
    fn describe(&self) -> String {
        let (primary, secondary) = self.kind().buffer_lens(self.size());
        let (primary_type, secondary_type) = self.kind().element_names::<Self::Scalar>();
        format!(
            "{{Kind:{} Locality:{} Options:{} Primary:[{}]{} Secondary:[{}]{}}}",
            self.kind(),
            self.locality(),
            self.flags(),
            primary,
            primary_type,
            secondary,
            secondary_type
        )
    }

    /// Destroy the native plan and free the plan's own buffers.
    fn release(self)
    where
        Self: Sized,
    {
        drop(self)
    }
}
