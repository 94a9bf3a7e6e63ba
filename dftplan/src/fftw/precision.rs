//! Single and double precision dispatch to FFTW
use dftplan_fftw_sys as ffi;
use num_complex::Complex;

use crate::traits::fftw::FftwFloat;

impl FftwFloat for f64 {
    type Plan = ffi::fftw_plan_s;

    const REAL_NAME: &'static str = "f64";
    const COMPLEX_NAME: &'static str = "c64";

    fn from_len(n: usize) -> Self {
        n as f64
    }

    unsafe fn alloc_complex(n: usize) -> *mut Complex<Self> {
        ffi::fftw_alloc_complex(n)
    }

    unsafe fn plan_c2c(
        n: i32,
        in_: *mut Complex<Self>,
        out: *mut Complex<Self>,
        sign: i32,
        flags: u32,
    ) -> *mut Self::Plan {
        ffi::fftw_plan_dft_1d(n, in_, out, sign, flags)
    }

    unsafe fn plan_r2c(
        n: i32,
        in_: *mut Self,
        out: *mut Complex<Self>,
        flags: u32,
    ) -> *mut Self::Plan {
        ffi::fftw_plan_dft_r2c_1d(n, in_, out, flags)
    }

    unsafe fn plan_c2r(
        n: i32,
        in_: *mut Complex<Self>,
        out: *mut Self,
        flags: u32,
    ) -> *mut Self::Plan {
        ffi::fftw_plan_dft_c2r_1d(n, in_, out, flags)
    }

    unsafe fn execute(plan: *mut Self::Plan) {
        ffi::fftw_execute(plan)
    }

    unsafe fn destroy(plan: *mut Self::Plan) {
        ffi::fftw_destroy_plan(plan)
    }
}

impl FftwFloat for f32 {
    type Plan = ffi::fftwf_plan_s;

    const REAL_NAME: &'static str = "f32";
    const COMPLEX_NAME: &'static str = "c32";

    fn from_len(n: usize) -> Self {
        n as f32
    }

    unsafe fn alloc_complex(n: usize) -> *mut Complex<Self> {
        ffi::fftwf_alloc_complex(n)
    }

    unsafe fn plan_c2c(
        n: i32,
        in_: *mut Complex<Self>,
        out: *mut Complex<Self>,
        sign: i32,
        flags: u32,
    ) -> *mut Self::Plan {
        ffi::fftwf_plan_dft_1d(n, in_, out, sign, flags)
    }

    unsafe fn plan_r2c(
        n: i32,
        in_: *mut Self,
        out: *mut Complex<Self>,
        flags: u32,
    ) -> *mut Self::Plan {
        ffi::fftwf_plan_dft_r2c_1d(n, in_, out, flags)
    }

    unsafe fn plan_c2r(
        n: i32,
        in_: *mut Complex<Self>,
        out: *mut Self,
        flags: u32,
    ) -> *mut Self::Plan {
        ffi::fftwf_plan_dft_c2r_1d(n, in_, out, flags)
    }

    unsafe fn execute(plan: *mut Self::Plan) {
        ffi::fftwf_execute(plan)
    }

    unsafe fn destroy(plan: *mut Self::Plan) {
        ffi::fftwf_destroy_plan(plan)
    }
}
