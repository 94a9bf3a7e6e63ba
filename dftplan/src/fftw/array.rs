//! SIMD aligned arrays
use std::{
    ops::{Deref, DerefMut},
    os::raw::c_void,
    ptr::{write_bytes, NonNull},
    slice::{from_raw_parts, from_raw_parts_mut},
};

use dftplan_fftw_sys as ffi;
use num::Zero;
use num_complex::Complex;

use crate::excall;
use crate::fftw::types::{FftError, Result};
use crate::traits::fftw::FftwFloat;

/// A RAII-wrapper of `fftw_alloc` and `fftw_free` with the [SIMD alignment].
///
/// The allocation never grows, shrinks or moves, so pointers handed to a plan stay valid until drop.
///
/// [SIMD alignment]: http://www.fftw.org/fftw3_doc/SIMD-alignment-and-fftw_005fmalloc.html
#[derive(Debug)]
pub struct AlignedVec<T> {
    n: usize,
    data: NonNull<T>,
}

/// Allocate SIMD-aligned memory of Real/Complex type
pub trait AlignedAllocable: Zero + Clone + Copy + Sized {
    /// Allocate SIMD-aligned memory
    ///
    /// # Safety
    /// Memory must be released with `fftw_free`.
    unsafe fn alloc(n: usize) -> *mut Self;
}

impl AlignedAllocable for f64 {
    unsafe fn alloc(n: usize) -> *mut Self {
        ffi::fftw_alloc_real(n)
    }
}

impl AlignedAllocable for f32 {
    unsafe fn alloc(n: usize) -> *mut Self {
        ffi::fftwf_alloc_real(n)
    }
}

impl<T: FftwFloat> AlignedAllocable for Complex<T> {
    unsafe fn alloc(n: usize) -> *mut Self {
        T::alloc_complex(n)
    }
}

impl<T> AlignedVec<T> {
    /// Pointer to the first element, stable for the life of the array
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Mutable pointer to the first element, stable for the life of the array
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    /// Return slice
    pub fn as_slice(&self) -> &[T] {
        unsafe { from_raw_parts(self.data.as_ptr(), self.n) }
    }

    /// Return mutable slice
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        unsafe { from_raw_parts_mut(self.data.as_ptr(), self.n) }
    }
}

impl<T> Deref for AlignedVec<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for AlignedVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_slice_mut()
    }
}

impl<T> AlignedVec<T>
where
    T: AlignedAllocable,
{
    /// Create a zeroed array with `fftw_malloc` (`fftw_free` will be automatically called by `Drop` trait)
    pub fn new(n: usize) -> Result<Self> {
        let data = NonNull::new(excall! { T::alloc(n) }).ok_or_else(|| {
            FftError::ResourceExhaustion(format!("fftw_malloc failed for {n} elements"))
        })?;
        // Zero bits are zero for the float and complex element types
        unsafe { write_bytes(data.as_ptr(), 0, n) };
        Ok(AlignedVec { n, data })
    }
}

impl<T> Drop for AlignedVec<T> {
    fn drop(&mut self) {
        excall! { ffi::fftw_free(self.data.as_ptr() as *mut c_void) };
    }
}

unsafe impl<T: Send> Send for AlignedVec<T> {}
unsafe impl<T: Sync> Sync for AlignedVec<T> {}

/// Cache alignment value as a Rust type
pub type Alignment = i32;

/// Check the alignment of slice, `0` for SIMD aligned data
///
/// ```no_run
/// # use dftplan::fftw::array::{alignment_of, AlignedVec};
///
/// let a = AlignedVec::<f32>::new(123).unwrap();
/// assert_eq!(alignment_of(&a), 0);  // aligned
/// ```
pub fn alignment_of<T>(a: &[T]) -> Alignment {
    unsafe { ffi::fftw_alignment_of(a.as_ptr() as *mut _) }
}
