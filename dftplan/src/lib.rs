//! # dftplan
//!
//! Reusable plans for one dimensional discrete Fourier transforms, backed by FFTW.
//!
//! A plan binds a transform kind, a length and a pair of buffers at creation, and can then be executed any
//! number of times over whatever values the buffers hold. Results are unnormalised, a forward transform
//! followed by a backward transform scales the data by `n`, see [`normalise`].
//!
//! ```no_run
//! use dftplan::{normalise, C2RPlan, DftPlan, Locality, PlanFlags, R2CPlan};
//!
//! let n = 16;
//! let mut forward = R2CPlan::<f64>::new(n, Locality::OutOfPlace, PlanFlags::MEASURE).unwrap();
//! let mut backward = C2RPlan::<f64>::new(n, Locality::OutOfPlace, PlanFlags::MEASURE).unwrap();
//!
//! forward.input_mut().iter_mut().enumerate().for_each(|(i, x)| *x = i as f64);
//! forward.execute();
//! backward.input_mut().copy_from_slice(forward.output());
//! backward.execute();
//! normalise(backward.output_mut(), n);
//! ```
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod fftw;
pub mod traits;

// Public API
#[doc(inline)]
pub use fftw::builder::PlanBuilder;
#[doc(inline)]
pub use fftw::c2c::C2CPlan;
#[doc(inline)]
pub use fftw::hc::HalfComplexPlan;
#[doc(inline)]
pub use fftw::helpers::normalise;
#[doc(inline)]
pub use fftw::r2c::{C2RPlan, R2CPlan};
#[doc(inline)]
pub use fftw::types::{FftError, Kind, Locality, PlanFlags, Result, Sign};
#[doc(inline)]
pub use traits::fftw::{DftPlan, FftwFloat};
