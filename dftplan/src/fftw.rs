//! # FFTW Plans
//!
//! Planned one dimensional discrete Fourier transforms of length `n` over the FFTW library, in double
//! (`f64`) and single (`f32`) precision.
//!
//! # Features
//! * Complex-to-complex transforms in either direction, see [`c2c::C2CPlan`].
//! * Real-to-complex and complex-to-real transforms over the half spectrum of `n / 2 + 1` values, see
//!   [`r2c::R2CPlan`], [`r2c::C2RPlan`] and the direction agnostic [`hc::HalfComplexPlan`].
//! * In place, out of place, or caller provided storage. In place half-complex plans view one arena of
//!   `n + 2` reals as both the real and the complex buffer.
//!
//! Planning, destruction and FFTW's allocator are serialised under one process wide lock. Execution is not,
//! distinct plans can be executed concurrently from different threads.
pub mod array;
pub mod builder;
pub mod c2c;
pub mod handle;
pub mod hc;
pub mod helpers;
pub mod r2c;
pub mod types;

mod precision;

#[cfg(test)]
mod fixtures;
