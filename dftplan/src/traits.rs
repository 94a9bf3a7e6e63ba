//! # Trait Definitions
pub mod fftw;
