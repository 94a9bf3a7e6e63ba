//! Build support for FFTW.
//!
//! This crate has no Rust API. Its build script either compiles the vendored
//! `fftw-3.3.10/` tree into static `libfftw3`/`libfftw3f`, or points at a
//! system installation, and exports the result to `dftplan-fftw-sys` through
//! the `DEP_FFTW3_*` variables:
//!
//! * `DEP_FFTW3_INCLUDE` - directory holding `fftw3.h`, empty for the default search path.
//! * `DEP_FFTW3_LIB_DIR` - directory holding the libraries, empty for the default search path.
//! * `DEP_FFTW3_LINK` - `static` or `dylib`.
