//! # FFTW Types

use std::{
    fmt,
    ops::{BitOr, BitOrAssign},
    sync::Mutex,
};

use itertools::Itertools;
use lazy_static::lazy_static;

use crate::fftw::helpers::spectrum_len;
use crate::traits::fftw::FftwFloat;

/// Error type for the FFTW wrapper, arising from plan configuration, caller
/// supplied buffers, and failures inside FFTW itself.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FftError {
    /// Unsupported combination of size, direction or locality. Raised before any native resource exists.
    #[error("invalid plan configuration: {0}")]
    InvalidConfiguration(String),

    /// A caller supplied buffer does not have the exact length required by the transform.
    #[error("buffer `{buffer}` has length {found}, expected {expected}")]
    BufferContractViolation {
        /// Name of the offending buffer
        buffer: &'static str,
        /// Required length
        expected: usize,
        /// Length received
        found: usize,
    },

    /// FFTW failed to allocate memory or to produce a plan.
    #[error("FFTW resource failure: {0}")]
    ResourceExhaustion(String),
}

/// Result type of the FFTW wrapper
pub type Result<T> = std::result::Result<T, FftError>;

/// Planner flags, a bitmask passed verbatim to FFTW.
///
/// Flags compose with `|`. The default, [`PlanFlags::MEASURE`], is the empty mask.
/// See the [original doc](https://www.fftw.org/fftw3_doc/Planner-Flags.html) for the
/// exact meaning of each flag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct PlanFlags(u32);

impl PlanFlags {
    /// Find an optimised plan by timing several algorithms. Overwrites the arrays while planning.
    pub const MEASURE: Self = Self(0);

    /// Out of place transforms may overwrite their input.
    pub const DESTROY_INPUT: Self = Self(1);

    /// Do not assume SIMD alignment of the arrays passed to later executions.
    pub const UNALIGNED: Self = Self(1 << 1);

    /// Prefer algorithms with a small memory footprint.
    pub const CONSERVE_MEMORY: Self = Self(1 << 2);

    /// Widest search for the fastest plan, very slow to plan.
    pub const EXHAUSTIVE: Self = Self(1 << 3);

    /// Out of place transforms must not overwrite their input.
    pub const PRESERVE_INPUT: Self = Self(1 << 4);

    /// Wider search than `MEASURE`, narrower than `EXHAUSTIVE`.
    pub const PATIENT: Self = Self(1 << 5);

    /// Heuristic planning, fast to plan and never touches the arrays.
    pub const ESTIMATE: Self = Self(1 << 6);

    /// Only create a plan if wisdom for the problem is already present.
    pub const WISDOM_ONLY: Self = Self(1 << 21);

    /// Rendering priority of the named flags.
    const NAMED: [(Self, &'static str); 9] = [
        (Self::MEASURE, "Measure"),
        (Self::DESTROY_INPUT, "DestroyInput"),
        (Self::UNALIGNED, "Unaligned"),
        (Self::CONSERVE_MEMORY, "ConserveMemory"),
        (Self::EXHAUSTIVE, "Exhaustive"),
        (Self::PRESERVE_INPUT, "PreserveInput"),
        (Self::PATIENT, "Patient"),
        (Self::ESTIMATE, "Estimate"),
        (Self::WISDOM_ONLY, "WisdomOnly"),
    ];

    /// Raw bitmask
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Wrap a raw bitmask, unknown bits are kept and passed through to FFTW.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// True if any bit of `other` is set in `self`.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// True if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of all the flags set in the mask, in rendering priority order.
    pub fn names(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(flag, _)| self.intersects(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for PlanFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PlanFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Renders only the first set flag in priority order, `NA` for an empty mask.
///
/// The alternate form (`{:#}`) lists every set flag joined by `|`.
impl fmt::Display for PlanFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        if names.is_empty() {
            f.write_str("NA")
        } else if f.alternate() {
            f.write_str(&names.iter().join("|"))
        } else {
            f.write_str(names[0])
        }
    }
}

/// Direction of complex-to-complex and half-complex transforms
#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Forward transform
    Forward = -1,

    /// Backward transform
    Backward = 1,
}

impl Sign {
    /// Name of a raw sign value, `Unknown` if it matches no variant.
    pub fn render_raw(raw: i32) -> &'static str {
        Self::try_from(raw).map_or("Unknown", Self::name)
    }

    fn name(self) -> &'static str {
        match self {
            Sign::Forward => "Forward",
            Sign::Backward => "Backward",
        }
    }
}

impl TryFrom<i32> for Sign {
    type Error = FftError;

    fn try_from(raw: i32) -> Result<Self> {
        match raw {
            -1 => Ok(Sign::Forward),
            1 => Ok(Sign::Backward),
            _ => Err(FftError::InvalidConfiguration(format!(
                "invalid direction: {raw}"
            ))),
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the input and output of a transform live
#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Locality {
    /// Input and output share one allocation
    InPlace = 0,

    /// Input and output are separate allocations
    OutOfPlace = 1,

    /// Input and output are borrowed from the caller, half-complex plans only
    CallerProvided = 2,
}

impl Locality {
    /// Name of a raw locality value, `Unknown` if it matches no variant.
    pub fn render_raw(raw: i32) -> &'static str {
        Self::try_from(raw).map_or("Unknown", Self::name)
    }

    fn name(self) -> &'static str {
        match self {
            Locality::InPlace => "InPlace",
            Locality::OutOfPlace => "OutOfPlace",
            Locality::CallerProvided => "CallerProvided",
        }
    }
}

impl TryFrom<i32> for Locality {
    type Error = FftError;

    fn try_from(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Locality::InPlace),
            1 => Ok(Locality::OutOfPlace),
            2 => Ok(Locality::CallerProvided),
            _ => Err(FftError::InvalidConfiguration(format!(
                "invalid locality: {raw}"
            ))),
        }
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of a one dimensional transform
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Complex-to-complex
    C2C,

    /// Real-to-complex, forward only
    R2C,

    /// Complex-to-real, backward only
    C2R,
}

impl Kind {
    /// Logical lengths of the (source, destination) buffers for a transform of length `n`.
    pub fn buffer_lens(self, n: usize) -> (usize, usize) {
        match self {
            Kind::C2C => (n, n),
            Kind::R2C => (n, spectrum_len(n)),
            Kind::C2R => (spectrum_len(n), n),
        }
    }

    /// Element type names of the (source, destination) buffers.
    pub fn element_names<T: FftwFloat>(self) -> (&'static str, &'static str) {
        match self {
            Kind::C2C => (T::COMPLEX_NAME, T::COMPLEX_NAME),
            Kind::R2C => (T::REAL_NAME, T::COMPLEX_NAME),
            Kind::C2R => (T::COMPLEX_NAME, T::REAL_NAME),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::C2C => "C2C",
            Kind::R2C => "R2C",
            Kind::C2R => "C2R",
        })
    }
}

lazy_static! {
    /// Mutex for FFTW planner calls.
    ///
    /// Plan creation and destruction share global planner state in FFTW and are not thread-safe,
    /// only `fftw_execute` is. See the [original document](http://www.fftw.org/fftw3_doc/Thread-safety.html) for detail
    pub static ref FFTW_MUTEX: Mutex<()> = Mutex::new(());
}
