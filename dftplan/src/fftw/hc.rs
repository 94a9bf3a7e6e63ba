//! # Half-Complex Transform
//!
//! Real-to-complex and complex-to-real transforms behind one plan type, the direction
//! chosen at creation. The complex side holds the conjugate-symmetric half spectrum,
//! `n / 2 + 1` values for a real signal of length `n`.
//!
//! In place, both views live in one arena of `n + 2` reals. The real view is the first
//! `n` slots, the complex view reinterprets the first `2 * (n / 2 + 1)` slots, which is
//! the padded layout FFTW expects for in-place half-complex transforms.
use std::{
    fmt,
    marker::PhantomData,
    ptr::NonNull,
    slice::{from_raw_parts, from_raw_parts_mut},
};

use num::Zero;
use num_complex::Complex;
use tracing::warn;

use super::array::AlignedVec;
use super::handle::RawPlan;
use super::helpers::{spectrum_len, validate_len, validate_size};
use super::types::{FftError, Kind, Locality, PlanFlags, Result, Sign};
use crate::excall;
use crate::traits::fftw::{DftPlan, FftwFloat};

/// Real and complex buffer pair supplied by the caller
pub type CallerBuffers<'a, T> = (&'a mut [T], &'a mut [Complex<T>]);

/// Backing storage of the real and complex views
enum Storage<'a, T: FftwFloat> {
    /// One arena of `n + 2` reals shared by both views
    Shared(AlignedVec<T>),

    /// Independent real and complex allocations
    Split {
        real: AlignedVec<T>,
        complex: AlignedVec<Complex<T>>,
    },

    /// Storage borrowed from the caller for the life of the plan.
    ///
    /// Pointers are taken once from the caller's borrows, every view and the
    /// native plan derive from them.
    Borrowed {
        real: NonNull<T>,
        complex: NonNull<Complex<T>>,
        marker: PhantomData<CallerBuffers<'a, T>>,
    },
}

// Borrowed pointers stand in for `&'a mut` slices, which are `Send`
unsafe impl<T: FftwFloat> Send for Storage<'_, T> {}

impl<'a, T: FftwFloat> Storage<'a, T> {
    fn allocate(n: usize, locality: Locality) -> Result<Self> {
        match locality {
            Locality::InPlace => Ok(Storage::Shared(AlignedVec::new(n + 2)?)),
            Locality::OutOfPlace => Ok(Storage::Split {
                real: AlignedVec::new(n)?,
                complex: AlignedVec::new(spectrum_len(n))?,
            }),
            Locality::CallerProvided => Err(FftError::InvalidConfiguration(
                "CallerProvided locality requires real and complex buffers".to_string(),
            )),
        }
    }

    fn borrow(real: &'a mut [T], complex: &'a mut [Complex<T>]) -> Self {
        Storage::Borrowed {
            real: NonNull::from(real).cast(),
            complex: NonNull::from(complex).cast(),
            marker: PhantomData,
        }
    }

    fn real(&self, n: usize) -> &[T] {
        match self {
            Storage::Shared(arena) => &arena[..n],
            Storage::Split { real, .. } => real,
            Storage::Borrowed { real, .. } => unsafe { from_raw_parts(real.as_ptr(), n) },
        }
    }

    fn real_mut(&mut self, n: usize) -> &mut [T] {
        match self {
            Storage::Shared(arena) => &mut arena[..n],
            Storage::Split { real, .. } => real,
            Storage::Borrowed { real, .. } => unsafe { from_raw_parts_mut(real.as_ptr(), n) },
        }
    }

    fn complex(&self, n: usize) -> &[Complex<T>] {
        match self {
            Storage::Shared(arena) => bytemuck::cast_slice(&arena[..2 * spectrum_len(n)]),
            Storage::Split { complex, .. } => complex,
            Storage::Borrowed { complex, .. } => unsafe {
                from_raw_parts(complex.as_ptr(), spectrum_len(n))
            },
        }
    }

    fn complex_mut(&mut self, n: usize) -> &mut [Complex<T>] {
        match self {
            Storage::Shared(arena) => {
                bytemuck::cast_slice_mut(&mut arena[..2 * spectrum_len(n)])
            }
            Storage::Split { complex, .. } => complex,
            Storage::Borrowed { complex, .. } => unsafe {
                from_raw_parts_mut(complex.as_ptr(), spectrum_len(n))
            },
        }
    }

    /// Raw (real, complex) base pointers handed to the planner
    fn pointers(&mut self) -> (*mut T, *mut Complex<T>) {
        match self {
            Storage::Shared(arena) => {
                let base = arena.as_mut_ptr();
                (base, base as *mut Complex<T>)
            }
            Storage::Split { real, complex } => (real.as_mut_ptr(), complex.as_mut_ptr()),
            Storage::Borrowed { real, complex, .. } => (real.as_ptr(), complex.as_ptr()),
        }
    }

    /// Zero storage owned by the plan, caller storage is left alone.
    fn clear(&mut self) {
        match self {
            Storage::Shared(arena) => arena.fill(T::zero()),
            Storage::Split { real, complex } => {
                real.fill(T::zero());
                complex.fill(Complex::zero());
            }
            Storage::Borrowed { .. } => {}
        }
    }
}

/// Planned one dimensional half-complex DFT of length `n`.
///
/// A [`Sign::Forward`] plan reads the real buffer and writes the complex one, a
/// [`Sign::Backward`] plan the reverse. The lifetime `'a` is the borrow of caller
/// provided storage, plans owning their buffers can be `'static`.
///
/// FFTW's backward (complex-to-real) transforms may overwrite their complex input
/// unless planned with [`PlanFlags::PRESERVE_INPUT`].
///
/// Caller provided buffers are held as exclusive borrows, so two plans can never be
/// bound to the same caller storage at once. A forward and backward pair over one
/// buffer pair is built one after the other, or over owned storage and copied.
pub struct HalfComplexPlan<'a, T: FftwFloat> {
    // Declared first, destroyed before the buffers it is bound to
    plan: RawPlan<T>,
    n: usize,
    sign: Sign,
    locality: Locality,
    flags: PlanFlags,
    storage: Storage<'a, T>,
}

impl<'a, T: FftwFloat> HalfComplexPlan<'a, T> {
    /// Allocate the buffers and plan the transform.
    ///
    /// # Arguments
    /// * `n` - Transform length, positive.
    /// * `sign` - `Forward` for real-to-complex, `Backward` for complex-to-real.
    /// * `locality` - `InPlace` or `OutOfPlace`, see [`HalfComplexPlan::with_buffers`] for caller storage.
    /// * `flags` - Planner flags.
    pub fn new(n: usize, sign: Sign, locality: Locality, flags: PlanFlags) -> Result<Self> {
        validate_size(n)?;
        let storage = Storage::allocate(n, locality)?;
        Self::plan(n, sign, locality, flags, storage)
    }

    /// Plan the transform over caller storage, the plan borrows both buffers for its whole life.
    ///
    /// Buffer contents survive planning, whatever the flags. The buffers are borrowed
    /// exclusively, no second plan can share them until this one is dropped or released.
    ///
    /// # Arguments
    /// * `n` - Transform length, positive.
    /// * `sign` - `Forward` for real-to-complex, `Backward` for complex-to-real.
    /// * `flags` - Planner flags.
    /// * `real` - Exactly `n` reals.
    /// * `complex` - Exactly `n / 2 + 1` complex values.
    ///
    /// A second plan over the same buffers is rejected at compile time:
    ///
    /// ```compile_fail
    /// use dftplan::{DftPlan, HalfComplexPlan, PlanFlags, Sign};
    /// use num_complex::Complex64;
    ///
    /// let mut real = vec![0.0f64; 8];
    /// let mut complex = vec![Complex64::new(0.0, 0.0); 5];
    /// let mut forward =
    ///     HalfComplexPlan::with_buffers(8, Sign::Forward, PlanFlags::ESTIMATE, &mut real, &mut complex)
    ///         .unwrap();
    /// let mut backward =
    ///     HalfComplexPlan::with_buffers(8, Sign::Backward, PlanFlags::ESTIMATE, &mut real, &mut complex)
    ///         .unwrap();
    /// forward.execute();
    /// backward.execute();
    /// ```
    pub fn with_buffers(
        n: usize,
        sign: Sign,
        flags: PlanFlags,
        real: &'a mut [T],
        complex: &'a mut [Complex<T>],
    ) -> Result<Self> {
        validate_size(n)?;
        validate_len("real", n, real.len())?;
        validate_len("complex", spectrum_len(n), complex.len())?;
        Self::plan(
            n,
            sign,
            Locality::CallerProvided,
            flags,
            Storage::borrow(real, complex),
        )
    }

    /// Plan the transform for any locality.
    ///
    /// `buffers` are required for [`Locality::CallerProvided`] and ignored otherwise.
    pub fn from_parts(
        n: usize,
        sign: Sign,
        locality: Locality,
        flags: PlanFlags,
        buffers: Option<CallerBuffers<'a, T>>,
    ) -> Result<Self> {
        match (locality, buffers) {
            (Locality::CallerProvided, Some((real, complex))) => {
                Self::with_buffers(n, sign, flags, real, complex)
            }
            (Locality::CallerProvided, None) => Err(FftError::InvalidConfiguration(
                "CallerProvided locality requires real and complex buffers".to_string(),
            )),
            (_, buffers) => {
                if buffers.is_some() {
                    warn!(%locality, "ignoring caller buffers for plan owning its storage");
                }
                Self::new(n, sign, locality, flags)
            }
        }
    }

    fn plan(
        n: usize,
        sign: Sign,
        locality: Locality,
        flags: PlanFlags,
        mut storage: Storage<'a, T>,
    ) -> Result<Self> {
        let n_raw = validate_size(n)?;

        // Only estimating planners leave the arrays untouched
        let saved = match &storage {
            Storage::Borrowed { .. } if !flags.contains(PlanFlags::ESTIMATE) => {
                Some((storage.real(n).to_vec(), storage.complex(n).to_vec()))
            }
            _ => None,
        };

        let (real, complex) = storage.pointers();
        let (kind, raw) = match sign {
            Sign::Forward => (
                Kind::R2C,
                excall!(T::plan_r2c(n_raw, real, complex, flags.bits())),
            ),
            Sign::Backward => (
                Kind::C2R,
                excall!(T::plan_c2r(n_raw, complex, real, flags.bits())),
            ),
        };

        match saved {
            Some((real, complex)) => {
                storage.real_mut(n).copy_from_slice(&real);
                storage.complex_mut(n).copy_from_slice(&complex);
            }
            None => storage.clear(),
        }

        let plan = RawPlan::from_raw(raw, kind, n, locality, flags)?;

        Ok(Self {
            plan,
            n,
            sign,
            locality,
            flags,
            storage,
        })
    }

    /// Direction of the transform
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Real buffer of length `n`, the input of a forward plan
    pub fn real(&self) -> &[T] {
        self.storage.real(self.n)
    }

    /// Mutable real buffer
    pub fn real_mut(&mut self) -> &mut [T] {
        self.storage.real_mut(self.n)
    }

    /// Complex buffer of length `n / 2 + 1`, the input of a backward plan
    pub fn complex(&self) -> &[Complex<T>] {
        self.storage.complex(self.n)
    }

    /// Mutable complex buffer
    pub fn complex_mut(&mut self) -> &mut [Complex<T>] {
        self.storage.complex_mut(self.n)
    }
}

impl<T: FftwFloat> DftPlan for HalfComplexPlan<'_, T> {
    type Scalar = T;

    fn size(&self) -> usize {
        self.n
    }

    fn kind(&self) -> Kind {
        match self.sign {
            Sign::Forward => Kind::R2C,
            Sign::Backward => Kind::C2R,
        }
    }

    fn locality(&self) -> Locality {
        self.locality
    }

    fn flags(&self) -> PlanFlags {
        self.flags
    }

    fn execute(&mut self) {
        self.plan.execute()
    }
}

impl<T: FftwFloat> fmt::Display for HalfComplexPlan<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use num::Zero;
    use num_complex::Complex64;

    use super::{HalfComplexPlan, Storage};
    use crate::fftw::fixtures::{assert_close, random_signal, spectrum, SIGNAL, TOLERANCE};
    use crate::fftw::helpers::normalise;
    use crate::fftw::types::{FftError, Locality, PlanFlags, Sign};
    use crate::traits::fftw::DftPlan;

    const LOCALITIES: [Locality; 2] = [Locality::InPlace, Locality::OutOfPlace];

    #[test]
    fn test_hc_fixture() {
        for locality in LOCALITIES {
            let mut forward =
                HalfComplexPlan::<f64>::new(8, Sign::Forward, locality, PlanFlags::MEASURE)
                    .unwrap();
            let mut backward =
                HalfComplexPlan::<f64>::new(8, Sign::Backward, locality, PlanFlags::MEASURE)
                    .unwrap();

            forward.real_mut().copy_from_slice(&SIGNAL);
            forward.execute();
            assert_close(forward.complex(), &spectrum()[..5]);

            backward.complex_mut().copy_from_slice(forward.complex());
            backward.execute();
            normalise(backward.real_mut(), 8);

            for (&v, &expected) in backward.real().iter().zip(SIGNAL.iter()) {
                assert_abs_diff_eq!(v, expected, epsilon = TOLERANCE);
            }
        }
    }

    #[test]
    fn test_hc_round_trip_odd_and_even() {
        for (seed, n) in [1, 2, 7, 8, 15, 64, 255].into_iter().enumerate() {
            let signal = random_signal(n, seed as u64);
            for locality in LOCALITIES {
                let mut forward =
                    HalfComplexPlan::<f64>::new(n, Sign::Forward, locality, PlanFlags::ESTIMATE)
                        .unwrap();
                let mut backward =
                    HalfComplexPlan::<f64>::new(n, Sign::Backward, locality, PlanFlags::ESTIMATE)
                        .unwrap();

                assert_eq!(forward.real().len(), n);
                assert_eq!(forward.complex().len(), n / 2 + 1);

                forward.real_mut().copy_from_slice(&signal);
                forward.execute();
                backward.complex_mut().copy_from_slice(forward.complex());
                backward.execute();
                normalise(backward.real_mut(), n);

                for (&v, &expected) in backward.real().iter().zip(signal.iter()) {
                    assert_abs_diff_eq!(v, expected, epsilon = TOLERANCE);
                }
            }
        }
    }

    #[test]
    fn test_hc_locality_does_not_change_result() {
        let n = 30;
        let signal = random_signal(n, 7);

        let mut in_place =
            HalfComplexPlan::<f64>::new(n, Sign::Forward, Locality::InPlace, PlanFlags::ESTIMATE)
                .unwrap();
        let mut out_of_place = HalfComplexPlan::<f64>::new(
            n,
            Sign::Forward,
            Locality::OutOfPlace,
            PlanFlags::ESTIMATE,
        )
        .unwrap();

        in_place.real_mut().copy_from_slice(&signal);
        out_of_place.real_mut().copy_from_slice(&signal);
        in_place.execute();
        out_of_place.execute();

        assert_close(in_place.complex(), out_of_place.complex());
    }

    #[test]
    fn test_hc_in_place_arena() {
        for n in [7, 8] {
            let mut plan =
                HalfComplexPlan::<f64>::new(n, Sign::Forward, Locality::InPlace, PlanFlags::ESTIMATE)
                    .unwrap();

            match &plan.storage {
                Storage::Shared(arena) => assert_eq!(arena.len(), n + 2),
                _ => panic!("in place plan must share one arena"),
            }

            assert_eq!(
                plan.real().as_ptr() as *const u8,
                plan.complex().as_ptr() as *const u8
            );

            // Complex view aliases the real slots pairwise
            plan.complex_mut()[1] = Complex64::new(5.0, 6.0);
            assert_eq!(plan.real()[2], 5.0);
            assert_eq!(plan.real()[3], 6.0);
        }
    }

    #[test]
    fn test_hc_caller_provided() {
        let mut real = SIGNAL.to_vec();
        let mut complex = vec![Complex64::zero(); 5];

        {
            let mut plan = HalfComplexPlan::with_buffers(
                8,
                Sign::Forward,
                PlanFlags::MEASURE,
                &mut real,
                &mut complex,
            )
            .unwrap();

            // Measuring did not clobber the caller's signal
            assert_eq!(plan.real(), &SIGNAL);
            assert_eq!(plan.locality(), Locality::CallerProvided);

            plan.execute();
            assert_close(plan.complex(), &spectrum()[..5]);
        }

        // Storage is the caller's again once the plan is gone
        assert_close(&complex, &spectrum()[..5]);
        assert_eq!(real, SIGNAL.to_vec());

        let mut plan = HalfComplexPlan::from_parts(
            8,
            Sign::Backward,
            Locality::CallerProvided,
            PlanFlags::PATIENT,
            Some((real.as_mut_slice(), complex.as_mut_slice())),
        )
        .unwrap();
        plan.execute();
        normalise(plan.real_mut(), 8);
        for (&v, &expected) in plan.real().iter().zip(SIGNAL.iter()) {
            assert_abs_diff_eq!(v, expected, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn test_hc_caller_provided_wrong_lengths() {
        let mut real = vec![0.0f64; 7];
        let mut complex = vec![Complex64::zero(); 5];
        assert_eq!(
            HalfComplexPlan::with_buffers(
                8,
                Sign::Forward,
                PlanFlags::ESTIMATE,
                &mut real,
                &mut complex
            )
            .err(),
            Some(FftError::BufferContractViolation {
                buffer: "real",
                expected: 8,
                found: 7
            })
        );

        let mut real = vec![0.0f64; 9];
        let mut complex = vec![Complex64::zero(); 4];
        assert_eq!(
            HalfComplexPlan::from_parts(
                9,
                Sign::Backward,
                Locality::CallerProvided,
                PlanFlags::ESTIMATE,
                Some((real.as_mut_slice(), complex.as_mut_slice())),
            )
            .err(),
            Some(FftError::BufferContractViolation {
                buffer: "complex",
                expected: 5,
                found: 4
            })
        );
    }

    #[test]
    fn test_hc_from_parts_configuration() {
        assert!(matches!(
            HalfComplexPlan::<f64>::from_parts(
                8,
                Sign::Forward,
                Locality::CallerProvided,
                PlanFlags::ESTIMATE,
                None
            ),
            Err(FftError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            HalfComplexPlan::<f64>::new(
                8,
                Sign::Forward,
                Locality::CallerProvided,
                PlanFlags::ESTIMATE
            ),
            Err(FftError::InvalidConfiguration(_))
        ));

        // Buffers are ignored when the plan owns its storage
        let mut real = vec![1.0f64; 8];
        let mut complex = vec![Complex64::zero(); 5];
        let real_ptr = real.as_ptr();
        let plan = HalfComplexPlan::from_parts(
            8,
            Sign::Forward,
            Locality::OutOfPlace,
            PlanFlags::ESTIMATE,
            Some((real.as_mut_slice(), complex.as_mut_slice())),
        )
        .unwrap();
        assert_eq!(plan.locality(), Locality::OutOfPlace);
        assert_ne!(plan.real().as_ptr(), real_ptr);
        assert!(plan.real().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_hc_describe() {
        let plan =
            HalfComplexPlan::<f64>::new(8, Sign::Forward, Locality::OutOfPlace, PlanFlags::MEASURE)
                .unwrap();
        assert_eq!(
            plan.to_string(),
            "{Kind:R2C Locality:OutOfPlace Options:NA Primary:[8]f64 Secondary:[5]c64}"
        );

        let plan =
            HalfComplexPlan::<f32>::new(7, Sign::Backward, Locality::InPlace, PlanFlags::ESTIMATE)
                .unwrap();
        assert_eq!(
            plan.to_string(),
            "{Kind:C2R Locality:InPlace Options:Estimate Primary:[4]c32 Secondary:[7]f32}"
        );
        assert_eq!(plan.sign(), Sign::Backward);
    }

    /// Half spectrum of `signal` from a freshly built plan
    fn fresh_forward(signal: &[f64]) -> Vec<Complex64> {
        let mut plan = HalfComplexPlan::<f64>::new(
            signal.len(),
            Sign::Forward,
            Locality::OutOfPlace,
            PlanFlags::ESTIMATE,
        )
        .unwrap();
        plan.real_mut().copy_from_slice(signal);
        plan.execute();
        plan.complex().to_vec()
    }

    /// Real signal from a freshly built backward plan
    fn fresh_backward(spectrum: &[Complex64], n: usize) -> Vec<f64> {
        let mut plan =
            HalfComplexPlan::<f64>::new(n, Sign::Backward, Locality::OutOfPlace, PlanFlags::ESTIMATE)
                .unwrap();
        plan.complex_mut().copy_from_slice(spectrum);
        plan.execute();
        plan.real().to_vec()
    }

    #[test]
    fn test_hc_repeated_execution() {
        let n = 21;
        let first = random_signal(n, 100);
        let second = random_signal(n, 101);

        for locality in LOCALITIES {
            let mut forward =
                HalfComplexPlan::<f64>::new(n, Sign::Forward, locality, PlanFlags::MEASURE).unwrap();
            let base = forward.real().as_ptr();

            forward.real_mut().copy_from_slice(&first);
            forward.execute();
            assert_close(forward.complex(), &fresh_forward(&first));

            forward.real_mut().copy_from_slice(&second);
            forward.execute();
            assert_close(forward.complex(), &fresh_forward(&second));
            assert_eq!(forward.real().as_ptr(), base);

            let mut backward =
                HalfComplexPlan::<f64>::new(n, Sign::Backward, locality, PlanFlags::MEASURE)
                    .unwrap();
            for signal in [&first, &second] {
                let spectrum = fresh_forward(signal);
                backward.complex_mut().copy_from_slice(&spectrum);
                backward.execute();

                let expected = fresh_backward(&spectrum, n);
                for (&v, &e) in backward.real().iter().zip(expected.iter()) {
                    assert_abs_diff_eq!(v, e, epsilon = TOLERANCE);
                }
            }
        }
    }

    #[test]
    fn test_hc_caller_provided_repeated_execution() {
        let n = 16;
        let signals: Vec<Vec<f64>> = (0..3).map(|seed| random_signal(n, seed)).collect();

        let mut real = vec![0.0f64; n];
        let mut complex = vec![Complex64::zero(); n / 2 + 1];
        let real_ptr = real.as_ptr();
        let complex_ptr = complex.as_ptr();

        {
            // Measuring plans restore the caller data after planning, the views
            // written afterwards must still reach the bound storage
            let mut plan = HalfComplexPlan::with_buffers(
                n,
                Sign::Forward,
                PlanFlags::MEASURE,
                &mut real,
                &mut complex,
            )
            .unwrap();

            for signal in &signals {
                plan.real_mut().copy_from_slice(signal);
                plan.execute();
                assert_close(plan.complex(), &fresh_forward(signal));
                assert_eq!(plan.real().as_ptr(), real_ptr);
                assert_eq!(plan.complex().as_ptr(), complex_ptr);
            }
        }
        assert_close(&complex, &fresh_forward(&signals[2]));

        {
            let mut plan = HalfComplexPlan::with_buffers(
                n,
                Sign::Backward,
                PlanFlags::PATIENT,
                &mut real,
                &mut complex,
            )
            .unwrap();

            for signal in &signals {
                plan.complex_mut().copy_from_slice(&fresh_forward(signal));
                plan.execute();
                normalise(plan.real_mut(), n);
                for (&v, &e) in plan.real().iter().zip(signal.iter()) {
                    assert_abs_diff_eq!(v, e, epsilon = TOLERANCE);
                }
            }
        }
        for (&v, &e) in real.iter().zip(signals[2].iter()) {
            assert_abs_diff_eq!(v, e, epsilon = TOLERANCE);
        }
    }
}
