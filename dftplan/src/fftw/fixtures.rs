//! Literal test vectors shared by the plan tests
use num_complex::Complex64;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Eight point step signal
pub const SIGNAL: [f64; 8] = [1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0];

/// Bit patterns of the forward DFT of [`SIGNAL`], interleaved real and imaginary parts
#[rustfmt::skip]
const SPECTRUM_BITS: [u64; 16] = [
    0x4010000000000000, 0x0000000000000000,
    0x3FF0000000000000, 0xC003504F333F9DE6,
    0x0000000000000000, 0x0000000000000000,
    0x3FF0000000000000, 0xBFDA827999FCEF34,
    0x0000000000000000, 0x0000000000000000,
    0x3FF0000000000000, 0x3FDA827999FCEF34,
    0x0000000000000000, 0x0000000000000000,
    0x3FF0000000000000, 0x4003504F333F9DE6,
];

/// Absolute tolerance for double precision comparisons
pub const TOLERANCE: f64 = 1e-12;

/// Forward DFT of [`SIGNAL`], `[4, 1-2.414i, 0, 1-0.414i, 0, 1+0.414i, 0, 1+2.414i]`
pub fn spectrum() -> Vec<Complex64> {
    SPECTRUM_BITS
        .chunks_exact(2)
        .map(|bits| Complex64::new(f64::from_bits(bits[0]), f64::from_bits(bits[1])))
        .collect()
}

/// [`SIGNAL`] with zero imaginary parts
pub fn complex_signal() -> Vec<Complex64> {
    SIGNAL.iter().map(|&re| Complex64::new(re, 0.0)).collect()
}

/// Reproducible random real signal
pub fn random_signal(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Reproducible random complex signal
pub fn random_complex_signal(n: usize, seed: u64) -> Vec<Complex64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect()
}

/// Panic with the first pair differing by more than [`TOLERANCE`]
pub fn assert_close(found: &[Complex64], expected: &[Complex64]) {
    assert_eq!(found.len(), expected.len());
    for (i, (f, e)) in found.iter().zip(expected).enumerate() {
        let dif = (f - e).norm();
        if dif > TOLERANCE {
            panic!("Large difference at {}: found={}, expected={}, dif={}", i, f, e, dif);
        }
    }
}
