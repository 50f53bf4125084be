//! Test-signal generators
//!
//! Every generator comes in two forms: one taking a normalized frequency
//! (cycles per sample, no clock on the result) and a `_clocked` one taking a
//! sample rate and an absolute frequency (the result carries the clock).
//!
//! Tone generators are generic over the sample type: real tones are
//! `magnitude * sin(...)`, complex tones are `magnitude * (cos(...) + j sin(...))`.

use super::Signal;
use crate::error::{DspError, Result};
use crate::types::{Frequency, Sample};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::PI;

fn require_clock(clock: Frequency) -> Result<()> {
    if clock.is_positive() {
        Ok(())
    } else {
        Err(DspError::invalid_argument(format!(
            "generator clock must be positive, got {}",
            clock
        )))
    }
}

fn clocked<T: Sample>(samples: Signal<T>, clock: Frequency) -> Result<Signal<T>> {
    Signal::with_clock(samples.into_vec(), clock)
}

fn tone<T: Sample>(angle: f64, magnitude: f64) -> T {
    if T::IS_COMPLEX {
        T::from_parts(magnitude * angle.cos(), magnitude * angle.sin())
    } else {
        T::from_real(magnitude * angle.sin())
    }
}

/// Single tone at `norm_freq` cycles per sample
pub fn harmonic<T: Sample>(size: usize, norm_freq: f64, magnitude: f64, phase: f64) -> Signal<T> {
    (0..size)
        .map(|i| tone(2.0 * PI * norm_freq * i as f64 + phase, magnitude))
        .collect()
}

pub fn harmonic_clocked<T: Sample>(
    size: usize,
    clock: Frequency,
    freq: Frequency,
    magnitude: f64,
    phase: f64,
) -> Result<Signal<T>> {
    require_clock(clock)?;
    clocked(harmonic(size, freq / clock, magnitude, phase), clock)
}

/// Linear chirp from `start_norm_freq` to `stop_norm_freq`.
///
/// The instantaneous frequency term grows by `(stop - start) / (2 (size - 1))`
/// per sample, so the phase sweeps the requested band over `size` samples.
pub fn chirp<T: Sample>(
    size: usize,
    start_norm_freq: f64,
    stop_norm_freq: f64,
    magnitude: f64,
    phase: f64,
) -> Signal<T> {
    let step = if size > 1 {
        (stop_norm_freq - start_norm_freq) / (2.0 * (size - 1) as f64)
    } else {
        0.0
    };
    (0..size)
        .map(|i| {
            let freq = start_norm_freq + step * i as f64;
            tone(2.0 * PI * freq * i as f64 + phase, magnitude)
        })
        .collect()
}

pub fn chirp_clocked<T: Sample>(
    size: usize,
    clock: Frequency,
    start_freq: Frequency,
    stop_freq: Frequency,
    magnitude: f64,
    phase: f64,
) -> Result<Signal<T>> {
    require_clock(clock)?;
    clocked(
        chirp(size, start_freq / clock, stop_freq / clock, magnitude, phase),
        clock,
    )
}

/// Offset of sample `i` inside its period, after applying the phase shift
fn position_in_period(i: usize, period: f64, phase: f64) -> f64 {
    let shifted = i as f64 - period * phase / (2.0 * PI);
    shifted - (shifted / period).floor() * period
}

/// Square wave: `+magnitude` on the first half of each period, `-magnitude` after
pub fn meander(size: usize, norm_freq: f64, magnitude: f64, phase: f64) -> Signal<f64> {
    if norm_freq == 0.0 {
        let level = if phase < PI { magnitude } else { -magnitude };
        return Signal::filled(size, level);
    }
    let period = 1.0 / norm_freq;
    (0..size)
        .map(|i| {
            if position_in_period(i, period, phase) < period / 2.0 {
                magnitude
            } else {
                -magnitude
            }
        })
        .collect()
}

pub fn meander_clocked(
    size: usize,
    clock: Frequency,
    freq: Frequency,
    magnitude: f64,
    phase: f64,
) -> Result<Signal<f64>> {
    require_clock(clock)?;
    clocked(meander(size, freq / clock, magnitude, phase), clock)
}

/// Rising sawtooth from `-magnitude` to `+magnitude` over each period
pub fn saw(size: usize, norm_freq: f64, magnitude: f64, phase: f64) -> Signal<f64> {
    if norm_freq == 0.0 {
        return Signal::filled(size, 2.0 * magnitude * (phase / (2.0 * PI) - 0.5));
    }
    let period = 1.0 / norm_freq;
    let step = 2.0 * magnitude / period;
    (0..size)
        .map(|i| step * position_in_period(i, period, phase) - magnitude)
        .collect()
}

pub fn saw_clocked(
    size: usize,
    clock: Frequency,
    freq: Frequency,
    magnitude: f64,
    phase: f64,
) -> Result<Signal<f64>> {
    require_clock(clock)?;
    clocked(saw(size, freq / clock, magnitude, phase), clock)
}

/// Uniform noise in `[mean - dispersion, mean + dispersion]` drawn from `rng`.
///
/// Complex samples draw the real and imaginary parts independently.
pub fn uniform_noise_with<T, R>(size: usize, dispersion: f64, mean: f64, rng: &mut R) -> Signal<T>
where
    T: Sample,
    R: Rng + ?Sized,
{
    (0..size)
        .map(|_| {
            let re = rng.gen_range(-1.0..=1.0) * dispersion + mean;
            let im = if T::IS_COMPLEX {
                rng.gen_range(-1.0..=1.0) * dispersion + mean
            } else {
                0.0
            };
            T::from_parts(re, im)
        })
        .collect()
}

/// [`uniform_noise_with`] using the thread-local generator
pub fn uniform_noise<T: Sample>(size: usize, dispersion: f64, mean: f64) -> Signal<T> {
    uniform_noise_with(size, dispersion, mean, &mut rand::thread_rng())
}

pub fn uniform_noise_clocked<T: Sample>(
    size: usize,
    clock: Frequency,
    dispersion: f64,
    mean: f64,
) -> Result<Signal<T>> {
    require_clock(clock)?;
    clocked(uniform_noise(size, dispersion, mean), clock)
}

/// Normally distributed noise with standard deviation `dispersion`
pub fn gaussian_noise_with<T, R>(size: usize, dispersion: f64, mean: f64, rng: &mut R) -> Signal<T>
where
    T: Sample,
    R: Rng + ?Sized,
{
    (0..size)
        .map(|_| {
            let re: f64 = StandardNormal.sample(&mut *rng);
            let im: f64 = if T::IS_COMPLEX {
                StandardNormal.sample(&mut *rng)
            } else {
                0.0
            };
            T::from_parts(re * dispersion + mean, im * dispersion + mean)
        })
        .collect()
}

/// [`gaussian_noise_with`] using the thread-local generator
pub fn gaussian_noise<T: Sample>(size: usize, dispersion: f64, mean: f64) -> Signal<T> {
    gaussian_noise_with(size, dispersion, mean, &mut rand::thread_rng())
}

pub fn gaussian_noise_clocked<T: Sample>(
    size: usize,
    clock: Frequency,
    dispersion: f64,
    mean: f64,
) -> Result<Signal<T>> {
    require_clock(clock)?;
    clocked(gaussian_noise(size, dispersion, mean), clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{ComplexSignal, RealSignal};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_real_harmonic() {
        let signal: RealSignal = harmonic(8, 0.25, 2.0, 0.0);
        let expected = [0.0, 2.0, 0.0, -2.0, 0.0, 2.0, 0.0, -2.0];
        for (a, b) in signal.iter().zip(expected) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!(!signal.has_clock());
    }

    #[test]
    fn test_complex_harmonic_has_unit_magnitude() {
        let signal: ComplexSignal = harmonic(64, 0.1, 1.0, 0.3);
        assert!(signal.iter().all(|c| (c.norm() - 1.0).abs() < 1e-12));
        assert!((signal[0].re - 0.3f64.cos()).abs() < 1e-12);
    }

    #[test]
    fn test_clocked_generators() {
        let signal: RealSignal =
            harmonic_clocked(100, Frequency::khz(1.0), Frequency::hz(250.0), 1.0, 0.0).unwrap();
        assert_eq!(signal.clock(), Frequency::khz(1.0));
        assert!((signal[1] - 1.0).abs() < 1e-12);

        let err = harmonic_clocked::<f64>(10, Frequency::NONE, Frequency::hz(1.0), 1.0, 0.0);
        assert!(matches!(err, Err(DspError::InvalidArgument(_))));
        assert!(saw_clocked(10, Frequency::hz(-1.0), Frequency::hz(1.0), 1.0, 0.0).is_err());
    }

    #[test]
    fn test_chirp_degenerate_sizes() {
        assert!(chirp::<f64>(0, 0.0, 0.5, 1.0, 0.0).is_empty());
        let single: RealSignal = chirp(1, 0.1, 0.2, 1.0, PI / 2.0);
        assert!((single[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_meander_and_saw() {
        let square = meander(8, 0.25, 1.0, 0.0);
        assert_eq!(square.as_slice(), &[1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0]);

        let ramp = saw(4, 0.25, 1.0, 0.0);
        assert_eq!(ramp.as_slice(), &[-1.0, -0.5, 0.0, 0.5]);

        assert_eq!(meander(3, 0.0, 2.0, 0.0).as_slice(), &[2.0, 2.0, 2.0]);
        assert_eq!(saw(2, 0.0, 1.0, PI).as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn test_uniform_noise_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise: ComplexSignal = uniform_noise_with(1000, 0.5, 2.0, &mut rng);
        assert!(noise
            .iter()
            .all(|c| (1.5..=2.5).contains(&c.re) && (1.5..=2.5).contains(&c.im)));
    }

    #[test]
    fn test_gaussian_noise_statistics() {
        let mut rng = StdRng::seed_from_u64(42);
        let noise: RealSignal = gaussian_noise_with(20_000, 2.0, 1.0, &mut rng);
        let mean = noise.iter().sum::<f64>() / noise.len() as f64;
        let var = noise.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / noise.len() as f64;
        assert!((mean - 1.0).abs() < 0.1, "mean {}", mean);
        assert!((var.sqrt() - 2.0).abs() < 0.1, "std {}", var.sqrt());
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let a: RealSignal = gaussian_noise_with(16, 1.0, 0.0, &mut StdRng::seed_from_u64(3));
        let b: RealSignal = gaussian_noise_with(16, 1.0, 0.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
