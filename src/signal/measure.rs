//! Scalar and element-wise measurements over signals

use super::{result_size, RealSignal, Signal, SignalView};
use crate::types::{Combine, Complex64, Sample};

/// Magnitude of every sample, keeping the clock
pub fn abs<V: SignalView + ?Sized>(signal: &V) -> RealSignal {
    Signal::from_parts(
        signal.samples().iter().map(|&x| x.norm()).collect(),
        signal.clock(),
    )
}

/// Phase angle of every complex sample in radians, keeping the clock
pub fn arg<V: SignalView<Sample = Complex64> + ?Sized>(signal: &V) -> RealSignal {
    Signal::from_parts(
        signal.samples().iter().map(|x| x.arg()).collect(),
        signal.clock(),
    )
}

/// Largest sample magnitude (0 for an empty signal)
pub fn peak<V: SignalView + ?Sized>(signal: &V) -> f64 {
    signal
        .samples()
        .iter()
        .map(|&x| x.norm())
        .fold(0.0, f64::max)
}

/// Root mean square of the sample magnitudes (0 for an empty signal)
pub fn rms<V: SignalView + ?Sized>(signal: &V) -> f64 {
    let samples = signal.samples();
    if samples.is_empty() {
        return 0.0;
    }
    let energy: f64 = samples.iter().map(|&x| x.norm() * x.norm()).sum();
    (energy / samples.len() as f64).sqrt()
}

/// Inner product over the common length with the second operand conjugated
pub fn correlation<A, B>(a: &A, b: &B) -> <A::Sample as Combine<B::Sample>>::Promoted
where
    A: SignalView + ?Sized,
    B: SignalView + ?Sized,
    A::Sample: Combine<B::Sample>,
{
    let size = result_size(a.len(), b.len());
    a.samples()[..size]
        .iter()
        .zip(&b.samples()[..size])
        .map(|(&x, &y)| x.mul_conj(y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::ComplexSignal;
    use crate::types::Frequency;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_peak_and_rms() {
        let signal = RealSignal::from_vec(vec![3.0, -4.0, 0.0, 1.0]);
        assert_eq!(peak(&signal), 4.0);
        assert!((rms(&signal) - (26.0f64 / 4.0).sqrt()).abs() < 1e-12);

        let empty = RealSignal::new();
        assert_eq!(peak(&empty), 0.0);
        assert_eq!(rms(&empty), 0.0);
    }

    #[test]
    fn test_abs_and_arg_keep_clock() {
        let signal = ComplexSignal::with_clock(
            vec![Complex64::new(3.0, 4.0), Complex64::new(0.0, 2.0)],
            Frequency::hz(8.0),
        )
        .unwrap();
        let magnitude = abs(&signal);
        assert_eq!(magnitude.as_slice(), &[5.0, 2.0]);
        assert_eq!(magnitude.clock(), Frequency::hz(8.0));

        let phase = arg(&signal);
        assert!((phase[1] - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_conjugates_second_operand() {
        let a = ComplexSignal::from_vec(vec![Complex64::new(0.0, 1.0); 3]);
        assert_eq!(correlation(&a, &a), Complex64::new(3.0, 0.0));

        let x = RealSignal::from_vec(vec![1.0, 2.0, 3.0]);
        let y = RealSignal::from_vec(vec![1.0, 1.0]);
        assert_eq!(correlation(&x, &y), 3.0);
    }
}
