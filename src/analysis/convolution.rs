//! Convolution, correlation and the direct DFT
//!
//! Convolution and correlation of two operands of lengths `la` and `lb`
//! produce the full-overlap part (`max - min + 1` samples) and optionally the
//! leading and trailing transients (`min - 1` samples each) where the
//! operands only partly overlap. An empty operand gives an empty result.

use crate::signal::{result_clock, ComplexSignal, Signal, SignalView};
use crate::types::{Combine, Complex64, Sample};
use std::f64::consts::PI;
use std::ops::Range;

type Promoted<A, B> = <<A as SignalView>::Sample as Combine<<B as SignalView>::Sample>>::Promoted;

/// Output indices of the full linear convolution that are kept
fn kept_range(la: usize, lb: usize, keep_begin: bool, keep_end: bool) -> Range<usize> {
    let min = la.min(lb);
    let max = la.max(lb);
    let start = if keep_begin { 0 } else { min - 1 };
    let end = if keep_end { la + lb - 1 } else { max };
    start..end
}

/// Evaluate `term(k, n - k)` summed over every overlapping pair for each kept `n`
fn sliding_sum<O, F>(la: usize, lb: usize, keep_begin: bool, keep_end: bool, term: F) -> Vec<O>
where
    O: Sample,
    F: Fn(usize, usize) -> O,
{
    kept_range(la, lb, keep_begin, keep_end)
        .map(|n| {
            let first = n.saturating_sub(lb - 1);
            let last = n.min(la - 1);
            (first..=last).map(|k| term(k, n - k)).sum()
        })
        .collect()
}

/// Linear convolution `c[n] = Σ a[k]·b[n-k]`.
///
/// Result length is `(keep_begin ? min-1 : 0) + (max-min+1) + (keep_end ? min-1 : 0)`
/// and its clock follows the usual reconciliation rule.
pub fn convolution<A, B>(a: &A, b: &B, keep_begin: bool, keep_end: bool) -> Signal<Promoted<A, B>>
where
    A: SignalView + ?Sized,
    B: SignalView + ?Sized,
    A::Sample: Combine<B::Sample>,
{
    let clock = result_clock(a.clock(), b.clock());
    let (x, y) = (a.samples(), b.samples());
    if x.is_empty() || y.is_empty() {
        return Signal::from_parts(Vec::new(), clock);
    }
    let samples = sliding_sum(x.len(), y.len(), keep_begin, keep_end, |k, j| {
        x[k].mul_promoted(y[j])
    });
    Signal::from_parts(samples, clock)
}

/// Cross-correlation `r[n] = Σ a[k]·conj(b[k - n + lb - 1])`.
///
/// Same lengths and clock rule as [`convolution`]; the second operand is
/// conjugated instead of reversed.
pub fn cross_correlation<A, B>(
    a: &A,
    b: &B,
    keep_begin: bool,
    keep_end: bool,
) -> Signal<Promoted<A, B>>
where
    A: SignalView + ?Sized,
    B: SignalView + ?Sized,
    A::Sample: Combine<B::Sample>,
{
    let clock = result_clock(a.clock(), b.clock());
    let (x, y) = (a.samples(), b.samples());
    if x.is_empty() || y.is_empty() {
        return Signal::from_parts(Vec::new(), clock);
    }
    let last = y.len() - 1;
    let samples = sliding_sum(x.len(), y.len(), keep_begin, keep_end, |k, j| {
        x[k].mul_conj(y[last - j])
    });
    Signal::from_parts(samples, clock)
}

/// `cross_correlation(signal, signal, true, true)`
pub fn auto_correlation<V>(signal: &V) -> Signal<V::Sample>
where
    V: SignalView + ?Sized,
    V::Sample: Combine<V::Sample, Promoted = <V as SignalView>::Sample>,
{
    cross_correlation(signal, signal, true, true)
}

/// FIR filtering: convolution of the filter taps with the signal
pub fn fir_filter<C, V>(
    coefficients: &C,
    signal: &V,
    keep_begin: bool,
    keep_end: bool,
) -> Signal<Promoted<C, V>>
where
    C: SignalView + ?Sized,
    V: SignalView + ?Sized,
    C::Sample: Combine<V::Sample>,
{
    convolution(coefficients, signal, keep_begin, keep_end)
}

/// Direct (slow) discrete Fourier transform.
///
/// Uses the first `min(size, len)` samples and produces that many bins. The
/// forward transform is scaled by `1/N`, the inverse one is not.
pub fn dft<V: SignalView + ?Sized>(signal: &V, size: usize, inverted: bool) -> ComplexSignal {
    let n = size.min(signal.len());
    let input = &signal.samples()[..n];
    let direction = if inverted { 1.0 } else { -1.0 };
    let scale = if inverted { 1.0 } else { 1.0 / n as f64 };

    let samples = (0..n)
        .map(|i| {
            let sum: Complex64 = input
                .iter()
                .enumerate()
                .map(|(k, x)| {
                    // (i·k) mod n keeps the angle small for long inputs
                    let turns = ((i * k) % n) as f64 / n as f64;
                    x.to_complex() * Complex64::from_polar(1.0, direction * 2.0 * PI * turns)
                })
                .sum();
            sum * scale
        })
        .collect();
    Signal::from_parts(samples, signal.clock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{RealSignal, SignalFrame};
    use crate::types::Frequency;

    fn real(samples: &[f64]) -> RealSignal {
        RealSignal::from_vec(samples.to_vec())
    }

    #[test]
    fn test_convolution_regions() {
        let a = real(&[1.0, 2.0, 3.0, 4.0]);
        let b = real(&[1.0, 1.0]);
        assert_eq!(
            convolution(&a, &b, true, true).as_slice(),
            &[1.0, 3.0, 5.0, 7.0, 4.0]
        );
        assert_eq!(convolution(&a, &b, false, false).as_slice(), &[3.0, 5.0, 7.0]);
        assert_eq!(convolution(&a, &b, true, false).as_slice(), &[1.0, 3.0, 5.0, 7.0]);
        assert_eq!(convolution(&a, &b, false, true).as_slice(), &[3.0, 5.0, 7.0, 4.0]);
        // operand order does not matter
        assert_eq!(
            convolution(&b, &a, true, true).as_slice(),
            &[1.0, 3.0, 5.0, 7.0, 4.0]
        );
    }

    #[test]
    fn test_convolution_with_impulse() {
        let a = real(&[1.0, 0.0, 0.0]);
        let b = real(&[1.0, 2.0, 3.0]);
        assert_eq!(
            convolution(&a, &b, true, true).as_slice(),
            &[1.0, 2.0, 3.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_cross_correlation_of_complex() {
        let a = ComplexSignal::from_vec(vec![Complex64::new(0.0, 1.0), Complex64::new(1.0, 0.0)]);
        let r = auto_correlation(&a);
        assert_eq!(r.len(), 3);
        // zero lag is the energy
        assert_eq!(r[1], Complex64::new(2.0, 0.0));
        assert_eq!(r[0], Complex64::new(0.0, 1.0));
        assert_eq!(r[2], Complex64::new(0.0, -1.0));
    }

    #[test]
    fn test_correlation_finds_delay() {
        let pulse = real(&[1.0, -1.0, 1.0]);
        let mut data = vec![0.0; 10];
        data[5..8].copy_from_slice(&[1.0, -1.0, 1.0]);
        let data = real(&data);
        let r = cross_correlation(&data, &pulse, false, false);
        let (best, _) = r
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        assert_eq!(best, 5);
    }

    #[test]
    fn test_empty_and_single_operands() {
        let empty = RealSignal::with_clock(Vec::new(), Frequency::hz(10.0)).unwrap();
        let a = real(&[1.0, 2.0]);
        let r = convolution(&empty, &a, true, true);
        assert!(r.is_empty());
        assert_eq!(r.clock(), Frequency::hz(10.0));
        assert!(cross_correlation(&a, &empty, true, true).is_empty());

        let one = real(&[2.0]);
        assert_eq!(convolution(&a, &one, true, true).as_slice(), &[2.0, 4.0]);
        assert_eq!(cross_correlation(&one, &one, true, true).as_slice(), &[4.0]);
    }

    #[test]
    fn test_fir_filter_on_frame() {
        let signal = real(&[0.0, 0.0, 4.0, 4.0, 4.0, 4.0]);
        let frame = SignalFrame::new(&signal, 4, 2);
        let taps = real(&[0.5, 0.5]);
        assert_eq!(fir_filter(&taps, &frame, false, false).as_slice(), &[4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_dft_matches_definition() {
        let signal = real(&[1.0, 0.0, -1.0, 0.0]);
        let spectrum = dft(&signal, 4, false);
        assert!((spectrum[1] - Complex64::new(0.5, 0.0)).norm() < 1e-12);
        assert!((spectrum[3] - Complex64::new(0.5, 0.0)).norm() < 1e-12);
        assert!(spectrum[0].norm() < 1e-12);

        let restored = dft(&spectrum, 4, true);
        for (a, b) in restored.iter().zip(signal.iter()) {
            assert!((a.re - b).abs() < 1e-12 && a.im.abs() < 1e-12);
        }

        assert_eq!(dft(&signal, 2, false).len(), 2);
        assert!(dft(&signal, 0, false).is_empty());
    }
}
