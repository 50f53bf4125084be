//! Analog modulation of a real carrier by a real message signal.
//!
//! `magnitude` is the carrier amplitude, `norm_freq` its normalized frequency
//! and `phase` its initial phase. The result keeps the message clock.

use super::{RealSignal, Signal, SignalView};
use std::f64::consts::PI;

fn modulate<V, F>(source: &V, mut carrier: F) -> RealSignal
where
    V: SignalView<Sample = f64> + ?Sized,
    F: FnMut(usize, f64) -> f64,
{
    Signal::from_parts(
        source
            .samples()
            .iter()
            .enumerate()
            .map(|(i, &x)| carrier(i, x))
            .collect(),
        source.clock(),
    )
}

/// `U (1 + M x[i]) sin(2π f i + φ)` with modulation depth `depth` (M)
pub fn amplitude<V>(source: &V, depth: f64, norm_freq: f64, magnitude: f64, phase: f64) -> RealSignal
where
    V: SignalView<Sample = f64> + ?Sized,
{
    modulate(source, |i, x| {
        magnitude * (1.0 + depth * x) * (2.0 * PI * norm_freq * i as f64 + phase).sin()
    })
}

/// Frequency modulation: the phase deviation follows the running sum of the message
pub fn frequency<V>(source: &V, index: f64, norm_freq: f64, magnitude: f64, phase: f64) -> RealSignal
where
    V: SignalView<Sample = f64> + ?Sized,
{
    let mut integral = 0.0;
    modulate(source, |i, x| {
        integral += x;
        let carrier = 2.0 * PI * norm_freq * i as f64;
        magnitude * (carrier + index * 2.0 * PI * norm_freq * integral + phase).sin()
    })
}

/// Phase modulation: `U sin(2π f i + 2π m x[i] + φ)`
pub fn phase<V>(source: &V, index: f64, norm_freq: f64, magnitude: f64, phase: f64) -> RealSignal
where
    V: SignalView<Sample = f64> + ?Sized,
{
    modulate(source, |i, x| {
        magnitude * (2.0 * PI * norm_freq * i as f64 + 2.0 * PI * index * x + phase).sin()
    })
}
