//! Sample-rate reduction: CIC filtering and decimation

use crate::error::{DspError, Result};
use crate::signal::{Signal, SignalView};
use crate::types::Sample;

/// Cascaded integrator-comb filter.
///
/// Runs `order` passes of a running-sum integrator followed by a comb with
/// the given `delay` over a copy of the input. Either parameter at 0 yields
/// an empty signal carrying the input clock.
pub fn cic_filter<V>(signal: &V, order: usize, delay: usize) -> Signal<V::Sample>
where
    V: SignalView + ?Sized,
{
    if order == 0 || delay == 0 {
        return Signal::from_parts(Vec::new(), signal.clock());
    }

    let mut samples = signal.samples().to_vec();
    for _ in 0..order {
        for i in 1..samples.len() {
            let previous = samples[i - 1];
            samples[i] += previous;
        }
        for i in (delay..samples.len()).rev() {
            let delayed = samples[i - delay];
            samples[i] -= delayed;
        }
    }
    Signal::from_parts(samples, signal.clock())
}

/// Keep one sample out of `factor`, or sum each block of `factor` samples.
///
/// With `accumulate` the blocks are summed (and divided by `factor` when
/// `average` is set); otherwise every `factor`-th sample is taken. The result
/// has `len / factor` samples and a clock divided by `factor`.
pub fn decimate<V>(signal: &V, factor: usize, accumulate: bool, average: bool) -> Result<Signal<V::Sample>>
where
    V: SignalView + ?Sized,
{
    if factor == 0 {
        return Err(DspError::invalid_argument("decimation factor must be positive"));
    }

    let blocks = signal.samples().chunks_exact(factor);
    let samples: Vec<V::Sample> = if accumulate {
        let divisor = if average { factor as f64 } else { 1.0 };
        blocks
            .map(|block| block.iter().copied().sum::<V::Sample>() / divisor)
            .collect()
    } else {
        blocks.map(|block| block[0]).collect()
    };
    Ok(Signal::from_parts(samples, signal.clock() / factor as f64))
}
