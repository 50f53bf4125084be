//! FFT (Fast Fourier Transform) engine
//!
//! Provides a radix-2 decimation-in-frequency transform over any
//! [`SignalView`]:
//! - power-of-two sizes only (`size = 2^power`, `power == 0` disables it)
//! - forward transform scaled by `1/size`
//! - inverse transform computed through the re/im swap identity, unscaled
//!
//! An engine owns its rotation table and scratch buffer, so it is `!Sync` in
//! spirit: use one engine per thread.

use crate::config::FftSettings;
use crate::error::{DspError, Result};
use crate::signal::{ComplexSignal, Signal, SignalView};
use crate::types::{Complex64, Sample};
use std::f64::consts::PI;

/// Largest supported FFT power (2^26 points)
pub const MAX_FFT_POWER: u32 = 26;

/// Reverse the lowest `bits` bits of `value`
fn reverse_bits(value: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    value.reverse_bits() >> (usize::BITS - bits)
}

fn swap_parts(value: Complex64) -> Complex64 {
    Complex64::new(value.im, value.re)
}

/// Reusable power-of-two FFT
#[derive(Debug, Clone, Default)]
pub struct FftEngine {
    power: u32,
    size: usize,
    inverted: bool,
    /// `exp(-j 2π k / size)` for `k` in `[0, size/2)`
    rotations: Vec<Complex64>,
    buffer: Vec<Complex64>,
}

impl FftEngine {
    /// Forward engine of size `2^power`
    pub fn new(power: u32) -> Result<Self> {
        let mut engine = Self::default();
        engine.set_power(power)?;
        Ok(engine)
    }

    /// Inverse engine of size `2^power`
    pub fn inverse(power: u32) -> Result<Self> {
        let mut engine = Self::new(power)?;
        engine.set_inverted(true);
        Ok(engine)
    }

    /// Engine sized to the largest power of two not above `size`
    pub fn with_size(size: usize, inverted: bool) -> Result<Self> {
        let mut engine = Self::default();
        engine.set_size(size)?;
        engine.set_inverted(inverted);
        Ok(engine)
    }

    /// Create engine from configuration
    pub fn from_config(settings: &FftSettings) -> Result<Self> {
        let mut engine = Self::new(settings.power)?;
        engine.set_inverted(settings.inverted);
        Ok(engine)
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    /// Transform size (0 while disabled)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    /// Whether the engine has a non-zero size
    pub fn is_ready(&self) -> bool {
        self.power > 0
    }

    /// Change the transform size to `2^power`, rebuilding the rotation table
    pub fn set_power(&mut self, power: u32) -> Result<()> {
        if power > MAX_FFT_POWER {
            return Err(DspError::invalid_argument(format!(
                "FFT power {} exceeds maximum {}",
                power, MAX_FFT_POWER
            )));
        }
        self.power = power;
        if power == 0 {
            self.size = 0;
            self.rotations.clear();
            self.buffer.clear();
            return Ok(());
        }

        self.size = 1 << power;
        self.buffer.clear();
        self.buffer.resize(self.size, Complex64::default());
        let step = 2.0 * PI / self.size as f64;
        self.rotations = (0..self.size / 2)
            .map(|k| {
                let angle = step * k as f64;
                Complex64::new(angle.cos(), -angle.sin())
            })
            .collect();
        tracing::trace!("FFT engine resized to {} points", self.size);
        Ok(())
    }

    /// Size the engine to `floor(log2(size))`; sizes below 2 disable it
    pub fn set_size(&mut self, size: usize) -> Result<()> {
        let power = if size < 2 { 0 } else { size.ilog2() };
        self.set_power(power)
    }

    /// Transform `signal`.
    ///
    /// The first `size` samples are used (zero-padded when shorter). The
    /// result has exactly `size` samples and the input clock; a disabled
    /// engine returns an empty signal.
    pub fn compute<V: SignalView + ?Sized>(&mut self, signal: &V) -> ComplexSignal {
        if self.power == 0 {
            return Signal::from_parts(Vec::new(), signal.clock());
        }

        let input = signal.samples();
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let value = input.get(i).map_or(Complex64::default(), |x| x.to_complex());
            *slot = if self.inverted { swap_parts(value) } else { value };
        }

        self.butterflies();

        let scale = 1.0 / self.size as f64;
        let samples = (0..self.size)
            .map(|i| {
                let x = self.buffer[reverse_bits(i, self.power)];
                if self.inverted {
                    swap_parts(x)
                } else {
                    x * scale
                }
            })
            .collect();
        Signal::from_parts(samples, signal.clock())
    }

    fn butterflies(&mut self) {
        for stage in (1..=self.power).rev() {
            let group = 1usize << stage;
            let half = group / 2;
            let stride = 1usize << (self.power - stage);
            for block in self.buffer.chunks_exact_mut(group) {
                let (low, high) = block.split_at_mut(half);
                for (k, (a, b)) in low.iter_mut().zip(high.iter_mut()).enumerate() {
                    let sum = *a + *b;
                    let diff = self.rotations[k * stride] * (*a - *b);
                    *a = sum;
                    *b = diff;
                }
            }
        }
    }
}

/// One-shot transform with a temporary engine of `floor(log2(size))` power
pub fn fft<V: SignalView + ?Sized>(signal: &V, size: usize, inverted: bool) -> Result<ComplexSignal> {
    let mut engine = FftEngine::with_size(size, inverted)?;
    Ok(engine.compute(signal))
}
