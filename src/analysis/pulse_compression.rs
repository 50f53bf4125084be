//! Radar pulse compression
//!
//! Two interchangeable back-ends convolve received data with a reference
//! pulse and normalize by the pulse length:
//! - [`TimeDomainCompressor`] - direct convolution
//! - [`FrequencyDomainCompressor`] - block-wise spectrum multiplication

use super::convolution::convolution;
use super::fft::FftEngine;
use crate::error::Result;
use crate::signal::{ComplexSignal, Signal, SignalFrame, SignalView};
use crate::types::Complex64;

/// Common interface of pulse compression back-ends
pub trait PulseCompressor {
    /// Replace the reference pulse
    fn set_pulse(&mut self, pulse: ComplexSignal);

    fn pulse(&self) -> &ComplexSignal;

    /// Compress `data` against the current pulse
    fn process(&mut self, data: &ComplexSignal) -> ComplexSignal;
}

/// Direct convolution, keeping the leading transient
#[derive(Debug, Clone, Default)]
pub struct TimeDomainCompressor {
    pulse: ComplexSignal,
}

impl TimeDomainCompressor {
    pub fn new(pulse: ComplexSignal) -> Self {
        Self { pulse }
    }
}

impl PulseCompressor for TimeDomainCompressor {
    fn set_pulse(&mut self, pulse: ComplexSignal) {
        self.pulse = pulse;
    }

    fn pulse(&self) -> &ComplexSignal {
        &self.pulse
    }

    fn process(&mut self, data: &ComplexSignal) -> ComplexSignal {
        let mut result = convolution(data, &self.pulse, true, false);
        if !self.pulse.is_empty() {
            result *= 1.0 / self.pulse.len() as f64;
        }
        result
    }
}

/// Block convolution through the FFT.
///
/// Data is cut into consecutive blocks of the FFT size; each block spectrum
/// is multiplied by the pulse spectrum and transformed back. Samples after
/// the last full block stay zero.
#[derive(Debug, Clone)]
pub struct FrequencyDomainCompressor {
    pulse: ComplexSignal,
    pulse_spectrum: ComplexSignal,
    forward: FftEngine,
    inverse: FftEngine,
}

impl FrequencyDomainCompressor {
    /// Compressor with an FFT of `floor(log2(fft_size))` power
    pub fn new(fft_size: usize) -> Result<Self> {
        let mut compressor = Self {
            pulse: ComplexSignal::new(),
            pulse_spectrum: ComplexSignal::new(),
            forward: FftEngine::with_size(fft_size, false)?,
            inverse: FftEngine::with_size(fft_size, true)?,
        };
        compressor.update_spectrum();
        Ok(compressor)
    }

    pub fn fft_size(&self) -> usize {
        self.forward.size()
    }

    pub fn set_fft_size(&mut self, fft_size: usize) -> Result<()> {
        self.forward.set_size(fft_size)?;
        self.inverse.set_size(fft_size)?;
        self.update_spectrum();
        Ok(())
    }

    fn update_spectrum(&mut self) {
        self.pulse_spectrum = self.forward.compute(&self.pulse);
    }
}

impl PulseCompressor for FrequencyDomainCompressor {
    fn set_pulse(&mut self, pulse: ComplexSignal) {
        self.pulse = pulse;
        self.update_spectrum();
    }

    fn pulse(&self) -> &ComplexSignal {
        &self.pulse
    }

    fn process(&mut self, data: &ComplexSignal) -> ComplexSignal {
        let fft_size = self.forward.size();
        let mut samples = vec![Complex64::default(); data.len()];
        if fft_size == 0 || self.pulse.is_empty() {
            return Signal::from_parts(samples, data.clock());
        }

        let scale = fft_size as f64 / self.pulse.len() as f64;
        let mut frame = SignalFrame::new(data, fft_size, 0);
        for block in samples.chunks_exact_mut(fft_size) {
            let spectrum = &self.forward.compute(&frame) * &self.pulse_spectrum;
            let restored = self.inverse.compute(&spectrum);
            for (out, value) in block.iter_mut().zip(restored.samples()) {
                *out = *value * scale;
            }
            frame.shift(fft_size as isize);
        }
        Signal::from_parts(samples, data.clock())
    }
}
