//! Test data builders for signals and waveforms

use chrono::{DateTime, Utc};
use sigkit_rs::signal::generators;
use sigkit_rs::{Complex64, ComplexSignal, ComplexWaveform, Frequency, Signal};

/// Builder for clocked complex test signals
pub struct SignalBuilder {
    samples: Vec<Complex64>,
    clock: Frequency,
}

impl SignalBuilder {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            clock: Frequency::NONE,
        }
    }

    /// Complex tone at `norm_freq` cycles per sample
    pub fn tone(mut self, size: usize, norm_freq: f64, magnitude: f64) -> Self {
        let tone: ComplexSignal = generators::harmonic(size, norm_freq, magnitude, 0.0);
        self.samples = tone.into_vec();
        self
    }

    /// `0, 1, 2, ...` on the real axis with `0, 0.5, 1, ...` on the imaginary one
    pub fn ramp(mut self, size: usize) -> Self {
        self.samples = (0..size)
            .map(|i| Complex64::new(i as f64, i as f64 / 2.0))
            .collect();
        self
    }

    pub fn clock(mut self, clock: Frequency) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> ComplexSignal {
        let mut signal = Signal::from_vec(self.samples);
        if self.clock.is_positive() {
            signal
                .set_clock(self.clock)
                .expect("positive clock is always valid");
        }
        signal
    }
}

/// Builder for waveforms with fixed metadata
pub struct WaveformBuilder {
    signal: ComplexSignal,
    comment: String,
    date_time: DateTime<Utc>,
}

impl WaveformBuilder {
    pub fn new(signal: ComplexSignal) -> Self {
        Self {
            signal,
            comment: String::new(),
            date_time: DateTime::from_timestamp(1_600_000_000, 0).expect("valid timestamp"),
        }
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    pub fn build(self) -> ComplexWaveform {
        ComplexWaveform::with_metadata(self.signal, self.comment, self.date_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_builder() {
        let signal = SignalBuilder::new().ramp(4).clock(Frequency::khz(1.0)).build();
        assert_eq!(signal.len(), 4);
        assert_eq!(signal[3], Complex64::new(3.0, 1.5));
        assert_eq!(signal.clock(), Frequency::khz(1.0));
    }

    #[test]
    fn test_waveform_builder() {
        let waveform = WaveformBuilder::new(SignalBuilder::new().ramp(2).build())
            .comment("ramp")
            .build();
        assert_eq!(waveform.comment(), "ramp");
        assert_eq!(waveform.len(), 2);
    }
}
