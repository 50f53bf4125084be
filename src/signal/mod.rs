//! Sampled signal containers
//!
//! A [`Signal`] is an ordered run of real (`f64`) or complex ([`Complex64`])
//! samples plus an optional sample rate ("clock"). Everything that reads
//! samples goes through the [`SignalView`] trait so that algorithms accept
//! owned signals, frames and waveforms alike.
//!
//! Binary operations between two signals reconcile their clocks with
//! [`result_clock`] and their lengths with [`result_size`].

mod frame;
pub mod generators;
pub mod measure;
pub mod modulation;
mod ops;

pub use frame::SignalFrame;

use crate::error::{DspError, Result};
use crate::types::{Complex64, Frequency, Sample};
use std::ops::{Deref, DerefMut};

/// Signal of real samples
pub type RealSignal = Signal<f64>;

/// Signal of complex samples
pub type ComplexSignal = Signal<Complex64>;

/// Read-only access to a run of samples and its clock
pub trait SignalView {
    type Sample: Sample;

    fn samples(&self) -> &[Self::Sample];

    fn clock(&self) -> Frequency;

    fn len(&self) -> usize {
        self.samples().len()
    }

    fn is_empty(&self) -> bool {
        self.samples().is_empty()
    }
}

impl<V: SignalView + ?Sized> SignalView for &V {
    type Sample = V::Sample;

    fn samples(&self) -> &[Self::Sample] {
        (**self).samples()
    }

    fn clock(&self) -> Frequency {
        (**self).clock()
    }
}

/// Clock of the result of combining two operands.
///
/// Equal positive clocks are kept, a single positive clock wins, anything
/// else (including two different positive clocks) yields [`Frequency::NONE`].
pub fn result_clock(lhs: Frequency, rhs: Frequency) -> Frequency {
    match (lhs.is_positive(), rhs.is_positive()) {
        (true, true) if lhs == rhs => lhs,
        (true, true) => {
            tracing::warn!(
                "Operands have different clocks ({} vs {}), result has no clock",
                lhs,
                rhs
            );
            Frequency::NONE
        }
        (true, false) => lhs,
        (false, true) => rhs,
        (false, false) => Frequency::NONE,
    }
}

/// Length of an element-wise result: the shorter operand
pub fn result_size(lhs: usize, rhs: usize) -> usize {
    if lhs != rhs {
        tracing::trace!("Operands have different sizes: {} vs {}", lhs, rhs);
    }
    lhs.min(rhs)
}

fn check_clock(clock: Frequency) -> Result<()> {
    // NaN fails both comparisons
    if clock.value() >= 0.0 {
        Ok(())
    } else {
        Err(DspError::invalid_argument(format!(
            "clock must be positive or unset, got {}",
            clock
        )))
    }
}

/// Owned sequence of samples with an optional clock.
///
/// Equality compares both the samples and the clock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signal<T> {
    samples: Vec<T>,
    clock: Frequency,
}

impl<T: Sample> Signal<T> {
    /// Empty signal without clock
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            clock: Frequency::NONE,
        }
    }

    /// `size` zero samples without clock
    pub fn zeros(size: usize) -> Self {
        Self::from_vec(vec![T::default(); size])
    }

    /// `size` copies of `value` without clock
    pub fn filled(size: usize, value: T) -> Self {
        Self::from_vec(vec![value; size])
    }

    pub fn from_vec(samples: Vec<T>) -> Self {
        Self {
            samples,
            clock: Frequency::NONE,
        }
    }

    /// Build a signal with a clock; a negative clock is rejected
    pub fn with_clock(samples: Vec<T>, clock: Frequency) -> Result<Self> {
        check_clock(clock)?;
        Ok(Self { samples, clock })
    }

    /// Internal constructor for clocks that already went through reconciliation
    pub(crate) fn from_parts(samples: Vec<T>, clock: Frequency) -> Self {
        Self { samples, clock }
    }

    pub fn clock(&self) -> Frequency {
        self.clock
    }

    pub fn set_clock(&mut self, clock: Frequency) -> Result<()> {
        check_clock(clock)?;
        self.clock = clock;
        Ok(())
    }

    pub fn has_clock(&self) -> bool {
        self.clock.is_positive()
    }

    pub fn reset_clock(&mut self) {
        self.clock.clear();
    }

    /// Duration of the whole signal in seconds (0 without clock)
    pub fn duration(&self) -> f64 {
        self.duration_of(self.samples.len())
    }

    /// Duration of `count` samples in seconds (0 without clock)
    pub fn duration_of(&self, count: usize) -> f64 {
        if self.has_clock() {
            count as f64 / self.clock.value()
        } else {
            0.0
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.samples
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.samples
    }

    pub fn into_vec(self) -> Vec<T> {
        self.samples
    }

    pub fn push(&mut self, value: T) {
        self.samples.push(value);
    }

    /// Append the samples of `other`; the clock is reconciled
    pub fn append<V: SignalView<Sample = T>>(&mut self, other: &V) {
        self.clock = result_clock(self.clock, other.clock());
        self.samples.extend_from_slice(other.samples());
    }

    /// Resize in place, padding with zeros. The clock is untouched.
    pub fn resize(&mut self, size: usize) {
        self.samples.resize(size, T::default());
    }

    pub fn truncate(&mut self, size: usize) {
        self.samples.truncate(size);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Overwrite every sample with `value`
    pub fn fill(&mut self, value: T) -> &mut Self {
        self.samples.fill(value);
        self
    }

    /// Copy of `len` samples starting at `pos`, clamped to the signal bounds.
    ///
    /// `len == None` copies up to the end.
    pub fn mid(&self, pos: usize, len: Option<usize>) -> Self {
        let start = pos.min(self.samples.len());
        let end = match len {
            Some(len) => start.saturating_add(len).min(self.samples.len()),
            None => self.samples.len(),
        };
        Self::from_parts(self.samples[start..end].to_vec(), self.clock)
    }

    /// Apply `f` to every sample, keeping the clock
    pub fn map<U: Sample>(&self, f: impl FnMut(T) -> U) -> Signal<U> {
        Signal::from_parts(self.samples.iter().copied().map(f).collect(), self.clock)
    }

    /// Lossless conversion to a complex signal, keeping the clock
    pub fn to_complex(&self) -> ComplexSignal {
        self.map(Sample::to_complex)
    }
}

impl ComplexSignal {
    /// In-phase (real) component
    pub fn i(&self) -> RealSignal {
        self.map(|c| c.re)
    }

    /// Quadrature (imaginary) component
    pub fn q(&self) -> RealSignal {
        self.map(|c| c.im)
    }

    /// Build from separate I and Q components (common length, reconciled clock)
    pub fn from_iq<I, Q>(i: &I, q: &Q) -> Self
    where
        I: SignalView<Sample = f64>,
        Q: SignalView<Sample = f64>,
    {
        let size = result_size(i.len(), q.len());
        let samples = i.samples()[..size]
            .iter()
            .zip(&q.samples()[..size])
            .map(|(&re, &im)| Complex64::new(re, im))
            .collect();
        Self::from_parts(samples, result_clock(i.clock(), q.clock()))
    }

    /// Append real samples (zero imaginary part); the clock is reconciled
    pub fn append_real<V: SignalView<Sample = f64>>(&mut self, other: &V) {
        self.clock = result_clock(self.clock, other.clock());
        self.samples
            .extend(other.samples().iter().map(|&x| Complex64::new(x, 0.0)));
    }
}

impl From<RealSignal> for ComplexSignal {
    fn from(signal: RealSignal) -> Self {
        signal.to_complex()
    }
}

impl<T: Sample> From<Vec<T>> for Signal<T> {
    fn from(samples: Vec<T>) -> Self {
        Self::from_vec(samples)
    }
}

impl<T: Sample> FromIterator<T> for Signal<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Signal<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Signal<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl<T> Deref for Signal<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.samples
    }
}

impl<T> DerefMut for Signal<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.samples
    }
}

impl<T: Sample> SignalView for Signal<T> {
    type Sample = T;

    fn samples(&self) -> &[T] {
        &self.samples
    }

    fn clock(&self) -> Frequency {
        self.clock
    }
}
