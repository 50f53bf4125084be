use super::{Signal, SignalView};
use crate::types::{Frequency, Sample};
use std::ops::Deref;

/// Repositionable window (`position` + `width`) over a borrowed [`Signal`].
///
/// The frame never copies samples. A window reaching past the end of the
/// signal only exposes the overlapping part.
#[derive(Debug)]
pub struct SignalFrame<'a, T> {
    signal: &'a Signal<T>,
    position: usize,
    width: usize,
}

impl<T> Clone for SignalFrame<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SignalFrame<'_, T> {}

impl<'a, T: Sample> SignalFrame<'a, T> {
    /// Frame of `width` samples starting at `position`
    pub fn new(signal: &'a Signal<T>, width: usize, position: usize) -> Self {
        Self {
            signal,
            position,
            width,
        }
    }

    /// Frame covering the whole signal
    pub fn whole(signal: &'a Signal<T>) -> Self {
        Self::new(signal, signal.len(), 0)
    }

    /// Frame over the same signal, `start` samples after this frame's position
    pub fn subframe(&self, width: usize, start: usize) -> Self {
        Self::new(self.signal, width, self.position.saturating_add(start))
    }

    pub fn signal(&self) -> &'a Signal<T> {
        self.signal
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) -> &mut Self {
        self.position = position;
        self
    }

    pub fn reset_position(&mut self) -> &mut Self {
        self.position = 0;
        self
    }

    /// Move the frame by `count` samples (negative moves back, stopping at 0)
    pub fn shift(&mut self, count: isize) -> &mut Self {
        self.position = self.position.saturating_add_signed(count);
        self
    }

    /// Nominal width (may exceed the visible part near the end of the signal)
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn set_width(&mut self, width: usize) -> &mut Self {
        self.width = width;
        self
    }

    /// Same as [`SignalFrame::set_width`]
    pub fn resize(&mut self, width: usize) -> &mut Self {
        self.set_width(width)
    }

    pub fn increase_width(&mut self, increment: usize) -> &mut Self {
        self.width = self.width.saturating_add(increment);
        self
    }

    pub fn decrease_width(&mut self, decrement: usize) -> &mut Self {
        self.width = self.width.saturating_sub(decrement);
        self
    }

    /// Stretch the width to the length of the whole signal
    pub fn reset_size(&mut self) -> &mut Self {
        self.width = self.signal.len();
        self
    }

    pub fn signal_size(&self) -> usize {
        self.signal.len()
    }

    pub fn is_signal_empty(&self) -> bool {
        self.signal.is_empty()
    }

    /// Whether the frame starts at or past the end of the signal
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.signal.len()
    }

    pub fn has_clock(&self) -> bool {
        self.signal.has_clock()
    }

    /// Visible samples, clamped to the signal bounds
    pub fn as_slice(&self) -> &'a [T] {
        let len = self.signal.len();
        let start = self.position.min(len);
        let end = self.position.saturating_add(self.width).min(len);
        &self.signal.as_slice()[start..end]
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).copied()
    }

    /// Duration of the visible samples in seconds (0 without clock)
    pub fn duration(&self) -> f64 {
        self.signal.duration_of(self.as_slice().len())
    }

    /// Copy the visible samples into a new signal with the signal's clock
    pub fn to_signal(&self) -> Signal<T> {
        Signal::from_parts(self.as_slice().to_vec(), self.signal.clock())
    }
}

impl<T> Deref for SignalFrame<'_, T>
where
    T: Sample,
{
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Sample> SignalView for SignalFrame<'_, T> {
    type Sample = T;

    fn samples(&self) -> &[T] {
        self.as_slice()
    }

    fn clock(&self) -> Frequency {
        self.signal.clock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::RealSignal;

    fn ramp(n: usize) -> RealSignal {
        let mut signal: RealSignal = (0..n).map(|i| i as f64).collect();
        signal.set_clock(Frequency::hz(100.0)).unwrap();
        signal
    }

    #[test]
    fn test_frame_walks_signal() {
        let signal = ramp(10);
        let mut frame = SignalFrame::new(&signal, 4, 0);
        assert_eq!(frame.as_slice(), &[0.0, 1.0, 2.0, 3.0]);

        frame.shift(4);
        assert_eq!(frame.position(), 4);
        assert_eq!(frame.as_slice(), &[4.0, 5.0, 6.0, 7.0]);

        // Past the end only the overlap is visible
        frame.shift(4);
        assert_eq!(frame.as_slice(), &[8.0, 9.0]);
        assert_eq!(frame.width(), 4);

        frame.shift(4);
        assert!(frame.is_exhausted());
        assert!(frame.as_slice().is_empty());

        frame.shift(-100);
        assert_eq!(frame.position(), 0);
    }

    #[test]
    fn test_frame_resize_and_subframe() {
        let signal = ramp(10);
        let mut frame = SignalFrame::new(&signal, 2, 3);
        frame.increase_width(3);
        assert_eq!(frame.width(), 5);
        frame.decrease_width(10);
        assert_eq!(frame.width(), 0);
        frame.reset_size();
        assert_eq!(frame.width(), signal.len());
        frame.set_width(4);

        let sub = frame.subframe(2, 1);
        assert_eq!(sub.position(), 4);
        assert_eq!(sub.as_slice(), &[4.0, 5.0]);
        assert_eq!(sub.get(1), Some(5.0));
        assert_eq!(sub.get(2), None);
    }

    #[test]
    fn test_frame_to_signal_keeps_clock() {
        let signal = ramp(6);
        let frame = SignalFrame::new(&signal, 3, 2);
        let copy = frame.to_signal();
        assert_eq!(copy.as_slice(), &[2.0, 3.0, 4.0]);
        assert_eq!(copy.clock(), Frequency::hz(100.0));
        assert!((frame.duration() - 0.03).abs() < 1e-12);
        assert_eq!(frame.signal_size(), 6);
        assert!(!frame.is_signal_empty());
    }
}
