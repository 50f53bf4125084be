//! Arithmetic between signals, frames and scalars.
//!
//! Binary operators reconcile clocks with [`result_clock`] and truncate to the
//! shorter operand. Mixed real/complex operands promote to complex through
//! [`Combine`]. Division is only defined by a scalar and is fallible.

use super::{result_clock, result_size, ComplexSignal, RealSignal, Signal, SignalFrame, SignalView};
use crate::error::{DspError, Result};
use crate::types::{Combine, Complex64, Sample};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Element-wise combination over the common length of two views
pub(crate) fn zip_map<L, R, O>(lhs: &L, rhs: &R, f: impl Fn(L::Sample, R::Sample) -> O) -> Signal<O>
where
    L: SignalView + ?Sized,
    R: SignalView + ?Sized,
    O: Sample,
{
    let size = result_size(lhs.len(), rhs.len());
    let samples = lhs.samples()[..size]
        .iter()
        .zip(&rhs.samples()[..size])
        .map(|(&a, &b)| f(a, b))
        .collect();
    Signal::from_parts(samples, result_clock(lhs.clock(), rhs.clock()))
}

/// In-place element-wise combination; `lhs` is truncated to the common length
fn zip_assign<T, R>(lhs: &mut Signal<T>, rhs: &R, f: impl Fn(T, R::Sample) -> T)
where
    T: Sample,
    R: SignalView + ?Sized,
{
    let size = result_size(lhs.samples.len(), rhs.len());
    lhs.clock = result_clock(lhs.clock, rhs.clock());
    lhs.samples.truncate(size);
    for (a, &b) in lhs.samples.iter_mut().zip(rhs.samples()) {
        *a = f(*a, b);
    }
}

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T, R> $trait<&R> for &Signal<T>
        where
            T: Combine<R::Sample>,
            R: SignalView,
        {
            type Output = Signal<<T as Combine<R::Sample>>::Promoted>;

            fn $method(self, rhs: &R) -> Self::Output {
                zip_map(self, rhs, |a, b| a.promote() $op T::promote_rhs(b))
            }
        }

        impl<T, R> $trait<&R> for &SignalFrame<'_, T>
        where
            T: Combine<R::Sample>,
            R: SignalView,
        {
            type Output = Signal<<T as Combine<R::Sample>>::Promoted>;

            fn $method(self, rhs: &R) -> Self::Output {
                zip_map(self, rhs, |a, b| a.promote() $op T::promote_rhs(b))
            }
        }
    };
}

binary_operator!(Add, add, +);
binary_operator!(Sub, sub, -);
binary_operator!(Mul, mul, *);

macro_rules! assign_operator {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T, R> $trait<&R> for Signal<T>
        where
            T: Combine<R::Sample, Promoted = T>,
            R: SignalView,
        {
            fn $method(&mut self, rhs: &R) {
                zip_assign(self, rhs, |a, b| a.promote() $op T::promote_rhs(b));
            }
        }
    };
}

assign_operator!(AddAssign, add_assign, +);
assign_operator!(SubAssign, sub_assign, -);
assign_operator!(MulAssign, mul_assign, *);

impl<T: Sample> Neg for &Signal<T> {
    type Output = Signal<T>;

    fn neg(self) -> Signal<T> {
        self.map(|x| -x)
    }
}

impl<T: Sample> Neg for &SignalFrame<'_, T> {
    type Output = Signal<T>;

    fn neg(self) -> Signal<T> {
        Signal::from_parts(self.as_slice().iter().map(|&x| -x).collect(), self.clock())
    }
}

impl<T: Sample> Neg for Signal<T> {
    type Output = Signal<T>;

    fn neg(mut self) -> Signal<T> {
        for x in self.samples.iter_mut() {
            *x = -*x;
        }
        self
    }
}

// ==================== Scalars ====================

impl<T: Sample> Mul<f64> for &Signal<T> {
    type Output = Signal<T>;

    fn mul(self, rhs: f64) -> Signal<T> {
        self.map(|x| x * rhs)
    }
}

impl<T: Sample> Mul<f64> for &SignalFrame<'_, T> {
    type Output = Signal<T>;

    fn mul(self, rhs: f64) -> Signal<T> {
        Signal::from_parts(self.as_slice().iter().map(|&x| x * rhs).collect(), self.clock())
    }
}

impl<T: Sample> MulAssign<f64> for Signal<T> {
    fn mul_assign(&mut self, rhs: f64) {
        for x in self.samples.iter_mut() {
            *x = *x * rhs;
        }
    }
}

impl Mul<Complex64> for &ComplexSignal {
    type Output = ComplexSignal;

    fn mul(self, rhs: Complex64) -> ComplexSignal {
        self.map(|x| x * rhs)
    }
}

impl Mul<Complex64> for &RealSignal {
    type Output = ComplexSignal;

    fn mul(self, rhs: Complex64) -> ComplexSignal {
        self.map(|x| rhs * x)
    }
}

impl MulAssign<Complex64> for ComplexSignal {
    fn mul_assign(&mut self, rhs: Complex64) {
        for x in self.samples.iter_mut() {
            *x *= rhs;
        }
    }
}

impl<T: Sample> Signal<T> {
    /// Divide every sample by a scalar.
    ///
    /// Fails with [`DspError::DivisionByZero`] when `divisor` is zero.
    pub fn try_div(&self, divisor: T) -> Result<Signal<T>> {
        if divisor.is_zero() {
            return Err(DspError::DivisionByZero);
        }
        Ok(self.map(|x| x / divisor))
    }

    /// In-place scalar division; size and clock are untouched
    pub fn try_div_assign(&mut self, divisor: T) -> Result<()> {
        if divisor.is_zero() {
            return Err(DspError::DivisionByZero);
        }
        for x in self.samples.iter_mut() {
            *x = *x / divisor;
        }
        Ok(())
    }
}
