//! Core data types for sigkit-rs
//!
//! This module contains the scalar vocabulary shared by every other module:
//! - [`Frequency`] - Hz quantity used as sample-rate ("clock") metadata
//! - [`Sample`] - element types a signal container can hold (real/complex)
//! - [`Combine`] - promotion rules for mixed real/complex operands
//! - dB and dBm conversion helpers

use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Complex sample type used throughout the crate
pub type Complex64 = Complex<f64>;

/// Nominal load resistance used by dBm conversions (ohms)
pub const DEFAULT_LOAD_RESISTANCE: f64 = 50.0;

/// Convert a dB value to a linear voltage factor
pub fn db_to_factor(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Convert a linear voltage factor to dB
pub fn factor_to_db(factor: f64) -> f64 {
    20.0 * factor.log10()
}

/// Convert a power level in dBm over `resistance` ohms to volts
pub fn dbm_to_volts(dbm: f64, resistance: f64) -> f64 {
    (10f64.powf((dbm - 30.0) / 10.0) * resistance).sqrt()
}

/// Convert volts over `resistance` ohms to a power level in dBm
pub fn volts_to_dbm(volts: f64, resistance: f64) -> f64 {
    10.0 * (volts * volts / resistance).log10() + 30.0
}

// ==================== Frequency ====================

/// A frequency in Hz.
///
/// Value 0 ([`Frequency::NONE`]) means "unset". Arithmetic stays within the
/// type except the ratio of two frequencies, which is a plain number.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frequency(f64);

/// The "no clock" frequency
pub const NO_FREQUENCY: Frequency = Frequency::NONE;

impl Frequency {
    /// Unset frequency
    pub const NONE: Frequency = Frequency(0.0);

    pub const fn hz(value: f64) -> Self {
        Self(value)
    }

    pub fn khz(value: f64) -> Self {
        Self(value * 1e3)
    }

    pub fn mhz(value: f64) -> Self {
        Self(value * 1e6)
    }

    pub fn ghz(value: f64) -> Self {
        Self(value * 1e9)
    }

    /// Value in Hz
    pub const fn value(&self) -> f64 {
        self.0
    }

    pub const fn as_hz(&self) -> f64 {
        self.0
    }

    pub fn as_khz(&self) -> f64 {
        self.0 / 1e3
    }

    pub fn as_mhz(&self) -> f64 {
        self.0 / 1e6
    }

    pub fn as_ghz(&self) -> f64 {
        self.0 / 1e9
    }

    /// Whether the frequency is strictly positive (i.e. a usable clock)
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Reset to [`Frequency::NONE`]
    pub fn clear(&mut self) {
        self.0 = 0.0;
    }

    /// Total order on the underlying value
    pub fn total_cmp(&self, other: &Frequency) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.0)
    }
}

impl Neg for Frequency {
    type Output = Frequency;

    fn neg(self) -> Frequency {
        Frequency(-self.0)
    }
}

impl Add for Frequency {
    type Output = Frequency;

    fn add(self, rhs: Frequency) -> Frequency {
        Frequency(self.0 + rhs.0)
    }
}

impl Sub for Frequency {
    type Output = Frequency;

    fn sub(self, rhs: Frequency) -> Frequency {
        Frequency(self.0 - rhs.0)
    }
}

impl Mul<f64> for Frequency {
    type Output = Frequency;

    fn mul(self, rhs: f64) -> Frequency {
        Frequency(self.0 * rhs)
    }
}

impl Mul<Frequency> for f64 {
    type Output = Frequency;

    fn mul(self, rhs: Frequency) -> Frequency {
        Frequency(self * rhs.0)
    }
}

impl Div<f64> for Frequency {
    type Output = Frequency;

    fn div(self, rhs: f64) -> Frequency {
        Frequency(self.0 / rhs)
    }
}

/// Ratio of two frequencies (e.g. a normalized frequency `f / clock`)
impl Div for Frequency {
    type Output = f64;

    fn div(self, rhs: Frequency) -> f64 {
        self.0 / rhs.0
    }
}

// ==================== Samples ====================

/// Element type of a signal container: `f64` (real) or [`Complex64`].
pub trait Sample:
    Copy
    + Default
    + PartialEq
    + fmt::Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + Sum
{
    /// Whether samples carry an imaginary part
    const IS_COMPLEX: bool;

    fn from_real(value: f64) -> Self;

    /// Build a sample from its parts; real samples drop `im`
    fn from_parts(re: f64, im: f64) -> Self;

    fn to_complex(self) -> Complex64;

    fn re(self) -> f64;

    fn im(self) -> f64;

    /// Magnitude (absolute value)
    fn norm(self) -> f64;

    /// Complex conjugate (identity for real samples)
    fn conj(self) -> Self;

    fn is_zero(self) -> bool {
        self == Self::default()
    }
}

impl Sample for f64 {
    const IS_COMPLEX: bool = false;

    fn from_real(value: f64) -> Self {
        value
    }

    fn from_parts(re: f64, _im: f64) -> Self {
        re
    }

    fn to_complex(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }

    fn re(self) -> f64 {
        self
    }

    fn im(self) -> f64 {
        0.0
    }

    fn norm(self) -> f64 {
        self.abs()
    }

    fn conj(self) -> Self {
        self
    }
}

impl Sample for Complex64 {
    const IS_COMPLEX: bool = true;

    fn from_real(value: f64) -> Self {
        Complex64::new(value, 0.0)
    }

    fn from_parts(re: f64, im: f64) -> Self {
        Complex64::new(re, im)
    }

    fn to_complex(self) -> Complex64 {
        self
    }

    fn re(self) -> f64 {
        self.re
    }

    fn im(self) -> f64 {
        self.im
    }

    fn norm(self) -> f64 {
        Complex::norm(self)
    }

    fn conj(self) -> Self {
        Complex::conj(&self)
    }
}

/// Promotion rule for a pair of operand sample types.
///
/// Real with real stays real; any complex operand makes the result complex.
pub trait Combine<Rhs: Sample>: Sample {
    type Promoted: Sample;

    fn promote(self) -> Self::Promoted;

    fn promote_rhs(rhs: Rhs) -> Self::Promoted;

    /// `self * rhs`
    fn mul_promoted(self, rhs: Rhs) -> Self::Promoted {
        self.promote() * Self::promote_rhs(rhs)
    }

    /// `self * conj(rhs)`
    fn mul_conj(self, rhs: Rhs) -> Self::Promoted {
        self.promote() * Self::promote_rhs(rhs).conj()
    }
}

impl Combine<f64> for f64 {
    type Promoted = f64;

    fn promote(self) -> f64 {
        self
    }

    fn promote_rhs(rhs: f64) -> f64 {
        rhs
    }
}

impl Combine<Complex64> for f64 {
    type Promoted = Complex64;

    fn promote(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }

    fn promote_rhs(rhs: Complex64) -> Complex64 {
        rhs
    }
}

impl Combine<f64> for Complex64 {
    type Promoted = Complex64;

    fn promote(self) -> Complex64 {
        self
    }

    fn promote_rhs(rhs: f64) -> Complex64 {
        Complex64::new(rhs, 0.0)
    }
}

impl Combine<Complex64> for Complex64 {
    type Promoted = Complex64;

    fn promote(self) -> Complex64 {
        self
    }

    fn promote_rhs(rhs: Complex64) -> Complex64 {
        rhs
    }
}

/// Render a complex value the compact way: `"0"`, `"3"`, `"2i"`, `"-i"`, `"1.5-2i"`.
pub fn complex_to_string(value: Complex64) -> String {
    if value == Complex64::default() {
        return "0".to_string();
    }
    let mut result = String::new();
    if value.re != 0.0 {
        result.push_str(&value.re.to_string());
    }
    if value.im != 0.0 {
        if value.im > 0.0 {
            if value.re != 0.0 {
                result.push('+');
            }
        } else {
            result.push('-');
        }
        if value.im.abs() != 1.0 {
            result.push_str(&value.im.abs().to_string());
        }
        result.push('i');
    }
    result
}
