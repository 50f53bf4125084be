//! Window functions for spectral analysis
//!
//! Every window except Rectangle and Chebyshev is evaluated on a centred
//! axis `x ∈ [-0.5, 0.5]` with step `1/(size-1)`. Only the first
//! `ceil(size/2)` samples are computed; the rest are mirrored, so the result
//! is exactly symmetric: `w[i] == w[size-1-i]`.
//!
//! Chebyshev is the exception. It comes out of an inverse DFT and is
//! circularly symmetric instead, `w[i] == w[size-i]` for `i` in `1..size`,
//! with `w[0]` standing on its own.
//!
//! ## Window Selection Guide
//!
//! | Window          | Shape parameter | Notes                              |
//! |-----------------|-----------------|------------------------------------|
//! | Rectangle       | -               | No tapering                        |
//! | Hann / Hamming  | Hamming: α      | General purpose                    |
//! | Blackman(-Harris), Nuttall | -    | Low side lobes                     |
//! | Flat top        | -               | Accurate amplitude measurement     |
//! | Kaiser          | α (β = πα)      | Adjustable lobe trade-off          |
//! | Chebyshev       | α (side lobes at -20α dB) | Inverse DFT, circular symmetry |

use super::convolution::dft;
use crate::signal::RealSignal;
use crate::types::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const DEFAULT_CHEBYSHEV_ALPHA: f64 = 4.0;
pub const DEFAULT_GAUSSIAN_ALPHA: f64 = 3.0;
pub const DEFAULT_HAMMING_ALPHA: f64 = 0.53856;
pub const DEFAULT_KAISER_ALPHA: f64 = 3.0;
pub const DEFAULT_TUKEY_ALPHA: f64 = 0.5;

/// Window function selector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum WindowFunction {
    BartlettHann,
    Blackman,
    BlackmanHarris,
    Bohman,
    Chebyshev { alpha: f64 },
    FlatTop,
    Gaussian { alpha: f64 },
    Hamming { alpha: f64 },
    #[default]
    Hann,
    Kaiser { alpha: f64 },
    Nuttall,
    Parzen,
    Triangular,
    Tukey { alpha: f64 },
    /// No windowing
    Rectangle,
}

impl WindowFunction {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            WindowFunction::BartlettHann => "Bartlett-Hann",
            WindowFunction::Blackman => "Blackman",
            WindowFunction::BlackmanHarris => "Blackman-Harris",
            WindowFunction::Bohman => "Bohman",
            WindowFunction::Chebyshev { .. } => "Chebyshev",
            WindowFunction::FlatTop => "Flat top",
            WindowFunction::Gaussian { .. } => "Gaussian",
            WindowFunction::Hamming { .. } => "Hamming",
            WindowFunction::Hann => "Hann",
            WindowFunction::Kaiser { .. } => "Kaiser",
            WindowFunction::Nuttall => "Nuttall",
            WindowFunction::Parzen => "Parzen",
            WindowFunction::Triangular => "Triangular",
            WindowFunction::Tukey { .. } => "Tukey",
            WindowFunction::Rectangle => "Rectangle",
        }
    }

    /// All window functions, parametric ones with their default shape
    pub fn all() -> &'static [WindowFunction] {
        &[
            WindowFunction::BartlettHann,
            WindowFunction::Blackman,
            WindowFunction::BlackmanHarris,
            WindowFunction::Bohman,
            WindowFunction::Chebyshev {
                alpha: DEFAULT_CHEBYSHEV_ALPHA,
            },
            WindowFunction::FlatTop,
            WindowFunction::Gaussian {
                alpha: DEFAULT_GAUSSIAN_ALPHA,
            },
            WindowFunction::Hamming {
                alpha: DEFAULT_HAMMING_ALPHA,
            },
            WindowFunction::Hann,
            WindowFunction::Kaiser {
                alpha: DEFAULT_KAISER_ALPHA,
            },
            WindowFunction::Nuttall,
            WindowFunction::Parzen,
            WindowFunction::Triangular,
            WindowFunction::Tukey {
                alpha: DEFAULT_TUKEY_ALPHA,
            },
            WindowFunction::Rectangle,
        ]
    }

    /// Look a window up by its display name (parametric ones get their default shape)
    pub fn from_name(name: &str) -> Option<WindowFunction> {
        Self::all().iter().copied().find(|w| w.name() == name)
    }

    /// Shape parameter of parametric windows
    pub fn alpha(&self) -> Option<f64> {
        match *self {
            WindowFunction::Chebyshev { alpha }
            | WindowFunction::Gaussian { alpha }
            | WindowFunction::Hamming { alpha }
            | WindowFunction::Kaiser { alpha }
            | WindowFunction::Tukey { alpha } => Some(alpha),
            _ => None,
        }
    }

    pub fn is_parametric(&self) -> bool {
        self.alpha().is_some()
    }

    /// Same window with another shape parameter; non-parametric windows are unchanged
    pub fn with_alpha(self, alpha: f64) -> WindowFunction {
        match self {
            WindowFunction::Chebyshev { .. } => WindowFunction::Chebyshev { alpha },
            WindowFunction::Gaussian { .. } => WindowFunction::Gaussian { alpha },
            WindowFunction::Hamming { .. } => WindowFunction::Hamming { alpha },
            WindowFunction::Kaiser { .. } => WindowFunction::Kaiser { alpha },
            WindowFunction::Tukey { .. } => WindowFunction::Tukey { alpha },
            other => other,
        }
    }

    /// Generate `size` window coefficients
    pub fn generate(&self, size: usize) -> RealSignal {
        match *self {
            WindowFunction::BartlettHann => bartlett_hann(size),
            WindowFunction::Blackman => blackman(size),
            WindowFunction::BlackmanHarris => blackman_harris(size),
            WindowFunction::Bohman => bohman(size),
            WindowFunction::Chebyshev { alpha } => chebyshev(size, alpha),
            WindowFunction::FlatTop => flat_top(size),
            WindowFunction::Gaussian { alpha } => gaussian(size, alpha),
            WindowFunction::Hamming { alpha } => hamming(size, alpha),
            WindowFunction::Hann => hann(size),
            WindowFunction::Kaiser { alpha } => kaiser(size, alpha),
            WindowFunction::Nuttall => nuttall(size),
            WindowFunction::Parzen => parzen(size),
            WindowFunction::Triangular => triangular(size),
            WindowFunction::Tukey { alpha } => tukey(size, alpha),
            WindowFunction::Rectangle => rectangle(size),
        }
    }
}

/// Evaluate `f` on the first half of the centred axis and mirror it
fn symmetric(size: usize, f: impl Fn(f64) -> f64) -> RealSignal {
    match size {
        0 => RealSignal::new(),
        1 => RealSignal::from_vec(vec![f(0.0)]),
        _ => {
            let step = 1.0 / (size - 1) as f64;
            let half = size.div_ceil(2);
            let mut samples = vec![0.0; size];
            for (i, value) in samples.iter_mut().take(half).enumerate() {
                *value = f(-0.5 + step * i as f64);
            }
            for i in half..size {
                samples[i] = samples[size - 1 - i];
            }
            RealSignal::from_vec(samples)
        }
    }
}

/// Cosine sum `Σ a[k] cos(2πkx)` on the centred axis
fn cosine_sum(size: usize, coefficients: &[f64]) -> RealSignal {
    symmetric(size, |x| {
        coefficients
            .iter()
            .enumerate()
            .map(|(k, a)| a * (2.0 * PI * k as f64 * x).cos())
            .sum()
    })
}

pub fn rectangle(size: usize) -> RealSignal {
    RealSignal::filled(size, 1.0)
}

pub fn triangular(size: usize) -> RealSignal {
    symmetric(size, |x| 1.0 + 2.0 * x)
}

pub fn hann(size: usize) -> RealSignal {
    symmetric(size, |x| (1.0 + (2.0 * PI * x).cos()) / 2.0)
}

pub fn hamming(size: usize, alpha: f64) -> RealSignal {
    symmetric(size, |x| alpha + (1.0 - alpha) * (2.0 * PI * x).cos())
}

/// Exact Blackman window (7938, 9240, 1430 over 18608)
pub fn blackman(size: usize) -> RealSignal {
    const DENOMINATOR: f64 = 18608.0;
    cosine_sum(
        size,
        &[7938.0 / DENOMINATOR, 9240.0 / DENOMINATOR, 1430.0 / DENOMINATOR],
    )
}

pub fn blackman_harris(size: usize) -> RealSignal {
    cosine_sum(size, &[0.35875, 0.48829, 0.14128, 0.01168])
}

pub fn nuttall(size: usize) -> RealSignal {
    cosine_sum(size, &[0.355768, 0.487396, 0.144232, 0.012604])
}

/// Flat top window, coefficients normalized to a unit peak
pub fn flat_top(size: usize) -> RealSignal {
    const RAW: [f64; 5] = [1.0, 1.932, 1.29, 0.388, 0.03];
    let total: f64 = RAW.iter().sum();
    let normalized: Vec<f64> = RAW.iter().map(|a| a / total).collect();
    cosine_sum(size, &normalized)
}

pub fn bartlett_hann(size: usize) -> RealSignal {
    symmetric(size, |x| 0.62 + 0.48 * x + 0.38 * (2.0 * PI * x).cos())
}

pub fn bohman(size: usize) -> RealSignal {
    symmetric(size, |x| {
        (1.0 - 2.0 * x.abs()) * (2.0 * PI * x).cos() + (2.0 * PI * x.abs()).sin() / PI
    })
}

pub fn gaussian(size: usize, alpha: f64) -> RealSignal {
    symmetric(size, |x| (-(2.0 * alpha * x).powi(2) / 2.0).exp())
}

pub fn kaiser(size: usize, alpha: f64) -> RealSignal {
    let denominator = bessel_i0(PI * alpha);
    symmetric(size, |x| {
        let arg = (1.0 - 4.0 * x * x).max(0.0).sqrt();
        bessel_i0(PI * alpha * arg) / denominator
    })
}

pub fn parzen(size: usize) -> RealSignal {
    symmetric(size, |x| {
        let ax = x.abs();
        if ax <= 0.25 {
            1.0 - 6.0 * (4.0 * x * x) * (1.0 - 2.0 * ax)
        } else {
            2.0 * (1.0 - 2.0 * ax).powi(3)
        }
    })
}

/// Tukey window with a flat top of width `alpha` (clamped into `(0, 1]`)
pub fn tukey(size: usize, alpha: f64) -> RealSignal {
    let alpha = alpha.clamp(f64::EPSILON, 1.0);
    symmetric(size, |x| {
        if x.abs() <= alpha / 2.0 {
            1.0
        } else {
            0.5 * (1.0 + (2.0 * PI / alpha * (x - alpha / 2.0)).cos())
        }
    })
}

/// Dolph-Chebyshev window with side lobes at `-20·alpha` dB.
///
/// Built as the inverse DFT of the Chebyshev polynomial spectrum, then
/// normalized by the largest sample from index 1 onward (sample 0 is left out
/// of the search).
pub fn chebyshev(size: usize, alpha: f64) -> RealSignal {
    if size < 2 {
        return rectangle(size);
    }
    let n = size as f64;
    let h = 10f64.powf(-alpha);
    let beta = ((1.0 / h).acosh() / n).cosh();
    let denominator = (n * beta.acosh()).cosh();

    let spectrum: crate::signal::ComplexSignal = (0..size)
        .map(|i| {
            let y = Complex64::new(beta * (PI * i as f64 / n).cos(), 0.0).acos();
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            (y * n).cos() * (sign / denominator)
        })
        .collect();

    let mut result = dft(&spectrum, size, true).i();
    let max = result[2..].iter().copied().fold(result[1], f64::max);
    if max != 0.0 {
        result *= 1.0 / max;
    }
    result
}

/// Modified Bessel function of the first kind, order 0 (power series)
fn bessel_i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..500 {
        term *= half / k as f64;
        let contribution = term * term;
        sum += contribution;
        if contribution < sum * 1e-17 {
            break;
        }
    }
    sum
}
