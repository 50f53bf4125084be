//! Signal analysis
//!
//! - [`fft`] - radix-2 FFT engine
//! - [`windows`] - window functions
//! - [`convolution`] - convolution, correlation, FIR filtering and the direct DFT
//! - [`multirate`] - CIC filter and decimation
//! - [`pulse_compression`] - time- and frequency-domain pulse compression

pub mod convolution;
pub mod fft;
pub mod multirate;
pub mod pulse_compression;
pub mod windows;

pub use convolution::{auto_correlation, convolution, cross_correlation, dft, fir_filter};
pub use fft::{fft, FftEngine, MAX_FFT_POWER};
pub use multirate::{cic_filter, decimate};
pub use pulse_compression::{FrequencyDomainCompressor, PulseCompressor, TimeDomainCompressor};
pub use windows::WindowFunction;
