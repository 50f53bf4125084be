//! # sigkit-rs: sampled signal toolkit
//!
//! Containers and algorithms for uniformly sampled real and complex signals,
//! plus waveform file codecs.
//!
//! ## Layout
//!
//! - **signal**: [`Signal`] container with its sample clock, [`SignalFrame`]
//!   sliding views, arithmetic, generators, measurements and modulation
//! - **analysis**: window functions, FFT engine, convolution/correlation/DFT,
//!   CIC filter and decimation, pulse compression
//! - **waveform**: the binary waveform format, CSV/text export and three
//!   instrument dialects (`.wv`, `.wvh` + `.wvd`, `.iq.tar`)
//! - **config**: TOML defaults for the above
//!
//! ## Example
//!
//! ```ignore
//! use sigkit_rs::{analysis::FftEngine, signal::generators, Frequency, ComplexWaveform, DataType};
//!
//! let tone = generators::harmonic_clocked(1024, Frequency::mhz(1.0), Frequency::khz(125.0), 1.0, 0.0)?;
//! let mut engine = FftEngine::new(10)?;
//! let spectrum = engine.compute(&tone);
//!
//! ComplexWaveform::with_comment(tone, "125 kHz tone").save_to_file("tone.wf", DataType::Int16)?;
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod signal;
pub mod types;
pub mod waveform;

// Re-export commonly used types
pub use config::DspConfig;
pub use error::{DspError, Result, ResultExt};
pub use signal::{ComplexSignal, RealSignal, Signal, SignalFrame, SignalView};
pub use types::{Complex64, Frequency, Sample};
pub use waveform::{ComplexWaveform, DataType, RealWaveform, Waveform, WaveformFileInfo};
