//! Toolkit configuration
//!
//! Defaults that callers and the `sigkit-inspect` binary pick up: FFT size,
//! window function, waveform storage type and logging filter. Persisted as
//! TOML.
//!
//! # Config Location
//!
//! - **Linux**: `~/.config/sigkit-rs/config.toml`
//! - **macOS**: `~/Library/Application Support/sigkit-rs/config.toml`
//! - **Windows**: `%APPDATA%\sigkit-rs\config.toml`
//!
//! # Example
//!
//! ```ignore
//! use sigkit_rs::config::DspConfig;
//!
//! let config = DspConfig::load_or_default(DspConfig::default_path().unwrap());
//! let mut engine = config.fft_engine()?;
//! let window = config.window(engine.size());
//! ```

use crate::analysis::fft::{FftEngine, MAX_FFT_POWER};
use crate::analysis::windows::WindowFunction;
use crate::error::{DspError, Result};
use crate::signal::RealSignal;
use crate::types::DEFAULT_LOAD_RESISTANCE;
use crate::waveform::DataType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for the config directory
pub const APP_ID: &str = "sigkit-rs";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Default FFT power (1024 points)
pub const DEFAULT_FFT_POWER: u32 = 10;

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "info,sigkit_rs=debug";

/// FFT engine defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FftSettings {
    /// Transform size as a power of two; 0 disables the engine
    pub power: u32,
    /// Compute the inverse transform
    pub inverted: bool,
}

impl Default for FftSettings {
    fn default() -> Self {
        Self {
            power: DEFAULT_FFT_POWER,
            inverted: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub function: WindowFunction,
}

/// Waveform file defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformSettings {
    /// Element type used when saving generic waveform files
    pub data_type: DataType,
    /// Load resistance in ohms for `.wvh` reference levels
    pub load_resistance: f64,
    /// Comment attached to newly saved waveforms
    pub comment: String,
}

impl Default for WaveformSettings {
    fn default() -> Self {
        Self {
            data_type: DataType::Float64,
            load_resistance: DEFAULT_LOAD_RESISTANCE,
            comment: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Complete toolkit configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DspConfig {
    pub fft: FftSettings,
    pub window: WindowSettings,
    pub waveform: WaveformSettings,
    pub logging: LoggingSettings,
}

impl DspConfig {
    /// Platform config file path, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DspError::Config(format!("Failed to read config {:?}: {}", path, e)))?;

        let config: DspConfig = toml::from_str(&content)
            .map_err(|e| DspError::Config(format!("Failed to parse config {:?}: {}", path, e)))?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load a config file, returning defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save as TOML, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DspError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| DspError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| DspError::Config(format!("Failed to write config {:?}: {}", path, e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.fft.power > MAX_FFT_POWER {
            return Err(DspError::Config(format!(
                "FFT power {} exceeds the maximum of {}",
                self.fft.power, MAX_FFT_POWER
            )));
        }
        let resistance = self.waveform.load_resistance;
        if !(resistance.is_finite() && resistance > 0.0) {
            return Err(DspError::Config(format!(
                "load resistance must be positive, got {}",
                resistance
            )));
        }
        Ok(())
    }

    /// FFT engine with the configured size and direction
    pub fn fft_engine(&self) -> Result<FftEngine> {
        FftEngine::from_config(&self.fft)
    }

    /// Configured window function with `size` coefficients
    pub fn window(&self, size: usize) -> RealSignal {
        self.window.function.generate(size)
    }
}
