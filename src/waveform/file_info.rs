//! Waveform file descriptor and element data types

use crate::error::{DspError, Result};
use crate::types::Frequency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Element type of stored samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    #[default]
    Float64,
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
        }
    }

    pub fn all() -> &'static [DataType] {
        &[
            DataType::Int8,
            DataType::Int16,
            DataType::Int32,
            DataType::Int64,
            DataType::Float32,
            DataType::Float64,
        ]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.name() == name)
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, DataType::Float32 | DataType::Float64)
    }

    /// Size of one real component in bytes
    pub fn width(&self) -> usize {
        match self {
            DataType::Int8 => 1,
            DataType::Int16 => 2,
            DataType::Int32 | DataType::Float32 => 4,
            DataType::Int64 | DataType::Float64 => 8,
        }
    }

    /// Largest representable magnitude for integer types, 1 for floats
    pub fn full_scale(&self) -> f64 {
        match self {
            DataType::Int8 => i8::MAX as f64,
            DataType::Int16 => i16::MAX as f64,
            DataType::Int32 => i32::MAX as f64,
            DataType::Int64 => i64::MAX as f64,
            DataType::Float32 | DataType::Float64 => 1.0,
        }
    }

    /// Two-bit width code of the header type byte
    pub(crate) fn size_code(&self) -> u8 {
        match self {
            DataType::Int8 => 0x00,
            DataType::Int16 => 0x01,
            DataType::Int32 | DataType::Float32 => 0x02,
            DataType::Int64 | DataType::Float64 => 0x03,
        }
    }

    pub(crate) fn from_code(code: u8, integer: bool) -> Result<Self> {
        match (integer, code) {
            (true, 0x00) => Ok(DataType::Int8),
            (true, 0x01) => Ok(DataType::Int16),
            (true, 0x02) => Ok(DataType::Int32),
            (true, 0x03) => Ok(DataType::Int64),
            (false, 0x02) => Ok(DataType::Float32),
            (false, 0x03) => Ok(DataType::Float64),
            _ => Err(DspError::invalid_format(format!(
                "unsupported {} width code {:#04x}",
                if integer { "integer" } else { "float" },
                code
            ))),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a waveform file header declares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformFileInfo {
    pub clock: Frequency,
    pub data_type: DataType,
    /// Number of (real or complex) samples
    pub signal_size: u64,
    pub is_complex: bool,
    /// Peak-to-full-scale ratio in dB, integer types only
    pub ref_level: i16,
    pub comment: String,
    pub date_time: DateTime<Utc>,
}

impl Default for WaveformFileInfo {
    fn default() -> Self {
        Self {
            clock: Frequency::NONE,
            data_type: DataType::default(),
            signal_size: 0,
            is_complex: true,
            ref_level: 0,
            comment: String::new(),
            date_time: Utc::now(),
        }
    }
}

impl WaveformFileInfo {
    pub fn is_integer(&self) -> bool {
        self.data_type.is_integer()
    }

    /// Bytes of sample data following the header
    pub fn data_size(&self) -> u64 {
        let components = if self.is_complex { 2 } else { 1 };
        self.signal_size * components * self.data_type.width() as u64
    }

    /// Read only the header of the waveform file at `path`
    pub fn analyse(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = super::open_reader(path)?;
        super::codec::read_header(&mut reader)
    }
}
