//! Persisted waveforms
//!
//! A [`Waveform`] is a signal plus a comment and a timestamp. It is stored in
//! the crate's own binary format (see [`codec`]), exported as CSV or plain
//! text (see [`export`]), or exchanged with measurement instruments through
//! the [`vendor`] dialects.
//!
//! Every file operation has a `_with_progress` form taking a callback that
//! receives a percentage (0..=100) about every 1% of the transfer.

pub mod codec;
mod export;
mod file_info;
pub mod vendor;

pub use file_info::{DataType, WaveformFileInfo};

use crate::error::{DspError, Result};
use crate::signal::measure::peak;
use crate::signal::{Signal, SignalView};
use crate::types::{db_to_factor, Complex64, Frequency, Sample};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::ops::{Deref, DerefMut};
use std::path::Path;

pub type RealWaveform = Waveform<f64>;
pub type ComplexWaveform = Waveform<Complex64>;

pub(crate) fn check_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(DspError::invalid_argument("empty file name"));
    }
    Ok(())
}

pub(crate) fn open_reader(path: &Path) -> Result<BufReader<File>> {
    check_path(path)?;
    let file = File::open(path).map_err(|e| DspError::from_open_error(e, path, false))?;
    Ok(BufReader::new(file))
}

pub(crate) fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    check_path(path)?;
    let file = File::create(path).map_err(|e| DspError::from_open_error(e, path, true))?;
    Ok(BufWriter::new(file))
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
    check_path(path)?;
    std::fs::read(path).map_err(|e| DspError::from_open_error(e, path, false))
}

/// A signal with a comment and a timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform<T> {
    signal: Signal<T>,
    comment: String,
    date_time: DateTime<Utc>,
}

impl<T: Sample> Default for Waveform<T> {
    fn default() -> Self {
        Self::new(Signal::new())
    }
}

impl<T: Sample> Waveform<T> {
    /// Wrap `signal` with an empty comment and the current time
    pub fn new(signal: Signal<T>) -> Self {
        Self::with_metadata(signal, String::new(), Utc::now())
    }

    pub fn with_comment(signal: Signal<T>, comment: impl Into<String>) -> Self {
        Self::with_metadata(signal, comment, Utc::now())
    }

    pub fn with_metadata(signal: Signal<T>, comment: impl Into<String>, date_time: DateTime<Utc>) -> Self {
        Self {
            signal,
            comment: comment.into(),
            date_time,
        }
    }

    pub fn signal(&self) -> &Signal<T> {
        &self.signal
    }

    pub fn signal_mut(&mut self) -> &mut Signal<T> {
        &mut self.signal
    }

    pub fn into_signal(self) -> Signal<T> {
        self.signal
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn date_time(&self) -> DateTime<Utc> {
        self.date_time
    }

    pub fn set_date_time(&mut self, date_time: DateTime<Utc>) {
        self.date_time = date_time;
    }

    /// Header describing this waveform stored as `data_type`
    pub fn file_info(&self, data_type: DataType) -> WaveformFileInfo {
        WaveformFileInfo {
            clock: self.signal.clock(),
            data_type,
            signal_size: self.signal.len() as u64,
            is_complex: T::IS_COMPLEX,
            ref_level: codec::ref_level(peak(&self.signal), data_type),
            comment: self.comment.clone(),
            date_time: self.date_time,
        }
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>, data_type: DataType) -> Result<()> {
        self.save_to_file_with_progress(path, data_type, |_| {})
    }

    pub fn save_to_file_with_progress<F: FnMut(u8)>(
        &self,
        path: impl AsRef<Path>,
        data_type: DataType,
        progress: F,
    ) -> Result<()> {
        let path = path.as_ref();
        let mut writer = create_writer(path)?;
        let info = self.file_info(data_type);
        codec::write_header(&mut writer, &info)?;
        codec::write_samples(
            &mut writer,
            self.signal.as_slice(),
            data_type,
            db_to_factor(info.ref_level as f64),
            progress,
        )?;
        writer.flush()?;
        tracing::debug!(
            "Saved {} samples as {} to {:?}",
            self.signal.len(),
            data_type,
            path
        );
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with_progress(path, |_| {})
    }

    /// Decode a waveform file.
    ///
    /// Complex files cannot be loaded into real waveforms; real files load
    /// into complex waveforms with a zero imaginary part.
    pub fn from_file_with_progress<F: FnMut(u8)>(path: impl AsRef<Path>, progress: F) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = open_reader(path)?;
        let info = codec::read_header(&mut reader)?;
        if info.is_complex && !T::IS_COMPLEX {
            return Err(DspError::invalid_format(
                "complex waveform cannot be loaded as a real signal",
            ));
        }
        let count = usize::try_from(info.signal_size)
            .map_err(|_| DspError::invalid_format("sample count exceeds address space"))?;
        let samples = codec::read_samples(
            &mut reader,
            count,
            info.is_complex,
            info.data_type,
            1.0 / db_to_factor(info.ref_level as f64),
            progress,
        )?;
        let signal = Signal::with_clock(samples, info.clock)?;
        Ok(Self::with_metadata(signal, info.comment, info.date_time))
    }

    /// Read only the header of a waveform file
    pub fn analyse(path: impl AsRef<Path>) -> Result<WaveformFileInfo> {
        WaveformFileInfo::analyse(path)
    }
}

impl ComplexWaveform {
    /// Clock of the wrapped signal, required by instrument formats
    pub(crate) fn require_clock(&self) -> Result<Frequency> {
        if self.signal.has_clock() {
            Ok(self.signal.clock())
        } else {
            Err(DspError::invalid_argument("waveform has no clock"))
        }
    }
}

impl<T: Sample> From<Signal<T>> for Waveform<T> {
    fn from(signal: Signal<T>) -> Self {
        Self::new(signal)
    }
}

impl<T> Deref for Waveform<T> {
    type Target = Signal<T>;

    fn deref(&self) -> &Signal<T> {
        &self.signal
    }
}

impl<T> DerefMut for Waveform<T> {
    fn deref_mut(&mut self) -> &mut Signal<T> {
        &mut self.signal
    }
}

impl<T: Sample> SignalView for Waveform<T> {
    type Sample = T;

    fn samples(&self) -> &[T] {
        self.signal.as_slice()
    }

    fn clock(&self) -> Frequency {
        self.signal.clock()
    }
}
