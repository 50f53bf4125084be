//! Error handling for sigkit-rs
//!
//! This module defines the crate error type and a Result alias used by
//! every signal, transform and codec operation.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for sigkit-rs operations
#[derive(Error, Debug)]
pub enum DspError {
    /// A caller-supplied argument is out of its domain (negative clock,
    /// empty file name, FFT power out of range, zero decimation factor...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Division of a signal by a zero scalar
    #[error("Division by zero")]
    DivisionByZero,

    /// The byte stream does not follow the expected file layout
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    /// The file to read does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file exists but cannot be opened for reading
    #[error("File is not readable: {}", .0.display())]
    NotReadable(PathBuf),

    /// The file cannot be created or opened for writing
    #[error("File is not writable: {}", .0.display())]
    NotWritable(PathBuf),

    /// Short read/write or any other I/O failure during a transfer
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DspError>,
    },
}

impl DspError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DspError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for [`DspError::InvalidArgument`]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        DspError::InvalidArgument(message.into())
    }

    /// Shorthand for [`DspError::InvalidFileFormat`]
    pub fn invalid_format(message: impl Into<String>) -> Self {
        DspError::InvalidFileFormat(message.into())
    }

    /// Classify a failure to open `path`.
    ///
    /// Missing files become [`DspError::FileNotFound`], anything else becomes
    /// [`DspError::NotWritable`] or [`DspError::NotReadable`] depending on
    /// the direction of the transfer.
    pub fn from_open_error(err: io::Error, path: &Path, write: bool) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound if !write => DspError::FileNotFound(path.to_path_buf()),
            _ if write => DspError::NotWritable(path.to_path_buf()),
            _ => DspError::NotReadable(path.to_path_buf()),
        }
    }

    /// The innermost error, skipping any context layers
    pub fn root_cause(&self) -> &DspError {
        match self {
            DspError::WithContext { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for sigkit-rs operations
pub type Result<T> = std::result::Result<T, DspError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DspError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| DspError::Io(e).with_context(f()))
    }
}
