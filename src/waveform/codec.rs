//! Binary waveform codec
//!
//! File layout, all integers little-endian:
//!
//! | offset | size | field |
//! |--------|------|-------|
//! | 0  | 1 | format: version nibble `0x1`, header blocks nibble `0x1` |
//! | 1  | 1 | type: bit 3 complex, bit 2 integer, bits 1..0 width code |
//! | 2  | 2 | description length in 32-byte blocks (`u16`) |
//! | 4  | 2 | reference level in dB (`i16`) |
//! | 8  | 8 | sample count (`i64`) |
//! | 16 | 8 | clock in Hz (`f64`) |
//! | 24 | 8 | date/time, seconds since the epoch (`i64`) |
//!
//! The header is followed by the UTF-8 description padded with zeros to a
//! multiple of 32 bytes, then the samples (re/im interleaved for complex).
//! Integer samples are stored multiplied by `10^(ref_level/20)`.

use super::file_info::{DataType, WaveformFileInfo};
use crate::error::{DspError, Result};
use crate::types::{factor_to_db, Frequency, Sample};
use chrono::DateTime;
use std::io::{self, Read, Write};

pub const HEADER_SIZE: usize = 32;
pub const DESCRIPTION_BLOCK_SIZE: usize = 32;
/// Version 1, one header block
pub const FORMAT_BYTE: u8 = 0x11;

const COMPLEX_BIT: u8 = 3;
const INTEGER_BIT: u8 = 2;
const SIZE_CODE_MASK: u8 = 0x03;

const TYPE_OFFSET: usize = 1;
const DESCRIPTION_SIZE_OFFSET: usize = 2;
const REFERENCE_OFFSET: usize = 4;
const SIZE_OFFSET: usize = 8;
const CLOCK_OFFSET: usize = 16;
const DATE_OFFSET: usize = 24;

/// Samples converted per buffered write/read
const BLOCK_SAMPLES: usize = 1 << 20;

/// Reports progress in percent roughly every 1% of `total`
pub(crate) struct Progress<F: FnMut(u8)> {
    callback: F,
    total: usize,
    step: usize,
}

impl<F: FnMut(u8)> Progress<F> {
    pub(crate) fn new(callback: F, total: usize) -> Self {
        Self {
            callback,
            total,
            step: total / 100,
        }
    }

    pub(crate) fn tick(&mut self, n: usize) {
        if self.step != 0 && n % self.step == 0 {
            (self.callback)((n * 100 / self.total) as u8);
        }
    }

    pub(crate) fn finish(mut self) {
        (self.callback)(100);
    }
}

/// Reference level for `peak` stored as `data_type`.
///
/// Integer types get `floor(20·log10(full_scale / peak))` clamped into `i16`
/// (0 for a silent signal); float types are stored unscaled and get 1.
pub fn ref_level(peak: f64, data_type: DataType) -> i16 {
    if !data_type.is_integer() {
        return 1;
    }
    if peak <= 0.0 || !peak.is_finite() {
        return 0;
    }
    let level = factor_to_db(data_type.full_scale() / peak).floor();
    level.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

pub fn write_header<W: Write>(writer: &mut W, info: &WaveformFileInfo) -> Result<()> {
    let mut description = info.comment.as_bytes().to_vec();
    let max_description = u16::MAX as usize * DESCRIPTION_BLOCK_SIZE;
    if description.len() > max_description {
        tracing::warn!("Waveform comment truncated to {} bytes", max_description);
        description.truncate(max_description);
    }
    let blocks = description.len().div_ceil(DESCRIPTION_BLOCK_SIZE);
    description.resize(blocks * DESCRIPTION_BLOCK_SIZE, 0);

    let signal_size = i64::try_from(info.signal_size)
        .map_err(|_| DspError::invalid_argument("signal too long for the waveform format"))?;

    let mut header = [0u8; HEADER_SIZE];
    header[0] = FORMAT_BYTE;
    header[TYPE_OFFSET] = (u8::from(info.is_complex) << COMPLEX_BIT)
        | (u8::from(info.is_integer()) << INTEGER_BIT)
        | (info.data_type.size_code() & SIZE_CODE_MASK);
    header[DESCRIPTION_SIZE_OFFSET..REFERENCE_OFFSET].copy_from_slice(&(blocks as u16).to_le_bytes());
    header[REFERENCE_OFFSET..REFERENCE_OFFSET + 2].copy_from_slice(&info.ref_level.to_le_bytes());
    header[SIZE_OFFSET..CLOCK_OFFSET].copy_from_slice(&signal_size.to_le_bytes());
    header[CLOCK_OFFSET..DATE_OFFSET].copy_from_slice(&info.clock.value().to_le_bytes());
    header[DATE_OFFSET..HEADER_SIZE].copy_from_slice(&info.date_time.timestamp().to_le_bytes());

    writer.write_all(&header)?;
    writer.write_all(&description)?;
    Ok(())
}

fn read_block<R: Read>(reader: &mut R, buffer: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buffer).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => DspError::invalid_format(format!("truncated {}", what)),
        _ => DspError::Io(e),
    })
}

fn field<const N: usize>(header: &[u8; HEADER_SIZE], offset: usize) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&header[offset..offset + N]);
    bytes
}

pub fn read_header<R: Read>(reader: &mut R) -> Result<WaveformFileInfo> {
    let mut header = [0u8; HEADER_SIZE];
    read_block(reader, &mut header, "waveform header")?;
    if header[0] != FORMAT_BYTE {
        return Err(DspError::invalid_format(format!(
            "unsupported waveform format byte {:#04x}",
            header[0]
        )));
    }

    let type_byte = header[TYPE_OFFSET];
    let is_complex = (type_byte >> COMPLEX_BIT) & 1 == 1;
    let is_integer = (type_byte >> INTEGER_BIT) & 1 == 1;
    let data_type = DataType::from_code(type_byte & SIZE_CODE_MASK, is_integer)?;

    let blocks = u16::from_le_bytes(field(&header, DESCRIPTION_SIZE_OFFSET));
    let ref_level = i16::from_le_bytes(field(&header, REFERENCE_OFFSET));
    let signal_size = i64::from_le_bytes(field(&header, SIZE_OFFSET));
    let clock = f64::from_le_bytes(field(&header, CLOCK_OFFSET));
    let seconds = i64::from_le_bytes(field(&header, DATE_OFFSET));

    let signal_size = u64::try_from(signal_size)
        .map_err(|_| DspError::invalid_format(format!("negative sample count {}", signal_size)))?;
    if !clock.is_finite() || clock < 0.0 {
        return Err(DspError::invalid_format(format!("invalid clock {}", clock)));
    }
    let date_time = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| DspError::invalid_format(format!("invalid timestamp {}", seconds)))?;

    let mut description = vec![0u8; blocks as usize * DESCRIPTION_BLOCK_SIZE];
    read_block(reader, &mut description, "waveform description")?;
    let end = description.iter().position(|&b| b == 0).unwrap_or(description.len());
    let comment = String::from_utf8_lossy(&description[..end]).into_owned();

    let info = WaveformFileInfo {
        clock: Frequency::hz(clock),
        data_type,
        signal_size,
        is_complex,
        ref_level,
        comment,
        date_time,
    };
    tracing::debug!(
        "Waveform header: {} {} samples of {}, clock {}, ref level {} dB",
        info.signal_size,
        if info.is_complex { "complex" } else { "real" },
        info.data_type,
        info.clock,
        info.ref_level
    );
    Ok(info)
}

/// Fixed-width little-endian element of the sample stream
trait Element: Copy {
    const SIZE: usize;

    fn from_f64(value: f64) -> Self;

    fn to_f64(self) -> f64;

    fn put(self, buffer: &mut Vec<u8>);

    fn get(bytes: &[u8]) -> Self;
}

macro_rules! element {
    ($($ty:ty => |$value:ident| $convert:expr),* $(,)?) => {$(
        impl Element for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();

            fn from_f64($value: f64) -> Self {
                $convert
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn put(self, buffer: &mut Vec<u8>) {
                buffer.extend_from_slice(&self.to_le_bytes());
            }

            fn get(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(&bytes[..Self::SIZE]);
                <$ty>::from_le_bytes(raw)
            }
        }
    )*};
}

// `as` saturates out-of-range values
element! {
    i8 => |value| value.round() as i8,
    i16 => |value| value.round() as i16,
    i32 => |value| value.round() as i32,
    i64 => |value| value.round() as i64,
    f32 => |value| value as f32,
    f64 => |value| value,
}

fn write_elements<E, T, W, F>(writer: &mut W, samples: &[T], scale: f64, progress: F) -> Result<()>
where
    E: Element,
    T: Sample,
    W: Write,
    F: FnMut(u8),
{
    let components = if T::IS_COMPLEX { 2 } else { 1 };
    let mut progress = Progress::new(progress, samples.len());
    let mut buffer = Vec::with_capacity(samples.len().min(BLOCK_SAMPLES) * components * E::SIZE);
    let mut n = 0;
    for block in samples.chunks(BLOCK_SAMPLES) {
        buffer.clear();
        for sample in block {
            E::from_f64(sample.re() * scale).put(&mut buffer);
            if T::IS_COMPLEX {
                E::from_f64(sample.im() * scale).put(&mut buffer);
            }
            progress.tick(n);
            n += 1;
        }
        writer.write_all(&buffer)?;
    }
    progress.finish();
    Ok(())
}

/// Write `samples` as `data_type` elements multiplied by `scale`.
///
/// Float types ignore `scale`.
pub(crate) fn write_samples<T, W, F>(
    writer: &mut W,
    samples: &[T],
    data_type: DataType,
    scale: f64,
    progress: F,
) -> Result<()>
where
    T: Sample,
    W: Write,
    F: FnMut(u8),
{
    match data_type {
        DataType::Int8 => write_elements::<i8, _, _, _>(writer, samples, scale, progress),
        DataType::Int16 => write_elements::<i16, _, _, _>(writer, samples, scale, progress),
        DataType::Int32 => write_elements::<i32, _, _, _>(writer, samples, scale, progress),
        DataType::Int64 => write_elements::<i64, _, _, _>(writer, samples, scale, progress),
        DataType::Float32 => write_elements::<f32, _, _, _>(writer, samples, 1.0, progress),
        DataType::Float64 => write_elements::<f64, _, _, _>(writer, samples, 1.0, progress),
    }
}

fn read_elements<E, T, R, F>(
    reader: &mut R,
    count: usize,
    stored_complex: bool,
    factor: f64,
    progress: F,
) -> Result<Vec<T>>
where
    E: Element,
    T: Sample,
    R: Read,
    F: FnMut(u8),
{
    let components = if stored_complex { 2 } else { 1 };
    let sample_size = components * E::SIZE;
    let mut progress = Progress::new(progress, count);
    let mut samples = Vec::with_capacity(count.min(BLOCK_SAMPLES));
    let mut buffer = Vec::new();
    let mut left = count;
    while left > 0 {
        let block = left.min(BLOCK_SAMPLES);
        buffer.resize(block * sample_size, 0);
        reader.read_exact(&mut buffer)?;
        for chunk in buffer.chunks_exact(sample_size) {
            let re = E::get(chunk).to_f64();
            let im = if stored_complex {
                E::get(&chunk[E::SIZE..]).to_f64()
            } else {
                0.0
            };
            progress.tick(samples.len());
            samples.push(T::from_parts(re, im) * factor);
        }
        left -= block;
    }
    progress.finish();
    Ok(samples)
}

/// Read `count` samples stored as `data_type`, multiplying them by `factor`.
///
/// Float types ignore `factor`. A stream shorter than announced fails with
/// [`DspError::Io`].
pub(crate) fn read_samples<T, R, F>(
    reader: &mut R,
    count: usize,
    stored_complex: bool,
    data_type: DataType,
    factor: f64,
    progress: F,
) -> Result<Vec<T>>
where
    T: Sample,
    R: Read,
    F: FnMut(u8),
{
    match data_type {
        DataType::Int8 => read_elements::<i8, _, _, _>(reader, count, stored_complex, factor, progress),
        DataType::Int16 => read_elements::<i16, _, _, _>(reader, count, stored_complex, factor, progress),
        DataType::Int32 => read_elements::<i32, _, _, _>(reader, count, stored_complex, factor, progress),
        DataType::Int64 => read_elements::<i64, _, _, _>(reader, count, stored_complex, factor, progress),
        DataType::Float32 => read_elements::<f32, _, _, _>(reader, count, stored_complex, 1.0, progress),
        DataType::Float64 => read_elements::<f64, _, _, _>(reader, count, stored_complex, 1.0, progress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Complex64;

    fn info() -> WaveformFileInfo {
        WaveformFileInfo {
            clock: Frequency::mhz(2.5),
            data_type: DataType::Int16,
            signal_size: 3,
            is_complex: true,
            ref_level: -6,
            comment: "capture 1".to_string(),
            date_time: DateTime::from_timestamp(1_600_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_header_layout() {
        let mut bytes = Vec::new();
        write_header(&mut bytes, &info()).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + DESCRIPTION_BLOCK_SIZE);
        assert_eq!(bytes[0], 0x11);
        // complex | integer | 16-bit
        assert_eq!(bytes[1], 0b1101);
        assert_eq!(&bytes[2..4], &[1, 0]);
        assert_eq!(i16::from_le_bytes([bytes[4], bytes[5]]), -6);
        assert_eq!(&bytes[8..16], &3i64.to_le_bytes());
        assert_eq!(&bytes[16..24], &2.5e6f64.to_le_bytes());
        assert_eq!(&bytes[24..32], &1_600_000_000i64.to_le_bytes());
        assert_eq!(&bytes[32..41], b"capture 1");
        assert!(bytes[41..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_header_round_trip() {
        let mut bytes = Vec::new();
        write_header(&mut bytes, &info()).unwrap();
        let decoded = read_header(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded, info());
    }

    #[test]
    fn test_float_header_has_no_integer_bit() {
        let float_info = WaveformFileInfo {
            data_type: DataType::Float32,
            is_complex: false,
            comment: String::new(),
            ..info()
        };
        let mut bytes = Vec::new();
        write_header(&mut bytes, &float_info).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(bytes[1], 0x02);
    }

    #[test]
    fn test_bad_version_is_rejected() {
        let mut bytes = Vec::new();
        write_header(&mut bytes, &info()).unwrap();
        bytes[0] = 0x21;
        assert!(matches!(
            read_header(&mut bytes.as_slice()),
            Err(DspError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn test_truncated_header_is_rejected() {
        let bytes = [0x11u8; 20];
        assert!(matches!(
            read_header(&mut &bytes[..]),
            Err(DspError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn test_float_code_as_integer_mismatch() {
        let mut bytes = Vec::new();
        write_header(&mut bytes, &WaveformFileInfo { comment: String::new(), ..info() }).unwrap();
        // float flag with 16-bit width code
        bytes[1] = 0b1001;
        assert!(matches!(
            read_header(&mut bytes.as_slice()),
            Err(DspError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn test_ref_level() {
        assert_eq!(ref_level(1.0, DataType::Int16), 90);
        assert_eq!(ref_level(0.0, DataType::Int16), 0);
        assert_eq!(ref_level(3.0, DataType::Float64), 1);
        assert_eq!(ref_level(1e-300, DataType::Int64), i16::MAX);
    }

    #[test]
    fn test_samples_round_trip() {
        let samples = vec![Complex64::new(0.5, -0.25), Complex64::new(-1.0, 1.0)];
        let mut bytes = Vec::new();
        write_samples(&mut bytes, &samples, DataType::Int16, 1000.0, |_| {}).unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[..2], &500i16.to_le_bytes());

        let decoded: Vec<Complex64> =
            read_samples(&mut bytes.as_slice(), 2, true, DataType::Int16, 1e-3, |_| {}).unwrap();
        for (a, b) in decoded.iter().zip(&samples) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_integer_saturates() {
        let mut bytes = Vec::new();
        write_samples(&mut bytes, &[1000.0f64, -1000.0], DataType::Int8, 1.0, |_| {}).unwrap();
        assert_eq!(bytes, vec![127u8, 128u8]);
    }

    #[test]
    fn test_real_stream_into_complex_samples() {
        let mut bytes = Vec::new();
        write_samples(&mut bytes, &[1.5f64, 2.5], DataType::Float32, 1.0, |_| {}).unwrap();
        let decoded: Vec<Complex64> =
            read_samples(&mut bytes.as_slice(), 2, false, DataType::Float32, 7.0, |_| {}).unwrap();
        assert_eq!(decoded, vec![Complex64::new(1.5, 0.0), Complex64::new(2.5, 0.0)]);
    }

    #[test]
    fn test_short_stream_is_io_error() {
        let bytes = [0u8; 6];
        let result: Result<Vec<f64>> =
            read_samples(&mut &bytes[..], 2, false, DataType::Float64, 1.0, |_| {});
        assert!(matches!(result, Err(DspError::Io(_))));
    }

    #[test]
    fn test_progress_reports() {
        let samples = vec![0.0f64; 1000];
        let mut reports = Vec::new();
        write_samples(&mut io::sink(), &samples, DataType::Float64, 1.0, |p| reports.push(p)).unwrap();
        assert_eq!(reports.first(), Some(&0));
        assert_eq!(reports.last(), Some(&100));
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
    }
}
