//! Text export of waveforms (CSV and one-sample-per-line)

use super::{codec::Progress, create_writer, Waveform};
use crate::error::Result;
use crate::types::{complex_to_string, Sample};
use std::io::Write;
use std::path::Path;

const LINE_END: &str = "\r\n";

impl<T: Sample> Waveform<T> {
    pub fn save_as_csv(&self, path: impl AsRef<Path>, delimiter: char) -> Result<()> {
        self.save_as_csv_with_progress(path, delimiter, |_| {})
    }

    /// Write `time;value` rows (`time;re;im` for complex samples).
    ///
    /// Time is in seconds derived from the clock, 0 for every row without one.
    pub fn save_as_csv_with_progress<F: FnMut(u8)>(
        &self,
        path: impl AsRef<Path>,
        delimiter: char,
        progress: F,
    ) -> Result<()> {
        let path = path.as_ref();
        let mut writer = create_writer(path)?;
        let mut progress = Progress::new(progress, self.len());
        for (i, sample) in self.iter().enumerate() {
            let time = self.duration_of(i);
            if T::IS_COMPLEX {
                write!(writer, "{time}{delimiter}{}{delimiter}{}{LINE_END}", sample.re(), sample.im())?;
            } else {
                write!(writer, "{time}{delimiter}{}{LINE_END}", sample.re())?;
            }
            progress.tick(i);
        }
        writer.flush()?;
        progress.finish();
        tracing::debug!("Exported {} samples as CSV to {:?}", self.len(), path);
        Ok(())
    }

    pub fn save_as_plain_text(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_as_plain_text_with_progress(path, |_| {})
    }

    /// Write one sample per line (`3+4i` notation for complex samples)
    pub fn save_as_plain_text_with_progress<F: FnMut(u8)>(&self, path: impl AsRef<Path>, progress: F) -> Result<()> {
        let path = path.as_ref();
        let mut writer = create_writer(path)?;
        let mut progress = Progress::new(progress, self.len());
        for (i, sample) in self.iter().enumerate() {
            if T::IS_COMPLEX {
                write!(writer, "{}{LINE_END}", complex_to_string(sample.to_complex()))?;
            } else {
                write!(writer, "{}{LINE_END}", sample.re())?;
            }
            progress.tick(i);
        }
        writer.flush()?;
        progress.finish();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{ComplexSignal, RealSignal};
    use crate::types::{Complex64, Frequency};
    use crate::waveform::{ComplexWaveform, RealWaveform};
    use tempfile::TempDir;

    #[test]
    fn test_csv_real() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("real.csv");
        let signal = RealSignal::with_clock(vec![1.5, -2.0], Frequency::hz(4.0)).unwrap();
        RealWaveform::new(signal).save_as_csv(&path, ';').unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0;1.5\r\n0.25;-2\r\n");
    }

    #[test]
    fn test_csv_complex_with_progress() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("complex.csv");
        let signal = ComplexSignal::from_vec(vec![Complex64::new(1.0, 2.0)]);
        let mut last = 0;
        ComplexWaveform::new(signal)
            .save_as_csv_with_progress(&path, ',', |p| last = p)
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0,1,2\r\n");
        assert_eq!(last, 100);
    }

    #[test]
    fn test_plain_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("complex.txt");
        let signal = ComplexSignal::from_vec(vec![
            Complex64::new(3.0, 4.0),
            Complex64::new(0.0, -1.0),
            Complex64::new(0.0, 0.0),
        ]);
        ComplexWaveform::new(signal).save_as_plain_text(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3+4i\r\n-i\r\n0\r\n");
    }
}
