//! Binary waveform format: every storage type, headers, progress, export

mod common;

use common::assert_float_eq;
use common::builders::{SignalBuilder, WaveformBuilder};
use sigkit_rs::types::db_to_factor;
use sigkit_rs::{
    Complex64, ComplexWaveform, DataType, DspError, Frequency, RealSignal, RealWaveform, WaveformFileInfo,
};
use tempfile::TempDir;

fn reference() -> ComplexWaveform {
    let signal = SignalBuilder::new()
        .tone(500, 0.013, 0.8)
        .clock(Frequency::mhz(2.0))
        .build();
    WaveformBuilder::new(signal).comment("codec reference").build()
}

#[test]
fn test_round_trip_every_data_type() {
    let temp = TempDir::new().unwrap();
    let original = reference();

    for &data_type in DataType::all() {
        let path = temp.path().join(format!("wave_{}.bin", data_type));
        original.save_to_file(&path, data_type).unwrap();

        let info = WaveformFileInfo::analyse(&path).unwrap();
        assert_eq!(info.data_type, data_type);
        assert_eq!(info.signal_size, 500);
        assert!(info.is_complex);
        assert_eq!(info.clock, Frequency::mhz(2.0));
        assert_eq!(info.comment, "codec reference");
        assert_eq!(info.date_time, original.date_time());

        let tolerance = match data_type {
            DataType::Float64 => 1e-15,
            DataType::Float32 => 1e-6,
            _ => 1.0 / db_to_factor(info.ref_level as f64),
        };
        let restored = ComplexWaveform::from_file(&path).unwrap();
        assert_eq!(restored.len(), original.len());
        for (a, b) in restored.iter().zip(original.iter()) {
            assert!(
                (a.re - b.re).abs() <= tolerance && (a.im - b.im).abs() <= tolerance,
                "{}: {} vs {}",
                data_type,
                a,
                b
            );
        }
    }
}

#[test]
fn test_reference_level_uses_headroom() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("int16.bin");
    reference().save_to_file(&path, DataType::Int16).unwrap();

    // floor(20·log10(32767 / 0.8))
    let info = WaveformFileInfo::analyse(&path).unwrap();
    assert_eq!(info.ref_level, 92);
    assert!(info.is_integer());
    assert_eq!(info.data_size(), 500 * 2 * 2);
    let file_size = std::fs::metadata(&path).unwrap().len();
    assert!(file_size > info.data_size());
}

#[test]
fn test_real_file_into_complex_waveform() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("real.bin");
    let real = RealSignal::with_clock(vec![0.25, -0.5, 1.0], Frequency::khz(1.0)).unwrap();
    RealWaveform::new(real).save_to_file(&path, DataType::Float64).unwrap();

    let waveform = ComplexWaveform::from_file(&path).unwrap();
    assert_eq!(
        waveform.as_slice(),
        &[
            Complex64::new(0.25, 0.0),
            Complex64::new(-0.5, 0.0),
            Complex64::new(1.0, 0.0)
        ]
    );
    assert!(RealWaveform::from_file(temp.path().join("real.bin")).is_ok());
}

#[test]
fn test_silent_signal() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("silence.bin");
    let silence = WaveformBuilder::new(SignalBuilder::new().ramp(0).build()).build();
    silence.save_to_file(&path, DataType::Int32).unwrap();

    let info = WaveformFileInfo::analyse(&path).unwrap();
    assert_eq!(info.signal_size, 0);
    assert_eq!(info.ref_level, 0);
    assert!(ComplexWaveform::from_file(&path).unwrap().is_empty());
}

#[test]
fn test_progress_reports() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("progress.bin");
    let waveform = reference();

    let mut saved = Vec::new();
    waveform
        .save_to_file_with_progress(&path, DataType::Int16, |p| saved.push(p))
        .unwrap();
    let mut loaded = Vec::new();
    ComplexWaveform::from_file_with_progress(&path, |p| loaded.push(p)).unwrap();

    for reports in [&saved, &loaded] {
        assert_eq!(reports.last(), Some(&100));
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
        assert!(reports.len() > 2);
    }
}

#[test]
fn test_open_errors() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(
        ComplexWaveform::from_file(temp.path().join("missing.bin")),
        Err(DspError::FileNotFound(_))
    ));
    assert!(matches!(
        WaveformFileInfo::analyse(""),
        Err(DspError::InvalidArgument(_))
    ));
    assert!(matches!(
        reference().save_to_file(temp.path().join("no_dir").join("x.bin"), DataType::Int8),
        Err(DspError::NotWritable(_)) | Err(DspError::FileNotFound(_))
    ));
}

#[test]
fn test_garbage_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("garbage.bin");
    std::fs::write(&path, vec![0xAB; 100]).unwrap();
    assert!(matches!(
        ComplexWaveform::from_file(&path),
        Err(DspError::InvalidFileFormat(_))
    ));
}

#[test]
fn test_csv_and_text_export() {
    let temp = TempDir::new().unwrap();
    let signal = SignalBuilder::new().ramp(3).clock(Frequency::hz(2.0)).build();
    let waveform = WaveformBuilder::new(signal).build();

    let csv = temp.path().join("ramp.csv");
    waveform.save_as_csv(&csv, ',').unwrap();
    let text = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(text, "0,0,0\r\n0.5,1,0.5\r\n1,2,1\r\n");

    let plain = temp.path().join("ramp.txt");
    waveform.save_as_plain_text(&plain).unwrap();
    let lines: Vec<String> = std::fs::read_to_string(&plain)
        .unwrap()
        .split("\r\n")
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "0");
}

#[test]
fn test_duration_follows_clock() {
    let waveform = reference();
    assert_float_eq(waveform.duration(), 500.0 / 2e6, 1e-15);
}
