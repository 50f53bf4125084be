//! sigkit-inspect - print what a waveform file contains
//!
//! Generic waveform files are summarised from their header alone; instrument
//! files (`.wv`, `.wvh`, `.iq.tar`) are decoded to report levels as well.

use anyhow::{Context, Result};
use clap::Parser;
use sigkit_rs::config::DspConfig;
use sigkit_rs::signal::measure::{peak, rms};
use sigkit_rs::waveform::vendor::{self, VendorFormat};
use sigkit_rs::{logging, DataType, WaveformFileInfo};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sigkit-inspect")]
#[command(author, version, about = "Inspect waveform files", long_about = None)]
struct Cli {
    /// Print the file info as JSON
    #[arg(long)]
    json: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Files to inspect
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

/// Header info plus the measured levels of decoded instrument files
struct Report {
    format: &'static str,
    info: WaveformFileInfo,
    levels: Option<(f64, f64)>,
}

fn inspect(path: &Path, config: &DspConfig) -> Result<Report> {
    let Some(format) = VendorFormat::from_path(path) else {
        let info = WaveformFileInfo::analyse(path).with_context(|| format!("reading header of {:?}", path))?;
        return Ok(Report {
            format: "waveform",
            info,
            levels: None,
        });
    };

    let (name, waveform, data_type) = match format {
        VendorFormat::Wv => ("wv", vendor::from_wv_file(path), DataType::Int16),
        VendorFormat::Wvh => (
            "wvh",
            vendor::from_wvh_file(path, config.waveform.load_resistance),
            DataType::Int16,
        ),
        VendorFormat::IqTar => ("iq.tar", vendor::from_iq_tar_file(path), DataType::Float32),
    };
    let waveform = waveform.with_context(|| format!("decoding {:?}", path))?;
    Ok(Report {
        format: name,
        info: waveform.file_info(data_type),
        levels: Some((peak(&waveform), rms(&waveform))),
    })
}

fn print_report(path: &Path, report: &Report) {
    let info = &report.info;
    println!("{}", path.display());
    println!("  format:     {}", report.format);
    println!("  clock:      {}", info.clock);
    println!("  samples:    {}", info.signal_size);
    println!(
        "  data type:  {} {}",
        if info.is_complex { "complex" } else { "real" },
        info.data_type
    );
    if info.is_integer() {
        println!("  ref level:  {} dB", info.ref_level);
    }
    if let Some((peak, rms)) = report.levels {
        println!("  peak / rms: {:.6} / {:.6}", peak, rms);
    }
    println!("  date:       {}", info.date_time.format("%Y-%m-%d %H:%M:%S UTC"));
    if !info.comment.is_empty() {
        println!("  comment:    {}", info.comment);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => DspConfig::load(path).with_context(|| format!("loading config {:?}", path))?,
        None => DspConfig::default_path()
            .map(DspConfig::load_or_default)
            .unwrap_or_default(),
    };
    logging::init(&config.logging.filter)?;
    tracing::debug!("Inspecting {} file(s)", cli.paths.len());

    let mut failures = 0;
    for path in &cli.paths {
        match inspect(path, &config) {
            Ok(report) if cli.json => println!("{}", serde_json::to_string_pretty(&report.info)?),
            Ok(report) => print_report(path, &report),
            Err(e) => {
                tracing::error!("{:?}: {:#}", path, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) could not be read", failures, cli.paths.len());
    }
    Ok(())
}
