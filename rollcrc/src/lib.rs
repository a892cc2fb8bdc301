//! rollcrc - checksum tool library
//!
//! File checksums, rolling window checksums, self tests and table export on
//! top of librollcrc. The binary in `main.rs` is a thin clap front end.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use serde::Serialize;

/// Re-export librollcrc types
pub use librollcrc::{CrcConfig, Mismatch, TableSet, VerifyReport, DEFAULT_EXTRA_BYTES};

const READ_CHUNK: usize = 64 * 1024;

/// Checksum of one file
#[derive(Debug, Clone, Serialize)]
pub struct FileSum {
    pub path: String,
    pub len: u64,
    pub crc: u32,
    pub init: u32,
}

/// Checksum of the window starting at `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowSum {
    pub offset: usize,
    pub crc: u32,
}

/// Output format for exported tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Rust `const` arrays
    Text,
    Json,
    Msgpack,
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "rust" | "rs" => Ok(TableFormat::Text),
            "json" => Ok(TableFormat::Json),
            "msgpack" | "mp" => Ok(TableFormat::Msgpack),
            _ => Err(format!(
                "Invalid table format: {}. Use: text, json, msgpack",
                s
            )),
        }
    }
}

/// Build the effective config: file first, then command line overrides
pub fn resolve_config(
    config_path: Option<&Path>,
    window: Option<usize>,
    zip: bool,
) -> Result<CrcConfig> {
    let mut config = match config_path {
        Some(path) => {
            let config = CrcConfig::load(path).map_err(|e| anyhow!(e))?;
            info!("config loaded from {}", path.display());
            config
        }
        None => CrcConfig::default(),
    };

    if let Some(w) = window {
        config = config.with_window_size(w);
    }
    if zip {
        config = config.with_init(librollcrc::INIT_ONES);
    }

    config.validate().map_err(|e| anyhow!(e))?;
    debug!(
        "using window {} init {:08x}",
        config.window_size, config.init
    );
    Ok(config)
}

/// Checksum of a byte slice
pub fn sum_bytes(data: &[u8], config: &CrcConfig) -> u32 {
    librollcrc::Crc32::new(config).checksum(data)
}

/// Checksum a file without reading it into memory
pub fn sum_file(path: &Path, config: &CrcConfig) -> Result<FileSum> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let engine = librollcrc::Crc32::new(config);
    let mut digest = engine.digest();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if n == 0 {
            break;
        }
        digest.write(&buf[..n]);
    }

    Ok(FileSum {
        path: path.display().to_string(),
        len: digest.len(),
        crc: digest.value(),
        init: config.init,
    })
}

/// Checksum of every full window of `data`
pub fn roll_bytes(data: &[u8], config: &CrcConfig) -> Result<Vec<WindowSum>> {
    let ctx = librollcrc::RollingContext::new(config).map_err(|e| anyhow!(e))?;
    Ok(ctx
        .window_checksums(data)
        .into_iter()
        .enumerate()
        .map(|(offset, crc)| WindowSum { offset, crc })
        .collect())
}

/// Run the full cross check. The report is returned even when it contains
/// mismatches, `check_report` turns those into an error.
pub fn run_self_test(config: &CrcConfig, extra: usize) -> Result<VerifyReport> {
    librollcrc::self_test(config, extra).map_err(|e| anyhow!(e))
}

/// Fail when the report has any mismatch
pub fn check_report(report: VerifyReport) -> Result<VerifyReport> {
    report.into_result().map_err(|e| anyhow!(e))
}

/// Serialize both tables for `config`
pub fn export_tables(config: &CrcConfig, format: TableFormat) -> Result<Vec<u8>> {
    let set = TableSet::new(config).map_err(|e| anyhow!(e))?;
    let bytes = match format {
        TableFormat::Text => set.to_rust_source().into_bytes(),
        TableFormat::Json => {
            let mut json = set.to_json().map_err(|e| anyhow!(e))?;
            json.push('\n');
            json.into_bytes()
        }
        TableFormat::Msgpack => set.to_msgpack().map_err(|e| anyhow!(e))?,
    };
    Ok(bytes)
}

/// Read back a msgpack table file, validating it against a fresh build
pub fn import_tables(data: &[u8]) -> Result<TableSet> {
    if data.is_empty() {
        bail!("Empty table file");
    }
    TableSet::from_msgpack(data).map_err(|e| anyhow!("Invalid table file: {}", e))
}
