use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use rollcrc::{CrcConfig, TableFormat, VerifyReport, DEFAULT_EXTRA_BYTES};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rollcrc")]
#[command(version)]
#[command(about = "CRC-32 checksums and O(1) rolling window checksums", long_about = None)]
struct Cli {
    /// JSON config file (window_size, init)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cross check every table builder and the rolling checksum
    Verify {
        /// Window size in bytes
        #[arg(short, long)]
        window: Option<usize>,
        /// Use the zip/png convention (init and final xor of all ones)
        #[arg(long)]
        zip: bool,
        /// Bytes to roll past the first window
        #[arg(long, default_value_t = DEFAULT_EXTRA_BYTES)]
        extra: usize,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Checksum whole files
    Sum {
        /// Input files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(long)]
        zip: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Checksum of every window of a file
    Roll {
        /// Input file
        input: PathBuf,
        /// Window size in bytes
        #[arg(short, long)]
        window: Option<usize>,
        #[arg(long)]
        zip: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the base and rolling tables
    Tables {
        /// Window size in bytes
        #[arg(short, long)]
        window: Option<usize>,
        #[arg(long)]
        zip: bool,
        /// Output format (text, json, msgpack)
        #[arg(short, long, default_value = "text")]
        format: TableFormat,
        /// Output file (stdout if omitted; required for msgpack)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn setup_logger() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "rollcrc=info,librollcrc=info");
    }
    pretty_env_logger::init();
}

fn main() -> Result<()> {
    setup_logger();
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Verify {
            window,
            zip,
            extra,
            json,
        } => {
            let config = rollcrc::resolve_config(config_path, window, zip)?;
            verify(&config, extra, json)?;
        }
        Commands::Sum { inputs, zip, json } => {
            let config = rollcrc::resolve_config(config_path, None, zip)?;
            sum(&inputs, &config, json)?;
        }
        Commands::Roll {
            input,
            window,
            zip,
            json,
        } => {
            let config = rollcrc::resolve_config(config_path, window, zip)?;
            roll(&input, &config, json)?;
        }
        Commands::Tables {
            window,
            zip,
            format,
            output,
        } => {
            let config = rollcrc::resolve_config(config_path, window, zip)?;
            tables(&config, format, output)?;
        }
    }

    Ok(())
}

fn verify(config: &CrcConfig, extra: usize, json: bool) -> Result<()> {
    info!(
        "verifying window {} init {:08x} over {} extra bytes",
        config.window_size, config.init, extra
    );

    let report = rollcrc::run_self_test(config, extra)?;

    if json {
        let json_str =
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json_str);
    } else {
        print_report(&report);
    }

    if !report.is_ok() {
        error!("{} mismatches", report.mismatches.len());
    }
    rollcrc::check_report(report)?;
    Ok(())
}

fn print_report(report: &VerifyReport) {
    println!("Rolling CRC self test");
    println!("───────────────────────────────");
    println!("  Polynomial:  {:08x}", report.polynomial);
    println!("  Window:      {} bytes", report.window_size);
    println!("  Init:        {:08x}", report.init);
    println!("  Windows:     {}", report.windows_checked);

    for m in &report.mismatches {
        println!("  {}", m);
    }

    println!(
        "roll: {:08x} and {:08x} {}",
        report.final_direct,
        report.final_rolled,
        if report.final_direct == report.final_rolled {
            "are equal"
        } else {
            "ARE NOT EQUAL!"
        }
    );
}

fn sum(inputs: &[PathBuf], config: &CrcConfig, json: bool) -> Result<()> {
    let mut sums = Vec::with_capacity(inputs.len());
    for input in inputs {
        sums.push(rollcrc::sum_file(input, config)?);
    }

    if json {
        let json_str = serde_json::to_string_pretty(&sums).context("Failed to serialize sums")?;
        println!("{}", json_str);
    } else {
        for s in &sums {
            println!("{:08x}  {}", s.crc, s.path);
        }
    }

    Ok(())
}

fn roll(input: &PathBuf, config: &CrcConfig, json: bool) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    if data.len() < config.window_size {
        bail!(
            "{} is {} bytes, shorter than the {} byte window",
            input.display(),
            data.len(),
            config.window_size
        );
    }

    let sums = rollcrc::roll_bytes(&data, config)?;
    info!("{} windows of {} bytes", sums.len(), config.window_size);

    if json {
        let json_str =
            serde_json::to_string_pretty(&sums).context("Failed to serialize window sums")?;
        println!("{}", json_str);
    } else {
        for w in &sums {
            println!("{:>10}  {:08x}", w.offset, w.crc);
        }
    }

    Ok(())
}

fn tables(config: &CrcConfig, format: TableFormat, output: Option<PathBuf>) -> Result<()> {
    let bytes = rollcrc::export_tables(config, format)?;

    match output {
        Some(path) => {
            fs::write(&path, &bytes).context("Failed to write output file")?;
            println!("Wrote {} ({} bytes)", path.display(), bytes.len());
        }
        None => {
            if format == TableFormat::Msgpack {
                bail!("msgpack output needs --output <file>");
            }
            print!("{}", String::from_utf8_lossy(&bytes));
        }
    }

    Ok(())
}
