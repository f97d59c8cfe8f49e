//! Riecoin Proof-of-Work Verifier CLI
//!
//! Checks the prime-constellation proof of work of blocks printed by
//! `riecoin-cli getblock`.
//!
//! # Commands
//!
//! - `verify` - Verify one block record
//! - `diagnose` - Print every intermediate value of a verification
//! - `batch` - Verify many block records in parallel
//! - `bits` - Decode a compact target
//! - `benchmark` - Time repeated verifications

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use riepow::batch::run_batch;
use riepow::config::{default_config_path, VerifierConfig};
use riepow::pow::{decode_compact, BlockHeader, Verifier, SIGNIFICANT_DIGITS};
use riepow::record::{read_header, read_headers};

#[derive(Parser)]
#[command(name = "riepow")]
#[command(author = "Cyberia")]
#[command(version = "0.1.0")]
#[command(about = "Riecoin proof-of-work verifier")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Custom config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify one block record (stdin by default)
    Verify {
        /// Read the record from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print a step-by-step trace of a verification
    Diagnose {
        /// Read the record from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Time budget for factoring the prime base, in milliseconds
        #[arg(long)]
        factor_budget_ms: Option<u64>,

        /// Skip factoring the prime base
        #[arg(long)]
        no_factor: bool,
    },

    /// Verify many block records in parallel
    Batch {
        /// Read records from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Decode a compact target given as hex (e.g. 0204cd00)
    Bits {
        /// Compact target
        bits: String,
    },

    /// Run performance benchmark
    Benchmark {
        /// Read the record from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Number of verifications to run
        #[arg(short, long, default_value = "100")]
        count: u32,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let result = run(Cli::parse());

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Dispatch a parsed command line; `Ok(false)` means a proof was rejected
fn run(cli: Cli) -> anyhow::Result<bool> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Verify { file } => cmd_verify(file.as_deref()),
        Commands::Diagnose {
            file,
            factor_budget_ms,
            no_factor,
        } => load_config(config_path).and_then(|config| {
            cmd_diagnose(file.as_deref(), factor_budget_ms, no_factor, config)
        }),
        Commands::Batch { file, threads } => load_config(config_path)
            .and_then(|config| cmd_batch(file.as_deref(), threads, &config)),
        Commands::Bits { bits } => cmd_bits(&bits),
        Commands::Benchmark { file, count } => cmd_benchmark(file.as_deref(), count),
    }
}

/// Load the config file given on the command line, or the default one if it exists
fn load_config(path: Option<&Path>) -> anyhow::Result<VerifierConfig> {
    match path {
        Some(path) => Ok(VerifierConfig::load_from_file(path)?),
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                log::debug!("loading config from {}", default_path.display());
                Ok(VerifierConfig::load_from_file(&default_path)?)
            } else {
                Ok(VerifierConfig::default())
            }
        }
    }
}

/// Open the input file, or stdin
fn open_input(file: Option<&Path>) -> anyhow::Result<Box<dyn Read>> {
    Ok(match file {
        Some(path) => Box::new(File::open(path)?),
        None => {
            eprintln!("reading from stdin...");
            Box::new(std::io::stdin().lock())
        }
    })
}

fn read_one(file: Option<&Path>) -> anyhow::Result<BlockHeader> {
    Ok(read_header(open_input(file)?)?)
}

fn cmd_verify(file: Option<&Path>) -> anyhow::Result<bool> {
    let header = read_one(file)?;

    match Verifier::new().verify_header(&header) {
        Ok(proof) => {
            println!("pow hash: {}", proof.pow_hash);
            println!("success!");
            Ok(true)
        }
        Err(e) => {
            println!("invalid proof of work: {}", e);
            Ok(false)
        }
    }
}

fn cmd_diagnose(
    file: Option<&Path>,
    factor_budget_ms: Option<u64>,
    no_factor: bool,
    mut config: VerifierConfig,
) -> anyhow::Result<bool> {
    if let Some(ms) = factor_budget_ms {
        config.factor_budget_ms = ms;
    }
    if no_factor {
        config.factor_budget_ms = 0;
    }

    let header = read_one(file)?;
    let verifier = Verifier::new();
    let mut diagnostic = verifier.diagnose(&header, config.diagnostic_options());

    for line in diagnostic.by_ref() {
        println!("{}", line);
    }

    Ok(matches!(diagnostic.outcome(), Some(Ok(()))))
}

fn cmd_batch(
    file: Option<&Path>,
    threads: Option<usize>,
    config: &VerifierConfig,
) -> anyhow::Result<bool> {
    let headers = read_headers(open_input(file)?)?;
    let num_threads = threads.or(config.threads).unwrap_or_else(num_cpus::get);

    println!(
        "Verifying {} headers with {} threads...",
        headers.len(),
        num_threads
    );

    let start = Instant::now();
    let report = run_batch(&headers, num_threads)?;
    let elapsed = start.elapsed();

    for (i, result) in report.results.iter().enumerate() {
        match result {
            Ok(proof) => println!("#{}: ok ({})", i, proof.pow_hash),
            Err(e) => {
                log::warn!("record #{} rejected: {}", i, e);
                println!("#{}: {}", i, e);
            }
        }
    }

    println!("\nResults:");
    println!("  Valid:        {}", report.valid());
    println!("  Invalid:      {}", report.invalid());
    println!("  Time elapsed: {:.2}s", elapsed.as_secs_f64());

    Ok(report.all_valid())
}

fn cmd_bits(bits: &str) -> anyhow::Result<bool> {
    let digits = bits.trim_start_matches("0x");
    let compact = u32::from_str_radix(digits, 16)
        .map_err(|e| anyhow::anyhow!("Invalid compact target '{}': {}", bits, e))?;

    let decoded = decode_compact(compact);
    println!("Compact:        {:#010x} ({})", compact, compact);
    println!("Prime bits:     {}", decoded);
    println!(
        "Trailing zeros: {}",
        decoded.saturating_sub(SIGNIFICANT_DIGITS)
    );

    Ok(true)
}

fn cmd_benchmark(file: Option<&Path>, count: u32) -> anyhow::Result<bool> {
    let header = read_one(file)?;
    let verifier = Verifier::new();

    println!("Running benchmark with {} verifications...", count);

    let start = Instant::now();
    let mut valid = 0u32;
    for _ in 0..count {
        if verifier.verify_header(&header).is_ok() {
            valid += 1;
        }
    }
    let elapsed = start.elapsed();
    let rate = count as f64 / elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Verifications: {} ({} valid)", count, valid);
    println!("  Time elapsed:  {:.2}s", elapsed.as_secs_f64());
    println!("  Rate:          {:.2} verifications/s", rate);

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("riepow-{}-{}", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_bits_ignores_broken_config() {
        let config = write_temp("broken-config.json", "{ not json");
        let cli = Cli::parse_from([
            "riepow",
            "--config",
            config.to_str().unwrap(),
            "bits",
            "0204cd00",
        ]);
        let result = run(cli);
        std::fs::remove_file(&config).ok();
        assert!(result.unwrap());
    }

    #[test]
    fn test_diagnose_reports_broken_config() {
        let config = write_temp("broken-diag-config.json", "{ not json");
        let cli = Cli::parse_from([
            "riepow",
            "diagnose",
            "--config",
            config.to_str().unwrap(),
            "--file",
            "/nonexistent/block.json",
        ]);
        let err = run(cli).unwrap_err();
        std::fs::remove_file(&config).ok();
        assert!(err.to_string().starts_with("Invalid config file"));
    }

    #[test]
    fn test_bits_rejects_non_hex() {
        assert!(cmd_bits("zz").is_err());
        assert!(cmd_bits("0x02013900").unwrap());
    }
}
