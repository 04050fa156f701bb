//! Cache simulator CLI.
//!
//! Replays a valgrind memory trace against a set-associative LRU cache and
//! prints the hit, miss and eviction counts. It performs:
//! 1. **Configuration:** Geometry from `-s/-E/-b`, optionally layered over a JSON config file.
//! 2. **Replay:** Opens the trace, runs it through a fresh cache, optionally echoing each record.
//! 3. **Reporting:** Prints the summary line and, if requested, writes a results file.

use std::error::Error;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use csim_core::config::SimConfig;
use csim_core::{Result, SimStats, simulate_file};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Set-associative LRU cache simulator",
    long_about = "Replays a valgrind memory trace against a cache with 2^s sets, E lines per set \
                  and 2^b-byte blocks, and reports hits, misses and evictions.\n\n\
                  Examples:\n  \
                  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  \
                  csim -v -s 8 -E 2 -b 4 -t traces/yi.trace\n  \
                  csim --config l1.json -t traces/trans.trace"
)]
struct Cli {
    /// Print each trace record followed by its outcome.
    #[arg(short, long)]
    verbose: bool,

    /// Number of set index bits (the cache has 2^s sets).
    #[arg(short = 's', long = "set-bits", required_unless_present = "config")]
    set_bits: Option<u32>,

    /// Number of lines per set (associativity).
    #[arg(short = 'E', long = "lines", required_unless_present = "config")]
    lines_per_set: Option<usize>,

    /// Number of block offset bits (blocks are 2^b bytes).
    #[arg(short = 'b', long = "block-bits", required_unless_present = "config")]
    block_bits: Option<u32>,

    /// Trace file to replay.
    #[arg(short = 't', long = "trace")]
    trace: PathBuf,

    /// JSON configuration file; command-line values override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed address width in bits (default: inferred from each address's hex digits).
    #[arg(long)]
    address_bits: Option<u32>,

    /// Also write "<hits> <misses> <evictions>" to this file.
    #[arg(long)]
    results: Option<PathBuf>,
}

impl Cli {
    /// Merges the optional config file with command-line overrides.
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        if let Some(s) = self.set_bits {
            config.geometry.set_bits = s;
        }
        if let Some(e) = self.lines_per_set {
            config.geometry.lines_per_set = e;
        }
        if let Some(b) = self.block_bits {
            config.geometry.block_bits = b;
        }
        if self.address_bits.is_some() {
            config.address_bits = self.address_bits;
        }
        config.verbose |= self.verbose;
        config.validate()?;
        Ok(config)
    }
}

/// Logs go to stderr so verbose trace output on stdout stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<SimStats> {
    let config = cli.sim_config()?;
    let geometry = config.geometry;
    info!(
        sets = geometry.num_sets(),
        lines_per_set = geometry.lines_per_set,
        block_size = geometry.block_size(),
        capacity = geometry.total_bytes(),
        trace = %cli.trace.display(),
        "starting simulation"
    );

    let stdout = io::stdout();
    let stats = simulate_file(&config, &cli.trace, BufWriter::new(stdout.lock()))?;

    if let Some(path) = &cli.results {
        stats.write_results(path)?;
        debug!(path = %path.display(), "results written");
    }
    info!(
        accesses = stats.accesses(),
        hit_rate = format_args!("{:.2}%", stats.hit_rate() * 100.0),
        instruction_fetches = stats.instruction_fetches,
        unknown_records = stats.unknown_records,
        "simulation finished"
    );
    Ok(stats)
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(stats) => println!("{}", stats.summary()),
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("    caused by: {cause}");
                source = cause.source();
            }
            process::exit(1);
        }
    }
}
