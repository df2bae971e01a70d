//! Ninuki GTP engine.
//!
//! Speaks GTP on stdin/stdout so it can be attached to GoGui or driven by
//! regression scripts. Debug messages go to stderr.
//!
//! ## Usage
//!
//! - `ninuki-gtp` - Start the GTP loop on a 7x7 board
//! - `ninuki-gtp --size 9 --seed 42` - Start on 9x9 with reproducible genmove
//! - `ninuki-gtp --debug` - Also log debug messages to stderr

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ninuki_gtp::constants::{DEFAULT_SIZE, MAXSIZE, MINSIZE};
use ninuki_gtp::gtp::GtpEngine;

/// Ninuki: five in a row with pair captures, over GTP
#[derive(Parser)]
#[command(name = "ninuki-gtp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Initial board size
    #[arg(long, default_value_t = DEFAULT_SIZE, value_parser = parse_size)]
    size: usize,

    /// Seed for the move generator
    #[arg(long)]
    seed: Option<u64>,

    /// Write debug messages to stderr
    #[arg(long)]
    debug: bool,
}

fn parse_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (MINSIZE..=MAXSIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!("size must be between {MINSIZE} and {MAXSIZE}"))
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut engine = match cli.seed {
        Some(seed) => GtpEngine::with_seed(cli.size, seed),
        None => GtpEngine::new(cli.size),
    };
    engine.run(io::stdin().lock(), io::stdout().lock())
}
