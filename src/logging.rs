//! Console logging.
//!
//! Log lines go to stderr through `env_logger` so they don't mix with the summary printed
//! on stdout. `RUST_LOG` still wins over the `-v`/`-q` flags when it is set.

use anyhow::{Context, Result};
use log::LevelFilter;

/// Map the `-v`/`-q` flags to a level: warnings by default, more with each `-v`
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn builder(level: LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env();
    builder
}

pub fn init(level: LevelFilter) -> Result<()> {
    builder(level)
        .try_init()
        .with_context(|| "Failed to install logger")
}
