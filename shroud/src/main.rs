// shroud/src/main.rs
//! Shroud entry point.
//!
//! Parses the command line, initializes logging, and dispatches to the
//! requested command.

use anyhow::Result;
use clap::Parser;

use shroud::cli::{Cli, Commands};
use shroud::commands;
use shroud::logger;

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    log::info!("shroud started. Version: {}", env!("CARGO_PKG_VERSION"));

    match &args.command {
        Commands::Mask(cmd) => commands::mask::run(cmd),
        Commands::Scan(cmd) => commands::scan::run(cmd),
    }
}
