// shroud/src/logger.rs
//! Logger bootstrap for the `shroud` binary.
//! License: MIT OR Apache-2.0

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `level` sets the default filter; the `RUST_LOG` environment variable
/// always takes precedence so a spawned process can be made verbose without
/// touching its flags. Safe to call more than once.
pub fn init_logger(level: Option<LevelFilter>) {
    let default_filter = level.unwrap_or(LevelFilter::Warn).to_string();
    let env = Env::default().default_filter_or(default_filter);
    let _ = Builder::from_env(env).format_timestamp(None).try_init();
}
