//! CLI module for the product catalog
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP API
//! - seed: Fill the data file with random products

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ConfigArgs};
pub use commands::{open_store, resolve_config, run, run_command, seed_products, serve};
pub use errors::{CliError, CliResult};
pub use io::write_json;
