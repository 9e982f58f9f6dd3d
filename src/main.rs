//! Product catalog entry point
//!
//! Parses arguments, runs the command, prints errors to stderr and exits
//! non-zero on failure. All logic lives in the CLI module.

use product_catalog::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} ({})", e, e.code());
        std::process::exit(1);
    }
}
