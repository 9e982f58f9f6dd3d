//! JSON output for CLI commands
//!
//! Commands that report a result print exactly one JSON object on stdout.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a single JSON line to `writer`
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write a single JSON line to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    write_json_to(&mut io::stdout().lock(), value)
}
