//! CLI command implementations
//!
//! Both commands resolve configuration the same way: the optional JSON file
//! first, then command line overrides, then validation.

use std::sync::Arc;

use serde::Serialize;

use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::init_tracing;
use crate::products::{seed, FileStore, MemoryStore, ProductStore, StoreResult};

use super::args::{Cli, Command, ConfigArgs};
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Summary printed by `seed`
#[derive(Debug, Serialize)]
struct SeedReport {
    seeded: usize,
    total: usize,
    data_file: String,
}

/// Entry point used by main
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            seed,
        } => serve(&config, host, port, seed),
        Command::Seed { config, count } => seed_products(&config, count),
    }
}

/// Load the config file (if any) and apply command line overrides
pub fn resolve_config(
    args: &ConfigArgs,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_file) = &args.data_file {
        config.data_file = Some(data_file.clone());
    }

    config.validate()?;
    Ok(config)
}

/// File-backed store when a data file is configured, memory otherwise
pub fn open_store(config: &ServerConfig) -> StoreResult<Arc<dyn ProductStore>> {
    match &config.data_file {
        Some(path) => Ok(Arc::new(FileStore::open(path)?)),
        None => Ok(Arc::new(MemoryStore::new())),
    }
}

/// Insert `count` random products in a single store mutation
fn insert_random(store: &dyn ProductStore, count: usize) -> CliResult<usize> {
    let mut rng = rand::thread_rng();
    let inserted = store.insert_many(seed::random_products(&mut rng, count))?;
    Ok(inserted.len())
}

/// Run the HTTP server until Ctrl-C
pub fn serve(
    args: &ConfigArgs,
    host: Option<String>,
    port: Option<u16>,
    seed_count: usize,
) -> CliResult<()> {
    let config = resolve_config(args, host, port)?;
    init_tracing(&config.log_filter);

    let store = open_store(&config)?;
    match &config.data_file {
        Some(path) => {
            tracing::info!(path = %path.display(), products = store.len()?, "opened data file")
        }
        None => tracing::info!("no data file configured, products are kept in memory"),
    }

    if seed_count > 0 {
        insert_random(store.as_ref(), seed_count)?;
        tracing::info!(count = seed_count, "seeded random products");
    }

    let server = HttpServer::with_config(config, store);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server.start())?;

    Ok(())
}

/// Append random products to the configured data file
pub fn seed_products(args: &ConfigArgs, count: usize) -> CliResult<()> {
    let config = resolve_config(args, None, None)?;
    init_tracing(&config.log_filter);

    let path = config.data_file.clone().ok_or(CliError::MissingDataFile)?;
    let store = FileStore::open(&path)?;

    let seeded = insert_random(&store, count)?;
    tracing::info!(count = seeded, path = %path.display(), "seeded random products");

    write_json(&SeedReport {
        seeded,
        total: store.len()?,
        data_file: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_defaults() {
        let config = resolve_config(&ConfigArgs::default(), None, None).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_overrides_beat_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        fs::write(&path, r#"{"host": "0.0.0.0", "port": 9000, "data_file": "a.json"}"#).unwrap();

        let args = ConfigArgs {
            config: Some(path),
            data_file: Some(PathBuf::from("b.json")),
        };
        let config = resolve_config(&args, None, Some(9100)).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9100);
        assert_eq!(config.data_file, Some(PathBuf::from("b.json")));
    }

    #[test]
    fn test_open_store_without_data_file_is_memory() {
        let store = open_store(&ServerConfig::default()).unwrap();
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn test_seed_requires_data_file() {
        let result = seed_products(&ConfigArgs::default(), 5);
        assert!(matches!(result, Err(CliError::MissingDataFile)));
    }

    #[test]
    fn test_seed_writes_data_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("products.json");
        let args = ConfigArgs {
            config: None,
            data_file: Some(path.clone()),
        };

        seed_products(&args, 7).unwrap();
        seed_products(&args, 3).unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.len().unwrap(), 10);
    }

    #[test]
    fn test_seed_batch_is_one_snapshot_write() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path().join("products.json")).unwrap();

        assert_eq!(insert_random(&store, 2000).unwrap(), 2000);
        assert_eq!(store.snapshot_writes(), 1);
        assert_eq!(store.len().unwrap(), 2000);
    }
}
