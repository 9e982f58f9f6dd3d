//! CLI argument definitions using clap
//!
//! Commands:
//! - product-catalog serve [--config <path>] [--host] [--port] [--data-file] [--seed N]
//! - product-catalog seed --count N [--config <path>] [--data-file]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Product catalog service
#[derive(Parser, Debug)]
#[command(name = "product-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON data file; overrides `data_file` from the config
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        #[command(flatten)]
        config: ConfigArgs,

        /// Address to bind; overrides `host` from the config
        #[arg(long)]
        host: Option<String>,

        /// Port to bind; overrides `port` from the config
        #[arg(long)]
        port: Option<u16>,

        /// Insert this many random products before serving
        #[arg(long, default_value_t = 0)]
        seed: usize,
    },

    /// Generate random test products into the data file
    Seed {
        #[command(flatten)]
        config: ConfigArgs,

        /// Number of products to create
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "product-catalog",
            "serve",
            "--port",
            "9000",
            "--seed",
            "50",
            "--data-file",
            "/tmp/products.json",
        ])
        .unwrap();

        match cli.command {
            Command::Serve {
                config,
                port,
                seed,
                host,
            } => {
                assert_eq!(port, Some(9000));
                assert_eq!(seed, 50);
                assert!(host.is_none());
                assert_eq!(config.data_file, Some(PathBuf::from("/tmp/products.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_seed_count_defaults_to_one() {
        let cli = Cli::try_parse_from(["product-catalog", "seed"]).unwrap();
        assert!(matches!(cli.command, Command::Seed { count: 1, .. }));
    }
}
