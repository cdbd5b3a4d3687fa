//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use salescope_config::{LogLevel, SaleScopeConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML or JSON)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Database URL, overriding the configuration
    #[arg(long, value_name = "URL", global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Address to bind to
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,

        /// Port to listen on
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Replace the sales table with the contents of a CSV file
    Seed {
        /// CSV file with the sales export
        #[arg(long, value_name = "PATH")]
        file: PathBuf,

        /// Rows inserted per transaction
        #[arg(long, value_name = "ROWS")]
        batch_size: Option<usize>,
    },

    /// Print the effective configuration as YAML and exit
    PrintConfig,
}

impl Cli {
    /// Subcommand to run; `serve` when none is given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve { bind: None, port: None })
    }

    /// Apply command-line overrides on top of file and environment values
    pub fn apply_overrides(&self, config: &mut SaleScopeConfig) {
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }

        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }

        match &self.command {
            Some(Commands::Serve { bind, port }) => {
                if let Some(bind) = bind {
                    config.server.bind_address = bind.clone();
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
            }
            Some(Commands::Seed {
                batch_size: Some(batch_size),
                ..
            }) => {
                config.import.batch_size = *batch_size;
            }
            _ => {}
        }
    }
}
