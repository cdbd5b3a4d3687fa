//! SaleScope Server Binary

use anyhow::{Context, Result};
use clap::Parser;

use salescope_config::{ConfigLoader, SaleScopeConfig};
use salescope_server::{run_seed, Cli, Commands, Server};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if cli.command() == Commands::PrintConfig {
        println!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let _logging_guard = salescope_logging::init_logging_from_config(&config.logging)?;

    match cli.command() {
        Commands::Serve { .. } => {
            let server = Server::new(config).await?;
            server.start().await
        }
        Commands::Seed { file, .. } => {
            let summary = run_seed(&config, &file).await?;
            println!(
                "Seeded {} sales in {} batches ({} duplicate ids skipped)",
                summary.inserted, summary.batches, summary.skipped_duplicates
            );
            Ok(())
        }
        Commands::PrintConfig => Ok(()),
    }
}

/// File (if given), then `SALESCOPE_*` variables, then command-line flags
fn load_config(cli: &Cli) -> Result<SaleScopeConfig> {
    let mut config = ConfigLoader::new()
        .load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    cli.apply_overrides(&mut config);
    config.validate_all().context("Invalid configuration")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_environment() {
        temp_env::with_vars(
            [
                ("SALESCOPE_SERVER_PORT", Some("6001")),
                ("SALESCOPE_DATABASE_URL", Some("sqlite://from-env.db")),
            ],
            || {
                let cli = Cli::try_parse_from(["salescope-server", "serve", "--port", "7000"]).unwrap();
                let config = load_config(&cli).unwrap();
                assert_eq!(config.server.port, 7000);
                assert_eq!(config.database.url, "sqlite://from-env.db");
            },
        );
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = Cli::try_parse_from(["salescope-server", "seed", "--file", "x.csv", "--batch-size", "0"]).unwrap();
        assert!(load_config(&cli).is_err());
    }
}
