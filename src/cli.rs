//! Command line front end

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use wiki_enrich::config::DEFAULT_CONFIG_PATH;
use wiki_enrich::utils::logging::init_logging;
use wiki_enrich::{Config, EnrichError, JsonFileStore, Result, RunController, WikipediaClient};

#[derive(Debug, Parser)]
#[command(name = "wiki-enrich", version, about = "Fill table records with Wikipedia extracts and images")]
pub struct Cli {
    /// Configuration file; missing default file falls back to built-in defaults
    #[arg(
        long,
        short,
        global = true,
        env = "WIKI_ENRICH_CONFIG",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config: PathBuf,

    /// Base file to operate on (overrides table.base_path)
    #[arg(long, global = true)]
    pub base: Option<String>,

    /// Table to enrich (overrides table.name)
    #[arg(long, global = true)]
    pub table: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch summaries for every record and write them back
    Run,
    /// Fetch summaries and print the pending updates without writing
    Preview,
    /// Show whether an update can be triggered
    Status,
}

/// Where the configuration came from
enum ConfigSource {
    File,
    Environment,
}

impl Cli {
    async fn load_config(&self) -> Result<(Config, ConfigSource)> {
        let explicit = self.config != Path::new(DEFAULT_CONFIG_PATH);
        let (mut config, source) = if explicit || self.config.exists() {
            let config = Config::from_file(&self.config).await?.with_env_overrides()?;
            (config, ConfigSource::File)
        } else {
            (Config::from_env()?, ConfigSource::Environment)
        };

        if let Some(base) = &self.base {
            config.table_mut().base_path = base.clone();
        }
        if let Some(table) = &self.table {
            config.table_mut().name = table.clone();
        }
        if let Some(level) = &self.log_level {
            config.enrich.logging.level = level.clone();
        }
        config.validate()?;
        Ok((config, source))
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Execute the parsed command line
pub async fn execute(cli: Cli) -> Result<()> {
    let (config, source) = cli.load_config().await?;
    init_logging(config.logging());
    match source {
        ConfigSource::File => info!("Loaded configuration from {}", cli.config.display()),
        ConfigSource::Environment => warn!(
            "Configuration file {} not found, using defaults and environment",
            cli.config.display()
        ),
    }

    let store = Arc::new(JsonFileStore::open(&config.table().base_path).await?);
    info!("Operating on base {}", store.path().display());
    let api = Arc::new(
        WikipediaClient::new(config.summary_api())
            .map_err(|e| EnrichError::config(e.to_string()))?,
    );
    let controller = RunController::from_config(&config, store, api);

    match cli.command {
        Command::Status => print_json(&controller.trigger_view()),
        Command::Preview => print_json(&controller.preview().await?),
        Command::Run => {
            let report = controller.run().await?;
            info!(
                "Updated {} of {} records in '{}'",
                report.records_written,
                report.records_read,
                controller.table()
            );
            print_json(&report)
        }
    }
}
