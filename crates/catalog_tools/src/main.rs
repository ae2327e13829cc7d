//! Unit Catalog - Command-line tools

use std::path::{Path, PathBuf};

use catalog_core::classify::Classifier;
use catalog_core::config::CatalogConfig;
use catalog_core::profile::UnitProfile;
use catalog_tools::loader::{load_catalog, scan_icons};
use catalog_tools::validate::validate_data_directory;
use catalog_tools::ToolError;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catalog-tools")]
#[command(about = "Tools for the unit catalog")]
struct Cli {
    /// Catalog configuration file (RON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print classified unit profiles as JSON
    Profiles {
        /// Unit data files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print the search-options JSON embedded in the catalog page
    Options {
        /// Unit data files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Directory of tag icon files
        #[arg(long)]
        icons: Option<PathBuf>,
    },
    /// Validate data files
    Validate {
        /// Path to data directory
        #[arg(default_value = "assets/data")]
        path: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<CatalogConfig, ToolError> {
    match path {
        Some(path) => {
            tracing::info!("Using configuration: {}", path.display());
            Ok(CatalogConfig::load(path)?)
        }
        None => Ok(CatalogConfig::default()),
    }
}

fn run(cli: Cli) -> Result<(), ToolError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Profiles { paths } => {
            let catalog = load_catalog(&Classifier::new(config), &paths)?;
            let profiles: Vec<&UnitProfile> = catalog.iter().collect();
            println!("{}", serde_json::to_string_pretty(&profiles)?);
        }
        Commands::Options { paths, icons } => {
            let icons = match icons {
                Some(dir) => scan_icons(&dir, &config.icon_dir)?,
                None => catalog_core::facets::IconLibrary::default(),
            };
            let catalog = load_catalog(&Classifier::new(config), &paths)?;
            println!("{}", catalog.facet_index(&icons).to_json()?);
        }
        Commands::Validate { path, json } => {
            tracing::info!("Validating data files in: {}", path.display());
            let report = validate_data_directory(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            if !report.is_ok() {
                return Err(ToolError::Invalid {
                    problems: report.problems.len(),
                });
            }
            tracing::info!(
                "Validation passed: {} units in {} files",
                report.unit_count(),
                report.files.len()
            );
        }
    }
    Ok(())
}
