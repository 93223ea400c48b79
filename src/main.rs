use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use ginkgo_docs::{DocsConfig, LoaderSettings, OutputFormat};

#[derive(Parser)]
#[command(name = "ginkgo-docs")]
#[command(about = "Documentation build configuration for Ginkgo")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Location of the documentation configuration file
    #[arg(short, long, default_value = "doc/conf.py")]
    conf: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the configuration and print it
    Show {
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// List documentation sources admitted by the exclude patterns
    Sources {
        /// Source directory (defaults to the configuration file's directory)
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let conf_dir = cli
        .conf
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let settings = LoaderSettings::load(conf_dir).context("Failed to load loader settings")?;

    let config = DocsConfig::load(&cli.conf, &settings)
        .await
        .with_context(|| format!("Failed to load configuration for {}", cli.conf.display()))?;
    config.validate()?;

    match cli.command {
        Commands::Show { format } => {
            println!("{}", config.render(format)?);
        }
        Commands::Sources { dir } => {
            let dir = dir.unwrap_or_else(|| conf_dir.to_path_buf());
            let files = config
                .source_documents(&dir)
                .with_context(|| format!("Failed to scan {}", dir.display()))?;
            info!("Found {} source documents", files.len());
            for file in files {
                println!("{}", file.display());
            }
        }
    }

    Ok(())
}
