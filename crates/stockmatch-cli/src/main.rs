mod analyze;
mod ingest;
mod output;
mod stores;
mod walk;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stockmatch")]
#[command(about = "Match pharmacy dead stock against usage at sibling stores")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Report file format for `analyze --output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum ReportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ingest store folders, match dead stock across stores and print per-store totals
    Analyze {
        /// Upload roots; each one is ingested as a separate batch, in order
        #[arg(required = true)]
        roots: Vec<PathBuf>,

        /// Write the relocation report to this file
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Report file format
        #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,

        /// YAML extraction rules (overrides `STOCKMATCH_RULES_PATH`)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Ingest store folders and list what was found for each store
    Stores {
        #[arg(required = true)]
        roots: Vec<PathBuf>,

        /// YAML extraction rules (overrides `STOCKMATCH_RULES_PATH`)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = stockmatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            roots,
            output,
            format,
            rules,
        } => {
            analyze::run_analyze(&config, &roots, rules.as_deref(), output.as_deref(), format)
                .await?;
        }
        Commands::Stores { roots, rules } => {
            stores::run_stores(&config, &roots, rules.as_deref()).await?;
        }
    }

    Ok(())
}
