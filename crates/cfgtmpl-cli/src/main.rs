use anyhow::Result;
use cfgtmpl_cli::{diff, load_config, render_difference, render_resolved, resolve, Snapshot};
use cfgtmpl_update::UpdateConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cfgtmpl", version, about = "Template macro inheritance and difference engine")]
struct Cli {
    /// TOML file with the update configuration (macro limits, required role)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show direct and inherited macros of the snapshot's object
    Resolve {
        /// Snapshot file (.json, .yaml or .yml)
        snapshot: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the ordered difference for the snapshot's requested macros
    Diff {
        /// Snapshot file (.json, .yaml or .yml)
        snapshot: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            load_config(path)?
        }
        None => UpdateConfig::default(),
    };

    match cli.command {
        Commands::Resolve { snapshot, json } => {
            let snapshot = Snapshot::load(&snapshot)?;
            let resolved = resolve(&snapshot, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                print!("{}", render_resolved(&resolved));
            }
        }
        Commands::Diff { snapshot, json } => {
            let snapshot = Snapshot::load(&snapshot)?;
            let difference = diff(&snapshot, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&difference)?);
            } else {
                print!("{}", render_difference(&difference));
            }
        }
    }

    Ok(())
}
