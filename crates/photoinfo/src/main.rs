//! photoinfo CLI - derive field-of-view, GPS and display attributes from photos.
//!
//! # Usage
//!
//! ```bash
//! # Inspect a single photo
//! photoinfo inspect IMG_0001.jpg
//!
//! # Inspect a directory, one JSON object per line
//! photoinfo inspect ./photos/ --format jsonl --output photos.jsonl
//!
//! # Categorized, display-ready tags
//! photoinfo inspect IMG_0001.jpg --view grouped
//!
//! # View configuration
//! photoinfo config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// photoinfo - photo metadata for field-of-view map markers.
#[derive(Parser, Debug)]
#[command(name = "photoinfo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract and derive metadata from photos
    Inspect(cli::inspect::InspectArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match photoinfo_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `photoinfo config path`."
            );
            photoinfo_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("photoinfo v{}", photoinfo_core::VERSION);

    match cli.command {
        Commands::Inspect(args) => cli::inspect::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
