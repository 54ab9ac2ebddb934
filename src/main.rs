//! clipbatch - batch video clipper
//!
//! Downloads a video (or takes a local one) and cuts every requested time
//! range out of it with ffmpeg stream copy.
//!
//! # Usage
//!
//! ```bash
//! clipbatch run --url "https://youtu.be/..." --quality 720p --output-dir clips \
//!     --clip 00:00:10,00:00:20,intro --clip 00:05:00,00:05:30,goal
//! clipbatch run --file talk.mp4 --output-dir clips --clips clips.toml --format mkv
//! clipbatch probe --file talk.mp4
//! clipbatch check
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use clipbatch::app::DefaultAppContainer;
use clipbatch::cli::{commands, Cli, Commands};
use clipbatch::config_initialization::initialize_configuration;
use clipbatch::utils::logging::init_logging;

/// Main entry point for the clipbatch CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let loaded = initialize_configuration(&cli)?;
    init_logging(&loaded.config.logging.level, loaded.config.logging.json);

    info!("Starting clipbatch {}", env!("CARGO_PKG_VERSION"));
    loaded.log_sources();
    let config = loaded.config;
    debug!(?config, "Effective configuration");

    let container = DefaultAppContainer::new(config.tools.clone());

    // Execute the requested command
    match &cli.command {
        Commands::Run(args) => {
            info!("Executing run command");
            commands::run(&container, &config, args).await?;
        }
        Commands::Probe(args) => {
            info!("Executing probe command");
            commands::probe(&container, args).await?;
        }
        Commands::Check(args) => {
            info!("Executing check command");
            commands::check(&container, args).await?;
        }
    }

    Ok(())
}
