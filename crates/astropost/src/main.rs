// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Astropost - scheduled astrology content bot for Telegram channels.
//!
//! This is the binary entry point for the Astropost agent.

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Astropost - scheduled astrology content bot for Telegram channels.
#[derive(Parser, Debug)]
#[command(name = "astropost", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file, bypassing the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the posting agent (the default).
    Serve,
    /// Load the configuration, report problems, and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => astropost_config::load_and_validate_path(path),
        None => astropost_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            astropost_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::CheckConfig) => {
            if let Err(errors) = astropost_config::require_runtime_settings(&config) {
                astropost_config::render_errors(&errors);
                std::process::exit(1);
            }
            println!("astropost: configuration ok (agent.name={})", config.agent.name);
        }
        Some(Commands::Serve) | None => {
            if let Err(errors) = astropost_config::require_runtime_settings(&config) {
                astropost_config::render_errors(&errors);
                std::process::exit(1);
            }
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("astropost: {e}");
                std::process::exit(1);
            }
        }
    }
}
