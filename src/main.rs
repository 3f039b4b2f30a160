//! Jot - a minimal terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! jot notes.txt
//! jot                      # start with an empty document
//! jot --config ./jotrc me.txt
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use jot::app::App;
use jot::settings::{load_settings, settings_path};

/// A minimal terminal text editor
#[derive(Parser, Debug)]
#[command(name = "jot", version, about, long_about = None)]
struct Cli {
    /// File to edit; created on first save if it does not exist
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Use an alternative settings file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(settings_path);
    let settings = match load_settings(&config_path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "settings unreadable, using defaults");
            jot::settings::Settings::default()
        }
    };

    App::new(cli.file)
        .with_settings(settings, config_path)
        .run()
        .context("Application error")
}
