//! CardVault - replay scan sessions against a photo folder

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::task::LocalSet;

use cardvault::app::{Runtime, Script, script};
use cardvault::features::Settings;
use cardvault::media::{FolderCapture, LocalLibrary};

#[derive(Parser)]
#[command(name = "cardvault")]
#[command(version)]
#[command(about = "Capture sheet engine for the CardVault scanner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replays a JSON script of user steps and prints where the session ended
    Replay {
        /// Script file
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
        /// Folder of photos to use as the library
        #[arg(long)]
        library: PathBuf,
        /// Image the camera "takes" on capture
        #[arg(long)]
        capture_source: Option<PathBuf>,
        /// Settings file (defaults to the user config)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Prints the effective settings
    Settings {
        /// Settings file (defaults to the user config)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Also write them to the user config file
        #[arg(long)]
        save: bool,
    },
}

fn main() {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay {
            script,
            library,
            capture_source,
            settings,
        } => {
            let settings = load_settings(settings.as_deref())?;
            let script = Script::load_from_file(&script)?;
            let library = LocalLibrary::new(library);
            let camera = FolderCapture::new(capture_source);

            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            let report = rt.block_on(LocalSet::new().run_until(async {
                let mut runtime = Runtime::new(&settings, library, camera);
                script::play(&mut runtime, &script).await
            }))?;

            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Settings { settings, save } => {
            let settings = load_settings(settings.as_deref())?;
            if save {
                settings.save().context("Failed to save settings")?;
                if let Some(path) = Settings::file_path() {
                    tracing::info!("Saved settings to {}", path.display());
                }
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Settings::load()),
    }
}
