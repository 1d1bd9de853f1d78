//! Sketchpad command line entry point.

use clap::{Parser, Subcommand};
use sketchpad_app::{ScriptError, Session, describe_scene, parse_script};
use sketchpad_core::{Canvas, CanvasConfig, CanvasError, FileStorage, Shape, StorageError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Config(serde_json::Error),
    #[error("Failed to encode shapes: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Parser)]
#[command(name = "sketchpad", version, about = "Line and rectangle drawing surface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Replay an input script against a fresh canvas")]
    Run {
        #[arg(help = "Script file, one command per line")]
        script: PathBuf,

        #[arg(help = "JSON canvas configuration", long)]
        config: Option<PathBuf>,
    },

    #[command(about = "Print the shapes stored in a drawing")]
    Inspect {
        #[arg(help = "Drawing XML file")]
        file: PathBuf,

        #[arg(help = "Print shapes as JSON", long, default_value_t = false)]
        json: bool,
    },
}

fn read(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn run_script(script: &Path, config: Option<&Path>) -> Result<bool, AppError> {
    let config = match config {
        Some(path) => CanvasConfig::from_json(&read(path)?).map_err(AppError::Config)?,
        None => CanvasConfig::default(),
    };
    let commands = parse_script(&read(script)?)?;
    log::info!("replaying {} commands from {}", commands.len(), script.display());

    let mut session = Session::new(Canvas::with_config(config), FileStorage::new(".")?);
    for line in session.run(&commands) {
        println!("{line}");
    }
    Ok(!session.has_errors())
}

fn inspect(file: &Path, json: bool) -> Result<(), AppError> {
    let storage = FileStorage::new(".")?;
    let mut canvas = Canvas::new();
    let key = file.to_string_lossy();
    canvas.load(&storage, &key)?;

    if json {
        let shapes: Vec<&Shape> = canvas.registry().all().collect();
        println!("{}", serde_json::to_string_pretty(&shapes)?);
    } else {
        for line in describe_scene(&canvas) {
            println!("{line}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { script, config } => run_script(&script, config.as_deref()),
        Commands::Inspect { file, json } => inspect(&file, json).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
