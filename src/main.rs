//! Command-line driver: replays a recorded intent script and prints the scene

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use diagram_scene::{Editor, Intent, Result, SceneConfig, SceneError};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "diagram-scene", version, about = "Diagram scene engine")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a JSON array of intents to an empty scene and print the result
    Replay {
        /// Intent script (.json)
        script: PathBuf,

        /// Scene config JSON file
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,

        /// Pretty-print the snapshot
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    env_logger::init();
    if let Err(err) = run(Args::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Replay {
            script,
            config,
            pretty,
        } => replay(&script, config.as_deref(), pretty),
    }
}

fn replay(script: &Path, config: Option<&Path>, pretty: bool) -> Result<()> {
    let config = match config {
        Some(path) => SceneConfig::from_path(path)?,
        None => SceneConfig::default(),
    };
    let content = std::fs::read_to_string(script)
        .map_err(|e| SceneError::Script(format!("failed to read {}: {}", script.display(), e)))?;
    let intents = Intent::parse_script(&content)?;

    let mut editor = Editor::new(config);
    let mut rejected = 0;
    for (index, intent) in intents.iter().enumerate() {
        // Intents never abort the session; a failed one leaves the scene as it was.
        if let Err(err) = editor.apply(intent) {
            warn!("Intent #{} ({:?}) failed: {}", index, intent, err);
            rejected += 1;
        }
    }
    info!("Replayed {} intents, {} rejected", intents.len(), rejected);

    println!("{}", editor.snapshot().to_json(pretty)?);
    Ok(())
}
