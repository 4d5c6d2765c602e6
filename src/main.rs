//! RepCoach - replay tool
//!
//! Feeds a recorded landmark stream through the classifier and prints state
//! changes, checkpoints and the final totals as JSON lines.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use repcoach::exercises::ExerciseType;
use repcoach::replay::{open_recording, replay};
use repcoach::session::{CheckpointDispatcher, SessionManager, WorkoutTally};
use repcoach::storage::config::{load_config, load_config_from};

#[derive(Debug, Parser)]
#[command(name = "repcoach", version, about = "Pose-based exercise coaching")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a JSON-lines landmark recording
    Replay {
        /// Recording to read
        file: PathBuf,
        /// Exercise to start with (squat, pushup, situp, plank)
        #[arg(long, short, default_value = "squat")]
        exercise: ExerciseType,
        /// Config file overriding the default location
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print every frame's state, not just changes
        #[arg(long, default_value_t = false)]
        all_frames: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting RepCoach v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Replay {
            file,
            exercise,
            config,
            all_frames,
        } => run_replay(file, exercise, config, all_frames).await,
    }
}

async fn run_replay(
    file: PathBuf,
    exercise: ExerciseType,
    config_path: Option<PathBuf>,
    all_frames: bool,
) -> anyhow::Result<()> {
    let config = match &config_path {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("loading config")?;

    let tally = Arc::new(WorkoutTally::new());
    let dispatcher = CheckpointDispatcher::spawn(Arc::clone(&tally));

    let mut manager =
        SessionManager::from_config(exercise, &config).with_sink(Box::new(dispatcher.sink()));
    let updates = manager.subscribe();

    let frames = open_recording(&file)?;
    let summary = replay(&mut manager, frames)?;
    drop(manager);

    let mut previous = None;
    for state in updates.try_iter() {
        let changed = previous.as_ref().map_or(true, |p: &repcoach::ExerciseState| {
            p.stage != state.stage
                || p.reps != state.reps
                || p.feedback != state.feedback
                || p.whole_hold_secs() != state.whole_hold_secs()
        });
        if all_frames || changed {
            println!("{}", serde_json::to_string(&state)?);
        }
        previous = Some(state);
    }

    for checkpoint in &summary.checkpoints {
        println!("{}", serde_json::to_string(checkpoint)?);
    }

    let stats = dispatcher.shutdown().await;
    tracing::info!(
        frames = summary.frames,
        rejected = summary.rejected,
        delivered = stats.delivered,
        failed = stats.failed,
        "Replay finished"
    );

    let totals: std::collections::BTreeMap<_, _> = tally
        .snapshot()
        .into_iter()
        .map(|(exercise, totals)| (exercise.as_str(), totals))
        .collect();
    println!("{}", serde_json::to_string(&totals)?);

    Ok(())
}
