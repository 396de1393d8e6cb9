use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use engine::HeadlessRunner;
use tracing::info;

use stratagem::direction::glyphs;
use stratagem::drill_core::{DrillSnapshot, DrillTuning};
use stratagem::library::SequenceLibrary;
use stratagem::logic::DrillLogic;
use stratagem::script::parse_script;

/// Plays a drill from a text script, without a window.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for round selection. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Sequence library JSON file. The built-in set is used when omitted.
    #[arg(long)]
    library: Option<PathBuf>,

    /// Direction symbols press, `.` ticks once, `*` presses the expected direction.
    #[arg(long, default_value = "")]
    script: String,

    /// Length of one countdown tick.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Writes the snapshot of every retained frame to this file as JSON.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Keeps only the newest N frames in memory.
    #[arg(long)]
    history: Option<usize>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    stratagem::init_logging("info");

    let library = Arc::new(SequenceLibrary::load_or_standard(args.library.as_deref())?);
    let tuning = DrillTuning {
        tick: Duration::from_millis(args.tick_ms),
        ..DrillTuning::default()
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, entries = library.len(), "headless drill");

    let logic = DrillLogic::new(library, tuning, seed)?;
    let mut runner = match args.history {
        Some(limit) => HeadlessRunner::with_history_limit(logic, limit),
        None => HeadlessRunner::new(logic),
    };
    for step in parse_script(&args.script) {
        let input = step.resolve(runner.state());
        runner.step(input);
    }

    let core = runner.state();
    let stats = core.stats();
    let current = core.round().map(|r| glyphs(r.sequence())).unwrap_or_default();
    println!(
        "frames {} rounds {} completed {} timed_out {} correct {} incorrect {} current {} remaining_ms {}",
        runner.frame(),
        stats.rounds_started,
        stats.rounds_completed,
        stats.rounds_timed_out,
        stats.correct_inputs,
        stats.incorrect_inputs,
        current,
        core.remaining().as_millis(),
    );

    if let Some(path) = args.record {
        let frames: Vec<DrillSnapshot> = runner.history().iter().map(|s| s.snapshot()).collect();
        fs::write(&path, serde_json::to_string_pretty(&frames)?)?;
        info!(path = %path.display(), frames = frames.len(), "recording written");
    }
    Ok(())
}
