use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use engine::app::{AppConfig, AppContext, GameApp, InputFrame, run_game};
use engine::graphics::Renderer2d;
use tracing::{info, warn};
use winit::dpi::PhysicalSize;

use stratagem::drill_core::DrillCore;
use stratagem::drill_ui::{DrillLayout, draw_drill, draw_main_menu, draw_pause_overlay};
use stratagem::input::commands_from_frame;
use stratagem::library::SequenceLibrary;
use stratagem::settings::{GameplaySettings, SettingsStore};
use stratagem::state::GameState;
use stratagem::view::GameView;

#[derive(Parser, Debug)]
#[command(version, about = "Stratagem input drill")]
struct Args {
    /// Seed for round selection. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Sequence library JSON file. Overrides `library_path` from the settings.
    #[arg(long)]
    library: Option<PathBuf>,

    /// Settings file. Defaults to `STRATAGEM_SETTINGS_PATH` or the user config directory.
    #[arg(long)]
    settings: Option<PathBuf>,
}

struct DrillApp {
    prototype: DrillCore,
    gameplay: GameplaySettings,
    seed: u64,
}

impl GameApp for DrillApp {
    type State = GameState;

    fn init_state(&mut self, _ctx: &mut AppContext) -> GameState {
        GameState::new(self.prototype.clone(), self.gameplay, self.seed)
    }

    fn update_state(
        &mut self,
        state: &mut GameState,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    ) {
        if input.focus_lost {
            state.on_focus_lost();
        }
        for command in commands_from_frame(input) {
            state.apply_command(command);
        }
        state.advance(dt);

        if state.quit_requested() {
            ctx.request_exit();
        }
    }

    fn render(&mut self, state: &GameState, gfx: &mut dyn Renderer2d) {
        match state.view() {
            GameView::MainMenu => draw_main_menu(gfx),
            GameView::Drill { paused } => {
                let layout = DrillLayout::compute(gfx.size(), state.board().slots().len());
                draw_drill(gfx, state.board(), &layout, state.gameplay());
                if paused {
                    draw_pause_overlay(gfx);
                }
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    stratagem::init_logging("info");

    let store = args
        .settings
        .map(SettingsStore::new)
        .unwrap_or_else(SettingsStore::from_env);
    let settings = store.load();
    if !store.path().exists() {
        match store.save(&settings) {
            Ok(()) => info!(path = %store.path().display(), "wrote default settings"),
            Err(err) => warn!("{err}"),
        }
    }

    let library_path = args.library.or_else(|| settings.library_path.clone());
    let library = Arc::new(SequenceLibrary::load_or_standard(library_path.as_deref())?);
    let seed = args.seed.unwrap_or_else(rand::random);
    let prototype = DrillCore::new(library, settings.tuning, seed)?;
    info!(seed, entries = prototype.library().len(), "starting drill window");

    let config = AppConfig {
        title: String::from("Stratagem Drill"),
        desired_size: PhysicalSize::new(480, 320),
        ..AppConfig::default()
    };
    run_game(
        config,
        DrillApp {
            prototype,
            gameplay: settings.gameplay,
            seed,
        },
    )?;
    Ok(())
}
