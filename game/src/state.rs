use std::time::Duration;

use engine::clock::FixedStep;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::drill_core::DrillCore;
use crate::drill_ui::DrillBoard;
use crate::input::KeyCommand;
use crate::session::SessionManager;
use crate::settings::GameplaySettings;
use crate::view::{GameView, GameViewEffect, GameViewEvent};

/// Everything the windowed game owns between frames.
///
/// Every new drill is cloned from `prototype` and gets its own seed, drawn from `seeds`.
#[derive(Debug)]
pub struct GameState {
    view: GameView,
    board: DrillBoard,
    sessions: SessionManager,
    ticker: FixedStep,
    prototype: DrillCore,
    gameplay: GameplaySettings,
    seeds: StdRng,
    quit_requested: bool,
}

impl GameState {
    pub fn new(prototype: DrillCore, gameplay: GameplaySettings, seed: u64) -> Self {
        Self {
            view: GameView::default(),
            board: DrillBoard::default(),
            sessions: SessionManager::new(),
            ticker: FixedStep::new(prototype.tuning().tick),
            prototype,
            gameplay,
            seeds: StdRng::seed_from_u64(seed),
            quit_requested: false,
        }
    }

    pub fn view(&self) -> GameView {
        self.view
    }

    pub fn board(&self) -> &DrillBoard {
        &self.board
    }

    pub fn session(&self) -> Option<&DrillCore> {
        self.sessions.get()
    }

    pub fn gameplay(&self) -> &GameplaySettings {
        &self.gameplay
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn handle_view_event(&mut self, event: GameViewEvent) {
        let (next, effect) = self.view.handle(event);
        self.view = next;
        match effect {
            GameViewEffect::None => {}
            GameViewEffect::ResetSession => self.reset_session(),
            GameViewEffect::CloseSession => {
                self.sessions.close();
                self.board = DrillBoard::default();
            }
        }
    }

    pub fn apply_command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Direction(direction) => {
                if !self.view.is_drill_running() {
                    return;
                }
                if let Some(core) = self.sessions.get_mut() {
                    core.submit_input(direction);
                }
                self.pump_events();
            }
            KeyCommand::Start => self.handle_view_event(GameViewEvent::StartGame),
            KeyCommand::TogglePause => self.handle_view_event(GameViewEvent::TogglePause),
            KeyCommand::Back => self.handle_view_event(GameViewEvent::Back),
            KeyCommand::Restart => {
                if self.view.is_drill() {
                    self.view = GameView::Drill { paused: false };
                    self.reset_session();
                }
            }
            KeyCommand::Quit => self.quit_requested = true,
        }
    }

    pub fn on_focus_lost(&mut self) {
        if self.gameplay.auto_pause_on_focus_loss {
            self.handle_view_event(GameViewEvent::Pause);
        }
    }

    /// Feeds wall-clock time into the live drill as whole tick steps. Paused time is dropped.
    pub fn advance(&mut self, dt: Duration) {
        if !self.view.is_drill_running() {
            return;
        }
        let steps = self.ticker.advance(dt);
        if let Some(core) = self.sessions.get_mut() {
            for _ in 0..steps {
                core.tick_step();
            }
        }
        self.pump_events();
    }

    fn reset_session(&mut self) {
        let seed = self.seeds.r#gen::<u64>();
        let mut core = self.prototype.clone().with_seed(seed);
        core.start_round();

        self.board = DrillBoard::default();
        self.board.apply_all(&core.take_events());
        self.sessions.replace(core);
        self.ticker.reset();
        tracing::info!(seed, "drill session started");
    }

    fn pump_events(&mut self) {
        if let Some(core) = self.sessions.get_mut() {
            for event in core.take_events() {
                self.board.apply(&event);
            }
        }
    }
}
