use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameView {
    #[default]
    MainMenu,
    Drill {
        paused: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameViewEvent {
    StartGame,
    TogglePause,
    /// Pauses a running drill; no-op elsewhere.
    Pause,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameViewEffect {
    None,
    ResetSession,
    CloseSession,
}

impl GameView {
    /// Pure transition function for the screen state machine.
    ///
    /// Session side effects are reported as `GameViewEffect` and applied by the caller.
    pub fn handle(self, event: GameViewEvent) -> (GameView, GameViewEffect) {
        match (self, event) {
            (GameView::MainMenu, GameViewEvent::StartGame) => {
                (GameView::Drill { paused: false }, GameViewEffect::ResetSession)
            }
            (GameView::Drill { paused }, GameViewEvent::TogglePause) => {
                (GameView::Drill { paused: !paused }, GameViewEffect::None)
            }
            (GameView::Drill { .. }, GameViewEvent::Pause) => {
                (GameView::Drill { paused: true }, GameViewEffect::None)
            }
            (GameView::Drill { .. }, GameViewEvent::Back) => {
                (GameView::MainMenu, GameViewEffect::CloseSession)
            }

            // Ignore irrelevant events in the current state.
            (state, _) => (state, GameViewEffect::None),
        }
    }

    pub fn is_drill(self) -> bool {
        matches!(self, GameView::Drill { .. })
    }

    /// The countdown only runs in this state.
    pub fn is_drill_running(self) -> bool {
        matches!(self, GameView::Drill { paused: false })
    }
}
