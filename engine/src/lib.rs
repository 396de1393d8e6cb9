pub mod app;
pub mod clock;
pub mod graphics;
pub mod pixels_renderer;
pub mod surface;
pub mod ui;

/// Frame history with a movable cursor.
///
/// Frame numbers are absolute: frame 0 is the initial state even after old frames have been
/// evicted by a retention limit. Recording while rewound drops every frame after the cursor.
#[derive(Debug, Clone)]
pub struct TimeMachine<State> {
    states: Vec<State>,
    /// Absolute number of `states[0]`.
    first: usize,
    cursor: usize,
    limit: Option<usize>,
}

impl<State> TimeMachine<State> {
    pub fn new(initial_state: State) -> Self {
        Self {
            states: vec![initial_state],
            first: 0,
            cursor: 0,
            limit: None,
        }
    }

    /// Keeps at most `limit` frames (at least one), evicting the oldest.
    pub fn with_limit(initial_state: State, limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new(initial_state)
        }
    }

    pub fn frame(&self) -> usize {
        self.first + self.cursor
    }

    /// Oldest frame still held.
    pub fn first_frame(&self) -> usize {
        self.first
    }

    pub fn last_frame(&self) -> usize {
        self.first + self.states.len() - 1
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self) -> &State {
        &self.states[self.cursor]
    }

    pub fn state_at(&self, frame: usize) -> Option<&State> {
        self.states.get(frame.checked_sub(self.first)?)
    }

    /// Retained states, oldest first.
    pub fn history(&self) -> &[State] {
        &self.states
    }

    pub fn can_rewind(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_forward(&self) -> bool {
        self.cursor + 1 < self.states.len()
    }

    pub fn rewind(&mut self, frames: usize) -> usize {
        self.cursor = self.cursor.saturating_sub(frames);
        self.frame()
    }

    pub fn forward(&mut self, frames: usize) -> usize {
        self.seek(self.frame().saturating_add(frames))
    }

    /// Moves the cursor to `frame`, clamped to the retained range.
    pub fn seek(&mut self, frame: usize) -> usize {
        self.cursor = frame.clamp(self.first, self.last_frame()) - self.first;
        self.frame()
    }

    pub fn record(&mut self, state: State) -> usize {
        self.states.truncate(self.cursor + 1);
        self.states.push(state);
        if let Some(limit) = self.limit {
            let excess = self.states.len().saturating_sub(limit);
            if excess > 0 {
                self.states.drain(..excess);
                self.first += excess;
            }
        }
        self.cursor = self.states.len() - 1;
        self.frame()
    }
}

/// Pure step function over an owned state type.
///
/// Implementations must be deterministic for a given `(state, input)` pair so runs can be
/// replayed from the recorded inputs alone.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    timemachine: TimeMachine<G::State>,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let timemachine = TimeMachine::new(game.initial_state());
        Self { game, timemachine }
    }

    /// Runner that only remembers the newest `limit` frames.
    pub fn with_history_limit(game: G, limit: usize) -> Self {
        let timemachine = TimeMachine::with_limit(game.initial_state(), limit);
        Self { game, timemachine }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn frame(&self) -> usize {
        self.timemachine.frame()
    }

    pub fn state(&self) -> &G::State {
        self.timemachine.state()
    }

    pub fn history(&self) -> &[G::State] {
        self.timemachine.history()
    }

    pub fn timemachine(&self) -> &TimeMachine<G::State> {
        &self.timemachine
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        let next_state = self.game.step(self.timemachine.state(), input);
        self.timemachine.record(next_state)
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = G::Input>,
    {
        let mut last_frame = self.frame();
        for input in inputs {
            last_frame = self.step(input);
        }
        last_frame
    }

    /// Throws away the whole history and starts again from `initial_state`. The retention
    /// limit is kept.
    pub fn reset(&mut self) {
        let initial = self.game.initial_state();
        self.timemachine = match self.timemachine.limit {
            Some(limit) => TimeMachine::with_limit(initial, limit),
            None => TimeMachine::new(initial),
        };
    }

    pub fn rewind(&mut self, frames: usize) -> usize {
        self.timemachine.rewind(frames)
    }

    pub fn forward(&mut self, frames: usize) -> usize {
        self.timemachine.forward(frames)
    }

    pub fn seek(&mut self, frame: usize) -> usize {
        self.timemachine.seek(frame)
    }
}
