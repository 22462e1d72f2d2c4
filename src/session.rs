//! Loop driver: owns the state between frames.
//!
//! The host calls `advance` once per frame while it gets `Running` back.
//! Player death produces `JustEnded` exactly once; after that the session is
//! frozen and every call returns `Over` without touching the state.

use rand::Rng;

use crate::compute::{init_state, resize_canvas, tick};
use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus};
use crate::input::FrameInput;
use crate::spawner::Spawner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Running,
    JustEnded,
    Over,
}

impl FrameOutcome {
    /// Whether the host should redraw after this frame.  A finished game is
    /// static, so it only needs a redraw when the canvas changed size.
    pub fn needs_redraw(self, resized: bool) -> bool {
        match self {
            FrameOutcome::Running | FrameOutcome::JustEnded => true,
            FrameOutcome::Over => resized,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    state: GameState,
    spawner: Spawner,
    clock_ms: u64,
}

impl Session {
    pub fn new(config: &GameConfig, width: f32, height: f32) -> Self {
        let state = init_state(config, width, height);
        let spawner = Spawner::new(&state);
        Self {
            state,
            spawner,
            clock_ms: 0,
        }
    }

    /// Wrap an existing state, e.g. one arranged by a test.
    pub fn from_state(state: GameState) -> Self {
        let spawner = Spawner::new(&state);
        Self {
            state,
            spawner,
            clock_ms: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn is_over(&self) -> bool {
        self.state.status == GameStatus::GameOver
    }

    pub fn advance(&mut self, input: &FrameInput, dt_ms: u64, rng: &mut impl Rng) -> FrameOutcome {
        if self.is_over() {
            return FrameOutcome::Over;
        }
        self.clock_ms += dt_ms;
        let spawned = self.spawner.update(&self.state, dt_ms, rng);
        self.state = tick(&spawned, input, self.clock_ms);

        if self.is_over() {
            log::info!(
                "Game over after {} frames, kill streak {}",
                self.state.frame,
                self.state.kill_streak
            );
            FrameOutcome::JustEnded
        } else {
            FrameOutcome::Running
        }
    }

    /// Start over with the same rules and canvas size.
    pub fn restart(&mut self) {
        log::info!("Restarting session");
        *self = Session::new(&self.state.config, self.state.width, self.state.height);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        log::info!("Canvas resized to {width}x{height}");
        self.state = resize_canvas(&self.state, width, height);
    }
}
