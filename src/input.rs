//! Held-key tracking.
//!
//! Instead of acting on each key event individually, the sampler records the
//! frame of the last press/repeat event for every action.  Each frame the
//! update step reads a `FrameInput` snapshot of which actions are still
//! "fresh" (within `HOLD_WINDOW` frames), so Space + W/A/S/D can be held
//! together.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol etc.): proper
//!   `Press` / `Repeat` / `Release` events → actions drop on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`).  Actions expire after `HOLD_WINDOW` frames of
//!   silence.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEventKind};

/// An action counts as held if its last press/repeat arrived within this
/// many frames.  8 frames @ 60 FPS ≈ 133 ms, shorter than any OS repeat gap
/// once repeating has started.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Map a terminal key to a gameplay action. Unrecognised keys are `None`.
pub fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Right),
        KeyCode::Char(' ') => Some(Action::Fire),
        _ => None,
    }
}

/// The boolean key set the update step consumes for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

#[derive(Clone, Debug, Default)]
pub struct InputSampler {
    /// Each held action → the frame it was last seen.
    last_seen: HashMap<Action, u64>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action, frame: u64) {
        self.last_seen.insert(action, frame);
    }

    pub fn release(&mut self, action: Action) {
        self.last_seen.remove(&action);
    }

    /// Feed one raw key event. Keys without an action are ignored.
    pub fn handle_key(&mut self, code: KeyCode, kind: KeyEventKind, frame: u64) {
        let Some(action) = action_for(code) else {
            return;
        };
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(action, frame),
            KeyEventKind::Release => self.release(action),
        }
    }

    pub fn is_held(&self, action: Action, frame: u64) -> bool {
        self.last_seen
            .get(&action)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn sample(&self, frame: u64) -> FrameInput {
        FrameInput {
            up: self.is_held(Action::Up, frame),
            down: self.is_held(Action::Down, frame),
            left: self.is_held(Action::Left, frame),
            right: self.is_held(Action::Right, frame),
            fire: self.is_held(Action::Fire, frame),
        }
    }

    /// Feed one key event that arrives while the game-over screen is up and
    /// report whether it acknowledges that screen.
    ///
    /// Only a fresh press counts: a key still held from play (auto-repeat on
    /// classic terminals) just keeps its hold alive, so the player has to let
    /// go and press again.  Keys without an action are always fresh.
    pub fn acknowledges(&mut self, code: KeyCode, kind: KeyEventKind, frame: u64) -> bool {
        let fresh = action_for(code).map_or(true, |action| !self.is_held(action, frame));
        self.handle_key(code, kind, frame);
        kind == KeyEventKind::Press && fresh
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}
