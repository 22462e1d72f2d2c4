//! Storm Arena, a terminal top-down arena shooter.
//!
//! Modules:
//! - `entities`: plain game data
//! - `config`: rule presets and JSON overrides
//! - `compute`: the pure per-frame update step
//! - `spawner`: interval timers that add enemies and ammo boxes
//! - `input`: held-key sampling
//! - `session`: frame driver that stops at the first game over
//! - `display`: crossterm renderer

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod input;
pub mod session;
pub mod spawner;
