//! Fixed-interval spawning of enemies and ammo boxes.
//!
//! The two timers are independent of each other and of the frame rate: they
//! accumulate wall-clock milliseconds and fire once per elapsed period.
//! All randomness comes through an injected `Rng`.

use rand::Rng;

use crate::entities::{AmmoBox, Enemy, GameState, GameStatus};

#[derive(Clone, Debug, PartialEq)]
pub struct IntervalTimer {
    pub period_ms: u64,
    pub elapsed_ms: u64,
}

impl IntervalTimer {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0,
        }
    }

    /// Add `dt_ms` and return how many whole periods completed.
    /// A zero period never fires.
    pub fn advance(&mut self, dt_ms: u64) -> u32 {
        if self.period_ms == 0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let fired = self.elapsed_ms / self.period_ms;
        self.elapsed_ms %= self.period_ms;
        fired as u32
    }
}

fn random_offset(rng: &mut impl Rng, span: f32) -> f32 {
    if span > 0.0 {
        rng.gen_range(0.0..span)
    } else {
        0.0
    }
}

/// Append one enemy at a random position (top edge if the rules say so).
pub fn spawn_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    let rules = &state.config.enemy;
    let x = random_offset(rng, state.width - rules.size);
    let y = if rules.spawn_at_top {
        0.0
    } else {
        random_offset(rng, state.height - rules.size)
    };
    log::debug!("Enemy spawned at ({x:.0}, {y:.0})");
    let mut enemies = state.enemies.clone();
    enemies.push(Enemy {
        x,
        y,
        size: rules.size,
        speed: rules.speed,
        health: rules.health,
        damage: rules.damage,
    });
    GameState {
        enemies,
        ..state.clone()
    }
}

pub fn spawn_ammo_box(state: &GameState, rng: &mut impl Rng) -> GameState {
    let size = state.config.ammo.size;
    let x = random_offset(rng, state.width - size);
    let y = random_offset(rng, state.height - size);
    log::debug!("Ammo box spawned at ({x:.0}, {y:.0})");
    let mut ammo_boxes = state.ammo_boxes.clone();
    ammo_boxes.push(AmmoBox { x, y, size });
    GameState {
        ammo_boxes,
        ..state.clone()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spawner {
    pub enemy_timer: IntervalTimer,
    pub ammo_timer: IntervalTimer,
}

impl Spawner {
    pub fn new(state: &GameState) -> Self {
        Self {
            enemy_timer: IntervalTimer::new(state.config.enemy.spawn_interval_ms),
            ammo_timer: IntervalTimer::new(state.config.ammo.spawn_interval_ms),
        }
    }

    /// Advance both timers by `dt_ms` and spawn whatever came due.
    /// Optional caps from the config are honoured; without them the lists
    /// grow without bound.
    pub fn update(&mut self, state: &GameState, dt_ms: u64, rng: &mut impl Rng) -> GameState {
        let enemy_due = self.enemy_timer.advance(dt_ms);
        let ammo_due = self.ammo_timer.advance(dt_ms);
        if state.status == GameStatus::GameOver {
            return state.clone();
        }

        let mut next = state.clone();
        let enemy_cap = state.config.enemy.max_enemies.unwrap_or(usize::MAX);
        for _ in 0..enemy_due {
            if next.enemies.len() >= enemy_cap {
                break;
            }
            next = spawn_enemy(&next, rng);
        }
        let ammo_cap = state.config.ammo.max_ammo_boxes.unwrap_or(usize::MAX);
        for _ in 0..ammo_due {
            if next.ammo_boxes.len() >= ammo_cap {
                break;
            }
            next = spawn_ammo_box(&next, rng);
        }
        next
    }
}
