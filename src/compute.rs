//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` and returns a brand-new `GameState`.  Time comes in as a
//! millisecond clock reading, so a test can replay any frame exactly.

use crate::config::{AmmoPickup, EnemyMovement, GameConfig};
use crate::entities::{
    collides, AmmoBox, Bullet, Enemy, GameState, GameStatus, Player, Storm, Weapon,
};
use crate::input::FrameInput;

/// How far above the bottom edge the player starts.
const PLAYER_START_OFFSET: f32 = 100.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a rule set and canvas size (pixels).
pub fn init_state(config: &GameConfig, width: f32, height: f32) -> GameState {
    let p = &config.player;
    let w = &config.weapon;
    GameState {
        player: Player {
            x: (width - p.size) / 2.0,
            y: (height - PLAYER_START_OFFSET).max(0.0),
            size: p.size,
            speed: p.speed,
            health: p.health,
            shield: p.shield,
        },
        weapon: Weapon {
            damage: w.damage,
            fire_rate_ms: w.fire_rate_ms,
            bullet_speed: w.bullet_speed,
            bullet_size: w.bullet_size,
            ammo: w.max_ammo,
            max_ammo: w.max_ammo,
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        ammo_boxes: Vec::new(),
        storm: config.storm.as_ref().map(|s| Storm {
            center_x: width / 2.0,
            center_y: height / 2.0,
            radius: width / 2.0,
            shrink_rate: s.shrink_rate,
            damage: s.damage,
        }),
        kill_streak: 0,
        last_shot_ms: None,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
        config: config.clone(),
    }
}

/// Adopt a new canvas size. Entities and the storm stay where they are.
pub fn resize_canvas(state: &GameState, width: f32, height: f32) -> GameState {
    GameState {
        width,
        height,
        ..state.clone()
    }
}

// ── Step helpers ─────────────────────────────────────────────────────────────

/// Apply held direction keys, clamping to the canvas when the rules say so.
pub fn move_player(state: &GameState, input: &FrameInput) -> GameState {
    let p = &state.player;
    let mut x = p.x;
    let mut y = p.y;
    if input.up {
        y -= p.speed;
    }
    if input.down {
        y += p.speed;
    }
    if input.left {
        x -= p.speed;
    }
    if input.right {
        x += p.speed;
    }
    if state.config.clamp_to_bounds {
        x = x.clamp(0.0, (state.width - p.size).max(0.0));
        y = y.clamp(0.0, (state.height - p.size).max(0.0));
    }
    GameState {
        player: Player { x, y, ..p.clone() },
        ..state.clone()
    }
}

fn cooldown_elapsed(state: &GameState, now_ms: u64) -> bool {
    match state.last_shot_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) > state.weapon.fire_rate_ms,
    }
}

/// Fire one bullet from the muzzle if there is ammo and the cooldown is over.
pub fn try_shoot(state: &GameState, now_ms: u64) -> GameState {
    let weapon = &state.weapon;
    if weapon.ammo == 0 || !cooldown_elapsed(state, now_ms) {
        return state.clone();
    }
    let p = &state.player;
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        x: p.x + p.size / 2.0 - weapon.bullet_size / 2.0,
        y: p.y,
        size: weapon.bullet_size,
        speed: weapon.bullet_speed,
        damage: weapon.damage,
    });
    GameState {
        bullets,
        weapon: Weapon {
            ammo: weapon.ammo - 1,
            ..weapon.clone()
        },
        last_shot_ms: Some(now_ms),
        ..state.clone()
    }
}

/// Shrink the storm and burn the player if their position (top-left
/// corner) lies outside it. Storm damage bypasses the shield.
pub fn advance_storm(state: &GameState) -> GameState {
    let Some(storm) = &state.storm else {
        return state.clone();
    };
    let storm = Storm {
        radius: (storm.radius - storm.shrink_rate.max(0.0)).max(0.0),
        ..storm.clone()
    };
    let player = if storm.contains(state.player.x, state.player.y) {
        state.player.clone()
    } else {
        Player {
            health: state.player.health.saturating_sub(storm.damage),
            ..state.player.clone()
        }
    };
    GameState {
        player,
        storm: Some(storm),
        ..state.clone()
    }
}

/// Shield soaks up damage first; whatever it cannot absorb hits health.
pub fn apply_damage(player: &Player, damage: u32) -> Player {
    let absorbed = damage.min(player.shield);
    Player {
        shield: player.shield - absorbed,
        health: player.health.saturating_sub(damage - absorbed),
        ..player.clone()
    }
}

pub fn pick_up_ammo(weapon: &Weapon, pickup: AmmoPickup) -> Weapon {
    let ammo = match pickup {
        AmmoPickup::Refill => weapon.max_ammo,
        AmmoPickup::TopUp(rounds) => weapon.ammo.saturating_add(rounds).min(weapon.max_ammo),
    };
    Weapon {
        ammo,
        ..weapon.clone()
    }
}

fn step_enemy(enemy: &Enemy, target: &Player, movement: EnemyMovement) -> Enemy {
    match movement {
        EnemyMovement::Homing => {
            let angle = (target.y - enemy.y).atan2(target.x - enemy.x);
            Enemy {
                x: enemy.x + angle.cos() * enemy.speed,
                y: enemy.y + angle.sin() * enemy.speed,
                ..enemy.clone()
            }
        }
        EnemyMovement::Straight => Enemy {
            y: enemy.y + enemy.speed,
            ..enemy.clone()
        },
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Order: movement, shooting, storm, bullets, enemies, bullet hits, enemy
/// contact, ammo pickups. A finished game is returned untouched.
pub fn tick(state: &GameState, input: &FrameInput, now_ms: u64) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    // ── 1. Player movement & shooting ────────────────────────────────────────
    let mut next = move_player(state, input);
    if input.fire {
        next = try_shoot(&next, now_ms);
    }

    // ── 2. Storm ─────────────────────────────────────────────────────────────
    let next = advance_storm(&next);

    // ── 3. Move bullets, dropping those that leave the top ──────────────────
    let bullets: Vec<Bullet> = next
        .bullets
        .iter()
        .filter_map(|b| {
            let y = b.y - b.speed;
            (y > 0.0).then(|| Bullet { y, ..b.clone() })
        })
        .collect();

    // ── 4. Move enemies ──────────────────────────────────────────────────────
    let rules = &next.config.enemy;
    let mut enemies: Vec<Enemy> = next
        .enemies
        .iter()
        .map(|e| step_enemy(e, &next.player, rules.movement))
        .filter(|e| !rules.despawn_offscreen || e.y <= next.height)
        .collect();

    // ── 5. Collision: bullet ↔ enemy ─────────────────────────────────────────
    // A bullet is spent on the first live enemy it overlaps.
    let mut kills = 0;
    let mut surviving_bullets = Vec::with_capacity(bullets.len());
    for bullet in bullets {
        match enemies
            .iter()
            .position(|e| e.health > 0 && collides(e, &bullet))
        {
            Some(i) => {
                let enemy = &mut enemies[i];
                enemy.health = enemy.health.saturating_sub(bullet.damage);
                if enemy.health == 0 {
                    kills += 1;
                }
            }
            None => surviving_bullets.push(bullet),
        }
    }
    enemies.retain(|e| e.health > 0);

    // ── 6. Collision: enemy ↔ player ─────────────────────────────────────────
    let mut player = next.player.clone();
    let mut surviving_enemies = Vec::with_capacity(enemies.len());
    for enemy in enemies {
        if collides(&enemy, &player) {
            player = apply_damage(&player, enemy.damage);
        } else {
            surviving_enemies.push(enemy);
        }
    }

    // ── 7. Collision: player ↔ ammo box ──────────────────────────────────────
    let mut weapon = next.weapon.clone();
    let ammo_boxes: Vec<AmmoBox> = next
        .ammo_boxes
        .iter()
        .filter(|b| {
            if collides(&player, *b) {
                weapon = pick_up_ammo(&weapon, next.config.ammo.pickup);
                false
            } else {
                true
            }
        })
        .cloned()
        .collect();

    // ── 8. Status ────────────────────────────────────────────────────────────
    let status = if player.health == 0 {
        GameStatus::GameOver
    } else {
        GameStatus::Playing
    };

    GameState {
        player,
        weapon,
        bullets: surviving_bullets,
        enemies: surviving_enemies,
        ammo_boxes,
        kill_streak: next.kill_streak + kills,
        status,
        frame: next.frame + 1,
        ..next
    }
}
