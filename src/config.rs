//! Gameplay configuration: the three observed rule sets as presets, plus
//! JSON overrides.
//!
//! Every tunable the update step reads lives here; nothing in `compute`
//! hard-codes a number that differs between presets.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Presets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Shrinking storm, homing enemies, free movement, reload on death.
    Storm,
    /// No storm, homing enemies anywhere on screen, movement clamped.
    Arena,
    /// No storm, enemies fall straight down from the top edge.
    Classic,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Storm, Preset::Arena, Preset::Classic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Storm => "storm",
            Preset::Arena => "arena",
            Preset::Classic => "classic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::Storm => "Outrun the shrinking storm",
            Preset::Arena => "Tough shields, no storm",
            Preset::Classic => "Enemies rain from above",
        }
    }

    pub fn config(&self) -> GameConfig {
        match self {
            Preset::Storm => GameConfig {
                preset: Preset::Storm,
                player: PlayerConfig::default(),
                weapon: WeaponConfig::default(),
                enemy: EnemyConfig::default(),
                ammo: AmmoConfig::default(),
                storm: Some(StormConfig::default()),
                clamp_to_bounds: false,
                on_game_over: GameOverAction::Reload,
            },
            Preset::Arena => GameConfig {
                preset: Preset::Arena,
                player: PlayerConfig {
                    shield: 100,
                    ..PlayerConfig::default()
                },
                weapon: WeaponConfig::default(),
                enemy: EnemyConfig {
                    speed: 1.5,
                    health: 20,
                    spawn_at_top: false,
                    ..EnemyConfig::default()
                },
                ammo: AmmoConfig {
                    pickup: AmmoPickup::TopUp(10),
                    ..AmmoConfig::default()
                },
                storm: None,
                clamp_to_bounds: true,
                on_game_over: GameOverAction::Halt,
            },
            Preset::Classic => GameConfig {
                preset: Preset::Classic,
                player: PlayerConfig::default(),
                weapon: WeaponConfig::default(),
                enemy: EnemyConfig {
                    speed: 2.0,
                    health: 20,
                    movement: EnemyMovement::Straight,
                    despawn_offscreen: true,
                    ..EnemyConfig::default()
                },
                ammo: AmmoConfig {
                    pickup: AmmoPickup::TopUp(10),
                    ..AmmoConfig::default()
                },
                storm: None,
                clamp_to_bounds: true,
                on_game_over: GameOverAction::Halt,
            },
        }
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: f32,
    /// Pixels per frame while a direction key is held.
    pub speed: f32,
    pub health: u32,
    pub shield: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: 40.0,
            speed: 5.0,
            health: 100,
            shield: 50,
        }
    }
}

/// The pistol: the only weapon the arena hands out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub damage: u32,
    /// Minimum milliseconds between two shots.
    pub fire_rate_ms: u64,
    pub bullet_speed: f32,
    pub bullet_size: f32,
    pub max_ammo: u32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            damage: 10,
            fire_rate_ms: 300,
            bullet_speed: 8.0,
            bullet_size: 5.0,
            max_ammo: 30,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyMovement {
    /// Steer toward the player's current position.
    Homing,
    /// Fall straight down.
    Straight,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub size: f32,
    pub speed: f32,
    pub health: u32,
    /// Contact damage dealt to the player.
    pub damage: u32,
    pub movement: EnemyMovement,
    pub spawn_at_top: bool,
    pub despawn_offscreen: bool,
    pub spawn_interval_ms: u64,
    pub max_enemies: Option<usize>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            size: 30.0,
            speed: 1.0,
            health: 50,
            damage: 10,
            movement: EnemyMovement::Homing,
            spawn_at_top: true,
            despawn_offscreen: false,
            spawn_interval_ms: 2_000,
            max_enemies: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmmoPickup {
    /// Set ammo straight to the weapon maximum.
    Refill,
    /// Add this many rounds, capped at the weapon maximum.
    TopUp(u32),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmmoConfig {
    pub size: f32,
    pub pickup: AmmoPickup,
    pub spawn_interval_ms: u64,
    pub max_ammo_boxes: Option<usize>,
}

impl Default for AmmoConfig {
    fn default() -> Self {
        Self {
            size: 30.0,
            pickup: AmmoPickup::Refill,
            spawn_interval_ms: 10_000,
            max_ammo_boxes: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StormConfig {
    /// Radius lost per frame, in pixels. 0.02 closes a 1920 px wide
    /// canvas in about 13 minutes at 60 FPS.
    pub shrink_rate: f32,
    /// Health lost per frame while outside the radius.
    pub damage: u32,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            shrink_rate: 0.02,
            damage: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOverAction {
    /// Show the message, wait for a key, then start over.
    Reload,
    /// Show the message and stay there until the player quits.
    Halt,
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub preset: Preset,
    pub player: PlayerConfig,
    pub weapon: WeaponConfig,
    pub enemy: EnemyConfig,
    pub ammo: AmmoConfig,
    pub storm: Option<StormConfig>,
    pub clamp_to_bounds: bool,
    pub on_game_over: GameOverAction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Preset::Storm.config()
    }
}

/// Upper bound for starting health and shield; the HUD bars are drawn
/// against it.
pub const MAX_VITALS: u32 = 100;

/// Overlay `patch` onto `base`, recursing into objects. Any other value,
/// `null` included, replaces what was there.
fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

impl GameConfig {
    /// Load a JSON config. Missing fields fall back to the named preset
    /// (`storm` when none is named).
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let patch: Value = serde_json::from_str(text)?;
        let preset = match patch.get("preset") {
            Some(name) => Preset::deserialize(name).context("unknown preset")?,
            None => Preset::Storm,
        };
        let mut merged = serde_json::to_value(preset.config())?;
        merge(&mut merged, patch);
        let config: GameConfig = serde_json::from_value(merged)?;
        config.validate()?;
        log::info!(
            "Loaded config (preset {}, storm {})",
            config.preset.as_str(),
            if config.storm.is_some() { "on" } else { "off" }
        );
        Ok(config)
    }

    /// Reject values the game cannot represent.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.player.health > MAX_VITALS {
            bail!(
                "player.health must be at most {MAX_VITALS}, got {}",
                self.player.health
            );
        }
        if self.player.shield > MAX_VITALS {
            bail!(
                "player.shield must be at most {MAX_VITALS}, got {}",
                self.player.shield
            );
        }
        Ok(())
    }
}
