//! All game entity types: pure data, no logic.
//!
//! Positions are top-left corners in canvas pixel space (floats).
//! Health, shield, damage and ammo are unsigned and only ever change through
//! saturating arithmetic, so they clamp at zero.

use crate::config::GameConfig;

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Bounding boxes ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Axis-aligned overlap: each min-edge strictly below the other's
    /// max-edge, on both axes. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Anything that occupies a square on the canvas.
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

pub fn collides(a: &impl Bounds, b: &impl Bounds) -> bool {
    a.bounds().overlaps(&b.bounds())
}

macro_rules! square_bounds {
    ($($ty:ty),*) => {
        $(impl Bounds for $ty {
            fn bounds(&self) -> Rect {
                Rect { x: self.x, y: self.y, w: self.size, h: self.size }
            }
        })*
    };
}

square_bounds!(Player, Bullet, Enemy, AmmoBox);

// ── Player & weapon ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    /// 0–100. The session ends when this reaches 0.
    pub health: u32,
    /// 0–100. Absorbs damage before health does.
    pub shield: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub damage: u32,
    pub fire_rate_ms: u64,
    pub bullet_speed: f32,
    pub bullet_size: f32,
    pub ammo: u32,
    pub max_ammo: u32,
}

// ── Projectiles & pickups ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Pixels travelled upward per frame.
    pub speed: f32,
    pub damage: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub health: u32,
    /// Contact damage.
    pub damage: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AmmoBox {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Circular safe zone. Outside `radius` the player takes `damage` per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Storm {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub shrink_rate: f32,
    pub damage: u32,
}

impl Storm {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (x - self.center_x).hypot(y - self.center_y) <= self.radius
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so the pure update function can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub weapon: Weapon,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub ammo_boxes: Vec<AmmoBox>,
    /// `None` when the active rules have no storm.
    pub storm: Option<Storm>,
    /// Enemies destroyed by bullets this session.
    pub kill_streak: u32,
    /// Clock time of the last shot, for the fire-rate cooldown.
    pub last_shot_ms: Option<u64>,
    pub status: GameStatus,
    pub frame: u64,
    /// Canvas size in pixels.
    pub width: f32,
    pub height: f32,
    pub config: GameConfig,
}
