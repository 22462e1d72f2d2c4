//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only projects
//! canvas-space entities onto terminal cells.
//!
//! Layout: row 0 is the HUD, the last row is the controls hint, everything
//! in between is the playfield.  One cell covers `CELL_WIDTH` x
//! `CELL_HEIGHT` canvas pixels.

pub mod sprite;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::config::{GameOverAction, MAX_VITALS};
use crate::entities::{Bounds, GameState, GameStatus, Rect};

pub use sprite::{Sprite, SpriteSet};

pub const CELL_WIDTH: f32 = 8.0;
pub const CELL_HEIGHT: f32 = 16.0;

/// Rows reserved outside the playfield (HUD + hint).
const CHROME_ROWS: u16 = 2;
const BAR_WIDTH: usize = 10;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STORM: Color = Color::DarkRed;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_AMMO_BOX: Color = Color::Blue;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_SHIELD: Color = Color::Cyan;
const C_HUD_AMMO: Color = Color::Yellow;
const C_HUD_STREAK: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Canvas size in pixels for a terminal of `cols` x `rows` cells.
pub fn canvas_size(cols: u16, rows: u16) -> (f32, f32) {
    (
        cols as f32 * CELL_WIDTH,
        rows.saturating_sub(CHROME_ROWS) as f32 * CELL_HEIGHT,
    )
}

/// Terminal grid implied by the state's canvas.
fn grid(state: &GameState) -> (u16, u16) {
    let cols = (state.width / CELL_WIDTH).round() as u16;
    let rows = (state.height / CELL_HEIGHT).round() as u16 + CHROME_ROWS;
    (cols, rows)
}

/// Terminal cell for a canvas point, or `None` if it falls outside the
/// playfield.
fn cell_at(x: f32, y: f32, cols: u16, rows: u16) -> Option<(u16, u16)> {
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let col = (x / CELL_WIDTH) as u16;
    let row = (y / CELL_HEIGHT) as u16 + 1;
    (col < cols && row < rows.saturating_sub(1)).then_some((col, row))
}

/// A proportional bar, `fraction` clamped to [0, 1].
pub fn bar(fraction: f32, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &SpriteSet,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_storm(out, state)?;
    for b in &state.ammo_boxes {
        fill_rect(out, state, b.bounds(), '▒', C_AMMO_BOX)?;
    }
    for e in &state.enemies {
        draw_actor(out, state, e.bounds(), sprites.enemy.as_ref(), C_ENEMY)?;
    }
    for b in &state.bullets {
        fill_rect(out, state, b.bounds(), '•', C_BULLET)?;
    }
    draw_actor(
        out,
        state,
        state.player.bounds(),
        sprites.player.as_ref(),
        C_PLAYER,
    )?;

    draw_hud(out, state)?;
    draw_controls_hint(out, state)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state)?;
    }

    // Park cursor in a harmless spot and flush
    let (_, rows) = grid(state);
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Storm ─────────────────────────────────────────────────────────────────────

/// The storm boundary as a ring of dots: every playfield cell whose centre
/// lies within half a cell of the radius.
fn draw_storm<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let Some(storm) = &state.storm else {
        return Ok(());
    };
    let (cols, rows) = grid(state);
    out.queue(style::SetForegroundColor(C_STORM))?;
    for row in 1..rows.saturating_sub(1) {
        for col in 0..cols {
            let cx = (col as f32 + 0.5) * CELL_WIDTH;
            let cy = (row as f32 - 0.5) * CELL_HEIGHT;
            let d = (cx - storm.center_x).hypot(cy - storm.center_y);
            if (d - storm.radius).abs() <= CELL_WIDTH / 2.0 {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("·"))?;
            }
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill_rect<W: Write>(
    out: &mut W,
    state: &GameState,
    rect: Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let (cols, rows) = grid(state);
    let wide = ((rect.w / CELL_WIDTH).ceil() as usize).max(1);
    let tall = ((rect.h / CELL_HEIGHT).ceil() as usize).max(1);
    out.queue(style::SetForegroundColor(color))?;
    for dy in 0..tall {
        for dx in 0..wide {
            let x = rect.x + dx as f32 * CELL_WIDTH;
            let y = rect.y + dy as f32 * CELL_HEIGHT;
            if let Some((col, row)) = cell_at(x, y, cols, rows) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(glyph))?;
            }
        }
    }
    Ok(())
}

/// Player or enemy: the sprite when one is loaded, else a solid block.
fn draw_actor<W: Write>(
    out: &mut W,
    state: &GameState,
    rect: Rect,
    sprite: Option<&Sprite>,
    color: Color,
) -> std::io::Result<()> {
    let Some(sprite) = sprite else {
        return fill_rect(out, state, rect, '█', color);
    };
    let (cols, rows) = grid(state);
    out.queue(style::SetForegroundColor(color))?;
    for (dy, line) in sprite.rows.iter().enumerate() {
        for (dx, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let x = rect.x + dx as f32 * CELL_WIDTH;
            let y = rect.y + dy as f32 * CELL_HEIGHT;
            if let Some((col, row)) = cell_at(x, y, cols, rows) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(ch))?;
            }
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn fraction(value: u32, max: u32) -> f32 {
    if max == 0 {
        0.0
    } else {
        value as f32 / max as f32
    }
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let p = &state.player;
    let w = &state.weapon;
    let segments: [(&str, String, Color); 3] = [
        ("HP ", bar(fraction(p.health, MAX_VITALS), BAR_WIDTH), C_HUD_HEALTH),
        (" SH ", bar(fraction(p.shield, MAX_VITALS), BAR_WIDTH), C_HUD_SHIELD),
        (
            " AMMO ",
            format!(
                "{} {:>2}/{}",
                bar(fraction(w.ammo, w.max_ammo), BAR_WIDTH),
                w.ammo,
                w.max_ammo
            ),
            C_HUD_AMMO,
        ),
    ];

    out.queue(cursor::MoveTo(1, 0))?;
    for (label, body, color) in segments.iter() {
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(*label))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(body))?;
    }

    let (cols, _) = grid(state);
    let streak = format!("Kill Streak: {}", state.kill_streak);
    let sx = cols.saturating_sub(streak.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STREAK))?;
    out.queue(Print(&streak))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (_, rows) = grid(state);
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(format!(
        "W A S D / ← ↑ → ↓ : Move   SPACE : Shoot   Q : Quit   [{}]",
        state.config.preset.as_str()
    )))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let streak_line = format!("Kill Streak: {:>4}", state.kill_streak);
    let hint = match state.config.on_game_over {
        GameOverAction::Reload => "Press any key to play again",
        GameOverAction::Halt => "Q - Quit",
    };

    let lines: [(&str, Color); 5] = [
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER!     ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (streak_line.as_str(), Color::Yellow),
        (hint, Color::White),
    ];

    let (cols, rows) = grid(state);
    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
