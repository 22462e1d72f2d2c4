use std::path::Path;

use storm_arena::compute::init_state;
use storm_arena::config::Preset;
use storm_arena::display::*;
use storm_arena::entities::*;

/// An 80x24 terminal.
fn make_state(preset: Preset) -> GameState {
    let (w, h) = canvas_size(80, 24);
    init_state(&preset.config(), w, h)
}

fn render_to_string(state: &GameState, sprites: &SpriteSet) -> String {
    let mut buf: Vec<u8> = Vec::new();
    render(&mut buf, state, sprites).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn canvas_excludes_hud_and_hint_rows() {
    assert_eq!(canvas_size(80, 24), (640.0, 352.0));
    assert_eq!(canvas_size(10, 1), (80.0, 0.0));
}

#[test]
fn bar_is_proportional() {
    assert_eq!(bar(1.0, 4), "████");
    assert_eq!(bar(0.5, 4), "██░░");
    assert_eq!(bar(0.0, 4), "░░░░");
}

#[test]
fn bar_clamps_fraction() {
    assert_eq!(bar(1.7, 3), "███");
    assert_eq!(bar(-0.5, 3), "░░░");
}

#[test]
fn hud_shows_ammo_and_kill_streak() {
    let mut s = make_state(Preset::Arena);
    s.kill_streak = 7;
    s.weapon.ammo = 12;
    let frame = render_to_string(&s, &SpriteSet::default());
    assert!(frame.contains("Kill Streak: 7"));
    assert!(frame.contains("12/30"));
    assert!(frame.contains("[arena]"));
}

#[test]
fn fallback_blocks_when_no_sprites() {
    let s = make_state(Preset::Arena);
    let fallback = render_to_string(&s, &SpriteSet::default());
    let sprites = SpriteSet {
        player: Some(Sprite::parse("@").unwrap()),
        enemy: None,
    };
    let with_sprite = render_to_string(&s, &sprites);
    assert!(with_sprite.contains('@'));
    // 40 px player → 5 x 3 cells of solid block
    assert_eq!(
        fallback.matches('█').count(),
        with_sprite.matches('█').count() + 15
    );
}

#[test]
fn loaded_sprite_replaces_block() {
    let mut s = make_state(Preset::Arena);
    s.enemies.push(Enemy {
        x: 80.0,
        y: 80.0,
        size: 30.0,
        speed: 1.0,
        health: 20,
        damage: 10,
    });
    let sprites = SpriteSet {
        player: None,
        enemy: Some(Sprite::parse("\n<@>\n").unwrap()),
    };
    let frame = render_to_string(&s, &sprites);
    assert!(frame.contains('<'));
    assert!(frame.contains('@'));
}

#[test]
fn storm_ring_drawn_only_with_storm() {
    let with_storm = render_to_string(&make_state(Preset::Storm), &SpriteSet::default());
    assert!(with_storm.contains('·'));
    let without = render_to_string(&make_state(Preset::Classic), &SpriteSet::default());
    assert!(!without.contains('·'));
}

#[test]
fn game_over_overlay() {
    let mut s = make_state(Preset::Storm);
    assert!(!render_to_string(&s, &SpriteSet::default()).contains("GAME  OVER"));
    s.status = GameStatus::GameOver;
    let frame = render_to_string(&s, &SpriteSet::default());
    assert!(frame.contains("GAME  OVER"));
    assert!(frame.contains("Press any key to play again"));

    let mut halted = make_state(Preset::Classic);
    halted.status = GameStatus::GameOver;
    assert!(render_to_string(&halted, &SpriteSet::default()).contains("Q - Quit"));
}

#[test]
fn offscreen_entities_are_clipped() {
    let mut s = make_state(Preset::Arena);
    s.player.x = -500.0;
    s.player.y = -500.0;
    s.bullets.push(Bullet {
        x: 10_000.0,
        y: 10_000.0,
        size: 5.0,
        speed: 8.0,
        damage: 10,
    });
    let frame = render_to_string(&s, &SpriteSet::default());
    assert!(!frame.contains('•'));
}

// ── sprites ───────────────────────────────────────────────────────────────────

#[test]
fn sprite_parse_trims_blank_rows() {
    let sprite = Sprite::parse("\n\n /\\ \n/__\\\n\n").unwrap();
    assert_eq!(sprite.rows, vec![" /\\".to_string(), "/__\\".to_string()]);
}

#[test]
fn sprite_parse_rejects_empty() {
    assert!(Sprite::parse("  \n \n").is_err());
}

#[test]
fn missing_sprite_falls_back_to_unloaded() {
    let sprites = SpriteSet::load(Some(Path::new("/definitely/not/here.txt")), None);
    assert_eq!(sprites, SpriteSet::default());
}
