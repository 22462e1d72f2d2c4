use storm_arena::compute::init_state;
use storm_arena::config::Preset;
use storm_arena::entities::*;
use storm_arena::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn storm_state() -> GameState {
    init_state(&Preset::Storm.config(), 800.0, 600.0)
}

// ── IntervalTimer ─────────────────────────────────────────────────────────────

#[test]
fn timer_fires_on_period() {
    let mut t = IntervalTimer::new(2_000);
    assert_eq!(t.advance(1_999), 0);
    assert_eq!(t.advance(1), 1);
    assert_eq!(t.elapsed_ms, 0);
}

#[test]
fn timer_reports_multiple_periods_and_keeps_remainder() {
    let mut t = IntervalTimer::new(2_000);
    assert_eq!(t.advance(4_500), 2);
    assert_eq!(t.elapsed_ms, 500);
    assert_eq!(t.advance(1_500), 1);
}

#[test]
fn timer_with_zero_period_never_fires() {
    let mut t = IntervalTimer::new(0);
    assert_eq!(t.advance(10_000), 0);
}

// ── spawn_enemy / spawn_ammo_box ─────────────────────────────────────────────

#[test]
fn enemy_spawns_on_top_edge_with_configured_stats() {
    let s = spawn_enemy(&storm_state(), &mut seeded_rng());
    assert_eq!(s.enemies.len(), 1);
    let e = &s.enemies[0];
    assert_eq!(e.y, 0.0);
    assert!(e.x >= 0.0 && e.x < 770.0);
    assert_eq!(e.size, 30.0);
    assert_eq!(e.health, 50);
    assert_eq!(e.damage, 10);
    assert_eq!(e.speed, 1.0);
}

#[test]
fn enemy_spawns_anywhere_in_arena() {
    let mut s = init_state(&Preset::Arena.config(), 800.0, 600.0);
    let mut rng = seeded_rng();
    for _ in 0..50 {
        s = spawn_enemy(&s, &mut rng);
    }
    assert!(s.enemies.iter().all(|e| e.x >= 0.0 && e.x < 770.0));
    assert!(s.enemies.iter().all(|e| e.y >= 0.0 && e.y < 570.0));
    assert!(s.enemies.iter().any(|e| e.y > 0.0));
}

#[test]
fn ammo_box_spawns_inside_canvas() {
    let mut s = storm_state();
    let mut rng = seeded_rng();
    for _ in 0..50 {
        s = spawn_ammo_box(&s, &mut rng);
    }
    assert_eq!(s.ammo_boxes.len(), 50);
    for b in &s.ammo_boxes {
        assert!(b.x >= 0.0 && b.x < 770.0);
        assert!(b.y >= 0.0 && b.y < 570.0);
        assert_eq!(b.size, 30.0);
    }
}

#[test]
fn spawn_on_canvas_narrower_than_enemy() {
    let s = init_state(&Preset::Storm.config(), 20.0, 600.0);
    let s2 = spawn_enemy(&s, &mut seeded_rng());
    assert_eq!(s2.enemies[0].x, 0.0);
}

#[test]
fn spawns_are_reproducible_with_same_seed() {
    let a = spawn_enemy(&storm_state(), &mut seeded_rng());
    let b = spawn_enemy(&storm_state(), &mut seeded_rng());
    assert_eq!(a.enemies, b.enemies);
}

// ── Spawner ───────────────────────────────────────────────────────────────────

#[test]
fn spawner_follows_both_intervals() {
    let s = storm_state();
    let mut spawner = Spawner::new(&s);
    let mut rng = seeded_rng();

    let s = spawner.update(&s, 1_999, &mut rng);
    assert!(s.enemies.is_empty());

    let s = spawner.update(&s, 1, &mut rng);
    assert_eq!(s.enemies.len(), 1);
    assert!(s.ammo_boxes.is_empty());

    let s = spawner.update(&s, 8_000, &mut rng);
    assert_eq!(s.enemies.len(), 5);
    assert_eq!(s.ammo_boxes.len(), 1);
}

#[test]
fn spawner_is_unbounded_by_default() {
    let s = storm_state();
    let mut spawner = Spawner::new(&s);
    let s = spawner.update(&s, 200_000, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 100);
    assert_eq!(s.ammo_boxes.len(), 20);
}

#[test]
fn spawner_honours_caps() {
    let mut s = storm_state();
    s.config.enemy.max_enemies = Some(3);
    s.config.ammo.max_ammo_boxes = Some(1);
    let mut spawner = Spawner::new(&s);
    let s = spawner.update(&s, 100_000, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 3);
    assert_eq!(s.ammo_boxes.len(), 1);
}

#[test]
fn spawner_idle_after_game_over() {
    let mut s = storm_state();
    s.status = GameStatus::GameOver;
    let mut spawner = Spawner::new(&s);
    let s = spawner.update(&s, 20_000, &mut seeded_rng());
    assert!(s.enemies.is_empty());
    assert!(s.ammo_boxes.is_empty());
}
