use storm_arena::config::*;

#[test]
fn storm_preset_matches_browser_rules() {
    let c = Preset::Storm.config();
    assert_eq!(c.preset, Preset::Storm);
    assert_eq!(c.player.health, 100);
    assert_eq!(c.player.shield, 50);
    assert_eq!(c.weapon.max_ammo, 30);
    assert_eq!(c.weapon.fire_rate_ms, 300);
    assert_eq!(c.enemy.health, 50);
    assert_eq!(c.enemy.movement, EnemyMovement::Homing);
    assert!(c.enemy.spawn_at_top);
    assert_eq!(c.enemy.spawn_interval_ms, 2_000);
    assert_eq!(c.ammo.spawn_interval_ms, 10_000);
    assert_eq!(c.ammo.pickup, AmmoPickup::Refill);
    assert_eq!(c.storm, Some(StormConfig { shrink_rate: 0.02, damage: 1 }));
    assert!(!c.clamp_to_bounds);
    assert_eq!(c.on_game_over, GameOverAction::Reload);
}

#[test]
fn arena_and_classic_presets_differ_where_expected() {
    let arena = Preset::Arena.config();
    assert!(arena.storm.is_none());
    assert!(arena.clamp_to_bounds);
    assert_eq!(arena.enemy.health, 20);
    assert!(!arena.enemy.spawn_at_top);
    assert_eq!(arena.ammo.pickup, AmmoPickup::TopUp(10));
    assert_eq!(arena.on_game_over, GameOverAction::Halt);

    let classic = Preset::Classic.config();
    assert!(classic.storm.is_none());
    assert_eq!(classic.enemy.movement, EnemyMovement::Straight);
    assert!(classic.enemy.despawn_offscreen);
    assert!(classic.enemy.spawn_at_top);
}

#[test]
fn presets_are_unbounded() {
    for preset in Preset::ALL {
        let c = preset.config();
        assert_eq!(c.preset, preset);
        assert_eq!(c.enemy.max_enemies, None);
        assert_eq!(c.ammo.max_ammo_boxes, None);
    }
}

#[test]
fn default_is_storm_preset() {
    assert_eq!(GameConfig::default(), Preset::Storm.config());
}

#[test]
fn empty_json_gives_storm_preset() {
    let c = GameConfig::from_json("{}").unwrap();
    assert_eq!(c, Preset::Storm.config());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let c = GameConfig::from_json(r#"{ "enemy": { "health": 99 }, "clamp_to_bounds": true }"#)
        .unwrap();
    assert_eq!(c.enemy.health, 99);
    assert_eq!(c.enemy.damage, 10);
    assert!(c.clamp_to_bounds);
    assert!(c.storm.is_some());
}

#[test]
fn json_can_disable_storm_and_pick_enums() {
    let c = GameConfig::from_json(
        r#"{
            "preset": "classic",
            "storm": null,
            "enemy": { "movement": "straight", "max_enemies": 12 },
            "ammo": { "pickup": { "top_up": 5 } },
            "on_game_over": "halt"
        }"#,
    )
    .unwrap();
    assert_eq!(c.preset, Preset::Classic);
    assert!(c.storm.is_none());
    assert_eq!(c.enemy.movement, EnemyMovement::Straight);
    assert_eq!(c.enemy.max_enemies, Some(12));
    assert_eq!(c.ammo.pickup, AmmoPickup::TopUp(5));
    assert_eq!(c.on_game_over, GameOverAction::Halt);
}

#[test]
fn named_preset_supplies_the_defaults() {
    let c = GameConfig::from_json(r#"{ "preset": "arena" }"#).unwrap();
    assert_eq!(c, Preset::Arena.config());

    let c = GameConfig::from_json(r#"{ "preset": "classic", "enemy": { "health": 35 } }"#)
        .unwrap();
    assert_eq!(c.enemy.health, 35);
    assert_eq!(c.enemy.movement, EnemyMovement::Straight);
    assert!(c.storm.is_none());
    assert!(c.clamp_to_bounds);
}

#[test]
fn json_can_add_storm_to_a_stormless_preset() {
    let c = GameConfig::from_json(r#"{ "preset": "arena", "storm": { "damage": 3 } }"#).unwrap();
    assert_eq!(c.storm, Some(StormConfig { shrink_rate: 0.02, damage: 3 }));
    assert_eq!(c.player.shield, 100);
}

#[test]
fn unknown_preset_is_an_error() {
    assert!(GameConfig::from_json(r#"{ "preset": "hardcore" }"#).is_err());
}

#[test]
fn vitals_above_hundred_are_rejected() {
    let err = GameConfig::from_json(r#"{ "player": { "health": 150 } }"#).unwrap_err();
    assert!(format!("{err:#}").contains("player.health"));
    assert!(GameConfig::from_json(r#"{ "player": { "shield": 101 } }"#).is_err());
    assert!(GameConfig::from_json(r#"{ "player": { "health": 100, "shield": 100 } }"#).is_ok());
}

#[test]
fn config_survives_json_round_trip() {
    let original = Preset::Arena.config();
    let text = serde_json::to_string(&original).unwrap();
    assert_eq!(GameConfig::from_json(&text).unwrap(), original);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(GameConfig::from_json("{ not json").is_err());
    assert!(GameConfig::from_json(r#"{ "enemy": { "health": -3 } }"#).is_err());
}

#[test]
fn load_reports_missing_file() {
    let path = std::env::temp_dir().join("storm_arena_missing_config.json");
    let _ = std::fs::remove_file(&path);
    let err = GameConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("storm_arena_missing_config.json"));
}

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!("storm_arena_cfg_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "weapon": { "max_ammo": 12 } }"#).unwrap();
    let c = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(c.weapon.max_ammo, 12);
}
