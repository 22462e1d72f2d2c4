//! Optional text-art sprites for the player and enemies.
//!
//! A sprite file is plain text, one row per line; spaces are transparent.
//! A sprite that fails to load stays unloaded and the renderer falls back to
//! a solid block in the entity's colour.

use std::path::Path;

use anyhow::{bail, Context};

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub rows: Vec<String>,
}

impl Sprite {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let rows: Vec<String> = text
            .lines()
            .map(|l| l.trim_end().to_string())
            .skip_while(|l| l.is_empty())
            .collect();
        let rows: Vec<String> = match rows.iter().rposition(|l| !l.is_empty()) {
            Some(last) => rows[..=last].to_vec(),
            None => bail!("sprite has no visible rows"),
        };
        Ok(Self { rows })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading sprite {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing sprite {}", path.display()))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteSet {
    pub player: Option<Sprite>,
    pub enemy: Option<Sprite>,
}

fn load_optional(label: &str, path: Option<&Path>) -> Option<Sprite> {
    let path = path?;
    match Sprite::load(path) {
        Ok(sprite) => {
            log::info!("Loaded {label} sprite ({} rows)", sprite.rows.len());
            Some(sprite)
        }
        Err(e) => {
            log::warn!("{label} sprite unavailable, using flat colour: {e:#}");
            None
        }
    }
}

impl SpriteSet {
    pub fn load(player: Option<&Path>, enemy: Option<&Path>) -> Self {
        Self {
            player: load_optional("player", player),
            enemy: load_optional("enemy", enemy),
        }
    }
}
