use crate::schema::{DeckFile, GameConfig};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const RULES_FILE: &str = "rules.json";
pub const DECK_FILE: &str = "deck.json";

/// Reads `rules.json` (required) and `deck.json` (optional) from `dir`.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let mut config: GameConfig = load_json(dir.join(RULES_FILE))?;
    let deck_path = dir.join(DECK_FILE);
    if deck_path.exists() {
        let deck: DeckFile = load_json(&deck_path)?;
        debug!(path = %deck_path.display(), entries = deck.cards.len(), "deck override");
        config.deck = deck.cards;
    }
    config
        .validate()
        .with_context(|| format!("validate {}", dir.display()))?;
    info!(dir = %dir.display(), "loaded game config");
    Ok(config)
}

/// Like [`load_game_config`], but a directory without `rules.json` yields
/// the standard rules.
pub fn load_game_config_or_default(dir: &Path) -> anyhow::Result<GameConfig> {
    if !dir.join(RULES_FILE).exists() {
        debug!(dir = %dir.display(), "no rules file, using standard rules");
        return Ok(GameConfig::default());
    }
    load_game_config(dir)
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
