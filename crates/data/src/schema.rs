use serde::{Deserialize, Serialize};

pub use flip7_core::{CardKind, DeckEntry, GameConfig, ScoreModifier};

/// `deck.json`: the full composition, replacing whatever `rules.json` lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckFile {
    pub cards: Vec<DeckEntry>,
}
