use crate::{CardKind, Deck, Player};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Advice {
    Hit,
    Stay,
}

impl Advice {
    pub fn label(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Stay => "stay",
        }
    }
}

/// Chance that the next single draw repeats a number already in `player`'s
/// hand. Ignores busts that could follow from a Flip Three cascade.
pub fn estimate_bust_risk(player: &Player, deck: &Deck) -> f64 {
    let total = deck.total_remaining();
    if total == 0 {
        return 0.0;
    }
    let hits: u32 = player
        .numbers()
        .map(|value| deck.count(CardKind::Number(value)))
        .sum();
    f64::from(hits) / f64::from(total)
}

pub fn advise(risk: f64, stay_threshold: f64) -> Advice {
    if risk >= stay_threshold {
        Advice::Stay
    } else {
        Advice::Hit
    }
}
