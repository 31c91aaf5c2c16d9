use crate::{standard_composition, CardKind, DeckEntry, MAX_NUMBER};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("stay threshold {0} outside 0..=1")]
    ThresholdOutOfRange(f64),
    #[error("flip seven target {0} outside 1..=13")]
    FlipSevenTarget(usize),
    #[error("flip three must force at least one draw")]
    NoForcedDraws,
    #[error("deck lists number card {0} above 12")]
    NumberOutOfRange(u8),
    #[error("deck lists {0} more than once")]
    DuplicateDeckEntry(CardKind),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_flip_seven_target")]
    pub flip_seven_target: usize,
    #[serde(default = "default_flip_seven_bonus")]
    pub flip_seven_bonus: u32,
    #[serde(default = "default_flip_three_draws")]
    pub flip_three_draws: usize,
    #[serde(default = "default_max_second_chances")]
    pub max_second_chances: u32,
    #[serde(default = "default_stay_threshold")]
    pub stay_threshold: f64,
    #[serde(default = "default_winning_score")]
    pub winning_score: u32,
    #[serde(default = "standard_composition")]
    pub deck: Vec<DeckEntry>,
}

fn default_flip_seven_target() -> usize {
    7
}

fn default_flip_seven_bonus() -> u32 {
    15
}

fn default_flip_three_draws() -> usize {
    3
}

fn default_max_second_chances() -> u32 {
    1
}

fn default_stay_threshold() -> f64 {
    0.3
}

fn default_winning_score() -> u32 {
    200
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            flip_seven_target: default_flip_seven_target(),
            flip_seven_bonus: default_flip_seven_bonus(),
            flip_three_draws: default_flip_three_draws(),
            max_second_chances: default_max_second_chances(),
            stay_threshold: default_stay_threshold(),
            winning_score: default_winning_score(),
            deck: standard_composition(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.stay_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.stay_threshold));
        }
        let distinct_numbers = usize::from(MAX_NUMBER) + 1;
        if self.flip_seven_target == 0 || self.flip_seven_target > distinct_numbers {
            return Err(ConfigError::FlipSevenTarget(self.flip_seven_target));
        }
        if self.flip_three_draws == 0 {
            return Err(ConfigError::NoForcedDraws);
        }
        let mut seen = HashSet::new();
        for entry in &self.deck {
            if let CardKind::Number(value) = entry.card {
                if value > MAX_NUMBER {
                    return Err(ConfigError::NumberOutOfRange(value));
                }
            }
            if !seen.insert(entry.card) {
                return Err(ConfigError::DuplicateDeckEntry(entry.card));
            }
        }
        Ok(())
    }
}
