use crate::CardKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    Active,
    Stayed,
    Busted,
    Frozen,
}

impl PlayerStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Stayed => "stayed",
            Self::Busted => "busted",
            Self::Frozen => "frozen",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub status: PlayerStatus,
    /// Cards kept this round in draw order. Holds at most one `Number` per value.
    pub hand: Vec<CardKind>,
    pub second_chances: u32,
    /// Instant bonus earned this round, folded into `round_score` at the end.
    pub pending_bonus: u32,
    pub round_score: u32,
    pub total_score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: PlayerStatus::Active,
            hand: Vec::new(),
            second_chances: 0,
            pending_bonus: 0,
            round_score: 0,
            total_score: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    pub fn reset_for_round(&mut self) {
        self.status = PlayerStatus::Active;
        self.hand.clear();
        self.second_chances = 0;
        self.pending_bonus = 0;
        self.round_score = 0;
    }

    pub fn holds_number(&self, value: u8) -> bool {
        self.numbers().any(|held| held == value)
    }

    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.hand.iter().filter_map(CardKind::number)
    }

    pub fn distinct_numbers(&self) -> usize {
        self.numbers().count()
    }

    pub fn hand_sum(&self) -> u32 {
        self.numbers().map(u32::from).sum()
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_total_score() {
        let mut player = Player::new("Ada");
        player.total_score = 42;
        player.status = PlayerStatus::Busted;
        player.hand.push(CardKind::Number(3));
        player.second_chances = 1;
        player.pending_bonus = 15;
        player.reset_for_round();
        assert_eq!(player.total_score, 42);
        assert!(player.is_active());
        assert!(player.hand.is_empty());
        assert_eq!(player.second_chances, 0);
        assert_eq!(player.pending_bonus, 0);
    }

    #[test]
    fn hand_sum_ignores_non_numbers() {
        let mut player = Player::new("Ada");
        player.hand = vec![
            CardKind::Number(12),
            CardKind::Number(0),
            CardKind::Number(5),
        ];
        assert_eq!(player.hand_sum(), 17);
        assert_eq!(player.distinct_numbers(), 3);
        assert!(player.holds_number(0));
        assert!(!player.holds_number(1));
    }

    #[test]
    fn names_match_case_insensitively() {
        let player = Player::new("Bob");
        assert!(player.matches_name(" bob "));
        assert!(!player.matches_name("bobby"));
    }
}
