use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MAX_NUMBER: u8 = 12;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreModifier {
    Double,
    Plus2,
    Plus4,
    Plus6,
    Plus8,
    Plus10,
}

impl ScoreModifier {
    pub const ALL: [ScoreModifier; 6] = [
        ScoreModifier::Double,
        ScoreModifier::Plus2,
        ScoreModifier::Plus4,
        ScoreModifier::Plus6,
        ScoreModifier::Plus8,
        ScoreModifier::Plus10,
    ];

    fn from_bonus(points: u32) -> Option<Self> {
        match points {
            2 => Some(Self::Plus2),
            4 => Some(Self::Plus4),
            6 => Some(Self::Plus6),
            8 => Some(Self::Plus8),
            10 => Some(Self::Plus10),
            _ => None,
        }
    }
}

/// Identity of a card for deck bookkeeping. Two physical cards of the same
/// kind are interchangeable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CardKind {
    Number(u8),
    Freeze,
    FlipThree,
    SecondChance,
    ScoreModifier(ScoreModifier),
}

impl CardKind {
    pub fn number(&self) -> Option<u8> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Freeze and Flip Three need a target and are suppressed during forced draws.
    pub fn is_action(&self) -> bool {
        matches!(self, Self::Freeze | Self::FlipThree)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized card '{0}'")]
pub struct ParseCardError(pub String);

/// Lowercases and drops whitespace, `-` and `_` so "Flip Three", "flip-three"
/// and "FLIPTHREE" compare equal.
pub(crate) fn normalize_token(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-' && *ch != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for CardKind {
    type Err = ParseCardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let digits = raw.trim();
        if !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit()) {
            return match digits.parse::<u8>() {
                Ok(value) if value <= MAX_NUMBER => Ok(Self::Number(value)),
                _ => Err(ParseCardError(raw.trim().to_string())),
            };
        }
        let token = normalize_token(raw);
        let kind = match token.as_str() {
            "freeze" | "f" => Self::Freeze,
            "flipthree" | "flip3" | "f3" => Self::FlipThree,
            "secondchance" | "sc" => Self::SecondChance,
            "scorex2" | "x2" | "double" => Self::ScoreModifier(ScoreModifier::Double),
            other => {
                let bonus = other
                    .strip_prefix("score")
                    .unwrap_or(other)
                    .strip_prefix('+')
                    .and_then(|digits| digits.parse::<u32>().ok())
                    .and_then(ScoreModifier::from_bonus);
                match bonus {
                    Some(modifier) => Self::ScoreModifier(modifier),
                    None => return Err(ParseCardError(raw.trim().to_string())),
                }
            }
        };
        Ok(kind)
    }
}

impl fmt::Display for ScoreModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Double => "Score x2",
            Self::Plus2 => "Score +2",
            Self::Plus4 => "Score +4",
            Self::Plus6 => "Score +6",
            Self::Plus8 => "Score +8",
            Self::Plus10 => "Score +10",
        })
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Freeze => f.write_str("Freeze"),
            Self::FlipThree => f.write_str("Flip Three"),
            Self::SecondChance => f.write_str("Second Chance"),
            Self::ScoreModifier(modifier) => modifier.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_by_value_not_text() {
        assert!(CardKind::Number(2) < CardKind::Number(10));
        assert!(CardKind::Number(12) < CardKind::Freeze);
    }

    #[test]
    fn display_matches_table_labels() {
        assert_eq!(CardKind::Number(11).to_string(), "11");
        assert_eq!(CardKind::FlipThree.to_string(), "Flip Three");
        assert_eq!(
            CardKind::ScoreModifier(ScoreModifier::Plus10).to_string(),
            "Score +10"
        );
    }

    #[test]
    fn display_output_parses_back() {
        for modifier in ScoreModifier::ALL {
            let kind = CardKind::ScoreModifier(modifier);
            assert_eq!(kind.to_string().parse::<CardKind>(), Ok(kind));
        }
        assert_eq!("Second Chance".parse::<CardKind>(), Ok(CardKind::SecondChance));
    }

    #[test]
    fn odd_bonus_is_rejected() {
        assert!("+3".parse::<CardKind>().is_err());
        assert!("score +12".parse::<CardKind>().is_err());
    }
}
