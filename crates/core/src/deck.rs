use crate::{CardKind, ScoreModifier, MAX_NUMBER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckEntry {
    pub card: CardKind,
    pub count: u32,
}

/// Remaining cards by kind. Cards only ever leave the deck.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Deck {
    counts: BTreeMap<CardKind, u32>,
}

impl Deck {
    pub fn standard() -> Self {
        Self::from_counts(standard_composition())
    }

    pub fn from_counts(entries: impl IntoIterator<Item = DeckEntry>) -> Self {
        let mut counts = BTreeMap::new();
        for entry in entries {
            *counts.entry(entry.card).or_insert(0) += entry.count;
        }
        Self { counts }
    }

    /// Takes one card of `kind` out of play. Returns false and leaves the
    /// deck untouched when none remain.
    pub fn remove(&mut self, kind: CardKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn count(&self, kind: CardKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_remaining(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_remaining() == 0
    }

    pub fn entries(&self) -> impl Iterator<Item = DeckEntry> + '_ {
        self.counts
            .iter()
            .map(|(card, count)| DeckEntry { card: *card, count: *count })
    }
}

/// One 0, one 1, then `v` copies of each value `v`; three of each action
/// card and one of each score modifier.
pub fn standard_composition() -> Vec<DeckEntry> {
    let mut entries = Vec::new();
    for value in 0..=MAX_NUMBER {
        entries.push(DeckEntry {
            card: CardKind::Number(value),
            count: u32::from(value.max(1)),
        });
    }
    for card in [CardKind::Freeze, CardKind::FlipThree, CardKind::SecondChance] {
        entries.push(DeckEntry { card, count: 3 });
    }
    for modifier in ScoreModifier::ALL {
        entries.push(DeckEntry {
            card: CardKind::ScoreModifier(modifier),
            count: 1,
        });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_deck_has_94_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.total_remaining(), 94);
        assert_eq!(deck.count(CardKind::Number(0)), 1);
        assert_eq!(deck.count(CardKind::Number(1)), 1);
        assert_eq!(deck.count(CardKind::Number(12)), 12);
        assert_eq!(deck.count(CardKind::SecondChance), 3);
    }

    #[test]
    fn entries_are_listed_in_kind_order() {
        let deck = Deck::standard();
        let cards: Vec<CardKind> = deck.entries().map(|entry| entry.card).collect();
        assert_eq!(cards.first(), Some(&CardKind::Number(0)));
        assert_eq!(cards[10], CardKind::Number(10));
        assert_eq!(cards[13], CardKind::Freeze);
    }

    #[test]
    fn unknown_kind_counts_as_zero() {
        let mut deck = Deck::from_counts([DeckEntry {
            card: CardKind::Number(4),
            count: 1,
        }]);
        assert_eq!(deck.count(CardKind::Freeze), 0);
        assert!(!deck.remove(CardKind::Freeze));
        assert_eq!(deck.total_remaining(), 1);
    }
}
