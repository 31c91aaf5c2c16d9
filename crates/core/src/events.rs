use crate::CardKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RoundStarted {
        round: u32,
        players: usize,
        deck_remaining: u32,
    },
    CardDrawn {
        player: String,
        card: CardKind,
        forced: bool,
    },
    InputRejected {
        player: String,
        input: String,
        reason: String,
    },
    Stayed { player: String, hand_sum: u32 },
    Busted { player: String, value: u8 },
    SecondChanceGained { player: String, held: u32 },
    SecondChanceUsed {
        player: String,
        value: u8,
        remaining: u32,
    },
    SecondChanceTransferred { from: String, to: String },
    SecondChanceDiscarded { player: String },
    Frozen { by: String, target: String },
    FlipThreeStarted { by: String, target: String },
    EffectSuppressed { player: String, card: CardKind },
    TargetFizzled {
        player: String,
        card: CardKind,
        reason: String,
    },
    ModifierHeld { player: String, card: CardKind },
    FlipSeven { player: String, bonus: u32 },
    RoundScored {
        player: String,
        round_score: u32,
        total_score: u32,
    },
    RoundEnded { round: u32, flip_seven: Option<String> },
    BonusAwarded {
        player: String,
        points: u32,
        total_score: u32,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.queue.iter()
    }
}
