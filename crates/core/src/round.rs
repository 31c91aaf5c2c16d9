use crate::{
    advise, estimate_bust_risk, Advice, CardKind, Deck, EventBus, GameConfig, Player,
    PlayerStatus,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod finish;
mod input;
mod resolve;
mod turn;

pub use input::{Operator, Prompt, ScriptedOperator};

/// Operator input that is refused and asked for again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a card or command")]
    InvalidCardToken(String),
    #[error("no {0} left in the deck")]
    CardUnavailable(CardKind),
    #[error("a forced draw cannot stay")]
    StayNotAllowed,
}

/// Reasons a Freeze, Flip Three or Second Chance target is refused. The
/// effect is dropped rather than asked for again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("no player named '{0}'")]
    UnknownPlayer(String),
    #[error("{0} is no longer active this round")]
    NotActive(String),
    #[error("cannot target yourself")]
    SelfTarget,
    #[error("{0} already holds a second chance")]
    AtCapacity(String),
    #[error("no eligible target")]
    NoEligibleTarget,
}

#[derive(Debug, Error)]
pub enum RoundError {
    #[error("input closed")]
    InputClosed,
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("no player in seat {0}")]
    NoSuchSeat(usize),
    #[error("no round in progress")]
    RoundNotInProgress,
    #[error("player in seat {0} is out for this round")]
    SeatNotActive(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("at least one player is required")]
    NoPlayers,
    #[error("player names cannot be empty")]
    EmptyName,
    #[error("duplicate player name '{0}'")]
    DuplicateName(String),
    #[error("no player named '{0}'")]
    UnknownPlayer(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Normal,
    /// Flip Three sub-draw: Freeze and Flip Three are reported but do nothing.
    Forced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Continue,
    Busted,
    FlipSeven,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerResult {
    pub name: String,
    pub status: PlayerStatus,
    pub hand: Vec<CardKind>,
    pub round_score: u32,
    pub total_score: u32,
    /// This player's Flip 7 ended the round.
    pub flip_seven: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: u32,
    pub flip_seven: Option<String>,
    pub results: Vec<PlayerResult>,
    /// Players at or above the winning score sharing the top total.
    pub winners: Vec<String>,
}

/// Owns the deck and the seated players and is the only writer of either.
#[derive(Debug)]
pub struct RoundEngine {
    config: GameConfig,
    deck: Deck,
    players: Vec<Player>,
    round: u32,
    in_round: bool,
    flip_seven: Option<usize>,
}

impl RoundEngine {
    pub fn new<I, S>(config: GameConfig, names: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut players: Vec<Player> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(SessionError::EmptyName);
            }
            if players.iter().any(|player| player.matches_name(name)) {
                return Err(SessionError::DuplicateName(name.to_string()));
            }
            players.push(Player::new(name));
        }
        if players.is_empty() {
            return Err(SessionError::NoPlayers);
        }
        let deck = Deck::from_counts(config.deck.iter().copied());
        Ok(Self {
            config,
            deck,
            players,
            round: 0,
            in_round: false,
            flip_seven: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.matches_name(name))
    }

    pub fn round_number(&self) -> u32 {
        self.round
    }

    pub fn in_round(&self) -> bool {
        self.in_round
    }

    /// Set once a hand reaches the Flip 7 target; the round is over.
    pub fn flip_seven(&self) -> Option<&Player> {
        self.flip_seven.map(|index| &self.players[index])
    }

    pub fn bust_risk(&self, index: usize) -> Option<f64> {
        self.players
            .get(index)
            .map(|player| estimate_bust_risk(player, &self.deck))
    }

    pub fn advice(&self, index: usize) -> Option<Advice> {
        self.bust_risk(index)
            .map(|risk| advise(risk, self.config.stay_threshold))
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|player| player.is_active()).count()
    }

    fn seat(&self, index: usize) -> Result<&Player, RoundError> {
        self.players.get(index).ok_or(RoundError::NoSuchSeat(index))
    }

    /// Cards may only enter play between `start_round` and the end of the
    /// round, including the Flip 7 cut-off.
    fn ensure_live(&self) -> Result<(), RoundError> {
        if !self.in_round || self.flip_seven.is_some() {
            return Err(RoundError::RoundNotInProgress);
        }
        Ok(())
    }

    fn find_player(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|player| player.matches_name(name))
    }

    fn reject(&self, index: usize, input: &str, err: &InputError, events: &mut EventBus) {
        events.push(crate::Event::InputRejected {
            player: self.players[index].name.clone(),
            input: input.trim().to_string(),
            reason: err.to_string(),
        });
    }
}
