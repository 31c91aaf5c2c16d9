use super::InputError;
use crate::cards::normalize_token;
use crate::{Advice, CardKind, EventBus};
use std::collections::VecDeque;

/// What the engine is waiting on. Every prompt expects one raw text token.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    /// Declare the drawn card, or `stay`.
    Turn {
        player: String,
        bust_risk: f64,
        advice: Advice,
    },
    /// One of the draws forced by Flip Three; `stay` is refused.
    ForcedDraw {
        player: String,
        draw: usize,
        of: usize,
    },
    /// Name who receives `card` from `player`.
    Target {
        player: String,
        card: CardKind,
        candidates: Vec<String>,
    },
}

impl Prompt {
    pub fn player(&self) -> &str {
        match self {
            Self::Turn { player, .. }
            | Self::ForcedDraw { player, .. }
            | Self::Target { player, .. } => player,
        }
    }
}

/// The human relaying table events. `events` holds everything that happened
/// since the previous prompt. `None` means no more input will arrive.
pub trait Operator {
    fn respond(&mut self, prompt: &Prompt, events: &mut EventBus) -> Option<String>;
}

/// Replays a fixed list of responses and records the prompts it was shown.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    responses: VecDeque<String>,
    pub prompts: Vec<Prompt>,
}

impl ScriptedOperator {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl Operator for ScriptedOperator {
    fn respond(&mut self, prompt: &Prompt, _events: &mut EventBus) -> Option<String> {
        self.prompts.push(prompt.clone());
        self.responses.pop_front()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TurnInput {
    Stay,
    Draw(CardKind),
}

pub(super) fn parse_turn_input(raw: &str) -> Result<TurnInput, InputError> {
    let token = normalize_token(raw);
    if token == "stay" || token == "s" {
        return Ok(TurnInput::Stay);
    }
    raw.parse::<CardKind>()
        .map(TurnInput::Draw)
        .map_err(|err| InputError::InvalidCardToken(err.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stay_is_a_control_token() {
        assert_eq!(parse_turn_input(" STAY "), Ok(TurnInput::Stay));
        assert_eq!(parse_turn_input("s"), Ok(TurnInput::Stay));
    }

    #[test]
    fn cards_parse_through() {
        assert_eq!(
            parse_turn_input("10"),
            Ok(TurnInput::Draw(CardKind::Number(10)))
        );
    }

    #[test]
    fn garbage_is_invalid_token() {
        assert_eq!(
            parse_turn_input("hit me"),
            Err(InputError::InvalidCardToken("hit me".to_string()))
        );
    }

    #[test]
    fn scripted_operator_records_prompts() {
        let mut operator = ScriptedOperator::new(["5"]);
        let prompt = Prompt::ForcedDraw {
            player: "Ada".to_string(),
            draw: 1,
            of: 3,
        };
        let mut events = EventBus::default();
        assert_eq!(operator.respond(&prompt, &mut events), Some("5".to_string()));
        assert_eq!(operator.respond(&prompt, &mut events), None);
        assert_eq!(operator.prompts.len(), 2);
        assert_eq!(operator.prompts[0].player(), "Ada");
    }
}
