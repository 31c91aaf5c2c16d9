use super::input::{parse_turn_input, TurnInput};
use super::*;
use crate::Event;
use tracing::info;

impl RoundEngine {
    /// Clears hands, reprieves and statuses. Totals and the deck carry over.
    pub fn start_round(&mut self, events: &mut EventBus) {
        self.round += 1;
        self.in_round = true;
        self.flip_seven = None;
        for player in &mut self.players {
            player.reset_for_round();
        }
        info!(
            round = self.round,
            deck_remaining = self.deck.total_remaining(),
            "round started"
        );
        events.push(Event::RoundStarted {
            round: self.round,
            players: self.players.len(),
            deck_remaining: self.deck.total_remaining(),
        });
    }

    /// True once nobody is active or a hand reached Flip 7.
    pub fn round_settled(&self) -> bool {
        self.flip_seven.is_some() || self.active_count() == 0
    }

    /// Offers one draw-or-stay decision to the player in seat `index`.
    /// Refused input is reported and asked for again. Inactive seats are
    /// skipped.
    pub fn take_turn(
        &mut self,
        index: usize,
        operator: &mut dyn Operator,
        events: &mut EventBus,
    ) -> Result<(), RoundError> {
        self.ensure_live()?;
        if !self.seat(index)?.is_active() {
            return Ok(());
        }
        let bust_risk = self.bust_risk(index).unwrap_or(0.0);
        let prompt = Prompt::Turn {
            player: self.players[index].name.clone(),
            bust_risk,
            advice: advise(bust_risk, self.config.stay_threshold),
        };
        loop {
            let raw = operator
                .respond(&prompt, events)
                .ok_or(RoundError::InputClosed)?;
            match parse_turn_input(&raw) {
                Ok(TurnInput::Stay) => {
                    self.stay(index, events);
                    return Ok(());
                }
                Ok(TurnInput::Draw(card)) => {
                    match self.draw(index, card, DrawMode::Normal, operator, events) {
                        Ok(_) => return Ok(()),
                        Err(RoundError::Input(err)) => self.reject(index, &raw, &err, events),
                        Err(err) => return Err(err),
                    }
                }
                Err(err) => self.reject(index, &raw, &err, events),
            }
        }
    }

    fn stay(&mut self, index: usize, events: &mut EventBus) {
        let player = &mut self.players[index];
        player.status = PlayerStatus::Stayed;
        player.round_score = player.hand_sum() + player.pending_bonus;
        events.push(Event::Stayed {
            player: player.name.clone(),
            hand_sum: player.hand_sum(),
        });
    }

    /// Runs a whole round: seats are offered turns in order, over and over,
    /// until the round settles. Scores are folded into totals at the end.
    pub fn play_round(
        &mut self,
        operator: &mut dyn Operator,
        events: &mut EventBus,
    ) -> Result<RoundSummary, RoundError> {
        self.start_round(events);
        while !self.round_settled() {
            for index in 0..self.players.len() {
                if self.flip_seven.is_some() {
                    break;
                }
                self.take_turn(index, operator, events)?;
            }
        }
        Ok(self.finish_round(events))
    }
}
