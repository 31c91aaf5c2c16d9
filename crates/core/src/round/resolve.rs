use super::input::{parse_turn_input, TurnInput};
use super::*;
use crate::Event;
use tracing::debug;

impl RoundEngine {
    /// Takes `card` out of the deck and applies it to the player in seat
    /// `index`. The round must be live and the seat Active; a card with no
    /// copies left is refused before any hand logic.
    pub fn draw(
        &mut self,
        index: usize,
        card: CardKind,
        mode: DrawMode,
        operator: &mut dyn Operator,
        events: &mut EventBus,
    ) -> Result<DrawOutcome, RoundError> {
        self.ensure_live()?;
        let seat = self.seat(index)?;
        if !seat.is_active() {
            return Err(RoundError::SeatNotActive(index));
        }
        let name = seat.name.clone();
        if !self.deck.remove(card) {
            return Err(InputError::CardUnavailable(card).into());
        }
        debug!(player = %name, %card, ?mode, remaining = self.deck.count(card), "card drawn");
        events.push(Event::CardDrawn {
            player: name,
            card,
            forced: mode == DrawMode::Forced,
        });
        self.resolve_draw(index, card, mode, operator, events)
    }

    /// Applies a card that has already left the deck. Normal turns and Flip
    /// Three sub-draws share this path; `mode` decides whether Freeze and
    /// Flip Three take effect.
    fn resolve_draw(
        &mut self,
        index: usize,
        card: CardKind,
        mode: DrawMode,
        operator: &mut dyn Operator,
        events: &mut EventBus,
    ) -> Result<DrawOutcome, RoundError> {
        match card {
            CardKind::Number(value) => Ok(self.resolve_number(index, value, events)),
            CardKind::Freeze | CardKind::FlipThree if mode == DrawMode::Forced => {
                events.push(Event::EffectSuppressed {
                    player: self.players[index].name.clone(),
                    card,
                });
                Ok(DrawOutcome::Continue)
            }
            CardKind::Freeze => {
                self.resolve_freeze(index, operator, events)?;
                Ok(DrawOutcome::Continue)
            }
            CardKind::FlipThree => self.resolve_flip_three(index, operator, events),
            CardKind::SecondChance => {
                self.resolve_second_chance(index, operator, events)?;
                Ok(DrawOutcome::Continue)
            }
            CardKind::ScoreModifier(_) => {
                // Held for display only; scoring does not read modifiers.
                let player = &mut self.players[index];
                player.hand.push(card);
                events.push(Event::ModifierHeld {
                    player: player.name.clone(),
                    card,
                });
                Ok(DrawOutcome::Continue)
            }
        }
    }

    fn resolve_number(&mut self, index: usize, value: u8, events: &mut EventBus) -> DrawOutcome {
        let target = self.config.flip_seven_target;
        let bonus = self.config.flip_seven_bonus;
        let player = &mut self.players[index];
        if player.holds_number(value) {
            if player.second_chances > 0 {
                player.second_chances -= 1;
                events.push(Event::SecondChanceUsed {
                    player: player.name.clone(),
                    value,
                    remaining: player.second_chances,
                });
                return DrawOutcome::Continue;
            }
            player.status = PlayerStatus::Busted;
            player.round_score = 0;
            debug!(player = %player.name, value, "busted");
            events.push(Event::Busted {
                player: player.name.clone(),
                value,
            });
            return DrawOutcome::Busted;
        }
        player.hand.push(CardKind::Number(value));
        if player.distinct_numbers() >= target {
            player.pending_bonus += bonus;
            player.round_score = player.hand_sum() + player.pending_bonus;
            events.push(Event::FlipSeven {
                player: player.name.clone(),
                bonus,
            });
            self.flip_seven = Some(index);
            return DrawOutcome::FlipSeven;
        }
        player.round_score = player.hand_sum() + player.pending_bonus;
        DrawOutcome::Continue
    }

    fn resolve_freeze(
        &mut self,
        index: usize,
        operator: &mut dyn Operator,
        events: &mut EventBus,
    ) -> Result<(), RoundError> {
        let Some(target) = self.pick_target(index, CardKind::Freeze, operator, events)? else {
            return Ok(());
        };
        let by = self.players[index].name.clone();
        let frozen = &mut self.players[target];
        frozen.status = PlayerStatus::Frozen;
        frozen.round_score = frozen.hand_sum() + frozen.pending_bonus;
        events.push(Event::Frozen {
            by,
            target: frozen.name.clone(),
        });
        Ok(())
    }

    fn resolve_flip_three(
        &mut self,
        index: usize,
        operator: &mut dyn Operator,
        events: &mut EventBus,
    ) -> Result<DrawOutcome, RoundError> {
        let Some(target) = self.pick_target(index, CardKind::FlipThree, operator, events)? else {
            return Ok(DrawOutcome::Continue);
        };
        events.push(Event::FlipThreeStarted {
            by: self.players[index].name.clone(),
            target: self.players[target].name.clone(),
        });
        let draws = self.config.flip_three_draws;
        for draw in 1..=draws {
            if self.deck.is_empty() {
                debug!(draw, draws, "deck ran out during flip three");
                break;
            }
            match self.forced_draw(target, draw, draws, operator, events)? {
                DrawOutcome::Continue => {}
                DrawOutcome::Busted => break,
                DrawOutcome::FlipSeven => return Ok(DrawOutcome::FlipSeven),
            }
        }
        if self.players[index].status == PlayerStatus::Busted {
            Ok(DrawOutcome::Busted)
        } else {
            Ok(DrawOutcome::Continue)
        }
    }

    fn forced_draw(
        &mut self,
        target: usize,
        draw: usize,
        of: usize,
        operator: &mut dyn Operator,
        events: &mut EventBus,
    ) -> Result<DrawOutcome, RoundError> {
        let prompt = Prompt::ForcedDraw {
            player: self.players[target].name.clone(),
            draw,
            of,
        };
        loop {
            let raw = operator
                .respond(&prompt, events)
                .ok_or(RoundError::InputClosed)?;
            let card = match parse_turn_input(&raw) {
                Ok(TurnInput::Draw(card)) => card,
                Ok(TurnInput::Stay) => {
                    self.reject(target, &raw, &InputError::StayNotAllowed, events);
                    continue;
                }
                Err(err) => {
                    self.reject(target, &raw, &err, events);
                    continue;
                }
            };
            match self.draw(target, card, DrawMode::Forced, operator, events) {
                Err(RoundError::Input(err)) => self.reject(target, &raw, &err, events),
                other => return other,
            }
        }
    }

    fn resolve_second_chance(
        &mut self,
        index: usize,
        operator: &mut dyn Operator,
        events: &mut EventBus,
    ) -> Result<(), RoundError> {
        let max = self.config.max_second_chances;
        let player = &mut self.players[index];
        player.second_chances += 1;
        events.push(Event::SecondChanceGained {
            player: player.name.clone(),
            held: player.second_chances,
        });
        if player.second_chances <= max {
            return Ok(());
        }
        player.second_chances = max;
        let from = player.name.clone();
        match self.pick_target(index, CardKind::SecondChance, operator, events)? {
            Some(target) => {
                let recipient = &mut self.players[target];
                recipient.second_chances += 1;
                events.push(Event::SecondChanceTransferred {
                    from,
                    to: recipient.name.clone(),
                });
            }
            None => events.push(Event::SecondChanceDiscarded { player: from }),
        }
        Ok(())
    }

    /// Seats that may receive `card` from the player in seat `drawer`.
    pub fn eligible_targets(&self, drawer: usize, card: CardKind) -> Vec<usize> {
        (0..self.players.len())
            .filter(|&index| self.check_target(drawer, index, card).is_ok())
            .collect()
    }

    fn check_target(&self, drawer: usize, target: usize, card: CardKind) -> Result<(), TargetError> {
        let player = &self.players[target];
        if target == drawer && card != CardKind::FlipThree {
            return Err(TargetError::SelfTarget);
        }
        if !player.is_active() {
            return Err(TargetError::NotActive(player.name.clone()));
        }
        if card == CardKind::SecondChance && player.second_chances >= self.config.max_second_chances {
            return Err(TargetError::AtCapacity(player.name.clone()));
        }
        Ok(())
    }

    /// Asks for one target name. An unusable answer drops the effect.
    fn pick_target(
        &self,
        drawer: usize,
        card: CardKind,
        operator: &mut dyn Operator,
        events: &mut EventBus,
    ) -> Result<Option<usize>, RoundError> {
        let candidates = self.eligible_targets(drawer, card);
        if candidates.is_empty() {
            self.fizzle(drawer, card, &TargetError::NoEligibleTarget, events);
            return Ok(None);
        }
        let prompt = Prompt::Target {
            player: self.players[drawer].name.clone(),
            card,
            candidates: candidates
                .iter()
                .map(|&index| self.players[index].name.clone())
                .collect(),
        };
        let raw = operator
            .respond(&prompt, events)
            .ok_or(RoundError::InputClosed)?;
        let checked = self
            .find_player(&raw)
            .ok_or_else(|| TargetError::UnknownPlayer(raw.trim().to_string()))
            .and_then(|target| self.check_target(drawer, target, card).map(|_| target));
        match checked {
            Ok(target) => Ok(Some(target)),
            Err(err) => {
                self.fizzle(drawer, card, &err, events);
                Ok(None)
            }
        }
    }

    fn fizzle(&self, drawer: usize, card: CardKind, err: &TargetError, events: &mut EventBus) {
        debug!(player = %self.players[drawer].name, %card, %err, "target refused");
        events.push(Event::TargetFizzled {
            player: self.players[drawer].name.clone(),
            card,
            reason: err.to_string(),
        });
    }
}
