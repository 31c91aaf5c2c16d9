use super::*;
use crate::Event;
use tracing::info;

impl RoundEngine {
    /// Scores the round: busted hands count zero, everyone else scores the
    /// sum of their numbers plus any instant bonus. Calling it again before
    /// the next round only rebuilds the summary.
    pub fn finish_round(&mut self, events: &mut EventBus) -> RoundSummary {
        if self.in_round {
            self.in_round = false;
            for player in &mut self.players {
                player.round_score = match player.status {
                    PlayerStatus::Busted => 0,
                    _ => player.hand_sum() + player.pending_bonus,
                };
                player.total_score += player.round_score;
                events.push(Event::RoundScored {
                    player: player.name.clone(),
                    round_score: player.round_score,
                    total_score: player.total_score,
                });
            }
            let flip_seven = self.flip_seven().map(|player| player.name.clone());
            info!(round = self.round, flip_seven = ?flip_seven, "round finished");
            events.push(Event::RoundEnded {
                round: self.round,
                flip_seven,
            });
        }
        self.summary()
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            round: self.round,
            flip_seven: self.flip_seven().map(|player| player.name.clone()),
            results: self
                .players
                .iter()
                .enumerate()
                .map(|(index, player)| PlayerResult {
                    name: player.name.clone(),
                    status: player.status,
                    hand: player.hand.clone(),
                    round_score: player.round_score,
                    total_score: player.total_score,
                    flip_seven: self.flip_seven == Some(index),
                })
                .collect(),
            winners: self.winners(),
        }
    }

    /// Players by total score, highest first; ties keep seating order.
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        ranked
    }

    pub fn winners(&self) -> Vec<String> {
        let Some(top) = self.players.iter().map(|player| player.total_score).max() else {
            return Vec::new();
        };
        if top < self.config.winning_score {
            return Vec::new();
        }
        self.players
            .iter()
            .filter(|player| player.total_score == top)
            .map(|player| player.name.clone())
            .collect()
    }

    /// Adds operator-entered points, e.g. a score modifier settled at the
    /// table. Totals only ever grow.
    pub fn award_bonus(
        &mut self,
        name: &str,
        points: u32,
        events: &mut EventBus,
    ) -> Result<u32, SessionError> {
        let index = self
            .find_player(name)
            .ok_or_else(|| SessionError::UnknownPlayer(name.trim().to_string()))?;
        let player = &mut self.players[index];
        player.total_score += points;
        events.push(Event::BonusAwarded {
            player: player.name.clone(),
            points,
            total_score: player.total_score,
        });
        Ok(player.total_score)
    }
}
