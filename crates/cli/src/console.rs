use flip7_core::{Event, EventBus, Operator, Prompt};
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Line-oriented terminal front end. Every prompt reads one line; `exit`,
/// `quit` or end of input closes it.
pub struct Console<R, W> {
    input: R,
    output: W,
    closed: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", line.as_ref())
    }

    /// `Ok(None)` once input is closed.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.closed {
            return Ok(None);
        }
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.closed = true;
            return Ok(None);
        }
        let line = line.trim().to_string();
        if is_exit(&line) {
            self.closed = true;
            return Ok(None);
        }
        Ok(Some(line))
    }

    pub fn print_events(&mut self, events: &mut EventBus) -> io::Result<()> {
        let lines: Vec<String> = events.drain().map(|event| format_event(&event)).collect();
        for line in lines {
            self.say(format!("  {line}"))?;
        }
        Ok(())
    }

    fn show_prompt(&mut self, prompt: &Prompt, events: &mut EventBus) -> io::Result<Option<String>> {
        self.print_events(events)?;
        if let Prompt::Turn {
            player,
            bust_risk,
            advice,
        } = prompt
        {
            self.say(format!(
                "{player}: bust risk {:.1}%, advice {}",
                bust_risk * 100.0,
                advice.label()
            ))?;
        }
        self.read_line(&prompt_line(prompt))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Operator for Console<R, W> {
    /// A terminal IO failure closes input, which abandons the round.
    fn respond(&mut self, prompt: &Prompt, events: &mut EventBus) -> Option<String> {
        match self.show_prompt(prompt, events) {
            Ok(line) => line,
            Err(err) => {
                warn!(%err, "terminal io failed");
                self.closed = true;
                None
            }
        }
    }
}

pub fn is_exit(line: &str) -> bool {
    matches!(line.to_ascii_lowercase().as_str(), "exit" | "quit")
}

fn prompt_line(prompt: &Prompt) -> String {
    match prompt {
        Prompt::Turn { player, .. } => format!("{player} drew (card or stay)> "),
        Prompt::ForcedDraw { player, draw, of } => {
            format!("{player} flip three {draw}/{of} drew> ")
        }
        Prompt::Target {
            player,
            card,
            candidates,
        } => format!("{player} gives {card} to [{}]> ", candidates.join(", ")),
    }
}

pub fn format_event(event: &Event) -> String {
    match event {
        Event::RoundStarted {
            round,
            players,
            deck_remaining,
        } => format!("round {round} started: {players} players, {deck_remaining} cards left"),
        Event::CardDrawn {
            player,
            card,
            forced,
        } => format!(
            "{player} drew {card}{}",
            if *forced { " (flip three)" } else { "" }
        ),
        Event::InputRejected {
            player,
            input,
            reason,
        } => format!("{player}: '{input}' rejected: {reason}"),
        Event::Stayed { player, hand_sum } => format!("{player} stays on {hand_sum}"),
        Event::Busted { player, value } => format!("{player} busts on a second {value}"),
        Event::SecondChanceGained { player, held } => {
            format!("{player} holds a second chance ({held})")
        }
        Event::SecondChanceUsed {
            player,
            value,
            remaining,
        } => format!("{player} discards duplicate {value} with a second chance ({remaining} left)"),
        Event::SecondChanceTransferred { from, to } => {
            format!("{from} passes a second chance to {to}")
        }
        Event::SecondChanceDiscarded { player } => {
            format!("{player} discards a surplus second chance")
        }
        Event::Frozen { by, target } => format!("{by} freezes {target}"),
        Event::FlipThreeStarted { by, target } => format!("{by} makes {target} flip three"),
        Event::EffectSuppressed { player, card } => {
            format!("{player}'s {card} has no effect during flip three")
        }
        Event::TargetFizzled {
            player,
            card,
            reason,
        } => format!("{player}'s {card} fizzles: {reason}"),
        Event::ModifierHeld { player, card } => format!("{player} holds {card}"),
        Event::FlipSeven { player, bonus } => format!("FLIP 7! {player} gains {bonus} bonus"),
        Event::RoundScored {
            player,
            round_score,
            total_score,
        } => format!("{player} scored {round_score}, total {total_score}"),
        Event::RoundEnded { round, flip_seven } => match flip_seven {
            Some(player) => format!("round {round} ended by {player}'s flip 7"),
            None => format!("round {round} ended"),
        },
        Event::BonusAwarded {
            player,
            points,
            total_score,
        } => format!("{player} awarded {points}, total {total_score}"),
    }
}
