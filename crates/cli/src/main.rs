use anyhow::Context;
use clap::Parser;
use flip7_core::{EventBus, GameConfig, RoundEngine, RoundError};
use flip7_data::load_game_config_or_default;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod console;

use console::Console;

#[derive(Parser, Debug)]
#[command(name = "flip7")]
#[command(about = "Track a Flip 7 table: deck, hands, bust odds and scores")]
struct Args {
    /// Directory holding rules.json and an optional deck.json
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Bust risk at or above which the advice is to stay
    #[arg(long)]
    threshold: Option<f64>,

    /// Seat a player by name; repeat in seating order
    #[arg(long = "player", value_name = "NAME")]
    players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Round,
    Scores,
    Deck,
    Odds,
    Bonus { name: String, points: u32 },
    Help,
    Exit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = parts.collect();
    match head.to_ascii_lowercase().as_str() {
        "round" | "r" => Ok(Command::Round),
        "scores" | "score" => Ok(Command::Scores),
        "deck" => Ok(Command::Deck),
        "odds" => Ok(Command::Odds),
        "help" | "?" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        "bonus" => {
            let Some((points, name)) = rest.split_last() else {
                return Err("usage: bonus <name> <points>".to_string());
            };
            if name.is_empty() {
                return Err("usage: bonus <name> <points>".to_string());
            }
            let points = points
                .parse::<u32>()
                .map_err(|_| format!("'{points}' is not a point value"))?;
            Ok(Command::Bonus {
                name: name.join(" "),
                points,
            })
        }
        other => Err(format!("unknown command '{other}', try help")),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut config = load_game_config_or_default(&args.assets)
        .with_context(|| format!("load rules from {}", args.assets.display()))?;
    if let Some(threshold) = args.threshold {
        config.stay_threshold = threshold;
        config.validate().context("--threshold")?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    let Some(mut engine) = seat_players(&mut console, config, &args.players)? else {
        return Ok(());
    };
    info!(players = engine.players().len(), "session started");
    run_session(&mut engine, &mut console).context("terminal io")?;
    Ok(())
}

/// Builds the engine from `--player` names, or asks for them. Returns
/// `None` if input closes first.
fn seat_players<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: GameConfig,
    preset: &[String],
) -> anyhow::Result<Option<RoundEngine>> {
    if !preset.is_empty() {
        let engine = RoundEngine::new(config, preset).context("--player")?;
        return Ok(Some(engine));
    }
    loop {
        let Some(line) = console.read_line("number of players> ")? else {
            return Ok(None);
        };
        let count = match line.parse::<usize>() {
            Ok(count) if count > 0 => count,
            _ => {
                console.say("enter a positive number")?;
                continue;
            }
        };
        let mut names = Vec::with_capacity(count);
        for seat in 1..=count {
            let Some(name) = console.read_line(&format!("name of player {seat}> "))? else {
                return Ok(None);
            };
            names.push(name);
        }
        match RoundEngine::new(config.clone(), &names) {
            Ok(engine) => return Ok(Some(engine)),
            Err(err) => console.say(format!("cannot seat players: {err}"))?,
        }
    }
}

fn run_session<R: BufRead, W: Write>(
    engine: &mut RoundEngine,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let mut events = EventBus::default();
    print_help(console)?;
    while let Some(line) = console.read_line("flip7> ")? {
        if line.is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                console.say(message)?;
                continue;
            }
        };
        match command {
            Command::Round => play_round(engine, console, &mut events)?,
            Command::Scores => print_scores(engine, console)?,
            Command::Deck => print_deck(engine, console)?,
            Command::Odds => print_odds(engine, console)?,
            Command::Bonus { name, points } => {
                if let Err(err) = engine.award_bonus(&name, points, &mut events) {
                    console.say(err.to_string())?;
                }
                console.print_events(&mut events)?;
            }
            Command::Help => print_help(console)?,
            Command::Exit => break,
        }
        if console.is_closed() {
            break;
        }
    }
    Ok(())
}

fn play_round<R: BufRead, W: Write>(
    engine: &mut RoundEngine,
    console: &mut Console<R, W>,
    events: &mut EventBus,
) -> io::Result<()> {
    let outcome = engine.play_round(console, events);
    console.print_events(events)?;
    match outcome {
        Ok(summary) => {
            if !summary.winners.is_empty() {
                console.say(format!("winner: {}", summary.winners.join(", ")))?;
            }
        }
        Err(RoundError::InputClosed) => {
            warn!(round = engine.round_number(), "input closed mid-round");
            console.say("input closed, round abandoned")?;
        }
        Err(err) => console.say(format!("round failed: {err}"))?,
    }
    Ok(())
}

fn print_scores<R: BufRead, W: Write>(
    engine: &RoundEngine,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.say(format!("after round {}:", engine.round_number()))?;
    let flip_seven = engine.flip_seven().map(|player| player.name.as_str());
    for player in engine.standings() {
        let hand: Vec<String> = player.hand.iter().map(ToString::to_string).collect();
        let status = if flip_seven == Some(player.name.as_str()) {
            "flip 7"
        } else {
            player.status.label()
        };
        console.say(format!(
            "  {:<12} total {:>4}  round {:>3}  {:<7} [{}]",
            player.name,
            player.total_score,
            player.round_score,
            status,
            hand.join(" ")
        ))?;
    }
    Ok(())
}

fn print_deck<R: BufRead, W: Write>(
    engine: &RoundEngine,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let deck = engine.deck();
    console.say(format!("{} cards left", deck.total_remaining()))?;
    for entry in deck.entries() {
        console.say(format!("  {:<14} {}", entry.card.to_string(), entry.count))?;
    }
    Ok(())
}

fn print_odds<R: BufRead, W: Write>(
    engine: &RoundEngine,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let deck = engine.deck();
    let total = deck.total_remaining();
    if total == 0 {
        return console.say("deck is empty");
    }
    for entry in deck.entries().filter(|entry| entry.count > 0) {
        let share = f64::from(entry.count) / f64::from(total) * 100.0;
        console.say(format!("  {:<14} {:>5.1}%", entry.card.to_string(), share))?;
    }
    for (index, player) in engine.players().iter().enumerate() {
        if let (Some(risk), Some(advice)) = (engine.bust_risk(index), engine.advice(index)) {
            console.say(format!(
                "  {} busts on next draw: {:.1}% ({})",
                player.name,
                risk * 100.0,
                advice.label()
            ))?;
        }
    }
    Ok(())
}

fn print_help<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.say("commands:")?;
    console.say("  round                 play a round, entering each drawn card")?;
    console.say("  scores                standings and current hands")?;
    console.say("  deck                  cards left in the deck")?;
    console.say("  odds                  draw chances and bust risk per player")?;
    console.say("  bonus <name> <points> add points to a player's total")?;
    console.say("  help | exit")?;
    console.say("during a round: type the drawn card (0-12, freeze, flip3, sc, x2, +4...) or stay")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).expect("utf8")
    }

    #[test]
    fn commands_parse() {
        assert_eq!(parse_command("ROUND"), Ok(Command::Round));
        assert_eq!(parse_command("quit"), Ok(Command::Exit));
        assert_eq!(
            parse_command("bonus Mary Ann 10"),
            Ok(Command::Bonus {
                name: "Mary Ann".to_string(),
                points: 10
            })
        );
        assert!(parse_command("bonus 10").is_err());
        assert!(parse_command("bonus Ada ten").is_err());
        assert!(parse_command("shuffle").is_err());
    }

    #[test]
    fn seating_retries_after_duplicate_names() {
        let mut console = console("2\nAda\nada\nx\n2\nAda\nBob\n");
        let engine = seat_players(&mut console, GameConfig::default(), &[])
            .expect("seat")
            .expect("engine");
        let names: Vec<&str> = engine.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Ada", "Bob"]);
        let text = output(console);
        assert!(text.contains("duplicate player name"), "{text}");
        assert!(text.contains("enter a positive number"), "{text}");
    }

    #[test]
    fn preset_players_skip_prompts() {
        let mut console = console("");
        let preset = vec!["Ada".to_string()];
        let engine = seat_players(&mut console, GameConfig::default(), &preset)
            .expect("seat")
            .expect("engine");
        assert_eq!(engine.players().len(), 1);
    }

    #[test]
    fn session_plays_a_round_and_reports_scores() {
        let mut engine =
            RoundEngine::new(GameConfig::default(), ["Ada"]).expect("engine");
        let mut console = console("round\n5\nstay\nbonus ada 4\nscores\nexit\n");
        run_session(&mut engine, &mut console).expect("session");
        assert_eq!(engine.players()[0].total_score, 9);
        let text = output(console);
        assert!(text.contains("Ada scored 5, total 5"), "{text}");
        assert!(text.contains("Ada awarded 4, total 9"), "{text}");
    }

    #[test]
    fn exit_mid_round_abandons_it() {
        let mut engine =
            RoundEngine::new(GameConfig::default(), ["Ada"]).expect("engine");
        let mut console = console("round\n5\nexit\nscores\n");
        run_session(&mut engine, &mut console).expect("session");
        assert_eq!(engine.players()[0].total_score, 0);
        let text = output(console);
        assert!(text.contains("round abandoned"), "{text}");
        assert!(!text.contains("after round"), "{text}");
    }

    #[test]
    fn scores_mark_the_flip_seven_player() {
        let mut engine =
            RoundEngine::new(GameConfig::default(), ["Ada"]).expect("engine");
        let mut console = console("round\n0\n1\n2\n3\n4\n5\n6\nscores\nexit\n");
        run_session(&mut engine, &mut console).expect("session");
        let text = output(console);
        assert!(text.contains("round  36  flip 7"), "{text}");
    }
}
