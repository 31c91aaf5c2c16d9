use flip7_core::{standard_composition, CardKind, Deck};
use flip7_data::{load_game_config, load_game_config_or_default, DECK_FILE, RULES_FILE};
use std::fs;
use std::path::{Path, PathBuf};

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flip7-data-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn write(dir: &Path, file: &str, body: &str) {
    fs::write(dir.join(file), body).expect("write fixture");
}

#[test]
fn bundled_assets_describe_the_standard_game() {
    let config = load_game_config(&assets_root()).expect("load config");
    assert_eq!(config.flip_seven_target, 7);
    assert_eq!(config.flip_seven_bonus, 15);
    assert_eq!(config.flip_three_draws, 3);
    assert_eq!(config.deck, standard_composition());
    let deck = Deck::from_counts(config.deck.iter().copied());
    assert_eq!(deck.total_remaining(), 94);
}

#[test]
fn deck_file_is_optional() {
    let dir = scratch_dir("no-deck");
    write(&dir, RULES_FILE, r#"{ "stay_threshold": 0.45 }"#);
    let config = load_game_config(&dir).expect("load config");
    assert_eq!(config.stay_threshold, 0.45);
    assert_eq!(config.deck, standard_composition());
}

#[test]
fn deck_file_replaces_composition() {
    let dir = scratch_dir("small-deck");
    write(&dir, RULES_FILE, "{}");
    write(
        &dir,
        DECK_FILE,
        r#"{ "cards": [ { "card": { "Number": 4 }, "count": 2 }, { "card": "Freeze", "count": 1 } ] }"#,
    );
    let config = load_game_config(&dir).expect("load config");
    let deck = Deck::from_counts(config.deck.iter().copied());
    assert_eq!(deck.total_remaining(), 3);
    assert_eq!(deck.count(CardKind::Number(4)), 2);
}

#[test]
fn invalid_rules_are_rejected_with_context() {
    let dir = scratch_dir("bad-threshold");
    write(&dir, RULES_FILE, r#"{ "stay_threshold": 2.0 }"#);
    let err = load_game_config(&dir).expect_err("threshold out of range");
    let message = format!("{err:#}");
    assert!(message.contains("validate"), "{message}");
    assert!(message.contains("stay threshold"), "{message}");
}

#[test]
fn malformed_json_names_the_file() {
    let dir = scratch_dir("bad-json");
    write(&dir, RULES_FILE, "{ not json");
    let err = load_game_config(&dir).expect_err("parse failure");
    assert!(format!("{err:#}").contains(RULES_FILE));
}

#[test]
fn missing_rules_fall_back_to_defaults() {
    let dir = scratch_dir("empty");
    let config = load_game_config_or_default(&dir).expect("defaults");
    assert_eq!(config.winning_score, 200);
    assert!(load_game_config(&dir).is_err());
}
