use flip7_core::{CardKind, Deck, ScoreModifier};

macro_rules! token_case {
    ($name:ident, $token:expr, $expected:expr) => {
        #[test]
        fn $name() {
            assert_eq!($token.parse::<CardKind>(), Ok($expected));
        }
    };
}

macro_rules! invalid_case {
    ($name:ident, $token:expr) => {
        #[test]
        fn $name() {
            assert!($token.parse::<CardKind>().is_err());
        }
    };
}

token_case!(token_zero, "0", CardKind::Number(0));
token_case!(token_nine, "9", CardKind::Number(9));
token_case!(token_ten, "10", CardKind::Number(10));
token_case!(token_twelve, "12", CardKind::Number(12));
token_case!(token_padded_number, "  7 ", CardKind::Number(7));
token_case!(token_leading_zero, "03", CardKind::Number(3));
token_case!(token_freeze, "Freeze", CardKind::Freeze);
token_case!(token_freeze_short, "f", CardKind::Freeze);
token_case!(token_flip_three, "Flip Three", CardKind::FlipThree);
token_case!(token_flip_three_dash, "flip-three", CardKind::FlipThree);
token_case!(token_flip3, "FLIP3", CardKind::FlipThree);
token_case!(token_f3, "f3", CardKind::FlipThree);
token_case!(token_second_chance, "second chance", CardKind::SecondChance);
token_case!(token_sc, "SC", CardKind::SecondChance);
token_case!(
    token_score_x2,
    "Score x2",
    CardKind::ScoreModifier(ScoreModifier::Double)
);
token_case!(
    token_double,
    "double",
    CardKind::ScoreModifier(ScoreModifier::Double)
);
token_case!(
    token_plus_two,
    "+2",
    CardKind::ScoreModifier(ScoreModifier::Plus2)
);
token_case!(
    token_score_plus_eight,
    "score +8",
    CardKind::ScoreModifier(ScoreModifier::Plus8)
);
token_case!(
    token_score_plus_ten,
    "Score +10",
    CardKind::ScoreModifier(ScoreModifier::Plus10)
);

invalid_case!(invalid_thirteen, "13");
invalid_case!(invalid_negative, "-1");
invalid_case!(invalid_mixed, "007x");
invalid_case!(invalid_empty, "");
invalid_case!(invalid_stay, "stay");
invalid_case!(invalid_plus_three, "+3");
invalid_case!(invalid_huge, "99999999999");
invalid_case!(invalid_split_digits, "1 2");
invalid_case!(invalid_split_pair, "4 5");

#[test]
fn every_deck_label_parses_back() {
    for entry in Deck::standard().entries() {
        assert_eq!(entry.card.to_string().parse::<CardKind>(), Ok(entry.card));
    }
}

#[test]
fn removal_drains_exactly_one_until_empty() {
    let mut deck = Deck::standard();
    for entry in Deck::standard().entries() {
        for left in (0..entry.count).rev() {
            assert!(deck.remove(entry.card));
            assert_eq!(deck.count(entry.card), left);
        }
        let total = deck.total_remaining();
        assert!(!deck.remove(entry.card));
        assert_eq!(deck.total_remaining(), total);
    }
    assert!(deck.is_empty());
}
