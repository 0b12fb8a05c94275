// cspell:ignore SAKQHJT SAKQ
use crate::card::Card;
use crate::error::ParseError;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;
use regex::Regex;
use std::sync::OnceLock;

fn hand_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^(?:[SHDC][2-9TJQKA]*)*$").expect("valid regex"))
}

/// Parses a LIN hand: each suit letter followed by its ranks, e.g.
/// `SAKQHJT9D8765C432`. Suits may appear in any order or be omitted.
pub fn parse_hand(s: &str) -> Result<Hand, ParseError> {
    let t = s.trim();
    if !hand_pattern().is_match(t) {
        return Err(ParseError::Hand(s.to_string()));
    }

    let mut cards = Vec::new();
    let mut suit = None;
    for c in t.chars() {
        if let Some(next) = Suit::from_char(c) {
            suit = Some(next);
            continue;
        }
        let (Some(suit), Some(rank)) = (suit, Rank::from_char(c)) else {
            return Err(ParseError::Hand(s.to_string()));
        };
        cards.push(Card { suit, rank });
    }
    Hand::try_new(cards)
}

/// Renders a hand the way [`parse_hand`] reads it, spades first.
pub fn export_hand(hand: &Hand) -> String {
    let mut s = String::new();
    for suit in Suit::DESCENDING {
        s.push(suit.to_char());
        for card in hand.cards_in(suit) {
            s.push(card.rank.to_char());
        }
    }
    s
}
