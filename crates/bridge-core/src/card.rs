use crate::error::ParseError;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// All 52 cards, clubs first, each suit ascending.
    pub fn deck() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card { suit, rank }))
    }
}

impl FromStr for Card {
    type Err = ParseError;

    /// Accepts suit-first (`SA`, `H10`, `♠Q`) and rank-first (`AS`, `10H`) forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let bad = || ParseError::Card(s.to_string());
        let first = t.chars().next().ok_or_else(bad)?;
        let last = t.chars().last().ok_or_else(bad)?;

        if let Some(suit) = Suit::from_char(first) {
            let rank: Rank = t[first.len_utf8()..].parse().map_err(|_| bad())?;
            return Ok(Card { suit, rank });
        }
        if let Some(suit) = Suit::from_char(last) {
            let rank: Rank = t[..t.len() - last.len_utf8()].parse().map_err(|_| bad())?;
            return Ok(Card { suit, rank });
        }
        Err(bad())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.to_char(), self.rank.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_parsing() {
        assert_eq!("SA".parse::<Card>(), Ok(Card::new(Suit::Spades, Rank::Ace)));
        assert_eq!("h10".parse::<Card>(), Ok(Card::new(Suit::Hearts, Rank::Ten)));
        assert_eq!("♦Q".parse::<Card>(), Ok(Card::new(Suit::Diamonds, Rank::Queen)));
        assert_eq!("7C".parse::<Card>(), Ok(Card::new(Suit::Clubs, Rank::Seven)));
        assert!("".parse::<Card>().is_err());
        assert!("SZ".parse::<Card>().is_err());
        assert!("XX".parse::<Card>().is_err());
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::new(Suit::Spades, Rank::Ten).to_string(), "ST");
        assert_eq!(Card::new(Suit::Clubs, Rank::Two).to_string(), "C2");
    }

    #[test]
    fn test_deck_is_complete() {
        let deck: Vec<Card> = Card::deck().collect();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck[0], Card::new(Suit::Clubs, Rank::Two));
        assert_eq!(deck[51], Card::new(Suit::Spades, Rank::Ace));
    }
}
