// cspell:ignore AKQJ
use crate::card::Card;
use crate::error::ParseError;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The cards one seat still holds, kept sorted spades-first, high to low,
/// so that two hands holding the same cards compare equal regardless of the
/// order cards were removed and restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(mut cards: Vec<Card>) -> Self {
        cards.sort_by(|a, b| b.cmp(a));
        cards.dedup();
        Self { cards }
    }

    /// Like [`Hand::new`] but rejects duplicates and more than 13 cards.
    pub fn try_new(cards: Vec<Card>) -> Result<Self, ParseError> {
        if cards.len() > 13 {
            return Err(ParseError::TooManyCards(cards.len()));
        }
        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(*card) {
                return Err(ParseError::DuplicateCard(card.to_string()));
            }
        }
        Ok(Self::new(cards))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.binary_search_by(|c| card.cmp(c)).is_ok()
    }

    /// Removes `card`, returning whether it was held.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.binary_search_by(|c| card.cmp(c)) {
            Ok(pos) => {
                self.cards.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Puts `card` back in sorted position. Returns false if already held.
    pub fn insert(&mut self, card: Card) -> bool {
        match self.cards.binary_search_by(|c| card.cmp(c)) {
            Ok(_) => false,
            Err(pos) => {
                self.cards.insert(pos, card);
                true
            }
        }
    }

    pub fn hcp(&self) -> u8 {
        self.cards
            .iter()
            .map(|c| match c.rank {
                Rank::Ace => 4,
                Rank::King => 3,
                Rank::Queen => 2,
                Rank::Jack => 1,
                _ => 0,
            })
            .sum()
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.cards.iter().filter(|c| c.suit == suit).count() as u8
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|c| c.suit == suit)
    }

    /// Cards of one suit, high to low.
    pub fn cards_in(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(move |c| c.suit == suit)
    }

    pub fn distribution(&self) -> [u8; 4] {
        [
            self.length(Suit::Spades),
            self.length(Suit::Hearts),
            self.length(Suit::Diamonds),
            self.length(Suit::Clubs),
        ]
    }

    /// Returns all suits tied for the longest length, highest suit first.
    pub fn longest_suits(&self) -> Vec<Suit> {
        let max_len = Suit::ALL.iter().map(|&s| self.length(s)).max().unwrap_or(0);
        Suit::DESCENDING
            .into_iter()
            .filter(|&s| self.length(s) == max_len)
            .collect()
    }
}

/// `S.H.D.C` with ranks high to low, the PBN hand layout.
impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, suit) in Suit::DESCENDING.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            for card in self.cards_in(*suit) {
                write!(f, "{}", card.rank.to_char())?;
            }
        }
        Ok(())
    }
}

/// What the tracker knows about one seat's cards. A hand the feed never
/// showed is `Unknown`, which is not the same as a known hand that has run
/// out of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HandState {
    #[default]
    Unknown,
    Known(Hand),
}

impl HandState {
    pub fn known(&self) -> Option<&Hand> {
        match self {
            HandState::Known(hand) => Some(hand),
            HandState::Unknown => None,
        }
    }

    pub fn known_mut(&mut self) -> Option<&mut Hand> {
        match self {
            HandState::Known(hand) => Some(hand),
            HandState::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, HandState::Known(_))
    }
}

impl From<Option<Hand>> for HandState {
    fn from(hand: Option<Hand>) -> Self {
        hand.map_or(HandState::Unknown, HandState::Known)
    }
}

impl fmt::Display for HandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandState::Known(hand) => write!(f, "{}", hand),
            HandState::Unknown => write!(f, "?"),
        }
    }
}
