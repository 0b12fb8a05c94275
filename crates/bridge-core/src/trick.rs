use crate::board::Seat;
use crate::card::Card;
use crate::strain::Strain;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidTrick {
    #[error("a trick needs four cards, got {0}")]
    WrongSize(usize),
    #[error("card {0} appears twice in the trick")]
    DuplicateCard(Card),
}

/// Returns the seat that wins four cards led by `leader`.
///
/// Card `i` belongs to `leader.offset(i)`. Trumps beat everything else;
/// otherwise only cards of the led suit can win.
pub fn winner(leader: Seat, cards: &[Card], trump: Option<Suit>) -> Result<Seat, InvalidTrick> {
    if cards.len() != 4 {
        return Err(InvalidTrick::WrongSize(cards.len()));
    }
    for (i, card) in cards.iter().enumerate() {
        if cards[..i].contains(card) {
            return Err(InvalidTrick::DuplicateCard(*card));
        }
    }

    let led = cards[0].suit;
    let mut best = 0;
    for (i, card) in cards.iter().enumerate().skip(1) {
        if beats(*card, cards[best], led, trump) {
            best = i;
        }
    }
    Ok(leader.offset(best))
}

fn beats(challenger: Card, holder: Card, led: Suit, trump: Option<Suit>) -> bool {
    let is_trump = |c: Card| Some(c.suit) == trump;
    match (is_trump(challenger), is_trump(holder)) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => challenger.rank > holder.rank,
        (false, false) => challenger.suit == led && holder.suit == led && challenger.rank > holder.rank,
    }
}

/// One trick, complete or in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub leader: Seat,
    pub cards: Vec<Card>,
}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            cards: Vec::with_capacity(4),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == 4
    }

    /// Seat due to play the next card.
    pub fn seat_to_play(&self) -> Seat {
        self.leader.offset(self.cards.len())
    }

    pub fn led_suit(&self) -> Option<Suit> {
        self.cards.first().map(|c| c.suit)
    }

    /// Each card with the seat that played it.
    pub fn plays(&self) -> impl Iterator<Item = (Seat, Card)> + '_ {
        self.cards
            .iter()
            .enumerate()
            .map(move |(i, card)| (self.leader.offset(i), *card))
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn winner(&self, strain: Strain) -> Result<Seat, InvalidTrick> {
        winner(self.leader, &self.cards, strain.trump())
    }
}

impl fmt::Display for Trick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plays: Vec<String> = self
            .plays()
            .map(|(seat, card)| format!("{}:{}", seat, card))
            .collect();
        write!(f, "{}", plays.join(" "))
    }
}
