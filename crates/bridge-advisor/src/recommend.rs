use crate::table::DoubleDummyTable;
use bridge_core::{Card, Hand, Seat, Suit};
use bridge_tracker::{Deal, Phase};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Accept a table that only names a board number when that number sits
    /// at the same place in the 16-board cycle. Different deals can pass
    /// this check.
    pub board_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub seat: Seat,
    pub card: Card,
    pub estimated_tricks: u8,
    pub rationale: String,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} plays {}: {}", self.seat, self.card, self.rationale)
    }
}

/// Why no card was suggested. All of these are expected along the way
/// and none is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoRecommendation {
    #[error("no legal card for {0}")]
    Empty(Seat),
    #[error("no analysis for this deal")]
    StaleOrMissingAnalysis,
    #[error("nothing to play while {0}")]
    NotPlaying(Phase),
    #[error("{0}'s hand is not known")]
    HandUnknown(Seat),
}

/// Cards `hand` may play to a trick led in `led`: that suit if the hand
/// holds it, otherwise anything.
pub fn legal_cards(hand: &Hand, led: Option<Suit>) -> Vec<Card> {
    match led {
        Some(suit) if hand.has_suit(suit) => hand.cards_in(suit).collect(),
        _ => hand.cards().to_vec(),
    }
}

pub fn recommend(deal: &Deal, table: Option<&DoubleDummyTable>) -> Result<Recommendation, NoRecommendation> {
    recommend_with(&AdvisorConfig::default(), deal, table)
}

/// Suggests a card for the seat on play.
///
/// The estimate is a static read of the table for the contract strain:
/// declarer's entry for the declaring side, the rest of the 13 for the
/// defence. Every legal card gets the same estimate, so the choice comes
/// down to the highest card of the longest legal suit, higher suits first
/// on equal length.
pub fn recommend_with(
    config: &AdvisorConfig,
    deal: &Deal,
    table: Option<&DoubleDummyTable>,
) -> Result<Recommendation, NoRecommendation> {
    let phase = deal.phase();
    let (Some(info), Some(trick)) = (deal.contract(), deal.current_trick()) else {
        return Err(NoRecommendation::NotPlaying(phase));
    };
    if phase != Phase::Playing {
        return Err(NoRecommendation::NotPlaying(phase));
    }

    let seat = trick.seat_to_play();
    let hand = deal.hand(seat).known().ok_or(NoRecommendation::HandUnknown(seat))?;
    let legal = legal_cards(hand, trick.led_suit());
    if legal.is_empty() {
        return Err(NoRecommendation::Empty(seat));
    }

    let table = table
        .filter(|t| analysis_matches(config, deal, t))
        .ok_or(NoRecommendation::StaleOrMissingAnalysis)?;
    let strain = info.contract.strain;
    let declarer_tricks = table
        .tricks(info.declarer, strain)
        .ok_or(NoRecommendation::StaleOrMissingAnalysis)?;
    let estimate = |_card: &Card| {
        if info.is_declaring_side(seat) {
            declarer_tricks
        } else {
            13u8.saturating_sub(declarer_tricks)
        }
    };

    let legal_hand = Hand::new(legal.clone());
    let longest = legal_hand.longest_suits().first().copied();
    let Some(card) = legal
        .iter()
        .copied()
        .max_by_key(|card| (estimate(card), Some(card.suit) == longest, card.rank))
    else {
        return Err(NoRecommendation::Empty(seat));
    };
    let estimated_tricks = estimate(&card);
    debug!(%seat, %card, estimated_tricks, candidates = legal.len(), "recommendation");

    let side = seat.partnership();
    let rationale = format!(
        "{} can take {} tricks in {}; {} is the top of the longest {} suit",
        side,
        estimated_tricks,
        strain,
        card,
        if trick.is_empty() { "remaining" } else { "legal" },
    );
    Ok(Recommendation {
        seat,
        card,
        estimated_tricks,
        rationale,
    })
}

/// Whether `table` describes `deal`, allowing the board-cycle fallback when
/// configured.
pub(crate) fn analysis_matches(config: &AdvisorConfig, deal: &Deal, table: &DoubleDummyTable) -> bool {
    let current = deal.fingerprint();
    if table.fingerprint.matches(&current) {
        return true;
    }
    config.board_fallback && table.fingerprint.hands.is_none() && table.fingerprint.same_board_cycle(&current)
}
