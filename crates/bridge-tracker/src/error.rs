use crate::deal::{Phase, TerminalSnapshot};
use crate::event::EventKind;
use bridge_core::{Card, InvalidTrick, ProtocolAnomaly, Seat};
use std::fmt;
use thiserror::Error;

/// Why a played card could not be taken from the player's hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMissing {
    /// The hand is known and does not hold the card.
    NotHeld,
    /// The card was already played earlier in this deal.
    AlreadyPlayed,
    /// Another seat's known hand holds the card.
    HeldBy(Seat),
}

impl fmt::Display for CardMissing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardMissing::NotHeld => write!(f, "not in hand"),
            CardMissing::AlreadyPlayed => write!(f, "already played"),
            CardMissing::HeldBy(seat) => write!(f, "held by {}", seat),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UndoError {
    #[error("cannot undo {requested} actions, only {recorded} recorded")]
    Exceeds { requested: u32, recorded: usize },
}

/// Every way applying an event can fail. None of them leave the deal
/// half-updated, and only a superseding `BoardMismatch` changes the
/// tracker at all.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("malformed event: {0}")]
    MalformedEvent(String),
    #[error("{event} is not valid while {phase}")]
    WrongPhase { event: EventKind, phase: Phase },
    #[error("{seat} cannot play {card}: {reason}")]
    CardNotInHand { seat: Seat, card: Card, reason: CardMissing },
    #[error("protocol anomaly: {0}")]
    ProtocolAnomaly(#[from] ProtocolAnomaly),
    #[error("claim of {claimed} tricks with only {remaining} left to play")]
    ClaimExceedsRemaining { claimed: u8, remaining: u8 },
    #[error(transparent)]
    Undo(#[from] UndoError),
    #[error(transparent)]
    InvalidTrick(#[from] InvalidTrick),
    /// Under `supersede_on_board_mismatch` the current deal has already
    /// been ended and the tracker is awaiting a deal.
    #[error("event for board {received} while tracking board {current}")]
    BoardMismatch {
        current: u32,
        received: u32,
        /// The deal this mismatch pushed out, if its result was still owed.
        superseded: Option<Box<TerminalSnapshot>>,
    },
}
