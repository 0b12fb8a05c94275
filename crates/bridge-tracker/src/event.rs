use bridge_core::{Call, Card, Hand, Seat, Vulnerability};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One decoded message from the table feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Starts a deal. Hands are indexed by [`Seat::idx`]; `None` is a hand
    /// the feed did not show.
    NewDeal {
        board: u32,
        dealer: Seat,
        vulnerability: Vulnerability,
        hands: [Option<Hand>; 4],
    },
    /// The next call of the auction; the caller is inferred.
    CallMade { call: Call },
    /// The next card of the play; the player is inferred.
    CardPlayed { card: Card },
    /// The table accepted a claim. Without a claimer, declarer is assumed.
    ClaimAccepted { tricks_claimed: u8, claimer: Option<Seat> },
    /// Take back the last `count` calls or cards. The hint, when present,
    /// names the seat expected to act afterwards.
    Undo { count: u32, position_hint: Option<Seat> },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::NewDeal { .. } => EventKind::NewDeal,
            Event::CallMade { .. } => EventKind::CallMade,
            Event::CardPlayed { .. } => EventKind::CardPlayed,
            Event::ClaimAccepted { .. } => EventKind::ClaimAccepted,
            Event::Undo { .. } => EventKind::Undo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    NewDeal,
    CallMade,
    CardPlayed,
    ClaimAccepted,
    Undo,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::NewDeal => "new deal",
            EventKind::CallMade => "call",
            EventKind::CardPlayed => "card play",
            EventKind::ClaimAccepted => "claim",
            EventKind::Undo => "undo",
        };
        write!(f, "{}", s)
    }
}
