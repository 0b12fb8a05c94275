use thiserror::Error;

/// Failure to read one of the textual encodings used on the wire
/// (`SA`, `1NT`, `N`, `SAKQHJT...`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid suit: {0:?}")]
    Suit(String),
    #[error("invalid rank: {0:?}")]
    Rank(String),
    #[error("invalid card: {0:?}")]
    Card(String),
    #[error("invalid call: {0:?}")]
    Call(String),
    #[error("invalid seat: {0:?}")]
    Seat(String),
    #[error("invalid vulnerability: {0:?}")]
    Vulnerability(String),
    #[error("invalid deal: {0:?}")]
    Deal(String),
    #[error("invalid hand: {0:?}")]
    Hand(String),
    #[error("hand has {0} cards, at most 13 allowed")]
    TooManyCards(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(String),
}
