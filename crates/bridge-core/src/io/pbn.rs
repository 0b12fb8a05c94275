// cspell:ignore AKQJ
use crate::board::Seat;
use crate::card::Card;
use crate::error::ParseError;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;

/// Parses a PBN hand, `S.H.D.C` with suits high to low (`AKQJ.T98..5432`).
pub fn parse_hand(s: &str) -> Result<Hand, ParseError> {
    let suits: Vec<&str> = s.trim().split('.').collect();
    if suits.len() != 4 {
        return Err(ParseError::Hand(s.to_string()));
    }

    let mut cards = Vec::new();
    for (suit, ranks) in Suit::DESCENDING.into_iter().zip(suits) {
        for c in ranks.chars() {
            let rank = Rank::from_char(c).ok_or_else(|| ParseError::Hand(s.to_string()))?;
            cards.push(Card { suit, rank });
        }
    }
    Hand::try_new(cards)
}

/// Inverse of [`parse_hand`].
pub fn export_hand(hand: &Hand) -> String {
    hand.to_string()
}

/// Parses a PBN deal, `N:<hand> <hand> <hand> <hand>` listing hands
/// clockwise from the named seat. `-` or `?` marks a hand not shown.
/// The result is indexed by [`Seat::idx`].
pub fn parse_deal(s: &str) -> Result<[Option<Hand>; 4], ParseError> {
    let t = s.trim();
    let (first, rest) = t.split_once(':').ok_or_else(|| ParseError::Deal(s.to_string()))?;
    let first: Seat = first.parse()?;
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(ParseError::Deal(s.to_string()));
    }

    let mut hands: [Option<Hand>; 4] = Default::default();
    for (i, part) in parts.into_iter().enumerate() {
        if part == "-" || part == "?" {
            continue;
        }
        hands[first.offset(i).idx()] = Some(parse_hand(part)?);
    }
    Ok(hands)
}
