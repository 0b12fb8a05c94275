use crate::board::Seat;
use crate::call::Call;
use crate::contract::{BiddingState, ProtocolAnomaly};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calls in the order they were made. Seats are never stored: call `i` was
/// made by `dealer.offset(i)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Auction {
    pub dealer: Seat,
    pub calls: Vec<Call>,
}

impl Auction {
    pub fn new(dealer: Seat) -> Self {
        Self {
            dealer,
            calls: Vec::new(),
        }
    }

    /// Build an auction from space-separated calls like "P 1C P 2C".
    /// Panics on invalid input. Meant for tests and known-good data.
    pub fn bidding(dealer: Seat, calls: &str) -> Self {
        let mut auction = Self::new(dealer);
        for token in calls.split_whitespace() {
            auction.add_call(token.parse().expect("invalid call"));
        }
        auction
    }

    pub fn iter(&self) -> impl Iterator<Item = (Seat, &Call)> {
        let dealer = self.dealer;
        self.calls
            .iter()
            .enumerate()
            .map(move |(i, call)| (dealer.offset(i), call))
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn add_call(&mut self, call: Call) {
        self.calls.push(call);
    }

    pub fn pop_call(&mut self) -> Option<Call> {
        self.calls.pop()
    }

    /// Seat that made (or will make) call number `index`.
    pub fn seat_at(&self, index: usize) -> Seat {
        self.dealer.offset(index)
    }

    pub fn current_seat(&self) -> Seat {
        self.seat_at(self.calls.len())
    }

    /// At least four calls, the last three passes, and either a non-pass
    /// before them or exactly four passes in total.
    pub fn is_complete(&self) -> bool {
        let n = self.calls.len();
        if n < 4 {
            return false;
        }
        if !self.calls[n - 3..].iter().all(Call::is_pass) {
            return false;
        }
        !self.calls[n - 4].is_pass() || n == 4
    }

    pub fn is_passed_out(&self) -> bool {
        self.calls.len() == 4 && self.calls.iter().all(Call::is_pass)
    }

    /// Returns the last bid (not pass/double/redouble) and who made it.
    pub fn last_bid(&self) -> Option<(Seat, &Call)> {
        self.iter().filter(|(_, call)| call.is_bid()).last()
    }

    /// Whether `call` would be legal as the next call.
    pub fn check_call(&self, call: Call) -> Result<(), ProtocolAnomaly> {
        let seat = self.current_seat();
        if self.is_complete() {
            return Err(ProtocolAnomaly::CallAfterClose { seat, call });
        }
        let (state, _) = BiddingState::replay(self);
        state.check(seat, call)
    }

    /// Every illegal call made so far, in order.
    pub fn anomalies(&self) -> Vec<ProtocolAnomaly> {
        BiddingState::replay(self).1
    }
}

impl fmt::Display for Auction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.calls.iter().map(|c| c.render()).collect();
        write!(f, "{}", rendered.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strain::Strain;

    #[test]
    fn test_auction_finished() {
        let mut auction = Auction::new(Seat::North);
        auction.add_call(Call::Bid { level: 1, strain: Strain::Spades });
        auction.add_call(Call::Pass);
        auction.add_call(Call::Pass);
        assert!(!auction.is_complete());
        auction.add_call(Call::Pass);
        assert!(auction.is_complete());
        assert!(!auction.is_passed_out());
    }

    #[test]
    fn test_pass_out_needs_four_passes() {
        let mut auction = Auction::bidding(Seat::West, "P P P");
        assert!(!auction.is_complete());
        auction.add_call(Call::Pass);
        assert!(auction.is_complete());
        assert!(auction.is_passed_out());
    }

    #[test]
    fn test_late_opening_keeps_auction_open() {
        let auction = Auction::bidding(Seat::North, "P P P 1C P P");
        assert!(!auction.is_complete());
        let auction = Auction::bidding(Seat::North, "P P P 1C P P P");
        assert!(auction.is_complete());
    }

    #[test]
    fn test_seat_inference() {
        let mut auction = Auction::new(Seat::East);
        assert_eq!(auction.current_seat(), Seat::East);
        auction.add_call(Call::Pass);
        assert_eq!(auction.current_seat(), Seat::South);
        assert_eq!(auction.seat_at(4), Seat::East);
        assert_eq!(auction.seat_at(7), Seat::North);
        let seats: Vec<Seat> = Auction::bidding(Seat::West, "P 1H P").iter().map(|(s, _)| s).collect();
        assert_eq!(seats, vec![Seat::West, Seat::North, Seat::East]);
    }

    #[test]
    fn test_check_call() {
        let auction = Auction::bidding(Seat::North, "1S");
        assert!(auction.check_call("2C".parse().unwrap()).is_ok());
        assert_eq!(
            auction.check_call("1H".parse().unwrap()),
            Err(ProtocolAnomaly::InsufficientBid {
                seat: Seat::East,
                call: "1H".parse().unwrap(),
                over: "1S".parse().unwrap(),
            })
        );
        let closed = Auction::bidding(Seat::North, "P P P P");
        assert!(matches!(
            closed.check_call(Call::Pass),
            Err(ProtocolAnomaly::CallAfterClose { .. })
        ));
    }

    #[test]
    fn test_last_bid_and_display() {
        let auction = Auction::bidding(Seat::North, "1S P 2S X");
        let (seat, call) = auction.last_bid().unwrap();
        assert_eq!(seat, Seat::South);
        assert_eq!(call.render(), "2S");
        assert_eq!(auction.to_string(), "1S P 2S X");
    }
}
