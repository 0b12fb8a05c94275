use crate::error::{CardMissing, TrackerError};
use crate::event::EventKind;
use bridge_core::contract::resolve;
use bridge_core::{
    Auction, Call, Card, ContractInfo, Hand, HandState, Partnership, Resolution, Seat, Trick,
    Vulnerability,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TRICKS_PER_DEAL: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    AwaitingDeal,
    Auctioning,
    Playing,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::AwaitingDeal => "awaiting a deal",
            Phase::Auctioning => "auctioning",
            Phase::Playing => "playing",
            Phase::Complete => "complete",
        };
        write!(f, "{}", s)
    }
}

/// Tricks taken per partnership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrickCount {
    pub ns: u8,
    pub ew: u8,
}

impl TrickCount {
    pub fn get(&self, side: Partnership) -> u8 {
        match side {
            Partnership::NS => self.ns,
            Partnership::EW => self.ew,
        }
    }

    pub fn set(&mut self, side: Partnership, tricks: u8) {
        match side {
            Partnership::NS => self.ns = tricks,
            Partnership::EW => self.ew = tricks,
        }
    }

    pub fn total(&self) -> u8 {
        self.ns + self.ew
    }
}

impl fmt::Display for TrickCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NS={} EW={}", self.ns, self.ew)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub trick: Trick,
    pub winner: Seat,
}

/// An accepted claim and the final split it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claimer: Seat,
    pub tricks_claimed: u8,
    pub result: TrickCount,
}

/// Identifies a deal for matching asynchronously delivered analysis.
///
/// Board numbers repeat every 16 boards and across tables, so the hands as
/// dealt are part of the identity. `hands` holds each seat's PBN hand, `None`
/// for a hand never seen; a fingerprint built from a board number alone has
/// no hands at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DealFingerprint {
    pub board: u32,
    pub hands: Option<[Option<String>; 4]>,
}

impl DealFingerprint {
    pub fn board_only(board: u32) -> Self {
        Self { board, hands: None }
    }

    pub fn from_hands(board: u32, hands: &[HandState; 4]) -> Self {
        Self {
            board,
            hands: Some(std::array::from_fn(|i| hands[i].known().map(Hand::to_string))),
        }
    }

    /// Same board, and every seat known to both sides holds the same cards.
    /// At least one seat has to be comparable; a fingerprint without hands
    /// never matches.
    pub fn matches(&self, other: &DealFingerprint) -> bool {
        let (Some(mine), Some(theirs)) = (&self.hands, &other.hands) else {
            return false;
        };
        if self.board != other.board {
            return false;
        }
        let mut compared = 0;
        for pair in mine.iter().zip(theirs) {
            if let (Some(a), Some(b)) = pair {
                if a != b {
                    return false;
                }
                compared += 1;
            }
        }
        compared > 0
    }

    /// Same position in the 16-board cycle. Different deals can share it.
    pub fn same_board_cycle(&self, other: &DealFingerprint) -> bool {
        self.board % 16 == other.board % 16
    }
}

impl fmt::Display for DealFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "board {}", self.board)?;
        if let Some(hands) = &self.hands {
            let rendered: Vec<&str> = hands.iter().map(|h| h.as_deref().unwrap_or("-")).collect();
            write!(f, " [N:{}]", rendered.join(" "))?;
        }
        Ok(())
    }
}

/// What a deal ended as, handed to whoever persists results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSnapshot {
    pub board: u32,
    pub fingerprint: DealFingerprint,
    pub auction: Auction,
    pub contract: Option<ContractInfo>,
    pub passed_out: bool,
    pub tricks_won: TrickCount,
    pub tricks: Vec<CompletedTrick>,
    pub claim: Option<Claim>,
    /// False when the deal was superseded before it finished.
    pub completed: bool,
}

/// The deal currently at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub board: u32,
    pub dealer: Seat,
    pub vulnerability: Vulnerability,
    dealt: [HandState; 4],
    hands: [HandState; 4],
    auction: Auction,
    resolution: Option<Resolution>,
    tricks: Vec<CompletedTrick>,
    current: Option<Trick>,
    played_tally: TrickCount,
    claim: Option<Claim>,
}

impl Deal {
    pub fn new(
        board: u32,
        dealer: Seat,
        vulnerability: Vulnerability,
        hands: [Option<Hand>; 4],
    ) -> Self {
        let dealt = hands.map(HandState::from);
        Self {
            board,
            dealer,
            vulnerability,
            hands: dealt.clone(),
            dealt,
            auction: Auction::new(dealer),
            resolution: None,
            tricks: Vec::new(),
            current: None,
            played_tally: TrickCount::default(),
            claim: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.resolution {
            None => Phase::Auctioning,
            Some(Resolution::PassedOut) => Phase::Complete,
            Some(Resolution::Contract(_)) => {
                if self.claim.is_some() || self.tricks.len() == TRICKS_PER_DEAL as usize {
                    Phase::Complete
                } else {
                    Phase::Playing
                }
            }
        }
    }

    /// Cards the seat still holds.
    pub fn hand(&self, seat: Seat) -> &HandState {
        &self.hands[seat.idx()]
    }

    /// The seat's hand as dealt.
    pub fn dealt_hand(&self, seat: Seat) -> &HandState {
        &self.dealt[seat.idx()]
    }

    pub fn auction(&self) -> &Auction {
        &self.auction
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    pub fn contract(&self) -> Option<&ContractInfo> {
        self.resolution.as_ref().and_then(Resolution::contract)
    }

    pub fn declarer(&self) -> Option<Seat> {
        self.contract().map(|c| c.declarer)
    }

    pub fn dummy(&self) -> Option<Seat> {
        self.contract().map(|c| c.dummy)
    }

    pub fn opening_leader(&self) -> Option<Seat> {
        self.contract().map(|c| c.opening_leader)
    }

    pub fn is_passed_out(&self) -> bool {
        matches!(self.resolution, Some(Resolution::PassedOut))
    }

    pub fn tricks(&self) -> &[CompletedTrick] {
        &self.tricks
    }

    /// The trick in progress; `None` until the auction produces a contract.
    pub fn current_trick(&self) -> Option<&Trick> {
        self.current.as_ref()
    }

    pub fn claim(&self) -> Option<&Claim> {
        self.claim.as_ref()
    }

    /// Tricks credited so far; after a claim, the claimed split.
    pub fn tricks_won(&self) -> TrickCount {
        self.claim.map_or(self.played_tally, |c| c.result)
    }

    pub fn cards_played(&self) -> usize {
        self.tricks.len() * 4 + self.current.as_ref().map_or(0, Trick::len)
    }

    /// Calls plus card plays; the budget an undo can consume.
    pub fn total_actions(&self) -> usize {
        self.auction.len() + self.cards_played()
    }

    pub fn is_played(&self, card: Card) -> bool {
        self.tricks.iter().any(|t| t.trick.contains(card))
            || self.current.as_ref().is_some_and(|t| t.contains(card))
    }

    /// Who is due to call or play next.
    pub fn seat_to_act(&self) -> Option<Seat> {
        match self.phase() {
            Phase::Auctioning => Some(self.auction.current_seat()),
            Phase::Playing => self.current.as_ref().map(Trick::seat_to_play),
            Phase::AwaitingDeal | Phase::Complete => None,
        }
    }

    pub fn fingerprint(&self) -> DealFingerprint {
        DealFingerprint::from_hands(self.board, &self.dealt)
    }

    pub fn terminal_snapshot(&self) -> TerminalSnapshot {
        TerminalSnapshot {
            board: self.board,
            fingerprint: self.fingerprint(),
            auction: self.auction.clone(),
            contract: self.contract().copied(),
            passed_out: self.is_passed_out(),
            tricks_won: self.tricks_won(),
            tricks: self.tricks.clone(),
            claim: self.claim,
            completed: self.phase() == Phase::Complete,
        }
    }

    /// Multi-line status for operator logs.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Board #{} | Dealer: {} | Vul: {}",
            self.board, self.dealer, self.vulnerability
        )];
        for seat in Seat::ALL {
            let hand = self.hand(seat);
            let hcp = hand.known().map_or(String::from("?"), |h| h.hcp().to_string());
            lines.push(format!("  {:<5} {} (HCP: {})", seat.name(), hand, hcp));
        }
        match (self.contract(), self.is_passed_out()) {
            (Some(info), _) => {
                let vul = if self.vulnerability.is_vulnerable(info.declarer) { " (vul)" } else { "" };
                lines.push(format!(
                    "Contract: {}{} | Dummy: {} | Needs {} tricks",
                    info,
                    vul,
                    info.dummy,
                    info.contract.tricks_needed()
                ));
                lines.push(format!("Tricks: {}", self.tricks_won()));
            }
            (None, true) => lines.push("Passed out".to_string()),
            (None, false) => {
                lines.push(format!("Auction in progress ({} calls): {}", self.auction.len(), self.auction))
            }
        }
        if let Some(seat) = self.seat_to_act() {
            lines.push(format!("To act: {}", seat));
        }
        if let Some(trick) = self.current.as_ref().filter(|t| !t.is_empty()) {
            lines.push(format!("Current trick: {}", trick));
        }
        lines.join("\n")
    }

    pub(crate) fn push_call(&mut self, call: Call) -> Option<Resolution> {
        self.auction.add_call(call);
        self.resolution = resolve(&self.auction);
        if let Some(info) = self.contract() {
            self.current = Some(Trick::new(info.opening_leader));
        }
        self.resolution
    }

    /// Plays the next card of the trick in progress. Returns the completed
    /// trick when this was its fourth card.
    pub(crate) fn play_card(&mut self, card: Card) -> Result<Option<CompletedTrick>, TrackerError> {
        let Some(strain) = self.contract().map(|c| c.contract.strain) else {
            return Err(TrackerError::WrongPhase {
                event: EventKind::CardPlayed,
                phase: self.phase(),
            });
        };
        let Some(seat) = self.current.as_ref().map(Trick::seat_to_play) else {
            return Err(TrackerError::WrongPhase {
                event: EventKind::CardPlayed,
                phase: self.phase(),
            });
        };

        if self.is_played(card) {
            return Err(TrackerError::CardNotInHand {
                seat,
                card,
                reason: CardMissing::AlreadyPlayed,
            });
        }
        match &self.hands[seat.idx()] {
            HandState::Known(hand) if !hand.contains(card) => {
                return Err(TrackerError::CardNotInHand {
                    seat,
                    card,
                    reason: CardMissing::NotHeld,
                });
            }
            HandState::Unknown => {
                if let Some(holder) = self.holder_of(card) {
                    return Err(TrackerError::CardNotInHand {
                        seat,
                        card,
                        reason: CardMissing::HeldBy(holder),
                    });
                }
            }
            HandState::Known(_) => {}
        }

        let mut cards = self.current.as_ref().map(|t| t.cards.clone()).unwrap_or_default();
        cards.push(card);
        let leader = self.current.as_ref().map_or(seat, |t| t.leader);
        let winner = if cards.len() == 4 {
            Some(bridge_core::trick::winner(leader, &cards, strain.trump())?)
        } else {
            None
        };

        if let Some(hand) = self.hands[seat.idx()].known_mut() {
            hand.remove(card);
        }
        let Some(winner) = winner else {
            self.current = Some(Trick { leader, cards });
            return Ok(None);
        };
        let side = winner.partnership();
        self.played_tally.set(side, self.played_tally.get(side) + 1);
        self.current = Some(Trick::new(winner));
        let completed = CompletedTrick {
            trick: Trick { leader, cards },
            winner,
        };
        self.tricks.push(completed.clone());
        Ok(Some(completed))
    }

    pub(crate) fn accept_claim(&mut self, tricks_claimed: u8, claimer: Seat) -> Result<Claim, TrackerError> {
        let Some(info) = self.contract().copied() else {
            return Err(TrackerError::WrongPhase {
                event: EventKind::ClaimAccepted,
                phase: self.phase(),
            });
        };
        let remaining = TRICKS_PER_DEAL - self.tricks.len() as u8;
        if tricks_claimed > remaining {
            return Err(TrackerError::ClaimExceedsRemaining {
                claimed: tricks_claimed,
                remaining,
            });
        }

        let declaring = info.declaring_side();
        let declarer_extra = if info.is_declaring_side(claimer) {
            tricks_claimed
        } else {
            remaining - tricks_claimed
        };
        let declaring_total = self.played_tally.get(declaring) + declarer_extra;
        let mut result = TrickCount::default();
        result.set(declaring, declaring_total);
        result.set(declaring.opponent(), TRICKS_PER_DEAL - declaring_total);

        let claim = Claim {
            claimer,
            tricks_claimed,
            result,
        };
        self.claim = Some(claim);
        Ok(claim)
    }

    pub(crate) fn withdraw_claim(&mut self) -> Option<Claim> {
        self.claim.take()
    }

    /// Takes back the last card played, reopening the previous trick when
    /// the trick in progress is empty.
    pub(crate) fn pop_card(&mut self) -> Option<(Seat, Card)> {
        if self.current.as_ref().map_or(true, Trick::is_empty) {
            let reopened = self.tricks.pop()?;
            let side = reopened.winner.partnership();
            self.played_tally.set(side, self.played_tally.get(side) - 1);
            self.current = Some(reopened.trick);
        }
        let trick = self.current.as_mut()?;
        let card = trick.cards.pop()?;
        let seat = trick.seat_to_play();
        if let Some(hand) = self.hands[seat.idx()].known_mut() {
            hand.insert(card);
        }
        Some((seat, card))
    }

    /// Takes back the last call. Any contract the auction had produced is
    /// dropped with it.
    pub(crate) fn pop_call(&mut self) -> Option<Call> {
        let call = self.auction.pop_call()?;
        self.resolution = resolve(&self.auction);
        self.current = self.contract().map(|info| Trick::new(info.opening_leader));
        Some(call)
    }

    fn holder_of(&self, card: Card) -> Option<Seat> {
        Seat::ALL
            .into_iter()
            .find(|seat| self.hands[seat.idx()].known().is_some_and(|h| h.contains(card)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::io::pbn;
    use bridge_core::Strain;

    // cspell:ignore AKQJ
    pub(crate) fn sample_hands() -> [Option<Hand>; 4] {
        [
            Some(pbn::parse_hand("AKQJ.AKQ.AKQ.AKQ").unwrap()),
            Some(pbn::parse_hand("T98.JT98.JT9.JT9").unwrap()),
            Some(pbn::parse_hand("765.765.8765.876").unwrap()),
            Some(pbn::parse_hand("432.432.432.5432").unwrap()),
        ]
    }

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn deal_in_play(calls: &str) -> Deal {
        let mut deal = Deal::new(1, Seat::North, Vulnerability::None, sample_hands());
        for call in calls.split_whitespace() {
            deal.push_call(call.parse().unwrap());
        }
        deal
    }

    #[test]
    fn test_auction_to_play() {
        let mut deal = Deal::new(1, Seat::North, Vulnerability::None, sample_hands());
        assert_eq!(deal.phase(), Phase::Auctioning);
        assert_eq!(deal.seat_to_act(), Some(Seat::North));
        for call in ["1S", "P", "2S", "P", "P"] {
            assert!(deal.push_call(call.parse().unwrap()).is_none());
        }
        let resolution = deal.push_call(Call::Pass).unwrap();
        let info = resolution.contract().unwrap();
        assert_eq!(info.contract.strain, Strain::Spades);
        assert_eq!(deal.phase(), Phase::Playing);
        assert_eq!(deal.seat_to_act(), Some(Seat::East));
    }

    #[test]
    fn test_trick_completion_seeds_next_leader() {
        let mut deal = deal_in_play("1S P 2S P P P");
        assert!(deal.play_card(card("HJ")).unwrap().is_none());
        assert!(deal.play_card(card("H5")).unwrap().is_none());
        assert!(deal.play_card(card("H2")).unwrap().is_none());
        let done = deal.play_card(card("HA")).unwrap().unwrap();
        assert_eq!(done.winner, Seat::North);
        assert_eq!(deal.tricks_won(), TrickCount { ns: 1, ew: 0 });
        assert_eq!(deal.seat_to_act(), Some(Seat::North));
        assert_eq!(deal.cards_played(), 4);
        assert_eq!(deal.hand(Seat::North).known().unwrap().len(), 12);
        assert_eq!(deal.dealt_hand(Seat::North).known().unwrap().len(), 13);
    }

    #[test]
    fn test_card_not_in_known_hand() {
        let mut deal = deal_in_play("1S P 2S P P P");
        let before = deal.clone();
        let err = deal.play_card(card("SA")).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::CardNotInHand { seat: Seat::East, reason: CardMissing::NotHeld, .. }
        ));
        assert_eq!(deal, before);
    }

    #[test]
    fn test_replayed_card_is_rejected() {
        let mut deal = deal_in_play("1S P 2S P P P");
        deal.play_card(card("HJ")).unwrap();
        let err = deal.play_card(card("HJ")).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::CardNotInHand { reason: CardMissing::AlreadyPlayed, .. }
        ));
    }

    #[test]
    fn test_unknown_hand_skips_inventory() {
        let mut hands = sample_hands();
        hands[Seat::East.idx()] = None;
        let mut deal = Deal::new(1, Seat::North, Vulnerability::None, hands);
        for call in "1S P 2S P P P".split_whitespace() {
            deal.push_call(call.parse().unwrap());
        }
        deal.play_card(card("HJ")).unwrap();
        assert_eq!(deal.hand(Seat::East), &HandState::Unknown);
        assert_eq!(deal.seat_to_act(), Some(Seat::South));

        // East's hand is unknown, but South's card cannot come from East.
        assert_eq!(deal.pop_card(), Some((Seat::East, card("HJ"))));
        let err = deal.play_card(card("H5")).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::CardNotInHand { reason: CardMissing::HeldBy(Seat::South), .. }
        ));
    }

    #[test]
    fn test_pop_card_reopens_trick() {
        let mut deal = deal_in_play("1S P 2S P P P");
        for c in ["HJ", "H5", "H2", "HA"] {
            deal.play_card(card(c)).unwrap();
        }
        assert_eq!(deal.pop_card(), Some((Seat::North, card("HA"))));
        assert_eq!(deal.tricks().len(), 0);
        assert_eq!(deal.tricks_won(), TrickCount::default());
        assert_eq!(deal.current_trick().unwrap().len(), 3);
        assert!(deal.hand(Seat::North).known().unwrap().contains(card("HA")));
        assert_eq!(deal.seat_to_act(), Some(Seat::North));
    }

    #[test]
    fn test_pop_call_clears_contract() {
        let mut deal = deal_in_play("1S P 2S P P P");
        assert!(deal.contract().is_some());
        assert_eq!(deal.pop_call(), Some(Call::Pass));
        assert!(deal.contract().is_none());
        assert!(deal.current_trick().is_none());
        assert_eq!(deal.phase(), Phase::Auctioning);
        assert_eq!(deal.seat_to_act(), Some(Seat::East));
    }

    #[test]
    fn test_claim_by_defender() {
        // 4S by South; declarer's side has 6 of 8 tricks when East claims 3 of 5.
        let mut deal = Deal::new(2, Seat::South, Vulnerability::NS, sample_hands());
        for call in "1S P 4S P P P".split_whitespace() {
            deal.push_call(call.parse().unwrap());
        }
        deal.played_tally = TrickCount { ns: 6, ew: 2 };
        deal.tricks = (0..8)
            .map(|_| CompletedTrick { trick: Trick::new(Seat::West), winner: Seat::West })
            .collect();
        let claim = deal.accept_claim(3, Seat::East).unwrap();
        assert_eq!(claim.result, TrickCount { ns: 8, ew: 5 });
        assert_eq!(deal.phase(), Phase::Complete);
        assert_eq!(deal.tricks_won(), TrickCount { ns: 8, ew: 5 });
        assert_eq!(deal.withdraw_claim(), Some(claim));
        assert_eq!(deal.phase(), Phase::Playing);
    }

    #[test]
    fn test_declarer_claims_rest_after_losing_one() {
        // East's heart ace takes the first trick; North wins the next six.
        let hands = ["AKQJ.KQJ.AKQ.AKQ", "T98.AT98.JT9.JT9", "765.765.8765.876", "432.432.432.5432"]
            .map(|h| Some(pbn::parse_hand(h).unwrap()));
        let mut deal = Deal::new(1, Seat::North, Vulnerability::None, hands);
        for call in "1S P 2S P P P".split_whitespace() {
            deal.push_call(call.parse().unwrap());
        }
        let play = "HA H5 H2 HJ  ST S5 S2 SA  SK S9 S6 S3  SQ S8 S7 S4  DA DJ D5 D2  DK DT D6 D3  DQ D9 D7 D4";
        for c in play.split_whitespace() {
            deal.play_card(card(c)).unwrap();
        }
        assert_eq!(deal.tricks().len(), 7);
        assert_eq!(deal.tricks()[0].winner, Seat::East);
        assert_eq!(deal.tricks_won(), TrickCount { ns: 6, ew: 1 });

        let claim = deal.accept_claim(6, Seat::North).unwrap();
        assert_eq!(claim.result, TrickCount { ns: 12, ew: 1 });
        assert_eq!(deal.tricks_won(), TrickCount { ns: 12, ew: 1 });
        assert_eq!(deal.phase(), Phase::Complete);
    }

    #[test]
    fn test_claim_too_many() {
        let mut deal = deal_in_play("1S P 2S P P P");
        assert!(matches!(
            deal.accept_claim(14, Seat::North),
            Err(TrackerError::ClaimExceedsRemaining { claimed: 14, remaining: 13 })
        ));
        assert!(deal.claim().is_none());
    }

    #[test]
    fn test_fingerprint() {
        let deal = deal_in_play("");
        let fp = deal.fingerprint();
        assert_eq!(fp.board, 1);
        assert_eq!(
            fp.to_string(),
            "board 1 [N:AKQJ.AKQ.AKQ.AKQ T98.JT98.JT9.JT9 765.765.8765.876 432.432.432.5432]"
        );
        assert!(fp.matches(&deal.clone().fingerprint()));

        let mut other_hands = sample_hands();
        other_hands.swap(1, 3);
        let other = Deal::new(1, Seat::North, Vulnerability::None, other_hands);
        assert!(!fp.matches(&other.fingerprint()));
        assert!(!fp.matches(&DealFingerprint::board_only(1)));
        assert!(fp.same_board_cycle(&DealFingerprint::board_only(17)));
    }

    #[test]
    fn test_fingerprint_with_hidden_hands() {
        let full = deal_in_play("").fingerprint();
        let mut partial = sample_hands();
        partial[Seat::East.idx()] = None;
        partial[Seat::West.idx()] = None;
        let partial = Deal::new(1, Seat::North, Vulnerability::None, partial).fingerprint();
        assert!(partial.matches(&full));
        assert!(full.matches(&partial));
        assert!(!partial.matches(&DealFingerprint { board: 17, ..full.clone() }));

        let nothing = Deal::new(1, Seat::North, Vulnerability::None, Default::default()).fingerprint();
        assert!(!nothing.matches(&full));
    }

    #[test]
    fn test_summary_mentions_contract() {
        let deal = deal_in_play("1S P 2S P P P");
        let summary = deal.summary();
        assert!(summary.contains("Board #1"));
        assert!(summary.contains("Contract: 2S by N | Dummy: S | Needs 8 tricks"));
        assert!(summary.contains("To act: E"));

        let mut deal = Deal::new(2, Seat::East, Vulnerability::EW, sample_hands());
        for call in "3NT P P P".split_whitespace() {
            deal.push_call(call.parse().unwrap());
        }
        assert!(deal.summary().contains("Contract: 3NT by E (vul) | Dummy: W | Needs 9 tricks"));
    }
}
