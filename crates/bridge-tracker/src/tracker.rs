use crate::config::TrackerConfig;
use crate::deal::{Deal, Phase, TerminalSnapshot};
use crate::error::TrackerError;
use crate::event::{Event, EventKind};
use crate::undo::undo;
use bridge_core::{Call, Card, Hand, ProtocolAnomaly, Resolution, Seat, Vulnerability};
use tracing::{debug, info, warn};

/// What applying one event produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub phase: Phase,
    /// Handed out exactly once per deal: when it completes, or when a new
    /// deal pushes it out first.
    pub terminal: Option<TerminalSnapshot>,
    /// A bridge-illegal call that was recorded anyway.
    pub anomaly: Option<ProtocolAnomaly>,
    /// Set when the event completed a trick.
    pub trick_winner: Option<Seat>,
}

impl Applied {
    fn new(phase: Phase) -> Self {
        Self {
            phase,
            terminal: None,
            anomaly: None,
            trick_winner: None,
        }
    }
}

/// Owns the current deal and applies the table feed to it one event at a
/// time. Callers only ever see the deal through shared references or
/// clones.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    config: TrackerConfig,
    deal: Option<Deal>,
    terminal_sent: bool,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            deal: None,
            terminal_sent: false,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn deal(&self) -> Option<&Deal> {
        self.deal.as_ref()
    }

    /// An owned copy of the current deal.
    pub fn snapshot(&self) -> Option<Deal> {
        self.deal.clone()
    }

    pub fn phase(&self) -> Phase {
        self.deal.as_ref().map_or(Phase::AwaitingDeal, Deal::phase)
    }

    /// Applies `event`. Rejected events leave the tracker exactly as it
    /// was; the one exception is a superseding
    /// [`TrackerError::BoardMismatch`] from [`Tracker::apply_on_board`].
    pub fn apply(&mut self, event: Event) -> Result<Applied, TrackerError> {
        let kind = event.kind();
        debug!(event = %kind, phase = %self.phase(), "applying event");
        let result = match event {
            Event::NewDeal {
                board,
                dealer,
                vulnerability,
                hands,
            } => self.new_deal(board, dealer, vulnerability, hands),
            Event::CallMade { call } => self.call(call),
            Event::CardPlayed { card } => self.play(card),
            Event::ClaimAccepted {
                tricks_claimed,
                claimer,
            } => self.claim(tricks_claimed, claimer),
            Event::Undo {
                count,
                position_hint,
            } => self.undo(count, position_hint),
        };
        if let Err(e) = &result {
            warn!(event = %kind, error = %e, "event rejected");
        }
        result
    }

    /// Applies an event stamped with the board it belongs to.
    ///
    /// A stamp that disagrees with the current deal means the feed moved
    /// on without a new deal. With `supersede_on_board_mismatch` the
    /// current deal is closed out and its pending snapshot travels in the
    /// error, leaving the tracker awaiting a deal. Otherwise the event is
    /// rejected and nothing changes. The stamped event itself is never
    /// applied.
    pub fn apply_on_board(&mut self, board: u32, event: Event) -> Result<Applied, TrackerError> {
        if matches!(event, Event::NewDeal { .. }) {
            return self.apply(event);
        }
        let current = match &self.deal {
            Some(deal) if deal.board != board => deal.board,
            _ => return self.apply(event),
        };

        let superseded = if self.config.supersede_on_board_mismatch {
            info!(current, received = board, "board changed mid-deal, superseding");
            self.end_session().map(Box::new)
        } else {
            None
        };
        warn!(current, received = board, event = %event.kind(), "event for another board");
        Err(TrackerError::BoardMismatch {
            current,
            received: board,
            superseded,
        })
    }

    /// Drops the current deal, returning its terminal snapshot if one is
    /// still owed.
    pub fn end_session(&mut self) -> Option<TerminalSnapshot> {
        let deal = self.deal.take()?;
        let owed = !std::mem::take(&mut self.terminal_sent);
        owed.then(|| deal.terminal_snapshot())
    }

    fn new_deal(
        &mut self,
        board: u32,
        dealer: Seat,
        vulnerability: Vulnerability,
        hands: [Option<Hand>; 4],
    ) -> Result<Applied, TrackerError> {
        check_hands(&hands)?;
        let superseded = self.end_session();
        if let Some(snapshot) = &superseded {
            info!(board = snapshot.board, completed = snapshot.completed, "previous deal superseded");
        }

        let deal = Deal::new(board, dealer, vulnerability, hands);
        info!(board, %dealer, vul = %vulnerability, "new deal");
        let mut applied = Applied::new(deal.phase());
        applied.terminal = superseded;
        self.deal = Some(deal);
        Ok(applied)
    }

    fn call(&mut self, call: Call) -> Result<Applied, TrackerError> {
        let tolerate = self.config.tolerate_anomalies;
        let deal = self.deal_in(EventKind::CallMade, Phase::Auctioning)?;
        let seat = deal.auction().current_seat();

        let mut anomaly = None;
        if let Err(a) = deal.auction().check_call(call) {
            if !tolerate {
                return Err(a.into());
            }
            warn!(anomaly = %a, "protocol anomaly recorded");
            anomaly = Some(a);
        }

        debug!(%seat, call = %call.render(), "call");
        match deal.push_call(call) {
            Some(Resolution::Contract(info)) => {
                info!(contract = %info, dummy = %info.dummy, lead = %info.opening_leader, "auction closed");
            }
            Some(Resolution::PassedOut) => info!("passed out"),
            None => {}
        }

        let mut applied = self.applied();
        applied.anomaly = anomaly;
        Ok(applied)
    }

    fn play(&mut self, card: Card) -> Result<Applied, TrackerError> {
        let deal = self.deal_in(EventKind::CardPlayed, Phase::Playing)?;
        let completed = deal.play_card(card)?;
        if let Some(done) = &completed {
            debug!(trick = %done.trick, winner = %done.winner, tricks = %deal.tricks_won(), "trick complete");
        }

        let mut applied = self.applied();
        applied.trick_winner = completed.map(|c| c.winner);
        Ok(applied)
    }

    fn claim(&mut self, tricks_claimed: u8, claimer: Option<Seat>) -> Result<Applied, TrackerError> {
        let deal = self.deal_in(EventKind::ClaimAccepted, Phase::Playing)?;
        let claimer = match (claimer, deal.declarer()) {
            (Some(seat), _) | (None, Some(seat)) => seat,
            (None, None) => {
                return Err(TrackerError::WrongPhase {
                    event: EventKind::ClaimAccepted,
                    phase: deal.phase(),
                })
            }
        };
        let claim = deal.accept_claim(tricks_claimed, claimer)?;
        info!(%claimer, tricks = tricks_claimed, result = %claim.result, "claim accepted");
        Ok(self.applied())
    }

    fn undo(&mut self, count: u32, position_hint: Option<Seat>) -> Result<Applied, TrackerError> {
        let terminal_sent = self.terminal_sent;
        let Some(deal) = self.deal.as_mut() else {
            return Err(TrackerError::WrongPhase {
                event: EventKind::Undo,
                phase: Phase::AwaitingDeal,
            });
        };
        let before = deal.phase();
        undo(deal, count)?;
        let after = deal.phase();

        if before != after {
            info!(from = %before, to = %after, count, "undo changed phase");
            if before == Phase::Complete && terminal_sent {
                warn!(board = deal.board, "undo reopened a deal whose result was already handed out");
            }
        }
        if let Some(hint) = position_hint {
            let to_act = deal.seat_to_act();
            if to_act != Some(hint) {
                warn!(%hint, to_act = ?to_act, "undo hint disagrees with reconstructed position");
            }
        }
        Ok(Applied::new(after))
    }

    fn deal_in(&mut self, event: EventKind, wanted: Phase) -> Result<&mut Deal, TrackerError> {
        let phase = self.phase();
        match self.deal.as_mut() {
            Some(deal) if phase == wanted => Ok(deal),
            _ => Err(TrackerError::WrongPhase { event, phase }),
        }
    }

    /// Result of an event that may have completed the deal.
    fn applied(&mut self) -> Applied {
        let phase = self.phase();
        let mut applied = Applied::new(phase);
        if phase == Phase::Complete && !self.terminal_sent {
            if let Some(deal) = &self.deal {
                let snapshot = deal.terminal_snapshot();
                info!(board = snapshot.board, tricks = %snapshot.tricks_won, "deal complete");
                applied.terminal = Some(snapshot);
                self.terminal_sent = true;
            }
        }
        applied
    }
}

/// Dealt hands must hold at most 13 cards each and share none.
fn check_hands(hands: &[Option<Hand>; 4]) -> Result<(), TrackerError> {
    let mut seen: Vec<Card> = Vec::with_capacity(52);
    for (seat, hand) in Seat::ALL.iter().zip(hands) {
        let Some(hand) = hand else { continue };
        if hand.len() > 13 {
            return Err(TrackerError::MalformedEvent(format!(
                "{} holds {} cards",
                seat.name(),
                hand.len()
            )));
        }
        for card in hand.cards() {
            if seen.contains(card) {
                return Err(TrackerError::MalformedEvent(format!(
                    "{} dealt to more than one hand",
                    card
                )));
            }
            seen.push(*card);
        }
    }
    Ok(())
}
