use crate::auction::Auction;
use crate::board::{Partnership, Seat};
use crate::call::Call;
use crate::strain::Strain;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoubleStatus {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub double_status: DoubleStatus,
}

impl Contract {
    pub fn trump(&self) -> Option<Suit> {
        self.strain.trump()
    }

    /// Tricks declarer needs to make the contract.
    pub fn tricks_needed(&self) -> u8 {
        self.level + 6
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.level, self.strain)?;
        match self.double_status {
            DoubleStatus::Undoubled => Ok(()),
            DoubleStatus::Doubled => write!(f, "X"),
            DoubleStatus::Redoubled => write!(f, "XX"),
        }
    }
}

/// Everything the end of the auction fixes for the play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractInfo {
    pub contract: Contract,
    pub declarer: Seat,
    pub dummy: Seat,
    pub opening_leader: Seat,
}

impl ContractInfo {
    pub fn declaring_side(&self) -> Partnership {
        self.declarer.partnership()
    }

    pub fn is_declaring_side(&self, seat: Seat) -> bool {
        seat.partnership() == self.declaring_side()
    }
}

impl fmt::Display for ContractInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.contract, self.declarer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    Contract(ContractInfo),
    /// Four passes: nothing is played and neither side scores tricks.
    PassedOut,
}

impl Resolution {
    pub fn contract(&self) -> Option<&ContractInfo> {
        match self {
            Resolution::Contract(info) => Some(info),
            Resolution::PassedOut => None,
        }
    }
}

/// A call that is well-formed but illegal at the table. The resolver skips
/// it as if it had not been made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ProtocolAnomaly {
    #[error("{seat} called {call} after the auction closed")]
    CallAfterClose { seat: Seat, call: Call },
    #[error("{seat} bid {call}, insufficient over {over}")]
    InsufficientBid { seat: Seat, call: Call, over: Call },
    #[error("{seat} doubled with no bid to double")]
    DoubleWithoutBid { seat: Seat },
    #[error("{seat} doubled a contract that is already doubled")]
    RepeatedDouble { seat: Seat },
    #[error("{seat} doubled partner's bid")]
    DoubleOfPartner { seat: Seat },
    #[error("{seat} redoubled without a double")]
    RedoubleWithoutDouble { seat: Seat },
    #[error("{seat} redoubled their own side's double")]
    RedoubleByDoublers { seat: Seat },
}

/// Running legal state of an auction. Illegal calls are reported and leave
/// the state untouched.
#[derive(Debug, Clone, Default)]
pub(crate) struct BiddingState {
    last_bid: Option<(Seat, Call)>,
    double_status: DoubleStatus,
    doubled_by: Option<Partnership>,
    /// First seat of each side to name each strain, `[side][strain]`.
    first_namers: [[Option<Seat>; 5]; 2],
}

impl BiddingState {
    pub(crate) fn check(&self, seat: Seat, call: Call) -> Result<(), ProtocolAnomaly> {
        match call {
            Call::Pass => Ok(()),
            Call::Bid { .. } => match self.last_bid {
                Some((_, over)) if call <= over => {
                    Err(ProtocolAnomaly::InsufficientBid { seat, call, over })
                }
                _ => Ok(()),
            },
            Call::Double => {
                let (bidder, _) = self
                    .last_bid
                    .ok_or(ProtocolAnomaly::DoubleWithoutBid { seat })?;
                if self.double_status != DoubleStatus::Undoubled {
                    Err(ProtocolAnomaly::RepeatedDouble { seat })
                } else if bidder.partnership() == seat.partnership() {
                    Err(ProtocolAnomaly::DoubleOfPartner { seat })
                } else {
                    Ok(())
                }
            }
            Call::Redouble => {
                if self.double_status != DoubleStatus::Doubled {
                    Err(ProtocolAnomaly::RedoubleWithoutDouble { seat })
                } else if self.doubled_by == Some(seat.partnership()) {
                    Err(ProtocolAnomaly::RedoubleByDoublers { seat })
                } else {
                    Ok(())
                }
            }
        }
    }

    pub(crate) fn apply(&mut self, seat: Seat, call: Call) -> Result<(), ProtocolAnomaly> {
        self.check(seat, call)?;
        match call {
            Call::Pass => {}
            Call::Bid { strain, .. } => {
                let slot = &mut self.first_namers[seat.partnership().idx()][strain.idx()];
                slot.get_or_insert(seat);
                self.last_bid = Some((seat, call));
                self.double_status = DoubleStatus::Undoubled;
                self.doubled_by = None;
            }
            Call::Double => {
                self.double_status = DoubleStatus::Doubled;
                self.doubled_by = Some(seat.partnership());
            }
            Call::Redouble => {
                self.double_status = DoubleStatus::Redoubled;
            }
        }
        Ok(())
    }

    pub(crate) fn replay(auction: &Auction) -> (Self, Vec<ProtocolAnomaly>) {
        let mut state = Self::default();
        let mut anomalies = Vec::new();
        for (seat, call) in auction.iter() {
            if let Err(anomaly) = state.apply(seat, *call) {
                anomalies.push(anomaly);
            }
        }
        (state, anomalies)
    }
}

/// Resolves a finished auction.
///
/// Returns `None` while the auction is still open. Declarer is the first
/// player of the final bidder's side to have named the final strain; calls
/// the resolver considers illegal are skipped (see [`Auction::anomalies`]).
pub fn resolve(auction: &Auction) -> Option<Resolution> {
    if !auction.is_complete() {
        return None;
    }
    let (state, _) = BiddingState::replay(auction);
    let Some((bidder, Call::Bid { level, strain })) = state.last_bid else {
        return Some(Resolution::PassedOut);
    };
    let side = bidder.partnership();
    let declarer = state.first_namers[side.idx()][strain.idx()].unwrap_or(bidder);
    Some(Resolution::Contract(ContractInfo {
        contract: Contract {
            level,
            strain,
            double_status: state.double_status,
        },
        declarer,
        dummy: declarer.partner(),
        opening_leader: declarer.lho(),
    }))
}
