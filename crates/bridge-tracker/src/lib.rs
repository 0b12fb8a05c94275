//! Rebuilds a bridge deal from the event feed of a live table: auction,
//! contract, tricks and remaining hands, with undo and claims.

pub mod config;
pub mod deal;
pub mod error;
pub mod event;
pub mod tracker;
pub mod undo;
pub mod wire;

pub use config::{ConfigError, TrackerConfig};
pub use deal::{Claim, CompletedTrick, Deal, DealFingerprint, Phase, TerminalSnapshot, TrickCount};
pub use error::{CardMissing, TrackerError, UndoError};
pub use event::{Event, EventKind};
pub use tracker::{Applied, Tracker};
