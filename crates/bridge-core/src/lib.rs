pub mod error;
pub mod suit;
pub mod rank;
pub mod strain;
pub mod card;
pub mod board;
pub mod hand;
pub mod call;
pub mod auction;
pub mod contract;
pub mod trick;
pub mod io;

pub use error::ParseError;
pub use suit::Suit;
pub use rank::Rank;
pub use strain::Strain;
pub use card::Card;
pub use board::{Partnership, Seat, Vulnerability};
pub use hand::{Hand, HandState};
pub use call::Call;
pub use auction::Auction;
pub use contract::{Contract, ContractInfo, DoubleStatus, ProtocolAnomaly, Resolution};
pub use trick::{InvalidTrick, Trick};
