//! Card recommendations for the seat on play, read off a double-dummy
//! table delivered for the current deal.

pub mod cache;
pub mod recommend;
pub mod table;

pub use cache::AnalysisCache;
pub use recommend::{legal_cards, recommend, recommend_with, AdvisorConfig, NoRecommendation, Recommendation};
pub use table::{DoubleDummyResult, DoubleDummyTable, TableError};
