use crate::recommend::{analysis_matches, recommend_with, AdvisorConfig, NoRecommendation, Recommendation};
use crate::table::{DoubleDummyResult, DoubleDummyTable, TableError};
use bridge_tracker::Deal;
use serde_json::Value;
use tracing::{debug, info};

/// Holds the most recent analysis. Results can arrive after the deal
/// they describe is gone, so every lookup rechecks the fingerprint.
#[derive(Debug, Clone, Default)]
pub struct AnalysisCache {
    config: AdvisorConfig,
    latest: Option<DoubleDummyResult>,
}

impl AnalysisCache {
    pub fn new(config: AdvisorConfig) -> Self {
        Self { config, latest: None }
    }

    /// Stores a `dd_result` payload. Returns `false` when it repeats the
    /// result already held.
    pub fn accept(&mut self, payload: &Value) -> Result<bool, TableError> {
        let result = DoubleDummyResult::from_json(payload)?;
        if self.latest.as_ref() == Some(&result) {
            debug!(deal = %result.table.fingerprint, "duplicate analysis ignored");
            return Ok(false);
        }
        info!(deal = %result.table.fingerprint, par = ?result.par_contract, "analysis received");
        self.latest = Some(result);
        Ok(true)
    }

    pub fn latest(&self) -> Option<&DoubleDummyResult> {
        self.latest.as_ref()
    }

    /// The held table if it describes `deal`.
    pub fn table_for(&self, deal: &Deal) -> Option<&DoubleDummyTable> {
        let table = &self.latest.as_ref()?.table;
        analysis_matches(&self.config, deal, table).then_some(table)
    }

    pub fn recommend(&self, deal: &Deal) -> Result<Recommendation, NoRecommendation> {
        recommend_with(&self.config, deal, self.table_for(deal))
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::io::pbn;
    use bridge_core::{Seat, Vulnerability};
    use serde_json::json;

    const DEAL: &str = "N:AKQJ.AKQ.AKQ.AKQ T98.JT98.JT9.JT9 765.765.8765.876 432.432.432.5432";

    fn deal(board: u32) -> Deal {
        let hands = pbn::parse_deal(DEAL).unwrap();
        Deal::new(board, Seat::North, Vulnerability::None, hands)
    }

    #[test]
    fn test_accept_and_dedup() {
        let mut cache = AnalysisCache::default();
        let payload = json!({"board": 1, "hands": DEAL, "tricks": {"N": {"S": 13}}});
        assert!(cache.accept(&payload).unwrap());
        assert!(!cache.accept(&payload).unwrap());
        assert!(cache.table_for(&deal(1)).is_some());
        assert!(cache.table_for(&deal(17)).is_none());

        let newer = json!({"board": 2, "hands": DEAL, "tricks": {"N": {"S": 12}}});
        assert!(cache.accept(&newer).unwrap());
        assert!(cache.table_for(&deal(1)).is_none());
        assert_eq!(cache.latest().unwrap().table.fingerprint.board, 2);
    }

    #[test]
    fn test_bad_payload_keeps_previous() {
        let mut cache = AnalysisCache::default();
        cache
            .accept(&json!({"board": 1, "hands": DEAL, "tricks": {}}))
            .unwrap();
        assert!(cache.accept(&json!({"board": 1, "tricks": 5})).is_err());
        assert!(cache.table_for(&deal(1)).is_some());
        cache.clear();
        assert!(cache.latest().is_none());
    }

    #[test]
    fn test_board_fallback() {
        let payload = json!({"board": 17, "tricks": {}});
        let mut strict = AnalysisCache::default();
        strict.accept(&payload).unwrap();
        assert!(strict.table_for(&deal(1)).is_none());

        let mut lenient = AnalysisCache::new(AdvisorConfig { board_fallback: true });
        lenient.accept(&payload).unwrap();
        assert!(lenient.table_for(&deal(1)).is_some());
        assert!(lenient.table_for(&deal(2)).is_none());
    }
}
