//! Replays a captured table feed, one JSON message per line, through the
//! tracker and the advisor.

use bridge_advisor::{AdvisorConfig, AnalysisCache, NoRecommendation, Recommendation};
use bridge_tracker::wire::{decode_line, Message};
use bridge_tracker::{Deal, Event, Phase, TerminalSnapshot, Tracker, TrackerConfig, TrackerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

/// Settings for a replay, one section per component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub tracker: TrackerConfig,
    pub advisor: AdvisorConfig,
}

impl ReplayConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub lines: usize,
    pub events: usize,
    pub rejected: usize,
    pub analyses: usize,
    pub ignored: usize,
    pub deals_finished: usize,
}

/// What one line of the capture did.
#[derive(Debug)]
pub enum LineOutcome {
    Blank,
    Applied {
        terminal: Option<TerminalSnapshot>,
        advice: Option<Result<Recommendation, NoRecommendation>>,
    },
    Rejected(TrackerError),
    Analysis { fresh: bool },
    Ignored(String),
}

pub struct Replayer {
    tracker: Tracker,
    cache: AnalysisCache,
    advise: bool,
    stats: ReplayStats,
}

impl Replayer {
    pub fn new(config: &ReplayConfig, advise: bool) -> Self {
        Self {
            tracker: Tracker::new(config.tracker.clone()),
            cache: AnalysisCache::new(config.advisor),
            advise,
            stats: ReplayStats::default(),
        }
    }

    pub fn deal(&self) -> Option<&Deal> {
        self.tracker.deal()
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    pub fn feed_line(&mut self, line: &str) -> LineOutcome {
        self.stats.lines += 1;
        if line.trim().is_empty() {
            return LineOutcome::Blank;
        }
        let message = match decode_line(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(line = self.stats.lines, error = %e, "undecodable line");
                self.stats.rejected += 1;
                return LineOutcome::Rejected(e);
            }
        };

        match message {
            Message::Game { board, event } => self.apply(board, event),
            Message::Analysis(payload) => match self.cache.accept(&payload) {
                Ok(fresh) => {
                    self.stats.analyses += usize::from(fresh);
                    LineOutcome::Analysis { fresh }
                }
                Err(e) => {
                    warn!(line = self.stats.lines, error = %e, "unusable analysis");
                    self.stats.rejected += 1;
                    LineOutcome::Rejected(TrackerError::MalformedEvent(e.to_string()))
                }
            },
            Message::Ignored(kind) => {
                debug!(line = self.stats.lines, %kind, "message ignored");
                self.stats.ignored += 1;
                LineOutcome::Ignored(kind)
            }
        }
    }

    /// Ends the replay, returning the result of a deal still in progress.
    pub fn finish(&mut self) -> Option<TerminalSnapshot> {
        let pending = self.tracker.end_session();
        if pending.is_some() {
            self.stats.deals_finished += 1;
        }
        info!(stats = ?self.stats, "replay finished");
        pending
    }

    fn apply(&mut self, board: Option<u32>, event: Event) -> LineOutcome {
        self.stats.events += 1;
        let advise_after = self.advise && matches!(event, Event::CardPlayed { .. } | Event::CallMade { .. });
        let result = match board {
            Some(board) => self.tracker.apply_on_board(board, event),
            None => self.tracker.apply(event),
        };
        match result {
            Ok(applied) => {
                self.stats.deals_finished += usize::from(applied.terminal.is_some());
                let advice = match self.tracker.deal() {
                    Some(deal) if advise_after && applied.phase == Phase::Playing => {
                        Some(self.cache.recommend(deal))
                    }
                    _ => None,
                };
                LineOutcome::Applied {
                    terminal: applied.terminal,
                    advice,
                }
            }
            Err(TrackerError::BoardMismatch {
                current,
                received,
                superseded: Some(snapshot),
            }) => {
                warn!(current, received, "deal closed by an event for another board");
                self.stats.rejected += 1;
                self.stats.deals_finished += 1;
                LineOutcome::Applied {
                    terminal: Some(*snapshot),
                    advice: None,
                }
            }
            Err(e) => {
                self.stats.rejected += 1;
                LineOutcome::Rejected(e)
            }
        }
    }
}
