mod support;

use bridge_tracker::wire::{decode_line, Message};
use bridge_tracker::{Tracker, TrackerConfig, TrackerError};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    steps: Vec<Step>,
    expect: Expect,
}

#[derive(Debug, Deserialize)]
struct Step {
    event: String,
    #[serde(default)]
    data: Value,
    rejected: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Expect {
    phase: String,
    contract: Option<String>,
    dummy: Option<String>,
    seat_to_act: Option<String>,
    tricks: Option<[u8; 2]>,
    calls: Option<usize>,
    cards_played: Option<usize>,
    terminals: Option<usize>,
}

fn error_name(err: &TrackerError) -> &'static str {
    match err {
        TrackerError::MalformedEvent(_) => "MalformedEvent",
        TrackerError::WrongPhase { .. } => "WrongPhase",
        TrackerError::CardNotInHand { .. } => "CardNotInHand",
        TrackerError::ProtocolAnomaly(_) => "ProtocolAnomaly",
        TrackerError::ClaimExceedsRemaining { .. } => "ClaimExceedsRemaining",
        TrackerError::Undo(_) => "Undo",
        TrackerError::InvalidTrick(_) => "InvalidTrick",
        TrackerError::BoardMismatch { .. } => "BoardMismatch",
    }
}

/// Feeds one step through the wire decoder and the tracker. Returns how
/// many terminal snapshots it produced.
fn feed(tracker: &mut Tracker, step: &Step) -> Result<usize, TrackerError> {
    let line = json!({"type": "game_event", "event_type": step.event, "data": step.data}).to_string();
    let Message::Game { board, event } = decode_line(&line)? else {
        panic!("{} did not decode to a game event", line);
    };
    let result = match board {
        Some(board) => tracker.apply_on_board(board, event),
        None => tracker.apply(event),
    };
    match result {
        Ok(applied) => Ok(usize::from(applied.terminal.is_some())),
        Err(TrackerError::BoardMismatch { superseded: Some(_), .. }) if step.rejected.is_some() => Ok(1),
        Err(e) => Err(e),
    }
}

fn run(scenario: &Scenario) {
    let mut tracker = Tracker::new(TrackerConfig::default());
    let mut terminals = 0;
    for (i, step) in scenario.steps.iter().enumerate() {
        let before = tracker.snapshot();
        match (feed(&mut tracker, step), &step.rejected) {
            (Ok(n), None) => terminals += n,
            (Ok(n), Some(expected)) if expected == "BoardMismatch" => terminals += n,
            (Ok(_), Some(expected)) => {
                panic!("{} step {}: expected {} rejection", scenario.name, i, expected)
            }
            (Err(e), None) => panic!("{} step {}: unexpected error {}", scenario.name, i, e),
            (Err(e), Some(expected)) => {
                assert_eq!(error_name(&e), expected, "{} step {}", scenario.name, i);
                assert_eq!(tracker.snapshot(), before, "{} step {}: rejection mutated state", scenario.name, i);
            }
        }
    }

    let expect = &scenario.expect;
    let name = &scenario.name;
    assert_eq!(format!("{:?}", tracker.phase()), expect.phase, "{}: phase", name);
    if let Some(n) = expect.terminals {
        assert_eq!(terminals, n, "{}: terminal snapshots", name);
    }
    let Some(deal) = tracker.deal() else {
        return;
    };
    if let Some(contract) = &expect.contract {
        assert_eq!(deal.contract().map(|c| c.to_string()).as_ref(), Some(contract), "{}: contract", name);
    }
    if let Some(dummy) = &expect.dummy {
        assert_eq!(deal.dummy().map(|s| s.to_string()).as_ref(), Some(dummy), "{}: dummy", name);
    }
    if let Some(seat) = &expect.seat_to_act {
        assert_eq!(deal.seat_to_act().map(|s| s.to_string()).as_ref(), Some(seat), "{}: seat to act", name);
    }
    if let Some([ns, ew]) = expect.tricks {
        let won = deal.tricks_won();
        assert_eq!((won.ns, won.ew), (ns, ew), "{}: tricks", name);
    }
    if let Some(calls) = expect.calls {
        assert_eq!(deal.auction().len(), calls, "{}: calls", name);
    }
    if let Some(cards) = expect.cards_played {
        assert_eq!(deal.cards_played(), cards, "{}: cards played", name);
    }
}

#[test]
fn test_tracker_scenarios() {
    support::init_logging();
    let yaml = fs::read_to_string("../../tests/tracker/scenarios.yaml").expect("failed to read scenarios");
    let scenarios: Vec<Scenario> = serde_yaml::from_str(&yaml).expect("failed to parse scenarios");
    assert!(scenarios.len() >= 10);
    for scenario in &scenarios {
        run(scenario);
    }
}
