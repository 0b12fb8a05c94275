//! Decoding of the table feed's JSON messages.
//!
//! Game events look like
//! `{"type":"game_event","event_type":"card_played","data":{"card":"SA"}}`.
//! Double-dummy results arrive as `{"type":"dd_result",...}` and are passed
//! through untouched for the advisor to interpret.

use crate::error::TrackerError;
use crate::event::Event;
use bridge_core::io::{lin, pbn};
use bridge_core::{Call, Card, Hand, Seat, Vulnerability};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A table event, with the board number when the feed stamped one.
    Game { board: Option<u32>, event: Event },
    /// A double-dummy result payload.
    Analysis(Value),
    /// A message type the tracker has no use for.
    Ignored(String),
}

/// Decodes one line of the feed.
pub fn decode_line(line: &str) -> Result<Message, TrackerError> {
    let value: Value = serde_json::from_str(line).map_err(malformed)?;
    decode(value)
}

pub fn decode(mut value: Value) -> Result<Message, TrackerError> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| TrackerError::MalformedEvent("message has no type".to_string()))?
        .to_string();
    match kind.as_str() {
        "game_event" => {
            let event_type = value
                .get("event_type")
                .and_then(Value::as_str)
                .ok_or_else(|| TrackerError::MalformedEvent("game event has no event_type".to_string()))?
                .to_string();
            let data = value.get_mut("data").map(Value::take).unwrap_or(Value::Null);
            decode_game_event(&event_type, data)
        }
        "dd_result" => Ok(Message::Analysis(value)),
        "double_dummy" => match value.get_mut("dd").map(Value::take) {
            Some(dd) => Ok(Message::Analysis(dd)),
            None => Err(TrackerError::MalformedEvent("double_dummy without dd".to_string())),
        },
        _ => Ok(Message::Ignored(kind)),
    }
}

/// Board numbers show up both as numbers and as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoardNumber {
    Number(u32),
    Text(String),
}

impl BoardNumber {
    fn value(&self) -> Result<u32, TrackerError> {
        match self {
            BoardNumber::Number(n) => Ok(*n),
            BoardNumber::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| TrackerError::MalformedEvent(format!("bad board number {:?}", s))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewDealData {
    board: BoardNumber,
    dealer: Option<String>,
    vul: Option<String>,
    #[serde(default)]
    hands: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct CallData {
    call: String,
    board: Option<BoardNumber>,
}

#[derive(Debug, Deserialize)]
struct CardData {
    card: String,
    board: Option<BoardNumber>,
}

#[derive(Debug, Deserialize)]
struct ClaimData {
    tricks_claimed: u8,
    claimer: Option<String>,
    board: Option<BoardNumber>,
}

#[derive(Debug, Deserialize)]
struct UndoData {
    count: u32,
    position: Option<String>,
    board: Option<BoardNumber>,
}

fn decode_game_event(event_type: &str, data: Value) -> Result<Message, TrackerError> {
    let (board, event) = match event_type {
        "new_deal" => {
            let d: NewDealData = from_data(event_type, data)?;
            let board = d.board.value()?;
            let event = Event::NewDeal {
                board,
                dealer: match d.dealer {
                    Some(s) => parse_field("dealer", &s)?,
                    None => Seat::dealer_from_board_number(board),
                },
                vulnerability: match d.vul {
                    Some(s) => parse_field::<Vulnerability>("vul", &s)?,
                    None => Vulnerability::from_board_number(board),
                },
                hands: parse_hands(&d.hands)?,
            };
            (Some(board), event)
        }
        "bid_made" => {
            let d: CallData = from_data(event_type, data)?;
            let call: Call = parse_field("call", &d.call)?;
            (board_of(d.board)?, Event::CallMade { call })
        }
        "card_played" => {
            let d: CardData = from_data(event_type, data)?;
            let card: Card = parse_field("card", &d.card)?;
            (board_of(d.board)?, Event::CardPlayed { card })
        }
        "claim_accepted" => {
            let d: ClaimData = from_data(event_type, data)?;
            let claimer = d.claimer.map(|s| parse_field("claimer", &s)).transpose()?;
            let event = Event::ClaimAccepted {
                tricks_claimed: d.tricks_claimed,
                claimer,
            };
            (board_of(d.board)?, event)
        }
        "undo" => {
            let d: UndoData = from_data(event_type, data)?;
            let position_hint = d.position.map(|s| parse_field("position", &s)).transpose()?;
            let event = Event::Undo {
                count: d.count,
                position_hint,
            };
            (board_of(d.board)?, event)
        }
        other => {
            return Err(TrackerError::MalformedEvent(format!("unknown event type {:?}", other)));
        }
    };
    Ok(Message::Game { board, event })
}

fn parse_hands(raw: &HashMap<String, String>) -> Result<[Option<Hand>; 4], TrackerError> {
    let mut hands: [Option<Hand>; 4] = Default::default();
    for (key, text) in raw {
        let seat: Seat = parse_field("hand seat", key)?;
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        // PBN hands separate suits with dots; LIN hands prefix each suit.
        let hand = if text.contains('.') {
            pbn::parse_hand(text)
        } else {
            lin::parse_hand(text)
        };
        hands[seat.idx()] = Some(hand.map_err(malformed)?);
    }
    Ok(hands)
}

fn board_of(board: Option<BoardNumber>) -> Result<Option<u32>, TrackerError> {
    board.map(|b| b.value()).transpose()
}

fn from_data<T: DeserializeOwned>(event_type: &str, data: Value) -> Result<T, TrackerError> {
    serde_json::from_value(data).map_err(|e| TrackerError::MalformedEvent(format!("{}: {}", event_type, e)))
}

fn parse_field<T>(field: &str, text: &str) -> Result<T, TrackerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.trim()
        .parse()
        .map_err(|e| TrackerError::MalformedEvent(format!("{}: {}", field, e)))
}

fn malformed(e: impl std::fmt::Display) -> TrackerError {
    TrackerError::MalformedEvent(e.to_string())
}
