use bridge_core::io::pbn;
use bridge_core::{HandState, ParseError, Seat, Strain};
use bridge_tracker::DealFingerprint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("malformed analysis: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bad board number {0:?}")]
    Board(String),
    #[error("bad deal in analysis: {0}")]
    Deal(#[from] ParseError),
    #[error("unknown seat {0:?} in trick table")]
    Seat(String),
    #[error("unknown strain {0:?} in trick table")]
    Strain(String),
    #[error("{seat} cannot take {tricks} tricks in {strain}")]
    TooManyTricks { seat: Seat, strain: Strain, tricks: u8 },
}

/// Tricks each seat takes as declarer in each strain with perfect play.
///
/// Rows are seats in [`Seat::idx`] order, columns strains in
/// [`Strain::idx`] order (clubs, diamonds, hearts, spades, notrump). Feeds
/// sometimes leave strains out; those entries are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct DoubleDummyTable {
    pub fingerprint: DealFingerprint,
    tricks: [[Option<u8>; 5]; 4],
}

/// Deserialized form of [`DoubleDummyTable`], checked by
/// [`DoubleDummyTable::new`] before use.
#[derive(Deserialize)]
struct RawTable {
    fingerprint: DealFingerprint,
    tricks: [[Option<u8>; 5]; 4],
}

impl TryFrom<RawTable> for DoubleDummyTable {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Self::new(raw.fingerprint, raw.tricks)
    }
}

impl DoubleDummyTable {
    pub fn new(fingerprint: DealFingerprint, tricks: [[Option<u8>; 5]; 4]) -> Result<Self, TableError> {
        for seat in Seat::ALL {
            for strain in Strain::ALL {
                if let Some(t) = tricks[seat.idx()][strain.idx()] {
                    if t > 13 {
                        return Err(TableError::TooManyTricks { seat, strain, tricks: t });
                    }
                }
            }
        }
        Ok(Self { fingerprint, tricks })
    }

    pub fn tricks(&self, declarer: Seat, strain: Strain) -> Option<u8> {
        self.tricks[declarer.idx()][strain.idx()]
    }
}

impl fmt::Display for DoubleDummyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for strain in Strain::ALL {
            write!(f, "{:>3}", strain.to_string())?;
        }
        for seat in Seat::ALL {
            write!(f, "\n{:<3}", seat.to_char())?;
            for strain in Strain::ALL {
                match self.tricks(seat, strain) {
                    Some(t) => write!(f, "{:>3}", t)?,
                    None => write!(f, "{:>3}", "-")?,
                }
            }
        }
        Ok(())
    }
}

/// One analysis message: the trick table plus the par result when the
/// producer sent one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleDummyResult {
    pub table: DoubleDummyTable,
    pub par_contract: Option<String>,
    pub par_score: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

impl NumberOrText {
    fn to_i64(&self) -> Option<i64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawResult {
    board: NumberOrText,
    hands: Option<String>,
    tricks: HashMap<String, HashMap<String, u8>>,
    #[serde(rename = "cNS")]
    par_contract: Option<String>,
    #[serde(rename = "sNS")]
    par_score: Option<NumberOrText>,
}

impl DoubleDummyResult {
    /// Reads a `dd_result` payload:
    /// `{"board": 4, "hands": "N:... ... ... ...", "tricks": {"N": {"S": 10, ...}, ...}}`.
    /// Without `hands` the table is only identified by its board number.
    pub fn from_json(value: &Value) -> Result<Self, TableError> {
        let raw = RawResult::deserialize(value)?;
        let board = raw
            .board
            .to_i64()
            .and_then(|b| u32::try_from(b).ok())
            .ok_or_else(|| TableError::Board(format!("{:?}", raw.board)))?;

        let fingerprint = match &raw.hands {
            Some(deal) => {
                let hands = pbn::parse_deal(deal)?.map(HandState::from);
                DealFingerprint::from_hands(board, &hands)
            }
            None => DealFingerprint::board_only(board),
        };

        let mut tricks = [[None; 5]; 4];
        for (seat_key, row) in &raw.tricks {
            let seat: Seat = seat_key.parse().map_err(|_| TableError::Seat(seat_key.clone()))?;
            for (strain_key, count) in row {
                let strain = parse_strain(strain_key).ok_or_else(|| TableError::Strain(strain_key.clone()))?;
                tricks[seat.idx()][strain.idx()] = Some(*count);
            }
        }

        Ok(Self {
            table: DoubleDummyTable::new(fingerprint, tricks)?,
            par_contract: raw.par_contract,
            par_score: raw
                .par_score
                .as_ref()
                .and_then(NumberOrText::to_i64)
                .and_then(|s| i32::try_from(s).ok()),
        })
    }
}

fn parse_strain(key: &str) -> Option<Strain> {
    match key.trim().to_ascii_uppercase().as_str() {
        "NT" | "N" => Some(Strain::NoTrump),
        k if k.chars().count() == 1 => k.chars().next().and_then(Strain::from_char),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "type": "dd_result",
            "board": "4",
            "hands": "N:AKQJ.AKQ.AKQ.AKQ T98.JT98.JT9.JT9 765.765.8765.876 432.432.432.5432",
            "tricks": {
                "N": {"C": 13, "D": 13, "H": 13, "S": 13, "NT": 13},
                "S": {"C": 12, "D": 12, "H": 12, "S": 12},
                "E": {"C": 0, "D": 0, "H": 0, "S": 0, "N": 0}
            },
            "cNS": "7NT N",
            "sNS": "-1520"
        })
    }

    #[test]
    fn test_from_json() {
        let result = DoubleDummyResult::from_json(&sample()).unwrap();
        let table = &result.table;
        assert_eq!(table.fingerprint.board, 4);
        assert!(table.fingerprint.hands.is_some());
        assert_eq!(table.tricks(Seat::North, Strain::NoTrump), Some(13));
        assert_eq!(table.tricks(Seat::South, Strain::Hearts), Some(12));
        assert_eq!(table.tricks(Seat::South, Strain::NoTrump), None);
        assert_eq!(table.tricks(Seat::West, Strain::Clubs), None);
        assert_eq!(result.par_contract.as_deref(), Some("7NT N"));
        assert_eq!(result.par_score, Some(-1520));
    }

    #[test]
    fn test_board_only_table() {
        let result = DoubleDummyResult::from_json(&json!({"board": 20, "tricks": {}})).unwrap();
        assert_eq!(result.table.fingerprint, DealFingerprint::board_only(20));
    }

    #[test]
    fn test_rejects_bad_payloads() {
        assert!(matches!(
            DoubleDummyResult::from_json(&json!({"tricks": {}})),
            Err(TableError::Json(_))
        ));
        assert!(matches!(
            DoubleDummyResult::from_json(&json!({"board": "x", "tricks": {}})),
            Err(TableError::Board(_))
        ));
        assert!(matches!(
            DoubleDummyResult::from_json(&json!({"board": 1, "tricks": {"Q": {"S": 1}}})),
            Err(TableError::Seat(_))
        ));
        assert!(matches!(
            DoubleDummyResult::from_json(&json!({"board": 1, "tricks": {"N": {"Z": 1}}})),
            Err(TableError::Strain(_))
        ));
        assert!(matches!(
            DoubleDummyResult::from_json(&json!({"board": 1, "tricks": {"N": {"S": 14}}})),
            Err(TableError::TooManyTricks { tricks: 14, .. })
        ));
        assert!(matches!(
            DoubleDummyResult::from_json(&json!({"board": 1, "hands": "N:AKQ", "tricks": {}})),
            Err(TableError::Deal(_))
        ));
    }

    #[test]
    fn test_deserialize_checks_trick_counts() {
        let table = DoubleDummyResult::from_json(&sample()).unwrap().table;
        let mut value = serde_json::to_value(&table).unwrap();
        assert_eq!(serde_json::from_value::<DoubleDummyTable>(value.clone()).unwrap(), table);

        value["tricks"][Seat::North.idx()][Strain::Spades.idx()] = json!(20);
        let err = serde_json::from_value::<DoubleDummyTable>(value).unwrap_err();
        assert!(err.to_string().contains("cannot take 20 tricks"));
    }

    #[test]
    fn test_display() {
        let result = DoubleDummyResult::from_json(&sample()).unwrap();
        let text = result.table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "     C  D  H  S NT");
        assert_eq!(lines[1], "N   13 13 13 13 13");
        assert_eq!(lines[3], "S   12 12 12 12  -");
        assert_eq!(lines[4], "W    -  -  -  -  -");
    }
}
