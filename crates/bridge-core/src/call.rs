use crate::error::ParseError;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bids order by level, then strain, so `a > b` means `a` is a sufficient
/// bid over `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Call {
    Pass,
    Double,
    Redouble,
    Bid { level: u8, strain: Strain },
}

impl Call {
    pub fn is_bid(&self) -> bool {
        matches!(self, Call::Bid { .. })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Call::Pass)
    }

    /// Returns the level of this call, if it's a bid.
    pub fn level(&self) -> Option<u8> {
        match self {
            Call::Bid { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Returns the strain of this call, if it's a bid.
    pub fn strain(&self) -> Option<Strain> {
        match self {
            Call::Bid { strain, .. } => Some(*strain),
            _ => None,
        }
    }

    pub fn render(self) -> String {
        match self {
            Call::Pass => "P".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain),
        }
    }
}

impl FromStr for Call {
    type Err = ParseError;

    /// Accepts the usual spellings plus the LIN single letters (`p`, `d`, `r`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseError::Call(s.to_string());
        let t = s.trim().to_ascii_uppercase();
        match t.as_str() {
            "P" | "PASS" => return Ok(Call::Pass),
            "X" | "D" | "DBL" | "DOUBLE" => return Ok(Call::Double),
            "XX" | "R" | "RDBL" | "REDOUBLE" => return Ok(Call::Redouble),
            _ => {}
        }

        let mut chars = t.chars();
        let level = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(bad)? as u8;
        if !(1..=7).contains(&level) {
            return Err(bad());
        }
        let strain = chars.next().and_then(Strain::from_char).ok_or_else(bad)?;
        let rest: String = chars.collect();
        let trailing_ok = rest.is_empty() || (strain == Strain::NoTrump && rest == "T");
        if !trailing_ok {
            return Err(bad());
        }
        Ok(Call::Bid { level, strain })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_parsing() {
        assert_eq!("p".parse::<Call>(), Ok(Call::Pass));
        assert_eq!("d".parse::<Call>(), Ok(Call::Double));
        assert_eq!("XX".parse::<Call>(), Ok(Call::Redouble));
        assert_eq!(
            "1s".parse::<Call>(),
            Ok(Call::Bid { level: 1, strain: Strain::Spades })
        );
        assert_eq!(
            "3NT".parse::<Call>(),
            Ok(Call::Bid { level: 3, strain: Strain::NoTrump })
        );
        assert_eq!(
            "3n".parse::<Call>(),
            Ok(Call::Bid { level: 3, strain: Strain::NoTrump })
        );
        assert!("8S".parse::<Call>().is_err());
        assert!("0C".parse::<Call>().is_err());
        assert!("1SX".parse::<Call>().is_err());
        assert!("".parse::<Call>().is_err());
    }

    #[test]
    fn test_bid_ordering() {
        let one_nt: Call = "1N".parse().unwrap();
        let two_c: Call = "2C".parse().unwrap();
        let one_s: Call = "1S".parse().unwrap();
        assert!(two_c > one_nt);
        assert!(one_nt > one_s);
        assert_eq!(one_nt.render(), "1NT");
        assert!(one_s.is_bid());
        assert!(Call::Pass.is_pass());
    }
}
