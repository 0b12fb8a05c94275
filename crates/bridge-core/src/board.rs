use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Seat {
    #[default]
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partnership {
    NS,
    EW,
}

impl Partnership {
    pub const ALL: [Partnership; 2] = [Partnership::NS, Partnership::EW];

    pub fn contains(self, seat: Seat) -> bool {
        seat.partnership() == self
    }

    pub fn idx(self) -> usize {
        match self {
            Partnership::NS => 0,
            Partnership::EW => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Partnership::NS => Partnership::EW,
            Partnership::EW => Partnership::NS,
        }
    }
}

impl fmt::Display for Partnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partnership::NS => write!(f, "NS"),
            Partnership::EW => write!(f, "EW"),
        }
    }
}

impl Seat {
    /// Clockwise order.
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub fn partnership(self) -> Partnership {
        match self {
            Seat::North | Seat::South => Partnership::NS,
            Seat::East | Seat::West => Partnership::EW,
        }
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn idx(self) -> usize {
        match self {
            Seat::North => 0,
            Seat::East => 1,
            Seat::South => 2,
            Seat::West => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Seat::ALL[index % 4]
    }

    /// The seat `steps` places clockwise from this one.
    ///
    /// Every seat the feed leaves implicit is derived through this: the
    /// caller of auction call `i` is `dealer.offset(i)` and the player of
    /// trick card `i` is `leader.offset(i)`.
    pub fn offset(self, steps: usize) -> Self {
        Seat::from_index(self.idx() + steps % 4)
    }

    pub fn partner(self) -> Self {
        self.offset(2)
    }

    /// Left-hand opponent (next in clockwise order).
    pub fn lho(self) -> Self {
        self.offset(1)
    }

    /// Right-hand opponent (previous in clockwise order).
    pub fn rho(self) -> Self {
        self.offset(3)
    }

    pub fn to_char(self) -> char {
        match self {
            Seat::North => 'N',
            Seat::East => 'E',
            Seat::South => 'S',
            Seat::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Seat::North),
            'E' => Some(Seat::East),
            'S' => Some(Seat::South),
            'W' => Some(Seat::West),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        }
    }

    pub fn dealer_from_board_number(board_number: u32) -> Self {
        let index = (board_number + 3) % 4;
        Seat::ALL[index as usize]
    }
}

impl FromStr for Seat {
    type Err = ParseError;

    /// Accepts `N`, `north`, `North` and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let seat = match t.to_ascii_lowercase().as_str() {
            "n" | "north" => Seat::North,
            "e" | "east" => Seat::East,
            "s" | "south" => Seat::South,
            "w" | "west" => Seat::West,
            _ => return Err(ParseError::Seat(s.to_string())),
        };
        Ok(seat)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vulnerability {
    #[default]
    None,
    NS,
    EW,
    Both,
}

impl Vulnerability {
    pub fn is_vulnerable(self, seat: Seat) -> bool {
        match self {
            Vulnerability::None => false,
            Vulnerability::NS => seat.partnership() == Partnership::NS,
            Vulnerability::EW => seat.partnership() == Partnership::EW,
            Vulnerability::Both => true,
        }
    }

    pub fn from_board_number(board_number: u32) -> Self {
        match board_number % 16 {
            1 | 8 | 11 | 14 => Vulnerability::None,
            2 | 5 | 12 | 15 => Vulnerability::NS,
            3 | 6 | 9 | 0 => Vulnerability::EW,
            _ => Vulnerability::Both,
        }
    }
}

impl FromStr for Vulnerability {
    type Err = ParseError;

    /// Accepts PBN (`None`, `NS`, `EW`, `All`), hyphenated (`N-S`) and LIN (`o`, `n`, `e`, `b`) spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vul = match s.trim().to_ascii_lowercase().as_str() {
            "none" | "-" | "o" | "0" | "love" => Vulnerability::None,
            "ns" | "n-s" | "n" => Vulnerability::NS,
            "ew" | "e-w" | "e" => Vulnerability::EW,
            "both" | "all" | "b" => Vulnerability::Both,
            _ => return Err(ParseError::Vulnerability(s.to_string())),
        };
        Ok(vul)
    }
}

impl fmt::Display for Vulnerability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Vulnerability::None => "None",
            Vulnerability::NS => "NS",
            Vulnerability::EW => "EW",
            Vulnerability::Both => "Both",
        };
        write!(f, "{}", s)
    }
}
