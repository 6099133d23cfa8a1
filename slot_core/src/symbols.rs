use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Symbol {
    #[serde(rename = "C")]
    Cherry,
    #[serde(rename = "L")]
    Lemon,
    #[serde(rename = "O")]
    Orange,
    #[serde(rename = "W")]
    Watermelon,
}

impl Symbol {
    /// Reel alphabet in index order. Generator draws map onto this slice.
    pub const ALL: [Symbol; 4] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Orange,
        Symbol::Watermelon,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::COUNT]
    }

    pub fn to_index(self) -> usize {
        match self {
            Symbol::Cherry => 0,
            Symbol::Lemon => 1,
            Symbol::Orange => 2,
            Symbol::Watermelon => 3,
        }
    }

    /// Credits paid when all reels show this symbol.
    pub fn payout(self) -> u64 {
        match self {
            Symbol::Cherry => 10,
            Symbol::Lemon => 20,
            Symbol::Orange => 30,
            Symbol::Watermelon => 40,
        }
    }

    pub fn code(self) -> char {
        match self {
            Symbol::Cherry => 'C',
            Symbol::Lemon => 'L',
            Symbol::Orange => 'O',
            Symbol::Watermelon => 'W',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One spin's outcome, left to right.
pub type Roll = Vec<Symbol>;
