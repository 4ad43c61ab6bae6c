//! Preflop hand classes.
//!
//! There are 169 strategically distinct starting hands:
//! - 13 pairs (AA, KK, ..., 22)
//! - 78 suited hands (AKs, AQs, ..., 32s)
//! - 78 offsuit hands (AKo, AQo, ..., 32o)
//!
//! Ranks are numbered 0-12 for 2 through A, so a larger rank is a stronger
//! card. Hand codes are always written high rank first (`AKs`, never `KAs`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of distinct preflop hand classes.
pub const NUM_HAND_CLASSES: usize = 169;

/// Number of ranks in a deck.
pub const NUM_RANKS: u8 = 13;

/// Rank of an ace, the strongest rank.
pub const RANK_A: u8 = 12;

/// Rank characters for display, indexed by rank.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Parse a single rank character (case-insensitive).
pub fn parse_rank(c: char) -> Option<u8> {
    let upper = c.to_ascii_uppercase();
    RANK_CHARS.iter().position(|&r| r == upper).map(|r| r as u8)
}

/// Display character for a rank (0-12).
pub fn rank_char(rank: u8) -> char {
    RANK_CHARS[rank as usize]
}

/// Error returned when a string is not a valid hand code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandParseError {
    #[error("hand code must be 2 or 3 characters: {0:?}")]
    InvalidLength(String),
    #[error("invalid rank character: {0:?}")]
    InvalidRank(char),
    #[error("invalid suffix {0:?} (expected 's' or 'o')")]
    InvalidSuffix(char),
    #[error("non-pair hand {0:?} needs a suited or offsuit suffix")]
    MissingSuffix(String),
    #[error("pair {0:?} cannot be suited or offsuit")]
    SuffixedPair(String),
    #[error("first rank must be higher than the second: {0:?}")]
    RankOrder(String),
}

/// One of the 169 preflop hand classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandClass {
    /// Rank of first card (higher)
    rank1: u8,
    /// Rank of second card (lower or equal)
    rank2: u8,
    /// Whether suited (always false for pairs)
    suited: bool,
}

impl HandClass {
    /// Pocket pair of the given rank.
    pub fn pair(rank: u8) -> Self {
        debug_assert!(rank < NUM_RANKS, "rank must be 0-12");
        Self { rank1: rank, rank2: rank, suited: false }
    }

    /// Non-pair hand. Returns `None` unless `high` is strictly above `low`.
    pub fn non_pair(high: u8, low: u8, suited: bool) -> Option<Self> {
        (high < NUM_RANKS && low < high).then_some(Self { rank1: high, rank2: low, suited })
    }

    /// Get hand class from index (0-168).
    pub fn from_index(index: u8) -> Self {
        debug_assert!((index as usize) < NUM_HAND_CLASSES);
        if index < 13 {
            Self::pair(index)
        } else if index < 91 {
            let (r1, r2) = decode_triangular(index - 13);
            Self { rank1: r1, rank2: r2, suited: true }
        } else {
            let (r1, r2) = decode_triangular(index - 91);
            Self { rank1: r1, rank2: r2, suited: false }
        }
    }

    /// Get the hand class index (0-168).
    pub fn index(&self) -> u8 {
        if self.is_pair() {
            self.rank1
        } else if self.suited {
            13 + encode_triangular(self.rank1, self.rank2)
        } else {
            91 + encode_triangular(self.rank1, self.rank2)
        }
    }

    /// All 169 hand classes in index order.
    pub fn all() -> impl Iterator<Item = HandClass> {
        (0..NUM_HAND_CLASSES as u8).map(Self::from_index)
    }

    #[inline]
    pub fn high_rank(&self) -> u8 {
        self.rank1
    }

    #[inline]
    pub fn low_rank(&self) -> u8 {
        self.rank2
    }

    #[inline]
    pub fn is_pair(&self) -> bool {
        self.rank1 == self.rank2
    }

    #[inline]
    pub fn is_suited(&self) -> bool {
        self.suited
    }

    /// Number of card combinations for this hand class.
    pub fn num_combos(&self) -> u8 {
        if self.is_pair() {
            6 // C(4,2) = 6 pair combos
        } else if self.suited {
            4
        } else {
            12
        }
    }

    /// Position in the conventional 13x13 chart: AA top-left, suited hands
    /// above the diagonal, offsuit hands below it.
    pub fn grid_position(&self) -> (usize, usize) {
        let high = (RANK_A - self.rank1) as usize;
        let low = (RANK_A - self.rank2) as usize;

        if self.is_pair() || self.suited {
            (high, low)
        } else {
            (low, high)
        }
    }

    /// Inverse of [`HandClass::grid_position`].
    pub fn from_grid(row: usize, col: usize) -> Self {
        debug_assert!(row < 13 && col < 13);
        let high = RANK_A - row.min(col) as u8;
        let low = RANK_A - row.max(col) as u8;

        if row == col {
            Self::pair(high)
        } else {
            Self { rank1: high, rank2: low, suited: row < col }
        }
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut code = String::with_capacity(3);
        code.push(rank_char(self.rank1));
        code.push(rank_char(self.rank2));
        if !self.is_pair() {
            code.push(if self.suited { 's' } else { 'o' });
        }
        f.pad(&code)
    }
}

impl FromStr for HandClass {
    type Err = HandParseError;

    /// Parse a hand code like "AA", "AKs" or "72o" (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let chars: Vec<char> = s.chars().collect();

        if chars.len() < 2 || chars.len() > 3 {
            return Err(HandParseError::InvalidLength(s.to_string()));
        }

        let r1 = parse_rank(chars[0]).ok_or(HandParseError::InvalidRank(chars[0]))?;
        let r2 = parse_rank(chars[1]).ok_or(HandParseError::InvalidRank(chars[1]))?;

        if r1 == r2 {
            if chars.len() == 3 {
                return Err(HandParseError::SuffixedPair(s.to_string()));
            }
            return Ok(Self::pair(r1));
        }

        let suited = match chars.get(2) {
            Some('s' | 'S') => true,
            Some('o' | 'O') => false,
            Some(&c) => return Err(HandParseError::InvalidSuffix(c)),
            None => return Err(HandParseError::MissingSuffix(s.to_string())),
        };

        Self::non_pair(r1, r2, suited).ok_or_else(|| HandParseError::RankOrder(s.to_string()))
    }
}

impl Serialize for HandClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HandClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// Encode two ranks (r1 > r2) to triangular index.
fn encode_triangular(r1: u8, r2: u8) -> u8 {
    debug_assert!(r1 > r2);
    r1 * (r1 - 1) / 2 + r2
}

/// Decode triangular index to two ranks (r1 > r2).
fn decode_triangular(idx: u8) -> (u8, u8) {
    let mut r1 = 1u8;
    let mut remaining = idx;

    while remaining >= r1 {
        remaining -= r1;
        r1 += 1;
    }

    (r1, remaining)
}
