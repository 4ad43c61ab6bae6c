//! Range notation tokens.
//!
//! A token is one comma-separated unit of a range spec with its `:weight`
//! suffix already removed. Supported forms, checked in this order:
//!
//! - `66+`: the pair and every higher pair
//! - `A5s+`: high rank fixed, kicker sweeps from the given rank up to one below it
//! - `88-77`: inclusive pair span, either direction
//! - `AQo-AJo`: inclusive kicker span sharing the high rank, either direction
//! - `66`, `AKs`, `72o`: a single hand class
//!
//! Ranks and suffixes are case-insensitive.

use std::fmt;
use thiserror::Error;

use crate::hand::{parse_rank, rank_char, HandClass, HandParseError, RANK_A};

/// Reason a token was not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("empty token")]
    Empty,
    #[error("invalid rank character {0:?}")]
    InvalidRank(char),
    #[error("unrecognized plus notation {0:?}")]
    MalformedPlus(String),
    #[error("plus notation {0:?} needs a kicker below the high rank")]
    PlusRankOrder(String),
    #[error("unrecognized span {0:?}")]
    MalformedSpan(String),
    #[error("span {0:?} must keep the same high rank on both ends")]
    LeadingRankMismatch(String),
    #[error("span {0:?} mixes suited and offsuit ends")]
    SuffixMismatch(String),
    #[error("span {0:?} has a kicker that is not below the high rank")]
    SpanRankOrder(String),
    #[error(transparent)]
    Hand(#[from] HandParseError),
}

/// A classified range token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeToken {
    /// `66+`
    PairPlus { rank: u8 },
    /// `A5s+`
    NonPairPlus { high: u8, low: u8, suited: bool },
    /// `88-77`
    PairSpan { from: u8, to: u8 },
    /// `AQo-AJo`
    NonPairSpan { high: u8, from: u8, to: u8, suited: bool },
    /// `66`, `AKs`
    Single(HandClass),
}

impl RangeToken {
    /// Expand the token into concrete hand classes.
    ///
    /// Plus forms are listed weakest first, spans strongest first.
    pub fn expand(&self) -> Vec<HandClass> {
        match *self {
            RangeToken::PairPlus { rank } => (rank..=RANK_A).map(HandClass::pair).collect(),
            RangeToken::NonPairPlus { high, low, suited } => (low..high)
                .filter_map(|kicker| HandClass::non_pair(high, kicker, suited))
                .collect(),
            RangeToken::PairSpan { from, to } => {
                (from.min(to)..=from.max(to)).rev().map(HandClass::pair).collect()
            }
            RangeToken::NonPairSpan { high, from, to, suited } => (from.min(to)..=from.max(to))
                .rev()
                .filter_map(|kicker| HandClass::non_pair(high, kicker, suited))
                .collect(),
            RangeToken::Single(hand) => vec![hand],
        }
    }
}

impl fmt::Display for RangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sfx = |suited: bool| if suited { 's' } else { 'o' };
        match *self {
            RangeToken::PairPlus { rank } => write!(f, "{0}{0}+", rank_char(rank)),
            RangeToken::NonPairPlus { high, low, suited } => {
                write!(f, "{}{}{}+", rank_char(high), rank_char(low), sfx(suited))
            }
            RangeToken::PairSpan { from, to } => {
                write!(f, "{0}{0}-{1}{1}", rank_char(from), rank_char(to))
            }
            RangeToken::NonPairSpan { high, from, to, suited } => write!(
                f,
                "{h}{}{s}-{h}{}{s}",
                rank_char(from),
                rank_char(to),
                h = rank_char(high),
                s = sfx(suited)
            ),
            RangeToken::Single(hand) => write!(f, "{}", hand),
        }
    }
}

/// Classify a single token (without its weight suffix).
pub fn classify_token(token: &str) -> Result<RangeToken, TokenError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Empty);
    }

    if let Some(body) = token.strip_suffix('+') {
        return classify_plus(token, body);
    }

    if let Some((start, end)) = token.split_once('-') {
        return classify_span(token, start, end);
    }

    Ok(RangeToken::Single(token.parse()?))
}

/// Classify and expand a token. Unrecognized tokens expand to nothing.
pub fn expand_token(token: &str) -> Vec<HandClass> {
    classify_token(token).map(|t| t.expand()).unwrap_or_default()
}

fn ranks_of(part: &str) -> Result<Vec<char>, TokenError> {
    let chars: Vec<char> = part.chars().collect();
    for &c in chars.iter().take(2) {
        parse_rank(c).ok_or(TokenError::InvalidRank(c))?;
    }
    Ok(chars)
}

fn suffix_of(c: char) -> Option<bool> {
    match c {
        's' | 'S' => Some(true),
        'o' | 'O' => Some(false),
        _ => None,
    }
}

/// Rank of a validated rank character.
fn rank(c: char) -> u8 {
    parse_rank(c).unwrap_or_default()
}

fn classify_plus(token: &str, body: &str) -> Result<RangeToken, TokenError> {
    let chars = ranks_of(body)?;

    match chars.as_slice() {
        &[a, b] if rank(a) == rank(b) => Ok(RangeToken::PairPlus { rank: rank(a) }),
        &[a, b, s] => {
            let suited = suffix_of(s).ok_or_else(|| TokenError::MalformedPlus(token.to_string()))?;
            let (high, low) = (rank(a), rank(b));
            if low >= high {
                return Err(TokenError::PlusRankOrder(token.to_string()));
            }
            Ok(RangeToken::NonPairPlus { high, low, suited })
        }
        _ => Err(TokenError::MalformedPlus(token.to_string())),
    }
}

fn classify_span(token: &str, start: &str, end: &str) -> Result<RangeToken, TokenError> {
    let s = ranks_of(start.trim())?;
    let e = ranks_of(end.trim())?;

    match (s.as_slice(), e.as_slice()) {
        (&[a1, a2], &[b1, b2]) if rank(a1) == rank(a2) && rank(b1) == rank(b2) => {
            Ok(RangeToken::PairSpan { from: rank(a1), to: rank(b1) })
        }
        (&[a1, a2, a3], &[b1, b2, b3]) => {
            let malformed = || TokenError::MalformedSpan(token.to_string());
            let suited = suffix_of(a3).ok_or_else(malformed)?;
            if suffix_of(b3).ok_or_else(malformed)? != suited {
                return Err(TokenError::SuffixMismatch(token.to_string()));
            }

            let high = rank(a1);
            if rank(b1) != high {
                return Err(TokenError::LeadingRankMismatch(token.to_string()));
            }

            let (from, to) = (rank(a2), rank(b2));
            if from >= high || to >= high {
                return Err(TokenError::SpanRankOrder(token.to_string()));
            }
            Ok(RangeToken::NonPairSpan { high, from, to, suited })
        }
        _ => Err(TokenError::MalformedSpan(token.to_string())),
    }
}
