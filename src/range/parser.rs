//! Range spec parsing.
//!
//! A range spec is a comma-separated list of `token[:weight]` items, e.g.
//! `"66+, A5s-A2s, KJo:0.75"`. Parsing is permissive: items that cannot be
//! understood are dropped and reported as [`Diagnostic`]s, never as errors,
//! so one typo does not invalidate the rest of the range.

use log::debug;
use std::fmt;

use super::token::{classify_token, TokenError};
use crate::hand::{HandClass, NUM_HAND_CLASSES};

/// Weight used when an item has no (usable) weight suffix.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Mapping from hand class to weight in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct RangeMap {
    /// Weight per hand class index (0-168)
    weights: Vec<Option<f64>>,
}

impl Default for RangeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeMap {
    /// Create an empty range.
    pub fn new() -> Self {
        Self { weights: vec![None; NUM_HAND_CLASSES] }
    }

    /// Set the weight of a hand, replacing any previous weight.
    pub fn insert(&mut self, hand: HandClass, weight: f64) {
        self.weights[hand.index() as usize] = Some(weight);
    }

    /// Weight of a hand, if the range mentions it.
    pub fn get(&self, hand: HandClass) -> Option<f64> {
        self.weights[hand.index() as usize]
    }

    pub fn contains(&self, hand: HandClass) -> bool {
        self.get(hand).is_some()
    }

    /// Number of hand classes in the range.
    pub fn len(&self) -> usize {
        self.weights.iter().filter(|w| w.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over `(hand, weight)` pairs in hand class index order.
    pub fn iter(&self) -> impl Iterator<Item = (HandClass, f64)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .filter_map(|(i, w)| w.map(|w| (HandClass::from_index(i as u8), w)))
    }

    /// Combo count of the range with each class scaled by its weight.
    pub fn weighted_combos(&self) -> f64 {
        self.iter().map(|(hand, w)| hand.num_combos() as f64 * w).sum()
    }
}

/// Something the parser tolerated instead of failing on.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The item was dropped entirely.
    SkippedToken { item: String, reason: TokenError },
    /// The weight suffix was unusable and the default weight was applied.
    CoercedWeight { item: String, raw: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SkippedToken { item, reason } => {
                write!(f, "skipped {:?}: {}", item, reason)
            }
            Diagnostic::CoercedWeight { item, raw } => {
                write!(f, "weight {:?} in {:?} replaced by {}", raw, item, DEFAULT_WEIGHT)
            }
        }
    }
}

/// A parsed range together with what was skipped while parsing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRange {
    map: RangeMap,
    diagnostics: Vec<Diagnostic>,
}

impl ParsedRange {
    pub fn map(&self) -> &RangeMap {
        &self.map
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Weight of a hand in the range.
    pub fn get(&self, hand: HandClass) -> Option<f64> {
        self.map.get(hand)
    }
}

/// Parse a range spec without consulting any cache.
///
/// Later items overwrite earlier ones for the same hand.
pub fn parse_range_spec_uncached(spec: &str) -> ParsedRange {
    let mut parsed = ParsedRange::default();

    for item in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (hand_part, weight_part) = match item.split_once(':') {
            Some((hand, weight)) => (hand.trim(), Some(weight.trim())),
            None => (item, None),
        };

        let token = match classify_token(hand_part) {
            Ok(token) => token,
            Err(reason) => {
                debug!("skipping range item {:?}: {}", item, reason);
                parsed.diagnostics.push(Diagnostic::SkippedToken {
                    item: item.to_string(),
                    reason,
                });
                continue;
            }
        };

        let weight = match parse_weight(weight_part) {
            Some(w) => w,
            None => {
                let raw = weight_part.unwrap_or_default().to_string();
                debug!("range item {:?}: unusable weight {:?}, using {}", item, raw, DEFAULT_WEIGHT);
                parsed.diagnostics.push(Diagnostic::CoercedWeight {
                    item: item.to_string(),
                    raw,
                });
                DEFAULT_WEIGHT
            }
        };

        for hand in token.expand() {
            parsed.map.insert(hand, weight);
        }
    }

    parsed
}

/// Weight of an item's suffix. Returns `None` when the suffix is present
/// but is not a finite number in [0, 1].
fn parse_weight(raw: Option<&str>) -> Option<f64> {
    match raw {
        None | Some("") => Some(DEFAULT_WEIGHT),
        Some(s) => s
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite() && (0.0..=1.0).contains(w)),
    }
}
