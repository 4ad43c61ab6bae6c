//! Bands: one action and the range of hands it is played with.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::range::{ParsedRange, RangeCache};

/// One possible response at a spot and the hands it is played with.
///
/// A hand is "in" the band when its weight in `range` reaches the band's
/// `min_weight` (or the caller's default threshold when unset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Action name, e.g. `"open"` or `"3bet 10bb"`
    pub action: String,
    /// Range spec, e.g. `"66+, A5s+, KJo:0.75"`
    pub range: String,
    /// Minimum weight for the band to claim a hand
    #[serde(default, alias = "min", skip_serializing_if = "Option::is_none")]
    pub min_weight: Option<f64>,
}

impl Band {
    pub fn new(action: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            range: range.into(),
            min_weight: None,
        }
    }

    /// Builder method: set the minimum weight.
    pub fn with_min_weight(mut self, min_weight: f64) -> Self {
        self.min_weight = Some(min_weight);
        self
    }

    /// Threshold for this band, falling back to `default_min`.
    pub fn threshold(&self, default_min: f64) -> f64 {
        self.min_weight.unwrap_or(default_min)
    }

    /// Parsed range of this band.
    pub fn parsed(&self, cache: &RangeCache) -> Arc<ParsedRange> {
        cache.get_or_parse(&self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_min_alias() {
        let band: Band = serde_json::from_str(r#"{"action": "open", "min": 0.05, "range": "22+"}"#).unwrap();
        assert_eq!(band.min_weight, Some(0.05));
        assert_eq!(band.threshold(0.5), 0.05);

        let band: Band = serde_json::from_str(r#"{"action": "call", "range": "AA"}"#).unwrap();
        assert_eq!(band.min_weight, None);
        assert_eq!(band.threshold(0.5), 0.5);
    }

    #[test]
    fn test_builder() {
        let band = Band::new("jam", "22+").with_min_weight(0.3);
        assert_eq!(band.threshold(0.9), 0.3);
        let json = serde_json::to_string(&Band::new("jam", "22+")).unwrap();
        assert_eq!(json, r#"{"action":"jam","range":"22+"}"#);
    }
}
