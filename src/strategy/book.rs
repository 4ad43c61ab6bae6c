//! Strategy books loaded from JSON.
//!
//! A book is a list of patterns (decision spots). Each pattern names the
//! options offered at the spot and the ordered bands that answer it, so the
//! strategy data can be edited without recompiling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::action::display_label;
use super::band::Band;
use super::distribution::{distribute_probabilities_in, ActionDistribution};
use super::resolver::resolve_action_in;
use crate::hand::{HandClass, HandParseError};
use crate::range::{Diagnostic, RangeCache};

fn default_fallback() -> String {
    "fold".to_string()
}

fn default_min_weight() -> f64 {
    0.5
}

/// One decision spot and the bands that answer it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    pub id: String,
    pub label: String,
    /// Hero position, e.g. "BTN"
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub effective_stack_bb: f64,
    /// What the hero is facing, e.g. "Unopened" or "UTG open 2.3x"
    #[serde(default)]
    pub facing: String,
    /// Option labels in display order
    pub options: Vec<String>,
    /// Bands in precedence order
    pub bands: Vec<Band>,
    /// Action chosen when no band claims a hand
    #[serde(default = "default_fallback")]
    pub fallback: String,
    /// Threshold for bands without their own `min`
    #[serde(default = "default_min_weight")]
    pub default_min_weight: f64,
}

/// A quiz question for one hand at a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: String,
    pub hand: HandClass,
    pub position: String,
    pub effective_stack_bb: f64,
    pub facing: String,
    pub options: Vec<String>,
    /// Index of the correct option
    pub answer: usize,
    pub note: String,
}

impl Pattern {
    /// Index of the correct option for `hand` (first claiming band wins).
    pub fn answer(&self, cache: &RangeCache, hand: HandClass) -> usize {
        resolve_action_in(
            cache,
            &self.options,
            hand,
            &self.bands,
            &self.fallback,
            self.default_min_weight,
        )
    }

    /// Mixed-strategy distribution over the options for `hand`.
    pub fn distribution(&self, cache: &RangeCache, hand: HandClass) -> ActionDistribution {
        distribute_probabilities_in(cache, &self.options, hand, &self.bands, &self.fallback)
    }

    /// Index of the most likely option by strategy weight.
    pub fn best_by_weight(&self, cache: &RangeCache, hand: HandClass) -> usize {
        self.distribution(cache, hand).best_index()
    }

    /// Build the question shown for `hand`.
    pub fn question(&self, cache: &RangeCache, hand: HandClass) -> Question {
        let options: Vec<String> = self.options.iter().map(|o| display_label(o)).collect();
        let answer = self.answer(cache, hand);
        let note = format!(
            "{} / {} → {}",
            self.label,
            hand,
            options.get(answer).map(String::as_str).unwrap_or_default()
        );

        Question {
            id: format!("{}-{}bb-{}", self.id, self.effective_stack_bb, hand),
            hand,
            position: self.position.clone(),
            effective_stack_bb: self.effective_stack_bb,
            facing: self.facing.clone(),
            options,
            answer,
            note,
        }
    }

    /// Parser diagnostics for every band, tagged with the band's action.
    pub fn diagnostics(&self, cache: &RangeCache) -> Vec<(String, Diagnostic)> {
        self.bands
            .iter()
            .flat_map(|band| {
                band.parsed(cache)
                    .diagnostics()
                    .iter()
                    .map(|d| (band.action.clone(), d.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Validate the pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::MissingId);
        }
        if self.options.is_empty() {
            return Err(ConfigError::NoOptions(self.id.clone()));
        }
        if !is_weight(self.default_min_weight) {
            return Err(ConfigError::InvalidThreshold {
                pattern: self.id.clone(),
                value: self.default_min_weight,
            });
        }
        for band in &self.bands {
            if band.action.trim().is_empty() {
                return Err(ConfigError::EmptyAction(self.id.clone()));
            }
            if let Some(min) = band.min_weight {
                if !is_weight(min) {
                    return Err(ConfigError::InvalidThreshold {
                        pattern: self.id.clone(),
                        value: min,
                    });
                }
            }
        }
        Ok(())
    }
}

fn is_weight(w: f64) -> bool {
    w.is_finite() && (0.0..=1.0).contains(&w)
}

/// Root of a strategy book file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyBook {
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub patterns: Vec<Pattern>,
}

impl StrategyBook {
    /// Load a book from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse a book from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let book: Self = serde_json::from_str(json)?;
        book.validate()?;
        Ok(book)
    }

    /// Validate every pattern and check that ids are unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, pattern) in self.patterns.iter().enumerate() {
            pattern.validate()?;
            if self.patterns[..i].iter().any(|p| p.id == pattern.id) {
                return Err(ConfigError::DuplicateId(pattern.id.clone()));
            }
        }
        Ok(())
    }

    /// Pattern by id.
    pub fn pattern(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Patterns whose id or label contains `query` (case-insensitive) and
    /// whose id contains every tag in `required_tags`.
    pub fn search(&self, query: &str, required_tags: &[&str]) -> Vec<&Pattern> {
        let query = query.trim().to_lowercase();
        self.patterns
            .iter()
            .filter(|p| {
                let id = p.id.to_lowercase();
                let tagged = required_tags.iter().all(|t| id.contains(&t.to_lowercase()));
                let haystack = format!("{} {}", p.id, p.label).to_lowercase();
                tagged && (query.is_empty() || haystack.contains(&query))
            })
            .collect()
    }
}

/// Errors from loading a strategy book or reading hands for it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read strategy book: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse strategy book: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("pattern without an id")]
    MissingId,
    #[error("duplicate pattern id {0:?}")]
    DuplicateId(String),
    #[error("pattern {0:?} has no options")]
    NoOptions(String),
    #[error("pattern {0:?} has a band without an action")]
    EmptyAction(String),
    #[error("pattern {pattern:?}: threshold {value} is out of range [0, 1]")]
    InvalidThreshold { pattern: String, value: f64 },
    #[error(transparent)]
    Hand(#[from] HandParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK_PATH: &str = "configs/patterns.json";

    fn hand(code: &str) -> HandClass {
        code.parse().unwrap()
    }

    fn minimal(pattern: &str) -> String {
        format!(r#"{{ "version": "1.0", "name": "Test", "patterns": [{}] }}"#, pattern)
    }

    #[test]
    fn test_defaults() {
        let json = minimal(
            r#"{ "id": "btn", "label": "BTN Open", "options": ["Fold", "Open 2.2x"],
                 "bands": [{ "action": "open", "range": "22+" }] }"#,
        );
        let book = StrategyBook::from_json_str(&json).unwrap();
        let pattern = book.pattern("btn").unwrap();
        assert_eq!(pattern.fallback, "fold");
        assert_eq!(pattern.default_min_weight, 0.5);
        assert_eq!(pattern.position, "");
    }

    #[test]
    fn test_validation_errors() {
        let no_options = minimal(r#"{ "id": "a", "label": "A", "options": [], "bands": [] }"#);
        assert!(matches!(
            StrategyBook::from_json_str(&no_options),
            Err(ConfigError::NoOptions(_))
        ));

        let bad_min = minimal(
            r#"{ "id": "a", "label": "A", "options": ["Fold"],
                 "bands": [{ "action": "open", "min": 1.5, "range": "AA" }] }"#,
        );
        assert!(matches!(
            StrategyBook::from_json_str(&bad_min),
            Err(ConfigError::InvalidThreshold { .. })
        ));

        let dup = minimal(
            r#"{ "id": "a", "label": "A", "options": ["Fold"], "bands": [] },
               { "id": "a", "label": "B", "options": ["Fold"], "bands": [] }"#,
        );
        assert!(matches!(StrategyBook::from_json_str(&dup), Err(ConfigError::DuplicateId(_))));

        assert!(matches!(StrategyBook::from_json_str("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            StrategyBook::from_json_file("configs/does_not_exist.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_load_book_file() {
        let book = StrategyBook::from_json_file(BOOK_PATH).unwrap();
        assert!(!book.patterns.is_empty());

        let cache = RangeCache::new();
        for pattern in &book.patterns {
            for h in HandClass::all() {
                assert!(pattern.answer(&cache, h) < pattern.options.len());
            }
        }
    }

    #[test]
    fn test_btn_open_answers() {
        let book = StrategyBook::from_json_file(BOOK_PATH).unwrap();
        let pattern = book.pattern("btn-open ante").unwrap();
        let cache = RangeCache::new();

        assert_eq!(pattern.answer(&cache, hand("AA")), 1);
        assert_eq!(pattern.answer(&cache, hand("66")), 1);
        assert_eq!(pattern.answer(&cache, hand("44")), 1); // 0.686
        assert_eq!(pattern.answer(&cache, hand("K3s")), 1); // 0.489 vs min 0.05
        assert_eq!(pattern.answer(&cache, hand("72o")), 0);
        assert_eq!(pattern.best_by_weight(&cache, hand("K3s")), 0);
    }

    #[test]
    fn test_sb_vs_btn_mixed() {
        let book = StrategyBook::from_json_file(BOOK_PATH).unwrap();
        let pattern = book.pattern("sb-vs-btn ante").unwrap();
        let cache = RangeCache::new();

        // JAM is listed first, so a hand it holds above 0.05 jams
        assert_eq!(pattern.answer(&cache, hand("JJ")), 3);
        assert_eq!(pattern.answer(&cache, hand("AA")), 2);
        assert_eq!(pattern.answer(&cache, hand("A9s")), 1);

        let dist = pattern.distribution(&cache, hand("JJ"));
        assert!((dist.total() - 1.0).abs() < 1e-9);
        assert_eq!(dist.best_index(), 3);
    }

    #[test]
    fn test_question() {
        let book = StrategyBook::from_json_file(BOOK_PATH).unwrap();
        let pattern = book.pattern("btn-open ante").unwrap();
        let q = pattern.question(&RangeCache::new(), hand("AKo"));
        assert_eq!(q.id, "btn-open ante-40bb-AKo");
        assert_eq!(q.options, vec!["Fold", "Open 2.2bb"]);
        assert_eq!(q.answer, 1);
        assert!(q.note.ends_with("AKo → Open 2.2bb"));
    }

    #[test]
    fn test_search() {
        let book = StrategyBook::from_json_file(BOOK_PATH).unwrap();
        assert_eq!(book.search("", &[]).len(), book.patterns.len());
        assert!(book.search("sb vs btn", &[]).iter().all(|p| p.id.contains("sb-vs-btn")));
        assert!(book.search("", &["chase"]).iter().all(|p| p.id.contains("chase")));
        assert!(!book.search("", &["ante"]).is_empty());
        assert!(book.search("no such spot", &[]).is_empty());
    }

    #[test]
    fn test_book_diagnostics_report_typos() {
        let book = StrategyBook::from_json_file(BOOK_PATH).unwrap();
        let pattern = book.pattern("btn open2 ante").unwrap();
        let diagnostics = pattern.diagnostics(&RangeCache::new());
        // "QT-KT" and "67s"/"78s" are not valid notation
        assert_eq!(diagnostics.len(), 3);
        assert!(diagnostics.iter().all(|(action, _)| action == "Jam"));
    }
}
