//! Action and option labels.
//!
//! Bands name actions loosely (`"open"`, `"JAM"`, `"3bet 10bb"`) while a spot
//! offers concrete option labels (`"Open 2.2x"`, `"Jam 25bb"`). Both sides are
//! reduced to an [`ActionKey`] before they are compared.

use serde::Serialize;
use std::fmt;

/// Comparable form of an action or option label.
///
/// Lower-cased, whitespace collapsed, and an `x` sizing suffix rewritten as
/// big blinds, so `"Open  2.2x"` and `"open 2.2bb"` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ActionKey(String);

impl ActionKey {
    pub fn new(label: &str) -> Self {
        let words: Vec<String> = label
            .split_whitespace()
            .map(|w| bb_units(&w.to_lowercase()))
            .collect();
        Self(words.join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First word of the key (`"open"` for `"open 2.2bb"`).
    pub fn verb(&self) -> &str {
        self.0.split(' ').next().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Rewrite a `2.2x` sizing word as `2.2bb`; other words are returned as is.
fn bb_units(word: &str) -> String {
    match word.strip_suffix(['x', 'X']) {
        Some(amount) if is_amount(amount) => format!("{}bb", amount),
        _ => word.to_string(),
    }
}

fn is_amount(s: &str) -> bool {
    !s.is_empty() && s.chars().any(|c| c.is_ascii_digit()) && s.parse::<f64>().is_ok()
}

/// Option label as shown to the user, with `x` sizings written as `bb`.
pub fn display_label(label: &str) -> String {
    label
        .split_whitespace()
        .map(bb_units)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indices of the options an action refers to.
///
/// Exact key matches win; otherwise every option sharing the action's verb
/// matches. Empty when nothing matches.
pub fn matching_options(options: &[ActionKey], action: &ActionKey) -> Vec<usize> {
    if action.is_empty() {
        return Vec::new();
    }

    let exact: Vec<usize> = positions(options, |o| o == action);
    if !exact.is_empty() {
        return exact;
    }
    positions(options, |o| o.verb() == action.verb())
}

fn positions(options: &[ActionKey], pred: impl Fn(&ActionKey) -> bool) -> Vec<usize> {
    options
        .iter()
        .enumerate()
        .filter(|&(_, o)| pred(o))
        .map(|(i, _)| i)
        .collect()
}

/// Index of the option an action selects, or 0 if none matches.
pub fn find_option_index<S: AsRef<str>>(options: &[S], action: &str) -> usize {
    let keys: Vec<ActionKey> = options.iter().map(|o| ActionKey::new(o.as_ref())).collect();
    matching_options(&keys, &ActionKey::new(action))
        .first()
        .copied()
        .unwrap_or(0)
}
