//! Action resolution over ordered bands.
//!
//! A spot offers a list of option labels and an ordered list of [`Band`]s.
//! Two questions can be asked of it for a hand:
//!
//! - which single option is correct (`resolver`: first claiming band wins)
//! - how the hand is mixed between options (`distribution`: all bands count)
//!
//! ## Modules
//!
//! - `action`: option label normalization and matching
//! - `band`: the `Band` type
//! - `resolver`: first-match-wins resolution
//! - `distribution`: normalized probability per option
//! - `book`: strategy books (patterns) loaded from JSON

pub mod action;
pub mod band;
pub mod book;
pub mod distribution;
pub mod resolver;

pub use action::{display_label, find_option_index, ActionKey};
pub use band::Band;
pub use book::{ConfigError, Pattern, Question, StrategyBook};
pub use distribution::{
    distribute_probabilities, distribute_probabilities_in, ActionDistribution, ActionProbability,
    SIGNIFICANCE_THRESHOLD,
};
pub use resolver::{resolve_action, resolve_action_in, resolve_band};
