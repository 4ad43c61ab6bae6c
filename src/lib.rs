//! # Preflop Ranges
//!
//! Parses compact poker range notation into per-hand weights and resolves
//! which option a hand takes at a preflop decision spot.
//!
//! ## Quick Start
//!
//! ```ignore
//! use preflop_ranges::{resolve_action, Band, HandClass};
//!
//! let options = ["Fold", "Open 2.2bb"];
//! let bands = [Band::new("open", "22+, A2s+, KTo+")];
//! let hand: HandClass = "AKo".parse()?;
//!
//! assert_eq!(resolve_action(&options, hand, &bands, "fold", 0.5), 1);
//! ```
//!
//! ## Modules
//!
//! - [`hand`]: the 169 starting-hand classes
//! - [`range`]: range notation tokens, the permissive parser and its cache
//! - [`strategy`]: action keys, bands, resolution and distributions, books
//! - [`chart`]: 13x13 charts of a pattern
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  StrategyBook (JSON patterns)                │
//! │   options  +  ordered bands (action, range, min weight)      │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!               ┌───────────────┴───────────────┐
//!               ▼                               ▼
//!       ┌───────────────┐               ┌───────────────┐
//!       │   resolver    │               │ distribution  │
//!       │ first match   │               │  all bands    │
//!       └───────────────┘               └───────────────┘
//!               │                               │
//!               └───────────────┬───────────────┘
//!                               ▼
//!                 ┌───────────────────────────┐
//!                 │ RangeCache → parser/token │
//!                 │   spec → weight per hand  │
//!                 └───────────────────────────┘
//! ```

/// Starting-hand classes.
pub mod hand;

/// Range notation parsing and caching.
pub mod range;

/// Action resolution over ordered bands.
pub mod strategy;

/// Range charts.
pub mod chart;

// Re-export commonly used types at crate root for convenience
pub use chart::{HandStrategy, RangeChart};
pub use hand::{HandClass, HandParseError};
pub use range::{
    expand_token, parse_range_spec, parse_range_spec_uncached, Diagnostic, ParsedRange, RangeCache,
    RangeMap,
};
pub use strategy::{
    distribute_probabilities, resolve_action, ActionDistribution, ActionKey, Band, ConfigError,
    Pattern, StrategyBook,
};
