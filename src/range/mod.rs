//! Range spec notation.
//!
//! ## Modules
//!
//! - `token`: classification and expansion of single tokens (`66+`, `AQo-AJo`, ...)
//! - `parser`: comma-separated specs with `:weight` suffixes into a [`RangeMap`]
//! - `cache`: memoized parsing keyed by normalized spec text

pub mod cache;
pub mod parser;
pub mod token;

pub use cache::{normalize_spec, parse_range_spec, RangeCache};
pub use parser::{parse_range_spec_uncached, Diagnostic, ParsedRange, RangeMap, DEFAULT_WEIGHT};
pub use token::{classify_token, expand_token, RangeToken, TokenError};
