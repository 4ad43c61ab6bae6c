//! Single-answer resolution.
//!
//! Bands are consulted in order and the first one holding the hand at or
//! above its threshold decides the answer. Later bands are never consulted,
//! even if they would weigh the hand higher.

use log::trace;

use super::action::find_option_index;
use super::band::Band;
use crate::hand::HandClass;
use crate::range::RangeCache;

/// First band that claims `hand`, if any.
pub fn resolve_band<'b>(
    cache: &RangeCache,
    hand: HandClass,
    bands: &'b [Band],
    default_min: f64,
) -> Option<&'b Band> {
    bands.iter().find(|band| {
        let Some(weight) = band.parsed(cache).get(hand) else {
            return false;
        };
        let claimed = weight >= band.threshold(default_min);
        trace!("{} in {:?}: weight {} claimed={}", hand, band.action, weight, claimed);
        claimed
    })
}

/// Index of the option answering `hand`, using `cache` for range lookups.
///
/// Falls back to `fallback` when no band claims the hand, and to index 0
/// when neither the claiming action nor the fallback names an option.
pub fn resolve_action_in<S: AsRef<str>>(
    cache: &RangeCache,
    options: &[S],
    hand: HandClass,
    bands: &[Band],
    fallback: &str,
    default_min: f64,
) -> usize {
    let action = resolve_band(cache, hand, bands, default_min)
        .map(|band| band.action.as_str())
        .unwrap_or(fallback);
    find_option_index(options, action)
}

/// [`resolve_action_in`] through the process-wide range cache.
pub fn resolve_action<S: AsRef<str>>(
    options: &[S],
    hand: HandClass,
    bands: &[Band],
    fallback: &str,
    default_min: f64,
) -> usize {
    resolve_action_in(RangeCache::global(), options, hand, bands, fallback, default_min)
}
