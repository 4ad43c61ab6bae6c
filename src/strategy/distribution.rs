//! Mixed-strategy distributions.
//!
//! Unlike [`resolve_action`](super::resolver::resolve_action), every band
//! contributes: a hand's weight in each band is credited to the option(s)
//! that band names, the fallback option absorbs whatever mass is left, and
//! the result is normalized to a probability per option.

use log::trace;
use rustc_hash::FxHashMap;
use serde::Serialize;

use super::action::{matching_options, ActionKey};
use super::band::Band;
use crate::hand::HandClass;
use crate::range::RangeCache;

/// Below this probability the most likely option is treated as noise and
/// [`ActionDistribution::best_index`] picks the fallback instead.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.1;

/// Probability of one option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionProbability {
    /// Option label as given
    pub option: String,
    /// Normalized key of the label
    pub key: ActionKey,
    pub probability: f64,
}

/// Probability per option, in option order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDistribution {
    entries: Vec<ActionProbability>,
    /// Index of the option recognized as the fallback action
    fallback: Option<usize>,
}

impl ActionDistribution {
    pub fn entries(&self) -> &[ActionProbability] {
        &self.entries
    }

    /// Probabilities in option order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.probability).collect()
    }

    /// Probability of the option(s) whose key equals `label`'s key.
    pub fn get(&self, label: &str) -> f64 {
        let key = ActionKey::new(label);
        self.entries
            .iter()
            .filter(|e| e.key == key)
            .map(|e| e.probability)
            .sum()
    }

    /// Probability per normalized option key.
    pub fn by_key(&self) -> FxHashMap<ActionKey, f64> {
        let mut out = FxHashMap::default();
        for e in &self.entries {
            *out.entry(e.key.clone()).or_insert(0.0) += e.probability;
        }
        out
    }

    /// Index of the option recognized as the fallback action.
    pub fn fallback_index(&self) -> Option<usize> {
        self.fallback
    }

    /// Sum of all probabilities (1 for a non-empty option list).
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.probability).sum()
    }

    /// Most likely option. When even the best option is below
    /// [`SIGNIFICANCE_THRESHOLD`], the fallback option (or 0) is returned.
    pub fn best_index(&self) -> usize {
        let best = self
            .entries
            .iter()
            .enumerate()
            .fold(None::<(usize, f64)>, |best, (i, e)| match best {
                Some((_, p)) if p >= e.probability => best,
                _ => Some((i, e.probability)),
            });

        match best {
            Some((i, p)) if p >= SIGNIFICANCE_THRESHOLD => i,
            _ => self.fallback.unwrap_or(0),
        }
    }
}

/// Distribution over `options` for `hand`, using `cache` for range lookups.
///
/// A band whose action matches several options by verb alone (a bare
/// `"open"` facing `"Open 2bb"` and `"Open 2.5bb"`) splits its weight evenly
/// between them. A band matching no option contributes nothing.
pub fn distribute_probabilities_in<S: AsRef<str>>(
    cache: &RangeCache,
    options: &[S],
    hand: HandClass,
    bands: &[Band],
    fallback: &str,
) -> ActionDistribution {
    let keys: Vec<ActionKey> = options.iter().map(|o| ActionKey::new(o.as_ref())).collect();
    let mut weights = vec![0.0f64; keys.len()];

    for band in bands {
        let weight = band.parsed(cache).get(hand).unwrap_or(0.0);
        if weight <= 0.0 {
            continue;
        }

        let targets = matching_options(&keys, &ActionKey::new(&band.action));
        if targets.is_empty() {
            trace!("{}: band {:?} matches no option", hand, band.action);
            continue;
        }

        let share = weight / targets.len() as f64;
        for i in targets {
            weights[i] += share;
        }
    }

    let fallback_key = ActionKey::new(fallback);
    let fallback_idx = if fallback_key.is_empty() {
        None
    } else {
        keys.iter().position(|k| k.verb() == fallback_key.verb())
    };

    if let Some(fb) = fallback_idx {
        let others: f64 = weights
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != fb)
            .map(|(_, w)| w)
            .sum();
        weights[fb] = (1.0 - others).max(0.0);
    }

    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in &mut weights {
            *w /= total;
        }
    } else if !weights.is_empty() {
        weights.iter_mut().for_each(|w| *w = 0.0);
        weights[fallback_idx.unwrap_or(0)] = 1.0;
    }

    let entries = options
        .iter()
        .zip(keys)
        .zip(weights)
        .map(|((option, key), probability)| ActionProbability {
            option: option.as_ref().to_string(),
            key,
            probability,
        })
        .collect();

    ActionDistribution { entries, fallback: fallback_idx }
}

/// [`distribute_probabilities_in`] through the process-wide range cache.
pub fn distribute_probabilities<S: AsRef<str>>(
    options: &[S],
    hand: HandClass,
    bands: &[Band],
    fallback: &str,
) -> ActionDistribution {
    distribute_probabilities_in(RangeCache::global(), options, hand, bands, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn hand(code: &str) -> HandClass {
        code.parse().unwrap()
    }

    fn sb_vs_btn() -> (Vec<&'static str>, Vec<Band>) {
        let options = vec!["Fold", "Call", "3bet 7bb", "Jam 25bb"];
        let bands = vec![
            Band::new("JAM", "JJ:0.598, TT:0.760, AQo:0.989, KJo:0.913, A5s:0.588"),
            Band::new("3bet", "QQ+, JJ:0.198, TT:0.233, AKs, A5s:0.409, KJo:0.054"),
            Band::new("call", "JJ:0.204, TT:0.008, A9s, A5s:0.003, KJo:0.033"),
        ];
        (options, bands)
    }

    #[test]
    fn test_mixed_hand() {
        let (options, bands) = sb_vs_btn();
        let dist = distribute_probabilities(&options, hand("JJ"), &bands, "fold");
        let p = dist.probabilities();
        assert!((p[3] - 0.598).abs() < EPS);
        assert!((p[2] - 0.198).abs() < EPS);
        assert!((p[1] - 0.204).abs() < EPS);
        assert!(p[0].abs() < EPS);
        assert_eq!(dist.best_index(), 3);
    }

    #[test]
    fn test_fallback_absorbs_remainder() {
        let options = ["Fold", "Open 2.2x"];
        let bands = [Band::new("open", "KJo:0.25")];
        let dist = distribute_probabilities(&options, hand("KJo"), &bands, "fold");
        assert!((dist.get("fold") - 0.75).abs() < EPS);
        assert!((dist.get("open 2.2bb") - 0.25).abs() < EPS);
        assert_eq!(dist.fallback_index(), Some(0));
        assert_eq!(dist.best_index(), 0);
    }

    #[test]
    fn test_hand_in_no_band_is_pure_fallback() {
        let (options, bands) = sb_vs_btn();
        let dist = distribute_probabilities(&options, hand("72o"), &bands, "fold");
        assert_eq!(dist.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_overfull_weights_are_normalized() {
        let options = ["Fold", "Call", "Jam"];
        let bands = [Band::new("call", "AA:0.9"), Band::new("jam", "AA:0.6")];
        let dist = distribute_probabilities(&options, hand("AA"), &bands, "fold");
        let p = dist.probabilities();
        assert_eq!(p[0], 0.0);
        assert!((p[1] - 0.6).abs() < EPS);
        assert!((p[2] - 0.4).abs() < EPS);
    }

    #[test]
    fn test_same_action_bands_add_up() {
        let options = ["Fold", "Call"];
        let bands = [Band::new("call", "AA:0.3"), Band::new("Call", "AA:0.2")];
        let dist = distribute_probabilities(&options, hand("AA"), &bands, "fold");
        assert!((dist.get("call") - 0.5).abs() < EPS);
    }

    #[test]
    fn test_bare_action_splits_between_sizes() {
        let options = ["Fold", "Open 2bb", "Open 2.5bb"];
        let bands = [Band::new("open", "AA:0.8")];
        let dist = distribute_probabilities(&options, hand("AA"), &bands, "fold");
        let p = dist.probabilities();
        assert!((p[0] - 0.2).abs() < EPS);
        assert!((p[1] - 0.4).abs() < EPS);
        assert!((p[2] - 0.4).abs() < EPS);
    }

    #[test]
    fn test_sized_band_prefers_exact_option() {
        let options = ["Fold", "call", "3bet 6bb", "3bet 10bb"];
        let bands = [Band::new("3bet 10bb", "KK:0.4"), Band::new("3bet 6bb", "KK:0.3")];
        let dist = distribute_probabilities(&options, hand("KK"), &bands, "fold");
        let p = dist.probabilities();
        assert!((p[3] - 0.4).abs() < EPS);
        assert!((p[2] - 0.3).abs() < EPS);
        assert!((p[0] - 0.3).abs() < EPS);
    }

    #[test]
    fn test_no_fallback_option() {
        let options = ["Call", "Jam"];
        let dist = distribute_probabilities(&options, hand("72o"), &[Band::new("jam", "AA")], "fold");
        assert_eq!(dist.fallback_index(), None);
        assert_eq!(dist.probabilities(), vec![1.0, 0.0]);

        let dist = distribute_probabilities(&options, hand("AA"), &[Band::new("jam", "AA:0.3")], "fold");
        assert_eq!(dist.probabilities(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_best_index_ignores_noise() {
        let options = ["Call", "Jam", "3bet", "Limp", "Open", "Iso", "Raise", "Min", "Shove", "Bet", "Donk"];
        let bands: Vec<Band> = options.iter().map(|o| Band::new(*o, "AA:0.5")).collect();
        let dist = distribute_probabilities(&options, hand("AA"), &bands, "fold");
        assert!(dist.probabilities().iter().all(|&p| p < SIGNIFICANCE_THRESHOLD));
        assert_eq!(dist.best_index(), 0);
    }

    #[test]
    fn test_simplex_over_all_hands() {
        let (options, bands) = sb_vs_btn();
        let cache = RangeCache::new();
        for h in HandClass::all() {
            let dist = distribute_probabilities_in(&cache, &options, h, &bands, "fold");
            assert!(dist.probabilities().iter().all(|&p| p >= 0.0), "{}", h);
            assert!((dist.total() - 1.0).abs() < EPS, "{} sums to {}", h, dist.total());
        }
    }

    #[test]
    fn test_by_key() {
        let options = ["Fold", "Open 2.2x"];
        let dist = distribute_probabilities(&options, hand("AA"), &[Band::new("open", "AA")], "fold");
        let map = dist.by_key();
        assert_eq!(map[&ActionKey::new("open 2.2bb")], 1.0);
        assert_eq!(map[&ActionKey::new("fold")], 0.0);
    }

    #[test]
    fn test_empty_options() {
        let options: [&str; 0] = [];
        let dist = distribute_probabilities(&options, hand("AA"), &[Band::new("open", "AA")], "fold");
        assert!(dist.entries().is_empty());
        assert_eq!(dist.best_index(), 0);
    }
}
