//! Memoized range parsing.
//!
//! Range specs are static strategy data, so each distinct spec is parsed once
//! and shared. Entries are only ever inserted, never replaced or evicted, which
//! keeps lookups safe to run from many threads at once.

use log::trace;
use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock, RwLock};

use super::parser::{parse_range_spec_uncached, ParsedRange};

/// Cache key for a spec: whitespace runs collapsed to one space, ends trimmed.
pub fn normalize_spec(spec: &str) -> String {
    spec.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Insert-only cache of parsed range specs.
#[derive(Debug, Default)]
pub struct RangeCache {
    /// normalized spec -> parsed range
    entries: RwLock<FxHashMap<String, Arc<ParsedRange>>>,
}

impl RangeCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache shared by the whole process.
    pub fn global() -> &'static RangeCache {
        static GLOBAL: OnceLock<RangeCache> = OnceLock::new();
        GLOBAL.get_or_init(RangeCache::new)
    }

    /// Parsed range for a spec, parsing it on first use.
    ///
    /// Specs that normalize to the same key share one instance.
    pub fn get_or_parse(&self, spec: &str) -> Arc<ParsedRange> {
        let key = normalize_spec(spec);

        if let Some(hit) = self.read_entries().get(&key) {
            trace!("range cache hit: {:?}", key);
            return Arc::clone(hit);
        }

        let parsed = Arc::new(parse_range_spec_uncached(&key));
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        // Another thread may have inserted the same key since the read.
        Arc::clone(entries.entry(key).or_insert(parsed))
    }

    /// Number of cached specs.
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, FxHashMap<String, Arc<ParsedRange>>> {
        // Entries are never mutated after insertion, so a poisoned lock still
        // holds consistent data.
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// Parse a range spec through the process-wide cache.
pub fn parse_range_spec(spec: &str) -> Arc<ParsedRange> {
    RangeCache::global().get_or_parse(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::HandClass;

    #[test]
    fn test_normalize_spec() {
        assert_eq!(normalize_spec("  66+,\n   A5s+ ,\tKJo:0.5  "), "66+, A5s+ , KJo:0.5");
        assert_eq!(normalize_spec("   "), "");
    }

    #[test]
    fn test_same_normalized_spec_shares_instance() {
        let cache = RangeCache::new();
        let a = cache.get_or_parse("AA, KK:0.5");
        let b = cache.get_or_parse("  AA,   KK:0.5 \n");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        let c = cache.get_or_parse("AA,KK:0.5");
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(a.map(), c.map());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_empty_spec_is_empty_range() {
        let cache = RangeCache::new();
        assert!(cache.get_or_parse("").map().is_empty());
        assert!(cache.get_or_parse("  \n ").map().is_empty());
    }

    #[test]
    fn test_global_parse() {
        let aa: HandClass = "AA".parse().unwrap();
        let first = parse_range_spec("QQ+:0.75");
        let second = parse_range_spec("QQ+:0.75");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.get(aa), Some(0.75));
    }

    #[test]
    fn test_concurrent_lookups() {
        use rayon::prelude::*;

        let cache = RangeCache::new();
        let specs = ["22+", "A2s+", "K9o+, QTs+", "22+"];
        let sizes: Vec<usize> = (0..64)
            .into_par_iter()
            .map(|i| cache.get_or_parse(specs[i % specs.len()]).map().len())
            .collect();

        assert_eq!(cache.len(), 3);
        assert_eq!(sizes[0], 13);
        assert_eq!(sizes[1], 12);
    }
}
